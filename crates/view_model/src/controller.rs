//! Контроллер списка экрана: владеет коллекцией, критериями и статусом,
//! ходит в удалённый источник и публикует снимки для слоя представления.
//!
//! Однопоточный: состояние в `RefCell`, заимствования никогда не
//! переживают `.await`. Устаревшие ответы отсекаются по номеру запроса.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use contracts::enums::ClosedStatus;
use contracts::shared::api::ListQuery;

use crate::aggregate::{AggregateSpec, Aggregates};
use crate::entity::ListEntity;
use crate::entity_store::EntityStore;
use crate::filter::{apply_filter, build_predicate, CriteriaPatch, FilterCriteria};
use crate::remote::{parse_status, RemoteSource, SyncError, TokenProvider};

/// Где применяются критерии
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Whole collection is loaded once and filtered locally.
    #[default]
    Client,
    /// Criteria and paging are sent to the remote source.
    Server,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerOptions {
    pub filter_mode: FilterMode,
    /// Page size sent with every load. In client mode this should cover the
    /// whole collection.
    pub page_size: u32,
    /// Apply status changes locally before the remote call returns.
    pub optimistic_status: bool,
    pub reload_after_mutation: bool,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            filter_mode: FilterMode::Client,
            page_size: 500,
            optimistic_status: false,
            reload_after_mutation: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Error,
}

/// Всё, что нужно слою представления в один момент времени
#[derive(Debug, Clone, PartialEq)]
pub struct ListSnapshot<T> {
    pub status: ViewStatus,
    /// Filtered subset in source order
    pub visible: Vec<T>,
    /// Size of the full local collection
    pub loaded_count: usize,
    pub aggregates: Option<Aggregates>,
    /// Last failure; the data above stays from the last good load.
    pub error: Option<SyncError>,
    pub criteria: FilterCriteria,
    /// 1-based
    pub page: u32,
    pub total_pages: u32,
    /// Total reported by the remote source
    pub total: u64,
}

impl<T> Default for ListSnapshot<T> {
    fn default() -> Self {
        Self {
            status: ViewStatus::Idle,
            visible: Vec::new(),
            loaded_count: 0,
            aggregates: None,
            error: None,
            criteria: FilterCriteria::default(),
            page: 1,
            total_pages: 1,
            total: 0,
        }
    }
}

impl<T> ListSnapshot<T> {
    pub fn is_loading(&self) -> bool {
        self.status == ViewStatus::Loading
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(SyncError::user_message)
    }
}

/// Изменяющая операция над удалённым источником
#[derive(Debug, Clone)]
pub enum Mutation<C, U> {
    Create(C),
    Update { id: String, patch: U },
    /// `status` is validated against the closed enum before any request.
    UpdateStatus { id: String, status: String },
    Delete { id: String },
}

pub type MutationOf<S> = Mutation<<S as RemoteSource>::CreateInput, <S as RemoteSource>::UpdateInput>;

impl<C, U> Mutation<C, U> {
    fn target_id(&self) -> Option<&str> {
        match self {
            Mutation::Create(_) => None,
            Mutation::Update { id, .. }
            | Mutation::UpdateStatus { id, .. }
            | Mutation::Delete { id } => Some(id),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Mutation::Create(_) => "create",
            Mutation::Update { .. } => "update",
            Mutation::UpdateStatus { .. } => "update_status",
            Mutation::Delete { .. } => "delete",
        }
    }
}

enum Applied<T> {
    Upsert(T),
    Remove(String),
}

struct ListState<T> {
    store: EntityStore<T>,
    criteria: FilterCriteria,
    status: ViewStatus,
    error: Option<SyncError>,
    page: u32,
    total_pages: u32,
    total: u64,
}

impl<T: ListEntity> Default for ListState<T> {
    fn default() -> Self {
        Self {
            store: EntityStore::new(),
            criteria: FilterCriteria::default(),
            status: ViewStatus::Idle,
            error: None,
            page: 1,
            total_pages: 1,
            total: 0,
        }
    }
}

type Listener<T> = Rc<dyn Fn(&ListSnapshot<T>)>;

struct Inner<S: RemoteSource> {
    source: S,
    auth: Rc<dyn TokenProvider>,
    options: ControllerOptions,
    aggregates: RefCell<Option<AggregateSpec>>,
    state: RefCell<ListState<S::Record>>,
    latest_request: Cell<u64>,
    listeners: RefCell<Vec<Listener<S::Record>>>,
}

/// Контроллер списка. Дешёвый `Clone`: все копии разделяют одно состояние.
pub struct ListController<S: RemoteSource> {
    inner: Rc<Inner<S>>,
}

impl<S: RemoteSource> Clone for ListController<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: RemoteSource> ListController<S> {
    pub fn new(source: S, auth: Rc<dyn TokenProvider>, options: ControllerOptions) -> Self {
        Self {
            inner: Rc::new(Inner {
                source,
                auth,
                options,
                aggregates: RefCell::new(None),
                state: RefCell::new(ListState::default()),
                latest_request: Cell::new(0),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Aggregates summarize the loaded collection. In server mode that is
    /// only the current page.
    pub fn with_aggregates(self, spec: AggregateSpec) -> Self {
        *self.inner.aggregates.borrow_mut() = Some(spec);
        self
    }

    pub fn source(&self) -> &S {
        &self.inner.source
    }

    pub fn options(&self) -> &ControllerOptions {
        &self.inner.options
    }

    /// Registers a listener called with every published snapshot.
    pub fn subscribe(&self, listener: impl Fn(&ListSnapshot<S::Record>) + 'static) {
        self.inner.listeners.borrow_mut().push(Rc::new(listener));
    }

    /// Full local collection in source order, ignoring the criteria.
    pub fn records(&self) -> Vec<S::Record> {
        self.inner.state.borrow().store.records().to_vec()
    }

    /// Visible subset and aggregates, recomputed from the current collection.
    pub fn snapshot(&self) -> ListSnapshot<S::Record> {
        let state = self.inner.state.borrow();
        let all = state.store.records();
        let visible = apply_filter(all, &build_predicate::<S::Record>(&state.criteria));
        let aggregates = self
            .inner
            .aggregates
            .borrow()
            .as_ref()
            .map(|spec| spec.compute(all, &visible, &state.criteria));
        ListSnapshot {
            status: state.status,
            loaded_count: all.len(),
            visible,
            aggregates,
            error: state.error.clone(),
            criteria: state.criteria.clone(),
            page: state.page,
            total_pages: state.total_pages,
            total: state.total,
        }
    }

    fn publish(&self) {
        let snapshot = self.snapshot();
        let listeners: Vec<Listener<S::Record>> = self.inner.listeners.borrow().clone();
        for listener in listeners {
            listener(&snapshot);
        }
    }

    fn token(&self) -> Result<String, SyncError> {
        self.inner
            .auth
            .current_token()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| SyncError::Auth("Not authenticated".into()))
    }

    fn record_error(&self, error: &SyncError) {
        {
            let mut state = self.inner.state.borrow_mut();
            state.status = ViewStatus::Error;
            state.error = Some(error.clone());
        }
        self.publish();
    }

    fn current_query(&self) -> ListQuery {
        let state = self.inner.state.borrow();
        let page_size = self.inner.options.page_size;
        match self.inner.options.filter_mode {
            FilterMode::Client => ListQuery::new(1, page_size),
            FilterMode::Server => ListQuery::new(state.page, page_size)
                .with_search(&state.criteria.search)
                .with_status(state.criteria.category("status")),
        }
    }

    fn next_request(&self) -> u64 {
        let seq = self.inner.latest_request.get() + 1;
        self.inner.latest_request.set(seq);
        seq
    }

    /// Loads the collection with the current criteria and replaces local
    /// state wholesale. A response that arrives after a newer load started
    /// is dropped.
    pub async fn load(&self) -> Result<(), SyncError> {
        let seq = self.next_request();
        let token = match self.token() {
            Ok(token) => token,
            Err(e) => {
                log::warn!("load #{} skipped: {}", seq, e);
                self.record_error(&e);
                return Err(e);
            }
        };
        let query = self.current_query();
        self.inner.state.borrow_mut().status = ViewStatus::Loading;
        self.publish();

        log::debug!("load #{} started: {:?}", seq, query);
        let result = self.inner.source.load_all(&token, &query).await;

        if seq != self.inner.latest_request.get() {
            log::debug!(
                "load #{} superseded by #{}, response discarded",
                seq,
                self.inner.latest_request.get()
            );
            return Ok(());
        }

        match result {
            Ok(page) => {
                log::debug!("load #{} finished: {} records", seq, page.records.len());
                {
                    let mut state = self.inner.state.borrow_mut();
                    state.store.replace_all(page.records);
                    state.page = page.page.max(1);
                    state.total_pages = page.total_pages.max(1);
                    state.total = page.total;
                    state.status = ViewStatus::Ready;
                    state.error = None;
                }
                self.publish();
                Ok(())
            }
            Err(e) => {
                log::error!("load #{} failed: {}", seq, e);
                self.record_error(&e);
                Err(e)
            }
        }
    }

    /// First load when the owning screen mounts.
    pub async fn mount(&self) -> Result<(), SyncError> {
        log::debug!("mount: filter mode {:?}", self.inner.options.filter_mode);
        self.load().await
    }

    pub async fn refresh(&self) -> Result<(), SyncError> {
        self.load().await
    }

    /// Re-enters `Loading` with the last known criteria.
    pub async fn retry(&self) -> Result<(), SyncError> {
        if let Some(e) = self.inner.state.borrow().error.as_ref() {
            log::info!("retry after: {}", e);
        }
        self.load().await
    }

    /// Merges criteria. Unchanged criteria never trigger a request.
    pub async fn set_filter_criteria(&self, patch: CriteriaPatch) -> Result<(), SyncError> {
        let changed = {
            let mut state = self.inner.state.borrow_mut();
            let changed = state.criteria.merge(patch);
            if changed && self.inner.options.filter_mode == FilterMode::Server {
                state.page = 1;
            }
            changed
        };
        if !changed {
            return Ok(());
        }
        match self.inner.options.filter_mode {
            FilterMode::Client => {
                self.publish();
                Ok(())
            }
            FilterMode::Server => self.load().await,
        }
    }

    /// Moves to another page (server mode only).
    pub async fn set_page(&self, page: u32) -> Result<(), SyncError> {
        if self.inner.options.filter_mode == FilterMode::Client {
            log::debug!("set_page ignored in client filter mode");
            return Ok(());
        }
        let page = page.max(1);
        {
            let mut state = self.inner.state.borrow_mut();
            if state.page == page {
                return Ok(());
            }
            state.page = page;
        }
        self.load().await
    }

    /// Switches the record to the next value of its status cycle.
    pub async fn toggle_status(&self, id: &str) -> Result<Option<S::Record>, SyncError> {
        let current = self
            .inner
            .state
            .borrow()
            .store
            .get(id)
            .and_then(|r| r.get_field_value("status"));
        let next = match current {
            None => Err(SyncError::NotFound(format!("record '{}'", id))),
            Some(value) => parse_status::<S::Status>(&value).and_then(|status| {
                status.next().ok_or_else(|| {
                    SyncError::Validation(format!("Status '{}' cannot be toggled", status.as_str()))
                })
            }),
        };
        match next {
            Ok(status) => {
                self.perform_mutation(Mutation::UpdateStatus {
                    id: id.to_string(),
                    status: status.as_str().to_string(),
                })
                .await
            }
            Err(e) => {
                if e.kind() == crate::remote::ErrorKind::NotFound {
                    self.reconcile_missing(id).await;
                }
                self.record_error(&e);
                Err(e)
            }
        }
    }

    /// Calls the remote source; on success applies the result locally for
    /// immediate feedback and then reloads the source of truth.
    ///
    /// Failures are recorded in the snapshot and returned; the last good
    /// data stays visible.
    pub async fn perform_mutation(&self, mutation: MutationOf<S>) -> Result<Option<S::Record>, SyncError> {
        let name = mutation.name();
        let target = mutation.target_id().map(str::to_string);
        let token = match self.token() {
            Ok(token) => token,
            Err(e) => {
                log::warn!("{} rejected: {}", name, e);
                self.record_error(&e);
                return Err(e);
            }
        };

        let mut optimistic = false;
        let source = &self.inner.source;
        let result = match mutation {
            Mutation::Create(input) => source.create(&token, input).await.map(Applied::Upsert),
            Mutation::Update { id, patch } => source
                .update_fields(&token, &id, patch)
                .await
                .map(Applied::Upsert),
            Mutation::UpdateStatus { id, status } => {
                let status = match parse_status::<S::Status>(&status) {
                    Ok(status) => status,
                    Err(e) => {
                        log::warn!("{} rejected before request: {}", name, e);
                        self.record_error(&e);
                        return Err(e);
                    }
                };
                if self.inner.options.optimistic_status {
                    optimistic = self
                        .inner
                        .state
                        .borrow_mut()
                        .store
                        .update_field(&id, "status", status.as_str());
                    if optimistic {
                        self.publish();
                    }
                }
                source
                    .update_status(&token, &id, status)
                    .await
                    .map(Applied::Upsert)
            }
            Mutation::Delete { id } => source
                .remove(&token, &id)
                .await
                .map(|_| Applied::Remove(id)),
        };

        match result {
            Ok(applied) => {
                log::info!("{} succeeded{}", name, target.as_deref().map(|id| format!(" for '{}'", id)).unwrap_or_default());
                let record = {
                    let mut state = self.inner.state.borrow_mut();
                    state.error = None;
                    if state.status == ViewStatus::Error || state.status == ViewStatus::Idle {
                        state.status = ViewStatus::Ready;
                    }
                    match applied {
                        Applied::Upsert(record) => {
                            state.store.upsert(record.clone());
                            Some(record)
                        }
                        Applied::Remove(id) => {
                            state.store.remove(&id);
                            None
                        }
                    }
                };
                self.publish();
                if self.inner.options.reload_after_mutation {
                    // reload failures are recorded in the snapshot; the
                    // mutation itself already succeeded
                    let _ = self.load().await;
                }
                Ok(record)
            }
            Err(e) => {
                log::error!("{} failed: {}", name, e);
                if e.kind() == crate::remote::ErrorKind::NotFound {
                    if let Some(id) = target.as_deref() {
                        self.reconcile_missing(id).await;
                    }
                } else if optimistic {
                    let _ = self.load().await;
                }
                self.record_error(&e);
                Err(e)
            }
        }
    }

    /// Drops a record the remote no longer has and reloads to catch any
    /// other drift.
    async fn reconcile_missing(&self, id: &str) {
        if self.inner.state.borrow_mut().store.remove(id) {
            self.publish();
        }
        let _ = self.load().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::AggregateScope;
    use crate::entities::store_status_spec;
    use crate::entities::test_fixtures::{order, orders, stores};
    use crate::remote::{ErrorKind, StaticToken};
    use async_trait::async_trait;
    use contracts::domain::a001_store::{CreateStoreDto, Store, UpdateStoreDto};
    use contracts::domain::a003_order::{Order, UpdateOrderDto};
    use contracts::enums::{OrderStatus, StoreStatus};
    use contracts::shared::api::ListPage;
    use std::collections::HashMap;
    use tokio::sync::Notify;

    #[derive(Default)]
    struct MemoryOrders {
        records: RefCell<Vec<Order>>,
        next_id: Cell<u32>,
        network_calls: Cell<usize>,
        load_gates: RefCell<HashMap<String, Rc<Notify>>>,
        update_gate: RefCell<Option<Rc<Notify>>>,
        fail_next: RefCell<Option<SyncError>>,
    }

    impl MemoryOrders {
        fn seeded(records: Vec<Order>) -> Self {
            let source = Self::default();
            *source.records.borrow_mut() = records;
            source.next_id.set(100);
            source
        }

        fn calls(&self) -> usize {
            self.network_calls.get()
        }

        fn hit(&self) -> Result<(), SyncError> {
            self.network_calls.set(self.network_calls.get() + 1);
            match self.fail_next.borrow_mut().take() {
                Some(e) => Err(e),
                None => Ok(()),
            }
        }

        /// Holds loads filtered by `status` until the returned gate opens.
        fn gate_load(&self, status: &str) -> Rc<Notify> {
            let gate = Rc::new(Notify::new());
            self.load_gates
                .borrow_mut()
                .insert(status.to_string(), Rc::clone(&gate));
            gate
        }

        fn gate_next_update(&self) -> Rc<Notify> {
            let gate = Rc::new(Notify::new());
            *self.update_gate.borrow_mut() = Some(Rc::clone(&gate));
            gate
        }

        fn fail_next(&self, error: SyncError) {
            *self.fail_next.borrow_mut() = Some(error);
        }

        fn status_of(&self, id: &str) -> Option<OrderStatus> {
            self.records.borrow().iter().find(|o| o.id == id).map(|o| o.status)
        }
    }

    #[async_trait(?Send)]
    impl RemoteSource for MemoryOrders {
        type Record = Order;
        type Status = OrderStatus;
        type CreateInput = Order;
        type UpdateInput = UpdateOrderDto;

        async fn load_all(&self, _token: &str, query: &ListQuery) -> Result<ListPage<Order>, SyncError> {
            self.network_calls.set(self.network_calls.get() + 1);
            let key = query.status.clone().unwrap_or_default();
            let gate = self.load_gates.borrow().get(&key).cloned();
            if let Some(gate) = gate {
                gate.notified().await;
            }
            if let Some(e) = self.fail_next.borrow_mut().take() {
                return Err(e);
            }
            let mut criteria = FilterCriteria::default();
            criteria.merge(CriteriaPatch {
                search: query.search.clone(),
                categories: query
                    .status
                    .iter()
                    .map(|s| ("status".to_string(), s.clone()))
                    .collect(),
            });
            let records = apply_filter(&self.records.borrow(), &build_predicate::<Order>(&criteria));
            Ok(ListPage::single(records))
        }

        async fn create(&self, _token: &str, mut input: Order) -> Result<Order, SyncError> {
            self.hit()?;
            if input.id.is_empty() {
                let n = self.next_id.get();
                self.next_id.set(n + 1);
                input.id = format!("ORD-{:03}", n);
            }
            if self.records.borrow().iter().any(|o| o.id == input.id) {
                return Err(SyncError::Validation(format!("Order {} already exists", input.id)));
            }
            self.records.borrow_mut().push(input.clone());
            Ok(input)
        }

        async fn update_fields(&self, _token: &str, id: &str, patch: UpdateOrderDto) -> Result<Order, SyncError> {
            self.hit()?;
            let mut records = self.records.borrow_mut();
            let record = records
                .iter_mut()
                .find(|o| o.id == id)
                .ok_or_else(|| SyncError::NotFound(format!("order '{}'", id)))?;
            if let Some(handled_by) = patch.handled_by {
                record.handled_by = handled_by;
            }
            if let Some(method) = patch.shipping_method {
                record.shipping_method = method;
            }
            Ok(record.clone())
        }

        async fn update_status(&self, _token: &str, id: &str, status: OrderStatus) -> Result<Order, SyncError> {
            self.hit()?;
            // applied on receipt, answered when the gate opens
            let updated = {
                let mut records = self.records.borrow_mut();
                let record = records
                    .iter_mut()
                    .find(|o| o.id == id)
                    .ok_or_else(|| SyncError::NotFound(format!("order '{}'", id)))?;
                record.status = status;
                record.clone()
            };
            let gate = self.update_gate.borrow_mut().take();
            if let Some(gate) = gate {
                gate.notified().await;
            }
            Ok(updated)
        }

        async fn remove(&self, _token: &str, id: &str) -> Result<(), SyncError> {
            self.hit()?;
            let mut records = self.records.borrow_mut();
            let before = records.len();
            records.retain(|o| o.id != id);
            if records.len() == before {
                return Err(SyncError::NotFound(format!("order '{}'", id)));
            }
            Ok(())
        }
    }

    fn controller_with(mode: FilterMode, token: StaticToken, data: Vec<Order>) -> ListController<MemoryOrders> {
        let options = ControllerOptions {
            filter_mode: mode,
            page_size: 50,
            ..Default::default()
        };
        ListController::new(MemoryOrders::seeded(data), Rc::new(token), options).with_aggregates(
            AggregateSpec::new("status", OrderStatus::wire_values())
                .with_sums(&["total"])
                .with_scope(AggregateScope::Narrowed(vec!["handled_by"])),
        )
    }

    fn client_controller() -> ListController<MemoryOrders> {
        controller_with(FilterMode::Client, StaticToken::new("token"), orders())
    }

    fn server_controller() -> ListController<MemoryOrders> {
        controller_with(FilterMode::Server, StaticToken::new("token"), orders())
    }

    fn visible_ids(controller: &ListController<MemoryOrders>) -> Vec<String> {
        controller.snapshot().visible.iter().map(|o| o.id.clone()).collect()
    }

    #[tokio::test]
    async fn test_mount_loads_and_aggregates() {
        let controller = client_controller();
        assert_eq!(controller.snapshot().status, ViewStatus::Idle);

        controller.mount().await.unwrap();
        let snap = controller.snapshot();
        assert_eq!(snap.status, ViewStatus::Ready);
        assert_eq!(snap.visible.len(), 3);

        let aggregates = snap.aggregates.unwrap();
        assert_eq!(aggregates.counts.get("pending"), 2);
        assert_eq!(aggregates.counts.get("processing"), 0);
        assert_eq!(aggregates.counts.get("shipped"), 1);
        assert_eq!(aggregates.counts.get("cancelled"), 0);
    }

    #[tokio::test]
    async fn test_missing_token_fails_without_request() {
        let controller = controller_with(FilterMode::Client, StaticToken::none(), orders());
        let err = controller.mount().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Auth);
        assert_eq!(controller.source().calls(), 0);
        assert_eq!(controller.snapshot().status, ViewStatus::Error);

        let err = controller
            .perform_mutation(Mutation::Delete { id: "ORD-001".into() })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Auth);
        assert_eq!(controller.source().calls(), 0);
    }

    #[tokio::test]
    async fn test_client_filter_does_not_hit_network() {
        let controller = client_controller();
        controller.mount().await.unwrap();
        let calls = controller.source().calls();

        controller
            .set_filter_criteria(CriteriaPatch::category("status", "pending"))
            .await
            .unwrap();
        assert_eq!(visible_ids(&controller), vec!["ORD-001", "ORD-003"]);

        controller
            .set_filter_criteria(CriteriaPatch::search("SAR"))
            .await
            .unwrap();
        assert_eq!(visible_ids(&controller), vec!["ORD-001"]);

        controller
            .set_filter_criteria(CriteriaPatch::search("zzz"))
            .await
            .unwrap();
        assert!(visible_ids(&controller).is_empty());
        assert_eq!(controller.records().len(), 3);
        assert_eq!(controller.source().calls(), calls);
    }

    #[tokio::test]
    async fn test_unchanged_criteria_skip_request() {
        let controller = server_controller();
        controller.mount().await.unwrap();

        controller
            .set_filter_criteria(CriteriaPatch::category("status", "pending"))
            .await
            .unwrap();
        let calls = controller.source().calls();
        controller
            .set_filter_criteria(CriteriaPatch::category("status", "pending"))
            .await
            .unwrap();
        assert_eq!(controller.source().calls(), calls);
        assert_eq!(visible_ids(&controller), vec!["ORD-001", "ORD-003"]);
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let controller = server_controller();
        controller.mount().await.unwrap();
        let gate = controller.source().gate_load("pending");

        let first = controller.set_filter_criteria(CriteriaPatch::category("status", "pending"));
        let second = async {
            controller
                .set_filter_criteria(CriteriaPatch::category("status", "shipped"))
                .await
                .unwrap();
            gate.notify_one();
        };
        let (first_result, ()) = tokio::join!(first, second);
        assert!(first_result.is_ok());

        let snap = controller.snapshot();
        assert_eq!(snap.status, ViewStatus::Ready);
        assert_eq!(snap.criteria.category("status"), "shipped");
        assert_eq!(snap.loaded_count, 1);
        assert_eq!(visible_ids(&controller), vec!["ORD-002"]);
    }

    #[tokio::test]
    async fn test_create_then_reload_contains_record_once() {
        let controller = client_controller();
        controller.mount().await.unwrap();

        let created = controller
            .perform_mutation(Mutation::Create(order("", "Lisa Anderson", OrderStatus::Processing, 178.5)))
            .await
            .unwrap()
            .unwrap();

        let snap = controller.snapshot();
        assert_eq!(snap.status, ViewStatus::Ready);
        assert_eq!(snap.visible.iter().filter(|o| o.id == created.id).count(), 1);
        assert_eq!(snap.aggregates.unwrap().counts.get("processing"), 1);
    }

    #[tokio::test]
    async fn test_server_validation_error_is_surfaced() {
        let controller = client_controller();
        controller.mount().await.unwrap();

        let err = controller
            .perform_mutation(Mutation::Create(order("ORD-001", "Duplicate", OrderStatus::Pending, 1.0)))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        let snap = controller.snapshot();
        assert_eq!(snap.status, ViewStatus::Error);
        assert_eq!(snap.visible.len(), 3);
    }

    #[tokio::test]
    async fn test_second_delete_is_not_found() {
        let controller = client_controller();
        controller.mount().await.unwrap();

        controller
            .perform_mutation(Mutation::Delete { id: "ORD-002".into() })
            .await
            .unwrap();
        assert!(!visible_ids(&controller).contains(&"ORD-002".to_string()));

        let err = controller
            .perform_mutation(Mutation::Delete { id: "ORD-002".into() })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        let snap = controller.snapshot();
        assert_eq!(snap.status, ViewStatus::Error);
        assert!(!snap.visible.iter().any(|o| o.id == "ORD-002"));
    }

    #[tokio::test]
    async fn test_out_of_domain_status_rejected_locally() {
        let controller = client_controller();
        controller.mount().await.unwrap();
        let calls = controller.source().calls();

        let err = controller
            .perform_mutation(Mutation::UpdateStatus {
                id: "ORD-001".into(),
                status: "teleported".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(controller.source().calls(), calls);
    }

    #[tokio::test]
    async fn test_failed_mutation_keeps_data_and_retry_recovers() {
        let controller = client_controller();
        controller.mount().await.unwrap();
        controller.source().fail_next(SyncError::Server {
            status: 500,
            message: "boom".into(),
        });

        let err = controller
            .perform_mutation(Mutation::UpdateStatus {
                id: "ORD-001".into(),
                status: "shipped".into(),
            })
            .await
            .unwrap_err();
        assert!(err.is_retryable());

        let snap = controller.snapshot();
        assert_eq!(snap.status, ViewStatus::Error);
        assert_eq!(snap.error_message().as_deref(), Some("boom"));
        assert_eq!(snap.visible.len(), 3);

        controller.retry().await.unwrap();
        let snap = controller.snapshot();
        assert_eq!(snap.status, ViewStatus::Ready);
        assert!(snap.error.is_none());
    }

    #[tokio::test]
    async fn test_optimistic_status_reverts_on_failure() {
        let options = ControllerOptions {
            optimistic_status: true,
            ..Default::default()
        };
        let controller = ListController::new(
            MemoryOrders::seeded(orders()),
            Rc::new(StaticToken::new("token")),
            options,
        );
        controller.mount().await.unwrap();

        let seen: Rc<RefCell<Vec<OrderStatus>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        controller.subscribe(move |snap| {
            if let Some(o) = snap.visible.iter().find(|o| o.id == "ORD-001") {
                sink.borrow_mut().push(o.status);
            }
        });

        controller.source().fail_next(SyncError::Network("offline".into()));
        let _ = controller
            .perform_mutation(Mutation::UpdateStatus {
                id: "ORD-001".into(),
                status: "delivered".into(),
            })
            .await;

        assert_eq!(seen.borrow().first(), Some(&OrderStatus::Delivered));
        let snap = controller.snapshot();
        let record = snap.visible.iter().find(|o| o.id == "ORD-001").unwrap();
        assert_eq!(record.status, OrderStatus::Pending);
        assert_eq!(snap.error.unwrap().kind(), ErrorKind::Network);
    }

    #[tokio::test]
    async fn test_overlapping_updates_end_at_server_state() {
        let controller = client_controller();
        controller.mount().await.unwrap();
        let gate = controller.source().gate_next_update();

        let slow = controller.perform_mutation(Mutation::UpdateStatus {
            id: "ORD-001".into(),
            status: "shipped".into(),
        });
        let fast = async {
            controller
                .perform_mutation(Mutation::UpdateStatus {
                    id: "ORD-001".into(),
                    status: "delivered".into(),
                })
                .await
                .unwrap();
            gate.notify_one();
        };
        let (slow_result, ()) = tokio::join!(slow, fast);
        slow_result.unwrap();

        assert_eq!(controller.source().status_of("ORD-001"), Some(OrderStatus::Delivered));
        let snap = controller.snapshot();
        let record = snap.visible.iter().find(|o| o.id == "ORD-001").unwrap();
        assert_eq!(record.status, OrderStatus::Delivered);
    }

    #[tokio::test]
    async fn test_update_on_vanished_record_reconciles() {
        let controller = client_controller();
        controller.mount().await.unwrap();
        controller.source().records.borrow_mut().retain(|o| o.id != "ORD-003");

        let err = controller
            .perform_mutation(Mutation::Update {
                id: "ORD-003".into(),
                patch: UpdateOrderDto {
                    handled_by: Some("Emily Davis".into()),
                    ..Default::default()
                },
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(visible_ids(&controller), vec!["ORD-001", "ORD-002"]);
    }

    #[tokio::test]
    async fn test_orders_cannot_be_toggled() {
        let controller = client_controller();
        controller.mount().await.unwrap();
        let err = controller.toggle_status("ORD-001").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_aggregates_follow_handled_by_only() {
        let controller = client_controller();
        controller.mount().await.unwrap();
        controller
            .set_filter_criteria(
                CriteriaPatch::category("handled_by", "Mike Chen").and_category("status", "shipped"),
            )
            .await
            .unwrap();

        let snap = controller.snapshot();
        assert_eq!(visible_ids(&controller), vec!["ORD-002"]);
        let aggregates = snap.aggregates.unwrap();
        assert_eq!(aggregates.total, 2);
        assert_eq!(aggregates.counts.get("pending"), 1);
        assert_eq!(aggregates.counts.get("shipped"), 1);
    }

    /// Store backend that honours paging and keeps a request log.
    #[derive(Default)]
    struct PagedStores {
        records: RefCell<Vec<Store>>,
        network_calls: Cell<usize>,
        queries: RefCell<Vec<ListQuery>>,
    }

    impl PagedStores {
        fn seeded(records: Vec<Store>) -> Self {
            let source = Self::default();
            *source.records.borrow_mut() = records;
            source
        }

        fn calls(&self) -> usize {
            self.network_calls.get()
        }

        fn last_query(&self) -> Option<ListQuery> {
            self.queries.borrow().last().cloned()
        }

        fn status_of(&self, id: &str) -> Option<StoreStatus> {
            self.records.borrow().iter().find(|s| s.id == id).map(|s| s.status)
        }
    }

    #[async_trait(?Send)]
    impl RemoteSource for PagedStores {
        type Record = Store;
        type Status = StoreStatus;
        type CreateInput = CreateStoreDto;
        type UpdateInput = UpdateStoreDto;

        async fn load_all(&self, _token: &str, query: &ListQuery) -> Result<ListPage<Store>, SyncError> {
            self.network_calls.set(self.network_calls.get() + 1);
            self.queries.borrow_mut().push(query.clone());
            let mut criteria = FilterCriteria::default();
            criteria.merge(CriteriaPatch {
                search: query.search.clone(),
                categories: query
                    .status
                    .iter()
                    .map(|s| ("status".to_string(), s.clone()))
                    .collect(),
            });
            let matching = apply_filter(&self.records.borrow(), &build_predicate::<Store>(&criteria));
            let limit = query.limit.max(1) as usize;
            let total = matching.len();
            let total_pages = total.div_ceil(limit).max(1) as u32;
            let page = query.page.clamp(1, total_pages);
            let records = matching
                .into_iter()
                .skip((page as usize - 1) * limit)
                .take(limit)
                .collect();
            Ok(ListPage {
                records,
                page,
                total_pages,
                total: total as u64,
            })
        }

        async fn create(&self, _token: &str, _input: CreateStoreDto) -> Result<Store, SyncError> {
            Err(SyncError::Validation("read-only".into()))
        }

        async fn update_fields(&self, _token: &str, id: &str, _patch: UpdateStoreDto) -> Result<Store, SyncError> {
            Err(SyncError::NotFound(format!("store '{}'", id)))
        }

        async fn update_status(&self, _token: &str, id: &str, status: StoreStatus) -> Result<Store, SyncError> {
            self.network_calls.set(self.network_calls.get() + 1);
            let mut records = self.records.borrow_mut();
            let record = records
                .iter_mut()
                .find(|s| s.id == id)
                .ok_or_else(|| SyncError::NotFound(format!("store '{}'", id)))?;
            record.status = status;
            Ok(record.clone())
        }

        async fn remove(&self, _token: &str, id: &str) -> Result<(), SyncError> {
            Err(SyncError::NotFound(format!("store '{}'", id)))
        }
    }

    fn store_controller(mode: FilterMode, page_size: u32) -> ListController<PagedStores> {
        let options = ControllerOptions {
            filter_mode: mode,
            page_size,
            ..Default::default()
        };
        ListController::new(PagedStores::seeded(stores()), Rc::new(StaticToken::new("token")), options)
            .with_aggregates(store_status_spec())
    }

    fn store_ids(controller: &ListController<PagedStores>) -> Vec<String> {
        controller.snapshot().visible.iter().map(|s| s.id.clone()).collect()
    }

    #[tokio::test]
    async fn test_set_page_loads_requested_page() {
        let controller = store_controller(FilterMode::Server, 2);
        controller.mount().await.unwrap();
        let snap = controller.snapshot();
        assert_eq!(store_ids(&controller), vec!["s1", "s2"]);
        assert_eq!((snap.page, snap.total_pages, snap.total), (1, 2, 3));

        controller.set_page(2).await.unwrap();
        let snap = controller.snapshot();
        assert_eq!(store_ids(&controller), vec!["s3"]);
        assert_eq!(snap.page, 2);
        assert_eq!(controller.source().last_query().map(|q| q.page), Some(2));
        assert_eq!(controller.source().calls(), 2);
    }

    #[tokio::test]
    async fn test_same_page_skips_request() {
        let controller = store_controller(FilterMode::Server, 2);
        controller.mount().await.unwrap();
        controller.set_page(2).await.unwrap();
        let calls = controller.source().calls();

        controller.set_page(2).await.unwrap();
        assert_eq!(controller.source().calls(), calls);
        assert_eq!(store_ids(&controller), vec!["s3"]);
    }

    #[tokio::test]
    async fn test_criteria_change_returns_to_first_page() {
        let controller = store_controller(FilterMode::Server, 2);
        controller.mount().await.unwrap();
        controller.set_page(2).await.unwrap();

        controller
            .set_filter_criteria(CriteriaPatch::search("o"))
            .await
            .unwrap();
        let query = controller.source().last_query().unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.search.as_deref(), Some("o"));
        assert_eq!(controller.snapshot().page, 1);
    }

    #[tokio::test]
    async fn test_set_page_is_ignored_in_client_mode() {
        let controller = store_controller(FilterMode::Client, 500);
        controller.mount().await.unwrap();
        let calls = controller.source().calls();

        controller.set_page(3).await.unwrap();
        assert_eq!(controller.source().calls(), calls);
        assert_eq!(controller.snapshot().page, 1);
        assert_eq!(store_ids(&controller), vec!["s1", "s2", "s3"]);
    }

    #[tokio::test]
    async fn test_padded_search_does_not_reload() {
        let controller = server_controller();
        controller.mount().await.unwrap();
        controller
            .set_filter_criteria(CriteriaPatch::search("sar"))
            .await
            .unwrap();
        let calls = controller.source().calls();

        controller
            .set_filter_criteria(CriteriaPatch::search("sar "))
            .await
            .unwrap();
        assert_eq!(controller.source().calls(), calls);
        assert_eq!(visible_ids(&controller), vec!["ORD-001"]);
    }

    #[tokio::test]
    async fn test_toggle_walks_store_status_cycle() {
        let controller = store_controller(FilterMode::Client, 500);
        controller.mount().await.unwrap();

        for expected in [StoreStatus::Disabled, StoreStatus::Pending, StoreStatus::Active] {
            let updated = controller.toggle_status("s1").await.unwrap().unwrap();
            assert_eq!(updated.status, expected);
            assert_eq!(controller.source().status_of("s1"), Some(expected));
            let snap = controller.snapshot();
            let record = snap.visible.iter().find(|s| s.id == "s1").unwrap();
            assert_eq!(record.status, expected);
            assert_eq!(snap.status, ViewStatus::Ready);
        }
    }

    #[tokio::test]
    async fn test_store_counts_ignore_status_filter() {
        let controller = store_controller(FilterMode::Client, 500);
        controller.mount().await.unwrap();
        controller
            .set_filter_criteria(CriteriaPatch::category("status", "pending"))
            .await
            .unwrap();

        let snap = controller.snapshot();
        assert_eq!(store_ids(&controller), vec!["s2"]);
        let aggregates = snap.aggregates.unwrap();
        assert_eq!(aggregates.total, 3);
        assert_eq!(aggregates.counts.get("active"), 1);
        assert_eq!(aggregates.counts.get("pending"), 1);
        assert_eq!(aggregates.counts.get("disabled"), 1);
    }
}

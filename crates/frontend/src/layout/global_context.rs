use leptos::prelude::Effect;
use leptos::prelude::*;
use std::collections::BTreeMap;
use web_sys::window;

/// Раздел консоли в боковой навигации
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    GlobalOverview,
    Stores,
    StoreAnalytics,
    Admins,
    Orders,
    SalesOverview,
}

impl Section {
    pub fn all() -> [Section; 6] {
        [
            Section::GlobalOverview,
            Section::Stores,
            Section::StoreAnalytics,
            Section::Admins,
            Section::Orders,
            Section::SalesOverview,
        ]
    }

    pub fn key(&self) -> &'static str {
        match self {
            Section::GlobalOverview => "d400_global_overview",
            Section::Stores => "a001_store",
            Section::StoreAnalytics => "d401_store_analytics",
            Section::Admins => "a002_admin",
            Section::Orders => "a003_order",
            Section::SalesOverview => "d402_sales_overview",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Section::GlobalOverview => "Global Overview",
            Section::Stores => "Store Management",
            Section::StoreAnalytics => "Store Analytics",
            Section::Admins => "Admin Management",
            Section::Orders => "Orders",
            Section::SalesOverview => "Sales Overview",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Section::GlobalOverview => "dashboard",
            Section::Stores => "store",
            Section::StoreAnalytics => "trending-up",
            Section::Admins => "users",
            Section::Orders => "orders",
            Section::SalesOverview => "bar-chart",
        }
    }

    /// Sections open to store-level admins; the rest need a network admin.
    pub fn is_store_level(&self) -> bool {
        matches!(self, Section::Orders | Section::SalesOverview)
    }

    pub fn from_key(key: &str) -> Option<Section> {
        Section::all().into_iter().find(|s| s.key() == key)
    }
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub active: RwSignal<Section>,
    /// Store shown by the analytics section
    pub analytics_store: RwSignal<Option<String>>,
    pub left_open: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            active: RwSignal::new(Section::GlobalOverview),
            analytics_store: RwSignal::new(None),
            left_open: RwSignal::new(true),
        }
    }

    pub fn open(&self, section: Section) {
        self.active.set(section);
    }

    pub fn open_store_analytics(&self, store_id: String) {
        self.analytics_store.set(Some(store_id));
        self.active.set(Section::StoreAnalytics);
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|open| *open = !*open);
    }

    /// Keeps `?active=<key>&store=<id>` in the address bar in sync with
    /// the active section.
    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let params: BTreeMap<String, String> =
            serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
        if let Some(store) = params.get("store") {
            self.analytics_store.set(Some(store.clone()));
        }
        if let Some(section) = params.get("active").and_then(|k| Section::from_key(k)) {
            self.active.set(section);
        }

        let this = *self;
        Effect::new(move |_| {
            let mut params = BTreeMap::from([("active".to_string(), this.active.get().key().to_string())]);
            if let Some(store) = this.analytics_store.get() {
                params.insert("store".to_string(), store);
            }
            let new_url = format!("?{}", serde_qs::to_string(&params).unwrap_or_default());
            let current = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();
            if current != new_url {
                if let Some(history) = window().and_then(|w| w.history().ok()) {
                    let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&new_url));
                }
            }
        });
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

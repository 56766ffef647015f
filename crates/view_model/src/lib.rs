//! Модель представления отфильтрованных списков консоли: хранилище,
//! фильтр, агрегатор, адаптер удалённого источника и контроллер.
//!
//! Не зависит от UI, поэтому тестируется нативно.

pub mod aggregate;
pub mod controller;
pub mod entities;
pub mod entity;
pub mod entity_store;
pub mod filter;
pub mod remote;

pub use aggregate::{AggregateScope, AggregateSpec, Aggregates, GroupCounts};
pub use controller::{ControllerOptions, FilterMode, ListController, ListSnapshot, Mutation, MutationOf, ViewStatus};
pub use entity::ListEntity;
pub use entity_store::EntityStore;
pub use filter::{apply_filter, build_predicate, CriteriaPatch, FilterCriteria, Predicate};
pub use remote::{parse_status, ErrorKind, RemoteSource, StaticToken, SyncError, TokenProvider};

pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod ledger;
pub mod models;
pub mod quantity;
pub mod report;
pub mod stats;
pub mod storage;
pub mod ui;
pub mod state;

pub use app::router;
pub use config::{AppConfig, DateLocale};
pub use errors::{LedgerError, StoreError};
pub use ledger::HarvestLedger;
pub use models::{HarvestRecord, RawQuantity, Summary};
pub use state::AppState;
pub use storage::{FileStore, MemoryStore, Store};

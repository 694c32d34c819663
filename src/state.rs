use crate::ledger::HarvestLedger;
use crate::storage::Store;
use std::sync::Arc;
use tokio::sync::Mutex;

pub type DynStore = Box<dyn Store + Send>;
pub type SharedLedger = Arc<Mutex<HarvestLedger<DynStore>>>;

/// Application-lifetime owner of the one ledger. Built once in `main`.
#[derive(Clone)]
pub struct AppState {
    pub ledger: SharedLedger,
}

impl AppState {
    pub fn new(ledger: HarvestLedger<DynStore>) -> Self {
        Self {
            ledger: Arc::new(Mutex::new(ledger)),
        }
    }
}

use crate::core::ledger::RentalLedger;
use crate::domain::ports::{Clock, Storage};
use std::sync::Arc;

/// Application state shared across handlers
pub struct AppState<S: Storage, C: Clock> {
    pub ledger: Arc<RentalLedger<S, C>>,
}

impl<S: Storage, C: Clock> AppState<S, C> {
    pub fn new(ledger: RentalLedger<S, C>) -> Self {
        Self {
            ledger: Arc::new(ledger),
        }
    }
}

// derive(Clone) 會要求 S、C 也實作 Clone
impl<S: Storage, C: Clock> Clone for AppState<S, C> {
    fn clone(&self) -> Self {
        Self {
            ledger: Arc::clone(&self.ledger),
        }
    }
}

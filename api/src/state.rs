//! API State Management
use crate::session::SessionStore;
use reforge_ledger::Ledger;
use std::sync::Arc;

#[derive(Clone)]
pub struct ApiState {
    pub ledger: Arc<Ledger>,
    pub sessions: SessionStore,
    pub start_time: std::time::Instant,
}

impl ApiState {
    pub fn new(ledger: Arc<Ledger>) -> Self {
        Self {
            ledger,
            sessions: SessionStore::new(),
            start_time: std::time::Instant::now(),
        }
    }
}

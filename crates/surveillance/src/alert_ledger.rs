//! Alert Ledger
//!
//! Bounded, insertion-ordered log of operator alerts. The id counter lives
//! under the same lock as the alerts so ids are strictly increasing in
//! creation order.

use log::{debug, info};
use parking_lot::Mutex;
use pumpwatch_core::{Alert, AlertId, NewAlert, Timestamp};
use pumpwatch_ports::{SurveillanceError, SurveillanceResult};
use std::collections::VecDeque;

/// Default number of alerts retained
pub const DEFAULT_ALERT_CAPACITY: usize = 50;

struct LedgerState {
    alerts: VecDeque<Alert>,
    next_id: AlertId,
}

/// Bounded alert log, oldest evicted first
pub struct AlertLedger {
    state: Mutex<LedgerState>,
    capacity: usize,
}

impl AlertLedger {
    /// A capacity of zero is raised to one
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            state: Mutex::new(LedgerState {
                alerts: VecDeque::with_capacity(capacity),
                next_id: 1,
            }),
            capacity,
        }
    }

    /// Assign the next id, append and evict past capacity
    pub fn create(&self, alert: NewAlert, created_at: Timestamp) -> Alert {
        let mut state = self.state.lock();

        let id = state.next_id;
        state.next_id += 1;

        let alert = alert.into_alert(id, created_at);
        state.alerts.push_back(alert.clone());

        while state.alerts.len() > self.capacity {
            if let Some(evicted) = state.alerts.pop_front() {
                debug!("[ALERTS] Evicted alert {} for {}", evicted.id, evicted.symbol);
            }
        }

        info!(
            "[ALERTS] Created alert {} ({}) for {}",
            alert.id, alert.alert_type, alert.symbol
        );
        alert
    }

    /// All alerts, oldest first
    pub fn list(&self) -> Vec<Alert> {
        self.state.lock().alerts.iter().cloned().collect()
    }

    pub fn get(&self, id: AlertId) -> SurveillanceResult<Alert> {
        self.state
            .lock()
            .alerts
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or(SurveillanceError::AlertNotFound(id))
    }

    /// Remove the alert if present; unknown ids are a no-op
    pub fn delete(&self, id: AlertId) -> bool {
        let mut state = self.state.lock();
        let before = state.alerts.len();
        state.alerts.retain(|a| a.id != id);
        let removed = state.alerts.len() != before;
        if removed {
            info!("[ALERTS] Deleted alert {}", id);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.state.lock().alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().alerts.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for AlertLedger {
    fn default() -> Self {
        Self::new(DEFAULT_ALERT_CAPACITY)
    }
}

//! Implements a struct that holds the state of the dashboard server.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::{Error, api::TransactionApi, config::DashboardConfig, dashboard::DashboardState};

/// The state of the dashboard server.
#[derive(Debug, Clone)]
pub struct AppState<A> {
    /// The client for the transaction API.
    pub api: A,

    /// The filters, paging and load status of the dashboard.
    pub dashboard: Arc<Mutex<DashboardState>>,

    /// The config that controls loading, retries and paging.
    pub config: Arc<DashboardConfig>,
}

impl<A: TransactionApi> AppState<A> {
    /// Create a new [AppState] that reads from `api`.
    pub fn new(api: A, config: DashboardConfig) -> Self {
        Self {
            api,
            dashboard: Arc::new(Mutex::new(DashboardState::new(&config))),
            config: Arc::new(config),
        }
    }

    /// Locks the dashboard state.
    ///
    /// The guard must be dropped before the next `.await`.
    ///
    /// # Errors
    /// Returns [Error::StateLockError] if a previous holder of the lock panicked.
    pub fn lock_dashboard(&self) -> Result<MutexGuard<'_, DashboardState>, Error> {
        self.dashboard.lock().map_err(|error| {
            tracing::error!("could not acquire dashboard state lock: {error}");
            Error::StateLockError
        })
    }
}

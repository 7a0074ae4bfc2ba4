//! Observable dashboard state
//!
//! State is an immutable value. Every change goes through [`reduce`], and
//! [`DashboardStore`] publishes the result on a `tokio::sync::watch` channel
//! so any number of observers see the latest state.

use crate::{DashboardError, DashboardService, ProcessedDashboardData};
use ssbmax_domain::traits::ResultSource;
use std::fmt::Display;
use tokio::sync::watch;

/// What an observer of the dashboard currently sees
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DashboardState {
    /// Nothing requested yet, or the last snapshot was invalidated
    #[default]
    Idle,
    /// A load is in flight
    Loading {
        /// User being loaded
        user_id: String,
    },
    /// A processed dashboard is available
    Loaded(Box<ProcessedDashboardData>),
    /// The last load failed
    Failed {
        /// User whose load failed
        user_id: String,
        /// Error description
        message: String,
    },
}

impl DashboardState {
    /// Processed data, when loaded
    pub fn data(&self) -> Option<&ProcessedDashboardData> {
        match self {
            DashboardState::Loaded(data) => Some(data.as_ref()),
            _ => None,
        }
    }

    /// Whether a load is in flight
    pub fn is_loading(&self) -> bool {
        matches!(self, DashboardState::Loading { .. })
    }
}

/// Inputs to the reducer
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    /// A load was started
    LoadRequested {
        /// User to load
        user_id: String,
    },
    /// A load completed
    Loaded(Box<ProcessedDashboardData>),
    /// A load failed
    LoadFailed {
        /// User whose load failed
        user_id: String,
        /// Error description
        message: String,
    },
    /// The cached snapshot was dropped (e.g. after a test completed)
    Invalidated,
}

/// Compute the next state
///
/// - `LoadRequested` always moves to `Loading`
/// - `Loaded` and `LoadFailed` settle the state
/// - `Invalidated` returns a settled state to `Idle`; an in-flight load is kept
pub fn reduce(state: &DashboardState, event: DashboardEvent) -> DashboardState {
    match event {
        DashboardEvent::LoadRequested { user_id } => DashboardState::Loading { user_id },
        DashboardEvent::Loaded(data) => DashboardState::Loaded(data),
        DashboardEvent::LoadFailed { user_id, message } => {
            DashboardState::Failed { user_id, message }
        }
        DashboardEvent::Invalidated => match state {
            DashboardState::Loading { .. } => state.clone(),
            _ => DashboardState::Idle,
        },
    }
}

/// Holds the current [`DashboardState`] and publishes every change
pub struct DashboardStore {
    sender: watch::Sender<DashboardState>,
}

impl Default for DashboardStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardStore {
    /// Create a store in the `Idle` state
    pub fn new() -> Self {
        let (sender, _receiver) = watch::channel(DashboardState::Idle);
        Self { sender }
    }

    /// Apply an event and publish the resulting state
    pub fn dispatch(&self, event: DashboardEvent) -> DashboardState {
        self.sender.send_modify(|state| *state = reduce(state, event));
        self.state()
    }

    /// Current state
    pub fn state(&self) -> DashboardState {
        self.sender.borrow().clone()
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.sender.subscribe()
    }

    /// Load through a service, publishing `Loading` then the outcome
    pub fn load<S>(
        &self,
        service: &DashboardService<S>,
        user_id: &str,
        force_refresh: bool,
    ) -> Result<DashboardState, DashboardError>
    where
        S: ResultSource,
        S::Error: Display,
    {
        self.dispatch(DashboardEvent::LoadRequested {
            user_id: user_id.to_string(),
        });

        match service.load(user_id, force_refresh) {
            Ok(data) => Ok(self.dispatch(DashboardEvent::Loaded(Box::new(data)))),
            Err(e) => {
                self.dispatch(DashboardEvent::LoadFailed {
                    user_id: user_id.to_string(),
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Invalidate the service cache for a user and reset the published state
    pub fn invalidate<S>(&self, service: &DashboardService<S>, user_id: &str) -> DashboardState
    where
        S: ResultSource,
        S::Error: Display,
    {
        service.invalidate(user_id);
        self.dispatch(DashboardEvent::Invalidated)
    }
}

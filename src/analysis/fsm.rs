use crate::{Error, Result};
use tracing::{debug, warn};

// Analysis states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisState {
    Idle,
    Running,
    Succeeded,
    Failed,
}

// Analysis events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisEvent {
    Dispatch,
    BackendResponded,
    BackendFailed,
}

/// Lifecycle of a single inference call. A new machine is created for every
/// submission and never leaves a terminal state.
#[derive(Debug)]
pub struct AnalysisStateMachine {
    state: AnalysisState,
}

impl AnalysisStateMachine {
    pub fn new() -> Self {
        Self {
            state: AnalysisState::Idle,
        }
    }

    pub fn current_state(&self) -> AnalysisState {
        self.state
    }

    pub fn transition(&mut self, event: AnalysisEvent) -> Result<AnalysisState> {
        let new_state = match (self.state, event) {
            (AnalysisState::Idle, AnalysisEvent::Dispatch) => AnalysisState::Running,
            (AnalysisState::Running, AnalysisEvent::BackendResponded) => AnalysisState::Succeeded,
            (AnalysisState::Running, AnalysisEvent::BackendFailed) => AnalysisState::Failed,
            (current, requested) => {
                warn!(
                    "Invalid analysis transition from {:?} with event {:?}",
                    current, requested
                );
                return Err(Error::InvalidTransition {
                    current: format!("{current:?}"),
                    requested: format!("{requested:?}"),
                });
            }
        };

        debug!(
            "Analysis state transition: {:?} -> {:?} (event: {:?})",
            self.state, new_state, event
        );
        self.state = new_state;
        Ok(new_state)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.state, AnalysisState::Succeeded | AnalysisState::Failed)
    }
}

impl Default for AnalysisStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

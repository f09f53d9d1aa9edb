//! Generation lifecycle as an explicit state machine.
//!
//! Attempts are numbered. A completion only lands if it belongs to the attempt
//! currently in flight, and a new attempt can't start while one is running.

use std::sync::Arc;

use crate::generator::GenerationOutcome;
use crate::thumbnail::ThumbnailConfig;

/// Where the current attempt stands.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum GenerationState {
    /// Nothing generated yet.
    #[default]
    Idle,
    /// An attempt is running.
    InFlight {
        /// Attempt id.
        attempt: u64,
    },
    /// The last attempt produced artifacts.
    Succeeded {
        /// Attempt id.
        attempt: u64,
        /// What it produced.
        outcome: Arc<GenerationOutcome>,
    },
    /// The last attempt failed.
    Failed {
        /// Attempt id.
        attempt: u64,
        /// User-facing error text.
        message: String,
    },
}

/// Inputs to [`GenerationState::apply`].
#[derive(Clone, Debug)]
pub enum GenerationEvent {
    /// A new attempt was dispatched.
    Started {
        /// Attempt id.
        attempt: u64,
    },
    /// An attempt settled.
    Finished {
        /// Attempt id.
        attempt: u64,
        /// Artifacts, or the failure message.
        result: Result<Arc<GenerationOutcome>, String>,
    },
}

impl GenerationState {
    /// Pure transition function. Events that don't fit the current state leave
    /// it unchanged.
    pub fn apply(&self, event: GenerationEvent) -> GenerationState {
        match (self, event) {
            (GenerationState::InFlight { .. }, GenerationEvent::Started { .. }) => self.clone(),
            (_, GenerationEvent::Started { attempt }) => GenerationState::InFlight { attempt },
            (
                GenerationState::InFlight { attempt: current },
                GenerationEvent::Finished { attempt, result },
            ) if *current == attempt => match result {
                Ok(outcome) => GenerationState::Succeeded { attempt, outcome },
                Err(message) => GenerationState::Failed { attempt, message },
            },
            (_, GenerationEvent::Finished { .. }) => self.clone(),
        }
    }

    /// True while an attempt is running.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, GenerationState::InFlight { .. })
    }

    /// Artifacts of the last successful attempt, if that's where we are.
    pub fn outcome(&self) -> Option<&Arc<GenerationOutcome>> {
        match self {
            GenerationState::Succeeded { outcome, .. } => Some(outcome),
            _ => None,
        }
    }

    /// Failure message of the last attempt, if it failed.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            GenerationState::Failed { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Owns the state, hands out attempt ids and remembers the last loadout.
#[derive(Debug, Default)]
pub struct GenerationTracker {
    state: GenerationState,
    last_attempt: u64,
    config: ThumbnailConfig,
}

impl GenerationTracker {
    /// Starts idle with the given loadout.
    pub fn new(config: ThumbnailConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Current state.
    pub fn state(&self) -> &GenerationState {
        &self.state
    }

    /// Loadout shown in the form.
    pub fn config(&self) -> &ThumbnailConfig {
        &self.config
    }

    /// Replaces the loadout without starting anything.
    pub fn set_config(&mut self, config: ThumbnailConfig) {
        self.config = config;
    }

    /// Starts a new attempt for `config`, or returns `None` if one is already running.
    pub fn begin(&mut self, config: ThumbnailConfig) -> Option<u64> {
        if self.state.is_in_flight() {
            return None;
        }
        self.last_attempt += 1;
        let attempt = self.last_attempt;
        self.config = config;
        self.state = self.state.apply(GenerationEvent::Started { attempt });
        Some(attempt)
    }

    /// Records how `attempt` ended. Returns false when the completion was stale.
    pub fn finish(&mut self, attempt: u64, result: Result<GenerationOutcome, String>) -> bool {
        let current = matches!(self.state, GenerationState::InFlight { attempt: running } if running == attempt);
        self.state = self.state.apply(GenerationEvent::Finished {
            attempt,
            result: result.map(Arc::new),
        });
        current
    }
}

//! View state of one analysis session

use crate::model::AnalysisResult;
use log::debug;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Success(AnalysisResult),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Submitted,
    Succeeded(AnalysisResult),
    Failed(String),
    Cancelled,
}

impl ViewState {
    /// The only way state changes.
    ///
    /// A new submission always clears the previous result or error. Outcome
    /// events only apply while loading; anything else is stale and ignored.
    pub fn transition(self, event: Event) -> ViewState {
        match (self, event) {
            (_, Event::Submitted) => ViewState::Loading,
            (ViewState::Loading, Event::Succeeded(result)) => ViewState::Success(result),
            (ViewState::Loading, Event::Failed(message)) => ViewState::Failed(message),
            (ViewState::Loading, Event::Cancelled) => ViewState::Idle,
            (state, event) => {
                debug!("Ignoring {:?} in state {}", event, state.name());
                state
            }
        }
    }

    pub fn loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            ViewState::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ViewState::Idle => "idle",
            ViewState::Loading => "loading",
            ViewState::Success(_) => "success",
            ViewState::Failed(_) => "failed",
        }
    }
}

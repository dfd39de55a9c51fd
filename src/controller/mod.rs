//! Submission controller
//!
//! Owns the request lifecycle for the analysis screen and publishes every
//! state change on a watch channel for the form and the renderer.

pub mod state;

use crate::client::AnalysisBackend;
use crate::form::{SubmissionInput, SubmitOutcome, UploadForm};
use crate::input::SelectedFile;
use crate::model::AnalysisResult;
use log::{debug, error, info};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;

pub use state::{Event, ViewState};

pub struct SubmissionController<B> {
    backend: B,
    state: watch::Sender<ViewState>,
    generation: AtomicU64,
}

impl<B: AnalysisBackend> SubmissionController<B> {
    pub fn new(backend: B) -> Self {
        let (state, _) = watch::channel(ViewState::Idle);
        Self {
            backend,
            state,
            generation: AtomicU64::new(0),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    pub fn loading(&self) -> bool {
        self.state.borrow().loading()
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error().map(str::to_string)
    }

    pub fn result(&self) -> Option<AnalysisResult> {
        self.state.borrow().result().cloned()
    }

    /// Run the form's submit action and, if it validates, upload the result.
    ///
    /// The form sees the current `loading` flag, so a click while a request
    /// is in flight is reported as `Disabled` and sends nothing.
    pub async fn submit_form(&self, form: &UploadForm) -> SubmitOutcome {
        let mut pending = None;
        let outcome = form.submit(self.loading(), |tor, file| pending = Some((tor, file)));

        if let Some((tor, file)) = pending {
            self.submit(tor, file).await;
        }
        outcome
    }

    /// Upload one ToR/CV pair and record the outcome.
    ///
    /// If a newer submission starts before this one resolves, this one's
    /// outcome is dropped and the newer request owns the state.
    pub async fn submit(&self, tor: String, file: SelectedFile) -> ViewState {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.apply(Event::Submitted);
        info!("Submission #{} started for {}", generation, file.file_name);

        let mut guard = CancelGuard {
            controller: self,
            generation,
            armed: true,
        };

        let input = SubmissionInput { tor, cv: file };
        let outcome = self.backend.analyze(&input).await;
        guard.armed = false;

        if !self.is_current(generation) {
            debug!("Submission #{} superseded, discarding its outcome", generation);
            return self.state();
        }

        match outcome {
            Ok(result) => {
                info!(
                    "Submission #{} scored {} at {}",
                    generation, result.candidate_name, result.scores.total_score
                );
                self.apply(Event::Succeeded(result));
            }
            Err(err) => {
                error!("Submission #{} failed: {}", generation, err);
                self.apply(Event::Failed(err.user_message()));
            }
        }
        self.state()
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    fn apply(&self, event: Event) {
        self.state.send_modify(|state| {
            let previous = std::mem::take(state);
            *state = previous.transition(event);
        });
    }
}

/// Returns the state to idle if a submission future is dropped mid-flight.
struct CancelGuard<'a, B: AnalysisBackend> {
    controller: &'a SubmissionController<B>,
    generation: u64,
    armed: bool,
}

impl<B: AnalysisBackend> Drop for CancelGuard<'_, B> {
    fn drop(&mut self) {
        if self.armed && self.controller.is_current(self.generation) {
            debug!("Submission #{} cancelled", self.generation);
            self.controller.apply(Event::Cancelled);
        }
    }
}

//! Session controller - drives one crawl attempt at a time
//!
//! The controller owns the current attempt state and moves it through
//! `Idle -> InFlight -> Succeeded | Failed`. Beginning a new attempt while one
//! is in flight supersedes it: the older attempt's ticket becomes stale and
//! its outcome is discarded when it arrives.

use crate::client::{CrawlResult, CrawlService};
use crate::history::{HistoryCache, HistoryEntry, HistoryStore, StorageResult};
use crate::request::CrawlRequest;
use crate::session::state::{Failure, SessionState};
use crate::view::{default_mode, render, ViewMode};
use crate::{ExternalCallError, ValidationError};
use std::sync::Arc;

/// Message used when a failed call carries no description
const UNKNOWN_ERROR: &str = "Unknown error";

/// Handle for one submitted attempt
///
/// Only the ticket of the latest attempt can resolve the session.
#[derive(Debug)]
pub struct AttemptTicket {
    generation: u64,
    request: CrawlRequest,
}

impl AttemptTicket {
    pub fn request(&self) -> &CrawlRequest {
        &self.request
    }
}

/// What happened to an outcome handed to [`SessionController::resolve`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The outcome became the session state
    Applied,

    /// The attempt had been superseded; the outcome was dropped
    Discarded,
}

/// Orchestrates compose -> crawl -> classify -> persist for one session
pub struct SessionController<C, S> {
    service: C,
    history: Arc<HistoryCache<S>>,
    state: SessionState,
    generation: u64,
    view_mode: Option<ViewMode>,
    active_entry: Option<String>,
}

impl<C: CrawlService, S: HistoryStore> SessionController<C, S> {
    pub fn new(service: C, history: Arc<HistoryCache<S>>) -> Self {
        Self {
            service,
            history,
            state: SessionState::Idle,
            generation: 0,
            view_mode: None,
            active_entry: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn history(&self) -> &Arc<HistoryCache<S>> {
        &self.history
    }

    /// Current view mode; `None` until a result is shown
    pub fn view_mode(&self) -> Option<ViewMode> {
        self.view_mode
    }

    /// User override of the view mode
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = Some(mode);
    }

    /// Id of the history entry currently shown, if any
    pub fn active_entry_id(&self) -> Option<&str> {
        self.active_entry.as_deref()
    }

    /// The shown result rendered in the current view mode
    pub fn displayed_content(&self) -> Option<String> {
        let result = self.state.result()?;
        Some(render(result, self.view_mode.unwrap_or(ViewMode::Raw)))
    }

    pub fn error_message(&self) -> Option<&str> {
        self.state.failure().map(|f| f.message.as_str())
    }

    /// Sends `request` and resolves the session with the outcome
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] without contacting the service when the
    /// request is not submittable. Crawl and transport failures are not errors
    /// here; they are reported through [`SessionState::Failed`].
    pub async fn submit(&mut self, request: CrawlRequest) -> Result<&SessionState, ValidationError> {
        let ticket = self.begin(request)?;
        let outcome = self.service.crawl(ticket.request()).await;
        self.resolve(ticket, outcome).await;
        Ok(&self.state)
    }

    /// Moves the session to `InFlight` for `request`
    ///
    /// Accepted from every state. If an attempt is already in flight it is
    /// superseded and its eventual outcome will be discarded.
    pub fn begin(&mut self, request: CrawlRequest) -> Result<AttemptTicket, ValidationError> {
        request.validate()?;

        if let SessionState::InFlight { request: stale } = &self.state {
            tracing::warn!("Superseding in-flight crawl of {}", stale.url);
        }

        self.generation += 1;
        tracing::info!("Submitting crawl of {}", request.url);
        self.state = SessionState::InFlight {
            request: request.clone(),
        };

        Ok(AttemptTicket {
            generation: self.generation,
            request,
        })
    }

    /// Applies the outcome of the attempt identified by `ticket`
    ///
    /// Successful results are saved to history (best-effort: a storage failure
    /// is logged and the session still succeeds) and reset the view mode to
    /// the request's default.
    pub async fn resolve(
        &mut self,
        ticket: AttemptTicket,
        outcome: Result<CrawlResult, ExternalCallError>,
    ) -> Resolution {
        if ticket.generation != self.generation || !self.state.is_in_flight() {
            tracing::warn!(
                "Discarding stale outcome for {} (attempt {}, current {})",
                ticket.request.url,
                ticket.generation,
                self.generation
            );
            return Resolution::Discarded;
        }

        let request = ticket.request;
        self.state = match outcome {
            Ok(result) if result.success => {
                match self.history.save(&request.url, &request, &result).await {
                    Ok(entry) => self.active_entry = Some(entry.id),
                    Err(e) => {
                        self.active_entry = None;
                        tracing::warn!("Crawl of {} succeeded but was not saved: {}", request.url, e)
                    }
                }
                self.view_mode = Some(default_mode(&request));
                tracing::info!("Crawl of {} succeeded", request.url);
                SessionState::Succeeded(result)
            }
            Ok(result) => {
                let message = result.failure_message();
                tracing::info!("Crawl of {} failed: {}", request.url, message);
                SessionState::Failed(Failure::crawl(message))
            }
            Err(e) => {
                let mut message = e.to_string();
                if message.trim().is_empty() {
                    message = UNKNOWN_ERROR.to_string();
                }
                tracing::info!("Crawl call for {} errored: {}", request.url, message);
                SessionState::Failed(Failure::external(message))
            }
        };

        Resolution::Applied
    }

    /// Shows a stored history entry as the current result
    ///
    /// Like a new submission, this supersedes any in-flight attempt.
    pub fn select_entry(&mut self, entry: &HistoryEntry) {
        if self.state.is_in_flight() {
            self.generation += 1;
            tracing::warn!("History selection superseded an in-flight crawl");
        }

        self.active_entry = Some(entry.id.clone());
        self.view_mode = Some(default_mode(&entry.request_options));
        self.state = SessionState::Succeeded(entry.result.clone());
    }

    /// Empties the history and forgets the active entry
    pub async fn clear_history(&mut self) -> StorageResult<()> {
        self.history.clear().await?;
        self.active_entry = None;
        Ok(())
    }
}

use crate::core::form::{parse_form, FormError, FormSource};
use crate::core::render::{render_error, render_response};
use crate::models::ClusterResponse;
use crate::services::{ClusterApi, ClusterApiError};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Anything that can go wrong between reading the form and rendering
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("{0}")]
    Form(#[from] FormError),

    #[error("{0}")]
    Api(#[from] ClusterApiError),
}

/// Output element the handler writes its markup into
pub trait ResultSink: Send + Sync {
    /// Replace the element's whole content
    fn set_inner_html(&self, html: String);
}

/// In-memory result element
///
/// Cloning shares the same content, so a host can keep one handle and give
/// another to the handler.
#[derive(Debug, Clone, Default)]
pub struct ResultElement {
    html: Arc<Mutex<String>>,
}

impl ResultElement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current markup of the element
    pub fn content(&self) -> String {
        self.html
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl ResultSink for ResultElement {
    fn set_inner_html(&self, html: String) {
        *self
            .html
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = html;
    }
}

/// A form submission event
#[derive(Debug, Default)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop the host from performing its own submit navigation
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// What happened to a submission once its request settled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The result element now shows this submission's markup
    Rendered { sequence: u64 },
    /// A newer submission was issued meanwhile; the markup was dropped
    Stale { sequence: u64 },
}

/// Handles submissions of the player form
///
/// Each submission reads the form, posts a [`crate::models::PlayerQuery`] to
/// the clustering API and renders the reply, or the failure, into the result
/// sink. Submissions may overlap; only the most recently issued one is
/// allowed to render.
pub struct SubmissionHandler {
    api: Arc<dyn ClusterApi>,
    sink: Arc<dyn ResultSink>,
    issued: AtomicU64,
    render_lock: Mutex<()>,
}

impl SubmissionHandler {
    pub fn new(api: Arc<dyn ClusterApi>, sink: Arc<dyn ResultSink>) -> Self {
        Self {
            api,
            sink,
            issued: AtomicU64::new(0),
            render_lock: Mutex::new(()),
        }
    }

    /// Handle one submit event
    pub async fn on_submit<F>(&self, event: &mut SubmitEvent, form: &F) -> SubmitOutcome
    where
        F: FormSource + ?Sized,
    {
        event.prevent_default();

        let sequence = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!("Submission {} in flight", sequence);

        let html = match self.resolve(form).await {
            Ok(response) => {
                if let ClusterResponse::Error(message) = &response {
                    tracing::info!("Clustering API reported error for submission {}: {}", sequence, message);
                }
                render_response(&response)
            }
            Err(e) => {
                tracing::warn!("Submission {} failed: {}", sequence, e);
                render_error(&e.to_string())
            }
        };

        // A newer submission that bumps the counter after this check still
        // renders after us, since it has to take the same lock
        let _guard = self
            .render_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let latest = self.issued.load(Ordering::SeqCst);
        if latest != sequence {
            tracing::debug!("Dropping stale submission {} (latest is {})", sequence, latest);
            return SubmitOutcome::Stale { sequence };
        }

        self.sink.set_inner_html(html);
        SubmitOutcome::Rendered { sequence }
    }

    async fn resolve<F>(&self, form: &F) -> Result<ClusterResponse, SubmitError>
    where
        F: FormSource + ?Sized,
    {
        let query = parse_form(form)?;
        Ok(self.api.cluster_player(&query).await?)
    }
}

// Form handling exports
pub mod form;
pub mod handler;
pub mod render;

pub use form::{parse_float_prefix, parse_form, FormError, FormSource};
pub use handler::{ResultElement, ResultSink, SubmissionHandler, SubmitError, SubmitEvent, SubmitOutcome};
pub use render::{escape_html, render_cluster, render_error, render_response};

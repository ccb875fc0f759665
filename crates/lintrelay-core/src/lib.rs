//! Translation layer: lint diagnostics → check-run output + console report.

mod report;
mod translate;

pub use report::render_console_report;
pub use translate::{translate, TranslateError, Translation};

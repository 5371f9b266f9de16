//! Error page

use super::Page;
use crate::{error::ErrorReport, validation::escape};

/// Error page; `detail` is only passed in development mode
pub fn page(report: &ErrorReport, detail: Option<&str>) -> Page {
    let detail = detail
        .map(|d| format!("<pre>{}</pre>", escape(d)))
        .unwrap_or_default();

    let content = format!(
        "<h1>{}</h1>\n<h2>{}</h2>\n{}",
        escape(&report.message),
        report.status.as_u16(),
        detail
    );
    Page::new("Error", content)
}

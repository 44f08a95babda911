//! PDF export through a headless browser.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::context::ServiceContext;
use crate::error::{ScanError, ScanResult};

/// Path of the PDF that accompanies an HTML report.
#[must_use]
pub fn pdf_path_for(html_path: &Path) -> PathBuf {
    html_path.with_extension("pdf")
}

/// Prints `html_path` to PDF with `browser` and returns the PDF path.
///
/// # Errors
///
/// Returns [`ScanError::Report`] if the browser cannot be started or exits
/// unsuccessfully.
pub fn export_pdf(ctx: &ServiceContext, browser: &str, html_path: &Path) -> ScanResult<PathBuf> {
    let pdf_path = pdf_path_for(html_path);
    let args = vec![
        "--headless".to_string(),
        "--disable-gpu".to_string(),
        format!("--print-to-pdf={}", pdf_path.display()),
        html_path.display().to_string(),
    ];

    let output = ctx
        .shell
        .run(browser, &args)
        .map_err(|e| ScanError::Report(format!("failed to start {browser}: {e}")))?;
    if output.exit_code != 0 {
        return Err(ScanError::Report(format!(
            "{browser} exited with code {}: {}",
            output.exit_code,
            output.stderr.trim()
        )));
    }

    info!(path = %pdf_path.display(), "PDF report written");
    Ok(pdf_path)
}

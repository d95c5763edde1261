//! JSON export of comparison reports.

use super::ComparisonReport;
use crate::error::ReportError;
use std::io::Write;

/// Render a report as pretty-printed JSON, including its explanation
pub fn to_json(report: &ComparisonReport) -> Result<String, ReportError> {
    let value = serde_json::json!({
        "report": report,
        "explanation": report.explain(),
    });
    serde_json::to_string_pretty(&value).map_err(|e| ReportError::Serialization(e.to_string()))
}

/// Write a report as JSON followed by a newline
pub fn export_json<W: Write>(report: &ComparisonReport, mut writer: W) -> Result<(), ReportError> {
    let json = to_json(report)?;
    writeln!(writer, "{}", json)?;
    Ok(())
}

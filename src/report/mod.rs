pub mod json;
pub mod md;

use crate::error::GraderError;
use crate::types::report::GradingReport;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Text,
}

pub fn render(report: &GradingReport, format: OutputFormat) -> Result<String, GraderError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(GraderError::Json),
        OutputFormat::Text => Ok(md::to_markdown(report)),
    }
}

use crate::types::report::GradingReport;

pub fn to_json(report: &GradingReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

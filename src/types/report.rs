use super::config::MissingSkillPolicy;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GradeEntry {
    pub student: String,
    pub skill: String,
    pub grade: f64,
    /// A1-style address of the written cell in the new sheet.
    pub cell: String,
}

/// A student/skill pair that produced no write.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SkippedPair {
    pub student: String,
    pub skill: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GradingReport {
    pub generated_at: String,
    pub sheet: String,
    pub output: Option<PathBuf>,
    /// Policy in effect for skills without a header column.
    pub missing_skill_column: MissingSkillPolicy,
    pub students_seen: usize,
    pub students_graded: usize,
    pub grades: Vec<GradeEntry>,
    /// Pairs where every question cell was blank or non-numeric.
    pub ungraded: Vec<SkippedPair>,
    /// Pairs dropped because the skill had no header column.
    pub skipped_columns: Vec<SkippedPair>,
    /// Quiz students with no gradebook row, in quiz order.
    pub lost_students: Vec<String>,
}

impl GradingReport {
    pub fn new(sheet: impl Into<String>) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            sheet: sheet.into(),
            output: None,
            missing_skill_column: MissingSkillPolicy::default(),
            students_seen: 0,
            students_graded: 0,
            grades: Vec::new(),
            ungraded: Vec::new(),
            skipped_columns: Vec::new(),
            lost_students: Vec::new(),
        }
    }
}

use crate::error::GraderError;
use crate::workbook::{MAX_COLUMNS, MAX_ROWS};
use serde::{Deserialize, Serialize};

/// Rows at the bottom of the quiz sheet that are not student rows.
///
/// Zero keeps the final row. Exports that end with a totals/average footer
/// set `quiz.trailing_rows = 1`.
pub const DEFAULT_QUIZ_TRAILING_ROWS: u32 = 0;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraderConfig {
    pub gradebook: GradebookLayout,
    pub quiz: QuizLayout,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GradebookLayout {
    pub student_column: u32,
    pub skill_row: u32,
    pub skill_start_column: u32,
    pub identity_columns: u32,
}

impl Default for GradebookLayout {
    fn default() -> Self {
        Self {
            student_column: 1,
            skill_row: 1,
            skill_start_column: 4,
            identity_columns: 3,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QuizLayout {
    pub sheet: String,
    pub student_column: u32,
    pub first_student_row: u32,
    pub first_question_column: u32,
    pub trailing_rows: u32,
}

impl Default for QuizLayout {
    fn default() -> Self {
        Self {
            sheet: "Summary".to_string(),
            student_column: 1,
            first_student_row: 9,
            first_question_column: 5,
            trailing_rows: DEFAULT_QUIZ_TRAILING_ROWS,
        }
    }
}

impl QuizLayout {
    /// Column holding the score for a 1-based question number, or `None` when
    /// it would fall outside the worksheet.
    pub fn question_column(&self, question: u32) -> Option<u32> {
        let offset = question.checked_sub(1)?;
        self.first_question_column
            .checked_add(offset)
            .filter(|column| *column <= MAX_COLUMNS)
    }

    /// Inclusive student row range for a quiz sheet whose last used row is `max_row`.
    pub fn student_rows(&self, max_row: u32) -> std::ops::RangeInclusive<u32> {
        let last = max_row.saturating_sub(self.trailing_rows);
        self.first_student_row..=last
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    pub extension: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            extension: "xlsx".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingSkillPolicy {
    #[default]
    Error,
    Skip,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub path: Option<String>,
    pub sheet_suffix: String,
    pub missing_skill_column: MissingSkillPolicy,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: None,
            sheet_suffix: "-quiz".to_string(),
            missing_skill_column: MissingSkillPolicy::Error,
        }
    }
}

impl GraderConfig {
    pub fn validate(&self) -> Result<(), GraderError> {
        for (key, value, limit) in [
            ("gradebook.student_column", self.gradebook.student_column, MAX_COLUMNS),
            ("gradebook.skill_row", self.gradebook.skill_row, MAX_ROWS),
            ("gradebook.skill_start_column", self.gradebook.skill_start_column, MAX_COLUMNS),
            ("quiz.student_column", self.quiz.student_column, MAX_COLUMNS),
            ("quiz.first_student_row", self.quiz.first_student_row, MAX_ROWS),
            ("quiz.first_question_column", self.quiz.first_question_column, MAX_COLUMNS),
        ] {
            if value == 0 {
                return Err(GraderError::ConfigParse(format!(
                    "{key} must be at least 1 (rows and columns are 1-based)"
                )));
            }
            if value > limit {
                return Err(GraderError::ConfigParse(format!(
                    "{key} ({value}) is past the worksheet limit of {limit}"
                )));
            }
        }

        if self.gradebook.skill_start_column <= self.gradebook.identity_columns {
            return Err(GraderError::ConfigParse(format!(
                "gradebook.skill_start_column ({}) must come after the {} identity column(s)",
                self.gradebook.skill_start_column, self.gradebook.identity_columns
            )));
        }
        if self.gradebook.student_column > self.gradebook.identity_columns {
            return Err(GraderError::ConfigParse(format!(
                "gradebook.student_column ({}) must be one of the {} identity column(s)",
                self.gradebook.student_column, self.gradebook.identity_columns
            )));
        }

        if self.quiz.sheet.trim().is_empty() {
            return Err(GraderError::ConfigParse(
                "quiz.sheet cannot be empty".to_string(),
            ));
        }
        let extension = self.input.extension.trim_start_matches('.');
        if extension.is_empty() {
            return Err(GraderError::ConfigParse(
                "input.extension cannot be empty".to_string(),
            ));
        }
        if self.output.path.as_deref().is_some_and(|path| path.trim().is_empty()) {
            return Err(GraderError::ConfigParse(
                "output.path cannot be empty when set".to_string(),
            ));
        }

        Ok(())
    }
}

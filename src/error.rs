use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraderError {
    #[error("invalid {kind} workbook: {path} (expected a .{expected} file)")]
    InvalidExtension {
        kind: &'static str,
        path: String,
        expected: String,
    },

    #[error("rubric parse error: {0}")]
    RubricParse(String),

    #[error("rubric is empty: {0}")]
    EmptyRubric(String),

    #[error("config file not found: {0}")]
    ConfigNotFound(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("workbook has no sheets: {0}")]
    EmptyWorkbook(String),

    #[error("sheet `{sheet}` not found in {workbook}")]
    SheetNotFound { workbook: String, sheet: String },

    #[error("sheet `{0}` already exists in the gradebook")]
    SheetExists(String),

    #[error("invalid sheet name `{name}`: {reason}")]
    InvalidSheetName { name: String, reason: &'static str },

    #[error("no column for skill `{skill}` in header row of sheet `{sheet}`")]
    SkillColumnNotFound { skill: String, sheet: String },

    #[error("cell {row}:{column} of sheet `{sheet}` is outside the worksheet limits")]
    CellOutOfRange { sheet: String, row: u32, column: u32 },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("xlsx read error: {0}")]
    XlsxRead(#[from] calamine::XlsxError),

    #[error("xlsx write error: {0}")]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),
}

pub type Result<T> = std::result::Result<T, GraderError>;

use crate::error::{GraderError, Result};
use std::path::{Path, PathBuf};

pub fn require_extension(kind: &'static str, path: &Path, expected: &str) -> Result<()> {
    let expected = expected.trim_start_matches('.');
    let matches = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == expected);
    if matches {
        Ok(())
    } else {
        Err(GraderError::InvalidExtension {
            kind,
            path: path.display().to_string(),
            expected: expected.to_string(),
        })
    }
}

/// Output location: the explicit path if given, else `<grades-stem>-graded.<ext>`
/// beside the gradebook.
pub fn resolve_output_path(grades: &Path, explicit: Option<&Path>, extension: &str) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    let stem = grades
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("grades");
    grades.with_file_name(format!(
        "{stem}-graded.{}",
        extension.trim_start_matches('.')
    ))
}

/// Name of the sheet created for a quiz file: its stem plus `suffix`.
pub fn quiz_sheet_name(quiz: &Path, suffix: &str) -> String {
    let stem = quiz
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{stem}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_must_match_exactly() {
        assert!(require_extension("grade", Path::new("class/grades.xlsx"), "xlsx").is_ok());
        assert!(require_extension("grade", Path::new("grades.xlsx"), ".xlsx").is_ok());

        for bad in ["grades.xls", "grades.XLSX", "grades", "grades.xlsx.bak"] {
            let err = require_extension("quiz", Path::new(bad), "xlsx").expect_err(bad);
            assert!(matches!(err, GraderError::InvalidExtension { kind: "quiz", .. }));
        }
    }

    #[test]
    fn output_defaults_beside_gradebook() {
        let out = resolve_output_path(Path::new("/term/cs101.xlsx"), None, "xlsx");
        assert_eq!(out, PathBuf::from("/term/cs101-graded.xlsx"));
    }

    #[test]
    fn explicit_output_wins() {
        let out = resolve_output_path(
            Path::new("/term/cs101.xlsx"),
            Some(Path::new("final.xlsx")),
            "xlsx",
        );
        assert_eq!(out, PathBuf::from("final.xlsx"));
    }

    #[test]
    fn sheet_name_uses_quiz_stem() {
        assert_eq!(quiz_sheet_name(Path::new("quizzes/week3.xlsx"), "-quiz"), "week3-quiz");
    }
}

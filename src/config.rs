use crate::error::{GraderError, Result};
use crate::types::config::GraderConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;

pub const DEFAULT_CONFIG_FILE: &str = "grader.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/grader/config.toml";

/// Loads the layered configuration: global file, `grader.toml` in the
/// working directory, then an explicit `--config` file.
pub fn load_config(explicit: Option<&Path>) -> Result<GraderConfig> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    let cwd = std::env::current_dir()?;
    load_config_with_global(&cwd, global.as_deref(), explicit)
}

pub(crate) fn load_config_with_global(
    root: &Path,
    global_path: Option<&Path>,
    explicit: Option<&Path>,
) -> Result<GraderConfig> {
    let mut merged = Value::Table(Map::new());
    if let Some(path) = global_path {
        merge_file_if_exists(&mut merged, path)?;
    }
    merge_file_if_exists(&mut merged, &root.join(DEFAULT_CONFIG_FILE))?;
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(GraderError::ConfigNotFound(path.display().to_string()));
        }
        merge_file_if_exists(&mut merged, path)?;
    }

    let cfg: GraderConfig = merged
        .try_into()
        .map_err(|e: toml::de::Error| GraderError::ConfigParse(e.to_string()))?;
    cfg.validate()?;
    Ok(cfg)
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(())
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| GraderError::ConfigParse(format!("{}: {}", path.display(), e)))
}

fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::config::MissingSkillPolicy;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn load_config_defaults_when_no_files_exist() {
        let dir = TempDir::new().expect("temp dir should be created");
        let cfg = load_config_with_global(dir.path(), None, None).expect("load should not fail");
        assert_eq!(cfg.quiz.sheet, "Summary");
        assert_eq!(cfg.gradebook.skill_start_column, 4);
    }

    #[test]
    fn load_config_merges_global_local_and_explicit_in_order() {
        let root = TempDir::new().expect("root temp dir should be created");
        let global_root = TempDir::new().expect("global temp dir should be created");
        let global_path = global_root.path().join("config.toml");

        fs::write(
            &global_path,
            r#"
[quiz]
sheet = "Results"
first_student_row = 4

[output]
sheet_suffix = "-global"
"#,
        )
        .expect("global config should write");

        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            r#"
[quiz]
first_student_row = 2

[output]
missing_skill_column = "skip"
"#,
        )
        .expect("local config should write");

        let explicit = root.path().join("term.toml");
        fs::write(
            &explicit,
            r#"
[output]
sheet_suffix = "-term1"
"#,
        )
        .expect("explicit config should write");

        let cfg = load_config_with_global(root.path(), Some(&global_path), Some(&explicit))
            .expect("load should succeed");

        assert_eq!(cfg.quiz.sheet, "Results");
        assert_eq!(cfg.quiz.first_student_row, 2);
        assert_eq!(cfg.quiz.first_question_column, 5);
        assert_eq!(cfg.output.sheet_suffix, "-term1");
        assert_eq!(cfg.output.missing_skill_column, MissingSkillPolicy::Skip);
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = TempDir::new().expect("temp dir should be created");
        let err = load_config_with_global(dir.path(), None, Some(&dir.path().join("nope.toml")))
            .expect_err("missing explicit config should fail");
        assert!(matches!(err, GraderError::ConfigNotFound(_)));
    }

    #[test]
    fn invalid_layout_fails_validation() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            "[gradebook]\nskill_start_column = 2\n",
        )
        .expect("config should write");
        let err = load_config_with_global(dir.path(), None, None).expect_err("should fail");
        assert!(matches!(err, GraderError::ConfigParse(_)));
    }

    #[test]
    fn malformed_toml_names_the_file() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "[quiz\n").expect("config should write");
        let err = load_config_with_global(dir.path(), None, None).expect_err("should fail");
        assert!(err.to_string().contains(DEFAULT_CONFIG_FILE));
    }
}

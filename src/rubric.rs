//! Grading rubric: an ordered mapping from skill name to the quiz questions
//! that measure it.
//!
//! Rubric files are JSON objects (`{"Recursion": [1, 2, 3]}`) or, when the
//! file ends in `.toml`, TOML tables (`Recursion = [1, 2, 3]`). Document order
//! is kept because it fixes the column order of the generated sheet.

use crate::error::{GraderError, Result};
use crate::locate::fold_label;
use crate::workbook::MAX_COLUMNS;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skill {
    pub name: String,
    /// 1-based question numbers, unique, in rubric order.
    pub questions: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rubric {
    skills: Vec<Skill>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RubricFormat {
    Json,
    Toml,
}

impl RubricFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

impl Rubric {
    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn skill_names(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(|skill| skill.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

pub fn load_rubric(path: &Path) -> Result<Rubric> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| GraderError::RubricParse(format!("{}: {}", path.display(), e)))?;
    parse_rubric(&text, RubricFormat::from_path(path))
        .map_err(|e| match e {
            GraderError::EmptyRubric(_) => GraderError::EmptyRubric(path.display().to_string()),
            GraderError::RubricParse(msg) => {
                GraderError::RubricParse(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
}

pub fn parse_rubric(text: &str, format: RubricFormat) -> Result<Rubric> {
    let raw: RawRubric = match format {
        RubricFormat::Json => {
            serde_json::from_str(text).map_err(|e| GraderError::RubricParse(e.to_string()))?
        }
        RubricFormat::Toml => {
            toml::from_str(text).map_err(|e| GraderError::RubricParse(e.to_string()))?
        }
    };
    build_rubric(raw.0)
}

fn build_rubric(entries: Vec<(String, Vec<i64>)>) -> Result<Rubric> {
    if entries.is_empty() {
        return Err(GraderError::EmptyRubric("no skills defined".to_string()));
    }

    let mut seen_names = HashSet::new();
    let mut skills = Vec::with_capacity(entries.len());
    for (name, indices) in entries {
        if name.trim().is_empty() {
            return Err(GraderError::RubricParse(
                "skill names must not be blank".to_string(),
            ));
        }
        // Header lookup is case-insensitive, so names must be unique under it.
        if !seen_names.insert(fold_label(&name)) {
            return Err(GraderError::RubricParse(format!(
                "skill `{name}` is listed more than once (names are case-insensitive)"
            )));
        }

        let mut questions = Vec::with_capacity(indices.len());
        for index in indices {
            let question = u32::try_from(index)
                .ok()
                .filter(|q| *q >= 1)
                .ok_or_else(|| {
                    GraderError::RubricParse(format!(
                        "skill `{name}`: question {index} is not a positive 1-based index"
                    ))
                })?;
            if question > MAX_COLUMNS {
                return Err(GraderError::RubricParse(format!(
                    "skill `{name}`: question {index} is past the last worksheet column"
                )));
            }
            if questions.contains(&question) {
                warn!(skill = %name, question, "duplicate question index ignored");
                continue;
            }
            questions.push(question);
        }
        if questions.is_empty() {
            warn!(skill = %name, "skill has no questions and will not be graded");
        }

        skills.push(Skill { name, questions });
    }

    Ok(Rubric { skills })
}

/// Ordered `skill -> [index]` entries as they appear in the document.
struct RawRubric(Vec<(String, Vec<i64>)>);

impl<'de> Deserialize<'de> for RawRubric {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = RawRubric;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a mapping of skill names to lists of question numbers")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, questions)) = map.next_entry::<String, Vec<i64>>()? {
                    entries.push((name, questions));
                }
                Ok(RawRubric(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

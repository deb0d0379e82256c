use crate::error::{GraderError, Result};
use crate::locate::labels_equal;
use crate::types::config::GradebookLayout;
use crate::workbook::{Sheet, Workbook};
use tracing::debug;

/// Longest worksheet name a spreadsheet file accepts.
pub const MAX_SHEET_NAME_LEN: usize = 31;

const FORBIDDEN_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Adds `name` to the workbook, seeded with the identity columns of the first
/// sheet and a header row of `skills` in order.
pub fn create_grade_sheet<'w, 'a>(
    workbook: &'w mut Workbook,
    name: &str,
    skills: impl IntoIterator<Item = &'a str>,
    layout: &GradebookLayout,
) -> Result<&'w mut Sheet> {
    validate_sheet_name(name)?;
    if workbook
        .sheet_names()
        .any(|existing| labels_equal(existing, name))
    {
        return Err(GraderError::SheetExists(name.to_string()));
    }
    let template = workbook
        .first_sheet()
        .ok_or_else(|| GraderError::EmptyWorkbook("gradebook".to_string()))?;

    let mut sheet = Sheet::new(name);
    for ((row, column), cell) in template.cells() {
        if column <= layout.identity_columns {
            sheet.set(row, column, cell.clone());
        }
    }

    let mut count = 0;
    for (offset, skill) in skills.into_iter().enumerate() {
        sheet.set(
            layout.skill_row,
            layout.skill_start_column + offset as u32,
            skill,
        );
        count += 1;
    }
    debug!(sheet = name, template = %template.name, skills = count, "created grade sheet");

    Ok(workbook.push_sheet(sheet))
}

pub fn validate_sheet_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        Some("name is empty")
    } else if name.chars().count() > MAX_SHEET_NAME_LEN {
        Some("name is longer than 31 characters")
    } else if name.contains(FORBIDDEN_SHEET_CHARS) {
        Some("name contains one of [ ] : * ? / \\")
    } else if name.starts_with('\'') || name.ends_with('\'') {
        Some("name starts or ends with an apostrophe")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(GraderError::InvalidSheetName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

use crate::workbook::{Cell, Sheet};
use unicode_normalization::UnicodeNormalization as _;

/// Row of the first cell in `column` whose text equals `name`, ignoring case.
pub fn find_student_row(sheet: &Sheet, column: u32, name: &str) -> Option<u32> {
    (sheet.min_row()..=sheet.max_row()).find(|&row| label_matches(sheet.cell(row, column), name))
}

/// Column of the first cell in header `row`, at or after `first_column`, whose
/// text equals `skill`, ignoring case.
pub fn find_skill_column(sheet: &Sheet, row: u32, first_column: u32, skill: &str) -> Option<u32> {
    (first_column.max(sheet.min_column())..=sheet.max_column())
        .find(|&column| label_matches(sheet.cell(row, column), skill))
}

/// Caseless form of a label: NFKC, then full Unicode uppercasing (`ß` -> `SS`).
pub fn fold_label(label: &str) -> String {
    label.nfkc().flat_map(char::to_uppercase).collect()
}

/// Whether two labels are equal under [`fold_label`].
pub fn labels_equal(a: &str, b: &str) -> bool {
    a.nfkc()
        .flat_map(char::to_uppercase)
        .eq(b.nfkc().flat_map(char::to_uppercase))
}

fn label_matches(cell: &Cell, wanted: &str) -> bool {
    if wanted.is_empty() {
        return false;
    }
    match cell.as_text() {
        Some(text) => labels_equal(&text, wanted),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Sheet {
        let mut sheet = Sheet::new("Roster");
        sheet.set(1, 1, "Name");
        sheet.set(1, 4, "Recursion");
        sheet.set(1, 5, "Arrays");
        sheet.set(2, 1, "Alice");
        sheet.set(3, 1, "Bob");
        sheet.set(5, 1, "Émile");
        sheet.set(6, 1, "bob");
        sheet.set(7, 1, 1042.0);
        sheet
    }

    #[test]
    fn student_lookup_ignores_case() {
        let sheet = roster();
        assert_eq!(find_student_row(&sheet, 1, "alice"), Some(2));
        assert_eq!(find_student_row(&sheet, 1, "ALICE"), Some(2));
        assert_eq!(find_student_row(&sheet, 1, "émile"), Some(5));
    }

    #[test]
    fn student_lookup_uses_full_case_folding() {
        let mut sheet = roster();
        sheet.set(8, 1, "Strauß");
        assert_eq!(find_student_row(&sheet, 1, "STRAUSS"), Some(8));
        assert_eq!(find_student_row(&sheet, 1, "strasse"), Some(8));
        assert!(labels_equal("Ａlice", "alice"));
        assert!(!labels_equal("Strauß", "Straus"));
    }

    #[test]
    fn first_match_wins() {
        let sheet = roster();
        assert_eq!(find_student_row(&sheet, 1, "BOB"), Some(3));
    }

    #[test]
    fn missing_student_is_not_found() {
        let sheet = roster();
        assert_eq!(find_student_row(&sheet, 1, "Carol"), None);
        assert_eq!(find_student_row(&sheet, 1, "Ali"), None);
        assert_eq!(find_student_row(&sheet, 1, ""), None);
        // Gap rows (row 4) are empty and never match.
        assert_eq!(find_student_row(&sheet, 2, "Alice"), None);
    }

    #[test]
    fn numeric_labels_match_their_text() {
        let sheet = roster();
        assert_eq!(find_student_row(&sheet, 1, "1042"), Some(7));
    }

    #[test]
    fn skill_lookup_scans_header_row() {
        let sheet = roster();
        assert_eq!(find_skill_column(&sheet, 1, 1, "arrays"), Some(5));
        assert_eq!(find_skill_column(&sheet, 1, 1, "Recursion"), Some(4));
        assert_eq!(find_skill_column(&sheet, 1, 1, "Big-O"), None);
        assert_eq!(find_skill_column(&sheet, 2, 1, "Arrays"), None);
    }

    #[test]
    fn skill_lookup_starts_at_first_skill_column() {
        let mut sheet = roster();
        sheet.set(1, 6, "Name");
        assert_eq!(find_skill_column(&sheet, 1, 1, "name"), Some(1));
        assert_eq!(find_skill_column(&sheet, 1, 4, "name"), Some(6));
        assert_eq!(find_skill_column(&sheet, 1, 6, "Arrays"), None);
        assert_eq!(find_skill_column(&sheet, 1, 40, "Name"), None);
    }

    #[test]
    fn empty_sheet_finds_nothing() {
        let sheet = Sheet::new("blank");
        assert_eq!(find_student_row(&sheet, 1, "Alice"), None);
        assert_eq!(find_skill_column(&sheet, 1, 4, "Recursion"), None);
    }
}

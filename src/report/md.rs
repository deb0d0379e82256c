use crate::types::report::GradingReport;

pub fn to_markdown(report: &GradingReport) -> String {
    let mut output = String::new();
    output.push_str(&format!("# Grades: {}\n\n", report.sheet));
    if let Some(path) = &report.output {
        output.push_str(&format!("Saved to: {}\n\n", path.display()));
    }
    output.push_str(&format!(
        "- students in quiz: {}\n- students graded: {}\n- grades written: {}\n- skills without valid scores: {}\n\n",
        report.students_seen,
        report.students_graded,
        report.grades.len(),
        report.ungraded.len()
    ));

    if !report.skipped_columns.is_empty() {
        output.push_str("## Skipped (no skill column)\n\n");
        for pair in &report.skipped_columns {
            output.push_str(&format!("- {}: {}\n", pair.student, pair.skill));
        }
        output.push('\n');
    }

    output.push_str("## Lost students\n\n");
    if report.lost_students.is_empty() {
        output.push_str("- none\n");
    } else {
        for student in &report.lost_students {
            output.push_str(&format!("- {student}\n"));
        }
    }

    output
}

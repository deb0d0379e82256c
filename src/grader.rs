//! Grading driver: turns the rows of a quiz sheet into per-skill grades in a
//! gradebook sheet.

use crate::aggregate::{collect_scores, compute_grade};
use crate::error::{GraderError, Result};
use crate::locate::{find_skill_column, find_student_row};
use crate::rubric::Rubric;
use crate::synth::create_grade_sheet;
use crate::types::config::{GraderConfig, MissingSkillPolicy, QuizLayout};
use crate::types::report::{GradeEntry, GradingReport, SkippedPair};
use crate::workbook::{cell_address, Cell, Sheet, Workbook};
use tracing::{debug, info, warn};

/// Creates the sheet `sheet_name` in the gradebook and fills it from `quiz`.
///
/// The rubric is checked against the quiz layout first, so a rubric that
/// points outside the worksheet leaves the gradebook untouched.
pub fn grade_quiz(
    gradebook: &mut Workbook,
    quiz: &Sheet,
    rubric: &Rubric,
    sheet_name: &str,
    config: &GraderConfig,
) -> Result<GradingReport> {
    let columns = question_columns(rubric, &config.quiz)?;
    let sheet = create_grade_sheet(gradebook, sheet_name, rubric.skill_names(), &config.gradebook)?;
    fill_rows(sheet, quiz, rubric, &columns, config)
}

/// Writes grades into an existing grade sheet whose header row already names
/// the rubric skills.
pub fn grade_rows(
    sheet: &mut Sheet,
    quiz: &Sheet,
    rubric: &Rubric,
    config: &GraderConfig,
) -> Result<GradingReport> {
    let columns = question_columns(rubric, &config.quiz)?;
    fill_rows(sheet, quiz, rubric, &columns, config)
}

/// Quiz columns for every skill's questions, in rubric order.
fn question_columns(rubric: &Rubric, layout: &QuizLayout) -> Result<Vec<Vec<u32>>> {
    rubric
        .skills()
        .iter()
        .map(|skill| {
            skill
                .questions
                .iter()
                .map(|&question| {
                    layout.question_column(question).ok_or_else(|| {
                        GraderError::RubricParse(format!(
                            "skill `{}`: question {question} is past the last quiz column",
                            skill.name
                        ))
                    })
                })
                .collect::<Result<Vec<u32>>>()
        })
        .collect()
}

fn fill_rows(
    sheet: &mut Sheet,
    quiz: &Sheet,
    rubric: &Rubric,
    columns: &[Vec<u32>],
    config: &GraderConfig,
) -> Result<GradingReport> {
    let mut report = GradingReport::new(sheet.name.clone());
    report.missing_skill_column = config.output.missing_skill_column;
    let layout = &config.gradebook;
    let quiz_layout = &config.quiz;

    for quiz_row in quiz_layout.student_rows(quiz.max_row()) {
        let Some(student) = quiz
            .cell(quiz_row, quiz_layout.student_column)
            .as_text()
            .map(|name| name.into_owned())
        else {
            debug!(row = quiz_row, "skipping quiz row without a student name");
            continue;
        };
        report.students_seen += 1;
        info!("computing grades for {student}");

        let Some(grade_row) = find_student_row(sheet, layout.student_column, &student) else {
            warn!("student {student} not found in gradebook");
            report.lost_students.push(student);
            continue;
        };

        let mut wrote_any = false;
        for (skill, skill_columns) in rubric.skills().iter().zip(columns) {
            info!("... measuring skill: {}", skill.name);

            let cells = skill_columns.iter().map(|&column| {
                debug!("... using value from {}", cell_address(quiz_row, column));
                quiz.cell(quiz_row, column)
            });
            let values = collect_scores(cells);

            let Some(grade) = compute_grade(&values) else {
                debug!(student = %student, skill = %skill.name, "no valid scores");
                report.ungraded.push(SkippedPair {
                    student: student.clone(),
                    skill: skill.name.clone(),
                });
                continue;
            };

            let header = find_skill_column(
                sheet,
                layout.skill_row,
                layout.skill_start_column,
                &skill.name,
            );
            let Some(column) = header else {
                match config.output.missing_skill_column {
                    MissingSkillPolicy::Error => {
                        return Err(GraderError::SkillColumnNotFound {
                            skill: skill.name.clone(),
                            sheet: sheet.name.clone(),
                        });
                    }
                    MissingSkillPolicy::Skip => {
                        warn!(skill = %skill.name, "no header column for skill, grade dropped");
                        report.skipped_columns.push(SkippedPair {
                            student: student.clone(),
                            skill: skill.name.clone(),
                        });
                        continue;
                    }
                }
            };

            sheet.set(grade_row, column, Cell::Number(grade));
            let address = cell_address(grade_row, column);
            info!("... grade {grade} written to {address}");
            report.grades.push(GradeEntry {
                student: student.clone(),
                skill: skill.name.clone(),
                grade,
                cell: address,
            });
            wrote_any = true;
        }

        if wrote_any {
            report.students_graded += 1;
        }
    }

    Ok(report)
}

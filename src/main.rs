mod aggregate;
mod cli;
mod config;
mod error;
mod grader;
mod inputs;
mod locate;
mod logging;
mod report;
mod rubric;
mod synth;
mod types;
mod workbook;

use crate::error::GraderError;
use crate::types::config::MissingSkillPolicy;
use clap::Parser;
use std::path::Path;
use tracing::info;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const RUNTIME_FAILURE: i32 = 1;
}

fn run() -> Result<i32, GraderError> {
    let cli = cli::Cli::parse();
    let json = matches!(cli.format, cli::ReportFormat::Json);
    if let Err(e) = logging::init_tracing(cli.verbose, cli.quiet, json) {
        eprintln!("warning: logging unavailable: {e}");
    }

    let mut cfg = config::load_config(cli.config.as_deref())?;
    if cli.allow_missing_skills {
        cfg.output.missing_skill_column = MissingSkillPolicy::Skip;
    }

    let extension = cfg.input.extension.clone();
    inputs::require_extension("grade", &cli.grades, &extension)?;
    inputs::require_extension("quiz", &cli.quiz, &extension)?;
    let output = inputs::resolve_output_path(
        &cli.grades,
        cli.output
            .as_deref()
            .or_else(|| cfg.output.path.as_deref().map(Path::new)),
        &extension,
    );
    inputs::require_extension("output", &output, &extension)?;

    let rubric = rubric::load_rubric(&cli.rubrik)?;
    info!("loaded rubric with {} skill(s)", rubric.len());

    let mut gradebook = workbook::xlsx::load_workbook(&cli.grades)?;
    let quiz = workbook::xlsx::load_sheet(&cli.quiz, &cfg.quiz.sheet)?;

    let sheet_name = inputs::quiz_sheet_name(&cli.quiz, &cfg.output.sheet_suffix);
    let mut grading = grader::grade_quiz(&mut gradebook, &quiz, &rubric, &sheet_name, &cfg)?;

    workbook::xlsx::save_workbook(&gradebook, &output)?;
    grading.output = Some(output);

    let format = if json {
        report::OutputFormat::Json
    } else {
        report::OutputFormat::Text
    };
    println!("{}", report::render(&grading, format)?);

    Ok(exit_code::SUCCESS)
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}

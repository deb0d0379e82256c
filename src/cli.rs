use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "grader",
    version,
    about = "Grades quiz results into per-skill columns of a class gradebook"
)]
pub struct Cli {
    /// Excel workbook containing the class grades
    pub grades: PathBuf,

    /// Excel workbook containing the quiz results
    pub quiz: PathBuf,

    /// Grading rubric: JSON object (or .toml table) of skill -> question numbers
    pub rubrik: PathBuf,

    /// Where to write the graded workbook [default: <GRADES>-graded.xlsx]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Extra configuration file layered over grader.toml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ReportFormat,

    /// Drop grades for skills without a header column instead of aborting
    #[arg(long)]
    pub allow_missing_skills: bool,

    /// Increase verbosity (-v shows cell addresses, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

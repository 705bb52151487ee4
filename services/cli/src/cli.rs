use crate::infra::{load_request, parse_score, RequestSource};
use crate::report::{render_normalization, render_score_text, render_urgency, ScoreReport};
use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use drugshield::config::AppConfig;
use drugshield::error::AppError;
use drugshield::{assess_fall_risk, telemetry, urgency_from_score, RiskScoringEngine};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "drugshield",
    about = "Score medication risk for a patient case from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score a patient case and print the audit breakdown
    Score(ScoreArgs),
    /// Print the urgency band for an already computed score
    Urgency(UrgencyArgs),
    /// Show how a medication name and dose are interpreted by the dose rules
    Normalize(NormalizeArgs),
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("input").required(true).args(["case", "medications"])))]
pub(crate) struct ScoreArgs {
    /// JSON case file with age, medications and interactions
    #[arg(long, conflicts_with_all = ["age", "medications", "interactions"])]
    pub(crate) case: Option<PathBuf>,
    /// Patient age in years (used with --medications)
    #[arg(long, requires = "medications")]
    pub(crate) age: Option<u16>,
    /// Medication CSV export (columns: name, normalized_name, identifier, dose, frequency, note)
    #[arg(long, requires = "age")]
    pub(crate) medications: Option<PathBuf>,
    /// Interaction CSV export (columns: drug_a, drug_b, severity, evidence)
    #[arg(long, requires = "medications")]
    pub(crate) interactions: Option<PathBuf>,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
}

#[derive(Args, Debug)]
pub(crate) struct UrgencyArgs {
    /// Final score between 0 and 10
    #[arg(long, value_parser = parse_score, allow_negative_numbers = true)]
    pub(crate) score: f64,
}

#[derive(Args, Debug)]
pub(crate) struct NormalizeArgs {
    /// Medication name as entered
    #[arg(long)]
    pub(crate) name: String,
    /// Free-text dose, e.g. "500 mg"
    #[arg(long)]
    pub(crate) dose: Option<String>,
    /// Free-text frequency, e.g. "twice daily"
    #[arg(long)]
    pub(crate) frequency: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Score(args) => run_score(args, &config, &mut out),
        Command::Urgency(args) => render_urgency(urgency_from_score(args.score), &mut out),
        Command::Normalize(args) => render_normalization(
            RiskScoringEngine::default().tables(),
            &args.name,
            args.dose.as_deref(),
            args.frequency.as_deref(),
            &mut out,
        ),
    }
}

fn run_score(args: ScoreArgs, config: &AppConfig, out: &mut impl Write) -> Result<(), AppError> {
    let source = RequestSource::try_from(&args)?;
    let request = load_request(&source)?;
    let age = request.validate(&config.limits)?;

    let breakdown =
        RiskScoringEngine::default().score(age, &request.interactions, &request.medications);
    let report = ScoreReport::new(breakdown, assess_fall_risk(&request.medications));
    info!(
        risk_score = report.risk_score,
        urgency = %report.urgency,
        medications = request.medications.len(),
        "case scored"
    );

    match args.format {
        OutputFormat::Text => render_score_text(&report, out),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
            Ok(())
        }
    }
}

//! Command-line interface.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;

use triage_core::catalog::{Catalog, CatalogKind, StaticCatalog};
use triage_core::models::VitalSigns;
use triage_core::reference_range::{RangeGrammar, ReferenceRangeEvaluator};
use triage_core::{AcuityClassifier, EncounterWorkflow, WorkflowConfig};

use crate::script::{parse_script, replay};
use crate::{settings, telemetry};

#[derive(Parser, Debug)]
#[command(
    name = "triage",
    about = "Classify vital signs, check lab values and replay encounters",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Classify a vital-sign bundle into an acuity level
    Classify(ClassifyArgs),
    /// Check a lab value against a reference range
    CheckRange(CheckRangeArgs),
    /// Replay a scripted encounter (JSON) and print the resulting record
    Replay(ReplayArgs),
    /// Suggest catalog entries for free text
    Suggest(SuggestArgs),
}

#[derive(Args, Debug, Default)]
pub struct ClassifyArgs {
    /// Heart rate (bpm)
    #[arg(long = "hr", default_value = "")]
    pub heart_rate: String,
    /// Respiratory rate (breaths/min)
    #[arg(long = "rr", default_value = "")]
    pub respiratory_rate: String,
    /// Oxygen saturation (%)
    #[arg(long = "spo2", default_value = "")]
    pub oxygen_saturation: String,
    /// Temperature (°C)
    #[arg(long = "temp", default_value = "")]
    pub temperature: String,
    /// Pain score (0-10)
    #[arg(long = "pain", default_value = "0")]
    pub pain_score: String,
    /// Print the classification as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct CheckRangeArgs {
    /// Measured value
    #[arg(allow_hyphen_values = true)]
    pub value: String,
    /// Reference range, e.g. "70-100", "< 0.04", "> 5"
    #[arg(allow_hyphen_values = true)]
    pub range: String,
    /// Override the configured range grammar (signed or legacy)
    #[arg(long)]
    pub grammar: Option<RangeGrammar>,
}

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Path to the script file
    pub script: PathBuf,
    /// Print the full step log, not just the final record
    #[arg(long)]
    pub steps: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum KindArg {
    Symptom,
    Diagnosis,
    LabTest,
}

impl From<KindArg> for CatalogKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Symptom => CatalogKind::Symptom,
            KindArg::Diagnosis => CatalogKind::Diagnosis,
            KindArg::LabTest => CatalogKind::LabTest,
        }
    }
}

#[derive(Args, Debug)]
pub struct SuggestArgs {
    /// Vocabulary to search
    #[arg(long, value_enum, default_value = "symptom")]
    pub kind: KindArg,
    /// Text typed so far
    pub query: String,
    /// Override the configured suggestion limit
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Parse arguments, load configuration, install tracing and run.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = settings::load().context("failed to load configuration")?;
    telemetry::init(&config.log_level)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(cli, &config, &mut out)
}

/// Run a parsed command, writing results to `out`.
pub fn execute(cli: Cli, config: &WorkflowConfig, out: &mut impl Write) -> Result<()> {
    match cli.command {
        Command::Classify(args) => classify(args, out),
        Command::CheckRange(args) => check_range(args, config, out),
        Command::Replay(args) => replay_script(args, config, out),
        Command::Suggest(args) => suggest(args, config, out),
    }
}

fn classify(args: ClassifyArgs, out: &mut impl Write) -> Result<()> {
    let vitals = VitalSigns::new()
        .with_heart_rate(args.heart_rate)
        .with_respiratory_rate(args.respiratory_rate)
        .with_oxygen_saturation(args.oxygen_saturation)
        .with_temperature(args.temperature)
        .with_pain_score(args.pain_score);
    let classification = AcuityClassifier::new().explain(&vitals);

    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&classification)?)?;
        return Ok(());
    }

    let level = classification.level;
    writeln!(
        out,
        "{} ({}) [{}]",
        level.label(),
        level.spanish_label(),
        level.palette().color_name()
    )?;
    if let Some(advisory) = level.advisory() {
        writeln!(out, "{}", advisory)?;
    }
    for criterion in &classification.triggered {
        writeln!(out, "  - {}", criterion)?;
    }
    Ok(())
}

fn check_range(args: CheckRangeArgs, config: &WorkflowConfig, out: &mut impl Write) -> Result<()> {
    let evaluator = ReferenceRangeEvaluator::new(args.grammar.unwrap_or(config.range_grammar));
    let verdict = if evaluator.is_abnormal(&args.value, &args.range) {
        "abnormal"
    } else {
        "normal"
    };
    writeln!(out, "{}", verdict)?;
    Ok(())
}

fn replay_script(args: ReplayArgs, config: &WorkflowConfig, out: &mut impl Write) -> Result<()> {
    let text = std::fs::read_to_string(&args.script)
        .with_context(|| format!("failed to read script {}", args.script.display()))?;
    let script = parse_script(&text)
        .with_context(|| format!("invalid script {}", args.script.display()))?;

    let workflow = EncounterWorkflow::new(config.clone());
    let report = replay(&workflow, &script)?;
    info!(
        encounter_id = %report.record.encounter_id,
        stage = %report.record.stage(),
        steps = report.steps.len(),
        "Script replayed"
    );

    let json = if args.steps {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string_pretty(&report.record)?
    };
    writeln!(out, "{}", json)?;
    Ok(())
}

fn suggest(args: SuggestArgs, config: &WorkflowConfig, out: &mut impl Write) -> Result<()> {
    let catalog = StaticCatalog::clinical_defaults();
    let limit = args.limit.unwrap_or(config.suggestion_limit);
    let kind = CatalogKind::from(args.kind);

    for suggestion in catalog.suggest(kind, &args.query, limit) {
        match catalog.lab_test(&suggestion.text) {
            Some(template) if kind == CatalogKind::LabTest => writeln!(
                out,
                "{}\t{}\t{}",
                template.name, template.unit, template.reference_range
            )?,
            _ => writeln!(out, "{}", suggestion.text)?,
        }
    }
    Ok(())
}

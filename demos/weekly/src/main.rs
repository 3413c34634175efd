//! weekly: run a notification policy against a simulated user.
//!
//! Picks one of the five response models (two synthetic baselines, two
//! stubborn variants, or history drawn from survey/panel files), pairs it
//! with an agent, runs the configured number of weeks and writes
//! `trace.csv` / `summary.csv` plus the effective `config.json` to the
//! output directory.
//!
//! ```text
//! weekly --model less-stubborn --agent epsilon-greedy --weeks 4
//! weekly --model panel --data batch1.csv --data batch2.csv --respondent W17
//! ```

mod agent;


use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};

use nudge_behavior::{AlwaysAccept, HistoryWeighted, LessStubborn, ResponseModel, Stubborn};
use nudge_core::{SimConfig, SimRng, StateKey};
use nudge_output::{CsvWriter, TraceOutputObserver};
use nudge_sim::{AlwaysSend, NeverSend, NotificationAgent, SimBuilder, TraceSummary};
use nudge_survey::{load_panel_csv_files, load_survey_lines, BehaviorRecord, BehaviorTable};

use agent::{check_epsilon, EpsilonGreedy};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ModelKind {
    AlwaysAccept,
    Stubborn,
    LessStubborn,
    /// History-weighted from headerless survey lines
    Survey,
    /// History-weighted from panel CSV exports
    Panel,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum AgentKind {
    Always,
    Never,
    EpsilonGreedy,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Simulated user
    #[arg(long, value_enum, default_value = "less-stubborn")]
    model: ModelKind,

    /// Notification policy
    #[arg(long, value_enum, default_value = "epsilon-greedy")]
    agent: AgentKind,

    /// Exploration rate for the epsilon-greedy agent
    #[arg(long, default_value = "0.1")]
    epsilon: f64,

    /// JSON run configuration; missing fields take their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override simulation_weeks
    #[arg(long)]
    weeks: Option<u32>,

    /// Override seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override step_width_minutes
    #[arg(long)]
    step: Option<u32>,

    /// Survey or panel files for the history-weighted models
    #[arg(long = "data")]
    data: Vec<PathBuf>,

    /// Keep only records from this respondent
    #[arg(long)]
    respondent: Option<String>,

    /// Directory for trace.csv, summary.csv and config.json
    #[arg(long, default_value = "output")]
    out_dir: PathBuf,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

// ── Setup ─────────────────────────────────────────────────────────────────────

fn load_config(cli: &Cli) -> Result<SimConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("opening config {}", path.display()))?;
            serde_json::from_reader(file)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => SimConfig::default(),
    };
    if let Some(w) = cli.weeks {
        config.simulation_weeks = w;
    }
    if let Some(s) = cli.seed {
        config.seed = s;
    }
    if let Some(s) = cli.step {
        config.step_width_minutes = s;
    }
    config.validate()?;
    check_epsilon(cli.epsilon).context("invalid --epsilon")?;
    Ok(config)
}

fn load_table(cli: &Cli, panel: bool) -> Result<BehaviorTable> {
    if cli.data.is_empty() {
        bail!("--model {:?} needs at least one --data file", cli.model);
    }
    let records: Vec<BehaviorRecord> = if panel {
        load_panel_csv_files(cli.data.as_slice())?
    } else {
        let mut all = Vec::new();
        for path in &cli.data {
            all.extend(
                load_survey_lines(path)
                    .with_context(|| format!("loading survey {}", path.display()))?,
            );
        }
        all
    };

    let table = match &cli.respondent {
        Some(id) => BehaviorTable::from_records_filtered(records, |r| {
            r.respondent.as_deref() == Some(id.as_str())
        }),
        None => BehaviorTable::from_records(records),
    };
    tracing::info!(
        records = table.total_records(),
        accepts = table.accept_count(),
        ignores = table.ignore_count(),
        empty_states = table.empty_state_count(),
        "behavior table loaded"
    );
    Ok(table)
}

/// The stubborn models draw their plan from `rng`, so the same stream must
/// then drive the sim.
fn build_model(cli: &Cli, config: &SimConfig, rng: &mut SimRng) -> Result<Box<dyn ResponseModel>> {
    Ok(match cli.model {
        ModelKind::AlwaysAccept => Box::new(AlwaysAccept),
        ModelKind::Stubborn => {
            let model = Stubborn::new(rng);
            tracing::info!(accepting = model.plan().accepting_states(), "stubborn plan drawn");
            Box::new(model)
        }
        ModelKind::LessStubborn => {
            let model = LessStubborn::new(config.deviation_probability, rng)?;
            tracing::info!(
                accepting = model.plan().accepting_states(),
                deviation = model.deviation_probability(),
                "less-stubborn plan drawn"
            );
            Box::new(model)
        }
        ModelKind::Survey => Box::new(HistoryWeighted::survey(load_table(cli, false)?)),
        ModelKind::Panel  => Box::new(HistoryWeighted::new(load_table(cli, true)?)),
    })
}

// ── Run ───────────────────────────────────────────────────────────────────────

fn simulate<A: NotificationAgent>(
    config:  SimConfig,
    model:   Box<dyn ResponseModel>,
    agent:   A,
    rng:     SimRng,
    out_dir: &Path,
) -> Result<(TraceSummary, A)> {
    let mut sim = SimBuilder::new(config, model, agent).rng(rng).build()?;
    let mut obs = TraceOutputObserver::new(CsvWriter::new(out_dir)?);

    let outcome = sim.run(&mut obs).map(|_| ());
    if let Err(e) = outcome {
        tracing::error!(error = %e, ticks = sim.trace().len(), "simulation aborted");
        obs.finish()?;
        return Err(e.into());
    }
    if let Some(e) = obs.take_error() {
        return Err(e).context("writing trace output");
    }
    Ok((TraceSummary::from_entries(sim.trace()), sim.agent))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(&cli)?;
    fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("creating {}", cli.out_dir.display()))?;
    serde_json::to_writer_pretty(File::create(cli.out_dir.join("config.json"))?, &config)?;

    let mut rng = SimRng::new(config.seed);
    let agent_rng = rng.child(1);
    let model = build_model(&cli, &config, &mut rng)?;
    tracing::info!(model = model.name(), agent = ?cli.agent, "starting run");

    let start = Instant::now();
    let summary = match cli.agent {
        AgentKind::Always => simulate(config, model, AlwaysSend, rng, &cli.out_dir)?.0,
        AgentKind::Never  => simulate(config, model, NeverSend, rng, &cli.out_dir)?.0,
        AgentKind::EpsilonGreedy => {
            let learner = EpsilonGreedy::new(cli.epsilon, agent_rng)?;
            let (summary, learner) = simulate(config, model, learner, rng, &cli.out_dir)?;
            let sends = learner.policy().filter(|&(_, send)| send).count();
            tracing::info!(
                sends,
                states = StateKey::COUNT,
                epsilon = learner.epsilon(),
                "learned policy"
            );
            for (key, send) in learner.policy().filter(|&(_, send)| send) {
                tracing::debug!(%key, value = learner.value(key, send), "send");
            }
            summary
        }
    };

    println!(
        "{}",
        serde_json::json!({
            "ticks":        summary.ticks,
            "sends":        summary.sends,
            "accepts":      summary.accepts,
            "ignores":      summary.ignores,
            "total_reward": summary.total_reward,
            "accept_rate":  summary.accept_rate(),
            "elapsed_ms":   start.elapsed().as_millis() as u64,
            "out_dir":      cli.out_dir.display().to_string(),
        })
    );
    Ok(())
}

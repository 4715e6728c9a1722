//! CLI entrypoint for workflow-relay
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod commands;
mod report;

use anyhow::{Context as _, Result, bail};
use clap::Parser;
use commands::{Cli, Commands};
use relay_application::{
    ContinueRunInput, ContinueRunUseCase, RunReport, RunWorkflowInput, RunWorkflowUseCase,
    RunStorePort,
};
use relay_domain::{Context, RunId, RunOutcome};
use relay_infrastructure::{BuiltinToolExecutor, ConfigLoader, FileConfig, OllamaPlanner, SqliteRunStore};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };
    config.validate()?;

    let store = Arc::new(SqliteRunStore::open(config.storage.resolved_db_path())?);

    match cli.command {
        Commands::Run { goal, context } => run(&config, store, goal, context).await,
        Commands::Continue { run_id, context } => continue_run(&config, store, run_id, context).await,
        Commands::List { limit } => list(store, limit).await,
        Commands::Show { run_id } => show(store, run_id).await,
        Commands::Report { run_id, html, out } => render_report(store, run_id, html, out).await,
    }
}

async fn run(
    config: &FileConfig,
    store: Arc<SqliteRunStore>,
    goal: String,
    context: Option<String>,
) -> Result<()> {
    info!("starting workflow run");

    // === Dependency Injection ===
    let planner = Arc::new(OllamaPlanner::new(&config.ollama, config.execution.max_steps)?);
    let tools = Arc::new(BuiltinToolExecutor::new());
    let use_case = RunWorkflowUseCase::new(planner, tools, store);

    let mut input = RunWorkflowInput::new(goal).with_execution(config.execution.params());
    if let Some(context) = parse_context(context.as_deref())? {
        input = input.with_context(context);
    }

    let result = use_case.execute(input).await?;
    print_outcome(&result);
    Ok(())
}

async fn continue_run(
    config: &FileConfig,
    store: Arc<SqliteRunStore>,
    run_id: String,
    context: Option<String>,
) -> Result<()> {
    let tools = Arc::new(BuiltinToolExecutor::new());
    let use_case = ContinueRunUseCase::new(tools, store);

    let mut input = ContinueRunInput::new(run_id).with_execution(config.execution.params());
    if let Some(patch) = parse_context(context.as_deref())? {
        input = input.with_patch(patch);
    }

    let result = use_case.execute(input).await?;
    print_outcome(&result);
    Ok(())
}

async fn list(store: Arc<SqliteRunStore>, limit: usize) -> Result<()> {
    let runs = store.list(limit).await?;
    if runs.is_empty() {
        println!("No runs yet.");
        return Ok(());
    }

    for run in runs {
        println!(
            "{}  {}  {:<11}  {}",
            run.run_id,
            report::format_timestamp(run.created_at),
            run.status,
            run.user_goal
        );
    }
    Ok(())
}

async fn show(store: Arc<SqliteRunStore>, run_id: String) -> Result<()> {
    let record = read_record(&store, &run_id).await?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

async fn render_report(
    store: Arc<SqliteRunStore>,
    run_id: String,
    html: bool,
    out: Option<std::path::PathBuf>,
) -> Result<()> {
    let record = read_record(&store, &run_id).await?;

    let md = report::build_markdown_report(&record);
    let rendered = if html {
        report::markdown_to_basic_html(&md)
    } else {
        md
    };

    match out {
        Some(path) => {
            std::fs::write(&path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Report written to {}", path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

async fn read_record(
    store: &SqliteRunStore,
    run_id: &str,
) -> Result<relay_domain::RunRecord> {
    let run_id = RunId::new(run_id);
    match store.read(&run_id).await? {
        Some(record) => Ok(record),
        None => bail!("Run not found: {run_id}"),
    }
}

fn parse_context(raw: Option<&str>) -> Result<Option<Context>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let value: serde_json::Value =
        serde_json::from_str(raw).context("context is not valid JSON")?;
    match value {
        serde_json::Value::Object(map) => Ok(Some(map)),
        _ => bail!("context must be a JSON object"),
    }
}

fn print_outcome(result: &RunReport) {
    println!("Run ID: {}", result.run_id);
    println!("Status: {}", result.outcome.status());
    println!();
    println!("{}", result.outcome.final_answer());

    if let RunOutcome::NeedsInput { questions, .. } = &result.outcome {
        println!();
        for question in questions {
            println!("  - {question}");
        }
        println!();
        println!(
            "Answer with: workflow-relay continue {} --context '{{\"field\": \"value\"}}'",
            result.run_id
        );
    }
}

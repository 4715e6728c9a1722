//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for workflow-relay
#[derive(Parser, Debug)]
#[command(name = "workflow-relay")]
#[command(author, version, about = "Plan-and-execute workflow automation agent")]
#[command(long_about = r#"
workflow-relay asks a local language model to plan a workflow for a
natural-language goal, then executes the plan with a fixed set of
built-in tools (summarize text, draft email, create tasks, schedule
reminder).

A run that is missing required details pauses with clarifying questions
instead of failing. Answer them by resuming the run with `continue` and
a context patch.

Configuration files are loaded from (in priority order):
1. RELAY_* environment variables
2. --config <path>     Explicit config file
3. ./relay.toml        Project-level config
4. ~/.config/workflow-relay/config.toml   Global config

Example:
  workflow-relay run "Summarize my notes and email the team" \
      --context '{"text": "meeting notes ..."}'
  workflow-relay continue 3f2a0c1e --context '{"to": "team@company.com"}'
  workflow-relay report 3f2a0c1e --html --out report.html
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Plan and execute a workflow for a goal
    Run {
        /// The natural-language goal
        goal: String,

        /// Context JSON object with side data for the tools
        #[arg(long, value_name = "JSON")]
        context: Option<String>,
    },

    /// Resume a paused run with additional context
    Continue {
        /// Id of the paused run
        run_id: String,

        /// Context patch JSON object (patch keys win over stored keys)
        #[arg(long, value_name = "JSON")]
        context: Option<String>,
    },

    /// List recent runs
    List {
        /// Maximum number of runs to show
        #[arg(long, default_value_t = 50)]
        limit: usize,
    },

    /// Print the stored record of a run as JSON
    Show {
        run_id: String,
    },

    /// Render a run's audit report
    Report {
        run_id: String,

        /// Render HTML instead of Markdown
        #[arg(long)]
        html: bool,

        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "PATH")]
        out: Option<PathBuf>,
    },
}

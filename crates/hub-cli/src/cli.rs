//! CLI argument definitions for `course-hub`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use hub_model::Role;

#[derive(Parser)]
#[command(
    name = "course-hub",
    version,
    about = "Course hub navigation core - inspect screens and replay sessions",
    long_about = "Inspect the course hub's screen table and access rules.\n\n\
                  `replay` runs a scripted session against an in-memory identity \
                  source and prints the navigation state after every step."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Hub settings file (default: platform config dir).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Override the bootstrap session-fetch timeout.
    #[arg(long = "timeout-ms", value_name = "MS", global = true)]
    pub timeout_ms: Option<u64>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List every screen with its namespace and title.
    Screens,

    /// Show what would be mounted for a path.
    Resolve(ResolveArgs),

    /// Replay a scripted session.
    Replay(ReplayArgs),

    /// Show the effective hub settings, optionally writing them out.
    Config(ConfigArgs),
}

#[derive(Parser)]
pub struct ResolveArgs {
    /// Screen path, e.g. `teacher-grading` or `/student-lab`.
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Role of the signed-in user.
    #[arg(long = "role", value_enum, default_value = "none")]
    pub role: RoleArg,

    /// Resolve for a visitor who is not signed in (ignores --role).
    #[arg(long = "anonymous")]
    pub anonymous: bool,
}

#[derive(Parser)]
pub struct ReplayArgs {
    /// TOML replay script.
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Parser)]
pub struct ConfigArgs {
    /// Write the effective settings to `--config` (or the default location).
    #[arg(long = "save")]
    pub save: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum RoleArg {
    Teacher,
    Student,
    None,
}

impl From<RoleArg> for Role {
    fn from(value: RoleArg) -> Self {
        match value {
            RoleArg::Teacher => Role::Teacher,
            RoleArg::Student => Role::Student,
            RoleArg::None => Role::None,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

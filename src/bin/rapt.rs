// src/bin/rapt.rs

//! Driver program _rapt_ drives the [_raptlib_].
//!
//! Processes user-passed command-line arguments, loads layered YAML
//! settings for the requested environment, installs the logger (console
//! plus rotating file with retention housekeeping), then dispatches to the
//! requested run mode:
//!
//! * `start`: the long-running app daemon with graceful shutdown
//! * `batch`: the one-shot batch job with Telegram notifications
//! * `api`: the sample HTTP API server
//!
//! `rapt.rs` should be the only thread that prints directly to STDERR
//! outside the logger.
//!
//! [_raptlib_]: raptlib

use std::path::PathBuf;
use std::process::ExitCode;

use ::clap::{Parser, Subcommand};
use ::const_format::concatcp;
use ::raptlib::cfg::config::{load_config, Settings};
use ::raptlib::common::FPath;
use ::raptlib::debug::printers::e_err;
use ::raptlib::logging::logger::setup_logging;
use ::raptlib::runner::api::run_api;
use ::raptlib::runner::app::run_app;
use ::raptlib::runner::batch::run_batch;
use ::raptlib::runner::shutdown::{set_signal_handler, GracefulShutdown};
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};
use ::si_trace_print::stack::stack_offset_set;

const CLI_HELP_AFTER: &str = "\
Configuration is read from CONFIG_DIR/default.yaml with CONFIG_DIR/ENV.yaml
merged over it. Environment variables TELEGRAM_BOT_TOKEN and
TELEGRAM_CHAT_ID override the corresponding telegram settings.

Example invocations:

    rapt start --env dev
    rapt batch --env prod --verbose
    rapt api --port 8080
";

#[derive(Parser, Debug)]
#[clap(
    about = env!("CARGO_PKG_DESCRIPTION"),
    author = env!("CARGO_PKG_AUTHORS"),
    name = "rapt",
    // write expanded information for the `--version` output
    version = concatcp!(
        "(Rust App Project Template)\n",
        "Version: ",
        env!("CARGO_PKG_VERSION_MAJOR"), ".",
        env!("CARGO_PKG_VERSION_MINOR"), ".",
        env!("CARGO_PKG_VERSION_PATCH"), "\n",
        "MSRV: ", env!("CARGO_PKG_RUST_VERSION"), "\n",
        "License: ", env!("CARGO_PKG_LICENSE"), "\n",
        "Repository: ", env!("CARGO_PKG_REPOSITORY"), "\n",
        "Author: ", env!("CARGO_PKG_AUTHORS"), "\n",
    ),
    after_help = CLI_HELP_AFTER,
    verbatim_doc_comment,
)]
#[allow(non_camel_case_types)]
struct CLI_Args {
    #[clap(subcommand)]
    command: CLI_Command,

    /// Environment name; selects the ENV.yaml overlay file.
    #[clap(
        short = 'e',
        long,
        global = true,
        default_value = "dev",
    )]
    env: String,

    /// Configuration directory holding default.yaml and per-environment
    /// overlay files.
    #[clap(
        short = 'c',
        long,
        global = true,
        verbatim_doc_comment,
        default_value = "config",
    )]
    config_dir: PathBuf,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR).
    /// Overrides the configured logging.level.
    #[clap(
        short = 'l',
        long,
        global = true,
        verbatim_doc_comment,
    )]
    log_level: Option<String>,

    /// Shorthand for --log-level DEBUG.
    #[clap(
        long,
        global = true,
    )]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
#[allow(non_camel_case_types)]
enum CLI_Command {
    /// Start app mode (long-running daemon).
    Start,
    /// Run batch mode (one-shot job).
    Batch,
    /// Serve the sample HTTP API.
    Api {
        /// Bind host; overrides the configured api.host.
        #[clap(long)]
        host: Option<String>,
        /// Bind port; overrides the configured api.port.
        #[clap(long)]
        port: Option<u16>,
    },
}

/// Derive the active log file path for the run mode; batch runs log
/// separately from the daemon so their rotation histories do not mix.
fn log_file_for(
    settings: &Settings,
    command: &CLI_Command,
) -> FPath {
    match command {
        CLI_Command::Batch => format!("logs/{}_batch.log", settings.app.name),
        _ => format!("logs/{}.log", settings.app.name),
    }
}

fn run(args: CLI_Args) -> anyhow::Result<()> {
    defn!("({:?})", args);
    let settings = load_config(&args.env, &args.config_dir)?;

    let level_override: Option<String> = if args.verbose {
        Some(String::from("DEBUG"))
    } else {
        args.log_level.clone()
    };
    let log_file = log_file_for(&settings, &args.command);
    setup_logging(&settings.logging, Some(&log_file), level_override.as_deref())?;

    log::info!("Environment: {}", args.env);
    log::info!("Debug mode: {}", settings.app.debug);

    match args.command {
        CLI_Command::Start => {
            log::info!("Starting {} in app mode", settings.app.name);
            let mut shutdown = GracefulShutdown::new();
            set_signal_handler(shutdown.handle())?;
            run_app(&settings, &mut shutdown)?;
        }
        CLI_Command::Batch => {
            log::info!("Starting {} in batch mode", settings.app.name);
            run_batch(&settings)?;
        }
        CLI_Command::Api { host, port } => {
            log::info!("Starting {} in api mode", settings.app.name);
            let shutdown = GracefulShutdown::new();
            set_signal_handler(shutdown.handle())?;
            let host = host.unwrap_or_else(|| settings.api.host.clone());
            let port = port.unwrap_or(settings.api.port);
            run_api(&settings, &shutdown, &host, port)?;
        }
    }
    defx!();

    Ok(())
}

pub fn main() -> ExitCode {
    if cfg!(debug_assertions) {
        stack_offset_set(Some(0));
    }
    defn!();
    let args = CLI_Args::parse();

    let exitcode: ExitCode = match run(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            e_err!("{}", err);
            ExitCode::FAILURE
        }
    };
    defx!("exitcode {:?}", exitcode);

    exitcode
}

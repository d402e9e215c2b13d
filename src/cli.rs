//! CLI definition and dispatch.

use clap::{Args, Parser, Subcommand};
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::http_backtest_adapter::HttpBacktestAdapter;
use crate::adapters::terminal_view::TerminalView;
use crate::domain::config_validation::validate_client_config;
use crate::domain::controller::{FormController, SubmitOutcome};
use crate::domain::csv_check::{inspect_csv, CsvSummary};
use crate::domain::error::DeskError;
use crate::domain::notification::DEFAULT_NOTIFICATION_TTL;
use crate::domain::params::{ParamField, ParamInputs};
use crate::domain::result::BacktestResult;
use crate::domain::upload::UploadSelection;
use crate::domain::validation::{validate_submission, Submission};
use crate::ports::config_port::ConfigPort;

/// Log filter used when `RUST_LOG` is unset. User-facing failures are
/// reported by the view, so they are logged below this level.
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Parser, Debug)]
#[command(name = "backtest-desk", about = "Submit strategy backtests to a remote service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Strategy parameter overrides. Values are passed through as typed, so an
/// empty or malformed value is reported by validation.
#[derive(Args, Debug, Default, Clone)]
pub struct ParamArgs {
    #[arg(long)]
    pub ma_period: Option<String>,
    #[arg(long)]
    pub rsi_period: Option<String>,
    #[arg(long)]
    pub rsi_overbought: Option<String>,
    #[arg(long)]
    pub rsi_oversold: Option<String>,
    #[arg(long)]
    pub macd_fast: Option<String>,
    #[arg(long)]
    pub macd_slow: Option<String>,
    #[arg(long)]
    pub macd_signal: Option<String>,
}

impl ParamArgs {
    pub fn get(&self, field: ParamField) -> Option<&str> {
        let value = match field {
            ParamField::MaPeriod => &self.ma_period,
            ParamField::RsiPeriod => &self.rsi_period,
            ParamField::RsiOverbought => &self.rsi_overbought,
            ParamField::RsiOversold => &self.rsi_oversold,
            ParamField::MacdFast => &self.macd_fast,
            ParamField::MacdSlow => &self.macd_slow,
            ParamField::MacdSignal => &self.macd_signal,
        };
        value.as_deref()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate the form and submit a backtest
    Run {
        #[arg(short, long)]
        file: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        endpoint: Option<String>,
        #[arg(long)]
        no_color: bool,
        #[command(flatten)]
        params: ParamArgs,
    },
    /// Validate the form without submitting
    Validate {
        #[arg(short, long)]
        file: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[command(flatten)]
        params: ParamArgs,
    },
    /// Check that a CSV file has the columns the service needs
    Inspect {
        #[arg(short, long)]
        file: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Run {
            file,
            config,
            endpoint,
            no_color,
            params,
        } => match execute_run(&file, config.as_deref(), endpoint.as_deref(), no_color, &params) {
            Ok(_) => ExitCode::SUCCESS,
            // The view has already shown these as notifications.
            Err(e @ (DeskError::Validation(_) | DeskError::Submission(_))) => (&e).into(),
            Err(e) => report(e),
        },
        Command::Validate {
            file,
            config,
            params,
        } => match execute_validate(&file, config.as_deref(), &params) {
            Ok(_) => ExitCode::SUCCESS,
            Err(e) => report(e),
        },
        Command::Inspect { file } => match execute_inspect(&file) {
            Ok(_) => ExitCode::SUCCESS,
            Err(e) => report(e),
        },
    }
}

fn report(err: DeskError) -> ExitCode {
    eprintln!("error: {err}");
    ExitCode::from(&err)
}

/// Load and validate a config file; without one, every value takes its default.
pub fn load_config(path: Option<&Path>) -> Result<FileConfigAdapter, DeskError> {
    let adapter = match path {
        Some(p) => {
            eprintln!("Loading config from {}", p.display());
            FileConfigAdapter::from_file(p)?
        }
        None => FileConfigAdapter::from_string("")?,
    };
    validate_client_config(&adapter)?;
    Ok(adapter)
}

/// Built-in defaults, then `[defaults]` from config, then command-line flags.
pub fn build_param_inputs(config: &dyn ConfigPort, args: &ParamArgs) -> ParamInputs {
    let mut inputs = ParamInputs::default();
    for field in ParamField::ALL {
        if let Some(text) = config.get_text("defaults", field.wire_name()) {
            inputs.set(field, text);
        }
        if let Some(text) = args.get(field) {
            inputs.set(field, text);
        }
    }
    inputs
}

pub fn notification_ttl(config: &dyn ConfigPort) -> Duration {
    let secs = config.get_int("ui", "notification_secs", DEFAULT_NOTIFICATION_TTL.as_secs() as i64);
    Duration::from_secs(secs.max(1) as u64)
}

pub fn execute_run(
    file: &Path,
    config_path: Option<&Path>,
    endpoint: Option<&str>,
    no_color: bool,
    args: &ParamArgs,
) -> Result<BacktestResult, DeskError> {
    let config = load_config(config_path)?;
    let selection = UploadSelection::from_path(file)?;
    let inputs = build_param_inputs(&config, args);
    let port = HttpBacktestAdapter::from_config(&config, endpoint)?;

    let color = !no_color && config.get_bool("ui", "color", true) && io::stdout().is_terminal();
    let mut view = TerminalView::new(io::stdout(), color);
    if !io::stderr().is_terminal() {
        view = view.without_spinner();
    }

    let mut controller = FormController::new(port, view, inputs, notification_ttl(&config));
    controller.select_file(selection);

    eprintln!("Submitting {} to {}", file.display(), controller.port().endpoint());
    let runtime = tokio::runtime::Runtime::new()?;
    match runtime.block_on(controller.submit()) {
        SubmitOutcome::Completed(result) => Ok(result),
        SubmitOutcome::Invalid(e) => Err(e.into()),
        SubmitOutcome::Failed(e) => Err(e.into()),
    }
}

pub fn execute_validate(
    file: &Path,
    config_path: Option<&Path>,
    args: &ParamArgs,
) -> Result<Submission, DeskError> {
    let config = load_config(config_path)?;
    let selection = UploadSelection::from_path(file)?;
    let inputs = build_param_inputs(&config, args);

    let submission = validate_submission(Some(&selection), &inputs)?;

    eprintln!("File: {} ({} bytes)", submission.file.name(), submission.file.len());
    eprintln!("Parameters:");
    for field in ParamField::ALL {
        eprintln!("  {:<16}{}", field.label(), submission.params.get(field));
    }
    eprintln!("\nForm is valid.");
    Ok(submission)
}

pub fn execute_inspect(file: &Path) -> Result<CsvSummary, DeskError> {
    let selection = UploadSelection::from_path(file)?;
    let summary = inspect_csv(selection.content()).map_err(|e| DeskError::Csv {
        file: file.display().to_string(),
        reason: e.to_string(),
    })?;

    eprintln!("Columns: {}", summary.columns.join(", "));
    eprintln!("Rows:    {}", summary.rows);

    if !summary.is_complete() {
        return Err(DeskError::Csv {
            file: file.display().to_string(),
            reason: format!("missing columns: {}", summary.missing.join(", ")),
        });
    }
    eprintln!("\nAll required columns present.");
    Ok(summary)
}

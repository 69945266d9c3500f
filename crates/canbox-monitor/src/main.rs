//! canbox-monitor - head unit <-> CAN box protocol monitor
//!
//! Reads the serial link between an aftermarket head unit and its CAN box
//! adapter (or a capture of it) and prints every frame it decodes.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod config;
mod error;
mod session;
mod sink;
mod source;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::atomic::Ordering;

use anyhow::{Context, Result};
use canbox_protocol::{AcSettingCode, DataRequestCode, FunctionId, ids};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{MonitorConfig, OutputFormat, Overrides};
use crate::error::MonitorError;
use crate::session::{Session, SessionStats};
use crate::sink::{FrameSink, HumanSink, JsonSink, hex_compact, hex_spaced};
use crate::source::{ByteSource, ReplaySource, SerialSource, parse_hex_bytes};

#[derive(Parser)]
#[command(name = "canbox-monitor")]
#[command(about = "Decode the serial protocol between a head unit and its CAN box")]
#[command(version)]
#[command(long_about = "
canbox-monitor decodes frames exchanged between an aftermarket head unit and
its CAN box adapter: parking radar, doors, climate, TPMS, trip computer and
steering angle, plus the head unit's own requests.

Records go to stdout; logs go to stderr. Use --json for one JSON object per
frame.
")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true, env = "CANBOX_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output in JSON format for machine parsing
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit consecutive frames of the same function instead of dropping them
    #[arg(long, global = true)]
    no_suppress: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a live serial port until interrupted
    Monitor {
        /// Serial device, e.g. /dev/ttyUSB0 or COM3
        #[arg(long, env = "CANBOX_PORT")]
        port: Option<String>,

        /// Baud rate
        #[arg(long, env = "CANBOX_BAUD")]
        baud: Option<u32>,

        /// Read timeout in milliseconds
        #[arg(long, value_name = "MS")]
        timeout_ms: Option<u64>,
    },

    /// Decode a capture file
    Replay {
        /// Capture file: hex text (default) or raw bytes with --binary
        file: PathBuf,

        /// Treat the file as raw bytes
        #[arg(long)]
        binary: bool,
    },

    /// Decode hex bytes given on the command line
    Decode {
        /// Bytes such as `2E 1D 04 01 02 03 04 D4`
        #[arg(required = true, num_args = 1..)]
        bytes: Vec<String>,
    },

    /// Print the frame the head unit sends for a request code
    #[command(subcommand)]
    Request(RequestCommands),

    /// List the known function ids
    Functions,
}

#[derive(Subcommand)]
enum RequestCommands {
    /// Data request (function 0x90); lists codes when CODE is omitted
    Data { code: Option<String> },
    /// A/C setting (function 0x82); lists codes when CODE is omitted
    Ac { code: Option<String> },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("canbox_monitor={log_level},canbox_protocol={log_level}").into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match execute_command(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                sink::print_error_json(&e);
            } else {
                sink::print_error_human(&e);
            }
            let code = e
                .downcast_ref::<MonitorError>()
                .map_or(1, MonitorError::exit_code);
            ExitCode::from(code)
        }
    }
}

fn overrides(cli: &Cli) -> Overrides {
    let mut overrides = Overrides {
        no_suppress: cli.no_suppress,
        json: cli.json,
        ..Overrides::default()
    };
    if let Commands::Monitor {
        port,
        baud,
        timeout_ms,
    } = &cli.command
    {
        overrides.port = port.clone();
        overrides.baud_rate = *baud;
        overrides.read_timeout_ms = *timeout_ms;
    }
    overrides
}

fn execute_command(cli: &Cli) -> Result<()> {
    let config = MonitorConfig::resolve(cli.config.as_deref(), &overrides(cli))
        .context("failed to load configuration")?;

    match &cli.command {
        Commands::Monitor { .. } => run_monitor(&config),
        Commands::Replay { file, binary } => run_replay(&config, file, *binary),
        Commands::Decode { bytes } => run_decode(&config, bytes),
        Commands::Request(cmd) => run_request(cmd, config.output),
        Commands::Functions => {
            print_functions(config.output);
            Ok(())
        }
    }
}

// ── Modes ────────────────────────────────────────────────────────────────────

fn make_sink(format: OutputFormat) -> Box<dyn FrameSink> {
    match format {
        OutputFormat::Human => Box::new(HumanSink::new(std::io::stdout())),
        OutputFormat::Json => Box::new(JsonSink::new(std::io::stdout())),
    }
}

/// Run one session. With `summary` set the counters are printed even when
/// the source fails part-way.
fn run_session<S: ByteSource>(
    config: &MonitorConfig,
    source: S,
    interruptible: bool,
    summary: bool,
) -> Result<()> {
    let mut session = Session::new(source, make_sink(config.output), config.suppress_repeats);
    if interruptible {
        let stop = session.stop_handle();
        ctrlc::set_handler(move || stop.store(true, Ordering::Relaxed))
            .context("failed to install Ctrl-C handler")?;
    }
    let result = session.run();
    if summary {
        print_summary(session.stats(), config.output);
    }
    result?;
    Ok(())
}

fn run_monitor(config: &MonitorConfig) -> Result<()> {
    let port = config.require_port()?;
    let source = SerialSource::open(port, config.baud_rate, config.read_timeout())?;
    eprintln!(
        "Monitoring {} at {} baud (Ctrl-C to stop)",
        source.name(),
        config.baud_rate
    );
    run_session(config, source, true, true)
}

fn run_replay(config: &MonitorConfig, file: &Path, binary: bool) -> Result<()> {
    let source = ReplaySource::from_file(file, binary)
        .with_context(|| format!("failed to read capture '{}'", file.display()))?;
    if source.is_empty() {
        warn!(path = %file.display(), "capture contains no bytes");
    } else {
        info!(path = %file.display(), bytes = source.len(), "replaying capture");
    }
    run_session(config, source, false, true)
}

fn run_decode(config: &MonitorConfig, tokens: &[String]) -> Result<()> {
    let bytes = parse_hex_bytes(&tokens.join(" ")).map_err(MonitorError::InvalidInput)?;
    run_session(config, ReplaySource::from_bytes(bytes), false, false)
}

fn print_summary(stats: &SessionStats, format: OutputFormat) {
    match format {
        OutputFormat::Json => eprintln!("{}", json!({ "summary": stats })),
        OutputFormat::Human => eprintln!(
            "{} {} bytes, {} frames: {} decoded, {} undecoded, {} unknown, {} short, {} malformed, {} suppressed, {} checksum mismatches",
            "Summary:".bold(),
            stats.bytes,
            stats.frames,
            stats.decoded,
            stats.undecoded,
            stats.unknown_function,
            stats.short_payload,
            stats.malformed,
            stats.suppressed,
            stats.checksum_mismatch
        ),
    }
}

// ── Requests ─────────────────────────────────────────────────────────────────

/// Parse a request code as decimal or `0x`-prefixed hex.
fn parse_code(raw: &str) -> Result<u8, MonitorError> {
    let raw = raw.trim();
    let parsed = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => raw.parse::<u8>(),
    };
    parsed.map_err(|e| MonitorError::InvalidInput(format!("invalid code '{raw}': {e}")))
}

struct RequestLine {
    function_id: u8,
    code: u8,
    label: &'static str,
    frame: Vec<u8>,
}

fn data_line(code: DataRequestCode) -> RequestLine {
    RequestLine {
        function_id: ids::DATA_REQUEST,
        code: code.as_u8(),
        label: code.label(),
        frame: code.request_frame(),
    }
}

fn ac_line(code: AcSettingCode) -> RequestLine {
    RequestLine {
        function_id: ids::AC_SETTINGS,
        code: code.as_u8(),
        label: code.label(),
        frame: code.request_frame(),
    }
}

fn run_request(cmd: &RequestCommands, format: OutputFormat) -> Result<()> {
    let lines: Vec<RequestLine> = match cmd {
        RequestCommands::Data { code: Some(raw) } => {
            let code = parse_code(raw)?;
            let code = DataRequestCode::from_byte(code).ok_or_else(|| {
                MonitorError::InvalidInput(format!("unknown data request code {code}"))
            })?;
            vec![data_line(code)]
        }
        RequestCommands::Data { code: None } => {
            DataRequestCode::ALL.into_iter().map(data_line).collect()
        }
        RequestCommands::Ac { code: Some(raw) } => {
            let code = parse_code(raw)?;
            let code = AcSettingCode::from_byte(code).ok_or_else(|| {
                MonitorError::InvalidInput(format!("unknown A/C setting code {code}"))
            })?;
            vec![ac_line(code)]
        }
        RequestCommands::Ac { code: None } => AcSettingCode::ALL.into_iter().map(ac_line).collect(),
    };

    for line in &lines {
        match format {
            OutputFormat::Json => println!(
                "{}",
                json!({
                    "function_id": line.function_id,
                    "code": line.code,
                    "label": line.label,
                    "frame": hex_compact(&line.frame),
                })
            ),
            OutputFormat::Human => println!(
                "{:>3} {:<24} {}",
                line.code,
                line.label,
                hex_spaced(&line.frame).green()
            ),
        }
    }
    Ok(())
}

fn print_functions(format: OutputFormat) {
    for function in FunctionId::ALL {
        let direction = if function.is_head_unit_request() {
            "head unit -> box"
        } else {
            "box -> head unit"
        };
        match format {
            OutputFormat::Json => println!(
                "{}",
                json!({
                    "function_id": function.as_u8(),
                    "function": function.name(),
                    "direction": direction,
                    "decoded": function.has_decoder(),
                })
            ),
            OutputFormat::Human => {
                let name = if function.has_decoder() {
                    function.name().bold()
                } else {
                    function.name().dimmed()
                };
                println!(
                    "0x{:02X} {:>3}  {:<28} {}",
                    function.as_u8(),
                    function.as_u8(),
                    name,
                    direction
                );
            }
        }
    }
}

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use bytemask_core::{
    DEFAULT_CHUNK_ROWS, DecodeOptions, Endianness, JSONL_EXTENSIONS, Report, RowErrorPolicy,
    RowRecord,
};
use clap::{ArgAction, Parser, Subcommand};
use glob::glob;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "bytemask")]
#[command(version)]
#[command(long_version = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("BYTEMASK_BUILD_COMMIT"),
    " ",
    env!("BYTEMASK_BUILD_DATE"),
    ")"
))]
#[command(
    about = "Extract named integer fields from binary payloads using mask strings.",
    long_about = None,
    after_help = "Examples:\n  bytemask rows decode rows.jsonl -o report.json\n  bytemask mask parse 'id:0-1, len:2-3'\n  bytemask mask apply 'id:0-1' 0102 --endian little"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operations on JSON Lines row files.
    Rows {
        #[command(subcommand)]
        command: RowsCommands,
    },
    /// Inspect and try out mask strings.
    Mask {
        #[command(subcommand)]
        command: MaskCommands,
    },
}

#[derive(Subcommand, Debug)]
enum RowsCommands {
    /// Decode every row of a JSON Lines file into a JSON report.
    #[command(alias = "extract")]
    #[command(
        after_help = "Each input line is {\"mask\": ..., \"payload\": <hex>, \"endian\": \"big\"|\"little\"}.\n\nExamples:\n  bytemask rows decode rows.jsonl -o report.json\n  bytemask rows extract rows.jsonl --stdout --pretty --endian little"
    )]
    Decode {
        /// Path to a .jsonl or .ndjson file
        input: PathBuf,

        /// Output report path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        report: Option<PathBuf>,

        /// Write JSON report to stdout
        #[arg(long, conflicts_with = "report")]
        stdout: bool,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Byte order for rows without an endianness value
        #[arg(long, default_value = "big")]
        endian: Endianness,

        /// Rows per unit of work
        #[arg(long, default_value_t = DEFAULT_CHUNK_ROWS, value_parser = parse_positive)]
        chunk_rows: usize,

        /// Maximum decoded entries per unit of work
        #[arg(long, value_parser = parse_positive)]
        max_entries: Option<usize>,

        /// Record failing rows in the report instead of aborting
        #[arg(long)]
        skip_invalid: bool,

        /// Exit with a non-zero code if any row failed
        #[arg(long)]
        strict: bool,

        /// List failing rows after decoding
        #[arg(long)]
        list_errors: bool,
    },
}

#[derive(Subcommand, Debug)]
enum MaskCommands {
    /// Parse a mask string and print its fields as JSON.
    Parse {
        /// Mask string, e.g. 'id:0-1, len:2-3'
        mask: String,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Decode one hex payload with a mask string.
    Apply {
        /// Mask string, e.g. 'id:0-1, len:2-3'
        mask: String,

        /// Payload as hex, e.g. 0102ff
        payload: String,

        /// Byte order used to assemble each field
        #[arg(long, default_value = "big")]
        endian: Endianness,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    let quiet = cli.quiet;

    let result = match cli.command {
        Commands::Rows { command } => match command {
            RowsCommands::Decode {
                input,
                report,
                stdout,
                pretty,
                compact,
                endian,
                chunk_rows,
                max_entries,
                skip_invalid,
                strict,
                list_errors,
            } => {
                let options = DecodeOptions {
                    default_endianness: endian,
                    chunk_rows,
                    max_entries,
                    on_row_error: if skip_invalid {
                        RowErrorPolicy::Record
                    } else {
                        RowErrorPolicy::Abort
                    },
                };
                let output = OutputArgs {
                    report,
                    stdout,
                    pretty,
                    compact,
                    quiet,
                };
                cmd_rows_decode(input, &options, output, strict, list_errors)
            }
        },
        Commands::Mask { command } => match command {
            MaskCommands::Parse { mask, pretty } => cmd_mask_parse(&mask, pretty),
            MaskCommands::Apply {
                mask,
                payload,
                endian,
                pretty,
            } => cmd_mask_apply(mask, &payload, endian, pretty),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::ERROR,
        (false, 0) => Level::WARN,
        (false, 1) => Level::INFO,
        (false, 2) => Level::DEBUG,
        (false, _) => Level::TRACE,
    };
    // Ignore a subscriber that was already installed.
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .try_init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{:#}", err), None)
    }
}

struct OutputArgs {
    report: Option<PathBuf>,
    stdout: bool,
    pretty: bool,
    compact: bool,
    quiet: bool,
}

fn cmd_rows_decode(
    input: PathBuf,
    options: &DecodeOptions,
    output: OutputArgs,
    strict: bool,
    list_errors: bool,
) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&input)?;
    validate_input_file(&resolved_input)?;
    let input_abs = fs::canonicalize(&resolved_input)
        .with_context(|| format!("Failed to resolve input path: {}", resolved_input.display()))?;
    let report = if output.stdout {
        None
    } else {
        Some(output.report.ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            )
        })?)
    };

    if let Some(report_path) = report.as_ref() {
        let report_abs = report_path
            .parent()
            .map(|parent| {
                if parent.as_os_str().is_empty() {
                    fs::canonicalize(".")
                } else {
                    fs::canonicalize(parent)
                }
            })
            .transpose()
            .with_context(|| format!("Failed to resolve output path: {}", report_path.display()))?;
        if let Some(report_dir) = report_abs {
            let report_target = report_dir.join(
                report_path
                    .file_name()
                    .ok_or_else(|| anyhow::anyhow!("Invalid report path"))?,
            );
            if report_target == input_abs {
                return Err(CliError::new(
                    format!(
                        "report path must differ from input: {}",
                        report_path.display()
                    ),
                    Some("choose a different output path".to_string()),
                ));
            }
        }
    }

    tracing::info!(
        input = %resolved_input.display(),
        chunk_rows = options.chunk_rows,
        "decoding rows"
    );
    let mut rep = bytemask_core::decode_jsonl_file(&resolved_input, options).map_err(|err| {
        let hint = match &err {
            bytemask_core::DecodeError::Row { .. } => {
                Some("fix the mask or endianness of that row, or pass --skip-invalid".to_string())
            }
            bytemask_core::DecodeError::Capacity(_) => {
                Some("raise --max-entries or lower --chunk-rows".to_string())
            }
            _ => None,
        };
        CliError::new(format!("row decoding failed: {}", err), hint)
    })?;
    rep.generated_at = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .context("Failed to format report timestamp")?;
    let json = serialize_json(&rep, output.pretty, output.compact)?;

    if output.stdout {
        print!("{}", json);
        return finish(&rep, output.quiet, strict, list_errors);
    }

    let report = report.ok_or_else(|| CliError::new("missing output path", None))?;
    if let Some(parent) = report.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }

    fs::write(&report, json)
        .with_context(|| format!("Failed to write report: {}", report.display()))?;

    if !output.quiet {
        eprintln!(
            "OK: {} rows, {} entries -> {}",
            rep.summary.rows_total,
            rep.summary.entries_total,
            report.display()
        );
    }
    finish(&rep, output.quiet, strict, list_errors)
}

fn finish(rep: &Report, quiet: bool, strict: bool, list_errors: bool) -> Result<(), CliError> {
    if list_errors && !quiet {
        print_row_errors(rep);
    }
    if strict && rep.summary.rows_failed > 0 {
        return Err(CliError::new(
            format!("{} rows failed to decode", rep.summary.rows_failed),
            Some("use --list-errors to inspect".to_string()),
        ));
    }
    Ok(())
}

fn cmd_mask_parse(mask: &str, pretty: bool) -> Result<(), CliError> {
    let fields = bytemask_core::parse_mask(mask).map_err(|err| {
        CliError::new(
            err.to_string(),
            Some("expected comma-separated 'name:start-end' tokens".to_string()),
        )
    })?;
    println!("{}", serialize_json(&fields, pretty, false)?);
    Ok(())
}

fn cmd_mask_apply(
    mask: String,
    payload: &str,
    endian: Endianness,
    pretty: bool,
) -> Result<(), CliError> {
    let payload = hex::decode(payload.trim()).map_err(|err| {
        CliError::new(
            format!("invalid payload hex '{}': {}", payload, err),
            Some("pass the payload as an even number of hex digits".to_string()),
        )
    })?;
    let row = RowRecord::new(mask, payload);
    let fields = bytemask_core::decode_row(&row, endian)
        .map_err(|err| {
            CliError::new(
                err.to_string(),
                Some("expected comma-separated 'name:start-end' tokens".to_string()),
            )
        })?
        .unwrap_or_default();
    println!("{}", serialize_json(&fields, pretty, false)?);
    Ok(())
}

fn serialize_json<T: serde::Serialize>(
    value: &T,
    pretty: bool,
    compact: bool,
) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(value)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(value)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn print_row_errors(rep: &Report) {
    eprintln!("Row errors:");
    for row in rep.rows.iter() {
        if let Some(error) = row.error.as_ref() {
            eprintln!("  row {}: {}", row.row, error);
        }
    }
}

fn parse_positive(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(parsed) => Ok(parsed),
        Err(err) => Err(err.to_string()),
    }
}

fn validate_input_file(input: &PathBuf) -> Result<(), CliError> {
    let expected = format!("use a {} file", extension_list());
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some(expected),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some(expected),
        ));
    }
    let ext = input
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if !JSONL_EXTENSIONS.contains(&ext.as_str()) {
        return Err(CliError::new(
            format!("unsupported input format '{}'", input.display()),
            Some(format!("expected a {} file", extension_list())),
        ));
    }
    Ok(())
}

fn extension_list() -> String {
    JSONL_EXTENSIONS
        .iter()
        .map(|ext| format!(".{ext}"))
        .collect::<Vec<_>>()
        .join(" or ")
}

fn resolve_input_path(input: &PathBuf) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.clone());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some(format!(
                "check the path or quote the pattern; expected {}",
                extension_list()
            )),
        ));
    }
    if matches.len() > 1 {
        let hint = "pass a single row file, or run once per file".to_string();
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let more = if matches.len() > 3 { ", ..." } else { "" };
        let message = format!(
            "multiple files match pattern '{}' ({} matches); matches: {}{}",
            pattern,
            matches.len(),
            listed,
            more
        );
        return Err(CliError::new(message, Some(hint)));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}

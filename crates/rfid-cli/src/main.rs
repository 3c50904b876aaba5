use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use glob::glob;
use rfid_core::{
    ColorTableKind, DecodeOptions, LineSource, ParityCheck, PipelineError, ReportFormat,
    ReportWriter, decode_source,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const EXIT_USAGE: u8 = 1;
const EXIT_INPUT: u8 = 2;
const EXIT_OUTPUT: u8 = 3;

const LOG_ENV: &str = "RFID_LOG";

#[derive(Parser, Debug)]
#[command(name = "rfid-decode")]
#[command(version)]
#[command(
    about = "Decode 2-D parity protected RFID tag readings into a color report.",
    long_about = None,
    after_help = "Examples:\n  rfid-decode rfid_data_1.txt\n  rfid-decode tags.txt -o report.out --truncate\n  rfid-decode tags.txt --format json --parity first-pair"
)]
struct Cli {
    /// Input file with one record of 34 integers per line
    input: PathBuf,

    /// Report path (defaults to the input path with a `.out` extension)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value_t = FormatArg::Text)]
    format: FormatArg,

    /// Parity validation extent
    #[arg(long, value_enum, default_value_t = ParityArg::Full)]
    parity: ParityArg,

    /// Identifier to color table
    #[arg(long, value_enum, default_value_t = ColorTableArg::Corrected)]
    color_table: ColorTableArg,

    /// Replace an existing report instead of appending to it
    #[arg(long)]
    truncate: bool,

    /// Suppress non-error output
    #[arg(short, long)]
    quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace); `RFID_LOG` overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ParityArg {
    /// Check every payload row and column
    Full,
    /// Check only row 0 and column 0, like the legacy decoder
    FirstPair,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorTableArg {
    /// 3087 is Purple
    Corrected,
    /// 3087 is Black, like the legacy decoder
    Fallthrough,
}

impl From<FormatArg> for ReportFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Text => ReportFormat::Text,
            FormatArg::Json => ReportFormat::JsonLines,
        }
    }
}

impl From<ParityArg> for ParityCheck {
    fn from(value: ParityArg) -> Self {
        match value {
            ParityArg::Full => ParityCheck::Full,
            ParityArg::FirstPair => ParityCheck::FirstPairOnly,
        }
    }
}

impl From<ColorTableArg> for ColorTableKind {
    fn from(value: ColorTableArg) -> Self {
        match value {
            ColorTableArg::Corrected => ColorTableKind::Corrected,
            ColorTableArg::Fallthrough => ColorTableKind::Fallthrough,
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() { EXIT_USAGE } else { 0 };
            let _ = err.print();
            return ExitCode::from(code);
        }
    };

    init_logging(cli.verbose);

    match cmd_decode(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(err.exit)
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}

#[derive(Debug)]
struct CliError {
    exit: u8,
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(exit: u8, message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            exit,
            message: message.into(),
            hint,
        }
    }

    fn input(err: anyhow::Error) -> Self {
        Self::new(EXIT_INPUT, format!("{err:#}"), None)
    }

    fn output(err: anyhow::Error) -> Self {
        Self::new(EXIT_OUTPUT, format!("{err:#}"), None)
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

fn cmd_decode(cli: Cli) -> Result<(), CliError> {
    let input = resolve_input_path(&cli.input)?;
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| derive_output_path(&input));

    if refers_to_input(&input, &output).map_err(CliError::input)? {
        return Err(CliError::new(
            EXIT_OUTPUT,
            format!("report path must differ from input: {}", output.display()),
            Some("choose a different path with -o/--output".to_string()),
        ));
    }

    let source = LineSource::open(&input).map_err(|err| {
        CliError::new(
            EXIT_INPUT,
            err.to_string(),
            Some("check that the input file exists and is readable".to_string()),
        )
    })?;
    let file = open_report(&output, cli.truncate).map_err(CliError::output)?;

    let options = DecodeOptions {
        parity: cli.parity.into(),
        colors: cli.color_table.into(),
    };
    let mut writer = ReportWriter::new(BufWriter::new(file), cli.format.into());
    let summary = decode_source(source, &options, &mut writer).map_err(|err| match err {
        PipelineError::Source(_) => CliError::new(EXIT_INPUT, err.to_string(), None),
        PipelineError::Sink(_) => CliError::new(EXIT_OUTPUT, err.to_string(), None),
    })?;
    writer
        .finish()
        .with_context(|| format!("failed to write report: {}", output.display()))
        .map_err(CliError::output)?;

    info!(
        records = summary.records,
        valid = summary.valid,
        invalid = summary.invalid,
        malformed = summary.malformed,
        report = %output.display(),
        "decoding finished"
    );
    if !cli.quiet {
        println!("Decoding complete. Written to file '{}'.", output.display());
    }
    Ok(())
}

/// `tags.txt` becomes `tags.out`; a path without extension gains one.
fn derive_output_path(input: &Path) -> PathBuf {
    input.with_extension("out")
}

fn open_report(path: &Path, truncate: bool) -> Result<File> {
    let mut options = OpenOptions::new();
    options.create(true);
    if truncate {
        options.write(true).truncate(true);
    } else {
        options.append(true);
    }
    options
        .open(path)
        .with_context(|| format!("could not open {} for writing", path.display()))
}

fn refers_to_input(input: &Path, output: &Path) -> Result<bool> {
    let input_abs = fs::canonicalize(input)
        .with_context(|| format!("could not open {} for reading", input.display()))?;
    let parent = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    // A missing output directory surfaces when the report is opened.
    let Ok(dir) = fs::canonicalize(parent) else {
        return Ok(false);
    };
    let name = output
        .file_name()
        .ok_or_else(|| anyhow!("invalid report path: {}", output.display()))?;
    Ok(dir.join(name) == input_abs)
}

/// Resolve the positional input to one regular file, expanding a glob
/// pattern when the literal path does not exist.
fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    let path = if input.exists() || !is_glob_pattern(&pattern) {
        input.to_path_buf()
    } else {
        single_match(&pattern)?
    };
    require_input_file(&path)?;
    Ok(path)
}

fn require_input_file(path: &Path) -> Result<(), CliError> {
    let hint = Some("pass a text file with one record per line".to_string());
    if !path.exists() {
        return Err(CliError::new(
            EXIT_INPUT,
            format!("could not open {} for reading: file not found", path.display()),
            hint,
        ));
    }
    if !path.is_file() {
        return Err(CliError::new(
            EXIT_INPUT,
            format!("input is not a file: {}", path.display()),
            hint,
        ));
    }
    Ok(())
}

fn single_match(pattern: &str) -> Result<PathBuf, CliError> {
    let invalid = |detail: String| {
        CliError::new(
            EXIT_INPUT,
            format!("invalid input pattern '{pattern}'"),
            Some(format!("pattern error: {detail}")),
        )
    };
    let mut files = Vec::new();
    for entry in glob(pattern).map_err(|err| invalid(err.msg.to_string()))? {
        let path = entry.map_err(|err| invalid(err.to_string()))?;
        if path.is_file() {
            files.push(path);
        }
    }

    match files.as_slice() {
        [] => Err(CliError::new(
            EXIT_INPUT,
            format!("no files match pattern '{pattern}'"),
            Some("check the path or quote the pattern".to_string()),
        )),
        [only] => Ok(only.clone()),
        [first, second, rest @ ..] => {
            let more = if rest.is_empty() { "" } else { ", ..." };
            Err(CliError::new(
                EXIT_INPUT,
                format!(
                    "multiple files match pattern '{pattern}' ({} matches): {}, {}{more}",
                    files.len(),
                    first.display(),
                    second.display(),
                ),
                Some("pass a single input file, or run once per file".to_string()),
            ))
        }
    }
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}

use std::fs;
use std::path::{Path, PathBuf};

use argschema_core::{DynamicRecord, RecordDescription};
use argschema_parse::{ArgumentParser, ParseError};
use clap::{Args, Parser, Subcommand};
use serde::Deserialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Output format for the populated record.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum CliOutputFormat {
    #[default]
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "argschema")]
#[command(version)]
#[command(about = "Parse arguments, config text and documents against a declarative record schema")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the usage line and help text derived from a schema file.
    Usage(UsageArgs),
    /// Parse command-line tokens given after `--`.
    Parse(ParseArgs),
    /// Parse `key = value` config text from a file or stdin.
    Config(ConfigArgs),
    /// Parse a JSON or YAML document.
    Document(DocumentArgs),
}

#[derive(Debug, Args)]
struct SchemaArgs {
    /// Record description file (.yaml/.yml or .json).
    #[arg(long)]
    schema: PathBuf,
}

#[derive(Debug, Args)]
struct UsageArgs {
    #[command(flatten)]
    schema: SchemaArgs,
    /// Print only the one-line usage summary.
    #[arg(long)]
    short: bool,
}

#[derive(Debug, Args)]
struct ParseArgs {
    #[command(flatten)]
    schema: SchemaArgs,
    /// Drop unknown flags instead of failing.
    #[arg(long)]
    ignore_unknown: bool,
    /// Output format.
    #[arg(long, value_enum, default_value_t)]
    format: CliOutputFormat,
    /// Tokens to parse.
    #[arg(last = true)]
    tokens: Vec<String>,
}

#[derive(Debug, Args)]
struct ConfigArgs {
    #[command(flatten)]
    schema: SchemaArgs,
    /// Config file; stdin when omitted.
    #[arg(long)]
    input: Option<PathBuf>,
    /// Output format.
    #[arg(long, value_enum, default_value_t)]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct DocumentArgs {
    #[command(flatten)]
    schema: SchemaArgs,
    /// Document file (.yaml/.yml or .json).
    #[arg(long)]
    input: PathBuf,
    /// Output format.
    #[arg(long, value_enum, default_value_t)]
    format: CliOutputFormat,
}

/// A record description plus the text shown in help output.
#[derive(Debug, Deserialize)]
struct SchemaFile {
    #[serde(default)]
    prog: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    epilog: Option<String>,
    #[serde(flatten)]
    record: RecordDescription,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Usage(args) => run_usage(args),
        Command::Parse(args) => run_parse(args),
        Command::Config(args) => run_config(args),
        Command::Document(args) => run_document(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_usage(args: UsageArgs) -> Result<(), String> {
    let (parser, _) = load_parser(&args.schema.schema)?;
    if args.short {
        println!("{}", parser.usage());
    } else {
        print!("{}", parser.help_text());
    }
    Ok(())
}

fn run_parse(args: ParseArgs) -> Result<(), String> {
    let (parser, mut record) = load_parser(&args.schema.schema)?;
    let parser = parser.with_ignore_unknown(args.ignore_unknown);
    match parser.parse_args(&mut record, args.tokens.as_slice()) {
        Err(ParseError::HelpRequested) => {
            print!("{}", parser.help_text());
            Ok(())
        }
        Err(err) => Err(format!("{err}\n{}", parser.usage())),
        Ok(()) => print_record(&record, args.format),
    }
}

fn run_config(args: ConfigArgs) -> Result<(), String> {
    let (parser, mut record) = load_parser(&args.schema.schema)?;
    let result = match &args.input {
        Some(path) => {
            let file = fs::File::open(path)
                .map_err(|err| format!("Failed to open '{}': {err}", path.display()))?;
            parser.parse_reader(&mut record, file)
        }
        None => parser.parse_reader(&mut record, std::io::stdin().lock()),
    };
    result.map_err(|err| err.to_string())?;
    print_record(&record, args.format)
}

fn run_document(args: DocumentArgs) -> Result<(), String> {
    let (parser, mut record) = load_parser(&args.schema.schema)?;
    let doc: serde_json::Value = read_structured(&args.input)?;
    parser
        .parse_document(&mut record, &doc)
        .map_err(|err| err.to_string())?;
    print_record(&record, args.format)
}

/// Loads a schema file and builds a parser plus an empty record for it.
fn load_parser(path: &Path) -> Result<(ArgumentParser<DynamicRecord>, DynamicRecord), String> {
    let file: SchemaFile = read_structured(path)?;
    let mut record = DynamicRecord::from_description(&file.record)
        .map_err(|err| format!("Invalid schema '{}': {err}", path.display()))?;

    let prog = file.prog.unwrap_or_else(|| default_prog(path));
    let mut parser = ArgumentParser::from_record(&mut record, prog)
        .map_err(|err| format!("Invalid schema '{}': {err}", path.display()))?;
    if let Some(description) = file.description {
        parser = parser.with_description(description);
    }
    if let Some(epilog) = file.epilog {
        parser = parser.with_epilog(epilog);
    }
    debug!(
        schema = %path.display(),
        fields = parser.schema().field_count(),
        "Loaded schema file"
    );
    Ok((parser, record))
}

fn default_prog(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("prog")
        .to_string()
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml" | "yml")
    )
}

/// Reads a JSON file, or YAML when the extension says so.
fn read_structured<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, String> {
    let text = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read '{}': {err}", path.display()))?;
    if is_yaml(path) {
        serde_yaml::from_str(&text)
            .map_err(|err| format!("Failed to parse YAML '{}': {err}", path.display()))
    } else {
        serde_json::from_str(&text)
            .map_err(|err| format!("Failed to parse JSON '{}': {err}", path.display()))
    }
}

fn render_record(record: &DynamicRecord, format: CliOutputFormat) -> Result<String, String> {
    let value = record.to_json();
    match format {
        CliOutputFormat::Json => serde_json::to_string_pretty(&value)
            .map_err(|err| format!("JSON serialization failed: {err}")),
        CliOutputFormat::Yaml => {
            serde_yaml::to_string(&value).map_err(|err| format!("YAML serialization failed: {err}"))
        }
    }
}

fn print_record(record: &DynamicRecord, format: CliOutputFormat) -> Result<(), String> {
    let rendered = render_record(record, format)?;
    println!("{}", rendered.trim_end());
    Ok(())
}

//! fixedfile CLI: decode, inspect, and validate fixed-width files.

mod job;

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use fixedfile_core::config::{OnError, SourceConfig};
use fixedfile_core::trim::TrimKind;
use fixedfile_io::{FixedFileSource, JsonlWriter};
use tracing_subscriber::EnvFilter;

use job::{apply_job_config, parse_job, JobConfig};

#[derive(Parser)]
#[command(name = "fixedfile")]
#[command(about = "Read fixed-width text files as typed records", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Default)]
struct SourceArgs {
    /// Path to a YAML job file
    #[arg(short, long)]
    job: Option<PathBuf>,

    /// Fixed-width file to read (overrides job/env)
    #[arg(short, long)]
    file: Option<String>,

    /// Width of every field (overrides job/env)
    #[arg(short, long)]
    length: Option<i64>,

    /// Trim kind for fields not in the job's trim table (NONE, BEGIN, END, BOTH)
    #[arg(long)]
    trim: Option<TrimKind>,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode every line and emit JSONL records
    Read {
        #[command(flatten)]
        source: SourceArgs,

        /// Skip lines that fail to decode instead of aborting
        #[arg(long)]
        skip_errors: bool,

        /// Output file (overrides job; stdout when absent)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Infer a schema from the first line and print it as YAML
    Guess {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Check configuration and that the file is readable
    Validate {
        #[command(flatten)]
        source: SourceArgs,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Read {
            source,
            skip_errors,
            output,
        } => read_file(&source, skip_errors, output),
        Commands::Guess { source } => guess_schema(&source),
        Commands::Validate { source } => validate_source(&source),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .init();
}

/// Layer defaults < env < job file < CLI flags.
fn resolve_config(args: &SourceArgs) -> Result<(SourceConfig, JobConfig), Box<dyn std::error::Error>> {
    let mut config = SourceConfig::from_env();
    let job = match &args.job {
        Some(path) => parse_job(&fs::read_to_string(path)?)?,
        None => JobConfig::default(),
    };
    apply_job_config(&mut config, &job);
    apply_cli_overrides(&mut config, args);
    Ok((config, job))
}

fn apply_cli_overrides(cfg: &mut SourceConfig, args: &SourceArgs) {
    if let Some(file) = &args.file {
        cfg.file_path = file.clone();
    }
    if let Some(length) = args.length {
        cfg.has_default_length = true;
        cfg.default_length = length;
    }
    if let Some(trim) = args.trim {
        cfg.trim = trim;
    }
}

fn read_file(
    args: &SourceArgs,
    skip_errors: bool,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (mut config, job) = resolve_config(args)?;
    if skip_errors {
        config.on_error = OnError::Skip;
    }
    let output = output.or_else(|| job.output.map(PathBuf::from));

    let source = FixedFileSource::new(config);
    source.validate_configuration()?;
    source.validate_connectivity()?;

    let sink: Box<dyn Write> = match &output {
        Some(path) => Box::new(fs::File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };
    let mut writer = JsonlWriter::to_writer(sink);

    let mut records = source.create_reader()?.records();
    for item in records.by_ref() {
        writer.write_item(&item?)?;
    }
    writer.flush()?;

    let reader = records.reader();
    eprintln!(
        "✓ Read {} records from {} lines ({} rejected)",
        writer.written(),
        reader.lines_read(),
        reader.rejected()
    );
    Ok(())
}

fn guess_schema(args: &SourceArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (config, _) = resolve_config(args)?;
    let source = FixedFileSource::new(config);
    source.validate_configuration()?;
    source.validate_connectivity()?;
    let schema = source.guess_schema()?;
    print!("{}", serde_yaml::to_string(&schema)?);
    Ok(())
}

fn validate_source(args: &SourceArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (config, _) = resolve_config(args)?;
    let source = FixedFileSource::new(config);
    source.validate_configuration()?;
    source.validate_connectivity()?;
    println!("✓ Configuration is valid");
    println!("  File: {}", source.path().display());
    println!("  Field length: {}", source.config().field_length());
    if source.config().schema.include_all_fields {
        println!("  Schema: inferred from each line");
    } else {
        println!("  Schema: {} fields", source.config().schema.len());
    }
    Ok(())
}

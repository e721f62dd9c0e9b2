use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use common::config::{
    ExtractConfig, FailurePolicy, DEFAULT_EXTENSION, DEFAULT_INPUT_DIR, DEFAULT_INSERTS_FILE,
    DEFAULT_OUTPUT_DIR, DEFAULT_SCHEMA_FILE,
};
use common::SeedError;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "seedsql", version)]
#[command(about = "generate sql schema and seed inserts from typescript data files", long_about = None)]
pub struct Cli {
    /// Log debug detail (SEEDSQL_LOG or RUST_LOG take precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Defaults to `gen` with default settings
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write schema and insert scripts for every source data file
    Gen(GenArgs),
    /// Print the inferred tables as json without writing anything
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Directory scanned (non-recursively) for source data files
    #[arg(long, env = "SEEDSQL_INPUT_DIR", default_value = DEFAULT_INPUT_DIR)]
    input_dir: PathBuf,

    /// File name suffix selecting source data files
    #[arg(long, env = "SEEDSQL_EXTENSION", default_value = DEFAULT_EXTENSION)]
    extension: String,

    /// Keep going past files that fail to convert instead of aborting
    #[arg(long, default_value = "false")]
    skip_invalid: bool,
}

#[derive(Parser, Debug)]
struct GenArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Directory receiving the generated scripts (created if missing)
    #[arg(long, env = "SEEDSQL_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Schema script file name
    #[arg(long, default_value = DEFAULT_SCHEMA_FILE)]
    schema_file: String,

    /// Insert script file name
    #[arg(long, default_value = DEFAULT_INSERTS_FILE)]
    inserts_file: String,
}

#[derive(Args, Debug)]
struct InspectArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Print a json schema document per table instead of the column listing
    #[arg(long, default_value = "false")]
    json_schema: bool,
}

impl SourceArgs {
    fn failure_policy(&self) -> FailurePolicy {
        if self.skip_invalid {
            FailurePolicy::SkipInvalid
        } else {
            FailurePolicy::FailFast
        }
    }
}

impl GenArgs {
    fn config(self) -> ExtractConfig {
        ExtractConfig {
            failure_policy: self.source.failure_policy(),
            input_dir: self.source.input_dir,
            output_dir: self.output_dir,
            extension: self.source.extension,
            schema_file: self.schema_file,
            inserts_file: self.inserts_file,
        }
    }
}

impl InspectArgs {
    fn config(&self) -> ExtractConfig {
        ExtractConfig {
            input_dir: self.source.input_dir.clone(),
            extension: self.source.extension.clone(),
            failure_policy: self.source.failure_policy(),
            ..ExtractConfig::default()
        }
    }
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let level = if self.verbose { "debug" } else { "info" };
        let _guard = common::tracing::init_tracing("seedsql", level)?;

        let command = match self.command {
            Some(command) => command,
            None => Commands::Gen(GenArgs::parse_from(["seedsql"])),
        };

        let outcome = match command {
            Commands::Gen(args) => generate(args.config()),
            Commands::Inspect(args) => inspect(&args.config(), args.json_schema),
        };

        if let Err(e) = &outcome {
            tracing::error!("{:#}", e);
        }
        outcome
    }
}

fn generate(config: ExtractConfig) -> Result<()> {
    tracing::debug!(?config, "starting generation");

    let report = common::run(&config)?;

    for table in &report.tables {
        tracing::info!(
            table = %table.table,
            columns = table.columns,
            rows = table.rows,
            "converted {}",
            table.file
        );
    }

    if !report.failures.is_empty() {
        for failure in &report.failures {
            tracing::error!(file = %failure.file, "{}", failure.error);
        }
        return Err(SeedError::BatchFailed {
            failed: report.failures.len(),
        }
        .into());
    }

    tracing::info!(
        schema = %report.schema_path.display(),
        inserts = %report.inserts_path.display(),
        tables = report.tables.len(),
        "migration scripts generated"
    );
    Ok(())
}

fn inspect(config: &ExtractConfig, json_schema: bool) -> Result<()> {
    let inspection = common::inspect(config)?;

    let rendered = if json_schema {
        let documents: Vec<_> = inspection
            .tables
            .iter()
            .map(common::schema::to_json_schema)
            .collect();
        serde_json::to_string_pretty(&documents)?
    } else {
        serde_json::to_string_pretty(&inspection)?
    };
    println!("{}", rendered);

    if !inspection.failures.is_empty() {
        return Err(SeedError::BatchFailed {
            failed: inspection.failures.len(),
        }
        .into());
    }
    Ok(())
}

use clap::{Parser, Subcommand};
use colored::Colorize;
use royalbit_lingo::cli;
use royalbit_lingo::config::DEFAULT_CONFIG_FILE;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lingo")]
#[command(about = "Sync locale module trees with translation workbooks")]
#[command(long_about = "Lingo - locale module trees <-> translation workbooks

COMMANDS:
  export   - Flatten locale trees into translate-<timestamp>.xlsx
  import   - Regenerate locale trees from a filled-in workbook
  sync     - Import, then export (default when no command is given)
  check    - Validate the configuration and locale directories
  flatten  - Print one locale's key paths and strings

EXAMPLES:
  lingo export                          # One sheet per target locale
  lingo import --workbook filled.xlsx   # Write translations back
  lingo --config i18n/lingo.yaml check")]
#[command(version)]
struct Cli {
    /// Configuration file (locales + workbook paths)
    #[arg(short, long, global = true, env = "LINGO_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Show verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Export locale trees to an Excel workbook.

Reads the default locale, then for every other configured locale:
  - missing directory: copies the default tree there and writes a sheet
    whose target column repeats the default text
  - existing directory: merges its strings against the default rows

MERGE RULES (per key path):
  - stored text equals the default text  → cell left empty for review
  - stored text differs                  → translation carried forward
  - no stored text, but the same default
    text was translated elsewhere        → that translation is reused

The workbook is written to <export_dir>/translate-YYYYMMDD-HH-mm-ss.xlsx.
A failing locale is reported and skipped; the others are still exported.")]
    /// Export locale trees to an Excel workbook
    Export {
        /// Override the configured export directory
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },

    #[command(long_about = "Import a filled-in workbook into locale trees.

Every sheet named after a configured locale replaces that locale's
directory: the old tree is deleted, one module is written per key group,
and directories holding only subdirectories get a generated index module.

Blank translation cells fall back to the default text.
Sheets with unknown names are reported and skipped.")]
    /// Import a filled-in workbook into locale trees
    Import {
        /// Override the configured import workbook
        #[arg(short, long)]
        workbook: Option<PathBuf>,

        /// Sheet column holding the translations (0 = key path)
        #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u16).range(1..))]
        column: u16,
    },

    /// Import the configured workbook, then export a fresh one
    Sync,

    /// Validate the configuration and locale directories
    Check,

    /// Print one locale's flattened key paths and strings
    Flatten {
        /// Locale id or display name
        locale: String,
    },
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "lingo=debug,royalbit_lingo=debug"
    } else {
        "lingo=info,royalbit_lingo=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command.unwrap_or(Commands::Sync) {
        Commands::Export { out_dir } => cli::export(cli.config, out_dir, cli.verbose),
        Commands::Import { workbook, column } => {
            cli::import(cli.config, workbook, column as usize, cli.verbose)
        }
        Commands::Sync => cli::sync(cli.config, cli.verbose),
        Commands::Check => cli::check(cli.config),
        Commands::Flatten { locale } => cli::flatten(cli.config, locale),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "❌ Error:".bold().red(), e);
            ExitCode::FAILURE
        }
    }
}

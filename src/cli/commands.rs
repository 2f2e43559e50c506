use crate::codec::flatten as flatten_tree;
use crate::config::SyncConfig;
use crate::error::{LingoError, LingoResult};
use crate::merge::MergeStats;
use crate::parser::read_locale_tree;
use crate::pipeline::{
    ExportPipeline, ExportReport, ImportPipeline, ImportReport, LocaleOutcome, LocaleStatus,
};
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Load the configuration file, printing where it came from
fn load_config(config_path: &Path, verbose: bool) -> LingoResult<SyncConfig> {
    if verbose {
        println!("{}", "📖 Reading configuration...".cyan());
    }
    let config = SyncConfig::load(config_path)?;
    if verbose {
        println!(
            "   {} locales, default: {}\n",
            config.locales.len(),
            config.default_locale()?.display_name.bright_blue()
        );
    }
    Ok(config)
}

/// One-line summary of merge accounting
fn format_merge_stats(stats: &MergeStats) -> String {
    format!(
        "{} rows: {} carried, {} reused, {} to review, {} new",
        stats.total(),
        stats.carried,
        stats.reused,
        stats.cleared,
        stats.missing
    )
}

/// Human-readable status of one locale
fn format_status(status: &LocaleStatus) -> String {
    match status {
        LocaleStatus::Seeded { rows } => format!("seeded from default ({} rows)", rows),
        LocaleStatus::Merged(stats) => format!("merged, {}", format_merge_stats(stats)),
        LocaleStatus::Written { modules, indexes } => {
            format!("{} modules, {} index modules", modules, indexes)
        }
        LocaleStatus::Unmatched => "no configured locale with this name, skipped".to_string(),
        LocaleStatus::Failed(e) => format!("failed: {}", e),
    }
}

fn print_outcome(outcome: &LocaleOutcome) {
    let line = format!("{}: {}", outcome.locale, format_status(&outcome.status));
    match outcome.status {
        LocaleStatus::Failed(_) => println!("   {} {}", "❌".red(), line.red()),
        LocaleStatus::Unmatched => println!("   {} {}", "⚠️".yellow(), line.yellow()),
        _ => println!("   {} {}", "✅".green(), line),
    }
}

fn print_export_report(report: &ExportReport) {
    println!(
        "{} ({} default rows)",
        "📊 Locale sheets:".bold().cyan(),
        report.default_rows
    );
    for outcome in &report.outcomes {
        print_outcome(outcome);
    }
    println!();

    let failed = report.failures().count();
    if failed == 0 {
        println!("{}", "✅ Export Complete!".bold().green());
    } else {
        println!(
            "{}",
            format!("⚠️  Export finished with {} failed locale(s)", failed)
                .bold()
                .yellow()
        );
    }
    println!("   Excel file: {}\n", report.workbook_path.display());
}

fn print_import_report(report: &ImportReport) {
    println!("{}", "📁 Locale trees:".bold().cyan());
    for outcome in &report.outcomes {
        print_outcome(outcome);
    }
    println!();

    let failed = report.failures().count();
    if failed == 0 {
        println!("{}", "✅ Import Complete!".bold().green());
    } else {
        println!(
            "{}",
            format!("⚠️  Import finished with {} skipped sheet(s)", failed)
                .bold()
                .yellow()
        );
    }
    println!("   Workbook: {}\n", report.workbook_path.display());
}

/// Execute the export command
pub fn export(config_path: PathBuf, out_dir: Option<PathBuf>, verbose: bool) -> LingoResult<()> {
    println!("{}", "🌐 Lingo - Excel Export".bold().green());
    println!("   Config: {}\n", config_path.display());

    let mut config = load_config(&config_path, verbose)?;
    if let Some(dir) = out_dir {
        config = config.with_export_dir(dir);
    }

    let report = ExportPipeline::new(&config).run()?;
    print_export_report(&report);
    Ok(())
}

/// Execute the import command
pub fn import(
    config_path: PathBuf,
    workbook: Option<PathBuf>,
    column: usize,
    verbose: bool,
) -> LingoResult<()> {
    println!("{}", "🌐 Lingo - Excel Import".bold().green());
    println!("   Config: {}\n", config_path.display());

    let mut config = load_config(&config_path, verbose)?;
    if let Some(path) = workbook {
        config = config.with_import_path(path);
    }

    let report = ImportPipeline::new(&config).with_column(column).run()?;
    print_import_report(&report);
    Ok(())
}

/// Execute the sync command: import the filled-in workbook, then export a
/// fresh one from the regenerated trees
pub fn sync(config_path: PathBuf, verbose: bool) -> LingoResult<()> {
    println!("{}", "🌐 Lingo - Sync".bold().green());
    println!("   Config: {}\n", config_path.display());

    let config = load_config(&config_path, verbose)?;

    let import_report = ImportPipeline::new(&config).run()?;
    print_import_report(&import_report);

    let export_report = ExportPipeline::new(&config).run()?;
    print_export_report(&export_report);

    println!("{}", "✅ Translation sync complete".bold().green());
    Ok(())
}

/// Execute the check command - validate configuration and locale trees
pub fn check(config_path: PathBuf) -> LingoResult<()> {
    println!("{}", "🔍 Lingo - Configuration Check".bold().green());
    println!("   Config: {}\n", config_path.display());

    let config = SyncConfig::load(&config_path)?;

    println!("{}", "📋 Locales:".bold().cyan());
    for locale in &config.locales {
        let role = if locale.is_default {
            "default".bright_yellow().bold().to_string()
        } else {
            "target".to_string()
        };
        let tree = if locale.path.is_dir() {
            match read_locale_tree(&locale.path, &config.modules) {
                Ok(tree) => format!("{} strings", tree.leaf_count()).green().to_string(),
                Err(e) => format!("unreadable: {}", e).red().to_string(),
            }
        } else {
            "missing (will be seeded on export)".yellow().to_string()
        };
        println!(
            "   {} {} [{}] {} - {}",
            locale.id.bright_blue().bold(),
            locale.display_name,
            role,
            locale.path.display(),
            tree
        );
        if let Some(mark) = &locale.mark {
            println!("      mark: {}", mark);
        }
    }

    println!("\n{}", "📁 Workbook:".bold().cyan());
    println!("   Import: {}", config.workbook.import_path.display());
    println!("   Export: {}", config.workbook.export_dir.display());

    let default_locale = config.default_locale()?;
    if !default_locale.path.is_dir() {
        return Err(LingoError::Load(format!(
            "Default locale directory not found: {}",
            default_locale.path.display()
        )));
    }

    println!("\n{}", "✅ Configuration OK".bold().green());
    Ok(())
}

/// Execute the flatten command - print one locale's key paths and strings
pub fn flatten(config_path: PathBuf, locale: String) -> LingoResult<()> {
    let config = SyncConfig::load(&config_path)?;
    let locale_config = config
        .locale_by_id(&locale)
        .or_else(|| config.locale_by_name(&locale))
        .ok_or_else(|| {
            let available: Vec<&str> = config.locales.iter().map(|l| l.id.as_str()).collect();
            LingoError::Config(format!(
                "Locale '{}' not found. Available: {}",
                locale,
                available.join(", ")
            ))
        })?;

    let tree = read_locale_tree(&locale_config.path, &config.modules)?;
    let rows = flatten_tree(
        &tree,
        vec![
            config.workbook.path_header.clone(),
            locale_config.display_name.clone(),
        ],
    );

    println!("{}", rows.header.join("\t").bold());
    for row in &rows.rows {
        println!("{}\t{}", row.path.bright_blue(), row.default_text);
    }
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;

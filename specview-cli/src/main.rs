//! specview CLI
//!
//! Command-line front end for browsing specimen summaries, filtering them with
//! per-parameter conditions, and computing site/global statistics.
#![allow(
    clippy::uninlined_format_args,
    clippy::redundant_closure_for_method_calls,
    clippy::too_many_lines
)]

use clap::{ArgGroup, Parser, Subcommand};
use log::{debug, info};
use serde::Serialize;

use specview_algorithms::{
    evaluate_condition, CacheInfo, ConditionResult, DataService, GlobalStatistics, ParameterStats,
    SelectionEntry, SiteStatistics,
};
use specview_core::{RangeWindow, ViewerConfig};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for CLI operations.
type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Core error: {0}")]
    Core(#[from] specview_core::Error),

    #[error("unknown site: {0}")]
    UnknownSite(String),

    #[error("specimen {specimen} has no slot {slot}")]
    NoSuchSlot { specimen: String, slot: usize },
}

/// Browse and filter synthetic specimen measurement data.
#[derive(Parser)]
#[command(name = "specview")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Viewer configuration file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Range picker values, taken as text like the viewer's combo boxes.
#[derive(clap::Args, Debug, Clone)]
struct RangeArgs {
    /// Upper x bound (inclusive)
    #[arg(long, default_value = "100")]
    up: String,

    /// Lower x bound (inclusive)
    #[arg(long, default_value = "1")]
    down: String,
}

impl RangeArgs {
    fn window(&self, config: &ViewerConfig) -> RangeWindow {
        RangeWindow::from_text(&self.up, &self.down, &config.range)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List sites and their specimens
    Sites,

    /// Show parameter values of a specimen for a range window
    Summary {
        #[arg(long)]
        site: String,

        #[arg(long)]
        specimen: String,

        #[command(flatten)]
        range: RangeArgs,
    },

    /// Check one condition per parameter, in parameter order
    Check {
        #[arg(long)]
        site: String,

        #[arg(long)]
        specimen: String,

        #[command(flatten)]
        range: RangeArgs,

        /// Conditions such as ">= 10", "!=2.5" or "" for none
        #[arg(required = true, allow_hyphen_values = true)]
        conditions: Vec<String>,
    },

    /// Dump generated plot series
    Dataset {
        #[arg(long)]
        site: String,

        #[arg(long)]
        specimen: String,

        /// Only this plot slot (0-based)
        #[arg(long)]
        slot: Option<usize>,
    },

    /// Mean and 1-sigma band per parameter for one site
    SiteStats {
        #[arg(long)]
        site: String,

        /// Selected specimen, "Site → Specimen" (repeatable)
        #[arg(long = "select")]
        selection: Vec<String>,

        #[command(flatten)]
        range: RangeArgs,
    },

    /// Statistics of site means across the selected sites
    GlobalStats {
        /// Selected specimen, "Site → Specimen" (repeatable)
        #[arg(long = "select")]
        selection: Vec<String>,

        #[command(flatten)]
        range: RangeArgs,
    },

    /// Show dataset cache population
    CacheInfo,

    /// Show the neighbouring specimen in catalog order
    #[command(group(ArgGroup::new("direction").required(true).args(["next", "previous"])))]
    Navigate {
        #[arg(long)]
        site: String,

        #[arg(long)]
        specimen: String,

        /// Step forward
        #[arg(long)]
        next: bool,

        /// Step backward
        #[arg(long)]
        previous: bool,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

/// Loads a viewer configuration, or the defaults when no file is given.
fn load_config(path: Option<&Path>) -> Result<ViewerConfig> {
    let Some(path) = path else {
        return Ok(ViewerConfig::default());
    };
    let text = std::fs::read_to_string(path)?;
    let config: ViewerConfig = serde_json::from_str(&text)?;
    config.validate()?;
    info!("loaded viewer config from {}", path.display());
    Ok(config)
}

fn emit_json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn selection_entries(selection: &[String]) -> Vec<SelectionEntry> {
    selection.iter().map(|s| SelectionEntry::from(s.as_str())).collect()
}

fn write_parameter_stats(
    out: &mut impl Write,
    labels: &[String],
    parameters: &[ParameterStats],
) -> Result<()> {
    for (label, stats) in labels.iter().zip(parameters) {
        writeln!(
            out,
            "  {:<12} mean {:>12.5} std {:>10.5} band [{:.5}, {:.5}] n={} available={}",
            label,
            stats.mean,
            stats.std,
            stats.lower_1sigma,
            stats.upper_1sigma,
            stats.count,
            stats.available
        )?;
    }
    Ok(())
}

fn write_site_stats(out: &mut impl Write, labels: &[String], stats: &SiteStatistics) -> Result<()> {
    writeln!(
        out,
        "{} ({} specimens, range {})",
        stats.site,
        stats.specimen_count(),
        stats.window
    )?;
    write_parameter_stats(out, labels, &stats.parameters)
}

fn write_global_stats(out: &mut impl Write, labels: &[String], stats: &GlobalStatistics) -> Result<()> {
    for site in &stats.sites {
        write_site_stats(out, labels, site)?;
    }
    writeln!(out, "Global ({} sites, range {})", stats.sites.len(), stats.window)?;
    write_parameter_stats(out, labels, &stats.parameters)
}

fn write_cache_info(out: &mut impl Write, info: &CacheInfo) -> Result<()> {
    writeln!(out, "Sites:            {}", info.sites.join(", "))?;
    writeln!(out, "Total specimens:  {}", info.total_specimens)?;
    writeln!(out, "Cached specimens: {}", info.cached_specimens)?;
    writeln!(out, "Complete:         {}", info.complete)?;
    Ok(())
}

#[derive(Serialize)]
struct ConditionReport<'a> {
    parameter: &'a str,
    value: &'a str,
    condition: &'a str,
    result: ConditionResult,
    passes: bool,
    highlight: String,
}

#[derive(Serialize)]
struct NavigationReport<'a> {
    site: &'a str,
    specimen: &'a str,
}

fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    debug!("viewer config: {config:?}");
    let mut service = DataService::new(config)?;
    let labels = service.labels().to_vec();

    match cli.command {
        Commands::Sites => {
            if cli.json {
                emit_json(out, service.catalog().sites())?;
            } else {
                for site in service.catalog().sites() {
                    writeln!(out, "{}: {}", site.name, site.specimens.join(", "))?;
                }
            }
        }

        Commands::Summary {
            site,
            specimen,
            range,
        } => {
            let window = range.window(service.config());
            debug!("summary window: {window}");
            let summary = service.summary(&site, &specimen, window);
            if cli.json {
                emit_json(out, &summary)?;
            } else {
                writeln!(out, "{} → {} (range {})", site, specimen, window)?;
                for entry in summary.entries() {
                    writeln!(out, "  {:<12} {}", entry.label, entry.value)?;
                }
            }
        }

        Commands::Check {
            site,
            specimen,
            range,
            conditions,
        } => {
            let window = range.window(service.config());
            debug!("check window: {window}");
            let summary = service.summary(&site, &specimen, window);
            let results: Vec<ConditionResult> = conditions
                .iter()
                .enumerate()
                .map(|(index, condition)| evaluate_condition(&summary, index, condition))
                .collect();
            let reports: Vec<ConditionReport<'_>> = conditions
                .iter()
                .zip(&results)
                .enumerate()
                .map(|(index, (condition, result))| ConditionReport {
                    parameter: summary.label(index).unwrap_or("-"),
                    value: summary.value(index).map_or("-", |v| v.as_str()),
                    condition,
                    result: *result,
                    passes: result.passes(),
                    highlight: result.highlight().to_string(),
                })
                .collect();
            if cli.json {
                emit_json(out, &reports)?;
            } else {
                for report in &reports {
                    writeln!(
                        out,
                        "  {:<12} {:>12}  {:<10} {} [{}]",
                        report.parameter,
                        report.value,
                        report.condition,
                        report.result.to_string(),
                        report.highlight
                    )?;
                }
                let all_pass = results.iter().all(|r| r.passes());
                writeln!(out, "{}", if all_pass { "PASS" } else { "FAIL" })?;
            }
        }

        Commands::Dataset {
            site,
            specimen,
            slot,
        } => {
            let dataset = service.full_dataset(&site, &specimen);
            let series: Vec<_> = match slot {
                Some(slot) => vec![dataset.slot(slot).ok_or(CliError::NoSuchSlot {
                    specimen: specimen.clone(),
                    slot,
                })?],
                None => dataset.iter().collect(),
            };
            if cli.json {
                emit_json(out, &series)?;
            } else {
                for s in series {
                    let x = s.x();
                    writeln!(
                        out,
                        "{} ({:?}, {} points, x {:.3}..{:.3})",
                        s.labels().title,
                        s.kind(),
                        s.len(),
                        x.first().copied().unwrap_or(0.0),
                        x.last().copied().unwrap_or(0.0)
                    )?;
                }
            }
        }

        Commands::SiteStats {
            site,
            selection,
            range,
        } => {
            let window = range.window(service.config());
            debug!("site stats window: {window}");
            let stats = service
                .site_stats(&site, &selection_entries(&selection), window)
                .ok_or_else(|| CliError::UnknownSite(site.clone()))?;
            if cli.json {
                emit_json(out, &stats)?;
            } else {
                write_site_stats(out, &labels, &stats)?;
            }
        }

        Commands::GlobalStats { selection, range } => {
            let window = range.window(service.config());
            debug!("global stats window: {window}");
            let stats = service.global_stats(&selection_entries(&selection), window);
            if cli.json {
                emit_json(out, &stats)?;
            } else {
                write_global_stats(out, &labels, &stats)?;
            }
        }

        Commands::CacheInfo => {
            let info = service.cache_info();
            if cli.json {
                emit_json(out, &info)?;
            } else {
                write_cache_info(out, &info)?;
            }
        }

        Commands::Navigate {
            site,
            specimen,
            next,
            previous,
        } => {
            let catalog = service.catalog();
            if catalog.site(&site).is_none() {
                return Err(CliError::UnknownSite(site));
            }
            // clap's "direction" group guarantees exactly one flag
            debug_assert!(next != previous);
            let target = if previous {
                catalog.previous_specimen(&site, &specimen)
            } else {
                catalog.next_specimen(&site, &specimen)
            };
            let report = target.map(|(site, specimen)| NavigationReport { site, specimen });
            if cli.json {
                emit_json(out, &report)?;
            } else {
                match report {
                    Some(r) => writeln!(out, "{} → {}", r.site, r.specimen)?,
                    None => writeln!(out, "no specimen in that direction")?,
                }
            }
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(cli, &mut out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn run_args(args: &[&str]) -> Result<String> {
        let cli = Cli::try_parse_from(args).unwrap();
        let mut out = Vec::new();
        run(cli, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_load_config_from_file() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            r#"{"num_plots": 4, "num_params": 2, "parameter_labels": ["Alpha", "Beta"]}"#,
        )
        .unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.num_plots, 4);
        assert_eq!(config.resolved_labels(), ["Alpha", "Beta"]);
        assert_eq!(config.range.default_up, 100);
    }

    #[test]
    fn test_load_config_rejects_invalid() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), r#"{"num_plots": 0}"#).unwrap();
        assert!(matches!(
            load_config(Some(file.path())),
            Err(CliError::Core(_))
        ));

        std::fs::write(file.path(), "not json").unwrap();
        assert!(matches!(
            load_config(Some(file.path())),
            Err(CliError::Json(_))
        ));
    }

    #[test]
    fn test_sites_command() {
        let output = run_args(&["specview", "sites"]).unwrap();
        assert!(output.contains("Site A: Sample A1, Sample A2, Sample A3"));
        assert_eq!(output.lines().count(), 4);
    }

    #[test]
    fn test_summary_with_bad_range_text_uses_defaults() {
        let output = run_args(&[
            "specview", "summary", "--site", "Site A", "--specimen", "Sample A1", "--up", "abc",
        ])
        .unwrap();
        assert!(output.contains("range 1 to 100"));
        assert!(output.contains("Temperature"));
    }

    #[test]
    fn test_check_json() {
        let output = run_args(&[
            "specview",
            "--json",
            "check",
            "--site",
            "Site A",
            "--specimen",
            "Sample A1",
            "",
            ">-1000",
            "<-1000",
        ])
        .unwrap();
        let reports: serde_json::Value = serde_json::from_str(&output).unwrap();
        let reports = reports.as_array().unwrap();
        assert_eq!(reports.len(), 3);
        assert_eq!(reports[0]["highlight"], "default");
        assert_eq!(reports[1]["passes"], true);
        assert_eq!(reports[2]["highlight"], "no match");
        assert_eq!(reports[2]["parameter"], "Humidity");
        assert_ne!(reports[1]["value"], "-");
    }

    #[test]
    fn test_navigate_crosses_sites() {
        let output = run_args(&[
            "specview", "navigate", "--site", "Site A", "--specimen", "Sample A3", "--next",
        ])
        .unwrap();
        assert_eq!(output.trim(), "Site B → Sample B1");

        let result = run_args(&[
            "specview", "navigate", "--site", "Site Q", "--specimen", "x", "--next",
        ]);
        assert!(matches!(result, Err(CliError::UnknownSite(_))));
    }

    #[test]
    fn test_navigate_requires_direction() {
        let output = run_args(&[
            "specview", "navigate", "--site", "Site B", "--specimen", "Sample B1", "--previous",
        ])
        .unwrap();
        assert_eq!(output.trim(), "Site A → Sample A3");

        let missing = Cli::try_parse_from([
            "specview", "navigate", "--site", "Site A", "--specimen", "Sample A1",
        ]);
        assert!(missing.is_err());

        let both = Cli::try_parse_from([
            "specview", "navigate", "--site", "Site A", "--specimen", "Sample A2", "--next",
            "--previous",
        ]);
        assert!(both.is_err());
    }

    #[test]
    fn test_dataset_slot_out_of_range() {
        let result = run_args(&[
            "specview", "dataset", "--site", "Site A", "--specimen", "Sample A1", "--slot", "20",
        ]);
        assert!(matches!(result, Err(CliError::NoSuchSlot { slot: 20, .. })));
    }

    #[test]
    fn test_cache_info_json() {
        let output = run_args(&["specview", "--json", "cache-info"]).unwrap();
        let info: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(info["cached_specimens"], 11);
        assert_eq!(info["complete"], true);
    }
}

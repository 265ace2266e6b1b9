//! CLI command implementations
//!
//! Every command follows the same sequence:
//!
//! 1. Load and validate the configuration
//! 2. Apply the configured log level
//! 3. Run one render pass (both aggregations, then merge)
//! 4. Filter with the configured settings
//! 5. Build the requested view and write it as one JSON response
//!
//! A failed render pass produces an error response and no partial view.

use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use crate::config::{Config, DISPLAY_LIMIT_RANGE};
use crate::dashboard::Dashboard;
use crate::export::{export_to_path, DEFAULT_EXPORT_FILE};
use crate::merge::Dataset;
use crate::observability::Logger;
use crate::selection::{Metric, Selection};
use crate::source::SqliteSource;

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{write_error, write_response};

/// Main entry point for CLI
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command and write its response
pub fn run_command(cmd: Command) -> CliResult<()> {
    match execute(cmd) {
        Ok(data) => write_response(&data),
        Err(e) => {
            write_error(e.code_str(), e.message())?;
            Err(e)
        }
    }
}

/// Run a command and return the response payload
pub fn execute(cmd: Command) -> CliResult<Value> {
    match cmd {
        Command::Summary { config } => summary(&config),
        Command::Entities { config } => entities(&config),
        Command::Top {
            config,
            metric,
            limit,
        } => top(&config, metric, limit),
        Command::Category { config, metric } => category(&config, metric),
        Command::Entity { config, name } => entity(&config, &name),
        Command::Export {
            config,
            sort,
            output,
        } => export(&config, sort, output),
    }
}

/// Configuration plus the dataset of one render pass
struct Session {
    config: Config,
    dashboard: Dashboard<SqliteSource>,
    dataset: Dataset,
}

impl Session {
    fn open(config_path: &Path) -> CliResult<Self> {
        let config = Config::load(config_path)?;
        Logger::set_min_severity(config.severity()?);

        let dashboard = Dashboard::new(SqliteSource::open_lazy(&config.database_path));
        let dataset = dashboard.load()?;

        Ok(Self {
            config,
            dashboard,
            dataset,
        })
    }

    fn selection(&self) -> Selection<'_> {
        self.dashboard.select(&self.dataset, &self.config.filter())
    }
}

/// Category totals, shares and breakdown over the filtered entities
pub fn summary(config_path: &Path) -> CliResult<Value> {
    let session = Session::open(config_path)?;
    let selection = session.selection();
    let summary = selection.summary();
    let distribution = summary.distribution();

    Ok(json!({
        "summary": summary,
        "distribution": distribution,
        "metrics": session.dashboard.metrics(),
    }))
}

/// Entity names available for selection and the threshold maxima
pub fn entities(config_path: &Path) -> CliResult<Value> {
    let session = Session::open(config_path)?;
    let selection = session.selection();
    let selected: Vec<&str> = selection.rows().iter().map(|r| r.name()).collect();

    Ok(json!({
        "available": session.dataset.entity_names(),
        "selected": selected,
        "max_enrollments": session.dataset.max_enrollments(),
        "max_criteria": session.dataset.max_criteria(),
    }))
}

/// Highest `limit` entities by `metric`
pub fn top(config_path: &Path, metric: Option<Metric>, limit: Option<usize>) -> CliResult<Value> {
    let session = Session::open(config_path)?;
    let metric = match metric {
        Some(m) => m,
        None => session.config.sort_metric()?,
    };
    let limit = limit
        .unwrap_or(session.config.display_limit)
        .clamp(*DISPLAY_LIMIT_RANGE.start(), *DISPLAY_LIMIT_RANGE.end());

    let selection = session.selection();
    let rows = selection.top(metric, limit);

    Ok(json!({
        "metric": metric,
        "label": metric.label(),
        "limit": limit,
        "rows": rows,
    }))
}

/// Every entity with a positive value for one category, highest first.
///
/// Not cut to the display limit; `top` serves the limited ranking.
pub fn category(config_path: &Path, metric: Metric) -> CliResult<Value> {
    let session = Session::open(config_path)?;
    let selection = session.selection();
    let rows = selection.category(metric);

    Ok(json!({
        "metric": metric,
        "label": metric.label(),
        "rows": rows,
    }))
}

/// Category profile of one filtered entity
pub fn entity(config_path: &Path, name: &str) -> CliResult<Value> {
    let session = Session::open(config_path)?;
    let selection = session.selection();
    let profile = selection
        .profile(name)
        .ok_or_else(|| CliError::entity_not_found(name))?;
    let peak = profile.peak();

    Ok(json!({
        "profile": profile,
        "peak": peak,
    }))
}

/// Writes the filtered table sorted by `sort`, highest first
pub fn export(
    config_path: &Path,
    sort: Option<Metric>,
    output: Option<PathBuf>,
) -> CliResult<Value> {
    let session = Session::open(config_path)?;
    let sort = match sort {
        Some(m) => m,
        None => session.config.sort_metric()?,
    };
    let output = output.unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_FILE));

    let selection = session.selection();
    let rows = selection.sorted(sort);
    let written = export_to_path(&rows, &output)?;

    Ok(json!({
        "path": output.display().to_string(),
        "sort": sort,
        "rows": written,
    }))
}

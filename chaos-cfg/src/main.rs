/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{error, info, warn};

use chaos_cfg::config::GeneratorConfig;
use chaos_cfg::generator::{generate_all, ArtifactFamily};
use chaos_cfg::project::ProjectRecords;

// ── CLI argument definition ───────────────────────────────────────────────────

/// CHAOS RTOS configuration generator.
///
/// Example:
///   chaos-cfg --project demos/sample.chaos_cfg \
///             --config demos/chaos_cfg.yaml --only tasks --only alarms
#[derive(Debug, Parser)]
#[command(
    name = "chaos-cfg",
    about = "CHAOS RTOS configuration generator",
    long_about = None,
)]
struct Cli {
    /// Project file (`*.chaos_cfg`, JSON) holding the configuration records.
    #[arg(short = 'p', long = "project")]
    project: PathBuf,

    /// Path to the YAML generator configuration file.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Template directory (overrides the configuration file).
    #[arg(short = 't', long = "templates")]
    templates: Option<PathBuf>,

    /// Output directory (overrides the configuration file).
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Generate only these families (os, task, schedule, alarm); repeatable.
    #[arg(long = "only", value_name = "FAMILY")]
    only: Vec<ArtifactFamily>,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialise structured logging.
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // ── Parse CLI arguments ───────────────────────────────────────────────────
    let cli = Cli::parse();

    info!(
        project   = %cli.project.display(),
        config    = ?cli.config,
        templates = ?cli.templates,
        output    = ?cli.output,
        only      = ?cli.only,
        "Configuration"
    );

    // ── Load generator configuration ──────────────────────────────────────────
    let mut config = match &cli.config {
        Some(path) => match GeneratorConfig::load_from_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!("Failed to load generator configuration: {:#}", e);
                process::exit(1);
            }
        },
        None => {
            warn!("No configuration file provided, using default template/output layout");
            GeneratorConfig::default()
        }
    };
    if let Some(dir) = cli.templates {
        config.template_dir = dir;
    }
    if let Some(dir) = cli.output {
        config.output_dir = dir;
    }
    info!(
        templates = %config.template_dir.display(),
        output = %config.output_dir.display(),
        "Layout"
    );

    // ── Load project ──────────────────────────────────────────────────────────
    let project = match ProjectRecords::load_from_file(&cli.project) {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to load project: {:#}", e);
            process::exit(1);
        }
    };

    let summary = project.summary();
    let hooks = if summary.enabled_hooks.is_empty() {
        "None".to_string()
    } else {
        summary.enabled_hooks.join(", ")
    };
    info!(
        "  [OS]        freq={}Hz  tick={}ms  hooks={}",
        summary.scheduler_freq_hz, summary.tick_ms, hooks
    );
    info!("  [Tasks]     {} task(s)", summary.task_count);
    info!("  [Schedule]  {} event(s)", summary.schedule_count);
    info!("  [Alarms]    {} alarm(s)", summary.alarm_count);

    // ── Generate ──────────────────────────────────────────────────────────────
    let families = if cli.only.is_empty() {
        ArtifactFamily::ALL.to_vec()
    } else {
        cli.only
    };

    let outcomes = generate_all(&config, &project, &families);
    let failed: Vec<String> = outcomes
        .iter()
        .filter(|o| !o.is_ok())
        .map(|o| o.family.to_string())
        .collect();

    if failed.is_empty() {
        info!(
            "Generated {} family(ies) into {}",
            outcomes.len(),
            config.output_dir.display()
        );
    } else {
        error!("Generation failed for: {}", failed.join(", "));
        process::exit(1);
    }
}

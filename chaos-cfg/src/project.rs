/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Project document loader (`*.chaos_cfg`).
//!
//! A project is a JSON document holding the raw records of every family:
//!
//! ```json
//! {
//!   "version": 1,
//!   "os":       { "scheduler_freq": "1000", "tick_ms": "1", "hooks": { ... } },
//!   "tasks":    [ { "id": 0, "name": "Task_Init", "priority": 1 } ],
//!   "schedule": [ { "task_id": 0, "period_ms": 100 } ],
//!   "alarms":   [ { "alarm_id": 0, "alarm_type": "CYCLIC", ... } ]
//! }
//! ```
//!
//! Records stay raw here; normalization happens in the generators.  Missing
//! sections are empty, so a document with only `"tasks"` is still a valid
//! project.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{info, warn};

use crate::record::{normalize_tasks, OsConfig, RawRecord};

/// Project document version this loader understands.
pub const SUPPORTED_VERSION: u32 = 1;

/// Raw records of one project, one list per family.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProjectRecords {
    #[serde(default)]
    pub version: Option<u32>,
    #[serde(default)]
    pub os: RawRecord,
    #[serde(default)]
    pub tasks: Vec<RawRecord>,
    #[serde(default)]
    pub schedule: Vec<RawRecord>,
    #[serde(default)]
    pub alarms: Vec<RawRecord>,
}

impl ProjectRecords {
    /// Read and parse the project file at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a project
    /// document (invalid JSON, or a section of the wrong shape).
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading project from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open project file: {}", path.display()))?;
        Self::from_json_str(&content)
            .with_context(|| format!("Failed to parse project file: {}", path.display()))
    }

    /// Parse a project document from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let project: ProjectRecords =
            serde_json::from_str(json).context("not a CHAOS project document")?;

        match project.version {
            Some(SUPPORTED_VERSION) => {}
            Some(v) => warn!(
                version = v,
                supported = SUPPORTED_VERSION,
                "unsupported project version, reading anyway"
            ),
            None => warn!("project has no version field, assuming {}", SUPPORTED_VERSION),
        }
        Ok(project)
    }

    /// Overview of what will be generated.
    pub fn summary(&self) -> ProjectSummary {
        let os = OsConfig::from_raw(&self.os);
        ProjectSummary {
            scheduler_freq_hz: os.scheduler_freq_hz,
            tick_ms: os.tick_ms,
            enabled_hooks: os.hooks.enabled_names(),
            task_count: normalize_tasks(&self.tasks).len(),
            schedule_count: self.schedule.len(),
            alarm_count: self.alarms.len(),
        }
    }
}

/// Counts shown before generation.
///
/// `task_count` excludes tasks with a blank name, since those never reach
/// the generated files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSummary {
    pub scheduler_freq_hz: i64,
    pub tick_ms: i64,
    pub enabled_hooks: Vec<&'static str>,
    pub task_count: usize,
    pub schedule_count: usize,
    pub alarm_count: usize,
}

// ── Tests ─────────────────────────────────────────────────────────────────────

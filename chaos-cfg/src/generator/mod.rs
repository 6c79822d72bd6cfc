/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Artifact generators for the four CHAOS configuration families.
//!
//! Each family module exposes pure `render_*` functions (template text +
//! canonical records → output text) and one `generate_*` entry point that
//! adds the file handling:
//!
//! ```text
//! raw records ──normalize──► records ─┐
//! template file ──read──► text ───────┴─► render_header / render_source ──► write (atomic)
//! ```
//!
//! | Family | Header | Source |
//! |---|---|---|
//! | [`os`] | `os_cfg.h` – 3 numeric + 5 hook directives | – |
//! | [`task`] | `os_task_cfg.h` – `<Task>_ID` defines | `os_task_cfg.c` – externs + `Tasks[]` |
//! | [`schedule`] | `os_sched_tbl_cfg.h` – `SCHED_EVT_NUMBER` | `os_sched_tbl_cfg.c` – `SchedTable[]` |
//! | [`alarm`] | `os_alarms_cfg.h` – `ALARMS_NUMB` | `os_alarms_cfg.c` – alarm structs + `AlarmList[]` |
//!
//! # Write discipline
//! A document is written only once every region in it has been resolved,
//! through a temporary file in the destination directory that is then
//! renamed over the output path.  A structural failure therefore never leaves
//! a half-rewritten file.  Header and source are independent documents: the
//! header is written before the source is processed, so a broken source
//! template still yields a valid header.
//!
//! Generators keep no state between calls.

pub mod alarm;
pub mod error;
pub mod os;
pub mod schedule;
pub mod task;

pub use error::GenerateError;

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tempfile::NamedTempFile;
use tracing::{debug, error, info, warn};

use crate::config::GeneratorConfig;
use crate::project::ProjectRecords;
use crate::template::{try_rewrite_directive, LocateError};

// ── ArtifactFamily ────────────────────────────────────────────────────────────

/// One of the four independently generated configuration families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArtifactFamily {
    Os,
    Task,
    Schedule,
    Alarm,
}

impl ArtifactFamily {
    /// All families in generation order.
    pub const ALL: [ArtifactFamily; 4] = [
        ArtifactFamily::Os,
        ArtifactFamily::Task,
        ArtifactFamily::Schedule,
        ArtifactFamily::Alarm,
    ];
}

impl fmt::Display for ArtifactFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArtifactFamily::Os => "OS",
            ArtifactFamily::Task => "Task",
            ArtifactFamily::Schedule => "Schedule table",
            ArtifactFamily::Alarm => "Alarm",
        };
        f.write_str(name)
    }
}

impl FromStr for ArtifactFamily {
    type Err = String;

    /// Accepts `os`, `task(s)`, `schedule`/`sched`, `alarm(s)`
    /// (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "os" => Ok(ArtifactFamily::Os),
            "task" | "tasks" => Ok(ArtifactFamily::Task),
            "schedule" | "sched" => Ok(ArtifactFamily::Schedule),
            "alarm" | "alarms" => Ok(ArtifactFamily::Alarm),
            other => Err(format!(
                "unknown artifact family '{}' (valid: os, task, schedule, alarm)",
                other
            )),
        }
    }
}

// ── Document paths ────────────────────────────────────────────────────────────

/// Where one document is read from and written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPaths {
    pub template: PathBuf,
    pub output: PathBuf,
}

impl DocumentPaths {
    pub fn new(template: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            template: template.into(),
            output: output.into(),
        }
    }
}

// ── Shared helpers ────────────────────────────────────────────────────────────

/// Read a whole template as UTF-8.
pub(crate) fn read_template(family: ArtifactFamily, path: &Path) -> Result<String, GenerateError> {
    std::fs::read_to_string(path).map_err(|source| GenerateError::ReadTemplate {
        family,
        path: path.to_path_buf(),
        source,
    })
}

/// Write `text` to `path`, creating parent directories as needed.
///
/// The content goes to a temporary file next to the destination first and is
/// then renamed into place, so readers see either the old or the new file.
pub(crate) fn write_output(
    family: ArtifactFamily,
    path: &Path,
    text: &str,
) -> Result<(), GenerateError> {
    let write_err = |source| GenerateError::WriteOutput {
        family,
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(write_err)?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(text.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    info!(
        family = %family,
        output = %path.display(),
        bytes = text.len(),
        "document written"
    );
    Ok(())
}

/// Map a locator miss to a family-qualified structural error.
pub(crate) fn structural(
    family: ArtifactFamily,
    template: &Path,
) -> impl FnOnce(LocateError) -> GenerateError + '_ {
    move |error| GenerateError::Structural {
        family,
        template: template.to_path_buf(),
        error,
    }
}

/// Rewrite a directive, logging a warning when the macro is absent.
///
/// A missing directive stays a no-op; the warning is the only trace.
pub(crate) fn set_directive(text: &str, name: &str, value: &str) -> String {
    match try_rewrite_directive(text, name, value) {
        Some(out) => {
            debug!(directive = name, value = value, "directive rewritten");
            out
        }
        None => {
            warn!(
                directive = name,
                "directive not present in template, left unchanged"
            );
            text.to_string()
        }
    }
}

// ── Whole-project generation ──────────────────────────────────────────────────

/// Result of generating one family.
#[derive(Debug)]
pub struct FamilyOutcome {
    pub family: ArtifactFamily,
    pub result: Result<(), GenerateError>,
}

impl FamilyOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Generate `families` from `project` using the file layout in `config`.
///
/// Families are independent: each runs to completion or failure on its own,
/// and a failure in one does not stop the others.  They run sequentially in
/// the order given.
pub fn generate_all(
    config: &GeneratorConfig,
    project: &ProjectRecords,
    families: &[ArtifactFamily],
) -> Vec<FamilyOutcome> {
    families
        .iter()
        .map(|&family| {
            info!(family = %family, "generating");
            let result = generate_family(config, project, family);
            if let Err(e) = &result {
                error!(family = %family, "{}", e);
            }
            FamilyOutcome { family, result }
        })
        .collect()
}

fn generate_family(
    config: &GeneratorConfig,
    project: &ProjectRecords,
    family: ArtifactFamily,
) -> Result<(), GenerateError> {
    let files = &config.files;
    match family {
        ArtifactFamily::Os => os::generate_os_cfg(&config.document(&files.os_header), &project.os),
        ArtifactFamily::Task => task::generate_task_cfg(
            &config.document(&files.task_header),
            &config.document(&files.task_source),
            &project.tasks,
        ),
        ArtifactFamily::Schedule => schedule::generate_sched_tbl_cfg(
            &config.document(&files.sched_header),
            &config.document(&files.sched_source),
            &project.schedule,
        ),
        ArtifactFamily::Alarm => alarm::generate_alarms_cfg(
            &config.document(&files.alarms_header),
            &config.document(&files.alarms_source),
            &project.alarms,
        ),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Generator configuration: where templates are read from and where the
//! generated files go.
//!
//! The configuration file is optional.  Without one the generator uses the
//! reference layout (`templates/` → `generated/`, standard file names).
//!
//! The expected YAML structure is:
//! ```yaml
//! template_dir: templates
//! output_dir: generated
//! files:                       # every entry optional
//!   os_header: os_cfg.h
//!   task_header: os_task_cfg.h
//!   task_source: os_task_cfg.c
//!   sched_header: os_sched_tbl_cfg.h
//!   sched_source: os_sched_tbl_cfg.c
//!   alarms_header: os_alarms_cfg.h
//!   alarms_source: os_alarms_cfg.c
//! ```
//!
//! A file name is joined onto both directories, so template and output of one
//! document share the same name.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

use crate::generator::DocumentPaths;

// ── Private YAML deserialization types ────────────────────────────────────────

/// Top-level wrapper that maps directly onto the YAML file layout.
///
/// Every field is optional so that partial configs are accepted gracefully
/// (missing values fall back to their defaults).
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct GeneratorConfigFile {
    template_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    #[serde(default)]
    files: FileNamesEntry,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileNamesEntry {
    os_header: Option<String>,
    task_header: Option<String>,
    task_source: Option<String>,
    sched_header: Option<String>,
    sched_source: Option<String>,
    alarms_header: Option<String>,
    alarms_source: Option<String>,
}

// ── Public data structures ────────────────────────────────────────────────────

/// File name of each generated document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNames {
    pub os_header: String,
    pub task_header: String,
    pub task_source: String,
    pub sched_header: String,
    pub sched_source: String,
    pub alarms_header: String,
    pub alarms_source: String,
}

impl Default for FileNames {
    fn default() -> Self {
        Self {
            os_header: "os_cfg.h".into(),
            task_header: "os_task_cfg.h".into(),
            task_source: "os_task_cfg.c".into(),
            sched_header: "os_sched_tbl_cfg.h".into(),
            sched_source: "os_sched_tbl_cfg.c".into(),
            alarms_header: "os_alarms_cfg.h".into(),
            alarms_source: "os_alarms_cfg.c".into(),
        }
    }
}

/// Template and output locations for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub template_dir: PathBuf,
    pub output_dir: PathBuf,
    pub files: FileNames,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            template_dir: PathBuf::from("templates"),
            output_dir: PathBuf::from("generated"),
            files: FileNames::default(),
        }
    }
}

impl GeneratorConfig {
    /// Parses the YAML file at `path`, filling gaps with defaults.
    ///
    /// Relative directories in the file are kept relative (to the working
    /// directory of the run), not to the config file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened, if the YAML is
    /// structurally invalid, or if it holds unknown keys.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading generator configuration from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open configuration file: {}", path.display()))?;

        // An empty document deserializes as unit, not as a map.
        let file: GeneratorConfigFile = if content.trim().is_empty() {
            GeneratorConfigFile::default()
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML file: {}", path.display()))?
        };

        let defaults = Self::default();
        let names = file.files;
        let fallback = defaults.files;
        let cfg = Self {
            template_dir: file.template_dir.unwrap_or(defaults.template_dir),
            output_dir: file.output_dir.unwrap_or(defaults.output_dir),
            files: FileNames {
                os_header: names.os_header.unwrap_or(fallback.os_header),
                task_header: names.task_header.unwrap_or(fallback.task_header),
                task_source: names.task_source.unwrap_or(fallback.task_source),
                sched_header: names.sched_header.unwrap_or(fallback.sched_header),
                sched_source: names.sched_source.unwrap_or(fallback.sched_source),
                alarms_header: names.alarms_header.unwrap_or(fallback.alarms_header),
                alarms_source: names.alarms_source.unwrap_or(fallback.alarms_source),
            },
        };

        debug!(
            template_dir = %cfg.template_dir.display(),
            output_dir = %cfg.output_dir.display(),
            "generator configuration loaded"
        );
        Ok(cfg)
    }

    /// Template and output path for the document called `file_name`.
    pub fn document(&self, file_name: &str) -> DocumentPaths {
        DocumentPaths::new(
            self.template_dir.join(file_name),
            self.output_dir.join(file_name),
        )
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper: write a YAML string to a temp file and return it.
    fn yaml_tempfile(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn default_config_uses_reference_layout() {
        let cfg = GeneratorConfig::default();
        assert_eq!(cfg.template_dir, PathBuf::from("templates"));
        assert_eq!(cfg.output_dir, PathBuf::from("generated"));
        assert_eq!(cfg.files.alarms_source, "os_alarms_cfg.c");
    }

    #[test]
    fn document_joins_name_onto_both_dirs() {
        let cfg = GeneratorConfig::default();
        let doc = cfg.document(&cfg.files.task_source);
        assert_eq!(doc.template, PathBuf::from("templates/os_task_cfg.c"));
        assert_eq!(doc.output, PathBuf::from("generated/os_task_cfg.c"));
    }

    #[test]
    fn load_full_yaml() {
        let yaml = r#"
template_dir: /opt/chaos/templates
output_dir: build/cfg
files:
  os_header: my_os_cfg.h
  alarms_source: alarms.c
"#;
        let f = yaml_tempfile(yaml);
        let cfg = GeneratorConfig::load_from_file(f.path()).unwrap();

        assert_eq!(cfg.template_dir, PathBuf::from("/opt/chaos/templates"));
        assert_eq!(cfg.output_dir, PathBuf::from("build/cfg"));
        assert_eq!(cfg.files.os_header, "my_os_cfg.h");
        assert_eq!(cfg.files.alarms_source, "alarms.c");
        // untouched names keep their defaults
        assert_eq!(cfg.files.task_header, "os_task_cfg.h");
    }

    #[test]
    fn partial_yaml_uses_defaults() {
        let f = yaml_tempfile("output_dir: out\n");
        let cfg = GeneratorConfig::load_from_file(f.path()).unwrap();
        assert_eq!(cfg.template_dir, PathBuf::from("templates"));
        assert_eq!(cfg.output_dir, PathBuf::from("out"));
        assert_eq!(cfg.files, FileNames::default());
    }

    #[test]
    fn empty_file_is_the_default_config() {
        let f = yaml_tempfile("");
        let cfg = GeneratorConfig::load_from_file(f.path()).unwrap();
        assert_eq!(cfg, GeneratorConfig::default());
    }

    #[test]
    fn unknown_key_is_rejected() {
        let f = yaml_tempfile("template_directory: t\n");
        assert!(GeneratorConfig::load_from_file(f.path()).is_err());
    }

    #[test]
    fn missing_file_returns_error() {
        let result = GeneratorConfig::load_from_file(Path::new("/nonexistent/path/chaos.yaml"));
        assert!(result.is_err());
    }

    #[test]
    fn malformed_yaml_returns_error() {
        let f = yaml_tempfile("this is: not: valid: yaml: content:::");
        assert!(GeneratorConfig::load_from_file(f.path()).is_err());
    }
}

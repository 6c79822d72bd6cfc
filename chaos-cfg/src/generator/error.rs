/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Error type returned by the artifact generators.
//!
//! Only structural and I/O problems are errors.  Bad field *values* never get
//! here: the normalizer in [`crate::record`] replaces them with fallbacks.
//!
//! | Variant | Meaning | Output state |
//! |---|---|---|
//! | `Structural` | a required anchor is missing from a template | that document is not written |
//! | `ReadTemplate` | the template file could not be read | nothing written for that document |
//! | `WriteOutput` | the output could not be created or replaced | previous output file (if any) untouched |
//!
//! Every variant names the artifact family and the file involved so the
//! message alone is enough to find and fix the template.

use std::path::PathBuf;

use thiserror::Error;

use super::ArtifactFamily;
use crate::template::LocateError;

#[derive(Debug, Error)]
pub enum GenerateError {
    /// A marker, declaration, `{` or `};` could not be located.
    #[error("{family} generator: {error} in template '{}'", .template.display())]
    Structural {
        family: ArtifactFamily,
        template: PathBuf,
        error: LocateError,
    },

    #[error("{family} generator: cannot read template '{}'", .path.display())]
    ReadTemplate {
        family: ArtifactFamily,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{family} generator: cannot write output '{}'", .path.display())]
    WriteOutput {
        family: ArtifactFamily,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GenerateError {
    pub fn family(&self) -> ArtifactFamily {
        match self {
            GenerateError::Structural { family, .. }
            | GenerateError::ReadTemplate { family, .. }
            | GenerateError::WriteOutput { family, .. } => *family,
        }
    }

    /// The anchor that could not be resolved, for structural failures.
    pub fn locate_error(&self) -> Option<&LocateError> {
        match self {
            GenerateError::Structural { error, .. } => Some(error),
            _ => None,
        }
    }
}

/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Template-editing primitives.
//!
//! A template is an ordered sequence of lines.  Generators resolve anchors
//! with the [`locate`] scans, splice regenerated lines in with
//! [`replace_range`] and rewrite single macros with
//! [`rewrite_directive`].  Bytes outside an edited region are never touched:
//! `TemplateDocument::parse(t).render() == t` holds for every input.
//!
//! ```text
//! template text ──parse──► lines ──locate──► (start, end) ──replace_range──► lines ──render──► output text
//!                                                                  ▲
//!                                             rendered rows ───────┘
//! ```

pub mod directive;
pub mod locate;

pub use directive::{has_directive, rewrite_directive, try_rewrite_directive};
pub use locate::{Anchor, BraceBlock, LocateError};

// ── TemplateDocument ──────────────────────────────────────────────────────────

/// Line-indexed view of a template.
///
/// Each line keeps its own terminator (`\n` or `\r\n`); the last line has
/// none if the file did not end with a newline.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TemplateDocument {
    lines: Vec<String>,
}

impl TemplateDocument {
    pub fn parse(text: &str) -> Self {
        Self {
            lines: text.split_inclusive('\n').map(str::to_owned).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// In-place form of [`replace_range`].
    pub fn replace_range(&mut self, start: usize, end: usize, new_lines: Vec<String>) {
        let (start, end) = clamp_range(self.lines.len(), start, end);
        self.lines.splice(start..end, new_lines);
    }

    /// Insert `new_lines` before line `at` without removing anything.
    pub fn insert_lines(&mut self, at: usize, new_lines: Vec<String>) {
        self.replace_range(at, at, new_lines);
    }

    /// Concatenate the lines back into document text.
    pub fn render(&self) -> String {
        self.lines.concat()
    }
}

// ── Block Rewriter ────────────────────────────────────────────────────────────

fn clamp_range(len: usize, start: usize, end: usize) -> (usize, usize) {
    debug_assert!(start <= end, "replace_range: start {} > end {}", start, end);
    let end = end.min(len);
    (start.min(end), end)
}

/// `lines[..start] + new_lines + lines[end..]`.
///
/// `end` is exclusive: the line at `end` (typically a `};` or the next
/// banner) survives.  Out-of-range bounds are clamped to the document.  The
/// new lines are spliced verbatim; nothing checks that they are valid C.
pub fn replace_range(
    lines: &[String],
    start: usize,
    end: usize,
    new_lines: Vec<String>,
) -> Vec<String> {
    let (start, end) = clamp_range(lines.len(), start, end);
    let mut out = Vec::with_capacity(lines.len() - (end - start) + new_lines.len());
    out.extend_from_slice(&lines[..start]);
    out.extend(new_lines);
    out.extend_from_slice(&lines[end..]);
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────

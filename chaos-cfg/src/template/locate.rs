/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Marker Locator – line-index resolution of structural anchors.
//!
//! Every function here is a single forward scan over the line sequence and
//! the **first** match wins.  A template that repeats a marker, or that holds
//! a stray `};`-prefixed line (nested initializer, commented-out code) before
//! the intended closing line, resolves to that earlier line.  No attempt is
//! made to understand C syntax.

use std::fmt;

use thiserror::Error;

/// Prefix of the full-width section banner used by the CHAOS templates:
/// `/` followed by 72 `*`.
pub const BANNER_PREFIX: &str =
    "/************************************************************************";

// ── Anchors ───────────────────────────────────────────────────────────────────

/// The structural anchor a locator call was looking for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anchor {
    /// First line containing the literal (section comment, declaration).
    Marker(String),

    /// First line containing *every* listed literal, e.g. `TbcType` and
    /// `Tasks`.
    Declaration(Vec<String>),

    /// First line containing `{`.
    BraceOpen,

    /// First line whose trimmed content starts with `};`.
    BraceClose,
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anchor::Marker(literal) => write!(f, "marker '{}'", literal),
            Anchor::Declaration(parts) => {
                let quoted: Vec<String> = parts.iter().map(|p| format!("'{}'", p)).collect();
                write!(f, "declaration containing {}", quoted.join(" and "))
            }
            Anchor::BraceOpen => write!(f, "opening '{{'"),
            Anchor::BraceClose => write!(f, "closing '}};'"),
        }
    }
}

/// An anchor could not be resolved before the end of the document.
///
/// `context` names the region the anchor belongs to (e.g. the array whose
/// braces were being resolved) so the message is actionable on its own.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{anchor} not found{}", context_suffix(.context))]
pub struct LocateError {
    pub anchor: Anchor,
    pub context: Option<String>,
}

fn context_suffix(context: &Option<String>) -> String {
    match context {
        Some(c) => format!(" for {}", c),
        None => String::new(),
    }
}

impl LocateError {
    pub fn new(anchor: Anchor) -> Self {
        Self {
            anchor,
            context: None,
        }
    }

    /// Attach the name of the region being resolved.
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

// ── Brace block ───────────────────────────────────────────────────────────────

/// Line indices of a brace-delimited initializer.
///
/// `open` is the line holding `{`, `close` the line starting with `};`.
/// The editable interior is `open + 1 .. close`; both delimiter lines are
/// kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BraceBlock {
    pub open: usize,
    pub close: usize,
}

impl BraceBlock {
    /// Half-open interior range, ready for
    /// [`replace_range`](super::replace_range).
    pub fn interior(&self) -> (usize, usize) {
        (self.open + 1, self.close)
    }
}

// ── Scans ─────────────────────────────────────────────────────────────────────

fn position_from<F>(lines: &[String], from: usize, mut pred: F) -> Option<usize>
where
    F: FnMut(&str) -> bool,
{
    lines
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, line)| pred(line))
        .map(|(i, _)| i)
}

/// Index of the first line containing `literal`.
pub fn find_marker(lines: &[String], literal: &str) -> Result<usize, LocateError> {
    find_marker_from(lines, literal, 0)
}

/// Index of the first line at or after `from` containing `literal`.
pub fn find_marker_from(
    lines: &[String],
    literal: &str,
    from: usize,
) -> Result<usize, LocateError> {
    position_from(lines, from, |line| line.contains(literal))
        .ok_or_else(|| LocateError::new(Anchor::Marker(literal.to_string())))
}

/// Index of the first line at or after `from` containing every literal in
/// `parts` (in any order).
pub fn find_declaration_from(
    lines: &[String],
    parts: &[&str],
    from: usize,
) -> Result<usize, LocateError> {
    position_from(lines, from, |line| parts.iter().all(|p| line.contains(p))).ok_or_else(|| {
        LocateError::new(Anchor::Declaration(
            parts.iter().map(|p| p.to_string()).collect(),
        ))
    })
}

/// Index of the first line at or after `from` containing `{`.
pub fn find_brace_open(lines: &[String], from: usize) -> Result<usize, LocateError> {
    position_from(lines, from, |line| line.contains('{'))
        .ok_or_else(|| LocateError::new(Anchor::BraceOpen))
}

/// Index of the first line at or after `from` whose trimmed content starts
/// with `};`.
pub fn find_brace_close(lines: &[String], from: usize) -> Result<usize, LocateError> {
    position_from(lines, from, |line| line.trim().starts_with("};"))
        .ok_or_else(|| LocateError::new(Anchor::BraceClose))
}

/// Resolve the initializer braces that follow the declaration at `decl`.
///
/// The opening brace may sit on the declaration line itself.
pub fn brace_block(lines: &[String], decl: usize) -> Result<BraceBlock, LocateError> {
    let open = find_brace_open(lines, decl)?;
    let close = find_brace_close(lines, open + 1)?;
    Ok(BraceBlock { open, close })
}

/// Index of the next full-width section banner at or after `from`.
///
/// Optional anchor: callers treat `None` as "runs to end of document".
pub fn find_banner_from(lines: &[String], from: usize) -> Option<usize> {
    position_from(lines, from, |line| line.starts_with(BANNER_PREFIX))
}

/// Index of the first line at or after `from` that closes a block comment.
pub fn find_comment_close_from(lines: &[String], from: usize) -> Option<usize> {
    position_from(lines, from, |line| line.contains("*/"))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

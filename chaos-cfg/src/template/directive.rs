/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Directive Rewriter – replaces the value of a `#define NAME value` line.
//!
//! Only the value tail changes: the leading indentation, `#define`, the macro
//! name and the whitespace after it are captured and written back verbatim.
//! Anything after the old value on the same line (including a trailing
//! comment) is dropped with it.  Line terminators, `\r\n` included, survive.

use std::borrow::Cow;

use regex::{Captures, Regex};

/// Build the per-name matcher.
///
/// `[ \t]` rather than `\s` keeps every match on a single line, so a bare
/// `#define NAME` followed by a newline never swallows the next line.
fn directive_regex(name: &str) -> Regex {
    let pattern = format!(
        r"(?mR)^([ \t]*#define[ \t]+{}[ \t]+).*$",
        regex::escape(name)
    );
    Regex::new(&pattern).expect("escaped directive pattern is always valid")
}

/// Rewrite every `#define <name> ...` line in `text` so its value becomes
/// `new_value`.
///
/// A missing directive is a silent no-op: the input comes back unchanged.
/// Use [`try_rewrite_directive`] when the caller needs to know.
pub fn rewrite_directive(text: &str, name: &str, new_value: &str) -> String {
    try_rewrite_directive(text, name, new_value).unwrap_or_else(|| text.to_string())
}

/// [`rewrite_directive`] that returns `None` when `text` holds no
/// `#define <name> <value>` line.
///
/// A directive that already carries `new_value` still counts as present.
pub fn try_rewrite_directive(text: &str, name: &str, new_value: &str) -> Option<String> {
    match directive_regex(name)
        .replace_all(text, |caps: &Captures| format!("{}{}", &caps[1], new_value))
    {
        Cow::Borrowed(_) => None,
        Cow::Owned(out) => Some(out),
    }
}

/// `true` if `text` holds at least one `#define <name> <value>` line.
pub fn has_directive(text: &str, name: &str) -> bool {
    directive_regex(name).is_match(text)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

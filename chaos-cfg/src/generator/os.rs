/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! OS generator – scheduler parameters and hook switches in `os_cfg.h`.
//!
//! Header only; there is no OS source document.

use tracing::info;

use super::{read_template, set_directive, write_output, ArtifactFamily, DocumentPaths, GenerateError};
use crate::record::{OsConfig, RawRecord};

const FAMILY: ArtifactFamily = ArtifactFamily::Os;

const TRUE_TOKEN: &str = "STD_TRUE";
const FALSE_TOKEN: &str = "STD_FALSE";

fn hook_token(enabled: bool) -> &'static str {
    if enabled {
        TRUE_TOKEN
    } else {
        FALSE_TOKEN
    }
}

/// Rewrite the eight OS directives in `template`.
///
/// Directives missing from the template are left out silently (with a
/// warning in the log); the rest of the text is returned byte-for-byte.
pub fn render_header(template: &str, cfg: &OsConfig) -> String {
    let numeric = [
        (
            "SCHED_TIMER_FREQ_HZ",
            format!("((uint16_t)({}))", cfg.scheduler_freq_hz),
        ),
        (
            "DESIRED_SCHED_PERIOD_MS",
            format!("((uint16_t)({}))", cfg.tick_ms),
        ),
        ("MAX_READY_TASKS", format!("{}u", cfg.ready_queue_len)),
    ];
    let hooks = [
        ("ENABLE_STARTUP_HOOK", cfg.hooks.startup),
        ("ENABLE_SHUTDOWN_HOOK", cfg.hooks.shutdown),
        ("ENABLE_PRE_TASK_HOOK", cfg.hooks.pre_task),
        ("ENABLE_POST_TASK_HOOK", cfg.hooks.post_task),
        ("ENABLE_ERROR_HOOK", cfg.hooks.error),
    ];

    let text = numeric
        .iter()
        .fold(template.to_string(), |text, (name, value)| {
            set_directive(&text, name, value)
        });
    hooks.iter().fold(text, |text, &(name, enabled)| {
        set_directive(&text, name, hook_token(enabled))
    })
}

/// Generate `os_cfg.h` from the raw OS record.
pub fn generate_os_cfg(header: &DocumentPaths, os: &RawRecord) -> Result<(), GenerateError> {
    let cfg = OsConfig::from_raw(os);
    info!(
        freq_hz = cfg.scheduler_freq_hz,
        tick_ms = cfg.tick_ms,
        ready_queue = cfg.ready_queue_len,
        "OS configuration"
    );

    let template = read_template(FAMILY, &header.template)?;
    let text = render_header(&template, &cfg);
    write_output(FAMILY, &header.output, &text)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

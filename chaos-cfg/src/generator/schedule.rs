/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Schedule table generator – `os_sched_tbl_cfg.h` / `os_sched_tbl_cfg.c`.

use tracing::{debug, info};

use super::{
    read_template, set_directive, structural, write_output, ArtifactFamily, DocumentPaths,
    GenerateError,
};
use crate::record::{normalize_schedule, RawRecord, ScheduleEntry};
use crate::template::locate::{brace_block, find_marker};
use crate::template::{LocateError, TemplateDocument};

const FAMILY: ArtifactFamily = ArtifactFamily::Schedule;

pub const EVENT_COUNT_DIRECTIVE: &str = "SCHED_EVT_NUMBER";
pub const SCHED_TABLE_DECL: &str = "SchedTblType SchedTable";

fn table_body(entries: &[ScheduleEntry]) -> Vec<String> {
    let mut body = vec![
        "  /* ------------------------------------------------ */\n".to_string(),
        "  /* TaskID          Counter          Timeout  */\n".to_string(),
        "  /* ------------------------------------------------ */   \n".to_string(),
        "  /* ----------------- Sched. Table ----------------- */   \n".to_string(),
    ];
    body.extend(
        entries
            .iter()
            .map(|e| format!("  {{{},     COUNTER_INIT,    {}}}, \n", e.task_id, e.period_ms)),
    );
    body.push("  /* ------------------------------------------------ */\n".to_string());
    body
}

/// Set `SCHED_EVT_NUMBER` to the number of entries.
pub fn render_header(template: &str, entries: &[ScheduleEntry]) -> String {
    set_directive(template, EVENT_COUNT_DIRECTIVE, &format!("{}u", entries.len()))
}

/// Rewrite the interior of the `SchedTable[]` initializer.
pub fn render_source(template: &str, entries: &[ScheduleEntry]) -> Result<String, LocateError> {
    let mut doc = TemplateDocument::parse(template);
    let lines = doc.lines();

    let decl = find_marker(lines, SCHED_TABLE_DECL)?;
    let block = brace_block(lines, decl).map_err(|e| e.context("SchedTblType SchedTable[]"))?;
    debug!(decl, open = block.open, close = block.close, "SchedTable[] located");

    let (start, end) = block.interior();
    doc.replace_range(start, end, table_body(entries));
    Ok(doc.render())
}

/// Generate the schedule table header and source from raw entries.
pub fn generate_sched_tbl_cfg(
    header: &DocumentPaths,
    source: &DocumentPaths,
    entries: &[RawRecord],
) -> Result<(), GenerateError> {
    let entries = normalize_schedule(entries);
    info!(event_count = entries.len(), "schedule table");

    let h_template = read_template(FAMILY, &header.template)?;
    write_output(FAMILY, &header.output, &render_header(&h_template, &entries))?;

    let c_template = read_template(FAMILY, &source.template)?;
    let c_text =
        render_source(&c_template, &entries).map_err(structural(FAMILY, &source.template))?;
    write_output(FAMILY, &source.output, &c_text)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::Anchor;

    const SOURCE: &str = "\
#include \"os_sched_tbl_cfg.h\"

SchedTblType SchedTable[SCHED_EVT_NUMBER] =
{
  {0,     COUNTER_INIT,    10},
};
";

    fn entries() -> Vec<ScheduleEntry> {
        vec![
            ScheduleEntry { task_id: 1, period_ms: 100 },
            ScheduleEntry { task_id: 2, period_ms: 250 },
        ]
    }

    #[test]
    fn header_counts_entries() {
        let out = render_header("#define SCHED_EVT_NUMBER    1u\n", &entries());
        assert_eq!(out, "#define SCHED_EVT_NUMBER    2u\n");
    }

    #[test]
    fn source_body_is_regenerated() {
        let out = render_source(SOURCE, &entries()).unwrap();
        assert_eq!(
            out,
            concat!(
                "#include \"os_sched_tbl_cfg.h\"\n",
                "\n",
                "SchedTblType SchedTable[SCHED_EVT_NUMBER] =\n",
                "{\n",
                "  /* ------------------------------------------------ */\n",
                "  /* TaskID          Counter          Timeout  */\n",
                "  /* ------------------------------------------------ */   \n",
                "  /* ----------------- Sched. Table ----------------- */   \n",
                "  {1,     COUNTER_INIT,    100}, \n",
                "  {2,     COUNTER_INIT,    250}, \n",
                "  /* ------------------------------------------------ */\n",
                "};\n",
            )
        );
    }

    #[test]
    fn rows_can_be_read_back_by_position() {
        let out = render_source(SOURCE, &entries()).unwrap();
        let parsed: Vec<(i64, i64)> = out
            .lines()
            .filter(|l| l.contains("COUNTER_INIT"))
            .map(|l| {
                let fields: Vec<&str> = l
                    .trim()
                    .trim_start_matches('{')
                    .trim_end_matches(',')
                    .trim_end_matches('}')
                    .split(',')
                    .map(str::trim)
                    .collect();
                (fields[0].parse().unwrap(), fields[2].parse().unwrap())
            })
            .collect();
        assert_eq!(parsed, vec![(1, 100), (2, 250)]);
    }

    #[test]
    fn missing_declaration_is_structural() {
        let err = render_source("int x;\n", &entries()).unwrap_err();
        assert_eq!(err.anchor, Anchor::Marker(SCHED_TABLE_DECL.into()));
    }

    #[test]
    fn declaration_without_opening_brace_is_structural() {
        let err = render_source("SchedTblType SchedTable[2] =\n", &entries()).unwrap_err();
        assert_eq!(err.anchor, Anchor::BraceOpen);
        assert_eq!(
            err.to_string(),
            "opening '{' not found for SchedTblType SchedTable[]"
        );
    }

    #[test]
    fn unterminated_table_reports_closing_brace() {
        let err = render_source("SchedTblType SchedTable[2] =\n{\n", &entries()).unwrap_err();
        assert_eq!(err.anchor, Anchor::BraceClose);
        assert!(err.to_string().contains("SchedTblType SchedTable[]"));
    }
}

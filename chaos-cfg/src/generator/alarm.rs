/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Alarm generator – `os_alarms_cfg.h` / `os_alarms_cfg.c`.
//!
//! The source carries two regions:
//!
//! ```text
//! /* Alarm structure initialization */   ◄─┐
//! AlarmType Alarm_ID_0 = { ... };           │ struct region, rewritten whole
//! ...                                       │
//! AlarmListType AlarmList[ALARMS_NUMB] = ◄─┘ (kept)
//! {
//!   { 0, ALARM_ACTIVE, &Alarm_ID_0 },       ◄─ list interior, rewritten
//! };
//! ```
//!
//! The struct region is spliced first; the list declaration is then located
//! again in the edited document.

use tracing::{debug, info};

use super::{
    read_template, set_directive, structural, write_output, ArtifactFamily, DocumentPaths,
    GenerateError,
};
use crate::record::{normalize_alarms, AlarmRecord, RawRecord};
use crate::template::locate::{brace_block, find_marker, find_marker_from};
use crate::template::{LocateError, TemplateDocument};

const FAMILY: ArtifactFamily = ArtifactFamily::Alarm;

pub const ALARM_COUNT_DIRECTIVE: &str = "ALARMS_NUMB";
pub const ALARM_STRUCT_BANNER: &str = "Alarm structure initialization";
pub const ALARM_LIST_DECL: &str = "AlarmListType AlarmList";

const RULE: &str =
    "  /* ----------------------------------------------------------------------------------------- */";

/// One `AlarmType Alarm_ID_<id> = {...};` block, blank line included.
fn struct_block(alarm: &AlarmRecord) -> Vec<String> {
    vec![
        "/* Alarm structure initialization */\n".to_string(),
        format!("AlarmType {} =\n", alarm.symbol()),
        "\n".to_string(),
        "  /* --------------------------------------- Alarm ------------------------------------------- */     \n"
            .to_string(),
        format!("{}\n", RULE),
        "  /* Action          Counter          Timeout           Type          TaskID          Callback */\n"
            .to_string(),
        format!("{}   \n", RULE),
        format!(
            "  {{{},   COUNTER_INIT,    {},           {},          {},          {}}};   \n",
            alarm.action().as_c_token(),
            alarm.period_ms,
            alarm.alarm_type.as_c_token(),
            alarm.task_id_expr(),
            alarm.callback_expr(),
        ),
        format!("{}\n", RULE),
        "\n".to_string(),
    ]
}

fn list_body(alarms: &[AlarmRecord]) -> Vec<String> {
    let mut body = vec![
        "  /* ---------------- Alarm List --------------- */   \n".to_string(),
        "  /* ------------------------------------------- */\n".to_string(),
        "  /* AlarmID         AlarmState         AlarmPtr */\n".to_string(),
        "  /* ------------------------------------------- */     \n".to_string(),
    ];
    body.extend(alarms.iter().map(|a| {
        format!(
            "  {{{},         ALARM_ACTIVE,      &{}}},\n",
            a.id,
            a.symbol()
        )
    }));
    body.push("  /* ------------------------------------------- */\n".to_string());
    body
}

/// Set `ALARMS_NUMB` to the number of alarms.
pub fn render_header(template: &str, alarms: &[AlarmRecord]) -> String {
    set_directive(template, ALARM_COUNT_DIRECTIVE, &format!("{}u", alarms.len()))
}

/// Rewrite the alarm struct region and the `AlarmList[]` interior.
pub fn render_source(template: &str, alarms: &[AlarmRecord]) -> Result<String, LocateError> {
    let mut doc = TemplateDocument::parse(template);
    let lines = doc.lines();

    let start = find_marker(lines, ALARM_STRUCT_BANNER)?;
    let decl = find_marker_from(lines, ALARM_LIST_DECL, start)?;
    debug!(start, decl, "alarm struct region located");

    let structs: Vec<String> = alarms.iter().flat_map(struct_block).collect();
    let inserted = structs.len();
    doc.replace_range(start, decl, structs);

    let lines = doc.lines();
    let decl = find_marker_from(lines, ALARM_LIST_DECL, start + inserted)?;
    let block = brace_block(lines, decl).map_err(|e| e.context("AlarmListType AlarmList[]"))?;
    debug!(decl, open = block.open, close = block.close, "AlarmList[] located");

    let (from, to) = block.interior();
    doc.replace_range(from, to, list_body(alarms));
    Ok(doc.render())
}

/// Generate the alarm header and source from raw alarm rows.
pub fn generate_alarms_cfg(
    header: &DocumentPaths,
    source: &DocumentPaths,
    alarms: &[RawRecord],
) -> Result<(), GenerateError> {
    let alarms = normalize_alarms(alarms);
    info!(alarm_count = alarms.len(), "alarm table");

    let h_template = read_template(FAMILY, &header.template)?;
    write_output(FAMILY, &header.output, &render_header(&h_template, &alarms))?;

    let c_template = read_template(FAMILY, &source.template)?;
    let c_text =
        render_source(&c_template, &alarms).map_err(structural(FAMILY, &source.template))?;
    write_output(FAMILY, &source.output, &c_text)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{AlarmTarget, AlarmType};
    use crate::template::Anchor;

    const SOURCE: &str = "\
#include \"os_alarms_cfg.h\"

/* Alarm structure initialization */
AlarmType MyAlarm =
  {ACTIVATE_TASK,   COUNTER_INIT,    10,           ONE_SHOT,          0,          NULL};

AlarmListType AlarmList[ALARMS_NUMB] =
{
  {0,         ALARM_ACTIVE,      &MyAlarm},
};

/* end */
";

    fn alarms() -> Vec<AlarmRecord> {
        vec![
            AlarmRecord {
                id: 0,
                alarm_type: AlarmType::OneShot,
                period_ms: 100,
                target: AlarmTarget::ActivateTask { task_id: 2 },
            },
            AlarmRecord {
                id: 1,
                alarm_type: AlarmType::Cyclic,
                period_ms: 50,
                target: AlarmTarget::TriggerCallback {
                    callback: Some("MyCb".into()),
                },
            },
        ]
    }

    fn initializer_rows(text: &str) -> Vec<String> {
        text.lines()
            .filter(|l| l.contains("COUNTER_INIT"))
            .map(|l| l.trim().to_string())
            .collect()
    }

    #[test]
    fn header_counts_alarms() {
        let out = render_header("#define ALARMS_NUMB 0u\n", &alarms());
        assert_eq!(out, "#define ALARMS_NUMB 2u\n");
    }

    #[test]
    fn struct_region_holds_one_block_per_alarm() {
        let out = render_source(SOURCE, &alarms()).unwrap();
        assert!(!out.contains("MyAlarm"));
        assert!(out.contains("AlarmType Alarm_ID_0 =\n\n"));
        assert!(out.contains("AlarmType Alarm_ID_1 =\n\n"));
        assert_eq!(
            initializer_rows(&out),
            vec![
                "{ACTIVATE_TASK,   COUNTER_INIT,    100,           ONE_SHOT,          2,          NULL};",
                "{TRIGGER_CALLBACK,   COUNTER_INIT,    50,           CYCLIC,          0,          MyCb};",
            ]
        );
    }

    #[test]
    fn alarm_list_rows_point_at_generated_structs() {
        let out = render_source(SOURCE, &alarms()).unwrap();
        assert!(out.contains("  {0,         ALARM_ACTIVE,      &Alarm_ID_0},\n"));
        assert!(out.contains("  {1,         ALARM_ACTIVE,      &Alarm_ID_1},\n"));
        assert_eq!(out.matches("ALARM_ACTIVE,").count(), 2);
    }

    #[test]
    fn surrounding_text_is_preserved() {
        let out = render_source(SOURCE, &alarms()).unwrap();
        assert!(out.starts_with("#include \"os_alarms_cfg.h\"\n\n/* Alarm structure initialization */\n"));
        assert!(out.contains("\nAlarmListType AlarmList[ALARMS_NUMB] =\n{\n"));
        assert!(out.ends_with("};\n\n/* end */\n"));
    }

    #[test]
    fn regenerating_from_generated_output_is_stable() {
        let once = render_source(SOURCE, &alarms()).unwrap();
        let twice = render_source(&once, &alarms()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn zero_alarms_empties_both_regions() {
        let out = render_source(SOURCE, &[]).unwrap();
        assert!(!out.contains("AlarmType "));
        assert!(!out.contains("ALARM_ACTIVE"));
        assert!(out.contains("\n\nAlarmListType AlarmList[ALARMS_NUMB] =\n"));
    }

    #[test]
    fn missing_banner_is_structural() {
        let template = SOURCE.replace("Alarm structure initialization", "Alarms");
        let err = render_source(&template, &alarms()).unwrap_err();
        assert_eq!(err.anchor, Anchor::Marker(ALARM_STRUCT_BANNER.into()));
    }

    #[test]
    fn list_declaration_before_banner_is_not_accepted() {
        let template = "AlarmListType AlarmList[1] =\n{\n};\n/* Alarm structure initialization */\n";
        let err = render_source(template, &alarms()).unwrap_err();
        assert_eq!(err.anchor, Anchor::Marker(ALARM_LIST_DECL.into()));
    }
}

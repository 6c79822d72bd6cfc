/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Task generator – `os_task_cfg.h` / `os_task_cfg.c`.
//!
//! Header: one `#define <Task>_ID <id>u` per task, in the `Task IDs` block of
//! the `EXPORTED Defines` section.  The block runs from the `Task IDs`
//! caption to the next section banner (or end of file).
//!
//! Source, two regions:
//! 1. the `extern void <Task> (void);` declarations between the `TASK List`
//!    banner and the next banner (optional region);
//! 2. the interior of the `TbcType Tasks[]` initializer that follows the
//!    `GLOBAL Variables` banner (required).
//!
//! Rows keep input order.  Unnamed tasks were already dropped by the
//! normalizer, so they appear in neither document.

use tracing::{debug, info, warn};

use super::{read_template, structural, write_output, ArtifactFamily, DocumentPaths, GenerateError};
use crate::record::{normalize_tasks, RawRecord, TaskRecord};
use crate::template::locate::{
    brace_block, find_banner_from, find_comment_close_from, find_declaration_from, find_marker,
    find_marker_from,
};
use crate::template::{LocateError, TemplateDocument};

const FAMILY: ArtifactFamily = ArtifactFamily::Task;

pub const EXPORTED_DEFINES: &str = "EXPORTED Defines";
pub const TASK_IDS: &str = "Task IDs";
pub const TASK_LIST: &str = "TASK List";
pub const GLOBAL_VARIABLES: &str = "GLOBAL Variables";
/// Both literals must appear on the task table declaration line.
pub const TASK_TABLE_DECL: [&str; 2] = ["TbcType", "Tasks"];

const TASK_IDS_CAPTION: &str = "/* Task IDs */\n";

// ── Row rendering ─────────────────────────────────────────────────────────────

fn id_define(task: &TaskRecord) -> String {
    // 46-space gap keeps the ids in the column used by the reference header.
    format!("#define {}_ID{:46}{}u\n", task.name, "", task.id)
}

fn extern_lines(tasks: &[TaskRecord]) -> Vec<String> {
    let mut lines: Vec<String> = tasks
        .iter()
        .map(|t| format!("extern void {} (void);\n", t.name))
        .collect();
    lines.push("\n".to_string());
    lines
}

fn task_table_body(tasks: &[TaskRecord]) -> Vec<String> {
    let mut body = vec![
        "  /* -------------------------------------------------------------------- */\n".to_string(),
        "  /* ID                    Task              State           Priority     */\n".to_string(),
        "  /* -------------------------------------------------------------------- */   \n".to_string(),
        "  /* --------------------------------- Tasks ---------------------------- */   \n".to_string(),
    ];
    body.extend(tasks.iter().map(|t| {
        format!(
            "  {{{name}_ID,           {name},         IDLE,           {prio}}},\n",
            name = t.name,
            prio = t.priority
        )
    }));
    body.push(
        "  /* -------------------------------------------------------------------- */\n".to_string(),
    );
    body
}

/// `line` with a `\n` terminator, added if the line had none (last line of a
/// file without a final newline).
fn terminated(line: &str) -> String {
    if line.ends_with('\n') {
        line.to_string()
    } else {
        format!("{}\n", line)
    }
}

// ── Header ────────────────────────────────────────────────────────────────────

/// Rewrite the `Task IDs` define block.
///
/// If the template has no `Task IDs` caption, a captioned block is inserted
/// right after the comment that holds the `EXPORTED Defines` banner.  This
/// fallback applies to this one marker only; a missing `EXPORTED Defines` is
/// a structural error.
pub fn render_header(template: &str, tasks: &[TaskRecord]) -> Result<String, LocateError> {
    let mut doc = TemplateDocument::parse(template);
    let lines = doc.lines();

    let exported = find_marker(lines, EXPORTED_DEFINES)?;

    match find_marker_from(lines, TASK_IDS, exported + 1) {
        Ok(caption) => {
            let end = find_banner_from(lines, caption + 1).unwrap_or(lines.len());
            debug!(caption, end, "Task IDs block located");

            let mut block = vec![terminated(&lines[caption])];
            block.extend(tasks.iter().map(id_define));
            doc.replace_range(caption, end, block);
        }
        Err(_) => {
            let anchor = find_comment_close_from(lines, exported).unwrap_or(exported);
            warn!(line = anchor + 1, "no 'Task IDs' block in header template, inserting one");

            // The anchor line is rewritten only to end it with a newline.
            let mut block = vec![terminated(&lines[anchor]), TASK_IDS_CAPTION.to_string()];
            block.extend(tasks.iter().map(id_define));
            doc.replace_range(anchor, anchor + 1, block);
        }
    }

    Ok(doc.render())
}

// ── Source ────────────────────────────────────────────────────────────────────

/// Lines `[start, end)` holding the extern declarations, if the template has a
/// `TASK List` banner followed by another banner.
fn extern_block(lines: &[String]) -> Option<(usize, usize)> {
    let caption = find_marker(lines, TASK_LIST).ok()?;
    let start = find_comment_close_from(lines, caption).map_or(caption + 1, |i| i + 1);
    let end = find_banner_from(lines, start)?;
    Some((start, end))
}

/// Rewrite the extern declarations and the `Tasks[]` initializer.
pub fn render_source(template: &str, tasks: &[TaskRecord]) -> Result<String, LocateError> {
    let mut doc = TemplateDocument::parse(template);

    match extern_block(doc.lines()) {
        Some((start, end)) => {
            debug!(start, end, "TASK List block located");
            doc.replace_range(start, end, extern_lines(tasks));
        }
        None => warn!("no 'TASK List' block in source template, extern declarations left as-is"),
    }

    let lines = doc.lines();
    let globals = find_marker(lines, GLOBAL_VARIABLES)?;
    let decl = find_declaration_from(lines, &TASK_TABLE_DECL, globals)
        .map_err(|e| e.context(format!("task table after '{}'", GLOBAL_VARIABLES)))?;
    let block = brace_block(lines, decl).map_err(|e| e.context("TbcType Tasks[]"))?;
    debug!(decl, open = block.open, close = block.close, "Tasks[] located");

    let (start, end) = block.interior();
    doc.replace_range(start, end, task_table_body(tasks));

    Ok(doc.render())
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Generate `os_task_cfg.h` and `os_task_cfg.c` from raw task rows.
///
/// The header is written before the source template is examined; a
/// structural failure in the source leaves the written header in place.
pub fn generate_task_cfg(
    header: &DocumentPaths,
    source: &DocumentPaths,
    tasks: &[RawRecord],
) -> Result<(), GenerateError> {
    let tasks = normalize_tasks(tasks);
    info!(task_count = tasks.len(), "task table");

    let h_template = read_template(FAMILY, &header.template)?;
    let h_text = render_header(&h_template, &tasks).map_err(structural(FAMILY, &header.template))?;
    write_output(FAMILY, &header.output, &h_text)?;

    let c_template = read_template(FAMILY, &source.template)?;
    let c_text = render_source(&c_template, &tasks).map_err(structural(FAMILY, &source.template))?;
    write_output(FAMILY, &source.output, &c_text)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::Anchor;

    const HEADER: &str = "\
#ifndef OS_TASK_CFG_H
#define OS_TASK_CFG_H

/************************************************************************
* EXPORTED Defines
************************************************************************/
/* Task IDs */
#define Old_Task_ID                                              0u

/************************************************************************
* EXPORTED Typedefs
************************************************************************/

#endif
";

    const SOURCE: &str = "\
#include \"os_task_cfg.h\"

/************************************************************************
* TASK List
************************************************************************/
extern void Old_Task (void);

/************************************************************************
* GLOBAL Variables
************************************************************************/
TbcType Tasks [] =
{
  {Old_Task_ID,           Old_Task,         IDLE,           1},
};

/* Auto-calculation of task number */
const uint16_t TaskNumber = (uint16_t)(sizeof(Tasks)/sizeof(TbcType));
";

    fn task(id: i64, name: &str, priority: i64) -> TaskRecord {
        TaskRecord {
            id,
            name: name.to_string(),
            priority,
        }
    }

    fn two_tasks() -> Vec<TaskRecord> {
        vec![task(0, "Led_Task", 1), task(1, "Comm_Task", 3)]
    }

    // ── header ────────────────────────────────────────────────────────────────

    #[test]
    fn header_block_is_replaced_up_to_next_banner() {
        let out = render_header(HEADER, &two_tasks()).unwrap();
        let expected = HEADER.replace(
            "#define Old_Task_ID                                              0u\n\n",
            "#define Led_Task_ID                                              0u\n\
             #define Comm_Task_ID                                              1u\n",
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn header_without_task_ids_inserts_captioned_block_after_banner() {
        let template = "\
/************************************************************************
* EXPORTED Defines
************************************************************************/
#define KEEP_ME 1u
";
        let out = render_header(template, &[task(4, "T", 1)]).unwrap();
        assert_eq!(
            out,
            "\
/************************************************************************
* EXPORTED Defines
************************************************************************/
/* Task IDs */
#define T_ID                                              4u
#define KEEP_ME 1u
"
        );
    }

    #[test]
    fn header_without_exported_defines_fails() {
        let err = render_header("/* Task IDs */\n", &two_tasks()).unwrap_err();
        assert_eq!(err.anchor, Anchor::Marker(EXPORTED_DEFINES.into()));
    }

    #[test]
    fn header_block_at_end_of_file_runs_to_eof() {
        let template = "* EXPORTED Defines\n/* Task IDs */\n#define A_ID 0u\n#define B_ID 1u\n";
        let out = render_header(template, &[task(9, "Z", 1)]).unwrap();
        assert_eq!(
            out,
            "* EXPORTED Defines\n/* Task IDs */\n#define Z_ID                                              9u\n"
        );
    }

    #[test]
    fn unterminated_caption_on_last_line_gets_a_newline() {
        let out = render_header("* EXPORTED Defines\n/* Task IDs */", &[task(1, "A", 1)]).unwrap();
        assert_eq!(
            out,
            "* EXPORTED Defines\n/* Task IDs */\n#define A_ID                                              1u\n"
        );
    }

    #[test]
    fn inserted_block_after_unterminated_comment_close_starts_on_new_line() {
        let template = "/****\n* EXPORTED Defines\n****/";
        let out = render_header(template, &[task(1, "A", 1)]).unwrap();
        assert_eq!(
            out,
            "/****\n* EXPORTED Defines\n****/\n/* Task IDs */\n#define A_ID                                              1u\n"
        );
    }

    // ── source ────────────────────────────────────────────────────────────────

    #[test]
    fn source_rewrites_externs_and_table() {
        let out = render_source(SOURCE, &two_tasks()).unwrap();
        assert!(out.contains(
            "************************************************************************/\n\
             extern void Led_Task (void);\n\
             extern void Comm_Task (void);\n\
             \n\
             /************************************************************************\n\
             * GLOBAL Variables\n"
        ));
        assert!(!out.contains("Old_Task"));
        assert!(out.contains("  {Led_Task_ID,           Led_Task,         IDLE,           1},\n"));
        assert!(out.contains("  {Comm_Task_ID,           Comm_Task,         IDLE,           3},\n"));
        assert!(out.ends_with(
            "  /* -------------------------------------------------------------------- */\n\
             };\n\
             \n\
             /* Auto-calculation of task number */\n\
             const uint16_t TaskNumber = (uint16_t)(sizeof(Tasks)/sizeof(TbcType));\n"
        ));
    }

    #[test]
    fn table_rows_follow_input_order() {
        let tasks = vec![task(2, "B", 5), task(0, "A", 7), task(1, "C", 6)];
        let out = render_source(SOURCE, &tasks).unwrap();
        let rows: Vec<&str> = out.lines().filter(|l| l.contains("IDLE")).collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].starts_with("  {B_ID,"));
        assert!(rows[1].starts_with("  {A_ID,"));
        assert!(rows[2].starts_with("  {C_ID,"));
    }

    #[test]
    fn missing_task_list_keeps_existing_externs() {
        let template = SOURCE.replace("* TASK List", "* Something Else");
        let out = render_source(&template, &two_tasks()).unwrap();
        assert!(out.contains("extern void Old_Task (void);\n"));
        assert!(out.contains("  {Led_Task_ID,"));
    }

    #[test]
    fn missing_global_variables_is_structural() {
        let template = SOURCE.replace("GLOBAL Variables", "GLOBALS");
        let err = render_source(&template, &two_tasks()).unwrap_err();
        assert_eq!(err.anchor, Anchor::Marker(GLOBAL_VARIABLES.into()));
    }

    #[test]
    fn missing_task_table_declaration_is_structural() {
        // TaskNumber also mentions both literals; rename it too or it would
        // be taken as the declaration.
        let template = SOURCE
            .replace("TbcType Tasks [] =", "TbcType Jobs [] =")
            .replace("sizeof(Tasks)", "sizeof(Jobs)");
        let err = render_source(&template, &two_tasks()).unwrap_err();
        assert!(matches!(err.anchor, Anchor::Declaration(_)));
        assert!(err.to_string().contains("'TbcType' and 'Tasks'"));
    }

    #[test]
    fn empty_task_set_leaves_captions_only() {
        let out = render_source(SOURCE, &[]).unwrap();
        assert!(!out.contains("IDLE"));
        assert!(out.contains("* TASK List\n************************************************************************/\n\n/****"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let a = render_source(SOURCE, &two_tasks()).unwrap();
        let b = render_source(SOURCE, &two_tasks()).unwrap();
        assert_eq!(a, b);
    }
}

/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Canonical configuration records and the Record Normalizer.
//!
//! The record collection layer hands over loosely-typed flat maps (values may
//! be strings, numbers, booleans or null).  Each artifact family has a
//! canonical record type built from such a map by a `from_raw` constructor:
//!
//! ```text
//! RawRecord ──from_raw──► OsConfig | TaskRecord | ScheduleEntry | AlarmRecord ──► generators
//!  (untyped)                 (typed, every field filled)
//! ```
//!
//! # Leniency
//! Normalization never fails.  A field that cannot be read as the expected
//! type takes the documented fallback value instead; the fallbacks are part
//! of the generated output contract, not validation errors.  The one
//! exception to "one input, one record" is a task with a blank name, which is
//! dropped from the set altogether.
//!
//! Uniqueness of task ids, task names or alarm ids is **not** checked here or
//! anywhere downstream; that belongs to whoever collects the records.

use serde_json::{Map, Value};
use tracing::debug;

/// One input record: field name → loosely-typed value.
pub type RawRecord = Map<String, Value>;

// ── Fallback values ───────────────────────────────────────────────────────────

pub const DEFAULT_SCHEDULER_FREQ_HZ: i64 = 1000;
pub const DEFAULT_TICK_MS: i64 = 1;
pub const DEFAULT_READY_QUEUE_LEN: i64 = 100;
pub const DEFAULT_TASK_PRIORITY: i64 = 1;
/// Fallback for ids, task references and periods.
pub const DEFAULT_ID: i64 = 0;

// ── Coercion helpers ──────────────────────────────────────────────────────────

/// Read an integer from a JSON value.
///
/// Strings are trimmed and parsed as decimal; floats truncate toward zero.
/// Returns `None` for anything that is not a usable integer.
fn coerce_int(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn int_or(raw: &RawRecord, key: &str, default: i64) -> i64 {
    coerce_int(raw.get(key)).unwrap_or(default)
}

/// Read a trimmed, non-empty string.  Numbers are rendered in decimal.
fn coerce_text(value: Option<&Value>) -> Option<String> {
    let text = match value? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Read a flag.  Unrecognised values are `false`.
fn coerce_bool(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Some(Value::String(s)) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes" | "on"
        ),
        _ => false,
    }
}

// ── OS configuration ──────────────────────────────────────────────────────────

/// Enable flags for the five OS hook callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OsHooks {
    pub startup: bool,
    pub shutdown: bool,
    pub pre_task: bool,
    pub post_task: bool,
    pub error: bool,
}

impl OsHooks {
    pub fn from_raw(raw: &RawRecord) -> Self {
        Self {
            startup: coerce_bool(raw.get("startup")),
            shutdown: coerce_bool(raw.get("shutdown")),
            pre_task: coerce_bool(raw.get("pre_task")),
            post_task: coerce_bool(raw.get("post_task")),
            error: coerce_bool(raw.get("error")),
        }
    }

    /// Human-readable names of the enabled hooks, in declaration order.
    pub fn enabled_names(&self) -> Vec<&'static str> {
        [
            (self.startup, "Startup Hook"),
            (self.shutdown, "Shutdown Hook"),
            (self.pre_task, "Pre-task Hook"),
            (self.post_task, "Post-task Hook"),
            (self.error, "Error Hook"),
        ]
        .into_iter()
        .filter_map(|(on, name)| on.then_some(name))
        .collect()
    }
}

/// Scheduler parameters written into `os_cfg.h`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OsConfig {
    pub scheduler_freq_hz: i64,
    pub tick_ms: i64,
    pub ready_queue_len: i64,
    pub hooks: OsHooks,
}

impl Default for OsConfig {
    fn default() -> Self {
        Self {
            scheduler_freq_hz: DEFAULT_SCHEDULER_FREQ_HZ,
            tick_ms: DEFAULT_TICK_MS,
            ready_queue_len: DEFAULT_READY_QUEUE_LEN,
            hooks: OsHooks::default(),
        }
    }
}

impl OsConfig {
    /// Keys: `scheduler_freq`, `tick_ms`, `ready_queue` and a nested `hooks`
    /// map.  Absent, empty or unparsable numbers take the defaults.
    pub fn from_raw(raw: &RawRecord) -> Self {
        let hooks = raw
            .get("hooks")
            .and_then(Value::as_object)
            .map(OsHooks::from_raw)
            .unwrap_or_default();

        Self {
            scheduler_freq_hz: int_or(raw, "scheduler_freq", DEFAULT_SCHEDULER_FREQ_HZ),
            tick_ms: int_or(raw, "tick_ms", DEFAULT_TICK_MS),
            ready_queue_len: int_or(raw, "ready_queue", DEFAULT_READY_QUEUE_LEN),
            hooks,
        }
    }
}

// ── Tasks ─────────────────────────────────────────────────────────────────────

/// One row of the task table.  `name` is always non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    pub id: i64,
    pub name: String,
    pub priority: i64,
}

impl TaskRecord {
    /// Keys: `id`, `name`, `priority`.
    ///
    /// Returns `None` when the name is absent or blank; such rows are not
    /// tasks.
    pub fn from_raw(raw: &RawRecord) -> Option<Self> {
        let name = coerce_text(raw.get("name"))?;
        Some(Self {
            id: int_or(raw, "id", DEFAULT_ID),
            name,
            priority: int_or(raw, "priority", DEFAULT_TASK_PRIORITY),
        })
    }
}

/// Normalize a task table, dropping unnamed rows.  Input order is kept.
pub fn normalize_tasks(raw: &[RawRecord]) -> Vec<TaskRecord> {
    raw.iter()
        .enumerate()
        .filter_map(|(row, r)| {
            let task = TaskRecord::from_raw(r);
            if task.is_none() {
                debug!(row, "task row without a name dropped");
            }
            task
        })
        .collect()
}

// ── Schedule table ────────────────────────────────────────────────────────────

/// One schedule table event: activate `task_id` every `period_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub task_id: i64,
    pub period_ms: i64,
}

impl ScheduleEntry {
    /// Keys: `task_id`, `period_ms`.  Other keys (e.g. `task_name`) are
    /// ignored.
    pub fn from_raw(raw: &RawRecord) -> Self {
        Self {
            task_id: int_or(raw, "task_id", DEFAULT_ID),
            period_ms: int_or(raw, "period_ms", DEFAULT_ID),
        }
    }
}

pub fn normalize_schedule(raw: &[RawRecord]) -> Vec<ScheduleEntry> {
    raw.iter().map(ScheduleEntry::from_raw).collect()
}

// ── Alarms ────────────────────────────────────────────────────────────────────

/// Alarm expiry behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlarmType {
    /// Fires once, then stays idle.
    #[default]
    OneShot,
    /// Re-arms itself with the same period.
    Cyclic,
}

impl AlarmType {
    /// Parse the C token (case-insensitive, surrounding whitespace ignored).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ONE_SHOT" => Some(AlarmType::OneShot),
            "CYCLIC" => Some(AlarmType::Cyclic),
            _ => None,
        }
    }

    pub fn as_c_token(self) -> &'static str {
        match self {
            AlarmType::OneShot => "ONE_SHOT",
            AlarmType::Cyclic => "CYCLIC",
        }
    }
}

/// What an alarm does on expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlarmAction {
    #[default]
    ActivateTask,
    TriggerCallback,
}

impl AlarmAction {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ACTIVATE_TASK" => Some(AlarmAction::ActivateTask),
            "TRIGGER_CALLBACK" => Some(AlarmAction::TriggerCallback),
            _ => None,
        }
    }

    pub fn as_c_token(self) -> &'static str {
        match self {
            AlarmAction::ActivateTask => "ACTIVATE_TASK",
            AlarmAction::TriggerCallback => "TRIGGER_CALLBACK",
        }
    }
}

/// The action-specific payload of an alarm.
///
/// A task id exists only for `ActivateTask` and a callback only for
/// `TriggerCallback`; the enum makes any other combination unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlarmTarget {
    ActivateTask { task_id: i64 },
    /// `None` when no callback name was supplied; rendered as `NULL`.
    TriggerCallback { callback: Option<String> },
}

/// One alarm, ready to be rendered as a struct initializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlarmRecord {
    pub id: i64,
    pub alarm_type: AlarmType,
    pub period_ms: i64,
    pub target: AlarmTarget,
}

impl AlarmRecord {
    /// Keys: `alarm_id`, `alarm_type`, `alarm_action`, `period_ms`, and
    /// either `task_id` or `callback` depending on the action.
    ///
    /// Unknown or missing enum values fall back to `ONE_SHOT` /
    /// `ACTIVATE_TASK`.  The field that does not belong to the chosen action
    /// is ignored even if present.
    pub fn from_raw(raw: &RawRecord) -> Self {
        let alarm_type = raw
            .get("alarm_type")
            .and_then(Value::as_str)
            .and_then(AlarmType::parse)
            .unwrap_or_default();
        let action = raw
            .get("alarm_action")
            .and_then(Value::as_str)
            .and_then(AlarmAction::parse)
            .unwrap_or_default();

        let target = match action {
            AlarmAction::ActivateTask => AlarmTarget::ActivateTask {
                task_id: int_or(raw, "task_id", DEFAULT_ID),
            },
            AlarmAction::TriggerCallback => AlarmTarget::TriggerCallback {
                callback: coerce_text(raw.get("callback")),
            },
        };

        Self {
            id: int_or(raw, "alarm_id", DEFAULT_ID),
            alarm_type,
            period_ms: int_or(raw, "period_ms", DEFAULT_ID),
            target,
        }
    }

    pub fn action(&self) -> AlarmAction {
        match self.target {
            AlarmTarget::ActivateTask { .. } => AlarmAction::ActivateTask,
            AlarmTarget::TriggerCallback { .. } => AlarmAction::TriggerCallback,
        }
    }

    /// TaskID column of the struct initializer: the task id, or `0`.
    pub fn task_id_expr(&self) -> String {
        match self.target {
            AlarmTarget::ActivateTask { task_id } => task_id.to_string(),
            AlarmTarget::TriggerCallback { .. } => "0".to_string(),
        }
    }

    /// Callback column of the struct initializer: the callback name, or
    /// `NULL`.
    pub fn callback_expr(&self) -> &str {
        match &self.target {
            AlarmTarget::TriggerCallback {
                callback: Some(name),
            } => name,
            _ => "NULL",
        }
    }

    /// C identifier of the generated `AlarmType` instance.
    pub fn symbol(&self) -> String {
        format!("Alarm_ID_{}", self.id)
    }
}

pub fn normalize_alarms(raw: &[RawRecord]) -> Vec<AlarmRecord> {
    raw.iter().map(AlarmRecord::from_raw).collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

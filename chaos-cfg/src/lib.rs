/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! chaos-cfg – configuration generator for the CHAOS RTOS
//!
//! Turns a project description (OS parameters, tasks, schedule table, alarms)
//! into the C configuration headers and sources of the kernel by rewriting
//! hand-maintained templates in place.
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── template/       – Template Document, #define rewriter, marker locator
//! ├── record.rs       – canonical records + lenient normalizer
//! ├── generator/      – OS / Task / Schedule / Alarm artifact generators
//! ├── config/         – YAML generator configuration (template/output layout)
//! └── project.rs      – `*.chaos_cfg` project loader
//! ```

pub mod config;
pub mod generator;
pub mod project;
pub mod record;
pub mod template;

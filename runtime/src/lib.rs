// Copyright 2026 Urlcheck Contributors
// SPDX-License-Identifier: Apache-2.0

//! urlcheck — recurring health checks for mixed web pages and HTTP APIs.
//!
//! Each target is pre-checked with a HEAD request, routed to a browser probe
//! (rendered pages) or an HTTP probe (machine APIs), and normalized into one
//! result record. A run aggregates the records into a single report.

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod error;
pub mod naming;
pub mod pool;
pub mod probe;
pub mod progress;
pub mod renderer;
pub mod report;
pub mod runner;
pub mod targets;

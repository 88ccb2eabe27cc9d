// SPDX-FileCopyrightText: 2026 Lapakbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for Lapakbot.
//!
//! Provides WAL-mode SQLite storage with embedded migrations, a
//! single-writer concurrency model via `tokio-rusqlite`, and typed
//! operations for complaint records, order-change records, and the
//! read-once settings row. Complaints and changes are upserted keyed by
//! invoice number; the unique key is the sole enforcement of the
//! one-live-record-per-invoice invariant.

pub mod database;
pub mod migrations;
pub mod models;
pub mod queries;

pub use database::Database;
pub use models::*;
pub use queries::changes::{change_exists, get_change, upsert_change};
pub use queries::complaints::{complaint_exists, get_complaint, upsert_complaint};
pub use queries::settings::{read_settings, write_settings};

// SPDX-FileCopyrightText: 2026 Leadboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite data access layer for Leadboard.
//!
//! WAL-mode SQLite with embedded migrations, a single-writer connection via
//! `tokio-rusqlite`, and account-scoped queries over leads and events.

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod queries;

pub use adapter::SqliteStore;
pub use database::Database;

// SPDX-FileCopyrightText: 2026 Leadboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Leadboard integration tests.
//!
//! - [`MemoryStore`] - in-memory lead store with failure injection and query recording
//! - [`TestHarness`] - temp SQLite store seeded for one signed-in account
//! - [`fixtures`] - canned leads and events

pub mod fixtures;
pub mod harness;
pub mod memory_store;

pub use harness::{TEST_ACCOUNT, TEST_TOKEN, TestHarness};
pub use memory_store::{MemoryStore, StoreOp};

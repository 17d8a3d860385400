// SPDX-FileCopyrightText: 2026 Leadboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query modules over the `leads` and `events` tables.

pub mod aggregates;
pub mod events;
pub mod leads;

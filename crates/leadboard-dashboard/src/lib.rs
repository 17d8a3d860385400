// SPDX-FileCopyrightText: 2026 Leadboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Page logic for Leadboard.
//!
//! The leads page is a [`FilterController`] (pure) driven either directly or
//! through a [`FilterSession`] task. Mutations go through
//! [`MutationHandlers`], which notify the [`ViewInvalidator`] so that live
//! sessions and the [`DashboardService`] cache pick up the change.

pub mod cache;
pub mod controller;
pub mod debounce;
pub mod fetcher;
pub mod filter;
pub mod invalidation;
pub mod mutations;
pub mod session;
pub mod views;

pub use cache::{DashboardService, DashboardSummary, Section};
pub use controller::{FetchTicket, FilterController, LeadsSnapshot};
pub use debounce::Debouncer;
pub use fetcher::{LeadsFetcher, LeadsView};
pub use filter::{FilterEvent, FilterState, Location};
pub use invalidation::{Invalidation, ViewInvalidator, ViewKind};
pub use mutations::{MutationHandlers, MutationOutcome};
pub use session::{FilterInput, FilterSession};
pub use views::{ActivityItem, FeedMode, LeadRow, SourceBar, StatCard, StatTone};

// SPDX-FileCopyrightText: 2026 Leadboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for Leadboard.
//!
//! Serves the dashboard, leads, activity and source pages as JSON, plus the
//! two form actions that change leads. Every page route sits behind the
//! session [`auth_middleware`](auth::auth_middleware).

pub mod auth;
pub mod handlers;
pub mod server;

pub use auth::{AuthGate, StaticTokenAuth, auth_middleware, credential_from_headers};
pub use handlers::{ApiError, ErrorResponse};
pub use server::{GatewayState, HealthState, build_router, serve};

// SPDX-FileCopyrightText: 2026 Lapakbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Marketplace seller gateway client.
//!
//! Covers the messaging endpoints (conversation list, message history, send
//! message), the order backend (buyer order lookup, cancellation
//! confirmation, batch trigger) and the token-refresh service.

pub mod client;
pub mod types;

pub use client::GatewayClient;
pub use types::{CancellationOperation, SendMessagePayload};

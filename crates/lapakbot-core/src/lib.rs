// SPDX-FileCopyrightText: 2026 Lapakbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Lapakbot auto-reply bot.
//!
//! This crate provides the error type and domain types shared across the
//! Lapakbot workspace: conversation and order shapes as the marketplace
//! gateway reports them, and the complaint / order-change records the bot
//! persists.

pub mod error;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::LapakbotError;
pub use types::{
    BotSettings, ChangeDetail, ComplaintCategory, ComplaintRecord, ConversationSummary,
    HistoryMessage, MessageContent, Order, OrderChangeRecord, OrderStatus,
};

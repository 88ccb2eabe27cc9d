// SPDX-FileCopyrightText: 2026 Lapakbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Auto-reply agent: settings resolution, tool contract, per-conversation
//! pipeline, and the bounded dispatcher that drives one reply pass.

pub mod dispatcher;
pub mod pipeline;
pub mod settings;
pub mod tools;

pub use dispatcher::{run_reply_pass, PassSummary};
pub use pipeline::{reply_to_conversation, AgentContext, ReplyOutcome};
pub use settings::ResolvedSettings;

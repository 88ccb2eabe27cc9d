// SPDX-FileCopyrightText: 2026 Lapakbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One reply pass over the unread-conversation list.
//!
//! Conversations are handled concurrently, bounded by a semaphore sized
//! from `agent.max_concurrency`. One conversation failing never aborts the
//! pass.

use std::sync::Arc;

use lapakbot_core::LapakbotError;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::pipeline::{reply_to_conversation, AgentContext, ReplyOutcome};

/// Tallies of one reply pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// Conversations that qualified for dispatch.
    pub dispatched: usize,
    /// Replies actually sent.
    pub replied: usize,
    /// Conversations gated by an existing complaint or change.
    pub gated: usize,
    /// Conversations that produced no reply or failed outright.
    pub dropped: usize,
}

/// Runs one full pass: trigger order batch processing, fetch the
/// conversation list, and reply to every qualifying conversation.
pub async fn run_reply_pass(
    ctx: &AgentContext,
    conversation_limit: u32,
    max_concurrency: usize,
) -> Result<PassSummary, LapakbotError> {
    // Best-effort: the pass proceeds even when the batch trigger fails.
    if let Err(e) = ctx.gateway.trigger_order_batch().await {
        warn!(error = %e, "order batch trigger failed, continuing");
    }

    let conversations = ctx.gateway.conversation_list(conversation_limit).await?;
    info!(total = conversations.len(), "conversation list fetched");

    let semaphore = Arc::new(Semaphore::new(max_concurrency));
    let mut tasks = JoinSet::new();
    let mut summary = PassSummary::default();

    for conversation in conversations {
        if !conversation.has_replyable_message() {
            info!(
                conversation = conversation.conversation_id.as_str(),
                "latest message not replyable, skipping"
            );
            continue;
        }
        summary.dispatched += 1;

        let ctx = ctx.clone();
        let semaphore = Arc::clone(&semaphore);
        tasks.spawn(async move {
            // Holds the permit for the whole conversation.
            let _permit = semaphore.acquire_owned().await;
            let id = conversation.conversation_id.clone();
            (id, reply_to_conversation(&ctx, &conversation).await)
        });
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((_, Ok(ReplyOutcome::Sent(_)))) => summary.replied += 1,
            Ok((_, Ok(ReplyOutcome::GatedExisting))) => summary.gated += 1,
            Ok((_, Ok(ReplyOutcome::NoReply))) => summary.dropped += 1,
            Ok((id, Err(e))) => {
                error!(conversation = id.as_str(), error = %e, "conversation failed");
                summary.dropped += 1;
            }
            Err(e) => {
                error!(error = %e, "conversation task panicked");
                summary.dropped += 1;
            }
        }
    }

    info!(
        dispatched = summary.dispatched,
        replied = summary.replied,
        gated = summary.gated,
        dropped = summary.dropped,
        "reply pass finished"
    );
    Ok(summary)
}

// SPDX-FileCopyrightText: 2026 Lapakbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-conversation reply pipeline.
//!
//! Fetches history and order context, gates on already-recorded
//! complaints/changes, asks the model, persists any tool outcome and sends
//! the reply back through the gateway.

use std::sync::Arc;

use lapakbot_core::{
    ComplaintRecord, ConversationSummary, LapakbotError, Order, OrderChangeRecord,
};
use lapakbot_gateway::GatewayClient;
use lapakbot_openai::{ChatMessage, ChatRequest, OpenAiClient};
use lapakbot_storage::{change_exists, complaint_exists, upsert_change, upsert_complaint, Database};
use tracing::{info, warn};

use crate::settings::ResolvedSettings;
use crate::tools::{
    change_reply, complaint_reply, recognize_tool_call, tool_definitions, RecognizedTool,
};

/// Shared dependencies of the reply pipeline. Cheap to clone.
#[derive(Clone)]
pub struct AgentContext {
    pub gateway: GatewayClient,
    pub openai: OpenAiClient,
    pub db: Database,
    pub settings: Arc<ResolvedSettings>,
    pub page_size: u32,
}

/// What a single conversation produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// A reply was sent with this text.
    Sent(String),
    /// A complaint or change already exists for the invoice; no model call.
    GatedExisting,
    /// No reply was produced (model failure, rate limit, or empty content).
    NoReply,
}

/// Runs the full pipeline for one conversation.
pub async fn reply_to_conversation(
    ctx: &AgentContext,
    summary: &ConversationSummary,
) -> Result<ReplyOutcome, LapakbotError> {
    let history = ctx
        .gateway
        .message_history(&summary.conversation_id, summary.shop_id, ctx.page_size)
        .await?;

    // Order context is optional: a failed lookup means "no order", not an
    // aborted conversation.
    let order = match ctx.gateway.customer_orders(summary.to_id).await {
        Ok(orders) => orders.into_iter().next(),
        Err(e) => {
            warn!(
                conversation = summary.conversation_id.as_str(),
                error = %e,
                "order lookup failed, treating as no order"
            );
            None
        }
    };
    let invoice = order.as_ref().and_then(|o| o.invoice_no.clone());

    if let Some(invoice) = &invoice {
        let gated = complaint_exists(&ctx.db, invoice).await?
            || change_exists(&ctx.db, invoice).await?;
        if gated {
            info!(
                conversation = summary.conversation_id.as_str(),
                invoice = invoice.as_str(),
                "complaint or change already recorded, skipping"
            );
            return Ok(ReplyOutcome::GatedExisting);
        }
    }

    let transcript = build_transcript(&ctx.settings.system_prompt, summary, order.as_ref(), &history);
    let request = ChatRequest {
        model: ctx.settings.model.clone(),
        messages: transcript,
        temperature: ctx.settings.temperature,
        max_tokens: ctx.settings.max_tokens,
        tools: Some(tool_definitions()),
        tool_choice: Some("auto".into()),
    };

    let response = match ctx.openai.complete_chat(&request).await {
        Ok(response) => response,
        Err(e) => {
            warn!(
                conversation = summary.conversation_id.as_str(),
                error = %e,
                "completion failed, no reply sent"
            );
            return Ok(ReplyOutcome::NoReply);
        }
    };

    let Some(message) = response.first_message() else {
        warn!("completion response had no choices");
        return Ok(ReplyOutcome::NoReply);
    };

    // Tool calls are only honored with an invoice on file.
    let reply_text = match (&message.tool_calls, &invoice) {
        (Some(calls), Some(_)) => match recognize_tool_call(calls) {
            Some(RecognizedTool::Complaint(args)) => {
                let record = ComplaintRecord {
                    id_pengguna: args.id_pengguna,
                    nama_toko: args.nama_toko,
                    jenis_keluhan: args.jenis_keluhan,
                    deskripsi_keluhan: args.deskripsi_keluhan,
                    nomor_invoice: args.nomor_invoice.clone(),
                    status_pesanan: args.status_pesanan,
                    store_id: summary.shop_id.to_string(),
                    msg_id: summary.latest_message_id.clone().unwrap_or_default(),
                    user_id: summary.to_id,
                };
                upsert_complaint(&ctx.db, &record).await?;
                info!(
                    invoice = args.nomor_invoice.as_str(),
                    jenis = %record.jenis_keluhan,
                    "complaint recorded"
                );
                Some(complaint_reply(record.jenis_keluhan, &args.nomor_invoice))
            }
            Some(RecognizedTool::Change(args)) => {
                let record = OrderChangeRecord {
                    id_pengguna: args.id_pengguna,
                    nama_toko: args.nama_toko,
                    nomor_invoice: args.nomor_invoice.clone(),
                    detail_perubahan: args.detail_perubahan,
                    perubahan: args.perubahan,
                    status_pesanan: args.status_pesanan,
                    store_id: summary.shop_id.to_string(),
                    msg_id: summary.latest_message_id.clone().unwrap_or_default(),
                    user_id: summary.to_id,
                };
                upsert_change(&ctx.db, &record).await?;
                info!(invoice = args.nomor_invoice.as_str(), "order change recorded");
                Some(change_reply(&args.nomor_invoice))
            }
            None => message.content.clone(),
        },
        _ => message.content.clone(),
    };

    let Some(reply_text) = reply_text.filter(|t| !t.is_empty()) else {
        info!(
            conversation = summary.conversation_id.as_str(),
            "model produced no reply text"
        );
        return Ok(ReplyOutcome::NoReply);
    };

    ctx.gateway
        .send_message(summary.to_id, summary.shop_id, &reply_text)
        .await?;
    info!(
        conversation = summary.conversation_id.as_str(),
        buyer = summary.to_name.as_str(),
        "reply sent"
    );
    Ok(ReplyOutcome::Sent(reply_text))
}

/// Builds the model transcript: configured system prompt, a situational
/// system line, then the history mapped to user/assistant roles.
fn build_transcript(
    system_prompt: &str,
    summary: &ConversationSummary,
    order: Option<&Order>,
    history: &[lapakbot_core::HistoryMessage],
) -> Vec<ChatMessage> {
    let mut transcript = vec![ChatMessage::system(system_prompt)];

    let situation = match order.and_then(|o| o.invoice_no.as_deref().map(|inv| (o, inv))) {
        Some((order, invoice)) => {
            let status = order
                .mp_order_status
                .map(|s| s.to_string())
                .unwrap_or_else(|| "UNKNOWN".to_string());
            format!(
                "Nama toko saat ini adalah {} dan ID pelanggan adalah {}. Pelanggan memiliki \
                 pesanan dengan nomor invoice {} dengan status pesanan {}.",
                summary.shop_name, summary.to_name, invoice, status
            )
        }
        None => format!(
            "Nama toko saat ini adalah {} dan ID pelanggan adalah {}. Pelanggan belum \
             memiliki pesanan. Jangan memproses keluhan atau ubah pesanan formal, tetapi \
             tetap bantu dengan informasi umum jika diperlukan.",
            summary.shop_name, summary.to_name
        ),
    };
    transcript.push(ChatMessage::system(situation));

    for message in history {
        let Some(text) = message
            .content
            .as_ref()
            .and_then(|c| c.text.as_deref())
            .filter(|t| !t.is_empty())
        else {
            continue;
        };
        if message.from_shop_id == summary.shop_id {
            transcript.push(ChatMessage::assistant(text));
        } else {
            transcript.push(ChatMessage::user(text));
        }
    }
    transcript
}

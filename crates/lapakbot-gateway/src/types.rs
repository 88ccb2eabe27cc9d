// SPDX-FileCopyrightText: 2026 Lapakbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types specific to the seller gateway's HTTP endpoints.
//!
//! Request bodies use the gateway's camelCase field names; response
//! envelopes are unwrapped here so callers deal in the shared domain types.

use lapakbot_core::{HistoryMessage, Order};
use serde::{Deserialize, Serialize};

/// Envelope of the message-history endpoint: `{ "response": { "messages": [...] } }`.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageHistoryEnvelope {
    #[serde(default)]
    pub response: MessageHistoryBody,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageHistoryBody {
    #[serde(default)]
    pub messages: Vec<HistoryMessage>,
}

/// Envelope of the order-lookup endpoint: `{ "data": [...] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderLookupEnvelope {
    #[serde(default)]
    pub data: Vec<Order>,
}

/// Body of the send-message endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessagePayload {
    /// Buyer id the message goes to.
    pub to_id: i64,
    /// Always "text" for bot replies.
    pub message_type: String,
    /// Message text.
    pub content: String,
    /// Shop sending the message.
    pub shop_id: i64,
}

impl SendMessagePayload {
    pub fn text(to_id: i64, shop_id: i64, content: impl Into<String>) -> Self {
        Self {
            to_id,
            message_type: "text".into(),
            content: content.into(),
            shop_id,
        }
    }
}

/// Accept or reject a buyer's cancellation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CancellationOperation {
    Accept,
    Reject,
}

/// Body of the cancellation-confirmation endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancellationPayload {
    pub shop_id: i64,
    /// Marketplace order serial, not the invoice number.
    pub order_sn: String,
    pub operation: CancellationOperation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_payload_uses_camel_case() {
        let payload = SendMessagePayload::text(947151379, 165103149, "Baik kak");
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["toId"], 947151379);
        assert_eq!(json["shopId"], 165103149);
        assert_eq!(json["messageType"], "text");
        assert_eq!(json["content"], "Baik kak");
    }

    #[test]
    fn cancellation_operation_serializes_screaming() {
        let payload = CancellationPayload {
            shop_id: 1,
            order_sn: "2405138FXYZ".into(),
            operation: CancellationOperation::Accept,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["operation"], "ACCEPT");
        assert_eq!(json["orderSn"], "2405138FXYZ");
    }

    #[test]
    fn history_envelope_unwraps_messages() {
        let json = r#"{
            "response": {
                "messages": [
                    {"message_id": "m1", "from_shop_id": 165103149,
                     "message_type": "text", "content": {"text": "Halo"}}
                ]
            }
        }"#;
        let env: MessageHistoryEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(env.response.messages.len(), 1);
        assert_eq!(env.response.messages[0].message_id, "m1");
    }

    #[test]
    fn history_envelope_tolerates_empty_response() {
        let env: MessageHistoryEnvelope = serde_json::from_str(r#"{}"#).unwrap();
        assert!(env.response.messages.is_empty());
    }

    #[test]
    fn order_envelope_unwraps_data() {
        let json = r#"{"data": [{"invoice_no": "INV123", "mp_order_status": "SHIPPED"}]}"#;
        let env: OrderLookupEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(env.data[0].invoice_no.as_deref(), Some("INV123"));
    }
}

// SPDX-FileCopyrightText: 2026 Lapakbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the marketplace seller gateway.

use std::time::Duration;

use lapakbot_core::{ConversationSummary, LapakbotError, Order};
use tracing::{debug, warn};

use crate::types::{
    CancellationOperation, CancellationPayload, MessageHistoryEnvelope, OrderLookupEnvelope,
    SendMessagePayload,
};

/// Client for the seller gateway, the order backend and the token-refresh
/// service. One instance is shared across the whole reply pass.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    client: reqwest::Client,
    base_url: String,
    order_base_url: String,
    token_refresh_url: String,
}

impl GatewayClient {
    /// Creates a gateway client with a fixed per-request timeout.
    pub fn new(
        base_url: impl Into<String>,
        order_base_url: impl Into<String>,
        token_refresh_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LapakbotError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LapakbotError::Gateway {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            order_base_url: order_base_url.into(),
            token_refresh_url: token_refresh_url.into(),
        })
    }

    /// Fetches up to `limit` unread conversations.
    pub async fn conversation_list(
        &self,
        limit: u32,
    ) -> Result<Vec<ConversationSummary>, LapakbotError> {
        let url = format!("{}/api/msg/get_conversation_list", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("limit", limit)])
            .send()
            .await
            .map_err(transport_err)?;
        let response = check_status(response, "conversation list").await?;
        let conversations: Vec<ConversationSummary> =
            response.json().await.map_err(decode_err("conversation list"))?;
        debug!(count = conversations.len(), "fetched conversation list");
        Ok(conversations)
    }

    /// Fetches the most recent `page_size` messages of a conversation,
    /// newest first as the gateway returns them.
    pub async fn message_history(
        &self,
        conversation_id: &str,
        shop_id: i64,
        page_size: u32,
    ) -> Result<Vec<lapakbot_core::HistoryMessage>, LapakbotError> {
        let url = format!("{}/api/msg/get_message", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("conversationId", conversation_id.to_string()),
                ("shopId", shop_id.to_string()),
                ("pageSize", page_size.to_string()),
            ])
            .send()
            .await
            .map_err(transport_err)?;
        let response = check_status(response, "message history").await?;
        let envelope: MessageHistoryEnvelope =
            response.json().await.map_err(decode_err("message history"))?;
        Ok(envelope.response.messages)
    }

    /// Sends a text reply into a conversation.
    pub async fn send_message(
        &self,
        to_id: i64,
        shop_id: i64,
        content: &str,
    ) -> Result<(), LapakbotError> {
        let url = format!("{}/api/msg/send_message", self.base_url);
        let payload = SendMessagePayload::text(to_id, shop_id, content);
        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(transport_err)?;
        check_status(response, "send message").await?;
        debug!(to_id, shop_id, "reply sent");
        Ok(())
    }

    /// Looks up a buyer's orders on the order backend. Callers treat the
    /// order as optional context, so a failure here is theirs to downgrade.
    pub async fn customer_orders(&self, buyer_id: i64) -> Result<Vec<Order>, LapakbotError> {
        let url = format!(
            "{}/api/order/customer/shopee/{buyer_id}",
            self.order_base_url
        );
        let response = self.client.get(&url).send().await.map_err(transport_err)?;
        let response = check_status(response, "order lookup").await?;
        let envelope: OrderLookupEnvelope =
            response.json().await.map_err(decode_err("order lookup"))?;
        Ok(envelope.data)
    }

    /// Accepts or rejects a buyer's cancellation request.
    pub async fn confirm_cancellation(
        &self,
        shop_id: i64,
        order_sn: &str,
        operation: CancellationOperation,
    ) -> Result<(), LapakbotError> {
        let url = format!("{}/api/orders/handle-cancellation", self.base_url);
        let payload = CancellationPayload {
            shop_id,
            order_sn: order_sn.to_string(),
            operation,
        };
        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(transport_err)?;
        check_status(response, "cancellation").await?;
        Ok(())
    }

    /// Fires the order-batch-processing trigger. Best-effort; callers log
    /// and continue when it fails.
    pub async fn trigger_order_batch(&self) -> Result<(), LapakbotError> {
        let url = format!("{}/api/proses_order", self.base_url);
        let response = self.client.get(&url).send().await.map_err(transport_err)?;
        check_status(response, "order batch trigger").await?;
        Ok(())
    }

    /// POSTs the token-refresh endpoint. Returns the response body for the
    /// caller to log.
    pub async fn refresh_token(&self) -> Result<String, LapakbotError> {
        let response = self
            .client
            .post(&self.token_refresh_url)
            .send()
            .await
            .map_err(transport_err)?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            warn!(status = %status, body = body.as_str(), "token refresh failed");
            return Err(LapakbotError::Gateway {
                message: format!("token refresh returned {status}: {body}"),
                source: None,
            });
        }
        Ok(body)
    }
}

fn transport_err(e: reqwest::Error) -> LapakbotError {
    LapakbotError::Gateway {
        message: format!("HTTP request failed: {e}"),
        source: Some(Box::new(e)),
    }
}

fn decode_err(what: &'static str) -> impl FnOnce(reqwest::Error) -> LapakbotError {
    move |e| LapakbotError::Gateway {
        message: format!("failed to decode {what} response: {e}"),
        source: Some(Box::new(e)),
    }
}

async fn check_status(
    response: reqwest::Response,
    what: &str,
) -> Result<reqwest::Response, LapakbotError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(LapakbotError::Gateway {
        message: format!("{what} returned {status}: {body}"),
        source: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> GatewayClient {
        GatewayClient::new(
            server.uri(),
            server.uri(),
            format!("{}/api/refresh_token", server.uri()),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn conversation_list_passes_limit() {
        let server = MockServer::start().await;
        let body = serde_json::json!([{
            "conversation_id": "709122092476686867",
            "shop_id": 165103149,
            "shop_name": "keelatofficial",
            "to_id": 947151379,
            "to_name": "vn_cstoreponorogo",
            "latest_message_type": "text",
            "latest_message_content": {"text": "Halo kak"},
            "unread_count": 2
        }]);
        Mock::given(method("GET"))
            .and(path("/api/msg/get_conversation_list"))
            .and(query_param("limit", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .expect(1)
            .mount(&server)
            .await;

        let list = test_client(&server).conversation_list(20).await.unwrap();
        assert_eq!(list.len(), 1);
        assert!(list[0].has_replyable_message());
    }

    #[tokio::test]
    async fn message_history_unwraps_envelope() {
        let server = MockServer::start().await;
        let body = serde_json::json!({
            "response": {
                "messages": [
                    {"message_id": "m2", "from_shop_id": 0,
                     "message_type": "text", "content": {"text": "Paket belum sampai"}},
                    {"message_id": "m1", "from_shop_id": 165103149,
                     "message_type": "text", "content": {"text": "Sudah dikirim ya kak"}}
                ]
            }
        });
        Mock::given(method("GET"))
            .and(path("/api/msg/get_message"))
            .and(query_param("conversationId", "conv-1"))
            .and(query_param("shopId", "165103149"))
            .and(query_param("pageSize", "25"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let messages = test_client(&server)
            .message_history("conv-1", 165103149, 25)
            .await
            .unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].message_id, "m2");
    }

    #[tokio::test]
    async fn send_message_posts_camel_case_body() {
        let server = MockServer::start().await;
        let expected = serde_json::json!({
            "toId": 947151379,
            "messageType": "text",
            "content": "Baik kak, kami cek dulu ya.",
            "shopId": 165103149
        });
        Mock::given(method("POST"))
            .and(path("/api/msg/send_message"))
            .and(body_json(&expected))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        test_client(&server)
            .send_message(947151379, 165103149, "Baik kak, kami cek dulu ya.")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn customer_orders_hits_buyer_path() {
        let server = MockServer::start().await;
        let body = serde_json::json!({
            "data": [{"invoice_no": "INV123", "mp_order_status": "SHIPPED",
                      "buyer_user_id": 947151379}]
        });
        Mock::given(method("GET"))
            .and(path("/api/order/customer/shopee/947151379"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let orders = test_client(&server).customer_orders(947151379).await.unwrap();
        assert_eq!(orders[0].invoice_no.as_deref(), Some("INV123"));
    }

    #[tokio::test]
    async fn confirm_cancellation_sends_operation() {
        let server = MockServer::start().await;
        let expected = serde_json::json!({
            "shopId": 165103149,
            "orderSn": "2405138FXYZ",
            "operation": "REJECT"
        });
        Mock::given(method("POST"))
            .and(path("/api/orders/handle-cancellation"))
            .and(body_json(&expected))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        test_client(&server)
            .confirm_cancellation(165103149, "2405138FXYZ", CancellationOperation::Reject)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn non_success_maps_to_gateway_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/msg/get_conversation_list"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let err = test_client(&server).conversation_list(20).await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("503"), "got: {msg}");
    }

    #[tokio::test]
    async fn refresh_token_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/refresh_token"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ok":true}"#))
            .expect(1)
            .mount(&server)
            .await;

        let body = test_client(&server).refresh_token().await.unwrap();
        assert!(body.contains("ok"));
    }

    #[tokio::test]
    async fn trigger_order_batch_surfaces_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/proses_order"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        assert!(test_client(&server).trigger_order_batch().await.is_err());
    }
}

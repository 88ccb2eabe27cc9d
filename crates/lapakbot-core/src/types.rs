// SPDX-FileCopyrightText: 2026 Lapakbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Lapakbot workspace.
//!
//! Gateway-facing types mirror the seller gateway's JSON field names;
//! record types mirror the datastore column names (Indonesian, as the
//! original schema uses them).

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Text payload of a chat message. The gateway wraps media messages in the
/// same envelope with `text` absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageContent {
    /// Message text, absent for stickers/images/orders.
    #[serde(default)]
    pub text: Option<String>,
}

/// One entry of the unread-conversation list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationSummary {
    /// Conversation identifier within the messaging backend.
    pub conversation_id: String,
    /// Shop that owns the conversation.
    pub shop_id: i64,
    /// Display name of the shop.
    #[serde(default)]
    pub shop_name: String,
    /// Buyer identifier.
    pub to_id: i64,
    /// Buyer display name.
    #[serde(default)]
    pub to_name: String,
    /// Identifier of the latest message in the conversation.
    #[serde(default)]
    pub latest_message_id: Option<String>,
    /// Type of the latest message ("text", "image", ...).
    #[serde(default)]
    pub latest_message_type: Option<String>,
    /// Content of the latest message, if any.
    #[serde(default)]
    pub latest_message_content: Option<MessageContent>,
    /// Number of unread messages.
    #[serde(default)]
    pub unread_count: u32,
}

impl ConversationSummary {
    /// Whether this conversation qualifies for an auto-reply: the latest
    /// message must carry non-empty text and be of an allowed type.
    pub fn has_replyable_message(&self) -> bool {
        let has_text = self
            .latest_message_content
            .as_ref()
            .and_then(|c| c.text.as_deref())
            .is_some_and(|t| !t.is_empty());
        let allowed_type = self
            .latest_message_type
            .as_deref()
            .is_none_or(|t| t == "text");
        has_text && allowed_type
    }
}

/// A single message of a conversation's history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryMessage {
    /// Message identifier.
    pub message_id: String,
    /// Shop id of the sender. Equal to the conversation's shop id when the
    /// seller (the bot) sent the message.
    pub from_shop_id: i64,
    /// Message type ("text", "image", ...).
    #[serde(default)]
    pub message_type: Option<String>,
    /// Message payload.
    #[serde(default)]
    pub content: Option<MessageContent>,
}

/// Marketplace order status as reported by the order backend.
///
/// Serialized in the backend's SCREAMING_SNAKE_CASE wire format. Values the
/// bot does not model explicitly deserialize to [`OrderStatus::Unknown`]
/// instead of failing the whole payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Unpaid,
    ReadyToShip,
    Processed,
    Shipped,
    Completed,
    InCancel,
    Cancelled,
    ToReturn,
    #[strum(serialize = "UNKNOWN")]
    Unknown,
}

impl Serialize for OrderStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().unwrap_or(OrderStatus::Unknown))
    }
}

/// A buyer's order as returned by the order-lookup endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Invoice number. This is the upsert key for complaint and change records.
    #[serde(default)]
    pub invoice_no: Option<String>,
    /// Current marketplace order status.
    #[serde(default)]
    pub mp_order_status: Option<OrderStatus>,
    /// Buyer user id owning the order.
    #[serde(default)]
    pub buyer_user_id: Option<i64>,
}

/// Closed set of complaint categories the complaint tool accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum ComplaintCategory {
    #[strum(serialize = "Produk Tidak Lengkap")]
    #[serde(rename = "Produk Tidak Lengkap")]
    ProdukTidakLengkap,
    #[strum(serialize = "Produk Rusak")]
    #[serde(rename = "Produk Rusak")]
    ProdukRusak,
    #[strum(serialize = "Salah Kirim Model Pakaian")]
    #[serde(rename = "Salah Kirim Model Pakaian")]
    SalahKirimModelPakaian,
}

/// A complaint record, upserted into the `keluhan` table keyed by invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplaintRecord {
    pub id_pengguna: String,
    pub nama_toko: String,
    pub jenis_keluhan: ComplaintCategory,
    pub deskripsi_keluhan: String,
    /// Unique key. A second complaint for the same invoice overwrites the first.
    pub nomor_invoice: String,
    pub status_pesanan: String,
    pub store_id: String,
    pub msg_id: String,
    pub user_id: i64,
}

/// Structured color/size delta of an order-change request. Both fields optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChangeDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warna: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ukuran: Option<String>,
}

/// An order-change record, upserted into `perubahan_pesanan` keyed by invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderChangeRecord {
    pub id_pengguna: String,
    pub nama_toko: String,
    /// Unique key, same semantics as [`ComplaintRecord::nomor_invoice`].
    pub nomor_invoice: String,
    pub detail_perubahan: String,
    pub perubahan: ChangeDetail,
    pub status_pesanan: String,
    pub store_id: String,
    pub msg_id: String,
    pub user_id: i64,
}

/// The single settings row read once per process lifetime.
///
/// Every field is optional; absent values fall back to the TOML config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BotSettings {
    pub openai_api: Option<String>,
    pub openai_model: Option<String>,
    pub openai_temperature: Option<f64>,
    pub openai_prompt: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(text: Option<&str>, msg_type: Option<&str>) -> ConversationSummary {
        ConversationSummary {
            conversation_id: "709122092476686867".into(),
            shop_id: 165103149,
            shop_name: "keelatofficial".into(),
            to_id: 947151379,
            to_name: "vn_cstoreponorogo".into(),
            latest_message_id: Some("2302748948493123953".into()),
            latest_message_type: msg_type.map(Into::into),
            latest_message_content: text.map(|t| MessageContent {
                text: Some(t.to_string()),
            }),
            unread_count: 1,
        }
    }

    #[test]
    fn replyable_requires_nonempty_text() {
        assert!(summary(Some("Baik kak"), Some("text")).has_replyable_message());
        assert!(!summary(Some(""), Some("text")).has_replyable_message());
        assert!(!summary(None, Some("text")).has_replyable_message());
    }

    #[test]
    fn replyable_rejects_media_types() {
        assert!(!summary(Some("caption"), Some("image")).has_replyable_message());
        // Missing type is treated as text -- the gateway omits it for plain messages.
        assert!(summary(Some("halo"), None).has_replyable_message());
    }

    #[test]
    fn order_status_deserializes_screaming_snake() {
        let order: Order = serde_json::from_str(
            r#"{"invoice_no": "INV123", "mp_order_status": "READY_TO_SHIP"}"#,
        )
        .unwrap();
        assert_eq!(order.invoice_no.as_deref(), Some("INV123"));
        assert_eq!(order.mp_order_status, Some(OrderStatus::ReadyToShip));
    }

    #[test]
    fn order_status_unknown_value_falls_through() {
        let order: Order =
            serde_json::from_str(r#"{"mp_order_status": "SOMETHING_NEW"}"#).unwrap();
        assert_eq!(order.mp_order_status, Some(OrderStatus::Unknown));
    }

    #[test]
    fn order_status_displays_wire_format() {
        assert_eq!(OrderStatus::InCancel.to_string(), "IN_CANCEL");
        assert_eq!(OrderStatus::ReadyToShip.to_string(), "READY_TO_SHIP");
    }

    #[test]
    fn complaint_category_round_trips() {
        use std::str::FromStr;
        for cat in [
            ComplaintCategory::ProdukTidakLengkap,
            ComplaintCategory::ProdukRusak,
            ComplaintCategory::SalahKirimModelPakaian,
        ] {
            let s = cat.to_string();
            assert_eq!(ComplaintCategory::from_str(&s).unwrap(), cat);
            let json = serde_json::to_value(cat).unwrap();
            assert_eq!(json, s);
        }
    }

    #[test]
    fn change_detail_omits_absent_fields() {
        let detail = ChangeDetail {
            warna: Some("merah".into()),
            ukuran: None,
        };
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["warna"], "merah");
        assert!(json.get("ukuran").is_none());
    }

    #[test]
    fn conversation_summary_tolerates_missing_optionals() {
        let json = r#"{
            "conversation_id": "abc",
            "shop_id": 1,
            "to_id": 2
        }"#;
        let s: ConversationSummary = serde_json::from_str(json).unwrap();
        assert_eq!(s.unread_count, 0);
        assert!(s.latest_message_content.is_none());
        assert!(!s.has_replyable_message());
    }
}

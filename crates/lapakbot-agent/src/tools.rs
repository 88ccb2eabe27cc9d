// SPDX-FileCopyrightText: 2026 Lapakbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tool definitions offered to the model and typed decoding of tool calls.
//!
//! Two functions are exposed: `tangani_keluhan` records a complaint,
//! `ubah_detail_pesanan` records an order-change request. Parameter names
//! and descriptions are Indonesian, matching the datastore schema.

use lapakbot_core::{ChangeDetail, ComplaintCategory};
use lapakbot_openai::types::ToolCall;
use lapakbot_openai::ToolDefinition;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

pub const TOOL_COMPLAINT: &str = "tangani_keluhan";
pub const TOOL_CHANGE: &str = "ubah_detail_pesanan";

/// Builds the tool list sent with every completion request.
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::function(
            TOOL_COMPLAINT,
            "Menangani keluhan pelanggan terkait pesanan pelanggan dan menyimpannya di database",
            json!({
                "type": "object",
                "properties": {
                    "id_pengguna": {
                        "type": "string",
                        "description": "ID pengguna pelanggan yang mengajukan keluhan"
                    },
                    "nama_toko": {
                        "type": "string",
                        "description": "Nama toko yang dikeluhkan"
                    },
                    "status_pesanan": {
                        "type": "string",
                        "description": "Status pesanan saat ini"
                    },
                    "jenis_keluhan": {
                        "type": "string",
                        "enum": [
                            "Produk Tidak Lengkap",
                            "Produk Rusak",
                            "Salah Kirim Model Pakaian"
                        ],
                        "description": "Jenis atau kategori keluhan"
                    },
                    "deskripsi_keluhan": {
                        "type": "string",
                        "description": "Deskripsi detail keluhan dari pelanggan"
                    },
                    "nomor_invoice": {
                        "type": "string",
                        "description": "Nomor invoice terkait keluhan"
                    }
                },
                "required": [
                    "id_pengguna", "nama_toko", "jenis_keluhan",
                    "deskripsi_keluhan", "nomor_invoice", "status_pesanan"
                ]
            }),
        ),
        ToolDefinition::function(
            TOOL_CHANGE,
            "Mencatat permintaan perubahan detail pesanan seperti warna atau ukuran",
            json!({
                "type": "object",
                "properties": {
                    "id_pengguna": {
                        "type": "string",
                        "description": "ID pengguna pelanggan yang mengajukan perubahan"
                    },
                    "nama_toko": {
                        "type": "string",
                        "description": "Nama toko yang dikeluhkan"
                    },
                    "nomor_invoice": {
                        "type": "string",
                        "description": "Nomor invoice terkait perubahan"
                    },
                    "status_pesanan": {
                        "type": "string",
                        "description": "Status pesanan saat ini"
                    },
                    "detail_perubahan": {
                        "type": "string",
                        "description": "Rangkuman perubahan yang diminta"
                    },
                    "perubahan": {
                        "type": "object",
                        "properties": {
                            "warna": {
                                "type": "string",
                                "description": "Warna baru yang diminta jika ada perubahan"
                            },
                            "ukuran": {
                                "type": "string",
                                "description": "Ukuran baru yang diminta jika ada perubahan"
                            }
                        },
                        "description": "Detail perubahan yang diminta"
                    }
                },
                "required": [
                    "id_pengguna", "nama_toko", "detail_perubahan",
                    "nomor_invoice", "perubahan", "status_pesanan"
                ]
            }),
        ),
    ]
}

/// Arguments of a `tangani_keluhan` call.
#[derive(Debug, Clone, Deserialize)]
pub struct ComplaintArgs {
    pub id_pengguna: String,
    pub nama_toko: String,
    pub jenis_keluhan: ComplaintCategory,
    pub deskripsi_keluhan: String,
    pub nomor_invoice: String,
    pub status_pesanan: String,
}

/// Arguments of an `ubah_detail_pesanan` call.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeArgs {
    pub id_pengguna: String,
    pub nama_toko: String,
    pub nomor_invoice: String,
    pub detail_perubahan: String,
    #[serde(default)]
    pub perubahan: ChangeDetail,
    pub status_pesanan: String,
}

/// A tool call the bot knows how to act on.
#[derive(Debug, Clone)]
pub enum RecognizedTool {
    Complaint(ComplaintArgs),
    Change(ChangeArgs),
}

/// Picks the first tool call with a known name and well-formed arguments.
/// Unknown names and undecodable arguments are skipped with a warning.
pub fn recognize_tool_call(tool_calls: &[ToolCall]) -> Option<RecognizedTool> {
    for call in tool_calls {
        match call.function.name.as_str() {
            TOOL_COMPLAINT => match serde_json::from_str(&call.function.arguments) {
                Ok(args) => return Some(RecognizedTool::Complaint(args)),
                Err(e) => {
                    warn!(error = %e, "malformed complaint tool arguments, skipping");
                }
            },
            TOOL_CHANGE => match serde_json::from_str(&call.function.arguments) {
                Ok(args) => return Some(RecognizedTool::Change(args)),
                Err(e) => {
                    warn!(error = %e, "malformed order-change tool arguments, skipping");
                }
            },
            other => {
                warn!(tool = other, "unrecognized tool call, skipping");
            }
        }
    }
    None
}

/// Acknowledgement sent after a complaint is recorded.
pub fn complaint_reply(jenis_keluhan: ComplaintCategory, nomor_invoice: &str) -> String {
    format!(
        "Terima kasih telah memberi tahu kami tentang {jenis_keluhan}. Kami telah mencatat \
         keluhan Anda terkait pesanan dengan nomor invoice {nomor_invoice} dan akan \
         menanganinya sesegera mungkin. Kakak juga bisa ajukan pengembalian lewat menu \
         pengembalian di halaman pesanan ya kak dan mengikuti prosedur pengembalian dari \
         Shopee."
    )
}

/// Acknowledgement sent after an order change is recorded.
pub fn change_reply(nomor_invoice: &str) -> String {
    format!(
        "Terima kasih telah memberi tahu kami tentang perubahan yang Anda inginkan untuk \
         pesanan dengan nomor invoice {nomor_invoice}. Kami telah mencatat perubahan \
         tersebut dan akan menanganinya sesegera mungkin."
    )
}

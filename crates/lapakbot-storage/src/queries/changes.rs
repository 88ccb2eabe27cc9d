// SPDX-FileCopyrightText: 2026 Lapakbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Order-change record operations on the `perubahan_pesanan` table.

use lapakbot_core::LapakbotError;
use rusqlite::params;

use crate::database::Database;
use crate::models::{ChangeDetail, OrderChangeRecord};

/// Upsert an order-change request keyed by invoice number.
///
/// Same overwrite semantics as complaints: one live record per invoice.
pub async fn upsert_change(db: &Database, record: &OrderChangeRecord) -> Result<(), LapakbotError> {
    let record = record.clone();
    let perubahan_json = serde_json::to_string(&record.perubahan).map_err(|e| {
        LapakbotError::Storage {
            source: Box::new(e),
        }
    })?;
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO perubahan_pesanan
                   (nomor_invoice, id_pengguna, nama_toko, detail_perubahan,
                    perubahan, status_pesanan, store_id, msg_id, user_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                 ON CONFLICT(nomor_invoice) DO UPDATE SET
                   id_pengguna = excluded.id_pengguna,
                   nama_toko = excluded.nama_toko,
                   detail_perubahan = excluded.detail_perubahan,
                   perubahan = excluded.perubahan,
                   status_pesanan = excluded.status_pesanan,
                   store_id = excluded.store_id,
                   msg_id = excluded.msg_id,
                   user_id = excluded.user_id,
                   updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
                params![
                    record.nomor_invoice,
                    record.id_pengguna,
                    record.nama_toko,
                    record.detail_perubahan,
                    perubahan_json,
                    record.status_pesanan,
                    record.store_id,
                    record.msg_id,
                    record.user_id,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Whether a change request is already recorded for the invoice.
pub async fn change_exists(db: &Database, nomor_invoice: &str) -> Result<bool, LapakbotError> {
    let nomor_invoice = nomor_invoice.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt =
                conn.prepare("SELECT 1 FROM perubahan_pesanan WHERE nomor_invoice = ?1")?;
            Ok(stmt.exists(params![nomor_invoice])?)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get the change request recorded for an invoice, if any.
pub async fn get_change(
    db: &Database,
    nomor_invoice: &str,
) -> Result<Option<OrderChangeRecord>, LapakbotError> {
    let nomor_invoice = nomor_invoice.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT nomor_invoice, id_pengguna, nama_toko, detail_perubahan,
                        perubahan, status_pesanan, store_id, msg_id, user_id
                 FROM perubahan_pesanan WHERE nomor_invoice = ?1",
            )?;
            let result = stmt.query_row(params![nomor_invoice], |row| {
                let perubahan_json: String = row.get(4)?;
                let perubahan: ChangeDetail =
                    serde_json::from_str(&perubahan_json).map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(
                            4,
                            rusqlite::types::Type::Text,
                            Box::new(e),
                        )
                    })?;
                Ok(OrderChangeRecord {
                    nomor_invoice: row.get(0)?,
                    id_pengguna: row.get(1)?,
                    nama_toko: row.get(2)?,
                    detail_perubahan: row.get(3)?,
                    perubahan,
                    status_pesanan: row.get(5)?,
                    store_id: row.get(6)?,
                    msg_id: row.get(7)?,
                    user_id: row.get(8)?,
                })
            });
            match result {
                Ok(record) => Ok(Some(record)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

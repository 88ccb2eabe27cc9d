// SPDX-FileCopyrightText: 2026 Lapakbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Complaint record operations on the `keluhan` table.

use std::str::FromStr;

use lapakbot_core::types::ComplaintCategory;
use lapakbot_core::LapakbotError;
use rusqlite::params;

use crate::database::Database;
use crate::models::ComplaintRecord;

/// Upsert a complaint keyed by invoice number.
///
/// A second complaint for the same invoice overwrites the first; no history
/// is retained.
pub async fn upsert_complaint(db: &Database, record: &ComplaintRecord) -> Result<(), LapakbotError> {
    let record = record.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO keluhan
                   (nomor_invoice, id_pengguna, nama_toko, jenis_keluhan,
                    deskripsi_keluhan, status_pesanan, store_id, msg_id, user_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                 ON CONFLICT(nomor_invoice) DO UPDATE SET
                   id_pengguna = excluded.id_pengguna,
                   nama_toko = excluded.nama_toko,
                   jenis_keluhan = excluded.jenis_keluhan,
                   deskripsi_keluhan = excluded.deskripsi_keluhan,
                   status_pesanan = excluded.status_pesanan,
                   store_id = excluded.store_id,
                   msg_id = excluded.msg_id,
                   user_id = excluded.user_id,
                   updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
                params![
                    record.nomor_invoice,
                    record.id_pengguna,
                    record.nama_toko,
                    record.jenis_keluhan.to_string(),
                    record.deskripsi_keluhan,
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

/// Whether a complaint is already recorded for the invoice.
pub async fn complaint_exists(db: &Database, nomor_invoice: &str) -> Result<bool, LapakbotError> {
    let nomor_invoice = nomor_invoice.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare("SELECT 1 FROM keluhan WHERE nomor_invoice = ?1")?;
            Ok(stmt.exists(params![nomor_invoice])?)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get the complaint recorded for an invoice, if any.
pub async fn get_complaint(
    db: &Database,
    nomor_invoice: &str,
) -> Result<Option<ComplaintRecord>, LapakbotError> {
    let nomor_invoice = nomor_invoice.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT nomor_invoice, id_pengguna, nama_toko, jenis_keluhan,
                        deskripsi_keluhan, status_pesanan, store_id, msg_id, user_id
                 FROM keluhan WHERE nomor_invoice = ?1",
            )?;
            let result = stmt.query_row(params![nomor_invoice], |row| {
                let jenis: String = row.get(3)?;
                let jenis_keluhan = ComplaintCategory::from_str(&jenis).map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(
                        3,
                        rusqlite::types::Type::Text,
                        Box::new(e),
                    )
                })?;
                Ok(ComplaintRecord {
                    nomor_invoice: row.get(0)?,
                    id_pengguna: row.get(1)?,
                    nama_toko: row.get(2)?,
                    jenis_keluhan,
                    deskripsi_keluhan: row.get(4)?,
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

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    fn make_complaint(invoice: &str) -> ComplaintRecord {
        ComplaintRecord {
            id_pengguna: "vn_cstoreponorogo".to_string(),
            nama_toko: "keelatofficial".to_string(),
            jenis_keluhan: ComplaintCategory::ProdukRusak,
            deskripsi_keluhan: "Jahitan lepas di bagian lengan".to_string(),
            nomor_invoice: invoice.to_string(),
            status_pesanan: "SHIPPED".to_string(),
            store_id: "165103149".to_string(),
            msg_id: "2302748948493123953".to_string(),
            user_id: 947151379,
        }
    }

    #[tokio::test]
    async fn upsert_and_get_round_trips() {
        let (db, _dir) = setup_db().await;
        let record = make_complaint("INV123");

        upsert_complaint(&db, &record).await.unwrap();
        let stored = get_complaint(&db, "INV123").await.unwrap().unwrap();
        assert_eq!(stored.nomor_invoice, "INV123");
        assert_eq!(stored.jenis_keluhan, ComplaintCategory::ProdukRusak);
        assert_eq!(stored.deskripsi_keluhan, "Jahitan lepas di bagian lengan");

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn second_upsert_overwrites_first() {
        let (db, _dir) = setup_db().await;
        upsert_complaint(&db, &make_complaint("INV123")).await.unwrap();

        let mut second = make_complaint("INV123");
        second.jenis_keluhan = ComplaintCategory::ProdukTidakLengkap;
        second.deskripsi_keluhan = "Hanya 2 dari 3 item".to_string();
        upsert_complaint(&db, &second).await.unwrap();

        let stored = get_complaint(&db, "INV123").await.unwrap().unwrap();
        assert_eq!(stored.jenis_keluhan, ComplaintCategory::ProdukTidakLengkap);
        assert_eq!(stored.deskripsi_keluhan, "Hanya 2 dari 3 item");

        // Still one live record for the invoice.
        let count: i64 = db
            .connection()
            .call(|conn| {
                Ok::<_, rusqlite::Error>(conn.query_row(
                    "SELECT COUNT(*) FROM keluhan",
                    [],
                    |row| row.get(0),
                )?)
            })
            .await
            .unwrap();
        assert_eq!(count, 1);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn exists_reflects_stored_rows() {
        let (db, _dir) = setup_db().await;
        assert!(!complaint_exists(&db, "INV999").await.unwrap());

        upsert_complaint(&db, &make_complaint("INV999")).await.unwrap();
        assert!(complaint_exists(&db, "INV999").await.unwrap());

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn get_missing_invoice_returns_none() {
        let (db, _dir) = setup_db().await;
        assert!(get_complaint(&db, "NOPE").await.unwrap().is_none());
        db.close().await.unwrap();
    }
}

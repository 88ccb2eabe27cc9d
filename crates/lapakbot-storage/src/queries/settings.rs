// SPDX-FileCopyrightText: 2026 Lapakbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Settings row operations.
//!
//! The `settings` table holds at most one row (id = 1). The bot reads it
//! once at startup; values present there override the TOML config.

use lapakbot_core::LapakbotError;
use rusqlite::params;

use crate::database::Database;
use crate::models::BotSettings;

/// Read the settings row, if one has been seeded.
pub async fn read_settings(db: &Database) -> Result<Option<BotSettings>, LapakbotError> {
    db.connection()
        .call(|conn| {
            let result = conn.query_row(
                "SELECT openai_api, openai_model, openai_temperature, openai_prompt
                 FROM settings WHERE id = 1",
                [],
                |row| {
                    Ok(BotSettings {
                        openai_api: row.get(0)?,
                        openai_model: row.get(1)?,
                        openai_temperature: row.get(2)?,
                        openai_prompt: row.get(3)?,
                    })
                },
            );
            match result {
                Ok(settings) => Ok(Some(settings)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Write the settings row, replacing any existing one.
pub async fn write_settings(db: &Database, settings: &BotSettings) -> Result<(), LapakbotError> {
    let settings = settings.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO settings (id, openai_api, openai_model, openai_temperature, openai_prompt)
                 VALUES (1, ?1, ?2, ?3, ?4)
                 ON CONFLICT(id) DO UPDATE SET
                   openai_api = excluded.openai_api,
                   openai_model = excluded.openai_model,
                   openai_temperature = excluded.openai_temperature,
                   openai_prompt = excluded.openai_prompt",
                params![
                    settings.openai_api,
                    settings.openai_model,
                    settings.openai_temperature,
                    settings.openai_prompt,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

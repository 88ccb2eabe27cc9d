// SPDX-FileCopyrightText: 2026 Lapakbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query modules. Each accepts `&Database` and routes through the
//! single-writer connection.

pub mod changes;
pub mod complaints;
pub mod settings;

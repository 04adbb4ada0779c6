// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI subcommands.

mod decode;
mod describe;
mod schema;

pub use decode::DecodeCmd;
pub use describe::DescribeCmd;
pub use schema::SchemaCmd;

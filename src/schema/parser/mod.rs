// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema parser implementations.

pub mod descriptor_parser;

pub use descriptor_parser::{parse, parse_with_params, DescriptorParser};

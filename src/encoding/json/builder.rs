// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Builder pattern for creating JSON decoders.
//!
//! The `DecoderBuilder` provides a fluent API for configuring the decoding
//! policies before binding a decoder to a registry. The same settings can be
//! read from the `[decoder]` table of a schema document.

use serde::{Deserialize, Serialize};

use super::decoder::JsonDecoder;
use crate::encoding::registry::FieldCodecRegistry;

/// Default limit on descriptor/JSON nesting.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// What to do with a JSON `null` where a non-nullable primitive is expected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullPolicy {
    /// Fail with `TypeMismatch`
    #[default]
    Reject,
    /// Use the primitive's zero value (`false`, `0`, `0.0`, `""`)
    Default,
}

/// What to do with JSON object keys a record does not declare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownFieldPolicy {
    /// Skip the key
    #[default]
    Ignore,
    /// Fail with `UnknownField`
    Reject,
}

/// Configuration for a decoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecoderConfig {
    /// Maximum nesting depth before `DepthExceeded`
    pub max_depth: usize,
    /// Null handling for primitives
    pub null_primitives: NullPolicy,
    /// Handling of undeclared record keys
    pub unknown_fields: UnknownFieldPolicy,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            null_primitives: NullPolicy::Reject,
            unknown_fields: UnknownFieldPolicy::Ignore,
        }
    }
}

/// Builder for creating JSON decoders.
///
/// # Example
///
/// ```
/// use typecodec::encoding::json::{DecoderBuilder, NullPolicy};
/// use typecodec::encoding::FieldCodecRegistry;
///
/// let registry = FieldCodecRegistry::new();
/// let decoder = DecoderBuilder::new()
///     .max_depth(32)
///     .null_primitives(NullPolicy::Default)
///     .build(&registry);
/// assert_eq!(decoder.config().max_depth, 32);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DecoderBuilder {
    config: DecoderConfig,
}

impl DecoderBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    pub fn from_config(config: DecoderConfig) -> Self {
        Self { config }
    }

    /// Set the maximum nesting depth.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    /// Set the null policy for primitives.
    pub fn null_primitives(mut self, policy: NullPolicy) -> Self {
        self.config.null_primitives = policy;
        self
    }

    /// Set the policy for undeclared record keys.
    pub fn unknown_fields(mut self, policy: UnknownFieldPolicy) -> Self {
        self.config.unknown_fields = policy;
        self
    }

    /// Get the configuration built so far.
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Bind the configuration to a registry.
    pub fn build(self, registry: &FieldCodecRegistry) -> JsonDecoder<'_> {
        JsonDecoder::with_config(registry, self.config)
    }
}

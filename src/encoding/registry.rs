// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Field codec registry.
//!
//! Maps record identities to their [`FieldCodec`]. The registry is filled
//! once during setup (by the schema loader or by hand) and only read while
//! decoding:
//! - `register` takes `&mut self`, every decode path borrows `&self`
//! - share a finished registry across threads with `Arc<FieldCodecRegistry>`
//! - or install it once as the process-wide registry with [`install_global`]
//!
//! # Example
//!
//! ```
//! use typecodec::encoding::{FieldCodec, FieldCodecRegistry};
//! use typecodec::TypeDescriptor;
//!
//! let mut registry = FieldCodecRegistry::new();
//! registry
//!     .register(
//!         FieldCodec::builder("Version")
//!             .field("major", TypeDescriptor::int32())
//!             .build()
//!             .unwrap(),
//!     )
//!     .unwrap();
//! assert!(registry.lookup("Version").is_some());
//! ```

use std::sync::OnceLock;

use indexmap::IndexMap;
use tracing::debug;

use super::codec::FieldCodec;
use crate::core::{DecodeError, Result};

/// Registry of record codecs, keyed by record identity.
#[derive(Debug, Default, Clone)]
pub struct FieldCodecRegistry {
    codecs: IndexMap<String, FieldCodec>,
}

impl FieldCodecRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a codec under its own identity.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::DuplicateRegistration` if the identity is
    /// already registered. The existing codec is left untouched.
    pub fn register(&mut self, codec: FieldCodec) -> Result<()> {
        let identity = codec.identity().to_string();
        if self.codecs.contains_key(&identity) {
            return Err(DecodeError::duplicate(identity));
        }
        debug!(
            record = %identity,
            fields = codec.fields().len(),
            type_params = codec.type_params().len(),
            "registered field codec"
        );
        self.codecs.insert(identity, codec);
        Ok(())
    }

    /// Register several codecs, stopping at the first duplicate.
    pub fn register_all(&mut self, codecs: impl IntoIterator<Item = FieldCodec>) -> Result<()> {
        for codec in codecs {
            self.register(codec)?;
        }
        Ok(())
    }

    /// Look up the codec for a record identity.
    ///
    /// Returns `None` rather than failing; the decoder reports the miss as
    /// `UnknownType` with the full location.
    pub fn lookup(&self, identity: &str) -> Option<&FieldCodec> {
        self.codecs.get(identity)
    }

    /// Check if an identity is registered.
    pub fn contains(&self, identity: &str) -> bool {
        self.codecs.contains_key(identity)
    }

    /// Registered identities, in registration order.
    pub fn identities(&self) -> impl Iterator<Item = &str> {
        self.codecs.keys().map(String::as_str)
    }

    /// Get the number of registered codecs.
    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }
}

/// Process-wide registry, set once at startup.
static GLOBAL_REGISTRY: OnceLock<FieldCodecRegistry> = OnceLock::new();

/// Install the process-wide registry.
///
/// # Errors
///
/// Fails with `DecodeError::DuplicateRegistration` (identity `"<global>"`)
/// when a global registry was already installed.
pub fn install_global(registry: FieldCodecRegistry) -> Result<&'static FieldCodecRegistry> {
    let count = registry.len();
    GLOBAL_REGISTRY
        .set(registry)
        .map_err(|_| DecodeError::duplicate("<global>"))?;
    debug!(codecs = count, "installed global field codec registry");
    Ok(global_registry())
}

/// Get the process-wide registry.
///
/// Before [`install_global`] has run this is an empty registry, and that
/// empty registry stays installed.
pub fn global_registry() -> &'static FieldCodecRegistry {
    GLOBAL_REGISTRY.get_or_init(FieldCodecRegistry::new)
}

// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Field codecs for record types.
//!
//! A [`FieldCodec`] is everything the decoding engine needs to know about one
//! record type:
//!
//! - **Identity** - the name descriptors use to refer to the record
//! - **Type parameters** - names like `T` that field descriptors may reference
//! - **Fields** - ordered `(name, descriptor, presence)` declarations
//! - **Constructor** - builds the record from the decoded field values
//!
//! Codecs come from an external schema layer: the TOML loader in
//! [`crate::schema`], or hand-written registration through [`FieldCodecBuilder`].
//!
//! ## Example
//!
//! ```
//! use typecodec::encoding::FieldCodec;
//! use typecodec::TypeDescriptor;
//!
//! let version = FieldCodec::builder("Version")
//!     .field("major", TypeDescriptor::int32())
//!     .field("minor", TypeDescriptor::int32())
//!     .build()
//!     .unwrap();
//! assert_eq!(version.fields().len(), 2);
//! ```

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use crate::core::{DecodeError, DecodedValue, FieldValues, Record, Result, TypeDescriptor};

/// Whether a field's key must be present in the JSON object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Absent key is a `MissingField` error
    Required,
    /// Absent key decodes to `DecodedValue::Absent`
    Optional,
}

/// One declared field of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// JSON key and field name
    pub name: String,
    /// Descriptor of the field value (may reference type parameters)
    pub descriptor: TypeDescriptor,
    /// Required or optional key
    pub presence: Presence,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, descriptor: TypeDescriptor, presence: Presence) -> Self {
        Self {
            name: name.into(),
            descriptor,
            presence,
        }
    }

    pub fn is_required(&self) -> bool {
        self.presence == Presence::Required
    }
}

/// Record construction function.
///
/// Receives the record identity and the decoded fields in declaration order.
/// An `Err` message is reported as `DecodeError::Construction` at the
/// record's location.
pub type Constructor =
    Arc<dyn Fn(&str, FieldValues) -> std::result::Result<DecodedValue, String> + Send + Sync>;

/// Decoding contract for one record type.
#[derive(Clone)]
pub struct FieldCodec {
    identity: String,
    type_params: Vec<String>,
    fields: Vec<FieldSpec>,
    constructor: Constructor,
}

impl FieldCodec {
    /// Start building a codec for `identity`.
    pub fn builder(identity: impl Into<String>) -> FieldCodecBuilder {
        FieldCodecBuilder {
            identity: identity.into(),
            type_params: Vec::new(),
            fields: Vec::new(),
            constructor: None,
        }
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Generic parameter names, in declaration order.
    pub fn type_params(&self) -> &[String] {
        &self.type_params
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Check if `key` is a declared field name.
    pub fn declares(&self, key: &str) -> bool {
        self.field(key).is_some()
    }

    /// Bind the codec's type parameters to the arguments of a record descriptor.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::Arity` when the argument count does not match
    /// the declared parameters.
    pub fn bind(&self, args: &[TypeDescriptor]) -> Result<HashMap<String, TypeDescriptor>> {
        if args.len() != self.type_params.len() {
            return Err(DecodeError::arity(
                &self.identity,
                self.type_params.len(),
                args.len(),
            ));
        }
        Ok(self
            .type_params
            .iter()
            .cloned()
            .zip(args.iter().cloned())
            .collect())
    }

    /// Run the construction function.
    pub fn construct(&self, values: FieldValues) -> std::result::Result<DecodedValue, String> {
        (self.constructor)(&self.identity, values)
    }
}

impl fmt::Debug for FieldCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldCodec")
            .field("identity", &self.identity)
            .field("type_params", &self.type_params)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

/// Default constructor: a plain [`Record`] holding the decoded fields.
fn plain_record(identity: &str, values: FieldValues) -> std::result::Result<DecodedValue, String> {
    Ok(DecodedValue::Record(Record::new(identity, values)))
}

/// Builder for [`FieldCodec`].
pub struct FieldCodecBuilder {
    identity: String,
    type_params: Vec<String>,
    fields: Vec<FieldSpec>,
    constructor: Option<Constructor>,
}

impl FieldCodecBuilder {
    /// Declare a generic parameter (e.g. `T` in `MultiResult<T>`).
    pub fn type_param(mut self, name: impl Into<String>) -> Self {
        self.type_params.push(name.into());
        self
    }

    /// Declare a required field.
    pub fn field(mut self, name: impl Into<String>, descriptor: TypeDescriptor) -> Self {
        self.fields
            .push(FieldSpec::new(name, descriptor, Presence::Required));
        self
    }

    /// Declare a nullable-optional field: the key may be missing or null.
    ///
    /// The descriptor is wrapped in `nullable` unless it already is.
    pub fn nullable_field(mut self, name: impl Into<String>, descriptor: TypeDescriptor) -> Self {
        let descriptor = if descriptor.is_nullable() {
            descriptor
        } else {
            TypeDescriptor::nullable(descriptor)
        };
        self.fields
            .push(FieldSpec::new(name, descriptor, Presence::Optional));
        self
    }

    /// Declare a field with explicit presence.
    pub fn field_spec(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    /// Replace the default constructor.
    pub fn constructor<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, FieldValues) -> std::result::Result<DecodedValue, String>
            + Send
            + Sync
            + 'static,
    {
        self.constructor = Some(Arc::new(f));
        self
    }

    /// Finish the codec.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::Parse` (context "record schema") for duplicate
    /// field or parameter names, and for field descriptors that reference an
    /// undeclared parameter.
    pub fn build(self) -> Result<FieldCodec> {
        let context = format!("record schema '{}'", self.identity);

        let mut params = HashSet::new();
        for param in &self.type_params {
            if !params.insert(param.as_str()) {
                return Err(DecodeError::parse(
                    context,
                    format!("duplicate type parameter '{param}'"),
                ));
            }
        }

        let mut names = HashSet::new();
        for field in &self.fields {
            if !names.insert(field.name.as_str()) {
                return Err(DecodeError::parse(
                    context,
                    format!("duplicate field '{}'", field.name),
                ));
            }
            if let Some(free) = first_free_param(&field.descriptor, &params) {
                return Err(DecodeError::parse(
                    context,
                    format!("field '{}' uses undeclared type parameter '{free}'", field.name),
                ));
            }
        }

        Ok(FieldCodec {
            identity: self.identity,
            type_params: self.type_params,
            fields: self.fields,
            constructor: self.constructor.unwrap_or_else(|| Arc::new(plain_record)),
        })
    }
}

fn first_free_param(descriptor: &TypeDescriptor, declared: &HashSet<&str>) -> Option<String> {
    if let crate::core::BaseIdentity::Param(name) = descriptor.base() {
        if !declared.contains(name.as_str()) {
            return Some(name.clone());
        }
    }
    descriptor
        .args()
        .iter()
        .find_map(|arg| first_free_param(arg, declared))
}

// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Type descriptors.
//!
//! A [`TypeDescriptor`] is an explicit, inspectable description of a decode
//! target, nested generic parameters included. It is the value that drives
//! the decoding engine, so a single recursive routine can serve
//! `mapping<string, sequence<Record>>` as well as `sequence<mapping<string, Record>>`
//! without a dedicated decode path per shape.
//!
//! Descriptors are immutable and cheap to clone (the node tree is shared).

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::error::{DecodeError, Result};

/// What a descriptor node is, independent of its type arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BaseIdentity {
    /// Boolean
    Bool,
    /// 8-bit signed integer
    Int8,
    /// 16-bit signed integer
    Int16,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 8-bit unsigned integer
    UInt8,
    /// 16-bit unsigned integer
    UInt16,
    /// 32-bit unsigned integer
    UInt32,
    /// 64-bit unsigned integer
    UInt64,
    /// 32-bit float
    Float32,
    /// 64-bit float
    Float64,
    /// UTF-8 string
    String,
    /// Untyped JSON, kept as-is
    Any,
    /// Ordered sequence, one argument (element)
    Sequence,
    /// Ordered mapping, two arguments (key, value)
    Mapping,
    /// Value that may be null or absent, one argument
    Nullable,
    /// Record resolved through the field codec registry
    Record(String),
    /// Generic parameter of a record field declaration (e.g. `T`)
    Param(String),
}

impl BaseIdentity {
    /// Number of type arguments this identity takes, if fixed.
    ///
    /// Records return `None`: their arity is declared by their field codec.
    pub fn arity(&self) -> Option<usize> {
        match self {
            BaseIdentity::Sequence | BaseIdentity::Nullable => Some(1),
            BaseIdentity::Mapping => Some(2),
            BaseIdentity::Record(_) => None,
            _ => Some(0),
        }
    }

    /// Check if this is a scalar with a built-in handler.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            BaseIdentity::Bool
                | BaseIdentity::Int8
                | BaseIdentity::Int16
                | BaseIdentity::Int32
                | BaseIdentity::Int64
                | BaseIdentity::UInt8
                | BaseIdentity::UInt16
                | BaseIdentity::UInt32
                | BaseIdentity::UInt64
                | BaseIdentity::Float32
                | BaseIdentity::Float64
                | BaseIdentity::String
        )
    }

    /// Check if this is an integer primitive.
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            BaseIdentity::Int8
                | BaseIdentity::Int16
                | BaseIdentity::Int32
                | BaseIdentity::Int64
                | BaseIdentity::UInt8
                | BaseIdentity::UInt16
                | BaseIdentity::UInt32
                | BaseIdentity::UInt64
        )
    }

    /// Canonical name used in renderings.
    pub fn name(&self) -> &str {
        match self {
            BaseIdentity::Bool => "bool",
            BaseIdentity::Int8 => "int8",
            BaseIdentity::Int16 => "int16",
            BaseIdentity::Int32 => "int32",
            BaseIdentity::Int64 => "int64",
            BaseIdentity::UInt8 => "uint8",
            BaseIdentity::UInt16 => "uint16",
            BaseIdentity::UInt32 => "uint32",
            BaseIdentity::UInt64 => "uint64",
            BaseIdentity::Float32 => "float32",
            BaseIdentity::Float64 => "float64",
            BaseIdentity::String => "string",
            BaseIdentity::Any => "any",
            BaseIdentity::Sequence => "sequence",
            BaseIdentity::Mapping => "mapping",
            BaseIdentity::Nullable => "nullable",
            BaseIdentity::Record(name) | BaseIdentity::Param(name) => name.as_str(),
        }
    }

    /// Resolve a built-in identity from its canonical name or an alias.
    ///
    /// Returns `None` for anything else; callers treat those names as records.
    pub fn builtin(name: &str) -> Option<Self> {
        let base = match name {
            "bool" | "boolean" => BaseIdentity::Bool,
            "int8" | "byte" => BaseIdentity::Int8,
            "int16" | "short" => BaseIdentity::Int16,
            "int32" | "int" | "integer" => BaseIdentity::Int32,
            "int64" | "long" => BaseIdentity::Int64,
            "uint8" => BaseIdentity::UInt8,
            "uint16" => BaseIdentity::UInt16,
            "uint32" => BaseIdentity::UInt32,
            "uint64" => BaseIdentity::UInt64,
            "float32" | "float" => BaseIdentity::Float32,
            "float64" | "double" | "number" => BaseIdentity::Float64,
            "string" => BaseIdentity::String,
            "any" | "json" => BaseIdentity::Any,
            "sequence" | "list" | "array" => BaseIdentity::Sequence,
            "mapping" | "map" => BaseIdentity::Mapping,
            "nullable" | "option" => BaseIdentity::Nullable,
            _ => return None,
        };
        Some(base)
    }
}

#[derive(Debug, PartialEq, Eq, Hash)]
struct Node {
    base: BaseIdentity,
    args: Vec<TypeDescriptor>,
}

/// Immutable description of a decode target.
///
/// Equality and hashing are structural: base identity and every type
/// argument, recursively.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    node: Arc<Node>,
}

impl TypeDescriptor {
    /// Build a descriptor, checking the argument count of built-in kinds.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::Arity` when `args` does not match the arity of
    /// a primitive (0), `sequence` (1), `nullable` (1) or `mapping` (2).
    /// Record arity is checked against its codec at decode time.
    pub fn describe(base: BaseIdentity, args: Vec<TypeDescriptor>) -> Result<Self> {
        if let Some(expected) = base.arity() {
            if args.len() != expected {
                return Err(DecodeError::arity(base.name(), expected, args.len()));
            }
        }
        Ok(Self::from_parts(base, args))
    }

    fn from_parts(base: BaseIdentity, args: Vec<TypeDescriptor>) -> Self {
        Self {
            node: Arc::new(Node { base, args }),
        }
    }

    pub(crate) fn leaf(base: BaseIdentity) -> Self {
        Self::from_parts(base, Vec::new())
    }

    pub fn bool() -> Self {
        Self::leaf(BaseIdentity::Bool)
    }

    pub fn int8() -> Self {
        Self::leaf(BaseIdentity::Int8)
    }

    pub fn int16() -> Self {
        Self::leaf(BaseIdentity::Int16)
    }

    pub fn int32() -> Self {
        Self::leaf(BaseIdentity::Int32)
    }

    pub fn int64() -> Self {
        Self::leaf(BaseIdentity::Int64)
    }

    pub fn uint8() -> Self {
        Self::leaf(BaseIdentity::UInt8)
    }

    pub fn uint16() -> Self {
        Self::leaf(BaseIdentity::UInt16)
    }

    pub fn uint32() -> Self {
        Self::leaf(BaseIdentity::UInt32)
    }

    pub fn uint64() -> Self {
        Self::leaf(BaseIdentity::UInt64)
    }

    pub fn float32() -> Self {
        Self::leaf(BaseIdentity::Float32)
    }

    pub fn float64() -> Self {
        Self::leaf(BaseIdentity::Float64)
    }

    pub fn string() -> Self {
        Self::leaf(BaseIdentity::String)
    }

    /// Untyped JSON.
    pub fn any() -> Self {
        Self::leaf(BaseIdentity::Any)
    }

    /// `sequence<element>`
    pub fn sequence_of(element: TypeDescriptor) -> Self {
        Self::from_parts(BaseIdentity::Sequence, vec![element])
    }

    /// `mapping<key, value>`
    pub fn mapping_of(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        Self::from_parts(BaseIdentity::Mapping, vec![key, value])
    }

    /// `nullable<inner>`
    pub fn nullable(inner: TypeDescriptor) -> Self {
        Self::from_parts(BaseIdentity::Nullable, vec![inner])
    }

    /// Non-generic record.
    pub fn record(name: impl Into<String>) -> Self {
        Self::leaf(BaseIdentity::Record(name.into()))
    }

    /// Generic record applied to type arguments (e.g. `MultiResult<Plan>`).
    pub fn record_with(name: impl Into<String>, args: Vec<TypeDescriptor>) -> Self {
        Self::from_parts(BaseIdentity::Record(name.into()), args)
    }

    /// Generic parameter reference, used inside record field declarations.
    pub fn param(name: impl Into<String>) -> Self {
        Self::leaf(BaseIdentity::Param(name.into()))
    }

    /// Base identity of this node.
    pub fn base(&self) -> &BaseIdentity {
        &self.node.base
    }

    /// Type arguments, in order.
    pub fn args(&self) -> &[TypeDescriptor] {
        &self.node.args
    }

    /// Type argument at `index`.
    pub fn arg(&self, index: usize) -> Option<&TypeDescriptor> {
        self.node.args.get(index)
    }

    /// Record identity, if this describes a record.
    pub fn record_name(&self) -> Option<&str> {
        match self.base() {
            BaseIdentity::Record(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self.base(), BaseIdentity::Nullable)
    }

    /// Check if no generic parameter reference remains anywhere in the tree.
    pub fn is_closed(&self) -> bool {
        !matches!(self.base(), BaseIdentity::Param(_)) && self.args().iter().all(Self::is_closed)
    }

    /// Nesting depth of the descriptor tree (a leaf has depth 1).
    pub fn depth(&self) -> usize {
        1 + self.args().iter().map(Self::depth).max().unwrap_or(0)
    }

    /// Replace generic parameter references with bound descriptors.
    ///
    /// Unbound parameters are left in place.
    pub fn substitute(&self, bindings: &HashMap<String, TypeDescriptor>) -> TypeDescriptor {
        if let BaseIdentity::Param(name) = self.base() {
            return bindings.get(name).cloned().unwrap_or_else(|| self.clone());
        }
        if self.args().is_empty() || self.is_closed() {
            return self.clone();
        }
        let args = self.args().iter().map(|a| a.substitute(bindings)).collect();
        Self::from_parts(self.base().clone(), args)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base().name())?;
        if !self.args().is_empty() {
            write!(f, "<")?;
            for (i, arg) in self.args().iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{arg}")?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeDescriptor({self})")
    }
}

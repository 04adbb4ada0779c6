// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Parser for textual type descriptors.
//!
//! Accepts the rendering produced by `TypeDescriptor`'s `Display`
//! (`mapping<string, sequence<ReferenceLink>>`) plus some sugar:
//!
//! - `T?` for `nullable<T>`
//! - aliases such as `integer`, `long`, `list`, `map`, `option`
//!
//! Names that are not built-ins are record identities, unless they appear in
//! the supplied type parameter list, in which case they become parameter
//! references.

use std::str::FromStr;

use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

use crate::core::{BaseIdentity, DecodeError, Result, TypeDescriptor};

/// Pest parser for type descriptor text.
#[derive(Parser)]
#[grammar = "schema/parser/descriptor_parser/descriptor.pest"] // Path relative to src/ directory
pub struct DescriptorParser;

/// Parse a closed descriptor (no type parameters in scope).
pub fn parse(text: &str) -> Result<TypeDescriptor> {
    parse_with_params(text, &[])
}

/// Parse a descriptor in the scope of a generic record's parameters.
///
/// # Errors
///
/// - `DecodeError::Parse` for malformed text, or a parameter given arguments
/// - `DecodeError::Arity` for built-ins with the wrong number of arguments
pub fn parse_with_params(text: &str, params: &[String]) -> Result<TypeDescriptor> {
    let mut pairs = DescriptorParser::parse(Rule::descriptor, text)
        .map_err(|e| DecodeError::parse("type descriptor", format!("{e}")))?;

    // descriptor = SOI ~ type_expr ~ EOI
    let expr = pairs
        .next()
        .and_then(|descriptor| {
            descriptor
                .into_inner()
                .find(|pair| pair.as_rule() == Rule::type_expr)
        })
        .ok_or_else(|| DecodeError::parse("type descriptor", format!("empty descriptor '{text}'")))?;

    build(expr, params)
}

fn build(pair: Pair<'_, Rule>, params: &[String]) -> Result<TypeDescriptor> {
    let mut name = "";
    let mut args = Vec::new();
    let mut nullable = false;

    for item in pair.into_inner() {
        match item.as_rule() {
            Rule::ident => name = item.as_str(),
            Rule::type_args => {
                for arg in item.into_inner() {
                    args.push(build(arg, params)?);
                }
            }
            Rule::nullable_mark => nullable = true,
            _ => {}
        }
    }

    let base = if params.iter().any(|p| p == name) {
        if !args.is_empty() {
            return Err(DecodeError::parse(
                "type descriptor",
                format!("type parameter '{name}' cannot take type arguments"),
            ));
        }
        BaseIdentity::Param(name.to_string())
    } else {
        BaseIdentity::builtin(name).unwrap_or_else(|| BaseIdentity::Record(name.to_string()))
    };

    let descriptor = TypeDescriptor::describe(base, args)?;
    if nullable && !descriptor.is_nullable() {
        Ok(TypeDescriptor::nullable(descriptor))
    } else {
        Ok(descriptor)
    }
}

impl FromStr for TypeDescriptor {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}

impl TypeDescriptor {
    /// Parse descriptor text; see [`parse`].
    pub fn parse(text: &str) -> Result<Self> {
        parse(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested() {
        let ty = parse("mapping<string, sequence<ReferenceLink>>").unwrap();
        assert_eq!(
            ty,
            TypeDescriptor::mapping_of(
                TypeDescriptor::string(),
                TypeDescriptor::sequence_of(TypeDescriptor::record("ReferenceLink")),
            )
        );
    }

    #[test]
    fn test_parse_render_round_trip() {
        let samples = [
            TypeDescriptor::int64(),
            TypeDescriptor::nullable(TypeDescriptor::string()),
            TypeDescriptor::sequence_of(TypeDescriptor::mapping_of(
                TypeDescriptor::uint16(),
                TypeDescriptor::record("Plan"),
            )),
            TypeDescriptor::record_with(
                "MultiResult",
                vec![TypeDescriptor::sequence_of(TypeDescriptor::any())],
            ),
        ];
        for ty in samples {
            assert_eq!(parse(&ty.to_string()).unwrap(), ty);
        }
    }

    #[test]
    fn test_aliases_and_sugar() {
        assert_eq!(
            parse("list<integer>").unwrap(),
            TypeDescriptor::sequence_of(TypeDescriptor::int32())
        );
        assert_eq!(
            parse("map<string, long?>").unwrap(),
            TypeDescriptor::mapping_of(
                TypeDescriptor::string(),
                TypeDescriptor::nullable(TypeDescriptor::int64())
            )
        );
        assert_eq!(
            parse("option<string>?").unwrap(),
            TypeDescriptor::nullable(TypeDescriptor::string())
        );
        assert_eq!(" double ".parse::<TypeDescriptor>().unwrap(), TypeDescriptor::float64());
    }

    #[test]
    fn test_params_in_scope() {
        let params = vec!["T".to_string()];
        let ty = parse_with_params("sequence<T>", &params).unwrap();
        assert_eq!(ty, TypeDescriptor::sequence_of(TypeDescriptor::param("T")));

        // Out of scope, `T` is a record name
        let ty = parse("sequence<T>").unwrap();
        assert_eq!(ty, TypeDescriptor::sequence_of(TypeDescriptor::record("T")));

        let err = parse_with_params("T<string>", &params).unwrap_err();
        assert_eq!(err.kind(), "parse");
    }

    #[test]
    fn test_arity_errors() {
        let err = parse("sequence").unwrap_err();
        assert_eq!(err, DecodeError::arity("sequence", 1, 0));
        let err = parse("sequence<string, string>").unwrap_err();
        assert_eq!(err.kind(), "arity");
        let err = parse("mapping<string>").unwrap_err();
        assert_eq!(err, DecodeError::arity("mapping", 2, 1));
    }

    #[test]
    fn test_syntax_errors() {
        for text in ["", "sequence<", "mapping<string,>", "1abc", "a b"] {
            let err = parse(text).unwrap_err();
            assert_eq!(err.kind(), "parse", "input {text:?}");
        }
    }
}

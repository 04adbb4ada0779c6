// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Error locations.
//!
//! A [`Location`] pins a decode failure to the JSON node that triggered it
//! (as an RFC 6901 JSON pointer) and to the chain of type descriptors the
//! engine was following when it got there.

use std::fmt;

/// One step from a parent JSON node to a child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Element of a JSON array
    Index(usize),
    /// Entry of a JSON object decoded as a mapping
    Key(String),
    /// Field of a JSON object decoded as a record
    Field(String),
}

impl Segment {
    fn write_pointer(&self, out: &mut String) {
        out.push('/');
        match self {
            Segment::Index(i) => out.push_str(&i.to_string()),
            Segment::Key(k) | Segment::Field(k) => {
                for c in k.chars() {
                    match c {
                        '~' => out.push_str("~0"),
                        '/' => out.push_str("~1"),
                        c => out.push(c),
                    }
                }
            }
        }
    }
}

/// Where a decode error happened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    /// JSON pointer to the offending node (empty string = document root)
    pub pointer: String,
    /// Rendered descriptors from the root target down to the failing one
    pub type_path: Vec<String>,
}

impl Location {
    /// Location of the document root with no descriptor context.
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a location from the segments walked so far and the descriptors
    /// that were active along the way.
    pub fn new<'a, S, T>(segments: S, type_path: T) -> Self
    where
        S: IntoIterator<Item = &'a Segment>,
        T: IntoIterator<Item = String>,
    {
        let mut pointer = String::new();
        for segment in segments {
            segment.write_pointer(&mut pointer);
        }
        Self {
            pointer,
            type_path: type_path.into_iter().collect(),
        }
    }

    /// Location with only a descriptor context (used by typed materialization).
    pub fn of_type(rendered: impl Into<String>) -> Self {
        Self {
            pointer: String::new(),
            type_path: vec![rendered.into()],
        }
    }

    /// Check if this points at the document root.
    pub fn is_root(&self) -> bool {
        self.pointer.is_empty()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            write!(f, "<root>")?;
        } else {
            write!(f, "{}", self.pointer)?;
        }
        if !self.type_path.is_empty() {
            write!(f, " ({})", self.type_path.join(" > "))?;
        }
        Ok(())
    }
}

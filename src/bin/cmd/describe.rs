// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Describe command - parse and normalize a type descriptor.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use typecodec::{BaseIdentity, FieldCodecRegistry, TypeDescriptor};

use crate::common::{load_schemas, Result};

/// Parse a type descriptor and print its canonical form.
#[derive(Args, Clone, Debug)]
pub struct DescribeCmd {
    /// Type descriptor text
    #[arg(value_name = "TYPE")]
    target: String,

    /// Schema document(s) to check record references against
    #[arg(short, long = "schema", value_name = "SCHEMA")]
    schemas: Vec<PathBuf>,

    /// Output as JSON
    #[arg(short, long)]
    json: bool,
}

#[derive(Serialize)]
struct Description {
    descriptor: String,
    runtime_class: String,
    depth: usize,
    records: Vec<String>,
}

impl DescribeCmd {
    pub fn run(self) -> Result<()> {
        let target: TypeDescriptor = self
            .target
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid type '{}': {e}", self.target))?;

        let mut records = Vec::new();
        collect_records(&target, &mut records);

        if !self.schemas.is_empty() {
            let schemas = load_schemas(&self.schemas)?;
            check_records(&target, &schemas.registry)?;
        }

        let description = Description {
            descriptor: target.to_string(),
            runtime_class: target.erase().to_string(),
            depth: target.depth(),
            records,
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&description)?);
        } else {
            println!("{}", description.descriptor);
            println!("  runtime class: {}", description.runtime_class);
            println!("  depth:         {}", description.depth);
            if !description.records.is_empty() {
                println!("  records:       {}", description.records.join(", "));
            }
        }
        Ok(())
    }
}

fn collect_records(ty: &TypeDescriptor, out: &mut Vec<String>) {
    if let Some(name) = ty.record_name() {
        if !out.iter().any(|r| r == name) {
            out.push(name.to_string());
        }
    }
    for arg in ty.args() {
        collect_records(arg, out);
    }
}

/// Check every record reference is registered with a matching arity.
fn check_records(ty: &TypeDescriptor, registry: &FieldCodecRegistry) -> Result<()> {
    if let BaseIdentity::Record(name) = ty.base() {
        let codec = registry
            .lookup(name)
            .ok_or_else(|| anyhow::anyhow!("Record '{name}' is not declared in the schema"))?;
        codec.bind(ty.args())?;
    }
    for arg in ty.args() {
        check_records(arg, registry)?;
    }
    Ok(())
}

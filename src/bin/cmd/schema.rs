// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema command - inspect record schema documents.

use std::path::PathBuf;

use clap::Subcommand;
use serde::Serialize;

use crate::common::{load_schemas, Result};

/// Schema operations.
#[derive(Subcommand, Clone, Debug)]
pub enum SchemaCmd {
    /// List all records declared in the schema documents
    List {
        /// Schema document(s)
        #[arg(value_name = "SCHEMA", required = true)]
        schemas: Vec<PathBuf>,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the fields of one record
    Show {
        /// Schema document
        #[arg(value_name = "SCHEMA")]
        schema: PathBuf,

        /// Record name
        #[arg(value_name = "RECORD")]
        record: String,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

impl SchemaCmd {
    pub fn run(self) -> Result<()> {
        match self {
            SchemaCmd::List { schemas, json } => cmd_list(schemas, json),
            SchemaCmd::Show {
                schema,
                record,
                json,
            } => cmd_show(schema, record, json),
        }
    }
}

#[derive(Serialize)]
struct RecordSummary {
    name: String,
    params: Vec<String>,
    fields: usize,
    source: String,
}

fn cmd_list(paths: Vec<PathBuf>, json: bool) -> Result<()> {
    let schemas = load_schemas(&paths)?;

    let summaries: Vec<RecordSummary> = schemas
        .documents
        .iter()
        .flat_map(|(path, doc)| {
            doc.records.iter().map(move |record| RecordSummary {
                name: record.name.clone(),
                params: record.params.clone(),
                fields: record.fields.len(),
                source: path.display().to_string(),
            })
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    println!("Records: {}", summaries.len());
    for summary in &summaries {
        let name = if summary.params.is_empty() {
            summary.name.clone()
        } else {
            format!("{}<{}>", summary.name, summary.params.join(", "))
        };
        println!("  {name} ({} fields)", summary.fields);
    }
    Ok(())
}

#[derive(Serialize)]
struct FieldSummary {
    name: String,
    #[serde(rename = "type")]
    ty: String,
    required: bool,
}

fn cmd_show(path: PathBuf, record: String, json: bool) -> Result<()> {
    let schemas = load_schemas(std::slice::from_ref(&path))?;
    let codec = schemas
        .registry
        .lookup(&record)
        .ok_or_else(|| anyhow::anyhow!("Record '{record}' not found in {}", path.display()))?;

    let fields: Vec<FieldSummary> = codec
        .fields()
        .iter()
        .map(|field| FieldSummary {
            name: field.name.clone(),
            ty: field.descriptor.to_string(),
            required: field.is_required(),
        })
        .collect();

    if json {
        let output = serde_json::json!({
            "name": codec.identity(),
            "params": codec.type_params(),
            "fields": fields,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if codec.type_params().is_empty() {
        println!("{}", codec.identity());
    } else {
        println!("{}<{}>", codec.identity(), codec.type_params().join(", "));
    }
    for field in &fields {
        let marker = if field.required { "" } else { " (optional)" };
        println!("  {}: {}{marker}", field.name, field.ty);
    }
    Ok(())
}

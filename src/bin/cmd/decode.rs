// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Decode command - decode JSON documents against a type descriptor.

use std::path::PathBuf;

use clap::Args;
use serde_json::Value;
use typecodec::encoding::json::{DecoderBuilder, NullPolicy, UnknownFieldPolicy};
use typecodec::{JsonEncoder, TypeDescriptor};

use crate::common::{load_schemas, read_input, Result};

/// Decode a JSON document and print the decoded value as JSON.
#[derive(Args, Clone, Debug)]
pub struct DecodeCmd {
    /// Schema document(s) declaring the records
    #[arg(short, long = "schema", value_name = "SCHEMA")]
    schemas: Vec<PathBuf>,

    /// Target type descriptor, e.g. "mapping<string, sequence<Plan>>"
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    target: String,

    /// Input JSON file (stdin when omitted or "-")
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Decode knowing only the runtime class of the target
    #[arg(long)]
    naive: bool,

    /// Treat the input as JSON Lines and decode each line independently
    #[arg(long)]
    lines: bool,

    /// Maximum nesting depth
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// Fail on object keys a record does not declare
    #[arg(long)]
    reject_unknown: bool,

    /// Decode null primitives as their zero value
    #[arg(long)]
    null_defaults: bool,

    /// Omit absent record fields from the output (mapping entries are kept)
    #[arg(long)]
    skip_absent: bool,

    /// Pretty-print the output
    #[arg(short, long)]
    pretty: bool,
}

impl DecodeCmd {
    pub fn run(self) -> Result<()> {
        let schemas = load_schemas(&self.schemas)?;
        let target: TypeDescriptor = self
            .target
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid type '{}': {e}", self.target))?;

        let mut builder = DecoderBuilder::from_config(schemas.decoder_config());
        if let Some(max_depth) = self.max_depth {
            builder = builder.max_depth(max_depth);
        }
        if self.reject_unknown {
            builder = builder.unknown_fields(UnknownFieldPolicy::Reject);
        }
        if self.null_defaults {
            builder = builder.null_primitives(NullPolicy::Default);
        }
        let decoder = builder.build(&schemas.registry);
        let encoder = JsonEncoder::new().skip_absent(self.skip_absent);

        let text = read_input(self.input.as_deref())?;
        // (line number, document); line 0 stands for a single whole-input document
        let documents: Vec<(usize, Value)> = if self.lines {
            text.lines()
                .enumerate()
                .filter(|(_, line)| !line.trim().is_empty())
                .map(|(i, line)| {
                    serde_json::from_str::<Value>(line)
                        .map(|doc| (i + 1, doc))
                        .map_err(|e| anyhow::anyhow!("Invalid JSON on line {}: {e}", i + 1))
                })
                .collect::<Result<_>>()?
        } else {
            let document = serde_json::from_str::<Value>(&text)
                .map_err(|e| anyhow::anyhow!("Invalid JSON: {e}"))?;
            vec![(0, document)]
        };
        let (line_numbers, values): (Vec<usize>, Vec<Value>) = documents.into_iter().unzip();

        let results = if self.naive {
            let class = target.erase();
            values
                .iter()
                .map(|doc| decoder.decode_naive(&class, doc))
                .collect::<Vec<_>>()
        } else {
            decoder.decode_batch(&target, &values)
        };

        let mut failed = 0usize;
        for (line, result) in line_numbers.iter().zip(results) {
            match result {
                Ok(decoded) => println!("{}", encoder.encode_string(&decoded, self.pretty)?),
                Err(e) if self.lines => {
                    failed += 1;
                    eprintln!("line {line}: {e}");
                }
                Err(e) => return Err(e.into()),
            }
        }

        if failed > 0 {
            return Err(anyhow::anyhow!(
                "{failed} of {} document(s) failed to decode",
                values.len()
            ));
        }
        Ok(())
    }
}

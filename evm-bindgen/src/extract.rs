//! Extraction: artifact JSON → intermediate model types.
//!
//! Accepts the two artifact shapes found in the wild: a bare JSON array of
//! ABI entries, or a compiler artifact object carrying `abi` plus deployment
//! `bytecode` (Hardhat emits a hex string, Foundry an object with an
//! `object` field).

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use tracing::{debug, info};

use crate::model::*;

/// A decoded contract artifact ready for interface generation.
#[derive(Debug)]
pub struct Artifact {
    /// ABI definitions in artifact order.
    pub defs: Vec<AbiDef>,
    /// Deployment bytecode hex string, if the artifact carried one.
    pub bytecode: Option<String>,
}

/// Raw artifact JSON. Untagged: an object with an `abi` field, or the bare
/// ABI array itself.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawArtifact {
    Object {
        abi: Vec<RawAbiEntry>,
        #[serde(default)]
        bytecode: Option<RawBytecode>,
    },
    Abi(Vec<RawAbiEntry>),
}

/// Bytecode field variants across compiler artifact formats.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawBytecode {
    Hex(String),
    Object { object: String },
}

impl RawBytecode {
    fn into_hex(self) -> String {
        match self {
            RawBytecode::Hex(s) => s,
            RawBytecode::Object { object } => object,
        }
    }
}

/// A single entry of the Solidity JSON ABI.
#[derive(Debug, Deserialize)]
pub struct RawAbiEntry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<RawAbiParam>,
    #[serde(default)]
    pub outputs: Vec<RawAbiParam>,
    #[serde(rename = "stateMutability")]
    pub state_mutability: Option<String>,
}

/// A parameter/output entry. `indexed` (events) and other extras are ignored.
#[derive(Debug, Deserialize)]
pub struct RawAbiParam {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(rename = "internalType")]
    pub internal_type: Option<String>,
    #[serde(default)]
    pub components: Vec<RawAbiParam>,
}

/// Read and decode a contract artifact file.
pub fn load_artifact(path: &Path, contract: &str) -> Result<Artifact> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading artifact {}", path.display()))?;
    let raw: RawArtifact = serde_json::from_str(&content)
        .with_context(|| format!("decoding artifact {}", path.display()))?;

    let (entries, bytecode) = match raw {
        RawArtifact::Object { abi, bytecode } => (abi, bytecode.map(RawBytecode::into_hex)),
        RawArtifact::Abi(abi) => (abi, None),
    };

    // Some artifacts carry an empty or placeholder bytecode field.
    let bytecode = bytecode.filter(|b| !b.is_empty() && b.as_str() != "0x");

    let defs = extract_abi(&entries, contract)?;
    Ok(Artifact { defs, bytecode })
}

/// Convert raw ABI entries to model definitions, preserving artifact order.
///
/// Unknown definition kinds (`fallback`, `receive`, `error`, ...) are
/// skipped; they have no counterpart in the generated interface.
pub fn extract_abi(entries: &[RawAbiEntry], contract: &str) -> Result<Vec<AbiDef>> {
    let mut defs = Vec::new();
    let mut skipped = 0usize;

    for entry in entries {
        match entry.kind.as_str() {
            "constructor" => {
                defs.push(AbiDef::Constructor(AbiConstructor {
                    inputs: convert_params(&entry.inputs),
                    mutability: parse_mutability(entry.state_mutability.as_deref(), contract)?,
                }));
            }
            "function" => {
                defs.push(AbiDef::Function(AbiFunction {
                    name: entry.name.clone(),
                    inputs: convert_params(&entry.inputs),
                    outputs: convert_params(&entry.outputs),
                    mutability: parse_mutability(entry.state_mutability.as_deref(), contract)?,
                }));
            }
            "event" => {
                defs.push(AbiDef::Event(AbiEvent {
                    name: entry.name.clone(),
                    inputs: convert_params(&entry.inputs),
                }));
            }
            other => {
                debug!(kind = other, name = %entry.name, "skipping ABI entry");
                skipped += 1;
            }
        }
    }

    let functions = defs
        .iter()
        .filter(|d| matches!(d, AbiDef::Function(_)))
        .count();
    let constructors = defs
        .iter()
        .filter(|d| matches!(d, AbiDef::Constructor(_)))
        .count();
    let events = defs.iter().filter(|d| matches!(d, AbiDef::Event(_))).count();
    info!(
        contract,
        functions, constructors, events, skipped, "abi extraction complete"
    );

    Ok(defs)
}

fn convert_params(raw: &[RawAbiParam]) -> Vec<AbiParam> {
    raw.iter()
        .map(|p| AbiParam {
            name: p.name.clone(),
            ty: p.ty.clone(),
            internal_type: p.internal_type.clone(),
            components: convert_params(&p.components),
        })
        .collect()
}

/// Parse a `stateMutability` string. Absent means nonpayable (pre-0.4.16
/// artifacts); anything unrecognized is a malformed artifact.
fn parse_mutability(raw: Option<&str>, contract: &str) -> Result<StateMutability> {
    match raw {
        None | Some("nonpayable") => Ok(StateMutability::NonPayable),
        Some("pure") => Ok(StateMutability::Pure),
        Some("view") => Ok(StateMutability::View),
        Some("payable") => Ok(StateMutability::Payable),
        Some(other) => bail!("unknown stateMutability `{other}` in {contract} abi"),
    }
}

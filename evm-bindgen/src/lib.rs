//! evm-bindgen — EVM contract ABI → typed Rust interface generator.
//!
//! Decodes Solidity JSON ABI artifacts and emits Rust source text declaring
//! a strongly-typed contract trait: one async method per ABI function or
//! constructor, EVM types mapped into Rust types, and named record structs
//! synthesized on demand for tuple/struct parameters.
//!
//! # Quick start
//!
//! Generate binding files from a config (suitable for `build.rs`):
//!
//! ```no_run
//! use std::path::Path;
//!
//! // Reads evm-bindgen.toml, decodes the artifacts, writes the .rs files.
//! evm_bindgen::run(Path::new("evm-bindgen.toml"), None).unwrap();
//! ```
//!
//! Or get the generated text without writing to disk:
//!
//! ```no_run
//! use std::path::Path;
//!
//! let files = evm_bindgen::generate(Path::new("evm-bindgen.toml")).unwrap();
//! for file in &files {
//!     println!("{}: {} bytes", file.name, file.text.len());
//! }
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

pub mod config;
pub mod emit;
pub mod extract;
pub mod model;

pub use emit::generate_interface;

/// One generated binding file.
#[derive(Debug)]
pub struct GeneratedFile {
    /// File name relative to the output directory (e.g. `my_token.rs`).
    pub name: String,
    /// Rendered Rust source text.
    pub text: String,
}

/// Run the full pipeline: load config, decode the artifacts, generate the
/// interfaces, and write the output files.
///
/// `config_path` is the path to an `evm-bindgen.toml` configuration file.
/// `output_dir` optionally overrides the output directory from the config.
///
/// This is the top-level entry point intended for use in `build.rs` scripts
/// or other programmatic callers that want the complete generate-and-write
/// workflow in a single call.
///
/// Returns the paths the binding files were written to.
pub fn run(config_path: &Path, output_dir: Option<&Path>) -> Result<Vec<PathBuf>> {
    let cfg = config::load_config(config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;

    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));

    let files = generate_from_config(&cfg, base_dir)?;

    let out_dir = match output_dir {
        Some(p) => p.to_path_buf(),
        None => base_dir.join(&cfg.output.dir),
    };
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;

    let mut written = Vec::new();
    for file in &files {
        let path = out_dir.join(&file.name);
        std::fs::write(&path, &file.text)
            .with_context(|| format!("writing output to {}", path.display()))?;
        info!(
            path = %path.display(),
            size = file.text.len(),
            "wrote binding file"
        );
        written.push(path);
    }

    Ok(written)
}

/// Parse an `evm-bindgen.toml` config file and return the generated binding
/// files without writing to disk.
pub fn generate(config_path: &Path) -> Result<Vec<GeneratedFile>> {
    let cfg = config::load_config(config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;

    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));

    generate_from_config(&cfg, base_dir)
}

/// Generate binding files from an already-loaded [`config::Config`].
///
/// `base_dir` is the directory relative to which artifact paths in the
/// config are resolved (typically the parent directory of the TOML file).
pub fn generate_from_config(cfg: &config::Config, base_dir: &Path) -> Result<Vec<GeneratedFile>> {
    info!(contracts = cfg.contract.len(), "loaded configuration");

    let map = model::TypeMap::evm();
    let mut files = Vec::new();

    for contract in &cfg.contract {
        let artifact_path =
            config::resolve_artifact(&contract.artifact, base_dir, &cfg.artifact_paths);
        let artifact = extract::load_artifact(&artifact_path, &contract.name)?;

        // A config-level bytecode override takes precedence over the artifact's.
        let bytecode = contract
            .bytecode
            .as_deref()
            .or(artifact.bytecode.as_deref());

        let text = emit::generate_interface(&contract.name, bytecode, &artifact.defs, &map)
            .with_context(|| format!("generating interface for `{}`", contract.name))?;

        files.push(GeneratedFile {
            name: binding_file_name(&contract.name),
            text,
        });
    }

    info!(files = files.len(), "generation complete");
    Ok(files)
}

/// Output file name for a contract: snake_case of the normalized name.
pub fn binding_file_name(contract: &str) -> String {
    format!(
        "{}.rs",
        emit::to_snake_case(&emit::sanitize_type_name(contract))
    )
}

//! Configuration types for `evm-bindgen.toml`.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root configuration.
#[derive(Debug, Deserialize)]
pub struct Config {
    pub output: OutputConfig,
    /// Additional directories to search when resolving artifact paths.
    /// Each entry is tried in order after `base_dir` (the TOML file's
    /// parent directory).
    #[serde(default)]
    pub artifact_paths: Vec<PathBuf>,
    #[serde(default)]
    pub contract: Vec<ContractConfig>,
}

/// Output settings.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Directory the generated `.rs` files are written into.
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("src/bindings")
}

/// A single contract to generate an interface for.
#[derive(Debug, Deserialize)]
pub struct ContractConfig {
    /// Contract name; becomes the trait name and the output file name.
    pub name: String,
    /// Artifact file: either a bare ABI JSON array or a compiler artifact
    /// object carrying `abi` and `bytecode`.
    pub artifact: PathBuf,
    /// Deployment bytecode override. Takes precedence over any bytecode
    /// found in the artifact.
    pub bytecode: Option<String>,
}

/// Resolve an artifact path by searching `base_dir` first, then each
/// `artifact_paths` entry. Absolute paths are returned as-is. If the file
/// is not found anywhere, falls back to `base_dir.join(path)` so that the
/// caller gets a meaningful error from the reader.
pub fn resolve_artifact(path: &Path, base_dir: &Path, artifact_paths: &[PathBuf]) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let candidate = base_dir.join(path);
    if candidate.exists() {
        return candidate;
    }
    for dir in artifact_paths {
        let candidate = base_dir.join(dir).join(path);
        if candidate.exists() {
            return candidate;
        }
    }
    // Fall back, the artifact reader will report the error with context.
    base_dir.join(path)
}

/// Load and parse an `evm-bindgen.toml` configuration file.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read config file {}: {}", path.display(), e))?;
    let config: Config = toml::from_str(&content)
        .map_err(|e| anyhow::anyhow!("failed to parse config file {}: {}", path.display(), e))?;
    Ok(config)
}

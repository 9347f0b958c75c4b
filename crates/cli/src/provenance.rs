//! Provenance records: which code, scene files and parameters produced a report.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Debug, Serialize)]
pub struct Callsite {
    pub file: &'static str,
    pub line: u32,
}

/// One provenance document. The `report` subcommand prints it as is; `eval`
/// writes it next to its output.
#[derive(Debug, Serialize)]
pub struct Provenance {
    pub code_rev: String,
    pub version: &'static str,
    pub callsite: Callsite,
    /// Scene files the artifact was computed from.
    pub inputs: Vec<String>,
    pub params: Value,
    pub outputs: Vec<String>,
}

impl Provenance {
    /// Snapshot of the running build, attributed to the caller.
    #[track_caller]
    pub fn capture(params: Value) -> Self {
        let at = Location::caller();
        Self {
            code_rev: code_rev(),
            version: planar::VERSION,
            callsite: Callsite {
                file: at.file(),
                line: at.line(),
            },
            inputs: Vec::new(),
            params,
            outputs: Vec::new(),
        }
    }

    pub fn with_input(mut self, path: &Path) -> Self {
        self.inputs.push(path.to_string_lossy().into_owned());
        self
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serializing provenance")
    }

    /// Record `artifact` as the output and write `<stem>.provenance.json` beside it.
    pub fn write_sidecar(mut self, artifact: &Path) -> Result<PathBuf> {
        self.outputs.push(artifact.to_string_lossy().into_owned());
        let path = sidecar_path(artifact);
        match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)
                .with_context(|| format!("creating {}", dir.display()))?,
            _ => {}
        }
        fs::write(&path, self.to_json()?).with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }
}

fn sidecar_path(artifact: &Path) -> PathBuf {
    artifact.with_extension("provenance.json")
}

/// Commit the binary was built from: `GIT_COMMIT` at build or run time, else
/// the checkout's HEAD, else "unknown".
fn code_rev() -> String {
    let baked = option_env!("GIT_COMMIT").map(str::to_owned);
    let runtime = std::env::var("GIT_COMMIT").ok();
    baked
        .into_iter()
        .chain(runtime)
        .find(|rev| !rev.is_empty())
        .or_else(git_head)
        .unwrap_or_else(|| "unknown".to_owned())
}

fn git_head() -> Option<String> {
    let out = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
    if !out.status.success() {
        return None;
    }
    let rev = String::from_utf8(out.stdout).ok()?;
    let rev = rev.trim();
    (!rev.is_empty()).then(|| rev.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn sidecar_sits_next_to_the_artifact() {
        assert_eq!(
            sidecar_path(Path::new("/tmp/output/ring.json")),
            Path::new("/tmp/output/ring.provenance.json")
        );
        assert_eq!(
            sidecar_path(Path::new("report")),
            Path::new("report.provenance.json")
        );
    }

    #[test]
    fn capture_fills_build_fields() {
        let doc = Provenance::capture(json!({}));
        assert_eq!(doc.version, planar::VERSION);
        assert!(!doc.code_rev.is_empty());
        assert!(doc.callsite.file.ends_with("provenance.rs"));
        assert!(doc.inputs.is_empty() && doc.outputs.is_empty());
        let parsed: Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();
        assert_eq!(parsed["params"], json!({}));
        assert_eq!(parsed["outputs"], json!([]));
    }

    #[test]
    fn write_sidecar_records_inputs_and_outputs() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("reports").join("ring.json");
        let sidecar = Provenance::capture(json!({"command": "eval"}))
            .with_input(Path::new("scenes/ring.json"))
            .write_sidecar(&artifact)
            .unwrap();
        assert_eq!(sidecar, dir.path().join("reports").join("ring.provenance.json"));
        let parsed: Value = serde_json::from_slice(&fs::read(sidecar).unwrap()).unwrap();
        assert_eq!(parsed["outputs"][0], artifact.to_string_lossy().as_ref());
        assert_eq!(parsed["inputs"][0], "scenes/ring.json");
        assert_eq!(parsed["params"]["command"], "eval");
        assert_eq!(parsed["version"], planar::VERSION);
    }
}

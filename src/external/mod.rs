//! Out-of-process container tool abstraction.
//!
//! The layered pipeline's first pass delegates to a password-based embedding
//! tool invoked as a subprocess. The tool is a black box: only its call
//! contract matters here, and the engine must keep working — failing
//! distinguishably — when the binary is absent.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Narrow interface over a password-based audio container tool.
pub trait ContainerTool {
    /// Embed `payload` inside `carrier`, writing the result to `output`.
    fn embed(&self, carrier: &Path, payload: &Path, output: &Path, password: &str) -> Result<()>;

    /// Extract the hidden file from `carrier` into `output`.
    fn extract(&self, carrier: &Path, output: &Path, password: &str) -> Result<()>;

    /// Whether the tool can actually be invoked on this system.
    fn is_available(&self) -> bool;

    /// Tool name (for logging and diagnostics).
    fn name(&self) -> &'static str;
}

/// The steghide CLI, driven through its embed/extract subcommands.
pub struct Steghide {
    binary: PathBuf,
}

impl Steghide {
    /// Use `steghide` from `PATH`.
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from("steghide"),
        }
    }

    /// Use a specific binary location.
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn run(&self, args: &[&str]) -> Result<()> {
        let output = Command::new(&self.binary).args(args).output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::ToolNotFound(self.binary.display().to_string())
            } else {
                Error::Io(e)
            }
        })?;

        if output.status.success() {
            Ok(())
        } else {
            // Surface the tool's own diagnostics verbatim; no retry.
            Err(Error::ToolFailed {
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

impl Default for Steghide {
    fn default() -> Self {
        Self::new()
    }
}

impl ContainerTool for Steghide {
    fn embed(&self, carrier: &Path, payload: &Path, output: &Path, password: &str) -> Result<()> {
        if !carrier.exists() {
            return Err(Error::CarrierNotFound(carrier.to_path_buf()));
        }
        if !payload.exists() {
            return Err(Error::PayloadNotFound(payload.to_path_buf()));
        }

        log::info!("steghide embed: {} -> {}", payload.display(), output.display());
        self.run(&[
            "embed",
            "-cf",
            &carrier.display().to_string(),
            "-ef",
            &payload.display().to_string(),
            "-sf",
            &output.display().to_string(),
            "-p",
            password,
            "-f",
        ])
    }

    fn extract(&self, carrier: &Path, output: &Path, password: &str) -> Result<()> {
        if !carrier.exists() {
            return Err(Error::CarrierNotFound(carrier.to_path_buf()));
        }

        log::info!("steghide extract: {} -> {}", carrier.display(), output.display());
        self.run(&[
            "extract",
            "-sf",
            &carrier.display().to_string(),
            "-p",
            password,
            "-xf",
            &output.display().to_string(),
            "-f",
        ])
    }

    fn is_available(&self) -> bool {
        Command::new(&self.binary)
            .arg("--version")
            .output()
            .is_ok()
    }

    fn name(&self) -> &'static str {
        "steghide"
    }
}

//! Sources of the raw text feed.
//!
//! `SarCommand` runs `sar` against a binary activity file; `TextFile` reads a
//! feed that was captured earlier (e.g. `sar -A -f sa16 > sa16.txt`).

use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use crate::error::CaptureError;
use crate::family::MetricFamily;

/// Produces the text feed for a family.
pub trait FeedSource {
    fn capture(&self, family: MetricFamily) -> Result<String, CaptureError>;
}

/// Runs the `sar` binary.
#[derive(Debug, Clone)]
pub struct SarCommand {
    pub binary: PathBuf,
    pub file: PathBuf,
}

impl SarCommand {
    pub fn new(binary: impl Into<PathBuf>, file: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            file: file.into(),
        }
    }

    fn command(&self, family: MetricFamily) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.arg("-t").args(family.sar_args()).arg("-f").arg(&self.file);
        cmd
    }
}

impl FeedSource for SarCommand {
    fn capture(&self, family: MetricFamily) -> Result<String, CaptureError> {
        let mut cmd = self.command(family);
        debug!("Running {:?}", cmd);

        let output = cmd.output().map_err(|e| CaptureError::Spawn {
            program: self.binary.display().to_string(),
            source: e,
        })?;
        if !output.status.success() {
            return Err(CaptureError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Reads a pre-captured feed. The same text serves every family.
#[derive(Debug, Clone)]
pub struct TextFile {
    pub path: PathBuf,
}

impl TextFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FeedSource for TextFile {
    fn capture(&self, _family: MetricFamily) -> Result<String, CaptureError> {
        Ok(std::fs::read_to_string(&self.path)?)
    }
}

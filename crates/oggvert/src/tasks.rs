use core::fmt;

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::format::Format;
use crate::quality::Quality;

pub(crate) struct Tasks {
    pub(crate) errors: Vec<PathError>,
    pub(crate) requests: Vec<ConversionRequest>,
}

impl Tasks {
    pub(crate) fn new() -> Self {
        Self {
            errors: Vec::new(),
            requests: Vec::new(),
        }
    }
}

/// A collection of errors associated with a particular path.
pub(crate) struct PathError {
    pub(crate) path: PathBuf,
    pub(crate) messages: Vec<String>,
}

/// A single file to convert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ConversionRequest {
    pub(crate) from_path: PathBuf,
    pub(crate) to_path: PathBuf,
    pub(crate) quality: Quality,
    pub(crate) overwrite: bool,
}

impl ConversionRequest {
    /// Test if the conversion should be skipped since the destination
    /// already exists.
    pub(crate) fn is_blocked(&self) -> bool {
        !self.overwrite && self.to_path.exists()
    }

    /// Build the encoder invocation for this request.
    pub(crate) fn command(&self, ffmpeg: &Path) -> Command {
        let mut cmd = Command::new(ffmpeg);
        cmd.arg("-hide_banner");
        cmd.arg(if self.overwrite { "-y" } else { "-n" });
        cmd.args([OsStr::new("-i"), self.from_path.as_os_str()]);
        cmd.args(["-map_metadata", "0"]);
        self.quality.apply(&mut cmd);

        if let Some(codec) = Format::TARGET.ffmpeg_codec() {
            cmd.args(["-codec:a", codec]);
        }

        cmd.arg(&self.to_path);
        cmd
    }
}

/// Outcome of a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Summary {
    pub(crate) converted: usize,
    pub(crate) skipped: usize,
    pub(crate) failed: usize,
}

impl fmt::Display for Summary {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} converted, {} skipped, {} failed",
            self.converted, self.skipped, self.failed
        )
    }
}

use core::fmt;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail, ensure};

use crate::format::Format;
use crate::out::{Out, blank, error, info};
use crate::quality::Quality;
use crate::shell;
use crate::tasks::{ConversionRequest, PathError, Tasks};

/// Configuration for conversions.
pub(crate) struct Config {
    pub(crate) dry_run: bool,
    pub(crate) ffmpeg: PathBuf,
    pub(crate) input: PathBuf,
    pub(crate) output: Option<PathBuf>,
    pub(crate) overwrite: bool,
    pub(crate) quality: Quality,
    pub(crate) verbose: bool,
}

impl Config {
    /// Populate tasks based on configuration. The input is expected to exist.
    ///
    /// Errors returned here are usage errors, problems with individual files
    /// end up in [`Tasks::errors`].
    pub(crate) fn populate(&self) -> Result<Tasks> {
        let mut tasks = Tasks::new();

        if self.input.is_file() {
            self.populate_file(&mut tasks)?;
        } else {
            self.populate_dir(&mut tasks)?;
        }

        Ok(tasks)
    }

    fn populate_file(&self, tasks: &mut Tasks) -> Result<()> {
        let input = &self.input;

        if Format::source_of(input).is_none() {
            bail!("Not an Ogg file: {}", shell::escape(input.as_os_str()));
        }

        let to_path = match &self.output {
            Some(output) if output.is_dir() => {
                let Some(stem) = input.file_stem() else {
                    bail!("Input has no file name: {}", shell::escape(input.as_os_str()));
                };

                let mut name = stem.to_os_string();
                name.push(".");
                name.push(Format::TARGET.ext());
                output.join(name)
            }
            Some(output) => output.clone(),
            None => input.with_extension(Format::TARGET.ext()),
        };

        tasks.requests.push(self.request(input.clone(), to_path));
        Ok(())
    }

    fn populate_dir(&self, tasks: &mut Tasks) -> Result<()> {
        let out_dir = match &self.output {
            Some(output) => {
                ensure!(
                    !output.is_file(),
                    "Output must be a directory when input is a directory: {}",
                    shell::escape(output.as_os_str())
                );

                output.as_path()
            }
            None => self.input.as_path(),
        };

        let walker = ignore::WalkBuilder::new(&self.input)
            .standard_filters(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tasks.errors.push(PathError {
                        path: walk_error_path(&e).unwrap_or(self.input.as_path()).to_path_buf(),
                        messages: vec![e.to_string()],
                    });

                    continue;
                }
            };

            let walked = entry.path();

            if !walked.is_file() || Format::source_of(walked).is_none() {
                continue;
            }

            let to_path = match mirror(&self.input, out_dir, walked) {
                Ok(to_path) => to_path,
                Err(e) => {
                    tasks.errors.push(PathError {
                        path: walked.to_path_buf(),
                        messages: vec![format!("{e:#}")],
                    });

                    continue;
                }
            };

            tasks.requests.push(self.request(walked.to_path_buf(), to_path));
        }

        Ok(())
    }

    fn request(&self, from_path: PathBuf, to_path: PathBuf) -> ConversionRequest {
        ConversionRequest {
            from_path,
            to_path,
            quality: self.quality.clone(),
            overwrite: self.overwrite,
        }
    }

    /// Make directory for output file.
    pub(crate) fn make_dir(
        &self,
        o: &mut Out<'_>,
        what: impl fmt::Display,
        path: &Path,
    ) -> Result<bool> {
        let Some(parent) = path.parent() else {
            return Ok(true);
        };

        if parent.as_os_str().is_empty() || parent.is_dir() {
            return Ok(true);
        }

        info!(o, "making {what} dir");
        let mut o = o.indent(1);
        blank!(o, "mkdir -p {}", shell::escape(parent.as_os_str()));

        if self.dry_run {
            return Ok(true);
        }

        if let Err(e) = fs::create_dir_all(parent) {
            error!(o, "{e}");
            Ok(false)
        } else {
            Ok(true)
        }
    }
}

/// Re-root `path`, which is found under `from_root`, under `to_root` with the
/// target extension.
fn mirror(from_root: &Path, to_root: &Path, path: &Path) -> Result<PathBuf> {
    let suffix = path
        .strip_prefix(from_root)
        .context("failed to get path suffix")?;

    let mut to_path = to_root.join(suffix);
    to_path.set_extension(Format::TARGET.ext());
    Ok(to_path)
}

/// The path an error encountered while walking refers to, if any.
fn walk_error_path(e: &ignore::Error) -> Option<&Path> {
    match e {
        ignore::Error::WithPath { path, .. } => Some(path.as_path()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            walk_error_path(err)
        }
        _ => None,
    }
}

use core::cell::Cell;

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};

use anyhow::{Result, ensure};
use clap::Parser;
use termcolor::{ColorChoice, StandardStream};

use crate::config::Config;
use crate::out::{Colors, Out, blank, detail, error, info, warn};
use crate::quality::{Bitrate, Quality};
use crate::shell::{self, FormatCommand};
use crate::tasks::{ConversionRequest, Summary};

/// A tool to convert Ogg audio to mp3.
#[derive(Parser)]
pub struct Oggvert {
    /// An Ogg file (.ogg, .oga or .ogv) or a directory which is recursively
    /// scanned for Ogg files.
    input: PathBuf,
    /// Output file or directory.
    ///
    /// When converting a single file into an existing directory the file is
    /// named after the input. When converting a directory this must be a
    /// directory and the input directory structure is mirrored inside of it.
    ///
    /// By default, converted files are written next to their source.
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
    /// Constant bitrate to encode with, like 192k, 256k or 320k.
    #[arg(long)]
    bitrate: Option<Bitrate>,
    /// Variable bitrate quality from 0 (best) to 9 (worst). Takes precedence
    /// over --bitrate.
    ///
    /// If neither is specified, --vbr 2 is used.
    #[arg(long, allow_negative_numbers = true)]
    vbr: Option<i64>,
    /// If set, overwrites existing output files.
    #[arg(long)]
    overwrite: bool,
    /// If set, performs a dry run without making any changes. This also implies
    /// verbose.
    #[arg(short = 'D', long)]
    dry_run: bool,
    /// If set, enables verbose output.
    #[arg(short = 'v', long)]
    verbose: bool,
    /// Path to ffmpeg binary to use when performing conversions.
    #[arg(long, default_value = "ffmpeg")]
    ffmpeg_bin: PathBuf,
}

/// Entry for `oggvert`.
///
/// See [`crate`] documentation.
pub fn entry(opts: &Oggvert) -> Result<()> {
    // A missing input is reported before any other problem with the options.
    ensure!(
        opts.input.exists(),
        "Input not found: {}",
        shell::escape(opts.input.as_os_str())
    );

    let config = Config {
        dry_run: opts.dry_run,
        ffmpeg: opts.ffmpeg_bin.clone(),
        input: opts.input.clone(),
        output: opts.output.clone(),
        overwrite: opts.overwrite,
        quality: Quality::new(opts.bitrate.as_ref(), opts.vbr)?,
        verbose: opts.verbose || opts.dry_run,
    };

    let indent = Cell::new(0);
    let cols = Colors::new();

    let stdout = StandardStream::stdout(ColorChoice::Auto);
    let stderr = StandardStream::stderr(ColorChoice::Auto);
    let mut stdout = stdout.lock();
    let mut stderr = stderr.lock();

    let mut o = Out::new(&indent, &cols, &mut stdout, &mut stderr);
    run(&mut o, &config)?;
    Ok(())
}

/// Plan and perform all conversions.
///
/// Only usage errors are returned, a conversion which fails is reported and
/// counted in the summary.
fn run(o: &mut Out<'_>, config: &Config) -> Result<Summary> {
    let tasks = config.populate()?;
    let mut summary = Summary::default();

    for e in &tasks.errors {
        error!(o, "Error: {}", shell::escape(e.path.as_os_str()));
        let mut o = o.indent(1);

        for m in &e.messages {
            error!(o, "{m}");
        }

        summary.failed += 1;
    }

    if tasks.requests.is_empty() {
        if tasks.errors.is_empty() {
            info!(o, "No Ogg files found.");
        }

        return Ok(summary);
    }

    let total = tasks.requests.len();

    for (index, request) in tasks.requests.iter().enumerate() {
        if !config.make_dir(o, "output", &request.to_path)? {
            summary.failed += 1;
            continue;
        }

        if request.is_blocked() {
            warn!(o, "Skip (exists): {}", shell::escape(request.to_path.as_os_str()));

            if config.verbose {
                let mut o = o.indent(1);
                blank!(o, "use --overwrite to replace it");
            }

            summary.skipped += 1;
            continue;
        }

        info!(
            o,
            "Converting #{}/#{total}: {} -> {}",
            index + 1,
            shell::escape(request.from_path.as_os_str()),
            shell::escape(request.to_path.as_os_str())
        );

        let mut o = o.indent(1);

        if convert(&mut o, config, request)? {
            summary.converted += 1;
        } else {
            summary.failed += 1;
        }
    }

    if summary.failed > 0 {
        warn!(o, "{summary}");
    } else {
        info!(o, "{summary}");
    }

    Ok(summary)
}

/// Invoke the encoder for a single request, returns `true` if it succeeded.
fn convert(o: &mut Out<'_>, config: &Config, request: &ConversionRequest) -> Result<bool> {
    let cmd = request.command(&config.ffmpeg);

    if config.verbose {
        let mut f = FormatCommand::new(&cmd);

        if config.dry_run {
            f.insert_replacement(config.ffmpeg.as_os_str(), "<ffmpeg>");
            f.insert_replacement(request.from_path.as_os_str(), "<from>");
            f.insert_replacement(request.to_path.as_os_str(), "<to>");
        }

        blank!(o, "quality: {}", request.quality);
        blank!(o, "{f}");
    }

    if config.dry_run {
        return Ok(true);
    }

    let (status, output) = match execute(cmd) {
        Ok(output) => output,
        Err(e) => {
            error!(
                o,
                "Failed to run {}: {e}",
                shell::escape(config.ffmpeg.as_os_str())
            );
            return Ok(false);
        }
    };

    if status.success() {
        return Ok(true);
    }

    error!(
        o,
        "Failed to convert {} ({status}):",
        shell::escape(request.from_path.as_os_str())
    );

    let mut o = o.indent(1);

    for line in String::from_utf8_lossy(&output).lines() {
        detail!(o, "{line}");
    }

    Ok(false)
}

/// Run a command to completion with its stdout and stderr combined into one
/// captured stream.
fn execute(mut cmd: Command) -> io::Result<(ExitStatus, Vec<u8>)> {
    let (mut reader, writer) = io::pipe()?;

    cmd.stdin(Stdio::null());
    cmd.stdout(writer.try_clone()?);
    cmd.stderr(writer);

    let mut child = cmd.spawn()?;
    // The command holds on to the write ends, they must be closed for the read
    // below to see the end of the stream.
    drop(cmd);

    let mut output = Vec::new();
    reader.read_to_end(&mut output)?;
    let status = child.wait()?;
    Ok((status, output))
}

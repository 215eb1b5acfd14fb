//! [<img alt="github" src="https://img.shields.io/badge/github-udoprog/mediavert-8da0cb?style=for-the-badge&logo=github" height="20">](https://github.com/udoprog/mediavert)
//! [<img alt="crates.io" src="https://img.shields.io/crates/v/oggvert.svg?style=for-the-badge&color=fc8d62&logo=rust" height="20">](https://crates.io/crates/oggvert)
//!
//! A tool to convert Ogg audio (`.ogg`, `.oga`, `.ogv`) to mp3.
//!
//! The input is either a single file or a directory which is recursively
//! scanned for Ogg files. The actual encoding is performed by `ffmpeg` using
//! `libmp3lame`, metadata is copied from the source file.
//!
//! Unless `--output <path>` is specified, converted files are written next to
//! their source. When converting a directory, the output directory mirrors the
//! structure of the input directory.
//!
//! Existing files are left alone unless `--overwrite` is specified.
//!
//! <br>
//!
//! ## Usage
//!
//! It is generally recommended to first run the command with `--dry-run` or
//! `-D` to get an understanding of what it will try to do:
//!
//! ```sh
//! oggvert --dry-run music --output converted
//! ```
//!
//! Quality is controlled with either `--vbr <0-9>` (0 is best) or a constant
//! bitrate like `--bitrate 192k`. If both are given `--vbr` wins, and if
//! neither is given `--vbr 2` is used.
//!
//! ```sh
//! oggvert song.ogg --bitrate 320k
//! ```

pub mod cli;
mod config;
mod format;
mod out;
mod quality;
mod shell;
mod tasks;

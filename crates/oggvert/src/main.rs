//! A tool to convert Ogg audio to mp3.
//!
//! See [`oggvert`] documentation for more information.
//!
//! [`oggvert`]: https://crates.io/crates/oggvert

use anyhow::Result;
use clap::Parser;

/// A tool to convert Ogg audio to mp3.
#[derive(Parser)]
#[command(author, version, about, max_term_width = 80)]
pub struct Opts {
    #[command(flatten)]
    inner: oggvert::cli::Oggvert,
}

fn main() -> Result<()> {
    let opts = Opts::parse();
    oggvert::cli::entry(&opts.inner)
}

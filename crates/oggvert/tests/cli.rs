use std::ffi::OsString;
use std::fs;
use std::path::Path;

use anyhow::Result;
use clap::Parser;
use oggvert::cli::{Oggvert, entry};

fn opts(dir: &Path, args: &[&str]) -> Result<Oggvert> {
    let mut argv = vec![
        OsString::from("oggvert"),
        OsString::from("--ffmpeg-bin"),
        dir.join("no-such-ffmpeg").into_os_string(),
    ];

    argv.extend(args.iter().map(OsString::from));
    Ok(Oggvert::try_parse_from(argv)?)
}

fn path(p: &Path) -> &str {
    p.to_str().unwrap()
}

#[test]
fn missing_input_is_an_error() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("missing.ogg");

    let e = entry(&opts(dir.path(), &[path(&input)])?).unwrap_err();
    assert!(e.to_string().starts_with("Input not found"), "{e}");
    assert!(!dir.path().join("missing.mp3").exists());
    Ok(())
}

#[test]
fn missing_input_is_reported_before_bad_vbr() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("missing");

    let e = entry(&opts(dir.path(), &[path(&input), "--vbr", "12"])?).unwrap_err();
    assert!(e.to_string().starts_with("Input not found"), "{e}");
    Ok(())
}

#[test]
fn vbr_out_of_range_is_an_error() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("a.ogg");
    fs::write(&input, b"OggS")?;

    for vbr in ["10", "-1"] {
        let e = entry(&opts(dir.path(), &[path(&input), "--vbr", vbr])?).unwrap_err();
        assert!(e.to_string().starts_with("--vbr must be between 0"), "{e}");
    }

    Ok(())
}

#[test]
fn malformed_values_are_rejected_by_parser() -> Result<()> {
    let dir = tempfile::tempdir()?;
    assert!(opts(dir.path(), &["a.ogg", "--vbr", "best"]).is_err());
    assert!(opts(dir.path(), &["a.ogg", "--bitrate", ""]).is_err());
    Ok(())
}

#[test]
fn bitrate_is_passed_through() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("a.ogg");
    fs::write(&input, b"OggS")?;

    for rate in ["1.5M", "192000.5", "320k"] {
        entry(&opts(dir.path(), &[path(&input), "--bitrate", rate, "--dry-run"])?)?;
    }

    Ok(())
}

#[test]
fn input_must_be_ogg() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("a.wav");
    fs::write(&input, b"RIFF")?;

    let e = entry(&opts(dir.path(), &[path(&input)])?).unwrap_err();
    assert!(e.to_string().starts_with("Not an Ogg file"), "{e}");
    Ok(())
}

#[test]
fn directory_input_needs_directory_output() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("music");
    let output = dir.path().join("out.mp3");
    fs::create_dir(&input)?;
    fs::write(input.join("a.ogg"), b"OggS")?;
    fs::write(&output, b"ID3")?;

    let e = entry(&opts(dir.path(), &[path(&input), "-o", path(&output)])?).unwrap_err();
    assert!(e.to_string().starts_with("Output must be a directory"), "{e}");
    Ok(())
}

#[test]
fn conversion_failures_are_not_fatal() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("music");
    fs::create_dir_all(input.join("sub"))?;
    fs::write(input.join("a.ogg"), b"OggS")?;
    fs::write(input.join("sub").join("c.oga"), b"OggS")?;

    let output = dir.path().join("converted");
    entry(&opts(
        dir.path(),
        &[path(&input), "--output", path(&output), "--bitrate", "192k", "--vbr", "3"],
    )?)?;

    assert!(output.join("sub").is_dir());
    assert!(!output.join("a.mp3").exists());
    Ok(())
}

#[test]
fn empty_directory_is_fine() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("empty");
    fs::create_dir(&input)?;

    entry(&opts(dir.path(), &[path(&input)])?)?;
    Ok(())
}

#[test]
fn dry_run_skips_existing() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("a.ogg");
    fs::write(&input, b"OggS")?;
    fs::write(dir.path().join("a.mp3"), b"ID3")?;

    entry(&opts(dir.path(), &[path(&input), "--dry-run"])?)?;
    assert_eq!(fs::read(dir.path().join("a.mp3"))?, b"ID3");
    Ok(())
}

use core::error::Error;
use core::fmt;
use core::str::FromStr;

use std::process::Command;

use anyhow::{Result, ensure};

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct BitrateErr;

impl fmt::Display for BitrateErr {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "empty bitrate")
    }
}

impl Error for BitrateErr {}

/// A constant bitrate passed as-is to ffmpeg, like `192k`, `1.5M` or `128000`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Bitrate(String);

impl Bitrate {
    #[inline]
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Bitrate {
    type Err = BitrateErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.is_empty() {
            return Err(BitrateErr);
        }

        Ok(Bitrate(s.to_owned()))
    }
}

impl fmt::Display for Bitrate {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// How the encoder should pick its output quality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Quality {
    /// Constant bitrate.
    Cbr(Bitrate),
    /// LAME variable bitrate quality, 0 (best) to 9 (worst).
    Vbr(u8),
    /// Neither was requested.
    Default,
}

impl Quality {
    pub(crate) const MAX_VBR: u8 = 9;
    pub(crate) const DEFAULT_VBR: u8 = 2;

    /// Select quality from commandline options. Variable bitrate takes
    /// precedence over a constant bitrate.
    pub(crate) fn new(bitrate: Option<&Bitrate>, vbr: Option<i64>) -> Result<Self> {
        if let Some(vbr) = vbr {
            ensure!(
                (0..=i64::from(Self::MAX_VBR)).contains(&vbr),
                "--vbr must be between 0 (best) and {} (worst), got {vbr}",
                Self::MAX_VBR
            );

            return Ok(Quality::Vbr(vbr as u8));
        }

        Ok(match bitrate {
            Some(bitrate) => Quality::Cbr(bitrate.clone()),
            None => Quality::Default,
        })
    }

    /// Append encoder arguments for this quality.
    pub(crate) fn apply(&self, command: &mut Command) {
        match self {
            Quality::Cbr(bitrate) => {
                command.args(["-b:a", bitrate.as_str()]);
            }
            Quality::Vbr(level) => {
                command.arg("-q:a");
                command.arg(level.to_string());
            }
            Quality::Default => {
                command.arg("-q:a");
                command.arg(Self::DEFAULT_VBR.to_string());
            }
        }
    }
}

impl fmt::Display for Quality {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quality::Cbr(bitrate) => write!(f, "cbr {bitrate}"),
            Quality::Vbr(level) => write!(f, "vbr {level}"),
            Quality::Default => write!(f, "vbr {} (default)", Self::DEFAULT_VBR),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::process::Command;

    use super::{Bitrate, BitrateErr, Quality};

    fn args(quality: &Quality) -> Vec<String> {
        let mut cmd = Command::new("ffmpeg");
        quality.apply(&mut cmd);
        cmd.get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn parse_bitrate() {
        for rate in ["192k", "320K", "128000", "1.5M", "192000.5", "320kb"] {
            assert_eq!(rate.parse::<Bitrate>().map(|b| b.to_string()), Ok(rate.to_owned()));
        }

        assert_eq!(" 256k ".parse::<Bitrate>().unwrap().as_str(), "256k");
        assert_eq!("".parse::<Bitrate>(), Err(BitrateErr));
        assert_eq!("  ".parse::<Bitrate>(), Err(BitrateErr));
    }

    #[test]
    fn vbr_precedence() {
        let bitrate = "192k".parse::<Bitrate>().unwrap();
        let quality = Quality::new(Some(&bitrate), Some(4)).unwrap();
        assert_eq!(quality, Quality::Vbr(4));
        assert_eq!(args(&quality), ["-q:a", "4"]);
    }

    #[test]
    fn cbr_and_default() {
        let bitrate = "256k".parse::<Bitrate>().unwrap();
        let quality = Quality::new(Some(&bitrate), None).unwrap();
        assert_eq!(args(&quality), ["-b:a", "256k"]);

        let quality = Quality::new(None, None).unwrap();
        assert_eq!(quality, Quality::Default);
        assert_eq!(args(&quality), ["-q:a", "2"]);
    }

    #[test]
    fn vbr_range() {
        assert_eq!(Quality::new(None, Some(0)).unwrap(), Quality::Vbr(0));
        assert_eq!(Quality::new(None, Some(9)).unwrap(), Quality::Vbr(9));
        assert!(Quality::new(None, Some(10)).is_err());
        assert!(Quality::new(None, Some(-1)).is_err());
    }
}

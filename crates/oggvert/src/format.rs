use core::fmt;

use std::path::Path;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Format {
    Ogg,
    Oga,
    Ogv,
    Mp3,
}

impl Format {
    /// The format all sources are converted into.
    pub(crate) const TARGET: Format = Format::Mp3;

    /// Test if the format is an Ogg container which can be converted.
    pub(crate) fn is_source(&self) -> bool {
        matches!(self, Format::Ogg | Format::Oga | Format::Ogv)
    }

    pub(crate) fn ext(&self) -> &'static str {
        match self {
            Format::Ogg => "ogg",
            Format::Oga => "oga",
            Format::Ogv => "ogv",
            Format::Mp3 => "mp3",
        }
    }

    /// The ffmpeg audio codec used when encoding into this format.
    pub(crate) fn ffmpeg_codec(&self) -> Option<&'static str> {
        match self {
            Format::Mp3 => Some("libmp3lame"),
            _ => None,
        }
    }

    /// Extensions are matched case-insensitively.
    pub(crate) fn from_ext(ext: &str) -> Option<Format> {
        match ext.to_ascii_lowercase().as_str() {
            "ogg" => Some(Format::Ogg),
            "oga" => Some(Format::Oga),
            "ogv" => Some(Format::Ogv),
            "mp3" => Some(Format::Mp3),
            _ => None,
        }
    }

    /// Get the source format of the given path, if it is an Ogg container.
    pub(crate) fn source_of(path: &Path) -> Option<Format> {
        let ext = path.extension()?.to_str()?;
        Format::from_ext(ext).filter(Format::is_source)
    }
}

impl fmt::Display for Format {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.ext().fmt(f)
    }
}

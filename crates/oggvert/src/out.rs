use core::cell::Cell;
use core::fmt;

use std::io;

use termcolor::{ColorSpec, WriteColor};

macro_rules! __log {
    ($log:ident, $o:ident $(, $($tt:tt)*)?) => {
        $( $o.$log(format_args!($($tt)*))?; )*
    };
}

pub(crate) use __log;

macro_rules! __blank { ($($tt:tt)*) => { $crate::out::__log!(blank, $($tt)*) }; }
macro_rules! __info { ($($tt:tt)*) => { $crate::out::__log!(info, $($tt)*) }; }
macro_rules! __warn { ($($tt:tt)*) => { $crate::out::__log!(warn, $($tt)*) }; }
macro_rules! __error { ($($tt:tt)*) => { $crate::out::__log!(error, $($tt)*) }; }
macro_rules! __detail { ($($tt:tt)*) => { $crate::out::__log!(detail, $($tt)*) }; }

pub(crate) use __blank as blank;
pub(crate) use __detail as detail;
pub(crate) use __error as error;
pub(crate) use __info as info;
pub(crate) use __warn as warn;

pub(crate) struct Colors {
    info: ColorSpec,
    warn: ColorSpec,
    error: ColorSpec,
}

impl Colors {
    pub(crate) fn new() -> Self {
        let mut info = ColorSpec::new();
        info.set_fg(Some(termcolor::Color::Green)).set_bold(true);

        let mut warn = ColorSpec::new();
        warn.set_fg(Some(termcolor::Color::Yellow)).set_bold(true);

        let mut error = ColorSpec::new();
        error.set_fg(Some(termcolor::Color::Red)).set_bold(true);

        Colors { info, warn, error }
    }
}

/// Indented console output.
///
/// Errors and anything logged through [`Out::detail`] go to the error stream,
/// everything else to the regular output stream.
pub(crate) struct Out<'a> {
    change: isize,
    indent: &'a Cell<usize>,
    c: &'a Colors,
    o: &'a mut dyn WriteColor,
    e: &'a mut dyn WriteColor,
}

impl Out<'_> {
    pub(crate) fn new<'a>(
        indent: &'a Cell<usize>,
        c: &'a Colors,
        o: &'a mut dyn WriteColor,
        e: &'a mut dyn WriteColor,
    ) -> Out<'a> {
        Out {
            change: 0,
            indent,
            c,
            o,
            e,
        }
    }
}

impl<'a> Out<'a> {
    pub(crate) fn indent(&mut self, change: isize) -> Out<'_> {
        let indent = self.indent.get().saturating_add_signed(change);
        self.indent.set(indent);

        Out {
            change,
            indent: self.indent,
            c: self.c,
            o: &mut *self.o,
            e: &mut *self.e,
        }
    }

    pub(crate) fn blank(&mut self, m: impl fmt::Display) -> io::Result<()> {
        plain(self.indent.get(), &mut *self.o, m)
    }

    /// Uncolored output to the error stream, like captured encoder output.
    pub(crate) fn detail(&mut self, m: impl fmt::Display) -> io::Result<()> {
        plain(self.indent.get(), &mut *self.e, m)
    }

    pub(crate) fn info(&mut self, m: impl fmt::Display) -> io::Result<()> {
        colorize(self.indent.get(), &mut *self.o, &self.c.info, m)
    }

    pub(crate) fn warn(&mut self, m: impl fmt::Display) -> io::Result<()> {
        colorize(self.indent.get(), &mut *self.o, &self.c.warn, m)
    }

    pub(crate) fn error(&mut self, m: impl fmt::Display) -> io::Result<()> {
        colorize(self.indent.get(), &mut *self.e, &self.c.error, m)
    }
}

impl Drop for Out<'_> {
    #[inline]
    fn drop(&mut self) {
        let indent = self.indent.get().saturating_add_signed(-self.change);
        self.indent.set(indent);
    }
}

fn prefix(n: usize, o: &mut dyn WriteColor) -> io::Result<()> {
    for _ in 0..n {
        o.write_all(b"  ")?;
    }

    Ok(())
}

fn plain(n: usize, o: &mut dyn WriteColor, m: impl fmt::Display) -> io::Result<()> {
    prefix(n, o)?;
    writeln!(o, "{m}")?;
    o.flush()?;
    Ok(())
}

fn colorize(
    n: usize,
    o: &mut dyn WriteColor,
    c: &ColorSpec,
    m: impl fmt::Display,
) -> io::Result<()> {
    prefix(n, o)?;
    o.set_color(c)?;
    writeln!(o, "{m}")?;
    o.reset()?;
    o.flush()?;
    Ok(())
}

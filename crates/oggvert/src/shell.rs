use core::fmt;

use std::borrow::Cow;
use std::collections::HashMap;
use std::ffi::OsStr;
use std::process::Command;

/// Quote a string so that it can be pasted into a POSIX shell.
///
/// Strings which don't need quoting are returned as-is.
pub(crate) fn escape(s: &OsStr) -> Cow<'_, str> {
    let Some(s) = s.to_str() else {
        return Cow::Owned(format!("'{}'", s.to_string_lossy().replace('\'', r"'\''")));
    };

    if !s.is_empty() && !s.chars().any(needs_quoting) {
        return Cow::Borrowed(s);
    }

    let mut o = String::with_capacity(s.len() + 2);
    o.push('\'');

    for c in s.chars() {
        if c == '\'' {
            o.push_str(r"'\''");
        } else {
            o.push(c);
        }
    }

    o.push('\'');
    Cow::Owned(o)
}

fn needs_quoting(c: char) -> bool {
    !(c.is_alphanumeric() || matches!(c, '/' | '.' | '-' | '_' | ':' | ',' | '+' | '=' | '@'))
}

/// Helper type to format a command with argument substitutions.
pub(crate) struct FormatCommand<'a> {
    cmd: &'a Command,
    replacements: HashMap<&'a OsStr, Cow<'a, str>>,
}

impl<'a> FormatCommand<'a> {
    pub(crate) fn new(cmd: &'a Command) -> Self {
        Self {
            cmd,
            replacements: HashMap::new(),
        }
    }

    /// Show `value` in place of the argument `key`.
    pub(crate) fn insert_replacement(
        &mut self,
        key: &'a (impl AsRef<OsStr> + ?Sized),
        value: impl Into<Cow<'a, str>>,
    ) {
        self.replacements.insert(key.as_ref(), value.into());
    }

    fn part(&self, arg: &'a OsStr) -> Cow<'_, str> {
        match self.replacements.get(arg) {
            Some(value) => Cow::Borrowed(value.as_ref()),
            None => escape(arg),
        }
    }
}

impl fmt::Display for FormatCommand<'_> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.part(self.cmd.get_program()))?;

        for arg in self.cmd.get_args() {
            write!(f, " {}", self.part(arg))?;
        }

        Ok(())
    }
}

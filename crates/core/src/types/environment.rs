//! Ordered process environment

use std::ffi::{OsStr, OsString};
use std::fmt;

/// Ordered sequence of name/value pairs as handed to a process.
///
/// Names are case-sensitive and duplicates are kept in their original
/// position. Lookups return the first occurrence, matching how `getenv`
/// treats duplicate entries. Entries are kept as raw OS strings so values
/// that are not UTF-8 reach the child untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment(Vec<(OsString, OsString)>);

impl Environment {
    /// Snapshot the environment of the current process
    #[must_use]
    pub fn capture() -> Self {
        std::env::vars_os().collect()
    }

    /// Build an environment from `NAME=value` entries
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        entries
            .into_iter()
            .map(|entry| {
                let (name, value) = split_entry(entry.as_ref());
                (name.to_string(), value.to_string())
            })
            .collect()
    }

    /// Raw value of the first entry named `name`
    #[must_use]
    pub fn get_os(&self, name: &str) -> Option<&OsStr> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_os_str())
    }

    /// Value of the first entry named `name`, if it is valid UTF-8
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_os(name).and_then(OsStr::to_str)
    }

    /// Iterate over the entries in order
    pub fn iter(&self) -> impl Iterator<Item = (&OsStr, &OsStr)> {
        self.0
            .iter()
            .map(|(name, value)| (name.as_os_str(), value.as_os_str()))
    }

    /// Get the number of entries, duplicates included
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render every entry as `NAME=value`
    #[must_use]
    pub fn to_entries(&self) -> Vec<OsString> {
        self.0
            .iter()
            .map(|(name, value)| {
                let mut entry = OsString::with_capacity(name.len() + value.len() + 1);
                entry.push(name);
                entry.push("=");
                entry.push(value);
                entry
            })
            .collect()
    }
}

/// Split an environment entry into name and value on the first `=`.
///
/// An entry without `=` is a name with an empty value.
#[must_use]
pub fn split_entry(entry: &str) -> (&str, &str) {
    entry.split_once('=').unwrap_or((entry, ""))
}

impl<K, V> FromIterator<(K, V)> for Environment
where
    K: Into<OsString>,
    V: Into<OsString>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, _) in &self.0 {
            writeln!(f, "{}=<redacted>", name.to_string_lossy())?;
        }
        Ok(())
    }
}

//! Environment entries for spawned processes

use std::ffi::OsString;
use std::fmt;

/// A single `KEY=VALUE` environment entry.
///
/// A command's environment is an ordered list of these. Duplicate keys are
/// allowed; the last entry for a key wins when the process is launched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvVar {
    pub key: OsString,
    pub value: OsString,
}

impl EnvVar {
    /// Create an entry from an already-split key and value.
    #[must_use]
    pub fn new(key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Parse a `KEY=VALUE` string.
    ///
    /// The split happens on the first `=` after the first character, so
    /// Windows drive entries such as `=C:=C:\` keep their leading `=` in the
    /// key. Returns `None` when there is no separator.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cmdkit_runner::EnvVar;
    ///
    /// let var = EnvVar::parse("MODE=batch=1").unwrap();
    /// assert_eq!(var.key, "MODE");
    /// assert_eq!(var.value, "batch=1");
    /// assert!(EnvVar::parse("NOVALUE").is_none());
    /// ```
    #[must_use]
    pub fn parse(entry: &str) -> Option<Self> {
        let mut indices = entry.char_indices();
        let first_len = indices.next().map(|(_, c)| c.len_utf8())?;
        let split = entry[first_len..].find('=')? + first_len;
        Some(Self::new(&entry[..split], &entry[split + 1..]))
    }
}

impl fmt::Display for EnvVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={}",
            self.key.to_string_lossy(),
            self.value.to_string_lossy()
        )
    }
}

/// Snapshot of the calling process's full environment.
#[must_use]
pub fn inherited() -> Vec<EnvVar> {
    std::env::vars_os()
        .map(|(key, value)| EnvVar { key, value })
        .collect()
}

/// Parse `KEY=VALUE` entries, dropping the ones without a separator.
pub(crate) fn parse_entries<I, S>(entries: I) -> impl Iterator<Item = EnvVar>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    entries.into_iter().filter_map(|entry| {
        let entry = entry.as_ref();
        let parsed = EnvVar::parse(entry);
        if parsed.is_none() {
            tracing::debug!(entry = %entry, "ignoring environment entry without '='");
        }
        parsed
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_parse_splits_on_first_separator(
            key in "[A-Za-z_][A-Za-z0-9_]{0,12}",
            value in "\\PC{0,24}"
        ) {
            let var = EnvVar::parse(&format!("{key}={value}")).unwrap();
            prop_assert_eq!(var.key, OsString::from(&key));
            prop_assert_eq!(var.value, OsString::from(&value));
        }

        #[test]
        fn prop_parse_rejects_entries_without_separator(entry in "[^=]{0,24}") {
            prop_assert!(EnvVar::parse(&entry).is_none());
        }
    }

    #[test]
    fn test_parse_simple_entry() {
        let var = EnvVar::parse("A=1").unwrap();
        assert_eq!(var, EnvVar::new("A", "1"));
    }

    #[test]
    fn test_parse_keeps_extra_separators_in_value() {
        let var = EnvVar::parse("URL=a=b=c").unwrap();
        assert_eq!(var.key, OsString::from("URL"));
        assert_eq!(var.value, OsString::from("a=b=c"));
    }

    #[test]
    fn test_parse_empty_value() {
        let var = EnvVar::parse("EMPTY=").unwrap();
        assert_eq!(var.value, OsString::new());
    }

    #[test]
    fn test_parse_leading_equals_is_part_of_key() {
        let var = EnvVar::parse("=C:=C:\\work").unwrap();
        assert_eq!(var.key, OsString::from("=C:"));
        assert_eq!(var.value, OsString::from("C:\\work"));
    }

    #[test]
    fn test_parse_rejects_missing_separator() {
        assert!(EnvVar::parse("").is_none());
        assert!(EnvVar::parse("PLAIN").is_none());
        assert!(EnvVar::parse("=").is_none());
    }

    #[test]
    fn test_parse_entries_drops_malformed() {
        let vars: Vec<_> = parse_entries(["A=1", "broken", "B=2"]).collect();
        assert_eq!(vars, vec![EnvVar::new("A", "1"), EnvVar::new("B", "2")]);
    }

    #[test]
    fn test_display_round_trips_text() {
        assert_eq!(EnvVar::new("K", "v=w").to_string(), "K=v=w");
    }

    #[test]
    fn test_inherited_matches_process_environment() {
        let expected: Vec<_> = std::env::vars_os().collect();
        let actual = inherited();
        assert_eq!(actual.len(), expected.len());
        for (var, (key, value)) in actual.iter().zip(expected) {
            assert_eq!(var.key, key);
            assert_eq!(var.value, value);
        }
    }
}

//! Mapping table construction.
//!
//! The table is an ordered list of (virtual prefix, real prefix) pairs.
//! Entries are matched in declaration order and the first match wins, even
//! when a later entry would match more of the path. Overlapping or empty
//! prefixes are accepted without validation.

use tracing::debug;

/// Delimiter between tokens in a `PATHSHIFT_MAP` configuration string.
pub const DELIMITER: u8 = b':';

/// Compiled-in mapping used when no configuration string is present.
const BUILTIN: &[(&str, &str)] = &[
    ("/etc/example-app", "/home/user/.etc/example-app"),
    ("/tmp/pathshift/tests/virtual", "/tmp/pathshift/tests/real"),
];

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The configuration split into an odd number of tokens, leaving the
    /// last virtual prefix without a real prefix to pair with.
    #[error("mapping configuration has an odd number of path tokens ({0})")]
    UnpairedToken(usize),
}

/// One virtual-prefix to real-prefix substitution. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEntry {
    virt: Vec<u8>,
    real: Vec<u8>,
}

impl MappingEntry {
    pub fn new(virt: impl Into<Vec<u8>>, real: impl Into<Vec<u8>>) -> Self {
        Self {
            virt: virt.into(),
            real: real.into(),
        }
    }

    /// The prefix the calling program believes it is using.
    pub fn virtual_prefix(&self) -> &[u8] {
        &self.virt
    }

    /// The prefix substituted before the operation executes.
    pub fn real_prefix(&self) -> &[u8] {
        &self.real
    }
}

/// Ordered mapping table. Read-only after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingTable {
    entries: Vec<MappingEntry>,
}

impl MappingTable {
    /// The compiled-in default table.
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN
                .iter()
                .map(|(virt, real)| MappingEntry::new(virt.as_bytes(), real.as_bytes()))
                .collect(),
        }
    }

    /// Build a table from an optional configuration string.
    ///
    /// An absent or empty configuration selects the compiled-in default;
    /// anything else goes through [`MappingTable::parse`].
    pub fn from_config(config: Option<&[u8]>) -> Result<Self, ParseError> {
        match config {
            None => Ok(Self::builtin()),
            Some(raw) if raw.is_empty() => Ok(Self::builtin()),
            Some(raw) => Self::parse(raw),
        }
    }

    /// Parse `virtual1:real1:virtual2:real2:...`, preserving declaration
    /// order. An odd token count is a hard error rather than something to
    /// guess a pairing for: the caller treats it as fatal because every
    /// later path decision would depend on the broken table.
    pub fn parse(config: &[u8]) -> Result<Self, ParseError> {
        let tokens: Vec<&[u8]> = config.split(|byte| *byte == DELIMITER).collect();
        if tokens.len() % 2 != 0 {
            return Err(ParseError::UnpairedToken(tokens.len()));
        }

        let entries: Vec<MappingEntry> = tokens
            .chunks_exact(2)
            .map(|pair| {
                debug!(
                    virt = %String::from_utf8_lossy(pair[0]),
                    real = %String::from_utf8_lossy(pair[1]),
                    "mapping entry"
                );
                MappingEntry::new(pair[0], pair[1])
            })
            .collect();
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_config_selects_builtin() {
        let table = MappingTable::from_config(None).unwrap();
        assert_eq!(table, MappingTable::builtin());
        assert!(!table.is_empty());
    }

    #[test]
    fn empty_config_selects_builtin() {
        let table = MappingTable::from_config(Some(b"")).unwrap();
        assert_eq!(table, MappingTable::builtin());
    }

    #[test]
    fn tokens_pair_sequentially_in_order() {
        let table = MappingTable::parse(b"/etc/app:/home/user/.etc/app:/var/lib/app:/srv/app").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.entries()[0].virtual_prefix(), b"/etc/app");
        assert_eq!(table.entries()[0].real_prefix(), b"/home/user/.etc/app");
        assert_eq!(table.entries()[1].virtual_prefix(), b"/var/lib/app");
        assert_eq!(table.entries()[1].real_prefix(), b"/srv/app");
    }

    #[test]
    fn odd_token_count_is_an_error() {
        let err = MappingTable::parse(b"/a:/b:/c").unwrap_err();
        assert!(matches!(err, ParseError::UnpairedToken(3)));
    }

    #[test]
    fn single_token_is_an_error() {
        let err = MappingTable::parse(b"/only").unwrap_err();
        assert!(matches!(err, ParseError::UnpairedToken(1)));
    }

    #[test]
    fn empty_tokens_are_kept_as_is() {
        // No validation of token contents: "::" yields two empty prefixes.
        let table = MappingTable::parse(b":").unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.entries()[0].virtual_prefix(), b"");
        assert_eq!(table.entries()[0].real_prefix(), b"");
    }

    #[test]
    fn non_utf8_tokens_survive_parsing() {
        let table = MappingTable::parse(b"/\xff\xfe:/real").unwrap();
        assert_eq!(table.entries()[0].virtual_prefix(), b"/\xff\xfe");
    }
}

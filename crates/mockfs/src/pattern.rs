//! Wildcard search patterns for directory listings

use mockfs_store::{Error, Result};
use regex::Regex;

/// A `*` / `?` wildcard pattern matched case-insensitively against a single
/// entry name.
///
/// `""`, `"*"` and `"*.*"` all match every name, including names without
/// an extension.
#[derive(Debug, Clone)]
pub struct SearchPattern {
    source: String,
    regex: Option<Regex>,
}

impl SearchPattern {
    /// Pattern matching every name.
    pub const ALL: &'static str = "*";

    pub fn new(pattern: &str) -> Result<Self> {
        if pattern.contains(['/', '\\']) {
            return Err(Error::InvalidPattern {
                pattern: pattern.to_string(),
                message: "patterns match a single name and cannot contain separators".into(),
            });
        }

        if matches!(pattern, "" | "*" | "*.*") {
            return Ok(Self {
                source: pattern.to_string(),
                regex: None,
            });
        }

        let mut expr = String::from("(?i)^");
        for c in pattern.chars() {
            match c {
                '*' => expr.push_str(".*"),
                '?' => expr.push('.'),
                other => expr.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
            }
        }
        expr.push('$');

        let regex = Regex::new(&expr).map_err(|e| Error::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            source: pattern.to_string(),
            regex: Some(regex),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, name: &str) -> bool {
        match &self.regex {
            Some(regex) => regex.is_match(name),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("*", "anything", true)]
    #[case("*.*", "no_extension", true)]
    #[case("*.txt", "notes.TXT", true)]
    #[case("*.txt", "notes.txt.bak", false)]
    #[case("data?.csv", "data1.csv", true)]
    #[case("data?.csv", "data12.csv", false)]
    #[case("a+b(1).txt", "A+B(1).txt", true)]
    fn test_matches(#[case] pattern: &str, #[case] name: &str, #[case] expected: bool) {
        let pattern = SearchPattern::new(pattern).unwrap();
        assert_eq!(pattern.matches(name), expected);
    }

    #[test]
    fn test_rejects_separators() {
        assert!(SearchPattern::new("sub/*.txt").is_err());
        assert!(SearchPattern::new("sub\\*.txt").is_err());
    }
}

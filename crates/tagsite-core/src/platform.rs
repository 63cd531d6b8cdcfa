//! Platform codes and per-platform code normalization

use std::fmt;

use serde::{Deserialize, Serialize};

/// The platform whose codes carry a fixed two-letter prefix
pub const PREFIXED_PLATFORM: &str = "rj";

/// Canonical-case prefix for [`PREFIXED_PLATFORM`] codes
pub const CODE_PREFIX: &str = "RJ";

/// Default platform list when configuration does not provide one
pub const DEFAULT_PLATFORMS: [&str; 2] = ["rj", "steam"];

/// A short storefront/codespace identifier (e.g. `rj`, `steam`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Platform(String);

impl Platform {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Normalize a user-entered game code for this platform.
    ///
    /// Only the prefixed platform is touched: when the code does not already
    /// start with the prefix (case-insensitively) the canonical prefix is
    /// prepended. The rest of the input keeps its case. Callers trim first.
    pub fn normalize_code(&self, code: &str) -> String {
        if self.0 != PREFIXED_PLATFORM {
            return code.to_string();
        }
        let has_prefix = code
            .get(..CODE_PREFIX.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(CODE_PREFIX));
        if has_prefix {
            code.to_string()
        } else {
            format!("{CODE_PREFIX}{code}")
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::new(PREFIXED_PLATFORM)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Platform {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_added_when_missing() {
        let rj = Platform::new("rj");
        assert_eq!(rj.normalize_code("01234567"), "RJ01234567");
        assert_eq!(rj.normalize_code("abc"), "RJabc");
    }

    #[test]
    fn test_existing_prefix_kept_verbatim() {
        let rj = Platform::new("rj");
        assert_eq!(rj.normalize_code("RJ123"), "RJ123");
        assert_eq!(rj.normalize_code("rj123"), "rj123");
        assert_eq!(rj.normalize_code("Rj0aB"), "Rj0aB");
    }

    #[test]
    fn test_other_platforms_untouched() {
        let steam = Platform::new("steam");
        assert_eq!(steam.normalize_code("12345"), "12345");
        assert_eq!(steam.normalize_code("rj1"), "rj1");
    }

    #[test]
    fn test_multibyte_input_does_not_panic() {
        let rj = Platform::new("rj");
        assert_eq!(rj.normalize_code("新"), "RJ新");
        assert_eq!(rj.normalize_code("r新"), "RJr新");
    }
}

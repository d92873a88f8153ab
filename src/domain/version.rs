//! Semantic version parsing and precedence ordering
//!
//! Wraps [`semver::Version`] so that ordering and equality follow SemVer
//! precedence only: build metadata is carried for display but never compared.
//! Numeric fields written with leading zeros (`01.2.3`, `1.0.0-rc.01`) are
//! accepted; the tag text is kept as written.

use crate::error::VersionError;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A `MAJOR.MINOR.PATCH[-prerelease][+build]` version
#[derive(Debug, Clone)]
pub struct SemanticVersion {
    version: semver::Version,
    /// Text as it appeared in the tag
    text: String,
}

impl SemanticVersion {
    /// Parse a raw tag body. No `v` prefix is stripped.
    pub fn parse(text: &str) -> Result<Self, VersionError> {
        let version = match semver::Version::parse(text) {
            Ok(version) => version,
            Err(_) => strip_leading_zeros(text)
                .and_then(|normalized| semver::Version::parse(&normalized).ok())
                .ok_or_else(|| VersionError::invalid_format(text))?,
        };
        Ok(Self {
            version,
            text: text.to_string(),
        })
    }

    /// Create a release version without pre-release or build metadata
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        let version = semver::Version::new(major, minor, patch);
        Self {
            text: version.to_string(),
            version,
        }
    }

    pub fn major(&self) -> u64 {
        self.version.major
    }

    pub fn minor(&self) -> u64 {
        self.version.minor
    }

    pub fn patch(&self) -> u64 {
        self.version.patch
    }

    /// Returns true if the version carries pre-release identifiers
    pub fn is_prerelease(&self) -> bool {
        !self.version.pre.is_empty()
    }

    /// The dot-separated pre-release identifiers, if any
    pub fn pre_release(&self) -> Option<&str> {
        (!self.version.pre.is_empty()).then(|| self.version.pre.as_str())
    }

    /// The build metadata, if any
    pub fn build_metadata(&self) -> Option<&str> {
        (!self.version.build.is_empty()).then(|| self.version.build.as_str())
    }

    /// Tag text, used for "same as resolved" comparisons
    pub fn text(&self) -> String {
        self.text.clone()
    }
}

/// Rewrite numeric core and pre-release identifiers without leading zeros.
/// Returns None when nothing changes.
fn strip_leading_zeros(text: &str) -> Option<String> {
    let (body, build) = match text.split_once('+') {
        Some((body, build)) => (body, Some(build)),
        None => (text, None),
    };
    let (core, pre) = match body.split_once('-') {
        Some((core, pre)) => (core, Some(pre)),
        None => (body, None),
    };

    let trim = |ident: &str| -> String {
        if ident.len() > 1 && ident.bytes().all(|b| b.is_ascii_digit()) {
            let trimmed = ident.trim_start_matches('0');
            let trimmed = if trimmed.is_empty() { "0" } else { trimmed };
            trimmed.to_string()
        } else {
            ident.to_string()
        }
    };
    let join = |part: &str| part.split('.').map(trim).collect::<Vec<_>>().join(".");

    let mut normalized = join(core);
    if let Some(pre) = pre {
        normalized.push('-');
        normalized.push_str(&join(pre));
    }
    if let Some(build) = build {
        normalized.push('+');
        normalized.push_str(build);
    }
    (normalized != text).then_some(normalized)
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        // semver::Prerelease orders an empty pre-release above any non-empty one,
        // numeric identifiers below alphanumeric ones, and shorter prefixes first.
        let (a, b) = (&self.version, &other.version);
        (a.major, a.minor, a.patch)
            .cmp(&(b.major, b.minor, b.patch))
            .then_with(|| a.pre.cmp(&b.pre))
    }
}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SemanticVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SemanticVersion {}

impl FromStr for SemanticVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for SemanticVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn v(text: &str) -> SemanticVersion {
        SemanticVersion::parse(text).unwrap()
    }

    #[test]
    fn test_parse_release() {
        let version = v("12.1.6");
        assert_eq!(version.major(), 12);
        assert_eq!(version.minor(), 1);
        assert_eq!(version.patch(), 6);
        assert!(!version.is_prerelease());
        assert_eq!(version.pre_release(), None);
        assert_eq!(version.build_metadata(), None);
    }

    #[test]
    fn test_parse_prerelease_and_build() {
        let version = v("2.0.0-beta.2+exp.sha.5114f85");
        assert!(version.is_prerelease());
        assert_eq!(version.pre_release(), Some("beta.2"));
        assert_eq!(version.build_metadata(), Some("exp.sha.5114f85"));
        assert_eq!(version.text(), "2.0.0-beta.2+exp.sha.5114f85");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for text in ["", "1", "1.2", "v1.2.3", "1.2.3.4", "a.b.c", "1.2.-3", "main", "1.2.3^{}"] {
            let err = SemanticVersion::parse(text).unwrap_err();
            assert_eq!(err, VersionError::invalid_format(text));
        }
    }

    #[test]
    fn test_parse_leading_zeros() {
        let version = v("01.02.003");
        assert_eq!((version.major(), version.minor(), version.patch()), (1, 2, 3));
        assert_eq!(version.text(), "01.02.003");
        assert_eq!(version.to_string(), "01.02.003");
        assert_eq!(version, v("1.2.3"));

        let pre = v("1.0.0-rc.01");
        assert_eq!(pre.pre_release(), Some("rc.1"));
        assert!(pre < v("1.0.0-rc.2"));
        assert!(v("1.0.0-01") < v("1.0.0"));
    }

    #[test]
    fn test_strip_leading_zeros() {
        assert_eq!(strip_leading_zeros("1.2.3"), None);
        assert_eq!(strip_leading_zeros("01.0.00"), Some("1.0.0".to_string()));
        assert_eq!(
            strip_leading_zeros("1.0.0-beta.007+build.01"),
            Some("1.0.0-beta.7+build.01".to_string())
        );
    }

    #[test]
    fn test_numeric_ordering_not_lexical() {
        assert!(v("1.9.0") < v("1.10.0"));
        assert!(v("9.0.0") < v("10.0.0"));
        assert!(v("1.0.9") < v("1.0.10"));
    }

    #[test]
    fn test_prerelease_below_release() {
        assert!(v("1.0.0-alpha") < v("1.0.0"));
        assert!(v("1.0.0-rc.1") < v("1.0.0"));
        assert!(v("1.0.0") < v("1.0.1-alpha"));
    }

    #[test]
    fn test_prerelease_identifier_precedence() {
        // SemVer 2.0.0 example chain
        let chain = [
            "1.0.0-alpha",
            "1.0.0-alpha.1",
            "1.0.0-alpha.beta",
            "1.0.0-beta",
            "1.0.0-beta.2",
            "1.0.0-beta.11",
            "1.0.0-rc.1",
            "1.0.0",
        ];
        for pair in chain.windows(2) {
            assert!(v(pair[0]) < v(pair[1]), "{} < {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_build_metadata_ignored_by_ordering() {
        assert_eq!(v("1.0.0+build.1"), v("1.0.0+build.2"));
        assert_eq!(v("1.0.0+abc").cmp(&v("1.0.0")), Ordering::Equal);
        assert_ne!(v("1.0.0+abc").text(), v("1.0.0").text());
    }

    #[test]
    fn test_from_str_and_display() {
        let version: SemanticVersion = "3.4.5-rc.1".parse().unwrap();
        assert_eq!(version.to_string(), "3.4.5-rc.1");
    }

    #[test]
    fn test_serialize_as_string() {
        let json = serde_json::to_string(&v("1.2.3-beta")).unwrap();
        assert_eq!(json, "\"1.2.3-beta\"");
    }

    fn version_strategy() -> impl Strategy<Value = SemanticVersion> {
        let pre = prop_oneof![
            Just(String::new()),
            Just("-alpha".to_string()),
            Just("-alpha.1".to_string()),
            Just("-beta".to_string()),
            Just("-beta.2".to_string()),
            Just("-rc.1".to_string()),
            Just("-1".to_string()),
        ];
        let build = prop_oneof![Just(String::new()), Just("+build.7".to_string())];
        (0u64..4, 0u64..4, 0u64..4, pre, build).prop_map(|(ma, mi, pa, pre, build)| {
            SemanticVersion::parse(&format!("{ma}.{mi}.{pa}{pre}{build}")).unwrap()
        })
    }

    proptest! {
        #[test]
        fn prop_reflexive(a in version_strategy()) {
            prop_assert_eq!(a.cmp(&a), Ordering::Equal);
        }

        #[test]
        fn prop_antisymmetric(a in version_strategy(), b in version_strategy()) {
            prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
        }

        #[test]
        fn prop_transitive(
            a in version_strategy(),
            b in version_strategy(),
            c in version_strategy(),
        ) {
            if a <= b && b <= c {
                prop_assert!(a <= c);
            }
        }
    }
}

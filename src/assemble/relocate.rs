// src/assemble/relocate.rs

//! Namespace relocation
//!
//! A relocation rule rewrites a source namespace prefix to a destination
//! prefix throughout an assembly: entry paths (slash form), dot-form
//! entry names (service-registration files named after the interface
//! FQN), and internal cross-references inside entry content (both dot
//! and slash forms).

/// (source namespace prefix, destination namespace prefix), dot form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelocationRule {
    from: String,
    to: String,
}

impl RelocationRule {
    /// Create a rule from dot-form namespace prefixes
    /// (e.g. `com.fasterxml.jackson` -> `dev.mclib.libs.jackson`)
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Parse a rule from `from=to` form
    pub fn parse(s: &str) -> Option<Self> {
        let (from, to) = s.split_once('=')?;
        let (from, to) = (from.trim(), to.trim());
        if from.is_empty() || to.is_empty() {
            return None;
        }
        Some(Self::new(from, to))
    }

    /// Source prefix, dot form
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Destination prefix, dot form
    pub fn to(&self) -> &str {
        &self.to
    }

    /// Source prefix as a path prefix
    pub fn from_path(&self) -> String {
        self.from.replace('.', "/")
    }

    /// Destination prefix as a path prefix
    pub fn to_path(&self) -> String {
        self.to.replace('.', "/")
    }

    /// Does this rule apply to the entry path?
    pub fn applies_to_path(&self, path: &str) -> bool {
        has_prefix_at_boundary(path, &self.from_path(), '/')
    }

    /// Rewrite an entry path, or None when the rule does not apply
    pub fn relocate_path(&self, path: &str) -> Option<String> {
        let from = self.from_path();
        if has_prefix_at_boundary(path, &from, '/') {
            Some(format!("{}{}", self.to_path(), &path[from.len()..]))
        } else {
            None
        }
    }

    /// Rewrite a dot-form name (e.g. a service-registration file named
    /// after the interface FQN), or None when the rule does not apply
    pub fn relocate_name(&self, name: &str) -> Option<String> {
        if has_prefix_at_boundary(name, &self.from, '.') {
            Some(format!("{}{}", self.to, &name[self.from.len()..]))
        } else {
            None
        }
    }

    /// Rewrite cross-references inside entry content
    ///
    /// Applies to every retained entry, not just relocated ones: service
    /// files and descriptors elsewhere in the artifact may name classes
    /// under the source namespace.
    pub fn relocate_content(&self, data: &[u8]) -> Vec<u8> {
        let pass = replace_bytes(data, self.from.as_bytes(), self.to.as_bytes());
        replace_bytes(&pass, self.from_path().as_bytes(), self.to_path().as_bytes())
    }
}

/// Prefix match that stops at a namespace boundary: `com/fasterxml` matches
/// `com/fasterxml/X` but not `com/fasterxmlextra/X`.
fn has_prefix_at_boundary(s: &str, prefix: &str, boundary: char) -> bool {
    match s.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with(boundary),
        None => false,
    }
}

/// Replace every occurrence of `needle` in `haystack`
fn replace_bytes(haystack: &[u8], needle: &[u8], replacement: &[u8]) -> Vec<u8> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return haystack.to_vec();
    }

    let mut out = Vec::with_capacity(haystack.len());
    let mut i = 0;
    while i < haystack.len() {
        if haystack[i..].starts_with(needle) {
            out.extend_from_slice(replacement);
            i += needle.len();
        } else {
            out.push(haystack[i]);
            i += 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule() -> RelocationRule {
        RelocationRule::new("com.fasterxml.jackson", "dev.mclib.libs.jackson")
    }

    #[test]
    fn test_relocate_path() {
        assert_eq!(
            rule().relocate_path("com/fasterxml/jackson/databind/ObjectMapper.class"),
            Some("dev/mclib/libs/jackson/databind/ObjectMapper.class".to_string())
        );
    }

    #[test]
    fn test_relocate_path_requires_boundary() {
        assert_eq!(rule().relocate_path("com/fasterxml/jacksonx/Foo.class"), None);
        assert_eq!(rule().relocate_path("org/other/Foo.class"), None);
    }

    #[test]
    fn test_relocate_name() {
        assert_eq!(
            rule().relocate_name("com.fasterxml.jackson.core.ObjectCodec"),
            Some("dev.mclib.libs.jackson.core.ObjectCodec".to_string())
        );
        // Boundary check: a longer namespace sharing the prefix text stays put
        assert_eq!(rule().relocate_name("com.fasterxml.jacksonx.Codec"), None);
        assert_eq!(rule().relocate_name("org.other.Codec"), None);
    }

    #[test]
    fn test_relocate_content_dot_form() {
        let data = b"impl=com.fasterxml.jackson.databind.ObjectMapper\n";
        let out = rule().relocate_content(data);
        assert_eq!(
            out,
            b"impl=dev.mclib.libs.jackson.databind.ObjectMapper\n".to_vec()
        );
    }

    #[test]
    fn test_relocate_content_slash_form() {
        let data = b"ref: com/fasterxml/jackson/core/JsonParser";
        let out = rule().relocate_content(data);
        assert_eq!(out, b"ref: dev/mclib/libs/jackson/core/JsonParser".to_vec());
    }

    #[test]
    fn test_relocate_content_untouched_when_absent() {
        let data = b"nothing to see here";
        assert_eq!(rule().relocate_content(data), data.to_vec());
    }

    #[test]
    fn test_parse() {
        let parsed = RelocationRule::parse("a.b=c.d").unwrap();
        assert_eq!(parsed.from(), "a.b");
        assert_eq!(parsed.to(), "c.d");
        assert!(RelocationRule::parse("no-separator").is_none());
        assert!(RelocationRule::parse("=x").is_none());
    }

    #[test]
    fn test_replace_bytes_multiple_hits() {
        assert_eq!(replace_bytes(b"abcabc", b"abc", b"x"), b"xx".to_vec());
        assert_eq!(replace_bytes(b"a", b"abc", b"x"), b"a".to_vec());
    }
}

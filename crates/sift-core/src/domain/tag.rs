use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TagName(String);

impl TagName {
    pub fn new(raw: &str) -> Result<Self, CoreError> {
        let normalized = normalize_tag_name(raw)?;
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TagName {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<TagName> for String {
    fn from(value: TagName) -> Self {
        value.0
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lowercases and collapses inner whitespace runs into single spaces.
pub fn normalize_tag_name(raw: &str) -> Result<String, CoreError> {
    let mut out = String::with_capacity(raw.len());
    for word in raw.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.extend(word.chars().flat_map(char::to_lowercase));
    }

    if out.is_empty() {
        return Err(CoreError::InvalidTagName);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{normalize_tag_name, TagName};

    #[test]
    fn normalize_tag_basic() {
        let value = normalize_tag_name(" Live ").unwrap();
        assert_eq!(value, "live");
    }

    #[test]
    fn normalize_tag_collapse_spaces() {
        let value = normalize_tag_name("Hip \t  Hop").unwrap();
        assert_eq!(value, "hip hop");
    }

    #[test]
    fn normalize_tag_empty() {
        assert!(normalize_tag_name("   ").is_err());
    }

    #[test]
    fn deserialize_normalizes() {
        let tag: TagName = serde_json::from_str("\"  Soundtrack \"").unwrap();
        assert_eq!(tag.as_str(), "soundtrack");
        assert!(serde_json::from_str::<TagName>("\"\"").is_err());
    }
}

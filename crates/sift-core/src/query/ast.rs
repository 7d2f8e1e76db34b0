use serde::{Deserialize, Serialize};
use std::fmt;

/// Compiled form of a search query.
///
/// Built bottom-up by the parser and never mutated afterwards. Text criteria
/// keep the text as typed; matching lowercases both sides when evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    /// Matches every record. Result of an empty or fully elided query.
    True,
    And(Box<Predicate>, Box<Predicate>),
    Or(Box<Predicate>, Box<Predicate>),
    TitleContains(String),
    ArtistContains(String),
    AlbumContains(String),
    YearEquals(i32),
    /// Inclusive on both ends; `None` leaves that side unbounded.
    YearRange {
        min: Option<i32>,
        max: Option<i32>,
    },
    ExplicitIs(bool),
    TagIncluded(String),
    TagExcluded(String),
    /// Title, artist or album contains the text.
    FreeText(String),
}

impl Predicate {
    pub fn and(left: Predicate, right: Predicate) -> Self {
        Predicate::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Predicate, right: Predicate) -> Self {
        Predicate::Or(Box::new(left), Box::new(right))
    }

    pub fn is_true(&self) -> bool {
        matches!(self, Predicate::True)
    }

    /// The three-field disjunction a `FreeText` criterion stands for.
    pub fn free_text(text: &str) -> Self {
        Predicate::or(
            Predicate::or(
                Predicate::TitleContains(text.to_string()),
                Predicate::ArtistContains(text.to_string()),
            ),
            Predicate::AlbumContains(text.to_string()),
        )
    }
}

/// Renders the predicate back into query syntax. Compiling the output
/// yields an equal predicate. `True` renders as the empty query on its own
/// and as `()` inside a combination.
impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::True => Ok(()),
            Predicate::And(left, right) => write_combined(f, left, "AND", right),
            Predicate::Or(left, right) => write_combined(f, left, "OR", right),
            Predicate::TitleContains(text) => write_quoted(f, "t:", text),
            Predicate::ArtistContains(text) => write_quoted(f, "a:", text),
            Predicate::AlbumContains(text) => write_quoted(f, "al:", text),
            Predicate::YearEquals(year) => write!(f, "y:{year}"),
            Predicate::YearRange { min, max } => {
                f.write_str("y:")?;
                if let Some(min) = min {
                    write!(f, "{min}")?;
                }
                f.write_str("-")?;
                if let Some(max) = max {
                    write!(f, "{max}")?;
                }
                Ok(())
            }
            Predicate::ExplicitIs(flag) => write!(f, "e:{flag}"),
            Predicate::TagIncluded(name) => write_quoted(f, "+", name),
            Predicate::TagExcluded(name) => write_quoted(f, "-", name),
            Predicate::FreeText(text) => write_quoted(f, "", text),
        }
    }
}

// Combination is left-associative, so only a combinator on the right needs
// parentheses. A `True` operand is written as the empty group, which
// compiles back to `True`.
fn write_combined(
    f: &mut fmt::Formatter<'_>,
    left: &Predicate,
    relation: &str,
    right: &Predicate,
) -> fmt::Result {
    match left {
        Predicate::True => f.write_str("()")?,
        _ => write!(f, "{left}")?,
    }
    write!(f, " {relation} ")?;
    match right {
        Predicate::True => f.write_str("()"),
        Predicate::And(..) | Predicate::Or(..) => write!(f, "({right})"),
        _ => write!(f, "{right}"),
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, prefix: &str, text: &str) -> fmt::Result {
    f.write_str(prefix)?;
    f.write_str("\"")?;
    for ch in text.chars() {
        if matches!(ch, '"' | '\\' | '(' | ')') {
            f.write_str("\\")?;
        }
        write!(f, "{ch}")?;
    }
    f.write_str("\"")
}

#[cfg(test)]
mod tests {
    use super::Predicate;

    #[test]
    fn free_text_expands_to_three_fields() {
        let expanded = Predicate::free_text("blue");
        assert_eq!(
            expanded,
            Predicate::or(
                Predicate::or(
                    Predicate::TitleContains("blue".to_string()),
                    Predicate::ArtistContains("blue".to_string()),
                ),
                Predicate::AlbumContains("blue".to_string()),
            )
        );
    }

    #[test]
    fn display_parenthesizes_right_combinators() {
        let predicate = Predicate::and(
            Predicate::TitleContains("a".to_string()),
            Predicate::or(
                Predicate::TitleContains("b".to_string()),
                Predicate::YearRange {
                    min: None,
                    max: Some(2020),
                },
            ),
        );
        assert_eq!(predicate.to_string(), "t:\"a\" AND (t:\"b\" OR y:-2020)");
    }

    #[test]
    fn display_escapes_special_characters() {
        let predicate = Predicate::FreeText("say \"hi\" (live)".to_string());
        assert_eq!(predicate.to_string(), r#""say \"hi\" \(live\)""#);
    }

    #[test]
    fn true_renders_empty() {
        assert_eq!(Predicate::True.to_string(), "");
        let predicate = Predicate::or(Predicate::TitleContains("a".to_string()), Predicate::True);
        assert_eq!(predicate.to_string(), "t:\"a\" OR ()");
    }

    #[test]
    fn serializes_as_tagged_tree() {
        let predicate = Predicate::or(Predicate::TagIncluded("live".to_string()), Predicate::True);
        let json = serde_json::to_value(&predicate).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({ "or": [{ "tag_included": "live" }, "true"] })
        );
    }
}

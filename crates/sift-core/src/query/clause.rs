use crate::query::tokenizer::{Token, TokenKind};

/// One classified unit of query meaning. Operands are borrowed from the
/// token text; value parsing for `Year` and `Explicit` is left to the
/// parser so malformed values can be dropped there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clause<'a> {
    Group(&'a str),
    Title(&'a str),
    Artist(&'a str),
    Album(&'a str),
    Year(&'a str),
    Explicit(&'a str),
    TagIncluded(&'a str),
    TagExcluded(&'a str),
    FreeText(&'a str),
}

pub fn classify(token: &Token) -> Clause<'_> {
    let text = token.text();

    if token.kind() == TokenKind::Group {
        if let Some(inner) = text.strip_prefix('(').and_then(|rest| rest.strip_suffix(')')) {
            return Clause::Group(inner);
        }
    }

    if let Some(rest) = text.strip_prefix("t:") {
        Clause::Title(strip_quotes(rest))
    } else if let Some(rest) = text.strip_prefix("a:") {
        Clause::Artist(strip_quotes(rest))
    } else if let Some(rest) = text.strip_prefix("al:") {
        Clause::Album(strip_quotes(rest))
    } else if let Some(rest) = text.strip_prefix("y:") {
        Clause::Year(rest)
    } else if let Some(rest) = text.strip_prefix("e:") {
        Clause::Explicit(rest)
    } else if let Some(rest) = text.strip_prefix('+') {
        Clause::TagIncluded(strip_quotes(rest))
    } else if let Some(rest) = text.strip_prefix('-') {
        Clause::TagExcluded(strip_quotes(rest))
    } else {
        Clause::FreeText(strip_quotes(text))
    }
}

/// Removes one leading and one trailing `"` when both are present.
pub fn strip_quotes(text: &str) -> &str {
    if text.len() >= 2 {
        if let Some(inner) = text.strip_prefix('"').and_then(|rest| rest.strip_suffix('"')) {
            return inner;
        }
    }
    text
}

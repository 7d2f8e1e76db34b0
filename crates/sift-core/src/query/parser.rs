use crate::query::ast::Predicate;
use crate::query::clause::{classify, Clause};
use crate::query::tokenizer::{tokenize_with_limit, Token};
use crate::query::SyntaxError;
use std::collections::VecDeque;
use tracing::{debug, trace};

const TRUTHY_WORDS: [&str; 4] = ["1", "true", "yes", "on"];
const FALSY_WORDS: [&str; 4] = ["0", "false", "no", "off"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Relation {
    And,
    Or,
}

impl Relation {
    fn from_token(token: &Token) -> Option<Self> {
        match token.text() {
            "AND" => Some(Relation::And),
            "OR" => Some(Relation::Or),
            _ => None,
        }
    }
}

/// Folds a token queue into a predicate, consuming it.
///
/// Clauses combine left to right with no precedence between `AND` and
/// `OR`: `a AND b OR c` is `(a AND b) OR c`. Adjacent clauses without a
/// relation keyword are joined with `AND`. Clauses whose value cannot be
/// interpreted are dropped; the only errors come from tokenizing groups.
pub fn parse(tokens: &mut VecDeque<Token>) -> Result<Predicate, SyntaxError> {
    parse_with_limit(tokens, None)
}

pub(crate) fn parse_with_limit(
    tokens: &mut VecDeque<Token>,
    max_depth: Option<usize>,
) -> Result<Predicate, SyntaxError> {
    let mut accumulator = Predicate::True;

    while let Some(token) = tokens.pop_front() {
        let (relation, token) = match Relation::from_token(&token) {
            Some(relation) => match tokens.pop_front() {
                Some(next) => (Some(relation), next),
                None => break,
            },
            None => (None, token),
        };

        let Some(predicate) = build_clause(classify(&token), max_depth)? else {
            continue;
        };

        // A `True` accumulator has nothing to join, so the relation in front
        // of the first contributing clause is dropped.
        accumulator = if accumulator.is_true() {
            predicate
        } else {
            match relation {
                Some(Relation::Or) => Predicate::or(accumulator, predicate),
                Some(Relation::And) | None => Predicate::and(accumulator, predicate),
            }
        };
    }

    Ok(accumulator)
}

fn build_clause(
    clause: Clause<'_>,
    max_depth: Option<usize>,
) -> Result<Option<Predicate>, SyntaxError> {
    let predicate = match clause {
        Clause::Group(inner) => {
            trace!(group = inner, "expanding group");
            let mut tokens: VecDeque<Token> = tokenize_with_limit(inner, max_depth)?.into();
            Some(parse_with_limit(&mut tokens, max_depth)?)
        }
        Clause::Title(text) => Some(Predicate::TitleContains(text.to_string())),
        Clause::Artist(text) => Some(Predicate::ArtistContains(text.to_string())),
        Clause::Album(text) => Some(Predicate::AlbumContains(text.to_string())),
        Clause::Year(raw) => parse_year(raw),
        Clause::Explicit(raw) => parse_explicit(raw),
        Clause::TagIncluded(name) => Some(Predicate::TagIncluded(name.to_string())),
        Clause::TagExcluded(name) => Some(Predicate::TagExcluded(name.to_string())),
        Clause::FreeText(text) => Some(Predicate::FreeText(text.to_string())),
    };
    Ok(predicate)
}

fn parse_year(raw: &str) -> Option<Predicate> {
    let parts: Vec<&str> = raw.split('-').collect();
    let predicate = match parts.as_slice() {
        [year] => year.parse().ok().map(Predicate::YearEquals),
        [min, max] => {
            let min = min.parse().ok();
            let max = max.parse().ok();
            if min.is_none() && max.is_none() {
                None
            } else {
                Some(Predicate::YearRange { min, max })
            }
        }
        _ => None,
    };

    if predicate.is_none() {
        debug!(value = raw, "dropping year clause");
    }
    predicate
}

fn parse_explicit(raw: &str) -> Option<Predicate> {
    let lowered = raw.to_lowercase();
    if TRUTHY_WORDS.contains(&lowered.as_str()) {
        Some(Predicate::ExplicitIs(true))
    } else if FALSY_WORDS.contains(&lowered.as_str()) {
        Some(Predicate::ExplicitIs(false))
    } else {
        debug!(value = raw, "dropping explicit clause");
        None
    }
}

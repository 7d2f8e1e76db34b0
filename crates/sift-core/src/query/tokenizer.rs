use crate::query::SyntaxError;
use serde::Serialize;
use std::mem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Word,
    /// Emitted at a closing quote; the quotes are part of the text.
    Quoted,
    /// A parenthesized group, parentheses included, contents unparsed.
    Group,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    kind: TokenKind,
    text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn word(text: impl Into<String>) -> Self {
        Self::new(TokenKind::Word, text)
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Splits a query into tokens with no limit on group nesting.
pub fn tokenize(input: &str) -> Result<Vec<Token>, SyntaxError> {
    tokenize_with_limit(input, None)
}

/// Splits a query into tokens, failing with [`SyntaxError::TooDeep`] once
/// group nesting passes `max_depth`.
pub fn tokenize_with_limit(
    input: &str,
    max_depth: Option<usize>,
) -> Result<Vec<Token>, SyntaxError> {
    let mut scanner = Scanner::new(max_depth);
    for ch in input.chars() {
        scanner.push(ch)?;
    }
    scanner.finish()
}

struct Scanner {
    max_depth: Option<usize>,
    tokens: Vec<Token>,
    current: String,
    escaped: bool,
    in_quotes: bool,
    depth: usize,
    // Whether the outermost open bracket started the token. An escaped or
    // mid-word bracket leaves a plain word.
    bracket_leads: bool,
}

impl Scanner {
    fn new(max_depth: Option<usize>) -> Self {
        Self {
            max_depth,
            tokens: Vec::new(),
            current: String::new(),
            escaped: false,
            in_quotes: false,
            depth: 0,
            bracket_leads: false,
        }
    }

    fn push(&mut self, ch: char) -> Result<(), SyntaxError> {
        if self.depth > 0 {
            return self.push_grouped(ch);
        }

        if self.escaped {
            self.escaped = false;
            self.current.push(ch);
            return Ok(());
        }

        match ch {
            '\\' => self.escaped = true,
            '"' => {
                self.current.push(ch);
                if self.in_quotes {
                    self.in_quotes = false;
                    self.emit(TokenKind::Quoted);
                } else {
                    self.in_quotes = true;
                }
            }
            '(' if !self.in_quotes => {
                self.bracket_leads = self.current.is_empty();
                self.current.push(ch);
                self.enter_group()?;
            }
            ch if ch.is_whitespace() && !self.in_quotes => self.flush_word(),
            ch => self.current.push(ch),
        }
        Ok(())
    }

    // Inside a group everything is kept verbatim for the recursive parse,
    // backslashes included. An escaped character never moves the depth.
    fn push_grouped(&mut self, ch: char) -> Result<(), SyntaxError> {
        self.current.push(ch);
        if self.escaped {
            self.escaped = false;
            return Ok(());
        }

        match ch {
            '\\' => self.escaped = true,
            '(' => self.enter_group()?,
            ')' => {
                self.depth -= 1;
                if self.depth == 0 {
                    let kind = if self.bracket_leads {
                        TokenKind::Group
                    } else {
                        TokenKind::Word
                    };
                    self.emit(kind);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn enter_group(&mut self) -> Result<(), SyntaxError> {
        self.depth += 1;
        match self.max_depth {
            Some(limit) if self.depth > limit => Err(SyntaxError::TooDeep { limit }),
            _ => Ok(()),
        }
    }

    fn emit(&mut self, kind: TokenKind) {
        let text = mem::take(&mut self.current);
        let text = match kind {
            TokenKind::Group => text.trim().to_string(),
            TokenKind::Word | TokenKind::Quoted => text,
        };
        self.tokens.push(Token::new(kind, text));
    }

    fn flush_word(&mut self) {
        if self.current.trim().is_empty() {
            self.current.clear();
        } else {
            self.emit(TokenKind::Word);
        }
    }

    fn finish(mut self) -> Result<Vec<Token>, SyntaxError> {
        if self.in_quotes {
            return Err(SyntaxError::UnclosedQuote);
        }
        if self.depth > 0 {
            return Err(SyntaxError::UnclosedBracket);
        }
        self.flush_word();
        Ok(self.tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::{tokenize, tokenize_with_limit, Token, TokenKind};
    use crate::query::SyntaxError;

    fn texts(input: &str) -> Vec<String> {
        tokenize(input)
            .expect("tokenize")
            .into_iter()
            .map(|token| token.text().to_string())
            .collect()
    }

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(texts("  t:foo \t a:bar  "), vec!["t:foo", "a:bar"]);
    }

    #[test]
    fn empty_input_has_no_tokens() {
        assert!(tokenize("").expect("tokenize").is_empty());
        assert!(tokenize("   ").expect("tokenize").is_empty());
    }

    #[test]
    fn escaped_space_joins_words() {
        assert_eq!(tokenize("a\\ b").expect("tokenize"), vec![Token::word("a b")]);
    }

    #[test]
    fn escaped_quote_is_literal() {
        assert_eq!(texts("t:\\\"x"), vec!["t:\"x"]);
    }

    #[test]
    fn escaped_parens_do_not_group() {
        let tokens = tokenize("\\(a\\)").expect("tokenize");
        assert_eq!(tokens, vec![Token::word("(a)")]);
    }

    #[test]
    fn escaped_leading_paren_keeps_a_word() {
        let tokens = tokenize("\\(x(y)").expect("tokenize");
        assert_eq!(tokens, vec![Token::word("(x(y)")]);
    }

    #[test]
    fn quoted_literal_keeps_quotes_and_spaces() {
        let tokens = tokenize("t:\"foo bar\" baz").expect("tokenize");
        assert_eq!(
            tokens,
            vec![
                Token::new(TokenKind::Quoted, "t:\"foo bar\""),
                Token::word("baz"),
            ]
        );
    }

    #[test]
    fn closing_quote_ends_token() {
        assert_eq!(texts("\"a b\"c"), vec!["\"a b\"", "c"]);
    }

    #[test]
    fn parens_inside_quotes_are_ordinary() {
        assert_eq!(texts("\"(a\""), vec!["\"(a\""]);
    }

    #[test]
    fn group_is_one_token() {
        let tokens = tokenize("t:a AND (t:b OR (t:c d))").expect("tokenize");
        assert_eq!(
            tokens,
            vec![
                Token::word("t:a"),
                Token::word("AND"),
                Token::new(TokenKind::Group, "(t:b OR (t:c d))"),
            ]
        );
    }

    #[test]
    fn group_keeps_escapes_verbatim() {
        let tokens = tokenize("(a\\) b)").expect("tokenize");
        assert_eq!(tokens, vec![Token::new(TokenKind::Group, "(a\\) b)")]);
    }

    #[test]
    fn group_ignores_quotes() {
        assert_eq!(texts("(\"a) b"), vec!["(\"a)", "b"]);
    }

    #[test]
    fn prefix_before_paren_is_a_word() {
        let tokens = tokenize("foo(bar) baz").expect("tokenize");
        assert_eq!(tokens, vec![Token::word("foo(bar)"), Token::word("baz")]);
    }

    #[test]
    fn unclosed_quote_fails() {
        assert_eq!(
            tokenize("t:\"unterminated").unwrap_err(),
            SyntaxError::UnclosedQuote
        );
    }

    #[test]
    fn unclosed_bracket_fails() {
        assert_eq!(tokenize("(a (b)").unwrap_err(), SyntaxError::UnclosedBracket);
    }

    #[test]
    fn depth_limit_is_enforced() {
        assert!(tokenize_with_limit("((a))", Some(2)).is_ok());
        assert_eq!(
            tokenize_with_limit("(((a)))", Some(2)).unwrap_err(),
            SyntaxError::TooDeep { limit: 2 }
        );
    }

    #[test]
    fn retokenizing_a_plain_word_is_stable() {
        for word in ["t:foo", "+live", "y:2018-2020", "plain"] {
            let tokens = tokenize(word).expect("tokenize");
            assert_eq!(tokens, vec![Token::word(word)]);
        }
    }

    #[test]
    fn wrapped_subquery_round_trips() {
        for inner in ["a b", "t:x OR (y:2020 -live)", "\"q r\"", "a\\) b", ""] {
            let wrapped = format!("({inner})");
            let tokens = tokenize(&wrapped).expect("tokenize");
            assert_eq!(tokens, vec![Token::new(TokenKind::Group, wrapped.clone())]);
        }
    }
}

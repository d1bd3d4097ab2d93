//! Recursive descent stylesheet parser.
//!
//! Parses stylesheet text into a [`StyleSheet`] (a vector of [`RuleSet`]s). Uses
//! the logos-based tokenizer from [`crate::css::tokenizer`].

use logos::Logos;

use crate::css::model::*;
use crate::css::tokenizer::Token;

/// Errors from stylesheet parsing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected token at position {position}: {message}")]
    UnexpectedToken { position: usize, message: String },
    #[error("unexpected end of input: {0}")]
    UnexpectedEof(String),
}

/// A positioned token with byte-level span information for adjacency checks.
#[derive(Debug, Clone)]
struct PToken {
    token: Token,
    text: String,
    /// Index in the token stream (for error reporting).
    pos: usize,
    byte_start: usize,
    byte_end: usize,
}

/// Strip block comments (`/* ... */`), replacing each with a single space.
fn strip_comments(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("/*") {
        result.push_str(&rest[..start]);
        result.push(' ');
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            // Unterminated comment consumes the rest of the input.
            None => rest = "",
        }
    }
    result.push_str(rest);
    result
}

fn tokenize_with_spans(input: &str) -> Vec<PToken> {
    let lexer = Token::lexer(input);
    let mut tokens = Vec::new();
    let mut idx = 0;

    for (result, span) in lexer.spanned() {
        if let Ok(token) = result {
            tokens.push(PToken {
                text: input[span.clone()].to_string(),
                token,
                pos: idx,
                byte_start: span.start,
                byte_end: span.end,
            });
            idx += 1;
        }
    }

    tokens
}

/// Parse stylesheet text into a [`StyleSheet`].
pub fn parse_stylesheet(input: &str) -> Result<StyleSheet, ParseError> {
    let cleaned = strip_comments(input);
    let tokens = tokenize_with_spans(&cleaned);

    let mut parser = Parser { tokens, cursor: 0 };

    let mut rules = Vec::new();
    loop {
        parser.skip_semicolons();
        if parser.is_eof() {
            break;
        }
        rules.push(parser.parse_rule()?);
    }

    Ok(StyleSheet { rules })
}

struct Parser {
    tokens: Vec<PToken>,
    cursor: usize,
}

impl Parser {
    fn is_eof(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    fn peek(&self) -> Option<&PToken> {
        self.tokens.get(self.cursor)
    }

    fn peek_is(&self, token: &Token) -> bool {
        self.peek().is_some_and(|t| &t.token == token)
    }

    fn advance(&mut self) -> Option<&PToken> {
        let tok = self.tokens.get(self.cursor)?;
        self.cursor += 1;
        Some(tok)
    }

    fn expect(&mut self, expected: &Token) -> Result<PToken, ParseError> {
        match self.advance() {
            Some(tok) if &tok.token == expected => Ok(tok.clone()),
            Some(tok) => Err(ParseError::UnexpectedToken {
                position: tok.pos,
                message: format!("expected {:?}, got {:?} '{}'", expected, tok.token, tok.text),
            }),
            None => Err(ParseError::UnexpectedEof(format!("expected {expected:?}"))),
        }
    }

    /// Whether the current token starts exactly where the previous one ended.
    fn is_adjacent(&self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let prev = &self.tokens[self.cursor - 1];
        self.peek().is_some_and(|curr| curr.byte_start == prev.byte_end)
    }

    /// Stray `;` between rules are tolerated.
    fn skip_semicolons(&mut self) {
        while self.peek_is(&Token::Semicolon) {
            self.cursor += 1;
        }
    }

    /// `selector[, selector]* { declarations }`
    fn parse_rule(&mut self) -> Result<RuleSet, ParseError> {
        let mut selectors = vec![self.parse_selector()?];
        while self.peek_is(&Token::Comma) {
            self.advance();
            selectors.push(self.parse_selector()?);
        }

        self.expect(&Token::BraceOpen)?;
        let declarations = self.parse_declarations()?;
        self.expect(&Token::BraceClose)?;

        Ok(RuleSet { selectors, declarations })
    }

    /// A dotted name: `Ident ( '.' Ident )*`, with no whitespace inside.
    fn parse_selector(&mut self) -> Result<Selector, ParseError> {
        let first = self.expect_ident("selector")?;
        let mut segments = vec![first];

        while self.is_adjacent() && self.peek_is(&Token::Dot) {
            self.advance();
            segments.push(self.expect_ident("selector segment after '.'")?);
        }

        Ok(Selector::from_segments(&segments))
    }

    fn expect_ident(&mut self, what: &str) -> Result<String, ParseError> {
        match self.advance() {
            Some(tok) if tok.token == Token::Ident => Ok(tok.text.clone()),
            Some(tok) => Err(ParseError::UnexpectedToken {
                position: tok.pos,
                message: format!("expected {what}, got {:?} '{}'", tok.token, tok.text),
            }),
            None => Err(ParseError::UnexpectedEof(format!("expected {what}"))),
        }
    }

    fn parse_declarations(&mut self) -> Result<Vec<Declaration>, ParseError> {
        let mut declarations = Vec::new();

        loop {
            self.skip_semicolons();
            match self.peek() {
                None => return Err(ParseError::UnexpectedEof("expected '}'".into())),
                Some(t) if t.token == Token::BraceClose => break,
                Some(_) => declarations.push(self.parse_declaration()?),
            }
        }

        Ok(declarations)
    }

    /// `property: value [value]* [;]`
    fn parse_declaration(&mut self) -> Result<Declaration, ParseError> {
        let property = self.expect_ident("property name")?;
        self.expect(&Token::Colon)?;

        let mut values = Vec::new();
        while let Some(tok) = self.peek() {
            if matches!(tok.token, Token::Semicolon | Token::BraceClose) {
                break;
            }
            values.push(self.parse_declaration_value()?);
        }

        if self.peek_is(&Token::Semicolon) {
            self.advance();
        }

        Ok(Declaration { property, values })
    }

    fn parse_declaration_value(&mut self) -> Result<DeclarationValue, ParseError> {
        let tok = self
            .advance()
            .ok_or_else(|| ParseError::UnexpectedEof("expected declaration value".into()))?
            .clone();

        let invalid_number = |text: &str| ParseError::UnexpectedToken {
            position: tok.pos,
            message: format!("invalid number: {text}"),
        };

        match tok.token {
            Token::Number => {
                let n: f32 = tok.text.parse().map_err(|_| invalid_number(&tok.text))?;
                Ok(DeclarationValue::Number(n))
            }
            Token::Dimension => {
                let (num, unit) = split_dimension(&tok.text).ok_or_else(|| invalid_number(&tok.text))?;
                let n: f32 = num.parse().map_err(|_| invalid_number(num))?;
                Ok(DeclarationValue::Dimension(n, unit.to_string()))
            }
            Token::Ident => Ok(DeclarationValue::Ident(tok.text)),
            Token::HexColor => Ok(DeclarationValue::Color(tok.text[1..].to_string())),
            Token::StringLiteral | Token::StringLiteralSingle => {
                Ok(DeclarationValue::String(tok.text[1..tok.text.len() - 1].to_string()))
            }
            Token::Url => Ok(DeclarationValue::Url(url_argument(&tok.text).to_string())),
            other => Err(ParseError::UnexpectedToken {
                position: tok.pos,
                message: format!("unexpected token in declaration value: {:?} '{}'", other, tok.text),
            }),
        }
    }
}

/// Split `"20px"` into `("20", "px")`.
fn split_dimension(s: &str) -> Option<(&str, &str)> {
    let unit_start = s
        .char_indices()
        .find(|(i, c)| !c.is_ascii_digit() && *c != '.' && !(*c == '-' && *i == 0))
        .map(|(i, _)| i)?;

    if unit_start == 0 || unit_start >= s.len() {
        return None;
    }

    Some((&s[..unit_start], &s[unit_start..]))
}

/// The inside of `url(...)`, trimmed and with one layer of quotes removed.
fn url_argument(token: &str) -> &str {
    let inner = token
        .strip_prefix("url(")
        .and_then(|s| s.strip_suffix(')'))
        .unwrap_or(token)
        .trim();
    for quote in ['\'', '"'] {
        if let Some(unquoted) = inner.strip_prefix(quote).and_then(|s| s.strip_suffix(quote)) {
            return unquoted;
        }
    }
    inner
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(input: &str) -> StyleSheet {
        parse_stylesheet(input).unwrap_or_else(|e| panic!("parse failed: {e}"))
    }

    fn first_rule(input: &str) -> RuleSet {
        parse(input).rules.into_iter().next().expect("expected at least one rule")
    }

    // ── Rules ────────────────────────────────────────────────────────

    #[test]
    fn parse_compact_rule() {
        let rule = first_rule("btn.hover{background-color:#a9a9a9;}");
        assert_eq!(rule.selectors, vec![Selector("btn.hover".into())]);
        assert_eq!(
            rule.declarations,
            vec![Declaration::new("background-color", vec![DeclarationValue::Color("a9a9a9".into())])]
        );
    }

    #[test]
    fn parse_several_rules_with_stray_semicolons() {
        let sheet = parse(
            "btn.normal{color:white; background-color:#878787;}\n\
             btn.hover{color:white; background-color:#a9a9a9};\n\
             btn.pressed{color:red; background-color:#565656};",
        );
        assert_eq!(sheet.rules.len(), 3);
        assert_eq!(sheet.rules[2].selectors[0].as_str(), "btn.pressed");
        assert_eq!(sheet.rules[2].declarations[0].values[0], DeclarationValue::Ident("red".into()));
    }

    #[test]
    fn parse_selector_list() {
        let rule = first_rule("btn.normal, btn.hover { color: red; }");
        assert_eq!(
            rule.selectors,
            vec![Selector("btn.normal".into()), Selector("btn.hover".into())]
        );
    }

    #[test]
    fn parse_three_segment_selector() {
        let rule = first_rule("slider.selector.normal { width: 30; }");
        assert_eq!(rule.selectors[0].as_str(), "slider.selector.normal");
        assert_eq!(rule.declarations[0].values[0], DeclarationValue::Number(30.0));
    }

    #[test]
    fn whitespace_before_dot_is_an_error() {
        assert!(parse_stylesheet("btn .hover { color: red; }").is_err());
    }

    // ── Values ───────────────────────────────────────────────────────

    #[test]
    fn parse_px_dimension() {
        let rule = first_rule("menu_bar { height: 24px; }");
        assert_eq!(rule.declarations[0].values[0], DeclarationValue::Dimension(24.0, "px".into()));
    }

    #[test]
    fn parse_url_values() {
        let rule = first_rule(
            "widget { background-image: url('file:///tmp/a.png'); } ",
        );
        assert_eq!(
            rule.declarations[0].values[0],
            DeclarationValue::Url("file:///tmp/a.png".into())
        );

        let rule = first_rule("widget { background-image: url( \"b.png\" ) }");
        assert_eq!(rule.declarations[0].values[0], DeclarationValue::Url("b.png".into()));

        let rule = first_rule("widget { background-image: url(c.png) }");
        assert_eq!(rule.declarations[0].values[0], DeclarationValue::Url("c.png".into()));
    }

    #[test]
    fn parse_multi_word_value() {
        let rule = first_rule("label { font-name: DejaVu Sans; }");
        assert_eq!(
            rule.declarations[0].values,
            vec![
                DeclarationValue::Ident("DejaVu".into()),
                DeclarationValue::Ident("Sans".into()),
            ]
        );
    }

    #[test]
    fn parse_declaration_without_trailing_semicolon() {
        let rule = first_rule("label { color: red }");
        assert_eq!(rule.declarations.len(), 1);
    }

    #[test]
    fn parse_empty_block() {
        let rule = first_rule("label {}");
        assert!(rule.declarations.is_empty());
    }

    // ── Comments ─────────────────────────────────────────────────────

    #[test]
    fn parse_with_comments() {
        let rule = first_rule("/* c */ label { color: red; /* inline */ align: left; }");
        assert_eq!(rule.declarations.len(), 2);
        assert_eq!(rule.declarations[1].property, "align");
    }

    #[test]
    fn strip_comments_variants() {
        assert_eq!(strip_comments("a /* comment */ b"), "a   b");
        assert_eq!(strip_comments("hello world"), "hello world");
        assert_eq!(strip_comments("a /* unterminated"), "a  ");
    }

    // ── Errors ───────────────────────────────────────────────────────

    #[test]
    fn parse_unclosed_brace() {
        assert!(matches!(
            parse_stylesheet("label { color: red;"),
            Err(ParseError::UnexpectedEof(_))
        ));
    }

    #[test]
    fn parse_missing_colon() {
        assert!(matches!(
            parse_stylesheet("label { color red; }"),
            Err(ParseError::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn parse_empty_input() {
        assert!(parse("").rules.is_empty());
        assert!(parse(" ; ; ").rules.is_empty());
    }

    // ── Helpers ──────────────────────────────────────────────────────

    #[test]
    fn split_dimension_cases() {
        assert_eq!(split_dimension("20px"), Some(("20", "px")));
        assert_eq!(split_dimension("-1.5px"), Some(("-1.5", "px")));
        assert_eq!(split_dimension("50%"), Some(("50", "%")));
        assert_eq!(split_dimension("50"), None);
    }

    #[test]
    fn url_argument_cases() {
        assert_eq!(url_argument("url(a.png)"), "a.png");
        assert_eq!(url_argument("url('a.png')"), "a.png");
        assert_eq!(url_argument("url( \"a.png\" )"), "a.png");
    }
}

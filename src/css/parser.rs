//! Recursive descent CSS parser.
//!
//! Parses CSS text into a [`StyleSheet`] (a vector of [`RuleSet`]s), inline
//! style text into a list of [`Declaration`]s, and bare selector lists (used
//! by `query_selector`). Works on the [`Lexeme`]s produced by
//! [`crate::css::tokenizer::lex`].

use crate::css::model::*;
use crate::css::tokenizer::{lex, LexError, Lexeme, Quantity, Token};

/// Errors from CSS parsing. Positions are byte offsets into the input.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected token at position {position}: {message}")]
    UnexpectedToken { position: usize, message: String },
    #[error("unexpected end of input: {0}")]
    UnexpectedEof(String),
    #[error(transparent)]
    Lex(#[from] LexError),
}

fn unexpected(lexeme: &Lexeme, message: impl Into<String>) -> ParseError {
    ParseError::UnexpectedToken {
        position: lexeme.span.start,
        message: message.into(),
    }
}

/// Parse a CSS string into a [`StyleSheet`].
pub fn parse_css(input: &str) -> Result<StyleSheet, ParseError> {
    let mut parser = Parser::new(input)?;

    let mut rules = Vec::new();
    while !parser.is_eof() {
        rules.push(parser.parse_rule()?);
    }

    Ok(StyleSheet { rules })
}

/// Parse inline style text (`"color: red; width: 10px"`) into declarations.
pub fn parse_declaration_list(input: &str) -> Result<Vec<Declaration>, ParseError> {
    let mut parser = Parser::new(input)?;
    let declarations = parser.parse_declarations()?;
    parser.finish("declarations")?;
    Ok(declarations)
}

/// Parse a comma-separated selector list with no rule body (`"view > .item, #main"`).
pub fn parse_selector_list(input: &str) -> Result<Vec<Selector>, ParseError> {
    let mut parser = Parser::new(input)?;
    let selectors = parser.parse_selector_list()?;
    parser.finish("selector")?;
    Ok(selectors)
}

/// Recursive descent parser state.
struct Parser {
    lexemes: Vec<Lexeme>,
    cursor: usize,
}

impl Parser {
    fn new(input: &str) -> Result<Self, ParseError> {
        Ok(Self {
            lexemes: lex(input)?,
            cursor: 0,
        })
    }

    fn is_eof(&self) -> bool {
        self.cursor >= self.lexemes.len()
    }

    fn peek(&self) -> Option<&Lexeme> {
        self.lexemes.get(self.cursor)
    }

    fn peek_is(&self, token: &Token) -> bool {
        self.peek().is_some_and(|l| &l.token == token)
    }

    fn advance(&mut self) -> Option<Lexeme> {
        let lexeme = self.lexemes.get(self.cursor)?.clone();
        self.cursor += 1;
        Some(lexeme)
    }

    fn expect(&mut self, expected: &Token) -> Result<Lexeme, ParseError> {
        match self.advance() {
            Some(lexeme) if &lexeme.token == expected => Ok(lexeme),
            Some(lexeme) => Err(unexpected(
                &lexeme,
                format!("expected '{expected}', got '{}'", lexeme.token),
            )),
            None => Err(ParseError::UnexpectedEof(format!("expected '{expected}'"))),
        }
    }

    /// Fail if anything is left after `what`.
    fn finish(&self, what: &str) -> Result<(), ParseError> {
        match self.peek() {
            Some(lexeme) => Err(unexpected(
                lexeme,
                format!("unexpected '{}' after {what}", lexeme.token),
            )),
            None => Ok(()),
        }
    }

    /// Whether the next token starts exactly where the previous one ended.
    fn is_adjacent(&self) -> bool {
        let Some(prev) = self.cursor.checked_sub(1).and_then(|i| self.lexemes.get(i)) else {
            return false;
        };
        self.peek().is_some_and(|next| next.span.start == prev.span.end)
    }

    /// Parse a single CSS rule: selector(s) `{` declarations `}`.
    fn parse_rule(&mut self) -> Result<RuleSet, ParseError> {
        let selectors = self.parse_selector_list()?;
        self.expect(&Token::LBrace)?;
        let declarations = self.parse_declarations()?;
        self.expect(&Token::RBrace)?;

        Ok(RuleSet {
            selectors,
            declarations,
        })
    }

    /// Parse a comma-separated list of selectors (before `{`).
    fn parse_selector_list(&mut self) -> Result<Vec<Selector>, ParseError> {
        let mut selectors = vec![self.parse_selector()?];
        while self.peek_is(&Token::Comma) {
            self.advance();
            selectors.push(self.parse_selector()?);
        }
        Ok(selectors)
    }

    /// Parse a single selector: a sequence of compound selectors with combinators,
    /// optionally terminated by a pseudo-element.
    fn parse_selector(&mut self) -> Result<Selector, ParseError> {
        let mut parts = Vec::new();
        let mut pseudo_element = None;

        // A bare `::before` applies to any element.
        if matches!(self.peek(), Some(Lexeme { token: Token::PseudoElement(_), .. })) {
            let mut universal = CompoundSelector::new();
            universal.push(SelectorComponent::Universal);
            parts.push(SelectorPart::Compound(universal));
        } else {
            parts.push(SelectorPart::Compound(self.parse_compound_selector()?));
        }

        while let Some(next) = self.peek() {
            match &next.token {
                Token::PseudoElement(name) => {
                    let kind = PseudoElement::from_name(name)
                        .ok_or_else(|| unexpected(next, format!("unsupported pseudo-element '::{name}'")))?;
                    self.advance();
                    pseudo_element = Some(kind);
                    // Nothing may follow a pseudo-element within one selector.
                    break;
                }
                Token::Gt => {
                    self.advance();
                    parts.push(SelectorPart::Combinator(Combinator::Child));
                    parts.push(SelectorPart::Compound(self.parse_compound_selector()?));
                }
                // Adjacent selector tokens were consumed by the compound
                // parser, so one here was preceded by whitespace.
                token if token.starts_selector() => {
                    parts.push(SelectorPart::Combinator(Combinator::Descendant));
                    parts.push(SelectorPart::Compound(self.parse_compound_selector()?));
                }
                _ => break,
            }
        }

        Ok(Selector {
            parts,
            pseudo_element,
        })
    }

    /// Read the identifier that must follow `.` or `#`, or a property name.
    fn expect_name(&mut self, what: &str) -> Result<String, ParseError> {
        match self.advance() {
            Some(Lexeme {
                token: Token::Ident(name),
                ..
            }) => Ok(name),
            Some(lexeme) => Err(unexpected(
                &lexeme,
                format!("expected {what} name, got '{}'", lexeme.token),
            )),
            None => Err(ParseError::UnexpectedEof(format!("expected {what} name"))),
        }
    }

    /// Parse one class, id or pseudo-class component, if the next token starts one.
    fn parse_qualifier(&mut self) -> Result<Option<SelectorComponent>, ParseError> {
        let component = match self.peek().map(|l| &l.token) {
            Some(Token::Dot) => {
                self.advance();
                SelectorComponent::Class(self.expect_name("class")?)
            }
            Some(Token::Hash) => {
                self.advance();
                SelectorComponent::Id(self.expect_name("id")?)
            }
            // `#abc` lexes as a hex color; in selector position it is an id.
            Some(Token::HexColor(hex)) => {
                let component = SelectorComponent::Id(hex.clone());
                self.advance();
                component
            }
            Some(Token::PseudoClass(name)) => {
                let component = SelectorComponent::PseudoClass(name.clone());
                self.advance();
                component
            }
            _ => return Ok(None),
        };
        Ok(Some(component))
    }

    /// Parse a compound selector: a sequence of simple selector components with
    /// no whitespace between them, e.g. `view.primary:first-child`.
    fn parse_compound_selector(&mut self) -> Result<CompoundSelector, ParseError> {
        let mut components = Vec::new();

        match self.peek().map(|l| &l.token) {
            Some(Token::Ident(name)) => {
                components.push(SelectorComponent::Type(name.clone()));
                self.advance();
            }
            Some(Token::Star) => {
                self.advance();
                components.push(SelectorComponent::Universal);
            }
            _ => match self.parse_qualifier()? {
                Some(component) => components.push(component),
                None => {
                    return Err(match self.peek() {
                        Some(lexeme) => unexpected(lexeme, format!("expected selector, got '{}'", lexeme.token)),
                        None => ParseError::UnexpectedEof("expected selector".into()),
                    });
                }
            },
        }

        while self.is_adjacent() {
            match self.parse_qualifier()? {
                Some(component) => components.push(component),
                None => break,
            }
        }

        Ok(CompoundSelector { components })
    }

    /// Parse declarations until `}` or end of input.
    fn parse_declarations(&mut self) -> Result<Vec<Declaration>, ParseError> {
        let mut declarations = Vec::new();

        while !self.is_eof() && !self.peek_is(&Token::RBrace) {
            // Tolerate stray semicolons (`a: b;; c: d`).
            if self.peek_is(&Token::Semicolon) {
                self.advance();
                continue;
            }
            declarations.push(self.parse_declaration()?);
        }

        Ok(declarations)
    }

    /// Parse a single declaration: `property: value1 value2 [!important];`
    fn parse_declaration(&mut self) -> Result<Declaration, ParseError> {
        let property = self.expect_name("property")?;

        let mut values = Vec::new();
        // `color:red` lexes as a pseudo-class; split it back apart.
        match self.peek() {
            Some(Lexeme {
                token: Token::PseudoClass(value),
                ..
            }) => {
                values.push(DeclarationValue::Ident(value.clone()));
                self.advance();
            }
            _ => {
                self.expect(&Token::Colon)?;
            }
        }

        let mut important = false;
        while let Some(next) = self.peek() {
            match next.token {
                Token::Semicolon | Token::RBrace => break,
                Token::Important => {
                    self.advance();
                    important = true;
                    break;
                }
                Token::Comma => {
                    self.advance();
                    values.push(DeclarationValue::Comma);
                }
                _ => values.push(self.parse_declaration_value()?),
            }
        }

        if self.peek_is(&Token::Semicolon) {
            self.advance();
        }

        Ok(Declaration {
            property,
            values,
            important,
        })
    }

    /// Parse function arguments after `name(` up to the closing `)`.
    fn parse_function_args(&mut self) -> Result<Vec<DeclarationValue>, ParseError> {
        let mut args = Vec::new();
        loop {
            match self.peek().map(|l| &l.token) {
                None => return Err(ParseError::UnexpectedEof("expected ')'".into())),
                Some(Token::RParen) => {
                    self.advance();
                    return Ok(args);
                }
                Some(Token::Comma) => {
                    self.advance();
                }
                Some(_) => args.push(self.parse_declaration_value()?),
            }
        }
    }

    /// Parse a single declaration value token into a [`DeclarationValue`].
    fn parse_declaration_value(&mut self) -> Result<DeclarationValue, ParseError> {
        let lexeme = self
            .advance()
            .ok_or_else(|| ParseError::UnexpectedEof("expected declaration value".into()))?;

        match lexeme.token {
            Token::Number(n) => Ok(DeclarationValue::Number(n)),
            Token::Dimension(Quantity { value, unit }) => Ok(DeclarationValue::Dimension(value, unit)),
            Token::Ident(name) => {
                // A function call needs the `(` right after its name.
                if self.is_adjacent() && self.peek_is(&Token::LParen) {
                    self.advance();
                    let args = self.parse_function_args()?;
                    return Ok(DeclarationValue::Function(name.to_ascii_lowercase(), args));
                }
                Ok(DeclarationValue::Ident(name))
            }
            Token::HexColor(hex) => Ok(DeclarationValue::Color(hex)),
            Token::Str(text) => Ok(DeclarationValue::String(text)),
            ref other => Err(unexpected(
                &lexeme,
                format!("unexpected '{other}' in declaration value"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> StyleSheet {
        parse_css(input).unwrap_or_else(|e| panic!("parse failed: {e}"))
    }

    fn only_rule(input: &str) -> RuleSet {
        let mut sheet = parse(input);
        assert_eq!(sheet.rules.len(), 1, "{input}");
        sheet.rules.remove(0)
    }

    fn selector_strings(rule: &RuleSet) -> Vec<String> {
        rule.selectors.iter().map(ToString::to_string).collect()
    }

    // ── Selectors ────────────────────────────────────────────────────

    #[test]
    fn selector_shapes() {
        let cases = [
            ("view { color: red; }", vec!["view"]),
            ("view.primary:first-child { color: blue; }", vec!["view.primary:first-child"]),
            ("view   text { margin: 1px; }", vec!["view text"]),
            ("view>text { padding: 1px 2px; }", vec!["view > text"]),
            ("view ,text { color: green; }", vec!["view", "text"]),
            ("view.card::before { content: 'x'; }", vec!["view.card::before"]),
            ("::after { content: ''; }", vec!["*::after"]),
            ("#add { color: red; }", vec!["#add"]),
        ];
        for (input, expected) in cases {
            assert_eq!(selector_strings(&only_rule(input)), expected, "{input}");
        }
    }

    #[test]
    fn compound_and_combinator_parts() {
        let rule = only_rule("view.item > text:empty { color: red; }");
        let sel = &rule.selectors[0];
        assert_eq!(sel.parts.len(), 3);
        assert_eq!(sel.parts[1], SelectorPart::Combinator(Combinator::Child));
        let SelectorPart::Compound(last) = &sel.parts[2] else {
            panic!("expected compound, got {:?}", sel.parts[2]);
        };
        assert_eq!(
            last.components,
            vec![
                SelectorComponent::Type("text".into()),
                SelectorComponent::PseudoClass("empty".into()),
            ]
        );
        assert_eq!(sel.pseudo_element, None);
    }

    #[test]
    fn simple_declaration() {
        let rule = only_rule("view { color: red; }");
        let decl = &rule.declarations[0];
        assert_eq!(decl.property, "color");
        assert!(!decl.important);
        assert_eq!(decl.values, vec![DeclarationValue::Ident("red".into())]);
    }

    #[test]
    fn unknown_pseudo_element_fails() {
        assert!(parse_css("view::marker { color: red; }").is_err());
    }

    // ── Values ───────────────────────────────────────────────────────

    #[test]
    fn parse_dimensions() {
        let rule = only_rule("view { width: 50%; height: 10px; min-width: 10; rotate: 45deg; }");
        assert_eq!(
            rule.declarations[0].values[0],
            DeclarationValue::Dimension(50.0, "%".into())
        );
        assert_eq!(
            rule.declarations[1].values[0],
            DeclarationValue::Dimension(10.0, "px".into())
        );
        assert_eq!(rule.declarations[2].values[0], DeclarationValue::Number(10.0));
        assert_eq!(
            rule.declarations[3].values[0],
            DeclarationValue::Dimension(45.0, "deg".into())
        );
    }

    #[test]
    fn parse_function_value() {
        let rule = only_rule("view { color: rgba(255, 0, 0, 0.5); }");
        assert_eq!(
            rule.declarations[0].values[0],
            DeclarationValue::Function(
                "rgba".into(),
                vec![
                    DeclarationValue::Number(255.0),
                    DeclarationValue::Number(0.0),
                    DeclarationValue::Number(0.0),
                    DeclarationValue::Number(0.5),
                ]
            )
        );
    }

    #[test]
    fn parse_comma_separated_values() {
        let rule = only_rule("view { box-shadow: 1px 1px red, 2px 2px blue; }");
        let values = &rule.declarations[0].values;
        assert_eq!(values.len(), 7);
        assert_eq!(values[3], DeclarationValue::Comma);
    }

    #[test]
    fn parse_important() {
        let rule = only_rule("view { color: red !important; }");
        assert!(rule.declarations[0].important);
        assert_eq!(
            rule.declarations[0].values[0],
            DeclarationValue::Ident("red".into())
        );
    }

    #[test]
    fn parse_hex_colors() {
        let rule = only_rule("text { color: #ff0000; background-color: #fff; }");
        assert_eq!(
            rule.declarations[0].values[0],
            DeclarationValue::Color("ff0000".into())
        );
        assert_eq!(
            rule.declarations[1].values[0],
            DeclarationValue::Color("fff".into())
        );
    }

    // ── Comments ─────────────────────────────────────────────────────

    #[test]
    fn parse_with_comments() {
        let input = "/* comment */ view { color: red; /* inline */ opacity: 0.5; }";
        let rule = only_rule(input);
        assert_eq!(rule.declarations.len(), 2);
        assert_eq!(rule.declarations[1].property, "opacity");
    }

    #[test]
    fn parse_multibyte_string_next_to_comment() {
        let rule = only_rule("view::after { /* arrow */ content: '→'; }");
        assert_eq!(
            rule.declarations[0].values[0],
            DeclarationValue::String("→".into())
        );
    }

    // ── Error handling ───────────────────────────────────────────────

    #[test]
    fn parse_unclosed_brace() {
        assert!(parse_css("view { color: red;").is_err());
    }

    #[test]
    fn parse_empty_input() {
        assert!(parse("").rules.is_empty());
    }

    #[test]
    fn parse_declaration_without_trailing_semicolon() {
        let rule = only_rule("view { color: red }");
        assert_eq!(rule.declarations.len(), 1);
    }

    /// `view.item` (no space) is one compound; `view .item` is a descendant chain.
    #[test]
    fn whitespace_distinguishes_compound_from_descendant() {
        let rule = only_rule("view.item { color: red; }");
        assert_eq!(rule.selectors[0].parts.len(), 1);

        let rule = only_rule("view .item { color: red; }");
        assert_eq!(rule.selectors[0].parts.len(), 3);
    }

    // ── Inline declarations and bare selectors ───────────────────────

    #[test]
    fn parse_inline_declarations() {
        let decls = parse_declaration_list("color: red; width: 10px;; opacity: 0.5").unwrap();
        assert_eq!(decls.len(), 3);
        assert_eq!(decls[0].property, "color");
        assert_eq!(decls[2].values, vec![DeclarationValue::Number(0.5)]);
    }

    #[test]
    fn parse_inline_declarations_rejects_braces() {
        assert!(parse_declaration_list("color: red; }").is_err());
    }

    #[test]
    fn parse_bare_selector_list() {
        let selectors = parse_selector_list("view > .item, #main").unwrap();
        assert_eq!(selectors.len(), 2);
        assert_eq!(selectors[0].parts.len(), 3);
    }

    #[test]
    fn parse_bare_selector_trailing_garbage() {
        assert!(parse_selector_list("view {").is_err());
    }

    #[test]
    fn parse_shorthand_colon_without_space() {
        let decls = parse_declaration_list("color:red;width:10px").unwrap();
        assert_eq!(decls[0].values, vec![DeclarationValue::Ident("red".into())]);
        assert_eq!(decls[1].values, vec![DeclarationValue::Dimension(10.0, "px".into())]);
    }

    #[test]
    fn parse_rejects_unsupported_combinators() {
        assert!(matches!(
            parse_css("view + text { color: red; }"),
            Err(ParseError::Lex(_))
        ));
    }

    #[test]
    fn error_positions_are_byte_offsets() {
        match parse_css("view { color red; }") {
            Err(ParseError::UnexpectedToken { position, .. }) => assert_eq!(position, 13),
            other => panic!("expected positioned error, got {other:?}"),
        }
    }
}

//! A small selector engine.
//!
//! Supports type selectors, `*`, `#id`, `.class`, `[attr]`, `[attr="value"]`,
//! `:not(<compound>)` and comma-separated lists. Combinators are not
//! supported. Tokenizing is done by `cssparser`.

use cssparser::{BasicParseErrorKind, ParseError, ParseErrorKind, Parser, ParserInput, Token};
use thiserror::Error;

use crate::document::{Document, NodeId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,

    #[error("unexpected {found} at column {column} in selector")]
    Unexpected { found: String, column: u32 },

    #[error("unexpected end of selector")]
    UnexpectedEnd,

    #[error("combinators are not supported (column {0})")]
    Combinator(u32),

    #[error("unsupported pseudo-class :{0}")]
    UnsupportedPseudo(String),
}

impl SelectorError {
    fn from_css(err: ParseError<'_, SelectorError>) -> Self {
        let column = err.location.column;
        match err.kind {
            ParseErrorKind::Custom(err) => err,
            ParseErrorKind::Basic(BasicParseErrorKind::EndOfInput) => Self::UnexpectedEnd,
            ParseErrorKind::Basic(BasicParseErrorKind::UnexpectedToken(token)) => {
                Self::Unexpected {
                    found: format!("{token:?}"),
                    column,
                }
            }
            ParseErrorKind::Basic(kind) => Self::Unexpected {
                found: format!("{kind:?}"),
                column,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrMatcher {
    name: String,
    value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatcher>,
    negations: Vec<Compound>,
}

impl Compound {
    fn matches(&self, doc: &Document, node: NodeId) -> bool {
        let Some(tag) = doc.tag(node) else {
            return false;
        };
        if self.tag.as_deref().is_some_and(|t| t != tag) {
            return false;
        }
        if self.id.as_deref().is_some_and(|id| doc.id_of(node) != Some(id)) {
            return false;
        }
        if !self.classes.iter().all(|c| doc.has_class(node, c)) {
            return false;
        }
        let attrs_match = self.attrs.iter().all(|a| match (&a.value, doc.attr(node, &a.name)) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(expected), Some(actual)) => expected == actual,
        });
        attrs_match && !self.negations.iter().any(|n| n.matches(doc, node))
    }
}

/// A parsed selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    alternatives: Vec<Compound>,
}

impl Selector {
    pub fn parse(source: &str) -> Result<Self, SelectorError> {
        let mut input = ParserInput::new(source);
        let mut parser = Parser::new(&mut input);
        let mut alternatives = Vec::new();
        loop {
            parser.skip_whitespace();
            alternatives.push(compound(&mut parser).map_err(SelectorError::from_css)?);
            parser.skip_whitespace();
            let column = parser.current_source_location().column;
            match parser.next() {
                Err(_) => break,
                Ok(Token::Comma) => continue,
                Ok(
                    Token::Ident(_)
                    | Token::IDHash(_)
                    | Token::Hash(_)
                    | Token::Delim(_)
                    | Token::Colon
                    | Token::SquareBracketBlock,
                ) => return Err(SelectorError::Combinator(column)),
                Ok(token) => {
                    return Err(SelectorError::Unexpected {
                        found: format!("{token:?}"),
                        column,
                    });
                }
            }
        }
        Ok(Self { alternatives })
    }

    /// Matches elements carrying `name`, whatever its value.
    pub fn attribute(name: &str) -> Self {
        Self {
            alternatives: vec![Compound {
                attrs: vec![AttrMatcher {
                    name: name.to_string(),
                    value: None,
                }],
                ..Default::default()
            }],
        }
    }

    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        self.alternatives.iter().any(|c| c.matches(doc, node))
    }
}

impl std::str::FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// One compound selector. Stops before whitespace, a comma or the end of
/// the enclosing block.
fn compound<'i>(parser: &mut Parser<'i, '_>) -> Result<Compound, ParseError<'i, SelectorError>> {
    let mut compound = Compound::default();
    let mut empty = true;

    loop {
        let state = parser.state();
        let column = parser.current_source_location().column;
        let token = match parser.next_including_whitespace() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };
        match token {
            Token::Ident(name) if empty => compound.tag = Some(name.to_ascii_lowercase()),
            Token::Delim('*') if empty => {}
            Token::IDHash(id) | Token::Hash(id) => compound.id = Some(id.to_string()),
            Token::Delim('.') => {
                let next = parser.next_including_whitespace()?.clone();
                match next {
                    Token::Ident(class) => compound.classes.push(class.to_string()),
                    token => return Err(parser.new_unexpected_token_error(token)),
                }
            }
            Token::SquareBracketBlock => {
                compound.attrs.push(parser.parse_nested_block(|p| attribute(p))?);
            }
            Token::Colon => compound.negations.push(negation(parser)?),
            Token::Delim('>' | '+' | '~') => {
                return Err(parser.new_custom_error(SelectorError::Combinator(column)));
            }
            Token::WhiteSpace(_) | Token::Comma => {
                parser.reset(&state);
                break;
            }
            token => return Err(parser.new_unexpected_token_error(token)),
        }
        empty = false;
    }

    if empty {
        return Err(parser.new_custom_error(SelectorError::Empty));
    }
    Ok(compound)
}

fn negation<'i>(parser: &mut Parser<'i, '_>) -> Result<Compound, ParseError<'i, SelectorError>> {
    let token = parser.next_including_whitespace()?.clone();
    match token {
        Token::Function(name) if name.eq_ignore_ascii_case("not") => {
            parser.parse_nested_block(|p| {
                p.skip_whitespace();
                compound(p)
            })
        }
        Token::Ident(name) | Token::Function(name) => Err(parser
            .new_custom_error(SelectorError::UnsupportedPseudo(name.to_string()))),
        token => Err(parser.new_unexpected_token_error(token)),
    }
}

/// Contents of `[...]`.
fn attribute<'i>(parser: &mut Parser<'i, '_>) -> Result<AttrMatcher, ParseError<'i, SelectorError>> {
    let name = parser.expect_ident()?.to_string();
    if parser.is_exhausted() {
        return Ok(AttrMatcher { name, value: None });
    }
    parser.expect_delim('=')?;
    parser.skip_whitespace();
    let start = parser.position();
    let token = parser.next()?.clone();
    let value = match token {
        Token::QuotedString(value) | Token::Ident(value) => value.to_string(),
        Token::Number { .. } | Token::Dimension { .. } => parser.slice_from(start).to_string(),
        token => return Err(parser.new_unexpected_token_error(token)),
    };
    Ok(AttrMatcher {
        name,
        value: Some(value),
    })
}

impl Document {
    /// Parse `selector` and return the first matching descendant of `scope`.
    pub fn query_selector(
        &self,
        scope: NodeId,
        selector: &str,
    ) -> Result<Option<NodeId>, SelectorError> {
        let selector = Selector::parse(selector)?;
        Ok(self.find(scope, &selector))
    }

    /// Parse `selector` and return every matching descendant of `scope`.
    pub fn query_selector_all(
        &self,
        scope: NodeId,
        selector: &str,
    ) -> Result<Vec<NodeId>, SelectorError> {
        let selector = Selector::parse(selector)?;
        Ok(self.find_all(scope, &selector))
    }

    pub fn find(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|&n| selector.matches(self, n))
    }

    pub fn find_all(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&n| selector.matches(self, n))
            .collect()
    }

    /// Nearest inclusive ancestor of `node` matching `selector`.
    pub fn closest(&self, node: NodeId, selector: &Selector) -> Option<NodeId> {
        self.path_to_root(node)
            .into_iter()
            .find(|&n| selector.matches(self, n))
    }
}

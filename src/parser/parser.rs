//! Recursive descent parser for proto documents
//!
//! Builds a [`Document`] arena directly from tokens. Option values, field
//! option lists, reserved ranges and extension ranges are skipped: the
//! resolver only needs declarations, names, imports and type references.
//! Parsing stops at the first error.

use smol_str::SmolStr;

use super::errors::ParseError;
use super::lexer::{Token, TokenKind, tokenize};
use crate::base::{TextRange, TextSize};
use crate::syntax::{
    Document, DocumentBuilder, ImportDecl, ImportModifier, NodeDetail, NodeKind, Syntax,
};

type ParseResult<T> = Result<T, ParseError>;

/// Parse proto source text into a document.
pub fn parse(input: &str) -> ParseResult<Document> {
    let tokens = tokenize(input);
    let mut parser = Parser::new(&tokens, TextSize::of(input));
    parser.parse_file()?;
    Ok(parser.builder.build())
}

/// Where a field-like declaration appears; controls which forms are allowed.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Body {
    Message,
    Oneof,
    Extend,
}

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    end: TextSize,
    builder: DocumentBuilder,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>], end: TextSize) -> Self {
        Self {
            tokens,
            pos: 0,
            end,
            builder: DocumentBuilder::new(),
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&'a Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn nth(&self, n: usize) -> Option<TokenKind> {
        self.tokens.get(self.pos + n).map(|t| t.kind)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.nth(0) == Some(kind)
    }

    fn at_keyword(&self, keyword: &str) -> bool {
        self.current()
            .is_some_and(|t| t.kind == TokenKind::Ident && t.text == keyword)
    }

    fn start_offset(&self) -> TextSize {
        self.current().map(|t| t.range.start()).unwrap_or(self.end)
    }

    fn last_end(&self) -> TextSize {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|t| t.range.end())
            .unwrap_or_default()
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn error(&self, expected: &'static str) -> ParseError {
        match self.current() {
            Some(token) if token.kind == TokenKind::Error => ParseError::InvalidToken {
                text: SmolStr::new(token.text),
                range: token.range,
            },
            Some(token) => ParseError::UnexpectedToken {
                found: SmolStr::new(token.text),
                expected,
                range: token.range,
            },
            None => ParseError::UnexpectedEof {
                expected,
                offset: self.end,
            },
        }
    }

    fn bump(&mut self) -> ParseResult<&'a Token<'a>> {
        let token = self.current().ok_or_else(|| self.error("more input"))?;
        self.pos += 1;
        Ok(token)
    }

    fn expect(&mut self, kind: TokenKind) -> ParseResult<&'a Token<'a>> {
        if self.at(kind) {
            self.bump()
        } else {
            Err(self.error(kind.describe()))
        }
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect_keyword(&mut self, keyword: &'static str) -> ParseResult<()> {
        if self.at_keyword(keyword) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(keyword))
        }
    }

    fn ident(&mut self) -> ParseResult<&'a str> {
        Ok(self.expect(TokenKind::Ident)?.text)
    }

    /// `ident ('.' ident)*`, optionally with a leading dot.
    fn full_ident(&mut self, allow_leading_dot: bool) -> ParseResult<String> {
        let mut name = String::new();
        if allow_leading_dot && self.eat(TokenKind::Dot) {
            name.push('.');
        }
        name.push_str(self.ident()?);
        while self.at(TokenKind::Dot) {
            self.pos += 1;
            name.push('.');
            name.push_str(self.ident()?);
        }
        Ok(name)
    }

    /// One or more adjacent string literals, concatenated, quotes removed.
    fn string_literal(&mut self) -> ParseResult<String> {
        let mut value = String::new();
        value.push_str(unquote(self.expect(TokenKind::String)?.text));
        while self.at(TokenKind::String) {
            value.push_str(unquote(self.bump()?.text));
        }
        Ok(value)
    }

    /// Skip a balanced token run until the (unnested) terminator; the
    /// terminator itself is not consumed.
    fn skip_until(&mut self, terminators: &[TokenKind]) -> ParseResult<()> {
        let mut depth = 0usize;
        loop {
            let kind = self.nth(0).ok_or_else(|| self.error("`;`"))?;
            if depth == 0 && terminators.contains(&kind) {
                return Ok(());
            }
            match kind {
                TokenKind::LBrace | TokenKind::LBracket | TokenKind::LParen | TokenKind::Lt => {
                    depth += 1
                }
                TokenKind::RBrace | TokenKind::RBracket | TokenKind::RParen | TokenKind::Gt => {
                    if depth == 0 {
                        return Err(self.error("`;`"));
                    }
                    depth -= 1;
                }
                TokenKind::Error => return Err(self.error("`;`")),
                _ => {}
            }
            self.pos += 1;
        }
    }

    // =========================================================================
    // File level
    // =========================================================================

    fn parse_file(&mut self) -> ParseResult<()> {
        while self.current().is_some() {
            if self.eat(TokenKind::Semicolon) {
                continue;
            }
            if self.at_keyword("syntax") || self.at_keyword("edition") {
                self.parse_syntax()?;
            } else if self.at_keyword("package") {
                self.parse_package()?;
            } else if self.at_keyword("import") {
                self.parse_import()?;
            } else if self.at_keyword("option") {
                self.parse_option()?;
            } else if self.at_keyword("message") {
                self.parse_message()?;
            } else if self.at_keyword("enum") {
                self.parse_enum()?;
            } else if self.at_keyword("extend") {
                self.parse_extend()?;
            } else if self.at_keyword("service") {
                self.parse_service()?;
            } else {
                return Err(self.error("top-level declaration"));
            }
        }
        Ok(())
    }

    fn parse_syntax(&mut self) -> ParseResult<()> {
        let start = self.start_offset();
        let keyword = self.ident()?;
        self.expect(TokenKind::Eq)?;
        let value = self.string_literal()?;
        self.expect(TokenKind::Semicolon)?;

        let syntax = if keyword == "edition" {
            Syntax::Unrecognized(SmolStr::new(format!("edition {value}")))
        } else {
            Syntax::from_literal(&value)
        };
        self.builder.set_syntax(syntax);
        self.builder.leaf_at(
            NodeKind::Syntax,
            None,
            NodeDetail::Value(value.into()),
            TextRange::new(start, self.last_end()),
        );
        Ok(())
    }

    fn parse_package(&mut self) -> ParseResult<()> {
        let start = self.start_offset();
        self.expect_keyword("package")?;
        let name = self.full_ident(false)?;
        self.expect(TokenKind::Semicolon)?;
        self.builder.leaf_at(
            NodeKind::Package,
            Some(name.as_str()),
            NodeDetail::None,
            TextRange::new(start, self.last_end()),
        );
        Ok(())
    }

    fn parse_import(&mut self) -> ParseResult<()> {
        let start = self.start_offset();
        self.expect_keyword("import")?;
        let modifier = if self.at_keyword("public") {
            self.pos += 1;
            ImportModifier::Public
        } else if self.at_keyword("weak") {
            self.pos += 1;
            ImportModifier::Weak
        } else {
            ImportModifier::None
        };
        let path = self.string_literal()?;
        self.expect(TokenKind::Semicolon)?;
        self.builder.leaf_at(
            NodeKind::Import,
            None,
            NodeDetail::Import(ImportDecl::new(path, modifier)),
            TextRange::new(start, self.last_end()),
        );
        Ok(())
    }

    /// `option name = value;` where name may contain `(custom.ext)` parts.
    fn parse_option(&mut self) -> ParseResult<()> {
        let start = self.start_offset();
        self.expect_keyword("option")?;
        let name = self.option_name()?;
        self.expect(TokenKind::Eq)?;
        let value_start = self.pos;
        self.skip_until(&[TokenKind::Semicolon])?;
        let value = self.tokens[value_start..self.pos]
            .iter()
            .map(|t| t.text)
            .collect::<Vec<_>>()
            .join(" ");
        self.expect(TokenKind::Semicolon)?;
        self.builder.leaf_at(
            NodeKind::Option,
            Some(name.as_str()),
            NodeDetail::Value(value.into()),
            TextRange::new(start, self.last_end()),
        );
        Ok(())
    }

    fn option_name(&mut self) -> ParseResult<String> {
        let mut name = String::new();
        loop {
            if self.eat(TokenKind::LParen) {
                name.push('(');
                name.push_str(&self.full_ident(true)?);
                self.expect(TokenKind::RParen)?;
                name.push(')');
            } else {
                name.push_str(self.ident()?);
            }
            if !self.eat(TokenKind::Dot) {
                return Ok(name);
            }
            name.push('.');
        }
    }

    // =========================================================================
    // Messages and groups
    // =========================================================================

    fn parse_message(&mut self) -> ParseResult<()> {
        let start = self.start_offset();
        self.expect_keyword("message")?;
        let name = self.ident()?;
        self.builder
            .start_at(NodeKind::Message, Some(name), NodeDetail::None, start);
        self.parse_message_body()?;
        self.builder.finish_at(self.last_end());
        Ok(())
    }

    /// `'{' item* '}'` shared by messages and groups.
    fn parse_message_body(&mut self) -> ParseResult<()> {
        self.expect(TokenKind::LBrace)?;
        while !self.eat(TokenKind::RBrace) {
            if self.current().is_none() {
                return Err(self.error("`}`"));
            }
            if self.eat(TokenKind::Semicolon) {
                continue;
            }
            let next = self.nth(1);
            if self.at_keyword("message") && next == Some(TokenKind::Ident) {
                self.parse_message()?;
            } else if self.at_keyword("enum") && next == Some(TokenKind::Ident) {
                self.parse_enum()?;
            } else if self.at_keyword("extend") && matches!(next, Some(TokenKind::Ident | TokenKind::Dot)) {
                self.parse_extend()?;
            } else if self.at_keyword("oneof") && next == Some(TokenKind::Ident) {
                self.parse_oneof()?;
            } else if self.at_keyword("option") && matches!(next, Some(TokenKind::Ident | TokenKind::LParen)) {
                self.parse_option()?;
            } else if (self.at_keyword("extensions") || self.at_keyword("reserved"))
                && matches!(next, Some(TokenKind::Number | TokenKind::String))
            {
                self.parse_range_statement()?;
            } else {
                self.parse_field(Body::Message)?;
            }
        }
        Ok(())
    }

    /// `extensions ...;` or `reserved ...;`
    fn parse_range_statement(&mut self) -> ParseResult<()> {
        let start = self.start_offset();
        let kind = if self.ident()? == "extensions" {
            NodeKind::Extensions
        } else {
            NodeKind::Reserved
        };
        self.skip_until(&[TokenKind::Semicolon])?;
        self.expect(TokenKind::Semicolon)?;
        self.builder.leaf_at(
            kind,
            None,
            NodeDetail::None,
            TextRange::new(start, self.last_end()),
        );
        Ok(())
    }

    /// Fields, map fields and groups.
    fn parse_field(&mut self, body: Body) -> ParseResult<()> {
        let start = self.start_offset();
        let labelled = ["optional", "required", "repeated"]
            .iter()
            .any(|label| self.at_keyword(label));
        if labelled {
            self.pos += 1;
        }

        if body == Body::Message && !labelled && self.at_keyword("map") && self.nth(1) == Some(TokenKind::Lt) {
            return self.parse_map_field(start);
        }
        if self.at_keyword("group") && self.nth(1) == Some(TokenKind::Ident) && self.nth(2) == Some(TokenKind::Eq) {
            return self.parse_group(start);
        }

        let type_name = self.full_ident(true)?;
        let name = self.ident()?;
        self.expect(TokenKind::Eq)?;
        self.expect(TokenKind::Number)?;
        self.skip_field_options()?;
        self.expect(TokenKind::Semicolon)?;
        self.builder.leaf_at(
            NodeKind::Field,
            Some(name),
            NodeDetail::TypeRef(type_name.into()),
            TextRange::new(start, self.last_end()),
        );
        Ok(())
    }

    fn parse_map_field(&mut self, start: TextSize) -> ParseResult<()> {
        self.expect_keyword("map")?;
        self.expect(TokenKind::Lt)?;
        self.full_ident(false)?;
        self.expect(TokenKind::Comma)?;
        let value_type = self.full_ident(true)?;
        self.expect(TokenKind::Gt)?;
        let name = self.ident()?;
        self.expect(TokenKind::Eq)?;
        self.expect(TokenKind::Number)?;
        self.skip_field_options()?;
        self.expect(TokenKind::Semicolon)?;
        self.builder.leaf_at(
            NodeKind::MapField,
            Some(name),
            NodeDetail::TypeRef(value_type.into()),
            TextRange::new(start, self.last_end()),
        );
        Ok(())
    }

    fn parse_group(&mut self, start: TextSize) -> ParseResult<()> {
        self.expect_keyword("group")?;
        let name = self.ident()?;
        self.expect(TokenKind::Eq)?;
        self.expect(TokenKind::Number)?;
        self.skip_field_options()?;
        self.builder
            .start_at(NodeKind::Group, Some(name), NodeDetail::None, start);
        self.parse_message_body()?;
        self.builder.finish_at(self.last_end());
        Ok(())
    }

    fn skip_field_options(&mut self) -> ParseResult<()> {
        if self.eat(TokenKind::LBracket) {
            self.skip_until(&[TokenKind::RBracket])?;
            self.expect(TokenKind::RBracket)?;
        }
        Ok(())
    }

    fn parse_oneof(&mut self) -> ParseResult<()> {
        let start = self.start_offset();
        self.expect_keyword("oneof")?;
        let name = self.ident()?;
        self.builder
            .start_at(NodeKind::Oneof, Some(name), NodeDetail::None, start);
        self.expect(TokenKind::LBrace)?;
        while !self.eat(TokenKind::RBrace) {
            if self.current().is_none() {
                return Err(self.error("`}`"));
            }
            if self.eat(TokenKind::Semicolon) {
                continue;
            }
            if self.at_keyword("option") && matches!(self.nth(1), Some(TokenKind::Ident | TokenKind::LParen)) {
                self.parse_option()?;
            } else {
                self.parse_field(Body::Oneof)?;
            }
        }
        self.builder.finish_at(self.last_end());
        Ok(())
    }

    fn parse_extend(&mut self) -> ParseResult<()> {
        let start = self.start_offset();
        self.expect_keyword("extend")?;
        let target = self.full_ident(true)?;
        self.builder.start_at(
            NodeKind::Extend,
            None,
            NodeDetail::TypeRef(target.into()),
            start,
        );
        self.expect(TokenKind::LBrace)?;
        while !self.eat(TokenKind::RBrace) {
            if self.current().is_none() {
                return Err(self.error("`}`"));
            }
            if self.eat(TokenKind::Semicolon) {
                continue;
            }
            self.parse_field(Body::Extend)?;
        }
        self.builder.finish_at(self.last_end());
        Ok(())
    }

    // =========================================================================
    // Enums
    // =========================================================================

    fn parse_enum(&mut self) -> ParseResult<()> {
        let start = self.start_offset();
        self.expect_keyword("enum")?;
        let name = self.ident()?;
        self.builder
            .start_at(NodeKind::Enum, Some(name), NodeDetail::None, start);
        self.expect(TokenKind::LBrace)?;
        while !self.eat(TokenKind::RBrace) {
            if self.current().is_none() {
                return Err(self.error("`}`"));
            }
            if self.eat(TokenKind::Semicolon) {
                continue;
            }
            let next = self.nth(1);
            if self.at_keyword("option") && matches!(next, Some(TokenKind::Ident | TokenKind::LParen)) {
                self.parse_option()?;
            } else if self.at_keyword("reserved") && matches!(next, Some(TokenKind::Number | TokenKind::String | TokenKind::Minus)) {
                self.parse_range_statement()?;
            } else {
                self.parse_enum_value()?;
            }
        }
        self.builder.finish_at(self.last_end());
        Ok(())
    }

    fn parse_enum_value(&mut self) -> ParseResult<()> {
        let start = self.start_offset();
        let name = self.ident()?;
        self.expect(TokenKind::Eq)?;
        self.eat(TokenKind::Minus);
        let value = self.expect(TokenKind::Number)?.text;
        self.skip_field_options()?;
        self.expect(TokenKind::Semicolon)?;
        self.builder.leaf_at(
            NodeKind::EnumValue,
            Some(name),
            NodeDetail::Value(value.into()),
            TextRange::new(start, self.last_end()),
        );
        Ok(())
    }

    // =========================================================================
    // Services
    // =========================================================================

    fn parse_service(&mut self) -> ParseResult<()> {
        let start = self.start_offset();
        self.expect_keyword("service")?;
        let name = self.ident()?;
        self.builder
            .start_at(NodeKind::Service, Some(name), NodeDetail::None, start);
        self.expect(TokenKind::LBrace)?;
        while !self.eat(TokenKind::RBrace) {
            if self.current().is_none() {
                return Err(self.error("`}`"));
            }
            if self.eat(TokenKind::Semicolon) {
                continue;
            }
            if self.at_keyword("option") {
                self.parse_option()?;
            } else {
                self.parse_rpc()?;
            }
        }
        self.builder.finish_at(self.last_end());
        Ok(())
    }

    fn parse_rpc(&mut self) -> ParseResult<()> {
        let start = self.start_offset();
        self.expect_keyword("rpc")?;
        let name = self.ident()?;
        let input = self.rpc_type()?;
        self.expect_keyword("returns")?;
        self.rpc_type()?;
        self.builder.start_at(
            NodeKind::Rpc,
            Some(name),
            NodeDetail::TypeRef(input.into()),
            start,
        );
        if self.eat(TokenKind::LBrace) {
            while !self.eat(TokenKind::RBrace) {
                if self.current().is_none() {
                    return Err(self.error("`}`"));
                }
                if self.eat(TokenKind::Semicolon) {
                    continue;
                }
                self.parse_option()?;
            }
        } else {
            self.expect(TokenKind::Semicolon)?;
        }
        self.builder.finish_at(self.last_end());
        Ok(())
    }

    /// `'(' ['stream'] type ')'`
    fn rpc_type(&mut self) -> ParseResult<String> {
        self.expect(TokenKind::LParen)?;
        if self.at_keyword("stream") && self.nth(1) != Some(TokenKind::RParen) {
            self.pos += 1;
        }
        let name = self.full_ident(true)?;
        self.expect(TokenKind::RParen)?;
        Ok(name)
    }
}

fn unquote(text: &str) -> &str {
    text.get(1..text.len().saturating_sub(1)).unwrap_or("")
}

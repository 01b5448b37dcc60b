//! Recursive-descent parser with Pratt-style expression parsing
//!
//! Each token kind that can start an expression has a prefix rule
//! ([`Parser::parse_prefix`]); each binary operator, `(` and `[` has an infix
//! rule ([`Parser::parse_infix`]) and a binding power ([`Precedence`]).
//!
//! Parsing never aborts. A failed statement records its [`ParseError`] and
//! the parser skips ahead to the next statement, so one pass reports every
//! independent error.

mod precedence;

pub use precedence::{infix_operator, prefix_operator, Precedence};

use std::rc::Rc;

use tracing::{debug, trace, trace_span};

use crate::ast::*;
use crate::error::ParseError;
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

type ParseResult<T> = std::result::Result<T, ParseError>;

/// Parse `source` into a program plus every error encountered.
///
/// The program is always returned; when errors are present it holds the
/// statements that did parse.
pub fn parse_program(source: &str) -> (Program, Vec<ParseError>) {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();
    (program, parser.into_errors())
}

/// Parser state: the token stream plus a two-token window.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    cur: Token,
    peek: Token,
    /// Braces opened minus braces closed, up to and including `cur`
    depth: isize,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    /// Create a parser reading from `lexer`.
    pub fn new(lexer: Lexer<'a>) -> Self {
        let mut parser = Self {
            lexer,
            cur: Token::eof(),
            peek: Token::eof(),
            depth: 0,
            errors: Vec::new(),
        };
        parser.next_token();
        parser.next_token();
        parser
    }

    /// Errors recorded so far, in source order.
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Consume the parser, returning its errors.
    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }

    /// Parse statements until end of input.
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();

        while !self.cur_is(TokenKind::Eof) {
            let base = self.statement_depth();
            match self.parse_statement() {
                Ok(stmt) => program.statements.push(stmt),
                Err(err) => {
                    self.errors.push(err);
                    // A stray `}` at the top level is skipped like any token
                    self.synchronize(base);
                }
            }
            self.next_token();
        }

        debug!(
            statements = program.statements.len(),
            errors = self.errors.len(),
            "parsed program"
        );
        program
    }

    // ═══════════════════════════════════════════════════════════════════
    // Token Window
    // ═══════════════════════════════════════════════════════════════════

    fn next_token(&mut self) {
        let next = self.lexer.next_token();
        self.cur = std::mem::replace(&mut self.peek, next);
        match self.cur.kind {
            TokenKind::LBrace => self.depth += 1,
            TokenKind::RBrace => self.depth -= 1,
            _ => {}
        }
    }

    /// Brace depth just before `cur`, i.e. the depth of a statement that
    /// starts at `cur`.
    fn statement_depth(&self) -> isize {
        match self.cur.kind {
            TokenKind::LBrace => self.depth - 1,
            TokenKind::RBrace => self.depth + 1,
            _ => self.depth,
        }
    }

    fn cur_is(&self, kind: TokenKind) -> bool {
        self.cur.is(kind)
    }

    fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.is(kind)
    }

    /// Advance if the next token is `kind`, else report what was found.
    fn expect_peek(&mut self, kind: TokenKind) -> ParseResult<()> {
        if self.peek_is(kind) {
            self.next_token();
            Ok(())
        } else {
            Err(ParseError::UnexpectedToken {
                expected: kind,
                got: self.peek.kind,
            })
        }
    }

    fn peek_precedence(&self) -> Precedence {
        Precedence::of(self.peek.kind)
    }

    fn cur_precedence(&self) -> Precedence {
        Precedence::of(self.cur.kind)
    }

    /// Skip the rest of a failed statement that began at brace depth `base`.
    ///
    /// Stops on a `;` at depth `base`, or just before the `}` that closes the
    /// enclosing block, or at end of input. Braces opened inside the
    /// statement (blocks, hash literals) are skipped whole. Returns `true`
    /// when `cur` is itself the enclosing block's `}`, which happens when
    /// that brace was the offending token.
    fn synchronize(&mut self, base: isize) -> bool {
        loop {
            if self.depth < base {
                return true;
            }
            if self.depth == base && self.cur_is(TokenKind::Semicolon) {
                return false;
            }
            match self.peek.kind {
                TokenKind::Eof => return false,
                TokenKind::RBrace if self.depth == base => return false,
                _ => self.next_token(),
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Statements
    // ═══════════════════════════════════════════════════════════════════

    fn parse_statement(&mut self) -> ParseResult<Statement> {
        let _span = trace_span!("statement", token = %self.cur.kind).entered();
        match self.cur.kind {
            TokenKind::Let => self.parse_let_statement().map(Statement::Let),
            TokenKind::Return => self.parse_return_statement().map(Statement::Return),
            _ => self
                .parse_expression_statement()
                .map(Statement::Expression),
        }
    }

    fn parse_let_statement(&mut self) -> ParseResult<LetStatement> {
        let token = self.cur.clone();

        self.expect_peek(TokenKind::Ident)?;
        let name = self.cur_identifier();

        self.expect_peek(TokenKind::Assign)?;
        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;

        self.skip_optional_semicolon();
        Ok(LetStatement { token, name, value })
    }

    fn parse_return_statement(&mut self) -> ParseResult<ReturnStatement> {
        let token = self.cur.clone();

        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;

        self.skip_optional_semicolon();
        Ok(ReturnStatement { token, value })
    }

    fn parse_expression_statement(&mut self) -> ParseResult<ExpressionStatement> {
        let token = self.cur.clone();
        let expression = self.parse_expression(Precedence::Lowest)?;

        self.skip_optional_semicolon();
        Ok(ExpressionStatement { token, expression })
    }

    fn skip_optional_semicolon(&mut self) {
        if self.peek_is(TokenKind::Semicolon) {
            self.next_token();
        }
    }

    /// Parse `{ ... }` with `cur` on the opening brace.
    ///
    /// Errors inside the block are recorded and recovered from here, so the
    /// enclosing `if` or `fn` still receives the statements that parsed.
    fn parse_block_statement(&mut self) -> ParseResult<BlockStatement> {
        let token = self.cur.clone();
        let mut statements = Vec::new();

        self.next_token();
        while !self.cur_is(TokenKind::RBrace) && !self.cur_is(TokenKind::Eof) {
            let base = self.statement_depth();
            match self.parse_statement() {
                Ok(stmt) => statements.push(stmt),
                Err(err) => {
                    self.errors.push(err);
                    if self.synchronize(base) {
                        break;
                    }
                }
            }
            self.next_token();
        }

        if self.cur_is(TokenKind::Eof) {
            return Err(ParseError::UnexpectedToken {
                expected: TokenKind::RBrace,
                got: TokenKind::Eof,
            });
        }
        Ok(BlockStatement { token, statements })
    }

    // ═══════════════════════════════════════════════════════════════════
    // Expressions
    // ═══════════════════════════════════════════════════════════════════

    /// Parse an expression whose operators all bind tighter than `precedence`.
    pub fn parse_expression(&mut self, precedence: Precedence) -> ParseResult<Expression> {
        let _span = trace_span!("expression", token = %self.cur.kind, ?precedence).entered();

        let mut left = self.parse_prefix()?;
        while !self.peek_is(TokenKind::Semicolon) && precedence < self.peek_precedence() {
            self.next_token();
            left = self.parse_infix(left)?;
        }

        trace!(expr = %left, "parsed expression");
        Ok(left)
    }

    /// Prefix rule dispatch on the current token.
    fn parse_prefix(&mut self) -> ParseResult<Expression> {
        match self.cur.kind {
            TokenKind::Ident => Ok(Expression::Identifier(self.cur_identifier())),
            TokenKind::Int => self.parse_integer_literal(),
            TokenKind::String => Ok(Expression::String(StringLiteral {
                token: self.cur.clone(),
                value: self.cur.literal.clone(),
            })),
            TokenKind::True | TokenKind::False => Ok(Expression::Boolean(BooleanLiteral {
                token: self.cur.clone(),
                value: self.cur_is(TokenKind::True),
            })),
            TokenKind::Bang | TokenKind::Minus => self.parse_prefix_expression(),
            TokenKind::LParen => self.parse_grouped_expression(),
            TokenKind::If => self.parse_if_expression(),
            TokenKind::Function => self.parse_function_literal(),
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::LBrace => self.parse_hash_literal(),
            kind => Err(ParseError::NoPrefixParse { kind }),
        }
    }

    /// Infix rule dispatch on the current token, with `left` already parsed.
    fn parse_infix(&mut self, left: Expression) -> ParseResult<Expression> {
        match self.cur.kind {
            TokenKind::LParen => self.parse_call_expression(left),
            TokenKind::LBracket => self.parse_index_expression(left),
            kind => match infix_operator(kind) {
                Some(operator) => self.parse_infix_expression(left, operator),
                None => Ok(left),
            },
        }
    }

    fn cur_identifier(&self) -> Identifier {
        Identifier {
            token: self.cur.clone(),
            value: self.cur.literal.clone(),
        }
    }

    fn parse_integer_literal(&mut self) -> ParseResult<Expression> {
        let token = self.cur.clone();
        let value = token
            .literal
            .parse::<i64>()
            .map_err(|_| ParseError::InvalidInteger {
                literal: token.literal.clone(),
            })?;
        Ok(Expression::Integer(IntegerLiteral { token, value }))
    }

    fn parse_prefix_expression(&mut self) -> ParseResult<Expression> {
        let token = self.cur.clone();
        let operator = prefix_operator(token.kind).ok_or(ParseError::NoPrefixParse {
            kind: token.kind,
        })?;

        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;

        Ok(Expression::Prefix(PrefixExpression {
            token,
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_infix_expression(
        &mut self,
        left: Expression,
        operator: InfixOperator,
    ) -> ParseResult<Expression> {
        let token = self.cur.clone();
        let precedence = self.cur_precedence();

        self.next_token();
        let right = self.parse_expression(precedence)?;

        Ok(Expression::Infix(InfixExpression {
            token,
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_grouped_expression(&mut self) -> ParseResult<Expression> {
        self.next_token();
        let expr = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;
        Ok(expr)
    }

    fn parse_if_expression(&mut self) -> ParseResult<Expression> {
        let token = self.cur.clone();

        self.expect_peek(TokenKind::LParen)?;
        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;

        self.expect_peek(TokenKind::LBrace)?;
        let consequence = self.parse_block_statement()?;

        let alternative = if self.peek_is(TokenKind::Else) {
            self.next_token();
            self.expect_peek(TokenKind::LBrace)?;
            Some(self.parse_block_statement()?)
        } else {
            None
        };

        Ok(Expression::If(IfExpression {
            token,
            condition: Box::new(condition),
            consequence,
            alternative,
        }))
    }

    fn parse_function_literal(&mut self) -> ParseResult<Expression> {
        let token = self.cur.clone();

        self.expect_peek(TokenKind::LParen)?;
        let parameters = self.parse_function_parameters()?;

        self.expect_peek(TokenKind::LBrace)?;
        let body = self.parse_block_statement()?;

        Ok(Expression::Function(FunctionLiteral {
            token,
            parameters,
            body: Rc::new(body),
        }))
    }

    /// Parse `(a, b, c)` with `cur` on the opening paren.
    fn parse_function_parameters(&mut self) -> ParseResult<Vec<Identifier>> {
        let mut params = Vec::new();

        if self.peek_is(TokenKind::RParen) {
            self.next_token();
            return Ok(params);
        }

        self.expect_peek(TokenKind::Ident)?;
        params.push(self.cur_identifier());

        while self.peek_is(TokenKind::Comma) {
            self.next_token();
            self.expect_peek(TokenKind::Ident)?;
            params.push(self.cur_identifier());
        }

        self.expect_peek(TokenKind::RParen)?;
        Ok(params)
    }

    fn parse_call_expression(&mut self, function: Expression) -> ParseResult<Expression> {
        let token = self.cur.clone();
        let arguments = self.parse_expression_list(TokenKind::RParen)?;
        Ok(Expression::Call(CallExpression {
            token,
            function: Box::new(function),
            arguments,
        }))
    }

    fn parse_array_literal(&mut self) -> ParseResult<Expression> {
        let token = self.cur.clone();
        let elements = self.parse_expression_list(TokenKind::RBracket)?;
        Ok(Expression::Array(ArrayLiteral { token, elements }))
    }

    /// Parse comma-separated expressions up to `end`, with `cur` on the opener.
    fn parse_expression_list(&mut self, end: TokenKind) -> ParseResult<Vec<Expression>> {
        let mut list = Vec::new();

        if self.peek_is(end) {
            self.next_token();
            return Ok(list);
        }

        self.next_token();
        list.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_is(TokenKind::Comma) {
            self.next_token();
            self.next_token();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }

        self.expect_peek(end)?;
        Ok(list)
    }

    fn parse_index_expression(&mut self, left: Expression) -> ParseResult<Expression> {
        let token = self.cur.clone();

        self.next_token();
        let index = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RBracket)?;

        Ok(Expression::Index(IndexExpression {
            token,
            left: Box::new(left),
            index: Box::new(index),
        }))
    }

    fn parse_hash_literal(&mut self) -> ParseResult<Expression> {
        let token = self.cur.clone();
        let mut pairs = Vec::new();

        while !self.peek_is(TokenKind::RBrace) {
            self.next_token();
            let key = self.parse_expression(Precedence::Lowest)?;

            self.expect_peek(TokenKind::Colon)?;
            self.next_token();
            let value = self.parse_expression(Precedence::Lowest)?;

            pairs.push((key, value));

            if !self.peek_is(TokenKind::RBrace) {
                self.expect_peek(TokenKind::Comma)?;
            }
        }

        self.expect_peek(TokenKind::RBrace)?;
        Ok(Expression::Hash(HashLiteral { token, pairs }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_starts_on_first_token() {
        let parser = Parser::new(Lexer::new("let x"));
        assert!(parser.cur_is(TokenKind::Let));
        assert!(parser.peek_is(TokenKind::Ident));
    }

    #[test]
    fn test_synchronize_skips_to_semicolon() {
        let mut parser = Parser::new(Lexer::new("x 5 6; y"));
        assert!(!parser.synchronize(0));
        assert!(parser.cur_is(TokenKind::Semicolon));
        assert!(parser.peek_is(TokenKind::Ident));
    }

    #[test]
    fn test_synchronize_skips_nested_braces() {
        let mut parser = Parser::new(Lexer::new("a { b; c } d; e"));
        assert!(!parser.synchronize(0));
        assert!(parser.cur_is(TokenKind::Semicolon));
        assert_eq!(parser.peek.literal, "e");
    }

    #[test]
    fn test_synchronize_stops_before_closing_brace() {
        let mut parser = Parser::new(Lexer::new("a b } c"));
        assert!(!parser.synchronize(0));
        assert_eq!(parser.cur.literal, "b");
        assert!(parser.peek_is(TokenKind::RBrace));
    }

    #[test]
    fn test_synchronize_skips_inner_close_before_outer() {
        // Inside a block at depth 1: the inner block's `}` is not the close
        let mut parser = Parser::new(Lexer::new("{ a { b } } c"));
        parser.next_token();
        assert!(!parser.synchronize(1));
        assert!(parser.cur_is(TokenKind::RBrace));
        assert_eq!(parser.depth, 1);
        assert!(parser.peek_is(TokenKind::RBrace));
    }

    #[test]
    fn test_synchronize_reports_offending_close() {
        let mut parser = Parser::new(Lexer::new("{ }"));
        parser.next_token();
        assert!(parser.cur_is(TokenKind::RBrace));
        assert!(parser.synchronize(1));
    }

    #[test]
    fn test_statement_depth_excludes_opening_brace() {
        let parser = Parser::new(Lexer::new("{1: 2}"));
        assert_eq!(parser.depth, 1);
        assert_eq!(parser.statement_depth(), 0);
    }

    #[test]
    fn test_hash_literal_missing_colon() {
        let (_, errors) = parse_program("{1 2}");
        assert_eq!(
            errors[0],
            ParseError::UnexpectedToken {
                expected: TokenKind::Colon,
                got: TokenKind::Int,
            }
        );
    }
}

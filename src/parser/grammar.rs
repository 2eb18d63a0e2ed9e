use super::record::{Declaration, Program, StatementRecord};
use crate::config::{ArrayPolicy, ParserConfig};
use crate::error::{Error, Result};
use crate::lexer::{Token, TokenKind};
use crate::runtime::ops::{apply_arith, apply_rel, check_assignable};
use crate::runtime::{
    ArithOp, Evaluated, RelOp, SymbolEntry, SymbolTable, UnsetRead, Value, ValueType,
};

/// Statement alternative selected by the lookahead token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatementKind {
    Assignment,
    Compound,
    Selection,
    Iteration,
}

impl StatementKind {
    fn from_lookahead(kind: TokenKind) -> Option<StatementKind> {
        match kind {
            TokenKind::Identifier => Some(StatementKind::Assignment),
            TokenKind::LeftBrace => Some(StatementKind::Compound),
            TokenKind::If => Some(StatementKind::Selection),
            TokenKind::While => Some(StatementKind::Iteration),
            _ => None,
        }
    }
}

/// A parsed `var` reference, before it is resolved against the symbol table
struct VarRef {
    name: String,
    line: usize,
    column: usize,
    subscript: Option<Evaluated>,
}

/// Single-pass recursive-descent parser and evaluator
///
/// Each grammar production is one method. Productions consume exactly their
/// own tokens, update the symbol table as declarations and assignments are
/// reduced, and return the evaluated value of every expression. The first
/// error aborts the whole parse; tokens are never pushed back.
pub struct Parser<I: Iterator<Item = Token>> {
    tokens: I,
    current: Token,
    symbols: SymbolTable,
    config: ParserConfig,
    depth: usize,
}

impl<I: Iterator<Item = Token>> Parser<I> {
    /// Creates a parser over a token sequence with the default configuration
    pub fn new<T>(tokens: T) -> Self
    where
        T: IntoIterator<Item = Token, IntoIter = I>,
    {
        Self::with_config(tokens, ParserConfig::default())
    }

    /// Creates a parser with a custom configuration
    pub fn with_config<T>(tokens: T, config: ParserConfig) -> Self
    where
        T: IntoIterator<Item = Token, IntoIter = I>,
    {
        let mut tokens = tokens.into_iter();
        let current = tokens.next().unwrap_or_else(|| Token::eof(1, 1));
        Parser {
            tokens,
            current,
            symbols: SymbolTable::new(),
            config,
            depth: 0,
        }
    }

    /// Parses and evaluates a whole program
    pub fn parse(mut self) -> Result<Program> {
        let program = self.program()?;
        tracing::debug!(
            program = %program.name,
            symbols = program.symbols.len(),
            "parse complete"
        );
        Ok(program)
    }

    // program := 'Program' ID '{' declaration-list statement-list '}'
    fn program(&mut self) -> Result<Program> {
        self.consume(TokenKind::Program)?;
        let name = self.consume(TokenKind::Identifier)?.lexeme;
        self.consume(TokenKind::LeftBrace)?;

        let declarations = self.declaration_list()?;
        let statements = self.statement_list()?;

        self.consume(TokenKind::RightBrace)?;
        self.consume(TokenKind::Eof)?;

        Ok(Program {
            name,
            declarations,
            statements,
            symbols: std::mem::take(&mut self.symbols),
        })
    }

    // declaration-list := declaration { declaration }
    fn declaration_list(&mut self) -> Result<Vec<Declaration>> {
        let mut declarations = vec![self.declaration()?];
        while self.current.kind.is_type_keyword() {
            declarations.push(self.declaration()?);
        }
        Ok(declarations)
    }

    // declaration := type-specifier ID ( ';' | '[' NUM ']' ';' )
    fn declaration(&mut self) -> Result<Declaration> {
        let ty = self.type_specifier()?;
        let ident = self.consume(TokenKind::Identifier)?;

        let array_len = match self.current.kind {
            TokenKind::Semicolon => {
                self.advance();
                None
            }
            TokenKind::LeftBracket => {
                self.advance();
                let len = self.array_length()?;
                self.consume(TokenKind::RightBracket)?;
                self.consume(TokenKind::Semicolon)?;
                Some(len)
            }
            _ => return Err(self.syntax_error("';' or '['")),
        };

        match array_len {
            Some(len) => {
                self.symbols
                    .declare_array(&ident.lexeme, ty, len, ident.line, ident.column)?
            }
            None => self
                .symbols
                .declare(&ident.lexeme, ty, ident.line, ident.column)?,
        }
        tracing::debug!(name = %ident.lexeme, %ty, ?array_len, "declared");

        Ok(Declaration {
            name: ident.lexeme,
            ty,
            array_len,
            line: ident.line,
            column: ident.column,
        })
    }

    fn type_specifier(&mut self) -> Result<ValueType> {
        let ty = match self.current.kind {
            TokenKind::Int => ValueType::Int,
            TokenKind::Float => ValueType::Float,
            _ => return Err(self.syntax_error("'int' or 'float'")),
        };
        self.advance();
        Ok(ty)
    }

    fn array_length(&mut self) -> Result<usize> {
        if self.current.kind != TokenKind::Number || self.current.lexeme.contains('.') {
            return Err(self.syntax_error("integer array length"));
        }
        let token = self.advance();
        token.lexeme.parse().map_err(|_| Error::InvalidLiteral {
            lexeme: token.lexeme.clone(),
            line: token.line,
            column: token.column,
        })
    }

    // statement-list := { statement }
    fn statement_list(&mut self) -> Result<Vec<StatementRecord>> {
        let mut statements = Vec::new();
        while !matches!(self.current.kind, TokenKind::RightBrace | TokenKind::Eof) {
            statements.push(self.statement()?);
        }
        Ok(statements)
    }

    // statement := assignment | compound | selection | iteration
    fn statement(&mut self) -> Result<StatementRecord> {
        let kind = StatementKind::from_lookahead(self.current.kind).ok_or_else(|| {
            self.syntax_error("statement (identifier, '{', 'if' or 'while')")
        })?;
        tracing::trace!(?kind, line = self.current.line, "statement");

        self.nested(|p| match kind {
            StatementKind::Assignment => p.assignment(),
            StatementKind::Compound => p.compound(),
            StatementKind::Selection => p.selection(),
            StatementKind::Iteration => p.iteration(),
        })
    }

    // assignment := var '=' expression ';'
    fn assignment(&mut self) -> Result<StatementRecord> {
        let target = self.var()?;
        let entry = self.resolve(&target)?;
        self.consume(TokenKind::Assign)?;
        let value = self.expression()?;

        let stored = if target.subscript.is_some() {
            // Element writes have no storage; the value is only checked.
            check_assignable(entry.ty, &value, target.line, target.column)?;
            false
        } else {
            let v = check_assignable(entry.ty, &value, target.line, target.column)?;
            self.symbols
                .assign(&target.name, v, value.ty, target.line, target.column)?;
            tracing::debug!(name = %target.name, value = %v, "assigned");
            true
        };

        self.consume(TokenKind::Semicolon)?;

        Ok(StatementRecord::Assignment {
            target: target.name,
            subscript: target.subscript,
            value,
            stored,
        })
    }

    // compound := '{' statement-list '}'
    fn compound(&mut self) -> Result<StatementRecord> {
        self.consume(TokenKind::LeftBrace)?;
        let statements = self.statement_list()?;
        self.consume(TokenKind::RightBrace)?;
        Ok(StatementRecord::Compound(statements))
    }

    // selection := 'if' '(' expression ')' statement [ 'else' statement ]
    //
    // Both branches are parsed and evaluated; the guard does not select one.
    fn selection(&mut self) -> Result<StatementRecord> {
        self.consume(TokenKind::If)?;
        self.consume(TokenKind::LeftParen)?;
        let guard = self.expression()?;
        self.consume(TokenKind::RightParen)?;

        let then_branch = Box::new(self.statement()?);
        let else_branch = if self.current.kind == TokenKind::Else {
            self.advance();
            Some(Box::new(self.statement()?))
        } else {
            None
        };

        Ok(StatementRecord::Selection {
            guard,
            then_branch,
            else_branch,
        })
    }

    // iteration := 'while' '(' expression ')' statement
    //
    // The body is parsed and evaluated exactly once.
    fn iteration(&mut self) -> Result<StatementRecord> {
        self.consume(TokenKind::While)?;
        self.consume(TokenKind::LeftParen)?;
        let guard = self.expression()?;
        self.consume(TokenKind::RightParen)?;

        let body = Box::new(self.statement()?);
        Ok(StatementRecord::Iteration { guard, body })
    }

    // var := ID [ '[' expression ']' ]
    fn var(&mut self) -> Result<VarRef> {
        let ident = self.consume(TokenKind::Identifier)?;

        let subscript = if self.current.kind == TokenKind::LeftBracket {
            self.advance();
            let index = self.expression()?;
            self.consume(TokenKind::RightBracket)?;
            Some(index)
        } else {
            None
        };

        Ok(VarRef {
            name: ident.lexeme,
            line: ident.line,
            column: ident.column,
            subscript,
        })
    }

    /// Looks up a referenced variable and applies the array policy
    fn resolve(&self, var: &VarRef) -> Result<SymbolEntry> {
        let entry = self
            .symbols
            .lookup(&var.name)
            .cloned()
            .ok_or_else(|| Error::UndeclaredVariable {
                name: var.name.clone(),
                line: var.line,
                column: var.column,
            })?;

        let is_array_use = var.subscript.is_some() || entry.array_len.is_some();
        match self.config.arrays {
            ArrayPolicy::Reject if is_array_use => Err(Error::UnsupportedArray {
                name: var.name.clone(),
                line: var.line,
                column: var.column,
            }),
            _ => {
                if let Some(index) = &var.subscript {
                    if index.ty != ValueType::Int {
                        return Err(Error::TypeMismatch {
                            expected: ValueType::Int.to_string(),
                            got: index.ty.to_string(),
                            line: var.line,
                            column: var.column,
                        });
                    }
                }
                Ok(entry)
            }
        }
    }

    // expression := additive-expr [ relop additive-expr ]
    fn expression(&mut self) -> Result<Evaluated> {
        self.nested(|p| {
            let left = p.additive_expression()?;

            match RelOp::from_token(p.current.kind) {
                Some(op) => {
                    let op_token = p.advance();
                    let right = p.additive_expression()?;
                    apply_rel(op, &left, &right, op_token.line, op_token.column)
                }
                None => Ok(left),
            }
        })
    }

    // additive-expr := term { addop term }
    fn additive_expression(&mut self) -> Result<Evaluated> {
        let mut left = self.term()?;

        while self.current.kind.is_addop() {
            let op_token = self.advance();
            let right = self.term()?;
            left = self.fold(&op_token, &left, &right)?;
        }

        Ok(left)
    }

    // term := factor { mulop factor }
    fn term(&mut self) -> Result<Evaluated> {
        let mut left = self.factor()?;

        while self.current.kind.is_mulop() {
            let op_token = self.advance();
            let right = self.factor()?;
            left = self.fold(&op_token, &left, &right)?;
        }

        Ok(left)
    }

    fn fold(&self, op_token: &Token, left: &Evaluated, right: &Evaluated) -> Result<Evaluated> {
        let op = ArithOp::from_token(op_token.kind).ok_or_else(|| Error::SyntaxError {
            expected: "arithmetic operator".to_string(),
            found: op_token.describe(),
            line: op_token.line,
            column: op_token.column,
        })?;
        apply_arith(op, left, right, op_token.line, op_token.column)
    }

    // factor := '(' expression ')' | NUM | var
    fn factor(&mut self) -> Result<Evaluated> {
        match self.current.kind {
            TokenKind::LeftParen => {
                self.advance();
                let value = self.expression()?;
                self.consume(TokenKind::RightParen)?;
                Ok(value)
            }
            TokenKind::Number => {
                let token = self.advance();
                Self::literal(&token)
            }
            TokenKind::Identifier => {
                let var = self.var()?;
                let entry = self.resolve(&var)?;
                if var.subscript.is_some() {
                    // Elements have no storage to read from.
                    return Ok(Evaluated::unset(entry.ty, Self::unset_read(&var)));
                }
                Ok(match entry.value {
                    Some(value) => Evaluated::new(value, entry.ty),
                    None => Evaluated::unset(entry.ty, Self::unset_read(&var)),
                })
            }
            _ => Err(self.syntax_error("'(', identifier or number")),
        }
    }

    /// Numeric literal; a decimal point makes it a float
    fn literal(token: &Token) -> Result<Evaluated> {
        let invalid = || Error::InvalidLiteral {
            lexeme: token.lexeme.clone(),
            line: token.line,
            column: token.column,
        };

        if token.lexeme.contains('.') {
            let value: f64 = token.lexeme.parse().map_err(|_| invalid())?;
            if !value.is_finite() {
                return Err(invalid());
            }
            Ok(Evaluated::new(Value::Float(value), ValueType::Float))
        } else {
            let value: i64 = token.lexeme.parse().map_err(|_| invalid())?;
            Ok(Evaluated::new(Value::Int(value), ValueType::Int))
        }
    }

    fn unset_read(var: &VarRef) -> UnsetRead {
        UnsetRead {
            name: var.name.clone(),
            line: var.line,
            column: var.column,
        }
    }

    // =========================================================================
    // Token cursor
    // =========================================================================

    /// Runs a production one nesting level deeper
    fn nested<T>(&mut self, production: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= self.config.max_depth {
            return Err(Error::NestingTooDeep {
                limit: self.config.max_depth,
                line: self.current.line,
                column: self.current.column,
            });
        }
        self.depth += 1;
        let result = production(self);
        self.depth -= 1;
        result
    }

    /// Moves to the next token and returns the one just consumed
    fn advance(&mut self) -> Token {
        let next = match self.tokens.next() {
            Some(token) => token,
            None => {
                let (line, column) = self.end_position();
                Token::eof(line, column)
            }
        };
        let consumed = std::mem::replace(&mut self.current, next);
        tracing::trace!(kind = ?consumed.kind, lexeme = %consumed.lexeme, "consumed");
        consumed
    }

    /// Position just past the current token
    fn end_position(&self) -> (usize, usize) {
        (
            self.current.line,
            self.current.column + self.current.lexeme.chars().count(),
        )
    }

    /// Matches the current token against `kind` and advances past it
    fn consume(&mut self, kind: TokenKind) -> Result<Token> {
        if self.current.kind == kind {
            Ok(self.advance())
        } else {
            Err(self.syntax_error(kind.to_string()))
        }
    }

    fn syntax_error(&self, expected: impl Into<String>) -> Error {
        Error::SyntaxError {
            expected: expected.into(),
            found: self.current.describe(),
            line: self.current.line,
            column: self.current.column,
        }
    }
}

use super::*;

impl<'a> Parser<'a> {
    /* Expressions */
    /// Parses any expression.
    /// This is equivalent to calling [`Self::parse_expr_bp`] with `min_bp = 0`, one nesting level deeper.
    pub fn parse_expr(&mut self) -> Result<Expr, Diagnostic> {
        self.nested(|parser| parser.parse_expr_bp(0)) // 0 to accept any expression
    }

    /// Parses a primary (atom) expression: a literal, a variable, a call or a parenthesized
    /// expression.
    fn parse_primary_expr(&mut self) -> Result<Expr, Diagnostic> {
        let lexeme = &self.current_token.lexeme;
        let literal = match self.current_token.kind {
            TokenKind::Integer => match lexeme.parse() {
                Ok(val) => Expr::IntLit(val),
                Err(_) => {
                    return Err(self.error(format!("Integer literal out of range: {}", lexeme)))
                }
            },
            // Float lexemes are always `digits.digits`.
            TokenKind::Float => match lexeme.parse() {
                Ok(val) => Expr::FloatLit(val),
                Err(_) => return Err(self.error(format!("Invalid float literal: {}", lexeme))),
            },
            TokenKind::String => Expr::StringLit(lexeme.clone()),
            // The lexer rejects empty char literals, so `None` only guards a hand-built token.
            TokenKind::Char => match lexeme.chars().next() {
                Some(val) => Expr::CharLit(val),
                None => return Err(self.error("Empty char literal")),
            },
            TokenKind::Bool => Expr::BoolLit(lexeme == "true"),
            TokenKind::Identifier if lexeme == "Void" => Expr::VoidLit,
            TokenKind::Identifier => return self.parse_identifier_or_call_expr(),
            TokenKind::LParen => return self.parse_grouping_expr(),
            _ => return Err(self.error("Unexpected token in expression")),
        };
        self.next()?; // eat literal
        Ok(literal)
    }

    fn parse_grouping_expr(&mut self) -> Result<Expr, Diagnostic> {
        self.expect(TokenKind::LParen, "`(`")?;
        let expr = self.parse_expr()?;
        self.expect(TokenKind::RParen, "`)`")?;
        Ok(expr)
    }

    /// Parses an expression with the specified `min_bp`.
    /// To parse any expression use, [`Self::parse_expr`].
    fn parse_expr_bp(&mut self, min_bp: u8) -> Result<Expr, Diagnostic> {
        let mut lhs = self.parse_primary_expr()?;

        loop {
            let (op, l_bp, r_bp) = match self.current_token.kind.binop_bp() {
                Some(bp) => bp,
                None => break, // not a valid binop, stop parsing
            };
            if l_bp < min_bp {
                break; // less than the min_bp, stop parsing
            }

            // self.current_token is a valid binop
            self.next()?;

            let rhs = self.parse_expr_bp(r_bp)?;

            lhs = Expr::Binary {
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
            }
        }

        Ok(lhs)
    }

    /* Expressions.Identifier */
    /// Parses an identifier or a call expression.
    /// An identifier directly followed by `(` is a call.
    fn parse_identifier_or_call_expr(&mut self) -> Result<Expr, Diagnostic> {
        let ident = self.expect_ident("Expected identifier")?;

        if !self.eat(TokenKind::LParen)? {
            // parse identifier expression
            return Ok(Expr::Variable(ident));
        }

        // parse call expression
        let mut args = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                args.push(self.parse_expr()?);

                if !self.eat(TokenKind::Comma)? {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen, "`)`")?;

        Ok(Expr::Call {
            callee: ident,
            args,
        })
    }
}

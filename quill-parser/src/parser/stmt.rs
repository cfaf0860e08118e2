use super::*;

impl<'a> Parser<'a> {
    /// Parses a statement and its terminator.
    /// The `;` may be left out when the statement is the last one of its block.
    pub fn parse_stmt(&mut self) -> Result<Stmt, Diagnostic> {
        let stmt = match self.current_token.kind {
            TokenKind::Let => self.parse_let_stmt()?,
            TokenKind::If => self.parse_if_stmt()?,
            TokenKind::Return => self.parse_return_stmt()?,
            _ => Stmt::Expr(self.parse_expr()?), // expression statement
        };

        if !self.check(TokenKind::RBrace) {
            self.expect(TokenKind::Semi, "`;` after statement")?;
        }
        Ok(stmt)
    }

    pub fn parse_block(&mut self) -> Result<Block, Diagnostic> {
        Ok(Block {
            stmts: self.parse_block_stmts()?,
        })
    }

    fn parse_block_stmts(&mut self) -> Result<Vec<Stmt>, Diagnostic> {
        self.nested(|parser| {
            parser.expect(TokenKind::LBrace, "`{`")?;

            let mut body = Vec::new();
            while !parser.check(TokenKind::RBrace) && !parser.check(TokenKind::Eof) {
                body.push(parser.parse_stmt()?);
            }

            parser.expect(TokenKind::RBrace, "`}`")?;
            Ok(body)
        })
    }

    fn parse_let_stmt(&mut self) -> Result<Stmt, Diagnostic> {
        self.expect(TokenKind::Let, "`let`")?;
        let ident = self.expect_ident("Expected variable name")?;
        self.expect(TokenKind::Colon, "`:`")?;
        let ty = self.parse_type("Expected type name")?;

        let initializer = if self.eat(TokenKind::Eq)? {
            Some(self.parse_expr()?)
        } else {
            None
        };

        Ok(Stmt::Let {
            ident,
            ty,
            initializer,
        })
    }

    fn parse_if_stmt(&mut self) -> Result<Stmt, Diagnostic> {
        self.expect(TokenKind::If, "`if`")?;
        let condition = self.parse_expr()?;
        let then_branch = self.parse_block_stmts()?;
        let else_branch = if self.eat(TokenKind::Else)? {
            self.parse_block_stmts()?
        } else {
            Vec::new()
        };

        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    fn parse_return_stmt(&mut self) -> Result<Stmt, Diagnostic> {
        self.expect(TokenKind::Return, "`return`")?;
        let expr = self.parse_expr()?;
        Ok(Stmt::Return(expr))
    }
}

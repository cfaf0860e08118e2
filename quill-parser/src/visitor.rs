//! Visitor pattern for AST nodes.

use crate::ast::{Block, Expr, Function, Program, Stmt};

pub trait Visitor<'ast>: Sized {
    fn visit_program(&mut self, program: &'ast Program) {
        walk_program(self, program);
    }
    fn visit_function(&mut self, function: &'ast Function) {
        walk_function(self, function);
    }
    fn visit_block(&mut self, block: &'ast Block) {
        walk_block(self, block);
    }
    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        walk_stmt(self, stmt);
    }
    fn visit_expr(&mut self, expr: &'ast Expr) {
        walk_expr(self, expr);
    }
}

/// Iteratively visit all statements in a `Vec<Stmt>`.
macro_rules! visit_stmt_list {
    ($visitor: expr, $body: expr) => {
        for stmt in $body {
            Visitor::visit_stmt($visitor, stmt);
        }
    };
}

pub fn walk_program<'ast>(visitor: &mut impl Visitor<'ast>, program: &'ast Program) {
    for function in &program.functions {
        visitor.visit_function(function);
    }
}

pub fn walk_function<'ast>(visitor: &mut impl Visitor<'ast>, function: &'ast Function) {
    visitor.visit_block(&function.body);
}

pub fn walk_block<'ast>(visitor: &mut impl Visitor<'ast>, block: &'ast Block) {
    visit_stmt_list!(visitor, &block.stmts);
}

pub fn walk_expr<'ast>(visitor: &mut impl Visitor<'ast>, expr: &'ast Expr) {
    match expr {
        Expr::IntLit(_)
        | Expr::FloatLit(_)
        | Expr::StringLit(_)
        | Expr::CharLit(_)
        | Expr::BoolLit(_)
        | Expr::VoidLit
        | Expr::Variable(_) => {}
        Expr::Call { callee: _, args } => {
            for arg in args {
                visitor.visit_expr(arg);
            }
        }
        Expr::Binary { lhs, op: _, rhs } => {
            visitor.visit_expr(lhs);
            visitor.visit_expr(rhs);
        }
    }
}

pub fn walk_stmt<'ast>(visitor: &mut impl Visitor<'ast>, stmt: &'ast Stmt) {
    match stmt {
        Stmt::Return(expr) => visitor.visit_expr(expr),
        Stmt::If {
            condition,
            then_branch,
            else_branch,
        } => {
            visitor.visit_expr(condition);
            visit_stmt_list!(visitor, then_branch);
            visit_stmt_list!(visitor, else_branch);
        }
        Stmt::Let {
            ident: _,
            ty: _,
            initializer,
        } => {
            if let Some(initializer) = initializer {
                visitor.visit_expr(initializer);
            }
        }
        Stmt::Expr(expr) => visitor.visit_expr(expr),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;
    use quill_source::Source;

    /// Collects the names of every called function.
    #[derive(Default)]
    struct CallCollector<'ast> {
        callees: Vec<&'ast str>,
    }

    impl<'ast> Visitor<'ast> for CallCollector<'ast> {
        fn visit_expr(&mut self, expr: &'ast Expr) {
            if let Expr::Call { callee, .. } = expr {
                self.callees.push(callee);
            }
            walk_expr(self, expr);
        }
    }

    #[test]
    fn test_walk_reaches_every_expression() {
        let source = Source::new(
            "fn main() -> Void {
                let x: Int = f(g(1));
                if h() { return i() } else { j(); };
                k()
            }
            fn other() -> Int { return l(); }",
        );
        let program = parse(&source).unwrap();

        let mut collector = CallCollector::default();
        collector.visit_program(&program);
        assert_eq!(collector.callees, vec!["f", "g", "h", "i", "j", "k", "l"]);
    }
}

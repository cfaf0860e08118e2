//! Indented tree dump of a [`Program`], one node per line.

use crate::ast::{Block, Expr, Function, Program, Stmt};
use crate::visitor::{self, Visitor};
use std::fmt;

const INDENT: &str = "  ";

#[derive(Default)]
pub struct Printer {
    out: String,
    indent: usize,
}

impl Printer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn print(mut self, program: &Program) -> String {
        self.visit_program(program);
        self.out
    }

    fn line(&mut self, text: impl fmt::Display) {
        for _ in 0..self.indent {
            self.out.push_str(INDENT);
        }
        self.out.push_str(&text.to_string());
        self.out.push('\n');
    }

    /// Prints `f`'s output one indentation step deeper.
    fn indented(&mut self, f: impl FnOnce(&mut Self)) {
        self.indent += 1;
        f(self);
        self.indent -= 1;
    }

    fn stmt_list(&mut self, stmts: &[Stmt]) {
        self.indented(|printer| {
            for stmt in stmts {
                printer.visit_stmt(stmt);
            }
        });
    }
}

impl<'ast> Visitor<'ast> for Printer {
    fn visit_program(&mut self, program: &'ast Program) {
        self.line("Program");
        self.indented(|printer| visitor::walk_program(printer, program));
    }

    fn visit_function(&mut self, function: &'ast Function) {
        self.line(format_args!(
            "Function {} -> {}",
            function.ident, function.return_type
        ));
        self.indented(|printer| {
            for param in &function.params {
                printer.line(format_args!("Param: {}: {}", param.ident, param.ty));
            }
            printer.visit_block(&function.body);
        });
    }

    fn visit_block(&mut self, block: &'ast Block) {
        self.line("Block");
        self.stmt_list(&block.stmts);
    }

    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        match stmt {
            Stmt::Return(expr) => {
                self.line("Return");
                self.indented(|printer| printer.visit_expr(expr));
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.line("If");
                self.indented(|printer| printer.visit_expr(condition));
                self.line("Then:");
                self.stmt_list(then_branch);
                if !else_branch.is_empty() {
                    self.line("Else:");
                    self.stmt_list(else_branch);
                }
            }
            Stmt::Let {
                ident,
                ty,
                initializer,
            } => {
                self.line(format_args!("Let({}: {})", ident, ty));
                if let Some(initializer) = initializer {
                    self.indented(|printer| printer.visit_expr(initializer));
                }
            }
            Stmt::Expr(expr) => self.visit_expr(expr),
        }
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        match expr {
            Expr::IntLit(val) => self.line(format_args!("Int({})", val)),
            Expr::FloatLit(val) => self.line(format_args!("Float({:?})", val)),
            Expr::StringLit(val) => self.line(format_args!("String({:?})", val)),
            Expr::CharLit(val) => self.line(format_args!("Char({:?})", val)),
            Expr::BoolLit(val) => self.line(format_args!("Bool({})", val)),
            Expr::VoidLit => self.line("Void"),
            Expr::Variable(ident) => self.line(format_args!("Var({})", ident)),
            Expr::Binary { op, .. } => {
                self.line(format_args!("Binary({})", op));
                self.indented(|printer| visitor::walk_expr(printer, expr));
            }
            Expr::Call { callee, .. } => {
                self.line(format_args!("Call({})", callee));
                self.indented(|printer| visitor::walk_expr(printer, expr));
            }
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Printer::new().print(self))
    }
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use insta::assert_snapshot;
    use quill_source::Source;

    fn dump(content: &str) -> String {
        let source = Source::new(content);
        parse(&source).unwrap().to_string()
    }

    #[test]
    fn test_empty_program() {
        assert_eq!(dump(""), "Program\n");
    }

    #[test]
    fn test_dump() {
        assert_snapshot!(dump(
            r#"fn add(a: Int, b: Int) -> Int { return a + b; }

            fn main() -> Void {
                let greeting: String = "hi\n";
                let initial: Char = 'q';
                let ratio: Float;
                ratio = (1 - 2) - 3;
                if add(1, 2) <= 3 {
                    return Void
                } else {
                    let done: Bool = false;
                    add(2.5, done)
                };
            }"#
        ), @r###"
        Program
          Function add -> Int
            Param: a: Int
            Param: b: Int
            Block
              Return
                Binary(+)
                  Var(a)
                  Var(b)
          Function main -> Void
            Block
              Let(greeting: String)
                String("hi\n")
              Let(initial: Char)
                Char('q')
              Let(ratio: Float)
              Binary(=)
                Var(ratio)
                Binary(-)
                  Binary(-)
                    Int(1)
                    Int(2)
                  Int(3)
              If
                Binary(<=)
                  Call(add)
                    Int(1)
                    Int(2)
                  Int(3)
              Then:
                Return
                  Void
              Else:
                Let(done: Bool)
                  Bool(false)
                Call(add)
                  Float(2.5)
                  Var(done)
        "###);
    }
}

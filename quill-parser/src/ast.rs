use std::fmt;

/// A declared parameter, return or variable type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Int,
    Float,
    String,
    Char,
    Bool,
    Void,
}

impl Type {
    /// Looks up a type by its source spelling (e.g. `Int`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Int" => Some(Type::Int),
            "Float" => Some(Type::Float),
            "String" => Some(Type::String),
            "Char" => Some(Type::Char),
            "Bool" => Some(Type::Bool),
            "Void" => Some(Type::Void),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Type::Int => "Int",
            Type::Float => "Float",
            Type::String => "String",
            Type::Char => "Char",
            Type::Bool => "Bool",
            Type::Void => "Void",
        })
    }
}

/// A binary operator, listed from lowest to highest precedence tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    /// `=`
    Eq,
    /// `<=`
    LessEq,
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Eq => "=",
            BinOp::LessEq => "<=",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    IntLit(i64),
    FloatLit(f64),
    StringLit(String),
    CharLit(char),
    BoolLit(bool),
    VoidLit,
    /// A variable reference (e.g. `foo`).
    Variable(String),
    /// A binary expression (e.g. `1+1`).
    Binary {
        lhs: Box<Expr>,
        op: BinOp,
        rhs: Box<Expr>,
    },
    /// A function call (e.g. `foo(1, bar)`).
    Call { callee: String, args: Vec<Expr> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Return(Expr),
    /// An empty `else_branch` means there was no `else`.
    If {
        condition: Expr,
        then_branch: Vec<Stmt>,
        else_branch: Vec<Stmt>,
    },
    Let {
        ident: String,
        ty: Type,
        initializer: Option<Expr>,
    },
    /// An expression used as a statement (e.g. `x = 1;`).
    Expr(Expr),
}

/// A braced statement list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub stmts: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub ident: String,
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub ident: String,
    pub return_type: Type,
    pub params: Vec<Param>,
    pub body: Block,
}

/// The root of the syntax tree. Functions are kept in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub functions: Vec<Function>,
}

// Structural emission tree. No source text here; `codegen` renders it and
// `interp` executes it.

use serde::Serialize;

use crate::types::{Primitive, TypeRef};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Literal {
    Bool(bool),
    Int(i32),
    Str(String),
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinOp {
    Identical, // reference / value `==`
    NotEqual,
    Add,
    Mul,
}

/// The three virtual methods every object inherits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ObjectMethod {
    Equals,
    HashCode,
    ToString,
}

impl ObjectMethod {
    pub fn name(self) -> &'static str {
        match self {
            ObjectMethod::Equals => "equals",
            ObjectMethod::HashCode => "hashCode",
            ObjectMethod::ToString => "toString",
        }
    }
}

/// Static helpers the synthesized bodies call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Intrinsic {
    /// `Integer.compare(a, b)` and friends.
    Compare(Primitive),
    /// `Integer.hashCode(a)` and friends.
    Hash(Primitive),
    ArrayEquals,
    ArrayDeepEquals,
    ArrayHashCode,
    ArrayDeepHashCode,
    ArrayToString,
    ArrayDeepToString,
    RequireNonNull,
}

impl Intrinsic {
    pub fn owner(self) -> &'static str {
        match self {
            Intrinsic::Compare(p) | Intrinsic::Hash(p) => p.boxed_name(),
            Intrinsic::RequireNonNull => "Objects",
            _ => "Arrays",
        }
    }

    pub fn method(self) -> &'static str {
        match self {
            Intrinsic::Compare(_) => "compare",
            Intrinsic::Hash(_) | Intrinsic::ArrayHashCode => "hashCode",
            Intrinsic::ArrayEquals => "equals",
            Intrinsic::ArrayDeepEquals => "deepEquals",
            Intrinsic::ArrayDeepHashCode => "deepHashCode",
            Intrinsic::ArrayToString => "toString",
            Intrinsic::ArrayDeepToString => "deepToString",
            Intrinsic::RequireNonNull => "requireNonNull",
        }
    }

    /// Fully qualified import needed to call this, if any (`java.lang` needs none).
    pub fn import(self) -> Option<&'static str> {
        match self.owner() {
            "Arrays" => Some("java.util.Arrays"),
            "Objects" => Some("java.util.Objects"),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Expr {
    Lit(Literal),
    This,
    Local(String),
    Field { target: Box<Expr>, name: String },
    Binary { op: BinOp, lhs: Box<Expr>, rhs: Box<Expr> },
    Not(Box<Expr>),
    InstanceOf { expr: Box<Expr>, class: String },
    Cast { expr: Box<Expr>, class: String },
    /// Virtual call on a value.
    Invoke { receiver: Box<Expr>, method: ObjectMethod, args: Vec<Expr> },
    /// Call into the superclass implementation on `this`.
    InvokeSuper { method: ObjectMethod, args: Vec<Expr> },
    Intrinsic { op: Intrinsic, args: Vec<Expr> },
    /// String concatenation; each part is converted the way `String.valueOf` does.
    Concat(Vec<Expr>),
}

impl Expr {
    pub fn local(name: impl Into<String>) -> Self {
        Expr::Local(name.into())
    }

    pub fn field(target: Expr, name: impl Into<String>) -> Self {
        Expr::Field { target: Box::new(target), name: name.into() }
    }

    /// `this.<name>`
    pub fn this_field(name: impl Into<String>) -> Self {
        Expr::field(Expr::This, name)
    }

    pub fn int(v: i32) -> Self {
        Expr::Lit(Literal::Int(v))
    }

    pub fn bool(v: bool) -> Self {
        Expr::Lit(Literal::Bool(v))
    }

    pub fn str(v: impl Into<String>) -> Self {
        Expr::Lit(Literal::Str(v.into()))
    }

    pub fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) }
    }

    pub fn not(expr: Expr) -> Self {
        Expr::Not(Box::new(expr))
    }

    pub fn invoke(receiver: Expr, method: ObjectMethod, args: Vec<Expr>) -> Self {
        Expr::Invoke { receiver: Box::new(receiver), method, args }
    }

    pub fn intrinsic(op: Intrinsic, args: Vec<Expr>) -> Self {
        Expr::Intrinsic { op, args }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Stmt {
    /// `[final] <ty> <name> = <value>;`
    Local { name: String, ty: TypeRef, value: Expr, constant: bool },
    Assign { target: Expr, value: Expr },
    If { condition: Expr, then: Vec<Stmt> },
    Return(Option<Expr>),
    Eval(Expr),
}

impl Stmt {
    /// `if (<condition>) return <value>;`
    pub fn return_if(condition: Expr, value: bool) -> Self {
        Stmt::If { condition, then: vec![Stmt::Return(Some(Expr::bool(value)))] }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    pub name: String,
    pub ty: TypeRef,
}

/// One method: a synthesized `equals`/`hashCode`/`toString`, or an accessor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodEmission {
    pub name: String,
    /// `None` is `void`.
    pub returns: Option<TypeRef>,
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
    /// Overrides a superclass method (rendered with `@Override`).
    pub overrides: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstructorEmission {
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDecl {
    pub name: String,
    pub ty: TypeRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassEmission {
    pub namespace: Option<String>,
    pub name: String,
    pub fields: Vec<FieldDecl>, // private, schema order
    pub constructors: Vec<ConstructorEmission>,
    pub methods: Vec<MethodEmission>,
}

impl ClassEmission {
    pub fn method(&self, name: &str) -> Option<&MethodEmission> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn constructor(&self, arity: usize) -> Option<&ConstructorEmission> {
        self.constructors.iter().find(|c| c.params.len() == arity)
    }
}

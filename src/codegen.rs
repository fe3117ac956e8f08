//! Renders a [`ClassEmission`] as Java source.
//!
//! Layout is fixed: four-space indent, braces on every `if`, one blank line
//! between members. Imports are derived from the intrinsics the bodies call.
use std::collections::BTreeSet;
use std::fmt::Write as _;

use crate::ir::{
    BinOp, ClassEmission, ConstructorEmission, Expr, Literal, MethodEmission, Param, Stmt,
};

const INDENT: &str = "    ";

pub fn print(class: &ClassEmission) -> String {
    let mut cg = Codegen::new();
    cg.emit(class);
    cg.into_string()
}

#[derive(Debug, Default)]
pub struct Codegen {
    out: String,
    depth: usize,
}

impl Codegen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_string(self) -> String {
        self.out
    }

    pub fn emit(&mut self, class: &ClassEmission) {
        if let Some(ns) = &class.namespace {
            self.line(&format!("package {ns};"));
            self.blank();
        }

        let imports = imports_of(class);
        if !imports.is_empty() {
            for import in &imports {
                self.line(&format!("import {import};"));
            }
            self.blank();
        }

        self.line(&format!("public class {} {{", class.name));
        self.depth += 1;

        if !class.fields.is_empty() {
            self.blank();
            for field in &class.fields {
                self.line(&format!("private {} {};", field.ty, field.name));
            }
        }
        for ctor in &class.constructors {
            self.blank();
            self.constructor(&class.name, ctor);
        }
        for method in &class.methods {
            self.blank();
            self.method(method);
        }

        self.depth -= 1;
        self.line("}");
    }

    fn constructor(&mut self, class_name: &str, ctor: &ConstructorEmission) {
        self.line(&format!("public {class_name}({}) {{", params(&ctor.params)));
        self.block(&ctor.body);
        self.line("}");
    }

    fn method(&mut self, method: &MethodEmission) {
        if method.overrides {
            self.line("@Override");
        }
        let returns = match &method.returns {
            Some(ty) => ty.to_string(),
            None => "void".to_string(),
        };
        self.line(&format!("public {returns} {}({}) {{", method.name, params(&method.params)));
        self.block(&method.body);
        self.line("}");
    }

    fn block(&mut self, body: &[Stmt]) {
        self.depth += 1;
        for stmt in body {
            self.stmt(stmt);
        }
        self.depth -= 1;
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Local { name, ty, value, constant } => {
                let fin = if *constant { "final " } else { "" };
                self.line(&format!("{fin}{ty} {name} = {};", expr(value)));
            }
            Stmt::Assign { target, value } => {
                self.line(&format!("{} = {};", expr(target), expr(value)));
            }
            Stmt::If { condition, then } => {
                self.line(&format!("if ({}) {{", expr(condition)));
                self.block(then);
                self.line("}");
            }
            Stmt::Return(Some(value)) => self.line(&format!("return {};", expr(value))),
            Stmt::Return(None) => self.line("return;"),
            Stmt::Eval(value) => self.line(&format!("{};", expr(value))),
        }
    }

    fn line(&mut self, s: &str) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(s);
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }
}

fn params(params: &[Param]) -> String {
    params.iter().map(|p| format!("{} {}", p.ty, p.name)).collect::<Vec<_>>().join(", ")
}

// ----------------------------- Expressions -------------------------------- //

// Binding strength, loosely following Java's operator table.
const PREC_EQUALITY: u8 = 8;
const PREC_RELATIONAL: u8 = 9;
const PREC_ADDITIVE: u8 = 11;
const PREC_MULTIPLICATIVE: u8 = 12;
const PREC_UNARY: u8 = 14;
const PREC_PRIMARY: u8 = 16;

fn precedence(e: &Expr) -> u8 {
    match e {
        Expr::Binary { op: BinOp::Identical | BinOp::NotEqual, .. } => PREC_EQUALITY,
        Expr::InstanceOf { .. } => PREC_RELATIONAL,
        Expr::Binary { op: BinOp::Add, .. } | Expr::Concat(_) => PREC_ADDITIVE,
        Expr::Binary { op: BinOp::Mul, .. } => PREC_MULTIPLICATIVE,
        Expr::Not(_) | Expr::Cast { .. } => PREC_UNARY,
        _ => PREC_PRIMARY,
    }
}

pub fn expr(e: &Expr) -> String {
    let mut out = String::new();
    write_expr(&mut out, e);
    out
}

/// Write `e`, parenthesized if it binds looser than `min`.
fn operand(out: &mut String, e: &Expr, min: u8) {
    if precedence(e) < min {
        out.push('(');
        write_expr(out, e);
        out.push(')');
    } else {
        write_expr(out, e);
    }
}

fn args(out: &mut String, args: &[Expr]) {
    out.push('(');
    for (i, a) in args.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_expr(out, a);
    }
    out.push(')');
}

fn write_expr(out: &mut String, e: &Expr) {
    match e {
        Expr::Lit(lit) => literal(out, lit),
        Expr::This => out.push_str("this"),
        Expr::Local(name) => out.push_str(name),
        Expr::Field { target, name } => {
            operand(out, target, PREC_PRIMARY);
            out.push('.');
            out.push_str(name);
        }
        Expr::Binary { op, lhs, rhs } => {
            let p = precedence(e);
            let sym = match op {
                BinOp::Identical => "==",
                BinOp::NotEqual => "!=",
                BinOp::Add => "+",
                BinOp::Mul => "*",
            };
            operand(out, lhs, p);
            let _ = write!(out, " {sym} ");
            operand(out, rhs, p + 1);
        }
        Expr::Not(inner) => {
            out.push('!');
            operand(out, inner, PREC_UNARY);
        }
        Expr::InstanceOf { expr, class } => {
            operand(out, expr, PREC_RELATIONAL + 1);
            let _ = write!(out, " instanceof {class}");
        }
        Expr::Cast { expr, class } => {
            let _ = write!(out, "({class}) ");
            operand(out, expr, PREC_UNARY);
        }
        Expr::Invoke { receiver, method, args: a } => {
            operand(out, receiver, PREC_PRIMARY);
            out.push('.');
            out.push_str(method.name());
            args(out, a);
        }
        Expr::InvokeSuper { method, args: a } => {
            out.push_str("super.");
            out.push_str(method.name());
            args(out, a);
        }
        Expr::Intrinsic { op, args: a } => {
            let _ = write!(out, "{}.{}", op.owner(), op.method());
            args(out, a);
        }
        Expr::Concat(parts) => {
            for (i, part) in parts.iter().enumerate() {
                if i > 0 {
                    out.push_str(" + ");
                }
                operand(out, part, PREC_MULTIPLICATIVE);
            }
        }
    }
}

fn literal(out: &mut String, lit: &Literal) {
    match lit {
        Literal::Bool(b) => {
            let _ = write!(out, "{b}");
        }
        Literal::Int(i) => {
            let _ = write!(out, "{i}");
        }
        Literal::Null => out.push_str("null"),
        Literal::Str(s) => {
            out.push('"');
            for c in s.chars() {
                match c {
                    '"' => out.push_str("\\\""),
                    '\\' => out.push_str("\\\\"),
                    '\n' => out.push_str("\\n"),
                    '\r' => out.push_str("\\r"),
                    '\t' => out.push_str("\\t"),
                    c => out.push(c),
                }
            }
            out.push('"');
        }
    }
}

// ------------------------------- Imports ---------------------------------- //

fn imports_of(class: &ClassEmission) -> BTreeSet<&'static str> {
    let mut found = BTreeSet::new();
    let bodies = class
        .constructors
        .iter()
        .map(|c| &c.body)
        .chain(class.methods.iter().map(|m| &m.body));
    for body in bodies {
        for stmt in body {
            stmt_imports(stmt, &mut found);
        }
    }
    found
}

fn stmt_imports(stmt: &Stmt, found: &mut BTreeSet<&'static str>) {
    match stmt {
        Stmt::Local { value, .. } => expr_imports(value, found),
        Stmt::Assign { target, value } => {
            expr_imports(target, found);
            expr_imports(value, found);
        }
        Stmt::If { condition, then } => {
            expr_imports(condition, found);
            for s in then {
                stmt_imports(s, found);
            }
        }
        Stmt::Return(value) => {
            if let Some(v) = value {
                expr_imports(v, found);
            }
        }
        Stmt::Eval(value) => expr_imports(value, found),
    }
}

fn expr_imports(e: &Expr, found: &mut BTreeSet<&'static str>) {
    match e {
        Expr::Lit(_) | Expr::This | Expr::Local(_) => {}
        Expr::Field { target, .. } => expr_imports(target, found),
        Expr::Binary { lhs, rhs, .. } => {
            expr_imports(lhs, found);
            expr_imports(rhs, found);
        }
        Expr::Not(inner) => expr_imports(inner, found),
        Expr::InstanceOf { expr, .. } | Expr::Cast { expr, .. } => expr_imports(expr, found),
        Expr::Invoke { receiver, args, .. } => {
            expr_imports(receiver, found);
            args.iter().for_each(|a| expr_imports(a, found));
        }
        Expr::InvokeSuper { args, .. } | Expr::Concat(args) => {
            args.iter().for_each(|a| expr_imports(a, found));
        }
        Expr::Intrinsic { op, args } => {
            if let Some(import) = op.import() {
                found.insert(import);
            }
            args.iter().for_each(|a| expr_imports(a, found));
        }
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::assemble;
    use crate::ir::{Intrinsic, ObjectMethod};
    use crate::schema::{ClassSchema, GenerationOptions};
    use crate::types::{Primitive, TypeRef};
    use pretty_assertions::assert_eq;

    #[test]
    fn expressions_get_minimal_parens() {
        let not_instance = Expr::not(Expr::InstanceOf { expr: Box::new(Expr::local("o")), class: "Test".into() });
        assert_eq!(expr(&not_instance), "!(o instanceof Test)");

        let acc = Expr::binary(
            BinOp::Add,
            Expr::binary(BinOp::Mul, Expr::local("result"), Expr::local("PRIME")),
            Expr::intrinsic(Intrinsic::Hash(Primitive::Int), vec![Expr::this_field("a")]),
        );
        assert_eq!(expr(&acc), "result * PRIME + Integer.hashCode(this.a)");

        let nested = Expr::binary(
            BinOp::Mul,
            Expr::local("a"),
            Expr::binary(BinOp::Add, Expr::local("b"), Expr::local("c")),
        );
        assert_eq!(expr(&nested), "a * (b + c)");

        let not_super = Expr::not(Expr::InvokeSuper { method: ObjectMethod::Equals, args: vec![Expr::local("o")] });
        assert_eq!(expr(&not_super), "!super.equals(o)");

        let cast = Expr::Cast { expr: Box::new(Expr::local("o")), class: "Test".into() };
        assert_eq!(expr(&cast), "(Test) o");
    }

    #[test]
    fn string_literals_are_escaped() {
        assert_eq!(expr(&Expr::str("a\"b\\c\n")), r#""a\"b\\c\n""#);
    }

    #[test]
    fn prints_full_class() {
        let schema = ClassSchema::from_parts(
            "point",
            Some("com/example"),
            &["x", "tags"],
            vec![TypeRef::primitive(Primitive::Int), TypeRef::named("String").array()],
            GenerationOptions::all(),
        )
        .unwrap();
        let expected = r#"package com.example;

import java.util.Arrays;

public class Point {

    private int x;
    private String[] tags;

    public Point() {
    }

    public Point(int x, String[] tags) {
        this.x = x;
        this.tags = tags;
    }

    public void setX(int x) {
        this.x = x;
    }

    public int getX() {
        return this.x;
    }

    public void setTags(String[] tags) {
        this.tags = tags;
    }

    public String[] getTags() {
        return this.tags;
    }

    @Override
    public int hashCode() {
        final int PRIME = 59;
        int result = 1;
        result = result * PRIME + Integer.hashCode(this.x);
        result = result * PRIME + Arrays.deepHashCode(this.tags);
        return result;
    }

    @Override
    public boolean equals(Object o) {
        if (o == this) {
            return true;
        }
        if (!(o instanceof Point)) {
            return false;
        }
        Point other = (Point) o;
        if (Integer.compare(this.x, other.x) != 0) {
            return false;
        }
        if (!Arrays.deepEquals(this.tags, other.tags)) {
            return false;
        }
        return true;
    }

    @Override
    public String toString() {
        return "Point(x=" + this.x + ",tags=" + Arrays.deepToString(this.tags) + ")";
    }
}
"#;
        assert_eq!(print(&assemble(&schema)), expected);
    }

    #[test]
    fn objects_import_for_null_checks() {
        let schema = ClassSchema::from_parts(
            "Named",
            None,
            &["name"],
            vec![TypeRef::named("String")],
            GenerationOptions { emit_full_args_constructor: true, ..GenerationOptions::default() },
        )
        .unwrap();
        let src = print(&assemble(&schema));
        assert!(src.starts_with("import java.util.Objects;\n\npublic class Named {\n"));
        assert!(src.contains("        Objects.requireNonNull(name, \"name\");\n        this.name = name;\n"));
    }
}

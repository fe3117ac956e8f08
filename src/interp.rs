//! Reference evaluator for emission trees.
//!
//! Executes constructors and methods of one or more [`ClassEmission`]s over a
//! small JVM-like value model, so the synthesized logic can be checked by
//! running it rather than by reading printed source. Superclass calls land on
//! `Object`: identity equality, identity hash, `Class@hex` rendering.
mod arrays;
pub mod boxed;
pub mod value;

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;

pub use value::{Instance, Value};

use crate::error::EvalError;
use crate::ir::{BinOp, ClassEmission, Expr, Intrinsic, Literal, ObjectMethod, Param, Stmt};
use crate::types::Primitive;

pub type EvalResult<T> = Result<T, EvalError>;

#[derive(Debug, Default)]
pub struct Interpreter<'a> {
    classes: IndexMap<&'a str, &'a ClassEmission>,
}

struct Frame {
    this: Value,
    locals: IndexMap<String, Value>,
}

enum Flow {
    Next,
    Return(Value),
}

impl<'a> Interpreter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class(mut self, class: &'a ClassEmission) -> Self {
        self.register(class);
        self
    }

    pub fn register(&mut self, class: &'a ClassEmission) {
        self.classes.insert(class.name.as_str(), class);
    }

    /// Allocate an instance and run the constructor whose arity matches `args`.
    pub fn construct(&self, class: &str, args: Vec<Value>) -> EvalResult<Value> {
        let emission = self.classes.get(class).ok_or_else(|| EvalError::UnknownClass(class.to_string()))?;
        let ctor = emission.constructor(args.len()).ok_or_else(|| EvalError::NoSuchConstructor {
            class: class.to_string(),
            arity: args.len(),
        })?;
        let fields = emission
            .fields
            .iter()
            .map(|f| (f.name.clone(), Value::default_for(&f.ty)))
            .collect();
        let this = Value::Object(Rc::new(RefCell::new(Instance { class: emission.name.clone(), fields })));
        let mut frame = Frame::new(this.clone(), &ctor.params, args);
        self.run(&mut frame, &ctor.body)?;
        Ok(this)
    }

    /// Virtual dispatch: emitted methods first, then built-in behavior.
    pub fn invoke(&self, receiver: &Value, method: &str, args: Vec<Value>) -> EvalResult<Value> {
        let emitted = match receiver {
            Value::Null => {
                return Err(EvalError::NullPointer(format!("cannot invoke `{method}` on null")));
            }
            Value::Object(obj) => {
                let class = obj.borrow().class.clone();
                self.classes
                    .get(class.as_str())
                    .and_then(|c| c.methods.iter().find(|m| m.name == method && m.params.len() == args.len()))
            }
            _ => None,
        };
        if let Some(m) = emitted {
            let mut frame = Frame::new(receiver.clone(), &m.params, args);
            return self.run(&mut frame, &m.body);
        }

        let object_method = match (method, args.len()) {
            ("equals", 1) => ObjectMethod::Equals,
            ("hashCode", 0) => ObjectMethod::HashCode,
            ("toString", 0) => ObjectMethod::ToString,
            _ => {
                return Err(EvalError::NoSuchMethod {
                    receiver: receiver.describe(),
                    method: method.to_string(),
                    arity: args.len(),
                });
            }
        };
        self.builtin(receiver, object_method, &args)
    }

    pub fn equals(&self, a: &Value, b: &Value) -> EvalResult<bool> {
        expect_bool(self.invoke(a, "equals", vec![b.clone()])?)
    }

    pub fn hash_code(&self, v: &Value) -> EvalResult<i32> {
        expect_int(self.invoke(v, "hashCode", vec![])?)
    }

    /// `String.valueOf(v)`
    pub fn string_of(&self, v: &Value) -> EvalResult<String> {
        if v.is_null() {
            return Ok("null".to_string());
        }
        match self.invoke(v, "toString", vec![])? {
            Value::Str(s) => Ok(s.to_string()),
            Value::Null => Ok("null".to_string()),
            other => Err(mismatch("String", &other)),
        }
    }

    // ---- built-ins ----

    fn builtin(&self, receiver: &Value, method: ObjectMethod, args: &[Value]) -> EvalResult<Value> {
        if let Value::Object(_) | Value::Array(_) = receiver {
            return object_default(receiver, method, args);
        }
        match method {
            ObjectMethod::Equals => {
                let other = args.first().unwrap_or(&Value::Null);
                Ok(Value::Bool(boxed::equals(receiver, other).unwrap_or(false)))
            }
            ObjectMethod::HashCode => boxed::hash(receiver).map(Value::Int).ok_or_else(|| mismatch("value", receiver)),
            ObjectMethod::ToString => {
                boxed::display(receiver).map(|s| Value::str(&s)).ok_or_else(|| mismatch("value", receiver))
            }
        }
    }

    fn intrinsic(&self, op: Intrinsic, args: &[Value]) -> EvalResult<Value> {
        match (op, args) {
            (Intrinsic::Compare(p), [a, b]) => {
                expect_primitive(p, a)?;
                expect_primitive(p, b)?;
                boxed::compare(a, b).map(Value::Int).ok_or_else(|| mismatch(p.keyword(), b))
            }
            (Intrinsic::Hash(p), [a]) => {
                expect_primitive(p, a)?;
                boxed::hash(a).map(Value::Int).ok_or_else(|| mismatch(p.keyword(), a))
            }
            (Intrinsic::ArrayEquals, [a, b]) => self.array_equals(a, b).map(Value::Bool),
            (Intrinsic::ArrayDeepEquals, [a, b]) => self.array_deep_equals(a, b).map(Value::Bool),
            (Intrinsic::ArrayHashCode, [a]) => self.array_hash_code(a).map(Value::Int),
            (Intrinsic::ArrayDeepHashCode, [a]) => self.array_deep_hash_code(a).map(Value::Int),
            (Intrinsic::ArrayToString, [a]) => self.array_to_string(a).map(|s| Value::str(&s)),
            (Intrinsic::ArrayDeepToString, [a]) => self.array_deep_to_string(a).map(|s| Value::str(&s)),
            (Intrinsic::RequireNonNull, [v, rest @ ..]) if rest.len() <= 1 => {
                if !v.is_null() {
                    return Ok(v.clone());
                }
                let message = match rest.first() {
                    Some(m) => self.string_of(m)?,
                    None => "requireNonNull".to_string(),
                };
                Err(EvalError::NullPointer(message))
            }
            _ => Err(EvalError::NoSuchMethod {
                receiver: op.owner().to_string(),
                method: op.method().to_string(),
                arity: args.len(),
            }),
        }
    }

    // ---- execution ----

    fn run(&self, frame: &mut Frame, body: &[Stmt]) -> EvalResult<Value> {
        match self.exec_block(frame, body)? {
            Flow::Return(v) => Ok(v),
            Flow::Next => Ok(Value::Null),
        }
    }

    fn exec_block(&self, frame: &mut Frame, body: &[Stmt]) -> EvalResult<Flow> {
        for stmt in body {
            if let Flow::Return(v) = self.exec(frame, stmt)? {
                return Ok(Flow::Return(v));
            }
        }
        Ok(Flow::Next)
    }

    fn exec(&self, frame: &mut Frame, stmt: &Stmt) -> EvalResult<Flow> {
        match stmt {
            Stmt::Local { name, value, .. } => {
                let v = self.eval(frame, value)?;
                frame.locals.insert(name.clone(), v);
            }
            Stmt::Assign { target, value } => {
                let v = self.eval(frame, value)?;
                self.assign(frame, target, v)?;
            }
            Stmt::If { condition, then } => {
                if expect_bool(self.eval(frame, condition)?)? {
                    return self.exec_block(frame, then);
                }
            }
            Stmt::Return(value) => {
                let v = match value {
                    Some(e) => self.eval(frame, e)?,
                    None => Value::Null,
                };
                return Ok(Flow::Return(v));
            }
            Stmt::Eval(e) => {
                self.eval(frame, e)?;
            }
        }
        Ok(Flow::Next)
    }

    fn assign(&self, frame: &mut Frame, target: &Expr, v: Value) -> EvalResult<()> {
        match target {
            Expr::Local(name) => match frame.locals.get_mut(name) {
                Some(slot) => {
                    *slot = v;
                    Ok(())
                }
                None => Err(EvalError::UnboundLocal(name.clone())),
            },
            Expr::Field { target, name } => match self.eval(frame, target)? {
                Value::Object(obj) => {
                    let mut obj = obj.borrow_mut();
                    let class = obj.class.clone();
                    match obj.fields.get_mut(name) {
                        Some(slot) => {
                            *slot = v;
                            Ok(())
                        }
                        None => Err(EvalError::NoSuchField { class, field: name.clone() }),
                    }
                }
                Value::Null => Err(EvalError::NullPointer(format!("write of field `{name}`"))),
                other => Err(mismatch("object", &other)),
            },
            other => Err(EvalError::InvalidAssignment(crate::codegen::expr(other))),
        }
    }

    fn eval(&self, frame: &mut Frame, e: &Expr) -> EvalResult<Value> {
        match e {
            Expr::Lit(lit) => Ok(match lit {
                Literal::Bool(b) => Value::Bool(*b),
                Literal::Int(i) => Value::Int(*i),
                Literal::Str(s) => Value::str(s),
                Literal::Null => Value::Null,
            }),
            Expr::This => Ok(frame.this.clone()),
            Expr::Local(name) => frame.locals.get(name).cloned().ok_or_else(|| EvalError::UnboundLocal(name.clone())),
            Expr::Field { target, name } => match self.eval(frame, target)? {
                Value::Object(obj) => {
                    let obj = obj.borrow();
                    obj.fields.get(name).cloned().ok_or_else(|| EvalError::NoSuchField {
                        class: obj.class.clone(),
                        field: name.clone(),
                    })
                }
                Value::Null => Err(EvalError::NullPointer(format!("read of field `{name}`"))),
                other => Err(mismatch("object", &other)),
            },
            Expr::Binary { op, lhs, rhs } => {
                let l = self.eval(frame, lhs)?;
                let r = self.eval(frame, rhs)?;
                match op {
                    BinOp::Identical => Ok(Value::Bool(l.identical(&r))),
                    BinOp::NotEqual => Ok(Value::Bool(!l.identical(&r))),
                    BinOp::Add => Ok(Value::Int(expect_int(l)?.wrapping_add(expect_int(r)?))),
                    BinOp::Mul => Ok(Value::Int(expect_int(l)?.wrapping_mul(expect_int(r)?))),
                }
            }
            Expr::Not(inner) => Ok(Value::Bool(!expect_bool(self.eval(frame, inner)?)?)),
            Expr::InstanceOf { expr, class } => {
                let v = self.eval(frame, expr)?;
                Ok(Value::Bool(is_instance(&v, class)))
            }
            Expr::Cast { expr, class } => {
                let v = self.eval(frame, expr)?;
                if v.is_null() || is_instance(&v, class) {
                    Ok(v)
                } else {
                    Err(EvalError::ClassCast { expected: class.clone(), found: v.describe() })
                }
            }
            Expr::Invoke { receiver, method, args } => {
                let receiver = self.eval(frame, receiver)?;
                let args = self.eval_all(frame, args)?;
                self.invoke(&receiver, method.name(), args)
            }
            Expr::InvokeSuper { method, args } => {
                let args = self.eval_all(frame, args)?;
                object_default(&frame.this, *method, &args)
            }
            Expr::Intrinsic { op, args } => {
                let args = self.eval_all(frame, args)?;
                self.intrinsic(*op, &args)
            }
            Expr::Concat(parts) => {
                let mut out = String::new();
                for part in parts {
                    let v = self.eval(frame, part)?;
                    out.push_str(&self.string_of(&v)?);
                }
                Ok(Value::str(&out))
            }
        }
    }

    fn eval_all(&self, frame: &mut Frame, exprs: &[Expr]) -> EvalResult<Vec<Value>> {
        exprs.iter().map(|e| self.eval(frame, e)).collect()
    }
}

impl Frame {
    fn new(this: Value, params: &[Param], args: Vec<Value>) -> Self {
        let locals = params.iter().map(|p| p.name.clone()).zip(args).collect();
        Self { this, locals }
    }
}

/// `java.lang.Object` behavior for references.
fn object_default(receiver: &Value, method: ObjectMethod, args: &[Value]) -> EvalResult<Value> {
    match method {
        ObjectMethod::Equals => Ok(Value::Bool(args.first().is_some_and(|o| receiver.identical(o)))),
        ObjectMethod::HashCode => Ok(Value::Int(receiver.identity_hash())),
        ObjectMethod::ToString => {
            let class = match receiver {
                Value::Array(_) => "[".to_string(),
                other => other.describe(),
            };
            Ok(Value::str(&format!("{class}@{:x}", receiver.identity_hash() as u32)))
        }
    }
}

fn is_instance(v: &Value, class: &str) -> bool {
    match v {
        Value::Object(obj) => obj.borrow().class == class,
        _ => false,
    }
}

fn mismatch(expected: &str, found: &Value) -> EvalError {
    EvalError::TypeMismatch { expected: expected.to_string(), found: found.describe() }
}

fn expect_bool(v: Value) -> EvalResult<bool> {
    match v {
        Value::Bool(b) => Ok(b),
        other => Err(mismatch("boolean", &other)),
    }
}

fn expect_int(v: Value) -> EvalResult<i32> {
    match v {
        Value::Int(i) => Ok(i),
        other => Err(mismatch("int", &other)),
    }
}

fn expect_primitive(p: Primitive, v: &Value) -> EvalResult<()> {
    if v.primitive() == Some(p) { Ok(()) } else { Err(mismatch(p.keyword(), v)) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::assemble;
    use crate::schema::{ClassSchema, GenerationOptions};
    use crate::types::TypeRef;

    fn point() -> ClassEmission {
        let schema = ClassSchema::from_parts(
            "Point",
            None,
            &["x", "label"],
            vec![TypeRef::primitive(Primitive::Int), TypeRef::named("String")],
            GenerationOptions::all(),
        )
        .unwrap();
        assemble(&schema)
    }

    #[test]
    fn constructors_and_accessors() {
        let class = point();
        let interp = Interpreter::new().with_class(&class);

        let p = interp.construct("Point", vec![Value::Int(3), Value::str("a")]).unwrap();
        assert!(matches!(p.field("x"), Some(Value::Int(3))));

        interp.invoke(&p, "setX", vec![Value::Int(7)]).unwrap();
        assert!(matches!(interp.invoke(&p, "getX", vec![]).unwrap(), Value::Int(7)));

        let empty = interp.construct("Point", vec![]).unwrap();
        assert!(matches!(empty.field("x"), Some(Value::Int(0))));
        assert!(matches!(empty.field("label"), Some(Value::Null)));
    }

    #[test]
    fn lookup_failures() {
        let class = point();
        let interp = Interpreter::new().with_class(&class);
        assert_eq!(interp.construct("Nope", vec![]).unwrap_err(), EvalError::UnknownClass("Nope".into()));
        assert_eq!(
            interp.construct("Point", vec![Value::Int(1)]).unwrap_err(),
            EvalError::NoSuchConstructor { class: "Point".into(), arity: 1 }
        );
        let p = interp.construct("Point", vec![]).unwrap();
        assert!(matches!(interp.invoke(&p, "frobnicate", vec![]), Err(EvalError::NoSuchMethod { .. })));
        assert!(matches!(interp.invoke(&Value::Null, "toString", vec![]), Err(EvalError::NullPointer(_))));
    }

    #[test]
    fn object_defaults_without_emitted_methods() {
        let schema = ClassSchema::from_parts(
            "Bare",
            None,
            &["x"],
            vec![TypeRef::primitive(Primitive::Int)],
            GenerationOptions { emit_no_args_constructor: true, ..GenerationOptions::default() },
        )
        .unwrap();
        let class = assemble(&schema);
        let interp = Interpreter::new().with_class(&class);
        let a = interp.construct("Bare", vec![]).unwrap();
        let b = interp.construct("Bare", vec![]).unwrap();
        assert!(interp.equals(&a, &a).unwrap());
        assert!(!interp.equals(&a, &b).unwrap());
        assert!(interp.string_of(&a).unwrap().starts_with("Bare@"));
    }

    #[test]
    fn primitive_field_rejects_wrong_kind() {
        let class = point();
        let interp = Interpreter::new().with_class(&class);
        let a = interp.construct("Point", vec![Value::Long(1), Value::str("a")]).unwrap();
        assert!(matches!(interp.hash_code(&a), Err(EvalError::TypeMismatch { .. })));
    }
}

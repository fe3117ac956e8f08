use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::error::EvalError;
use crate::types::{BaseType, Primitive, TypeRef};

/// Runtime value. Strings, arrays and objects are shared references, so
/// `==` on them is pointer identity.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    /// One UTF-16 code unit, like a JVM `char`.
    Char(u16),
    Str(Rc<str>),
    Array(Rc<Vec<Value>>),
    Object(Rc<RefCell<Instance>>),
}

#[derive(Debug)]
pub struct Instance {
    pub class: String,
    pub fields: IndexMap<String, Value>, // declaration order
}

impl Value {
    pub fn str(s: &str) -> Self {
        Value::Str(Rc::from(s))
    }

    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Rc::new(items))
    }

    /// Zero value a field of this type holds before any constructor runs.
    pub fn default_for(ty: &TypeRef) -> Self {
        if ty.is_array() {
            return Value::Null;
        }
        match &ty.base {
            BaseType::Primitive(Primitive::Boolean) => Value::Bool(false),
            BaseType::Primitive(Primitive::Byte) => Value::Byte(0),
            BaseType::Primitive(Primitive::Short) => Value::Short(0),
            BaseType::Primitive(Primitive::Int) => Value::Int(0),
            BaseType::Primitive(Primitive::Long) => Value::Long(0),
            BaseType::Primitive(Primitive::Float) => Value::Float(0.0),
            BaseType::Primitive(Primitive::Double) => Value::Double(0.0),
            BaseType::Primitive(Primitive::Char) => Value::Char(0),
            BaseType::Named(_) => Value::Null,
        }
    }

    pub fn primitive(&self) -> Option<Primitive> {
        Some(match self {
            Value::Bool(_) => Primitive::Boolean,
            Value::Byte(_) => Primitive::Byte,
            Value::Short(_) => Primitive::Short,
            Value::Int(_) => Primitive::Int,
            Value::Long(_) => Primitive::Long,
            Value::Float(_) => Primitive::Float,
            Value::Double(_) => Primitive::Double,
            Value::Char(_) => Primitive::Char,
            _ => return None,
        })
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short description for error messages.
    pub fn describe(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Str(_) => "String".to_string(),
            Value::Array(_) => "array".to_string(),
            Value::Object(obj) => obj.borrow().class.clone(),
            other => match other.primitive() {
                Some(p) => p.keyword().to_string(),
                None => "value".to_string(),
            },
        }
    }

    /// `==`: value equality on primitives, pointer identity on references.
    pub fn identical(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Byte(a), Value::Byte(b)) => a == b,
            (Value::Short(a), Value::Short(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => Rc::ptr_eq(a, b),
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Address-derived hash, stable for the lifetime of the referent.
    pub fn identity_hash(&self) -> i32 {
        let addr = match self {
            Value::Str(s) => Rc::as_ptr(s) as *const u8 as usize as u64,
            Value::Array(a) => Rc::as_ptr(a) as usize as u64,
            Value::Object(o) => Rc::as_ptr(o) as usize as u64,
            _ => 0,
        };
        (addr ^ (addr >> 32)) as i32
    }

    /// Read a field of an object value.
    pub fn field(&self, name: &str) -> Option<Value> {
        match self {
            Value::Object(obj) => obj.borrow().fields.get(name).cloned(),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

/// Only characters in the Basic Multilingual Plane fit in a `char` value.
impl TryFrom<char> for Value {
    type Error = EvalError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        u16::try_from(u32::from(c)).map(Value::Char).map_err(|_| EvalError::TypeMismatch {
            expected: "char".to_string(),
            found: format!("U+{:X}", u32::from(c)),
        })
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::str(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::array(items.into_iter().map(Into::into).collect())
    }
}

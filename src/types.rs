//! Field types and their semantic categories.
//!
//! A [`TypeRef`] is a language-neutral description of a declared type: a base
//! (primitive or named class) plus an array depth. [`classify`] maps it onto
//! the closed set of [`TypeCategory`] tags that drive every synthesizer.
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::ResolveError;

// ------------------------------ Primitives -------------------------------- //

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Char,
}

impl Primitive {
    pub const ALL: [Primitive; 8] = [
        Primitive::Boolean,
        Primitive::Byte,
        Primitive::Short,
        Primitive::Int,
        Primitive::Long,
        Primitive::Float,
        Primitive::Double,
        Primitive::Char,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            Primitive::Boolean => "boolean",
            Primitive::Byte => "byte",
            Primitive::Short => "short",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
            Primitive::Char => "char",
        }
    }

    /// Name of the wrapper class that owns `compare`/`hashCode` for this primitive.
    pub fn boxed_name(self) -> &'static str {
        match self {
            Primitive::Boolean => "Boolean",
            Primitive::Byte => "Byte",
            Primitive::Short => "Short",
            Primitive::Int => "Integer",
            Primitive::Long => "Long",
            Primitive::Float => "Float",
            Primitive::Double => "Double",
            Primitive::Char => "Character",
        }
    }

    pub fn from_keyword(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.keyword() == s)
    }

    /// JVM descriptor letter, as used in binary array names (`[I`, `[Z`).
    fn from_descriptor(c: char) -> Option<Self> {
        Some(match c {
            'Z' => Primitive::Boolean,
            'B' => Primitive::Byte,
            'S' => Primitive::Short,
            'I' => Primitive::Int,
            'J' => Primitive::Long,
            'F' => Primitive::Float,
            'D' => Primitive::Double,
            'C' => Primitive::Char,
            _ => return None,
        })
    }
}

// ------------------------------- TypeRef ---------------------------------- //

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum BaseType {
    Primitive(Primitive),
    Named(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypeRef {
    pub base: BaseType,
    pub array_depth: usize,
}

impl TypeRef {
    pub fn primitive(p: Primitive) -> Self {
        Self { base: BaseType::Primitive(p), array_depth: 0 }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self { base: BaseType::Named(name.into()), array_depth: 0 }
    }

    /// Wrap in one more array dimension.
    pub fn array(mut self) -> Self {
        self.array_depth += 1;
        self
    }

    pub fn is_array(&self) -> bool {
        self.array_depth > 0
    }

    pub fn as_primitive(&self) -> Option<Primitive> {
        match (&self.base, self.array_depth) {
            (BaseType::Primitive(p), 0) => Some(*p),
            _ => None,
        }
    }

    pub fn category(&self) -> TypeCategory {
        classify(self)
    }

    /// Resolve a human-readable type name.
    ///
    /// Accepts primitive keywords, (qualified, optionally generic) class names
    /// with `[]` suffixes, and JVM binary array names such as `[I` or
    /// `[Ljava.lang.String;`.
    pub fn parse(raw: &str) -> Result<Self, ResolveError> {
        static SOURCE_FORM: Lazy<Regex> = Lazy::new(|| {
            Regex::new(
                r"^(?P<base>[A-Za-z_$][\w$]*(?:\.[A-Za-z_$][\w$]*)*(?:<[\w$.,<>?\[\]\s]*>)?)(?P<dims>(?:\[\])*)$",
            )
            .unwrap()
        });
        static BINARY_FORM: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"^(?P<dims>\[+)(?:(?P<prim>[ZBSIJFDC])|L(?P<class>[A-Za-z_$][\w$]*(?:\.[A-Za-z_$][\w$]*)*);)$")
                .unwrap()
        });

        let unknown = || ResolveError::UnknownType(raw.to_string());
        let name = raw.trim();

        if let Some(caps) = BINARY_FORM.captures(name) {
            let base = match (caps.name("prim"), caps.name("class")) {
                (Some(p), _) => {
                    let c = p.as_str().chars().next().ok_or_else(unknown)?;
                    BaseType::Primitive(Primitive::from_descriptor(c).ok_or_else(unknown)?)
                }
                (None, Some(class)) => BaseType::Named(class.as_str().to_string()),
                (None, None) => return Err(unknown()),
            };
            return Ok(Self { base, array_depth: caps["dims"].len() });
        }

        let caps = SOURCE_FORM.captures(name).ok_or_else(unknown)?;
        let base = &caps["base"];
        let array_depth = caps["dims"].len() / 2;
        let base = match Primitive::from_keyword(base) {
            Some(p) => BaseType::Primitive(p),
            None if base == "void" => return Err(unknown()),
            None => BaseType::Named(base.to_string()),
        };
        Ok(Self { base, array_depth })
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.base {
            BaseType::Primitive(p) => f.write_str(p.keyword())?,
            BaseType::Named(n) => f.write_str(n)?,
        }
        for _ in 0..self.array_depth {
            f.write_str("[]")?;
        }
        Ok(())
    }
}

// ------------------------------ Categories -------------------------------- //

/// Semantic category of a field type. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    /// Any primitive except `char`; carries the primitive so callers can name its wrapper.
    NumericOrBooleanPrimitive(Primitive),
    CharPrimitive,
    /// One-dimensional array of primitives (`int[]`).
    PrimitiveArray,
    /// Any other array, including `int[][]` and `String[]`.
    ObjectArray,
    /// Classes, boxed wrappers, collections, interfaces.
    Reference,
}

/// Total classification over every representable [`TypeRef`].
pub fn classify(ty: &TypeRef) -> TypeCategory {
    match (&ty.base, ty.array_depth) {
        (BaseType::Primitive(Primitive::Char), 0) => TypeCategory::CharPrimitive,
        (BaseType::Primitive(p), 0) => TypeCategory::NumericOrBooleanPrimitive(*p),
        (BaseType::Primitive(_), 1) => TypeCategory::PrimitiveArray,
        (_, 0) => TypeCategory::Reference,
        _ => TypeCategory::ObjectArray,
    }
}

// ------------------------------- Tests ------------------------------------ //

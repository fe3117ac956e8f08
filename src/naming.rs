//! Identifier normalization for class, field, accessor and namespace names.
use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{Primitive, TypeRef};

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());

/// Keywords plus the `true`/`false`/`null` literals.
const RESERVED: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const", "continue",
    "default", "do", "double", "else", "enum", "extends", "false", "final", "finally", "float", "for", "goto",
    "if", "implements", "import", "instanceof", "int", "interface", "long", "native", "new", "null", "package",
    "private", "protected", "public", "return", "short", "static", "strictfp", "super", "switch",
    "synchronized", "this", "throw", "throws", "transient", "true", "try", "void", "volatile", "while", "_",
];

pub fn is_reserved(s: &str) -> bool {
    RESERVED.contains(&s)
}

/// Legal Java identifier: the right characters and not a reserved word.
pub fn is_identifier(s: &str) -> bool {
    IDENTIFIER.is_match(s) && !is_reserved(s)
}

/// `/` and `\` separated paths become dotted namespaces.
pub fn package_name(name: &str) -> String {
    name.replace(['/', '\\'], ".")
}

/// `testClass` → `TestClass`, `_test_class_` → `TestClass`.
pub fn capitalize_camel_case(name: &str) -> String {
    if name.contains('_') {
        capitalize(&screaming_to_camel_case(name))
    } else {
        capitalize(name)
    }
}

/// `TestClass` → `testClass`, `_test_class_` → `testClass`.
pub fn decapitalize_camel_case(name: &str) -> String {
    if name.contains('_') {
        decapitalize(&screaming_to_camel_case(name))
    } else {
        decapitalize(name)
    }
}

pub fn setter_name(field: &str) -> String {
    format!("set{}", capitalize(field))
}

/// `is` prefix only for a scalar `boolean`; `Boolean` and `boolean[]` use `get`.
pub fn getter_name(ty: &TypeRef, field: &str) -> String {
    match ty.as_primitive() {
        Some(Primitive::Boolean) => format!("is{}", capitalize(field)),
        _ => format!("get{}", capitalize(field)),
    }
}

pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn screaming_to_camel_case(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .enumerate()
        .map(|(i, part)| {
            let lower = part.to_lowercase();
            if i == 0 { lower } else { capitalize(&lower) }
        })
        .collect()
}

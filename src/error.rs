//! Error types for schema construction and type-name resolution.
//!
//! Everything here is raised before an emission tree exists; once a
//! [`ClassSchema`](crate::schema::ClassSchema) is built, assembly cannot fail.
use thiserror::Error;

/// A class schema violated one of its construction-time invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("class name must not be empty")]
    EmptyClassName,

    #[error("namespace must not be empty when given")]
    EmptyNamespace,

    #[error("a class needs at least one field")]
    EmptyFieldList,

    #[error("field name at position {index} is empty")]
    EmptyFieldName { index: usize },

    #[error("got {names} field names but {types} field types")]
    FieldCountMismatch { names: usize, types: usize },

    #[error("field `{0}` is declared more than once")]
    DuplicateField(String),

    #[error("`{0}` is not a valid identifier")]
    InvalidIdentifier(String),

    #[error("hash prime must be positive, got {0}")]
    NonPositivePrime(i32),

    #[error("field separator must not be empty")]
    EmptySeparator,
}

/// A human-readable type name could not be turned into a [`TypeRef`](crate::types::TypeRef).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("type {0} does not exist")]
    UnknownType(String),
}

/// Failure while loading a JSON schema file.
#[derive(Debug, Error)]
pub enum SchemaFileError {
    #[error("at JSON path {path} → {message}")]
    Json { path: String, message: String },

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Runtime failure while executing an emission tree in the [`interp`](crate::interp) evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("null dereference: {0}")]
    NullPointer(String),

    #[error("cannot cast {found} to {expected}")]
    ClassCast { expected: String, found: String },

    #[error("unknown class `{0}`")]
    UnknownClass(String),

    #[error("`{class}` has no constructor taking {arity} arguments")]
    NoSuchConstructor { class: String, arity: usize },

    #[error("{receiver} has no method `{method}` taking {arity} arguments")]
    NoSuchMethod { receiver: String, method: String, arity: usize },

    #[error("`{class}` has no field `{field}`")]
    NoSuchField { class: String, field: String },

    #[error("unbound local `{0}`")]
    UnboundLocal(String),

    #[error("expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("`{0}` is not assignable")]
    InvalidAssignment(String),
}

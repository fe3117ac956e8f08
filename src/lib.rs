//! Synthesis of plain data classes (POJOs) from a class schema.
//!
//! A [`ClassSchema`] (name, optional namespace, ordered typed fields and
//! [`GenerationOptions`]) is turned by [`assemble`] into a structural
//! [`ClassEmission`] tree. [`codegen::print`] renders that tree as source text;
//! [`interp::Interpreter`] executes it.
pub mod assemble;
pub mod cli;
pub mod codegen;
pub mod error;
pub mod interp;
pub mod ir;
pub mod naming;
pub mod path_de;
pub mod schema;
pub mod synth;
pub mod types;

use std::sync::Once;

pub use assemble::assemble;
pub use error::{EvalError, ResolveError, SchemaError, SchemaFileError};
pub use ir::ClassEmission;
pub use schema::{ClassSchema, FieldDescriptor, GenerationOptions, SchemaFile};
pub use types::{Primitive, TypeCategory, TypeRef, classify};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber when `RUST_LOG` is set, e.g.
/// `RUST_LOG=pojo_synth=debug`. Later calls are no-ops.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

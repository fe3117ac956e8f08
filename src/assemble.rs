//! Class assembly: schema in, complete emission tree out.
//!
//! `assemble` cannot fail. Every precondition is a [`ClassSchema`]
//! construction invariant.
use crate::ir::{
    ClassEmission, ConstructorEmission, Expr, FieldDecl, Intrinsic, MethodEmission, Param, Stmt,
};
use crate::naming;
use crate::schema::{ClassSchema, FieldDescriptor};
use crate::synth;
use crate::types::TypeCategory;

/// Member order: fields, no-args ctor, full-args ctor, accessor pairs,
/// `hashCode`, `equals`, `toString`.
#[tracing::instrument(level = "debug", skip_all, fields(class = schema.name(), fields = schema.fields().len()))]
pub fn assemble(schema: &ClassSchema) -> ClassEmission {
    let options = schema.options();
    let fields = schema.fields();

    let mut constructors = Vec::new();
    if options.emit_no_args_constructor {
        constructors.push(ConstructorEmission { params: vec![], body: vec![] });
    }
    if options.emit_full_args_constructor {
        constructors.push(full_args_constructor(fields));
    }

    let mut methods: Vec<MethodEmission> = fields.iter().flat_map(accessors).collect();

    if options.emit_equals_and_hash_code {
        methods.push(synth::synthesize_hash_code(fields, options.hash_prime, options.call_super));
        methods.push(synth::synthesize_equals(schema.name(), fields, options.call_super));
    }
    if options.emit_to_string {
        methods.push(synth::synthesize_to_string(
            schema.name(),
            fields,
            options.call_super,
            options.include_field_names_in_to_string,
            &options.field_separator,
        ));
    }

    tracing::debug!(
        constructors = constructors.len(),
        methods = methods.len(),
        "assembled class"
    );

    ClassEmission {
        namespace: schema.namespace().map(str::to_string),
        name: schema.name().to_string(),
        fields: fields.iter().map(|f| FieldDecl { name: f.name.clone(), ty: f.ty.clone() }).collect(),
        constructors,
        methods,
    }
}

/// Null checks for reference parameters first, then every assignment, so a
/// rejected argument leaves no field written.
fn full_args_constructor(fields: &[FieldDescriptor]) -> ConstructorEmission {
    let params = fields.iter().map(|f| Param { name: f.name.clone(), ty: f.ty.clone() }).collect();

    let checks = fields
        .iter()
        .filter(|f| f.category() == TypeCategory::Reference)
        .map(|f| {
            Stmt::Eval(Expr::intrinsic(
                Intrinsic::RequireNonNull,
                vec![Expr::local(&f.name), Expr::str(&f.name)],
            ))
        });
    let assignments = fields.iter().map(|f| Stmt::Assign {
        target: Expr::this_field(&f.name),
        value: Expr::local(&f.name),
    });

    ConstructorEmission { params, body: checks.chain(assignments).collect() }
}

/// Setter then getter.
fn accessors(field: &FieldDescriptor) -> [MethodEmission; 2] {
    let setter = MethodEmission {
        name: naming::setter_name(&field.name),
        returns: None,
        params: vec![Param { name: field.name.clone(), ty: field.ty.clone() }],
        body: vec![Stmt::Assign { target: Expr::this_field(&field.name), value: Expr::local(&field.name) }],
        overrides: false,
    };
    let getter = MethodEmission {
        name: naming::getter_name(&field.ty, &field.name),
        returns: Some(field.ty.clone()),
        params: vec![],
        body: vec![Stmt::Return(Some(Expr::this_field(&field.name)))],
        overrides: false,
    };
    [setter, getter]
}

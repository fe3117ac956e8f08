use crate::ir::{BinOp, Expr, Intrinsic, MethodEmission, ObjectMethod, Stmt};
use crate::schema::FieldDescriptor;
use crate::types::{Primitive, TypeCategory, TypeRef};

pub const PRIME: &str = "PRIME";
pub const RESULT: &str = "result";

/// Build `int hashCode()` as a polynomial accumulator over the fields.
///
/// ```text
/// final int PRIME = <hash_prime>;
/// int result = 1;
/// result = result * PRIME + super.hashCode();   // call_super only
/// result = result * PRIME + <field hash>;       // per field
/// return result;
/// ```
pub fn synthesize_hash_code(fields: &[FieldDescriptor], hash_prime: i32, call_super: bool) -> MethodEmission {
    super::debug_assert_fields(fields);
    debug_assert!(hash_prime > 0, "hash prime must be positive");
    tracing::trace!(fields = fields.len(), hash_prime, call_super, "synthesizing hashCode");

    let int = TypeRef::primitive(Primitive::Int);
    let mut body = Vec::with_capacity(fields.len() + 4);

    body.push(Stmt::Local {
        name: PRIME.to_string(),
        ty: int.clone(),
        value: Expr::int(hash_prime),
        constant: true,
    });
    body.push(Stmt::Local { name: RESULT.to_string(), ty: int.clone(), value: Expr::int(1), constant: false });

    if call_super {
        body.push(accumulate(Expr::InvokeSuper { method: ObjectMethod::HashCode, args: vec![] }));
    }
    for field in fields {
        body.push(accumulate(field_hash(field)));
    }
    body.push(Stmt::Return(Some(Expr::local(RESULT))));

    MethodEmission {
        name: ObjectMethod::HashCode.name().to_string(),
        returns: Some(int),
        params: vec![],
        body,
        overrides: true,
    }
}

/// `result = result * PRIME + <term>`
fn accumulate(term: Expr) -> Stmt {
    Stmt::Assign {
        target: Expr::local(RESULT),
        value: Expr::binary(
            BinOp::Add,
            Expr::binary(BinOp::Mul, Expr::local(RESULT), Expr::local(PRIME)),
            term,
        ),
    }
}

fn field_hash(field: &FieldDescriptor) -> Expr {
    let value = Expr::this_field(&field.name);
    match field.category() {
        TypeCategory::NumericOrBooleanPrimitive(p) => Expr::intrinsic(Intrinsic::Hash(p), vec![value]),
        TypeCategory::CharPrimitive => Expr::intrinsic(Intrinsic::Hash(Primitive::Char), vec![value]),
        TypeCategory::PrimitiveArray => Expr::intrinsic(Intrinsic::ArrayHashCode, vec![value]),
        TypeCategory::ObjectArray => Expr::intrinsic(Intrinsic::ArrayDeepHashCode, vec![value]),
        TypeCategory::Reference => Expr::invoke(value, ObjectMethod::HashCode, vec![]),
    }
}

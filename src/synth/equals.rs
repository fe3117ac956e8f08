use crate::ir::{BinOp, Expr, Intrinsic, MethodEmission, ObjectMethod, Param, Stmt};
use crate::schema::FieldDescriptor;
use crate::types::{Primitive, TypeCategory, TypeRef};

/// Name of the `Object` parameter.
pub const PARAM: &str = "o";
/// Name of the narrowed local.
pub const OTHER: &str = "other";

/// Build `boolean equals(Object o)`.
///
/// Identity short-circuit, `instanceof` guard, narrowing cast, optional
/// `super.equals`, then one early `return false` per field in schema order.
pub fn synthesize_equals(class_name: &str, fields: &[FieldDescriptor], call_super: bool) -> MethodEmission {
    super::debug_assert_fields(fields);
    tracing::trace!(class = class_name, fields = fields.len(), call_super, "synthesizing equals");

    let mut body = Vec::with_capacity(fields.len() + 5);

    body.push(Stmt::return_if(
        Expr::binary(BinOp::Identical, Expr::local(PARAM), Expr::This),
        true,
    ));
    body.push(Stmt::return_if(
        Expr::not(Expr::InstanceOf {
            expr: Box::new(Expr::local(PARAM)),
            class: class_name.to_string(),
        }),
        false,
    ));
    body.push(Stmt::Local {
        name: OTHER.to_string(),
        ty: TypeRef::named(class_name),
        value: Expr::Cast { expr: Box::new(Expr::local(PARAM)), class: class_name.to_string() },
        constant: false,
    });
    if call_super {
        body.push(Stmt::return_if(
            Expr::not(Expr::InvokeSuper {
                method: ObjectMethod::Equals,
                args: vec![Expr::local(PARAM)],
            }),
            false,
        ));
    }
    for field in fields {
        body.push(Stmt::return_if(field_differs(field), false));
    }
    body.push(Stmt::Return(Some(Expr::bool(true))));

    MethodEmission {
        name: ObjectMethod::Equals.name().to_string(),
        returns: Some(TypeRef::primitive(Primitive::Boolean)),
        params: vec![Param { name: PARAM.to_string(), ty: TypeRef::named("Object") }],
        body,
        overrides: true,
    }
}

/// Condition that holds when `this.<field>` and `other.<field>` are NOT equal.
fn field_differs(field: &FieldDescriptor) -> Expr {
    let mine = Expr::this_field(&field.name);
    let theirs = Expr::field(Expr::local(OTHER), &field.name);
    match field.category() {
        TypeCategory::NumericOrBooleanPrimitive(p) => compare_nonzero(p, mine, theirs),
        TypeCategory::CharPrimitive => compare_nonzero(Primitive::Char, mine, theirs),
        TypeCategory::PrimitiveArray => Expr::not(Expr::intrinsic(Intrinsic::ArrayEquals, vec![mine, theirs])),
        TypeCategory::ObjectArray => Expr::not(Expr::intrinsic(Intrinsic::ArrayDeepEquals, vec![mine, theirs])),
        TypeCategory::Reference => Expr::not(Expr::invoke(mine, ObjectMethod::Equals, vec![theirs])),
    }
}

fn compare_nonzero(p: Primitive, mine: Expr, theirs: Expr) -> Expr {
    Expr::binary(
        BinOp::NotEqual,
        Expr::intrinsic(Intrinsic::Compare(p), vec![mine, theirs]),
        Expr::int(0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("count", TypeRef::primitive(Primitive::Int)),
            FieldDescriptor::new("initial", TypeRef::primitive(Primitive::Char)),
            FieldDescriptor::new("samples", TypeRef::primitive(Primitive::Double).array()),
            FieldDescriptor::new("grid", TypeRef::named("Double").array().array()),
            FieldDescriptor::new("label", TypeRef::named("String")),
        ]
    }

    fn field_condition(stmt: &Stmt) -> &Expr {
        match stmt {
            Stmt::If { condition, then } => {
                assert_eq!(then, &vec![Stmt::Return(Some(Expr::bool(false)))]);
                condition
            }
            other => panic!("expected if, got {other:?}"),
        }
    }

    #[test]
    fn prologue_order() {
        let m = synthesize_equals("Test", &fields(), false);
        assert_eq!(m.name, "equals");
        assert_eq!(m.params[0].name, "o");
        assert_eq!(
            m.body[0],
            Stmt::return_if(Expr::binary(BinOp::Identical, Expr::local("o"), Expr::This), true)
        );
        assert!(matches!(
            &m.body[1],
            Stmt::If { condition: Expr::Not(inner), .. }
                if matches!(inner.as_ref(), Expr::InstanceOf { class, .. } if class == "Test")
        ));
        assert!(matches!(&m.body[2], Stmt::Local { name, value: Expr::Cast { .. }, .. } if name == "other"));
        assert_eq!(m.body.last(), Some(&Stmt::Return(Some(Expr::bool(true)))));
        // 3 prologue + 5 fields + final return
        assert_eq!(m.body.len(), 9);
    }

    #[test]
    fn super_check_follows_cast() {
        let m = synthesize_equals("Test", &fields(), true);
        assert_eq!(m.body.len(), 10);
        assert!(matches!(
            field_condition(&m.body[3]),
            Expr::Not(inner) if matches!(inner.as_ref(), Expr::InvokeSuper { method: ObjectMethod::Equals, .. })
        ));
    }

    #[test]
    fn per_category_conditions() {
        let m = synthesize_equals("Test", &fields(), false);
        let conds: Vec<&Expr> = m.body[3..8].iter().map(field_condition).collect();

        assert!(matches!(
            conds[0],
            Expr::Binary { op: BinOp::NotEqual, lhs, .. }
                if matches!(lhs.as_ref(), Expr::Intrinsic { op: Intrinsic::Compare(Primitive::Int), .. })
        ));
        assert!(matches!(
            conds[1],
            Expr::Binary { lhs, .. }
                if matches!(lhs.as_ref(), Expr::Intrinsic { op: Intrinsic::Compare(Primitive::Char), .. })
        ));
        assert_eq!(
            conds[2],
            &Expr::not(Expr::intrinsic(
                Intrinsic::ArrayEquals,
                vec![Expr::this_field("samples"), Expr::field(Expr::local("other"), "samples")]
            ))
        );
        assert!(matches!(
            conds[3],
            Expr::Not(inner) if matches!(inner.as_ref(), Expr::Intrinsic { op: Intrinsic::ArrayDeepEquals, .. })
        ));
        assert_eq!(
            conds[4],
            &Expr::not(Expr::invoke(
                Expr::this_field("label"),
                ObjectMethod::Equals,
                vec![Expr::field(Expr::local("other"), "label")]
            ))
        );
    }
}

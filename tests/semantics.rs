//! Behavior of synthesized classes, checked by running them in the evaluator.

use pojo_synth::interp::{Interpreter, Value};
use pojo_synth::{ClassEmission, ClassSchema, EvalError, GenerationOptions, Primitive, TypeRef, assemble};
use pretty_assertions::assert_eq;

fn build(name: &str, fields: &[(&str, TypeRef)], options: GenerationOptions) -> ClassEmission {
    let names: Vec<&str> = fields.iter().map(|(n, _)| *n).collect();
    let types = fields.iter().map(|(_, t)| t.clone()).collect();
    assemble(&ClassSchema::from_parts(name, None, &names, types, options).unwrap())
}

fn int() -> TypeRef {
    TypeRef::primitive(Primitive::Int)
}

fn ab() -> ClassEmission {
    build("Test", &[("a", int()), ("b", int())], GenerationOptions::all())
}

fn mixed() -> ClassEmission {
    build(
        "Sample",
        &[
            ("count", int()),
            ("ratio", TypeRef::primitive(Primitive::Double)),
            ("initial", TypeRef::primitive(Primitive::Char)),
            ("label", TypeRef::named("String")),
            ("values", int().array()),
            ("grid", TypeRef::named("String").array().array()),
        ],
        GenerationOptions::all(),
    )
}

fn sample(interp: &Interpreter<'_>, count: i32, values: Vec<i32>) -> Value {
    interp
        .construct(
            "Sample",
            vec![
                Value::Int(count),
                Value::Double(0.5),
                Value::Char(u16::from(b'q')),
                Value::str("label"),
                Value::from(values),
                Value::array(vec![Value::from(vec!["a", "b"]), Value::from(vec!["c"])]),
            ],
        )
        .unwrap()
}

#[test]
fn equals_is_reflexive_and_consistent_with_hash() {
    let class = mixed();
    let interp = Interpreter::new().with_class(&class);
    let x = sample(&interp, 7, vec![1, 2, 3]);
    let y = sample(&interp, 7, vec![1, 2, 3]);

    assert!(interp.equals(&x, &x).unwrap());
    assert!(interp.equals(&x, &y).unwrap());
    assert!(interp.equals(&y, &x).unwrap());
    assert_eq!(interp.hash_code(&x).unwrap(), interp.hash_code(&y).unwrap());
}

#[test]
fn equals_rejects_null_and_unrelated_types() {
    let class = mixed();
    let other = ab();
    let interp = Interpreter::new().with_class(&class).with_class(&other);
    let x = sample(&interp, 7, vec![1]);
    let t = interp.construct("Test", vec![Value::Int(7), Value::Int(1)]).unwrap();

    assert!(!interp.equals(&x, &Value::Null).unwrap());
    assert!(!interp.equals(&x, &Value::str("Sample")).unwrap());
    assert!(!interp.equals(&x, &t).unwrap());
}

#[test]
fn array_fields_compare_by_content_and_order() {
    let class = mixed();
    let interp = Interpreter::new().with_class(&class);
    let x = sample(&interp, 1, vec![1, 2, 3]);
    let same = sample(&interp, 1, vec![1, 2, 3]);
    let reordered = sample(&interp, 1, vec![3, 2, 1]);

    assert!(interp.equals(&x, &same).unwrap());
    assert!(!interp.equals(&x, &reordered).unwrap());
}

#[test]
fn nested_arrays_compare_deeply() {
    let class = build("Grid", &[("cells", int().array().array())], GenerationOptions::all());
    let interp = Interpreter::new().with_class(&class);
    let make = |rows: Vec<Vec<i32>>| {
        let rows = rows.into_iter().map(Value::from).collect();
        interp.construct("Grid", vec![Value::array(rows)]).unwrap()
    };
    let x = make(vec![vec![1, 2], vec![3]]);
    let y = make(vec![vec![1, 2], vec![3]]);
    let z = make(vec![vec![1], vec![2, 3]]);

    assert!(interp.equals(&x, &y).unwrap());
    assert_eq!(interp.hash_code(&x).unwrap(), interp.hash_code(&y).unwrap());
    assert!(!interp.equals(&x, &z).unwrap());
    assert_eq!(interp.string_of(&x).unwrap(), "Grid(cells=[[1, 2], [3]])");
}

#[test]
fn hash_follows_prime_accumulation() {
    let class = ab();
    let interp = Interpreter::new().with_class(&class);
    let t = interp.construct("Test", vec![Value::Int(1), Value::Int(2)]).unwrap();
    // ((1 * 59) + 1) * 59 + 2
    assert_eq!(interp.hash_code(&t).unwrap(), 3542);

    let options = GenerationOptions { hash_prime: 31, ..GenerationOptions::all() };
    let class31 = build("Test", &[("a", int()), ("b", int())], options);
    let interp31 = Interpreter::new().with_class(&class31);
    let t31 = interp31.construct("Test", vec![Value::Int(1), Value::Int(2)]).unwrap();
    // ((1 * 31) + 1) * 31 + 2
    assert_eq!(interp31.hash_code(&t31).unwrap(), 994);
}

#[test]
fn to_string_layouts() {
    let class = ab();
    let interp = Interpreter::new().with_class(&class);
    let t = interp.construct("Test", vec![Value::Int(1), Value::Int(2)]).unwrap();
    assert_eq!(interp.string_of(&t).unwrap(), "Test(a=1,b=2)");

    let single = build("Test", &[("a", int())], GenerationOptions::all());
    let interp = Interpreter::new().with_class(&single);
    let t = interp.construct("Test", vec![Value::Int(1)]).unwrap();
    assert_eq!(interp.string_of(&t).unwrap(), "Test(a=1)");

    let options = GenerationOptions {
        include_field_names_in_to_string: false,
        field_separator: ", ".to_string(),
        ..GenerationOptions::all()
    };
    let bare = build("Test", &[("a", int()), ("b", TypeRef::named("String"))], options);
    let interp = Interpreter::new().with_class(&bare);
    let t = interp.construct("Test", vec![Value::Int(1), Value::str("x")]).unwrap();
    assert_eq!(interp.string_of(&t).unwrap(), "Test(1, x)");
}

#[test]
fn full_args_constructor_rejects_null_references() {
    let class = mixed();
    let interp = Interpreter::new().with_class(&class);
    let err = interp
        .construct(
            "Sample",
            vec![
                Value::Int(1),
                Value::Double(0.0),
                Value::Char(u16::from(b'a')),
                Value::Null,
                Value::Null,
                Value::Null,
            ],
        )
        .unwrap_err();
    assert_eq!(err, EvalError::NullPointer("label".to_string()));
}

#[test]
fn floating_fields_follow_boxed_compare() {
    let class = build("Measure", &[("v", TypeRef::primitive(Primitive::Double))], GenerationOptions::all());
    let interp = Interpreter::new().with_class(&class);
    let make = |v: f64| interp.construct("Measure", vec![Value::Double(v)]).unwrap();

    assert!(interp.equals(&make(f64::NAN), &make(f64::NAN)).unwrap());
    assert!(!interp.equals(&make(0.0), &make(-0.0)).unwrap());
    assert_eq!(interp.string_of(&make(-0.0)).unwrap(), "Measure(v=-0.0)");
}

#[test]
fn call_super_chains_to_object_identity() {
    let options = GenerationOptions { call_super: true, ..GenerationOptions::all() };
    let class = build("Test", &[("a", int())], options);
    let interp = Interpreter::new().with_class(&class);
    let x = interp.construct("Test", vec![Value::Int(1)]).unwrap();
    let y = interp.construct("Test", vec![Value::Int(1)]).unwrap();

    assert!(interp.equals(&x, &x).unwrap());
    assert!(!interp.equals(&x, &y).unwrap());
    assert!(interp.string_of(&x).unwrap().starts_with("Test(super=Test@"));
}

#[test]
fn accessors_round_trip_and_boolean_getter_uses_is() {
    let class = build(
        "Flagged",
        &[("on", TypeRef::primitive(Primitive::Boolean)), ("boxed", TypeRef::named("Boolean"))],
        GenerationOptions::all(),
    );
    assert!(class.method("isOn").is_some());
    assert!(class.method("getBoxed").is_some());

    let interp = Interpreter::new().with_class(&class);
    let x = interp.construct("Flagged", vec![]).unwrap();
    interp.invoke(&x, "setOn", vec![Value::Bool(true)]).unwrap();
    assert!(matches!(interp.invoke(&x, "isOn", vec![]).unwrap(), Value::Bool(true)));
    assert!(matches!(interp.invoke(&x, "getBoxed", vec![]).unwrap(), Value::Null));
}

#[test]
fn self_comparison_short_circuits_before_null_fields() {
    let class = mixed();
    let interp = Interpreter::new().with_class(&class);
    let x = interp.construct("Sample", vec![]).unwrap();
    let y = interp.construct("Sample", vec![]).unwrap();

    assert_eq!(interp.equals(&x, &x), Ok(true));
    assert!(matches!(interp.equals(&x, &y), Err(EvalError::NullPointer(_))));
}

#[test]
fn signed_zeros_in_array_fields_are_unequal() {
    let cases = [
        (TypeRef::primitive(Primitive::Double).array(), Value::from(vec![0.0]), Value::from(vec![-0.0])),
        (TypeRef::named("Double").array(), Value::from(vec![0.0]), Value::from(vec![-0.0])),
        (
            TypeRef::primitive(Primitive::Double).array().array(),
            Value::array(vec![Value::from(vec![0.0])]),
            Value::array(vec![Value::from(vec![-0.0])]),
        ),
    ];
    for (ty, pos, neg) in cases {
        let label = ty.to_string();
        let class = build("Holder", &[("xs", ty)], GenerationOptions::all());
        let interp = Interpreter::new().with_class(&class);
        let a = interp.construct("Holder", vec![pos]).unwrap();
        let b = interp.construct("Holder", vec![neg]).unwrap();

        assert!(!interp.equals(&a, &b).unwrap(), "{label}");
        assert_ne!(interp.hash_code(&a).unwrap(), interp.hash_code(&b).unwrap(), "{label}");
    }
}

use crate::ir::{Expr, Intrinsic, MethodEmission, ObjectMethod, Stmt};
use crate::schema::FieldDescriptor;
use crate::types::{TypeCategory, TypeRef};

/// Build `String toString()` rendering `Name(super=..,a=..,b=..)`.
///
/// Literal text between values is merged, and a separator is appended after
/// every segment. Exactly one separator occurrence (its full length) is cut
/// before the closing `)`.
pub fn synthesize_to_string(
    class_name: &str,
    fields: &[FieldDescriptor],
    call_super: bool,
    include_field_names: bool,
    separator: &str,
) -> MethodEmission {
    super::debug_assert_fields(fields);
    debug_assert!(!separator.is_empty(), "separator must not be empty");
    tracing::trace!(class = class_name, fields = fields.len(), call_super, include_field_names, "synthesizing toString");

    let mut parts = Parts::new(format!("{class_name}("));

    if call_super {
        if include_field_names {
            parts.text("super=");
        }
        parts.value(Expr::InvokeSuper { method: ObjectMethod::ToString, args: vec![] });
        parts.text(separator);
    }
    for field in fields {
        if include_field_names {
            parts.text(&field.name);
            parts.text("=");
        }
        parts.value(render(field));
        parts.text(separator);
    }
    parts.trim_end(separator);
    parts.text(")");

    MethodEmission {
        name: ObjectMethod::ToString.name().to_string(),
        returns: Some(TypeRef::named("String")),
        params: vec![],
        body: vec![Stmt::Return(Some(Expr::Concat(parts.finish())))],
        overrides: true,
    }
}

fn render(field: &FieldDescriptor) -> Expr {
    let value = Expr::this_field(&field.name);
    match field.category() {
        TypeCategory::PrimitiveArray => Expr::intrinsic(Intrinsic::ArrayToString, vec![value]),
        TypeCategory::ObjectArray => Expr::intrinsic(Intrinsic::ArrayDeepToString, vec![value]),
        _ => value,
    }
}

/// Concatenation operands with a pending literal that absorbs adjacent text.
struct Parts {
    done: Vec<Expr>,
    pending: String,
}

impl Parts {
    fn new(prefix: String) -> Self {
        Self { done: Vec::new(), pending: prefix }
    }

    fn text(&mut self, s: &str) {
        self.pending.push_str(s);
    }

    fn value(&mut self, e: Expr) {
        self.flush();
        self.done.push(e);
    }

    fn trim_end(&mut self, separator: &str) {
        debug_assert!(self.pending.ends_with(separator));
        let keep = self.pending.len() - separator.len();
        self.pending.truncate(keep);
    }

    fn flush(&mut self) {
        if !self.pending.is_empty() {
            self.done.push(Expr::str(std::mem::take(&mut self.pending)));
        }
    }

    fn finish(mut self) -> Vec<Expr> {
        self.flush();
        self.done
    }
}

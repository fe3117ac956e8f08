//! `java.util.Arrays` helpers. Shallow variants treat nested arrays as opaque
//! references; deep variants recurse into them.
use super::value::Value;
use super::{EvalResult, Interpreter, boxed};
use crate::error::EvalError;

fn elements<'v>(v: &'v Value, what: &str) -> EvalResult<Option<&'v [Value]>> {
    match v {
        Value::Null => Ok(None),
        Value::Array(items) => Ok(Some(items.as_slice())),
        other => Err(EvalError::TypeMismatch { expected: what.to_string(), found: other.describe() }),
    }
}

impl Interpreter<'_> {
    /// `Objects.equals(a, b)`. Primitive elements compare through their
    /// wrapper's `equals`, so `0.0` and `-0.0` differ and `NaN` matches `NaN`.
    pub(super) fn objects_equal(&self, a: &Value, b: &Value) -> EvalResult<bool> {
        if a.primitive().is_some() {
            return Ok(boxed::equals(a, b) == Some(true));
        }
        if a.identical(b) {
            return Ok(true);
        }
        if a.is_null() {
            return Ok(false);
        }
        self.equals(a, b)
    }

    pub(super) fn array_equals(&self, a: &Value, b: &Value) -> EvalResult<bool> {
        match (elements(a, "array")?, elements(b, "array")?) {
            (None, None) => Ok(true),
            (Some(xs), Some(ys)) if xs.len() == ys.len() => {
                for (x, y) in xs.iter().zip(ys) {
                    if !self.objects_equal(x, y)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    pub(super) fn array_deep_equals(&self, a: &Value, b: &Value) -> EvalResult<bool> {
        if a.identical(b) {
            return Ok(true);
        }
        match (elements(a, "array")?, elements(b, "array")?) {
            (Some(xs), Some(ys)) if xs.len() == ys.len() => {
                for (x, y) in xs.iter().zip(ys) {
                    let same = match (x, y) {
                        (Value::Array(_), Value::Array(_)) => self.array_deep_equals(x, y)?,
                        _ => self.objects_equal(x, y)?,
                    };
                    if !same {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    pub(super) fn array_hash_code(&self, v: &Value) -> EvalResult<i32> {
        let Some(items) = elements(v, "array")? else {
            return Ok(0);
        };
        let mut result = 1i32;
        for item in items {
            let h = if item.is_null() { 0 } else { self.hash_code(item)? };
            result = result.wrapping_mul(31).wrapping_add(h);
        }
        Ok(result)
    }

    pub(super) fn array_deep_hash_code(&self, v: &Value) -> EvalResult<i32> {
        let Some(items) = elements(v, "array")? else {
            return Ok(0);
        };
        let mut result = 1i32;
        for item in items {
            let h = match item {
                Value::Null => 0,
                Value::Array(_) => self.array_deep_hash_code(item)?,
                _ => self.hash_code(item)?,
            };
            result = result.wrapping_mul(31).wrapping_add(h);
        }
        Ok(result)
    }

    pub(super) fn array_to_string(&self, v: &Value) -> EvalResult<String> {
        let Some(items) = elements(v, "array")? else {
            return Ok("null".to_string());
        };
        let rendered = items.iter().map(|item| self.string_of(item)).collect::<EvalResult<Vec<_>>>()?;
        Ok(format!("[{}]", rendered.join(", ")))
    }

    pub(super) fn array_deep_to_string(&self, v: &Value) -> EvalResult<String> {
        let Some(items) = elements(v, "array")? else {
            return Ok("null".to_string());
        };
        let rendered = items
            .iter()
            .map(|item| match item {
                Value::Array(_) => self.array_deep_to_string(item),
                _ => self.string_of(item),
            })
            .collect::<EvalResult<Vec<_>>>()?;
        Ok(format!("[{}]", rendered.join(", ")))
    }
}

//! Wrapper-class semantics: `compare`, `hashCode`, `equals` and `toString`
//! for primitives and strings, matching the JVM bit for bit.
use super::value::Value;

const CANONICAL_NAN_F64: i64 = 0x7ff8_0000_0000_0000;
const CANONICAL_NAN_F32: i32 = 0x7fc0_0000;

/// `doubleToLongBits`: every NaN collapses to one pattern.
fn double_bits(d: f64) -> i64 {
    if d.is_nan() { CANONICAL_NAN_F64 } else { d.to_bits() as i64 }
}

/// `floatToIntBits`
fn float_bits(f: f32) -> i32 {
    if f.is_nan() { CANONICAL_NAN_F32 } else { f.to_bits() as i32 }
}

fn sign(ord: std::cmp::Ordering) -> i32 {
    ord as i32
}

pub fn compare_f64(a: f64, b: f64) -> i32 {
    if a < b {
        -1
    } else if a > b {
        1
    } else {
        // NaN == NaN, and -0.0 < 0.0
        sign(double_bits(a).cmp(&double_bits(b)))
    }
}

pub fn compare_f32(a: f32, b: f32) -> i32 {
    if a < b {
        -1
    } else if a > b {
        1
    } else {
        sign(float_bits(a).cmp(&float_bits(b)))
    }
}

/// `Boxed.compare(a, b)`. `None` when the operands are not the same primitive kind.
pub fn compare(a: &Value, b: &Value) -> Option<i32> {
    Some(match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => {
            if x == y { 0 } else if *x { 1 } else { -1 }
        }
        // Byte/Short/Character.compare return the difference, not a sign.
        (Value::Byte(x), Value::Byte(y)) => i32::from(*x) - i32::from(*y),
        (Value::Short(x), Value::Short(y)) => i32::from(*x) - i32::from(*y),
        (Value::Char(x), Value::Char(y)) => i32::from(*x) - i32::from(*y),
        (Value::Int(x), Value::Int(y)) => sign(x.cmp(y)),
        (Value::Long(x), Value::Long(y)) => sign(x.cmp(y)),
        (Value::Float(x), Value::Float(y)) => compare_f32(*x, *y),
        (Value::Double(x), Value::Double(y)) => compare_f64(*x, *y),
        _ => return None,
    })
}

fn fold_long(v: i64) -> i32 {
    (v ^ ((v as u64) >> 32) as i64) as i32
}

/// `String.hashCode` over UTF-16 code units.
pub fn string_hash(s: &str) -> i32 {
    s.encode_utf16().fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

/// `hashCode` of a primitive (through its wrapper) or a string.
pub fn hash(v: &Value) -> Option<i32> {
    Some(match v {
        Value::Bool(b) => {
            if *b { 1231 } else { 1237 }
        }
        Value::Byte(x) => i32::from(*x),
        Value::Short(x) => i32::from(*x),
        Value::Int(x) => *x,
        Value::Long(x) => fold_long(*x),
        Value::Float(x) => float_bits(*x),
        Value::Double(x) => fold_long(double_bits(*x)),
        Value::Char(c) => i32::from(*c),
        Value::Str(s) => string_hash(s),
        _ => return None,
    })
}

/// `Boxed.equals` / `String.equals`. Floating values compare by canonical bits.
pub fn equals(a: &Value, b: &Value) -> Option<bool> {
    Some(match (a, b) {
        (Value::Float(x), Value::Float(y)) => float_bits(*x) == float_bits(*y),
        (Value::Double(x), Value::Double(y)) => double_bits(*x) == double_bits(*y),
        (Value::Str(x), Value::Str(y)) => x == y,
        (x, y) if x.primitive().is_some() => x.primitive() == y.primitive() && compare(x, y) == Some(0),
        (Value::Str(_), _) => false,
        _ => return None,
    })
}

/// `String.valueOf` for primitives and strings.
pub fn display(v: &Value) -> Option<String> {
    Some(match v {
        Value::Bool(b) => b.to_string(),
        Value::Byte(x) => x.to_string(),
        Value::Short(x) => x.to_string(),
        Value::Int(x) => x.to_string(),
        Value::Long(x) => x.to_string(),
        Value::Float(x) => format_floating(f64::from(*x), x.to_string(), format!("{x:e}")),
        Value::Double(x) => format_floating(*x, x.to_string(), format!("{x:e}")),
        Value::Char(c) => char::decode_utf16([*c]).map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER)).collect(),
        Value::Str(s) => s.to_string(),
        _ => return None,
    })
}

/// `Double.toString` layout: plain decimal in [1e-3, 1e7), otherwise `d.dddE±n`,
/// always with a fractional digit.
fn format_floating(v: f64, plain: String, scientific: String) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let magnitude = v.abs();
    if v == 0.0 || (1e-3..1e7).contains(&magnitude) {
        return if plain.contains('.') { plain } else { format!("{plain}.0") };
    }
    match scientific.split_once('e') {
        Some((mantissa, exp)) if mantissa.contains('.') => format!("{mantissa}E{exp}"),
        Some((mantissa, exp)) => format!("{mantissa}.0E{exp}"),
        None => scientific,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_compare_edge_cases() {
        assert_eq!(compare_f64(f64::NAN, f64::NAN), 0);
        assert_eq!(compare_f64(-0.0, 0.0), -1);
        assert_eq!(compare_f64(0.0, -0.0), 1);
        assert_eq!(compare_f64(f64::NAN, f64::INFINITY), 1);
        assert_eq!(compare_f64(1.5, 1.5), 0);
        assert_eq!(compare_f32(-0.0, 0.0), -1);
    }

    #[test]
    fn small_integral_compares_return_difference() {
        assert_eq!(compare(&Value::Char(u16::from(b'a')), &Value::Char(u16::from(b'd'))), Some(-3));
        assert_eq!(compare(&Value::Char(0xFFFF), &Value::Char(0)), Some(0xFFFF));
        assert_eq!(compare(&Value::Byte(10), &Value::Byte(3)), Some(7));
        assert_eq!(compare(&Value::Int(10), &Value::Int(3)), Some(1));
        assert_eq!(compare(&Value::Bool(true), &Value::Bool(false)), Some(1));
        assert_eq!(compare(&Value::Int(1), &Value::Long(1)), None);
    }

    #[test]
    fn wrapper_hashes() {
        assert_eq!(hash(&Value::Bool(true)), Some(1231));
        assert_eq!(hash(&Value::Bool(false)), Some(1237));
        assert_eq!(hash(&Value::Long(-1)), Some(0));
        assert_eq!(hash(&Value::Long(1 << 32)), Some(1));
        assert_eq!(hash(&Value::Double(1.0)), Some(1_072_693_248));
        assert_eq!(hash(&Value::Double(0.0)), Some(0));
        assert_eq!(hash(&Value::Float(1.0)), Some(1_065_353_216));
        assert_eq!(hash(&Value::Char(u16::from(b'a'))), Some(97));
        assert_eq!(hash(&Value::str("hello")), Some(99_162_322));
        assert_eq!(hash(&Value::str("")), Some(0));
    }

    #[test]
    fn equals_uses_bits_for_floating() {
        assert_eq!(equals(&Value::Double(f64::NAN), &Value::Double(f64::NAN)), Some(true));
        assert_eq!(equals(&Value::Double(0.0), &Value::Double(-0.0)), Some(false));
        assert_eq!(equals(&Value::Int(1), &Value::Long(1)), Some(false));
        assert_eq!(equals(&Value::str("a"), &Value::str("a")), Some(true));
        assert_eq!(equals(&Value::str("a"), &Value::Int(1)), Some(false));
        assert_eq!(equals(&Value::Null, &Value::Null), None);
    }

    #[test]
    fn java_style_rendering() {
        assert_eq!(display(&Value::Double(1.0)).unwrap(), "1.0");
        assert_eq!(display(&Value::Double(-0.0)).unwrap(), "-0.0");
        assert_eq!(display(&Value::Double(2.5)).unwrap(), "2.5");
        assert_eq!(display(&Value::Double(1e7)).unwrap(), "1.0E7");
        assert_eq!(display(&Value::Double(1.5e-5)).unwrap(), "1.5E-5");
        assert_eq!(display(&Value::Double(f64::NAN)).unwrap(), "NaN");
        assert_eq!(display(&Value::Float(0.5)).unwrap(), "0.5");
        assert_eq!(display(&Value::Char(u16::from(b'x'))).unwrap(), "x");
        assert_eq!(display(&Value::Char(0x00E9)).unwrap(), "\u{e9}");
        assert_eq!(display(&Value::Bool(false)).unwrap(), "false");
    }
}

//! Scan value types: type tags, numeric values, and the typed codec
//!
//! All encodings are little-endian; integers are two's-complement and
//! floats travel as IEEE-754 bit patterns. A float32 value is held widened
//! to f64 and narrowed back through f32 on encode.

use super::error::{MemoryError, MemoryResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;

/// Default absolute-error tolerance for float32 comparisons
pub const F32_EPSILON: f64 = 1e-4;
/// Default absolute-error tolerance for float64 comparisons
pub const F64_EPSILON: f64 = 1e-6;

/// Identifies the width, encoding, and comparison rule of a scanned value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    I32,
    I64,
    U32,
    U64,
    F32,
    F64,
}

impl TypeTag {
    /// All supported tags, in UI presentation order
    pub const ALL: [TypeTag; 6] = [
        TypeTag::I32,
        TypeTag::I64,
        TypeTag::U32,
        TypeTag::U64,
        TypeTag::F32,
        TypeTag::F64,
    ];

    /// Encoded width in bytes
    pub const fn width(self) -> usize {
        match self {
            TypeTag::I32 | TypeTag::U32 | TypeTag::F32 => 4,
            TypeTag::I64 | TypeTag::U64 | TypeTag::F64 => 8,
        }
    }

    /// Floats compare by absolute error rather than bit equality
    pub const fn is_float(self) -> bool {
        matches!(self, TypeTag::F32 | TypeTag::F64)
    }

    /// Wire/UI name of the tag
    pub const fn name(self) -> &'static str {
        match self {
            TypeTag::I32 => "int32",
            TypeTag::I64 => "int64",
            TypeTag::U32 => "uint32",
            TypeTag::U64 => "uint64",
            TypeTag::F32 => "float32",
            TypeTag::F64 => "float64",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TypeTag {
    type Err = MemoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "int32" | "i32" => Ok(TypeTag::I32),
            "int64" | "i64" => Ok(TypeTag::I64),
            "uint32" | "u32" => Ok(TypeTag::U32),
            "uint64" | "u64" => Ok(TypeTag::U64),
            "float32" | "f32" => Ok(TypeTag::F32),
            "float64" | "f64" => Ok(TypeTag::F64),
            other => Err(MemoryError::UnsupportedType(other.to_string())),
        }
    }
}

/// A scanned or written value; the tag selects the active arm
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum NumericValue {
    Int(i64),
    Uint(u64),
    Float(f64),
}

impl NumericValue {
    /// The zero value for a tag, used when a read-back fails during scan
    pub const fn zero(tag: TypeTag) -> Self {
        match tag {
            TypeTag::I32 | TypeTag::I64 => NumericValue::Int(0),
            TypeTag::U32 | TypeTag::U64 => NumericValue::Uint(0),
            TypeTag::F32 | TypeTag::F64 => NumericValue::Float(0.0),
        }
    }

    /// Encodes the value under `tag`; the result is exactly `tag.width()`
    /// bytes. Arms that do not match the tag encode as the tag's zero.
    pub fn encode(self, tag: TypeTag) -> Vec<u8> {
        match tag {
            TypeTag::I32 => (self.as_i64() as i32).to_le_bytes().to_vec(),
            TypeTag::I64 => self.as_i64().to_le_bytes().to_vec(),
            TypeTag::U32 => (self.as_u64() as u32).to_le_bytes().to_vec(),
            TypeTag::U64 => self.as_u64().to_le_bytes().to_vec(),
            TypeTag::F32 => (self.as_f64() as f32).to_le_bytes().to_vec(),
            TypeTag::F64 => self.as_f64().to_le_bytes().to_vec(),
        }
    }

    /// Decodes a value of `tag` from the first `tag.width()` bytes.
    /// Returns `None` only when the buffer is shorter than the width.
    pub fn decode(tag: TypeTag, bytes: &[u8]) -> Option<Self> {
        if bytes.len() < tag.width() {
            return None;
        }
        Some(match tag {
            TypeTag::I32 => NumericValue::Int(i64::from(i32::from_le_bytes([
                bytes[0], bytes[1], bytes[2], bytes[3],
            ]))),
            TypeTag::I64 => NumericValue::Int(i64::from_le_bytes([
                bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
            ])),
            TypeTag::U32 => NumericValue::Uint(u64::from(u32::from_le_bytes([
                bytes[0], bytes[1], bytes[2], bytes[3],
            ]))),
            TypeTag::U64 => NumericValue::Uint(u64::from_le_bytes([
                bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
            ])),
            TypeTag::F32 => NumericValue::Float(f64::from(f32::from_le_bytes([
                bytes[0], bytes[1], bytes[2], bytes[3],
            ]))),
            TypeTag::F64 => NumericValue::Float(f64::from_le_bytes([
                bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
            ])),
        })
    }

    /// Signed arm, or 0 when another arm is active
    pub const fn as_i64(self) -> i64 {
        match self {
            NumericValue::Int(v) => v,
            _ => 0,
        }
    }

    /// Unsigned arm, or 0 when another arm is active
    pub const fn as_u64(self) -> u64 {
        match self {
            NumericValue::Uint(v) => v,
            _ => 0,
        }
    }

    /// Float arm, or 0.0 when another arm is active
    pub const fn as_f64(self) -> f64 {
        match self {
            NumericValue::Float(v) => v,
            _ => 0.0,
        }
    }

    /// Comparison rule used by refinement: exact equality for integers,
    /// absolute error within `eps` for floats. NaN never matches.
    pub fn matches(self, tag: TypeTag, target: NumericValue, eps: f64) -> bool {
        match tag {
            TypeTag::I32 | TypeTag::I64 => self.as_i64() == target.as_i64(),
            TypeTag::U32 | TypeTag::U64 => self.as_u64() == target.as_u64(),
            TypeTag::F32 | TypeTag::F64 => (self.as_f64() - target.as_f64()).abs() <= eps,
        }
    }

    /// Renders the value the way the watch table does: integers in
    /// decimal, float32 with 4 decimals, float64 with 6.
    pub fn format(self, tag: TypeTag) -> String {
        match tag {
            TypeTag::I32 | TypeTag::I64 => format!("{}", self.as_i64()),
            TypeTag::U32 | TypeTag::U64 => format!("{}", self.as_u64()),
            TypeTag::F32 => format!("{:.4}", self.as_f64()),
            TypeTag::F64 => format!("{:.6}", self.as_f64()),
        }
    }
}

/// Parses operator-supplied text under a tag.
///
/// Out-of-range and syntax failures carry messages naming the tag and the
/// offending input so they can surface in the UI verbatim.
pub fn parse_value(tag: TypeTag, text: &str) -> MemoryResult<NumericValue> {
    let text = text.trim();
    if text.is_empty() {
        return Err(MemoryError::ParseEmpty);
    }

    match tag {
        TypeTag::I32 => text
            .parse::<i32>()
            .map(|v| NumericValue::Int(i64::from(v)))
            .map_err(|e| int_parse_error(tag, text, e.kind())),
        TypeTag::I64 => text
            .parse::<i64>()
            .map(NumericValue::Int)
            .map_err(|e| int_parse_error(tag, text, e.kind())),
        TypeTag::U32 => text
            .parse::<u32>()
            .map(|v| NumericValue::Uint(u64::from(v)))
            .map_err(|e| int_parse_error(tag, text, e.kind())),
        TypeTag::U64 => text
            .parse::<u64>()
            .map(NumericValue::Uint)
            .map_err(|e| int_parse_error(tag, text, e.kind())),
        TypeTag::F32 => match text.parse::<f32>() {
            Ok(v) if v.is_finite() => Ok(NumericValue::Float(f64::from(v))),
            Ok(_) => Err(MemoryError::ParseOutOfRange { tag }),
            Err(_) => Err(MemoryError::ParseSyntax {
                tag,
                input: text.to_string(),
            }),
        },
        TypeTag::F64 => match text.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(NumericValue::Float(v)),
            Ok(_) => Err(MemoryError::ParseOutOfRange { tag }),
            Err(_) => Err(MemoryError::ParseSyntax {
                tag,
                input: text.to_string(),
            }),
        },
    }
}

fn int_parse_error(tag: TypeTag, text: &str, kind: &IntErrorKind) -> MemoryError {
    match kind {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            MemoryError::ParseOutOfRange { tag }
        }
        _ => MemoryError::ParseSyntax {
            tag,
            input: text.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(tag: TypeTag, value: NumericValue) -> NumericValue {
        let bytes = value.encode(tag);
        assert_eq!(bytes.len(), tag.width());
        NumericValue::decode(tag, &bytes).unwrap()
    }

    #[test]
    fn test_tag_widths() {
        assert_eq!(TypeTag::I32.width(), 4);
        assert_eq!(TypeTag::U32.width(), 4);
        assert_eq!(TypeTag::F32.width(), 4);
        assert_eq!(TypeTag::I64.width(), 8);
        assert_eq!(TypeTag::U64.width(), 8);
        assert_eq!(TypeTag::F64.width(), 8);
    }

    #[test]
    fn test_tag_names() {
        for tag in TypeTag::ALL {
            assert_eq!(tag.name().parse::<TypeTag>().unwrap(), tag);
        }
        assert!("string".parse::<TypeTag>().is_err());
    }

    #[test]
    fn test_int_roundtrip_boundaries() {
        for v in [i64::from(i32::MIN), -1, 0, 1, i64::from(i32::MAX)] {
            assert_eq!(roundtrip(TypeTag::I32, NumericValue::Int(v)), NumericValue::Int(v));
        }
        for v in [i64::MIN, -1, 0, 1, i64::MAX] {
            assert_eq!(roundtrip(TypeTag::I64, NumericValue::Int(v)), NumericValue::Int(v));
        }
        for v in [0, 1, u64::from(u32::MAX)] {
            assert_eq!(roundtrip(TypeTag::U32, NumericValue::Uint(v)), NumericValue::Uint(v));
        }
        for v in [0, 1, u64::MAX] {
            assert_eq!(roundtrip(TypeTag::U64, NumericValue::Uint(v)), NumericValue::Uint(v));
        }
    }

    #[test]
    fn test_float_roundtrip() {
        for v in [
            0.0f32,
            -0.0,
            1.0,
            -1.0,
            f32::MIN,
            f32::MAX,
            f32::MIN_POSITIVE,
            1.0e-40, // denormal
            1234.25,
        ] {
            let got = roundtrip(TypeTag::F32, NumericValue::Float(f64::from(v)));
            assert_eq!(got.as_f64().to_bits(), f64::from(v).to_bits());
        }
        for v in [0.0f64, -0.0, 1.0, -1.0, f64::MIN, f64::MAX, 5.0e-324, 98765.5] {
            let got = roundtrip(TypeTag::F64, NumericValue::Float(v));
            assert_eq!(got.as_f64().to_bits(), v.to_bits());
        }
    }

    #[test]
    fn test_nan_roundtrip_bit_pattern() {
        let got = roundtrip(TypeTag::F64, NumericValue::Float(f64::NAN));
        assert!(got.as_f64().is_nan());
        assert_eq!(got.as_f64().to_bits(), f64::NAN.to_bits());

        let got = roundtrip(TypeTag::F32, NumericValue::Float(f64::from(f32::NAN)));
        assert!(got.as_f64().is_nan());
    }

    #[test]
    fn test_f32_narrowing_on_encode() {
        // A value that is not exactly representable in f32 must encode
        // through the narrowed form, not the f64 bit pattern.
        let v = 0.1f64;
        let bytes = NumericValue::Float(v).encode(TypeTag::F32);
        assert_eq!(bytes, (0.1f64 as f32).to_le_bytes().to_vec());
    }

    #[test]
    fn test_decode_short_buffer() {
        assert!(NumericValue::decode(TypeTag::I32, &[1, 2, 3]).is_none());
        assert!(NumericValue::decode(TypeTag::U64, &[0; 7]).is_none());
        assert!(NumericValue::decode(TypeTag::U64, &[0; 8]).is_some());
    }

    #[test]
    fn test_matches_integers() {
        let a = NumericValue::Int(42);
        assert!(a.matches(TypeTag::I32, NumericValue::Int(42), 0.0));
        assert!(!a.matches(TypeTag::I32, NumericValue::Int(43), 0.0));

        let u = NumericValue::Uint(u64::MAX);
        assert!(u.matches(TypeTag::U64, NumericValue::Uint(u64::MAX), 0.0));
    }

    #[test]
    fn test_matches_floats() {
        let v = NumericValue::Float(1.00004);
        assert!(v.matches(TypeTag::F32, NumericValue::Float(1.0), F32_EPSILON));
        assert!(!v.matches(TypeTag::F64, NumericValue::Float(1.0), F64_EPSILON));

        // NaN never matches, not even itself
        let nan = NumericValue::Float(f64::NAN);
        assert!(!nan.matches(TypeTag::F64, nan, F64_EPSILON));
        assert!(!nan.matches(TypeTag::F64, NumericValue::Float(0.0), F64_EPSILON));

        // signed zeros match each other
        let pz = NumericValue::Float(0.0);
        let nz = NumericValue::Float(-0.0);
        assert!(pz.matches(TypeTag::F64, nz, F64_EPSILON));
    }

    #[test]
    fn test_parse_integers() {
        assert_eq!(parse_value(TypeTag::I32, "1337").unwrap(), NumericValue::Int(1337));
        assert_eq!(parse_value(TypeTag::I32, " -42 ").unwrap(), NumericValue::Int(-42));
        assert_eq!(
            parse_value(TypeTag::U64, "9001").unwrap(),
            NumericValue::Uint(9001)
        );
    }

    #[test]
    fn test_parse_out_of_range() {
        let err = parse_value(TypeTag::I32, "99999999999").unwrap_err();
        assert!(err.to_string().contains("out of range"));

        let err = parse_value(TypeTag::U32, "-1").unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_parse_syntax() {
        let err = parse_value(TypeTag::U64, "xyz").unwrap_err();
        assert!(err.to_string().contains("invalid uint64"));

        let err = parse_value(TypeTag::F64, "not-a-float").unwrap_err();
        assert!(err.to_string().contains("invalid float64"));
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(
            parse_value(TypeTag::I32, "   "),
            Err(MemoryError::ParseEmpty)
        ));
    }

    #[test]
    fn test_parse_floats() {
        assert_eq!(
            parse_value(TypeTag::F32, "3.14").unwrap(),
            NumericValue::Float(f64::from(3.14f32))
        );
        assert_eq!(
            parse_value(TypeTag::F64, "12.5").unwrap(),
            NumericValue::Float(12.5)
        );
        assert!(parse_value(TypeTag::F64, "1e999").is_err());
    }

    #[test]
    fn test_format() {
        assert_eq!(NumericValue::Int(-5).format(TypeTag::I64), "-5");
        assert_eq!(NumericValue::Uint(9001).format(TypeTag::U32), "9001");
        assert_eq!(NumericValue::Float(3.14).format(TypeTag::F32), "3.1400");
        assert_eq!(NumericValue::Float(12.5).format(TypeTag::F64), "12.500000");
    }

    #[test]
    fn test_zero_values() {
        assert_eq!(NumericValue::zero(TypeTag::I32), NumericValue::Int(0));
        assert_eq!(NumericValue::zero(TypeTag::U64), NumericValue::Uint(0));
        assert_eq!(NumericValue::zero(TypeTag::F64), NumericValue::Float(0.0));
    }

    #[test]
    fn test_serde_roundtrip() {
        let v = NumericValue::Float(12.5);
        let json = serde_json::to_string(&v).unwrap();
        let back: NumericValue = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);

        let tag: TypeTag = serde_json::from_str("\"f32\"").unwrap();
        assert_eq!(tag, TypeTag::F32);
    }
}

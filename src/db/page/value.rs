//! Decoded column values and their serial types.

use std::fmt;

use bytes::Bytes;

use crate::db::error::DecodeError;

/// A single decoded column value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Bytes),
}

impl Value {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Integer(v) => write!(f, "{v}"),
            Value::Real(v) => write!(f, "{v}"),
            Value::Text(s) => f.write_str(s),
            Value::Blob(b) => {
                for byte in b.iter() {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
        }
    }
}

/// Get the size in bytes of a column value based on its serial type code.
pub fn serial_type_len(serial_type: u64) -> Result<usize, DecodeError> {
    match serial_type {
        0 | 8 | 9 => Ok(0),                                        // NULL, constants 0 and 1
        1 => Ok(1),                                                // 8-bit integer
        2 => Ok(2),                                                // 16-bit integer
        3 => Ok(3),                                                // 24-bit integer
        4 => Ok(4),                                                // 32-bit integer
        5 => Ok(6),                                                // 48-bit integer
        6 | 7 => Ok(8),                                            // 64-bit integer, IEEE 754 float
        10 | 11 => Err(DecodeError::ReservedSerialType(serial_type)),
        n if n % 2 == 0 => Ok(((n - 12) / 2) as usize),            // BLOB
        n => Ok(((n - 13) / 2) as usize),                          // Text string
    }
}

/// Decode a column payload whose length must match its serial type exactly.
pub fn decode_value(serial_type: u64, raw: &Bytes) -> Result<Value, DecodeError> {
    let expected = serial_type_len(serial_type)?;
    if raw.len() != expected {
        return Err(DecodeError::PayloadLengthMismatch {
            serial_type,
            expected,
            actual: raw.len(),
        });
    }

    let value = match serial_type {
        0 => Value::Null,
        1..=6 => Value::Integer(decode_signed(raw)),
        7 => {
            let mut bits = [0u8; 8];
            bits.copy_from_slice(raw);
            Value::Real(f64::from_be_bytes(bits))
        }
        8 => Value::Integer(0),
        9 => Value::Integer(1),
        n if n % 2 == 0 => Value::Blob(raw.clone()),
        _ => {
            let text = std::str::from_utf8(raw).map_err(|_| DecodeError::InvalidUtf8)?;
            Value::Text(text.to_owned())
        }
    };
    Ok(value)
}

/// Big-endian two's complement of 1-8 bytes, sign-extended to 64 bits.
fn decode_signed(raw: &[u8]) -> i64 {
    let value = raw.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64);
    let shift = (8 - raw.len()) * 8;
    ((value << shift) as i64) >> shift
}

/// Serial type and payload bytes for a value, the inverse of [`decode_value`].
///
/// Integers use the narrowest width that holds them; 0 and 1 use the
/// payload-free constant types.
pub fn encode_value(value: &Value) -> (u64, Vec<u8>) {
    match value {
        Value::Null => (0, Vec::new()),
        Value::Integer(0) => (8, Vec::new()),
        Value::Integer(1) => (9, Vec::new()),
        Value::Integer(v) => {
            let (serial_type, width) = match *v {
                -0x80..=0x7f => (1, 1),
                -0x8000..=0x7fff => (2, 2),
                -0x80_0000..=0x7f_ffff => (3, 3),
                -0x8000_0000..=0x7fff_ffff => (4, 4),
                -0x8000_0000_0000..=0x7fff_ffff_ffff => (5, 6),
                _ => (6, 8),
            };
            (serial_type, v.to_be_bytes()[8 - width..].to_vec())
        }
        Value::Real(v) => (7, v.to_be_bytes().to_vec()),
        Value::Text(s) => (13 + 2 * s.len() as u64, s.as_bytes().to_vec()),
        Value::Blob(b) => (12 + 2 * b.len() as u64, b.to_vec()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(value: Value) {
        let (serial_type, payload) = encode_value(&value);
        let decoded = decode_value(serial_type, &Bytes::from(payload)).unwrap();
        assert_eq!(decoded, value, "serial type {serial_type}");
    }

    #[test]
    fn payload_lengths() {
        let cases = [(0, 0), (1, 1), (2, 2), (3, 3), (4, 4), (5, 6), (6, 8), (7, 8), (8, 0), (9, 0)];
        for (serial_type, len) in cases {
            assert_eq!(serial_type_len(serial_type).unwrap(), len);
        }
        assert_eq!(serial_type_len(12).unwrap(), 0);
        assert_eq!(serial_type_len(13).unwrap(), 0);
        assert_eq!(serial_type_len(18).unwrap(), 3);
        assert_eq!(serial_type_len(19).unwrap(), 3);
        assert_eq!(serial_type_len(10), Err(DecodeError::ReservedSerialType(10)));
        assert_eq!(serial_type_len(11), Err(DecodeError::ReservedSerialType(11)));
    }

    #[test]
    fn integers_of_every_width_survive() {
        for v in [-1, 2, -128, 127, 300, -32768, 8_000_000, -8_388_608, 2_000_000_000, 1 << 40, -(1 << 47), i64::MAX, i64::MIN] {
            roundtrip(Value::Integer(v));
        }
    }

    #[test]
    fn sign_extension() {
        assert_eq!(decode_value(1, &Bytes::from_static(&[0xff])).unwrap(), Value::Integer(-1));
        assert_eq!(decode_value(3, &Bytes::from_static(&[0x80, 0, 0])).unwrap(), Value::Integer(-8_388_608));
        assert_eq!(decode_value(5, &Bytes::from_static(&[0, 0, 0, 0, 1, 0])).unwrap(), Value::Integer(256));
    }

    #[test]
    fn constants_and_null() {
        assert_eq!(decode_value(0, &Bytes::new()).unwrap(), Value::Null);
        assert_eq!(decode_value(8, &Bytes::new()).unwrap(), Value::Integer(0));
        assert_eq!(decode_value(9, &Bytes::new()).unwrap(), Value::Integer(1));
    }

    #[test]
    fn real_text_and_blob_survive() {
        roundtrip(Value::Real(3.5));
        roundtrip(Value::Real(-0.125));
        roundtrip(Value::Text("Granny Smith".into()));
        roundtrip(Value::Text(String::new()));
        roundtrip(Value::Blob(Bytes::from_static(&[0xde, 0xad, 0xbe, 0xef])));
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let err = decode_value(4, &Bytes::from_static(&[0, 1])).unwrap_err();
        assert_eq!(
            err,
            DecodeError::PayloadLengthMismatch {
                serial_type: 4,
                expected: 4,
                actual: 2
            }
        );
        assert!(decode_value(19, &Bytes::from_static(b"abcd")).is_err());
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        assert_eq!(
            decode_value(15, &Bytes::from_static(&[0xff])),
            Err(DecodeError::InvalidUtf8)
        );
    }

    #[test]
    fn display_formats() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::Integer(-4).to_string(), "-4");
        assert_eq!(Value::Text("Fuji".into()).to_string(), "Fuji");
        assert_eq!(Value::Blob(Bytes::from_static(&[1, 0xab])).to_string(), "01ab");
    }
}

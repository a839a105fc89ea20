use crate::engine::core::MeasureValue;

const TAG_NULL: u8 = 0;
const TAG_LONG: u8 = 1;
const TAG_DOUBLE: u8 = 2;
const TAG_DECIMAL: u8 = 3;

/// Encodes a measure as a tag byte followed by its payload.
pub fn encode_measure(value: &MeasureValue) -> Vec<u8> {
    match value {
        MeasureValue::Null => vec![TAG_NULL],
        MeasureValue::Long(v) => {
            let mut buf = Vec::with_capacity(9);
            buf.push(TAG_LONG);
            buf.extend_from_slice(&v.to_le_bytes());
            buf
        }
        MeasureValue::Double(v) => {
            let mut buf = Vec::with_capacity(9);
            buf.push(TAG_DOUBLE);
            buf.extend_from_slice(&v.to_le_bytes());
            buf
        }
        MeasureValue::Decimal(s) => {
            let mut buf = Vec::with_capacity(1 + s.len());
            buf.push(TAG_DECIMAL);
            buf.extend_from_slice(s.as_bytes());
            buf
        }
    }
}

pub fn decode_measure(bytes: &[u8]) -> Option<MeasureValue> {
    let (tag, payload) = bytes.split_first()?;
    match *tag {
        TAG_NULL if payload.is_empty() => Some(MeasureValue::Null),
        TAG_LONG => Some(MeasureValue::Long(i64::from_le_bytes(
            payload.try_into().ok()?,
        ))),
        TAG_DOUBLE => Some(MeasureValue::Double(f64::from_le_bytes(
            payload.try_into().ok()?,
        ))),
        TAG_DECIMAL => String::from_utf8(payload.to_vec())
            .ok()
            .map(MeasureValue::Decimal),
        _ => None,
    }
}

//! Variable-length integer (varint) operations for SQLite format.

use bytes::{Buf, BufMut};

use super::error::DecodeError;

const VARINT_MAX_BYTES: usize = 9;
const VARINT_CONTINUATION_BIT: u8 = 0x80;
const VARINT_DATA_MASK: u8 = 0x7F;

/// Read a varint from the front of a buffer, advancing past it.
///
/// Varints are a variable-length encoding for integers used by SQLite.
/// They use 1-9 bytes depending on the magnitude of the value; the first
/// eight bytes carry 7 data bits each and the ninth carries all 8.
///
/// Returns a tuple of (value, number of bytes read), or
/// [`DecodeError::TruncatedVarint`] if the buffer runs out mid-sequence.
pub fn read_varint<B: Buf>(buf: &mut B) -> Result<(u64, usize), DecodeError> {
    let mut value: u64 = 0;
    let mut read = 0;

    loop {
        if !buf.has_remaining() {
            return Err(DecodeError::TruncatedVarint { read });
        }
        let byte = buf.get_u8();
        read += 1;

        if read == VARINT_MAX_BYTES {
            // 9th byte uses all 8 bits
            value = (value << 8) | byte as u64;
            break;
        }

        value = (value << 7) | (byte & VARINT_DATA_MASK) as u64;
        if byte & VARINT_CONTINUATION_BIT == 0 {
            break;
        }
    }

    Ok((value, read))
}

/// Append the varint encoding of `value` to `out`, returning its length.
pub fn encode_varint<B: BufMut>(value: u64, out: &mut B) -> usize {
    // Values needing more than 56 bits take the 9-byte form.
    if value >> 56 != 0 {
        let mut high = value >> 8;
        let mut groups = [0u8; 8];
        for slot in groups.iter_mut().rev() {
            *slot = (high & VARINT_DATA_MASK as u64) as u8 | VARINT_CONTINUATION_BIT;
            high >>= 7;
        }
        out.put_slice(&groups);
        out.put_u8(value as u8);
        return VARINT_MAX_BYTES;
    }

    let mut groups = Vec::with_capacity(8);
    let mut rest = value;
    loop {
        groups.push((rest & VARINT_DATA_MASK as u64) as u8);
        rest >>= 7;
        if rest == 0 {
            break;
        }
    }
    groups.reverse();
    let last = groups.len() - 1;
    for (i, group) in groups.iter().enumerate() {
        let byte = if i == last {
            *group
        } else {
            group | VARINT_CONTINUATION_BIT
        };
        out.put_u8(byte);
    }
    groups.len()
}

/// Number of bytes `encode_varint` would write for `value`.
pub fn varint_len(value: u64) -> usize {
    if value >> 56 != 0 {
        return VARINT_MAX_BYTES;
    }
    let bits = 64 - value.leading_zeros() as usize;
    bits.div_ceil(7).max(1)
}

//! The string format used in class files, and conversions to and from rust
//! strings.
//!
//! It's almost CESU-8: `U+0000` takes the two-byte form `0xC0 0x80` so the
//! encoded data never contains a raw zero byte, and code points above
//! `U+FFFF` are written as two three-byte surrogate sequences instead of the
//! four-byte form of standard UTF-8.
//!
//! See <https://docs.oracle.com/javase/specs/jvms/se21/html/jvms-4.html#jvms-4.4.7>
//! for the complete specification of the format.

use crate::{Error, Result};

/// Decodes modified UTF-8 into a [`String`].
///
/// Fails with [`Error::InvalidMutf8`] on truncated sequences, raw zero
/// bytes, start bytes in `0xF0..=0xFF`, bad continuation bytes, and
/// surrogate halves that don't pair up. The reported offset is where the
/// offending sequence starts.
pub fn decode(data: &[u8]) -> Result<String> {
	let mut string = String::with_capacity(data.len());
	let mut pos = 0;

	while pos < data.len() {
		let b = data[pos];

		if b == 0 || b >= 0xf0 {
			// Disallowed outright: no byte may be zero or in 0xf0..=0xff.
			return Err(Error::InvalidMutf8 { at: pos });
		}

		if b & 0x80 == 0 {
			string.push(b as char);
			pos += 1;
		} else if b & 0xe0 == 0xc0 {
			let code_point = (u32::from(b & 0x1f) << 6) | u32::from(continuation(data, pos, 1)?);
			// All values a two-byte sequence can carry are valid chars.
			match char::from_u32(code_point) {
				Some(c) => string.push(c),
				None => return Err(Error::InvalidMutf8 { at: pos }),
			}
			pos += 2;
		} else if b & 0xf0 == 0xe0 {
			let code_point = three_byte_value(data, pos)?;

			if (0xd800..=0xdbff).contains(&code_point) {
				// High surrogate; the low half must follow as another
				// three-byte sequence, together naming one supplementary
				// code point.
				if pos + 3 >= data.len() || data[pos + 3] & 0xf0 != 0xe0 {
					return Err(Error::InvalidMutf8 { at: pos });
				}
				let low = three_byte_value(data, pos + 3)?;
				if !(0xdc00..=0xdfff).contains(&low) {
					return Err(Error::InvalidMutf8 { at: pos });
				}

				let supplementary = 0x10000 + ((code_point - 0xd800) << 10) + (low - 0xdc00);
				match char::from_u32(supplementary) {
					Some(c) => string.push(c),
					None => return Err(Error::InvalidMutf8 { at: pos }),
				}
				pos += 6;
			} else {
				match char::from_u32(code_point) {
					Some(c) => string.push(c),
					// An unpaired low surrogate lands here.
					None => return Err(Error::InvalidMutf8 { at: pos }),
				}
				pos += 3;
			}
		} else {
			// 10xxxxxx: a continuation byte where a start byte belongs.
			return Err(Error::InvalidMutf8 { at: pos });
		}
	}

	Ok(string)
}

fn continuation(data: &[u8], start: usize, offset: usize) -> Result<u8> {
	match data.get(start + offset) {
		Some(&b) if b & 0xc0 == 0x80 => Ok(b & 0x3f),
		_ => Err(Error::InvalidMutf8 { at: start }),
	}
}

fn three_byte_value(data: &[u8], start: usize) -> Result<u32> {
	let b2 = continuation(data, start, 1)?;
	let b3 = continuation(data, start, 2)?;
	Ok((u32::from(data[start] & 0x0f) << 12) | (u32::from(b2) << 6) | u32::from(b3))
}

/// Encodes a string as modified UTF-8. The inverse of [`decode`].
///
/// Any rust string encodes, so this cannot fail.
pub fn encode(string: &str) -> Vec<u8> {
	let mut vec = Vec::with_capacity(string.len());

	for c in string.chars() {
		let code_point = c as u32;
		match code_point {
			0 => {
				// The two-byte form of NUL keeps raw zero bytes out of the
				// encoded data.
				vec.push(0xc0);
				vec.push(0x80);
			},
			0x01..=0x7f => vec.push(code_point as u8),
			0x80..=0x7ff => {
				vec.push(0xc0 | (code_point >> 6) as u8);
				vec.push(0x80 | (code_point & 0x3f) as u8);
			},
			0x800..=0xffff => {
				vec.push(0xe0 | (code_point >> 12) as u8);
				vec.push(0x80 | ((code_point >> 6) & 0x3f) as u8);
				vec.push(0x80 | (code_point & 0x3f) as u8);
			},
			_ => {
				// Two three-byte surrogate sequences, never the four-byte
				// UTF-8 form.
				let reduced = code_point - 0x10000;
				let high = 0xd800 + (reduced >> 10);
				let low = 0xdc00 + (reduced & 0x3ff);
				for half in [high, low] {
					vec.push(0xe0 | (half >> 12) as u8);
					vec.push(0x80 | ((half >> 6) & 0x3f) as u8);
					vec.push(0x80 | (half & 0x3f) as u8);
				}
			},
		}
	}

	vec
}

#[cfg(test)]
mod testing {
	use anyhow::Result;
	use pretty_assertions::assert_eq;
	use crate::mutf8::{decode, encode};

	fn round_trip(raw: &[u8], string: &str) -> Result<()> {
		assert_eq!(decode(raw)?, string);
		assert_eq!(encode(string), raw);
		Ok(())
	}

	#[test]
	fn embedded_nul() -> Result<()> {
		round_trip(&[0x31, 0xc0, 0x80, 0x32], "1\x002")?;
		round_trip(&[0xc0, 0x80, 0xc0, 0x80, 0xc0, 0x80], "\0\0\0")
	}

	#[test]
	fn one_byte() -> Result<()> {
		round_trip(b"hello", "hello")?;
		let raw: Vec<u8> = (0x01..=0x7f).collect();
		let string: String = ('\u{0001}'..='\u{007f}').collect();
		round_trip(&raw, &string)
	}

	#[test]
	fn two_bytes() -> Result<()> {
		round_trip(&[0xc2, 0xb6], "\u{00b6}")?;
		round_trip(
			&[0xc2, 0x80, 0xcf, 0x8a, 0xd3, 0xbe, 0xdf, 0xbf],
			"\u{0080}\u{03ca}\u{04fe}\u{07ff}",
		)
	}

	#[test]
	fn three_bytes() -> Result<()> {
		round_trip(
			&[
				0xe0, 0xa0, 0x80,
				0xe1, 0x88, 0xb4,
				0xec, 0xab, 0xbe,
				0xeb, 0xaa, 0xbe,
				0xef, 0xbf, 0xbf,
			],
			"\u{0800}\u{1234}\u{cafe}\u{babe}\u{ffff}",
		)
	}

	#[test]
	fn surrogate_pairs() -> Result<()> {
		round_trip(&[0xed, 0xa0, 0xbd, 0xed, 0xb8, 0x88], "\u{1f608}")?;
		round_trip(
			&[0xed, 0xa0, 0x80, 0xed, 0xb0, 0x80, 0xed, 0xaf, 0xbf, 0xed, 0xbf, 0xbf],
			"\u{10000}\u{10ffff}",
		)
	}

	#[test]
	fn rejects_raw_zero_byte() {
		assert!(decode(&[0x31, 0x00, 0x32]).is_err());
	}

	#[test]
	fn rejects_four_byte_utf8() {
		// Standard UTF-8 for U+1F608; not valid in this format.
		assert!(decode(&[0xf0, 0x9f, 0x98, 0x88]).is_err());
	}

	#[test]
	fn rejects_truncated_sequences() {
		assert!(decode(&[0xc2]).is_err());
		assert!(decode(&[0xe0, 0xa0]).is_err());
		assert!(decode(&[0xd4, 0x31]).is_err());
	}

	#[test]
	fn rejects_unpaired_surrogates() {
		// Lone high half, lone low half, high half followed by ascii.
		assert!(decode(&[0xed, 0xa0, 0xbd]).is_err());
		assert!(decode(&[0xed, 0xb8, 0x88]).is_err());
		assert!(decode(&[0xed, 0xa0, 0xbd, 0x41]).is_err());
	}

	#[test]
	fn rejects_continuation_start() {
		assert!(decode(&[0x9f]).is_err());
	}
}

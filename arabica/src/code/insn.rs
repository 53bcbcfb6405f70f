//! The instruction codec: a variable-width encoding with two kinds of
//! context-dependent decoding.
//!
//! Most opcodes have a fixed operand shape, driven here by a static
//! per-opcode table. Three things don't fit that table and are special-cased
//! in both directions: the `wide` prefix (doubling the width of a local
//! variable operand), and the two switch opcodes, whose operand lists are
//! variable-length and whose encoding starts with 0–3 padding bytes so the
//! switch data is 4-byte aligned relative to the start of the method body.
//!
//! Wideness and padding are never stored; both are recomputed from operand
//! values and instruction positions on every encode, so they cannot go stale
//! after edits.

use std::io::Cursor;
use crate::{ClassRead, ClassWrite, Error, Result};
use crate::class_constants::opcode;

/// The semantic kind of one operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandKind {
	/// An immediate value.
	Literal,
	/// An index into the local variable array.
	LocalIndex,
	/// An index into the constant pool.
	ConstantIndex,
	/// A signed offset relative to the instruction's own position.
	Branch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Width {
	U8,
	I8,
	U16,
	I16,
	I32,
}

impl Width {
	fn bytes(self) -> u32 {
		match self {
			Width::U8 | Width::I8 => 1,
			Width::U16 | Width::I16 => 2,
			Width::I32 => 4,
		}
	}
}

#[derive(Debug, Clone, Copy)]
struct Shape {
	kind: OperandKind,
	width: Width,
}

const fn shape(kind: OperandKind, width: Width) -> Shape {
	Shape { kind, width }
}

const NO_OPERANDS: &[Shape] = &[];
const LITERAL_I8: &[Shape] = &[shape(OperandKind::Literal, Width::I8)];
const LITERAL_U8: &[Shape] = &[shape(OperandKind::Literal, Width::U8)];
const LITERAL_I16: &[Shape] = &[shape(OperandKind::Literal, Width::I16)];
const LOCAL_U8: &[Shape] = &[shape(OperandKind::LocalIndex, Width::U8)];
const CONSTANT_U8: &[Shape] = &[shape(OperandKind::ConstantIndex, Width::U8)];
const CONSTANT_U16: &[Shape] = &[shape(OperandKind::ConstantIndex, Width::U16)];
const BRANCH_I16: &[Shape] = &[shape(OperandKind::Branch, Width::I16)];
const BRANCH_I32: &[Shape] = &[shape(OperandKind::Branch, Width::I32)];
const IINC_SHAPE: &[Shape] = &[
	shape(OperandKind::LocalIndex, Width::U8),
	shape(OperandKind::Literal, Width::I8),
];
const INVOKE_INTERFACE_SHAPE: &[Shape] = &[
	shape(OperandKind::ConstantIndex, Width::U16),
	shape(OperandKind::Literal, Width::U8),
	shape(OperandKind::Literal, Width::U8),
];
const MULTIANEWARRAY_SHAPE: &[Shape] = &[
	shape(OperandKind::ConstantIndex, Width::U16),
	shape(OperandKind::Literal, Width::U8),
];

/// The fixed operand shapes of an opcode, or [`None`] for the two switch
/// opcodes, the `wide` prefix and anything that isn't an opcode at all.
fn shapes(op: u8) -> Option<&'static [Shape]> {
	Some(match op {
		opcode::NOP..=opcode::DCONST_1 |
		opcode::ILOAD_0..=opcode::SALOAD |
		opcode::ISTORE_0..=opcode::LXOR |
		opcode::I2L..=opcode::DCMPG |
		opcode::IRETURN..=opcode::RETURN |
		opcode::ARRAYLENGTH |
		opcode::ATHROW |
		opcode::MONITORENTER |
		opcode::MONITOREXIT => NO_OPERANDS,
		opcode::BIPUSH => LITERAL_I8,
		opcode::SIPUSH => LITERAL_I16,
		opcode::NEWARRAY => LITERAL_U8,
		opcode::LDC => CONSTANT_U8,
		opcode::LDC_W | opcode::LDC2_W => CONSTANT_U16,
		opcode::ILOAD..=opcode::ALOAD |
		opcode::ISTORE..=opcode::ASTORE |
		opcode::RET => LOCAL_U8,
		opcode::IINC => IINC_SHAPE,
		opcode::IFEQ..=opcode::JSR |
		opcode::IFNULL | opcode::IFNONNULL => BRANCH_I16,
		opcode::GOTO_W | opcode::JSR_W => BRANCH_I32,
		opcode::GETSTATIC..=opcode::INVOKESTATIC |
		opcode::NEW |
		opcode::ANEWARRAY |
		opcode::CHECKCAST |
		opcode::INSTANCEOF => CONSTANT_U16,
		opcode::INVOKEINTERFACE | opcode::INVOKEDYNAMIC => INVOKE_INTERFACE_SHAPE,
		opcode::MULTIANEWARRAY => MULTIANEWARRAY_SHAPE,
		_ => return None,
	})
}

/// One decoded operand. Branch values are exactly what's on the wire:
/// signed offsets relative to the owning instruction's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
	Literal(i32),
	LocalIndex(u16),
	ConstantIndex(u16),
	Branch(i32),
}

/// The operands of one instruction. The switch forms carry their whole
/// variable-length payload; everything else is a fixed list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operands {
	Fixed(Vec<Operand>),
	TableSwitch {
		default: i32,
		low: i32,
		high: i32,
		offsets: Vec<i32>,
	},
	LookupSwitch {
		default: i32,
		pairs: Vec<(i32, i32)>,
	},
}

/// A decoded instruction: a view into a method body, never persisted.
///
/// `pos` is the absolute byte offset of the instruction within the body; for
/// a wide-encoded instruction it is the position of the `wide` prefix, and
/// `opcode` is the real opcode behind the prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
	pub pos: u32,
	pub opcode: u8,
	pub operands: Operands,
}

impl Instruction {
	pub fn new(pos: u32, opcode: u8, operands: Operands) -> Instruction {
		Instruction { pos, opcode, operands }
	}

	/// Whether this instruction transfers control somewhere other than the
	/// next instruction: it has a branch operand, is one of the switch
	/// forms, or is `ret`.
	pub fn is_branch(&self) -> bool {
		match &self.operands {
			Operands::TableSwitch { .. } | Operands::LookupSwitch { .. } => true,
			Operands::Fixed(operands) => {
				self.opcode == opcode::RET
					|| operands.iter().any(|operand| matches!(operand, Operand::Branch(_)))
			},
		}
	}

	/// Whether this is one of the six return instructions.
	pub fn is_return(&self) -> bool {
		(opcode::IRETURN..=opcode::RETURN).contains(&self.opcode)
	}
}

/// The 0–3 padding bytes between a switch opcode at `pos` and its 4-byte
/// aligned data.
fn switch_padding(pos: u32) -> u32 {
	(4 - (pos + 1) % 4) % 4
}

/// Whether these operand values force the `wide`-prefixed encoding. Derived
/// on every encode, never stored.
fn wide_form(op: u8, operands: &[Operand]) -> bool {
	match op {
		opcode::ILOAD..=opcode::ALOAD |
		opcode::ISTORE..=opcode::ASTORE |
		opcode::RET => {
			matches!(operands.first(), Some(Operand::LocalIndex(index)) if *index > 0xff)
		},
		opcode::IINC => {
			let local = matches!(operands.first(), Some(Operand::LocalIndex(index)) if *index > 0xff);
			let literal = matches!(operands.get(1), Some(Operand::Literal(value)) if i8::try_from(*value).is_err());
			local || literal
		},
		_ => false,
	}
}

/// The encoded size of `instruction` when emitted at `pos`. Size depends on
/// position for the switch forms, and on operand magnitude for the
/// widenable ones.
pub(crate) fn encoded_size(instruction: &Instruction, pos: u32) -> Result<u32> {
	Ok(match &instruction.operands {
		Operands::TableSwitch { offsets, .. } => {
			1 + switch_padding(pos) + 12 + 4 * offsets.len() as u32
		},
		Operands::LookupSwitch { pairs, .. } => {
			1 + switch_padding(pos) + 8 + 8 * pairs.len() as u32
		},
		Operands::Fixed(operands) => {
			let shapes = shapes(instruction.opcode)
				.ok_or(Error::UnknownOpcode { opcode: instruction.opcode, pos })?;
			if wide_form(instruction.opcode, operands) {
				if instruction.opcode == opcode::IINC { 6 } else { 4 }
			} else {
				1 + shapes.iter().map(|shape| shape.width.bytes()).sum::<u32>()
			}
		},
	})
}

/// Decodes a method body into instructions, one pass, one cursor.
///
/// Branch operands keep their wire form: offsets relative to the owning
/// instruction's position. Alignment padding is skipped, not kept.
pub fn disassemble(code: &[u8]) -> Result<Vec<Instruction>> {
	let mut r = Cursor::new(code);
	let mut instructions = Vec::new();

	while (r.position() as usize) < code.len() {
		let pos = r.position() as u32;

		let instruction = read_instruction(&mut r, code.len(), pos).map_err(|e| match e {
			Error::Io(io) if io.kind() == std::io::ErrorKind::UnexpectedEof => {
				Error::MalformedCode { pos, reason: "truncated instruction".to_owned() }
			},
			e => e,
		})?;

		instructions.push(instruction);
	}

	Ok(instructions)
}

fn read_instruction(r: &mut Cursor<&[u8]>, code_len: usize, pos: u32) -> Result<Instruction> {
	let op = r.read_u8()?;
	Ok(match op {
		opcode::WIDE => {
			let real = r.read_u8()?;
			let operands = match real {
				opcode::ILOAD..=opcode::ALOAD |
				opcode::ISTORE..=opcode::ASTORE |
				opcode::RET => vec![Operand::LocalIndex(r.read_u16()?)],
				opcode::IINC => vec![
					Operand::LocalIndex(r.read_u16()?),
					Operand::Literal(r.read_i16()? as i32),
				],
				real => return Err(Error::MalformedCode {
					pos,
					reason: format!("opcode {real:#04x} has no wide form"),
				}),
			};
			Instruction::new(pos, real, Operands::Fixed(operands))
		},
		opcode::TABLESWITCH => {
			r.skip(switch_padding(pos) as u64)?;

			let default = r.read_i32()?;
			let low = r.read_i32()?;
			let high = r.read_i32()?;
			if low > high {
				return Err(Error::MalformedCode {
					pos,
					reason: format!("tableswitch has low {low} greater than high {high}"),
				});
			}

			// The entry count is derived, never stored; make sure it fits in
			// the remaining bytes before trusting it.
			let count = (high as i64 - low as i64 + 1) as u64;
			let remaining = code_len as u64 - r.position();
			if count * 4 > remaining {
				return Err(Error::MalformedCode {
					pos,
					reason: format!("tableswitch claims {count} entries but only {remaining} bytes remain"),
				});
			}

			let offsets = r.read_vec(|_| Ok(count as usize), |r| r.read_i32())?;
			Instruction::new(pos, op, Operands::TableSwitch { default, low, high, offsets })
		},
		opcode::LOOKUPSWITCH => {
			r.skip(switch_padding(pos) as u64)?;

			let default = r.read_i32()?;
			let npairs = r.read_i32()?;
			if npairs < 0 {
				return Err(Error::MalformedCode {
					pos,
					reason: format!("lookupswitch has negative npairs {npairs}"),
				});
			}

			let remaining = code_len as u64 - r.position();
			if npairs as u64 * 8 > remaining {
				return Err(Error::MalformedCode {
					pos,
					reason: format!("lookupswitch claims {npairs} pairs but only {remaining} bytes remain"),
				});
			}

			let pairs = r.read_vec(
				|_| Ok(npairs as usize),
				|r| Ok((r.read_i32()?, r.read_i32()?)),
			)?;
			Instruction::new(pos, op, Operands::LookupSwitch { default, pairs })
		},
		op => {
			let shapes = shapes(op).ok_or(Error::UnknownOpcode { opcode: op, pos })?;

			let mut operands = Vec::with_capacity(shapes.len());
			for shape in shapes {
				operands.push(read_operand(r, shape)?);
			}
			Instruction::new(pos, op, Operands::Fixed(operands))
		},
	})
}

fn read_operand(r: &mut impl ClassRead, shape: &Shape) -> Result<Operand> {
	Ok(match (shape.kind, shape.width) {
		(OperandKind::Literal, Width::U8) => Operand::Literal(r.read_u8()? as i32),
		(OperandKind::Literal, Width::I8) => Operand::Literal(r.read_i8()? as i32),
		(OperandKind::Literal, Width::I16) => Operand::Literal(r.read_i16()? as i32),
		(OperandKind::LocalIndex, Width::U8) => Operand::LocalIndex(r.read_u8()? as u16),
		(OperandKind::ConstantIndex, Width::U8) => Operand::ConstantIndex(r.read_u8()? as u16),
		(OperandKind::ConstantIndex, Width::U16) => Operand::ConstantIndex(r.read_u16()?),
		(OperandKind::Branch, Width::I16) => Operand::Branch(r.read_i16()? as i32),
		(OperandKind::Branch, Width::I32) => Operand::Branch(r.read_i32()?),
		// The shape tables above don't contain any other combination.
		_ => unreachable!(),
	})
}

/// The mirror of [`disassemble`]: re-encodes instructions into bytes.
///
/// Positions are the running output length; alignment padding is always
/// regenerated from them, and wideness is re-derived from operand values, so
/// `assemble(&disassemble(code)?)? == code` for any valid body — except that
/// a gratuitously wide-encoded instruction with small operands comes back in
/// its canonical narrow form.
pub fn assemble(instructions: &[Instruction]) -> Result<Vec<u8>> {
	let mut out = Vec::new();

	for instruction in instructions {
		emit(&mut out, instruction)?;
	}

	Ok(out)
}

fn emit(out: &mut Vec<u8>, instruction: &Instruction) -> Result<()> {
	let pos = out.len() as u32;
	let op = instruction.opcode;

	match &instruction.operands {
		Operands::TableSwitch { default, low, high, offsets } => {
			if op != opcode::TABLESWITCH {
				return Err(mismatch(pos, op, "tableswitch operands"));
			}
			let count = (*high as i64) - (*low as i64) + 1;
			if *low > *high || offsets.len() as i64 != count {
				return Err(Error::MalformedCode {
					pos,
					reason: format!(
						"tableswitch over {low}..={high} needs {count} offsets, has {}",
						offsets.len(),
					),
				});
			}

			out.write_u8(op)?;
			for _ in 0..switch_padding(pos) {
				out.write_u8(0)?;
			}
			out.write_i32(*default)?;
			out.write_i32(*low)?;
			out.write_i32(*high)?;
			for offset in offsets {
				out.write_i32(*offset)?;
			}
		},
		Operands::LookupSwitch { default, pairs } => {
			if op != opcode::LOOKUPSWITCH {
				return Err(mismatch(pos, op, "lookupswitch operands"));
			}

			out.write_u8(op)?;
			for _ in 0..switch_padding(pos) {
				out.write_u8(0)?;
			}
			out.write_i32(*default)?;
			out.write_usize_as_u32("lookupswitch pair count", pairs.len())?;
			for (key, offset) in pairs {
				out.write_i32(*key)?;
				out.write_i32(*offset)?;
			}
		},
		Operands::Fixed(operands) => {
			let shapes = shapes(op).ok_or(Error::UnknownOpcode { opcode: op, pos })?;
			if operands.len() != shapes.len() {
				return Err(Error::MalformedCode {
					pos,
					reason: format!(
						"opcode {op:#04x} takes {} operands, has {}",
						shapes.len(),
						operands.len(),
					),
				});
			}

			if wide_form(op, operands) {
				out.write_u8(opcode::WIDE)?;
				out.write_u8(op)?;
				match operands.first() {
					Some(Operand::LocalIndex(index)) => out.write_u16(*index)?,
					_ => return Err(mismatch(pos, op, "a local index")),
				}
				if op == opcode::IINC {
					match operands.get(1) {
						Some(Operand::Literal(value)) => {
							let value = i16::try_from(*value).map_err(|_| Error::MalformedCode {
								pos,
								reason: format!("iinc increment {value:?} does not fit even the wide encoding"),
							})?;
							out.write_i16(value)?;
						},
						_ => return Err(mismatch(pos, op, "an increment literal")),
					}
				}
			} else {
				out.write_u8(op)?;
				for (shape, operand) in shapes.iter().zip(operands) {
					write_operand(out, pos, op, shape, operand)?;
				}
			}
		},
	}

	Ok(())
}

fn write_operand(
	out: &mut Vec<u8>,
	pos: u32,
	op: u8,
	shape: &Shape,
	operand: &Operand,
) -> Result<()> {
	let out_of_range = |value: i64| Error::MalformedCode {
		pos,
		reason: format!("operand {value} of opcode {op:#04x} does not fit its encoding"),
	};

	match (shape.kind, shape.width, operand) {
		(OperandKind::Literal, Width::U8, Operand::Literal(value)) => {
			out.write_u8(u8::try_from(*value).map_err(|_| out_of_range(*value as i64))?)?;
		},
		(OperandKind::Literal, Width::I8, Operand::Literal(value)) => {
			out.write_i8(i8::try_from(*value).map_err(|_| out_of_range(*value as i64))?)?;
		},
		(OperandKind::Literal, Width::I16, Operand::Literal(value)) => {
			out.write_i16(i16::try_from(*value).map_err(|_| out_of_range(*value as i64))?)?;
		},
		(OperandKind::LocalIndex, Width::U8, Operand::LocalIndex(index)) => {
			// The wide check already ruled out anything over 0xff.
			out.write_u8(*index as u8)?;
		},
		(OperandKind::ConstantIndex, Width::U8, Operand::ConstantIndex(index)) => {
			out.write_u8(u8::try_from(*index).map_err(|_| out_of_range(*index as i64))?)?;
		},
		(OperandKind::ConstantIndex, Width::U16, Operand::ConstantIndex(index)) => {
			out.write_u16(*index)?;
		},
		(OperandKind::Branch, Width::I16, Operand::Branch(offset)) => {
			out.write_i16(i16::try_from(*offset).map_err(|_| out_of_range(*offset as i64))?)?;
		},
		(OperandKind::Branch, Width::I32, Operand::Branch(offset)) => {
			out.write_i32(*offset)?;
		},
		(kind, _, _) => return Err(mismatch(pos, op, match kind {
			OperandKind::Literal => "a literal",
			OperandKind::LocalIndex => "a local index",
			OperandKind::ConstantIndex => "a constant index",
			OperandKind::Branch => "a branch offset",
		})),
	}

	Ok(())
}

fn mismatch(pos: u32, op: u8, expected: &str) -> Error {
	Error::MalformedCode {
		pos,
		reason: format!("opcode {op:#04x} expects {expected}"),
	}
}

#[cfg(test)]
mod testing {
	use anyhow::Result;
	use pretty_assertions::assert_eq;
	use crate::Error;
	use crate::class_constants::opcode;
	use crate::code::insn::{assemble, disassemble, Instruction, Operand, Operands};

	fn round_trip(code: &[u8]) -> Result<Vec<Instruction>> {
		let instructions = disassemble(code)?;
		assert_eq!(assemble(&instructions)?, code);
		Ok(instructions)
	}

	#[test]
	fn fixed_shapes() -> Result<()> {
		let code = [
			opcode::BIPUSH, 0xfb, // bipush -5
			opcode::SIPUSH, 0x01, 0x00, // sipush 256
			opcode::LDC, 0x07,
			opcode::ALOAD, 0x02,
			opcode::GETSTATIC, 0x00, 0x10,
			opcode::INVOKEINTERFACE, 0x00, 0x11, 0x02, 0x00,
			opcode::IINC, 0x01, 0xff, // iinc 1, -1
			opcode::RETURN,
		];
		let instructions = round_trip(&code)?;

		assert_eq!(instructions[0].operands, Operands::Fixed(vec![Operand::Literal(-5)]));
		assert_eq!(instructions[1].operands, Operands::Fixed(vec![Operand::Literal(256)]));
		assert_eq!(instructions[2].operands, Operands::Fixed(vec![Operand::ConstantIndex(7)]));
		assert_eq!(instructions[6].operands, Operands::Fixed(vec![
			Operand::LocalIndex(1),
			Operand::Literal(-1),
		]));
		assert_eq!(instructions[7].pos, 20);
		Ok(())
	}

	#[test]
	fn branches_stay_relative() -> Result<()> {
		let code = [
			opcode::IFEQ, 0x00, 0x04, // pos 0, target 4
			opcode::NOP,
			opcode::RETURN, // pos 4
		];
		let instructions = round_trip(&code)?;
		assert_eq!(instructions[0].operands, Operands::Fixed(vec![Operand::Branch(4)]));
		Ok(())
	}

	#[test]
	fn tableswitch_round_trip_with_padding() -> Result<()> {
		// iconst_1 at 0, tableswitch at 1: data starts at 2, so two padding
		// bytes align it to 4. Three cases over 1..=3 plus the default, each
		// jumping to one of the returns at 28..=31.
		let mut code = vec![opcode::ICONST_1, opcode::TABLESWITCH, 0, 0];
		for value in [30i32, 1, 3, 27, 28, 29] {
			code.extend(value.to_be_bytes());
		}
		code.extend([opcode::RETURN, opcode::RETURN, opcode::RETURN, opcode::RETURN]);
		assert_eq!(code.len(), 32);

		let instructions = round_trip(&code)?;
		assert_eq!(instructions.len(), 6);
		assert_eq!(instructions[1], Instruction::new(1, opcode::TABLESWITCH, Operands::TableSwitch {
			default: 30,
			low: 1,
			high: 3,
			offsets: vec![27, 28, 29],
		}));
		Ok(())
	}

	#[test]
	fn lookupswitch_round_trip() -> Result<()> {
		// lookupswitch at 0: data starts at 4 after three padding bytes.
		let mut code = vec![opcode::LOOKUPSWITCH, 0, 0, 0];
		for value in [30i32, 2, 1, 28, 3, 29] {
			code.extend(value.to_be_bytes());
		}
		code.extend([opcode::RETURN, opcode::RETURN, opcode::RETURN]);

		let instructions = round_trip(&code)?;
		assert_eq!(instructions[0].operands, Operands::LookupSwitch {
			default: 30,
			pairs: vec![(1, 28), (3, 29)],
		});
		Ok(())
	}

	#[test]
	fn wide_round_trip() -> Result<()> {
		let code = [
			opcode::WIDE, opcode::ILOAD, 0x01, 0x2c, // wide iload 300
			opcode::WIDE, opcode::IINC, 0x01, 0x2c, 0x00, 0xc8, // wide iinc 300, 200
			opcode::RETURN,
		];
		let instructions = round_trip(&code)?;

		assert_eq!(instructions[0], Instruction::new(0, opcode::ILOAD, Operands::Fixed(vec![
			Operand::LocalIndex(300),
		])));
		assert_eq!(instructions[1].pos, 4);
		assert_eq!(instructions[2].pos, 10);
		Ok(())
	}

	#[test]
	fn gratuitous_wide_encoding_is_canonicalized() -> Result<()> {
		// wide iload 5 is legal but pointless; it comes back narrow.
		let code = [opcode::WIDE, opcode::ILOAD, 0x00, 0x05];
		let instructions = disassemble(&code)?;
		assert_eq!(assemble(&instructions)?, [opcode::ILOAD, 0x05]);
		Ok(())
	}

	#[test]
	fn widening_is_derived_from_operands() -> Result<()> {
		let instructions = [
			Instruction::new(0, opcode::ILOAD, Operands::Fixed(vec![Operand::LocalIndex(300)])),
			Instruction::new(0, opcode::IINC, Operands::Fixed(vec![
				Operand::LocalIndex(2),
				Operand::Literal(1000),
			])),
		];
		assert_eq!(assemble(&instructions)?, [
			opcode::WIDE, opcode::ILOAD, 0x01, 0x2c,
			opcode::WIDE, opcode::IINC, 0x00, 0x02, 0x03, 0xe8,
		]);
		Ok(())
	}

	#[test]
	fn unknown_opcode_errors() {
		let result = disassemble(&[0xca]);
		assert!(matches!(result, Err(Error::UnknownOpcode { opcode: 0xca, pos: 0 })));
	}

	#[test]
	fn truncated_instruction_errors() {
		let result = disassemble(&[opcode::BIPUSH]);
		assert!(matches!(result, Err(Error::MalformedCode { pos: 0, .. })));
	}

	#[test]
	fn tableswitch_with_inverted_bounds_errors() {
		let mut code = vec![opcode::TABLESWITCH, 0, 0, 0];
		for value in [0i32, 5, 2] {
			code.extend(value.to_be_bytes());
		}
		assert!(matches!(disassemble(&code), Err(Error::MalformedCode { .. })));
	}

	#[test]
	fn branch_too_far_for_narrow_encoding_errors() {
		let instructions = [
			Instruction::new(0, opcode::GOTO, Operands::Fixed(vec![Operand::Branch(0x10000)])),
		];
		assert!(matches!(assemble(&instructions), Err(Error::MalformedCode { .. })));
	}
}

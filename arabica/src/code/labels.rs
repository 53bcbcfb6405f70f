//! Assembling instructions whose branch targets are symbolic labels instead
//! of literal offsets.
//!
//! Offsets can't be written in one go: an instruction's size may depend on
//! its own position (switch alignment), and its position depends on every
//! size before it. So assembly is staged — first a forward walk fixes every
//! position (each instruction's size is computed at its now-known position),
//! then every label-valued operand is rewritten to `target − position`, and
//! only then are bytes emitted.

use std::collections::HashMap;
use crate::{Error, Result};
use crate::code::insn::{self, Instruction, Operand, Operands};

/// A symbolic name for a position in the bytecode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(pub u16);

/// An operand whose branches name [`Label`]s rather than offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabeledOperand {
	Literal(i32),
	LocalIndex(u16),
	ConstantIndex(u16),
	Branch(Label),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabeledOperands {
	Fixed(Vec<LabeledOperand>),
	TableSwitch {
		default: Label,
		low: i32,
		high: i32,
		targets: Vec<Label>,
	},
	LookupSwitch {
		default: Label,
		pairs: Vec<(i32, Label)>,
	},
}

/// An instruction in label form. The labels in `labels` are bound to this
/// instruction's position; branches anywhere in the stream may name them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledInstruction {
	pub labels: Vec<Label>,
	pub opcode: u8,
	pub operands: LabeledOperands,
}

impl LabeledInstruction {
	pub fn new(opcode: u8, operands: LabeledOperands) -> LabeledInstruction {
		LabeledInstruction { labels: Vec::new(), opcode, operands }
	}

	pub fn labeled(label: Label, opcode: u8, operands: LabeledOperands) -> LabeledInstruction {
		LabeledInstruction { labels: vec![label], opcode, operands }
	}

	/// A plain instruction with no operands and no labels.
	pub fn bare(opcode: u8) -> LabeledInstruction {
		LabeledInstruction::new(opcode, LabeledOperands::Fixed(Vec::new()))
	}
}

/// Stands in for a not-yet-resolved branch while sizes are computed; branch
/// encodings are fixed-width per opcode, so any value sizes the same.
const PLACEHOLDER: i32 = 0;

fn placeholder(instruction: &LabeledInstruction, pos: u32) -> Instruction {
	let operands = match &instruction.operands {
		LabeledOperands::Fixed(operands) => Operands::Fixed(
			operands.iter()
				.map(|operand| match operand {
					LabeledOperand::Literal(value) => Operand::Literal(*value),
					LabeledOperand::LocalIndex(index) => Operand::LocalIndex(*index),
					LabeledOperand::ConstantIndex(index) => Operand::ConstantIndex(*index),
					LabeledOperand::Branch(_) => Operand::Branch(PLACEHOLDER),
				})
				.collect()
		),
		LabeledOperands::TableSwitch { low, high, targets, .. } => Operands::TableSwitch {
			default: PLACEHOLDER,
			low: *low,
			high: *high,
			offsets: vec![PLACEHOLDER; targets.len()],
		},
		LabeledOperands::LookupSwitch { pairs, .. } => Operands::LookupSwitch {
			default: PLACEHOLDER,
			pairs: pairs.iter().map(|(key, _)| (*key, PLACEHOLDER)).collect(),
		},
	};
	Instruction::new(pos, instruction.opcode, operands)
}

/// Resolves labels to relative offsets and assembles the result.
///
/// Fails with [`Error::UnboundLabel`] for a branch to a label no
/// instruction carries, and [`Error::DuplicateLabel`] when two instructions
/// carry the same one.
pub fn assemble_labeled(instructions: &[LabeledInstruction]) -> Result<Vec<u8>> {
	// First walk: bind labels and fix every position. The size of each
	// instruction is computed at its already-known position, which is what
	// makes switch alignment come out right.
	let mut resolved = Vec::with_capacity(instructions.len());
	let mut bound = HashMap::new();

	let mut pos = 0u32;
	for instruction in instructions {
		for label in &instruction.labels {
			if bound.insert(*label, pos).is_some() {
				return Err(Error::DuplicateLabel(label.0));
			}
		}

		let placeholder = placeholder(instruction, pos);
		pos += insn::encoded_size(&placeholder, pos)?;
		resolved.push(placeholder);
	}

	// Second walk: every label-valued operand becomes an offset relative to
	// its instruction's position.
	for (instruction, resolved) in instructions.iter().zip(&mut resolved) {
		let base = resolved.pos;
		let offset_to = |label: &Label| -> Result<i32> {
			let target = bound.get(label).ok_or(Error::UnboundLabel(label.0))?;
			Ok((*target as i64 - base as i64) as i32)
		};

		match (&instruction.operands, &mut resolved.operands) {
			(LabeledOperands::Fixed(labeled), Operands::Fixed(operands)) => {
				for (labeled, operand) in labeled.iter().zip(operands) {
					if let LabeledOperand::Branch(label) = labeled {
						*operand = Operand::Branch(offset_to(label)?);
					}
				}
			},
			(
				LabeledOperands::TableSwitch { default, targets, .. },
				Operands::TableSwitch { default: resolved_default, offsets, .. },
			) => {
				*resolved_default = offset_to(default)?;
				for (target, offset) in targets.iter().zip(offsets) {
					*offset = offset_to(target)?;
				}
			},
			(
				LabeledOperands::LookupSwitch { default, pairs },
				Operands::LookupSwitch { default: resolved_default, pairs: resolved_pairs },
			) => {
				*resolved_default = offset_to(default)?;
				for ((_, target), (_, offset)) in pairs.iter().zip(resolved_pairs) {
					*offset = offset_to(target)?;
				}
			},
			// placeholder() maps each variant onto itself.
			_ => unreachable!(),
		}
	}

	insn::assemble(&resolved)
}

#[cfg(test)]
mod testing {
	use anyhow::Result;
	use pretty_assertions::assert_eq;
	use crate::Error;
	use crate::class_constants::opcode;
	use crate::code::insn::disassemble;
	use crate::code::labels::{
		assemble_labeled, Label, LabeledInstruction, LabeledOperand, LabeledOperands,
	};

	#[test]
	fn forward_branch() -> Result<()> {
		let skip = Label(0);
		let instructions = [
			LabeledInstruction::new(opcode::IFEQ, LabeledOperands::Fixed(vec![
				LabeledOperand::Branch(skip),
			])),
			LabeledInstruction::bare(opcode::NOP),
			LabeledInstruction::labeled(skip, opcode::RETURN, LabeledOperands::Fixed(Vec::new())),
		];

		assert_eq!(assemble_labeled(&instructions)?, [
			opcode::IFEQ, 0x00, 0x04,
			opcode::NOP,
			opcode::RETURN,
		]);
		Ok(())
	}

	#[test]
	fn backward_branch() -> Result<()> {
		let head = Label(0);
		let instructions = [
			LabeledInstruction::labeled(head, opcode::NOP, LabeledOperands::Fixed(Vec::new())),
			LabeledInstruction::new(opcode::GOTO, LabeledOperands::Fixed(vec![
				LabeledOperand::Branch(head),
			])),
		];

		assert_eq!(assemble_labeled(&instructions)?, [
			opcode::NOP,
			opcode::GOTO, 0xff, 0xff, // offset -1
		]);
		Ok(())
	}

	#[test]
	fn lookupswitch_labels_resolve_through_alignment() -> Result<()> {
		let (one, three, other) = (Label(1), Label(3), Label(99));
		let instructions = [
			LabeledInstruction::bare(opcode::ICONST_1),
			LabeledInstruction::new(opcode::LOOKUPSWITCH, LabeledOperands::LookupSwitch {
				default: other,
				pairs: vec![(1, one), (3, three)],
			}),
			LabeledInstruction::labeled(one, opcode::RETURN, LabeledOperands::Fixed(Vec::new())),
			LabeledInstruction::labeled(three, opcode::RETURN, LabeledOperands::Fixed(Vec::new())),
			LabeledInstruction::labeled(other, opcode::RETURN, LabeledOperands::Fixed(Vec::new())),
		];

		let code = assemble_labeled(&instructions)?;

		// The emitted bytes decode back to branches at the labeled returns.
		let decoded = disassemble(&code)?;
		let targets: Vec<u32> = crate::code::blocks::jump_targets(&decoded).collect();
		assert_eq!(targets, vec![28, 29, 30]);
		assert_eq!(code.len(), 31);
		Ok(())
	}

	#[test]
	fn unbound_label_errors() {
		let instructions = [
			LabeledInstruction::new(opcode::GOTO, LabeledOperands::Fixed(vec![
				LabeledOperand::Branch(Label(7)),
			])),
		];
		assert!(matches!(assemble_labeled(&instructions), Err(Error::UnboundLabel(7))));
	}

	#[test]
	fn duplicate_label_errors() {
		let label = Label(1);
		let instructions = [
			LabeledInstruction::labeled(label, opcode::NOP, LabeledOperands::Fixed(Vec::new())),
			LabeledInstruction::labeled(label, opcode::RETURN, LabeledOperands::Fixed(Vec::new())),
		];
		assert!(matches!(assemble_labeled(&instructions), Err(Error::DuplicateLabel(1))));
	}
}

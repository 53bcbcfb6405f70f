//! Jump-target and basic-block analysis over a decoded instruction stream.
//!
//! Everything here is derived on demand from the instructions passed in;
//! nothing is cached, so it can never go stale after an edit. Recompute
//! after changing the stream.

use std::collections::BTreeSet;
use crate::Result;
use crate::code::insn::{self, Instruction, Operand, Operands};

/// The absolute positions this instruction's branch operands point at.
fn branch_targets(instruction: &Instruction) -> Vec<u32> {
	let base = instruction.pos as i64;
	let absolute = |offset: &i32| u32::try_from(base + *offset as i64).ok();

	match &instruction.operands {
		Operands::Fixed(operands) => operands.iter()
			.filter_map(|operand| match operand {
				Operand::Branch(offset) => absolute(offset),
				_ => None,
			})
			.collect(),
		Operands::TableSwitch { default, offsets, .. } => {
			offsets.iter().chain([default]).filter_map(absolute).collect()
		},
		Operands::LookupSwitch { default, pairs } => {
			pairs.iter().map(|(_, offset)| offset).chain([default]).filter_map(absolute).collect()
		},
	}
}

/// The deduplicated, ascending set of absolute positions targeted by any
/// branch operand, including both switch forms' entries and defaults.
pub fn jump_targets(instructions: &[Instruction]) -> impl Iterator<Item = u32> {
	let mut targets = BTreeSet::new();
	for instruction in instructions {
		targets.extend(branch_targets(instruction));
	}
	targets.into_iter()
}

/// The positions starting a new basic block: every jump target, the
/// instruction following any branch, and every return instruction.
pub fn block_starts(instructions: &[Instruction]) -> BTreeSet<u32> {
	let mut starts: BTreeSet<u32> = jump_targets(instructions).collect();

	for window in instructions.windows(2) {
		if window[0].is_branch() {
			starts.insert(window[1].pos);
		}
	}
	for instruction in instructions {
		if instruction.is_return() {
			starts.insert(instruction.pos);
		}
	}

	starts
}

/// Splits the method into half-open `(start, end)` ranges at the block
/// starts. The ranges are non-overlapping, ascending, and cover the whole
/// body; a trailing return that is not itself a branch target still closes
/// the final block.
pub fn blocks(instructions: &[Instruction]) -> Result<Vec<(u32, u32)>> {
	let Some(last) = instructions.last() else {
		return Ok(Vec::new());
	};
	let code_end = last.pos + insn::encoded_size(last, last.pos)?;

	let mut starts = block_starts(instructions);
	starts.insert(0);
	// Targets at or past the end of the body don't open a block.
	starts.retain(|&start| start < code_end);

	let starts: Vec<u32> = starts.into_iter().collect();
	let blocks = starts.iter()
		.zip(starts.iter().skip(1).chain([&code_end]))
		.map(|(&start, &end)| (start, end))
		.collect();

	Ok(blocks)
}

#[cfg(test)]
mod testing {
	use anyhow::Result;
	use pretty_assertions::assert_eq;
	use crate::class_constants::opcode;
	use crate::code::blocks::{blocks, jump_targets};
	use crate::code::insn::disassemble;

	/// `iconst_1; lookupswitch {1: 28, 3: 29, default: 30}; return; return;
	/// return` — the scenario with three labels and four blocks.
	fn switch_method() -> Vec<u8> {
		let mut code = vec![opcode::ICONST_1, opcode::LOOKUPSWITCH, 0, 0];
		// Offsets are relative to the lookupswitch at position 1.
		for value in [29i32, 2, 1, 27, 3, 28] {
			code.extend(value.to_be_bytes());
		}
		code.extend([opcode::RETURN, opcode::RETURN, opcode::RETURN]);
		assert_eq!(code.len(), 31);
		code
	}

	#[test]
	fn switch_targets_and_blocks() -> Result<()> {
		let instructions = disassemble(&switch_method())?;

		let targets: Vec<u32> = jump_targets(&instructions).collect();
		assert_eq!(targets, vec![28, 29, 30]);

		assert_eq!(blocks(&instructions)?, vec![
			(0, 28),
			(28, 29),
			(29, 30),
			(30, 31),
		]);
		Ok(())
	}

	#[test]
	fn conditional_branch_splits_blocks() -> Result<()> {
		let code = [
			opcode::ILOAD, 0x00,
			opcode::IFEQ, 0x00, 0x05, // pos 2, target 7
			opcode::ICONST_1,
			opcode::IRETURN, // pos 6
			opcode::ICONST_2, // pos 7
			opcode::IRETURN,
		];
		let instructions = disassemble(&code)?;

		let targets: Vec<u32> = jump_targets(&instructions).collect();
		assert_eq!(targets, vec![7]);

		// ireturn at 6 and 8 start blocks of their own.
		assert_eq!(blocks(&instructions)?, vec![
			(0, 5),
			(5, 6),
			(6, 7),
			(7, 8),
			(8, 9),
		]);
		Ok(())
	}

	#[test]
	fn backward_branches_resolve() -> Result<()> {
		let code = [
			opcode::NOP, // pos 0, loop head
			opcode::GOTO, 0xff, 0xff, // pos 1, offset -1, target 0
		];
		let instructions = disassemble(&code)?;

		let targets: Vec<u32> = jump_targets(&instructions).collect();
		assert_eq!(targets, vec![0]);
		Ok(())
	}

	#[test]
	fn straight_line_code_is_one_block() -> Result<()> {
		let code = [opcode::ICONST_1, opcode::ICONST_2, opcode::POP, opcode::POP, opcode::NOP];
		let instructions = disassemble(&code)?;

		assert_eq!(jump_targets(&instructions).count(), 0);
		assert_eq!(blocks(&instructions)?, vec![(0, 5)]);
		Ok(())
	}
}

//! Method bodies: the `Code` attribute payload and the bytecode it carries.
//!
//! The persisted form of a method body is the raw byte blob in
//! [`CodeAttribute::code`]; decoded [`Instruction`]s are ephemeral views
//! produced by [`CodeAttribute::disassemble`] and thrown away after use.

use crate::{ClassRead, ClassWrite, Result};
use crate::attribute::AttributeTable;
use crate::pool::ConstantPool;

pub mod blocks;
mod insn;
pub mod labels;

pub use insn::{assemble, disassemble, Instruction, Operand, OperandKind, Operands};

/// One `{start_pc, end_pc, handler_pc, catch_type}` row of the exception
/// table; the `start_pc..end_pc` range is half-open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionTableEntry {
	pub start_pc: u16,
	pub end_pc: u16,
	pub handler_pc: u16,
	/// Pool index of the caught class, or 0 for a catch-all.
	pub catch_type: u16,
}

/// The payload of a `Code` attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodeAttribute {
	pub max_stack: u16,
	pub max_locals: u16,
	pub code: Vec<u8>,
	pub exception_table: Vec<ExceptionTableEntry>,
	pub attributes: AttributeTable,
}

impl CodeAttribute {
	pub fn unpack(pool: &ConstantPool, reader: &mut impl ClassRead) -> Result<CodeAttribute> {
		let max_stack = reader.read_u16()?;
		let max_locals = reader.read_u16()?;

		let code_length = reader.read_u32()?;
		let code = reader.read_u8_vec(code_length as usize)?;

		let exception_table = reader.read_vec(
			|r| r.read_u16_as_usize(),
			|r| Ok(ExceptionTableEntry {
				start_pc: r.read_u16()?,
				end_pc: r.read_u16()?,
				handler_pc: r.read_u16()?,
				catch_type: r.read_u16()?,
			})
		)?;

		let attributes = AttributeTable::unpack(pool, reader)?;

		Ok(CodeAttribute { max_stack, max_locals, code, exception_table, attributes })
	}

	pub fn pack(&self, writer: &mut impl ClassWrite) -> Result<()> {
		writer.write_u16(self.max_stack)?;
		writer.write_u16(self.max_locals)?;

		writer.write_usize_as_u32("code length", self.code.len())?;
		writer.write_u8_slice(&self.code)?;

		writer.write_usize_as_u16("exception table length", self.exception_table.len())?;
		for entry in &self.exception_table {
			writer.write_u16(entry.start_pc)?;
			writer.write_u16(entry.end_pc)?;
			writer.write_u16(entry.handler_pc)?;
			writer.write_u16(entry.catch_type)?;
		}

		self.attributes.pack(writer)
	}

	/// Decodes the raw bytecode into instructions. See [`disassemble`].
	pub fn disassemble(&self) -> Result<Vec<Instruction>> {
		disassemble(&self.code)
	}

	/// Re-encodes instructions into this body's raw bytecode. See
	/// [`assemble`].
	pub fn set_instructions(&mut self, instructions: &[Instruction]) -> Result<()> {
		self.code = assemble(instructions)?;
		Ok(())
	}
}

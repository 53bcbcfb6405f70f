use thiserror::Error;

/// The errors produced while decoding, editing and re-encoding class files.
///
/// All binary-decode errors are fatal to the decode of the enclosing
/// structure; no partial result is handed out.
#[derive(Debug, Error)]
pub enum Error {
	#[error("i/o error: {0}")]
	Io(#[from] std::io::Error),

	/// Bad magic number, bad version fields, or header indices that don't
	/// resolve the way the class file format requires.
	#[error("malformed class file header: {0}")]
	MalformedHeader(String),

	/// Unknown constant tag or a truncated constant pool entry.
	#[error("malformed constant pool: {0}")]
	MalformedPool(String),

	/// A registered attribute decoder didn't consume exactly its declared
	/// length, or its payload violates the shape its name promises. Unknown
	/// attribute names never produce this; they pass through.
	#[error("corrupt {name} attribute: {reason}")]
	CorruptAttribute { name: String, reason: String },

	/// Malformed field or method descriptor string.
	#[error("invalid descriptor {descriptor:?}: {reason}")]
	Descriptor { descriptor: String, reason: String },

	/// A constant pool index that is zero, out of range, points at the
	/// reserved upper slot of a Long/Double, or resolves to an entry of the
	/// wrong type.
	#[error("constant pool index {index} does not resolve: {reason}")]
	PoolIndex { index: u16, reason: String },

	/// The pool still has an unfilled gap; a sparse pool cannot be written
	/// out without renumbering every entry after the hole.
	#[error("constant pool has an unfilled gap at index {0} and cannot be packed")]
	SparsePool(u16),

	#[error("invalid modified utf-8 at byte offset {at}")]
	InvalidMutf8 { at: usize },

	#[error("unknown opcode {opcode:#04x} at bytecode offset {pos}")]
	UnknownOpcode { opcode: u8, pos: u32 },

	/// Structurally impossible bytecode: truncated instructions, a
	/// tableswitch with `low > high`, operand values that don't fit their
	/// encoding, and the like.
	#[error("malformed bytecode at offset {pos}: {reason}")]
	MalformedCode { pos: u32, reason: String },

	#[error("label {0} is referenced but never bound to an instruction")]
	UnboundLabel(u16),

	#[error("label {0} is bound to more than one instruction")]
	DuplicateLabel(u16),

	/// A count grew past what its wire encoding can hold.
	#[error("{what} of {value} does not fit the wire encoding")]
	Overflow { what: &'static str, value: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

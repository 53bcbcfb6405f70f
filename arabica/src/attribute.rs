//! The attribute system: named, length-prefixed metadata blobs attached to
//! classes, fields, methods and code bodies.
//!
//! Decoding dispatches on the attribute's name, resolved through the
//! constant pool and matched (lower-cased) against the fixed set of shapes
//! this crate knows. A name not in that set is never an error: the bytes are
//! kept verbatim in [`Attribute::Unknown`] so newer class files survive an
//! unpack→pack cycle untouched. A *known* name with a payload that doesn't
//! match its shape is an error, because that shape is a contract.

use std::io::Cursor;
use crate::{ClassRead, ClassWrite, Error, Result};
use crate::class_constants::attribute as name;
use crate::code::CodeAttribute;
use crate::pool::ConstantPool;

#[derive(Debug, Clone, PartialEq)]
pub struct InnerClass {
	pub inner_class_info_index: u16,
	pub outer_class_info_index: u16,
	pub inner_name_index: u16,
	pub inner_class_access_flags: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineNumber {
	pub start_pc: u16,
	pub line_number: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocalVariable {
	pub start_pc: u16,
	pub length: u16,
	pub name_index: u16,
	pub descriptor_index: u16,
	pub index: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocalVariableType {
	pub start_pc: u16,
	pub length: u16,
	pub name_index: u16,
	pub signature_index: u16,
	pub index: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapMethod {
	pub bootstrap_method_ref: u16,
	pub bootstrap_arguments: Vec<u16>,
}

/// One entry of a `StackMapTable` attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum StackMapFrame {
	/// Frame types 0–63; the offset delta is the frame type itself.
	Same { offset_delta: u8 },
	/// Frame types 64–127.
	SameLocals1StackItem { offset_delta: u8, stack: VerificationTypeInfo },
	/// Frame type 247.
	SameLocals1StackItemExtended { offset_delta: u16, stack: VerificationTypeInfo },
	/// Frame types 248–250; `k` locals are chopped.
	Chop { k: u8, offset_delta: u16 },
	/// Frame type 251.
	SameExtended { offset_delta: u16 },
	/// Frame types 252–254; the frame type is 251 plus the number of locals.
	Append { offset_delta: u16, locals: Vec<VerificationTypeInfo> },
	/// Frame type 255.
	Full {
		offset_delta: u16,
		locals: Vec<VerificationTypeInfo>,
		stack: Vec<VerificationTypeInfo>,
	},
}

#[derive(Debug, Clone, PartialEq)]
pub enum VerificationTypeInfo {
	Top,
	Integer,
	Float,
	Double,
	Long,
	Null,
	UninitializedThis,
	Object { cpool_index: u16 },
	Uninitialized { offset: u16 },
}

/// A decoded attribute. Every variant keeps the `name_index` it was read
/// with (or created with), so repacking reuses the exact pool reference.
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
	ConstantValue { name_index: u16, constantvalue_index: u16 },
	Code { name_index: u16, code: CodeAttribute },
	Deprecated { name_index: u16 },
	EnclosingMethod { name_index: u16, class_index: u16, method_index: u16 },
	Exceptions { name_index: u16, exception_index_table: Vec<u16> },
	InnerClasses { name_index: u16, classes: Vec<InnerClass> },
	LineNumberTable { name_index: u16, table: Vec<LineNumber> },
	LocalVariableTable { name_index: u16, table: Vec<LocalVariable> },
	LocalVariableTypeTable { name_index: u16, table: Vec<LocalVariableType> },
	Signature { name_index: u16, signature_index: u16 },
	SourceFile { name_index: u16, sourcefile_index: u16 },
	Synthetic { name_index: u16 },
	BootstrapMethods { name_index: u16, bootstrap_methods: Vec<BootstrapMethod> },
	StackMapTable { name_index: u16, entries: Vec<StackMapFrame> },
	/// Any attribute whose name isn't registered. The payload survives
	/// byte-for-byte.
	Unknown { name_index: u16, info: Vec<u8> },
}

impl Attribute {
	/// Reads one `(name_index, length, payload)` entry and dispatches the
	/// payload to the decoder registered for the name.
	pub fn unpack(pool: &ConstantPool, reader: &mut impl ClassRead) -> Result<Attribute> {
		let name_index = reader.read_u16()?;
		let length = reader.read_u32()?;
		let name = pool.get_utf8(name_index)?;

		let payload = reader.read_u8_vec(length as usize)?;
		let mut r = Cursor::new(payload.as_slice());

		let decoded = decode(pool, name_index, name, &mut r);
		let consumed = r.position();
		drop(r);

		let attribute = match decoded {
			Ok(Some(attribute)) => {
				// A registered decoder must consume exactly its declared length.
				if consumed != length as u64 {
					return Err(corrupt(name, format!(
						"consumed only {consumed} of {length} declared bytes",
					)));
				}
				attribute
			},
			Ok(None) => {
				log::debug!("passing through unknown attribute {name:?} ({length} bytes)");
				Attribute::Unknown { name_index, info: payload }
			},
			Err(Error::Io(io)) if io.kind() == std::io::ErrorKind::UnexpectedEof => {
				return Err(corrupt(name, format!("ran past its {length} declared bytes")));
			},
			Err(e) => return Err(e),
		};

		Ok(attribute)
	}

	/// Writes this attribute back as `(name_index, length, payload)`. The
	/// length is computed from the payload just produced, so it always
	/// matches.
	pub fn pack(&self, writer: &mut impl ClassWrite) -> Result<()> {
		let mut payload = Vec::new();
		self.write_payload(&mut payload)?;

		writer.write_u16(self.name_index())?;
		writer.write_usize_as_u32("attribute length", payload.len())?;
		writer.write_u8_slice(&payload)
	}

	pub fn name_index(&self) -> u16 {
		match *self {
			Attribute::ConstantValue { name_index, .. } |
			Attribute::Code { name_index, .. } |
			Attribute::Deprecated { name_index } |
			Attribute::EnclosingMethod { name_index, .. } |
			Attribute::Exceptions { name_index, .. } |
			Attribute::InnerClasses { name_index, .. } |
			Attribute::LineNumberTable { name_index, .. } |
			Attribute::LocalVariableTable { name_index, .. } |
			Attribute::LocalVariableTypeTable { name_index, .. } |
			Attribute::Signature { name_index, .. } |
			Attribute::SourceFile { name_index, .. } |
			Attribute::Synthetic { name_index } |
			Attribute::BootstrapMethods { name_index, .. } |
			Attribute::StackMapTable { name_index, .. } |
			Attribute::Unknown { name_index, .. } => name_index,
		}
	}

	/// The canonical name for the registered variants; [`None`] for
	/// [`Attribute::Unknown`], whose name only exists in the pool.
	pub fn canonical_name(&self) -> Option<&'static str> {
		Some(match self {
			Attribute::ConstantValue { .. } => name::CONSTANT_VALUE,
			Attribute::Code { .. } => name::CODE,
			Attribute::Deprecated { .. } => name::DEPRECATED,
			Attribute::EnclosingMethod { .. } => name::ENCLOSING_METHOD,
			Attribute::Exceptions { .. } => name::EXCEPTIONS,
			Attribute::InnerClasses { .. } => name::INNER_CLASSES,
			Attribute::LineNumberTable { .. } => name::LINE_NUMBER_TABLE,
			Attribute::LocalVariableTable { .. } => name::LOCAL_VARIABLE_TABLE,
			Attribute::LocalVariableTypeTable { .. } => name::LOCAL_VARIABLE_TYPE_TABLE,
			Attribute::Signature { .. } => name::SIGNATURE,
			Attribute::SourceFile { .. } => name::SOURCE_FILE,
			Attribute::Synthetic { .. } => name::SYNTHETIC,
			Attribute::BootstrapMethods { .. } => name::BOOTSTRAP_METHODS,
			Attribute::StackMapTable { .. } => name::STACK_MAP_TABLE,
			Attribute::Unknown { .. } => return None,
		})
	}

	/// The attribute's name as the pool spells it.
	pub fn name<'a>(&self, pool: &'a ConstantPool) -> Result<&'a str> {
		pool.get_utf8(self.name_index())
	}

	fn write_payload(&self, w: &mut Vec<u8>) -> Result<()> {
		match self {
			Attribute::ConstantValue { constantvalue_index, .. } => w.write_u16(*constantvalue_index),
			Attribute::Code { code, .. } => code.pack(w),
			Attribute::Deprecated { .. } | Attribute::Synthetic { .. } => Ok(()),
			Attribute::EnclosingMethod { class_index, method_index, .. } => {
				w.write_u16(*class_index)?;
				w.write_u16(*method_index)
			},
			Attribute::Exceptions { exception_index_table, .. } => {
				w.write_usize_as_u16("exception count", exception_index_table.len())?;
				for index in exception_index_table {
					w.write_u16(*index)?;
				}
				Ok(())
			},
			Attribute::InnerClasses { classes, .. } => {
				w.write_usize_as_u16("inner class count", classes.len())?;
				for class in classes {
					w.write_u16(class.inner_class_info_index)?;
					w.write_u16(class.outer_class_info_index)?;
					w.write_u16(class.inner_name_index)?;
					w.write_u16(class.inner_class_access_flags)?;
				}
				Ok(())
			},
			Attribute::LineNumberTable { table, .. } => {
				w.write_usize_as_u16("line number table length", table.len())?;
				for entry in table {
					w.write_u16(entry.start_pc)?;
					w.write_u16(entry.line_number)?;
				}
				Ok(())
			},
			Attribute::LocalVariableTable { table, .. } => {
				w.write_usize_as_u16("local variable table length", table.len())?;
				for entry in table {
					w.write_u16(entry.start_pc)?;
					w.write_u16(entry.length)?;
					w.write_u16(entry.name_index)?;
					w.write_u16(entry.descriptor_index)?;
					w.write_u16(entry.index)?;
				}
				Ok(())
			},
			Attribute::LocalVariableTypeTable { table, .. } => {
				w.write_usize_as_u16("local variable type table length", table.len())?;
				for entry in table {
					w.write_u16(entry.start_pc)?;
					w.write_u16(entry.length)?;
					w.write_u16(entry.name_index)?;
					w.write_u16(entry.signature_index)?;
					w.write_u16(entry.index)?;
				}
				Ok(())
			},
			Attribute::Signature { signature_index, .. } => w.write_u16(*signature_index),
			Attribute::SourceFile { sourcefile_index, .. } => w.write_u16(*sourcefile_index),
			Attribute::BootstrapMethods { bootstrap_methods, .. } => {
				w.write_usize_as_u16("bootstrap method count", bootstrap_methods.len())?;
				for method in bootstrap_methods {
					w.write_u16(method.bootstrap_method_ref)?;
					w.write_usize_as_u16("bootstrap argument count", method.bootstrap_arguments.len())?;
					for argument in &method.bootstrap_arguments {
						w.write_u16(*argument)?;
					}
				}
				Ok(())
			},
			Attribute::StackMapTable { entries, .. } => {
				w.write_usize_as_u16("stack map entry count", entries.len())?;
				for frame in entries {
					write_stack_map_frame(w, frame)?;
				}
				Ok(())
			},
			Attribute::Unknown { info, .. } => w.write_u8_slice(info),
		}
	}

	/// Builds a `SourceFile` attribute, interning the strings it needs.
	pub fn source_file(pool: &mut ConstantPool, source_file: &str) -> Result<Attribute> {
		Ok(Attribute::SourceFile {
			name_index: intern(pool, name::SOURCE_FILE)?,
			sourcefile_index: intern(pool, source_file)?,
		})
	}

	/// Builds a `Code` attribute around an existing method body.
	pub fn code(pool: &mut ConstantPool, code: CodeAttribute) -> Result<Attribute> {
		Ok(Attribute::Code {
			name_index: intern(pool, name::CODE)?,
			code,
		})
	}

	/// Builds a `Signature` attribute.
	pub fn signature(pool: &mut ConstantPool, signature: &str) -> Result<Attribute> {
		Ok(Attribute::Signature {
			name_index: intern(pool, name::SIGNATURE)?,
			signature_index: intern(pool, signature)?,
		})
	}
}

/// Reuses an existing `Utf8` entry for `value`, adding one only if missing.
fn intern(pool: &mut ConstantPool, value: &str) -> Result<u16> {
	match pool.find_utf8(value) {
		Some(index) => Ok(index),
		None => pool.add_utf8(value),
	}
}

fn corrupt(name: &str, reason: String) -> Error {
	Error::CorruptAttribute { name: name.to_owned(), reason }
}

/// The decoder registry: canonical names, compared lower-cased. Returns
/// [`None`] for unregistered names.
fn decode(
	pool: &ConstantPool,
	name_index: u16,
	name: &str,
	r: &mut Cursor<&[u8]>,
) -> Result<Option<Attribute>> {
	let attribute = match name.to_ascii_lowercase().as_str() {
		"constantvalue" => Attribute::ConstantValue {
			name_index,
			constantvalue_index: r.read_u16()?,
		},
		"code" => Attribute::Code {
			name_index,
			code: CodeAttribute::unpack(pool, r)?,
		},
		"deprecated" => Attribute::Deprecated { name_index },
		"enclosingmethod" => Attribute::EnclosingMethod {
			name_index,
			class_index: r.read_u16()?,
			method_index: r.read_u16()?,
		},
		"exceptions" => Attribute::Exceptions {
			name_index,
			exception_index_table: r.read_vec(
				|r| r.read_u16_as_usize(),
				|r| r.read_u16(),
			)?,
		},
		"innerclasses" => Attribute::InnerClasses {
			name_index,
			classes: r.read_vec(
				|r| r.read_u16_as_usize(),
				|r| Ok(InnerClass {
					inner_class_info_index: r.read_u16()?,
					outer_class_info_index: r.read_u16()?,
					inner_name_index: r.read_u16()?,
					inner_class_access_flags: r.read_u16()?,
				})
			)?,
		},
		"linenumbertable" => Attribute::LineNumberTable {
			name_index,
			table: r.read_vec(
				|r| r.read_u16_as_usize(),
				|r| Ok(LineNumber {
					start_pc: r.read_u16()?,
					line_number: r.read_u16()?,
				})
			)?,
		},
		"localvariabletable" => Attribute::LocalVariableTable {
			name_index,
			table: r.read_vec(
				|r| r.read_u16_as_usize(),
				|r| Ok(LocalVariable {
					start_pc: r.read_u16()?,
					length: r.read_u16()?,
					name_index: r.read_u16()?,
					descriptor_index: r.read_u16()?,
					index: r.read_u16()?,
				})
			)?,
		},
		"localvariabletypetable" => Attribute::LocalVariableTypeTable {
			name_index,
			table: r.read_vec(
				|r| r.read_u16_as_usize(),
				|r| Ok(LocalVariableType {
					start_pc: r.read_u16()?,
					length: r.read_u16()?,
					name_index: r.read_u16()?,
					signature_index: r.read_u16()?,
					index: r.read_u16()?,
				})
			)?,
		},
		"signature" => Attribute::Signature {
			name_index,
			signature_index: r.read_u16()?,
		},
		"sourcefile" => Attribute::SourceFile {
			name_index,
			sourcefile_index: r.read_u16()?,
		},
		"synthetic" => Attribute::Synthetic { name_index },
		"bootstrapmethods" => Attribute::BootstrapMethods {
			name_index,
			bootstrap_methods: r.read_vec(
				|r| r.read_u16_as_usize(),
				|r| Ok(BootstrapMethod {
					bootstrap_method_ref: r.read_u16()?,
					bootstrap_arguments: r.read_vec(
						|r| r.read_u16_as_usize(),
						|r| r.read_u16(),
					)?,
				})
			)?,
		},
		"stackmaptable" => Attribute::StackMapTable {
			name_index,
			entries: r.read_vec(
				|r| r.read_u16_as_usize(),
				|r| read_stack_map_frame(r),
			)?,
		},
		_ => return Ok(None),
	};
	Ok(Some(attribute))
}

fn read_verification_type_info(r: &mut impl ClassRead) -> Result<VerificationTypeInfo> {
	Ok(match r.read_u8()? {
		0 => VerificationTypeInfo::Top,
		1 => VerificationTypeInfo::Integer,
		2 => VerificationTypeInfo::Float,
		3 => VerificationTypeInfo::Double,
		4 => VerificationTypeInfo::Long,
		5 => VerificationTypeInfo::Null,
		6 => VerificationTypeInfo::UninitializedThis,
		7 => VerificationTypeInfo::Object { cpool_index: r.read_u16()? },
		8 => VerificationTypeInfo::Uninitialized { offset: r.read_u16()? },
		tag => return Err(corrupt(name::STACK_MAP_TABLE, format!("unknown verification type tag {tag}"))),
	})
}

fn write_verification_type_info(w: &mut impl ClassWrite, info: &VerificationTypeInfo) -> Result<()> {
	match info {
		VerificationTypeInfo::Top => w.write_u8(0),
		VerificationTypeInfo::Integer => w.write_u8(1),
		VerificationTypeInfo::Float => w.write_u8(2),
		VerificationTypeInfo::Double => w.write_u8(3),
		VerificationTypeInfo::Long => w.write_u8(4),
		VerificationTypeInfo::Null => w.write_u8(5),
		VerificationTypeInfo::UninitializedThis => w.write_u8(6),
		VerificationTypeInfo::Object { cpool_index } => {
			w.write_u8(7)?;
			w.write_u16(*cpool_index)
		},
		VerificationTypeInfo::Uninitialized { offset } => {
			w.write_u8(8)?;
			w.write_u16(*offset)
		},
	}
}

fn read_stack_map_frame(r: &mut impl ClassRead) -> Result<StackMapFrame> {
	Ok(match r.read_u8()? {
		frame_type @ 0..=63 => StackMapFrame::Same { offset_delta: frame_type },
		frame_type @ 64..=127 => StackMapFrame::SameLocals1StackItem {
			offset_delta: frame_type - 64,
			stack: read_verification_type_info(r)?,
		},
		247 => StackMapFrame::SameLocals1StackItemExtended {
			offset_delta: r.read_u16()?,
			stack: read_verification_type_info(r)?,
		},
		frame_type @ 248..=250 => StackMapFrame::Chop {
			k: 251 - frame_type,
			offset_delta: r.read_u16()?,
		},
		251 => StackMapFrame::SameExtended { offset_delta: r.read_u16()? },
		frame_type @ 252..=254 => StackMapFrame::Append {
			offset_delta: r.read_u16()?,
			locals: r.read_vec(
				|_| Ok((frame_type - 251) as usize),
				|r| read_verification_type_info(r),
			)?,
		},
		255 => StackMapFrame::Full {
			offset_delta: r.read_u16()?,
			locals: r.read_vec(|r| r.read_u16_as_usize(), |r| read_verification_type_info(r))?,
			stack: r.read_vec(|r| r.read_u16_as_usize(), |r| read_verification_type_info(r))?,
		},
		frame_type => return Err(corrupt(name::STACK_MAP_TABLE, format!("unknown frame type {frame_type}"))),
	})
}

fn write_stack_map_frame(w: &mut impl ClassWrite, frame: &StackMapFrame) -> Result<()> {
	match frame {
		StackMapFrame::Same { offset_delta } => {
			if *offset_delta > 63 {
				return Err(corrupt(name::STACK_MAP_TABLE, format!("same-frame delta {offset_delta} exceeds 63")));
			}
			w.write_u8(*offset_delta)
		},
		StackMapFrame::SameLocals1StackItem { offset_delta, stack } => {
			if *offset_delta > 63 {
				return Err(corrupt(name::STACK_MAP_TABLE, format!("same-locals frame delta {offset_delta} exceeds 63")));
			}
			w.write_u8(offset_delta + 64)?;
			write_verification_type_info(w, stack)
		},
		StackMapFrame::SameLocals1StackItemExtended { offset_delta, stack } => {
			w.write_u8(247)?;
			w.write_u16(*offset_delta)?;
			write_verification_type_info(w, stack)
		},
		StackMapFrame::Chop { k, offset_delta } => {
			if !(1..=3).contains(k) {
				return Err(corrupt(name::STACK_MAP_TABLE, format!("chop frame k of {k} outside 1..=3")));
			}
			w.write_u8(251 - k)?;
			w.write_u16(*offset_delta)
		},
		StackMapFrame::SameExtended { offset_delta } => {
			w.write_u8(251)?;
			w.write_u16(*offset_delta)
		},
		StackMapFrame::Append { offset_delta, locals } => {
			if !(1..=3).contains(&locals.len()) {
				return Err(corrupt(name::STACK_MAP_TABLE, format!("append frame with {} locals, allowed 1..=3", locals.len())));
			}
			w.write_u8(251 + locals.len() as u8)?;
			w.write_u16(*offset_delta)?;
			for local in locals {
				write_verification_type_info(w, local)?;
			}
			Ok(())
		},
		StackMapFrame::Full { offset_delta, locals, stack } => {
			w.write_u8(255)?;
			w.write_u16(*offset_delta)?;
			w.write_usize_as_u16("full frame local count", locals.len())?;
			for local in locals {
				write_verification_type_info(w, local)?;
			}
			w.write_usize_as_u16("full frame stack count", stack.len())?;
			for entry in stack {
				write_verification_type_info(w, entry)?;
			}
			Ok(())
		},
	}
}

/// The ordered attribute list owned by a class, field, method or code body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeTable {
	attributes: Vec<Attribute>,
}

impl AttributeTable {
	pub fn new() -> AttributeTable {
		AttributeTable::default()
	}

	/// Reads a `u16` count, then that many attributes.
	pub fn unpack(pool: &ConstantPool, reader: &mut impl ClassRead) -> Result<AttributeTable> {
		let attributes = reader.read_vec(
			|r| r.read_u16_as_usize(),
			|r| Attribute::unpack(pool, r),
		)?;
		Ok(AttributeTable { attributes })
	}

	pub fn pack(&self, writer: &mut impl ClassWrite) -> Result<()> {
		writer.write_usize_as_u16("attribute count", self.attributes.len())?;
		for attribute in &self.attributes {
			attribute.pack(writer)?;
		}
		Ok(())
	}

	pub fn len(&self) -> usize {
		self.attributes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.attributes.is_empty()
	}

	pub fn push(&mut self, attribute: Attribute) {
		self.attributes.push(attribute);
	}

	pub fn remove(&mut self, index: usize) -> Attribute {
		self.attributes.remove(index)
	}

	pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
		self.attributes.iter()
	}

	/// The attributes whose name matches, in table order. Registered
	/// variants compare by canonical name; unknown ones resolve their name
	/// through the pool.
	pub fn find<'a>(&'a self, pool: &'a ConstantPool, name: &'a str) -> impl Iterator<Item = &'a Attribute> {
		self.attributes.iter().filter(move |attribute| {
			match attribute.canonical_name() {
				Some(canonical) => canonical.eq_ignore_ascii_case(name),
				None => attribute.name(pool).is_ok_and(|n| n.eq_ignore_ascii_case(name)),
			}
		})
	}

	pub fn find_one<'a>(&'a self, pool: &'a ConstantPool, name: &'a str) -> Option<&'a Attribute> {
		self.find(pool, name).next()
	}
}

impl From<Vec<Attribute>> for AttributeTable {
	fn from(attributes: Vec<Attribute>) -> AttributeTable {
		AttributeTable { attributes }
	}
}

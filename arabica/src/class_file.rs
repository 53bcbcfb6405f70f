//! The top-level class file structure: header framing, constant pool, field
//! and method tables, and the class's own attributes.

use crate::{ClassRead, ClassWrite, Error, Result, class_constants};
use crate::attribute::AttributeTable;
use crate::pool::ConstantPool;

/// A field declaration: the fixed header plus its attribute table. The name
/// and descriptor are pool indices, exactly as on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
	pub access_flags: u16,
	pub name_index: u16,
	pub descriptor_index: u16,
	pub attributes: AttributeTable,
}

/// A method declaration; same wire shape as [`Field`].
#[derive(Debug, Clone, PartialEq)]
pub struct Method {
	pub access_flags: u16,
	pub name_index: u16,
	pub descriptor_index: u16,
	pub attributes: AttributeTable,
}

/// A whole class file.
///
/// Everything referencing the pool does so by index; editing the pool is
/// immediately visible through every such reference.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassFile {
	pub minor_version: u16,
	pub major_version: u16,
	pub constant_pool: ConstantPool,
	pub access_flags: u16,
	/// Must resolve to a `Class` constant.
	pub this_class: u16,
	/// 0 only for `java/lang/Object` itself.
	pub super_class: u16,
	/// Pool indices of `Class` constants.
	pub interfaces: Vec<u16>,
	pub fields: Vec<Field>,
	pub methods: Vec<Method>,
	pub attributes: AttributeTable,
}

impl ClassFile {
	/// Reads a class file. The constant pool is decoded first; every later
	/// structure resolves names through it.
	pub fn unpack(reader: &mut impl ClassRead) -> Result<ClassFile> {
		let magic = reader.read_u32()?;
		if magic != class_constants::MAGIC {
			return Err(Error::MalformedHeader(format!(
				"wrong magic: got {magic:#x}, expected 0xCAFEBABE",
			)));
		}

		let minor_version = reader.read_u16()?;
		let major_version = reader.read_u16()?;

		let constant_pool = ConstantPool::unpack(reader)?;

		let access_flags = reader.read_u16()?;
		let this_class = reader.read_u16()?;
		let super_class = reader.read_u16()?;

		constant_pool.get_class_name(this_class)
			.map_err(|e| Error::MalformedHeader(format!("this_class does not name a class: {e}")))?;
		if super_class != 0 {
			constant_pool.get_class_name(super_class)
				.map_err(|e| Error::MalformedHeader(format!("super_class does not name a class: {e}")))?;
		}

		let interfaces = reader.read_vec(
			|r| r.read_u16_as_usize(),
			|r| r.read_u16(),
		)?;

		let fields = reader.read_vec(
			|r| r.read_u16_as_usize(),
			|r| Ok(Field {
				access_flags: r.read_u16()?,
				name_index: r.read_u16()?,
				descriptor_index: r.read_u16()?,
				attributes: AttributeTable::unpack(&constant_pool, r)?,
			})
		)?;

		let methods = reader.read_vec(
			|r| r.read_u16_as_usize(),
			|r| Ok(Method {
				access_flags: r.read_u16()?,
				name_index: r.read_u16()?,
				descriptor_index: r.read_u16()?,
				attributes: AttributeTable::unpack(&constant_pool, r)?,
			})
		)?;

		let attributes = AttributeTable::unpack(&constant_pool, reader)?;

		Ok(ClassFile {
			minor_version,
			major_version,
			constant_pool,
			access_flags,
			this_class,
			super_class,
			interfaces,
			fields,
			methods,
			attributes,
		})
	}

	/// Writes the class file back out, the exact mirror of [`Self::unpack`].
	pub fn pack(&self, writer: &mut impl ClassWrite) -> Result<()> {
		writer.write_u32(class_constants::MAGIC)?;
		writer.write_u16(self.minor_version)?;
		writer.write_u16(self.major_version)?;

		self.constant_pool.pack(writer)?;

		writer.write_u16(self.access_flags)?;
		writer.write_u16(self.this_class)?;
		writer.write_u16(self.super_class)?;

		writer.write_usize_as_u16("interface count", self.interfaces.len())?;
		for interface in &self.interfaces {
			writer.write_u16(*interface)?;
		}

		writer.write_usize_as_u16("field count", self.fields.len())?;
		for field in &self.fields {
			writer.write_u16(field.access_flags)?;
			writer.write_u16(field.name_index)?;
			writer.write_u16(field.descriptor_index)?;
			field.attributes.pack(writer)?;
		}

		writer.write_usize_as_u16("method count", self.methods.len())?;
		for method in &self.methods {
			writer.write_u16(method.access_flags)?;
			writer.write_u16(method.name_index)?;
			writer.write_u16(method.descriptor_index)?;
			method.attributes.pack(writer)?;
		}

		self.attributes.pack(writer)
	}

	pub fn unpack_bytes(bytes: &[u8]) -> Result<ClassFile> {
		ClassFile::unpack(&mut std::io::Cursor::new(bytes))
	}

	pub fn to_bytes(&self) -> Result<Vec<u8>> {
		let mut vec = Vec::new();
		self.pack(&mut vec)?;
		Ok(vec)
	}

	/// The name of this class, resolved through the pool.
	pub fn name(&self) -> Result<&str> {
		self.constant_pool.get_class_name(self.this_class)
	}

	/// The name of the superclass, or [`None`] for `java/lang/Object`.
	pub fn super_name(&self) -> Result<Option<&str>> {
		if self.super_class == 0 {
			Ok(None)
		} else {
			self.constant_pool.get_class_name(self.super_class).map(Some)
		}
	}
}

#[cfg(test)]
mod testing {
	use anyhow::Result;
	use pretty_assertions::assert_eq;
	use crate::Error;
	use crate::class_file::ClassFile;
	use crate::class_constants::flags;
	use crate::pool::ConstantPool;

	fn minimal_class() -> Result<ClassFile> {
		let mut pool = ConstantPool::new();
		let this_class = pool.add_class("org/example/Empty")?;
		let super_class = pool.add_class("java/lang/Object")?;

		Ok(ClassFile {
			minor_version: 0,
			major_version: 52,
			constant_pool: pool,
			access_flags: flags::ACC_PUBLIC | flags::ACC_SUPER,
			this_class,
			super_class,
			interfaces: vec![],
			fields: vec![],
			methods: vec![],
			attributes: Default::default(),
		})
	}

	#[test]
	fn round_trip() -> Result<()> {
		let class = minimal_class()?;
		let bytes = class.to_bytes()?;

		let reread = ClassFile::unpack_bytes(&bytes)?;
		assert_eq!(class, reread);
		assert_eq!(reread.name()?, "org/example/Empty");
		assert_eq!(reread.super_name()?, Some("java/lang/Object"));
		assert_eq!(bytes, reread.to_bytes()?);
		Ok(())
	}

	#[test]
	fn wrong_magic_is_malformed() {
		let result = ClassFile::unpack_bytes(&[0xde, 0xad, 0xbe, 0xef, 0, 0, 0, 52]);
		assert!(matches!(result, Err(Error::MalformedHeader(_))));
	}

	#[test]
	fn this_class_must_name_a_class() -> Result<()> {
		let mut class = minimal_class()?;
		// Point this_class at a Utf8 entry instead of a Class entry.
		class.this_class = 1;
		let bytes = class.to_bytes()?;

		let result = ClassFile::unpack_bytes(&bytes);
		assert!(matches!(result, Err(Error::MalformedHeader(_))));
		Ok(())
	}
}

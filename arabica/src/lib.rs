//! A mutable binary model of the java class file format.
//!
//! The class file is a length-prefixed, index-addressed container: a constant
//! pool that everything else points into, field and method tables, and a
//! nested attribute system carrying, among other things, executable bytecode.
//! This crate decodes that container into an editable in-memory form and
//! encodes it back, byte-identically for anything left untouched.
//!
//! Use the [Java Virtual Machine Specification, Chapter 4](https://docs.oracle.com/javase/specs/jvms/se21/html/jvms-4.html)
//! as the reference for every structure mentioned here.
//!
//! ```
//! # use pretty_assertions::assert_eq;
//! use arabica::class_constants::flags;
//! use arabica::class_file::ClassFile;
//! use arabica::pool::ConstantPool;
//!
//! # fn main() -> arabica::Result<()> {
//! let mut pool = ConstantPool::new();
//! let this_class = pool.add_class("org/example/Main")?;
//! let super_class = pool.add_class("java/lang/Object")?;
//!
//! let class = ClassFile {
//! 	minor_version: 0,
//! 	major_version: 52,
//! 	constant_pool: pool,
//! 	access_flags: flags::ACC_SUPER,
//! 	this_class,
//! 	super_class,
//! 	interfaces: vec![],
//! 	fields: vec![],
//! 	methods: vec![],
//! 	attributes: Default::default(),
//! };
//!
//! let bytes = class.to_bytes()?;
//! let reread = ClassFile::unpack_bytes(&bytes)?;
//! assert_eq!(bytes, reread.to_bytes()?);
//! # Ok(())
//! # }
//! ```
//!
//! Within one [`class_file::ClassFile`] everything is single-threaded by
//! design; parallelism belongs at the many-independent-files level, outside
//! this crate.

use std::io::{Read, Write};

pub mod attribute;
pub mod class_constants;
pub mod class_file;
pub mod code;
pub mod descriptor;
mod error;
pub mod mutf8;
pub mod pool;

pub use error::{Error, Result};

/// Big-endian structured reads over any [`Read`].
///
/// Every multi-byte integer in a class file is big-endian; these helpers keep
/// the parsing code free of byte-twiddling.
pub trait ClassRead: Read {
	fn read_u8(&mut self) -> Result<u8> {
		let mut buf = [0u8; 1];
		self.read_exact(&mut buf)?;
		Ok(buf[0])
	}

	fn read_i8(&mut self) -> Result<i8> {
		Ok(self.read_u8()? as i8)
	}

	fn read_u16(&mut self) -> Result<u16> {
		let mut buf = [0u8; 2];
		self.read_exact(&mut buf)?;
		Ok(u16::from_be_bytes(buf))
	}

	fn read_i16(&mut self) -> Result<i16> {
		Ok(self.read_u16()? as i16)
	}

	fn read_u32(&mut self) -> Result<u32> {
		let mut buf = [0u8; 4];
		self.read_exact(&mut buf)?;
		Ok(u32::from_be_bytes(buf))
	}

	fn read_i32(&mut self) -> Result<i32> {
		Ok(self.read_u32()? as i32)
	}

	fn read_u64(&mut self) -> Result<u64> {
		let mut buf = [0u8; 8];
		self.read_exact(&mut buf)?;
		Ok(u64::from_be_bytes(buf))
	}

	fn read_i64(&mut self) -> Result<i64> {
		Ok(self.read_u64()? as i64)
	}

	fn read_u16_as_usize(&mut self) -> Result<usize> {
		Ok(self.read_u16()? as usize)
	}

	fn read_u8_vec(&mut self, length: usize) -> Result<Vec<u8>> {
		let mut vec = vec![0u8; length];
		self.read_exact(&mut vec)?;
		Ok(vec)
	}

	/// Reads a length using `length`, then that many items using `item`.
	fn read_vec<L, I, T>(&mut self, length: L, item: I) -> Result<Vec<T>>
	where
		Self: Sized,
		L: FnOnce(&mut Self) -> Result<usize>,
		I: Fn(&mut Self) -> Result<T>,
	{
		let length = length(self)?;
		let mut vec = Vec::with_capacity(length);
		for _ in 0..length {
			vec.push(item(self)?);
		}
		Ok(vec)
	}

	fn skip(&mut self, length: u64) -> Result<()>
	where
		Self: Sized,
	{
		let copied = std::io::copy(&mut self.by_ref().take(length), &mut std::io::sink())?;
		if copied != length {
			return Err(Error::Io(std::io::ErrorKind::UnexpectedEof.into()));
		}
		Ok(())
	}
}

impl<T: Read> ClassRead for T {}

/// Big-endian structured writes over any [`Write`].
pub trait ClassWrite: Write {
	fn write_u8(&mut self, value: u8) -> Result<()> {
		Ok(self.write_all(&[value])?)
	}

	fn write_i8(&mut self, value: i8) -> Result<()> {
		self.write_u8(value as u8)
	}

	fn write_u16(&mut self, value: u16) -> Result<()> {
		Ok(self.write_all(&value.to_be_bytes())?)
	}

	fn write_i16(&mut self, value: i16) -> Result<()> {
		self.write_u16(value as u16)
	}

	fn write_u32(&mut self, value: u32) -> Result<()> {
		Ok(self.write_all(&value.to_be_bytes())?)
	}

	fn write_i32(&mut self, value: i32) -> Result<()> {
		self.write_u32(value as u32)
	}

	fn write_u64(&mut self, value: u64) -> Result<()> {
		Ok(self.write_all(&value.to_be_bytes())?)
	}

	fn write_i64(&mut self, value: i64) -> Result<()> {
		self.write_u64(value as u64)
	}

	fn write_u8_slice(&mut self, value: &[u8]) -> Result<()> {
		Ok(self.write_all(value)?)
	}

	fn write_usize_as_u16(&mut self, what: &'static str, value: usize) -> Result<()> {
		let value = u16::try_from(value).map_err(|_| Error::Overflow { what, value })?;
		self.write_u16(value)
	}

	fn write_usize_as_u32(&mut self, what: &'static str, value: usize) -> Result<()> {
		let value = u32::try_from(value).map_err(|_| Error::Overflow { what, value })?;
		self.write_u32(value)
	}
}

impl<T: Write> ClassWrite for T {}

//! The constant pool: the 1-indexed table of shared literals and references
//! that everything else in a class file points into.
//!
//! Entries that reference other entries store bare indices, exactly as the
//! wire format does, and are dereferenced against their pool at access time.
//! This is what makes partial reads (pool-only scans) and late edits
//! well-defined: there is no cached object graph to go stale.

use std::collections::{BTreeMap, BTreeSet};
use crate::{ClassRead, ClassWrite, Error, Result, mutf8};
use crate::class_constants::pool as tag;

/// A constant pool entry, discriminated on the wire by a one-byte tag.
///
/// `Long` and `Double` are double-width: they occupy their own index *and*
/// the next one, which holds nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
	Utf8(String),
	Integer(i32),
	Float(f32),
	Long(i64),
	Double(f64),
	Class { name_index: u16 },
	String { string_index: u16 },
	FieldRef { class_index: u16, name_and_type_index: u16 },
	MethodRef { class_index: u16, name_and_type_index: u16 },
	InterfaceMethodRef { class_index: u16, name_and_type_index: u16 },
	NameAndType { name_index: u16, descriptor_index: u16 },
	MethodHandle { reference_kind: u8, reference_index: u16 },
	MethodType { descriptor_index: u16 },
	Dynamic { bootstrap_method_attr_index: u16, name_and_type_index: u16 },
	InvokeDynamic { bootstrap_method_attr_index: u16, name_and_type_index: u16 },
	Module { name_index: u16 },
	Package { name_index: u16 },
}

impl Constant {
	pub fn tag(&self) -> u8 {
		match self {
			Constant::Utf8(_) => tag::UTF8,
			Constant::Integer(_) => tag::INTEGER,
			Constant::Float(_) => tag::FLOAT,
			Constant::Long(_) => tag::LONG,
			Constant::Double(_) => tag::DOUBLE,
			Constant::Class { .. } => tag::CLASS,
			Constant::String { .. } => tag::STRING,
			Constant::FieldRef { .. } => tag::FIELD_REF,
			Constant::MethodRef { .. } => tag::METHOD_REF,
			Constant::InterfaceMethodRef { .. } => tag::INTERFACE_METHOD_REF,
			Constant::NameAndType { .. } => tag::NAME_AND_TYPE,
			Constant::MethodHandle { .. } => tag::METHOD_HANDLE,
			Constant::MethodType { .. } => tag::METHOD_TYPE,
			Constant::Dynamic { .. } => tag::DYNAMIC,
			Constant::InvokeDynamic { .. } => tag::INVOKE_DYNAMIC,
			Constant::Module { .. } => tag::MODULE,
			Constant::Package { .. } => tag::PACKAGE,
		}
	}

	/// Whether this constant occupies two pool slots.
	pub fn is_wide(&self) -> bool {
		matches!(self, Constant::Long(_) | Constant::Double(_))
	}

	/// The `CONSTANT_…` name of this entry's kind, for error messages.
	pub fn kind(&self) -> &'static str {
		match self {
			Constant::Utf8(_) => "Utf8",
			Constant::Integer(_) => "Integer",
			Constant::Float(_) => "Float",
			Constant::Long(_) => "Long",
			Constant::Double(_) => "Double",
			Constant::Class { .. } => "Class",
			Constant::String { .. } => "String",
			Constant::FieldRef { .. } => "Fieldref",
			Constant::MethodRef { .. } => "Methodref",
			Constant::InterfaceMethodRef { .. } => "InterfaceMethodref",
			Constant::NameAndType { .. } => "NameAndType",
			Constant::MethodHandle { .. } => "MethodHandle",
			Constant::MethodType { .. } => "MethodType",
			Constant::Dynamic { .. } => "Dynamic",
			Constant::InvokeDynamic { .. } => "InvokeDynamic",
			Constant::Module { .. } => "Module",
			Constant::Package { .. } => "Package",
		}
	}

	fn read(tag: u8, reader: &mut impl ClassRead) -> Result<Constant> {
		Ok(match tag {
			tag::UTF8 => {
				let length = reader.read_u16_as_usize()?;
				let vec = reader.read_u8_vec(length)?;
				Constant::Utf8(mutf8::decode(&vec)?)
			},
			tag::INTEGER => Constant::Integer(reader.read_i32()?),
			tag::FLOAT => Constant::Float(f32::from_bits(reader.read_u32()?)),
			tag::LONG => Constant::Long(reader.read_i64()?),
			tag::DOUBLE => Constant::Double(f64::from_bits(reader.read_u64()?)),
			tag::CLASS => Constant::Class { name_index: reader.read_u16()? },
			tag::STRING => Constant::String { string_index: reader.read_u16()? },
			tag::FIELD_REF => Constant::FieldRef {
				class_index: reader.read_u16()?,
				name_and_type_index: reader.read_u16()?,
			},
			tag::METHOD_REF => Constant::MethodRef {
				class_index: reader.read_u16()?,
				name_and_type_index: reader.read_u16()?,
			},
			tag::INTERFACE_METHOD_REF => Constant::InterfaceMethodRef {
				class_index: reader.read_u16()?,
				name_and_type_index: reader.read_u16()?,
			},
			tag::NAME_AND_TYPE => Constant::NameAndType {
				name_index: reader.read_u16()?,
				descriptor_index: reader.read_u16()?,
			},
			tag::METHOD_HANDLE => Constant::MethodHandle {
				reference_kind: reader.read_u8()?,
				reference_index: reader.read_u16()?,
			},
			tag::METHOD_TYPE => Constant::MethodType { descriptor_index: reader.read_u16()? },
			tag::DYNAMIC => Constant::Dynamic {
				bootstrap_method_attr_index: reader.read_u16()?,
				name_and_type_index: reader.read_u16()?,
			},
			tag::INVOKE_DYNAMIC => Constant::InvokeDynamic {
				bootstrap_method_attr_index: reader.read_u16()?,
				name_and_type_index: reader.read_u16()?,
			},
			tag::MODULE => Constant::Module { name_index: reader.read_u16()? },
			tag::PACKAGE => Constant::Package { name_index: reader.read_u16()? },
			tag => return Err(Error::MalformedPool(format!("unknown constant tag {tag}"))),
		})
	}

	fn write(&self, writer: &mut impl ClassWrite) -> Result<()> {
		writer.write_u8(self.tag())?;
		match self {
			Constant::Utf8(string) => {
				let vec = mutf8::encode(string);
				writer.write_usize_as_u16("utf8 constant length", vec.len())?;
				writer.write_u8_slice(&vec)?;
			},
			Constant::Integer(value) => writer.write_i32(*value)?,
			Constant::Float(value) => writer.write_u32(value.to_bits())?,
			Constant::Long(value) => writer.write_i64(*value)?,
			Constant::Double(value) => writer.write_u64(value.to_bits())?,
			Constant::Class { name_index } => writer.write_u16(*name_index)?,
			Constant::String { string_index } => writer.write_u16(*string_index)?,
			Constant::FieldRef { class_index, name_and_type_index } |
			Constant::MethodRef { class_index, name_and_type_index } |
			Constant::InterfaceMethodRef { class_index, name_and_type_index } => {
				writer.write_u16(*class_index)?;
				writer.write_u16(*name_and_type_index)?;
			},
			Constant::NameAndType { name_index, descriptor_index } => {
				writer.write_u16(*name_index)?;
				writer.write_u16(*descriptor_index)?;
			},
			Constant::MethodHandle { reference_kind, reference_index } => {
				writer.write_u8(*reference_kind)?;
				writer.write_u16(*reference_index)?;
			},
			Constant::MethodType { descriptor_index } => writer.write_u16(*descriptor_index)?,
			Constant::Dynamic { bootstrap_method_attr_index, name_and_type_index } |
			Constant::InvokeDynamic { bootstrap_method_attr_index, name_and_type_index } => {
				writer.write_u16(*bootstrap_method_attr_index)?;
				writer.write_u16(*name_and_type_index)?;
			},
			Constant::Module { name_index } |
			Constant::Package { name_index } => writer.write_u16(*name_index)?,
		}
		Ok(())
	}
}

#[derive(Debug, Clone, PartialEq)]
enum Slot {
	Entry(Constant),
	/// The upper half of a `Long` or `Double` at the previous index. Never
	/// holds data and is never written out.
	Reserved,
}

/// The sparse, 1-indexed constant pool.
///
/// Index 0 never holds a constant. Removal leaves a gap that later
/// insertions reuse, preferring the lowest-numbered one, so edit workloads
/// keep the pool compact without a re-index pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstantPool {
	slots: BTreeMap<u16, Slot>,
	/// Free indices strictly below the highest occupied one.
	gaps: BTreeSet<u16>,
}

impl ConstantPool {
	pub fn new() -> ConstantPool {
		ConstantPool::default()
	}

	/// Reads a constant pool: a `u16` count, then count − 1 slots of tagged
	/// entries, where `Long` and `Double` consume two slots each.
	pub fn unpack(reader: &mut impl ClassRead) -> Result<ConstantPool> {
		let count = reader.read_u16()? as u32;
		let mut pool = ConstantPool::new();

		// The loop counter outgrows u16 when a wide constant sits in the
		// last slot.
		let mut index: u32 = 1;
		while index < count {
			let tag = reader.read_u8()
				.map_err(|e| truncated(e, index as u16))?;
			let constant = Constant::read(tag, reader)
				.map_err(|e| truncated(e, index as u16))?;

			if constant.is_wide() {
				pool.slots.insert(index as u16, Slot::Entry(constant));
				pool.slots.insert(index as u16 + 1, Slot::Reserved);
				index += 2;
			} else {
				pool.slots.insert(index as u16, Slot::Entry(constant));
				index += 1;
			}
		}

		Ok(pool)
	}

	/// Writes the pool back out: count, then every entry ascending, skipping
	/// the reserved upper halves.
	///
	/// Fails with [`Error::SparsePool`] if a gap is still unfilled; holes
	/// cannot be expressed on the wire, and renumbering would corrupt every
	/// index stored elsewhere.
	pub fn pack(&self, writer: &mut impl ClassWrite) -> Result<()> {
		let mut expected = 1;
		for &index in self.slots.keys() {
			if index != expected {
				return Err(Error::SparsePool(expected));
			}
			expected += 1;
		}

		writer.write_usize_as_u16("constant pool count", self.slots.len() + 1)?;

		for slot in self.slots.values() {
			if let Slot::Entry(constant) = slot {
				constant.write(writer)?;
			}
		}

		Ok(())
	}

	/// The number of entries; a `Long` or `Double` counts once.
	pub fn len(&self) -> usize {
		self.iter().count()
	}

	pub fn is_empty(&self) -> bool {
		self.slots.is_empty()
	}

	/// The number of occupied slots; a `Long` or `Double` counts twice.
	/// This is one less than the `constant_pool_count` written on the wire.
	pub fn slot_count(&self) -> usize {
		self.slots.len()
	}

	/// Adds a constant at the lowest reusable free index, or at the end.
	///
	/// A double-width constant takes a gap only if the slot after it is free
	/// too; otherwise the gap stays queued for a later single-width entry
	/// and the constant is appended instead. Returns the assigned index.
	pub fn add(&mut self, constant: Constant) -> Result<u16> {
		let wide = constant.is_wide();

		if let Some(&gap) = self.gaps.iter().next() {
			if !wide {
				self.gaps.remove(&gap);
				self.slots.insert(gap, Slot::Entry(constant));
				return Ok(gap);
			}
			if self.gaps.contains(&(gap + 1)) {
				self.gaps.remove(&gap);
				self.gaps.remove(&(gap + 1));
				self.slots.insert(gap, Slot::Entry(constant));
				self.slots.insert(gap + 1, Slot::Reserved);
				return Ok(gap);
			}
		}

		let index = match self.slots.keys().next_back() {
			Some(&max) => max.checked_add(1)
				.ok_or(Error::Overflow { what: "constant pool index", value: max as usize + 1 })?,
			None => 1,
		};
		let top = if wide { index.checked_add(1) } else { Some(index) };
		// The count field is index-plus-one, so the topmost usable slot is 65534.
		match top {
			Some(top) if top < u16::MAX => {},
			_ => return Err(Error::Overflow { what: "constant pool index", value: index as usize }),
		}

		self.slots.insert(index, Slot::Entry(constant));
		if wide {
			self.slots.insert(index + 1, Slot::Reserved);
		}
		Ok(index)
	}

	/// Stores a constant at exactly the given index, replacing whatever
	/// entry was there. Every other constant still referencing this index
	/// now resolves to the new value; that is the caller's responsibility,
	/// not something this method guards against.
	///
	/// # Panics
	/// Panics if `index` is 0, if `index` points at the reserved upper half
	/// of a `Long`/`Double`, or if a double-width constant would spill into
	/// a slot already holding a real entry. All of these mean the caller
	/// already broke the pool's invariants; repairing silently would hide
	/// the corruption.
	pub fn add_at(&mut self, index: u16, constant: Constant) {
		assert!(index != 0, "constant pool index 0 is reserved");
		assert!(
			!matches!(self.slots.get(&index), Some(Slot::Reserved)),
			"index {index} is the reserved upper half of a double-width constant",
		);

		// Replacing a double-width entry frees its upper half first.
		if let Some(Slot::Entry(old)) = self.slots.get(&index) {
			if old.is_wide() {
				self.slots.remove(&(index + 1));
			}
		}

		if constant.is_wide() {
			assert!(index < u16::MAX, "no room for the upper half of a double-width constant at {index}");
			assert!(
				!matches!(self.slots.get(&(index + 1)), Some(Slot::Entry(_))),
				"double-width constant at {index} would overwrite the entry at {}", index + 1,
			);
			self.slots.insert(index + 1, Slot::Reserved);
		}
		self.slots.insert(index, Slot::Entry(constant));

		self.recompute_gaps();
	}

	/// Removes the entry at `index`, along with its reserved upper half if
	/// it was double-width, and returns it. Returns [`None`] if the index
	/// holds no entry.
	pub fn remove(&mut self, index: u16) -> Option<Constant> {
		match self.slots.get(&index) {
			Some(Slot::Entry(_)) => {},
			_ => return None,
		}

		let constant = match self.slots.remove(&index) {
			Some(Slot::Entry(constant)) => constant,
			_ => unreachable!(),
		};
		if constant.is_wide() {
			self.slots.remove(&(index + 1));
		}

		self.recompute_gaps();

		Some(constant)
	}

	/// Rebuilds the free-index tracker with one ordered walk over the keys.
	fn recompute_gaps(&mut self) {
		self.gaps.clear();
		let mut expected = 1;
		for &index in self.slots.keys() {
			for gap in expected..index {
				self.gaps.insert(gap);
			}
			expected = index + 1;
		}
	}

	/// Dereferences an index. Fails fast on 0, unoccupied indices and
	/// reserved upper halves; silently producing nothing would hide pool
	/// corruption from the caller.
	pub fn get(&self, index: u16) -> Result<&Constant> {
		match self.slots.get(&index) {
			Some(Slot::Entry(constant)) => Ok(constant),
			Some(Slot::Reserved) => Err(Error::PoolIndex {
				index,
				reason: "points at the reserved upper half of a double-width constant".to_owned(),
			}),
			None => Err(Error::PoolIndex { index, reason: "no entry at this index".to_owned() }),
		}
	}

	/// Dereferences an index that must hold a `Utf8` constant.
	pub fn get_utf8(&self, index: u16) -> Result<&str> {
		match self.get(index)? {
			Constant::Utf8(string) => Ok(string),
			other => Err(wrong_kind(index, "Utf8", other)),
		}
	}

	/// Dereferences an index that must hold a `Class` constant, resolving
	/// through to the class name.
	pub fn get_class_name(&self, index: u16) -> Result<&str> {
		match self.get(index)? {
			Constant::Class { name_index } => self.get_utf8(*name_index),
			other => Err(wrong_kind(index, "Class", other)),
		}
	}

	/// Dereferences an index that must hold a `NameAndType` constant,
	/// resolving through to the `(name, descriptor)` strings.
	pub fn get_name_and_type(&self, index: u16) -> Result<(&str, &str)> {
		match self.get(index)? {
			Constant::NameAndType { name_index, descriptor_index } => {
				Ok((self.get_utf8(*name_index)?, self.get_utf8(*descriptor_index)?))
			},
			other => Err(wrong_kind(index, "NameAndType", other)),
		}
	}

	/// All entries in ascending index order. Reserved upper halves are not
	/// yielded.
	pub fn iter(&self) -> impl Iterator<Item = (u16, &Constant)> {
		self.slots.iter().filter_map(|(&index, slot)| match slot {
			Slot::Entry(constant) => Some((index, constant)),
			Slot::Reserved => None,
		})
	}

	/// The entries satisfying `predicate`, in ascending index order.
	pub fn find<'a, P>(&'a self, predicate: P) -> impl Iterator<Item = (u16, &'a Constant)>
	where
		P: Fn(&Constant) -> bool + 'a,
	{
		self.iter().filter(move |(_, constant)| predicate(constant))
	}

	/// The index of the first `Utf8` entry with this exact content, if any.
	pub fn find_utf8(&self, value: &str) -> Option<u16> {
		self.find(|constant| matches!(constant, Constant::Utf8(s) if s == value))
			.map(|(index, _)| index)
			.next()
	}

	pub fn add_utf8(&mut self, value: &str) -> Result<u16> {
		self.add(Constant::Utf8(value.to_owned()))
	}

	pub fn add_integer(&mut self, value: i32) -> Result<u16> {
		self.add(Constant::Integer(value))
	}

	pub fn add_float(&mut self, value: f32) -> Result<u16> {
		self.add(Constant::Float(value))
	}

	pub fn add_long(&mut self, value: i64) -> Result<u16> {
		self.add(Constant::Long(value))
	}

	pub fn add_double(&mut self, value: f64) -> Result<u16> {
		self.add(Constant::Double(value))
	}

	pub fn add_class(&mut self, name: &str) -> Result<u16> {
		let name_index = self.add_utf8(name)?;
		self.add(Constant::Class { name_index })
	}

	pub fn add_string(&mut self, value: &str) -> Result<u16> {
		let string_index = self.add_utf8(value)?;
		self.add(Constant::String { string_index })
	}

	pub fn add_name_and_type(&mut self, name: &str, descriptor: &str) -> Result<u16> {
		let name_index = self.add_utf8(name)?;
		let descriptor_index = self.add_utf8(descriptor)?;
		self.add(Constant::NameAndType { name_index, descriptor_index })
	}

	pub fn add_field_ref(&mut self, class: &str, name: &str, descriptor: &str) -> Result<u16> {
		let class_index = self.add_class(class)?;
		let name_and_type_index = self.add_name_and_type(name, descriptor)?;
		self.add(Constant::FieldRef { class_index, name_and_type_index })
	}

	pub fn add_method_ref(&mut self, class: &str, name: &str, descriptor: &str) -> Result<u16> {
		let class_index = self.add_class(class)?;
		let name_and_type_index = self.add_name_and_type(name, descriptor)?;
		self.add(Constant::MethodRef { class_index, name_and_type_index })
	}
}

fn truncated(e: Error, index: u16) -> Error {
	match e {
		Error::Io(io) if io.kind() == std::io::ErrorKind::UnexpectedEof => {
			Error::MalformedPool(format!("truncated constant at index {index}"))
		},
		e => e,
	}
}

fn wrong_kind(index: u16, expected: &str, found: &Constant) -> Error {
	Error::PoolIndex {
		index,
		reason: format!("expected a {expected} constant, found {}", found.kind()),
	}
}

#[cfg(test)]
mod testing {
	use anyhow::Result;
	use pretty_assertions::assert_eq;
	use crate::Error;
	use crate::pool::{Constant, ConstantPool};

	#[test]
	fn gap_reuse() -> Result<()> {
		let mut pool = ConstantPool::new();
		let a = pool.add_utf8("a")?;
		let b = pool.add_utf8("b")?;
		let c = pool.add_utf8("c")?;
		assert_eq!((a, b, c), (1, 2, 3));

		assert_eq!(pool.remove(b), Some(Constant::Utf8("b".to_owned())));
		assert_eq!(pool.add_utf8("d")?, b);
		assert_eq!(pool.len(), 3);
		Ok(())
	}

	#[test]
	fn lowest_gap_first() -> Result<()> {
		let mut pool = ConstantPool::new();
		for value in ["a", "b", "c", "d"] {
			pool.add_utf8(value)?;
		}
		pool.remove(3);
		pool.remove(1);

		assert_eq!(pool.add_utf8("e")?, 1);
		assert_eq!(pool.add_utf8("f")?, 3);
		assert_eq!(pool.add_utf8("g")?, 5);
		Ok(())
	}

	#[test]
	fn double_width_adjacency() -> Result<()> {
		let mut pool = ConstantPool::new();
		let long = pool.add_long(0x1122334455667788)?;
		let after = pool.add_utf8("x")?;

		assert_eq!(long, 1);
		assert_eq!(after, 3);
		assert_eq!(pool.len(), 2);
		assert_eq!(pool.slot_count(), 3);
		assert!(pool.get(2).is_err());
		Ok(())
	}

	#[test]
	fn wide_constant_skips_single_gap() -> Result<()> {
		let mut pool = ConstantPool::new();
		for value in ["a", "b", "c"] {
			pool.add_utf8(value)?;
		}
		pool.remove(2);

		// The gap at 2 has an occupied successor, so the long appends; the
		// gap stays available for the next single-width entry.
		assert_eq!(pool.add_long(7)?, 4);
		assert_eq!(pool.add_utf8("d")?, 2);
		Ok(())
	}

	#[test]
	fn wide_constant_takes_adjacent_gaps() -> Result<()> {
		let mut pool = ConstantPool::new();
		for value in ["a", "b", "c", "d"] {
			pool.add_utf8(value)?;
		}
		pool.remove(2);
		pool.remove(3);

		assert_eq!(pool.add_double(1.5)?, 2);
		assert!(pool.get(3).is_err());
		assert_eq!(pool.add_utf8("e")?, 5);
		Ok(())
	}

	#[test]
	fn removing_wide_frees_both_slots() -> Result<()> {
		let mut pool = ConstantPool::new();
		pool.add_long(1)?;
		pool.add_utf8("x")?;

		assert_eq!(pool.remove(1), Some(Constant::Long(1)));
		assert_eq!(pool.remove(2), None);
		assert_eq!(pool.add_utf8("y")?, 1);
		assert_eq!(pool.add_utf8("z")?, 2);
		Ok(())
	}

	#[test]
	fn pack_unpack_round_trip() -> Result<()> {
		let mut pool = ConstantPool::new();
		pool.add_utf8("java/lang/Object")?;
		pool.add(Constant::Class { name_index: 1 })?;
		pool.add_long(-2)?;
		pool.add_double(std::f64::consts::PI)?;
		pool.add_integer(42)?;
		pool.add_float(1.25)?;
		pool.add_name_and_type("value", "I")?;

		let mut bytes = Vec::new();
		pool.pack(&mut bytes)?;

		let reread = ConstantPool::unpack(&mut std::io::Cursor::new(&bytes))?;
		assert_eq!(pool, reread);

		let mut bytes_2 = Vec::new();
		reread.pack(&mut bytes_2)?;
		assert_eq!(bytes, bytes_2);
		Ok(())
	}

	#[test]
	fn pack_rejects_sparse_pool() -> Result<()> {
		let mut pool = ConstantPool::new();
		pool.add_utf8("a")?;
		pool.add_utf8("b")?;
		pool.remove(1);

		let mut bytes = Vec::new();
		assert!(matches!(pool.pack(&mut bytes), Err(Error::SparsePool(1))));
		Ok(())
	}

	#[test]
	fn typed_getters() -> Result<()> {
		let mut pool = ConstantPool::new();
		let class = pool.add_class("java/lang/String")?;
		let nat = pool.add_name_and_type("length", "()I")?;

		assert_eq!(pool.get_class_name(class)?, "java/lang/String");
		assert_eq!(pool.get_name_and_type(nat)?, ("length", "()I"));
		assert!(pool.get_utf8(class).is_err());
		assert!(pool.get(0).is_err());
		assert!(pool.get(100).is_err());
		Ok(())
	}

	#[test]
	fn unknown_tag_is_malformed() {
		// count 2, then a bogus tag.
		let bytes = [0x00, 0x02, 0x63];
		let result = ConstantPool::unpack(&mut std::io::Cursor::new(&bytes));
		assert!(matches!(result, Err(Error::MalformedPool(_))));
	}

	#[test]
	fn truncated_entry_is_malformed() {
		// count 2, a Class entry missing its name index.
		let bytes = [0x00, 0x02, 0x07];
		let result = ConstantPool::unpack(&mut std::io::Cursor::new(&bytes));
		assert!(matches!(result, Err(Error::MalformedPool(_))));
	}

	#[test]
	fn explicit_add_replaces() -> Result<()> {
		let mut pool = ConstantPool::new();
		pool.add_utf8("old")?;
		pool.add_at(1, Constant::Utf8("new".to_owned()));
		assert_eq!(pool.get_utf8(1)?, "new");
		assert_eq!(pool.len(), 1);
		Ok(())
	}

	#[test]
	#[should_panic(expected = "reserved upper half")]
	fn explicit_add_into_reserved_slot_panics() {
		let mut pool = ConstantPool::new();
		let _ = pool.add_long(1);
		pool.add_at(2, Constant::Integer(3));
	}

	#[test]
	fn find_is_restartable() -> Result<()> {
		let mut pool = ConstantPool::new();
		pool.add_utf8("a")?;
		pool.add_integer(1)?;
		pool.add_utf8("b")?;

		let utf8_indices: Vec<u16> = pool
			.find(|c| matches!(c, Constant::Utf8(_)))
			.map(|(index, _)| index)
			.collect();
		assert_eq!(utf8_indices, vec![1, 3]);

		// A second call walks the same entries again from the start.
		assert_eq!(pool.find(|c| matches!(c, Constant::Utf8(_))).count(), 2);
		assert_eq!(pool.find_utf8("b"), Some(3));
		Ok(())
	}
}

//! Parsing of field and method descriptor strings.
//!
//! The grammar, from the Java Virtual Machine Specification:
//! ```text
//! FieldDescriptor:
//!   FieldType
//!
//! MethodDescriptor:
//!   "(" FieldType* ")" ReturnDescriptor
//!
//! ReturnDescriptor:
//!   FieldType | "V"
//!
//! FieldType:
//!   "B" | "C" | "D" | "F" | "I" | "J" | "S" | "Z" |
//!   "L" ClassName ";" |
//!   "[" FieldType
//! ```

use std::iter::Peekable;
use std::str::Chars;
use crate::{Error, Result};

/// A field type: one of the eight primitives, a class reference, or an array
/// of either.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum FieldType {
	/// A `byte`. In rust, this is an `i8`.
	Byte,
	/// A `char`.
	Char,
	/// A `double`. In rust, this is an `f64`.
	Double,
	/// A `float`. In rust, this is an `f32`.
	Float,
	/// An `int`. In rust, this is an `i32`.
	Int,
	/// A `long`. In rust, this is an `i64`.
	Long,
	/// A `short`. In rust, this is an `i16`.
	Short,
	/// A `boolean`.
	Boolean,
	/// An instance of the named class, e.g. `java/lang/String`.
	Object(String),
	/// An array with the given number of dimensions. The element type is
	/// never itself [`FieldType::Array`].
	Array { dimensions: u8, element: Box<FieldType> },
}

/// The return part of a method descriptor: a field type or `void`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ReturnType {
	Void,
	Field(FieldType),
}

/// The parsed form of a method descriptor like `(I[Ljava/lang/String;)V`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MethodDescriptor {
	pub parameters: Vec<FieldType>,
	pub return_type: ReturnType,
}

fn error(descriptor: &str, reason: impl Into<String>) -> Error {
	Error::Descriptor {
		descriptor: descriptor.to_owned(),
		reason: reason.into(),
	}
}

fn read_field_type(descriptor: &str, chars: &mut Peekable<Chars>) -> Result<FieldType> {
	let mut dimensions = 0u8;
	while chars.next_if_eq(&'[').is_some() {
		dimensions = dimensions.checked_add(1)
			.ok_or_else(|| error(descriptor, "more than 255 array dimensions"))?;
	}

	let char = chars.next()
		.ok_or_else(|| error(descriptor, "unexpected abrupt ending of descriptor"))?;
	let element = match char {
		'B' => FieldType::Byte,
		'C' => FieldType::Char,
		'D' => FieldType::Double,
		'F' => FieldType::Float,
		'I' => FieldType::Int,
		'J' => FieldType::Long,
		'S' => FieldType::Short,
		'Z' => FieldType::Boolean,
		'L' => {
			let mut name = String::new();

			loop {
				let char = chars.next()
					.ok_or_else(|| error(descriptor, "reference type missing the closing `;`"))?;
				if char == ';' {
					break;
				}
				name.push(char);
			}

			if name.is_empty() {
				return Err(error(descriptor, "reference type with an empty name"));
			}
			FieldType::Object(name)
		},
		x => return Err(error(descriptor, format!("unexpected char {x:?}"))),
	};

	if dimensions == 0 {
		Ok(element)
	} else {
		Ok(FieldType::Array { dimensions, element: Box::new(element) })
	}
}

/// Parses a field descriptor, e.g. `I` or `[[Ljava/lang/Object;`.
pub fn parse_field_descriptor(descriptor: &str) -> Result<FieldType> {
	let mut chars = descriptor.chars().peekable();

	let field_type = read_field_type(descriptor, &mut chars)?;

	if chars.peek().is_some() {
		return Err(error(descriptor, "trailing characters after the field type"));
	}

	Ok(field_type)
}

/// Parses a method descriptor, e.g. `(I[Ljava/lang/String;)V`.
pub fn parse_method_descriptor(descriptor: &str) -> Result<MethodDescriptor> {
	let mut chars = descriptor.chars().peekable();

	if chars.next_if_eq(&'(').is_none() {
		return Err(error(descriptor, "method descriptor missing the opening `(`"));
	}

	let mut parameters = Vec::new();
	loop {
		if chars.next_if_eq(&')').is_some() {
			break;
		}
		if chars.peek().is_none() {
			return Err(error(descriptor, "method descriptor missing the closing `)`"));
		}
		parameters.push(read_field_type(descriptor, &mut chars)?);
	}

	let return_type = if chars.next_if_eq(&'V').is_some() {
		ReturnType::Void
	} else {
		ReturnType::Field(read_field_type(descriptor, &mut chars)?)
	};

	if chars.peek().is_some() {
		return Err(error(descriptor, "trailing characters after the return type"));
	}

	Ok(MethodDescriptor { parameters, return_type })
}

impl MethodDescriptor {
	/// The number of local variable slots the parameters occupy; `long` and
	/// `double` take two each.
	pub fn parameter_slots(&self) -> usize {
		self.parameters.iter()
			.map(|parameter| match parameter {
				FieldType::Long | FieldType::Double => 2,
				_ => 1,
			})
			.sum()
	}
}

use anyhow::Result;
use pretty_assertions::assert_eq;
use arabica::descriptor::{
	parse_field_descriptor, parse_method_descriptor, FieldType, ReturnType,
};

#[test]
fn valid_field_descriptors() -> Result<()> {
	let valid_field_descriptors = [
		"B",
		"C",
		"D",
		"F",
		"I",
		"J",
		"Ljava/lang/Object;",
		"Lorg/example/MyClassName;",
		"S",
		"Z",
		"[[[D",
	];

	for i in valid_field_descriptors {
		assert!(
			parse_field_descriptor(i).is_ok(),
			"{:?} is a valid field desc", i
		);
	}

	Ok(())
}

#[test]
fn invalid_field_descriptors() -> Result<()> {
	let invalid_field_descriptors = [
		"",
		"V",
		"(",
		")",
		"()",
		"[V",
		"L;",
		"()V",
		"foo",
		"(D)I",
		"L;DV",
		"II",
	];

	for i in invalid_field_descriptors {
		assert!(
			parse_field_descriptor(i).is_err(),
			"{:?} is an invalid field desc", i
		);
	}

	Ok(())
}

#[test]
fn valid_method_descriptors() -> Result<()> {
	let valid_method_descriptors = [
		"()V",
		"(D)I",
		"(Ljava/lang/Object;)Ljava/lang/Object;",
		"(IJ[Z)[[Ljava/lang/String;",
	];

	for i in valid_method_descriptors {
		assert!(
			parse_method_descriptor(i).is_ok(),
			"{:?} is a valid method desc", i
		);
	}

	Ok(())
}

#[test]
fn invalid_method_descriptors() -> Result<()> {
	let invalid_method_descriptors = [
		"B",
		"Ljava/lang/Object;",
		"[[[D",
		"",
		"V",
		"(",
		")",
		"()",
		"[V",
		"L;",
		"foo",
		"(L;)V",
		"(I",      // missing the closing paren
		"(I)",     // missing the return type
		"()VV",
		"()[V",
	];

	for i in invalid_method_descriptors {
		assert!(
			parse_method_descriptor(i).is_err(),
			"{:?} is an invalid method desc", i
		);
	}

	Ok(())
}

#[test]
fn method_descriptor_structure() -> Result<()> {
	let descriptor = parse_method_descriptor("(I[Ljava/lang/String;)V")?;

	assert_eq!(descriptor.parameters, vec![
		FieldType::Int,
		FieldType::Array {
			dimensions: 1,
			element: Box::new(FieldType::Object("java/lang/String".to_owned())),
		},
	]);
	assert_eq!(descriptor.return_type, ReturnType::Void);
	Ok(())
}

#[test]
fn field_descriptor_structure() -> Result<()> {
	assert_eq!(parse_field_descriptor("I")?, FieldType::Int);
	assert_eq!(
		parse_field_descriptor("Ljava/lang/Object;")?,
		FieldType::Object("java/lang/Object".to_owned()),
	);
	assert_eq!(parse_field_descriptor("[[[D")?, FieldType::Array {
		dimensions: 3,
		element: Box::new(FieldType::Double),
	});
	Ok(())
}

#[test]
fn parameter_slots_count_wide_types_twice() -> Result<()> {
	let descriptor = parse_method_descriptor("(IJD[J)V")?;
	assert_eq!(descriptor.parameter_slots(), 6);
	Ok(())
}

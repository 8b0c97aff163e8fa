use anyhow::Result;
use pretty_assertions::assert_eq;
use jtypes::descriptor::{MethodDescriptor, PrimitiveTypeDef, TypeDef};
use jtypes::refs::{LocalFieldRef, LocalMethodRef};
use mapset::builder::{MappingSetBuilder, NamingBuilder};
use mapset::MappingSet;

/// `a/b/C` is `net/foo/Bar`, with the inner class `a/b/C$D` being `net/foo/Bar$Baz`.
fn nested() -> Result<MappingSet> {
	let mut builder = MappingSetBuilder::new(["official", "intermediary"])?;

	let outer = builder.class(None, 1);
	outer.declare(0, "a/b/C", true)?.declare(1, "net/foo/Bar", true)?;
	outer.inner_class(None, 1).declare(0, "a/b/C$D", true)?.declare(1, "net/foo/Bar$Baz", true)?;

	builder.class(None, 1).declare(0, "e", true)?;

	let (set, issues) = builder.build()?;
	assert_eq!(issues.errors(), &[]);
	assert_eq!(issues.warnings().len(), 1, "class e has no intermediary name");
	Ok(set)
}

#[test]
fn fully_qualified_names() -> Result<()> {
	let set = nested()?;
	let official = set.namespace_of("official")?;
	let intermediary = set.namespace_of("intermediary")?;

	let inner = set.class_in(official, "a/b/C$D")?.expect("inner class exists");
	assert_eq!(inner.fully_qualified_name(intermediary)?.as_deref(), Some("net.foo.Bar.net.foo.Bar$Baz"));
	assert_eq!(inner.fully_qualified_name(official)?.as_deref(), Some("a.b.C.a.b.C$D"));

	let outer = inner.parent().expect("inner class has a parent");
	assert_eq!(outer.name(intermediary)?, Some("net/foo/Bar"));
	assert_eq!(outer.fully_qualified_name(intermediary)?.as_deref(), Some("net.foo.Bar"));
	assert_eq!(outer.parent(), None);

	let e = set.class_in(official, "e")?.expect("class e exists");
	assert_eq!(e.fully_qualified_name(intermediary)?, None);

	Ok(())
}

#[test]
fn map_classes() -> Result<()> {
	let set = nested()?;
	let official = set.namespace_of("official")?;
	let intermediary = set.namespace_of("intermediary")?;

	assert_eq!(set.map_type(official, intermediary, &TypeDef::class("a/b/C"))?, TypeDef::class("net/foo/Bar"));
	assert_eq!(set.map_type(intermediary, official, &TypeDef::class("net/foo/Bar"))?, TypeDef::class("a/b/C"));

	// inner classes map to their fully qualified name, spelled as a class name again
	assert_eq!(set.map_type(official, intermediary, &TypeDef::class("a/b/C$D"))?, TypeDef::class("net/foo/Bar/net/foo/Bar$Baz"));

	// no mapping, or no name in the target namespace
	assert_eq!(set.map_type(official, intermediary, &TypeDef::class("x/Y"))?, TypeDef::class("x/Y"));
	assert_eq!(set.map_type(official, intermediary, &TypeDef::class("e"))?, TypeDef::class("e"));

	Ok(())
}

#[test]
fn map_identity_and_arrays() -> Result<()> {
	let set = nested()?;
	let official = set.namespace_of("official")?;
	let intermediary = set.namespace_of("intermediary")?;

	let types = [
		TypeDef::Primitive(PrimitiveTypeDef::Int),
		TypeDef::class("a/b/C"),
		TypeDef::class("x/Y"),
		TypeDef::array(TypeDef::class("a/b/C"), 2),
	];
	for type_def in &types {
		assert_eq!(&set.map_type(official, official, type_def)?, type_def);
		assert_eq!(&set.map_type(intermediary, intermediary, type_def)?, type_def);
	}

	let array = set.map_type(official, intermediary, &TypeDef::array(TypeDef::class("a/b/C"), 3))?;
	assert_eq!(array.dimension(), 3);
	assert_eq!(array, TypeDef::array(TypeDef::class("net/foo/Bar"), 3));

	let primitives = TypeDef::array(TypeDef::Primitive(PrimitiveTypeDef::Long), 3);
	assert_eq!(set.map_type(official, intermediary, &primitives)?, primitives);

	Ok(())
}

#[test]
fn map_method_descriptors() -> Result<()> {
	let set = nested()?;
	let intermediary = set.namespace_of("intermediary")?;

	let desc = MethodDescriptor::parse("(La/b/C;ILx/Y;)[La/b/C$D;")?;
	assert_eq!(set.map_type_to(intermediary, &desc)?.descriptor(), "(Lnet/foo/Bar;ILx/Y;)[Lnet/foo/Bar/net/foo/Bar$Baz;");

	let desc = MethodDescriptor::parse("(Lnet/foo/Bar;)V")?;
	assert_eq!(set.map_type_from(intermediary, &desc)?.descriptor(), "(La/b/C;)V");

	Ok(())
}

#[test]
fn foreign_namespaces() -> Result<()> {
	let set = nested()?;
	let other = MappingSet::new(["intermediary", "official"])?;
	let unrelated = MappingSet::new(["a", "b"])?;

	let official = other.namespace_of("official")?;
	let intermediary = other.namespace_of("intermediary")?;
	assert_eq!(set.map_type(official, intermediary, &TypeDef::class("a/b/C"))?, TypeDef::class("net/foo/Bar"));

	let a = unrelated.namespace_of("a")?;
	assert!(set.map_type(a, intermediary, &TypeDef::class("a/b/C")).is_err());
	assert!(set.classes_in(a, "a/b/C").is_err());

	Ok(())
}

/// A set with a class `a` (`net/foo/Bar`), with a field `b` (`count`) of type `a` and a method `c` (`run`)
/// taking an `a`.
fn members() -> Result<MappingSet> {
	let mut builder = MappingSetBuilder::new(["official", "named"])?;

	let class = builder.class(None, 1);
	class.declare(0, "a", true)?.declare(1, "net/foo/Bar", true)?;

	let field = class.field(None, 1);
	field.declare(0, "b", true)?.declare(1, "count", true)?;
	field.type_def = Some(TypeDef::class("a"));

	let untyped = class.field(None, 1);
	untyped.declare(0, "d", true)?.declare(1, "count", true)?;

	let method = class.method(None, 1);
	method.declare(0, "c", true)?.declare(1, "run", true)?;
	method.desc = Some(MethodDescriptor::parse("(La;)V")?);

	let (set, issues) = builder.build()?;
	assert!(issues.is_empty(), "{issues:?}");
	Ok(set)
}

#[test]
fn find_fields() -> Result<()> {
	let set = members()?;
	let official = set.namespace_of("official")?;
	let named = set.namespace_of("named")?;
	let class = set.class_in(named, "net/foo/Bar")?.expect("class exists");

	let typed = LocalFieldRef::new("count", Some(TypeDef::class("net/foo/Bar")));
	let fields = class.find_fields_in(named, &typed)?;
	assert_eq!(fields.len(), 1);
	assert_eq!(fields[0].name(official)?, Some("b"));
	assert_eq!(fields[0].type_in(named)?, Some(TypeDef::class("net/foo/Bar")));
	assert_eq!(fields[0].containing_class(), Some(class));

	// the type is read in each namespace in turn
	assert_eq!(class.find_fields(&typed).len(), 1);
	assert_eq!(class.find_fields(&LocalFieldRef::new("b", Some(TypeDef::class("a")))).len(), 1);
	assert_eq!(class.find_fields(&LocalFieldRef::new("b", Some(TypeDef::class("net/foo/Bar")))).len(), 0);

	// without a type, only the name counts
	assert_eq!(class.find_fields_in(named, &typed.clone().without_type())?.len(), 2);
	assert_eq!(class.find_fields(&LocalFieldRef::new("d", None)).len(), 1);
	assert_eq!(class.find_fields_in(official, &LocalFieldRef::new("count", None))?.len(), 0);

	assert_eq!(class.find_field(&typed)?.and_then(|x| x.name(official).ok().flatten()), Some("b"));

	let field_ref = typed.with_class("net/foo/Bar".into());
	assert!(set.field_mapping_in(named, &field_ref)?.is_some());
	assert!(set.field_mapping_in(official, &field_ref)?.is_none());
	assert!(set.field_mapping(&field_ref)?.is_some());

	Ok(())
}

#[test]
fn find_methods() -> Result<()> {
	let set = members()?;
	let official = set.namespace_of("official")?;
	let named = set.namespace_of("named")?;
	let class = set.class("a").expect("class exists");

	let reference = LocalMethodRef::new("run", Some(MethodDescriptor::parse("(Lnet/foo/Bar;)V")?));
	let method = class.find_method_in(named, &reference)?.expect("method exists");
	assert_eq!(method.name(official)?, Some("c"));
	assert_eq!(method.descriptor_in(named)?.descriptor(), "(Lnet/foo/Bar;)V");
	assert_eq!(method.descriptor_in(official)?.descriptor(), "(La;)V");
	assert_eq!(method.containing_class(), Some(class));

	// the name has to match as well as the descriptor
	let wrong_name = LocalMethodRef::new("walk", reference.desc.clone());
	assert!(class.find_methods_in(named, &wrong_name)?.is_empty());

	assert_eq!(class.find_methods(&reference).len(), 1);
	assert_eq!(class.find_methods(&LocalMethodRef::new("c", None)).len(), 1);
	assert_eq!(class.find_methods(&LocalMethodRef::new("c", Some(MethodDescriptor::parse("()V")?))).len(), 0);

	let method_ref = reference.with_class("net/foo/Bar".into());
	assert_eq!(set.method_mapping(&method_ref)?, Some(method));

	Ok(())
}

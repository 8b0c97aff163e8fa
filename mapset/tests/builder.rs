use anyhow::Result;
use pretty_assertions::assert_eq;
use jtypes::descriptor::MethodDescriptor;
use jtypes::refs::{LocalMethodRef, LocalVarIndex, LvtIndex, ParamIndex};
use mapset::builder::{MappingSetBuilder, NamingBuilder, Ns};
use mapset::location::{FileCoords, LinePriority};
use mapset::{MappingElement, MappingIssuesRegistry};

fn messages(issues: &[mapset::MappingParseIssue]) -> Vec<&str> {
	issues.iter().map(|x| x.message.as_str()).collect()
}

#[test]
fn method_without_descriptor() -> Result<()> {
	let mut builder = MappingSetBuilder::new(["official", "named"])?;

	let class = builder.class(Some(LinePriority::base(1)), 1);
	class.declare(0, "a", true)?.declare(1, "net/example/Main", true)?;

	let method = class.method(Some(LinePriority::base(2)), 5);
	method.declare(0, "b", true)?.declare(1, "run", true)?;
	method.param(ParamIndex(0), Some(LinePriority::base(3)), 9).declare(1, "args", true)?;

	let (set, issues) = builder.build()?;

	assert_eq!(messages(issues.errors()), vec!["Method mappings must have a descriptor"]);
	assert_eq!(issues.errors()[0].coords, Some(FileCoords::new(2, 5)));
	assert_eq!(issues.warnings(), &[]);

	let class = set.class("a").expect("class exists");
	assert_eq!(class.methods().count(), 0);

	Ok(())
}

#[test]
fn missing_names() -> Result<()> {
	let mut builder = MappingSetBuilder::new(["official", "intermediary", "named"])?;

	builder.package(Some(LinePriority::base(1)), 1).declare(0, "a", true)?;
	builder.class(Some(LinePriority::base(2)), 1);

	let class = builder.class(Some(LinePriority::base(3)), 1);
	class.declare(0, "b", true)?.declare(1, "class_1", true)?.declare(2, "   ", true)?;

	let method = class.method(Some(LinePriority::base(4)), 1);
	method.declare(0, "c", true)?.declare(1, "method_1", true)?.declare(2, "run", true)?;
	method.desc = Some(MethodDescriptor::parse("()V")?);
	method.param(ParamIndex(1), Some(LinePriority::base(5)), 1).declare(2, "count", true)?;
	method.param(ParamIndex(2), Some(LinePriority::base(6)), 1);
	method.local_var(LocalVarIndex::UNKNOWN, LvtIndex::UNKNOWN, Some(LinePriority::base(7)), 1).declare(2, "x", true)?;
	method.local_var(LocalVarIndex::new(3), LvtIndex::UNKNOWN, Some(LinePriority::base(8)), 1).declare(2, "y", true)?;

	let (set, issues) = builder.build()?;

	assert_eq!(messages(issues.warnings()), vec![
		"Package mapping found without target name",
		"Package mapping found without target name",
		"Class mapping found without target name",
		"Class mapping found without target name",
		"Class mapping found without target name",
	]);
	assert_eq!(messages(issues.errors()), vec![
		"Class mapping found with no target names",
		"Method parameter mapping found with no target names",
		"Method local var mapping found without any known indices",
	]);
	assert_eq!(issues.errors()[0].coords.and_then(|x| x.line), Some(2));

	// elements without any names are still there, and blank names are empty
	assert_eq!(set.classes().count(), 2);
	let named = set.namespace_of("named")?;
	let class = set.class("b").expect("class exists");
	assert_eq!(class.name(named)?, None);

	let method = class.methods().next().expect("method exists");
	assert_eq!(method.params().count(), 2);
	assert_eq!(method.param(ParamIndex(1)).expect("param exists").name(named)?, Some("count"));
	assert!(method.param(ParamIndex(2)).expect("param exists").names().all_none());

	let local_vars: Vec<_> = method.local_vars().collect();
	assert_eq!(local_vars.len(), 1);
	assert_eq!(local_vars[0].name(named)?, Some("y"));
	assert_eq!(local_vars[0].method(), Some(method));

	Ok(())
}

#[test]
fn declare() -> Result<()> {
	let mut builder = MappingSetBuilder::new(["official", "named"])?;

	let class = builder.class(None, 1);
	class.declare(0, "a", false)?.declare(0, "b", false)?;
	assert_eq!(class.name(0), Some("a"));

	class.declare(0, "c", true)?;
	assert_eq!(class.name(0), Some("c"));

	class.declare_in("named", "net/example/Main", false)?;
	assert_eq!(class.name(1), Some("net/example/Main"));

	assert!(class.declare(2, "d", true).is_err());
	assert!(class.declare_in("intermediary", "d", true).is_err());

	Ok(())
}

#[test]
fn class_reuse() -> Result<()> {
	let mut builder = MappingSetBuilder::new(["official", "named"])?;

	builder.class_ref(Ns::new("a".into(), 0), None, 1)?.declare(1, "First", true)?;
	builder.class_ref(Ns::new("b".into(), 0), None, 1)?.declare(1, "Second", true)?;
	builder.class(None, 1).declare(0, "a", true)?.declare(1, "Duplicate", true)?;

	// the first declaration of `a` is found again, not the last one touched, nor the later duplicate
	let class = builder.class_ref(Ns::new("a".into(), 0), None, 1)?;
	assert_eq!(class.name(1), Some("First"));
	let class = builder.class_ref(Ns::new("a".into(), 0), None, 1)?;
	assert_eq!(class.name(1), Some("First"));

	let class = builder.class_ref(Ns::new("Second".into(), 1), None, 1)?;
	assert_eq!(class.name(0), Some("b"));

	assert_eq!(builder.classes().len(), 3);
	assert!(builder.class_ref(Ns::new("a".into(), 2), None, 1).is_err());

	Ok(())
}

#[test]
fn method_reuse() -> Result<()> {
	let mut builder = MappingSetBuilder::new(["official", "named"])?;

	let int_getter = MethodDescriptor::parse("()I")?;
	let long_getter = MethodDescriptor::parse("()J")?;

	let class = builder.class(None, 1);
	class.declare(0, "a", true)?;
	class.method_ref(Ns::new(LocalMethodRef::new("b", Some(int_getter.clone())), 0), None, 1)?.declare(1, "getInt", true)?;
	class.method_ref(Ns::new(LocalMethodRef::new("b", Some(long_getter.clone())), 0), None, 1)?.declare(1, "getLong", true)?;

	let method = class.method_ref(Ns::new(LocalMethodRef::new("b", Some(int_getter)), 0), None, 1)?;
	assert_eq!(method.name(1), Some("getInt"));
	let method = class.method_ref(Ns::new(LocalMethodRef::new("getLong", Some(long_getter)), 1), None, 1)?;
	assert_eq!(method.name(0), Some("b"));

	assert_eq!(class.methods().len(), 2);

	let (set, issues) = builder.build()?;
	assert_eq!(issues.errors(), &[]);
	assert_eq!(set.class("a").expect("class exists").methods().count(), 2);

	Ok(())
}

#[test]
fn params_and_local_vars_are_reused() -> Result<()> {
	let mut builder = MappingSetBuilder::new(["official", "named"])?;

	let method = builder.class(None, 1).method(None, 1);
	method.param(ParamIndex(0), None, 1).declare(1, "first", true)?;
	method.param(ParamIndex(0), None, 1).declare(1, "second", false)?;
	method.local_var(LocalVarIndex::new(1), LvtIndex::new(0), None, 1).declare(1, "x", true)?;
	method.local_var(LocalVarIndex::new(1), LvtIndex::UNKNOWN, None, 1).declare(1, "y", true)?;

	assert_eq!(method.params().count(), 1);
	assert_eq!(method.params().next().and_then(|x| x.name(1)), Some("first"));
	assert_eq!(method.local_vars().len(), 2);

	Ok(())
}

#[test]
fn reused_declarations_keep_their_position() -> Result<()> {
	let mut builder = MappingSetBuilder::new(["official", "named"])?;

	let method = builder.class(None, 1).method(None, 1);
	method.param(ParamIndex(0), Some(LinePriority::low(2)), 3).declare(1, "low", true)?;
	let param = method.param(ParamIndex(0), Some(LinePriority::high(4)), 5);
	param.declare(1, "high", true)?;
	assert_eq!(param.coords, FileCoords::at(Some(LinePriority::low(2)), 3));

	method.local_var(LocalVarIndex::new(1), LvtIndex::new(0), Some(LinePriority::high(6)), 7);
	let local_var = method.local_var(LocalVarIndex::new(1), LvtIndex::new(0), Some(LinePriority::low(8)), 9);
	assert_eq!(local_var.coords, FileCoords::at(Some(LinePriority::high(6)), 7));

	Ok(())
}

#[test]
fn reader_issues_are_kept() -> Result<()> {
	let mut builder = MappingSetBuilder::new(Vec::<String>::new())?;
	assert_eq!(builder.namespaces(), &["from", "to"]);

	builder.warning("unknown header".to_owned(), Some(FileCoords::new(1, 1)));
	builder.class(None, 1).declare(0, "a", true)?.declare(1, "b", true)?;

	let (set, issues) = builder.build()?;
	assert_eq!(messages(issues.warnings()), vec!["unknown header"]);

	let class = set.class("a").expect("class exists");
	assert_eq!(class.unnamed_to()?, Some("b"));
	assert_eq!(class.unnamed_from()?, Some("a"));

	Ok(())
}

#[test]
fn invalid_namespaces() {
	assert!(MappingSetBuilder::new(["official"]).is_err());
	assert!(MappingSetBuilder::new(["official", "official"]).is_err());
}

#[test]
fn class_ref_finds_first_declaration_after_other_lookup() -> Result<()> {
	let mut builder = MappingSetBuilder::new(["official", "named"])?;

	builder.class(None, 1).declare(0, "X", true)?;
	builder.class(None, 2).declare(0, "X", true)?.declare(1, "Y", true)?;

	let class = builder.class_ref(Ns::new("Y".into(), 1), None, 3)?;
	assert_eq!(class.name(0), Some("X"));

	// the second declaration was found last, but the first one is the first with that official name
	let class = builder.class_ref(Ns::new("X".into(), 0), None, 4)?;
	assert_eq!(class.name(1), None);

	let class = builder.class_ref(Ns::new("Y".into(), 1), None, 5)?;
	assert_eq!(class.name(1), Some("Y"));
	assert_eq!(builder.classes().len(), 2);

	Ok(())
}

#[test]
fn class_ref_notices_renamed_class() -> Result<()> {
	let mut builder = MappingSetBuilder::new(["official", "named"])?;

	builder.class_ref(Ns::new("a".into(), 0), None, 1)?.declare(0, "b", true)?;

	let class = builder.class_ref(Ns::new("a".into(), 0), None, 2)?;
	assert_eq!(class.name(0), Some("a"));
	assert_eq!(class.coords, FileCoords::at(None, 2));
	assert_eq!(builder.classes().len(), 2);

	Ok(())
}

#[test]
fn method_ref_finds_first_declaration_after_other_lookup() -> Result<()> {
	let mut builder = MappingSetBuilder::new(["official", "named"])?;
	let desc = MethodDescriptor::parse("()V")?;

	let class = builder.class(None, 1);
	class.declare(0, "a", true)?;
	let method = class.method(None, 2);
	method.declare(0, "x", true)?;
	method.desc = Some(desc.clone());
	let method = class.method(None, 3);
	method.declare(0, "x", true)?.declare(1, "run", true)?;
	method.desc = Some(desc.clone());

	let method = class.method_ref(Ns::new(LocalMethodRef::new("run", Some(desc.clone())), 1), None, 4)?;
	assert_eq!(method.name(0), Some("x"));

	let method = class.method_ref(Ns::new(LocalMethodRef::new("x", Some(desc.clone())), 0), None, 5)?;
	assert_eq!(method.name(1), None);

	let method = class.method_ref(Ns::new(LocalMethodRef::new("x", Some(desc)), 0), None, 6)?;
	assert_eq!(method.name(1), None);
	assert_eq!(class.methods().len(), 2);

	Ok(())
}

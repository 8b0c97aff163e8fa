use std::fmt::{Display, Formatter};
use std::iter::Peekable;
use std::str::{Chars, FromStr};
use anyhow::{anyhow, bail, Context, Error, Result};
use crate::names::ClassName;

/// A primitive type.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PrimitiveTypeDef {
	/// A `boolean`, written as `Z`.
	Boolean,
	/// A `char`, written as `C`.
	Char,
	/// A `byte`, written as `B`.
	Byte,
	/// A `short`, written as `S`.
	Short,
	/// An `int`, written as `I`.
	Int,
	/// A `long`, written as `J`.
	Long,
	/// A `float`, written as `F`.
	Float,
	/// A `double`, written as `D`.
	Double,
}

impl PrimitiveTypeDef {
	pub fn from_char(c: char) -> Option<PrimitiveTypeDef> {
		match c {
			'Z' => Some(PrimitiveTypeDef::Boolean),
			'C' => Some(PrimitiveTypeDef::Char),
			'B' => Some(PrimitiveTypeDef::Byte),
			'S' => Some(PrimitiveTypeDef::Short),
			'I' => Some(PrimitiveTypeDef::Int),
			'J' => Some(PrimitiveTypeDef::Long),
			'F' => Some(PrimitiveTypeDef::Float),
			'D' => Some(PrimitiveTypeDef::Double),
			_ => None,
		}
	}

	pub fn descriptor_char(self) -> char {
		match self {
			PrimitiveTypeDef::Boolean => 'Z',
			PrimitiveTypeDef::Char => 'C',
			PrimitiveTypeDef::Byte => 'B',
			PrimitiveTypeDef::Short => 'S',
			PrimitiveTypeDef::Int => 'I',
			PrimitiveTypeDef::Long => 'J',
			PrimitiveTypeDef::Float => 'F',
			PrimitiveTypeDef::Double => 'D',
		}
	}
}

/// Represents the type of a field, parameter or local variable.
///
/// The component type of an [`TypeDef::Array`] is never an array itself, nested arrays are represented by
/// the dimension. Use [`TypeDef::array`] to construct arrays, it upholds this.
///
/// ```
/// use jtypes::descriptor::{PrimitiveTypeDef, TypeDef};
///
/// // the type of a java `int[][]`
/// let int_array = TypeDef::array(TypeDef::Primitive(PrimitiveTypeDef::Int), 2);
/// assert_eq!(int_array.descriptor(), "[[I");
/// assert_eq!(int_array, TypeDef::array(TypeDef::array(TypeDef::Primitive(PrimitiveTypeDef::Int), 1), 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDef {
	Primitive(PrimitiveTypeDef),
	/// An instance of the class specified by [`ClassName`].
	Class(ClassName),
	/// An array type, represented by the inner component type and the dimension.
	Array {
		component: Box<TypeDef>,
		dimension: u8,
	},
}

impl TypeDef {
	pub fn class(name: impl Into<ClassName>) -> TypeDef {
		TypeDef::Class(name.into())
	}

	/// Creates an array type, flattening nested arrays into one with the summed dimension.
	///
	/// A dimension of `0` returns the component itself.
	pub fn array(component: TypeDef, dimension: u8) -> TypeDef {
		if dimension == 0 {
			return component;
		}
		match component {
			TypeDef::Array { component, dimension: inner } => TypeDef::Array {
				component,
				dimension: inner.saturating_add(dimension),
			},
			component => TypeDef::Array {
				component: Box::new(component),
				dimension,
			},
		}
	}

	/// Returns the array dimension, which is `0` for non array types.
	pub fn dimension(&self) -> u8 {
		match self {
			TypeDef::Array { dimension, .. } => *dimension,
			_ => 0,
		}
	}

	/// Returns if a type contains a class name, that is, if its spelling changes across namespaces.
	pub fn is_mappable(&self) -> bool {
		match self {
			TypeDef::Primitive(_) => false,
			TypeDef::Class(_) => true,
			TypeDef::Array { component, .. } => component.is_mappable(),
		}
	}

	pub fn descriptor(&self) -> String {
		let mut s = String::new();
		write_type(self, &mut s);
		s
	}

	/// Parses a field descriptor, like `I`, `[[D` or `Ljava/lang/Object;`.
	pub fn parse(desc: &str) -> Result<TypeDef> {
		let mut chars = desc.chars().peekable();

		let type_def = match read_type(&mut chars).with_context(|| anyhow!("failed to read type descriptor {desc:?}"))? {
			ReturnTypeDef::Void => bail!("void is not allowed in type descriptor {desc:?}"),
			ReturnTypeDef::Type(type_def) => type_def,
		};

		if chars.peek().is_some() {
			bail!("expected end of type descriptor {desc:?}, got {:?} remaining", String::from_iter(chars));
		}

		Ok(type_def)
	}
}

impl Display for TypeDef {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.descriptor())
	}
}

impl FromStr for TypeDef {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		TypeDef::parse(s)
	}
}

/// A [`TypeDef`] or `void`, the type of a method return value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReturnTypeDef {
	Void,
	Type(TypeDef),
}

impl ReturnTypeDef {
	pub fn is_mappable(&self) -> bool {
		match self {
			ReturnTypeDef::Void => false,
			ReturnTypeDef::Type(type_def) => type_def.is_mappable(),
		}
	}

	pub fn descriptor(&self) -> String {
		let mut s = String::new();
		write_return_type(self, &mut s);
		s
	}

	pub fn parse(desc: &str) -> Result<ReturnTypeDef> {
		let mut chars = desc.chars().peekable();

		let return_type = read_type(&mut chars).with_context(|| anyhow!("failed to read return descriptor {desc:?}"))?;

		if chars.peek().is_some() {
			bail!("expected end of return descriptor {desc:?}, got {:?} remaining", String::from_iter(chars));
		}

		Ok(return_type)
	}
}

impl From<TypeDef> for ReturnTypeDef {
	fn from(value: TypeDef) -> Self {
		ReturnTypeDef::Type(value)
	}
}

impl Display for ReturnTypeDef {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.descriptor())
	}
}

/// The parameter and return types of a method.
///
/// ```
/// use jtypes::descriptor::{MethodDescriptor, PrimitiveTypeDef, ReturnTypeDef, TypeDef};
///
/// let desc = MethodDescriptor::parse("(I[Ljava/lang/String;)V").unwrap();
/// assert_eq!(desc.params, vec![
///     TypeDef::Primitive(PrimitiveTypeDef::Int),
///     TypeDef::array(TypeDef::class("java/lang/String"), 1),
/// ]);
/// assert_eq!(desc.return_type, ReturnTypeDef::Void);
/// assert_eq!(desc.to_string(), "(I[Ljava/lang/String;)V");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodDescriptor {
	pub params: Vec<TypeDef>,
	pub return_type: ReturnTypeDef,
}

impl MethodDescriptor {
	pub fn new(params: Vec<TypeDef>, return_type: ReturnTypeDef) -> MethodDescriptor {
		MethodDescriptor { params, return_type }
	}

	pub fn is_mappable(&self) -> bool {
		self.params.iter().any(TypeDef::is_mappable) || self.return_type.is_mappable()
	}

	pub fn descriptor(&self) -> String {
		let mut s = String::new();
		s.push('(');
		for param in &self.params {
			write_type(param, &mut s);
		}
		s.push(')');
		write_return_type(&self.return_type, &mut s);
		s
	}

	pub fn parse(desc: &str) -> Result<MethodDescriptor> {
		let mut chars = desc.chars().peekable();

		if chars.next_if_eq(&'(').is_none() {
			bail!("method descriptor {desc:?} doesn't start with '('");
		}

		let mut params = Vec::new();
		loop {
			if chars.next_if_eq(&')').is_some() {
				break;
			}
			if chars.peek().is_none() {
				bail!("unexpected abrupt ending of method descriptor {desc:?}");
			}

			match read_type(&mut chars).with_context(|| anyhow!("failed to read parameter descriptor of {desc:?}"))? {
				ReturnTypeDef::Void => bail!("void is not allowed as parameter type in {desc:?}"),
				ReturnTypeDef::Type(type_def) => params.push(type_def),
			}
		}

		let return_type = read_type(&mut chars)
			.with_context(|| anyhow!("failed to read return descriptor of {desc:?}"))?;

		if chars.peek().is_some() {
			bail!("expected end of method descriptor {desc:?}, got {:?} remaining", String::from_iter(chars));
		}

		Ok(MethodDescriptor { params, return_type })
	}
}

impl Display for MethodDescriptor {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.descriptor())
	}
}

impl FromStr for MethodDescriptor {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		MethodDescriptor::parse(s)
	}
}

// The grammar for descriptors is:
//   MethodDescriptor:
//     "(" FieldType* ")" ReturnDescriptor
//
//   ReturnDescriptor:
//     FieldType | "V"
//
//   FieldType:
//     "B" | "C" | "D" | "F" | "I" | "J" | "S" | "Z" |
//     "L" ClassName ";" |
//     "[" FieldType
fn read_type(chars: &mut Peekable<Chars>) -> Result<ReturnTypeDef> {
	let mut dimension: u8 = 0;
	while chars.next_if_eq(&'[').is_some() {
		dimension = dimension.checked_add(1)
			.context("array dimension doesn't fit into 255")?;
	}

	let char = chars.next().context("unexpected abrupt ending of descriptor")?;
	let type_def = match char {
		'V' if dimension == 0 => return Ok(ReturnTypeDef::Void),
		'V' => bail!("arrays of void are not allowed"),
		'L' => {
			let mut s = String::new();
			loop {
				match chars.next() {
					Some(';') => break,
					Some(c) => s.push(c),
					None => bail!("unexpected abrupt ending of class name {s:?}, expected ';'"),
				}
			}
			if s.is_empty() {
				bail!("empty class name in descriptor");
			}
			TypeDef::Class(ClassName::new(s))
		},
		c => match PrimitiveTypeDef::from_char(c) {
			Some(primitive) => TypeDef::Primitive(primitive),
			None => bail!("unexpected char {c:?} in descriptor"),
		},
	};

	Ok(ReturnTypeDef::Type(if dimension == 0 {
		type_def
	} else {
		TypeDef::array(type_def, dimension)
	}))
}

fn write_type(t: &TypeDef, s: &mut String) {
	match t {
		TypeDef::Primitive(primitive) => s.push(primitive.descriptor_char()),
		TypeDef::Class(class_name) => {
			s.push('L');
			s.push_str(class_name.as_str());
			s.push(';');
		},
		TypeDef::Array { component, dimension } => {
			for _ in 0..*dimension {
				s.push('[');
			}
			write_type(component, s);
		},
	}
}

fn write_return_type(t: &ReturnTypeDef, s: &mut String) {
	match t {
		ReturnTypeDef::Void => s.push('V'),
		ReturnTypeDef::Type(t) => write_type(t, s),
	}
}

#[cfg(test)]
mod testing {
	use pretty_assertions::assert_eq;
	use crate::descriptor::{PrimitiveTypeDef, ReturnTypeDef, TypeDef};

	#[test]
	fn mappable() {
		assert!(!TypeDef::Primitive(PrimitiveTypeDef::Long).is_mappable());
		assert!(TypeDef::class("a").is_mappable());
		assert!(TypeDef::array(TypeDef::class("a"), 4).is_mappable());
		assert!(!TypeDef::array(TypeDef::Primitive(PrimitiveTypeDef::Byte), 4).is_mappable());
		assert!(!ReturnTypeDef::Void.is_mappable());
	}

	#[test]
	fn dimension_of_nested_arrays() {
		let t = TypeDef::array(TypeDef::array(TypeDef::class("a/b"), 2), 1);
		assert_eq!(t.dimension(), 3);
		assert_eq!(t.descriptor(), "[[[La/b;");
	}
}

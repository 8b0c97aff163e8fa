//! Names of packages, classes and members.
//!
//! Package and class names use the internal form, with `/` separating the package segments. The
//! [`PackName::normalized`] and [`ClassName::normalized`] constructors accept the dotted source form
//! as well.

use crate::macros::make_name;

make_name!(
	/// A package name in internal form, like `java/lang`.
	pub PackName;
);

make_name!(
	/// A class name in internal form, like `java/lang/Object` or `a/b/C$D`.
	pub ClassName;
);

make_name!(
	/// The simple name of a field.
	pub FieldName;
);

make_name!(
	/// The simple name of a method, including the special `<init>` and `<clinit>` names.
	pub MethodName;
);

make_name!(
	/// The name of a method parameter.
	pub ParamName;
);

make_name!(
	/// The name of a local variable.
	pub LocalVarName;
);

impl PackName {
	/// Creates a package name, replacing `.` with `/`.
	///
	/// The root package written as `.` (or `/`) in some formats ends up as `/`.
	/// ```
	/// use jtypes::names::PackName;
	///
	/// assert_eq!(PackName::normalized("net.example"), "net/example");
	/// assert_eq!(PackName::normalized("/"), "/");
	/// ```
	pub fn normalized(name: &str) -> PackName {
		let replaced = name.replace('.', "/");
		if replaced == "//" {
			PackName::new("/")
		} else {
			PackName::new(replaced)
		}
	}
}

impl ClassName {
	/// Creates a class name, replacing `.` with `/`.
	/// ```
	/// use jtypes::names::ClassName;
	///
	/// assert_eq!(ClassName::normalized("java.lang.Object"), "java/lang/Object");
	/// assert_eq!(ClassName::normalized("a/b/C$D"), "a/b/C$D");
	/// ```
	pub fn normalized(name: &str) -> ClassName {
		ClassName::new(name.replace('.', "/"))
	}

	/// Returns the dotted form of this class name, as used in Java source.
	pub fn dotted(&self) -> String {
		self.as_str().replace('/', ".")
	}
}

#[cfg(test)]
mod testing {
	use pretty_assertions::assert_eq;
	use crate::names::{ClassName, FieldName, PackName};

	#[test]
	fn package_normalization() {
		assert_eq!(PackName::normalized("a.b.c"), "a/b/c");
		assert_eq!(PackName::normalized("a/b/c"), "a/b/c");
		assert_eq!(PackName::normalized(".."), "/");
	}

	#[test]
	fn class_dotted() {
		assert_eq!(ClassName::new("net/foo/Bar$Baz").dotted(), "net.foo.Bar$Baz");
	}

	#[test]
	fn comparisons() {
		let name = FieldName::new("field_1");
		assert!(name == "field_1");
		assert!("field_1" == name);
		assert_eq!(name.to_string(), "field_1");
		assert_eq!(String::from(name), "field_1".to_owned());
	}
}

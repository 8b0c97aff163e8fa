/// Creates a [String] like newtype for a name.
///
/// The created type gets conversions from [`String`] and [`&str`][str], [`Display`][std::fmt::Display],
/// [`AsRef<str>`], [`Borrow<str>`][std::borrow::Borrow] and comparisons against string slices.
///
/// ```ignore
/// make_name!(
///     /// Some documentation.
///     pub FieldName;
/// );
/// ```
macro_rules! make_name {
	(
		$( #[$doc:meta] )*
		$vis:vis $name:ident;
	) => {
		$( #[$doc] )*
		#[derive(Debug, Clone, PartialEq, PartialOrd, Eq, Ord, Hash)]
		$vis struct $name(String);

		impl $name {
			pub fn new(name: impl Into<String>) -> $name {
				$name(name.into())
			}

			pub fn as_str(&self) -> &str {
				&self.0
			}

			pub fn into_inner(self) -> String {
				self.0
			}
		}

		impl std::fmt::Display for $name {
			fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
				f.write_str(&self.0)
			}
		}

		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}

		impl std::borrow::Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}

		impl From<String> for $name {
			fn from(value: String) -> Self {
				$name(value)
			}
		}
		impl<'a> From<&'a str> for $name {
			fn from(value: &'a str) -> Self {
				$name(value.to_owned())
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}

		impl PartialEq<str> for $name {
			fn eq(&self, other: &str) -> bool {
				self.0 == other
			}
		}
		impl<'a> PartialEq<&'a str> for $name {
			fn eq(&self, other: &&'a str) -> bool {
				self.0 == *other
			}
		}
		impl PartialEq<$name> for str {
			fn eq(&self, other: &$name) -> bool {
				self == other.0
			}
		}
		impl<'a> PartialEq<$name> for &'a str {
			fn eq(&self, other: &$name) -> bool {
				*self == other.0
			}
		}
	}
}

pub(crate) use make_name;

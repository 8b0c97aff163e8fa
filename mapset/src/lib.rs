//! An in-memory model of deobfuscation mappings.
//!
//! A [`MappingSet`] relates the names of packages, classes, fields, methods, method parameters and local variables
//! across two or more [namespaces][MappingNamespace]. Sets are created with a [`MappingSetBuilder`]:
//!
//! ```
//! use mapset::builder::{MappingSetBuilder, NamingBuilder};
//! use mapset::location::LinePriority;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut builder = MappingSetBuilder::new(["official", "named"])?;
//! builder.class(Some(LinePriority::base(1)), 1)
//!     .declare(0, "a", true)?
//!     .declare(1, "net/example/Main", true)?;
//!
//! let (set, issues) = builder.build()?;
//! assert!(issues.is_empty());
//!
//! let named = set.namespace_of("named")?;
//! let class = set.class("a").unwrap();
//! assert_eq!(class.name(named)?, Some("net/example/Main"));
//! # Ok(())
//! # }
//! ```

pub mod names;
pub mod namespace;
pub mod location;
pub mod issues;
pub mod lookup;
pub mod element;
pub mod set;
pub mod builder;

pub use builder::MappingSetBuilder;
pub use element::{Handle, MappingElement};
pub use issues::{MappingIssues, MappingIssuesRegistry, MappingParseIssue};
pub use namespace::MappingNamespace;
pub use set::MappingSet;

use indexmap::IndexMap;
use crate::element::MappingElement;

/// Stores elements in insertion order, indexed by each of their names.
///
/// The indices are updated as elements are added, so that queries never scan all elements. A query
/// for a name nothing is known for yields nothing.
#[derive(Debug, Clone)]
pub struct LookupTable<T> {
	elements: Vec<T>,
	/// Every element is listed once for each distinct name it has.
	by_name: IndexMap<String, Vec<usize>>,
	by_namespace: Vec<IndexMap<String, Vec<usize>>>,
}

impl<T: MappingElement> LookupTable<T> {
	pub(crate) fn new(namespace_count: usize) -> LookupTable<T> {
		LookupTable {
			elements: Vec::new(),
			by_name: IndexMap::new(),
			by_namespace: vec![IndexMap::new(); namespace_count],
		}
	}

	/// Adds an element and returns its position.
	pub(crate) fn add(&mut self, element: T) -> usize {
		let index = self.elements.len();

		let mut seen: Vec<&str> = Vec::new();
		for (namespace, name) in element.names().iter().enumerate() {
			let Some(name) = name else { continue };

			if let Some(by_name) = self.by_namespace.get_mut(namespace) {
				by_name.entry(name.to_owned()).or_default().push(index);
			}
			if !seen.contains(&name) {
				seen.push(name);
				self.by_name.entry(name.to_owned()).or_default().push(index);
			}
		}

		self.elements.push(element);
		index
	}

	pub fn len(&self) -> usize {
		self.elements.len()
	}

	pub fn is_empty(&self) -> bool {
		self.elements.is_empty()
	}

	pub fn get(&self, index: usize) -> Option<&T> {
		self.elements.get(index)
	}

	pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut T> {
		self.elements.get_mut(index)
	}

	pub fn list(&self) -> &[T] {
		&self.elements
	}

	/// All elements having the given name in any namespace.
	pub fn query<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a T> + 'a {
		self.resolve(self.by_name.get(name))
	}

	/// All elements having the given name in the namespace with the given index.
	pub fn query_in<'a>(&'a self, namespace: usize, name: &str) -> impl Iterator<Item = &'a T> + 'a {
		self.resolve(self.by_namespace.get(namespace).and_then(|by_name| by_name.get(name)))
	}

	fn resolve<'a>(&'a self, indices: Option<&'a Vec<usize>>) -> impl Iterator<Item = &'a T> + 'a {
		indices.into_iter()
			.flatten()
			.filter_map(|&index| self.elements.get(index))
	}
}

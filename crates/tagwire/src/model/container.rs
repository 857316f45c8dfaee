//! Composite values: named containers and ordered arrays.
//!
//! Both own their children exclusively, so the value tree is acyclic by
//! construction and dropping a composite releases everything beneath it.

use rustc_hash::FxHashMap;

use crate::error::LookupError;
use crate::model::tag::TypeTag;
use crate::model::value::Value;

/// An insertion-ordered mapping from name to [`Value`].
///
/// Names are unique: adding a value under an existing name replaces it in
/// place, keeping the original position. Iteration follows insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Container {
    entries: Vec<Value>,
    index: FxHashMap<String, usize>,
}

impl Container {
    /// Creates an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value, replacing any existing value with the same name.
    pub fn add(&mut self, value: Value) -> &mut Self {
        if let Some(&i) = self.index.get(value.name()) {
            self.entries[i] = value;
        } else {
            self.index.insert(value.name().to_string(), self.entries.len());
            self.entries.push(value);
        }
        self
    }

    /// Looks up a value by name.
    pub fn get(&self, name: &str) -> Result<&Value, LookupError> {
        self.try_get(name).ok_or_else(|| LookupError::NameNotFound {
            name: name.to_string(),
        })
    }

    /// Looks up a value by name, returning None when absent.
    pub fn try_get(&self, name: &str) -> Option<&Value> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    /// Looks up a value by name for mutation, returning None when absent.
    pub fn try_get_mut(&mut self, name: &str) -> Option<&mut Value> {
        match self.index.get(name) {
            Some(&i) => Some(&mut self.entries[i]),
            None => None,
        }
    }

    /// Looks up a value by name and checks its type tag.
    ///
    /// Dispatches on the explicit tag discriminator rather than runtime type
    /// identity, so the check is stable across independently compiled peers.
    pub fn get_typed(&self, name: &str, expected: TypeTag) -> Result<&Value, LookupError> {
        let value = self.get(name)?;
        let found = value.type_tag();
        if found != expected {
            return Err(LookupError::TypeMismatch {
                name: name.to_string(),
                expected,
                found,
            });
        }
        Ok(value)
    }

    /// Returns true if a value with this name exists.
    pub fn has(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Removes and returns the value with this name, if present.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let i = self.index.remove(name)?;
        let value = self.entries.remove(i);
        for slot in self.index.values_mut() {
            if *slot > i {
                *slot -= 1;
            }
        }
        Some(value)
    }

    /// Removes all values.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    /// Returns the number of values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the container holds no values.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates the values in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Container {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// An ordered sequence of [`Value`].
///
/// Element type tags may be heterogeneous; the format does not require
/// same-typed elements and this implementation deliberately does not
/// enforce it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Array {
    items: Vec<Value>,
}

impl Array {
    /// Creates an empty array.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value.
    pub fn push(&mut self, value: Value) -> &mut Self {
        self.items.push(value);
        self
    }

    /// Returns the element at `index`, if in bounds.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    /// Returns the element at `index` for mutation, if in bounds.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.items.get_mut(index)
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the array holds no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates the elements in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }
}

impl std::ops::Index<usize> for Array {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        &self.items[index]
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl FromIterator<Value> for Array {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_get() {
        let mut c = Container::new();
        c.add(Value::bool("flag", true));
        c.add(Value::int("count", 42).unwrap());

        assert_eq!(c.len(), 2);
        assert!(c.has("flag"));
        assert!(!c.has("missing"));
        assert_eq!(c.get("count").unwrap().as_i32(), Some(42));
        assert!(c.try_get("missing").is_none());

        let err = c.get("missing").unwrap_err();
        assert!(matches!(err, LookupError::NameNotFound { name } if name == "missing"));
    }

    #[test]
    fn test_add_replaces_in_place() {
        let mut c = Container::new();
        c.add(Value::int("a", 1).unwrap());
        c.add(Value::int("b", 2).unwrap());
        c.add(Value::string("a", "replaced"));

        assert_eq!(c.len(), 2);
        assert_eq!(c.get("a").unwrap().as_str(), Some("replaced"));
        // Replacement keeps the original position.
        let names: Vec<&str> = c.iter().map(Value::name).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn test_insertion_order() {
        let mut c = Container::new();
        for name in ["z", "a", "m"] {
            c.add(Value::null(name));
        }
        let names: Vec<&str> = c.iter().map(Value::name).collect();
        assert_eq!(names, ["z", "a", "m"]);
    }

    #[test]
    fn test_get_typed() {
        let mut c = Container::new();
        c.add(Value::bool("flag", true));

        assert!(c.get_typed("flag", TypeTag::Bool).is_ok());
        let err = c.get_typed("flag", TypeTag::Int).unwrap_err();
        assert!(matches!(
            err,
            LookupError::TypeMismatch {
                expected: TypeTag::Int,
                found: TypeTag::Bool,
                ..
            }
        ));
        assert!(c.get_typed("missing", TypeTag::Bool).is_err());
    }

    #[test]
    fn test_remove_reindexes() {
        let mut c = Container::new();
        c.add(Value::null("a"));
        c.add(Value::null("b"));
        c.add(Value::null("c"));

        let removed = c.remove("a").unwrap();
        assert_eq!(removed.name(), "a");
        assert_eq!(c.len(), 2);
        assert_eq!(c.get("b").unwrap().name(), "b");
        assert_eq!(c.get("c").unwrap().name(), "c");
        assert!(c.remove("a").is_none());
    }

    #[test]
    fn test_clear() {
        let mut c = Container::new();
        c.add(Value::null("a"));
        c.clear();
        assert!(c.is_empty());
        assert!(!c.has("a"));
    }

    #[test]
    fn test_clone_independence() {
        let mut inner = Container::new();
        inner.add(Value::int("n", 1).unwrap());
        let mut c = Container::new();
        c.add(Value::container("inner", inner));

        let mut cloned = c.clone();
        assert_eq!(c, cloned);

        cloned
            .try_get_mut("inner")
            .and_then(Value::as_container_mut)
            .unwrap()
            .add(Value::int("extra", 2).unwrap());

        // Mutating the clone's membership never affects the source.
        let source_inner = c.get("inner").unwrap().as_container().unwrap();
        assert_eq!(source_inner.len(), 1);
        let clone_inner = cloned.get("inner").unwrap().as_container().unwrap();
        assert_eq!(clone_inner.len(), 2);
    }

    #[test]
    fn test_array_heterogeneous() {
        let mut a = Array::new();
        a.push(Value::int("", 1).unwrap());
        a.push(Value::string("", "two"));
        a.push(Value::bool("", true));

        assert_eq!(a.len(), 3);
        assert_eq!(a[0].type_tag(), TypeTag::Int);
        assert_eq!(a[1].type_tag(), TypeTag::String);
        assert_eq!(a.get(2).unwrap().as_bool(), Some(true));
        assert!(a.get(3).is_none());
    }
}

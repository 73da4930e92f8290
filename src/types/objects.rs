use ahash::AHashMap;

use crate::error::{Error, Result};

/// Named objects in insertion order.
///
/// Insertion order is observable: the build pipeline visits objects in this
/// order, which fixes the numbering of the resulting arcs.
#[derive(Clone, Debug, PartialEq)]
pub struct Objects<G> {
    entries: Vec<(String, G)>,
    index: AHashMap<String, usize>,
}

impl<G> Default for Objects<G> {
    fn default() -> Self {
        Self { entries: Vec::new(), index: AHashMap::new() }
    }
}

impl<G> Objects<G> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `object` under `name`. A name that is already present is
    /// rejected and the collection is left unchanged.
    pub fn insert(&mut self, name: impl Into<String>, object: G) -> Result<()> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(Error::DuplicateObjectName(name));
        }
        self.index.insert(name.clone(), self.entries.len());
        self.entries.push((name, object));
        Ok(())
    }

    #[inline] pub fn len(&self) -> usize { self.entries.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    #[inline] pub fn contains(&self, name: &str) -> bool { self.index.contains_key(name) }

    pub fn get(&self, name: &str) -> Option<&G> {
        self.index.get(name).map(|&i| &self.entries[i].1)
    }

    /// Iterator over object names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Iterator over `(name, object)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &G)> + '_ {
        self.entries.iter().map(|(n, g)| (n.as_str(), g))
    }

    /// Apply `f` to every object, keeping names and order.
    pub fn map<H>(self, mut f: impl FnMut(G) -> H) -> Objects<H> {
        Objects {
            entries: self.entries.into_iter().map(|(n, g)| (n, f(g))).collect(),
            index: self.index,
        }
    }

    /// Fallible [`Objects::map`].
    pub fn try_map<H, E>(self, mut f: impl FnMut(G) -> std::result::Result<H, E>) -> std::result::Result<Objects<H>, E> {
        let entries = self.entries.into_iter()
            .map(|(n, g)| f(g).map(|h| (n, h)))
            .collect::<std::result::Result<_, _>>()?;
        Ok(Objects { entries, index: self.index })
    }
}

impl<G> IntoIterator for Objects<G> {
    type Item = (String, G);
    type IntoIter = std::vec::IntoIter<(String, G)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, G> IntoIterator for &'a Objects<G> {
    type Item = (&'a str, &'a G);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a G)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

use crate::core::utils::natural::natural_cmp;
use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// A collection of unique string identifiers (residue names, residue numbers, atom names).
///
/// Implementors only decide how members are stored; ordering for display and output is
/// always computed on demand by [`IdentifierSet::to_ordered`], so two sets holding the same
/// members produce the same sequence whatever their backing structure or insertion order.
pub trait IdentifierSet: Default + Clone + fmt::Debug {
    /// Inserts `id`, returning `true` if it was not already a member.
    fn add(&mut self, id: &str) -> bool;

    /// Removes `id`, returning `true` if it was a member. Removing a non-member is a no-op.
    fn remove(&mut self, id: &str) -> bool;

    fn contains(&self, id: &str) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the members in no particular order.
    fn members(&self) -> Box<dyn Iterator<Item = &str> + '_>;

    /// Returns all members sorted in natural order.
    fn to_ordered(&self) -> Vec<String> {
        let mut ordered: Vec<String> = self.members().map(str::to_owned).collect();
        ordered.sort_by(|a, b| natural_cmp(a, b));
        ordered
    }

    /// Builds a set from any sequence of identifiers, dropping duplicates.
    fn from_members<I, T>(ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut set = Self::default();
        for id in ids {
            set.add(id.as_ref());
        }
        set
    }
}

/// Renders members as `{a, b, c}` in natural order.
pub fn format_members(members: &[String]) -> String {
    format!("{{{}}}", members.join(", "))
}

/// Hash-backed identifier set; the default backing used by the workflows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HashIdentifierSet {
    inner: HashSet<String>,
}

impl IdentifierSet for HashIdentifierSet {
    fn add(&mut self, id: &str) -> bool {
        if self.inner.contains(id) {
            return false;
        }
        self.inner.insert(id.to_owned())
    }

    fn remove(&mut self, id: &str) -> bool {
        self.inner.remove(id)
    }

    fn contains(&self, id: &str) -> bool {
        self.inner.contains(id)
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn members(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.inner.iter().map(String::as_str))
    }
}

/// Tree-backed identifier set. Iteration follows byte order, not natural order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeIdentifierSet {
    inner: BTreeSet<String>,
}

impl IdentifierSet for TreeIdentifierSet {
    fn add(&mut self, id: &str) -> bool {
        if self.inner.contains(id) {
            return false;
        }
        self.inner.insert(id.to_owned())
    }

    fn remove(&mut self, id: &str) -> bool {
        self.inner.remove(id)
    }

    fn contains(&self, id: &str) -> bool {
        self.inner.contains(id)
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn members(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.inner.iter().map(String::as_str))
    }
}

impl fmt::Display for HashIdentifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_members(&self.to_ordered()))
    }
}

impl fmt::Display for TreeIdentifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_members(&self.to_ordered()))
    }
}

impl<T: AsRef<str>> FromIterator<T> for HashIdentifierSet {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_members(iter)
    }
}

impl<T: AsRef<str>> FromIterator<T> for TreeIdentifierSet {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_members(iter)
    }
}

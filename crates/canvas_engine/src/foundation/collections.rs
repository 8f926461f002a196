//! Specialized collection types

use std::collections::{btree_map, BTreeMap, HashMap};

/// Handles whose identity is an address
///
/// Two handles with the same identity refer to the same shared value.
pub trait IdentityKey {
    /// Address of the shared value this handle points at
    fn identity(&self) -> usize;
}

/// Set of shared handles keyed by identity
///
/// Membership is decided by [`IdentityKey::identity`], so two handles to
/// equal but distinct values are distinct members. Iteration follows insertion
/// order, so traversal over the set is deterministic frame to frame.
///
/// Membership checks are hash lookups; insert and remove also update an
/// ordered index keyed by insertion sequence.
#[derive(Debug, Clone)]
pub struct IdentitySet<T> {
    index: HashMap<usize, u64>,
    ordered: BTreeMap<u64, T>,
    next_sequence: u64,
}

impl<T: IdentityKey> IdentitySet<T> {
    /// Create an empty set
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            ordered: BTreeMap::new(),
            next_sequence: 0,
        }
    }

    /// Insert an item, returning `false` if it was already present
    pub fn insert(&mut self, item: T) -> bool {
        let key = item.identity();
        if self.index.contains_key(&key) {
            return false;
        }
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.index.insert(key, sequence);
        self.ordered.insert(sequence, item);
        true
    }

    /// Remove an item, returning `true` if it was present
    pub fn remove(&mut self, item: &T) -> bool {
        match self.index.remove(&item.identity()) {
            Some(sequence) => {
                self.ordered.remove(&sequence);
                true
            }
            None => false,
        }
    }

    /// Check membership
    pub fn contains(&self, item: &T) -> bool {
        self.index.contains_key(&item.identity())
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Whether the set has no members
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Iterate members in insertion order
    pub fn iter(&self) -> btree_map::Values<'_, u64, T> {
        self.ordered.values()
    }
}

impl<T: IdentityKey> Default for IdentitySet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: IdentityKey> IntoIterator for &'a IdentitySet<T> {
    type Item = &'a T;
    type IntoIter = btree_map::Values<'a, u64, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: IdentityKey> FromIterator<T> for IdentitySet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        for item in iter {
            set.insert(item);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[derive(Debug, Clone)]
    struct Handle(Rc<u32>);

    impl IdentityKey for Handle {
        fn identity(&self) -> usize {
            Rc::as_ptr(&self.0) as usize
        }
    }

    #[test]
    fn test_insert_is_idempotent() {
        let a = Handle(Rc::new(1));
        let mut set = IdentitySet::new();
        assert!(set.insert(a.clone()));
        assert!(!set.insert(a.clone()));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_equal_values_with_different_identity_are_distinct() {
        let a = Handle(Rc::new(7));
        let b = Handle(Rc::new(7));
        let set: IdentitySet<_> = [a.clone(), b.clone()].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&a) && set.contains(&b));
    }

    #[test]
    fn test_remove_preserves_order() {
        let handles: Vec<_> = (0..4).map(|i| Handle(Rc::new(i))).collect();
        let mut set: IdentitySet<_> = handles.iter().cloned().collect();

        assert!(set.remove(&handles[1]));
        assert!(!set.remove(&handles[1]));

        let order: Vec<u32> = set.iter().map(|h| *h.0).collect();
        assert_eq!(order, vec![0, 2, 3]);
    }

    #[test]
    fn test_reinserted_item_moves_to_the_end() {
        let handles: Vec<_> = (0..3).map(|i| Handle(Rc::new(i))).collect();
        let mut set: IdentitySet<_> = handles.iter().cloned().collect();

        set.remove(&handles[0]);
        set.insert(handles[0].clone());

        let order: Vec<u32> = set.iter().map(|h| *h.0).collect();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn test_large_set_membership() {
        let handles: Vec<_> = (0..10_000).map(|i| Handle(Rc::new(i))).collect();
        let mut set: IdentitySet<_> = handles.iter().cloned().collect();
        assert_eq!(set.len(), 10_000);

        for handle in handles.iter().step_by(2) {
            assert!(set.remove(handle));
        }

        assert_eq!(set.len(), 5_000);
        assert!(!set.contains(&handles[0]));
        assert!(set.contains(&handles[9_999]));
        assert_eq!(set.iter().next().map(|h| *h.0), Some(1));
    }
}

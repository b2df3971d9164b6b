use std::collections::HashSet;
use std::sync::Arc;

/// Deduplicates the normalized path strings stored in fingerprints.
pub trait StringInterner {
    fn intern(&mut self, value: &str) -> Arc<str>;
}

/// Interner that shares nothing; every call allocates a fresh string.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopInterner;

impl StringInterner for NoopInterner {
    fn intern(&mut self, value: &str) -> Arc<str> {
        Arc::from(value)
    }
}

/// Interner that hands out the same allocation for equal strings.
#[derive(Debug, Default)]
pub struct HashSetInterner {
    values: HashSet<Arc<str>>,
}

impl HashSetInterner {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl StringInterner for HashSetInterner {
    fn intern(&mut self, value: &str) -> Arc<str> {
        if let Some(existing) = self.values.get(value) {
            return Arc::clone(existing);
        }
        let interned: Arc<str> = Arc::from(value);
        self.values.insert(Arc::clone(&interned));
        interned
    }
}

impl<I: StringInterner + ?Sized> StringInterner for &mut I {
    fn intern(&mut self, value: &str) -> Arc<str> {
        (**self).intern(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_interner_does_not_share() {
        let mut interner = NoopInterner;
        let first = interner.intern("classes/A.class");
        let second = interner.intern("classes/A.class");
        assert_eq!(first, second);
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn hash_set_interner_shares_equal_strings() {
        let mut interner = HashSetInterner::default();
        let first = interner.intern("classes/A.class");
        let second = interner.intern("classes/A.class");
        let other = interner.intern("classes/B.class");
        assert!(Arc::ptr_eq(&first, &second));
        assert!(!Arc::ptr_eq(&first, &other));
        assert_eq!(interner.len(), 2);
    }
}

//! String interner for identifier storage.
//!
//! Provides O(1) interning and lookup. Interned strings live for the life
//! of the interner; the compiler interns every identifier it lowers and the
//! evaluator only ever sees `Name` values.

// Arc is needed here for SharedInterner - the interner is shared between
// the lowering compiler and any number of evaluator runs.
use super::Name;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::ops::Deref;
use std::sync::Arc;

struct InternTable {
    /// Map from string content to index.
    map: FxHashMap<&'static str, u32>,
    /// Storage for string contents, indexed by `Name::raw()`.
    strings: Vec<&'static str>,
}

impl InternTable {
    fn new() -> Self {
        let mut table = Self {
            map: FxHashMap::default(),
            strings: Vec::with_capacity(64),
        };
        // Pre-intern "" and "_" so Name::EMPTY / Name::UNDERSCORE hold.
        for s in ["", "_"] {
            let idx = u32::try_from(table.strings.len()).unwrap_or(u32::MAX);
            table.map.insert(s, idx);
            table.strings.push(s);
        }
        table
    }
}

/// String interner mapping identifier text to compact [`Name`] ids.
///
/// # Thread Safety
/// Uses an `RwLock` for concurrent read/write access. Wrap in
/// [`SharedInterner`] to share between the compiler and evaluators.
pub struct StringInterner {
    table: RwLock<InternTable>,
}

impl StringInterner {
    /// Create a new interner with `""` and `"_"` pre-interned.
    pub fn new() -> Self {
        Self {
            table: RwLock::new(InternTable::new()),
        }
    }

    /// Intern a string, returning its `Name`.
    ///
    /// Interning the same content twice returns the same `Name`.
    pub fn intern(&self, s: &str) -> Name {
        {
            let table = self.table.read();
            if let Some(&idx) = table.map.get(s) {
                return Name::from_raw(idx);
            }
        }
        let mut table = self.table.write();
        // Re-check: another writer may have interned between the locks.
        if let Some(&idx) = table.map.get(s) {
            return Name::from_raw(idx);
        }
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        let idx = u32::try_from(table.strings.len()).unwrap_or(u32::MAX);
        table.map.insert(leaked, idx);
        table.strings.push(leaked);
        Name::from_raw(idx)
    }

    /// Look up the string content for a `Name`.
    ///
    /// Returns `""` for a `Name` that did not come from this interner.
    pub fn lookup(&self, name: Name) -> &'static str {
        let table = self.table.read();
        table
            .strings
            .get(name.raw() as usize)
            .copied()
            .unwrap_or("")
    }

    /// Number of interned strings.
    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    /// Whether the interner holds only the pre-interned entries.
    pub fn is_empty(&self) -> bool {
        // "" and "_" are always present.
        self.len() <= 2
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared, reference-counted [`StringInterner`].
#[derive(Clone, Default)]
pub struct SharedInterner(Arc<StringInterner>);

impl SharedInterner {
    /// Create a fresh shared interner.
    pub fn new() -> Self {
        SharedInterner(Arc::new(StringInterner::new()))
    }
}

impl Deref for SharedInterner {
    type Target = StringInterner;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_round_trip() {
        let interner = StringInterner::new();
        let x = interner.intern("x");
        assert_eq!(interner.lookup(x), "x");
    }

    #[test]
    fn intern_is_idempotent() {
        let interner = StringInterner::new();
        let a = interner.intern("fib");
        let b = interner.intern("fib");
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_strings_get_distinct_names() {
        let interner = StringInterner::new();
        assert_ne!(interner.intern("a"), interner.intern("b"));
    }

    #[test]
    fn pre_interned_constants() {
        let interner = StringInterner::new();
        assert_eq!(interner.intern(""), Name::EMPTY);
        assert_eq!(interner.intern("_"), Name::UNDERSCORE);
        assert_eq!(interner.lookup(Name::UNDERSCORE), "_");
    }

    #[test]
    fn shared_interner_shares_storage() {
        let shared = SharedInterner::new();
        let clone = shared.clone();
        let a = shared.intern("main");
        assert_eq!(clone.lookup(a), "main");
    }
}

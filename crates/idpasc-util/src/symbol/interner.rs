//! String interner implementation using DashMap for concurrent access.
//!
//! Lock-free concurrent access via DashMap, fast hashing with AHasher, and a
//! fixed reserved range so keyword symbols have stable indices that never
//! collide with user identifiers.
//!
//! # Performance
//!
//! - **Interning (hit)**: O(1) hash lookup.
//! - **Interning (miss)**: O(1) hash insert + allocation.
//! - **Symbol comparison**: O(1) index comparison.
//! - **String retrieval**: O(n) linear search by index (rare).

use ahash::AHasher;
use dashmap::DashMap;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::LazyLock;

use super::{InternerStats, Symbol};

/// Global string table instance, initialized on first use.
///
/// All reserved words are pre-interned during initialization so they have
/// stable, predictable indices matching the symbol table's reserved prefix
/// (see [`crate::symbol::RESERVED_SYMBOLS_END`]).
pub static STRING_TABLE: LazyLock<StringTable> = LazyLock::new(|| {
    let table = StringTable::new();
    table.initialize_known_symbols();
    table
});

/// Thread-safe string table using DashMap.
///
/// Strings are allocated on the heap and leaked to obtain `'static`
/// references. This is acceptable because the table lives for the entire
/// compilation and interned strings are never removed.
pub struct StringTable {
    /// Maps string hash to (string, symbol index) for fast lookup.
    map: DashMap<u64, (&'static str, u32)>,
    /// Counter for the next index, starting after the reserved range.
    next_index: AtomicU32,
    collisions: AtomicUsize,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

/// Number of symbol slots reserved for known reserved words.
///
/// Mirrors the symbol table's own reserved-prefix invariant (29 entries);
/// some headroom is left for future built-ins without perturbing existing
/// indices.
const RESERVED_SYMBOLS_END: u32 = 64;

impl StringTable {
    #[inline]
    fn new() -> Self {
        Self {
            map: DashMap::with_capacity(256),
            next_index: AtomicU32::new(RESERVED_SYMBOLS_END),
            collisions: AtomicUsize::new(0),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    /// Pre-intern every reserved word at its canonical index.
    ///
    /// The order here must match the `pub const KW_*` / `TY_*` declarations
    /// in `symbol::mod`.
    fn initialize_known_symbols(&self) {
        let known_symbols = [
            "integer", "real", "boolean", "char", "string",
            "program", "variabel", "mulai", "selesai", "jika", "maka", "selainitu",
            "selama", "lakukan", "untuk", "ke", "turunke", "larik", "dari",
            "prosedur", "fungsi", "konstanta", "tipe", "kasus", "rekaman",
            "ulangi", "sampai",
            "writeln", "readln", "write", "read",
            "dan", "atau", "tidak", "bagi", "mod",
            "benar", "salah",
        ];

        for (idx, symbol) in known_symbols.iter().enumerate() {
            let actual_idx = idx as u32;
            if actual_idx < RESERVED_SYMBOLS_END {
                let interned: &'static str = Box::leak(symbol.to_string().into_boxed_str());
                let hash = Self::hash_string(symbol);
                self.map.insert(hash, (interned, actual_idx));
            }
        }
    }

    /// Intern a string, returning its symbol. Idempotent: interning the same
    /// string twice returns the same symbol.
    pub fn intern(&self, string: &str) -> Symbol {
        let hash = Self::hash_string(string);

        if let Some(entry) = self.map.get(&hash) {
            if entry.value().0 == string {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Symbol { index: entry.value().1 };
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);

        match self.map.entry(hash) {
            dashmap::mapref::entry::Entry::Occupied(entry) => {
                if entry.get().0 == string {
                    return Symbol { index: entry.get().1 };
                }
                self.handle_collision(string, hash)
            }
            dashmap::mapref::entry::Entry::Vacant(entry) => {
                let interned: &'static str = Box::leak(string.to_string().into_boxed_str());
                let idx = self.next_index.fetch_add(1, Ordering::Relaxed);
                entry.insert((interned, idx));
                Symbol { index: idx }
            }
        }
    }

    /// Linear probing with a golden-ratio offset on hash collision.
    fn handle_collision(&self, string: &str, original_hash: u64) -> Symbol {
        const MAX_PROBES: u64 = 32;
        const PROBE_PRIME: u64 = 0x9e3779b97f4a7c15;

        for i in 1u64..=MAX_PROBES {
            let probe_hash = original_hash.wrapping_add(i.wrapping_mul(PROBE_PRIME));

            if let Some(entry) = self.map.get(&probe_hash) {
                if entry.value().0 == string {
                    return Symbol { index: entry.value().1 };
                }
            } else {
                self.collisions.fetch_add(1, Ordering::Relaxed);
                let interned: &'static str = Box::leak(string.to_string().into_boxed_str());
                let idx = self.next_index.fetch_add(1, Ordering::Relaxed);
                self.map.insert(probe_hash, (interned, idx));
                return Symbol { index: idx };
            }
        }

        self.collisions.fetch_add(1, Ordering::Relaxed);
        let interned: &'static str = Box::leak(string.to_string().into_boxed_str());
        let idx = self.next_index.fetch_add(1, Ordering::Relaxed);
        self.map.insert(original_hash, (interned, idx));
        Symbol { index: idx }
    }

    /// Resolve a symbol back to its string. O(n) linear scan; avoid in hot
    /// paths, prefer carrying the `&str` alongside the `Symbol` when possible.
    pub fn get(&self, symbol: Symbol) -> Option<&'static str> {
        self.map
            .iter()
            .find(|entry| entry.value().1 == symbol.index)
            .map(|entry| entry.value().0)
    }

    #[inline]
    fn hash_string(string: &str) -> u64 {
        let mut hasher = AHasher::default();
        string.hash(&mut hasher);
        hasher.finish()
    }

    pub fn stats(&self) -> InternerStats {
        InternerStats {
            count: self.map.len(),
            capacity: self.map.capacity(),
            collisions: self.collisions.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interns_idempotently() {
        let table = StringTable::new();
        let a = table.intern("hello");
        let b = table.intern("hello");
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_strings_get_distinct_symbols() {
        let table = StringTable::new();
        let a = table.intern("x");
        let b = table.intern("y");
        assert_ne!(a, b);
    }

    #[test]
    fn reserved_words_take_stable_indices() {
        let table = StringTable::new();
        table.initialize_known_symbols();
        assert_eq!(table.intern("integer").index, 0);
        assert_eq!(table.intern("program").index, 5);
        assert_eq!(table.intern("read").index, 30);
    }

    #[test]
    fn round_trips_through_get() {
        let table = StringTable::new();
        let sym = table.intern("variabel_x");
        assert_eq!(table.get(sym), Some("variabel_x"));
    }
}

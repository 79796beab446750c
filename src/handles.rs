//! Opaque handle values.
//!
//! The reference interpreter represents arrays, open channels, and
//! sub-interpreters as raw heap pointers formatted with `%p` and stored
//! in an ordinary scalar variable (`picolIsPtr` recognizes them by shape:
//! `0x` followed by at least eight hex digits). Raw pointers have no
//! place in safe Rust, so handles here are indices into a slab owned by
//! the [`Interp`](crate::interp::Interp) they were created in, rendered
//! in the same `0x...` textual shape so scripts that pattern-match on
//! "looks like a pointer" keep working.

const HANDLE_BASE: usize = 0x5500_0000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(usize);

impl Handle {
    pub fn to_value(self) -> String {
        format!("0x{:016x}", HANDLE_BASE + self.0)
    }

    /// Recognizes and decodes the textual form produced by [`to_value`](Handle::to_value).
    pub fn parse(s: &str) -> Option<Handle> {
        let digits = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X"))?;
        if digits.len() < 8 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let n = usize::from_str_radix(digits, 16).ok()?;
        n.checked_sub(HANDLE_BASE).map(Handle)
    }
}

/// Returns true if `s` has the lexical shape of a handle, independent of
/// whether it resolves to a live object. Mirrors `picolIsPtr`'s loose
/// "looks like a pointer" check.
pub fn looks_like_handle(s: &str) -> bool {
    let digits = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(d) => d,
        None => return false,
    };
    digits.len() >= 8 && digits.bytes().all(|b| b.is_ascii_hexdigit())
}

/// A slab of slots addressed by stable [`Handle`]s, with removed slots
/// recycled via a free list so a long-running script doesn't leak slots
/// across many create/delete cycles.
#[derive(Debug, Default)]
pub struct HandleTable<T> {
    slots: Vec<Option<T>>,
    free: Vec<usize>,
}

impl<T> HandleTable<T> {
    pub fn new() -> Self {
        HandleTable {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub fn insert(&mut self, value: T) -> Handle {
        if let Some(idx) = self.free.pop() {
            self.slots[idx] = Some(value);
            Handle(idx)
        } else {
            self.slots.push(Some(value));
            Handle(self.slots.len() - 1)
        }
    }

    pub fn get(&self, h: Handle) -> Option<&T> {
        self.slots.get(h.0).and_then(|s| s.as_ref())
    }

    pub fn get_mut(&mut self, h: Handle) -> Option<&mut T> {
        self.slots.get_mut(h.0).and_then(|s| s.as_mut())
    }

    pub fn remove(&mut self, h: Handle) -> Option<T> {
        let slot = self.slots.get_mut(h.0)?;
        let value = slot.take();
        if value.is_some() {
            self.free.push(h.0);
        }
        value
    }

    pub fn contains(&self, h: Handle) -> bool {
        matches!(self.slots.get(h.0), Some(Some(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_round_trips_through_text() {
        let mut t: HandleTable<i32> = HandleTable::new();
        let h = t.insert(42);
        let text = h.to_value();
        assert!(looks_like_handle(&text));
        let parsed = Handle::parse(&text).unwrap();
        assert_eq!(*t.get(parsed).unwrap(), 42);
    }

    #[test]
    fn removed_slots_are_recycled() {
        let mut t: HandleTable<i32> = HandleTable::new();
        let h1 = t.insert(1);
        t.remove(h1);
        let h2 = t.insert(2);
        assert!(!t.contains(h1));
        assert_eq!(*t.get(h2).unwrap(), 2);
    }
}

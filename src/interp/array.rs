//! Associative arrays (spec §4.3): a fixed-bucket, open-chained hash
//! table addressed indirectly through a scalar variable holding a
//! [`Handle`](crate::handles::Handle). Mirrors `picolArray`'s
//! `DEFAULT_ARRSIZE`-bucket table and shift-xor hash, with `Vec`-backed
//! chains standing in for the original's intrusive linked lists per the
//! ordered-collections preference in spec §9.

use crate::glob;
use crate::limits::ARRAY_BUCKETS;

#[derive(Debug, Clone, Default)]
pub struct Array {
    buckets: Vec<Vec<(String, String)>>,
    count: usize,
}

impl Array {
    pub fn new() -> Self {
        Array {
            buckets: vec![Vec::new(); ARRAY_BUCKETS],
            count: 0,
        }
    }

    fn bucket_index(key: &str) -> usize {
        let mut hash: i64 = 0;
        for b in key.bytes() {
            hash = (hash << 1) ^ (b as i64);
        }
        hash.rem_euclid(ARRAY_BUCKETS as i64) as usize
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        let idx = Self::bucket_index(key);
        self.buckets[idx]
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let idx = Self::bucket_index(key);
        let bucket = &mut self.buckets[idx];
        if let Some(entry) = bucket.iter_mut().find(|(k, _)| k == key) {
            entry.1 = value.into();
        } else {
            bucket.push((key.to_string(), value.into()));
            self.count += 1;
        }
    }

    pub fn unset(&mut self, key: &str) -> bool {
        let idx = Self::bucket_index(key);
        let bucket = &mut self.buckets[idx];
        if let Some(pos) = bucket.iter().position(|(k, _)| k == key) {
            bucket.remove(pos);
            self.count -= 1;
            true
        } else {
            false
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// All entries, in bucket-chain order (not insertion order — matches
    /// the reference implementation's open-chain traversal used by
    /// `array get`/`array names`).
    pub fn entries(&self) -> Vec<(&str, &str)> {
        self.buckets
            .iter()
            .flat_map(|b| b.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .collect()
    }

    pub fn names_matching(&self, pattern: Option<&str>) -> Vec<&str> {
        self.buckets
            .iter()
            .flat_map(|b| b.iter().map(|(k, _)| k.as_str()))
            .filter(|k| pattern.map_or(true, |p| glob::matches(p, k)))
            .collect()
    }

    /// The `array statistics` report: bucket count and a chain-length
    /// histogram, mirroring `picolArrStat`.
    pub fn statistics(&self) -> String {
        let mut used_buckets = 0;
        let mut histogram = vec![0usize; ARRAY_BUCKETS.max(11)];
        for bucket in &self.buckets {
            if !bucket.is_empty() {
                used_buckets += 1;
            }
            let depth = bucket.len().min(histogram.len() - 1);
            histogram[depth] += 1;
        }
        let mut out = format!(
            "{} entries in table, {} buckets",
            self.count, used_buckets
        );
        for (depth, n) in histogram.iter().enumerate() {
            out.push_str(&format!("\nnumber of chains of length {}: {}", depth, n));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_round_trips() {
        let mut a = Array::new();
        a.set("k", "v");
        assert_eq!(a.get("k"), Some("v"));
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn overwriting_a_key_does_not_grow_count() {
        let mut a = Array::new();
        a.set("k", "v1");
        a.set("k", "v2");
        assert_eq!(a.len(), 1);
        assert_eq!(a.get("k"), Some("v2"));
    }

    #[test]
    fn unset_removes_entry() {
        let mut a = Array::new();
        a.set("k", "v");
        assert!(a.unset("k"));
        assert!(!a.contains("k"));
        assert_eq!(a.len(), 0);
    }
}

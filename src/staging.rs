/*!
Staging arena for bulk dictionary loads

While a large dictionary is being built, every delete hash of every new word
would otherwise cost a probe into the permanent delete index. A
[`SuggestionStage`] defers that: each hash maps to an [`Entry`] holding the
handle of the newest node of a singly linked chain, and the nodes themselves
live in a chunked pool addressed by integer handles, so staging a term is an
amortized O(1) push without a heap allocation per node.

`SymSpell::commit_staged` merges the stage into the delete index in one pass.
*/

use std::sync::Arc;

use ahash::AHashMap;

/// Nodes per pool chunk.
const CHUNK_SIZE: usize = 4096;

/// Append-only pool that grows in fixed-size chunks; existing elements never move.
#[derive(Debug)]
pub(crate) struct ChunkArray<T> {
    chunks: Vec<Vec<T>>,
    count: usize,
}

impl<T> ChunkArray<T> {
    pub(crate) fn with_capacity(initial_capacity: usize) -> Self {
        let chunk_count = initial_capacity.div_ceil(CHUNK_SIZE);
        let chunks = (0..chunk_count)
            .map(|_| Vec::with_capacity(CHUNK_SIZE))
            .collect();
        Self { chunks, count: 0 }
    }

    /// Append `value` and return its handle.
    pub(crate) fn push(&mut self, value: T) -> usize {
        let handle = self.count;
        let chunk = handle / CHUNK_SIZE;
        if chunk == self.chunks.len() {
            self.chunks.push(Vec::with_capacity(CHUNK_SIZE));
        }
        self.chunks[chunk].push(value);
        self.count += 1;
        handle
    }

    pub(crate) fn get(&self, handle: usize) -> Option<&T> {
        self.chunks
            .get(handle / CHUNK_SIZE)
            .and_then(|chunk| chunk.get(handle % CHUNK_SIZE))
    }

    pub(crate) fn len(&self) -> usize {
        self.count
    }

    /// Drop every element and release the chunks.
    pub(crate) fn clear(&mut self) {
        self.chunks = Vec::new();
        self.count = 0;
    }
}

#[derive(Debug)]
struct Node {
    term: Arc<str>,
    next: Option<usize>,
}

/// Per-hash bookkeeping: chain length and the newest node of the chain.
#[derive(Debug, Clone, Copy)]
struct Entry {
    count: usize,
    first: Option<usize>,
}

/// Write-optimized intermediate delete index used while bulk loading.
#[derive(Debug)]
pub struct SuggestionStage {
    deletes: AHashMap<u64, Entry>,
    nodes: ChunkArray<Node>,
}

impl SuggestionStage {
    /// Create a stage sized for roughly `initial_capacity` distinct delete hashes.
    pub fn new(initial_capacity: usize) -> Self {
        Self {
            deletes: AHashMap::with_capacity(initial_capacity),
            nodes: ChunkArray::with_capacity(initial_capacity.saturating_mul(2)),
        }
    }

    /// Number of distinct delete hashes staged.
    pub fn delete_count(&self) -> usize {
        self.deletes.len()
    }

    /// Number of staged `(hash, term)` pairs.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deletes.is_empty()
    }

    pub fn clear(&mut self) {
        self.deletes.clear();
        self.nodes.clear();
    }

    pub(crate) fn add(&mut self, delete_hash: u64, term: Arc<str>) {
        let entry = self.deletes.entry(delete_hash).or_insert(Entry {
            count: 0,
            first: None,
        });
        let handle = self.nodes.push(Node {
            term,
            next: entry.first,
        });
        entry.first = Some(handle);
        entry.count += 1;
    }

    /// Append every staged term to `deletes[hash]` and empty the stage.
    ///
    /// Chains are linked newest first; each one is reversed on the way out so a
    /// bucket ends up in the same order direct insertion would have produced.
    /// Duplicates are kept.
    pub(crate) fn commit_to(&mut self, deletes: &mut AHashMap<u64, Vec<Arc<str>>>) {
        for (hash, entry) in self.deletes.drain() {
            let bucket = deletes.entry(hash).or_default();
            bucket.reserve(entry.count);
            let start = bucket.len();

            let mut next = entry.first;
            while let Some(handle) = next {
                let Some(node) = self.nodes.get(handle) else {
                    break;
                };
                bucket.push(Arc::clone(&node.term));
                next = node.next;
            }
            bucket[start..].reverse();
        }
        self.nodes.clear();
    }
}

impl Default for SuggestionStage {
    fn default() -> Self {
        Self::new(16384)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(s: &str) -> Arc<str> {
        Arc::from(s)
    }

    #[test]
    fn test_chunk_array_crosses_chunks() {
        let mut pool = ChunkArray::with_capacity(10);
        for i in 0..(CHUNK_SIZE * 2 + 3) {
            assert_eq!(pool.push(i), i);
        }
        assert_eq!(pool.len(), CHUNK_SIZE * 2 + 3);
        assert_eq!(pool.get(0), Some(&0));
        assert_eq!(pool.get(CHUNK_SIZE), Some(&CHUNK_SIZE));
        assert_eq!(pool.get(CHUNK_SIZE * 2 + 2), Some(&(CHUNK_SIZE * 2 + 2)));
        assert_eq!(pool.get(CHUNK_SIZE * 2 + 3), None);

        pool.clear();
        assert_eq!(pool.len(), 0);
        assert_eq!(pool.get(0), None);
        assert_eq!(pool.push(7), 0);
    }

    #[test]
    fn test_commit_keeps_insertion_order_and_duplicates() {
        let mut stage = SuggestionStage::new(4);
        stage.add(1, term("alpha"));
        stage.add(2, term("beta"));
        stage.add(1, term("gamma"));
        stage.add(1, term("alpha"));
        assert_eq!(stage.delete_count(), 2);
        assert_eq!(stage.node_count(), 4);

        let mut deletes: AHashMap<u64, Vec<Arc<str>>> = AHashMap::new();
        deletes.insert(1, vec![term("existing")]);
        stage.commit_to(&mut deletes);

        let bucket: Vec<&str> = deletes[&1].iter().map(|t| &**t).collect();
        assert_eq!(bucket, vec!["existing", "alpha", "gamma", "alpha"]);
        let bucket: Vec<&str> = deletes[&2].iter().map(|t| &**t).collect();
        assert_eq!(bucket, vec!["beta"]);

        assert!(stage.is_empty());
        assert_eq!(stage.node_count(), 0);
    }

    #[test]
    fn test_empty_commit_is_noop() {
        let mut stage = SuggestionStage::default();
        let mut deletes: AHashMap<u64, Vec<Arc<str>>> = AHashMap::new();
        deletes.insert(9, vec![term("kept")]);
        stage.commit_to(&mut deletes);
        assert_eq!(deletes.len(), 1);
        assert_eq!(deletes[&9].len(), 1);
    }
}

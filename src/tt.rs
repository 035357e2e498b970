//! Transposition table.
//!
//! Maps position fingerprints to `{best move, depth, score, node type, age}`.
//! Probes may return a Type-1 collision (matching fingerprint from a
//! different position); callers validate the stored move by playing it.

use crate::board::{Move, NULL_MOVE};

/// Bound classification of a stored score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeType {
    /// Exact score from a principal variation
    Pv,
    /// Lower bound from a fail-high
    Cut,
    /// Upper bound from a fail-low; carries no best move
    All,
}

#[derive(Clone, Copy, Debug)]
pub struct TtEntry {
    pub hash: u64,
    pub mv: Move,
    pub depth: i32,
    pub score: i32,
    pub node_type: NodeType,
    pub age: u8,
}

const BUCKET_SIZE: usize = 4;

/// Fixed-size transposition table, allocated once for the process lifetime.
pub struct TranspositionTable {
    buckets: Vec<[Option<TtEntry>; BUCKET_SIZE]>,
    mask: usize,
    occupied: usize,
}

impl TranspositionTable {
    /// Create a table of roughly `size_mb` megabytes (rounded to a power of
    /// two bucket count).
    #[must_use]
    pub fn new(size_mb: usize) -> Self {
        let bucket_bytes = std::mem::size_of::<[Option<TtEntry>; BUCKET_SIZE]>();
        let mut num_buckets = (size_mb * 1024 * 1024) / bucket_bytes;
        num_buckets = num_buckets.next_power_of_two() / 2;
        if num_buckets == 0 {
            num_buckets = 1024;
        }
        TranspositionTable {
            buckets: vec![[None; BUCKET_SIZE]; num_buckets],
            mask: num_buckets - 1,
            occupied: 0,
        }
    }

    #[inline]
    fn index(&self, hash: u64) -> usize {
        (hash as usize) & self.mask
    }

    /// Look up an entry whose fingerprint matches.
    #[must_use]
    pub fn probe(&self, hash: u64) -> Option<TtEntry> {
        let bucket = &self.buckets[self.index(hash)];
        bucket
            .iter()
            .flatten()
            .find(|entry| entry.hash == hash)
            .copied()
    }

    /// Insert or replace an entry.
    ///
    /// Replacement prefers keeping deeper and newer entries: the victim is
    /// the slot minimizing `2*depth - age_delta`.
    pub fn store(
        &mut self,
        hash: u64,
        depth: i32,
        mv: Move,
        score: i32,
        node_type: NodeType,
        age: u8,
    ) {
        // ALL entries carry no best move; PV and CUT entries must carry one
        assert!((node_type == NodeType::All) == mv.is_null());

        let entry = TtEntry {
            hash,
            mv,
            depth,
            score,
            node_type,
            age,
        };
        let idx = self.index(hash);
        let bucket = &mut self.buckets[idx];

        for slot in bucket.iter_mut() {
            if let Some(existing) = slot {
                if existing.hash == hash {
                    *slot = Some(entry);
                    return;
                }
            }
        }
        for slot in bucket.iter_mut() {
            if slot.is_none() {
                *slot = Some(entry);
                self.occupied += 1;
                return;
            }
        }

        let mut victim = 0;
        let mut worst_priority = i32::MAX;
        for (idx, slot) in bucket.iter().enumerate() {
            if let Some(existing) = slot {
                let age_delta = age.wrapping_sub(existing.age) as i32;
                let priority = existing.depth * 2 - age_delta;
                if priority < worst_priority {
                    victim = idx;
                    worst_priority = priority;
                }
            }
        }
        bucket[victim] = Some(entry);
    }

    /// Empty the table without releasing its memory.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            *bucket = [None; BUCKET_SIZE];
        }
        self.occupied = 0;
    }

    /// Number of filled slots, for the statistics report.
    #[must_use]
    pub fn occupancy(&self) -> usize {
        self.occupied
    }

    /// Total slot capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len() * BUCKET_SIZE
    }
}

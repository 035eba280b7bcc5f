/// bifurcation.rs — Bifurcation enumerator and the external bifurcation index
///
/// `enumerate_bifurcations` walks the positive and negative strands of a
/// sequence with a sliding k-mer window, tracking for each distinct k-mer
/// class whether it has been seen with more than one successor or
/// predecessor character. Seed/interior-scan/emission structure, update
/// semantics, and the `MOD` progress cadence are grounded directly on the
/// original `EnumerateBifurcations` (`graphalgorithm.cpp`).
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use crate::hashing::{calc_kmer_hash, kmer_content_eq, SlidingWindow};
use crate::sequence::{Sequence, StrandIterator};

/// Reserved sentinel distinct from all valid ids.
pub const NO_BIFURCATION: u64 = u64::MAX;
const NO_ID: u64 = u64::MAX;

const MOD: u64 = 1_000_000;

/// `(id, seen_forward_char, seen_backward_char)`. `id` is monotone: once
/// assigned it never reverts.
struct BifurcationData {
    id: u64,
    forward: Option<u8>,
    backward: Option<u8>,
}

impl BifurcationData {
    fn unassigned() -> Self {
        BifurcationData {
            id: NO_ID,
            forward: None,
            backward: None,
        }
    }

    fn seeded(id: u64) -> Self {
        BifurcationData {
            id,
            forward: None,
            backward: None,
        }
    }

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    /// Reports whether this observation proves a second, distinct
    /// extension. A single window can trigger at most one transition per
    /// side; the caller ORs this with the symmetric `update_backward` call.
    fn update_forward(&mut self, now: u8) -> bool {
        if self.id != NO_ID {
            return false;
        }
        match self.forward {
            None => {
                self.forward = Some(now);
                false
            }
            Some(f) if f == now => false,
            Some(_) => true,
        }
    }

    fn update_backward(&mut self, now: u8) -> bool {
        if self.id != NO_ID {
            return false;
        }
        match self.backward {
            None => {
                self.backward = Some(now);
                false
            }
            Some(b) if b == now => false,
            Some(_) => true,
        }
    }
}

/// Hash-map key for a k-mer during a single scan: `Hash` comes from the
/// already-computed rolling-hash value, `Eq` falls back to an O(k) content
/// comparison only on collision. Borrows the sequence for the scan's
/// duration only — `enumerate_bifurcations` never mutates it, so this never
/// conflicts with anything.
struct KmerKey<'a> {
    seq: &'a Sequence,
    it: StrandIterator,
    k: usize,
    hash: u64,
}

impl<'a> KmerKey<'a> {
    fn new(seq: &'a Sequence, it: StrandIterator, k: usize) -> Self {
        let hash = calc_kmer_hash(seq, it, k);
        KmerKey { seq, it, k, hash }
    }

    fn from_window(seq: &'a Sequence, window: &SlidingWindow) -> Self {
        KmerKey {
            seq,
            it: window.begin(),
            k: window.k(),
            hash: window.value(),
        }
    }
}

impl<'a> PartialEq for KmerKey<'a> {
    fn eq(&self, other: &Self) -> bool {
        kmer_content_eq(self.seq, self.it, other.seq, other.it, self.k)
    }
}
impl<'a> Eq for KmerKey<'a> {}

impl<'a> Hash for KmerKey<'a> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash.hash(state);
    }
}

/// Persistent mapping from k-mer content to id, keyed by materialized bytes
/// so it never borrows a sequence. The owned-key pattern mirrors how this
/// codebase already keys a reverse index by materialized content rather
/// than a live cursor.
#[derive(Default)]
pub struct BifurcationIndex {
    map: HashMap<Vec<u8>, u64>,
}

impl BifurcationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn add_point(&mut self, kmer: Vec<u8>, id: u64) {
        self.map.insert(kmer, id);
    }

    pub fn get_bifurcation(&self, kmer: &[u8]) -> u64 {
        *self.map.get(kmer).unwrap_or(&NO_BIFURCATION)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

fn kmer_bytes(seq: &Sequence, mut it: StrandIterator, k: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(k);
    for _ in 0..k {
        out.push(it.deref(seq));
        it.advance(seq);
    }
    out
}

/// Whether a full `k`-cell window starting at `start` stays inside the valid
/// strand range without ever crossing the past-the-end sentinel.
/// `SlidingWindow::new` eagerly hashes its first window, so this must be
/// checked before construction — on a minimal sequence (`size == k`) the
/// interior scan's trimmed-by-one start can sit too close to the end for a
/// full window to fit, and the hash would index past the buffer.
fn fits_k_window(seq: &Sequence, start: StrandIterator, k: usize) -> bool {
    let mut it = start;
    for i in 0..k {
        if !it.valid(seq) {
            return false;
        }
        if i + 1 < k {
            it.advance(seq);
        }
    }
    true
}

/// Runs the full bifurcation scan over `seq`, clearing and repopulating
/// `index`. Returns the total number of assigned bifurcation ids.
pub fn enumerate_bifurcations(seq: &Sequence, index: &mut BifurcationIndex, k: usize) -> u64 {
    assert!(k >= 2, "k must be >= 2, got {k}");
    assert!(
        seq.size() >= k,
        "sequence of length {} is shorter than k={k}",
        seq.size()
    );

    index.clear();
    eprintln!("Finding all bifurcations in the graph...");

    let mut next_id: u64 = 0;
    let mut map: HashMap<KmerKey, BifurcationData> = HashMap::new();

    let pos_begin = seq.positive_begin();
    let neg_begin = seq.negative_begin();
    let pos_right_end = seq.positive_right_end();
    let neg_right_end = seq.negative_right_end();

    let mut pos_back = pos_right_end;
    for _ in 0..k {
        pos_back.retreat(seq);
    }
    let mut neg_back = neg_right_end;
    for _ in 0..k {
        neg_back.retreat(seq);
    }

    // Seed: four boundary k-mers, first-wins on coincident content (see
    // SPEC_FULL.md's resolution of the "boundary k-mers may coincide" open
    // question) — each still consumes an id from the counter.
    let border = [pos_begin, neg_begin, pos_back, neg_back];
    for &b in border.iter() {
        let id = next_id;
        next_id += 1;
        let key = KmerKey::new(seq, b, k);
        map.entry(key).or_insert_with(|| BifurcationData::seeded(id));
    }

    // Interior scan, positive strand: may create new, empty records.
    {
        let mut scan_begin = pos_begin;
        scan_begin.advance(seq);
        let mut scan_end = pos_right_end;
        scan_end.retreat(seq);

        if fits_k_window(seq, scan_begin, k) {
            let mut window = SlidingWindow::new(seq, scan_begin, scan_end, k);
            let mut count: u64 = 0;
            while window.valid() {
                if count % MOD == 0 {
                    eprintln!("Pos = {count}");
                }

                let begin_it = window.begin();
                let key = KmerKey::from_window(seq, &window);
                match map.get_mut(&key) {
                    None => {
                        map.insert(key, BifurcationData::unassigned());
                    }
                    Some(data) => {
                        let forward_char = window.end(seq).deref(seq);
                        let mut before_it = begin_it;
                        before_it.retreat(seq);
                        let backward_char = before_it.deref(seq);

                        let transitioned = data.update_forward(forward_char)
                            || data.update_backward(backward_char);
                        if transitioned {
                            data.set_id(next_id);
                            next_id += 1;
                        }
                    }
                }

                window.move_window(seq);
                count += 1;
            }
        }
    }

    // Interior scan, negative strand: updates only, never creates — every
    // negative k-mer's reverse complement is some positive k-mer or boundary.
    {
        let mut scan_begin = neg_begin;
        scan_begin.advance(seq);
        let mut scan_end = neg_right_end;
        scan_end.retreat(seq);

        if fits_k_window(seq, scan_begin, k) {
            let mut window = SlidingWindow::new(seq, scan_begin, scan_end, k);
            while window.valid() {
                let begin_it = window.begin();
                let key = KmerKey::from_window(seq, &window);
                if let Some(data) = map.get_mut(&key) {
                    let forward_char = window.end(seq).deref(seq);
                    let mut before_it = begin_it;
                    before_it.retreat(seq);
                    let backward_char = before_it.deref(seq);

                    let transitioned = data.update_forward(forward_char)
                        || data.update_backward(backward_char);
                    if transitioned {
                        data.set_id(next_id);
                        next_id += 1;
                    }
                }

                window.move_window(seq);
            }
        }
    }

    // Emission: re-slide the full range of each strand (boundaries
    // included) and write every assigned id into the external index.
    for (strand_begin, strand_end) in [(pos_begin, pos_right_end), (neg_begin, neg_right_end)] {
        let mut window = SlidingWindow::new(seq, strand_begin, strand_end, k);
        let mut count: u64 = 0;
        while window.valid() {
            if count % MOD == 0 {
                eprintln!("Pos = {count}");
            }

            let key = KmerKey::from_window(seq, &window);
            if let Some(data) = map.get(&key) {
                if data.id() != NO_ID {
                    let kmer = kmer_bytes(seq, window.begin(), k);
                    index.add_point(kmer, data.id());
                }
            }

            window.move_window(seq);
            count += 1;
        }
    }

    next_id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trivial_sequence_has_only_boundary_ids() {
        let seq = Sequence::new(b"ACGT".to_vec());
        let mut index = BifurcationIndex::new();
        let total = enumerate_bifurcations(&seq, &mut index, 3);
        assert_eq!(total, 4);
    }

    #[test]
    fn repeated_unit_has_only_boundary_ids() {
        let seq = Sequence::new(b"ACACAC".to_vec());
        let mut index = BifurcationIndex::new();
        let total = enumerate_bifurcations(&seq, &mut index, 3);
        assert_eq!(total, 4);
        // "ACA" is itself the positive boundary k-mer, so it does carry an
        // id — just one assigned at seeding, not by the interior scan.
        assert_ne!(index.get_bifurcation(b"ACA"), NO_BIFURCATION);
        assert_eq!(index.len(), 4);
    }

    #[test]
    fn repeated_kmer_resolves_to_its_boundary_id() {
        // "ACG" recurs at position 0 (the positive boundary k-mer, seeded
        // with an id) and position 4. Its second occurrence's forward
        // extension ('A' vs the boundary's already-fixed id) never gets a
        // chance to register a transition, since `update_forward`/
        // `update_backward` both early-return once an id is assigned. "GTA"
        // and "TAC" each appear only once per strand pairing, so no id
        // beyond the four boundaries is ever assigned.
        let seq = Sequence::new(b"ACGTACGA".to_vec());
        let mut index = BifurcationIndex::new();
        let total = enumerate_bifurcations(&seq, &mut index, 3);
        assert_eq!(total, 4);
        assert_ne!(index.get_bifurcation(b"ACG"), NO_BIFURCATION);
    }

    #[test]
    fn minimal_sequence_at_k_equal_to_length_does_not_panic() {
        // size == k: the interior scan's start (trimmed by one cell from
        // each end) has no room left for a full k-mer, so it must be
        // skipped rather than hashed.
        let seq = Sequence::new(b"AC".to_vec());
        let mut index = BifurcationIndex::new();
        let total = enumerate_bifurcations(&seq, &mut index, 2);
        assert_eq!(total, 4);
    }

    #[test]
    fn complement_collision_collapses_to_one_record() {
        // Positive "ACG" (pos_begin) and negative "ACG" (neg_begin, read
        // from the reverse complement of palindromic ACGT) arise from
        // different raw positions but must resolve to the same id, so the
        // four boundary k-mers collapse to two distinct map entries.
        let seq = Sequence::new(b"ACGT".to_vec());
        let mut index = BifurcationIndex::new();
        let total = enumerate_bifurcations(&seq, &mut index, 3);
        assert_eq!(total, 4);
        assert_eq!(index.len(), 2);
        assert_ne!(index.get_bifurcation(b"ACG"), NO_BIFURCATION);
        assert_ne!(index.get_bifurcation(b"CGT"), NO_BIFURCATION);
    }

    #[test]
    fn every_emitted_kmer_has_a_consistent_id() {
        let seq = Sequence::new(b"ACGTACGAACGTTTGCA".to_vec());
        let mut index = BifurcationIndex::new();
        enumerate_bifurcations(&seq, &mut index, 4);

        let mut seen_ids: HashMap<Vec<u8>, u64> = HashMap::new();
        let mut checked_any = false;

        for (strand_begin, strand_end) in [
            (seq.positive_begin(), seq.positive_right_end()),
            (seq.negative_begin(), seq.negative_right_end()),
        ] {
            let mut it = strand_begin;
            while it.valid(&seq) {
                let mut probe = it;
                let mut bytes = Vec::new();
                let mut ok = true;
                for _ in 0..4 {
                    if !probe.valid(&seq) {
                        ok = false;
                        break;
                    }
                    bytes.push(probe.deref(&seq));
                    probe.advance(&seq);
                }
                if ok {
                    let id = index.get_bifurcation(&bytes);
                    if id != NO_BIFURCATION {
                        checked_any = true;
                        match seen_ids.get(&bytes) {
                            None => {
                                seen_ids.insert(bytes, id);
                            }
                            Some(&prev) => {
                                assert_eq!(prev, id, "k-mer {bytes:?} was assigned two different ids");
                            }
                        }
                    }
                }
                if it == strand_end {
                    break;
                }
                it.advance(&seq);
            }
        }

        assert!(checked_any, "expected at least one emitted k-mer to carry an id");
    }
}

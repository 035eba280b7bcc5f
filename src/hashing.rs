/// hashing.rs — Rolling hash over strand iterators
///
/// A polynomial hash of a length-`k` window, Horner-style from the window's
/// first byte down to its last: the byte at `k-1` steps past the window
/// start carries weight `base^0`, so the window-start byte itself carries
/// the highest power, `base^(k-1)`. `HASH_BASE`/`HASH_MOD` are part of the
/// external contract (bit-exact, grounded on the original `hashing.h`) —
/// any reimplementation must reproduce identical values on identical input.
use crate::sequence::{Sequence, StrandIterator};

pub const HASH_BASE: u64 = 57;
pub const HASH_MOD: u64 = 2_038_076_783;

/// Computes the hash of the length-`k` window starting at `it` directly,
/// independent of any `SlidingWindow` state.
pub fn calc_kmer_hash(seq: &Sequence, it: StrandIterator, k: usize) -> u64 {
    let mut cursor = it;
    cursor.jump(seq, k - 1);

    let mut hash: u64 = 0;
    let mut base: u64 = 1;
    for i in 0..k {
        let byte = cursor.deref(seq) as u64;
        hash = (hash + (byte * base) % HASH_MOD) % HASH_MOD;
        base = (base * HASH_BASE) % HASH_MOD;
        if i != k - 1 {
            cursor.retreat(seq);
        }
    }
    hash
}

/// Compares two k-mers by scanning `k` translated bytes in lockstep.
/// Equality is required for any hash-map use of a k-mer key: distinct
/// k-mers can share a hash value.
pub fn kmer_content_eq(
    seq1: &Sequence,
    it1: StrandIterator,
    seq2: &Sequence,
    it2: StrandIterator,
    k: usize,
) -> bool {
    let mut a = it1;
    let mut b = it2;
    for _ in 0..k {
        if a.deref(seq1) != b.deref(seq2) {
            return false;
        }
        a.advance(seq1);
        b.advance(seq2);
    }
    true
}

/// Sliding length-`k` window with an incrementally updated hash.
/// `boundary` is the strand's own past-the-end value against which the
/// window's last cell is compared (not necessarily the strand's absolute
/// end — the enumerator trims it by `k` for interior scans so that
/// `window.end()` and "one before the window" always stay dereferenceable).
pub struct SlidingWindow {
    k: usize,
    high_pow: u64,
    kmer_start: StrandIterator,
    kmer_end: StrandIterator,
    boundary: StrandIterator,
    value: u64,
}

impl SlidingWindow {
    pub fn new(seq: &Sequence, start: StrandIterator, boundary: StrandIterator, k: usize) -> Self {
        let mut high_pow: u64 = 1;
        for _ in 1..k {
            high_pow = (high_pow * HASH_BASE) % HASH_MOD;
        }

        let mut kmer_end = start;
        kmer_end.jump(seq, k - 1);
        let value = calc_kmer_hash(seq, start, k);

        SlidingWindow {
            k,
            high_pow,
            kmer_start: start,
            kmer_end,
            boundary,
            value,
        }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn begin(&self) -> StrandIterator {
        self.kmer_start
    }

    /// One past the window's last cell.
    pub fn end(&self, seq: &Sequence) -> StrandIterator {
        let mut e = self.kmer_end;
        e.advance(seq);
        e
    }

    pub fn valid(&self) -> bool {
        self.kmer_end != self.boundary
    }

    /// Advances the window by one cell, returning whether it is still
    /// valid after the move.
    pub fn move_window(&mut self, seq: &Sequence) -> bool {
        let old_start_byte = self.kmer_start.deref(seq) as u64;
        let sub = (old_start_byte * self.high_pow) % HASH_MOD;
        self.value = if sub <= self.value {
            self.value - sub
        } else {
            HASH_MOD - (sub - self.value)
        };
        self.value = (self.value * HASH_BASE) % HASH_MOD;

        self.kmer_start.advance(seq);
        self.kmer_end.advance(seq);

        if self.valid() {
            self.value = (self.value + self.kmer_end.deref(seq) as u64) % HASH_MOD;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::Sequence;

    #[test]
    fn sliding_window_matches_independent_hash_at_every_start() {
        let seq = Sequence::new(b"ACGTACGT".to_vec());
        let k = 4;
        let mut window = SlidingWindow::new(&seq, seq.positive_begin(), seq.positive_right_end(), k);
        loop {
            let expected = calc_kmer_hash(&seq, window.begin(), k);
            assert_eq!(window.value(), expected);
            if !window.move_window(&seq) {
                break;
            }
        }
    }

    #[test]
    fn complementary_kmers_hash_and_compare_equal() {
        let seq = Sequence::new(b"ACGT".to_vec());
        let k = 3;
        let pos = seq.positive_begin();
        let neg = seq.negative_begin();
        assert_eq!(calc_kmer_hash(&seq, pos, k), calc_kmer_hash(&seq, neg, k));
        assert!(kmer_content_eq(&seq, pos, &seq, neg, k));
    }

    #[test]
    fn differing_kmers_need_not_compare_equal_even_on_hash_collision() {
        let seq = Sequence::new(b"ACGTACGA".to_vec());
        let k = 3;
        let at0 = seq.positive_by_index(0); // "ACG"
        let at4 = seq.positive_by_index(4); // "ACG" too, same content
        assert!(kmer_content_eq(&seq, at0, &seq, at4, k));
        let at1 = seq.positive_by_index(1); // "CGT"
        assert!(!kmer_content_eq(&seq, at0, &seq, at1, k));
    }
}

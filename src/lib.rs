//! Strand-aware sequence model and de Bruijn graph bifurcation enumerator.

pub mod bifurcation;
pub mod cursor;
pub mod error;
pub mod fasta;
pub mod hashing;
pub mod sequence;

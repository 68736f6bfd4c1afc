//! One-hop substitution expansion.
//!
//! Substitutes of substitutes are never followed: the map is neither symmetric nor
//! transitive, and chasing chains would drift away from what the user actually has.

pub mod expander;


pub use expander::{Expansion, ExpansionFault, SubstitutionExpander};

//! High-level intermediate representation consumed by framework analyzers.
//!
//! Framework analyzers need an annotation-aware view of a class (members,
//! supertypes, annotation attributes) without caring how that view was
//! produced. Parsing and lowering live elsewhere; this crate only defines the
//! shape of the data.

pub mod framework;

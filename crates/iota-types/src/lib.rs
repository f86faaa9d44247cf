//! Core types and constants for the IOTA tangle.
//!
//! This crate provides the foundational types used across all IOTA crates:
//! the tryte alphabet and balanced-ternary numeric conversion, seed and
//! security-level handling, addresses and transfer tags, bundle descriptions,
//! and the raw transaction tryte layout.

pub mod address;
pub mod bundle;
pub mod constants;
pub mod seed;
pub mod tag;
pub mod transaction;
pub mod trytes;

pub use address::Address;
pub use bundle::{Bundle, BundleDescription, BundleInput, BundleOutput};
pub use seed::{SecurityLevel, Seed};
pub use tag::Tag;
pub use transaction::ParsedTransaction;

//! Capability traits implemented outside this crate.

pub mod encoder;

pub use encoder::IQueryEncoder;

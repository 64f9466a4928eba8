//! Construction of the public API facade.

mod builder;

pub use builder::TaggerApiBuilder;

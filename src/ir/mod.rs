//! Intermediate representation shared by the lowering and codegen passes.

pub mod types;

pub use types::*;

//! Infer a structural schema from a JSON object and render it as pydantic
//! model source text.
//!
//! The core is [`generate`]: pure, synchronous, no I/O, and safe to call
//! concurrently with independent inputs since every call owns its whole
//! working state. The [`cli`] module is the enclosing service around it
//! (input resolution, deserialization, output writing).

pub mod cli;
pub mod codegen;
pub mod inference;
pub mod ir;
pub mod naming;
pub mod walk;

pub use codegen::{generate, Codegen, GenerateError, GenerateOptions};

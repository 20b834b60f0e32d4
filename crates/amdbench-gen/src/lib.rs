//! Seeded topology generators for AMD benchmark graphs.
//!
//! This crate produces [`amdbench_core::Graph`] values of six shapes
//! (connected, disconnected, cyclic, dense, sparse, isolated) for feeding
//! the external AMD executables, plus checkers for the structural
//! guarantees each shape makes.

pub mod correctness;
pub mod generator;

pub use generator::{
    GenerateError, GeneratorConfig, SizeTier, Topology, generate, generate_with_rng,
};

//! Nearest- and farthest-point Voronoi diagrams, their Delaunay duals, and
//! alpha shapes in the plane.
//!
//! The entry point is [`operations::pipeline::ComputeAlpha`] (or the
//! [`compute`] shorthand); the individual algorithms live under
//! [`operations`] and work on the half-edge [`topology::Dcel`].

pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod topology;
pub mod tree;

pub use error::{Result, VoronoiError};
pub use operations::pipeline::{compute, AlphaComputation, ComputeAlpha, ComputeParams};

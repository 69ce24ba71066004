//! Alpha shapes from the combined nearest- and farthest-point diagrams.
//!
//! Every site and every Delaunay edge of both diagrams gets a closed alpha
//! interval. Nearest-diagram intervals are non-negative, farthest-diagram
//! intervals non-positive, so one signed alpha selects features from
//! exactly one side.

mod shape;
mod spectra;

pub use shape::{AlphaDisc, AlphaShape, AlphaShapeResult};
pub use spectra::{
    significant_alphas, AlphaInterval, ComputeShapeSpectra, DiagramKind, EdgeSpectrum,
    ShapeSpectra, VertexSpectrum,
};

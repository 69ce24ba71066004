//! Voronoi diagram construction and the records derived from it.

pub mod delaunay;
mod fortune;
mod skyum;

pub use delaunay::{
    compute_delaunay, compute_voronoi_cells, compute_voronoi_neighbours, VoronoiCell,
    VoronoiNeighbours,
};
pub use fortune::Fortune;
pub use skyum::{FarthestPointDiagram, Skyum};

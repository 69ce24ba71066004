pub mod alpha;
pub mod hull;
pub mod pipeline;
pub mod voronoi;

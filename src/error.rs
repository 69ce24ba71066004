use thiserror::Error;

/// Top-level error type for the Voronoi / alpha-shape engine.
#[derive(Debug, Error)]
pub enum VoronoiError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Diagram(#[from] DiagramError),
}

/// Errors related to geometric computations and inputs.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to the half-edge structure.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("half-edge has no origin: {0}")]
    MissingOrigin(String),

    #[error("invalid topology: {0}")]
    InvalidTopology(String),
}

/// Failures of the sweep and peeling algorithms.
#[derive(Debug, Error)]
pub enum DiagramError {
    #[error("{0} voronoi edges left without an origin after the sweep")]
    UnfinishedEdges(usize),

    #[error("candidate queue exhausted with {remaining} hull points left")]
    CandidatesExhausted { remaining: usize },
}

/// Convenience type alias for results using [`VoronoiError`].
pub type Result<T> = std::result::Result<T, VoronoiError>;

use thiserror::Error;

/// Top-level error type for the plot compiler.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error, PartialEq)]
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

    #[error("degenerate geometry: lines are parallel")]
    ParallelLines,

    /// The end tangents of a cubic curve never meet, so there is no apex
    /// point for a biarc. Callers are expected to subdivide.
    #[error("end tangents are parallel")]
    ParallelTangents,

    /// The end tangents meet behind one of the endpoints, as for curves that
    /// turn through more than a half circle. Callers are expected to subdivide.
    #[error("end tangents meet behind the curve")]
    TangentsDiverge,

    #[error("invalid curve: {0}")]
    InvalidCurve(String),
}

/// Errors raised while compiling shapes into motion.
#[derive(Debug, Error, PartialEq)]
pub enum CompileError {
    #[error("biarc subdivision exceeded depth {depth}")]
    UnboundedRecursion { depth: u32 },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Errors related to preview tessellation.
#[derive(Debug, Error, PartialEq)]
pub enum TessellationError {
    #[error("invalid tessellation parameters: {0}")]
    InvalidParameters(String),
}

impl PlotError {
    /// Returns the geometry error, if this is one.
    #[must_use]
    pub fn as_geometry(&self) -> Option<&GeometryError> {
        match self {
            Self::Geometry(err) => Some(err),
            Self::Compile(_) | Self::Tessellation(_) => None,
        }
    }
}

/// Convenience type alias for results using [`PlotError`].
pub type Result<T> = std::result::Result<T, PlotError>;

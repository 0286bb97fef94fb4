use thiserror::Error;

/// Error aborting a collision query.
///
/// Algorithmic non-results ("the shapes do not intersect", "the shapes are
/// not separated") are never reported through this type: they are encoded in
/// the return value of each query instead.
#[derive(Debug, Error)]
pub enum QueryError {
    /// A query parameter was rejected by the validation performed before any
    /// algorithmic work begins.
    #[error("invalid query parameters: {0}")]
    InvalidParams(&'static str),

    /// A zero-length vector or quaternion cannot be normalized: its direction
    /// is undefined.
    #[error("cannot normalize a zero-length vector or quaternion")]
    DegenerateLength,

    /// The terminal GJK simplex could not be turned into a polytope enclosing
    /// the origin.
    #[error("degenerate simplex: the origin could not be enclosed")]
    DegenerateSimplex,

    /// A polytope or portal face became degenerate during expansion.
    #[error("degenerate polytope face")]
    DegenerateFace,

    /// A user-supplied support-map or first-direction callback failed. The
    /// source error is propagated unchanged.
    #[error("geometry callback failed")]
    Callback(#[from] Box<dyn std::error::Error + Send + Sync>),
}

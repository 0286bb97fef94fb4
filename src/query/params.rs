use crate::math::{Real, Vector, DEFAULT_EPSILON};
use crate::query::QueryError;
use crate::shape::SupportMap;

/// Signature of a first-direction override: given both shapes, produces the
/// search direction used to seed GJK.
pub type FirstDirectionFn =
    fn(&dyn SupportMap, &dyn SupportMap) -> Result<Vector<Real>, QueryError>;

/// Parameters controlling the termination of the collision queries.
///
/// A single value can be shared by all the queries of a session; it is never
/// mutated by the engine. The defaults match the tolerances commonly used by
/// double-precision narrow-phase pipelines.
#[derive(Copy, Clone, Debug)]
pub struct QueryParams {
    /// Bound on the number of iterations of the GJK, EPA and MPR loops.
    ///
    /// Reaching the bound yields the best answer found so far, not an error.
    pub max_iterations: usize,
    /// Convergence tolerance of the EPA polytope expansion.
    pub epa_tolerance: Real,
    /// Convergence tolerance of the MPR portal refinement.
    pub mpr_tolerance: Real,
    /// Convergence tolerance of the GJK distance computation.
    pub dist_tolerance: Real,
    /// Overrides the initial GJK search direction.
    ///
    /// Defaults to the difference between the shape centers.
    pub first_direction: Option<FirstDirectionFn>,
}

impl Default for QueryParams {
    fn default() -> Self {
        QueryParams {
            max_iterations: 100,
            epa_tolerance: 1.0e-4,
            mpr_tolerance: 1.0e-4,
            dist_tolerance: 1.0e-6,
            first_direction: None,
        }
    }
}

impl QueryParams {
    /// Checks that every parameter is inside its admissible range.
    ///
    /// This runs at the start of every query, before any support-map call.
    pub fn validate(&self) -> Result<(), QueryError> {
        if self.max_iterations == 0 {
            return Err(QueryError::InvalidParams("max_iterations must be positive"));
        }
        if !self.epa_tolerance.is_finite() || self.epa_tolerance <= 0.0 {
            return Err(QueryError::InvalidParams("epa_tolerance must be positive"));
        }
        if !self.mpr_tolerance.is_finite() || self.mpr_tolerance <= 0.0 {
            return Err(QueryError::InvalidParams("mpr_tolerance must be positive"));
        }
        if !self.dist_tolerance.is_finite() || self.dist_tolerance <= 0.0 {
            return Err(QueryError::InvalidParams("dist_tolerance must be positive"));
        }
        Ok(())
    }

    /// The initial GJK search direction for the given shape pair.
    ///
    /// Falls back to the `x` axis whenever the configured direction (or the
    /// center difference) is degenerate.
    pub(crate) fn initial_direction(
        &self,
        g1: &dyn SupportMap,
        g2: &dyn SupportMap,
    ) -> Result<Vector<Real>, QueryError> {
        let dir = match self.first_direction {
            Some(first_direction) => first_direction(g1, g2)?,
            None => g1.center()? - g2.center()?,
        };

        if dir.norm_squared() > DEFAULT_EPSILON {
            Ok(dir)
        } else {
            Ok(Vector::x())
        }
    }
}

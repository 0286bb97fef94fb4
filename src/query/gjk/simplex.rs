use crate::math::{Point, Real, DIM};
use crate::query::gjk::{self, CSOPoint};
use crate::utils;

/// A simplex of dimension up to 3, used by GJK to bracket the origin of the
/// Configuration-Space Obstacle.
///
/// The simplex tracks, for each vertex, the barycentric coordinate of the
/// last origin projection, so that witness points on the original shapes can
/// be reconstructed at any time.
#[derive(Clone, Debug)]
pub struct VoronoiSimplex {
    vertices: [CSOPoint; DIM + 1],
    bcoords: [Real; DIM + 1],
    dim: usize,
}

impl Default for VoronoiSimplex {
    fn default() -> Self {
        Self::new()
    }
}

impl VoronoiSimplex {
    /// Creates a new empty simplex.
    pub fn new() -> VoronoiSimplex {
        VoronoiSimplex {
            vertices: [CSOPoint::new(Point::origin(), Point::origin()); DIM + 1],
            bcoords: [1.0, 0.0, 0.0, 0.0],
            dim: 0,
        }
    }

    /// Resets this simplex to contain only `pt`.
    pub fn reset(&mut self, pt: CSOPoint) {
        self.dim = 0;
        self.vertices[0] = pt;
        self.bcoords = [1.0, 0.0, 0.0, 0.0];
    }

    /// Adds a point to this simplex.
    ///
    /// Returns `false` (and leaves the simplex unchanged) if the point is
    /// already one of the simplex vertices, up to the GJK tolerance.
    pub fn add_point(&mut self, pt: CSOPoint) -> bool {
        let tol = gjk::eps_tol();

        for i in 0..self.dim + 1 {
            if (self.vertices[i].point - pt.point).norm_squared() < tol * tol {
                return false;
            }
        }

        self.dim += 1;
        self.vertices[self.dim] = pt;
        true
    }

    /// The i-th vertex of this simplex.
    pub fn point(&self, i: usize) -> &CSOPoint {
        assert!(i <= self.dim, "simplex vertex index out of bounds");
        &self.vertices[i]
    }

    /// The dimension of this simplex: its number of vertices minus one.
    pub fn dimension(&self) -> usize {
        self.dim
    }

    /// The barycentric coordinate, for the i-th vertex, of the last origin
    /// projection computed by [`Self::project_origin_and_reduce`].
    pub fn proj_coord(&self, i: usize) -> Real {
        assert!(i <= self.dim, "simplex vertex index out of bounds");
        self.bcoords[i]
    }

    /// The pair of points on the original shapes realizing the last origin
    /// projection.
    pub fn closest_points(&self) -> (Point<Real>, Point<Real>) {
        let mut pt1 = Point::origin();
        let mut pt2 = Point::origin();

        for i in 0..self.dim + 1 {
            pt1 += self.vertices[i].orig1.coords * self.bcoords[i];
            pt2 += self.vertices[i].orig2.coords * self.bcoords[i];
        }

        (pt1, pt2)
    }

    /// Projects the origin onto this simplex and reduces the simplex to the
    /// smallest sub-simplex containing that projection.
    ///
    /// If the origin lies inside a full (tetrahedral) simplex, the simplex is
    /// left untouched and the origin itself is returned.
    pub fn project_origin_and_reduce(&mut self) -> Point<Real> {
        match self.dim {
            0 => {
                self.bcoords = [1.0, 0.0, 0.0, 0.0];
                self.vertices[0].point
            }
            1 => {
                let (_, proj, bcoords) = utils::project_origin_on_segment(
                    &self.vertices[0].point,
                    &self.vertices[1].point,
                );
                self.reduce(&[0, 1], &bcoords);
                proj
            }
            2 => {
                let (_, proj, bcoords) = utils::project_origin_on_triangle(
                    &self.vertices[0].point,
                    &self.vertices[1].point,
                    &self.vertices[2].point,
                );
                self.reduce(&[0, 1, 2], &bcoords);
                proj
            }
            _ => self.project_origin_on_tetrahedron(),
        }
    }

    fn project_origin_on_tetrahedron(&mut self) -> Point<Real> {
        // Each face is listed with the index of its opposite vertex last.
        const FACES: [[usize; 4]; 4] = [[0, 1, 2, 3], [0, 1, 3, 2], [0, 2, 3, 1], [1, 2, 3, 0]];

        let mut best: Option<(Real, Point<Real>, [usize; 3], [Real; 3])> = None;

        for face in &FACES {
            let a = self.vertices[face[0]].point;
            let b = self.vertices[face[1]].point;
            let c = self.vertices[face[2]].point;
            let opp = self.vertices[face[3]].point;

            let mut normal = (b - a).cross(&(c - a));
            if normal.dot(&(opp - a)) > 0.0 {
                normal = -normal;
            }

            // `normal` now points away from the tetrahedron on this face.
            if normal.dot(&(-a.coords)) > 0.0 {
                let (dist2, proj, bcoords) = utils::project_origin_on_triangle(&a, &b, &c);
                let closer = match &best {
                    Some(best) => dist2 < best.0,
                    None => true,
                };
                if closer {
                    best = Some((dist2, proj, [face[0], face[1], face[2]], bcoords));
                }
            }
        }

        match best {
            // The origin is on the inner side of all four faces.
            None => Point::origin(),
            Some((_, proj, indices, bcoords)) => {
                self.reduce(&indices, &bcoords);
                proj
            }
        }
    }

    fn reduce(&mut self, indices: &[usize], bcoords: &[Real]) {
        let mut new_vertices = self.vertices;
        let mut new_bcoords = [0.0; DIM + 1];
        let mut new_len = 0;

        for (k, &i) in indices.iter().enumerate() {
            if bcoords[k] > 0.0 {
                new_vertices[new_len] = self.vertices[i];
                new_bcoords[new_len] = bcoords[k];
                new_len += 1;
            }
        }

        if new_len == 0 {
            // All the weights vanished (numerical quirk): keep one vertex.
            new_vertices[0] = self.vertices[indices[0]];
            new_bcoords[0] = 1.0;
            new_len = 1;
        }

        self.vertices = new_vertices;
        self.bcoords = new_bcoords;
        self.dim = new_len - 1;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::Point;
    use crate::query::gjk::CSOPoint;

    fn cso(x: f64, y: f64, z: f64) -> CSOPoint {
        CSOPoint::new(Point::new(x, y, z), Point::origin())
    }

    #[test]
    fn tetrahedron_containing_origin_is_kept() {
        let mut simplex = VoronoiSimplex::new();
        simplex.reset(cso(1.0, 1.0, 1.0));
        assert!(simplex.add_point(cso(-1.0, 1.0, -1.0)));
        assert!(simplex.add_point(cso(1.0, -1.0, -1.0)));
        assert!(simplex.add_point(cso(-1.0, -1.0, 1.0)));

        let proj = simplex.project_origin_and_reduce();
        assert_eq!(proj, Point::origin());
        assert_eq!(simplex.dimension(), 3);
    }

    #[test]
    fn segment_reduces_to_closest_vertex() {
        let mut simplex = VoronoiSimplex::new();
        simplex.reset(cso(1.0, 0.0, 0.0));
        assert!(simplex.add_point(cso(2.0, 0.0, 0.0)));

        let proj = simplex.project_origin_and_reduce();
        assert_eq!(proj, Point::new(1.0, 0.0, 0.0));
        assert_eq!(simplex.dimension(), 0);
        assert_eq!(simplex.proj_coord(0), 1.0);
    }

    #[test]
    fn duplicate_points_are_rejected() {
        let mut simplex = VoronoiSimplex::new();
        simplex.reset(cso(1.0, 0.0, 0.0));
        assert!(!simplex.add_point(cso(1.0, 0.0, 0.0)));
        assert_eq!(simplex.dimension(), 0);
    }
}

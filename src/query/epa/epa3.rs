//! Penetration depth computation with the Expanding Polytope Algorithm.

use crate::math::{Point, Real, UnitVector, Vector, DEFAULT_EPSILON};
use crate::query::gjk::{self, CSOPoint, VoronoiSimplex};
use crate::query::{Penetration, QueryError, QueryParams};
use crate::shape::SupportMap;
use crate::utils;
use na;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Copy, Clone, PartialEq)]
struct FaceId {
    id: usize,
    neg_dist: Real,
}

impl FaceId {
    fn new(id: usize, neg_dist: Real) -> Result<Self, QueryError> {
        if neg_dist > gjk::eps_tol() {
            // The face is on the wrong side of the origin: the polytope is
            // not a valid enclosing approximation anymore.
            Err(QueryError::DegenerateFace)
        } else {
            Ok(FaceId { id, neg_dist })
        }
    }
}

impl Eq for FaceId {}

impl PartialOrd for FaceId {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FaceId {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        if self.neg_dist < other.neg_dist {
            Ordering::Less
        } else if self.neg_dist > other.neg_dist {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

#[derive(Clone, Debug)]
struct Face {
    pts: [usize; 3],
    adj: [usize; 3],
    normal: UnitVector<Real>,
    bcoords: [Real; 3],
    deleted: bool,
}

impl Face {
    fn new_with_proj(
        vertices: &[CSOPoint],
        bcoords: [Real; 3],
        pts: [usize; 3],
        adj: [usize; 3],
    ) -> Self {
        // Degenerate faces get a zero normal; `can_be_seen_by` then treats
        // them as visible so that they are removed with the silhouette.
        let normal = utils::ccw_face_normal([
            &vertices[pts[0]].point,
            &vertices[pts[1]].point,
            &vertices[pts[2]].point,
        ])
        .unwrap_or_else(|| UnitVector::new_unchecked(Vector::zeros()));

        Face {
            pts,
            adj,
            normal,
            bcoords,
            deleted: false,
        }
    }

    fn new(vertices: &[CSOPoint], pts: [usize; 3], adj: [usize; 3]) -> (Self, Option<Real>) {
        let (dist2, _, bcoords) = utils::project_origin_on_triangle(
            &vertices[pts[0]].point,
            &vertices[pts[1]].point,
            &vertices[pts[2]].point,
        );

        let face = Self::new_with_proj(vertices, bcoords, pts, adj);

        if face.normal.as_ref() == &Vector::zeros() {
            (face, None)
        } else {
            // Distance to the face itself, not to its supporting plane: a
            // face whose origin projection clamps to an edge or vertex still
            // competes for expansion.
            (face, Some(dist2.sqrt()))
        }
    }

    fn closest_points(&self, vertices: &[CSOPoint]) -> (Point<Real>, Point<Real>) {
        (
            vertices[self.pts[0]].orig1 * self.bcoords[0]
                + vertices[self.pts[1]].orig1.coords * self.bcoords[1]
                + vertices[self.pts[2]].orig1.coords * self.bcoords[2],
            vertices[self.pts[0]].orig2 * self.bcoords[0]
                + vertices[self.pts[1]].orig2.coords * self.bcoords[1]
                + vertices[self.pts[2]].orig2.coords * self.bcoords[2],
        )
    }

    fn next_ccw_pt_id(&self, id: usize) -> usize {
        if self.pts[0] == id {
            1
        } else if self.pts[1] == id {
            2
        } else {
            if self.pts[2] != id {
                log::debug!(
                    "unexpected EPA topology: found vertex {}, expected {}",
                    self.pts[2],
                    id
                );
            }
            0
        }
    }

    fn can_be_seen_by(&self, vertices: &[CSOPoint], point: usize, opp_pt_id: usize) -> bool {
        let p0 = &vertices[self.pts[opp_pt_id]].point;
        let p1 = &vertices[self.pts[(opp_pt_id + 1) % 3]].point;
        let p2 = &vertices[self.pts[(opp_pt_id + 2) % 3]].point;
        let pt = &vertices[point].point;

        // Zero-normal (degenerate) faces yield a zero dot product and are
        // reported as visible, which removes them from the silhouette.
        (*pt - *p0).dot(&self.normal) >= -gjk::eps_tol() || is_affinely_dependent(p1, p2, pt)
    }
}

fn is_affinely_dependent(a: &Point<Real>, b: &Point<Real>, c: &Point<Real>) -> bool {
    let ab = b - a;
    let ac = c - a;
    let n2 = ab.cross(&ac).norm_squared();

    n2 <= DEFAULT_EPSILON * 100.0 * ab.norm_squared() * ac.norm_squared()
}

struct SilhouetteEdge {
    face_id: usize,
    opp_pt_id: usize,
}

impl SilhouetteEdge {
    fn new(face_id: usize, opp_pt_id: usize) -> Self {
        SilhouetteEdge { face_id, opp_pt_id }
    }
}

/// The Expanding Polytope Algorithm.
///
/// EPA refines the penetration information of two overlapping shapes,
/// starting from the terminal simplex of a GJK run that detected the
/// overlap. It maintains a convex polytope of Configuration-Space Obstacle
/// points enclosing the origin and repeatedly expands its face closest to
/// the origin, until no support point can push that face further out than
/// the configured tolerance.
///
/// The same instance can be reused across queries to avoid re-allocating its
/// internal buffers.
#[derive(Default)]
pub struct EPA {
    vertices: Vec<CSOPoint>,
    faces: Vec<Face>,
    silhouette: Vec<SilhouetteEdge>,
    heap: BinaryHeap<FaceId>,
}

impl EPA {
    /// Creates a new instance of the Expanding Polytope Algorithm.
    pub fn new() -> Self {
        Self::default()
    }

    fn reset(&mut self) {
        self.vertices.clear();
        self.faces.clear();
        self.silhouette.clear();
        self.heap.clear();
    }

    /// Computes the penetration depth, direction and contact position of two
    /// overlapping shapes.
    ///
    /// `simplex` must be the terminal simplex of a GJK run that returned
    /// [`GJKResult::Intersection`](crate::query::GJKResult::Intersection).
    /// Translating the second shape by `depth * direction` brings the shapes
    /// into touching contact.
    pub fn penetration<G1, G2>(
        &mut self,
        g1: &G1,
        g2: &G2,
        params: &QueryParams,
        simplex: &VoronoiSimplex,
    ) -> Result<Penetration, QueryError>
    where
        G1: SupportMap,
        G2: SupportMap,
    {
        let (p1, p2, direction, depth) = self.closest_points(g1, g2, params, simplex)?;

        Ok(Penetration {
            depth,
            direction,
            position: na::center(&p1, &p2),
        })
    }

    fn closest_points<G1, G2>(
        &mut self,
        g1: &G1,
        g2: &G2,
        params: &QueryParams,
        simplex: &VoronoiSimplex,
    ) -> Result<(Point<Real>, Point<Real>, UnitVector<Real>, Real), QueryError>
    where
        G1: SupportMap,
        G2: SupportMap,
    {
        let _eps = DEFAULT_EPSILON;

        self.reset();

        /*
         * Initialization.
         */
        for i in 0..simplex.dimension() + 1 {
            self.vertices.push(*simplex.point(i));
        }

        if simplex.dimension() == 0 {
            // Touching contact: the CSO point is the origin itself.
            let pt = self.vertices[0];
            return Ok((pt.orig1, pt.orig2, Vector::y_axis(), 0.0));
        } else if simplex.dimension() == 3 {
            let dp1 = self.vertices[1] - self.vertices[0];
            let dp2 = self.vertices[2] - self.vertices[0];
            let dp3 = self.vertices[3] - self.vertices[0];

            if dp1.cross(&dp2).dot(&dp3) > 0.0 {
                self.vertices.swap(1, 2)
            }

            let pts = [[0, 1, 2], [1, 3, 2], [0, 2, 3], [0, 3, 1]];
            let adj = [[3, 1, 2], [3, 2, 0], [0, 1, 3], [2, 1, 0]];

            let mut any_valid = false;

            for i in 0..4 {
                let (face, dist) = Face::new(&self.vertices, pts[i], adj[i]);
                self.faces.push(face);

                if let Some(dist) = dist {
                    any_valid = true;
                    self.heap.push(FaceId::new(i, -dist)?);
                }
            }

            if !any_valid {
                log::debug!("EPA: the initial simplex is affinely degenerate");
                return Err(QueryError::DegenerateSimplex);
            }
        } else {
            if simplex.dimension() == 1 {
                let dpt = self.vertices[1] - self.vertices[0];

                let mut support = None;
                let mut support_err = None;
                Vector::orthonormal_subspace_basis(&[dpt], |dir| {
                    match CSOPoint::from_shapes(g1, g2, dir) {
                        Ok(pt) => support = Some(pt),
                        Err(err) => support_err = Some(err),
                    }
                    false
                });

                if let Some(err) = support_err {
                    return Err(err);
                }
                self.vertices
                    .push(support.ok_or(QueryError::DegenerateSimplex)?);
            }

            let (face1, dist1) = Face::new(&self.vertices, [0, 1, 2], [1, 1, 1]);
            let (face2, dist2) = Face::new(&self.vertices, [0, 2, 1], [0, 0, 0]);

            let (Some(dist1), Some(dist2)) = (dist1, dist2) else {
                log::debug!("EPA: the initial simplex is affinely degenerate");
                return Err(QueryError::DegenerateSimplex);
            };

            self.faces.push(face1);
            self.faces.push(face2);

            self.heap.push(FaceId::new(0, -dist1)?);
            self.heap.push(FaceId::new(1, -dist2)?);
        }

        let mut niter = 0;
        let mut max_dist = Real::MAX;
        let mut best_face_id = *self.heap.peek().ok_or(QueryError::DegenerateSimplex)?;
        let mut old_dist = 0.0;

        /*
         * Run the expansion.
         */
        while let Some(face_id) = self.heap.pop() {
            let face = self.faces[face_id.id].clone();

            if face.deleted {
                continue;
            }

            let cso_point = CSOPoint::from_shapes_toward(g1, g2, &face.normal)?;
            let support_point_id = self.vertices.len();
            self.vertices.push(cso_point);

            let candidate_max_dist = cso_point.point.coords.dot(&face.normal);

            if candidate_max_dist < max_dist {
                best_face_id = face_id;
                max_dist = candidate_max_dist;
            }

            let curr_dist = -face_id.neg_dist;

            if max_dist - curr_dist < params.epa_tolerance
                // The expansion is stuck: no new support point will be found.
                || ((curr_dist - old_dist).abs() < _eps && candidate_max_dist < max_dist)
            {
                // The popped face is within tolerance of the true boundary.
                let (p1, p2) = face.closest_points(&self.vertices);
                return Ok((p1, p2, face.normal, curr_dist));
            }

            old_dist = curr_dist;

            self.faces[face_id.id].deleted = true;

            let adj_opp_pt_id1 = self.faces[face.adj[0]].next_ccw_pt_id(face.pts[0]);
            let adj_opp_pt_id2 = self.faces[face.adj[1]].next_ccw_pt_id(face.pts[1]);
            let adj_opp_pt_id3 = self.faces[face.adj[2]].next_ccw_pt_id(face.pts[2]);

            self.compute_silhouette(support_point_id, face.adj[0], adj_opp_pt_id1);
            self.compute_silhouette(support_point_id, face.adj[1], adj_opp_pt_id2);
            self.compute_silhouette(support_point_id, face.adj[2], adj_opp_pt_id3);

            let first_new_face_id = self.faces.len();

            if self.silhouette.is_empty() {
                return Err(QueryError::DegenerateFace);
            }

            for edge in &self.silhouette {
                if !self.faces[edge.face_id].deleted {
                    let new_face_id = self.faces.len();

                    let face_adj = &mut self.faces[edge.face_id];
                    let pt_id1 = face_adj.pts[(edge.opp_pt_id + 2) % 3];
                    let pt_id2 = face_adj.pts[(edge.opp_pt_id + 1) % 3];

                    let pts = [pt_id1, pt_id2, support_point_id];
                    let adj = [edge.face_id, new_face_id + 1, new_face_id - 1];
                    let new_face = Face::new(&self.vertices, pts, adj);

                    face_adj.adj[(edge.opp_pt_id + 1) % 3] = new_face_id;

                    self.faces.push(new_face.0);

                    if let Some(dist) = new_face.1 {
                        if dist + gjk::eps_tol() < curr_dist {
                            // Numerical errors flipped the expansion order;
                            // the popped face is the best answer available.
                            let (p1, p2) = face.closest_points(&self.vertices);
                            return Ok((p1, p2, face.normal, curr_dist));
                        }

                        self.heap.push(FaceId::new(new_face_id, -dist)?);
                    }
                }
            }

            if first_new_face_id == self.faces.len() {
                // All the silhouette edges belonged to deleted faces.
                return Err(QueryError::DegenerateFace);
            }

            let last_face_id = self.faces.len() - 1;
            self.faces[first_new_face_id].adj[2] = last_face_id;
            self.faces[last_face_id].adj[1] = first_new_face_id;

            self.silhouette.clear();

            niter += 1;
            if niter >= params.max_iterations {
                // The expansion did not converge to the requested precision;
                // the best candidate is close enough to be usable anyway.
                break;
            }
        }

        let best_face = &self.faces[best_face_id.id];
        let (p1, p2) = best_face.closest_points(&self.vertices);
        Ok((p1, p2, best_face.normal, -best_face_id.neg_dist))
    }

    fn compute_silhouette(&mut self, point: usize, id: usize, opp_pt_id: usize) {
        if !self.faces[id].deleted {
            if !self.faces[id].can_be_seen_by(&self.vertices, point, opp_pt_id) {
                self.silhouette.push(SilhouetteEdge::new(id, opp_pt_id));
            } else {
                self.faces[id].deleted = true;

                let adj_pt_id1 = (opp_pt_id + 2) % 3;
                let adj_pt_id2 = opp_pt_id;

                let adj1 = self.faces[id].adj[adj_pt_id1];
                let adj2 = self.faces[id].adj[adj_pt_id2];

                let adj_opp_pt_id1 = self.faces[adj1].next_ccw_pt_id(self.faces[id].pts[adj_pt_id1]);
                let adj_opp_pt_id2 = self.faces[adj2].next_ccw_pt_id(self.faces[id].pts[adj_pt_id2]);

                self.compute_silhouette(point, adj1, adj_opp_pt_id1);
                self.compute_silhouette(point, adj2, adj_opp_pt_id2);
            }
        }
    }
}

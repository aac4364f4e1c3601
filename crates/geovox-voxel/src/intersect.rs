//! Triangle vs unit-cube intersection predicate.
//!
//! Decides whether a triangle, expressed relative to a candidate voxel
//! center, overlaps the closed unit cube `[-0.5, 0.5]³`. The test runs a
//! fixed-priority sequence of outcode classifications against 26 half-space
//! planes (6 faces, 12 edge bevels, 8 corner bevels), then an edge-crossing
//! scan, then a supporting-plane fallback. The order and thresholds resolve
//! grazing and exactly-on-boundary triangles consistently, so adjacent
//! voxels never both claim or both miss a shared boundary surface.

use glam::DVec3;

use geovox_math::Triangle;

/// Tolerance applied to face classification and cross-product sign tests.
/// Values within this distance of a plane count as on the inside.
const EPS: f64 = 1e-5;

/// Bitmask recording which cube planes a point violates.
///
/// Bit layout (fixed; the AND-rejection steps depend on it):
/// - bits 0..6: the 6 face planes
/// - bits 8..20: the 12 edge-bevel planes
/// - bits 24..32: the 8 corner-bevel planes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Outcode(u32);

impl Outcode {
    const FACE_X_POS: u32 = 0x01;
    const FACE_X_NEG: u32 = 0x02;
    const FACE_Y_POS: u32 = 0x04;
    const FACE_Y_NEG: u32 = 0x08;
    const FACE_Z_POS: u32 = 0x10;
    const FACE_Z_NEG: u32 = 0x20;

    /// Returns `true` if the point violates no plane in this code.
    fn is_inside(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if two codes share a violated plane.
    fn shares_plane(self, other: Outcode) -> bool {
        self.0 & other.0 != 0
    }

    fn and(self, other: Outcode) -> Outcode {
        Outcode(self.0 & other.0)
    }

    fn or(self, other: Outcode) -> Outcode {
        Outcode(self.0 | other.0)
    }
}

/// Classify a point against the 6 face planes of the unit cube.
///
/// A bit is set only when the point is strictly outside the face by more
/// than [`EPS`], so points within tolerance of a face count as inside.
fn face_outcode(p: DVec3) -> Outcode {
    let mut code = 0;
    if p.x > 0.5 + EPS {
        code |= Outcode::FACE_X_POS;
    }
    if p.x < -0.5 - EPS {
        code |= Outcode::FACE_X_NEG;
    }
    if p.y > 0.5 + EPS {
        code |= Outcode::FACE_Y_POS;
    }
    if p.y < -0.5 - EPS {
        code |= Outcode::FACE_Y_NEG;
    }
    if p.z > 0.5 + EPS {
        code |= Outcode::FACE_Z_POS;
    }
    if p.z < -0.5 - EPS {
        code |= Outcode::FACE_Z_NEG;
    }
    Outcode(code)
}

/// Classify a point against the 12 edge-bevel planes (|a|+|b| > 1 on each
/// coordinate pair), shifted into bits 8..20.
fn bevel_2d_outcode(p: DVec3) -> Outcode {
    let planes = [
        p.x + p.y,
        p.x - p.y,
        -p.x + p.y,
        -p.x - p.y,
        p.x + p.z,
        p.x - p.z,
        -p.x + p.z,
        -p.x - p.z,
        p.y + p.z,
        p.y - p.z,
        -p.y + p.z,
        -p.y - p.z,
    ];
    let mut code = 0;
    for (i, value) in planes.iter().enumerate() {
        if *value > 1.0 {
            code |= 1 << (8 + i);
        }
    }
    Outcode(code)
}

/// Classify a point against the 8 corner-bevel planes
/// (±x ± y ± z > 1.5, all sign combinations), shifted into bits 24..32.
fn bevel_3d_outcode(p: DVec3) -> Outcode {
    let planes = [
        p.x + p.y + p.z,
        p.x + p.y - p.z,
        p.x - p.y + p.z,
        p.x - p.y - p.z,
        -p.x + p.y + p.z,
        -p.x + p.y - p.z,
        -p.x - p.y + p.z,
        -p.x - p.y - p.z,
    ];
    let mut code = 0;
    for (i, value) in planes.iter().enumerate() {
        if *value > 1.5 {
            code |= 1 << (24 + i);
        }
    }
    Outcode(code)
}

/// Test whether the point at parameter `alpha` along `p1 → p2` satisfies
/// the face constraints selected by `mask`.
fn crossing_point_inside(p1: DVec3, p2: DVec3, alpha: f64, mask: u32) -> bool {
    let point = p1 + alpha * (p2 - p1);
    face_outcode(point).0 & mask == 0
}

/// Scan one triangle edge for a face-plane crossing that lands inside the
/// cube. For each face plane violated by either endpoint, the crossing
/// point is tested against the other 5 face constraints.
fn edge_crosses_cube(p1: DVec3, p2: DVec3, combined: Outcode) -> bool {
    const FACES: [(u32, u32); 6] = [
        (Outcode::FACE_X_POS, 0x3e),
        (Outcode::FACE_X_NEG, 0x3d),
        (Outcode::FACE_Y_POS, 0x3b),
        (Outcode::FACE_Y_NEG, 0x37),
        (Outcode::FACE_Z_POS, 0x2f),
        (Outcode::FACE_Z_NEG, 0x1f),
    ];

    for (i, (bit, other_faces)) in FACES.iter().enumerate() {
        if combined.0 & bit == 0 {
            continue;
        }
        // Axis and plane sign for this face: faces alternate +/- per axis.
        let axis = i / 2;
        let plane = if i % 2 == 0 { 0.5 } else { -0.5 };
        let (a1, a2) = match axis {
            0 => (p1.x, p2.x),
            1 => (p1.y, p2.y),
            _ => (p1.z, p2.z),
        };
        let alpha = (plane - a1) / (a2 - a1);
        if crossing_point_inside(p1, p2, alpha, *other_faces) {
            return true;
        }
    }
    false
}

/// Classify the sign pattern of a vector's components, with [`EPS`]
/// tolerance so near-zero components match both signs.
fn sign_mask(v: DVec3) -> u32 {
    let mut mask = 0;
    if v.x < EPS {
        mask |= 0x04;
    }
    if v.y < EPS {
        mask |= 0x02;
    }
    if v.z < EPS {
        mask |= 0x01;
    }
    if v.x > -EPS {
        mask |= 0x20;
    }
    if v.y > -EPS {
        mask |= 0x10;
    }
    if v.z > -EPS {
        mask |= 0x08;
    }
    mask
}

/// Point-in-triangle membership for a point known to lie on the triangle's
/// supporting plane: the point is inside when the cross products of each
/// edge with the edge-to-point vector agree in sign on some axis.
fn point_in_triangle(p: DVec3, t: &Triangle) -> bool {
    let min = t.a.min(t.b).min(t.c);
    let max = t.a.max(t.b).max(t.c);
    if p.x > max.x || p.y > max.y || p.z > max.z || p.x < min.x || p.y < min.y || p.z < min.z {
        return false;
    }

    let sign_ab = sign_mask((t.a - t.b).cross(t.a - p));
    let sign_bc = sign_mask((t.b - t.c).cross(t.b - p));
    let sign_ca = sign_mask((t.c - t.a).cross(t.c - p));

    sign_ab & sign_bc & sign_ca != 0
}

/// Decide whether `t` (vertices relative to the cube center) intersects the
/// closed unit cube `[-0.5, 0.5]³`.
///
/// Pure and total: no failure mode, no side effects. The decision sequence
/// is fixed; see the module docs.
pub fn triangle_intersects_unit_cube(t: &Triangle) -> bool {
    // 1. Face classification: any vertex inside all 6 faces is an accept.
    let mut code_a = face_outcode(t.a);
    let mut code_b = face_outcode(t.b);
    let mut code_c = face_outcode(t.c);
    if code_a.is_inside() || code_b.is_inside() || code_c.is_inside() {
        return true;
    }

    // 2. All three vertices outside one shared face: reject.
    if !code_a.and(code_b).and(code_c).is_inside() {
        return false;
    }

    // 3. Tighten with edge-bevel planes, then corner-bevel planes.
    code_a = code_a.or(bevel_2d_outcode(t.a));
    code_b = code_b.or(bevel_2d_outcode(t.b));
    code_c = code_c.or(bevel_2d_outcode(t.c));
    if !code_a.and(code_b).and(code_c).is_inside() {
        return false;
    }

    code_a = code_a.or(bevel_3d_outcode(t.a));
    code_b = code_b.or(bevel_3d_outcode(t.b));
    code_c = code_c.or(bevel_3d_outcode(t.c));
    if !code_a.and(code_b).and(code_c).is_inside() {
        return false;
    }

    // 4. Edge scan: an edge whose endpoints share no violated plane may
    // still pierce a face; test each face-plane crossing point.
    let edges = [
        (t.a, t.b, code_a, code_b),
        (t.a, t.c, code_a, code_c),
        (t.b, t.c, code_b, code_c),
    ];
    for (p1, p2, c1, c2) in edges {
        if !c1.shares_plane(c2) && edge_crosses_cube(p1, p2, c1.or(c2)) {
            return true;
        }
    }

    // 5. Fallback: the cube may be pierced through the triangle's interior
    // with no vertex or edge inside. Intersect the supporting plane with
    // lines through the origin along the four principal diagonals and test
    // each hit point for triangle membership.
    let normal = (t.a - t.b).cross(t.a - t.c);
    let d = normal.dot(t.a);

    const DIAGONALS: [DVec3; 4] = [
        DVec3::new(1.0, 1.0, 1.0),
        DVec3::new(1.0, 1.0, -1.0),
        DVec3::new(1.0, -1.0, 1.0),
        DVec3::new(1.0, -1.0, -1.0),
    ];
    for dir in DIAGONALS {
        let denom = normal.dot(dir);
        if denom.abs() <= EPS {
            continue;
        }
        let hit = (d / denom) * dir;
        if hit.x.abs() <= 0.5 && point_in_triangle(hit, t) {
            return true;
        }
    }

    false
}

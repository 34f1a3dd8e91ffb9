//////////////////////////////////////////////////////////////////////
// affine reflections in homogeneous plane coordinates
//
// points are (x, y, w) on the chart w = 1; mirror i is the locus
// dot(v, normal_i) + offset_i = 0

use crate::errors::*;
use crate::mirrors;
use crate::{Matrix3d, Vec3d};

// tolerance for the consistency check of the initial point
const DIST_TOL: f64 = 1e-6;

//////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reflection {
    pub normal: Vec3d,
    pub offset: f64,
}

impl Reflection {

    pub fn new(normal: Vec3d, offset: f64) -> Self {
        Reflection { normal, offset }
    }

    // signed distance of v from this mirror
    pub fn signed_distance(&self, v: &Vec3d) -> f64 {
        v.dot(&self.normal) + self.offset
    }

    pub fn apply(&self, v: &Vec3d) -> Vec3d {
        v - 2.0 * self.signed_distance(v) * self.normal
    }

}

pub fn apply(reflection: &Reflection, v: &Vec3d) -> Vec3d {
    reflection.apply(v)
}

// one reflection per mirror, offset by the initial distance
pub fn build(mirrors: &Matrix3d, init_dist: &[f64; 3]) -> [Reflection; 3] {

    let r = |i: usize| Reflection::new(mirrors::normal(mirrors, i), init_dist[i]);

    [r(0), r(1), r(2)]

}

//////////////////////////////////////////////////////////////////////
// find the point whose signed distance to mirror i is init_dist[i].
//
// with offsets equal to the distances this means dot(v, normal_i) = 0
// for every mirror. for an affine group the three normals only span
// the plane, so solve with the first two mirrors plus the chart
// equation w = 1, then check the third mirror.

pub fn solve_initial_point(mirrors: &Matrix3d, init_dist: &[f64; 3]) -> Result<Vec3d> {

    let reflections = build(mirrors, init_dist);

    let n0 = &reflections[0].normal;
    let n1 = &reflections[1].normal;

    let system = Matrix3d::new(
        n0.x, n0.y, n0.z + reflections[0].offset - init_dist[0],
        n1.x, n1.y, n1.z + reflections[1].offset - init_dist[1],
        0.0, 0.0, 1.0
    );

    let point = match system.lu().solve(&Vec3d::new(0.0, 0.0, 1.0)) {
        Some(p) => p,
        None => bail!(ErrorKind::Numeric("mirror system is singular".to_string()))
    };

    for (i, r) in reflections.iter().enumerate() {

        let d = r.signed_distance(&point);

        if (d - init_dist[i]).abs() > DIST_TOL {
            bail!(ErrorKind::Numeric(
                format!("initial point is at distance {} from mirror {}, wanted {}",
                        d, i, init_dist[i])));
        }

    }

    Ok(point)

}

//////////////////////////////////////////////////////////////////////

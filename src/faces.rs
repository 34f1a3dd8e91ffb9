//////////////////////////////////////////////////////////////////////
// faces of the fundamental domain
//
// each unordered pair of mirrors (i, j) meets at a vertex of the
// fundamental triangle. the rotation generated by the pair, applied
// to the initial point, traces out the face of the tiling centered at
// that vertex.

use crate::coxeter::{is_infinite, CoxeterMatrix};
use crate::errors::*;
use crate::reflect::Reflection;
use crate::Vec3d;

const PAIRS: [(usize, usize); 3] = [(0, 1), (0, 2), (1, 2)];

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum FaceKind {
    // both mirrors active: 2n-gon alternating P and its reflection
    Edge,
    // one mirror active: n-gon traced by the rotation alone
    VertexOrbit,
}

#[derive(Debug, Clone)]
pub struct Face {
    pub mirrors: (usize, usize),
    pub kind: FaceKind,
    pub points: Vec<Vec3d>,
}

//////////////////////////////////////////////////////////////////////

pub fn build_faces(init_point: &Vec3d,
                   reflections: &[Reflection; 3],
                   cox_mat: &CoxeterMatrix,
                   active: &[bool; 3]) -> Result<Vec<Face>> {

    let mut faces = Vec::new();

    for &(i, j) in &PAIRS {

        let n = cox_mat.order(i, j);

        let (kind, first, second) = if active[i] && active[j] {
            (FaceKind::Edge, i, j)
        } else if active[i] && n > 2 {
            (FaceKind::VertexOrbit, i, j)
        } else if active[j] && n > 2 {
            (FaceKind::VertexOrbit, j, i)
        } else {
            continue;
        };

        if is_infinite(n) {
            bail!(ErrorKind::Configuration(
                format!("mirrors {} and {} have infinite order, face would be unbounded", i, j)));
        }

        let rotate = |v: &Vec3d| {
            reflections[second].apply(&reflections[first].apply(v))
        };

        let mut points = Vec::with_capacity(2 * n as usize);
        let mut p = *init_point;

        match kind {

            FaceKind::Edge => {

                let mut q = reflections[j].apply(&p);

                for _ in 0..n {
                    points.push(p);
                    points.push(q);
                    p = rotate(&p);
                    q = rotate(&q);
                }

            }

            FaceKind::VertexOrbit => {

                for _ in 0..n {
                    points.push(p);
                    p = rotate(&p);
                }

            }

        }

        faces.push(Face { mirrors: (i, j), kind, points });

    }

    if faces.is_empty() {
        warn!("no active mirror pair for {}, tiling has no faces", cox_mat);
    }

    Ok(faces)

}

//////////////////////////////////////////////////////////////////////

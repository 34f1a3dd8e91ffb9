//////////////////////////////////////////////////////////////////////
// Coxeter matrices for rank-3 (triangle) reflection groups

use std::fmt;

use crate::errors::*;
use crate::PI;

// orders at or above this are treated as infinite
pub const INFINITY_THRESHOLD: u32 = 1 << 16;

// canonical sentinel for an infinite order
pub const INFINITE_ORDER: u32 = u32::MAX;

pub const RANK: usize = 3;

//////////////////////////////////////////////////////////////////////

pub fn is_infinite(order: u32) -> bool {
    order >= INFINITY_THRESHOLD
}

// required inner product between two unit mirror normals whose
// dihedral rotation has the given order, i.e. -cos(pi/m)
//
// orders 1 (diagonal), 2 (orthogonal) and infinity (parallel) come
// out exact instead of going through the cosine
pub fn mirror_inner_product(order: u32) -> f64 {
    match order {
        1 => 1.0,
        2 => 0.0,
        m if is_infinite(m) => -1.0,
        m => -(PI / (m as f64)).cos(),
    }
}

//////////////////////////////////////////////////////////////////////
// 3x3 symmetric Coxeter matrix; entry (i, j) is the order of the
// rotation generated by mirrors i and j

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoxeterMatrix {
    entries: [[u32; RANK]; RANK],
}

impl CoxeterMatrix {

    // validate and wrap a full matrix
    pub fn new(entries: [[u32; RANK]; RANK]) -> Result<Self> {

        for i in 0..RANK {

            if entries[i][i] != 1 {
                bail!(ErrorKind::Configuration(
                    format!("diagonal entry ({}, {}) is {} instead of 1",
                            i, i, entries[i][i])));
            }

            for j in 0..i {

                if entries[i][j] != entries[j][i] {
                    bail!(ErrorKind::Configuration(
                        format!("matrix is not symmetric at ({}, {})", i, j)));
                }

                if entries[i][j] < 2 {
                    bail!(ErrorKind::Configuration(
                        format!("invalid dihedral order {} at ({}, {})",
                                entries[i][j], i, j)));
                }

            }
        }

        Ok(CoxeterMatrix { entries })

    }

    // triangle symbol (p, q, r) with m01 = p, m02 = q, m12 = r
    pub fn from_symbol(p: u32, q: u32, r: u32) -> Result<Self> {
        Self::new([
            [1, p, q],
            [p, 1, r],
            [q, r, 1],
        ])
    }

    pub fn order(&self, i: usize, j: usize) -> u32 {
        self.entries[i][j]
    }

    pub fn inner_product(&self, i: usize, j: usize) -> f64 {
        mirror_inner_product(self.entries[i][j])
    }

    // the triangle group tiles the Euclidean plane iff the angle sum
    // pi/p + pi/q + pi/r equals pi
    pub fn angle_sum(&self) -> f64 {

        let recip = |m: u32| if is_infinite(m) { 0.0 } else { 1.0 / (m as f64) };

        recip(self.entries[0][1]) + recip(self.entries[0][2]) + recip(self.entries[1][2])

    }

    pub fn is_euclidean(&self) -> bool {
        (self.angle_sum() - 1.0).abs() < 1e-9
    }

}

fn order_to_string(m: u32) -> String {
    if is_infinite(m) {
        "inf".to_string()
    } else {
        m.to_string()
    }
}

impl fmt::Display for CoxeterMatrix {

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})",
               order_to_string(self.entries[0][1]),
               order_to_string(self.entries[0][2]),
               order_to_string(self.entries[1][2]))
    }

}

//////////////////////////////////////////////////////////////////////

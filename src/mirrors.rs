//////////////////////////////////////////////////////////////////////
// mirror normals for a triangle group
//
// row i of the returned matrix is the normal of mirror i. the matrix
// is lower triangular:
//
//   [ 1 0 0 ]
//   [ ? ? 0 ]
//   [ ? ? ? ]
//
// and rows satisfy dot(row_i, row_j) = -cos(pi/m_ij). this is a
// Cholesky factorization of the Gram matrix, except that the last
// diagonal entry takes an absolute value so the near-zero radicand of
// an affine group survives floating point noise.

use crate::coxeter::CoxeterMatrix;
use crate::errors::*;
use crate::{Matrix3d, Vec3d};

pub fn solve(cox_mat: &CoxeterMatrix) -> Result<Matrix3d> {

    let c = |i, j| cox_mat.inner_product(i, j);

    let mut m = Matrix3d::zeros();

    m[(0, 0)] = 1.0;

    m[(1, 0)] = c(1, 0);

    let radicand = 1.0 - m[(1, 0)] * m[(1, 0)];

    if radicand <= 0.0 {
        bail!(ErrorKind::Numeric(
            format!("mirrors 0 and 1 of {} are parallel", cox_mat)));
    }

    m[(1, 1)] = radicand.sqrt();

    m[(2, 0)] = c(2, 0);
    m[(2, 1)] = (c(2, 1) - m[(2, 0)] * m[(1, 0)]) / m[(1, 1)];
    m[(2, 2)] = (m[(2, 0)] * m[(2, 0)] + m[(2, 1)] * m[(2, 1)] - 1.0).abs().sqrt();

    debug!("mirrors for {}: {:?}", cox_mat, m);

    Ok(m)

}

// row i as a vector
pub fn normal(mirrors: &Matrix3d, i: usize) -> Vec3d {
    mirrors.row(i).transpose()
}

//////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {

    use super::*;
    use crate::coxeter::INFINITE_ORDER;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    fn check_gram(cm: &CoxeterMatrix) {

        let m = solve(cm).unwrap();

        for i in 0..3 {
            assert_abs_diff_eq!(normal(&m, i).norm_squared(), 1.0, epsilon = 1e-9);
            for j in 0..i {
                let expected = cm.inner_product(i, j);
                assert_abs_diff_eq!(normal(&m, i).dot(&normal(&m, j)), expected, epsilon = 1e-9);
            }
        }

        // lower triangular
        assert_eq!(m[(0, 1)], 0.0);
        assert_eq!(m[(0, 2)], 0.0);
        assert_eq!(m[(1, 2)], 0.0);

    }

    #[test]
    fn test_affine_groups() {

        for &(p, q, r) in &[(3, 3, 3), (2, 4, 4), (2, 3, 6), (6, 2, 3)] {

            let cm = CoxeterMatrix::from_symbol(p, q, r).unwrap();
            check_gram(&cm);

            // planar: the homogeneous component is (nearly) zero
            let m = solve(&cm).unwrap();
            assert!(m[(2, 2)].abs() < 1e-6);

        }

    }

    #[test]
    fn test_a2_tilde_mirrors() {

        let m = solve(&CoxeterMatrix::from_symbol(3, 3, 3).unwrap()).unwrap();
        let h = 0.75f64.sqrt();

        assert_abs_diff_eq!(normal(&m, 1), Vec3d::new(-0.5, h, 0.0), epsilon = 1e-9);
        assert_abs_diff_eq!(normal(&m, 2), Vec3d::new(-0.5, -h, 0.0), epsilon = 1e-7);

    }

    #[test]
    fn test_infinite_order() {

        // mirrors 1 and 2 parallel, both orthogonal to mirror 0
        let cm = CoxeterMatrix::from_symbol(2, 2, INFINITE_ORDER).unwrap();
        let m = solve(&cm).unwrap();

        assert_abs_diff_eq!(normal(&m, 1), Vec3d::new(0.0, 1.0, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!(normal(&m, 2), Vec3d::new(0.0, -1.0, 0.0), epsilon = 1e-12);

        // infinite order between the first two mirrors has no finite solve
        let cm = CoxeterMatrix::from_symbol(INFINITE_ORDER, 2, 2).unwrap();
        assert!(matches!(solve(&cm).unwrap_err().kind(), ErrorKind::Numeric(_)));

    }

    // spherical and Euclidean triangles are the ones whose Gram
    // factorization is real
    fn real_symbol() -> impl Strategy<Value = (u32, u32, u32)> {

        let finite = prop_oneof![
            (2u32..40).prop_map(|n| (2, 2, n)),
            (3u32..=5).prop_map(|n| (2, 3, n)),
            Just((3, 3, 3)),
            Just((2, 4, 4)),
            Just((2, 3, 6)),
        ];

        let permuted = (finite, 0usize..6).prop_map(|((a, b, c), k)| match k {
            0 => (a, b, c),
            1 => (a, c, b),
            2 => (b, a, c),
            3 => (b, c, a),
            4 => (c, a, b),
            _ => (c, b, a),
        });

        // an infinite first entry has no finite solve (see test_infinite_order)
        prop_oneof![
            4 => permuted,
            1 => Just((2, 2, INFINITE_ORDER)),
            1 => Just((2, INFINITE_ORDER, 2)),
        ]

    }

    proptest! {
        #[test]
        fn proptest_gram_relations((p, q, r) in real_symbol()) {
            let cm = CoxeterMatrix::from_symbol(p, q, r).unwrap();
            prop_assert!(cm.angle_sum() >= 1.0 - 1e-9);
            check_gram(&cm);
        }
    }

}

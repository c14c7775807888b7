#![allow(clippy::needless_range_loop)]

pub fn identity_frame(dim: usize) -> Vec<Vec<f64>> {
    // Creates a frame of `dim` standard basis column vectors
    let mut frame = vec![vec![0.0; dim]; dim];
    for j in 0..dim {
        frame[j][j] = 1.0;
    }
    frame
}

pub fn matvec_into(matrix: &[Vec<f64>], v: &[f64], out: &mut [f64]) {
    // Computes matrix * v into `out` without allocating
    for i in 0..matrix.len() {
        out[i] = matrix[i].iter().zip(v).map(|(&m, &x)| m * x).sum();
    }
}

pub fn norm(v: &[f64]) -> f64 {
    v.iter().map(|&x| x * x).sum::<f64>().sqrt()
}

pub fn distance(a: &[f64], b: &[f64]) -> f64 {
    // Euclidean distance between two states of equal dimension
    a.iter()
        .zip(b)
        .map(|(&x, &y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(&x, &y)| x * y).sum()
}

pub fn orthonormalize(frame: &mut [Vec<f64>], diag: &mut [f64]) {
    // Modified Gram-Schmidt QR on a list of column vectors, in place.
    // After the call the columns are orthonormal and `diag[j]` holds the
    // absolute diagonal entry |R[j][j]| of the implied triangular factor.
    let cols = frame.len();
    for j in 0..cols {
        let r = norm(&frame[j]);
        diag[j] = r.abs();
        if r != 0.0 {
            for x in frame[j].iter_mut() {
                *x /= r;
            }
        }
        for k in (j + 1)..cols {
            let proj = dot(&frame[j], &frame[k]);
            for i in 0..frame[k].len() {
                let q = frame[j][i];
                frame[k][i] -= proj * q;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_frame() {
        let f = identity_frame(3);
        assert_eq!(f[0], vec![1.0, 0.0, 0.0]);
        assert_eq!(f[1], vec![0.0, 1.0, 0.0]);
        assert_eq!(f[2], vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_matvec() {
        let m = vec![vec![2.0, 0.0], vec![1.0, 3.0]];
        let mut out = vec![0.0; 2];
        matvec_into(&m, &[1.0, 2.0], &mut out);
        assert_eq!(out, vec![2.0, 7.0]);
    }

    #[test]
    fn test_orthonormalize_diag_and_columns() {
        // Columns (3,0) and (4,5): R diagonal is 3 and 5
        let mut frame = vec![vec![3.0, 0.0], vec![4.0, 5.0]];
        let mut diag = vec![0.0; 2];
        orthonormalize(&mut frame, &mut diag);
        assert!((diag[0] - 3.0).abs() < 1e-12, "diag0={}", diag[0]);
        assert!((diag[1] - 5.0).abs() < 1e-12, "diag1={}", diag[1]);
        assert!((norm(&frame[0]) - 1.0).abs() < 1e-12);
        assert!((norm(&frame[1]) - 1.0).abs() < 1e-12);
        assert!(dot(&frame[0], &frame[1]).abs() < 1e-12);
    }

    #[test]
    fn test_orthonormalize_zero_column() {
        // A zero column must not divide by zero; its scale factor is zero
        let mut frame = vec![vec![1.0, 0.0], vec![0.0, 0.0]];
        let mut diag = vec![0.0; 2];
        orthonormalize(&mut frame, &mut diag);
        assert_eq!(diag[1], 0.0);
        assert!(diag[1].ln().is_infinite());
    }
}

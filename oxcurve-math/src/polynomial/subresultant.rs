//! Resultants, signed subresultants and Sturm-Habicht sequences.
//!
//! Everything is computed with respect to `y` over the coefficient ring
//! `Z[x]` by fraction-free (Bareiss) determinants, so the results are exact
//! polynomials in `x` that can later be specialised at any `x`.
//!
//! Signed subresultants follow the convention of Basu, Pollack and Roy: for
//! `deg P = p > deg Q = q` and `j <= q`, `sRes_j(P, Q)` is the polynomial
//! determinant of the matrix whose rows are the coefficient vectors of
//! `y^(q-j-1) P, ..., y P, P, Q, y Q, ..., y^(p-j-1) Q`. The Sturm-Habicht
//! sequence of `P` is `StHa_p = P` and `StHa_j = sRes_j(P, P_y)` below it.
//!
//! ## References
//!
//! - "Algorithms in Real Algebraic Geometry" (Basu et al., 2006), ch. 4 and 9
//! - Gonzalez-Vega, Lombardi, Recio, Roy: "Sturm-Habicht sequence" (1989)

use super::{BiPoly, UPoly};
use num_bigint::Sign;

/// Determinant of a square matrix over `Z[x]` by Bareiss elimination.
///
/// Every intermediate division is exact, so coefficient growth stays
/// polynomial in the size of the matrix.
pub fn determinant(mut m: Vec<Vec<UPoly>>) -> UPoly {
    let n = m.len();
    if n == 0 {
        return UPoly::one();
    }
    let mut negate = false;
    let mut prev = UPoly::one();
    for k in 0..n - 1 {
        if m[k][k].is_zero() {
            match (k + 1..n).find(|&r| !m[r][k].is_zero()) {
                Some(r) => {
                    m.swap(k, r);
                    negate = !negate;
                }
                None => return UPoly::zero(),
            }
        }
        for i in k + 1..n {
            for j in k + 1..n {
                let t = &(&m[i][j] * &m[k][k]) - &(&m[i][k] * &m[k][j]);
                m[i][j] = t.div_exact(&prev);
            }
        }
        prev = m[k][k].clone();
    }
    let det = m[n - 1][n - 1].clone();
    if negate {
        -det
    } else {
        det
    }
}

/// Coefficient row of `e` for columns of degree `cols - 1, ..., 0`.
fn coefficient_row(e: &BiPoly, cols: usize) -> Vec<UPoly> {
    (0..cols).map(|c| e.coeff(cols - 1 - c)).collect()
}

/// Classical Sylvester resultant of `p` and `q` with respect to `y`.
pub fn sylvester_resultant(p: &BiPoly, q: &BiPoly) -> UPoly {
    if p.is_zero() || q.is_zero() {
        return UPoly::zero();
    }
    let (dp, dq) = (p.degree_y(), q.degree_y());
    if dp == 0 {
        return p.leading_coeff().pow(dq as u32);
    }
    if dq == 0 {
        return q.leading_coeff().pow(dp as u32);
    }
    let cols = dp + dq;
    let mut rows = Vec::with_capacity(cols);
    for k in (0..dq).rev() {
        rows.push(coefficient_row(&p.shift_y(k), cols));
    }
    for k in (0..dp).rev() {
        rows.push(coefficient_row(&q.shift_y(k), cols));
    }
    determinant(rows)
}

/// The `j`-th signed subresultant of `p` and `q` with respect to `y`.
///
/// # Panics
///
/// Panics unless `deg_y p > deg_y q`.
pub fn signed_subresultant(p: &BiPoly, q: &BiPoly, j: usize) -> BiPoly {
    let (dp, dq) = (p.degree_y(), q.degree_y());
    assert!(dp > dq, "signed subresultants need deg p > deg q");
    if j >= dp {
        return if j == dp { p.clone() } else { BiPoly::zero() };
    }
    if j > dq || q.is_zero() {
        return if j + 1 == dp { q.clone() } else { BiPoly::zero() };
    }
    let cols = dp + dq - j;
    let size = dp + dq - 2 * j;
    let mut rows = Vec::with_capacity(size);
    for k in (0..dq - j).rev() {
        rows.push(coefficient_row(&p.shift_y(k), cols));
    }
    for k in 0..dp - j {
        rows.push(coefficient_row(&q.shift_y(k), cols));
    }
    let coeffs = (0..=j)
        .map(|k| {
            let minor = rows
                .iter()
                .map(|row| {
                    let mut r = row[..size - 1].to_vec();
                    r.push(row[cols - 1 - k].clone());
                    r
                })
                .collect();
            determinant(minor)
        })
        .collect();
    BiPoly::from_coeffs(coeffs)
}

/// The Sturm-Habicht sequence `StHa_0, ..., StHa_p` of `p`, indexed by `j`.
pub fn sturm_habicht_sequence(p: &BiPoly) -> Vec<BiPoly> {
    let d = p.degree_y();
    if d == 0 {
        return vec![p.clone()];
    }
    let dp = p.derivative_y();
    let mut seq: Vec<BiPoly> = (0..d).map(|j| signed_subresultant(p, &dp, j)).collect();
    seq.push(p.clone());
    seq
}

/// Principal coefficients: the coefficient of `y^j` in the `j`-th member.
pub fn principal_coefficients(seq: &[BiPoly]) -> Vec<UPoly> {
    seq.iter().enumerate().map(|(j, s)| s.coeff(j)).collect()
}

/// Coprincipal coefficients: the coefficient of `y^(j-1)` in the `j`-th
/// member, zero for `j = 0`.
pub fn coprincipal_coefficients(seq: &[BiPoly]) -> Vec<UPoly> {
    seq.iter()
        .enumerate()
        .map(|(j, s)| if j == 0 { UPoly::zero() } else { s.coeff(j - 1) })
        .collect()
}

/// Permanences minus variations of a sign sequence, with the Sturm-Habicht
/// rule for zero blocks.
///
/// `signs[j]` is the sign of the `j`-th principal coefficient. Applied to
/// the principal Sturm-Habicht coefficients of a polynomial with a nonzero
/// leading coefficient this is its number of distinct real roots.
pub fn permanences_minus_variations(signs: &[Sign]) -> i64 {
    let mut nonzero = signs
        .iter()
        .enumerate()
        .rev()
        .filter(|(_, s)| **s != Sign::NoSign);
    let Some((mut i, mut si)) = nonzero.next() else {
        return 0;
    };
    let mut total = 0i64;
    for (l, sl) in nonzero {
        let gap = i - l;
        if gap % 2 == 1 {
            let epsilon = if (gap * (gap - 1) / 2) % 2 == 0 { 1 } else { -1 };
            let same = i64::from(si == sl) * 2 - 1;
            total += epsilon * same;
        }
        i = l;
        si = sl;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signs(coeffs: &[UPoly]) -> Vec<Sign> {
        coeffs.iter().map(|c| c.leading_coeff().sign()).collect()
    }

    #[test]
    fn test_integer_determinant() {
        let c = |v: i64| UPoly::from_i64(&[v]);
        let m = vec![
            vec![c(0), c(2), c(1)],
            vec![c(1), c(0), c(3)],
            vec![c(4), c(1), c(0)],
        ];
        // 0*(0-3) - 2*(0-12) + 1*(1-0) = 25
        assert_eq!(determinant(m), c(25));
    }

    #[test]
    fn test_sylvester_resultant() {
        // res_y(y^2 - x, 2y) = -4x
        let p = BiPoly::from_terms(&[(1, 0, 2), (-1, 1, 0)]);
        assert_eq!(
            sylvester_resultant(&p, &p.derivative_y()),
            UPoly::from_i64(&[0, -4])
        );
        // res_y(x*y - 1, x) = x
        let h = BiPoly::from_terms(&[(1, 1, 1), (-1, 0, 0)]);
        assert_eq!(sylvester_resultant(&h, &h.derivative_y()), UPoly::x());
    }

    #[test]
    fn test_sign_convention_on_quadratics() {
        // sRes_0(y^2 + c, 2y) = -4c while the Sylvester resultant is 4c
        for c in [-3i64, 3] {
            let p = BiPoly::from_terms(&[(1, 0, 2), (c, 0, 0)]);
            let seq = sturm_habicht_sequence(&p);
            assert_eq!(seq[0], BiPoly::from_terms(&[(-4 * c, 0, 0)]));
            assert_eq!(
                sylvester_resultant(&p, &p.derivative_y()),
                UPoly::from_i64(&[4 * c])
            );
        }
    }

    #[test]
    fn test_principal_coefficients_count_roots() {
        // y^3 - y: (4, 6, 3, 1), three real roots
        let p = BiPoly::from_terms(&[(1, 0, 3), (-1, 0, 1)]);
        let pc = principal_coefficients(&sturm_habicht_sequence(&p));
        assert_eq!(pc, vec![
            UPoly::from_i64(&[4]),
            UPoly::from_i64(&[6]),
            UPoly::from_i64(&[3]),
            UPoly::from_i64(&[1]),
        ]);
        assert_eq!(permanences_minus_variations(&signs(&pc)), 3);

        // y^3 + y: (-4, -6, 3, 1), one real root
        let q = BiPoly::from_terms(&[(1, 0, 3), (1, 0, 1)]);
        let qc = principal_coefficients(&sturm_habicht_sequence(&q));
        assert_eq!(qc[0], UPoly::from_i64(&[-4]));
        assert_eq!(qc[1], UPoly::from_i64(&[-6]));
        assert_eq!(permanences_minus_variations(&signs(&qc)), 1);
    }

    #[test]
    fn test_sequence_over_polynomial_ring() {
        // y^2 - x^2: StHa_0 = 4x^2, StHa_1 = 2y
        let p = BiPoly::from_terms(&[(1, 0, 2), (-1, 2, 0)]);
        let seq = sturm_habicht_sequence(&p);
        assert_eq!(seq[0], BiPoly::from_terms(&[(4, 2, 0)]));
        assert_eq!(seq[1], BiPoly::from_terms(&[(2, 0, 1)]));
        let cp = coprincipal_coefficients(&seq);
        assert!(cp[1].is_zero());
        assert_eq!(cp[2], UPoly::zero());
    }

    #[test]
    fn test_principal_zero_resultant_matches_sylvester_up_to_sign() {
        let p = BiPoly::from_terms(&[(1, 0, 3), (-1, 1, 1), (2, 2, 0), (1, 0, 0)]);
        let pc = principal_coefficients(&sturm_habicht_sequence(&p));
        let res = sylvester_resultant(&p, &p.derivative_y());
        assert!(pc[0] == res || pc[0] == -&res);
    }

    #[test]
    fn test_zero_blocks() {
        use Sign::*;
        // y^2: sRes_0 vanishes, one distinct root
        assert_eq!(permanences_minus_variations(&[NoSign, Plus, Plus]), 1);
        // a single zero between two nonzero entries contributes nothing
        assert_eq!(permanences_minus_variations(&[Plus, NoSign, Plus]), 0);
        assert_eq!(permanences_minus_variations(&[NoSign, NoSign]), 0);
    }
}

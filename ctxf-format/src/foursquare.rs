//! Sum-of-four-squares decomposition.
//!
//! Range proofs over committed quantities encode a value as four integers
//! whose squares sum to it (Lagrange's four-square theorem guarantees a
//! witness for every non-negative integer).

/// Find `(i, j, l, m)` with `i² + j² + l² + m² == x`.
///
/// The scan runs in lexicographic order (`i` outermost, `m` innermost) over
/// the inclusive box `[0, ⌈√x⌉]⁴` and returns the first witness it reaches;
/// the enumeration order is part of the contract, so a smarter decomposition
/// algorithm substituted here must preserve it. If the scan is exhausted the
/// sentinel `(0, 0, 0, 0)` is returned, which cannot happen for a `u64`
/// input — the unsigned parameter type already excludes the negative and
/// fractional cases that could reach it.
///
/// Brute force, `O(x²)` worst case; intended for the small quantities range
/// proofs commit to.
pub fn four_squares(x: u64) -> (u64, u64, u64, u64) {
    let target = x as u128;
    let bound = isqrt_ceil(x);
    for i in 0..=bound {
        let i2 = (i as u128) * (i as u128);
        if i2 > target {
            break;
        }
        for j in 0..=bound {
            let ij = i2 + (j as u128) * (j as u128);
            if ij > target {
                break;
            }
            for l in 0..=bound {
                let ijl = ij + (l as u128) * (l as u128);
                if ijl > target {
                    break;
                }
                for m in 0..=bound {
                    let sum = ijl + (m as u128) * (m as u128);
                    if sum == target {
                        return (i, j, l, m);
                    }
                    if sum > target {
                        break;
                    }
                }
            }
        }
    }
    (0, 0, 0, 0)
}

/// Smallest `r` with `r * r >= x`.
fn isqrt_ceil(x: u64) -> u64 {
    let mut r = (x as f64).sqrt() as u64;
    // Float truncation can land one off in either direction.
    while (r as u128) * (r as u128) < x as u128 {
        r += 1;
    }
    while r > 0 && ((r - 1) as u128) * ((r - 1) as u128) >= x as u128 {
        r -= 1;
    }
    r
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_decomposes_to_zeros() {
        assert_eq!(four_squares(0), (0, 0, 0, 0));
    }

    #[test]
    fn one_finds_the_innermost_witness_first() {
        // (0,0,0,1) precedes (1,0,0,0) with i outermost.
        assert_eq!(four_squares(1), (0, 0, 0, 1));
    }

    #[test]
    fn perfect_squares_need_the_inclusive_bound() {
        assert_eq!(four_squares(4), (0, 0, 0, 2));
        assert_eq!(four_squares(9), (0, 0, 0, 3));
    }

    #[test]
    fn seven_needs_all_four_components() {
        // 7 is not a sum of three squares; the first four-square witness in
        // scan order is 1 + 1 + 1 + 4.
        assert_eq!(four_squares(7), (1, 1, 1, 2));
    }

    #[test]
    fn squares_sum_to_x_within_the_box() {
        for x in 0..=512u64 {
            let (i, j, l, m) = four_squares(x);
            assert_eq!(i * i + j * j + l * l + m * m, x, "x = {x}");
            let bound = isqrt_ceil(x);
            for component in [i, j, l, m] {
                assert!(component <= bound, "x = {x}");
            }
        }
    }

    #[test]
    fn result_is_the_lexicographically_first_witness() {
        // Exhaustive cross-check on a small range.
        for x in 0..=64u64 {
            let bound = isqrt_ceil(x);
            let mut first = None;
            'scan: for i in 0..=bound {
                for j in 0..=bound {
                    for l in 0..=bound {
                        for m in 0..=bound {
                            if i * i + j * j + l * l + m * m == x {
                                first = Some((i, j, l, m));
                                break 'scan;
                            }
                        }
                    }
                }
            }
            assert_eq!(four_squares(x), first.unwrap(), "x = {x}");
        }
    }

    #[test]
    fn isqrt_ceil_is_exact() {
        assert_eq!(isqrt_ceil(0), 0);
        assert_eq!(isqrt_ceil(1), 1);
        assert_eq!(isqrt_ceil(2), 2);
        assert_eq!(isqrt_ceil(4), 2);
        assert_eq!(isqrt_ceil(5), 3);
        assert_eq!(isqrt_ceil(144), 12);
        assert_eq!(isqrt_ceil(145), 13);
    }
}

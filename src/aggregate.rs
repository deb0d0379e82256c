use crate::workbook::Cell;

/// Grades are reported on a half-point scale.
pub const GRADE_STEP: f64 = 0.5;

/// Exactly rounded running sum (Shewchuk partials). The result does not
/// depend on the order the terms arrive in.
#[derive(Debug, Default, Clone)]
struct ExactSum {
    partials: Vec<f64>,
}

impl ExactSum {
    fn add(&mut self, mut x: f64) {
        let mut i = 0;
        for j in 0..self.partials.len() {
            let mut y = self.partials[j];
            if x.abs() < y.abs() {
                std::mem::swap(&mut x, &mut y);
            }
            let hi = x + y;
            let lo = y - (hi - x);
            if lo != 0.0 {
                self.partials[i] = lo;
                i += 1;
            }
            x = hi;
        }
        self.partials.truncate(i);
        self.partials.push(x);
    }

    fn value(&self) -> f64 {
        let p = &self.partials;
        let mut n = p.len();
        if n == 0 {
            return 0.0;
        }
        n -= 1;
        let mut hi = p[n];
        let mut lo = 0.0;
        while n > 0 {
            let x = hi;
            n -= 1;
            let y = p[n];
            hi = x + y;
            lo = y - (hi - x);
            if lo != 0.0 {
                break;
            }
        }
        // Half-way case: the next partial decides which way to round.
        if n > 0 && ((lo < 0.0 && p[n - 1] < 0.0) || (lo > 0.0 && p[n - 1] > 0.0)) {
            let y = lo * 2.0;
            let x = hi + y;
            if y == x - hi {
                hi = x;
            }
        }
        hi
    }
}

/// Mean of `values` rounded to the nearest half point, ties to even.
///
/// Returns `None` for an empty slice: no grade exists without a valid score.
pub fn compute_grade(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sum = ExactSum::default();
    for &value in values {
        sum.add(value);
    }
    let mean = sum.value() / values.len() as f64;
    Some((mean / GRADE_STEP).round_ties_even() * GRADE_STEP)
}

/// Scores from the given cells, skipping anything that is not a number.
pub fn collect_scores<'a>(cells: impl IntoIterator<Item = &'a Cell>) -> Vec<f64> {
    cells.into_iter().filter_map(Cell::as_score).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_scores_keep_their_value() {
        assert_eq!(compute_grade(&[3.0, 3.0, 3.0]), Some(3.0));
    }

    #[test]
    fn half_point_means_are_exact() {
        assert_eq!(compute_grade(&[3.0, 4.0]), Some(3.5));
    }

    #[test]
    fn thirds_round_to_nearest_half() {
        // 3.333 / 0.5 = 6.67 -> 7 -> 3.5
        assert_eq!(compute_grade(&[3.0, 3.0, 4.0]), Some(3.5));
        // 4.333 -> 4.5
        assert_eq!(compute_grade(&[4.0, 4.0, 5.0]), Some(4.5));
        // 3.667 -> 3.5
        assert_eq!(compute_grade(&[3.0, 4.0, 4.0]), Some(3.5));
    }

    #[test]
    fn quarter_ties_round_to_even_step() {
        // 3.25 / 0.5 = 6.5 -> 6 -> 3.0
        assert_eq!(compute_grade(&[3.0, 3.5]), Some(3.0));
        // 3.75 / 0.5 = 7.5 -> 8 -> 4.0
        assert_eq!(compute_grade(&[3.5, 4.0]), Some(4.0));
    }

    #[test]
    fn empty_input_has_no_grade() {
        assert_eq!(compute_grade(&[]), None);
    }

    #[test]
    fn grades_are_always_half_point_multiples() {
        let samples: &[&[f64]] = &[
            &[0.0],
            &[1.0, 2.0, 2.0],
            &[0.1, 0.2, 0.3, 0.4],
            &[5.0, 4.0, 3.0, 2.0, 1.0, 0.0, 2.0],
            &[2.3, 4.7, 1.9],
            &[10.0, 0.0, 0.0],
        ];
        for values in samples {
            let grade = compute_grade(values).expect("non-empty input");
            assert_eq!((grade / GRADE_STEP).fract(), 0.0, "{values:?} -> {grade}");
        }
    }

    #[test]
    fn summation_does_not_drift() {
        let values = vec![0.1; 10];
        let mut sum = ExactSum::default();
        for v in &values {
            sum.add(*v);
        }
        assert_eq!(sum.value(), 1.0);
    }

    #[test]
    fn summation_is_order_independent() {
        let forward = [1e16, 1.0, -1e16, 0.5];
        let mut a = ExactSum::default();
        let mut b = ExactSum::default();
        for v in forward {
            a.add(v);
        }
        for v in forward.iter().rev() {
            b.add(*v);
        }
        assert_eq!(a.value(), 1.5);
        assert_eq!(b.value(), 1.5);
    }

    #[test]
    fn non_numeric_cells_are_excluded() {
        let cells = [
            Cell::Number(4.0),
            Cell::Text("-".into()),
            Cell::Empty,
            Cell::Text("5".into()),
            Cell::Number(5.0),
        ];
        assert_eq!(collect_scores(&cells), vec![4.0, 5.0]);
    }
}

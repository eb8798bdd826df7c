//! Local-maximum extraction for continuous reference patterns.
//!
//! Only peak positions are needed for mark placement. There is no fitting,
//! prominence or width filtering.

use stackplot_parser::options::PeakDetection;

/// Indices of the local maxima of `y`, in ascending order.
///
/// The first and last samples are never peaks.
pub fn find_peaks(y: &[f64], detection: PeakDetection) -> Vec<usize> {
    match detection {
        PeakDetection::Plateau => plateau_maxima(y),
        PeakDetection::Strict => strict_maxima(y),
    }
}

/// Strict maxima plus flat-topped maxima.
///
/// A plateau counts once, at its middle sample (rounded down), when the
/// samples on both sides of it are lower.
fn plateau_maxima(y: &[f64]) -> Vec<usize> {
    let mut peaks = Vec::new();
    if y.len() < 3 {
        return peaks;
    }
    let last = y.len() - 1;

    let mut i = 1;
    while i < last {
        if y[i - 1] < y[i] {
            let mut ahead = i + 1;
            while ahead < last && y[ahead] == y[i] {
                ahead += 1;
            }
            if y[ahead] < y[i] {
                peaks.push((i + ahead - 1) / 2);
                i = ahead;
            }
        }
        i += 1;
    }
    peaks
}

/// Samples strictly greater than both neighbours.
fn strict_maxima(y: &[f64]) -> Vec<usize> {
    y.windows(3)
        .enumerate()
        .filter(|(_, w)| w[1] > w[0] && w[1] > w[2])
        .map(|(i, _)| i + 1)
        .collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_single_peaks() {
        let y = [0.0, 1.0, 0.0, 2.0, 5.0, 1.0];
        assert_eq!(find_peaks(&y, PeakDetection::Plateau), vec![1, 4]);
        assert_eq!(find_peaks(&y, PeakDetection::Strict), vec![1, 4]);
    }

    #[test]
    fn test_plateau_midpoint() {
        let y = [0.0, 2.0, 2.0, 2.0, 0.0];
        assert_eq!(find_peaks(&y, PeakDetection::Plateau), vec![2]);
        assert!(find_peaks(&y, PeakDetection::Strict).is_empty());

        let y = [0.0, 2.0, 2.0, 0.0];
        assert_eq!(find_peaks(&y, PeakDetection::Plateau), vec![1]);
    }

    #[test]
    fn test_rising_plateau_is_not_a_peak() {
        let y = [0.0, 2.0, 2.0, 3.0, 1.0];
        assert_eq!(find_peaks(&y, PeakDetection::Plateau), vec![3]);
    }

    #[test]
    fn test_edges_are_never_peaks() {
        let y = [5.0, 1.0, 0.0, 1.0, 5.0];
        assert!(find_peaks(&y, PeakDetection::Plateau).is_empty());
        assert!(find_peaks(&y, PeakDetection::Strict).is_empty());
        assert!(find_peaks(&[1.0, 2.0], PeakDetection::Plateau).is_empty());
        assert!(find_peaks(&[], PeakDetection::Strict).is_empty());
    }

    #[test]
    fn test_plateau_running_into_edge() {
        let y = [0.0, 3.0, 3.0, 3.0];
        assert!(find_peaks(&y, PeakDetection::Plateau).is_empty());
    }

    fn check_strict_peaks_subset_of_plateau(y: &[f64]) {
        let plateau = find_peaks(y, PeakDetection::Plateau);
        for peak in find_peaks(y, PeakDetection::Strict) {
            assert!(plateau.contains(&peak), "strict peak {peak} missing");
        }
    }

    fn check_peaks_are_interior(y: &[f64]) {
        for peak in find_peaks(y, PeakDetection::Plateau) {
            assert!(peak > 0 && peak + 1 < y.len());
        }
    }

    proptest! {
        #[test]
        fn prop_strict_peaks_subset_of_plateau(y in prop::collection::vec(0i32..5, 0..40)) {
            let y: Vec<f64> = y.into_iter().map(f64::from).collect();
            check_strict_peaks_subset_of_plateau(&y);
        }

        #[test]
        fn prop_peaks_are_interior(y in prop::collection::vec(-1e3f64..1e3, 0..40)) {
            check_peaks_are_interior(&y);
        }
    }
}

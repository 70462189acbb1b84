//! Property-based tests for dotted version comparison.
//!
//! These tests use proptest to generate random versions and verify that the
//! comparison behaves as a total order matching zero-padded tuple comparison.

#[cfg(test)]
mod proptest_tests {
    use crate::version::{compare, CoreVersion};
    use proptest::prelude::*;
    use std::cmp::Ordering;

    fn segments() -> impl Strategy<Value = Vec<u64>> {
        prop::collection::vec(0u64..1000, 1..6)
    }

    fn render(segments: &[u64]) -> String {
        segments
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(".")
    }

    fn padded(a: &[u64], b: &[u64]) -> (Vec<u64>, Vec<u64>) {
        let len = a.len().max(b.len());
        let mut a = a.to_vec();
        let mut b = b.to_vec();
        a.resize(len, 0);
        b.resize(len, 0);
        (a, b)
    }

    proptest! {
        /// Property: every version compares equal to itself
        #[test]
        fn compare_is_reflexive(a in segments()) {
            let text = render(&a);
            prop_assert_eq!(compare(&text, &text).unwrap(), Ordering::Equal);
        }

        /// Property: comparison matches zero-padded integer tuple ordering
        #[test]
        fn compare_matches_padded_tuples(a in segments(), b in segments()) {
            let (pa, pb) = padded(&a, &b);
            prop_assert_eq!(compare(&render(&a), &render(&b)).unwrap(), pa.cmp(&pb));
        }

        /// Property: swapping the arguments reverses the ordering
        #[test]
        fn compare_is_antisymmetric(a in segments(), b in segments()) {
            let forward = compare(&render(&a), &render(&b)).unwrap();
            let backward = compare(&render(&b), &render(&a)).unwrap();
            prop_assert_eq!(forward, backward.reverse());
        }

        /// Property: ordering is transitive
        #[test]
        fn compare_is_transitive(a in segments(), b in segments(), c in segments()) {
            let mut versions = vec![
                CoreVersion::parse(&render(&a)).unwrap(),
                CoreVersion::parse(&render(&b)).unwrap(),
                CoreVersion::parse(&render(&c)).unwrap(),
            ];
            versions.sort();
            prop_assert!(versions[0] <= versions[1]);
            prop_assert!(versions[1] <= versions[2]);
            prop_assert!(versions[0] <= versions[2]);
        }

        /// Property: trailing zero segments never change the ordering
        #[test]
        fn trailing_zeros_are_insignificant(a in segments(), zeros in 1usize..4) {
            let mut extended = a.clone();
            extended.extend(std::iter::repeat(0).take(zeros));
            prop_assert_eq!(
                compare(&render(&a), &render(&extended)).unwrap(),
                Ordering::Equal
            );
        }

        /// Property: anything with a non-digit segment is rejected
        #[test]
        fn non_numeric_segment_is_malformed(a in segments(), junk in "[a-z]{1,4}") {
            let text = format!("{}.{}", render(&a), junk);
            prop_assert!(CoreVersion::parse(&text).is_err());
        }
    }
}

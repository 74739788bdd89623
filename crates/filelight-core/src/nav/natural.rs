//! Case-insensitive natural string ordering.

use std::cmp::Ordering;

/// Compares two strings so that embedded numbers order by value.
///
/// Both names are lowercased and compared with
/// [`alphanumeric_sort::compare_str`], so `"file2"` sorts before `"file10"`.
/// Names that are equal under those rules fall back to a raw comparison so
/// the order is total.
///
/// ```
/// use filelight_core::nav::natural::natural_cmp;
/// use std::cmp::Ordering;
///
/// assert_eq!(natural_cmp("file2", "file10"), Ordering::Less);
/// assert_eq!(natural_cmp("IMG_9", "img_10"), Ordering::Less);
/// ```
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    alphanumeric_sort::compare_str(a.to_lowercase(), b.to_lowercase()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut names: Vec<&str>) -> Vec<&str> {
        names.sort_by(|a, b| natural_cmp(a, b));
        names
    }

    #[test]
    fn numbers_compare_by_value() {
        assert_eq!(
            sorted(vec!["file10", "file2", "file1"]),
            vec!["file1", "file2", "file10"]
        );
    }

    #[test]
    fn case_is_ignored() {
        assert_eq!(
            sorted(vec!["banana", "Apple", "cherry"]),
            vec!["Apple", "banana", "cherry"]
        );
    }

    #[test]
    fn multiple_number_runs() {
        assert_eq!(
            sorted(vec!["v1.10.0", "v1.2.10", "v1.2.9"]),
            vec!["v1.2.9", "v1.2.10", "v1.10.0"]
        );
    }

    #[test]
    fn prefix_sorts_first() {
        assert_eq!(natural_cmp("file", "file1"), Ordering::Less);
        assert_eq!(natural_cmp("file1", "file"), Ordering::Greater);
    }

    #[test]
    fn leading_zeros_do_not_change_value_order() {
        assert_eq!(natural_cmp("a002", "a10"), Ordering::Less);
        assert_eq!(natural_cmp("a10", "a002"), Ordering::Greater);
    }

    #[test]
    fn leading_zeros_still_give_a_total_order() {
        let forward = natural_cmp("a01", "a1");
        assert_ne!(forward, Ordering::Equal);
        assert_eq!(natural_cmp("a1", "a01"), forward.reverse());
    }

    #[test]
    fn huge_numbers_do_not_overflow() {
        assert_eq!(
            natural_cmp("x99999999999999999999999", "x100000000000000000000000"),
            Ordering::Less
        );
    }

    #[test]
    fn equal_ignoring_case_is_still_total() {
        assert_ne!(natural_cmp("README", "readme"), Ordering::Equal);
        assert_eq!(natural_cmp("same", "same"), Ordering::Equal);
    }

    #[test]
    fn digits_sort_before_letters() {
        assert_eq!(natural_cmp("1abc", "abc"), Ordering::Less);
    }

    #[test]
    fn unicode_letters() {
        assert_eq!(natural_cmp("Émile", "émile2"), Ordering::Less);
    }
}

//! Ordering of version identifiers
//!
//! Two orders are provided:
//! - [`compare`]: the strict order used to pick the best version for a tag key.
//!   Only defined within one comparability class (same `rest`, same CE presence).
//! - [`release_order`]: a total order across classes used to sort tags for mirroring.

use std::cmp::Ordering;

use crate::tags::error::VersionError;
use crate::tags::identifier::VersionId;

/// How identifiers that agree on every shared component are ranked
/// when one of them has more components (`14.10` vs `14.10.2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpecificityOrder {
    /// The shorter identifier ranks greater (`14.10.2` > `14.10.2.1`).
    #[default]
    LessSpecificFirst,
    /// The longer identifier ranks greater (`14.10.2.1` > `14.10.2`).
    MoreSpecificFirst,
}

impl SpecificityOrder {
    pub fn from_inverse_flag(inverse: bool) -> Self {
        if inverse {
            SpecificityOrder::MoreSpecificFirst
        } else {
            SpecificityOrder::LessSpecificFirst
        }
    }
}

/// Compare two identifiers of the same comparability class.
///
/// `None` is an absent version and ranks below everything.
///
/// # Errors
/// Returns [`VersionError::IncompatibleVersions`] when the identifiers differ in
/// `rest` or in community-edition presence.
pub fn compare(
    a: Option<&VersionId>,
    b: Option<&VersionId>,
    order: SpecificityOrder,
) -> Result<Ordering, VersionError> {
    let (a, b) = match (a, b) {
        (None, None) => return Ok(Ordering::Equal),
        (None, Some(_)) => return Ok(Ordering::Less),
        (Some(_), None) => return Ok(Ordering::Greater),
        (Some(a), Some(b)) => (a, b),
    };

    if a.rest() != b.rest() || a.has_community_edition() != b.has_community_edition() {
        return Err(VersionError::IncompatibleVersions {
            left: a.to_string(),
            right: b.to_string(),
        });
    }

    Ok(compare_within_class(a, b, order))
}

/// Total order over all identifiers regardless of class.
///
/// Ignores `rest`; an identifier without a CE number ranks below one with.
pub fn release_order(
    a: Option<&VersionId>,
    b: Option<&VersionId>,
    order: SpecificityOrder,
) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => compare_within_class(a, b, order)
            .then_with(|| a.community_edition().cmp(&b.community_edition())),
    }
}

fn compare_within_class(a: &VersionId, b: &VersionId, order: SpecificityOrder) -> Ordering {
    let shared = a
        .components()
        .iter()
        .zip(b.components())
        .map(|(x, y)| x.cmp(y))
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal);

    shared
        .then_with(|| compare_specificity(a, b, order))
        .then_with(|| compare_release_candidate(a, b))
        .then_with(|| match (a.community_edition(), b.community_edition()) {
            (Some(x), Some(y)) => x.cmp(&y),
            _ => Ordering::Equal,
        })
}

fn compare_specificity(a: &VersionId, b: &VersionId, order: SpecificityOrder) -> Ordering {
    let by_length = a.specificity().cmp(&b.specificity());
    match order {
        SpecificityOrder::LessSpecificFirst => by_length.reverse(),
        SpecificityOrder::MoreSpecificFirst => by_length,
    }
}

fn compare_release_candidate(a: &VersionId, b: &VersionId) -> Ordering {
    match (a.release_candidate(), b.release_candidate()) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::parser::VersionParser;
    use rstest::rstest;

    use super::SpecificityOrder::{LessSpecificFirst, MoreSpecificFirst};

    fn v(tag: &str) -> VersionId {
        VersionParser::default().parse(tag).unwrap()
    }

    fn cmp(a: &str, b: &str, order: SpecificityOrder) -> Ordering {
        compare(Some(&v(a)), Some(&v(b)), order).unwrap()
    }

    #[rstest]
    #[case("14.10.2", "14.10.2", Ordering::Equal)]
    #[case("13.10.2", "14.10.2", Ordering::Less)]
    #[case("14.11.0", "14.10.9", Ordering::Greater)]
    #[case("14.10.2", "14.10.3", Ordering::Less)]
    #[case("14.10", "14.10.2", Ordering::Greater)]
    #[case("14.10.2", "14.10", Ordering::Less)]
    #[case("14.9", "14.10.2", Ordering::Less)]
    #[case("1.2.3.4", "1.2.3.5", Ordering::Less)]
    #[case("1.2.3.4.5", "1.2.3.4.6", Ordering::Less)]
    #[case("1.2.3", "1.2.3.4", Ordering::Greater)]
    #[case("1.2.3.4", "1.2.3.4.5", Ordering::Greater)]
    #[case("1.2.4", "1.2.3.9", Ordering::Greater)]
    #[case("14.10.1-rc1", "14.10.1-rc2", Ordering::Less)]
    #[case("14.10.1", "14.10.1-rc2", Ordering::Greater)]
    #[case("14.10.0", "14.10.1-rc1", Ordering::Less)]
    #[case("1.2.3.4", "1.2.3.4-rc1", Ordering::Greater)]
    #[case("14.10.2-ce.4", "14.10.2-ce.5", Ordering::Less)]
    #[case("14.10.2-rc1.ce.9", "14.10.2-ce.1", Ordering::Less)]
    #[case("14.10.2-rc2.ce.1", "14.10.2-rc1.ce.9", Ordering::Greater)]
    #[case("13-rc1-alpine", "13-alpine", Ordering::Less)]
    fn compare_default_order(#[case] a: &str, #[case] b: &str, #[case] expected: Ordering) {
        assert_eq!(cmp(a, b, LessSpecificFirst), expected);
    }

    #[rstest]
    #[case("14.10", "14.10.2", Ordering::Less)]
    #[case("1.2.3", "1.2.3.4", Ordering::Less)]
    #[case("1.2.3.4.5", "1.2.3.4", Ordering::Greater)]
    #[case("14.10.2", "14.10.2", Ordering::Equal)]
    #[case("14.10.2", "15.0", Ordering::Less)]
    #[case("14.11.0", "14.10.2", Ordering::Greater)]
    #[case("14.10.2", "14.10.3", Ordering::Less)]
    #[case("14.10.1-rc1", "14.10.1-rc2", Ordering::Less)]
    #[case("14.10.1", "14.10.1-rc2", Ordering::Greater)]
    fn compare_inverse_order(#[case] a: &str, #[case] b: &str, #[case] expected: Ordering) {
        assert_eq!(cmp(a, b, MoreSpecificFirst), expected);
    }

    #[rstest]
    // Specificity is decided before the release candidate is looked at
    #[case(LessSpecificFirst, "14.10-rc1", "14.10.2", Ordering::Greater)]
    #[case(MoreSpecificFirst, "14.10-rc1", "14.10.2", Ordering::Less)]
    #[case(LessSpecificFirst, "14.10.2.1", "14.10.2-rc1", Ordering::Less)]
    #[case(MoreSpecificFirst, "14.10.2.1-rc1", "14.10.2", Ordering::Greater)]
    // ... and before the community edition number
    #[case(LessSpecificFirst, "14.10-ce.1", "14.10.2-ce.9", Ordering::Greater)]
    #[case(MoreSpecificFirst, "14.10-ce.9", "14.10.2-ce.1", Ordering::Less)]
    #[case(MoreSpecificFirst, "14.10.2-rc3.ce.1", "14.10.2-rc3.ce.2", Ordering::Less)]
    fn compare_specificity_precedes_rc_and_ce(
        #[case] order: SpecificityOrder,
        #[case] a: &str,
        #[case] b: &str,
        #[case] expected: Ordering,
    ) {
        assert_eq!(cmp(a, b, order), expected);
    }

    #[rstest]
    #[case("13-alpine", "13-debian")]
    #[case("13-alpine", "13")]
    #[case("14.10.2-ce.1", "14.10.2")]
    #[case("14.10.2", "14.10.2-rc1.ce.1")]
    fn compare_across_classes_is_an_error(#[case] a: &str, #[case] b: &str) {
        let result = compare(Some(&v(a)), Some(&v(b)), LessSpecificFirst);

        assert_eq!(
            result,
            Err(VersionError::IncompatibleVersions {
                left: a.to_string(),
                right: b.to_string(),
            })
        );
    }

    #[test]
    fn compare_absent_versions_rank_lowest() {
        let version = v("0");

        assert_eq!(compare(None, None, LessSpecificFirst), Ok(Ordering::Equal));
        assert_eq!(
            compare(None, Some(&version), LessSpecificFirst),
            Ok(Ordering::Less)
        );
        assert_eq!(
            compare(Some(&version), None, LessSpecificFirst),
            Ok(Ordering::Greater)
        );
    }

    #[rstest]
    #[case(LessSpecificFirst)]
    #[case(MoreSpecificFirst)]
    fn compare_is_a_total_order_within_a_class(#[case] order: SpecificityOrder) {
        let versions: Vec<VersionId> = [
            "14", "14.10", "14.10.2", "14.10.2.1", "14.10.2-rc1", "14.10.2-rc2", "14.10.3",
            "14.11.0.0.1", "13.14.0", "14.10.2.1-rc1",
        ]
        .into_iter()
        .map(v)
        .collect();

        for a in &versions {
            assert_eq!(compare(Some(a), Some(a), order), Ok(Ordering::Equal));
            for b in &versions {
                let ab = compare(Some(a), Some(b), order).unwrap();
                let ba = compare(Some(b), Some(a), order).unwrap();
                assert_eq!(ab, ba.reverse(), "antisymmetry for {} / {}", a, b);

                for c in &versions {
                    let bc = compare(Some(b), Some(c), order).unwrap();
                    let ac = compare(Some(a), Some(c), order).unwrap();
                    if ab.is_le() && bc.is_le() {
                        assert!(ac.is_le(), "transitivity for {} <= {} <= {}", a, b, c);
                    }
                }
            }
        }
    }

    #[test]
    fn release_order_ignores_rest_and_ranks_missing_ce_lowest() {
        let order = LessSpecificFirst;

        assert_eq!(
            release_order(Some(&v("13-alpine")), Some(&v("14")), order),
            Ordering::Less
        );
        assert_eq!(
            release_order(Some(&v("14.10.2")), Some(&v("14.10.2-ce.0")), order),
            Ordering::Less
        );
        assert_eq!(
            release_order(Some(&v("14.10.2-ce.3")), Some(&v("14.10.2-ce.2")), order),
            Ordering::Greater
        );
        assert_eq!(release_order(None, Some(&v("0")), order), Ordering::Less);
    }

    #[test]
    fn release_order_sorts_mixed_specificity_by_policy() {
        let mut versions = vec![v("14.10.2.0.0"), v("14.10.2"), v("14.10.2.0")];

        versions.sort_by(|a, b| release_order(Some(a), Some(b), MoreSpecificFirst));
        let sorted: Vec<String> = versions.iter().map(ToString::to_string).collect();
        assert_eq!(sorted, vec!["14.10.2", "14.10.2.0", "14.10.2.0.0"]);

        versions.sort_by(|a, b| release_order(Some(a), Some(b), LessSpecificFirst));
        let sorted: Vec<String> = versions.iter().map(ToString::to_string).collect();
        assert_eq!(sorted, vec!["14.10.2.0.0", "14.10.2.0", "14.10.2"]);
    }
}

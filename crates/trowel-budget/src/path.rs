//! Dotted paths addressing one editable budget field.

use std::fmt;
use std::str::FromStr;

use trowel_core::{CostCategory, ValidationError};

use crate::layout::{GRAND_TOTAL_KEY, GROUP_TOTAL_KEY, find_group, groups};

/// An editable field of a [`crate::BudgetHierarchy`].
///
/// ```text
/// total                              GrandTotal
/// indirectCosts                      CategoryTotal(Indirect)
/// directCosts.materials.total        GroupTotal { DirectConstruction, "materials" }
/// directCosts.materials.structural   Leaf { DirectConstruction, "materials", "structural" }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BudgetPath {
    GrandTotal,
    CategoryTotal(CostCategory),
    GroupTotal {
        category: CostCategory,
        group: &'static str,
    },
    Leaf {
        category: CostCategory,
        group: &'static str,
        leaf: &'static str,
    },
}

impl BudgetPath {
    /// Every leaf path in layout order.
    #[must_use]
    pub fn all_leaves() -> Vec<Self> {
        CostCategory::ALL
            .into_iter()
            .flat_map(|category| {
                groups(category).iter().flat_map(move |layout| {
                    layout.leaves.iter().copied().map(move |leaf| Self::Leaf {
                        category,
                        group: layout.key,
                        leaf,
                    })
                })
            })
            .collect()
    }

    #[must_use]
    pub const fn is_leaf(self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// Category the path belongs to, if any.
    #[must_use]
    pub const fn category(self) -> Option<CostCategory> {
        match self {
            Self::GrandTotal => None,
            Self::CategoryTotal(category)
            | Self::GroupTotal { category, .. }
            | Self::Leaf { category, .. } => Some(category),
        }
    }
}

impl FromStr for BudgetPath {
    type Err = ValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let unknown = || ValidationError::UnknownPath(raw.to_owned());
        let parts: Vec<&str> = raw.trim().split('.').collect();

        match parts.as_slice() {
            [field] if *field == GRAND_TOTAL_KEY => Ok(Self::GrandTotal),
            [field] => CostCategory::from_total_field(field)
                .map(Self::CategoryTotal)
                .ok_or_else(unknown),
            [container, group, field] => {
                let category = CostCategory::from_container_key(container).ok_or_else(unknown)?;
                let layout = find_group(category, group).ok_or_else(unknown)?;
                if *field == GROUP_TOTAL_KEY {
                    return Ok(Self::GroupTotal {
                        category,
                        group: layout.key,
                    });
                }
                let leaf = layout.leaf(field).ok_or_else(unknown)?;
                Ok(Self::Leaf {
                    category,
                    group: layout.key,
                    leaf,
                })
            }
            _ => Err(unknown()),
        }
    }
}

impl fmt::Display for BudgetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GrandTotal => f.write_str(GRAND_TOTAL_KEY),
            Self::CategoryTotal(category) => f.write_str(category.total_field()),
            Self::GroupTotal { category, group } => {
                write!(f, "{}.{group}.{GROUP_TOTAL_KEY}", category.container_key())
            }
            Self::Leaf {
                category,
                group,
                leaf,
            } => write!(f, "{}.{group}.{leaf}", category.container_key()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("total", BudgetPath::GrandTotal)]
    #[case(
        "contingencyReserve",
        BudgetPath::CategoryTotal(CostCategory::Contingency)
    )]
    #[case(
        "directCosts.materials.total",
        BudgetPath::GroupTotal { category: CostCategory::DirectConstruction, group: "materials" }
    )]
    #[case(
        "directCosts.materials.structural",
        BudgetPath::Leaf { category: CostCategory::DirectConstruction, group: "materials", leaf: "structural" }
    )]
    #[case(
        "preConstruction.permits.buildingPermits",
        BudgetPath::Leaf { category: CostCategory::PreConstruction, group: "permits", leaf: "buildingPermits" }
    )]
    fn parses_and_displays(#[case] raw: &str, #[case] expected: BudgetPath) {
        let parsed: BudgetPath = raw.parse().unwrap();
        assert_eq!(parsed, expected);
        assert_eq!(parsed.to_string(), raw);
    }

    #[rstest]
    #[case("")]
    #[case("directCosts")]
    #[case("directCosts.materials")]
    #[case("directCosts.materials.gold")]
    #[case("directCosts.roofing.structural")]
    #[case("indirect.materials.structural")]
    #[case("directCosts.materials.structural.extra")]
    #[case("grandTotal")]
    fn rejects_unknown_paths(#[case] raw: &str) {
        let err = raw.parse::<BudgetPath>().unwrap_err();
        assert_eq!(err, ValidationError::UnknownPath(raw.to_owned()));
    }

    #[test]
    fn all_leaves_are_leaves_and_round_trip() {
        let leaves = BudgetPath::all_leaves();
        assert!(!leaves.is_empty());
        for path in leaves {
            assert!(path.is_leaf());
            assert_eq!(path.to_string().parse::<BudgetPath>().unwrap(), path);
        }
    }
}

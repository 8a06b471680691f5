//! Declared sub-groups and leaves of every budget category.
//!
//! The canonical hierarchy always contains exactly these groups and leaves;
//! canonicalization fills anything missing with zero and drops anything not
//! listed here.

use trowel_core::CostCategory;

/// Leaf that absorbs amounts with no finer breakdown (legacy flat fields land here).
pub const CATCH_ALL_LEAF: &str = "other";

/// Key of a group's own total inside the group object.
pub const GROUP_TOTAL_KEY: &str = "total";

/// Key of the grand total on the budget object.
pub const GRAND_TOTAL_KEY: &str = "total";

/// A named sub-group and its leaf fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupLayout {
    pub key: &'static str,
    pub leaves: &'static [&'static str],
}

impl GroupLayout {
    #[must_use]
    pub fn leaf(&self, name: &str) -> Option<&'static str> {
        self.leaves.iter().copied().find(|leaf| *leaf == name)
    }
}

const DIRECT_CONSTRUCTION: &[GroupLayout] = &[
    GroupLayout {
        key: "materials",
        leaves: &["structural", "finishing", "mep", "specialty", "other"],
    },
    GroupLayout {
        key: "labour",
        leaves: &["skilled", "unskilled", "supervision", "specialized", "other"],
    },
    GroupLayout {
        key: "equipment",
        leaves: &["purchase", "rental", "maintenance", "fuel", "other"],
    },
    GroupLayout {
        key: "subcontractors",
        leaves: &["specialized", "general", "other"],
    },
];

const PRE_CONSTRUCTION: &[GroupLayout] = &[
    GroupLayout {
        key: "siteAcquisition",
        leaves: &["landPurchase", "legalFees", "surveys", "other"],
    },
    GroupLayout {
        key: "design",
        leaves: &["architectural", "engineering", "quantitySurveying", "other"],
    },
    GroupLayout {
        key: "permits",
        leaves: &[
            "buildingPermits",
            "environmentalClearance",
            "utilityConnections",
            "other",
        ],
    },
];

const INDIRECT: &[GroupLayout] = &[
    GroupLayout {
        key: "siteOverheads",
        leaves: &["siteOffice", "security", "utilities", "safety", "other"],
    },
    GroupLayout {
        key: "administration",
        leaves: &["projectManagement", "insurance", "bonds", "other"],
    },
    GroupLayout {
        key: "financing",
        leaves: &["interest", "fees", "other"],
    },
];

const CONTINGENCY: &[GroupLayout] = &[
    GroupLayout {
        key: "design",
        leaves: &["scopeGaps", "designErrors", "other"],
    },
    GroupLayout {
        key: "construction",
        leaves: &["unforeseenConditions", "priceEscalation", "other"],
    },
    GroupLayout {
        key: "ownersReserve",
        leaves: &["scopeChanges", "discretionary", "other"],
    },
];

/// Declared groups of a category, in display order.
#[must_use]
pub const fn groups(category: CostCategory) -> &'static [GroupLayout] {
    match category {
        CostCategory::DirectConstruction => DIRECT_CONSTRUCTION,
        CostCategory::PreConstruction => PRE_CONSTRUCTION,
        CostCategory::Indirect => INDIRECT,
        CostCategory::Contingency => CONTINGENCY,
    }
}

#[must_use]
pub fn find_group(category: CostCategory, key: &str) -> Option<&'static GroupLayout> {
    groups(category).iter().find(|group| group.key == key)
}

//! Second-level groups of the industrial domain
//!
//! Groups are operationally distinct services that share the industrial
//! domain but route to their own presentation downstream.

use once_cell::sync::Lazy;

use super::normalize::{Slug, normalize};

/// A canonical industrial group and the labels that refer to it
#[derive(Debug)]
pub struct IndustrialGroup {
    pub key: &'static str,
    pub label: &'static str,
    pub variants: &'static [&'static str],
}

impl IndustrialGroup {
    /// Normalized variants, computed once per process
    pub fn normalized_variants(&self) -> &'static [Slug] {
        NORMALIZED
            .iter()
            .find(|(key, _)| *key == self.key)
            .map(|(_, slugs)| slugs.as_slice())
            .unwrap_or(&[])
    }
}

/// Declared order is the matching order
pub static INDUSTRIAL_GROUPS: &[IndustrialGroup] = &[
    IndustrialGroup {
        key: "borewell",
        label: "Borewell Drilling",
        variants: &[
            "Borewell",
            "Borewell Drilling",
            "Bore Well Drilling",
            "Tube Well",
            "Borewell Repair",
        ],
    },
    IndustrialGroup {
        key: "fabricators",
        label: "Fabricators",
        variants: &[
            "Fabricators",
            "Fabrication",
            "Steel Fabrication",
            "Welding Works",
            "Grill Works",
        ],
    },
    IndustrialGroup {
        key: "transport",
        label: "Transport",
        variants: &[
            "Transport",
            "Goods Transport",
            "Lorry Transport",
            "Tractor Rental",
            "Crane Services",
        ],
    },
    IndustrialGroup {
        key: "tank-cleaning",
        label: "Tank Cleaning",
        variants: &["Water Tank Cleaning", "Tank Cleaning", "Sump Cleaning"],
    },
    IndustrialGroup {
        key: "scrap-dealers",
        label: "Scrap Dealers",
        variants: &["Scrap Dealers", "Scrap Buyers", "Old Iron Merchants"],
    },
    IndustrialGroup {
        key: "machine-repair",
        label: "Machine Repair",
        variants: &[
            "Machine Repair",
            "Motor Rewinding",
            "Generator Repair",
            "Industrial Machine Service",
        ],
    },
    IndustrialGroup {
        key: "packers-movers",
        label: "Packers & Movers",
        variants: &["Packers And Movers", "Packers", "Movers", "House Shifting"],
    },
];

static NORMALIZED: Lazy<Vec<(&'static str, Vec<Slug>)>> = Lazy::new(|| {
    INDUSTRIAL_GROUPS
        .iter()
        .map(|group| (group.key, group.variants.iter().map(|v| normalize(v)).collect()))
        .collect()
});

/// Look up a group by its canonical key
pub fn group_by_key(key: &str) -> Option<&'static IndustrialGroup> {
    INDUSTRIAL_GROUPS.iter().find(|g| g.key == key)
}

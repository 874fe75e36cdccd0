//! Radius presets and distance-based filtering

use serde::{Deserialize, Serialize};

use super::{Coordinate, distance_km, format_distance};

/// Search radii offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum RadiusPreset {
    Km2,
    #[default]
    Km5,
    Km10,
    Km25,
    Km50,
}

impl RadiusPreset {
    pub fn km(&self) -> f64 {
        f64::from(self.whole_km())
    }

    pub fn whole_km(&self) -> u32 {
        match self {
            RadiusPreset::Km2 => 2,
            RadiusPreset::Km5 => 5,
            RadiusPreset::Km10 => 10,
            RadiusPreset::Km25 => 25,
            RadiusPreset::Km50 => 50,
        }
    }

    /// Get display label for UI
    pub fn label(&self) -> String {
        format!("{} km", self.whole_km())
    }

    /// Get all variants for UI selection
    pub fn all_variants() -> &'static [RadiusPreset] {
        &[
            RadiusPreset::Km2,
            RadiusPreset::Km5,
            RadiusPreset::Km10,
            RadiusPreset::Km25,
            RadiusPreset::Km50,
        ]
    }

    /// Whether a distance falls inside this radius (boundary included)
    pub fn contains(&self, distance_km: f64) -> bool {
        distance_km <= self.km()
    }
}

impl TryFrom<u32> for RadiusPreset {
    type Error = String;

    fn try_from(km: u32) -> Result<Self, Self::Error> {
        RadiusPreset::all_variants()
            .iter()
            .copied()
            .find(|p| p.whole_km() == km)
            .ok_or_else(|| {
                let allowed: Vec<String> = RadiusPreset::all_variants()
                    .iter()
                    .map(|p| p.whole_km().to_string())
                    .collect();
                format!("{} km is not a preset radius (allowed: {})", km, allowed.join(", "))
            })
    }
}

impl From<RadiusPreset> for u32 {
    fn from(preset: RadiusPreset) -> Self {
        preset.whole_km()
    }
}

impl std::fmt::Display for RadiusPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

/// What to do with candidates that have no coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnlocatedPolicy {
    /// Leave them out of the filtered set (default)
    #[default]
    Exclude,
    /// Keep them, unranked, after every located candidate
    AppendUnranked,
}

/// Anything that may carry a position
pub trait Located {
    fn coordinate(&self) -> Option<Coordinate>;
}

impl Located for Coordinate {
    fn coordinate(&self) -> Option<Coordinate> {
        Some(*self)
    }
}

/// A candidate together with its distance from the search origin
#[derive(Debug, Clone, PartialEq)]
pub struct Placed<T> {
    pub item: T,
    /// None for candidates kept under `UnlocatedPolicy::AppendUnranked`
    pub distance_km: Option<f64>,
}

impl<T> Placed<T> {
    pub fn distance_text(&self) -> Option<String> {
        self.distance_km.map(format_distance)
    }
}

/// Keep candidates within `radius_km` of `origin`
///
/// Located candidates keep their input order. Unlocated ones are either
/// dropped or appended after them, depending on `policy`.
pub fn filter_within_radius<T, I>(
    origin: Coordinate,
    candidates: I,
    radius_km: f64,
    policy: UnlocatedPolicy,
) -> Vec<Placed<T>>
where
    T: Located,
    I: IntoIterator<Item = T>,
{
    let mut located = Vec::new();
    let mut unlocated = Vec::new();

    for item in candidates {
        match item.coordinate() {
            Some(position) => {
                let distance = distance_km(origin, position);
                if distance <= radius_km {
                    located.push(Placed {
                        item,
                        distance_km: Some(distance),
                    });
                }
            }
            None if policy == UnlocatedPolicy::AppendUnranked => unlocated.push(Placed {
                item,
                distance_km: None,
            }),
            None => {}
        }
    }

    located.extend(unlocated);
    located
}

/// Sort nearest first; unranked entries stay at the end in their original order
pub fn rank_by_distance<T>(placed: &mut [Placed<T>]) {
    placed.sort_by(|a, b| match (a.distance_km, b.distance_km) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}

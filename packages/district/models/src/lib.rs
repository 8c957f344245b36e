#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Canonical district taxonomy for Barcelona.
//!
//! This crate defines the ten administrative districts used as the join
//! key between the rent and income datasets. Every data source normalizes
//! its raw district spellings into [`District`] before anything downstream
//! sees them. [`DistrictFilter`] adds the area-wide `"Barcelona"` value used
//! only as a filter, never as a data row value.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString, IntoStaticStr};

/// Name of the area-wide pseudo-district that means "no district filter".
pub const AREA_WIDE_NAME: &str = "Barcelona";

/// One of the ten administrative districts, spelled canonically.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
pub enum District {
    /// District 1
    #[serde(rename = "Ciutat Vella")]
    #[strum(to_string = "Ciutat Vella")]
    CiutatVella,
    /// District 2
    #[serde(rename = "Eixample")]
    #[strum(to_string = "Eixample")]
    Eixample,
    /// District 3
    #[serde(rename = "Sants-Montjuïc")]
    #[strum(to_string = "Sants-Montjuïc")]
    SantsMontjuic,
    /// District 4
    #[serde(rename = "Les Corts")]
    #[strum(to_string = "Les Corts")]
    LesCorts,
    /// District 5
    #[serde(rename = "Sarrià-Sant Gervasi")]
    #[strum(to_string = "Sarrià-Sant Gervasi")]
    SarriaSantGervasi,
    /// District 6
    #[serde(rename = "Gràcia")]
    #[strum(to_string = "Gràcia")]
    Gracia,
    /// District 7
    #[serde(rename = "Horta-Guinardó")]
    #[strum(to_string = "Horta-Guinardó")]
    HortaGuinardo,
    /// District 8
    #[serde(rename = "Nou Barris")]
    #[strum(to_string = "Nou Barris")]
    NouBarris,
    /// District 9
    #[serde(rename = "Sant Andreu")]
    #[strum(to_string = "Sant Andreu")]
    SantAndreu,
    /// District 10
    #[serde(rename = "Sant Martí")]
    #[strum(to_string = "Sant Martí")]
    SantMarti,
}

impl District {
    /// Returns the canonical, diacritic-correct spelling.
    #[must_use]
    pub fn canonical_name(self) -> &'static str {
        self.into()
    }

    /// Returns all districts in official numbering order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::CiutatVella,
            Self::Eixample,
            Self::SantsMontjuic,
            Self::LesCorts,
            Self::SarriaSantGervasi,
            Self::Gracia,
            Self::HortaGuinardo,
            Self::NouBarris,
            Self::SantAndreu,
            Self::SantMarti,
        ]
    }
}

/// District selector value: either the whole area or a single district.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DistrictFilter {
    /// `"Barcelona"`: every district is included.
    #[default]
    AreaWide,
    /// Only rows belonging to this district.
    District(District),
}

impl DistrictFilter {
    /// Returns `true` if a record from `district` passes this filter.
    #[must_use]
    pub fn matches(self, district: District) -> bool {
        match self {
            Self::AreaWide => true,
            Self::District(selected) => selected == district,
        }
    }

    /// Returns every selectable filter value, area-wide first.
    #[must_use]
    pub fn all() -> Vec<Self> {
        std::iter::once(Self::AreaWide)
            .chain(District::all().iter().copied().map(Self::District))
            .collect()
    }

    /// Display name used in titles and selectors.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::AreaWide => AREA_WIDE_NAME,
            Self::District(district) => district.canonical_name(),
        }
    }
}

impl std::fmt::Display for DistrictFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string is neither `"Barcelona"` nor a canonical
/// district name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDistrictError {
    /// The rejected value.
    pub value: String,
}

impl std::fmt::Display for UnknownDistrictError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown district '{}': expected '{AREA_WIDE_NAME}' or a canonical district name",
            self.value
        )
    }
}

impl std::error::Error for UnknownDistrictError {}

impl FromStr for DistrictFilter {
    type Err = UnknownDistrictError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == AREA_WIDE_NAME {
            return Ok(Self::AreaWide);
        }
        District::from_str(s)
            .map(Self::District)
            .map_err(|_| UnknownDistrictError {
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for DistrictFilter {
    type Error = UnknownDistrictError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DistrictFilter> for String {
    fn from(filter: DistrictFilter) -> Self {
        filter.name().to_string()
    }
}

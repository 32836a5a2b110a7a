#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Reference data types for the heat retrofit model.
//!
//! Everything in this crate describes the static tables the calculation
//! core reads: public housing developments, per-neighborhood (NTA)
//! climate and vulnerability records, the decade climate table,
//! per-development maintenance complaints, and the retrofit catalog with
//! its curated packages. Records are created once when the tables are
//! loaded and never mutated afterwards.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Identifier of a catalog retrofit (e.g. `"ac_electric"`).
pub type RetrofitId = String;

/// New York City borough a development or neighborhood belongs to.
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
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Borough {
    Manhattan,
    Brooklyn,
    Queens,
    Bronx,
    StatenIsland,
}

impl Borough {
    /// Human-readable borough name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Manhattan => "Manhattan",
            Self::Brooklyn => "Brooklyn",
            Self::Queens => "Queens",
            Self::Bronx => "Bronx",
            Self::StatenIsland => "Staten Island",
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Manhattan,
            Self::Brooklyn,
            Self::Queens,
            Self::Bronx,
            Self::StatenIsland,
        ]
    }
}

/// WGS84 point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A public housing development.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Development {
    /// Unique development identifier (e.g. `"BRV001"`).
    pub id: String,
    /// Development name.
    pub name: String,
    /// Street address of the management office.
    pub address: String,
    /// Borough the development is located in.
    pub borough: Borough,
    /// Location used to place the development on the map.
    pub coordinates: Coordinates,
    /// Year construction completed.
    pub year_built: u16,
    /// Number of residential buildings.
    pub building_count: u32,
    /// Number of dwelling units across all buildings.
    pub unit_count: u32,
    /// Neighborhood Tabulation Area code used to key climate and
    /// demographic data.
    pub nta: String,
    /// Whether verified site data and a 3D model exist for this
    /// development.
    #[serde(default)]
    pub has_detailed_data: bool,
}

/// Citywide summer climate for one decade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecadeClimate {
    /// Decade label (e.g. `"1950s"`).
    pub decade: String,
    /// Average summer temperature in °F.
    pub avg_summer_temp_f: f64,
    /// Average count of days reaching 90°F or more.
    pub days_over_90: u32,
    /// Average count of days reaching 100°F or more.
    pub days_over_100: u32,
}

/// Climate, demographic, and heat vulnerability data for one Neighborhood
/// Tabulation Area, as authored in the reference tables.
///
/// Some neighborhoods are missing a subset of the demographic fields;
/// those are `None` rather than zero so consumers can tell "unknown" from
/// "none".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NtaRecord {
    /// NTA code (e.g. `"BK35"`).
    pub code: String,
    /// Neighborhood name.
    pub name: String,
    pub borough: Borough,
    /// Heat Vulnerability Index, 1 (lowest risk) to 5 (highest).
    pub heat_vulnerability_index: u8,
    /// Asthma emergency department visits per 10,000 residents.
    pub asthma_rate: f64,
    /// Median household income in dollars.
    pub median_income: u32,
    pub population: Option<u32>,
    /// Share of residents aged 65 and over, in percent.
    pub pct_seniors: Option<f64>,
    /// Share of residents under 18, in percent.
    pub pct_youth: Option<f64>,
    /// Share of residents with a disability, in percent.
    pub pct_disabled: Option<f64>,
    /// Share of residents below the poverty line, in percent.
    pub poverty_rate: f64,
    /// Urban heat island adjustment added to the citywide baseline, in °F.
    pub uhi_adjustment_f: f64,
    /// Heat-related deaths recorded in the neighborhood.
    pub heat_deaths: u32,
}

/// The labeled decades for which per-neighborhood climate is derived.
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
    AsRefStr,
)]
pub enum ClimateEra {
    #[serde(rename = "1950s")]
    #[strum(serialize = "1950s")]
    Decade1950s,
    #[serde(rename = "1960s")]
    #[strum(serialize = "1960s")]
    Decade1960s,
    #[serde(rename = "1980s")]
    #[strum(serialize = "1980s")]
    Decade1980s,
    #[serde(rename = "2000s")]
    #[strum(serialize = "2000s")]
    Decade2000s,
    #[serde(rename = "2020s")]
    #[strum(serialize = "2020s")]
    Decade2020s,
    #[serde(rename = "2050s")]
    #[strum(serialize = "2050s")]
    Decade2050s,
}

impl ClimateEra {
    /// Decade label as it appears in the decade climate table.
    #[must_use]
    pub const fn decade_label(self) -> &'static str {
        match self {
            Self::Decade1950s => "1950s",
            Self::Decade1960s => "1960s",
            Self::Decade1980s => "1980s",
            Self::Decade2000s => "2000s",
            Self::Decade2020s => "2020s",
            Self::Decade2050s => "2050s",
        }
    }

    /// Returns all variants of this enum, oldest first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Decade1950s,
            Self::Decade1960s,
            Self::Decade1980s,
            Self::Decade2000s,
            Self::Decade2020s,
            Self::Decade2050s,
        ]
    }
}

/// Neighborhood climate for one [`ClimateEra`], derived from the decade
/// table plus the neighborhood's heat island adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EraClimate {
    pub era: ClimateEra,
    /// Citywide decade average plus the NTA heat island adjustment, in °F.
    pub peak_summer_temp_f: f64,
    /// Days reaching 90°F or more.
    pub extreme_heat_days: u32,
}

/// An [`NtaRecord`] together with its derived per-era climate.
///
/// Produced by the reference store's enrichment pass. The source record is
/// carried unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NtaProfile {
    pub record: NtaRecord,
    /// One entry per [`ClimateEra`], oldest first.
    pub eras: Vec<EraClimate>,
}

impl NtaProfile {
    /// Returns the derived climate for `era`, if it was computed.
    #[must_use]
    pub fn era(&self, era: ClimateEra) -> Option<&EraClimate> {
        self.eras.iter().find(|e| e.era == era)
    }
}

/// Five-year maintenance complaint totals for one development.
///
/// The heat, mold, and plumbing sub-counts are a subset of `total`, not an
/// exhaustive breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintRecord {
    pub development_id: String,
    pub total: u32,
    /// Complaints per 1,000 dwelling units.
    pub per_1000_units: u32,
    pub heat: u32,
    pub mold: u32,
    pub plumbing: u32,
}

/// How a retrofit's catalog cost scales to a specific development.
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
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CostBasis {
    /// Cost per dwelling unit.
    PerUnit,
    /// Cost per residential building.
    PerBuilding,
    /// Cost per square foot of floor area.
    PerSqft,
    /// Flat cost for the whole development.
    PerDevelopment,
}

/// Broad kind of physical intervention.
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
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RetrofitCategory {
    Cooling,
    Envelope,
    Mechanical,
    Site,
}

impl RetrofitCategory {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Cooling, Self::Envelope, Self::Mechanical, Self::Site]
    }
}

/// A dimension along which a building can be aligned with its climate.
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
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Dimension {
    Thermal = 0,
    Infrastructure = 1,
    Social = 2,
}

impl Dimension {
    /// Position of this dimension in alignment matrices.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Thermal, Self::Infrastructure, Self::Social]
    }
}

/// Where in the building model a retrofit is best shown.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ViewContext {
    Interior,
    Exterior,
    Roof,
    Site,
}

/// A catalog entry describing one possible physical intervention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Retrofit {
    pub id: RetrofitId,
    pub name: String,
    /// Low end of the cost range, in dollars per [`CostBasis`] unit. Used
    /// for all totals.
    pub cost_low: u64,
    /// High end of the cost range. Display only.
    pub cost_high: u64,
    pub cost_basis: CostBasis,
    /// Change in peak indoor temperature in °F. Negative is cooling.
    pub temp_delta_f: i32,
    /// Change in energy use in percent. Negative is a reduction.
    pub energy_delta_pct: i32,
    pub view: ViewContext,
    pub category: RetrofitCategory,
    /// Alignment dimensions this retrofit contributes to.
    pub improves: Vec<Dimension>,
    #[serde(default)]
    pub nature_based: bool,
    #[serde(default)]
    pub description: String,
}

impl Retrofit {
    /// Whether this retrofit lists `dimension` in its improvement tags.
    #[must_use]
    pub fn improves_dimension(&self, dimension: Dimension) -> bool {
        self.improves.contains(&dimension)
    }
}

/// A pair of retrofits that cannot be selected together.
///
/// Order is irrelevant: the reference store expands every pair into both
/// directions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionPair {
    pub a: RetrofitId,
    pub b: RetrofitId,
}

/// A named, curated bundle of retrofits.
///
/// The nominal figures are marketing estimates. Actual cost and impact
/// are always recomputed from [`RetrofitPackage::retrofits`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrofitPackage {
    pub id: String,
    pub name: String,
    /// Advertised cost per dwelling unit, in dollars.
    pub nominal_cost_per_unit: u64,
    /// Advertised peak indoor temperature reduction, in °F (positive).
    pub nominal_temp_reduction_f: i32,
    /// Member retrofits, in display order.
    pub retrofits: Vec<RetrofitId>,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub description: String,
}

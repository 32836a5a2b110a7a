#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Output types of the retrofit impact and climate alignment model.
//!
//! These are the values the calculation core hands to the presentation
//! layer: dollar costs, temperature and energy deltas, per-dimension
//! alignment statuses, and package summaries. They serialize to the JSON
//! shapes the browser front end consumes.

use std::collections::BTreeSet;

use heat_retrofit_reference_models::{Dimension, RetrofitCategory, RetrofitId};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// The set of retrofit IDs currently selected for a development.
///
/// Ordered so that serialization and iteration are deterministic; insertion
/// order carries no meaning.
pub type ActiveSet = BTreeSet<RetrofitId>;

/// Worst-case observed indoor temperature with no retrofits, in °F.
pub const BASELINE_PEAK_INDOOR_TEMP_F: i32 = 103;

/// Lowest peak indoor temperature shown to users, in °F. Computation is
/// never clamped.
pub const DISPLAY_PEAK_INDOOR_TEMP_FLOOR_F: i32 = 72;

/// Assumed floor area per dwelling unit, used by per-square-foot costs.
pub const SQFT_PER_UNIT: u64 = 850;

/// Time horizon used by the alignment classifier.
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
pub enum Era {
    /// The climate the building was designed for.
    DesignEra = 0,
    /// Forty years after construction.
    PlusForty = 1,
    /// Present day (2020s).
    Current = 2,
    /// Projected future (2050s).
    Projected = 3,
}

impl Era {
    /// Position of this era in alignment matrices.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Short label for timelines.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::DesignEra => "Design era",
            Self::PlusForty => "+40 years",
            Self::Current => "Today",
            Self::Projected => "2050s",
        }
    }

    /// Returns all variants of this enum, in chronological order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::DesignEra,
            Self::PlusForty,
            Self::Current,
            Self::Projected,
        ]
    }
}

/// How well a building matches its context in one dimension and era.
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
pub enum AlignmentStatus {
    Aligned,
    Strained,
    Misaligned,
}

impl AlignmentStatus {
    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Aligned => "Aligned",
            Self::Strained => "Strained",
            Self::Misaligned => "Misaligned",
        }
    }

    /// Hex color used for status badges and timeline segments.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Aligned => "#2e7d32",
            Self::Strained => "#f9a825",
            Self::Misaligned => "#c62828",
        }
    }
}

/// Low and high cost of one retrofit at one development, in dollars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostRange {
    pub low: u64,
    pub high: u64,
}

/// Aggregate effect of an active retrofit set on one development.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactSummary {
    /// Total investment in dollars, using the low end of each cost range.
    pub total_cost: u64,
    /// Sum of temperature deltas in °F.
    pub temp_delta_f: i32,
    /// Sum of energy-use deltas in percent.
    pub energy_delta_pct: i32,
    /// Baseline peak indoor temperature plus `temp_delta_f`. Not clamped.
    pub peak_indoor_temp_f: i32,
}

/// A curated package evaluated against a specific development.
///
/// `actual_*` fields are recomputed from the member retrofits; `nominal_*`
/// fields are the package's advertised figures. The two are reported side
/// by side and may disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageSummary {
    pub package_id: String,
    pub name: String,
    pub retrofits: Vec<RetrofitId>,
    pub actual_cost: u64,
    /// `actual_cost` divided by the development's unit count, rounded to
    /// the nearest dollar. Zero when the development has no units.
    pub actual_cost_per_unit: u64,
    pub actual_temp_delta_f: i32,
    pub actual_energy_delta_pct: i32,
    pub nominal_cost_per_unit: u64,
    pub nominal_temp_reduction_f: i32,
    /// Whether the recomputed cost per unit or temperature reduction
    /// differs from the advertised figures.
    pub diverges_from_nominal: bool,
}

/// Counts of active retrofits per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCoverage {
    pub cooling: usize,
    pub envelope: usize,
    pub mechanical: usize,
    pub site: usize,
    /// Number of active retrofits that resolved in the catalog.
    pub total: usize,
}

impl CategoryCoverage {
    /// Number of active retrofits in `category`.
    #[must_use]
    pub const fn count(&self, category: RetrofitCategory) -> usize {
        match category {
            RetrofitCategory::Cooling => self.cooling,
            RetrofitCategory::Envelope => self.envelope,
            RetrofitCategory::Mechanical => self.mechanical,
            RetrofitCategory::Site => self.site,
        }
    }

    /// At least one cooling retrofit is active.
    #[must_use]
    pub const fn has_cooling(&self) -> bool {
        self.cooling >= 1
    }

    /// At least two envelope retrofits are active.
    #[must_use]
    pub const fn has_envelope(&self) -> bool {
        self.envelope >= 2
    }

    /// At least one mechanical retrofit is active.
    #[must_use]
    pub const fn has_mechanical(&self) -> bool {
        self.mechanical >= 1
    }

    /// At least one site retrofit is active.
    #[must_use]
    pub const fn has_site(&self) -> bool {
        self.site >= 1
    }
}

/// Per-dimension improvement scores for the projected era.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImprovementScores {
    pub thermal: f64,
    pub infrastructure: f64,
    pub social: f64,
}

impl ImprovementScores {
    #[must_use]
    pub const fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Thermal => self.thermal,
            Dimension::Infrastructure => self.infrastructure,
            Dimension::Social => self.social,
        }
    }
}

/// Present-day inputs to the alignment classifier, resolved from
/// possibly-missing reference records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentConditions {
    pub heat_vulnerability_index: u8,
    pub complaints_per_1000_units: u32,
    pub pct_seniors: f64,
}

impl CurrentConditions {
    /// HVI assumed when the neighborhood has no record.
    pub const DEFAULT_HEAT_VULNERABILITY_INDEX: u8 = 3;
    /// Complaint rate assumed when the development has no record.
    pub const DEFAULT_COMPLAINTS_PER_1000_UNITS: u32 = 0;
    /// Senior share assumed when the neighborhood has no estimate.
    pub const DEFAULT_PCT_SENIORS: f64 = 0.0;
}

impl Default for CurrentConditions {
    fn default() -> Self {
        Self {
            heat_vulnerability_index: Self::DEFAULT_HEAT_VULNERABILITY_INDEX,
            complaints_per_1000_units: Self::DEFAULT_COMPLAINTS_PER_1000_UNITS,
            pct_seniors: Self::DEFAULT_PCT_SENIORS,
        }
    }
}

/// Alignment status for every (dimension, era) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignmentMatrix {
    /// Indexed by [`Dimension::index`], then [`Era::index`].
    pub statuses: [[AlignmentStatus; 4]; 3],
}

impl AlignmentMatrix {
    #[must_use]
    pub const fn get(&self, dimension: Dimension, era: Era) -> AlignmentStatus {
        self.statuses[dimension.index()][era.index()]
    }

    /// Statuses for one dimension across all eras.
    #[must_use]
    pub const fn row(&self, dimension: Dimension) -> &[AlignmentStatus; 4] {
        &self.statuses[dimension.index()]
    }
}

/// Full evaluation of a development under an active retrofit set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub development_id: String,
    pub active_retrofits: ActiveSet,
    pub impact: ImpactSummary,
    pub coverage: CategoryCoverage,
    pub scores: ImprovementScores,
    pub conditions: CurrentConditions,
    pub alignment: AlignmentMatrix,
    /// Headline gate: cooling, two or more envelope retrofits, and five or
    /// more retrofits overall. Coarser than the per-dimension rules and
    /// may disagree with them.
    pub comprehensively_aligned: bool,
}

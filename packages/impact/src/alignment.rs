//! Alignment Classifier.
//!
//! Assigns an [`AlignmentStatus`] per dimension per era:
//!
//! * design era: always aligned
//! * +40 years: always strained
//! * current: thresholds on present-day neighborhood and complaint data,
//!   independent of retrofits
//! * projected: improvement scores and category coverage of the active
//!   retrofit set
//!
//! The headline [`is_comprehensively_aligned`] gate uses its own, coarser
//! thresholds and can disagree with the projected-era statuses. Both are
//! kept as defined.

use heat_retrofit_impact_models::{
    ActiveSet, AlignmentMatrix, AlignmentStatus, CategoryCoverage, CurrentConditions, Era,
    ImprovementScores,
};
use heat_retrofit_reference::ReferenceData;
use heat_retrofit_reference_models::{
    ClimateEra, ComplaintRecord, Dimension, EraClimate, NtaProfile, Retrofit, RetrofitCategory,
};

use crate::selection::resolve;

/// HVI at or above which the current era is thermally misaligned.
pub const CURRENT_HVI_MISALIGNED: u8 = 4;
/// Complaints per 1,000 units above which the current era's
/// infrastructure is misaligned.
pub const CURRENT_COMPLAINT_RATE_MISALIGNED: u32 = 3000;
/// Senior share (percent) above which the current era is socially
/// misaligned.
pub const CURRENT_PCT_SENIORS_MISALIGNED: f64 = 22.0;

/// Weight a retrofit adds to the score of each dimension it improves.
#[must_use]
pub const fn category_weight(category: RetrofitCategory) -> f64 {
    match category {
        RetrofitCategory::Cooling => 2.0,
        RetrofitCategory::Envelope => 1.5,
        RetrofitCategory::Mechanical | RetrofitCategory::Site => 1.0,
    }
}

fn coverage_of<'a>(retrofits: impl Iterator<Item = &'a Retrofit>) -> CategoryCoverage {
    let mut coverage = CategoryCoverage::default();
    for retrofit in retrofits {
        match retrofit.category {
            RetrofitCategory::Cooling => coverage.cooling += 1,
            RetrofitCategory::Envelope => coverage.envelope += 1,
            RetrofitCategory::Mechanical => coverage.mechanical += 1,
            RetrofitCategory::Site => coverage.site += 1,
        }
        coverage.total += 1;
    }
    coverage
}

fn scores_of<'a>(retrofits: impl Iterator<Item = &'a Retrofit>) -> ImprovementScores {
    let mut scores = ImprovementScores::default();
    for retrofit in retrofits {
        let weight = category_weight(retrofit.category);
        for dimension in &retrofit.improves {
            match dimension {
                Dimension::Thermal => scores.thermal += weight,
                Dimension::Infrastructure => scores.infrastructure += weight,
                Dimension::Social => scores.social += weight,
            }
        }
    }
    scores
}

/// Counts active retrofits per category. Unknown IDs are not counted.
#[must_use]
pub fn category_coverage(data: &ReferenceData, active: &ActiveSet) -> CategoryCoverage {
    coverage_of(resolve(data, active))
}

/// Sums category weights of active retrofits for each dimension they
/// improve.
#[must_use]
pub fn improvement_scores(data: &ReferenceData, active: &ActiveSet) -> ImprovementScores {
    scores_of(resolve(data, active))
}

/// Resolves present-day classifier inputs, substituting the
/// [`CurrentConditions`] defaults for missing records or fields.
#[must_use]
pub fn current_conditions(
    nta: Option<&NtaProfile>,
    complaints: Option<&ComplaintRecord>,
) -> CurrentConditions {
    let defaults = CurrentConditions::default();
    CurrentConditions {
        heat_vulnerability_index: nta.map_or(defaults.heat_vulnerability_index, |n| {
            n.record.heat_vulnerability_index
        }),
        complaints_per_1000_units: complaints
            .map_or(defaults.complaints_per_1000_units, |c| c.per_1000_units),
        pct_seniors: nta
            .and_then(|n| n.record.pct_seniors)
            .unwrap_or(defaults.pct_seniors),
    }
}

fn classify_current(conditions: &CurrentConditions, dimension: Dimension) -> AlignmentStatus {
    let misaligned = match dimension {
        Dimension::Thermal => conditions.heat_vulnerability_index >= CURRENT_HVI_MISALIGNED,
        Dimension::Infrastructure => {
            conditions.complaints_per_1000_units > CURRENT_COMPLAINT_RATE_MISALIGNED
        }
        Dimension::Social => conditions.pct_seniors > CURRENT_PCT_SENIORS_MISALIGNED,
    };
    if misaligned {
        AlignmentStatus::Misaligned
    } else {
        AlignmentStatus::Strained
    }
}

fn classify_projected(
    dimension: Dimension,
    coverage: &CategoryCoverage,
    scores: &ImprovementScores,
) -> AlignmentStatus {
    let score = scores.get(dimension);
    match dimension {
        Dimension::Thermal => {
            if score >= 4.0 && coverage.has_cooling() && coverage.has_envelope() {
                AlignmentStatus::Aligned
            } else if score >= 2.0 || coverage.has_cooling() {
                AlignmentStatus::Strained
            } else {
                AlignmentStatus::Misaligned
            }
        }
        Dimension::Infrastructure => {
            if score >= 3.0 && coverage.has_mechanical() {
                AlignmentStatus::Aligned
            } else if score >= 1.5 {
                AlignmentStatus::Strained
            } else {
                AlignmentStatus::Misaligned
            }
        }
        Dimension::Social => {
            if score >= 2.0 || (coverage.has_site() && coverage.total >= 4) {
                AlignmentStatus::Aligned
            } else if score >= 0.5 {
                AlignmentStatus::Strained
            } else {
                AlignmentStatus::Misaligned
            }
        }
    }
}

/// Classifies one (dimension, era) pair from precomputed inputs.
#[must_use]
pub fn classify_with(
    conditions: &CurrentConditions,
    coverage: &CategoryCoverage,
    scores: &ImprovementScores,
    dimension: Dimension,
    era: Era,
) -> AlignmentStatus {
    match era {
        Era::DesignEra => AlignmentStatus::Aligned,
        Era::PlusForty => AlignmentStatus::Strained,
        Era::Current => classify_current(conditions, dimension),
        Era::Projected => classify_projected(dimension, coverage, scores),
    }
}

/// Classifies one (dimension, era) pair for the active retrofit set.
#[must_use]
pub fn classify(
    data: &ReferenceData,
    conditions: &CurrentConditions,
    dimension: Dimension,
    era: Era,
    active: &ActiveSet,
) -> AlignmentStatus {
    classify_with(
        conditions,
        &category_coverage(data, active),
        &improvement_scores(data, active),
        dimension,
        era,
    )
}

/// Classifies every (dimension, era) pair.
#[must_use]
pub fn alignment_matrix(
    conditions: &CurrentConditions,
    coverage: &CategoryCoverage,
    scores: &ImprovementScores,
) -> AlignmentMatrix {
    let mut statuses = [[AlignmentStatus::Aligned; 4]; 3];
    for &dimension in Dimension::all() {
        for &era in Era::all() {
            statuses[dimension.index()][era.index()] =
                classify_with(conditions, coverage, scores, dimension, era);
        }
    }
    AlignmentMatrix { statuses }
}

/// Headline gate: at least one cooling retrofit, at least two envelope
/// retrofits, and at least five retrofits in total.
#[must_use]
pub const fn is_comprehensively_aligned(coverage: &CategoryCoverage) -> bool {
    coverage.cooling >= 1 && coverage.envelope >= 2 && coverage.total >= 5
}

/// The neighborhood climate era that best represents `era` for a building
/// completed in `year_built`: the latest derived decade that starts on or
/// before the target year, falling back to the earliest.
#[must_use]
pub fn climate_era_for(era: Era, year_built: u16) -> ClimateEra {
    let target = match era {
        Era::DesignEra => year_built,
        Era::PlusForty => year_built.saturating_add(40),
        Era::Current => 2020,
        Era::Projected => 2050,
    };
    ClimateEra::all()
        .iter()
        .rev()
        .copied()
        .find(|e| decade_start(*e) <= target)
        .unwrap_or(ClimateEra::Decade1950s)
}

const fn decade_start(era: ClimateEra) -> u16 {
    match era {
        ClimateEra::Decade1950s => 1950,
        ClimateEra::Decade1960s => 1960,
        ClimateEra::Decade1980s => 1980,
        ClimateEra::Decade2000s => 2000,
        ClimateEra::Decade2020s => 2020,
        ClimateEra::Decade2050s => 2050,
    }
}

/// Derived neighborhood climate for `era`, for timeline displays.
#[must_use]
pub fn era_climate(profile: &NtaProfile, era: Era, year_built: u16) -> Option<&EraClimate> {
    profile.era(climate_era_for(era, year_built))
}

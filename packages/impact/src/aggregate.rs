//! Impact Aggregator.
//!
//! Temperature and energy deltas add linearly across the active set. No
//! diminishing returns are modeled, even for several retrofits in the same
//! category.

use heat_retrofit_impact_models::{
    ActiveSet, BASELINE_PEAK_INDOOR_TEMP_F, DISPLAY_PEAK_INDOOR_TEMP_FLOOR_F, ImpactSummary,
    PackageSummary,
};
use heat_retrofit_reference::ReferenceData;
use heat_retrofit_reference_models::{Development, RetrofitPackage};

use crate::cost::{cost_per_unit, retrofit_cost};
use crate::selection::resolve;

/// Totals cost, temperature, and energy effects of `active` at
/// `development`.
///
/// IDs missing from the catalog contribute nothing. An empty set yields
/// zero cost, zero deltas, and the baseline peak temperature.
#[must_use]
pub fn impact(data: &ReferenceData, development: &Development, active: &ActiveSet) -> ImpactSummary {
    let mut summary = ImpactSummary {
        total_cost: 0,
        temp_delta_f: 0,
        energy_delta_pct: 0,
        peak_indoor_temp_f: BASELINE_PEAK_INDOOR_TEMP_F,
    };

    for retrofit in resolve(data, active) {
        summary.total_cost += retrofit_cost(retrofit, development);
        summary.temp_delta_f += retrofit.temp_delta_f;
        summary.energy_delta_pct += retrofit.energy_delta_pct;
    }

    summary.peak_indoor_temp_f = BASELINE_PEAK_INDOOR_TEMP_F + summary.temp_delta_f;
    summary
}

/// Peak indoor temperature as shown to users, never below the display
/// floor.
#[must_use]
pub fn display_peak_indoor_temp(summary: &ImpactSummary) -> i32 {
    summary
        .peak_indoor_temp_f
        .max(DISPLAY_PEAK_INDOOR_TEMP_FLOOR_F)
}

/// Evaluates `package` at `development` from its member retrofits and
/// reports it next to the package's advertised figures.
#[must_use]
pub fn package_summary(
    data: &ReferenceData,
    package: &RetrofitPackage,
    development: &Development,
) -> PackageSummary {
    let members: ActiveSet = package.retrofits.iter().cloned().collect();
    let actual = impact(data, development, &members);
    let actual_cost_per_unit = cost_per_unit(actual.total_cost, development.unit_count);

    let diverges_from_nominal = actual_cost_per_unit != package.nominal_cost_per_unit
        || -actual.temp_delta_f != package.nominal_temp_reduction_f;

    if diverges_from_nominal {
        log::debug!(
            "Package {} at {}: actual ${actual_cost_per_unit}/unit, {}°F vs nominal ${}/unit, -{}°F",
            package.id,
            development.id,
            actual.temp_delta_f,
            package.nominal_cost_per_unit,
            package.nominal_temp_reduction_f
        );
    }

    PackageSummary {
        package_id: package.id.clone(),
        name: package.name.clone(),
        retrofits: package.retrofits.clone(),
        actual_cost: actual.total_cost,
        actual_cost_per_unit,
        actual_temp_delta_f: actual.temp_delta_f,
        actual_energy_delta_pct: actual.energy_delta_pct,
        nominal_cost_per_unit: package.nominal_cost_per_unit,
        nominal_temp_reduction_f: package.nominal_temp_reduction_f,
        diverges_from_nominal,
    }
}

/// Summaries of every curated package at `development`.
#[must_use]
pub fn package_summaries(data: &ReferenceData, development: &Development) -> Vec<PackageSummary> {
    data.packages()
        .iter()
        .map(|p| package_summary(data, p, development))
        .collect()
}

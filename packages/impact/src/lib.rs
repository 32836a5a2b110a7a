#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Retrofit impact and climate alignment model.
//!
//! Four pure components over the read-only [`ReferenceData`]:
//!
//! * [`cost`] scales catalog costs to a development
//! * [`selection`] applies toggle and package semantics to an
//!   [`ActiveSet`]
//! * [`aggregate`] totals cost, temperature, and energy effects
//! * [`alignment`] classifies each dimension in each era
//!
//! None of them read global state or return errors. Unknown IDs degrade to
//! a zero contribution so the presentation layer can call them on every
//! state change.

pub mod aggregate;
pub mod alignment;
pub mod cost;
pub mod selection;

use heat_retrofit_impact_models::{ActiveSet, Assessment};
use heat_retrofit_reference::ReferenceData;
use heat_retrofit_reference_models::Development;

/// Evaluates `development` under `active`: impact, current conditions,
/// the full alignment matrix, and the headline alignment gate.
#[must_use]
pub fn assess(data: &ReferenceData, development: &Development, active: &ActiveSet) -> Assessment {
    let conditions =
        alignment::current_conditions(data.nta_for(development), data.complaints(&development.id));
    let coverage = alignment::category_coverage(data, active);
    let scores = alignment::improvement_scores(data, active);

    Assessment {
        development_id: development.id.clone(),
        active_retrofits: active.clone(),
        impact: aggregate::impact(data, development, active),
        coverage,
        scores,
        conditions,
        alignment: alignment::alignment_matrix(&conditions, &coverage, &scores),
        comprehensively_aligned: alignment::is_comprehensively_aligned(&coverage),
    }
}

/// [`assess`] by development ID. `None` if the development is unknown.
#[must_use]
pub fn assess_by_id(
    data: &ReferenceData,
    development_id: &str,
    active: &ActiveSet,
) -> Option<Assessment> {
    data.development(development_id)
        .map(|development| assess(data, development, active))
}

//! Derived per-era neighborhood climate.
//!
//! The decade table holds citywide averages. Each neighborhood runs hotter
//! or cooler than the city by its urban heat island adjustment, so the
//! neighborhood's era temperature is the decade average plus that
//! adjustment. This pass runs once when the reference data is built and
//! produces new [`NtaProfile`] values; the input records are left as they
//! were.

use std::collections::BTreeMap;

use heat_retrofit_reference_models::{ClimateEra, DecadeClimate, EraClimate, NtaProfile, NtaRecord};

use crate::ReferenceError;

/// Builds the derived climate profile for a single neighborhood.
///
/// # Errors
///
/// Returns [`ReferenceError::UnknownDecade`] if the decade table has no
/// row for one of the [`ClimateEra`] labels.
pub fn enrich_nta(
    record: &NtaRecord,
    decades: &[DecadeClimate],
) -> Result<NtaProfile, ReferenceError> {
    let eras = ClimateEra::all()
        .iter()
        .map(|&era| {
            let label = era.decade_label();
            let decade = decades.iter().find(|d| d.decade == label).ok_or_else(|| {
                ReferenceError::UnknownDecade {
                    nta: record.code.clone(),
                    decade: label.to_string(),
                }
            })?;

            Ok(EraClimate {
                era,
                peak_summer_temp_f: decade.avg_summer_temp_f + record.uhi_adjustment_f,
                extreme_heat_days: decade.days_over_90,
            })
        })
        .collect::<Result<Vec<_>, ReferenceError>>()?;

    Ok(NtaProfile {
        record: record.clone(),
        eras,
    })
}

/// Builds profiles for every neighborhood, keyed by NTA code.
///
/// # Errors
///
/// Propagates the first [`enrich_nta`] failure.
pub fn enrich_all(
    records: &[NtaRecord],
    decades: &[DecadeClimate],
) -> Result<BTreeMap<String, NtaProfile>, ReferenceError> {
    records
        .iter()
        .map(|record| Ok((record.code.clone(), enrich_nta(record, decades)?)))
        .collect()
}

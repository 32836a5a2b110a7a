#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Reference Data Store for the heat retrofit model.
//!
//! All tables are TOML files embedded at compile time. They are parsed,
//! validated, and enriched once into a [`ReferenceData`] value that is
//! read-only for the rest of the process. [`reference()`] exposes a
//! process-wide instance built lazily on first use.
//!
//! Lookups never fail: a miss returns `None` (or an empty set) so the
//! calculation core can degrade to a neutral contribution.

pub mod enrich;
pub mod registry;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use heat_retrofit_reference_models::{
    Borough, ComplaintRecord, DecadeClimate, Development, NtaProfile, Retrofit, RetrofitCategory,
    RetrofitId, RetrofitPackage,
};
use thiserror::Error;

use crate::registry::{RawTables, TableSources};

/// Errors raised while building the reference data.
///
/// Every variant is a table authoring bug. The embedded tables are
/// checked by tests, so none of these occur at runtime.
#[derive(Debug, Error)]
pub enum ReferenceError {
    /// A table failed to parse.
    #[error("Failed to parse {table} table: {source}")]
    Toml {
        table: &'static str,
        #[source]
        source: toml::de::Error,
    },

    /// Two rows in one table share an ID.
    #[error("Duplicate {table} id: {id}")]
    DuplicateId { table: &'static str, id: String },

    /// A package or exclusion pair names a retrofit missing from the
    /// catalog.
    #[error("{context} references unknown retrofit '{id}'")]
    UnknownRetrofit { context: String, id: String },

    /// The decade table has no row for a derived era.
    #[error("NTA {nta}: no climate row for decade {decade}")]
    UnknownDecade { nta: String, decade: String },

    /// A package bundles two retrofits that exclude each other.
    #[error("Package {package} contains mutually exclusive retrofits '{a}' and '{b}'")]
    ConflictingPackage {
        package: String,
        a: String,
        b: String,
    },

    /// A row violates a table invariant.
    #[error("Invalid record: {message}")]
    InvalidRecord {
        /// Description of what went wrong.
        message: String,
    },
}

static REFERENCE: LazyLock<ReferenceData> = LazyLock::new(ReferenceData::embedded);

/// Returns the process-wide reference data built from the embedded tables.
///
/// # Panics
///
/// Panics on first use if the embedded tables are invalid. This is a
/// development error and is caught by tests.
#[must_use]
pub fn reference() -> &'static ReferenceData {
    &REFERENCE
}

/// Validated, enriched, read-only reference tables.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    developments: Vec<Development>,
    ntas: BTreeMap<String, NtaProfile>,
    decades: Vec<DecadeClimate>,
    complaints: BTreeMap<String, ComplaintRecord>,
    retrofits: Vec<Retrofit>,
    retrofit_index: BTreeMap<RetrofitId, usize>,
    exclusions: BTreeMap<RetrofitId, BTreeSet<RetrofitId>>,
    packages: Vec<RetrofitPackage>,
}

/// Shared empty set returned for retrofits without conflicts.
static NO_EXCLUSIONS: BTreeSet<RetrofitId> = BTreeSet::new();

impl ReferenceData {
    /// Builds the reference data from the tables compiled into the binary.
    ///
    /// # Panics
    ///
    /// Panics if any embedded table fails to parse or validate.
    #[must_use]
    pub fn embedded() -> Self {
        Self::from_sources(&registry::EMBEDDED)
            .unwrap_or_else(|e| panic!("Invalid embedded reference data: {e}"))
    }

    /// Parses, validates, and enriches the given table sources.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError`] if any table fails to parse or any
    /// cross-table invariant is violated.
    pub fn from_sources(sources: &TableSources<'_>) -> Result<Self, ReferenceError> {
        Self::from_tables(registry::parse_tables(sources)?)
    }

    /// Validates and enriches already-parsed tables.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError`] if any cross-table invariant is violated.
    pub fn from_tables(tables: RawTables) -> Result<Self, ReferenceError> {
        let RawTables {
            developments,
            ntas,
            decades,
            complaints,
            retrofits,
            exclusions: exclusion_pairs,
            packages,
        } = tables;

        ensure_unique("development", developments.iter().map(|d| d.id.as_str()))?;
        ensure_unique("nta", ntas.iter().map(|n| n.code.as_str()))?;
        ensure_unique("decade", decades.iter().map(|d| d.decade.as_str()))?;
        ensure_unique("complaint", complaints.iter().map(|c| c.development_id.as_str()))?;
        ensure_unique("retrofit", retrofits.iter().map(|r| r.id.as_str()))?;
        ensure_unique("package", packages.iter().map(|p| p.id.as_str()))?;

        for nta in &ntas {
            if !(1..=5).contains(&nta.heat_vulnerability_index) {
                return Err(ReferenceError::InvalidRecord {
                    message: format!(
                        "NTA {} has heat vulnerability index {} (expected 1-5)",
                        nta.code, nta.heat_vulnerability_index
                    ),
                });
            }
        }

        for complaint in &complaints {
            let categorized = u64::from(complaint.heat)
                + u64::from(complaint.mold)
                + u64::from(complaint.plumbing);
            if categorized > u64::from(complaint.total) {
                return Err(ReferenceError::InvalidRecord {
                    message: format!(
                        "Complaints for {}: heat + mold + plumbing ({categorized}) exceeds total ({})",
                        complaint.development_id, complaint.total
                    ),
                });
            }
        }

        for retrofit in &retrofits {
            if retrofit.cost_low > retrofit.cost_high {
                return Err(ReferenceError::InvalidRecord {
                    message: format!(
                        "Retrofit {} has cost_low {} above cost_high {}",
                        retrofit.id, retrofit.cost_low, retrofit.cost_high
                    ),
                });
            }
        }

        let retrofit_index: BTreeMap<RetrofitId, usize> = retrofits
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id.clone(), i))
            .collect();

        let mut exclusions: BTreeMap<RetrofitId, BTreeSet<RetrofitId>> = BTreeMap::new();
        for pair in &exclusion_pairs {
            for id in [&pair.a, &pair.b] {
                if !retrofit_index.contains_key(id) {
                    return Err(ReferenceError::UnknownRetrofit {
                        context: format!("Exclusion {} / {}", pair.a, pair.b),
                        id: id.clone(),
                    });
                }
            }
            if pair.a == pair.b {
                return Err(ReferenceError::InvalidRecord {
                    message: format!("Retrofit {} excludes itself", pair.a),
                });
            }
            exclusions
                .entry(pair.a.clone())
                .or_default()
                .insert(pair.b.clone());
            exclusions
                .entry(pair.b.clone())
                .or_default()
                .insert(pair.a.clone());
        }

        for package in &packages {
            for id in &package.retrofits {
                if !retrofit_index.contains_key(id) {
                    return Err(ReferenceError::UnknownRetrofit {
                        context: format!("Package {}", package.id),
                        id: id.clone(),
                    });
                }
            }
            for (i, a) in package.retrofits.iter().enumerate() {
                for b in &package.retrofits[i + 1..] {
                    if exclusions.get(a).is_some_and(|set| set.contains(b)) {
                        return Err(ReferenceError::ConflictingPackage {
                            package: package.id.clone(),
                            a: a.clone(),
                            b: b.clone(),
                        });
                    }
                }
            }
        }

        for development in &developments {
            if !ntas.iter().any(|n| n.code == development.nta) {
                log::warn!(
                    "Development {} references NTA {} which has no climate record",
                    development.id,
                    development.nta
                );
            }
        }

        let ntas = enrich::enrich_all(&ntas, &decades)?;
        let complaints = complaints
            .into_iter()
            .map(|c| (c.development_id.clone(), c))
            .collect();

        log::info!(
            "Loaded reference data: {} developments, {} NTAs, {} decades, {} retrofits, {} packages",
            developments.len(),
            ntas.len(),
            decades.len(),
            retrofits.len(),
            packages.len()
        );

        Ok(Self {
            developments,
            ntas,
            decades,
            complaints,
            retrofits,
            retrofit_index,
            exclusions,
            packages,
        })
    }

    /// All developments, in table order.
    #[must_use]
    pub fn developments(&self) -> &[Development] {
        &self.developments
    }

    /// Looks up a development by ID.
    #[must_use]
    pub fn development(&self, id: &str) -> Option<&Development> {
        let found = self.developments.iter().find(|d| d.id == id);
        if found.is_none() {
            log::debug!("Unknown development id: {id}");
        }
        found
    }

    /// Developments located in `borough`.
    pub fn developments_in(&self, borough: Borough) -> impl Iterator<Item = &Development> {
        self.developments
            .iter()
            .filter(move |d| d.borough == borough)
    }

    /// All neighborhood profiles, ordered by NTA code.
    pub fn ntas(&self) -> impl Iterator<Item = &NtaProfile> {
        self.ntas.values()
    }

    /// Looks up a neighborhood profile by NTA code.
    #[must_use]
    pub fn nta(&self, code: &str) -> Option<&NtaProfile> {
        let found = self.ntas.get(code);
        if found.is_none() {
            log::debug!("Unknown NTA code: {code}");
        }
        found
    }

    /// The neighborhood profile for a development, if its NTA is known.
    #[must_use]
    pub fn nta_for(&self, development: &Development) -> Option<&NtaProfile> {
        self.nta(&development.nta)
    }

    /// The citywide decade climate table, oldest first.
    #[must_use]
    pub fn decades(&self) -> &[DecadeClimate] {
        &self.decades
    }

    /// Looks up one decade row by label (e.g. `"2020s"`).
    #[must_use]
    pub fn decade(&self, label: &str) -> Option<&DecadeClimate> {
        self.decades.iter().find(|d| d.decade == label)
    }

    /// Complaint totals for a development.
    #[must_use]
    pub fn complaints(&self, development_id: &str) -> Option<&ComplaintRecord> {
        self.complaints.get(development_id)
    }

    /// The retrofit catalog, in table order.
    #[must_use]
    pub fn retrofits(&self) -> &[Retrofit] {
        &self.retrofits
    }

    /// Looks up a catalog retrofit by ID.
    #[must_use]
    pub fn retrofit(&self, id: &str) -> Option<&Retrofit> {
        self.retrofit_index.get(id).map(|&i| &self.retrofits[i])
    }

    /// Catalog retrofits in `category`.
    pub fn retrofits_in(&self, category: RetrofitCategory) -> impl Iterator<Item = &Retrofit> {
        self.retrofits
            .iter()
            .filter(move |r| r.category == category)
    }

    /// Retrofits that cannot be active together with `id`.
    ///
    /// Empty for retrofits without conflicts and for unknown IDs.
    #[must_use]
    pub fn exclusions(&self, id: &str) -> &BTreeSet<RetrofitId> {
        self.exclusions.get(id).unwrap_or(&NO_EXCLUSIONS)
    }

    /// All curated packages, in table order.
    #[must_use]
    pub fn packages(&self) -> &[RetrofitPackage] {
        &self.packages
    }

    /// Looks up a curated package by ID.
    #[must_use]
    pub fn package(&self, id: &str) -> Option<&RetrofitPackage> {
        self.packages.iter().find(|p| p.id == id)
    }
}

fn ensure_unique<'a>(
    table: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), ReferenceError> {
    let mut seen = BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ReferenceError::DuplicateId {
                table,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{EMBEDDED, parse_tables};
    use heat_retrofit_reference_models::ExclusionPair;

    #[test]
    fn embedded_reference_data_is_valid() {
        let data = ReferenceData::from_sources(&EMBEDDED).unwrap();
        assert_eq!(
            data.developments().len(),
            registry::EXPECTED_DEVELOPMENT_COUNT
        );
        assert_eq!(data.ntas().count(), registry::EXPECTED_NTA_COUNT);
        assert_eq!(data.retrofits().len(), registry::EXPECTED_RETROFIT_COUNT);
        assert_eq!(data.packages().len(), registry::EXPECTED_PACKAGE_COUNT);
    }

    #[test]
    fn global_reference_is_shared() {
        assert!(std::ptr::eq(reference(), reference()));
    }

    #[test]
    fn exclusion_map_is_symmetric() {
        let data = reference();
        for retrofit in data.retrofits() {
            for other in data.exclusions(&retrofit.id) {
                assert!(
                    data.exclusions(other).contains(&retrofit.id),
                    "{} excludes {other} but not the reverse",
                    retrofit.id
                );
            }
        }
    }

    #[test]
    fn envelope_and_triple_pane_exclude_each_other() {
        let data = reference();
        assert!(data.exclusions("envelope").contains("triple_pane"));
        assert!(data.exclusions("triple_pane").contains("envelope"));
    }

    #[test]
    fn lookups_miss_without_panicking() {
        let data = reference();
        assert!(data.development("NOPE01").is_none());
        assert!(data.nta("XX99").is_none());
        assert!(data.complaints("NOPE01").is_none());
        assert!(data.retrofit("flux_capacitor").is_none());
        assert!(data.package("nope").is_none());
        assert!(data.exclusions("flux_capacitor").is_empty());
    }

    #[test]
    fn brevoort_matches_reference_figures() {
        let data = reference();
        let brv = data.development("BRV001").unwrap();
        assert_eq!(brv.unit_count, 1338);
        assert_eq!(brv.building_count, 27);
        assert!(brv.has_detailed_data);
        assert_eq!(data.nta_for(brv).unwrap().record.heat_vulnerability_index, 5);
    }

    #[test]
    fn every_development_resolves_nta_and_complaints() {
        let data = reference();
        for dev in data.developments() {
            assert!(data.nta_for(dev).is_some(), "{} has no NTA profile", dev.id);
            assert!(
                data.complaints(&dev.id).is_some(),
                "{} has no complaint record",
                dev.id
            );
        }
    }

    #[test]
    fn complaint_rates_match_unit_counts() {
        let data = reference();
        for dev in data.developments() {
            let complaints = data.complaints(&dev.id).unwrap();
            let rate = f64::from(complaints.total) * 1000.0 / f64::from(dev.unit_count);
            assert!(
                (rate - f64::from(complaints.per_1000_units)).abs() <= 0.5,
                "{}: stored rate {} vs computed {rate:.1}",
                dev.id,
                complaints.per_1000_units
            );
            assert!(complaints.heat + complaints.mold + complaints.plumbing <= complaints.total);
        }
    }

    #[test]
    fn category_filter_covers_catalog() {
        let data = reference();
        let total: usize = RetrofitCategory::all()
            .iter()
            .map(|&c| data.retrofits_in(c).count())
            .sum();
        assert_eq!(total, data.retrofits().len());
        assert!(data.developments_in(Borough::Brooklyn).count() >= 2);
    }

    #[test]
    fn rejects_package_with_unknown_member() {
        let mut tables = parse_tables(&EMBEDDED).unwrap();
        tables.packages[0].retrofits.push("flux_capacitor".to_string());
        let err = ReferenceData::from_tables(tables).unwrap_err();
        assert!(
            matches!(&err, ReferenceError::UnknownRetrofit { id, .. } if id == "flux_capacitor"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn rejects_package_with_conflicting_members() {
        let mut tables = parse_tables(&EMBEDDED).unwrap();
        tables.packages[0].retrofits = vec!["envelope".to_string(), "triple_pane".to_string()];
        let err = ReferenceData::from_tables(tables).unwrap_err();
        assert!(
            matches!(err, ReferenceError::ConflictingPackage { .. }),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn rejects_exclusion_with_unknown_retrofit() {
        let mut tables = parse_tables(&EMBEDDED).unwrap();
        tables.exclusions.push(ExclusionPair {
            a: "ac_electric".to_string(),
            b: "flux_capacitor".to_string(),
        });
        assert!(matches!(
            ReferenceData::from_tables(tables),
            Err(ReferenceError::UnknownRetrofit { .. })
        ));
    }

    #[test]
    fn rejects_complaint_subcounts_above_total() {
        let mut tables = parse_tables(&EMBEDDED).unwrap();
        tables.complaints[0].heat = tables.complaints[0].total + 1;
        assert!(matches!(
            ReferenceData::from_tables(tables),
            Err(ReferenceError::InvalidRecord { .. })
        ));
    }

    #[test]
    fn rejects_complaint_subcounts_that_overflow_u32() {
        let mut tables = parse_tables(&EMBEDDED).unwrap();
        let complaint = &mut tables.complaints[0];
        complaint.total = 10;
        complaint.heat = u32::MAX;
        complaint.mold = 5;
        complaint.plumbing = 0;
        assert!(matches!(
            ReferenceData::from_tables(tables),
            Err(ReferenceError::InvalidRecord { .. })
        ));
    }

    #[test]
    fn rejects_out_of_range_hvi() {
        let mut tables = parse_tables(&EMBEDDED).unwrap();
        tables.ntas[0].heat_vulnerability_index = 6;
        assert!(matches!(
            ReferenceData::from_tables(tables),
            Err(ReferenceError::InvalidRecord { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_retrofit_ids() {
        let mut tables = parse_tables(&EMBEDDED).unwrap();
        let dup = tables.retrofits[0].clone();
        tables.retrofits.push(dup);
        assert!(matches!(
            ReferenceData::from_tables(tables),
            Err(ReferenceError::DuplicateId {
                table: "retrofit",
                ..
            })
        ));
    }
}

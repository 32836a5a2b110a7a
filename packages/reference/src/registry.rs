//! Compile-time registry of the reference tables.
//!
//! Each table is a TOML file in `data/` embedded via `include_str!`.
//! Editing a table only requires changing the TOML file; the expected
//! counts below are enforced by tests.

use heat_retrofit_reference_models::{
    ComplaintRecord, DecadeClimate, Development, ExclusionPair, NtaRecord, Retrofit,
    RetrofitPackage,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::ReferenceError;

#[cfg(test)]
pub(crate) const EXPECTED_DEVELOPMENT_COUNT: usize = 8;
#[cfg(test)]
pub(crate) const EXPECTED_NTA_COUNT: usize = 8;
#[cfg(test)]
pub(crate) const EXPECTED_DECADE_COUNT: usize = 14;
#[cfg(test)]
pub(crate) const EXPECTED_RETROFIT_COUNT: usize = 14;
#[cfg(test)]
pub(crate) const EXPECTED_PACKAGE_COUNT: usize = 4;

/// Raw TOML text for every reference table.
#[derive(Debug, Clone, Copy)]
pub struct TableSources<'a> {
    pub developments: &'a str,
    pub ntas: &'a str,
    pub climate: &'a str,
    pub complaints: &'a str,
    /// Retrofit catalog and its exclusion pairs.
    pub retrofits: &'a str,
    pub packages: &'a str,
}

/// The tables compiled into the binary.
pub const EMBEDDED: TableSources<'static> = TableSources {
    developments: include_str!("../data/developments.toml"),
    ntas: include_str!("../data/ntas.toml"),
    climate: include_str!("../data/climate.toml"),
    complaints: include_str!("../data/complaints.toml"),
    retrofits: include_str!("../data/retrofits.toml"),
    packages: include_str!("../data/packages.toml"),
};

/// Every table as parsed, before validation and enrichment.
#[derive(Debug, Clone, Default)]
pub struct RawTables {
    pub developments: Vec<Development>,
    pub ntas: Vec<NtaRecord>,
    pub decades: Vec<DecadeClimate>,
    pub complaints: Vec<ComplaintRecord>,
    pub retrofits: Vec<Retrofit>,
    pub exclusions: Vec<ExclusionPair>,
    pub packages: Vec<RetrofitPackage>,
}

#[derive(Deserialize)]
struct DevelopmentFile {
    #[serde(default)]
    development: Vec<Development>,
}

#[derive(Deserialize)]
struct NtaFile {
    #[serde(default)]
    nta: Vec<NtaRecord>,
}

#[derive(Deserialize)]
struct ClimateFile {
    #[serde(default)]
    decade: Vec<DecadeClimate>,
}

#[derive(Deserialize)]
struct ComplaintFile {
    #[serde(default)]
    complaint: Vec<ComplaintRecord>,
}

#[derive(Deserialize)]
struct RetrofitFile {
    #[serde(default)]
    retrofit: Vec<Retrofit>,
    #[serde(default)]
    exclusion: Vec<ExclusionPair>,
}

#[derive(Deserialize)]
struct PackageFile {
    #[serde(default)]
    package: Vec<RetrofitPackage>,
}

fn parse<T: DeserializeOwned>(table: &'static str, text: &str) -> Result<T, ReferenceError> {
    toml::de::from_str(text).map_err(|source| ReferenceError::Toml { table, source })
}

/// Parses every table in `sources`.
///
/// # Errors
///
/// Returns [`ReferenceError::Toml`] naming the first table that fails to
/// parse. An unrecognized enum value (such as a cost basis outside the
/// fixed set) is a parse failure.
pub fn parse_tables(sources: &TableSources<'_>) -> Result<RawTables, ReferenceError> {
    let developments: DevelopmentFile = parse("developments", sources.developments)?;
    let ntas: NtaFile = parse("ntas", sources.ntas)?;
    let climate: ClimateFile = parse("climate", sources.climate)?;
    let complaints: ComplaintFile = parse("complaints", sources.complaints)?;
    let retrofits: RetrofitFile = parse("retrofits", sources.retrofits)?;
    let packages: PackageFile = parse("packages", sources.packages)?;

    Ok(RawTables {
        developments: developments.development,
        ntas: ntas.nta,
        decades: climate.decade,
        complaints: complaints.complaint,
        retrofits: retrofits.retrofit,
        exclusions: retrofits.exclusion,
        packages: packages.package,
    })
}

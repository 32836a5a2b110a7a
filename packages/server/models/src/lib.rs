#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the heat retrofit server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the reference table types to allow independent evolution of the API
//! contract.

use std::collections::BTreeSet;

use heat_retrofit_impact_models::{
    AlignmentMatrix, Assessment, CategoryCoverage, CostRange, CurrentConditions, ImpactSummary,
    ImprovementScores, PackageSummary,
};
use heat_retrofit_reference_models::{
    Borough, ClimateEra, ComplaintRecord, CostBasis, DecadeClimate, Development, Dimension,
    EraClimate, NtaProfile, Retrofit, RetrofitCategory, RetrofitId, RetrofitPackage, ViewContext,
};
use heat_retrofit_session::{Action, AppState};
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// A public housing development as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDevelopment {
    pub id: String,
    pub name: String,
    pub address: String,
    pub borough: Borough,
    /// Human-readable borough name.
    pub borough_label: String,
    pub latitude: f64,
    pub longitude: f64,
    pub year_built: u16,
    pub building_count: u32,
    pub unit_count: u32,
    /// Neighborhood Tabulation Area code.
    pub nta: String,
    pub has_detailed_data: bool,
}

impl From<&Development> for ApiDevelopment {
    fn from(dev: &Development) -> Self {
        Self {
            id: dev.id.clone(),
            name: dev.name.clone(),
            address: dev.address.clone(),
            borough: dev.borough,
            borough_label: dev.borough.label().to_string(),
            latitude: dev.coordinates.latitude,
            longitude: dev.coordinates.longitude,
            year_built: dev.year_built,
            building_count: dev.building_count,
            unit_count: dev.unit_count,
            nta: dev.nta.clone(),
            has_detailed_data: dev.has_detailed_data,
        }
    }
}

/// Query parameters for the developments endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevelopmentQueryParams {
    /// Only developments in this borough.
    pub borough: Option<Borough>,
}

/// Query parameters for the retrofits endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrofitQueryParams {
    /// Only retrofits in this category.
    pub category: Option<RetrofitCategory>,
}

/// Derived neighborhood climate for one era.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEraClimate {
    pub era: ClimateEra,
    /// Decade average plus the neighborhood heat island adjustment, in °F.
    pub peak_summer_temp_f: f64,
    pub extreme_heat_days: u32,
}

impl From<&EraClimate> for ApiEraClimate {
    fn from(era: &EraClimate) -> Self {
        Self {
            era: era.era,
            peak_summer_temp_f: era.peak_summer_temp_f,
            extreme_heat_days: era.extreme_heat_days,
        }
    }
}

/// A neighborhood profile as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiNta {
    pub code: String,
    pub name: String,
    pub borough: Borough,
    /// Heat Vulnerability Index (1-5).
    pub heat_vulnerability_index: u8,
    pub asthma_rate: f64,
    pub median_income: u32,
    pub population: Option<u32>,
    pub pct_seniors: Option<f64>,
    pub pct_youth: Option<f64>,
    pub pct_disabled: Option<f64>,
    pub poverty_rate: f64,
    pub uhi_adjustment_f: f64,
    pub heat_deaths: u32,
    pub eras: Vec<ApiEraClimate>,
}

impl From<&NtaProfile> for ApiNta {
    fn from(profile: &NtaProfile) -> Self {
        let record = &profile.record;
        Self {
            code: record.code.clone(),
            name: record.name.clone(),
            borough: record.borough,
            heat_vulnerability_index: record.heat_vulnerability_index,
            asthma_rate: record.asthma_rate,
            median_income: record.median_income,
            population: record.population,
            pct_seniors: record.pct_seniors,
            pct_youth: record.pct_youth,
            pct_disabled: record.pct_disabled,
            poverty_rate: record.poverty_rate,
            uhi_adjustment_f: record.uhi_adjustment_f,
            heat_deaths: record.heat_deaths,
            eras: profile.eras.iter().map(ApiEraClimate::from).collect(),
        }
    }
}

/// Maintenance complaint counts for a development.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiComplaints {
    pub total: u32,
    pub per_1000_units: u32,
    pub heat: u32,
    pub mold: u32,
    pub plumbing: u32,
}

impl From<&ComplaintRecord> for ApiComplaints {
    fn from(record: &ComplaintRecord) -> Self {
        Self {
            total: record.total,
            per_1000_units: record.per_1000_units,
            heat: record.heat,
            mold: record.mold,
            plumbing: record.plumbing,
        }
    }
}

/// Response for `GET /api/developments/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDevelopmentDetail {
    pub development: ApiDevelopment,
    /// `None` when the development's NTA has no reference data.
    pub nta: Option<ApiNta>,
    pub complaints: Option<ApiComplaints>,
}

/// A retrofit catalog entry as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRetrofit {
    pub id: RetrofitId,
    pub name: String,
    pub cost_low: u64,
    pub cost_high: u64,
    pub cost_basis: CostBasis,
    pub temp_delta_f: i32,
    pub energy_delta_pct: i32,
    pub view: ViewContext,
    pub category: RetrofitCategory,
    pub improves: Vec<Dimension>,
    pub nature_based: bool,
    pub description: String,
    /// Retrofits that are deselected when this one is selected.
    pub excludes: Vec<RetrofitId>,
}

impl ApiRetrofit {
    /// Builds the API view of `retrofit` with its exclusion set.
    #[must_use]
    pub fn new(retrofit: &Retrofit, excludes: &BTreeSet<RetrofitId>) -> Self {
        Self {
            id: retrofit.id.clone(),
            name: retrofit.name.clone(),
            cost_low: retrofit.cost_low,
            cost_high: retrofit.cost_high,
            cost_basis: retrofit.cost_basis,
            temp_delta_f: retrofit.temp_delta_f,
            energy_delta_pct: retrofit.energy_delta_pct,
            view: retrofit.view,
            category: retrofit.category,
            improves: retrofit.improves.clone(),
            nature_based: retrofit.nature_based,
            description: retrofit.description.clone(),
            excludes: excludes.iter().cloned().collect(),
        }
    }
}

/// A curated package with its advertised figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPackage {
    pub id: String,
    pub name: String,
    pub tagline: String,
    pub description: String,
    pub retrofits: Vec<RetrofitId>,
    pub nominal_cost_per_unit: u64,
    pub nominal_temp_reduction_f: i32,
}

impl From<&RetrofitPackage> for ApiPackage {
    fn from(package: &RetrofitPackage) -> Self {
        Self {
            id: package.id.clone(),
            name: package.name.clone(),
            tagline: package.tagline.clone(),
            description: package.description.clone(),
            retrofits: package.retrofits.clone(),
            nominal_cost_per_unit: package.nominal_cost_per_unit,
            nominal_temp_reduction_f: package.nominal_temp_reduction_f,
        }
    }
}

/// Citywide climate for one decade.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDecade {
    pub decade: String,
    pub avg_summer_temp_f: f64,
    pub days_over_90: u32,
    pub days_over_100: u32,
}

impl From<&DecadeClimate> for ApiDecade {
    fn from(decade: &DecadeClimate) -> Self {
        Self {
            decade: decade.decade.clone(),
            avg_summer_temp_f: decade.avg_summer_temp_f,
            days_over_90: decade.days_over_90,
            days_over_100: decade.days_over_100,
        }
    }
}

/// Package summaries recomputed at one development.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDevelopmentPackages {
    pub development_id: String,
    pub packages: Vec<PackageSummary>,
}

/// Body of `POST /api/impact`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactRequest {
    pub development_id: String,
    /// Active retrofit IDs. Unknown IDs contribute nothing.
    #[serde(default)]
    pub retrofits: Vec<RetrofitId>,
    /// Package whose members replace `retrofits` when set.
    #[serde(default)]
    pub package: Option<String>,
}

/// Display cost range of one active retrofit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCostRange {
    pub retrofit_id: RetrofitId,
    pub low: u64,
    pub high: u64,
}

impl ApiCostRange {
    #[must_use]
    pub fn new(retrofit_id: &str, range: CostRange) -> Self {
        Self {
            retrofit_id: retrofit_id.to_string(),
            low: range.low,
            high: range.high,
        }
    }
}

/// Response for `POST /api/impact`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactResponse {
    pub development_id: String,
    pub active_retrofits: Vec<RetrofitId>,
    pub impact: ImpactSummary,
    /// Peak indoor temperature clamped to the display floor.
    pub display_peak_indoor_temp_f: i32,
    pub coverage: CategoryCoverage,
    pub scores: ImprovementScores,
    pub conditions: CurrentConditions,
    pub alignment: AlignmentMatrix,
    pub comprehensively_aligned: bool,
    pub cost_ranges: Vec<ApiCostRange>,
}

impl ImpactResponse {
    /// Flattens `assessment` into the response shape.
    #[must_use]
    pub fn new(
        assessment: Assessment,
        display_peak_indoor_temp_f: i32,
        cost_ranges: Vec<ApiCostRange>,
    ) -> Self {
        Self {
            development_id: assessment.development_id,
            active_retrofits: assessment.active_retrofits.into_iter().collect(),
            impact: assessment.impact,
            display_peak_indoor_temp_f,
            coverage: assessment.coverage,
            scores: assessment.scores,
            conditions: assessment.conditions,
            alignment: assessment.alignment,
            comprehensively_aligned: assessment.comprehensively_aligned,
            cost_ranges,
        }
    }
}

/// Body of `POST /api/state/reduce`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReduceRequest {
    /// State to apply the action to. Omitted means the initial state.
    #[serde(default)]
    pub state: AppState,
    pub action: Action,
}

/// Response for `POST /api/state/reduce`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReduceResponse {
    pub state: AppState,
    /// Assessment of the selected development, if one is selected.
    pub evaluation: Option<Assessment>,
}

//! HTTP handler functions for the heat retrofit API.

use actix_web::{HttpResponse, web};
use heat_retrofit_impact::{aggregate, cost, selection};
use heat_retrofit_impact_models::ActiveSet;
use heat_retrofit_reference::ReferenceData;
use heat_retrofit_reference_models::Development;
use heat_retrofit_server_models::{
    ApiComplaints, ApiCostRange, ApiDecade, ApiDevelopment, ApiDevelopmentDetail,
    ApiDevelopmentPackages, ApiHealth, ApiNta, ApiPackage, ApiRetrofit, DevelopmentQueryParams,
    ImpactRequest, ImpactResponse, ReduceRequest, ReduceResponse, RetrofitQueryParams,
};

use crate::{AppState, ServerError};

fn find_development<'a>(data: &'a ReferenceData, id: &str) -> Result<&'a Development, ServerError> {
    data.development(id)
        .ok_or_else(|| ServerError::UnknownDevelopment(id.to_string()))
}

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/developments`
///
/// Lists developments, optionally limited to one borough.
pub async fn developments(
    state: web::Data<AppState>,
    params: web::Query<DevelopmentQueryParams>,
) -> HttpResponse {
    let data = state.reference;
    let developments: Vec<ApiDevelopment> = match params.borough {
        Some(borough) => data
            .developments_in(borough)
            .map(ApiDevelopment::from)
            .collect(),
        None => data
            .developments()
            .iter()
            .map(ApiDevelopment::from)
            .collect(),
    };

    HttpResponse::Ok().json(developments)
}

/// `GET /api/developments/{id}`
///
/// Returns the development with its neighborhood profile and complaint
/// counts.
pub async fn development(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ServerError> {
    let data = state.reference;
    let dev = find_development(data, &path)?;

    Ok(HttpResponse::Ok().json(ApiDevelopmentDetail {
        development: ApiDevelopment::from(dev),
        nta: data.nta_for(dev).map(ApiNta::from),
        complaints: data.complaints(&dev.id).map(ApiComplaints::from),
    }))
}

/// `GET /api/developments/{id}/packages`
///
/// Recomputes every curated package at the development.
pub async fn development_packages(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ServerError> {
    let data = state.reference;
    let dev = find_development(data, &path)?;

    Ok(HttpResponse::Ok().json(ApiDevelopmentPackages {
        development_id: dev.id.clone(),
        packages: aggregate::package_summaries(data, dev),
    }))
}

/// `GET /api/retrofits`
///
/// Lists the retrofit catalog, optionally limited to one category.
pub async fn retrofits(
    state: web::Data<AppState>,
    params: web::Query<RetrofitQueryParams>,
) -> HttpResponse {
    let data = state.reference;
    let retrofits: Vec<ApiRetrofit> = data
        .retrofits()
        .iter()
        .filter(|r| params.category.is_none_or(|c| r.category == c))
        .map(|r| ApiRetrofit::new(r, data.exclusions(&r.id)))
        .collect();

    HttpResponse::Ok().json(retrofits)
}

/// `GET /api/packages`
pub async fn packages(state: web::Data<AppState>) -> HttpResponse {
    let packages: Vec<ApiPackage> = state
        .reference
        .packages()
        .iter()
        .map(ApiPackage::from)
        .collect();

    HttpResponse::Ok().json(packages)
}

/// `GET /api/climate/decades`
pub async fn decades(state: web::Data<AppState>) -> HttpResponse {
    let decades: Vec<ApiDecade> = state
        .reference
        .decades()
        .iter()
        .map(ApiDecade::from)
        .collect();

    HttpResponse::Ok().json(decades)
}

/// `GET /api/ntas/{code}`
pub async fn nta(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ServerError> {
    let code = path.into_inner();
    let profile = state
        .reference
        .nta(&code)
        .ok_or(ServerError::UnknownNta(code))?;

    Ok(HttpResponse::Ok().json(ApiNta::from(profile)))
}

/// `POST /api/impact`
///
/// Evaluates a selection at a development. A `package` in the body
/// replaces `retrofits` with the package's members.
pub async fn impact(
    state: web::Data<AppState>,
    body: web::Json<ImpactRequest>,
) -> Result<HttpResponse, ServerError> {
    let data = state.reference;
    let request = body.into_inner();
    let dev = find_development(data, &request.development_id)?;

    let active: ActiveSet = match &request.package {
        Some(package_id) => {
            if data.package(package_id).is_none() {
                return Err(ServerError::UnknownPackage(package_id.clone()));
            }
            selection::select_package(data, &ActiveSet::new(), package_id)
        }
        None => request.retrofits.into_iter().collect(),
    };

    let cost_ranges: Vec<ApiCostRange> = selection::resolve(data, &active)
        .map(|r| ApiCostRange::new(&r.id, cost::cost_range(r, dev)))
        .collect();

    let assessment = heat_retrofit_impact::assess(data, dev, &active);
    let display_peak = aggregate::display_peak_indoor_temp(&assessment.impact);

    Ok(HttpResponse::Ok().json(ImpactResponse::new(
        assessment,
        display_peak,
        cost_ranges,
    )))
}

/// `POST /api/state/reduce`
///
/// Applies one action to a client-held state and returns the next state
/// with its evaluation.
pub async fn reduce_state(
    state: web::Data<AppState>,
    body: web::Json<ReduceRequest>,
) -> HttpResponse {
    let data = state.reference;
    let request = body.into_inner();
    let next = heat_retrofit_session::reduce(data, &request.state, &request.action);
    let evaluation = heat_retrofit_session::evaluate(data, &next);

    HttpResponse::Ok().json(ReduceResponse {
        state: next,
        evaluation,
    })
}

#[cfg(test)]
mod tests {
    use actix_web::{App, http::StatusCode, test, web};
    use heat_retrofit_impact_models::{AlignmentStatus, Era};
    use heat_retrofit_reference::reference;
    use heat_retrofit_reference_models::Dimension;
    use heat_retrofit_server_models::{
        ApiDevelopment, ApiDevelopmentDetail, ApiDevelopmentPackages, ApiHealth, ApiNta,
        ApiRetrofit, ImpactResponse, ReduceResponse,
    };
    use heat_retrofit_session::SelectionMode;

    use crate::{AppState, configure};

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(AppState {
                        reference: reference(),
                    }))
                    .configure(configure),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn health_reports_healthy() {
        let app = app!();
        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: ApiHealth = test::call_and_read_body_json(&app, req).await;
        assert!(body.healthy);
    }

    #[actix_web::test]
    async fn lists_all_developments() {
        let app = app!();
        let req = test::TestRequest::get().uri("/api/developments").to_request();
        let body: Vec<ApiDevelopment> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.len(), reference().developments().len());
    }

    #[actix_web::test]
    async fn filters_developments_by_borough() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/api/developments?borough=brooklyn")
            .to_request();
        let body: Vec<ApiDevelopment> = test::call_and_read_body_json(&app, req).await;
        assert!(!body.is_empty());
        assert!(body.iter().all(|d| d.borough_label == "Brooklyn"));
    }

    #[actix_web::test]
    async fn development_detail_includes_profile_and_complaints() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/api/developments/BRV001")
            .to_request();
        let body: ApiDevelopmentDetail = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.development.unit_count, 1338);
        let nta = body.nta.unwrap();
        assert_eq!(nta.code, "BK35");
        assert_eq!(nta.eras.len(), 6);
        assert_eq!(body.complaints.unwrap().per_1000_units, 3372);
    }

    #[actix_web::test]
    async fn unknown_development_is_not_found() {
        let app = app!();
        for uri in ["/api/developments/NOPE01", "/api/developments/NOPE01/packages"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
            let body: serde_json::Value = test::read_body_json(resp).await;
            assert!(body["error"].as_str().unwrap().contains("NOPE01"));
        }
    }

    #[actix_web::test]
    async fn retrofits_carry_exclusions() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/api/retrofits?category=envelope")
            .to_request();
        let body: Vec<ApiRetrofit> = test::call_and_read_body_json(&app, req).await;
        let envelope = body.iter().find(|r| r.id == "envelope").unwrap();
        assert_eq!(
            envelope.excludes,
            vec!["advanced_insulation".to_string(), "triple_pane".to_string()]
        );
        assert!(body.iter().all(|r| r.id != "ac_electric"));
    }

    #[actix_web::test]
    async fn nta_lookup() {
        let app = app!();
        let req = test::TestRequest::get().uri("/api/ntas/BK35").to_request();
        let body: ApiNta = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.heat_vulnerability_index, 5);

        let req = test::TestRequest::get().uri("/api/ntas/ZZ99").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn impact_for_emergency_relief() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/impact")
            .set_json(serde_json::json!({
                "developmentId": "BRV001",
                "retrofits": ["ac_electric", "cool_roof", "flux_capacitor"]
            }))
            .to_request();
        let body: ImpactResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.impact.total_cost, 12_443_400);
        assert_eq!(body.impact.peak_indoor_temp_f, 77);
        assert_eq!(body.display_peak_indoor_temp_f, 77);
        assert_eq!(body.cost_ranges.len(), 2);
        assert_eq!(
            body.alignment.get(Dimension::Thermal, Era::Current),
            AlignmentStatus::Misaligned
        );
        assert!(!body.comprehensively_aligned);
    }

    #[actix_web::test]
    async fn impact_by_package_matches_members() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/impact")
            .set_json(serde_json::json!({
                "developmentId": "BRV001",
                "package": "climate_ready"
            }))
            .to_request();
        let body: ImpactResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.impact.total_cost, 42_892_700);
        assert_eq!(body.active_retrofits.len(), 6);

        let req = test::TestRequest::post()
            .uri("/api/impact")
            .set_json(serde_json::json!({
                "developmentId": "BRV001",
                "package": "nope"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn development_packages_are_recomputed() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/api/developments/BRV001/packages")
            .to_request();
        let body: ApiDevelopmentPackages = test::call_and_read_body_json(&app, req).await;
        let climate_ready = body
            .packages
            .iter()
            .find(|p| p.package_id == "climate_ready")
            .unwrap();
        assert_eq!(climate_ready.actual_cost_per_unit, 32_057);
        assert!(climate_ready.diverges_from_nominal);
    }

    #[actix_web::test]
    async fn reduce_applies_action_and_evaluates() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/state/reduce")
            .set_json(serde_json::json!({
                "action": {"type": "select_development", "id": "BRV001"}
            }))
            .to_request();
        let body: ReduceResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.state.development_id.as_deref(), Some("BRV001"));
        assert_eq!(body.evaluation.unwrap().impact.peak_indoor_temp_f, 103);

        let req = test::TestRequest::post()
            .uri("/api/state/reduce")
            .set_json(serde_json::json!({
                "state": body.state,
                "action": {"type": "select_package", "id": "emergency"}
            }))
            .to_request();
        let body: ReduceResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            body.state.mode,
            SelectionMode::Package {
                id: "emergency".to_string()
            }
        );
        assert_eq!(body.evaluation.unwrap().impact.total_cost, 12_443_400);
    }
}

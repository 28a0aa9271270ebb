use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{BoxError, Json, Router};
use geojson::FeatureCollection;
use lakbay::TripPlanner;
use lakbay_core::prelude::*;
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower::timeout::TimeoutLayer;
use tower::timeout::error::Elapsed;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::config::HttpConfig;
use crate::error::ApiError;

pub fn create_router(planner: TripPlanner, http: &HttpConfig) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(handle_middleware_error))
        .layer(TimeoutLayer::new(Duration::from_secs(http.request_timeout_secs)))
        .layer(GlobalConcurrencyLimitLayer::new(http.concurrency_limit));

    Router::new()
        .route("/health", get(health))
        .route("/api/routes", get(list_routes))
        .route("/api/routes/{id}", get(route_geojson))
        .route("/api/stops", get(list_stops))
        .route("/api/route", post(find_route))
        .route("/api/routes/search", post(search_routes))
        .route("/api/directions", post(directions))
        .layer(middleware)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(planner)
}

async fn handle_middleware_error(err: BoxError) -> ApiError {
    if err.is::<Elapsed>() {
        ApiError::Timeout
    } else {
        ApiError::Internal(err.to_string())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RouteSummary {
    id: RouteId,
    route_number: String,
    time_period: String,
    area: String,
    name: String,
    color: String,
    description: String,
    stop_count: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RouteRequest {
    origin: Coordinate,
    destination: Coordinate,
    max_transfers: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest {
    origin: Coordinate,
    destination: Coordinate,
    max_results: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
struct DirectionsResponse {
    lines: Vec<String>,
}

async fn health() -> &'static str {
    "OK"
}

async fn list_routes(State(planner): State<TripPlanner>) -> Json<Vec<RouteSummary>> {
    let snapshot = planner.snapshot();
    let routes = snapshot
        .routes()
        .iter()
        .map(|route| RouteSummary {
            id: route.id.clone(),
            route_number: route.route_number.clone(),
            time_period: route.time_period.clone(),
            area: route.area.clone(),
            name: route.name.clone(),
            color: route.color.clone(),
            description: route.description.clone(),
            stop_count: snapshot.route_stops(&route.id).len(),
        })
        .collect();
    Json(routes)
}

async fn route_geojson(
    State(planner): State<TripPlanner>,
    Path(id): Path<String>,
) -> Result<Json<FeatureCollection>, ApiError> {
    Ok(Json(planner.route_geojson(&id)?))
}

async fn list_stops(State(planner): State<TripPlanner>) -> Json<Vec<Stop>> {
    Json(planner.snapshot().stops().to_vec())
}

fn check_coordinate(label: &str, c: Coordinate) -> Result<(), ApiError> {
    if (-90.0..=90.0).contains(&c.lat) && (-180.0..=180.0).contains(&c.lng) {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!(
            "{label} ({}, {}) is not a valid coordinate",
            c.lat, c.lng
        )))
    }
}

async fn find_route(
    State(planner): State<TripPlanner>,
    Json(request): Json<RouteRequest>,
) -> Result<Json<Itinerary>, ApiError> {
    check_coordinate("origin", request.origin)?;
    check_coordinate("destination", request.destination)?;
    let max_transfers = request
        .max_transfers
        .unwrap_or(planner.config().max_transfers);

    ItineraryFinder::new(planner.snapshot(), planner.config().clone())
        .find_route(request.origin, request.destination, max_transfers)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("No route found".to_string()))
}

async fn search_routes(
    State(planner): State<TripPlanner>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<Vec<Itinerary>>, ApiError> {
    check_coordinate("origin", request.origin)?;
    check_coordinate("destination", request.destination)?;
    let max_results = request.max_results.unwrap_or(planner.config().max_results);

    // The exhaustive search fans out over rayon, keep it off the async workers
    let found = tokio::task::spawn_blocking(move || {
        ItineraryFinder::new(planner.snapshot(), planner.config().clone()).find_all_routes(
            request.origin,
            request.destination,
            max_results,
        )
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))?;

    debug!("Search returned {} itineraries", found.len());
    Ok(Json(found))
}

async fn directions(Json(itinerary): Json<Itinerary>) -> Json<DirectionsResponse> {
    Json(DirectionsResponse {
        lines: get_route_directions(&itinerary),
    })
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;

    const ROUTES: &str = r##"[
      {
        "routeNumber": "1", "timePeriod": "AM", "area": "Poblacion",
        "color": "#e53935", "displayName": "Route 1",
        "points": [
          { "name": "Roxas Avenue", "lat": 7.071, "lng": 125.612 },
          { "name": "San Pedro", "lat": 7.070, "lng": 125.608 },
          { "name": "Bankerohan Market", "lat": 7.068, "lng": 125.604 }
        ]
      },
      {
        "routeNumber": "2", "timePeriod": "AM", "area": "Ma-a",
        "color": "#1e88e5", "displayName": "Route 2",
        "points": [
          { "name": "Bankerohan Market", "lat": 7.068, "lng": 125.604 },
          { "name": "Ma-a Road", "lat": 7.090, "lng": 125.590 }
        ]
      }
    ]"##;

    fn app() -> Router {
        let definitions = parse_route_definitions(ROUTES, "test").unwrap();
        let planner = TripPlanner::new(build_snapshot(&definitions), RoutingConfig::default());
        create_router(planner, &HttpConfig::default())
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app().oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_list_routes_and_stops() {
        let (status, body) = send(get_request("/api/routes")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);
        assert_eq!(body[0]["id"], "1-AM");
        assert_eq!(body[0]["stopCount"], 3);

        let (status, body) = send(get_request("/api/stops")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_route_geojson() {
        let (status, body) = send(get_request("/api/routes/2-AM")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["type"], "FeatureCollection");
        assert_eq!(body["features"].as_array().unwrap().len(), 3);

        let (status, body) = send(get_request("/api/routes/9-PM")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("9-PM"));
    }

    #[tokio::test]
    async fn test_find_route_with_transfer() {
        let request = json!({
            "origin": { "lat": 7.071, "lng": 125.612 },
            "destination": { "lat": 7.090, "lng": 125.590 }
        });
        let (status, body) = send(post_json("/api/route", &request)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["type"], "transfer");
        assert_eq!(body["transferStops"][0]["name"], "Bankerohan Market");

        let request = json!({
            "origin": { "lat": 7.071, "lng": 125.612 },
            "destination": { "lat": 7.090, "lng": 125.590 },
            "maxTransfers": 0
        });
        let (status, _) = send(post_json("/api/route", &request)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_coordinate() {
        let request = json!({
            "origin": { "lat": 97.0, "lng": 125.612 },
            "destination": { "lat": 7.090, "lng": 125.590 }
        });
        let (status, body) = send(post_json("/api/route", &request)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("origin"));
    }

    #[tokio::test]
    async fn test_search_and_directions() {
        let request = json!({
            "origin": { "lat": 7.071, "lng": 125.612 },
            "destination": { "lat": 7.068, "lng": 125.604 },
            "maxResults": 1
        });
        let (status, body) = send(post_json("/api/routes/search", &request)).await;
        assert_eq!(status, StatusCode::OK);
        let found = body.as_array().unwrap();
        assert_eq!(found.len(), 1);

        let (status, body) = send(post_json("/api/directions", &found[0])).await;
        assert_eq!(status, StatusCode::OK);
        let first_line = body["lines"][0].as_str().unwrap();
        assert!(first_line.starts_with("Board Route 1 at "));
        assert!(body["lines"].as_array().unwrap().last().unwrap() == "Get off at Bankerohan Market");
    }
}

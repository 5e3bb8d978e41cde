//! End-to-end tests: HTTP API through the SDK client, providers mocked.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use saferoute::lifecycle::{build_service, Shutdown};
use saferoute::HttpServer;
use sdk_rust::{Coordinate, SafeRouteClient, SosRequest};
use tokio::task::JoinHandle;

mod common;
use common::RecordedRequest;

const ADDRESS: &str = "2150 U.S. 93 S, Kalispell, MT 59901";
const ORIGIN: Coordinate = Coordinate { lat: 48.1935, lon: -114.3128 };
const DESTINATION: Coordinate = Coordinate { lat: 48.1978, lon: -114.326 };

const GEOCODE: &str = r#"[{"lat":"48.1935","lon":"-114.3128"}]"#;
const SCHOOLS: &str = r#"{"elements":[
    {"type":"node","lat":48.23,"lon":-114.35},
    {"type":"way","center":{"lat":48.1978,"lon":-114.326}}
]}"#;
const AT_RISK_WAY: &str = r#"{"elements":[
    {"type":"way","tags":{"name":"5th Ave W"},
     "geometry":[{"lat":48.1975,"lon":-114.32},{"lat":48.194,"lon":-114.3188}]}
]}"#;
const STREETS: &str = r#"{"elements":[
    {"type":"way","tags":{"name":"Main St"},"geometry":[{"lat":48.19,"lon":-114.31},{"lat":48.2,"lon":-114.31}]},
    {"type":"way","tags":{"name":"1st Ave E"},"geometry":[{"lat":48.19,"lon":-114.30},{"lat":48.2,"lon":-114.30}]},
    {"type":"way","tags":{"name":"2nd St W"},"geometry":[{"lat":48.195,"lon":-114.32},{"lat":48.195,"lon":-114.33}]},
    {"type":"way","tags":{"name":"Idaho St"},"geometry":[{"lat":48.198,"lon":-114.31},{"lat":48.198,"lon":-114.33}]},
    {"type":"way","tags":{"name":"Center St"},"geometry":[{"lat":48.196,"lon":-114.31},{"lat":48.196,"lon":-114.33}]},
    {"type":"way","tags":{"name":"Meridian Rd"},"geometry":[{"lat":48.19,"lon":-114.335},{"lat":48.21,"lon":-114.335}]},
    {"type":"way","tags":{"name":"Airport Rd"},"geometry":[{"lat":48.18,"lon":-114.31},{"lat":48.19,"lon":-114.31}]},
    {"type":"way","tags":{"name":"Willow Glen Dr"},"geometry":[{"lat":48.185,"lon":-114.29},{"lat":48.19,"lon":-114.28}]}
]}"#;
const OSRM: &str = r#"{"code":"Ok","routes":[{"geometry":{"type":"LineString",
    "coordinates":[[-114.3128,48.1935],[-114.3201,48.1962],[-114.326,48.1978]]}}]}"#;

fn query_param(target: &str, name: &str) -> Option<String> {
    let query = target.split_once('?')?.1;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.into_owned())
}

/// One backend impersonating Nominatim, Overpass and OSRM.
fn fake_providers(request: &RecordedRequest) -> (u16, String) {
    let target = request.target();
    if target.starts_with("/search") {
        return match query_param(target, "q").as_deref() {
            Some(ADDRESS) => (200, GEOCODE.to_string()),
            _ => (200, "[]".to_string()),
        };
    }
    if target.starts_with("/route/v1/driving/") {
        return (200, OSRM.to_string());
    }
    if target == "/api/interpreter" {
        let query = url::form_urlencoded::parse(request.body.as_bytes())
            .find(|(k, _)| k == "data")
            .map(|(_, v)| v.into_owned())
            .unwrap_or_default();
        let body = if query.contains("amenity") {
            SCHOOLS
        } else if query.contains("5th Ave W") {
            AT_RISK_WAY
        } else if query.contains(r#"["name"];"#) {
            STREETS
        } else {
            r#"{"elements":[]}"#
        };
        return (200, body.to_string());
    }
    (404, "{}".to_string())
}

struct App {
    client: SafeRouteClient,
    shutdown: Shutdown,
    server: JoinHandle<Result<(), std::io::Error>>,
    _dir: tempfile::TempDir,
}

async fn start_app() -> App {
    let backend = common::start_programmable_backend(|request| async move { fake_providers(&request) }).await;

    let dir = tempfile::tempdir().unwrap();
    let mut config = common::config_with_providers(backend, backend, backend);
    config.beacons.log_path = Some(dir.path().join("beacons.jsonl").to_string_lossy().into_owned());

    let service = Arc::new(build_service(&config).unwrap());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(&config, service);
    let server = tokio::spawn(server.run(listener, shutdown.subscribe()));

    App {
        client: SafeRouteClient::new(&format!("http://{}", addr)),
        shutdown,
        server,
        _dir: dir,
    }
}

#[tokio::test]
async fn test_status_reports_seeded_hazards() {
    let app = start_app().await;

    let status = app.client.status().await.unwrap();
    assert_eq!(status.version, env!("CARGO_PKG_VERSION"));
    assert_eq!(status.hazards.flood_zones, 2);
    assert_eq!(status.hazards.closed_roads, 3);
    assert_eq!(status.hazards.active_beacons, 0);
    assert_eq!(status.hazards.version, 0);
}

#[tokio::test]
async fn test_compute_route_detours_around_flooded_way() {
    let app = start_app().await;

    let route = app.client.plan_route(ORIGIN, DESTINATION).await.unwrap();
    assert!(route.detoured);
    assert_eq!(route.path.len(), 3);
    assert_eq!(route.path[0], ORIGIN);
    assert_eq!(route.path[2], DESTINATION);
    assert!(route.path[1].lat > 48.1975 || route.path[1].lat < 48.194);
    assert!(route.hazards.contains(&"Downtown Riverfront".to_string()));
}

#[tokio::test]
async fn test_route_from_address_follows_streets() {
    let app = start_app().await;

    let route = app.client.route_from_address(ADDRESS).await.unwrap();
    assert_eq!(route.path.len(), 3);
    assert_eq!(route.path[2], DESTINATION);

    let err = app.client.route_from_address("Atlantis").await.unwrap_err();
    assert!(err.to_string().contains("404"), "{err}");
}

#[tokio::test]
async fn test_find_safe_zone() {
    let app = start_app().await;

    let plan = app.client.find_safe_zone(ADDRESS, Some(3000.0)).await.unwrap();
    assert_eq!(plan.origin, ORIGIN);
    assert_eq!(plan.destination, DESTINATION);
    assert_eq!(plan.route_path.len(), 3);
    assert!((3..=6).contains(&plan.hazard_features.len()));
    for hazard in &plan.hazard_features {
        assert!(STREETS.contains(&hazard.name));
        assert!(["flooded", "fire", "powerline", "blocked"].contains(&hazard.tag.as_str()));
    }

    let err = app.client.find_safe_zone(ADDRESS, Some(0.0)).await.unwrap_err();
    assert!(err.to_string().contains("400"), "{err}");
}

#[tokio::test]
async fn test_scenario_mixes_geocoded_and_fixed_points() {
    let app = start_app().await;

    let scenario = app.client.scenario().await.unwrap();
    assert_eq!(scenario.origin, ORIGIN);
    assert_eq!(scenario.destination, DESTINATION);
    assert_eq!(
        scenario.flooded_street,
        vec![
            Coordinate { lat: 48.1975, lon: -114.32 },
            Coordinate { lat: 48.194, lon: -114.3188 },
        ]
    );
    assert_eq!(scenario.safe_route.len(), 4);
    assert_eq!(scenario.blocked_roads, vec!["5th Ave W".to_string()]);
}

#[tokio::test]
async fn test_sos_roundtrip() {
    let app = start_app().await;

    app.client
        .submit_sos(SosRequest {
            lat: 48.19,
            lon: -114.31,
            message: "first".into(),
            survivors: 1,
        })
        .await
        .unwrap();
    let created = app
        .client
        .submit_sos(SosRequest {
            lat: 48.2,
            lon: -114.3,
            message: "help".into(),
            survivors: 3,
        })
        .await
        .unwrap();
    assert!(created.persisted);
    assert_eq!(created.beacon.survivors, 3);

    let listed = app.client.list_sos().await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0], created.beacon);

    let status = app.client.status().await.unwrap();
    assert_eq!(status.hazards.active_beacons, 2);
    assert_eq!(status.hazards.version, 2);
}

#[tokio::test]
async fn test_sos_rejects_zero_survivors() {
    let app = start_app().await;

    let err = app
        .client
        .submit_sos(SosRequest {
            lat: 48.2,
            lon: -114.3,
            message: "help".into(),
            survivors: 0,
        })
        .await
        .unwrap_err();
    assert!(err.to_string().contains("400"), "{err}");
    assert!(app.client.list_sos().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_graceful_shutdown() {
    let app = start_app().await;
    app.client.status().await.unwrap();

    app.shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), app.server)
        .await
        .expect("server did not stop");
    assert!(result.unwrap().is_ok());
}

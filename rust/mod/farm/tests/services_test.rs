//! Service tests against a real HTTP server.
//!
//! Two backends: a healthy one that answers the farm API, and a broken one
//! that fails every call with 500. Each request the healthy backend sees is
//! recorded as `METHOD uri auth`.

use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, State};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use farmerp_authz::Role;
use farmerp_client::{ApiClient, ApiConfig, ApiError, FileUpload, KvTokenStore, TOKEN_KEY};
use farmerp_farm::mock;
use farmerp_farm::model::{
    AlertFilter, AlertStatus, MaintenanceFilter, MaintenanceInput, ParcelFilter, ParcelStatus,
    ProfileUpdate, ReportFormat, TaskPriority,
};
use farmerp_farm::FarmServices;
use farmerp_farm::service::USER_KEY;
use farmerp_kv::{KVError, KVStore, MemoryStore};

// =====================================================================
// Test servers
// =====================================================================

type Log = Arc<Mutex<Vec<String>>>;

fn record(log: &Log, method: &Method, uri: &Uri, headers: &HeaderMap) {
    let auth = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");
    log.lock()
        .unwrap()
        .push(format!("{} {} {}", method, uri, auth));
}

fn user_json(name: &str) -> Value {
    json!({"id": "u-1", "name": name, "email": "amina@farm.test", "role": "AGRONOMIST"})
}

async fn login(
    State(log): State<Log>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    record(&log, &method, &uri, &headers);
    if body["username"] == "amina" && body["password"] == "secret" {
        (StatusCode::OK, Json(json!({"token": "tok-123", "user": user_json("Amina")})))
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({"message": "invalid credentials"})))
    }
}

async fn logout(State(log): State<Log>, method: Method, uri: Uri, headers: HeaderMap) -> impl IntoResponse {
    record(&log, &method, &uri, &headers);
    (StatusCode::SERVICE_UNAVAILABLE, Json(json!({"message": "session service down"})))
}

async fn profile(
    State(log): State<Log>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    record(&log, &method, &uri, &headers);
    let name = body["name"].as_str().unwrap_or("Amina").to_string();
    Json(user_json(&name))
}

async fn parcels(State(log): State<Log>, method: Method, uri: Uri, headers: HeaderMap) -> Json<Value> {
    record(&log, &method, &uri, &headers);
    Json(json!([{"id": "p-9", "name": "Hilltop", "areaHa": 4.5, "status": "active"}]))
}

async fn parcel(
    State(log): State<Log>,
    Path(id): Path<String>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Json<Value> {
    record(&log, &method, &uri, &headers);
    Json(json!({"id": id, "name": "Hilltop", "areaHa": 4.5, "status": "active"}))
}

async fn stations(State(log): State<Log>, method: Method, uri: Uri, headers: HeaderMap) -> Json<Value> {
    record(&log, &method, &uri, &headers);
    Json(json!([{"id": "st-live", "name": "Live", "kind": "soil", "status": "online"}]))
}

async fn report(State(log): State<Log>, method: Method, uri: Uri, headers: HeaderMap) -> impl IntoResponse {
    record(&log, &method, &uri, &headers);
    (StatusCode::OK, [(CONTENT_TYPE, "text/csv")], "date,volume\n2024-03-01,120\n")
}

async fn upload_image(Path(id): Path<String>, mut multipart: Multipart) -> Json<Value> {
    let mut parcel = Value::Null;
    let mut size = 0;
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => size = field.bytes().await.unwrap().len(),
            "parcelId" => parcel = Value::String(field.text().await.unwrap()),
            _ => {}
        }
    }
    Json(json!({
        "id": format!("img-{size}"),
        "droneId": id,
        "url": "https://cdn.farm.test/img.jpg",
        "parcelId": parcel,
    }))
}

async fn start_healthy() -> (String, Log) {
    let log: Log = Arc::default();
    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/profile", patch(profile))
        .route("/api/parcels", get(parcels))
        .route("/api/parcels/{id}", get(parcel))
        .route("/api/stations", get(stations))
        .route("/api/water-resources/report", get(report))
        .route("/api/drones/{id}/images", post(upload_image))
        .with_state(log.clone());
    (serve(app).await, log)
}

async fn start_broken() -> String {
    let app = Router::new().fallback(|| async {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"message": "database unavailable"})))
    });
    serve(app).await
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn services(base_url: &str) -> (FarmServices, Arc<dyn KVStore>) {
    services_with(base_url, Arc::new(MemoryStore::new()))
}

fn services_with(base_url: &str, kv: Arc<dyn KVStore>) -> (FarmServices, Arc<dyn KVStore>) {
    let tokens = Arc::new(KvTokenStore::new(kv.clone()));
    let api = Arc::new(ApiClient::new(ApiConfig::new(base_url), tokens).unwrap());
    (FarmServices::new(api, kv.clone()), kv)
}

/// Session store whose token removal always fails.
struct StuckToken(MemoryStore);

impl KVStore for StuckToken {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError> {
        self.0.get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError> {
        self.0.set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), KVError> {
        if key == TOKEN_KEY {
            return Err(KVError::Storage("disk full".into()));
        }
        self.0.delete(key)
    }
}

/// Log sink shared between a test and its subscriber.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl Captured {
    fn lines(&self, level: &str) -> Vec<String> {
        let buf = self.0.lock().unwrap();
        String::from_utf8_lossy(&buf)
            .lines()
            .filter(|l| l.contains(level))
            .map(str::to_string)
            .collect()
    }

    fn clear(&self) {
        self.0.lock().unwrap().clear();
    }
}

// =====================================================================
// Mock fallback
// =====================================================================

#[tokio::test]
async fn failed_station_list_returns_demo_data() {
    let (svc, _) = services(&start_broken().await);
    assert_eq!(svc.stations.get_all().await, mock::stations());
}

#[tokio::test]
async fn healthy_station_list_returns_live_data() {
    let (base, _) = start_healthy().await;
    let (svc, _) = services(&base);
    let stations = svc.stations.get_all().await;
    assert_eq!(stations.len(), 1);
    assert_eq!(stations[0].id, "st-live");
}

#[tokio::test]
async fn failed_alert_list_returns_whole_demo_set() {
    let (svc, _) = services(&start_broken().await);
    // No demo alert is resolved; the filter must not empty the fallback.
    let filter = AlertFilter {
        status: Some(AlertStatus::Resolved),
        ..Default::default()
    };
    assert_eq!(svc.alerts.get_all(&filter).await, mock::alerts());
}

#[tokio::test]
async fn fallback_warns_once_and_writes_do_not_warn() {
    let (svc, _) = services(&start_broken().await);
    let out = Captured::default();
    let writer = out.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    svc.stations.get_all().await;
    let warned = out.lines("WARN");
    assert_eq!(warned.len(), 1, "{warned:?}");
    assert!(warned[0].contains("using demo data"));
    assert!(warned[0].contains("database unavailable"));

    out.clear();
    svc.stations.delete("st-001").await.unwrap_err();
    assert!(out.lines("WARN").is_empty());
    assert_eq!(out.lines("ERROR").len(), 1);
}

#[tokio::test]
async fn failed_maintenance_list_returns_demo_data() {
    let (svc, _) = services(&start_broken().await);
    let tasks = svc.maintenance.get_all(&MaintenanceFilter::default()).await;
    assert_eq!(tasks, mock::maintenance_tasks());
}

#[tokio::test]
async fn writes_never_fall_back() {
    let (svc, _) = services(&start_broken().await);

    let err = svc.stations.delete("st-001").await.unwrap_err();
    assert_eq!(err.to_string(), "database unavailable");
    assert_eq!(err.status(), Some(farmerp_client::StatusCode::INTERNAL_SERVER_ERROR));

    let input = MaintenanceInput {
        title: "Check pump".into(),
        description: None,
        equipment_id: None,
        assigned_to: None,
        priority: TaskPriority::Urgent,
        due_date: None,
    };
    let err = svc.maintenance.create(&input).await.unwrap_err();
    assert!(matches!(err, ApiError::Server { .. }));
}

#[tokio::test]
async fn single_reads_on_fallback_services_propagate() {
    let (svc, _) = services(&start_broken().await);
    assert!(svc.stations.get_by_id("st-001").await.is_err());
    assert!(svc.maintenance.get_by_id("mt-001").await.is_err());
}

#[tokio::test]
async fn rethrow_services_return_the_original_error() {
    let (svc, _) = services(&start_broken().await);
    let err = svc.parcels.get_all(&ParcelFilter::default()).await.unwrap_err();
    assert_eq!(err.to_string(), "database unavailable");
    let err = svc.irrigation.start("z-1", Some(30)).await.unwrap_err();
    assert_eq!(err.to_string(), "database unavailable");
}

#[tokio::test]
async fn transport_failure_still_falls_back_for_lists() {
    let (svc, _) = services("http://127.0.0.1:1");
    assert_eq!(svc.stations.get_all().await, mock::stations());
    let err = svc.drones.get_all().await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}

// =====================================================================
// Session
// =====================================================================

#[tokio::test]
async fn login_persists_session_and_next_request_is_authorized() {
    let (base, log) = start_healthy().await;
    let (svc, _) = services(&base);

    assert!(!svc.auth.is_authenticated().unwrap());
    let user = svc.auth.login("amina", "secret").await.unwrap();
    assert_eq!(user.role, Role::Agronomist);
    assert!(svc.auth.is_authenticated().unwrap());
    assert_eq!(svc.auth.current_user().unwrap(), Some(user));

    svc.parcels.get_all(&ParcelFilter::default()).await.unwrap();
    let log = log.lock().unwrap();
    assert_eq!(log[0], "POST /api/auth/login -");
    assert_eq!(log[1], "GET /api/parcels Bearer tok-123");
}

#[tokio::test]
async fn failed_login_leaves_no_session() {
    let (base, _) = start_healthy().await;
    let (svc, kv) = services(&base);

    let err = svc.auth.login("amina", "wrong").await.unwrap_err();
    assert_eq!(err.to_string(), "invalid credentials");
    assert!(err.is_unauthorized());
    assert!(!svc.auth.is_authenticated().unwrap());
    assert!(kv.get(USER_KEY).unwrap().is_none());
}

#[tokio::test]
async fn logout_clears_session_even_when_backend_fails() {
    let (base, log) = start_healthy().await;
    let (svc, _) = services(&base);
    svc.auth.login("amina", "secret").await.unwrap();

    svc.auth.logout().await.unwrap();
    assert!(!svc.auth.is_authenticated().unwrap());
    assert_eq!(svc.auth.current_user().unwrap(), None);
    assert_eq!(log.lock().unwrap()[1], "POST /api/auth/logout Bearer tok-123");

    // Idempotent.
    svc.auth.logout().await.unwrap();
}

#[tokio::test]
async fn logout_without_a_reachable_backend_still_clears() {
    let (svc, kv) = services("http://127.0.0.1:1");
    KvTokenStore::new(kv.clone()).store("stale").unwrap();

    svc.auth.logout().await.unwrap();
    assert!(!svc.auth.is_authenticated().unwrap());
}

#[tokio::test]
async fn logout_clears_user_even_when_token_removal_fails() {
    let (svc, kv) = services_with("http://127.0.0.1:1", Arc::new(StuckToken(MemoryStore::new())));
    kv.set(TOKEN_KEY, b"tok-123").unwrap();
    kv.set(USER_KEY, br#"{"id":"u-1","name":"Amina","email":"a@farm.test","role":"AGRONOMIST"}"#)
        .unwrap();

    let err = svc.auth.logout().await.unwrap_err();
    assert!(matches!(err, ApiError::Store(_)));
    assert!(kv.get(USER_KEY).unwrap().is_none());
    assert_eq!(svc.auth.current_user().unwrap(), None);
}

#[tokio::test]
async fn profile_update_rewrites_cached_user() {
    let (base, _) = start_healthy().await;
    let (svc, _) = services(&base);
    svc.auth.login("amina", "secret").await.unwrap();

    let patch = ProfileUpdate {
        name: Some("Amina B.".into()),
        email: None,
    };
    svc.auth.update_profile(&patch).await.unwrap();
    let cached = svc.auth.current_user().unwrap().unwrap();
    assert_eq!(cached.name, "Amina B.");
}

// =====================================================================
// Query, download and upload plumbing
// =====================================================================

#[tokio::test]
async fn filters_become_query_parameters() {
    let (base, log) = start_healthy().await;
    let (svc, _) = services(&base);

    let filter = ParcelFilter {
        status: Some(ParcelStatus::Fallow),
        search: None,
    };
    let parcels = svc.parcels.get_all(&filter).await.unwrap();
    assert_eq!(parcels[0].name, "Hilltop");
    assert_eq!(log.lock().unwrap()[0], "GET /api/parcels?status=fallow -");
}

#[tokio::test]
async fn ids_are_encoded_as_one_path_segment() {
    let (base, log) = start_healthy().await;
    let (svc, _) = services(&base);

    let parcel = svc.parcels.get_by_id("p-1?x=1").await.unwrap();
    assert_eq!(parcel.id, "p-1?x=1");
    assert_eq!(log.lock().unwrap()[0], "GET /api/parcels/p-1%3Fx%3D1 -");
}

#[tokio::test]
async fn water_report_downloads_raw_bytes() {
    let (base, log) = start_healthy().await;
    let (svc, _) = services(&base);

    let bytes = svc
        .water
        .export_report(ReportFormat::Csv, Some("2024-03-01"), None)
        .await
        .unwrap();
    assert!(bytes.starts_with(b"date,volume"));
    assert_eq!(
        log.lock().unwrap()[0],
        "GET /api/water-resources/report?format=csv&from=2024-03-01 -"
    );
}

#[tokio::test]
async fn drone_image_upload_sends_file_and_parcel() {
    let (base, _) = start_healthy().await;
    let (svc, _) = services(&base);

    let image = FileUpload::new("field.jpg", vec![1u8; 32]).with_mime("image/jpeg");
    let uploaded = svc.drones.upload_image("d-7", image, Some("p-2")).await.unwrap();
    assert_eq!(uploaded.id, "img-32");
    assert_eq!(uploaded.drone_id, "d-7");
    assert_eq!(uploaded.parcel_id.as_deref(), Some("p-2"));
}

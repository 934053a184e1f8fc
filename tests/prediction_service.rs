mod support;

use exoscope::http_client::Timeouts;
use exoscope::prediction::export::save_detailed_export;
use exoscope::prediction::result::CsvStatsResponse;
use exoscope::prediction::{
    CsvUpload, EXPORT_FILE_NAME, FEATURE_NAMES, FeatureVector, HttpPredictionApi, PredictionApi,
    PredictionError, PredictionOrchestrator, PredictionStatus,
};
use std::time::Duration;
use support::mock_service::{Reply, serve_once};
use url::Url;

fn api_for(base: &str) -> HttpPredictionApi {
    let url = Url::parse(base).expect("mock url");
    HttpPredictionApi::new(
        &url,
        Timeouts {
            connect: Duration::from_secs(2),
            read: Some(Duration::from_secs(5)),
        },
    )
}

fn kepler_csv() -> CsvUpload {
    CsvUpload::new("kepler.csv", b"koi_score,koi_period\n0.91,12.5\n".to_vec())
}

#[test]
fn predict_posts_all_features_as_json() {
    let (base, server) = serve_once(Reply::json(
        r#"{"status":"positive","message":"Likely exoplanet","details":"confidence 0.93"}"#,
    ));
    let api = api_for(&base);
    let mut raw: [String; 14] = Default::default();
    raw[0] = "0.93".into();
    raw[5] = "abc".into();
    let features = FeatureVector::from_raw(&raw);

    let response = api.predict(&features).expect("prediction");
    assert_eq!(response.status, PredictionStatus::Positive);
    assert_eq!(response.message, "Likely exoplanet");

    let request = server.join().expect("server thread");
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/predict");
    assert_eq!(request.header("content-type"), Some("application/json"));
    let body: serde_json::Value = serde_json::from_slice(&request.body).expect("json body");
    let object = body.as_object().expect("json object");
    assert_eq!(object.len(), FEATURE_NAMES.len());
    for name in FEATURE_NAMES {
        assert!(object[name].is_number(), "{name} should be numeric");
    }
    assert_eq!(object["koi_score"], serde_json::json!(0.93));
    assert_eq!(object["koi_period"], serde_json::json!(0.0));
}

#[test]
fn csv_stats_uploads_file_field() {
    let (base, server) = serve_once(Reply::json(
        r#"{"status":"success","message":"Analysis complete","details":"ok","totalProcessed":250,"candidatesFound":17}"#,
    ));
    let api = api_for(&base);
    let response = api.predict_csv_stats(&kepler_csv()).expect("stats");
    assert_eq!(
        response,
        CsvStatsResponse::Success {
            message: "Analysis complete".into(),
            details: "ok".into(),
            total_processed: 250,
            candidates_found: 17,
        }
    );

    let request = server.join().expect("server thread");
    assert_eq!(request.path, "/predict_csv_stats");
    let content_type = request.header("content-type").expect("content type");
    assert!(content_type.starts_with("multipart/form-data; boundary="));
    let body = request.body_text();
    assert!(body.contains("name=\"file\"; filename=\"kepler.csv\""));
    assert!(body.contains("koi_score,koi_period\n0.91,12.5\n"));
}

#[test]
fn server_error_surfaces_status_and_body() {
    let (base, server) = serve_once(Reply::error(500, "Internal Server Error", "model not loaded"));
    let api = api_for(&base);
    let err = api.predict_csv_stats(&kepler_csv()).unwrap_err();
    assert!(matches!(err, PredictionError::Request { status: 500, .. }));
    assert_eq!(err.to_string(), "HTTP 500: model not loaded");
    server.join().expect("server thread");
}

#[test]
fn empty_error_body_falls_back_to_reason_phrase() {
    let (base, server) = serve_once(Reply::error(503, "Service Unavailable", ""));
    let api = api_for(&base);
    let mut raw: [String; 14] = Default::default();
    raw[1] = "1".into();
    let err = api.predict(&FeatureVector::from_raw(&raw)).unwrap_err();
    assert_eq!(err.to_string(), "HTTP 503: Service Unavailable");
    server.join().expect("server thread");
}

#[test]
fn unreachable_service_becomes_error_result() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    let api = api_for(&format!("http://{addr}"));

    let mut orchestrator = PredictionOrchestrator::new();
    orchestrator.set_manual_field(0, "0.5");
    let result = orchestrator.submit(&api).expect("submission starts");
    assert_eq!(result.status, PredictionStatus::Error);
    assert_eq!(result.message, "Prediction failed");
    assert!(!result.details.is_empty());
    assert!(!orchestrator.is_loading());
}

#[test]
fn detailed_export_lands_in_download_dir() {
    let csv_body = "koi_score,prediction\n0.91,CONFIRMED\n";
    let (base, server) = serve_once(Reply::csv(csv_body));
    let api = api_for(&base);
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join(EXPORT_FILE_NAME), "older export").expect("seed file");

    let saved = save_detailed_export(&api, &kepler_csv(), dir.path()).expect("export");
    assert_eq!(saved, dir.path().join("exoplanet_predictions (1).csv"));
    assert_eq!(std::fs::read_to_string(&saved).expect("read export"), csv_body);
    assert_eq!(
        std::fs::read_to_string(dir.path().join(EXPORT_FILE_NAME)).expect("read seed"),
        "older export"
    );

    let request = server.join().expect("server thread");
    assert_eq!(request.path, "/predict_csv");
    assert!(request.body_text().contains("name=\"file\""));
}

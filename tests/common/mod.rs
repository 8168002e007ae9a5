// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use wearable_export::config::Config;

/// Secret the stub hub verifies tokens with.
pub const TEST_SECRET: &[u8] = b"wearable-hub";

/// User id the stub answers with a non-JSON 500.
#[allow(dead_code)]
pub const FAILING_USER_ID: i64 = 2;

/// User id the stub answers with only a `message` field.
#[allow(dead_code)]
pub const PARTIAL_USER_ID: i64 = 3;

/// One request as seen by the stub hub.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct RecordedRequest {
    pub path: String,
    pub query: HashMap<String, String>,
    pub authorization: Option<String>,
    pub claims: Option<Value>,
}

/// In-process stand-in for the hub API.
#[allow(dead_code)]
pub struct StubHub {
    pub base_url: String,
    pub requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

#[allow(dead_code)]
impl StubHub {
    pub fn recorded(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// Start the stub hub on an ephemeral local port.
#[allow(dead_code)]
pub async fn spawn_stub_hub() -> StubHub {
    let requests = Arc::new(Mutex::new(Vec::new()));

    let app = Router::new()
        .fallback(stub_handler)
        .with_state(requests.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub hub");
    let addr = listener.local_addr().expect("Stub hub has no address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Stub hub crashed");
    });

    StubHub {
        base_url: format!("http://{}", addr),
        requests,
    }
}

async fn stub_handler(
    State(requests): State<Arc<Mutex<Vec<RecordedRequest>>>>,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string);
    let claims = authorization.as_deref().and_then(decode_claims);

    requests.lock().unwrap().push(RecordedRequest {
        path: uri.path().to_string(),
        query: query.clone(),
        authorization,
        claims: claims.clone(),
    });

    let Some(claims) = claims else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"statusCode": 401, "message": "Unauthorized"})),
        )
            .into_response();
    };

    match claims["id"].as_i64() {
        Some(FAILING_USER_ID) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response()
        }
        Some(PARTIAL_USER_ID) => Json(json!({"message": "partial"})).into_response(),
        _ => Json(json!({
            "statusCode": 200,
            "data": [{"user": claims["id"], "path": uri.path()}],
            "pagination": {
                "startDate": query.get("startDate"),
                "endDate": query.get("endDate"),
            },
            "message": "Success",
        }))
        .into_response(),
    }
}

fn decode_claims(authorization: &str) -> Option<Value> {
    let token = authorization.strip_prefix("Bearer ")?;
    let mut validation = Validation::new(Algorithm::HS256);
    validation.required_spec_claims.clear();
    validation.validate_exp = false;

    decode::<Value>(token, &DecodingKey::from_secret(TEST_SECRET), &validation)
        .ok()
        .map(|data| data.claims)
}

/// Write a CSV roster with an extra ignored column.
#[allow(dead_code)]
pub fn write_roster(dir: &Path, rows: &[(i64, &str, &str)]) -> PathBuf {
    let path = dir.join("extract.csv");
    let mut contents = String::from("id,name,email,team\n");
    for (id, name, email) in rows {
        contents.push_str(&format!("{},{},{},ignored\n", id, name, email));
    }
    std::fs::write(&path, contents).expect("Failed to write roster");
    path
}

/// Test configuration pointing at a stub hub and temp directories.
#[allow(dead_code)]
pub fn test_config(base_url: &str, roster: &Path, output_dir: &Path, batch_size: usize) -> Config {
    Config {
        roster_path: roster.to_path_buf(),
        output_dir: output_dir.to_path_buf(),
        hub_base_url: base_url.to_string(),
        batch_size,
        ..Config::default()
    }
}

/// Read a batch file back as (header, rows).
#[allow(dead_code)]
pub fn read_batch(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).expect("Failed to open batch file");
    let header = reader
        .headers()
        .expect("Batch file has no header")
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader
        .records()
        .map(|r| r.expect("Bad CSV row").iter().map(str::to_string).collect())
        .collect();
    (header, rows)
}

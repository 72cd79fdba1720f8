//
//  iam-api
//  testutil.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Shared helpers for the resource tests.
//!
//! Each test spins up its own `mockito` server and a client pointed at it,
//! so no client state is shared between tests.

use chrono::{DateTime, TimeZone, Utc};
use mockito::{Matcher, Mock, ServerGuard};
use rand::distr::Alphanumeric;
use rand::Rng;
use serde::Serialize;

use crate::IamClient;

/// Starts a mock server and a client whose API root is that server.
pub async fn setup() -> (ServerGuard, IamClient) {
    let server = mockito::Server::new_async().await;
    let client = IamClient::with_api_root_url(&server.url()).unwrap();
    (server, client)
}

/// Mocks a JSON response. Query strings are not matched.
pub async fn mock_json<B: Serialize>(
    server: &mut ServerGuard,
    method: &str,
    path: &str,
    status: usize,
    body: &B,
) -> Mock {
    server
        .mock(method, path)
        .match_query(Matcher::Any)
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(serde_json::to_string(body).unwrap())
        .create_async()
        .await
}

/// Mocks a `204 No Content` response with an empty body.
pub async fn mock_no_content(server: &mut ServerGuard, method: &str, path: &str) -> Mock {
    server
        .mock(method, path)
        .match_query(Matcher::Any)
        .with_status(204)
        .create_async()
        .await
}

/// Mocks a problem response with a random detail, which is returned.
pub async fn mock_problem(
    server: &mut ServerGuard,
    method: &str,
    path: &str,
    status: u16,
) -> (Mock, String) {
    let detail = random_string(128);
    let body = problem(status, &detail);
    let mock = mock_json(server, method, path, status as usize, &body).await;
    (mock, detail)
}

pub fn problem(status: u16, detail: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "about:blank",
        "title": "error",
        "status": status,
        "detail": detail,
    })
}

pub fn random_string(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

pub fn random_name(prefix: &str, len: usize) -> String {
    format!("{}-{}", prefix, random_string(len))
}

/// Fixed timestamp with whole seconds, so JSON round trips compare equal.
pub fn fake_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 4, 1, 12, 30, 0).unwrap()
}

mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn root_reports_service_metadata() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let client = reqwest::Client::new();

    let res = client.get(server.url("/")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert!(body["message"].is_string(), "missing message: {}", body);
    assert_eq!(body["environment"], "DEVELOPMENT");
    assert_eq!(body["docs"], "/docs");

    Ok(())
}

#[tokio::test]
async fn healthcheck_is_static_and_healthy() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let client = reqwest::Client::new();

    let res = client.get(server.url("/healthcheck")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["application"], "Crossword Clues API");
    assert!(body["version"].is_string());

    Ok(())
}

#[tokio::test]
async fn readiness_pings_the_database() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let client = reqwest::Client::new();

    let res = client.get(server.url("/healthcheck/ready")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body["database"], "ok");

    Ok(())
}

#[tokio::test]
async fn docs_lists_every_clue_route() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let client = reqwest::Client::new();

    let body = client
        .get(server.url("/docs"))
        .send()
        .await?
        .json::<Value>()
        .await?;

    let endpoints = body["endpoints"].as_array().expect("endpoints array");
    let routes: Vec<String> = endpoints
        .iter()
        .map(|e| format!("{} {}", e["method"].as_str().unwrap(), e["path"].as_str().unwrap()))
        .collect();
    for expected in ["GET /clues", "GET /clues/{id}", "POST /clues", "GET /healthcheck"] {
        assert!(routes.iter().any(|r| r == expected), "missing {} in {:?}", expected, routes);
    }

    Ok(())
}

#[tokio::test]
async fn unknown_route_is_404() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let client = reqwest::Client::new();

    let res = client.get(server.url("/crossword")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

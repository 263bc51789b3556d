//! API integration tests against a server bound to an ephemeral port

use std::time::Duration;

use book_inventory::{
    api,
    client::{BookView, BooksApi, ClientError, HttpBooksApi},
    models::{CreateBook, UpdateBook},
    AppConfig, AppState,
};
use reqwest::Client;
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Start a fresh server and return its base URL
async fn spawn_server() -> String {
    let app = api::create_router(AppState::new(AppConfig::default()));
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("No local address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server error");
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_health_check() {
    let base_url = spawn_server().await;

    let response = Client::new()
        .get(format!("{}/health", base_url))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_add_add_delete() {
    let base_url = spawn_server().await;
    let client = Client::new();

    for (title, author) in [("Dune", "Herbert"), ("Emma", "Austen")] {
        let response = client
            .post(format!("{}/books", base_url))
            .json(&json!({ "title": title, "author": author }))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 201);
    }

    let response = client
        .delete(format!("{}/books/1", base_url))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.text().await.unwrap(),
        "Book with ID 1 deleted successfully"
    );

    let body: Value = client
        .get(format!("{}/books", base_url))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body, json!([{ "id": "2", "title": "Emma", "author": "Austen" }]));
}

#[tokio::test]
async fn test_http_client_surfaces_server_errors() {
    let api = HttpBooksApi::new(spawn_server().await);

    let err = api
        .create(&CreateBook {
            title: Some("Dune".into()),
            author: None,
        })
        .await
        .unwrap_err();
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Missing title or author");
        }
        other => panic!("unexpected error: {other}"),
    }

    let err = api
        .update(
            "5",
            &UpdateBook {
                title: None,
                author: Some("Austen".into()),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 404, .. }));

    let err = api.delete("5").await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 404, .. }));
}

#[tokio::test]
async fn test_view_round_trip() {
    let api = HttpBooksApi::new(spawn_server().await);
    let mut view = BookView::new(api.clone(), Duration::from_secs(4));
    view.mount().await;
    assert!(view.books().is_empty());
    assert_eq!(view.banner(), None);

    assert!(view.submit("Dune", "Herbert").await);
    assert!(view.submit("Emma", "Austen").await);

    assert!(view.start_edit("2"));
    assert!(view.submit("Persuasion", "Austen").await);
    assert!(view.delete("1").await);

    assert_eq!(view.books(), api.list().await.unwrap().as_slice());
    assert_eq!(view.books()[0].title, "Persuasion");
}

#[tokio::test]
async fn test_view_without_server() {
    // Nothing listens on the discard port
    let api = HttpBooksApi::new("http://127.0.0.1:9");
    let mut view = BookView::new(api, Duration::from_secs(4));
    view.mount().await;

    assert!(view.books().is_empty());
    assert_eq!(
        view.banner().map(|banner| banner.message),
        Some("Failed to fetch books. Check if the backend's Running".to_string())
    );
}

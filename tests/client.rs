use std::sync::Arc;

use movielist::client::{
    ClientConfig, ClientError, ClientState, MemoryTokenStore, MovieClient, TokenStore, TOKEN_KEY,
};
use movielist::{build_app, AppConfig, AppState};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(url: &str) -> (MovieClient, Arc<MemoryTokenStore>) {
    let store = Arc::new(MemoryTokenStore::default());
    let client = MovieClient::new(ClientConfig::new(url, url), store.clone()).unwrap();
    (client, store)
}

#[tokio::test]
async fn login_stores_token_and_authenticates() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({"email": "a@x.com", "password": "pw123456"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"message": "Logged in successfully", "token": "tok-1"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (client, store) = client_for(&server.uri());
    assert_eq!(client.state().unwrap(), ClientState::Unauthenticated);

    let notice = client.login("a@x.com", "pw123456").await.unwrap();
    assert_eq!(notice.text, "Logged in successfully");
    assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("tok-1"));
    assert_eq!(client.state().unwrap(), ClientState::Authenticated);
}

#[tokio::test]
async fn failed_login_surfaces_server_message_and_stores_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"message": "Invalid credentials"})))
        .mount(&server)
        .await;

    let (client, store) = client_for(&server.uri());
    let err = client.login("a@x.com", "wrong").await.unwrap_err();
    assert!(matches!(err, ClientError::Rejected { status: 400, .. }));
    assert_eq!(err.to_string(), "Invalid credentials");
    assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
}

#[tokio::test]
async fn register_falls_back_to_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .mount(&server)
        .await;

    let (client, _) = client_for(&server.uri());
    let err = client.register("a@x.com", "pw").await.unwrap_err();
    assert_eq!(err.to_string(), "Registration failed");
}

#[tokio::test]
async fn movie_calls_send_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/movies"))
        .and(header("authorization", "Bearer tok-1"))
        .and(body_json(json!({"movie_name": "Dune"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "6f1c1a52-8f2e-4c1e-9a43-2b0b7d7b0c11", "user_id": "1b4e28ba-2fa1-11d2-883f-0016d3cca427", "movie_name": "Dune", "created_at": "2024-01-01T00:00:00Z"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let (client, store) = client_for(&server.uri());
    store.set(TOKEN_KEY, "tok-1").unwrap();

    let movies = client.add_movie("  Dune ").await.unwrap();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].movie_name, "Dune");
}

#[tokio::test]
async fn unauthorized_response_logs_the_client_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movies"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let (client, store) = client_for(&server.uri());
    store.set(TOKEN_KEY, "stale").unwrap();

    let err = client.fetch_movies().await.unwrap_err();
    assert!(matches!(err, ClientError::SessionExpired));
    assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    assert_eq!(client.state().unwrap(), ClientState::Unauthenticated);

    // No second request reaches the server.
    assert!(matches!(client.fetch_movies().await, Err(ClientError::NotLoggedIn)));
}

#[tokio::test]
async fn logout_prevents_further_movie_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let (client, store) = client_for(&server.uri());
    store.set(TOKEN_KEY, "tok-1").unwrap();

    let notice = client.logout().unwrap();
    assert_eq!(notice.text, "Logged out successfully.");
    assert!(matches!(client.fetch_movies().await, Err(ClientError::NotLoggedIn)));
}

#[tokio::test]
async fn server_error_on_list_is_a_load_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movies"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "Failed to retrieve movies"})))
        .mount(&server)
        .await;

    let (client, store) = client_for(&server.uri());
    store.set(TOKEN_KEY, "tok-1").unwrap();

    let err = client.fetch_movies().await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to load movies.");
    // Only a 401 discards the token.
    assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("tok-1"));
}

#[tokio::test]
async fn unreachable_auth_service_is_a_network_error() {
    let (client, _) = client_for("http://127.0.0.1:9");
    let err = client.register("a@x.com", "pw").await.unwrap_err();
    assert!(matches!(err, ClientError::Network { .. }));
    assert_eq!(err.to_string(), "Network error or server unreachable");
}

#[tokio::test]
async fn end_to_end_against_real_router() {
    let state = AppState::in_memory(AppConfig::for_tests("e2e-secret")).unwrap();
    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let (client, store) = client_for(&format!("http://{addr}"));

    let notice = client.register("a@x.com", "pw123456").await.unwrap();
    assert_eq!(notice.text, "User registered successfully");
    let err = client.register("a@x.com", "pw123456").await.unwrap_err();
    assert_eq!(err.to_string(), "Email already registered");

    client.login("a@x.com", "pw123456").await.unwrap();
    assert!(client.fetch_movies().await.unwrap().is_empty());

    let movies = client.add_movie("Dune").await.unwrap();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].movie_name, "Dune");
    assert!(movies[0].id.is_some());

    store.set(TOKEN_KEY, "tampered").unwrap();
    assert!(matches!(client.fetch_movies().await, Err(ClientError::SessionExpired)));
    assert_eq!(client.state().unwrap(), ClientState::Unauthenticated);
}

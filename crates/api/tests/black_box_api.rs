use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use reqwest::StatusCode;
use serde_json::{json, Value};
use tokengate_auth::{password, AuthConfig, InMemoryUserDirectory, ManualClock, Role, UserRecord};

struct TestServer {
    base_url: String,
    clock: ManualClock,
    users: Arc<InMemoryUserDirectory>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        let users = Arc::new(InMemoryUserDirectory::new());
        let hash = password::hash_password("s3cret!", Some(4)).await.unwrap();
        users.insert(UserRecord::new("alice", hash, vec![Role::new("ADMIN")]));

        let clock = ManualClock::new(Utc::now());
        let config = AuthConfig::new("test-secret", Duration::hours(10)).unwrap();

        // Same router as prod, on an ephemeral port and a controllable clock.
        let app = tokengate_api::app::build_app_with_clock(&config, users.clone(), Arc::new(clock.clone()))
            .expect("failed to build app");
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            clock,
            users,
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn sign_in(&self, client: &reqwest::Client) -> Value {
        let res = client
            .post(self.url("/auth/signin"))
            .json(&json!({ "username": "alice", "password": "s3cret!" }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        res.json().await.unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn token<'a>(pair: &'a Value, field: &str) -> &'a str {
    pair[field].as_str().unwrap()
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(srv.url("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn request_without_header_passes_interceptor_unauthenticated() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    // Public route still served; protected route refused by the gate, not the interceptor.
    let res = client.get(srv.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client.get(srv.url("/whoami")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn garbage_bearer_leaves_request_unauthenticated() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client.get(srv.url("/health")).bearer_auth("garbage").send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client.get(srv.url("/whoami")).bearer_auth("garbage").send().await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn sign_in_returns_credential_pair() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let pair = srv.sign_in(&client).await;

    assert_eq!(pair["subject"], "alice");
    assert_eq!(pair["authenticated"], true);
    let created: DateTime<Utc> = pair["createdAt"].as_str().unwrap().parse().unwrap();
    let expires: DateTime<Utc> = pair["expiresAt"].as_str().unwrap().parse().unwrap();
    assert_eq!(expires - created, Duration::hours(10));
    assert_eq!(token(&pair, "accessToken").split('.').count(), 3);
    assert_eq!(token(&pair, "refreshToken").split('.').count(), 3);

    let res = client
        .get(srv.url("/whoami"))
        .bearer_auth(token(&pair, "accessToken"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["subject"], "alice");
    assert_eq!(body["roles"], json!(["ADMIN"]));
}

#[tokio::test]
async fn sign_in_rejections() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/auth/signin"))
        .json(&json!({ "username": "", "password": "s3cret!" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client.post(srv.url("/auth/signin")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .post(srv.url("/auth/signin"))
        .json(&json!({ "username": "alice", "password": "wrong" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "bad_credentials");
}

#[tokio::test]
async fn expired_access_token_can_be_refreshed() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let pair = srv.sign_in(&client).await;

    srv.clock.advance(Duration::hours(11));

    let res = client
        .get(srv.url("/whoami"))
        .bearer_auth(token(&pair, "accessToken"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .put(srv.url("/auth/refresh"))
        .bearer_auth(token(&pair, "refreshToken"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let fresh: Value = res.json().await.unwrap();
    assert_eq!(fresh["subject"], "alice");
    assert_ne!(fresh["refreshToken"], pair["refreshToken"]);

    let res = client
        .get(srv.url("/whoami"))
        .bearer_auth(token(&fresh, "accessToken"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn refresh_rejections() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let pair = srv.sign_in(&client).await;

    let res = client.put(srv.url("/auth/refresh")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .put(srv.url("/auth/refresh"))
        .header("Authorization", token(&pair, "refreshToken"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    srv.clock.advance(Duration::hours(31));
    let res = client
        .put(srv.url("/auth/refresh"))
        .bearer_auth(token(&pair, "refreshToken"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_credential");
}

#[tokio::test]
async fn current_roles_override_token_roles() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let pair = srv.sign_in(&client).await;

    srv.users.insert(UserRecord::new("alice", "unused", vec![Role::new("COMMON_USER")]));

    let res = client
        .get(srv.url("/whoami"))
        .bearer_auth(token(&pair, "accessToken"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["roles"], json!(["COMMON_USER"]));
    assert_eq!(body["tokenRoles"], json!(["ADMIN"]));
}

#[tokio::test]
async fn disabled_user_is_not_authenticated() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let pair = srv.sign_in(&client).await;

    srv.users
        .insert(UserRecord::new("alice", "unused", vec![Role::new("ADMIN")]).disabled());

    let res = client
        .get(srv.url("/whoami"))
        .bearer_auth(token(&pair, "accessToken"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn refresh_token_is_not_accepted_on_protected_routes() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let pair = srv.sign_in(&client).await;

    let res = client
        .get(srv.url("/whoami"))
        .bearer_auth(token(&pair, "refreshToken"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Access window over, refresh window open: still not a request credential.
    srv.clock.advance(Duration::hours(25));
    let res = client
        .get(srv.url("/whoami"))
        .bearer_auth(token(&pair, "refreshToken"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn access_token_cannot_mint_a_new_pair() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let pair = srv.sign_in(&client).await;

    let res = client
        .put(srv.url("/auth/refresh"))
        .bearer_auth(token(&pair, "accessToken"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_credential");
}

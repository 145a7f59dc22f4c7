use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::Service;
use uuid::Uuid;
use migration::MigratorTrait;

use server::routes::{self, auth};
use service::session::{memory::InMemorySessionStore, SessionStore};
use service::storage::{mock::MockFileStorage, FileStorage};

const BOUNDARY: &str = "X-PETSQUAD-TEST-BOUNDARY";

fn cors() -> tower_http::cors::CorsLayer { tower_http::cors::CorsLayer::very_permissive() }

async fn build_app() -> anyhow::Result<(Router, sea_orm::DatabaseConnection)> {
    let db = models::db::connect().await?;
    // Run migrations to ensure schema（重复运行可能会报唯一约束错误，忽略已应用的情况）
    if let Err(e) = migration::Migrator::up(&db, None).await {
        let msg = format!("{}", e);
        if msg.contains("duplicate key value violates unique constraint") {
            eprintln!("migrations already applied, continue: {}", msg);
        } else {
            return Err(e.into());
        }
    }
    let storage: Arc<dyn FileStorage> = Arc::new(MockFileStorage::default());
    let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::default());
    let state = auth::ServerState {
        db: db.clone(),
        auth: auth::ServerAuthConfig { jwt_secret: "test-secret".into(), access_token_mins: 60 },
        storage,
        sessions,
    };
    Ok((routes::build_router(cors(), state), db))
}

fn text_part(name: &str, value: &str) -> Vec<u8> {
    format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n").into_bytes()
}

fn file_part(name: &str, file_name: &str, bytes: &[u8]) -> Vec<u8> {
    let mut out = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: image/png\r\n\r\n"
    )
    .into_bytes();
    out.extend_from_slice(bytes);
    out.extend_from_slice(b"\r\n");
    out
}

fn multipart_body(parts: Vec<Vec<u8>>) -> Vec<u8> {
    let mut out = Vec::new();
    for p in parts {
        out.extend_from_slice(&p);
    }
    out.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    out
}

fn register_parts(login_id: &str, code: i32) -> Vec<Vec<u8>> {
    vec![
        text_part("loginId", login_id),
        text_part("password", "S3curePass!"),
        text_part("petName", "Monty"),
        text_part("age", "3"),
        text_part("gender", "male"),
        text_part("species", "cat"),
        text_part("code", &code.to_string()),
    ]
}

fn multipart_request(uri: &str, method: &str, token: Option<&str>, body: Vec<u8>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", format!("multipart/form-data; boundary={BOUNDARY}"));
    if let Some(t) = token {
        builder = builder.header("authorization", format!("Bearer {t}"));
    }
    builder.body(Body::from(body)).unwrap()
}

async fn body_json(resp: axum::response::Response) -> anyhow::Result<Value> {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

async fn seed_address(db: &sea_orm::DatabaseConnection) -> anyhow::Result<i32> {
    let code = (Uuid::new_v4().as_u128() % 1_000_000_000) as i32;
    models::address::create(db, code, "Mapo-gu").await?;
    Ok(code)
}

async fn register_and_login(
    app: &mut Router,
    db: &sea_orm::DatabaseConnection,
    login_id: &str,
) -> anyhow::Result<(Uuid, String)> {
    let code = seed_address(db).await?;
    let body = multipart_body(register_parts(login_id, code));
    let resp = app.call(multipart_request("/pets", "POST", None, body)).await?;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = body_json(resp).await?;
    let pet_id: Uuid = created["id"].as_str().unwrap().parse()?;

    let req = Request::builder()
        .method("POST")
        .uri("/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&json!({"login_id": login_id, "password": "S3curePass!"}))?))?;
    let resp = app.call(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let session = body_json(resp).await?;
    let token = session["access_token"].as_str().unwrap().to_string();
    Ok((pet_id, token))
}

#[tokio::test]
async fn test_register_login_and_read_profile() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
    let (mut app, db) = build_app().await?;

    let login_id = format!("pet_{}", Uuid::new_v4());
    let (pet_id, token) = register_and_login(&mut app, &db, &login_id).await?;

    // Authenticated profile read
    let req = Request::builder()
        .method("GET")
        .uri(format!("/pets/{pet_id}"))
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())?;
    let resp = app.call(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let profile = body_json(resp).await?;
    assert_eq!(profile["login_id"].as_str(), Some(login_id.as_str()));
    assert_eq!(profile["roles"][0].as_str(), Some("ROLE_USER"));
    // The password hash never appears in responses
    assert!(profile.get("password").is_none() && profile.get("password_hash").is_none());

    // Missing credentials -> 400, garbage token -> 401
    let req = Request::builder().method("GET").uri(format!("/pets/{pet_id}")).body(Body::empty())?;
    assert_eq!(app.call(req).await?.status(), StatusCode::BAD_REQUEST);
    let req = Request::builder()
        .method("GET")
        .uri(format!("/pets/{pet_id}"))
        .header("authorization", "Bearer not-a-jwt")
        .body(Body::empty())?;
    assert_eq!(app.call(req).await?.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn test_register_duplicate_login_conflict() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
    let (mut app, db) = build_app().await?;

    let login_id = format!("pet_{}", Uuid::new_v4());
    let code = seed_address(&db).await?;

    let resp = app
        .call(multipart_request("/pets", "POST", None, multipart_body(register_parts(&login_id, code))))
        .await?;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app
        .call(multipart_request("/pets", "POST", None, multipart_body(register_parts(&login_id, code))))
        .await?;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    Ok(())
}

#[tokio::test]
async fn test_register_unknown_address_code() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
    let (mut app, _db) = build_app().await?;

    let login_id = format!("pet_{}", Uuid::new_v4());
    // Negative codes are never seeded
    let resp = app
        .call(multipart_request("/pets", "POST", None, multipart_body(register_parts(&login_id, -1))))
        .await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_check_login_id_probe() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
    let (mut app, db) = build_app().await?;

    let login_id = format!("pet_{}", Uuid::new_v4());
    let req = Request::builder()
        .method("GET")
        .uri(format!("/pets/check-login-id?loginId={login_id}"))
        .body(Body::empty())?;
    let resp = app.call(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await?["exists"].as_bool(), Some(false));

    let code = seed_address(&db).await?;
    let resp = app
        .call(multipart_request("/pets", "POST", None, multipart_body(register_parts(&login_id, code))))
        .await?;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = Request::builder()
        .method("GET")
        .uri(format!("/pets/check-login-id?loginId={login_id}"))
        .body(Body::empty())?;
    let resp = app.call(req).await?;
    assert_eq!(body_json(resp).await?["exists"].as_bool(), Some(true));
    Ok(())
}

#[tokio::test]
async fn test_update_ownership_and_partial_merge() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
    let (mut app, db) = build_app().await?;

    let (pet_id, token) = register_and_login(&mut app, &db, &format!("pet_{}", Uuid::new_v4())).await?;
    let (_other_id, other_token) = register_and_login(&mut app, &db, &format!("pet_{}", Uuid::new_v4())).await?;

    // Foreign token cannot update this pet
    let body = multipart_body(vec![text_part("age", "9")]);
    let resp = app
        .call(multipart_request(&format!("/pets/{pet_id}"), "PATCH", Some(&other_token), body))
        .await?;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // Partial update: only age changes
    let body = multipart_body(vec![text_part("age", "4")]);
    let resp = app
        .call(multipart_request(&format!("/pets/{pet_id}"), "PATCH", Some(&token), body))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = body_json(resp).await?;
    assert_eq!(updated["age"].as_i64(), Some(4));
    assert_eq!(updated["pet_name"].as_str(), Some("Monty"));
    assert_eq!(updated["species"].as_str(), Some("cat"));
    Ok(())
}

#[tokio::test]
async fn test_post_creation_and_ownership() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
    let (mut app, db) = build_app().await?;

    let (pet_id, token) = register_and_login(&mut app, &db, &format!("pet_{}", Uuid::new_v4())).await?;
    let (other_id, _other_token) = register_and_login(&mut app, &db, &format!("pet_{}", Uuid::new_v4())).await?;

    // Declared pet id differs from the caller -> forbidden
    let body = multipart_body(vec![
        text_part("id", &other_id.to_string()),
        text_part("title", "first walk"),
        text_part("contents", "we went to the park"),
    ]);
    let resp = app.call(multipart_request("/posts", "POST", Some(&token), body)).await?;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // Owner creates a post with one image attached
    let body = multipart_body(vec![
        text_part("id", &pet_id.to_string()),
        text_part("title", "first walk"),
        text_part("contents", "we went to the park"),
        file_part("images", "walk.png", &[1, 2, 3]),
    ]);
    let resp = app.call(multipart_request("/posts", "POST", Some(&token), body)).await?;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = body_json(resp).await?;
    assert_eq!(created["pet_id"].as_str(), Some(pet_id.to_string().as_str()));
    assert_eq!(created["images"].as_array().map(|a| a.len()), Some(1));
    Ok(())
}

#[tokio::test]
async fn test_delete_pet_then_login_fails() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
    let (mut app, db) = build_app().await?;

    let login_id = format!("pet_{}", Uuid::new_v4());
    let (pet_id, token) = register_and_login(&mut app, &db, &login_id).await?;

    let req = Request::builder()
        .method("DELETE")
        .uri(format!("/pets/{pet_id}"))
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())?;
    let resp = app.call(req).await?;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = Request::builder()
        .method("POST")
        .uri("/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&json!({"login_id": login_id, "password": "S3curePass!"}))?))?;
    let resp = app.call(req).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

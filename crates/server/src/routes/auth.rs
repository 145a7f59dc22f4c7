use std::sync::Arc;

use axum::{Json, extract::{Request, State}, http::{Method, StatusCode}, middleware::Next, response::Response, Extension};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use uuid::Uuid;

use service::address::repo::seaorm::SeaOrmAddressRepository;
use service::auth::{AuthService, TokenProvider, domain::LoginInput};
use service::pet::{PetService, repo::seaorm::SeaOrmPetRepository};
use service::post::{PostService, repo::seaorm::SeaOrmPostRepository};
use service::session::SessionStore;
use service::storage::FileStorage;

use crate::errors::ApiError;

#[derive(Clone)]
pub struct ServerAuthConfig {
    pub jwt_secret: String,
    pub access_token_mins: i64,
}

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: ServerAuthConfig,
    pub storage: Arc<dyn FileStorage>,
    pub sessions: Arc<dyn SessionStore>,
}

impl ServerState {
    pub fn token_provider(&self) -> TokenProvider {
        TokenProvider::new(self.auth.jwt_secret.clone(), self.auth.access_token_mins)
    }

    pub fn pet_service(&self) -> PetService<SeaOrmPetRepository, SeaOrmAddressRepository> {
        PetService::new(
            Arc::new(SeaOrmPetRepository { db: self.db.clone() }),
            Arc::new(SeaOrmAddressRepository { db: self.db.clone() }),
            self.storage.clone(),
            self.sessions.clone(),
        )
    }

    pub fn post_service(&self) -> PostService<SeaOrmPostRepository, SeaOrmPetRepository> {
        PostService::new(
            Arc::new(SeaOrmPostRepository { db: self.db.clone() }),
            Arc::new(SeaOrmPetRepository { db: self.db.clone() }),
            self.storage.clone(),
        )
    }

    pub fn auth_service(&self) -> AuthService<SeaOrmPetRepository> {
        AuthService::new(
            Arc::new(SeaOrmPetRepository { db: self.db.clone() }),
            self.token_provider(),
            self.sessions.clone(),
        )
    }
}

/// Token-derived identity injected into request extensions by the bearer
/// middleware.
#[derive(Debug, Clone)]
pub struct AuthPet {
    pub id: Uuid,
    pub login_id: String,
}

#[derive(Serialize)]
pub struct LoginOutput {
    pub pet_id: Uuid,
    pub login_id: String,
    pub access_token: String,
    pub refresh_token: String,
}

#[utoipa::path(post, path = "/auth/login", tag = "auth", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged In"), (status = 401, description = "Unauthorized")))]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(input): Json<LoginInput>,
) -> Result<(CookieJar, Json<LoginOutput>), ApiError> {
    let session = state.auth_service().login(input).await?;

    let mut cookie = Cookie::new("auth_token", session.access_token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(false);
    cookie.set_same_site(SameSite::Lax);
    let jar = jar.add(cookie);

    let out = LoginOutput {
        pet_id: session.pet_id,
        login_id: session.login_id,
        access_token: session.access_token,
        refresh_token: session.refresh_token,
    };
    Ok((jar, Json(out)))
}

#[utoipa::path(post, path = "/auth/logout", tag = "auth", responses((status = 204, description = "Logged Out"), (status = 401, description = "Unauthorized")))]
pub async fn logout(
    State(state): State<ServerState>,
    Extension(auth): Extension<AuthPet>,
    jar: CookieJar,
) -> Result<(CookieJar, StatusCode), ApiError> {
    state.auth_service().logout(&auth.login_id).await?;
    let jar = jar.remove(Cookie::from("auth_token"));
    Ok((jar, StatusCode::NO_CONTENT))
}

/// 全局中间件：除健康检查、注册、登录与文档外，校验 Authorization: Bearer <token>
/// 缺失 token 返回 400，非法或过期返回 401；失败记录日志
pub async fn require_bearer_token_state(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let path = req.uri().path().to_string();
    let method = req.method().clone();

    // 白名单：健康检查、注册与登录、唯一性探测、Swagger 文档、CORS 预检
    if path == "/health"
        || path == "/auth/login"
        || (path == "/pets" && method == Method::POST)
        || path == "/pets/check-login-id"
        || path.starts_with("/docs")
        || path.starts_with("/api-docs")
        || method == Method::OPTIONS
    {
        return Ok(next.run(req).await);
    }

    // 读取 Authorization 头；如缺失则回退从 Cookie 中解析 auth_token
    let token = {
        let authz = req
            .headers()
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        if let Some(h) = authz {
            let prefix = "Bearer ";
            if !h.starts_with(prefix) {
                tracing::warn!(path = %path, "invalid Authorization format (expect Bearer)");
                return Err(StatusCode::UNAUTHORIZED);
            }
            h[prefix.len()..].to_string()
        } else {
            // Cookie 回退：解析 Cookie 头获取 auth_token
            let cookie_header = req
                .headers()
                .get(axum::http::header::COOKIE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("");

            let mut token_val: Option<String> = None;
            for part in cookie_header.split(';') {
                let kv = part.trim();
                if let Some(rest) = kv.strip_prefix("auth_token=") {
                    token_val = Some(rest.to_string());
                    break;
                }
            }

            match token_val {
                Some(t) if !t.is_empty() => t,
                _ => {
                    tracing::warn!(path = %path, "missing Authorization header and auth_token cookie");
                    return Err(StatusCode::BAD_REQUEST);
                }
            }
        }
    };

    match state.token_provider().verify(&token) {
        Ok(claims) => {
            // 将 token 身份注入 request 扩展供后续 handler 使用
            req.extensions_mut().insert(AuthPet { id: claims.pet_id, login_id: claims.login_id });
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::error!(path = %path, err = %e, "token validation failed");
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}

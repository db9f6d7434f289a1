//! Authentication HTTP Handlers
//!
//! 사용자 인증과 관련된 HTTP 엔드포인트를 처리하는 핸들러 함수들입니다.
//! 이메일/비밀번호 로그인과 JWT 토큰 기반의 상태 없는 인증을 구현합니다.
//! 액세스 토큰은 응답 본문과 `access_token` HttpOnly 쿠키로 함께 전달되어
//! Bearer 헤더/쿠키 양쪽 클라이언트를 지원합니다.
//!
//! # Endpoints
//!
//! - `POST /auth/login` - 이메일/비밀번호 로그인
//! - `POST /auth/refresh` - 리프레시 토큰으로 토큰 갱신
//! - `POST /auth/verify` - JWT 토큰 검증
//! - `POST /auth/logout` - 쿠키 제거

use actix_web::{cookie::Cookie, post, web, HttpRequest, HttpResponse};
use serde_json::json;
use validator::Validate;
use crate::{
    domain::dto::users::{
        request::{LoginRequest, RefreshTokenRequest},
        response::LoginResponse,
    },
    services::{auth::TokenService, users::user_service::UserService},
};
use crate::errors::errors::AppError;

/// 액세스 토큰을 담은 HttpOnly 쿠키를 생성합니다
fn access_token_cookie(token: &str) -> Cookie<'static> {
    Cookie::build("access_token", token.to_string())
        .path("/")
        .http_only(true)
        .finish()
}

/// 로그인 핸들러
///
/// 이메일과 패스워드를 사용한 로그인을 처리합니다.
/// 성공 시 JWT 토큰 쌍을 본문으로 반환하고 액세스 토큰 쿠키를 설정합니다.
///
/// # Endpoint
/// `POST /auth/login`
#[post("/login")]
pub async fn login(
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    // 유효성 검사
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let user_service = UserService::instance();
    let token_service = TokenService::instance();

    // 사용자 인증
    let user = user_service
        .verify_password(&payload.email, &payload.password)
        .await?;

    let user_id = user.id_string().unwrap_or_default();

    log::info!("로그인 성공 - 사용자: {}, ID: {}", payload.email, user_id);

    // JWT 토큰 쌍 생성
    let token_pair = token_service
        .generate_token_pair(&user)
        .map_err(|e| {
            log::error!("토큰 생성 실패 - 사용자: {}, 에러: {}", payload.email, e);
            e
        })?;

    // 마지막 로그인 시간 기록 (실패해도 로그인은 성공)
    if let Err(e) = user_service.touch_last_login(&user_id).await {
        log::warn!("마지막 로그인 시간 기록 실패: {}", e);
    }

    let cookie = access_token_cookie(&token_pair.access_token);
    let refresh_token = token_pair.refresh_token.clone().unwrap_or_default();
    let response = LoginResponse::with_refresh_token(
        user,
        token_pair.access_token,
        token_pair.expires_in,
        refresh_token,
    );

    Ok(HttpResponse::Ok().cookie(cookie).json(response))
}

/// 토큰 갱신 핸들러
///
/// 유효한 리프레시 토큰으로 새 토큰 쌍을 발급받습니다.
///
/// # Endpoint
/// `POST /auth/refresh`
#[post("/refresh")]
pub async fn refresh_tokens(
    payload: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let token_service = TokenService::instance();
    let user_service = UserService::instance();

    // 리프레시 토큰 검증 후, 역할 변경(강사 전환 등)이 토큰에 반영되도록
    // DB 기준의 최신 사용자 정보로 토큰을 재발급
    let user_id = token_service.extract_user_id(&payload.refresh_token)?;
    let user = user_service.get_user_entity(&user_id).await?;

    if !user.can_login() {
        return Err(AppError::AuthenticationError("비활성화된 계정입니다".to_string()));
    }

    let token_pair = token_service.generate_token_pair(&user)?;
    let cookie = access_token_cookie(&token_pair.access_token);

    log::debug!("토큰 갱신: 사용자 ID {}", user_id);

    Ok(HttpResponse::Ok().cookie(cookie).json(json!({
        "access_token": token_pair.access_token,
        "refresh_token": token_pair.refresh_token,
        "expires_in": token_pair.expires_in,
        "token_type": "Bearer"
    })))
}

/// 토큰 검증 엔드포인트
///
/// 클라이언트가 보유한 JWT 토큰의 유효성을 검증합니다.
///
/// # Endpoint
/// `POST /auth/verify`
#[post("/verify")]
pub async fn verify_token(
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let token_service = TokenService::instance();

    // Authorization 헤더에서 토큰 추출
    let auth_header = req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError("Authorization 헤더가 없습니다".to_string()))?;

    let token = token_service.extract_bearer_token(auth_header)?;
    let claims = token_service.verify_token(token)?;

    Ok(HttpResponse::Ok().json(json!({
        "valid": true,
        "user_id": claims.sub,
        "roles": claims.roles
    })))
}

/// 로그아웃 핸들러
///
/// 액세스 토큰 쿠키를 제거합니다. JWT는 상태가 없으므로 서버 측
/// 세션 무효화는 수행하지 않습니다.
///
/// # Endpoint
/// `POST /auth/logout`
#[post("/logout")]
pub async fn logout() -> Result<HttpResponse, AppError> {
    let mut cookie = access_token_cookie("");
    cookie.make_removal();

    Ok(HttpResponse::Ok().cookie(cookie).json(json!({
        "message": "로그아웃되었습니다"
    })))
}

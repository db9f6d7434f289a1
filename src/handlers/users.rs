//! # User Management HTTP Handlers
//!
//! 사용자 관리와 관련된 HTTP 엔드포인트를 처리하는 핸들러 함수들입니다.
//! 회원가입부터 OTP 이메일 인증, 비밀번호 재설정, 프로필 관리, 강사 전환까지
//! 계정 생명주기 전체를 담당하며, RESTful API 설계 원칙을 따릅니다.
//!
//! ## 엔드포인트 구성
//!
//! ### Public 라우트 (인증 불필요)
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `POST` | `/users` | 회원가입 (OTP 인증 메일 발송) | 201 Created |
//! | `POST` | `/users/verify-email` | OTP 이메일 인증 | 200 OK |
//! | `POST` | `/users/password-reset` | 재설정 OTP 요청 | 200 OK |
//! | `POST` | `/users/password-reset/confirm` | 재설정 확정 | 200 OK |
//!
//! ### Protected 라우트 (인증 필요)
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | `GET` | `/me` | 내 정보 조회 |
//! | `PATCH` | `/me` | 프로필 수정 |
//! | `POST` | `/me/instructor` | 강사 전환 |
//! | `DELETE` | `/me` | 계정 삭제 |
//!
//! ## 회원가입 보상 처리
//!
//! 회원가입 직후 OTP 인증 메일 발송에 실패하면 방금 생성한 계정을
//! 삭제하고 에러를 반환합니다. 인증 메일을 받을 수 없는 유령 계정이
//! 남지 않도록 하는 보상 처리입니다.

use actix_web::{delete, get, patch, post, web, HttpResponse};
use serde_json::json;
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::users::request::{
    BecomeInstructorRequest, ConfirmPasswordResetRequest, RegisterRequest,
    RequestPasswordResetRequest, UpdateProfileRequest, VerifyEmailRequest,
};
use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::services::users::user_service::UserService;

/// 회원가입 핸들러
///
/// 새로운 수강생 계정을 생성하고 OTP 인증 메일을 발송합니다.
/// 인증 완료 전에는 로그인할 수 없습니다.
///
/// # Endpoint
/// `POST /users`
///
/// # 요청 본문
///
/// ```json
/// {
///   "email": "user@example.com",
///   "username": "john_doe",
///   "display_name": "John Doe",
///   "password": "SecurePass123",
///   "password_confirm": "SecurePass123"
/// }
/// ```
#[post("")]
pub async fn register(
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    // 유효성 검사
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = UserService::instance();
    let response = service.register(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(response))
}

/// OTP 이메일 인증 핸들러
///
/// 가입 시 발송된 6자리 코드로 이메일 소유를 인증합니다.
///
/// # Endpoint
/// `POST /users/verify-email`
#[post("/verify-email")]
pub async fn verify_email(
    payload: web::Json<VerifyEmailRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = UserService::instance();
    let user = service.verify_email(&payload.email, &payload.code).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "이메일 인증이 완료되었습니다",
        "user": user
    })))
}

/// 비밀번호 재설정 OTP 요청 핸들러
///
/// 계정 존재 여부와 무관하게 성공으로 응답합니다 (계정 열거 방지).
///
/// # Endpoint
/// `POST /users/password-reset`
#[post("/password-reset")]
pub async fn request_password_reset(
    payload: web::Json<RequestPasswordResetRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = UserService::instance();
    service.request_password_reset(&payload.email).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "해당 이메일로 재설정 코드를 발송했습니다"
    })))
}

/// 비밀번호 재설정 확정 핸들러
///
/// # Endpoint
/// `POST /users/password-reset/confirm`
#[post("/password-reset/confirm")]
pub async fn confirm_password_reset(
    payload: web::Json<ConfirmPasswordResetRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = UserService::instance();
    service
        .confirm_password_reset(&payload.email, &payload.code, &payload.new_password)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "비밀번호가 재설정되었습니다"
    })))
}

/// 내 정보 조회 핸들러
///
/// # Endpoint
/// `GET /me`
#[get("")]
pub async fn get_me(
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let service = UserService::instance();
    let response = service.get_user_by_id(&user.user_id).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 프로필 수정 핸들러
///
/// 제공된 필드만 부분 업데이트합니다.
///
/// # Endpoint
/// `PATCH /me`
#[patch("")]
pub async fn update_me(
    user: AuthenticatedUser,
    payload: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = UserService::instance();
    let response = service.update_profile(&user.user_id, payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 강사 전환 핸들러
///
/// `instructor` 역할을 추가합니다. 새 역할은 다음 토큰 발급부터
/// 반영되므로 클라이언트는 토큰을 갱신해야 합니다.
///
/// # Endpoint
/// `POST /me/instructor`
#[post("/instructor")]
pub async fn become_instructor(
    user: AuthenticatedUser,
    payload: web::Json<BecomeInstructorRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = UserService::instance();
    let response = service.become_instructor(&user.user_id, payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "강사 전환이 완료되었습니다. 토큰을 갱신해주세요",
        "user": response
    })))
}

/// 계정 삭제 핸들러
///
/// 물리적 삭제이며 복구가 불가능합니다.
///
/// # Endpoint
/// `DELETE /me`
#[delete("")]
pub async fn delete_me(
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let service = UserService::instance();
    service.delete_user(&user.user_id).await?;

    Ok(HttpResponse::NoContent().finish())
}

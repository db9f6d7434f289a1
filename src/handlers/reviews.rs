//! Review HTTP Handlers
//!
//! 리뷰 작성/수정/삭제(수강생), 목록 조회(공개), 답글(강사),
//! 심사(관리자) 엔드포인트를 처리하는 핸들러 함수들입니다.
//!
//! # Endpoints
//!
//! ## Public
//! - `GET /courses/{course_id}/reviews` - 강의의 승인된 리뷰 목록
//!
//! ## Student (인증 필요)
//! - `POST /reviews` - 리뷰 작성 (구매 확인)
//! - `PATCH /reviews/{id}` - 본인 리뷰 수정 (재심사 대기)
//! - `DELETE /reviews/{id}` - 본인 리뷰 삭제
//! - `POST /reviews/{id}/helpful` - 도움됨 투표
//! - `POST /reviews/{id}/reply` - 강사 답글
//!
//! ## Admin (admin 역할 필요)
//! - `GET /admin/reviews/pending` - 심사 대기 목록
//! - `POST /admin/reviews/{id}/moderate` - 승인/거절

use actix_web::{delete, get, patch, post, web, HttpResponse};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::common::PageQuery;
use crate::domain::dto::reviews::request::{
    CreateReviewRequest, ModerateReviewRequest, ReplyReviewRequest, UpdateReviewRequest,
};
use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::services::reviews::review_service::ReviewService;

/// 강의 리뷰 목록 핸들러 (승인된 리뷰만)
///
/// # Endpoint
/// `GET /courses/{course_id}/reviews?page=1&per_page=20`
#[get("/{course_id}/reviews")]
pub async fn list_course_reviews(
    course_id: web::Path<String>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let service = ReviewService::instance();
    let response = service.list_course_reviews(&course_id, query.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 리뷰 작성 핸들러
///
/// 수강 등록을 보유한 강의에만 작성할 수 있으며,
/// 작성된 리뷰는 심사 대기 상태로 시작합니다.
///
/// # Endpoint
/// `POST /reviews`
#[post("")]
pub async fn create_review(
    student: AuthenticatedUser,
    payload: web::Json<CreateReviewRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = ReviewService::instance();
    let response = service.create_review(&student, payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(response))
}

/// 리뷰 수정 핸들러
///
/// 수정된 리뷰는 다시 심사 대기 상태가 됩니다.
///
/// # Endpoint
/// `PATCH /reviews/{review_id}`
#[patch("/{review_id}")]
pub async fn update_review(
    student: AuthenticatedUser,
    review_id: web::Path<String>,
    payload: web::Json<UpdateReviewRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = ReviewService::instance();
    let response = service
        .update_review(&student, &review_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 리뷰 삭제 핸들러 (작성자 또는 관리자)
///
/// # Endpoint
/// `DELETE /reviews/{review_id}`
#[delete("/{review_id}")]
pub async fn delete_review(
    viewer: AuthenticatedUser,
    review_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let service = ReviewService::instance();
    service.delete_review(&viewer, &review_id).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// 도움됨 투표 핸들러
///
/// # Endpoint
/// `POST /reviews/{review_id}/helpful`
#[post("/{review_id}/helpful")]
pub async fn vote_helpful(
    _viewer: AuthenticatedUser,
    review_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let service = ReviewService::instance();
    service.vote_helpful(&review_id).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// 강사 답글 핸들러
///
/// 리뷰 대상 강의의 소유 강사만 답글을 달 수 있습니다.
///
/// # Endpoint
/// `POST /reviews/{review_id}/reply`
#[post("/{review_id}/reply")]
pub async fn reply_to_review(
    instructor: AuthenticatedUser,
    review_id: web::Path<String>,
    payload: web::Json<ReplyReviewRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = ReviewService::instance();
    let response = service
        .reply_to_review(&instructor, &review_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 심사 대기 리뷰 목록 핸들러 (관리자 전용)
///
/// # Endpoint
/// `GET /admin/reviews/pending?page=1`
#[get("/pending")]
pub async fn list_pending_reviews(
    _admin: AuthenticatedUser,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let service = ReviewService::instance();
    let response = service.list_pending_reviews(query.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 리뷰 심사 핸들러 (관리자 전용)
///
/// 승인 시 강의 평점 집계에 반영됩니다.
///
/// # Endpoint
/// `POST /admin/reviews/{review_id}/moderate`
#[post("/{review_id}/moderate")]
pub async fn moderate_review(
    _admin: AuthenticatedUser,
    review_id: web::Path<String>,
    payload: web::Json<ModerateReviewRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = ReviewService::instance();
    let response = service.moderate_review(&review_id, payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}

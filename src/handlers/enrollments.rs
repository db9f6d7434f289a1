//! Enrollment HTTP Handlers
//!
//! 수강 등록, 진도 추적, 노트/북마크 엔드포인트를 처리하는 핸들러 함수들입니다.
//! 모든 라우트는 인증이 필요하며 본인의 수강 등록에만 접근할 수 있습니다.
//!
//! # Endpoints
//!
//! - `POST /enrollments` - 무료 강의 수강 등록
//! - `GET /enrollments` - 내 수강 목록
//! - `GET /enrollments/{id}` - 수강 상세 (진도/노트/북마크 포함)
//! - `POST /enrollments/{id}/progress` - 강의(lecture) 완료 기록
//! - `POST /enrollments/{id}/notes` - 노트 추가
//! - `DELETE /enrollments/{id}/notes/{note_id}` - 노트 삭제
//! - `POST /enrollments/{id}/bookmarks` - 북마크 추가
//! - `DELETE /enrollments/{id}/bookmarks/{bookmark_id}` - 북마크 삭제

use actix_web::{delete, get, post, web, HttpResponse};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::enrollments::request::{
    AddBookmarkRequest, AddNoteRequest, CompleteLectureRequest, EnrollRequest,
};
use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::services::enrollments::enrollment_service::EnrollmentService;

/// 무료 강의 수강 등록 핸들러
///
/// 유료 강의는 결제를 통해서만 등록되며, 이 엔드포인트는 402를 반환합니다.
///
/// # Endpoint
/// `POST /enrollments`
#[post("")]
pub async fn enroll(
    student: AuthenticatedUser,
    payload: web::Json<EnrollRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = EnrollmentService::instance();
    let response = service.enroll_free(&student.user_id, &payload.course_id).await?;

    Ok(HttpResponse::Created().json(response))
}

/// 내 수강 목록 핸들러
///
/// # Endpoint
/// `GET /enrollments`
#[get("")]
pub async fn my_enrollments(
    student: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let service = EnrollmentService::instance();
    let response = service.my_enrollments(&student.user_id).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 수강 상세 조회 핸들러
///
/// # Endpoint
/// `GET /enrollments/{enrollment_id}`
#[get("/{enrollment_id}")]
pub async fn get_enrollment(
    student: AuthenticatedUser,
    enrollment_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let service = EnrollmentService::instance();
    let response = service.get_enrollment(&student.user_id, &enrollment_id).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 강의(lecture) 완료 기록 핸들러
///
/// 진도율을 재계산하며, 100% 도달 시 수료 상태로 전환됩니다.
///
/// # Endpoint
/// `POST /enrollments/{enrollment_id}/progress`
#[post("/{enrollment_id}/progress")]
pub async fn complete_lecture(
    student: AuthenticatedUser,
    enrollment_id: web::Path<String>,
    payload: web::Json<CompleteLectureRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = EnrollmentService::instance();
    let response = service
        .complete_lecture(&student.user_id, &enrollment_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 노트 추가 핸들러
///
/// # Endpoint
/// `POST /enrollments/{enrollment_id}/notes`
#[post("/{enrollment_id}/notes")]
pub async fn add_note(
    student: AuthenticatedUser,
    enrollment_id: web::Path<String>,
    payload: web::Json<AddNoteRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = EnrollmentService::instance();
    let response = service
        .add_note(&student.user_id, &enrollment_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(response))
}

/// 노트 삭제 핸들러
///
/// # Endpoint
/// `DELETE /enrollments/{enrollment_id}/notes/{note_id}`
#[delete("/{enrollment_id}/notes/{note_id}")]
pub async fn remove_note(
    student: AuthenticatedUser,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (enrollment_id, note_id) = path.into_inner();

    let service = EnrollmentService::instance();
    let response = service.remove_note(&student.user_id, &enrollment_id, &note_id).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 북마크 추가 핸들러
///
/// # Endpoint
/// `POST /enrollments/{enrollment_id}/bookmarks`
#[post("/{enrollment_id}/bookmarks")]
pub async fn add_bookmark(
    student: AuthenticatedUser,
    enrollment_id: web::Path<String>,
    payload: web::Json<AddBookmarkRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = EnrollmentService::instance();
    let response = service
        .add_bookmark(&student.user_id, &enrollment_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(response))
}

/// 북마크 삭제 핸들러
///
/// # Endpoint
/// `DELETE /enrollments/{enrollment_id}/bookmarks/{bookmark_id}`
#[delete("/{enrollment_id}/bookmarks/{bookmark_id}")]
pub async fn remove_bookmark(
    student: AuthenticatedUser,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (enrollment_id, bookmark_id) = path.into_inner();

    let service = EnrollmentService::instance();
    let response = service.remove_bookmark(&student.user_id, &enrollment_id, &bookmark_id).await?;

    Ok(HttpResponse::Ok().json(response))
}

//! Course HTTP Handlers
//!
//! 강의 탐색(공개)과 강의 관리(강사 전용) 엔드포인트를 처리하는
//! 핸들러 함수들입니다.
//!
//! # Endpoints
//!
//! ## Public (선택적 인증 - 로그인 시 수강 여부에 따라 커리큘럼 노출)
//! - `GET /courses` - 목록 조회 (필터/정렬/페이지네이션)
//! - `GET /courses/recommended` - 가중치 점수 기반 추천
//! - `GET /courses/{slug}` - 슬러그로 상세 조회
//!
//! ## Instructor (instructor 역할 필요)
//! - `POST /instructor/courses` - 강의 생성 (초안)
//! - `GET /instructor/courses` - 내 강의 목록
//! - `GET /instructor/courses/{course_id}` - 수정용 상세 조회
//! - `PATCH /instructor/courses/{course_id}` - 정보 수정
//! - `DELETE /instructor/courses/{course_id}` - 삭제 (초안만)
//! - `POST /instructor/courses/{course_id}/sections` - 섹션 추가
//! - `DELETE /instructor/courses/{course_id}/sections/{section_id}` - 섹션 제거
//! - `POST /instructor/courses/{course_id}/sections/{section_id}/lectures` - 강의 추가
//! - `POST /instructor/courses/{course_id}/publish` - 공개
//! - `POST /instructor/courses/{course_id}/archive` - 보관

use actix_web::{delete, get, patch, post, web, HttpResponse};
use serde::Deserialize;
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::courses::request::{
    AddLectureRequest, AddSectionRequest, CourseListQuery, CreateCourseRequest, UpdateCourseRequest,
};
use crate::domain::models::auth::authenticated_user::{AuthenticatedUser, OptionalUser};
use crate::services::courses::{course_service::CourseService, recommendation_service::RecommendationService};

/// 추천 목록 쿼리 파라미터
#[derive(Debug, Deserialize)]
pub struct RecommendQuery {
    pub limit: Option<usize>,
}

/// 강의 목록 조회 핸들러
///
/// # Endpoint
/// `GET /courses?category=programming&level=beginner&search=rust&sort=popular&page=1`
#[get("")]
pub async fn list_courses(
    query: web::Query<CourseListQuery>,
) -> Result<HttpResponse, AppError> {
    query.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = CourseService::instance();
    let response = service.list_courses(query.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 추천 강의 목록 핸들러
///
/// 로그인한 경우 수강 이력 기반 맞춤 추천, 비로그인 시 인기/평점 순위를
/// 반환합니다.
///
/// # Endpoint
/// `GET /courses/recommended?limit=10`
#[get("/recommended")]
pub async fn recommended_courses(
    viewer: OptionalUser,
    query: web::Query<RecommendQuery>,
) -> Result<HttpResponse, AppError> {
    let limit = query.limit.unwrap_or(10).clamp(1, 50);

    let service = RecommendationService::instance();
    let viewer_id = viewer.0.as_ref().map(|u| u.user_id.as_str());
    let response = service.recommend(viewer_id, limit).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 강의 상세 조회 핸들러 (슬러그 기준)
///
/// 수강생/소유 강사/관리자에게는 영상 URL을 포함한 전체 커리큘럼이,
/// 그 외에는 미리보기 강의만 노출됩니다.
///
/// # Endpoint
/// `GET /courses/{slug}`
#[get("/{slug}")]
pub async fn get_course_by_slug(
    slug: web::Path<String>,
    viewer: OptionalUser,
) -> Result<HttpResponse, AppError> {
    let service = CourseService::instance();
    let response = service.get_course_by_slug(&slug, viewer.0.as_ref()).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 강의 생성 핸들러 (초안 상태)
///
/// # Endpoint
/// `POST /instructor/courses`
#[post("")]
pub async fn create_course(
    instructor: AuthenticatedUser,
    payload: web::Json<CreateCourseRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = CourseService::instance();
    let response = service.create_course(&instructor, payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(response))
}

/// 내 강의 목록 핸들러 (초안 포함)
///
/// # Endpoint
/// `GET /instructor/courses`
#[get("")]
pub async fn my_courses(
    instructor: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let service = CourseService::instance();
    let response = service.my_courses(&instructor).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 수정용 강의 상세 조회 핸들러
///
/// # Endpoint
/// `GET /instructor/courses/{course_id}`
#[get("/{course_id}")]
pub async fn get_my_course(
    instructor: AuthenticatedUser,
    course_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let service = CourseService::instance();
    let response = service.get_course_by_id(&course_id, &instructor).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 강의 정보 수정 핸들러
///
/// # Endpoint
/// `PATCH /instructor/courses/{course_id}`
#[patch("/{course_id}")]
pub async fn update_course(
    instructor: AuthenticatedUser,
    course_id: web::Path<String>,
    payload: web::Json<UpdateCourseRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = CourseService::instance();
    let response = service.update_course(&instructor, &course_id, payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 강의 삭제 핸들러 (초안만 가능)
///
/// # Endpoint
/// `DELETE /instructor/courses/{course_id}`
#[delete("/{course_id}")]
pub async fn delete_course(
    instructor: AuthenticatedUser,
    course_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let service = CourseService::instance();
    service.delete_course(&instructor, &course_id).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// 섹션 추가 핸들러
///
/// # Endpoint
/// `POST /instructor/courses/{course_id}/sections`
#[post("/{course_id}/sections")]
pub async fn add_section(
    instructor: AuthenticatedUser,
    course_id: web::Path<String>,
    payload: web::Json<AddSectionRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = CourseService::instance();
    let response = service.add_section(&instructor, &course_id, payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(response))
}

/// 섹션 제거 핸들러
///
/// # Endpoint
/// `DELETE /instructor/courses/{course_id}/sections/{section_id}`
#[delete("/{course_id}/sections/{section_id}")]
pub async fn remove_section(
    instructor: AuthenticatedUser,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (course_id, section_id) = path.into_inner();

    let service = CourseService::instance();
    let response = service.remove_section(&instructor, &course_id, &section_id).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 강의(lecture) 추가 핸들러
///
/// # Endpoint
/// `POST /instructor/courses/{course_id}/sections/{section_id}/lectures`
#[post("/{course_id}/sections/{section_id}/lectures")]
pub async fn add_lecture(
    instructor: AuthenticatedUser,
    path: web::Path<(String, String)>,
    payload: web::Json<AddLectureRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let (course_id, section_id) = path.into_inner();

    let service = CourseService::instance();
    let response = service
        .add_lecture(&instructor, &course_id, &section_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(response))
}

/// 강의 공개 핸들러
///
/// 최소 1개의 강의(lecture)와 상세 설명이 있어야 공개할 수 있습니다.
///
/// # Endpoint
/// `POST /instructor/courses/{course_id}/publish`
#[post("/{course_id}/publish")]
pub async fn publish_course(
    instructor: AuthenticatedUser,
    course_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let service = CourseService::instance();
    let response = service.publish_course(&instructor, &course_id).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 강의 보관 핸들러 (신규 구매 차단)
///
/// # Endpoint
/// `POST /instructor/courses/{course_id}/archive`
#[post("/{course_id}/archive")]
pub async fn archive_course(
    instructor: AuthenticatedUser,
    course_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let service = CourseService::instance();
    let response = service.archive_course(&instructor, &course_id).await?;

    Ok(HttpResponse::Ok().json(response))
}

//! Cart HTTP Handlers
//!
//! 장바구니 엔드포인트를 처리하는 핸들러 함수들입니다.
//! 모든 라우트는 인증이 필요하며 본인의 장바구니에만 접근합니다.
//!
//! # Endpoints
//!
//! - `GET /cart` - 장바구니 조회 (서버 계산 총액 포함)
//! - `POST /cart/items` - 강의 담기
//! - `DELETE /cart/items/{course_id}` - 강의 제거
//! - `DELETE /cart` - 비우기

use actix_web::{delete, get, post, web, HttpResponse};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::carts::request::AddCartItemRequest;
use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::services::carts::cart_service::CartService;

/// 장바구니 조회 핸들러
///
/// # Endpoint
/// `GET /cart`
#[get("")]
pub async fn get_cart(
    student: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let service = CartService::instance();
    let response = service.get_cart(&student).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 장바구니 담기 핸들러
///
/// # Endpoint
/// `POST /cart/items`
#[post("/items")]
pub async fn add_cart_item(
    student: AuthenticatedUser,
    payload: web::Json<AddCartItemRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = CartService::instance();
    let response = service.add_item(&student, &payload.course_id).await?;

    Ok(HttpResponse::Created().json(response))
}

/// 장바구니 항목 제거 핸들러
///
/// # Endpoint
/// `DELETE /cart/items/{course_id}`
#[delete("/items/{course_id}")]
pub async fn remove_cart_item(
    student: AuthenticatedUser,
    course_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let service = CartService::instance();
    let response = service.remove_item(&student, &course_id).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 장바구니 비우기 핸들러
///
/// # Endpoint
/// `DELETE /cart`
#[delete("")]
pub async fn clear_cart(
    student: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let service = CartService::instance();
    let response = service.clear(&student).await?;

    Ok(HttpResponse::Ok().json(response))
}

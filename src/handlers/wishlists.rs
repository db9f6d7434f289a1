//! Wishlist HTTP Handlers
//!
//! 위시리스트 엔드포인트를 처리하는 핸들러 함수들입니다.
//! 모든 라우트는 인증이 필요하며 본인의 위시리스트에만 접근합니다.
//!
//! # Endpoints
//!
//! - `GET /wishlist` - 위시리스트 조회 (조회 시점의 강의 정보)
//! - `POST /wishlist/items` - 강의 찜하기
//! - `DELETE /wishlist/items/{course_id}` - 찜 해제
//! - `POST /wishlist/items/{course_id}/move-to-cart` - 장바구니로 옮기기

use actix_web::{delete, get, post, web, HttpResponse};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::carts::request::AddWishlistItemRequest;
use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::services::carts::wishlist_service::WishlistService;

/// 위시리스트 조회 핸들러
///
/// # Endpoint
/// `GET /wishlist`
#[get("")]
pub async fn get_wishlist(
    student: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let service = WishlistService::instance();
    let response = service.get_wishlist(&student).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 찜하기 핸들러
///
/// # Endpoint
/// `POST /wishlist/items`
#[post("/items")]
pub async fn add_wishlist_item(
    student: AuthenticatedUser,
    payload: web::Json<AddWishlistItemRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = WishlistService::instance();
    let response = service.add_item(&student, &payload.course_id).await?;

    Ok(HttpResponse::Created().json(response))
}

/// 찜 해제 핸들러
///
/// # Endpoint
/// `DELETE /wishlist/items/{course_id}`
#[delete("/items/{course_id}")]
pub async fn remove_wishlist_item(
    student: AuthenticatedUser,
    course_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let service = WishlistService::instance();
    let response = service.remove_item(&student, &course_id).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 장바구니로 옮기기 핸들러
///
/// 장바구니 담기와 동일한 검증을 거치며, 성공 시 위시리스트에서 제거됩니다.
///
/// # Endpoint
/// `POST /wishlist/items/{course_id}/move-to-cart`
#[post("/items/{course_id}/move-to-cart")]
pub async fn move_to_cart(
    student: AuthenticatedUser,
    course_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let service = WishlistService::instance();
    let response = service.move_to_cart(&student, &course_id).await?;

    Ok(HttpResponse::Ok().json(response))
}

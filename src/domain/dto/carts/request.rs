//! 장바구니/위시리스트 요청 DTO

use serde::Deserialize;
use validator::Validate;

/// 장바구니 담기 요청 DTO
#[derive(Debug, Deserialize, Validate)]
pub struct AddCartItemRequest {
    /// 담을 강의 ID
    #[validate(length(equal = 24, message = "유효하지 않은 강의 ID 형식입니다"))]
    pub course_id: String,
}

/// 위시리스트 찜 요청 DTO
#[derive(Debug, Deserialize, Validate)]
pub struct AddWishlistItemRequest {
    /// 찜할 강의 ID
    #[validate(length(equal = 24, message = "유효하지 않은 강의 ID 형식입니다"))]
    pub course_id: String,
}

//! 장바구니/위시리스트 응답 DTO

use serde::{Deserialize, Serialize};
use mongodb::bson::DateTime;
use crate::domain::dto::courses::response::CourseSummaryResponse;
use crate::domain::entities::carts::cart::{Cart, CartItem, CartTotals};

/// 장바구니 항목 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItemResponse {
    pub course_id: String,
    pub title: String,
    pub unit_price_cents: i64,
    pub currency: String,
    pub added_at: DateTime,
}

impl From<&CartItem> for CartItemResponse {
    fn from(item: &CartItem) -> Self {
        Self {
            course_id: item.course_id.to_hex(),
            title: item.title.clone(),
            unit_price_cents: item.unit_price_cents,
            currency: item.currency.clone(),
            added_at: item.added_at,
        }
    }
}

/// 장바구니 응답 DTO (서버 계산 총액 포함)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartResponse {
    pub items: Vec<CartItemResponse>,
    pub totals: CartTotals,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        let totals = cart.totals();

        Self {
            items: cart.items.iter().map(CartItemResponse::from).collect(),
            totals,
        }
    }
}

/// 위시리스트 응답 DTO
///
/// 찜한 시점이 아닌 조회 시점의 강의 정보(가격, 평점)를 반환합니다.
#[derive(Debug, Clone, Serialize)]
pub struct WishlistResponse {
    pub courses: Vec<CourseSummaryResponse>,
}

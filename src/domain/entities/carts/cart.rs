//! Cart & Wishlist Entity Implementation
//!
//! 장바구니와 위시리스트 엔티티의 핵심 구현체입니다.
//! 수강생당 1개의 장바구니/위시리스트 문서를 유지하며(student_id 유니크
//! 인덱스), 장바구니 항목은 담은 시점의 제목/가격 스냅샷을 보관합니다.
//! 총액 계산은 서버 측에서만 수행됩니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 장바구니 항목 서브도큐먼트
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    /// 담은 강의 ID
    pub course_id: ObjectId,
    /// 담은 시점의 강의 제목 스냅샷
    pub title: String,
    /// 담은 시점의 가격 스냅샷 (통화 최소 단위)
    pub unit_price_cents: i64,
    /// 통화 코드
    pub currency: String,
    /// 담은 시간
    pub added_at: DateTime,
}

impl CartItem {
    pub fn new(course_id: ObjectId, title: String, unit_price_cents: i64, currency: String) -> Self {
        Self {
            course_id,
            title,
            unit_price_cents,
            currency,
            added_at: DateTime::now(),
        }
    }
}

/// 장바구니 총액 계산 결과
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartTotals {
    /// 항목 가격 합계 (통화 최소 단위)
    pub subtotal_cents: i64,
    /// 항목 수
    pub item_count: u32,
}

impl CartTotals {
    /// 장바구니 항목에서 총액을 계산합니다
    pub fn calculate(items: &[CartItem]) -> Self {
        let subtotal_cents = items.iter().map(|i| i.unit_price_cents).sum();
        let item_count = items.len() as u32;

        Self {
            subtotal_cents,
            item_count,
        }
    }
}

/// 장바구니 엔티티
///
/// 수강생당 하나의 문서로 유지되며, 결제 완료 시 구매된 항목이 제거됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 소유 수강생 ID (unique)
    pub student_id: ObjectId,
    /// 담긴 항목 목록
    pub items: Vec<CartItem>,
    /// 생성 시간
    pub created_at: DateTime,
    /// 수정 시간
    pub updated_at: DateTime,
}

impl Cart {
    /// 새 빈 장바구니 생성
    pub fn new(student_id: ObjectId) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            student_id,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// 특정 강의가 담겨 있는지 확인
    pub fn contains_course(&self, course_id: &ObjectId) -> bool {
        self.items.iter().any(|i| &i.course_id == course_id)
    }

    /// 총액 계산
    pub fn totals(&self) -> CartTotals {
        CartTotals::calculate(&self.items)
    }
}

/// 위시리스트 항목 서브도큐먼트
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WishlistItem {
    /// 찜한 강의 ID
    pub course_id: ObjectId,
    /// 찜한 시간
    pub added_at: DateTime,
}

impl WishlistItem {
    pub fn new(course_id: ObjectId) -> Self {
        Self {
            course_id,
            added_at: DateTime::now(),
        }
    }
}

/// 위시리스트 엔티티
///
/// 수강생당 하나의 문서로 유지됩니다. 가격 스냅샷은 보관하지 않고
/// 조회 시점의 강의 정보를 사용합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wishlist {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 소유 수강생 ID (unique)
    pub student_id: ObjectId,
    /// 찜한 항목 목록
    pub items: Vec<WishlistItem>,
    /// 생성 시간
    pub created_at: DateTime,
    /// 수정 시간
    pub updated_at: DateTime,
}

impl Wishlist {
    /// 새 빈 위시리스트 생성
    pub fn new(student_id: ObjectId) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            student_id,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// 특정 강의가 찜되어 있는지 확인
    pub fn contains_course(&self, course_id: &ObjectId) -> bool {
        self.items.iter().any(|i| &i.course_id == course_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_totals() {
        let items = vec![
            CartItem::new(ObjectId::new(), "강의 A".to_string(), 49_900, "KRW".to_string()),
            CartItem::new(ObjectId::new(), "강의 B".to_string(), 30_000, "KRW".to_string()),
            CartItem::new(ObjectId::new(), "무료 강의".to_string(), 0, "KRW".to_string()),
        ];

        let totals = CartTotals::calculate(&items);

        assert_eq!(totals.subtotal_cents, 79_900);
        assert_eq!(totals.item_count, 3);
    }

    #[test]
    fn test_empty_cart_totals() {
        let totals = CartTotals::calculate(&[]);

        assert_eq!(totals.subtotal_cents, 0);
        assert_eq!(totals.item_count, 0);
    }

    #[test]
    fn test_cart_contains_course() {
        let mut cart = Cart::new(ObjectId::new());
        let course_id = ObjectId::new();

        assert!(!cart.contains_course(&course_id));

        cart.items.push(CartItem::new(course_id, "강의".to_string(), 10_000, "KRW".to_string()));
        assert!(cart.contains_course(&course_id));
        assert!(!cart.contains_course(&ObjectId::new()));
    }

    #[test]
    fn test_wishlist_contains_course() {
        let mut wishlist = Wishlist::new(ObjectId::new());
        let course_id = ObjectId::new();

        wishlist.items.push(WishlistItem::new(course_id));
        assert!(wishlist.contains_course(&course_id));
        assert!(!wishlist.contains_course(&ObjectId::new()));
    }
}

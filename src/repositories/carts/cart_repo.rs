//! # 장바구니 리포지토리 구현
//!
//! 장바구니 엔티티의 데이터 액세스 계층입니다.
//! 수강생당 1개 문서를 유지하며, 없으면 빈 장바구니를 생성해 반환하는
//! get-or-create 패턴을 제공합니다.

use std::sync::Arc;
use mongodb::{bson::{doc, oid::ObjectId}, options::IndexOptions, IndexModel};
use singleton_macro::repository;
use crate::{
    caching::redis::RedisClient,
    core::registry::Repository,
    db::Database,
    domain::entities::carts::cart::Cart,
};
use crate::errors::errors::AppError;

/// 장바구니 데이터 액세스 리포지토리
#[repository(name = "cart", collection = "carts")]
pub struct CartRepository {
    /// MongoDB 데이터베이스 연결
    db: Arc<Database>,

    /// Redis 캐시 클라이언트 (컬렉션 캐시 무효화용)
    redis: Arc<RedisClient>,
}

impl CartRepository {
    /// 수강생의 장바구니를 조회하고, 없으면 새로 생성합니다
    pub async fn find_or_create(&self, student_id: &ObjectId) -> Result<Cart, AppError> {
        let existing = self.collection::<Cart>()
            .find_one(doc! { "student_id": student_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(cart) = existing {
            return Ok(cart);
        }

        let mut cart = Cart::new(*student_id);
        let result = self.collection::<Cart>()
            .insert_one(&cart)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cart.id = result.inserted_id.as_object_id();

        Ok(cart)
    }

    /// 장바구니 문서 전체 저장
    pub async fn save(&self, cart: &Cart) -> Result<(), AppError> {
        let id = cart.id
            .ok_or_else(|| AppError::InternalError("저장할 장바구니에 ID가 없습니다".to_string()))?;

        self.collection::<Cart>()
            .replace_one(doc! { "_id": id }, cart)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    /// 데이터베이스 인덱스 생성
    ///
    /// `student_id` 유니크 인덱스로 수강생당 1개 문서를 보장합니다.
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let student_index = IndexModel::builder()
            .keys(doc! { "student_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("student_unique".to_string())
                .build())
            .build();

        self.collection::<Cart>()
            .create_indexes([student_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

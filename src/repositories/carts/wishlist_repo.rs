//! # 위시리스트 리포지토리 구현
//!
//! 위시리스트 엔티티의 데이터 액세스 계층입니다.
//! 장바구니와 동일한 get-or-create 패턴을 사용합니다.

use std::sync::Arc;
use mongodb::{bson::{doc, oid::ObjectId}, options::IndexOptions, IndexModel};
use singleton_macro::repository;
use crate::{
    caching::redis::RedisClient,
    core::registry::Repository,
    db::Database,
    domain::entities::carts::cart::Wishlist,
};
use crate::errors::errors::AppError;

/// 위시리스트 데이터 액세스 리포지토리
#[repository(name = "wishlist", collection = "wishlists")]
pub struct WishlistRepository {
    /// MongoDB 데이터베이스 연결
    db: Arc<Database>,

    /// Redis 캐시 클라이언트 (컬렉션 캐시 무효화용)
    redis: Arc<RedisClient>,
}

impl WishlistRepository {
    /// 수강생의 위시리스트를 조회하고, 없으면 새로 생성합니다
    pub async fn find_or_create(&self, student_id: &ObjectId) -> Result<Wishlist, AppError> {
        let existing = self.collection::<Wishlist>()
            .find_one(doc! { "student_id": student_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(wishlist) = existing {
            return Ok(wishlist);
        }

        let mut wishlist = Wishlist::new(*student_id);
        let result = self.collection::<Wishlist>()
            .insert_one(&wishlist)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        wishlist.id = result.inserted_id.as_object_id();

        Ok(wishlist)
    }

    /// 위시리스트 문서 전체 저장
    pub async fn save(&self, wishlist: &Wishlist) -> Result<(), AppError> {
        let id = wishlist.id
            .ok_or_else(|| AppError::InternalError("저장할 위시리스트에 ID가 없습니다".to_string()))?;

        self.collection::<Wishlist>()
            .replace_one(doc! { "_id": id }, wishlist)
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

        self.collection::<Wishlist>()
            .create_indexes([student_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

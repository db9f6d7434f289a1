//! # 리뷰 리포지토리 구현
//!
//! 리뷰 엔티티의 데이터 액세스 계층입니다.
//! (student_id, course_id) 복합 유니크 인덱스로 강의당 1개 리뷰 제한을
//! 저장소 레벨에서 보장합니다.

use std::sync::Arc;
use futures_util::stream::TryStreamExt;
use mongodb::{bson::{doc, oid::ObjectId}, options::IndexOptions, IndexModel};
use singleton_macro::repository;
use crate::{
    caching::redis::RedisClient,
    core::registry::Repository,
    db::Database,
    domain::entities::reviews::review::Review,
};
use crate::errors::errors::AppError;

/// 리뷰 데이터 액세스 리포지토리
#[repository(name = "review", collection = "reviews")]
pub struct ReviewRepository {
    /// MongoDB 데이터베이스 연결
    db: Arc<Database>,

    /// Redis 캐시 클라이언트 (컬렉션 캐시 무효화용)
    redis: Arc<RedisClient>,
}

impl ReviewRepository {
    /// ID로 리뷰 조회
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Review>, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 리뷰 ID 형식입니다".to_string()))?;

        self.collection::<Review>()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 수강생과 강의로 리뷰 조회 (중복 작성 검사용)
    pub async fn find_by_student_and_course(
        &self,
        student_id: &ObjectId,
        course_id: &ObjectId,
    ) -> Result<Option<Review>, AppError> {
        self.collection::<Review>()
            .find_one(doc! { "student_id": student_id, "course_id": course_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 강의의 승인된 리뷰 목록 조회 (최신순, 페이지네이션)
    ///
    /// 공개 목록에는 승인된 리뷰만 노출됩니다.
    pub async fn find_approved_by_course(
        &self,
        course_id: &ObjectId,
        skip: u64,
        limit: i64,
    ) -> Result<Vec<Review>, AppError> {
        let cursor = self.collection::<Review>()
            .find(doc! { "course_id": course_id, "status": "approved" })
            .sort(doc! { "created_at": -1 })
            .skip(skip)
            .limit(limit)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 강의의 승인된 리뷰 수 조회
    pub async fn count_approved_by_course(&self, course_id: &ObjectId) -> Result<u64, AppError> {
        self.collection::<Review>()
            .count_documents(doc! { "course_id": course_id, "status": "approved" })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 심사 대기 중인 리뷰 목록 조회 (관리자용, 오래된 순)
    pub async fn find_pending(&self, skip: u64, limit: i64) -> Result<Vec<Review>, AppError> {
        let cursor = self.collection::<Review>()
            .find(doc! { "status": "pending" })
            .sort(doc! { "created_at": 1 })
            .skip(skip)
            .limit(limit)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 새 리뷰 생성
    ///
    /// 같은 강의에 이미 리뷰가 있으면 거부합니다.
    pub async fn create(&self, mut review: Review) -> Result<Review, AppError> {
        if self
            .find_by_student_and_course(&review.student_id, &review.course_id)
            .await?
            .is_some()
        {
            return Err(AppError::ConflictError("이미 이 강의에 리뷰를 작성했습니다".to_string()));
        }

        let result = self.collection::<Review>()
            .insert_one(&review)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        review.id = result.inserted_id.as_object_id();

        let _ = self.invalidate_collection_cache(None).await;

        Ok(review)
    }

    /// 리뷰 문서 전체 저장
    pub async fn save(&self, review: &Review) -> Result<(), AppError> {
        let id = review.id
            .ok_or_else(|| AppError::InternalError("저장할 리뷰에 ID가 없습니다".to_string()))?;

        self.collection::<Review>()
            .replace_one(doc! { "_id": id }, review)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    /// 도움됨 투표 수 원자적 증가
    pub async fn inc_helpful(&self, id: &ObjectId) -> Result<(), AppError> {
        self.collection::<Review>()
            .update_one(doc! { "_id": id }, doc! { "$inc": { "helpful_count": 1 } })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    /// 리뷰 삭제
    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 리뷰 ID 형식입니다".to_string()))?;

        let result = self.collection::<Review>()
            .delete_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if result.deleted_count > 0 {
            let _ = self.invalidate_collection_cache(None).await;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// 데이터베이스 인덱스 생성
    ///
    /// # 생성되는 인덱스
    ///
    /// 1. `(student_id, course_id)` 복합 유니크 인덱스 - 강의당 리뷰 1개
    /// 2. `(course_id, status, created_at)` 복합 인덱스 - 공개 목록 조회
    /// 3. `status` 인덱스 - 심사 대기 목록 조회
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let collection = self.collection::<Review>();

        let student_course_index = IndexModel::builder()
            .keys(doc! { "student_id": 1, "course_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("student_course_unique".to_string())
                .build())
            .build();

        let course_status_index = IndexModel::builder()
            .keys(doc! { "course_id": 1, "status": 1, "created_at": -1 })
            .options(IndexOptions::builder()
                .name("course_status_created_at".to_string())
                .build())
            .build();

        let status_index = IndexModel::builder()
            .keys(doc! { "status": 1 })
            .options(IndexOptions::builder()
                .name("status".to_string())
                .build())
            .build();

        collection
            .create_indexes([student_course_index, course_status_index, status_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

//! # 강의 리포지토리 구현
//!
//! 강의 애그리게이트의 데이터 액세스 계층입니다.
//! ID/슬러그 조회 캐싱, 필터 기반 목록 조회, 비정규화 집계값의
//! 원자적 증감($inc)을 제공합니다.

use std::sync::Arc;
use futures_util::stream::TryStreamExt;
use mongodb::{bson::{doc, oid::ObjectId, Document}, options::IndexOptions, IndexModel};
use singleton_macro::repository;
use crate::{
    caching::redis::RedisClient,
    core::registry::Repository,
    db::Database,
    domain::entities::courses::course::Course,
};
use crate::errors::errors::AppError;

/// 강의 데이터 액세스 리포지토리
///
/// ## 캐싱 전략
///
/// - **캐시 키**: `course:{course_id}`, `course:slug:{slug}`
/// - **TTL**: 600초 (10분)
/// - **무효화**: 커리큘럼 수정, 집계값 증감, 삭제 시 키 제거
#[repository(name = "course", collection = "courses")]
pub struct CourseRepository {
    /// MongoDB 데이터베이스 연결
    db: Arc<Database>,

    /// Redis 캐시 클라이언트
    redis: Arc<RedisClient>,
}

impl CourseRepository {
    /// ID로 강의 조회 (캐시 우선)
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Course>, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 강의 ID 형식입니다".to_string()))?;

        let cache_key = self.cache_key(id);

        if let Ok(Some(cached)) = self.redis.get::<Course>(&cache_key).await {
            return Ok(Some(cached));
        }

        let course = self.collection::<Course>()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref course) = course {
            let _ = self.redis
                .set_with_expiry(&cache_key, course, 600)
                .await;
        }

        Ok(course)
    }

    /// 슬러그로 강의 조회 (캐시 우선)
    ///
    /// 강의 상세 페이지의 기본 조회 경로입니다.
    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Course>, AppError> {
        let cache_key = format!("course:slug:{}", slug);

        if let Ok(Some(cached)) = self.redis.get::<Course>(&cache_key).await {
            return Ok(Some(cached));
        }

        let course = self.collection::<Course>()
            .find_one(doc! { "slug": slug })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref course) = course {
            let _ = self.redis
                .set_with_expiry(&cache_key, course, 600)
                .await;
        }

        Ok(course)
    }

    /// 강사의 강의 목록 조회 (초안 포함, 최신순)
    pub async fn find_by_instructor(&self, instructor_id: &ObjectId) -> Result<Vec<Course>, AppError> {
        let cursor = self.collection::<Course>()
            .find(doc! { "instructor_id": instructor_id })
            .sort(doc! { "created_at": -1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 필터 조건으로 강의 목록 조회 (페이지네이션)
    ///
    /// 서비스 계층이 구성한 필터/정렬 Document를 그대로 적용합니다.
    pub async fn find_with_filter(
        &self,
        filter: Document,
        sort: Document,
        skip: u64,
        limit: i64,
    ) -> Result<Vec<Course>, AppError> {
        let cursor = self.collection::<Course>()
            .find(filter)
            .sort(sort)
            .skip(skip)
            .limit(limit)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 필터 조건에 맞는 강의 수 조회
    pub async fn count_with_filter(&self, filter: Document) -> Result<u64, AppError> {
        self.collection::<Course>()
            .count_documents(filter)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 공개 상태의 전체 강의 목록 조회
    ///
    /// 추천 서비스의 인메모리 점수 계산에 사용됩니다.
    pub async fn find_all_published(&self) -> Result<Vec<Course>, AppError> {
        let cursor = self.collection::<Course>()
            .find(doc! { "status": "published" })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 새 강의 생성
    ///
    /// 슬러그 중복 여부를 사전에 검증합니다.
    pub async fn create(&self, mut course: Course) -> Result<Course, AppError> {
        if self.find_by_slug(&course.slug).await?.is_some() {
            return Err(AppError::ConflictError("이미 사용 중인 슬러그입니다".to_string()));
        }

        let result = self.collection::<Course>()
            .insert_one(&course)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        course.id = result.inserted_id.as_object_id();

        let _ = self.invalidate_collection_cache(None).await;

        Ok(course)
    }

    /// 강의 애그리게이트 전체 저장
    ///
    /// 커리큘럼(섹션/강의 배열) 수정처럼 문서 전체가 바뀌는 경우
    /// replace_one으로 저장합니다.
    pub async fn save(&self, course: &Course) -> Result<(), AppError> {
        let id = course.id
            .ok_or_else(|| AppError::InternalError("저장할 강의에 ID가 없습니다".to_string()))?;

        self.collection::<Course>()
            .replace_one(doc! { "_id": id }, course)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        self.invalidate_course_cache(&id.to_hex(), &course.slug).await;

        Ok(())
    }

    /// 강의 정보 부분 업데이트
    pub async fn update(&self, id: &str, update_doc: Document) -> Result<Option<Course>, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 강의 ID 형식입니다".to_string()))?;

        let options = mongodb::options::FindOneAndUpdateOptions::builder()
            .return_document(mongodb::options::ReturnDocument::After)
            .build();

        let updated = self.collection::<Course>()
            .find_one_and_update(
                doc! { "_id": object_id },
                doc! { "$set": update_doc },
            )
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref course) = updated {
            self.invalidate_course_cache(id, &course.slug).await;
        }

        Ok(updated)
    }

    /// 비정규화 집계값의 원자적 증감
    ///
    /// 리뷰 심사(rating_sum/rating_count)와 결제 완료(enrollment_count)
    /// 시점에 MongoDB `$inc`로 갱신합니다. 문서 단위 원자성에 의존합니다.
    pub async fn inc_aggregates(&self, id: &ObjectId, inc_doc: Document) -> Result<(), AppError> {
        let updated = self.collection::<Course>()
            .find_one_and_update(doc! { "_id": id }, doc! { "$inc": inc_doc })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(course) = updated {
            self.invalidate_course_cache(&id.to_hex(), &course.slug).await;
        }

        Ok(())
    }

    /// 강의 삭제
    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 강의 ID 형식입니다".to_string()))?;

        let existing = self.collection::<Course>()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let result = self.collection::<Course>()
            .delete_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if result.deleted_count > 0 {
            if let Some(course) = existing {
                self.invalidate_course_cache(id, &course.slug).await;
            }
            let _ = self.invalidate_collection_cache(None).await;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// ID/슬러그 캐시 키를 함께 무효화합니다
    async fn invalidate_course_cache(&self, id: &str, slug: &str) {
        let _ = self.invalidate_cache(id).await;
        let _ = self.redis.del(&format!("course:slug:{}", slug)).await;
    }

    /// 데이터베이스 인덱스 생성
    ///
    /// # 생성되는 인덱스
    ///
    /// 1. `slug` 유니크 인덱스 - 중복 슬러그 방지 및 상세 조회 최적화
    /// 2. `instructor_id` 인덱스 - 강사별 목록 조회
    /// 3. `(status, category)` 복합 인덱스 - 공개 목록 필터링
    /// 4. `created_at` 내림차순 인덱스 - 최신순 정렬
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let collection = self.collection::<Course>();

        let slug_index = IndexModel::builder()
            .keys(doc! { "slug": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("slug_unique".to_string())
                .build())
            .build();

        let instructor_index = IndexModel::builder()
            .keys(doc! { "instructor_id": 1 })
            .options(IndexOptions::builder()
                .name("instructor_id".to_string())
                .build())
            .build();

        let status_category_index = IndexModel::builder()
            .keys(doc! { "status": 1, "category": 1 })
            .options(IndexOptions::builder()
                .name("status_category".to_string())
                .build())
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        collection
            .create_indexes([slug_index, instructor_index, status_category_index, created_at_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

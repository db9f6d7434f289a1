//! # 수강 등록 리포지토리 구현
//!
//! 수강 등록 엔티티의 데이터 액세스 계층입니다.
//! (student_id, course_id) 복합 유니크 인덱스로 중복 수강 등록을
//! 저장소 레벨에서 차단합니다. 진도/노트/북마크 변경이 잦아
//! 조회 캐싱은 적용하지 않습니다.

use std::sync::Arc;
use futures_util::stream::TryStreamExt;
use mongodb::{bson::{doc, oid::ObjectId}, options::IndexOptions, IndexModel};
use singleton_macro::repository;
use crate::{
    caching::redis::RedisClient,
    core::registry::Repository,
    db::Database,
    domain::entities::enrollments::enrollment::Enrollment,
};
use crate::errors::errors::AppError;

/// 수강 등록 데이터 액세스 리포지토리
#[repository(name = "enrollment", collection = "enrollments")]
pub struct EnrollmentRepository {
    /// MongoDB 데이터베이스 연결
    db: Arc<Database>,

    /// Redis 캐시 클라이언트 (컬렉션 캐시 무효화용)
    redis: Arc<RedisClient>,
}

impl EnrollmentRepository {
    /// ID로 수강 등록 조회
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Enrollment>, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 수강 등록 ID 형식입니다".to_string()))?;

        self.collection::<Enrollment>()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 수강생과 강의로 수강 등록 조회
    ///
    /// 복합 유니크 인덱스 덕분에 최대 1건만 존재합니다.
    /// 중복 등록 검사, 구매 확인(리뷰 작성 자격) 등에 사용됩니다.
    pub async fn find_by_student_and_course(
        &self,
        student_id: &ObjectId,
        course_id: &ObjectId,
    ) -> Result<Option<Enrollment>, AppError> {
        self.collection::<Enrollment>()
            .find_one(doc! { "student_id": student_id, "course_id": course_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 수강생의 전체 수강 목록 조회 (최신 등록순)
    pub async fn find_by_student(&self, student_id: &ObjectId) -> Result<Vec<Enrollment>, AppError> {
        let cursor = self.collection::<Enrollment>()
            .find(doc! { "student_id": student_id })
            .sort(doc! { "enrolled_at": -1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 결제 ID로 연결된 수강 등록 목록 조회 (환불 보상 처리용)
    pub async fn find_by_payment(&self, payment_id: &ObjectId) -> Result<Vec<Enrollment>, AppError> {
        let cursor = self.collection::<Enrollment>()
            .find(doc! { "payment_id": payment_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 새 수강 등록 생성
    ///
    /// 동시 요청으로 애플리케이션 레벨 검사를 통과하더라도
    /// 복합 유니크 인덱스가 중복 삽입을 거부합니다.
    pub async fn create(&self, mut enrollment: Enrollment) -> Result<Enrollment, AppError> {
        if self
            .find_by_student_and_course(&enrollment.student_id, &enrollment.course_id)
            .await?
            .is_some()
        {
            return Err(AppError::ConflictError("이미 수강 중인 강의입니다".to_string()));
        }

        let result = self.collection::<Enrollment>()
            .insert_one(&enrollment)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        enrollment.id = result.inserted_id.as_object_id();

        let _ = self.invalidate_collection_cache(None).await;

        Ok(enrollment)
    }

    /// 수강 등록 애그리게이트 전체 저장
    ///
    /// 진도/노트/북마크 변경처럼 서브도큐먼트 배열이 바뀌는 경우
    /// replace_one으로 저장합니다.
    pub async fn save(&self, enrollment: &Enrollment) -> Result<(), AppError> {
        let id = enrollment.id
            .ok_or_else(|| AppError::InternalError("저장할 수강 등록에 ID가 없습니다".to_string()))?;

        self.collection::<Enrollment>()
            .replace_one(doc! { "_id": id }, enrollment)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    /// 결제에 연결된 수강 등록들을 일괄 취소 상태로 전환 (환불 보상 처리)
    ///
    /// 학습 기록 보존을 위해 삭제하지 않고 상태만 변경합니다.
    pub async fn revoke_by_payment(&self, payment_id: &ObjectId) -> Result<u64, AppError> {
        let result = self.collection::<Enrollment>()
            .update_many(
                doc! { "payment_id": payment_id },
                doc! { "$set": { "status": "revoked" } },
            )
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.modified_count)
    }

    /// 데이터베이스 인덱스 생성
    ///
    /// # 생성되는 인덱스
    ///
    /// 1. `(student_id, course_id)` 복합 유니크 인덱스 - 수강생당 강의 1회 등록
    /// 2. `student_id` 인덱스 - 내 수강 목록 조회
    /// 3. `payment_id` 인덱스 - 환불 보상 처리
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let collection = self.collection::<Enrollment>();

        let student_course_index = IndexModel::builder()
            .keys(doc! { "student_id": 1, "course_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("student_course_unique".to_string())
                .build())
            .build();

        let student_index = IndexModel::builder()
            .keys(doc! { "student_id": 1, "enrolled_at": -1 })
            .options(IndexOptions::builder()
                .name("student_enrolled_at".to_string())
                .build())
            .build();

        let payment_index = IndexModel::builder()
            .keys(doc! { "payment_id": 1 })
            .options(IndexOptions::builder()
                .name("payment_id".to_string())
                .build())
            .build();

        collection
            .create_indexes([student_course_index, student_index, payment_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

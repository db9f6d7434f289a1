//! # 결제 리포지토리 구현
//!
//! 결제 엔티티의 데이터 액세스 계층입니다.
//! 웹훅 이벤트 매칭을 위해 게이트웨이 참조 ID(provider_ref)로도
//! 조회할 수 있습니다. 결제 데이터는 캐싱하지 않습니다.

use std::sync::Arc;
use futures_util::stream::TryStreamExt;
use mongodb::{bson::{doc, oid::ObjectId}, options::IndexOptions, IndexModel};
use singleton_macro::repository;
use crate::{
    caching::redis::RedisClient,
    core::registry::Repository,
    db::Database,
    domain::entities::payments::payment::Payment,
};
use crate::errors::errors::AppError;

/// 결제 데이터 액세스 리포지토리
#[repository(name = "payment", collection = "payments")]
pub struct PaymentRepository {
    /// MongoDB 데이터베이스 연결
    db: Arc<Database>,

    /// Redis 캐시 클라이언트 (컬렉션 캐시 무효화용)
    redis: Arc<RedisClient>,
}

impl PaymentRepository {
    /// ID로 결제 조회
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Payment>, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 결제 ID 형식입니다".to_string()))?;

        self.collection::<Payment>()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 게이트웨이 참조 ID로 결제 조회
    ///
    /// 웹훅 이벤트(Stripe Payment Intent ID, PayPal Order ID)를
    /// 내부 결제 문서와 매칭할 때 사용됩니다.
    pub async fn find_by_provider_ref(&self, provider_ref: &str) -> Result<Option<Payment>, AppError> {
        self.collection::<Payment>()
            .find_one(doc! { "provider_ref": provider_ref })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 수강생의 결제 내역 조회 (최신순, 페이지네이션)
    pub async fn find_by_student(
        &self,
        student_id: &ObjectId,
        skip: u64,
        limit: i64,
    ) -> Result<Vec<Payment>, AppError> {
        let cursor = self.collection::<Payment>()
            .find(doc! { "student_id": student_id })
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

    /// 수강생의 결제 건수 조회
    pub async fn count_by_student(&self, student_id: &ObjectId) -> Result<u64, AppError> {
        self.collection::<Payment>()
            .count_documents(doc! { "student_id": student_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 새 결제 생성
    pub async fn create(&self, mut payment: Payment) -> Result<Payment, AppError> {
        let result = self.collection::<Payment>()
            .insert_one(&payment)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        payment.id = result.inserted_id.as_object_id();

        let _ = self.invalidate_collection_cache(None).await;

        Ok(payment)
    }

    /// 결제 문서 전체 저장
    ///
    /// 상태 전이(완료/실패/환불)는 엔티티 메서드로 수행한 뒤
    /// 문서 전체를 저장합니다.
    pub async fn save(&self, payment: &Payment) -> Result<(), AppError> {
        let id = payment.id
            .ok_or_else(|| AppError::InternalError("저장할 결제에 ID가 없습니다".to_string()))?;

        self.collection::<Payment>()
            .replace_one(doc! { "_id": id }, payment)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    /// 데이터베이스 인덱스 생성
    ///
    /// # 생성되는 인덱스
    ///
    /// 1. `provider_ref` 유니크 인덱스 - 웹훅 이벤트 매칭, 중복 세션 방지
    /// 2. `(student_id, created_at)` 복합 인덱스 - 결제 내역 조회
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let collection = self.collection::<Payment>();

        let provider_ref_index = IndexModel::builder()
            .keys(doc! { "provider_ref": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("provider_ref_unique".to_string())
                .build())
            .build();

        let student_index = IndexModel::builder()
            .keys(doc! { "student_id": 1, "created_at": -1 })
            .options(IndexOptions::builder()
                .name("student_created_at".to_string())
                .build())
            .build();

        collection
            .create_indexes([provider_ref_index, student_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

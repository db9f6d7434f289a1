//! Review Entity Implementation
//!
//! 강의 리뷰 엔티티의 핵심 구현체입니다.
//! 모든 리뷰는 구매 확인(수강 등록 보유)을 거쳐 작성되며, 관리자 심사를
//! 통과한 리뷰만 공개되고 평점 집계에 반영됩니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 리뷰 심사 상태
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    /// 심사 대기 중 (작성자에게만 보임)
    Pending,
    /// 승인됨 (공개, 평점 집계 반영)
    Approved,
    /// 거절됨 (비공개)
    Rejected,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Approved => "approved",
            ReviewStatus::Rejected => "rejected",
        }
    }
}

/// 강사 답글 서브도큐먼트
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstructorReply {
    /// 답글 본문
    pub body: String,
    /// 답글 작성 시간
    pub replied_at: DateTime,
}

/// 리뷰 엔티티
///
/// 수강생이 수강 중인 강의에 대해 작성한 평가입니다.
/// (student_id, course_id) 복합 유니크 인덱스로 강의당 1개 제한을
/// 보장합니다. 수정된 리뷰는 다시 심사 대기 상태로 돌아갑니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 리뷰 대상 강의 ID
    pub course_id: ObjectId,
    /// 작성자 (수강생) ID
    pub student_id: ObjectId,
    /// 구매 확인에 사용된 수강 등록 ID
    pub enrollment_id: ObjectId,
    /// 평점 (1 ~ 5)
    pub rating: u8,
    /// 리뷰 제목
    pub title: String,
    /// 리뷰 본문
    pub body: String,
    /// 심사 상태
    pub status: ReviewStatus,
    /// 구매 확인 여부 (수강 등록 기반 작성이므로 항상 true)
    pub verified_purchase: bool,
    /// 강사 답글
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor_reply: Option<InstructorReply>,
    /// 도움됨 투표 수
    pub helpful_count: i64,
    /// 작성 시간
    pub created_at: DateTime,
    /// 수정 시간
    pub updated_at: DateTime,
}

impl Review {
    /// 새 리뷰 생성 (심사 대기 상태)
    pub fn new(
        course_id: ObjectId,
        student_id: ObjectId,
        enrollment_id: ObjectId,
        rating: u8,
        title: String,
        body: String,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            course_id,
            student_id,
            enrollment_id,
            rating,
            title,
            body,
            status: ReviewStatus::Pending,
            verified_purchase: true,
            instructor_reply: None,
            helpful_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 공개 상태 여부
    pub fn is_approved(&self) -> bool {
        self.status == ReviewStatus::Approved
    }

    /// 평점이 유효 범위(1-5)인지 확인
    pub fn is_rating_valid(rating: u8) -> bool {
        (1..=5).contains(&rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_review_defaults() {
        let review = Review::new(
            ObjectId::new(),
            ObjectId::new(),
            ObjectId::new(),
            5,
            "최고의 강의".to_string(),
            "설명이 명확합니다".to_string(),
        );

        assert_eq!(review.status, ReviewStatus::Pending);
        assert!(!review.is_approved());
        assert!(review.verified_purchase);
        assert_eq!(review.helpful_count, 0);
        assert!(review.instructor_reply.is_none());
    }

    #[test]
    fn test_rating_bounds() {
        assert!(Review::is_rating_valid(1));
        assert!(Review::is_rating_valid(5));
        assert!(!Review::is_rating_valid(0));
        assert!(!Review::is_rating_valid(6));
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&ReviewStatus::Approved).unwrap();
        assert_eq!(json, "\"approved\"");
        assert_eq!(ReviewStatus::Pending.as_str(), "pending");
    }
}

//! 리뷰 응답 DTO

use serde::{Deserialize, Serialize};
use mongodb::bson::DateTime;
use crate::domain::entities::reviews::review::{Review, ReviewStatus};

/// 강사 답글 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstructorReplyResponse {
    pub body: String,
    pub replied_at: DateTime,
}

/// 리뷰 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub id: String,
    pub course_id: String,
    pub student_id: String,
    pub rating: u8,
    pub title: String,
    pub body: String,
    pub status: ReviewStatus,
    pub verified_purchase: bool,
    pub instructor_reply: Option<InstructorReplyResponse>,
    pub helpful_count: i64,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.id.map(|id| id.to_hex()).unwrap_or_default(),
            course_id: review.course_id.to_hex(),
            student_id: review.student_id.to_hex(),
            rating: review.rating,
            title: review.title,
            body: review.body,
            status: review.status,
            verified_purchase: review.verified_purchase,
            instructor_reply: review.instructor_reply.map(|r| InstructorReplyResponse {
                body: r.body,
                replied_at: r.replied_at,
            }),
            helpful_count: review.helpful_count,
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}

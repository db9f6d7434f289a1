//! # 리뷰 관리 서비스 구현
//!
//! 구매 확인 리뷰 작성, 관리자 심사, 강사 답글, 평점 집계를 담당하는
//! 비즈니스 로직입니다.
//!
//! ## 심사 흐름과 평점 집계
//!
//! ```text
//! 작성 ──► Pending ──(approve)──► Approved ──(reject)──► Rejected
//!             │                      │
//!             └──(reject)──► Rejected│
//!                                    └─ 승인 시 rating_sum/count 증가,
//!                                       승인 철회·삭제 시 감소
//! ```
//!
//! 승인된 리뷰만 공개 목록에 노출되고 강의 평점에 반영됩니다.
//! 수정된 리뷰는 다시 심사 대기 상태로 돌아가며, 기존에 승인 상태였다면
//! 집계에서 제거됩니다.

use std::sync::Arc;
use mongodb::bson::{doc, oid::ObjectId, DateTime};
use singleton_macro::service;
use crate::{
    domain::{
        dto::common::{PageQuery, PaginatedResponse},
        dto::reviews::{
            request::{CreateReviewRequest, ModerateReviewRequest, ReplyReviewRequest, UpdateReviewRequest},
            response::ReviewResponse,
        },
        entities::reviews::review::{InstructorReply, Review, ReviewStatus},
        models::auth::authenticated_user::AuthenticatedUser,
    },
    repositories::{
        courses::course_repo::CourseRepository,
        enrollments::enrollment_repo::EnrollmentRepository,
        reviews::review_repo::ReviewRepository,
    },
    core::errors::AppError,
};

/// 리뷰 관리 비즈니스 로직 서비스
#[service(name = "review")]
pub struct ReviewService {
    /// 리뷰 리포지토리
    review_repo: Arc<ReviewRepository>,

    /// 강의 리포지토리 (평점 집계, 강사 답글 권한)
    course_repo: Arc<CourseRepository>,

    /// 수강 등록 리포지토리 (구매 확인)
    enrollment_repo: Arc<EnrollmentRepository>,
}

impl ReviewService {
    /// 리뷰를 작성합니다 (심사 대기 상태로 시작)
    ///
    /// # 비즈니스 규칙
    ///
    /// - 해당 강의의 수강 등록(활성/수료)을 보유해야 함 (구매 확인)
    /// - 취소된 수강 등록으로는 작성 불가
    /// - 강의당 1개 제한 (복합 유니크 인덱스)
    pub async fn create_review(&self, student: &AuthenticatedUser, request: CreateReviewRequest) -> Result<ReviewResponse, AppError> {
        let student_id = ObjectId::parse_str(&student.user_id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 사용자 ID 형식입니다".to_string()))?;
        let course_id = ObjectId::parse_str(&request.course_id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 강의 ID 형식입니다".to_string()))?;

        // 구매 확인: 수강 등록 보유 여부
        let enrollment = self.enrollment_repo
            .find_by_student_and_course(&student_id, &course_id)
            .await?
            .ok_or_else(|| AppError::AuthorizationError(
                "수강 중인 강의에만 리뷰를 작성할 수 있습니다".to_string(),
            ))?;

        if !enrollment.can_track_progress() {
            return Err(AppError::AuthorizationError(
                "취소된 수강 등록으로는 리뷰를 작성할 수 없습니다".to_string(),
            ));
        }

        let enrollment_id = enrollment.id
            .ok_or_else(|| AppError::InternalError("수강 등록 ID가 없습니다".to_string()))?;

        let review = Review::new(
            course_id,
            student_id,
            enrollment_id,
            request.rating,
            request.title,
            request.body,
        );

        let created = self.review_repo.create(review).await?;

        log::info!("리뷰 작성: 강의={}, 수강생={}", request.course_id, student.user_id);

        Ok(ReviewResponse::from(created))
    }

    /// 본인 리뷰를 수정합니다
    ///
    /// 수정된 리뷰는 다시 심사 대기 상태로 돌아갑니다.
    /// 기존에 승인 상태였다면 평점 집계에서 제거됩니다.
    pub async fn update_review(&self, student: &AuthenticatedUser, review_id: &str, request: UpdateReviewRequest) -> Result<ReviewResponse, AppError> {
        let mut review = self.find_owned(student, review_id).await?;

        let was_approved = review.is_approved();
        let old_rating = review.rating;

        if let Some(rating) = request.rating {
            review.rating = rating;
        }
        if let Some(title) = request.title {
            review.title = title;
        }
        if let Some(body) = request.body {
            review.body = body;
        }

        review.status = ReviewStatus::Pending;
        review.updated_at = DateTime::now();

        self.review_repo.save(&review).await?;

        // 승인 상태였던 리뷰는 집계에서 제거
        if was_approved {
            self.course_repo
                .inc_aggregates(&review.course_id, doc! {
                    "rating_sum": -(old_rating as i64),
                    "rating_count": -1,
                })
                .await?;
        }

        Ok(ReviewResponse::from(review))
    }

    /// 리뷰를 삭제합니다 (작성자 또는 관리자)
    pub async fn delete_review(&self, viewer: &AuthenticatedUser, review_id: &str) -> Result<(), AppError> {
        let review = self.review_repo
            .find_by_id(review_id)
            .await?
            .ok_or_else(|| AppError::NotFound("리뷰를 찾을 수 없습니다".to_string()))?;

        if review.student_id.to_hex() != viewer.user_id && !viewer.is_admin() {
            return Err(AppError::AuthorizationError("본인의 리뷰만 삭제할 수 있습니다".to_string()));
        }

        self.review_repo.delete(review_id).await?;

        // 승인된 리뷰 삭제 시 집계에서 제거
        if review.is_approved() {
            self.course_repo
                .inc_aggregates(&review.course_id, doc! {
                    "rating_sum": -(review.rating as i64),
                    "rating_count": -1,
                })
                .await?;
        }

        Ok(())
    }

    /// 강의의 승인된 리뷰 목록을 조회합니다
    pub async fn list_course_reviews(&self, course_id: &str, page: PageQuery) -> Result<PaginatedResponse<ReviewResponse>, AppError> {
        let course_oid = ObjectId::parse_str(course_id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 강의 ID 형식입니다".to_string()))?;

        let total = self.review_repo.count_approved_by_course(&course_oid).await?;
        let reviews = self.review_repo
            .find_approved_by_course(&course_oid, page.skip(), page.per_page() as i64)
            .await?;

        let data = reviews.into_iter().map(ReviewResponse::from).collect();

        Ok(PaginatedResponse::new(data, total, page.page(), page.per_page()))
    }

    /// 심사 대기 중인 리뷰 목록을 조회합니다 (관리자 전용)
    pub async fn list_pending_reviews(&self, page: PageQuery) -> Result<Vec<ReviewResponse>, AppError> {
        let reviews = self.review_repo
            .find_pending(page.skip(), page.per_page() as i64)
            .await?;

        Ok(reviews.into_iter().map(ReviewResponse::from).collect())
    }

    /// 리뷰를 심사합니다 (관리자 전용)
    ///
    /// 승인 시 평점 집계에 반영되고, 승인 상태에서 거절로 변경하면
    /// 집계에서 제거됩니다.
    pub async fn moderate_review(&self, review_id: &str, request: ModerateReviewRequest) -> Result<ReviewResponse, AppError> {
        let mut review = self.review_repo
            .find_by_id(review_id)
            .await?
            .ok_or_else(|| AppError::NotFound("리뷰를 찾을 수 없습니다".to_string()))?;

        let was_approved = review.is_approved();

        let new_status = match request.action.as_str() {
            "approve" => ReviewStatus::Approved,
            "reject" => ReviewStatus::Rejected,
            _ => return Err(AppError::ValidationError("유효하지 않은 심사 결과입니다".to_string())),
        };

        if review.status == new_status {
            return Err(AppError::ConflictError("이미 동일한 심사 상태입니다".to_string()));
        }

        review.status = new_status.clone();
        review.updated_at = DateTime::now();
        self.review_repo.save(&review).await?;

        // 집계 갱신: 승인 진입 시 추가, 승인 이탈 시 제거
        match (&new_status, was_approved) {
            (ReviewStatus::Approved, false) => {
                self.course_repo
                    .inc_aggregates(&review.course_id, doc! {
                        "rating_sum": review.rating as i64,
                        "rating_count": 1,
                    })
                    .await?;
            }
            (ReviewStatus::Rejected, true) => {
                self.course_repo
                    .inc_aggregates(&review.course_id, doc! {
                        "rating_sum": -(review.rating as i64),
                        "rating_count": -1,
                    })
                    .await?;
            }
            _ => {}
        }

        log::info!("리뷰 심사: {} → {}", review_id, review.status.as_str());

        Ok(ReviewResponse::from(review))
    }

    /// 리뷰에 강사 답글을 작성합니다
    ///
    /// 리뷰 대상 강의의 소유 강사만 답글을 달 수 있습니다.
    pub async fn reply_to_review(&self, instructor: &AuthenticatedUser, review_id: &str, request: ReplyReviewRequest) -> Result<ReviewResponse, AppError> {
        let mut review = self.review_repo
            .find_by_id(review_id)
            .await?
            .ok_or_else(|| AppError::NotFound("리뷰를 찾을 수 없습니다".to_string()))?;

        let course = self.course_repo
            .find_by_id(&review.course_id.to_hex())
            .await?
            .ok_or_else(|| AppError::NotFound("강의를 찾을 수 없습니다".to_string()))?;

        if course.instructor_id.to_hex() != instructor.user_id && !instructor.is_admin() {
            return Err(AppError::AuthorizationError(
                "본인 강의의 리뷰에만 답글을 작성할 수 있습니다".to_string(),
            ));
        }

        review.instructor_reply = Some(InstructorReply {
            body: request.body,
            replied_at: DateTime::now(),
        });
        review.updated_at = DateTime::now();

        self.review_repo.save(&review).await?;

        Ok(ReviewResponse::from(review))
    }

    /// 리뷰에 도움됨 투표를 추가합니다
    ///
    /// 승인된 리뷰에만 투표할 수 있습니다.
    pub async fn vote_helpful(&self, review_id: &str) -> Result<(), AppError> {
        let review = self.review_repo
            .find_by_id(review_id)
            .await?
            .ok_or_else(|| AppError::NotFound("리뷰를 찾을 수 없습니다".to_string()))?;

        if !review.is_approved() {
            return Err(AppError::NotFound("리뷰를 찾을 수 없습니다".to_string()));
        }

        let id = review.id
            .ok_or_else(|| AppError::InternalError("리뷰 ID가 없습니다".to_string()))?;

        self.review_repo.inc_helpful(&id).await
    }

    /// 본인 소유의 리뷰를 조회합니다
    async fn find_owned(&self, student: &AuthenticatedUser, review_id: &str) -> Result<Review, AppError> {
        let review = self.review_repo
            .find_by_id(review_id)
            .await?
            .ok_or_else(|| AppError::NotFound("리뷰를 찾을 수 없습니다".to_string()))?;

        if review.student_id.to_hex() != student.user_id {
            return Err(AppError::AuthorizationError("본인의 리뷰만 수정할 수 있습니다".to_string()));
        }

        Ok(review)
    }
}

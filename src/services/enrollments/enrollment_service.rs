//! # 수강 등록 서비스 구현
//!
//! 무료 강의 등록, 진도 추적, 노트/북마크 관리를 담당하는 비즈니스
//! 로직입니다. 유료 강의의 수강 등록은 결제 완료 시점에
//! PaymentService가 생성하며, 이 서비스는 무료 등록만 직접 처리합니다.

use std::sync::Arc;
use mongodb::bson::oid::ObjectId;
use singleton_macro::service;
use crate::{
    domain::{
        dto::enrollments::{
            request::{AddBookmarkRequest, AddNoteRequest, CompleteLectureRequest},
            response::EnrollmentResponse,
        },
        entities::enrollments::enrollment::{Enrollment, EnrollmentSource, LectureBookmark, LectureNote},
    },
    repositories::{
        courses::course_repo::CourseRepository,
        enrollments::enrollment_repo::EnrollmentRepository,
    },
    core::errors::AppError,
};

/// 수강 등록 비즈니스 로직 서비스
#[service(name = "enrollment")]
pub struct EnrollmentService {
    /// 수강 등록 리포지토리
    enrollment_repo: Arc<EnrollmentRepository>,

    /// 강의 리포지토리 (공개 여부/커리큘럼 검증용)
    course_repo: Arc<CourseRepository>,
}

impl EnrollmentService {
    /// 무료 강의에 수강 등록합니다
    ///
    /// # 비즈니스 규칙
    ///
    /// - 공개(published) 상태의 무료 강의만 직접 등록 가능
    /// - 유료 강의는 결제를 통해서만 등록됨
    /// - 본인이 만든 강의는 등록 불가
    /// - 중복 등록은 복합 유니크 인덱스가 차단
    pub async fn enroll_free(&self, student_id: &str, course_id: &str) -> Result<EnrollmentResponse, AppError> {
        let student_oid = ObjectId::parse_str(student_id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 사용자 ID 형식입니다".to_string()))?;

        let course = self.course_repo
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::NotFound("강의를 찾을 수 없습니다".to_string()))?;

        if !course.is_published() {
            return Err(AppError::NotFound("강의를 찾을 수 없습니다".to_string()));
        }

        if !course.is_free() {
            return Err(AppError::PaymentError(
                "유료 강의는 결제를 통해 등록할 수 있습니다".to_string(),
            ));
        }

        if course.instructor_id == student_oid {
            return Err(AppError::ConflictError("본인의 강의에는 등록할 수 없습니다".to_string()));
        }

        let course_oid = course.id
            .ok_or_else(|| AppError::InternalError("강의 ID가 없습니다".to_string()))?;

        let enrollment = Enrollment::new(student_oid, course_oid, EnrollmentSource::Free, None);
        let created = self.enrollment_repo.create(enrollment).await?;

        // 수강생 수 집계 갱신
        self.course_repo
            .inc_aggregates(&course_oid, mongodb::bson::doc! { "enrollment_count": 1 })
            .await?;

        log::info!("무료 수강 등록: 강의={}, 수강생={}", course.slug, student_id);

        Ok(EnrollmentResponse::from(created))
    }

    /// 내 수강 목록을 조회합니다
    pub async fn my_enrollments(&self, student_id: &str) -> Result<Vec<EnrollmentResponse>, AppError> {
        let student_oid = ObjectId::parse_str(student_id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 사용자 ID 형식입니다".to_string()))?;

        let enrollments = self.enrollment_repo.find_by_student(&student_oid).await?;

        Ok(enrollments.into_iter().map(EnrollmentResponse::from).collect())
    }

    /// 수강 등록 단건을 조회합니다 (본인 것만)
    pub async fn get_enrollment(&self, student_id: &str, enrollment_id: &str) -> Result<EnrollmentResponse, AppError> {
        let enrollment = self.find_owned(student_id, enrollment_id).await?;
        Ok(EnrollmentResponse::from(enrollment))
    }

    /// 강의(lecture) 완료를 기록하고 진도율을 갱신합니다
    ///
    /// 완료할 강의가 실제 커리큘럼에 존재하는지 검증합니다.
    /// 진도율 100% 도달 시 수강 상태가 수료(completed)로 전환됩니다.
    pub async fn complete_lecture(&self, student_id: &str, enrollment_id: &str, request: CompleteLectureRequest) -> Result<EnrollmentResponse, AppError> {
        let mut enrollment = self.find_owned(student_id, enrollment_id).await?;

        if !enrollment.can_track_progress() {
            return Err(AppError::ConflictError("취소된 수강 등록입니다".to_string()));
        }

        let lecture_oid = ObjectId::parse_str(&request.lecture_id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 강의 ID 형식입니다".to_string()))?;

        let course = self.course_repo
            .find_by_id(&enrollment.course_id.to_hex())
            .await?
            .ok_or_else(|| AppError::NotFound("강의를 찾을 수 없습니다".to_string()))?;

        if !course.contains_lecture(&lecture_oid) {
            return Err(AppError::NotFound("커리큘럼에 존재하지 않는 강의입니다".to_string()));
        }

        enrollment.mark_lecture_completed(lecture_oid, course.total_lecture_count());
        enrollment.updated_at = mongodb::bson::DateTime::now();

        self.enrollment_repo.save(&enrollment).await?;

        Ok(EnrollmentResponse::from(enrollment))
    }

    /// 노트를 추가합니다
    pub async fn add_note(&self, student_id: &str, enrollment_id: &str, request: AddNoteRequest) -> Result<EnrollmentResponse, AppError> {
        let mut enrollment = self.find_owned(student_id, enrollment_id).await?;

        if !enrollment.can_track_progress() {
            return Err(AppError::ConflictError("취소된 수강 등록입니다".to_string()));
        }

        let lecture_oid = ObjectId::parse_str(&request.lecture_id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 강의 ID 형식입니다".to_string()))?;

        enrollment.notes.push(LectureNote::new(lecture_oid, request.body));
        enrollment.updated_at = mongodb::bson::DateTime::now();

        self.enrollment_repo.save(&enrollment).await?;

        Ok(EnrollmentResponse::from(enrollment))
    }

    /// 노트를 삭제합니다
    pub async fn remove_note(&self, student_id: &str, enrollment_id: &str, note_id: &str) -> Result<EnrollmentResponse, AppError> {
        let mut enrollment = self.find_owned(student_id, enrollment_id).await?;

        let note_oid = ObjectId::parse_str(note_id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 노트 ID 형식입니다".to_string()))?;

        let before = enrollment.notes.len();
        enrollment.notes.retain(|n| n.note_id != note_oid);

        if enrollment.notes.len() == before {
            return Err(AppError::NotFound("노트를 찾을 수 없습니다".to_string()));
        }

        enrollment.updated_at = mongodb::bson::DateTime::now();
        self.enrollment_repo.save(&enrollment).await?;

        Ok(EnrollmentResponse::from(enrollment))
    }

    /// 북마크를 추가합니다
    pub async fn add_bookmark(&self, student_id: &str, enrollment_id: &str, request: AddBookmarkRequest) -> Result<EnrollmentResponse, AppError> {
        let mut enrollment = self.find_owned(student_id, enrollment_id).await?;

        if !enrollment.can_track_progress() {
            return Err(AppError::ConflictError("취소된 수강 등록입니다".to_string()));
        }

        let lecture_oid = ObjectId::parse_str(&request.lecture_id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 강의 ID 형식입니다".to_string()))?;

        enrollment.bookmarks.push(LectureBookmark::new(
            lecture_oid,
            request.position_seconds,
            request.label,
        ));
        enrollment.updated_at = mongodb::bson::DateTime::now();

        self.enrollment_repo.save(&enrollment).await?;

        Ok(EnrollmentResponse::from(enrollment))
    }

    /// 북마크를 삭제합니다
    pub async fn remove_bookmark(&self, student_id: &str, enrollment_id: &str, bookmark_id: &str) -> Result<EnrollmentResponse, AppError> {
        let mut enrollment = self.find_owned(student_id, enrollment_id).await?;

        let bookmark_oid = ObjectId::parse_str(bookmark_id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 북마크 ID 형식입니다".to_string()))?;

        let before = enrollment.bookmarks.len();
        enrollment.bookmarks.retain(|b| b.bookmark_id != bookmark_oid);

        if enrollment.bookmarks.len() == before {
            return Err(AppError::NotFound("북마크를 찾을 수 없습니다".to_string()));
        }

        enrollment.updated_at = mongodb::bson::DateTime::now();
        self.enrollment_repo.save(&enrollment).await?;

        Ok(EnrollmentResponse::from(enrollment))
    }

    /// 본인 소유의 수강 등록을 조회합니다
    ///
    /// 타인의 수강 등록에는 존재 여부를 노출하지 않기 위해 404를 반환합니다.
    async fn find_owned(&self, student_id: &str, enrollment_id: &str) -> Result<Enrollment, AppError> {
        let enrollment = self.enrollment_repo
            .find_by_id(enrollment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("수강 등록을 찾을 수 없습니다".to_string()))?;

        if enrollment.student_id.to_hex() != student_id {
            return Err(AppError::NotFound("수강 등록을 찾을 수 없습니다".to_string()));
        }

        Ok(enrollment)
    }
}

//! Enrollment Entity Implementation
//!
//! 수강 등록 엔티티의 핵심 구현체입니다.
//! 수강생과 강의를 연결하고 진도, 노트, 북마크를 서브도큐먼트로 보관합니다.
//! (student_id, course_id) 복합 유니크 인덱스로 중복 수강 등록을 방지합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 수강 등록 경로
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentSource {
    /// 결제를 통한 등록
    Purchase,
    /// 무료 강의 등록
    Free,
}

/// 수강 상태
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    /// 수강 중
    Active,
    /// 수료 (진도 100%)
    Completed,
    /// 취소됨 (환불 등)
    Revoked,
}

impl EnrollmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentStatus::Active => "active",
            EnrollmentStatus::Completed => "completed",
            EnrollmentStatus::Revoked => "revoked",
        }
    }
}

/// 강의 노트 서브도큐먼트
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LectureNote {
    /// 노트 고유 ID
    pub note_id: ObjectId,
    /// 노트가 달린 강의(lecture) ID
    pub lecture_id: ObjectId,
    /// 노트 본문
    pub body: String,
    /// 작성 시간
    pub created_at: DateTime,
}

impl LectureNote {
    pub fn new(lecture_id: ObjectId, body: String) -> Self {
        Self {
            note_id: ObjectId::new(),
            lecture_id,
            body,
            created_at: DateTime::now(),
        }
    }
}

/// 강의 북마크 서브도큐먼트
///
/// 영상 내 특정 재생 위치를 저장합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LectureBookmark {
    /// 북마크 고유 ID
    pub bookmark_id: ObjectId,
    /// 북마크가 달린 강의(lecture) ID
    pub lecture_id: ObjectId,
    /// 재생 위치 (초)
    pub position_seconds: u32,
    /// 북마크 라벨
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// 생성 시간
    pub created_at: DateTime,
}

impl LectureBookmark {
    pub fn new(lecture_id: ObjectId, position_seconds: u32, label: Option<String>) -> Self {
        Self {
            bookmark_id: ObjectId::new(),
            lecture_id,
            position_seconds,
            label,
            created_at: DateTime::now(),
        }
    }
}

/// 수강 등록 엔티티
///
/// 수강생이 구매했거나 무료로 등록한 강의와의 연결 기록입니다.
/// 진도는 완료한 강의(lecture) ID 집합으로 추적하며, 전체 강의 수 대비
/// 백분율로 환산됩니다. 환불 시 삭제하지 않고 `Revoked` 상태로 전환하여
/// 학습 기록을 보존합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 수강생 ID
    pub student_id: ObjectId,
    /// 강의 ID
    pub course_id: ObjectId,
    /// 등록 경로
    pub source: EnrollmentSource,
    /// 수강 상태
    pub status: EnrollmentStatus,
    /// 등록을 발생시킨 결제 ID (무료 등록은 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<ObjectId>,
    /// 완료한 강의(lecture) ID 집합
    pub completed_lecture_ids: Vec<ObjectId>,
    /// 진도율 (0.0 ~ 100.0)
    pub progress_percent: f64,
    /// 노트 목록
    pub notes: Vec<LectureNote>,
    /// 북마크 목록
    pub bookmarks: Vec<LectureBookmark>,
    /// 수료 시간
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime>,
    /// 등록 시간
    pub enrolled_at: DateTime,
    /// 수정 시간
    pub updated_at: DateTime,
}

impl Enrollment {
    /// 새 수강 등록 생성
    pub fn new(
        student_id: ObjectId,
        course_id: ObjectId,
        source: EnrollmentSource,
        payment_id: Option<ObjectId>,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            student_id,
            course_id,
            source,
            status: EnrollmentStatus::Active,
            payment_id,
            completed_lecture_ids: Vec::new(),
            progress_percent: 0.0,
            notes: Vec::new(),
            bookmarks: Vec::new(),
            completed_at: None,
            enrolled_at: now,
            updated_at: now,
        }
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 진도 업데이트가 가능한 상태인지 확인
    pub fn can_track_progress(&self) -> bool {
        !matches!(self.status, EnrollmentStatus::Revoked)
    }

    /// 강의(lecture) 완료 기록 후 진도율을 재계산합니다
    ///
    /// 이미 완료된 강의는 중복 기록되지 않습니다.
    /// 전체 강의 수 대비 완료 비율을 계산하고, 100%에 도달하면
    /// 상태를 `Completed`로 전환합니다.
    ///
    /// # 인자
    /// * `lecture_id` - 완료한 강의 ID
    /// * `total_lectures` - 강의 전체 lecture 수 (0이면 진도 0% 유지)
    pub fn mark_lecture_completed(&mut self, lecture_id: ObjectId, total_lectures: usize) {
        if !self.completed_lecture_ids.contains(&lecture_id) {
            self.completed_lecture_ids.push(lecture_id);
        }
        self.recompute_progress(total_lectures);
    }

    /// 진도율을 재계산합니다
    ///
    /// 커리큘럼에서 강의가 삭제된 경우에도 100%를 넘지 않도록 보정합니다.
    pub fn recompute_progress(&mut self, total_lectures: usize) {
        if total_lectures == 0 {
            self.progress_percent = 0.0;
            return;
        }

        let completed = self.completed_lecture_ids.len().min(total_lectures);
        self.progress_percent = (completed as f64 / total_lectures as f64) * 100.0;

        if completed == total_lectures && self.status == EnrollmentStatus::Active {
            self.status = EnrollmentStatus::Completed;
            self.completed_at = Some(DateTime::now());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_enrollment() -> Enrollment {
        Enrollment::new(ObjectId::new(), ObjectId::new(), EnrollmentSource::Free, None)
    }

    #[test]
    fn test_new_enrollment_defaults() {
        let enrollment = sample_enrollment();

        assert_eq!(enrollment.status, EnrollmentStatus::Active);
        assert_eq!(enrollment.progress_percent, 0.0);
        assert!(enrollment.completed_lecture_ids.is_empty());
        assert!(enrollment.can_track_progress());
    }

    #[test]
    fn test_progress_tracking() {
        let mut enrollment = sample_enrollment();
        let l1 = ObjectId::new();
        let l2 = ObjectId::new();

        enrollment.mark_lecture_completed(l1, 4);
        assert!((enrollment.progress_percent - 25.0).abs() < f64::EPSILON);
        assert_eq!(enrollment.status, EnrollmentStatus::Active);

        // 중복 완료는 진도에 영향 없음
        enrollment.mark_lecture_completed(l1, 4);
        assert_eq!(enrollment.completed_lecture_ids.len(), 1);
        assert!((enrollment.progress_percent - 25.0).abs() < f64::EPSILON);

        enrollment.mark_lecture_completed(l2, 4);
        assert!((enrollment.progress_percent - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_completion_at_full_progress() {
        let mut enrollment = sample_enrollment();
        let l1 = ObjectId::new();
        let l2 = ObjectId::new();

        enrollment.mark_lecture_completed(l1, 2);
        enrollment.mark_lecture_completed(l2, 2);

        assert_eq!(enrollment.status, EnrollmentStatus::Completed);
        assert!(enrollment.completed_at.is_some());
        assert!((enrollment.progress_percent - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_progress_capped_when_curriculum_shrinks() {
        let mut enrollment = sample_enrollment();

        for _ in 0..5 {
            enrollment.completed_lecture_ids.push(ObjectId::new());
        }

        // 커리큘럼이 3개로 줄어도 100%를 넘지 않음
        enrollment.recompute_progress(3);
        assert!((enrollment.progress_percent - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_revoked_enrollment_blocks_tracking() {
        let mut enrollment = sample_enrollment();
        enrollment.status = EnrollmentStatus::Revoked;

        assert!(!enrollment.can_track_progress());
    }

    #[test]
    fn test_zero_lecture_course_progress() {
        let mut enrollment = sample_enrollment();

        enrollment.recompute_progress(0);
        assert_eq!(enrollment.progress_percent, 0.0);
        assert_eq!(enrollment.status, EnrollmentStatus::Active);
    }
}

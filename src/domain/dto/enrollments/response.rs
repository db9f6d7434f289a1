//! 수강 등록 응답 DTO

use serde::{Deserialize, Serialize};
use mongodb::bson::DateTime;
use crate::domain::entities::enrollments::enrollment::{
    Enrollment, EnrollmentSource, EnrollmentStatus, LectureBookmark, LectureNote,
};

/// 노트 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteResponse {
    pub note_id: String,
    pub lecture_id: String,
    pub body: String,
    pub created_at: DateTime,
}

impl From<&LectureNote> for NoteResponse {
    fn from(note: &LectureNote) -> Self {
        Self {
            note_id: note.note_id.to_hex(),
            lecture_id: note.lecture_id.to_hex(),
            body: note.body.clone(),
            created_at: note.created_at,
        }
    }
}

/// 북마크 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookmarkResponse {
    pub bookmark_id: String,
    pub lecture_id: String,
    pub position_seconds: u32,
    pub label: Option<String>,
    pub created_at: DateTime,
}

impl From<&LectureBookmark> for BookmarkResponse {
    fn from(bookmark: &LectureBookmark) -> Self {
        Self {
            bookmark_id: bookmark.bookmark_id.to_hex(),
            lecture_id: bookmark.lecture_id.to_hex(),
            position_seconds: bookmark.position_seconds,
            label: bookmark.label.clone(),
            created_at: bookmark.created_at,
        }
    }
}

/// 수강 등록 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentResponse {
    pub id: String,
    pub student_id: String,
    pub course_id: String,
    pub source: EnrollmentSource,
    pub status: EnrollmentStatus,
    pub completed_lecture_ids: Vec<String>,
    pub progress_percent: f64,
    pub notes: Vec<NoteResponse>,
    pub bookmarks: Vec<BookmarkResponse>,
    pub completed_at: Option<DateTime>,
    pub enrolled_at: DateTime,
    pub updated_at: DateTime,
}

impl From<Enrollment> for EnrollmentResponse {
    fn from(enrollment: Enrollment) -> Self {
        Self {
            id: enrollment.id.map(|id| id.to_hex()).unwrap_or_default(),
            student_id: enrollment.student_id.to_hex(),
            course_id: enrollment.course_id.to_hex(),
            source: enrollment.source,
            status: enrollment.status,
            completed_lecture_ids: enrollment
                .completed_lecture_ids
                .iter()
                .map(|id| id.to_hex())
                .collect(),
            progress_percent: enrollment.progress_percent,
            notes: enrollment.notes.iter().map(NoteResponse::from).collect(),
            bookmarks: enrollment.bookmarks.iter().map(BookmarkResponse::from).collect(),
            completed_at: enrollment.completed_at,
            enrolled_at: enrollment.enrolled_at,
            updated_at: enrollment.updated_at,
        }
    }
}

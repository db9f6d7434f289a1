//! 수강 등록 요청 DTO

use serde::Deserialize;
use validator::Validate;

/// 수강 등록 요청 DTO
///
/// 무료 강의만 직접 등록할 수 있습니다. 유료 강의는 결제 완료를 통해서만
/// 등록됩니다.
#[derive(Debug, Deserialize, Validate)]
pub struct EnrollRequest {
    /// 등록할 강의 ID
    #[validate(length(equal = 24, message = "유효하지 않은 강의 ID 형식입니다"))]
    pub course_id: String,
}

/// 강의(lecture) 완료 기록 요청 DTO
#[derive(Debug, Deserialize, Validate)]
pub struct CompleteLectureRequest {
    /// 완료한 강의(lecture) ID
    #[validate(length(equal = 24, message = "유효하지 않은 강의 ID 형식입니다"))]
    pub lecture_id: String,
}

/// 노트 추가 요청 DTO
#[derive(Debug, Deserialize, Validate)]
pub struct AddNoteRequest {
    /// 노트가 달릴 강의(lecture) ID
    #[validate(length(equal = 24, message = "유효하지 않은 강의 ID 형식입니다"))]
    pub lecture_id: String,

    /// 노트 본문
    #[validate(length(min = 1, max = 5000, message = "노트는 1-5000자 사이여야 합니다"))]
    pub body: String,
}

/// 북마크 추가 요청 DTO
#[derive(Debug, Deserialize, Validate)]
pub struct AddBookmarkRequest {
    /// 북마크가 달릴 강의(lecture) ID
    #[validate(length(equal = 24, message = "유효하지 않은 강의 ID 형식입니다"))]
    pub lecture_id: String,

    /// 재생 위치 (초)
    pub position_seconds: u32,

    /// 북마크 라벨
    #[validate(length(max = 100, message = "라벨은 100자 이하여야 합니다"))]
    pub label: Option<String>,
}

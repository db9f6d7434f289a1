//! 강의 요청 DTO
//!
//! 강의 생성/수정, 커리큘럼 관리, 목록 필터링 요청 구조를 정의합니다.

use serde::Deserialize;
use validator::{Validate, ValidationError};

/// 강의 생성 요청 DTO
///
/// 생성된 강의는 초안(draft) 상태로 시작하며, 슬러그는 제목에서
/// 서버가 자동 생성합니다.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCourseRequest {
    /// 강의 제목
    #[validate(length(min = 3, max = 120, message = "제목은 3-120자 사이여야 합니다"))]
    pub title: String,

    /// 카테고리 (예: "programming", "design")
    #[validate(length(min = 1, max = 50, message = "카테고리를 입력해주세요"))]
    pub category: String,

    /// 난이도 (beginner / intermediate / advanced / all_levels)
    #[validate(custom(function = "validate_level"))]
    pub level: String,

    /// 강의 언어 코드 (예: "ko", "en")
    #[validate(length(min = 2, max = 10, message = "언어 코드를 입력해주세요"))]
    pub language: String,

    /// 가격 (통화 최소 단위, 0이면 무료)
    #[validate(range(min = 0, max = 100_000_000, message = "가격은 0 이상이어야 합니다"))]
    pub price_cents: i64,

    /// 통화 코드 (ISO 4217)
    #[validate(length(equal = 3, message = "통화 코드는 3자리여야 합니다"))]
    pub currency: String,

    /// 부제목
    #[validate(length(max = 200, message = "부제목은 200자 이하여야 합니다"))]
    pub subtitle: Option<String>,

    /// 상세 설명
    #[validate(length(max = 20000, message = "설명은 20000자 이하여야 합니다"))]
    pub description: Option<String>,
}

/// 강의 수정 요청 DTO
///
/// 제공된 필드만 부분 업데이트됩니다. 제목 변경 시 슬러그는 유지됩니다
/// (기존 공유 링크 보호).
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCourseRequest {
    #[validate(length(min = 3, max = 120, message = "제목은 3-120자 사이여야 합니다"))]
    pub title: Option<String>,

    #[validate(length(max = 200, message = "부제목은 200자 이하여야 합니다"))]
    pub subtitle: Option<String>,

    #[validate(length(max = 20000, message = "설명은 20000자 이하여야 합니다"))]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 50, message = "카테고리를 입력해주세요"))]
    pub category: Option<String>,

    #[validate(custom(function = "validate_level"))]
    pub level: Option<String>,

    #[validate(range(min = 0, max = 100_000_000, message = "가격은 0 이상이어야 합니다"))]
    pub price_cents: Option<i64>,

    #[validate(url(message = "유효한 URL을 입력해주세요"))]
    pub thumbnail_url: Option<String>,
}

/// 섹션 추가 요청 DTO
#[derive(Debug, Deserialize, Validate)]
pub struct AddSectionRequest {
    #[validate(length(min = 1, max = 120, message = "섹션 제목은 1-120자 사이여야 합니다"))]
    pub title: String,
}

/// 강의(lecture) 추가 요청 DTO
#[derive(Debug, Deserialize, Validate)]
pub struct AddLectureRequest {
    #[validate(length(min = 1, max = 120, message = "강의 제목은 1-120자 사이여야 합니다"))]
    pub title: String,

    /// 재생 시간 (초)
    #[validate(range(min = 1, max = 86400, message = "재생 시간은 1초 이상이어야 합니다"))]
    pub duration_seconds: u32,

    /// 미리보기 허용 여부
    #[serde(default)]
    pub is_preview: bool,

    /// 영상 URL
    #[validate(url(message = "유효한 URL을 입력해주세요"))]
    pub video_url: Option<String>,
}

/// 강의 목록 조회 쿼리 DTO
///
/// `GET /courses?category=programming&level=beginner&search=rust&page=1`
#[derive(Debug, Deserialize, Validate)]
pub struct CourseListQuery {
    /// 카테고리 필터
    pub category: Option<String>,

    /// 난이도 필터
    #[validate(custom(function = "validate_level"))]
    pub level: Option<String>,

    /// 제목/부제목 텍스트 검색
    pub search: Option<String>,

    /// 최소 가격 필터 (통화 최소 단위)
    pub min_price_cents: Option<i64>,

    /// 최대 가격 필터 (통화 최소 단위)
    pub max_price_cents: Option<i64>,

    /// 정렬 기준 (newest / popular / rating / price_asc / price_desc)
    pub sort: Option<String>,

    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

/// 난이도 문자열 검증
fn validate_level(level: &str) -> Result<(), ValidationError> {
    match level {
        "beginner" | "intermediate" | "advanced" | "all_levels" => Ok(()),
        _ => Err(ValidationError::new("invalid_level")
            .with_message("난이도는 beginner/intermediate/advanced/all_levels 중 하나여야 합니다".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_create_request() -> CreateCourseRequest {
        CreateCourseRequest {
            title: "Rust 입문".to_string(),
            category: "programming".to_string(),
            level: "beginner".to_string(),
            language: "ko".to_string(),
            price_cents: 49_900,
            currency: "KRW".to_string(),
            subtitle: None,
            description: None,
        }
    }

    #[test]
    fn test_valid_create_request() {
        assert!(valid_create_request().validate().is_ok());
    }

    #[test]
    fn test_create_rejects_invalid_level() {
        let mut req = valid_create_request();
        req.level = "expert".to_string();

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_rejects_negative_price() {
        let mut req = valid_create_request();
        req.price_cents = -100;

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_allows_free_course() {
        let mut req = valid_create_request();
        req.price_cents = 0;

        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_add_lecture_duration_bounds() {
        let req = AddLectureRequest {
            title: "소개".to_string(),
            duration_seconds: 0,
            is_preview: false,
            video_url: None,
        };

        assert!(req.validate().is_err());
    }
}

//! 리뷰 요청 DTO

use serde::Deserialize;
use validator::{Validate, ValidationError};

/// 리뷰 작성 요청 DTO
///
/// 수강 등록을 보유한 강의에만 작성할 수 있습니다 (구매 확인 리뷰).
#[derive(Debug, Deserialize, Validate)]
pub struct CreateReviewRequest {
    /// 리뷰 대상 강의 ID
    #[validate(length(equal = 24, message = "유효하지 않은 강의 ID 형식입니다"))]
    pub course_id: String,

    /// 평점 (1 ~ 5)
    #[validate(range(min = 1, max = 5, message = "평점은 1-5 사이여야 합니다"))]
    pub rating: u8,

    /// 리뷰 제목
    #[validate(length(min = 1, max = 100, message = "제목은 1-100자 사이여야 합니다"))]
    pub title: String,

    /// 리뷰 본문
    #[validate(length(min = 10, max = 5000, message = "본문은 10-5000자 사이여야 합니다"))]
    pub body: String,
}

/// 리뷰 수정 요청 DTO
///
/// 수정된 리뷰는 다시 심사 대기 상태로 돌아갑니다.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateReviewRequest {
    #[validate(range(min = 1, max = 5, message = "평점은 1-5 사이여야 합니다"))]
    pub rating: Option<u8>,

    #[validate(length(min = 1, max = 100, message = "제목은 1-100자 사이여야 합니다"))]
    pub title: Option<String>,

    #[validate(length(min = 10, max = 5000, message = "본문은 10-5000자 사이여야 합니다"))]
    pub body: Option<String>,
}

/// 리뷰 심사 요청 DTO (관리자 전용)
#[derive(Debug, Deserialize, Validate)]
pub struct ModerateReviewRequest {
    /// 심사 결과 (approve / reject)
    #[validate(custom(function = "validate_moderation_action"))]
    pub action: String,
}

/// 강사 답글 요청 DTO
#[derive(Debug, Deserialize, Validate)]
pub struct ReplyReviewRequest {
    /// 답글 본문
    #[validate(length(min = 1, max = 2000, message = "답글은 1-2000자 사이여야 합니다"))]
    pub body: String,
}

/// 심사 액션 문자열 검증
fn validate_moderation_action(action: &str) -> Result<(), ValidationError> {
    match action {
        "approve" | "reject" => Ok(()),
        _ => Err(ValidationError::new("invalid_action")
            .with_message("심사 결과는 approve 또는 reject여야 합니다".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_range() {
        let mut req = CreateReviewRequest {
            course_id: "507f1f77bcf86cd799439011".to_string(),
            rating: 5,
            title: "좋은 강의".to_string(),
            body: "정말 많이 배웠습니다. 추천합니다.".to_string(),
        };
        assert!(req.validate().is_ok());

        req.rating = 0;
        assert!(req.validate().is_err());

        req.rating = 6;
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_moderation_action() {
        let req = ModerateReviewRequest { action: "approve".to_string() };
        assert!(req.validate().is_ok());

        let req = ModerateReviewRequest { action: "delete".to_string() };
        assert!(req.validate().is_err());
    }
}

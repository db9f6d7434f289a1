//! 결제 요청 DTO

use serde::Deserialize;
use validator::{Validate, ValidationError};

/// 결제 시작(체크아웃) 요청 DTO
///
/// `course_ids`를 생략하면 장바구니 전체를 결제합니다.
#[derive(Debug, Deserialize, Validate)]
pub struct CheckoutRequest {
    /// 결제 게이트웨이 (stripe / paypal)
    #[validate(custom(function = "validate_provider"))]
    pub provider: String,

    /// 구매할 강의 ID 목록 (생략 시 장바구니 사용)
    pub course_ids: Option<Vec<String>>,
}

/// 환불 요청 DTO
#[derive(Debug, Deserialize, Validate)]
pub struct RefundRequest {
    /// 환불 사유
    #[validate(length(max = 500, message = "사유는 500자 이하여야 합니다"))]
    pub reason: Option<String>,
}

/// PayPal 승인 완료 후 캡처 요청 DTO
///
/// 구매자가 PayPal 승인 페이지에서 돌아온 뒤 프론트엔드가 호출합니다.
#[derive(Debug, Deserialize, Validate)]
pub struct CaptureRequest {
    /// PayPal 주문 ID
    #[validate(length(min = 1, message = "주문 ID가 필요합니다"))]
    pub order_id: String,
}

/// 게이트웨이 프로바이더 문자열 검증
fn validate_provider(provider: &str) -> Result<(), ValidationError> {
    match provider.to_lowercase().as_str() {
        "stripe" | "paypal" => Ok(()),
        _ => Err(ValidationError::new("invalid_provider")
            .with_message("결제 수단은 stripe 또는 paypal이어야 합니다".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_provider_validation() {
        let req = CheckoutRequest {
            provider: "stripe".to_string(),
            course_ids: None,
        };
        assert!(req.validate().is_ok());

        let req = CheckoutRequest {
            provider: "bitcoin".to_string(),
            course_ids: None,
        };
        assert!(req.validate().is_err());
    }
}

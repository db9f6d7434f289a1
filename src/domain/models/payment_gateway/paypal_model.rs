//! PayPal REST API 통신 모델
//!
//! PayPal Orders v2 API의 요청/응답 구조를 표현하는 wire 모델입니다.

use serde::Deserialize;

/// OAuth2 클라이언트 자격 증명 토큰 응답
///
/// `POST /v1/oauth2/token` 응답입니다. 모든 API 호출 전에
/// 이 토큰을 발급받아 Bearer 인증에 사용합니다.
#[derive(Debug, Clone, Deserialize)]
pub struct PayPalTokenResponse {
    /// 액세스 토큰
    pub access_token: String,
    /// 토큰 타입 (항상 "Bearer")
    pub token_type: String,
    /// 만료 시간 (초)
    pub expires_in: i64,
}

/// 주문 관련 링크
///
/// HATEOAS 형식의 링크로, `rel == "approve"`인 링크가
/// 구매자 승인 페이지 URL입니다.
#[derive(Debug, Clone, Deserialize)]
pub struct PayPalLink {
    pub href: String,
    pub rel: String,
    #[serde(default)]
    pub method: Option<String>,
}

/// 주문 생성/조회/캡처 응답
///
/// `POST /v2/checkout/orders`, `GET /v2/checkout/orders/{id}`,
/// `POST /v2/checkout/orders/{id}/capture` 응답의 공통 구조입니다.
#[derive(Debug, Clone, Deserialize)]
pub struct PayPalOrder {
    /// 주문 ID (결제 문서의 provider_ref로 저장됨)
    pub id: String,
    /// 주문 상태 (CREATED, APPROVED, COMPLETED 등)
    pub status: String,
    /// HATEOAS 링크 목록
    #[serde(default)]
    pub links: Vec<PayPalLink>,
}

impl PayPalOrder {
    /// 구매자 승인 페이지 URL을 추출합니다
    pub fn approve_url(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|l| l.rel == "approve" || l.rel == "payer-action")
            .map(|l| l.href.as_str())
    }

    /// 캡처 완료 상태인지 확인
    pub fn is_completed(&self) -> bool {
        self.status == "COMPLETED"
    }
}

/// 환불 응답
///
/// `POST /v2/payments/captures/{id}/refund` 응답입니다.
#[derive(Debug, Clone, Deserialize)]
pub struct PayPalRefund {
    pub id: String,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approve_url_extraction() {
        let json = r#"{
            "id": "5O190127TN364715T",
            "status": "CREATED",
            "links": [
                { "href": "https://api-m.paypal.com/v2/checkout/orders/5O190127TN364715T", "rel": "self", "method": "GET" },
                { "href": "https://www.paypal.com/checkoutnow?token=5O190127TN364715T", "rel": "approve", "method": "GET" }
            ]
        }"#;

        let order: PayPalOrder = serde_json::from_str(json).unwrap();

        assert_eq!(order.status, "CREATED");
        assert!(!order.is_completed());
        assert_eq!(
            order.approve_url(),
            Some("https://www.paypal.com/checkoutnow?token=5O190127TN364715T")
        );
    }

    #[test]
    fn test_completed_order() {
        let json = r#"{ "id": "5O1", "status": "COMPLETED" }"#;
        let order: PayPalOrder = serde_json::from_str(json).unwrap();

        assert!(order.is_completed());
        assert!(order.approve_url().is_none());
    }
}

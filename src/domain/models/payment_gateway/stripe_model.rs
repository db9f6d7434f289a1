//! Stripe REST API 통신 모델
//!
//! Stripe API의 요청/응답 구조를 표현하는 wire 모델입니다.
//! 애플리케이션에서 사용하는 필드만 정의하며, 나머지는 역직렬화 시 무시됩니다.

use serde::{Deserialize, Serialize};

/// Payment Intent 생성 응답
///
/// `POST /v1/payment_intents` 응답에서 필요한 필드만 추출합니다.
///
/// ```json
/// {
///   "id": "pi_3MtwBwLkdIwHu7ix28a3tqPa",
///   "client_secret": "pi_3MtwBw..._secret_...",
///   "status": "requires_payment_method",
///   "amount": 49900,
///   "currency": "krw"
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct StripePaymentIntent {
    /// Payment Intent ID (결제 문서의 provider_ref로 저장됨)
    pub id: String,
    /// 클라이언트 사이드 결제 확정에 사용되는 시크릿
    pub client_secret: Option<String>,
    /// Intent 상태 (requires_payment_method, succeeded 등)
    pub status: String,
    /// 금액 (통화 최소 단위)
    pub amount: i64,
    /// 통화 코드 (소문자)
    pub currency: String,
}

/// 환불 생성 응답
///
/// `POST /v1/refunds` 응답에서 필요한 필드만 추출합니다.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeRefund {
    /// 환불 ID
    pub id: String,
    /// 환불 상태 (succeeded, pending, failed)
    pub status: String,
}

/// 웹훅 이벤트 봉투
///
/// Stripe가 웹훅 엔드포인트로 전송하는 이벤트의 공통 구조입니다.
/// `data.object`는 이벤트 타입에 따라 형태가 다르므로 원본 JSON으로 보관합니다.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeWebhookEvent {
    /// 이벤트 ID
    pub id: String,
    /// 이벤트 타입 (payment_intent.succeeded, payment_intent.payment_failed 등)
    #[serde(rename = "type")]
    pub event_type: String,
    /// 이벤트 데이터
    pub data: StripeWebhookData,
}

/// 웹훅 이벤트 데이터 래퍼
#[derive(Debug, Clone, Deserialize)]
pub struct StripeWebhookData {
    /// 이벤트 대상 객체 (Payment Intent 등)
    pub object: serde_json::Value,
}

impl StripeWebhookEvent {
    /// 이벤트 대상 객체의 ID를 추출합니다 (Payment Intent ID 등)
    pub fn object_id(&self) -> Option<&str> {
        self.data.object.get("id").and_then(|v| v.as_str())
    }

    /// 결제 실패 이벤트의 실패 사유를 추출합니다
    pub fn failure_message(&self) -> Option<&str> {
        self.data
            .object
            .get("last_payment_error")
            .and_then(|e| e.get("message"))
            .and_then(|v| v.as_str())
    }
}

/// Stripe API 에러 응답
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorResponse {
    pub error: StripeErrorBody,
}

/// Stripe 에러 본문
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeErrorBody {
    /// 에러 메시지
    pub message: Option<String>,
    /// 에러 타입 (card_error, invalid_request_error 등)
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    /// 카드 거절 코드
    pub decline_code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_webhook_event_parsing() {
        let json = r#"{
            "id": "evt_1",
            "type": "payment_intent.succeeded",
            "data": {
                "object": {
                    "id": "pi_123",
                    "status": "succeeded"
                }
            }
        }"#;

        let event: StripeWebhookEvent = serde_json::from_str(json).unwrap();

        assert_eq!(event.event_type, "payment_intent.succeeded");
        assert_eq!(event.object_id(), Some("pi_123"));
        assert!(event.failure_message().is_none());
    }

    #[test]
    fn test_webhook_failure_message() {
        let json = r#"{
            "id": "evt_2",
            "type": "payment_intent.payment_failed",
            "data": {
                "object": {
                    "id": "pi_456",
                    "last_payment_error": { "message": "Your card was declined." }
                }
            }
        }"#;

        let event: StripeWebhookEvent = serde_json::from_str(json).unwrap();

        assert_eq!(event.failure_message(), Some("Your card was declined."));
    }
}

//! # Stripe 게이트웨이 서비스 구현
//!
//! Stripe REST API를 통해 Payment Intent 생성, 환불, 웹훅 서명 검증을
//! 제공합니다. Stripe API는 form-urlencoded 요청과 Secret Key Bearer
//! 인증을 사용합니다.
//!
//! ## 결제 플로우
//!
//! ```text
//! ┌─────────────┐                ┌─────────────────┐              ┌─────────────┐
//! │ 클라이언트    │                │   우리 서버       │              │   Stripe    │
//! └─────────────┘                └─────────────────┘              └─────────────┘
//!        │ 1. POST /payments/checkout        │                           │
//!        ├──────────────────────────────────►│ 2. Create Payment Intent  │
//!        │                                   ├──────────────────────────►│
//!        │                                   │ 3. intent id + secret     │
//!        │ 4. client_secret                  │◄──────────────────────────┤
//!        │◄──────────────────────────────────┤                           │
//!        │ 5. 카드 입력 및 결제 확정 (Stripe.js)                             │
//!        ├──────────────────────────────────────────────────────────────►│
//!        │                                   │ 6. webhook: succeeded     │
//!        │                                   │◄──────────────────────────┤
//!        │                                   │ 7. 서명 검증 후 결제 완료 처리  │
//! ```

use singleton_macro::service;
use sha2::{Digest, Sha256};
use crate::config::StripeConfig;
use crate::domain::models::payment_gateway::stripe_model::{StripeErrorResponse, StripePaymentIntent, StripeRefund};
use crate::errors::errors::AppError;

/// Stripe 게이트웨이 서비스
///
/// 모든 호출은 `StripeConfig`의 Secret Key로 인증됩니다.
#[service(name = "stripe")]
pub struct StripeService {
    // 외부 의존성 없음 (설정은 환경 변수에서 읽음)
}

impl StripeService {
    /// Payment Intent를 생성합니다
    ///
    /// # Arguments
    ///
    /// * `amount_cents` - 결제 금액 (통화 최소 단위)
    /// * `currency` - 통화 코드 (ISO 4217)
    /// * `payment_ref` - 내부 결제 참조 (metadata로 저장되어 웹훅 대조에 사용)
    ///
    /// # Errors
    ///
    /// * `AppError::PaymentError` - Stripe가 요청을 거절한 경우
    /// * `AppError::ExternalServiceError` - 통신/파싱 오류
    pub async fn create_payment_intent(
        &self,
        amount_cents: i64,
        currency: &str,
        payment_ref: &str,
    ) -> Result<StripePaymentIntent, AppError> {
        let client = reqwest::Client::new();
        let amount = amount_cents.to_string();
        let currency_lower = currency.to_lowercase();

        let params = [
            ("amount", amount.as_str()),
            ("currency", currency_lower.as_str()),
            ("metadata[payment_ref]", payment_ref),
            ("automatic_payment_methods[enabled]", "true"),
        ];

        let response = client
            .post(format!("{}/v1/payment_intents", StripeConfig::api_base()))
            .bearer_auth(StripeConfig::secret_key())
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Stripe 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::warn!("Stripe Payment Intent 생성 거절: {}", error_text);
            return Err(AppError::PaymentError(extract_stripe_error(&error_text)));
        }

        response
            .json::<StripePaymentIntent>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Stripe 응답 파싱 실패: {}", e)))
    }

    /// Payment Intent 전액 환불을 요청합니다
    pub async fn refund_payment(&self, payment_intent_id: &str) -> Result<StripeRefund, AppError> {
        let client = reqwest::Client::new();

        let params = [("payment_intent", payment_intent_id)];

        let response = client
            .post(format!("{}/v1/refunds", StripeConfig::api_base()))
            .bearer_auth(StripeConfig::secret_key())
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Stripe 환불 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::PaymentError(format!(
                "Stripe 환불 실패: {}", error_text
            )));
        }

        response
            .json::<StripeRefund>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Stripe 환불 응답 파싱 실패: {}", e)))
    }

    /// 웹훅 요청의 서명을 검증합니다
    ///
    /// `Stripe-Signature` 헤더의 `t=타임스탬프,v1=서명` 형식을 파싱하여
    /// 본문 무결성과 재전송 공격 여부를 확인합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::PaymentError` - 서명 불일치, 타임스탬프 허용 오차 초과
    pub fn verify_webhook_signature(&self, payload: &str, signature_header: &str) -> Result<(), AppError> {
        let now = chrono::Utc::now().timestamp();
        verify_signature_with_secret(
            payload,
            signature_header,
            &StripeConfig::webhook_secret(),
            StripeConfig::webhook_tolerance_secs(),
            now,
        )
    }
}

/// Stripe 에러 응답에서 사람이 읽을 수 있는 메시지를 추출합니다
///
/// 구조화된 에러 본문 파싱에 실패하면 원본 텍스트를 그대로 반환합니다.
fn extract_stripe_error(error_text: &str) -> String {
    match serde_json::from_str::<StripeErrorResponse>(error_text) {
        Ok(parsed) => {
            let message = parsed.error.message.unwrap_or_else(|| "결제가 거절되었습니다".to_string());
            match parsed.error.decline_code {
                Some(code) => format!("{} ({})", message, code),
                None => message,
            }
        }
        Err(_) => format!("Stripe 결제 생성 실패: {}", error_text),
    }
}

/// 서명 헤더에서 타임스탬프와 서명을 파싱합니다
///
/// 형식: `t=1614556800,v1=5257a869e7...`
fn parse_signature_header(header: &str) -> Result<(i64, String), AppError> {
    let mut timestamp = None;
    let mut signature = None;

    for part in header.split(',') {
        let mut kv = part.trim().splitn(2, '=');
        match (kv.next(), kv.next()) {
            (Some("t"), Some(value)) => {
                timestamp = value.parse::<i64>().ok();
            }
            (Some("v1"), Some(value)) => {
                signature = Some(value.to_string());
            }
            _ => {}
        }
    }

    match (timestamp, signature) {
        (Some(t), Some(sig)) => Ok((t, sig)),
        _ => Err(AppError::PaymentError("유효하지 않은 웹훅 서명 헤더 형식입니다".to_string())),
    }
}

/// 서명 다이제스트를 계산합니다
///
/// `{timestamp}.{payload}.{secret}`의 SHA-256 해시를 16진수 문자열로
/// 반환합니다.
fn compute_signature(timestamp: i64, payload: &str, secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{}.{}.{}", timestamp, payload, secret).as_bytes());
    let digest = hasher.finalize();

    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// 비밀키를 명시적으로 받아 서명을 검증합니다 (테스트 가능한 내부 구현)
fn verify_signature_with_secret(
    payload: &str,
    signature_header: &str,
    secret: &str,
    tolerance_secs: i64,
    now: i64,
) -> Result<(), AppError> {
    let (timestamp, signature) = parse_signature_header(signature_header)?;

    if (now - timestamp).abs() > tolerance_secs {
        return Err(AppError::PaymentError("웹훅 타임스탬프가 허용 범위를 벗어났습니다".to_string()));
    }

    let expected = compute_signature(timestamp, payload, secret);

    if expected != signature {
        return Err(AppError::PaymentError("웹훅 서명이 일치하지 않습니다".to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_stripe_error() {
        let body = r#"{"error":{"message":"Your card was declined.","type":"card_error","decline_code":"insufficient_funds"}}"#;
        assert_eq!(
            extract_stripe_error(body),
            "Your card was declined. (insufficient_funds)"
        );

        let body = r#"{"error":{"message":"Invalid API Key","type":"invalid_request_error"}}"#;
        assert_eq!(extract_stripe_error(body), "Invalid API Key");

        // 파싱 불가능한 본문은 원본 유지
        assert!(extract_stripe_error("not json").contains("not json"));
    }

    #[test]
    fn test_parse_signature_header() {
        let (t, sig) = parse_signature_header("t=1614556800,v1=abcdef0123").unwrap();
        assert_eq!(t, 1614556800);
        assert_eq!(sig, "abcdef0123");

        // 공백 허용
        let (t, _) = parse_signature_header("t=100, v1=aa").unwrap();
        assert_eq!(t, 100);

        // 필수 필드 누락
        assert!(parse_signature_header("t=100").is_err());
        assert!(parse_signature_header("v1=aa").is_err());
        assert!(parse_signature_header("garbage").is_err());
    }

    #[test]
    fn test_signature_roundtrip() {
        let payload = r#"{"id":"evt_1","type":"payment_intent.succeeded"}"#;
        let secret = "whsec_test";
        let now = 1700000000;

        let signature = compute_signature(now, payload, secret);
        let header = format!("t={},v1={}", now, signature);

        assert!(verify_signature_with_secret(payload, &header, secret, 300, now).is_ok());
    }

    #[test]
    fn test_signature_rejects_tampered_payload() {
        let secret = "whsec_test";
        let now = 1700000000;

        let signature = compute_signature(now, "original", secret);
        let header = format!("t={},v1={}", now, signature);

        assert!(verify_signature_with_secret("tampered", &header, secret, 300, now).is_err());
    }

    #[test]
    fn test_signature_rejects_wrong_secret() {
        let now = 1700000000;
        let signature = compute_signature(now, "payload", "whsec_a");
        let header = format!("t={},v1={}", now, signature);

        assert!(verify_signature_with_secret("payload", &header, "whsec_b", 300, now).is_err());
    }

    #[test]
    fn test_signature_rejects_stale_timestamp() {
        let secret = "whsec_test";
        let issued = 1700000000;
        let now = issued + 600; // 허용 오차 300초 초과

        let signature = compute_signature(issued, "payload", secret);
        let header = format!("t={},v1={}", issued, signature);

        assert!(verify_signature_with_secret("payload", &header, secret, 300, now).is_err());
    }
}

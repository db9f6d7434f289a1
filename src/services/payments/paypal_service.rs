//! # PayPal 게이트웨이 서비스 구현
//!
//! PayPal Orders v2 REST API를 통해 주문 생성, 조회, 캡처, 환불을
//! 제공합니다. 모든 호출 전에 클라이언트 자격 증명으로 액세스 토큰을
//! 발급받아 Bearer 인증에 사용합니다.
//!
//! ## 결제 플로우
//!
//! ```text
//! 1. POST /payments/checkout      → 서버가 주문 생성, approve_url 반환
//! 2. 구매자가 approve_url에서 승인   → PayPal이 프론트엔드로 리다이렉트
//! 3. POST /payments/paypal/capture → 서버가 주문을 캡처하고 결제 완료 처리
//! ```
//!
//! 캡처는 반드시 서버에서 수행되며, 캡처 응답의 상태가 COMPLETED일 때만
//! 결제가 완료된 것으로 신뢰합니다.

use singleton_macro::service;
use crate::config::PayPalConfig;
use crate::domain::models::payment_gateway::paypal_model::{PayPalOrder, PayPalRefund, PayPalTokenResponse};
use crate::errors::errors::AppError;

/// 소수점 없이 표기하는 통화 (PayPal 기준)
const ZERO_DECIMAL_CURRENCIES: [&str; 3] = ["JPY", "KRW", "TWD"];

/// PayPal 게이트웨이 서비스
#[service(name = "paypal")]
pub struct PaypalService {
    // 외부 의존성 없음 (설정은 환경 변수에서 읽음)
}

impl PaypalService {
    /// 클라이언트 자격 증명으로 액세스 토큰을 발급받습니다
    async fn get_access_token(&self) -> Result<String, AppError> {
        let client = reqwest::Client::new();

        let response = client
            .post(format!("{}/v1/oauth2/token", PayPalConfig::api_base()))
            .basic_auth(PayPalConfig::client_id(), Some(PayPalConfig::client_secret()))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("PayPal 토큰 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "PayPal 토큰 발급 실패: {}", error_text
            )));
        }

        let token = response
            .json::<PayPalTokenResponse>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("PayPal 토큰 응답 파싱 실패: {}", e)))?;

        Ok(token.access_token)
    }

    /// 결제 주문을 생성합니다
    ///
    /// # Arguments
    ///
    /// * `amount_cents` - 결제 금액 (통화 최소 단위)
    /// * `currency` - 통화 코드 (ISO 4217)
    /// * `reference_id` - 내부 결제 참조 (주문 대조용)
    /// * `return_url` / `cancel_url` - 승인 완료/취소 후 리다이렉트 주소
    pub async fn create_order(
        &self,
        amount_cents: i64,
        currency: &str,
        reference_id: &str,
        return_url: &str,
        cancel_url: &str,
    ) -> Result<PayPalOrder, AppError> {
        let access_token = self.get_access_token().await?;
        let client = reqwest::Client::new();

        let body = serde_json::json!({
            "intent": "CAPTURE",
            "purchase_units": [{
                "reference_id": reference_id,
                "amount": {
                    "currency_code": currency,
                    "value": format_amount(amount_cents, currency),
                }
            }],
            "application_context": {
                "return_url": return_url,
                "cancel_url": cancel_url,
            }
        });

        let response = client
            .post(format!("{}/v2/checkout/orders", PayPalConfig::api_base()))
            .bearer_auth(access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("PayPal 주문 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::warn!("PayPal 주문 생성 거절: {}", error_text);
            return Err(AppError::PaymentError(format!(
                "PayPal 주문 생성 실패: {}", error_text
            )));
        }

        response
            .json::<PayPalOrder>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("PayPal 주문 응답 파싱 실패: {}", e)))
    }

    /// 주문 상태를 조회합니다
    pub async fn get_order(&self, order_id: &str) -> Result<PayPalOrder, AppError> {
        let access_token = self.get_access_token().await?;
        let client = reqwest::Client::new();

        let response = client
            .get(format!("{}/v2/checkout/orders/{}", PayPalConfig::api_base(), order_id))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("PayPal 주문 조회 실패: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "PayPal 주문 조회 실패: {}", error_text
            )));
        }

        response
            .json::<PayPalOrder>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("PayPal 주문 응답 파싱 실패: {}", e)))
    }

    /// 승인된 주문을 캡처(확정)합니다
    ///
    /// 구매자 승인 후에만 성공하며, 캡처 성공 시 실제 청구가 발생합니다.
    pub async fn capture_order(&self, order_id: &str) -> Result<PayPalOrder, AppError> {
        let access_token = self.get_access_token().await?;
        let client = reqwest::Client::new();

        let response = client
            .post(format!("{}/v2/checkout/orders/{}/capture", PayPalConfig::api_base(), order_id))
            .bearer_auth(access_token)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("PayPal 캡처 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::warn!("PayPal 캡처 거절: {}", error_text);
            return Err(AppError::PaymentError(format!(
                "PayPal 결제 확정 실패: {}", error_text
            )));
        }

        response
            .json::<PayPalOrder>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("PayPal 캡처 응답 파싱 실패: {}", e)))
    }

    /// 캡처된 결제를 환불합니다
    pub async fn refund_order(&self, capture_id: &str) -> Result<PayPalRefund, AppError> {
        let access_token = self.get_access_token().await?;
        let client = reqwest::Client::new();

        let response = client
            .post(format!("{}/v2/payments/captures/{}/refund", PayPalConfig::api_base(), capture_id))
            .bearer_auth(access_token)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("PayPal 환불 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::PaymentError(format!(
                "PayPal 환불 실패: {}", error_text
            )));
        }

        response
            .json::<PayPalRefund>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("PayPal 환불 응답 파싱 실패: {}", e)))
    }
}

/// 최소 단위 금액을 PayPal의 십진수 문자열 표기로 변환합니다
///
/// 소수점이 없는 통화(KRW, JPY 등)는 그대로, 나머지는 1/100 단위로
/// 소수점 둘째 자리까지 표기합니다.
pub fn format_amount(amount_cents: i64, currency: &str) -> String {
    if ZERO_DECIMAL_CURRENCIES.contains(&currency.to_uppercase().as_str()) {
        amount_cents.to_string()
    } else {
        format!("{}.{:02}", amount_cents / 100, amount_cents % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount_decimal_currency() {
        assert_eq!(format_amount(4_990, "USD"), "49.90");
        assert_eq!(format_amount(100, "EUR"), "1.00");
        assert_eq!(format_amount(5, "USD"), "0.05");
        assert_eq!(format_amount(0, "USD"), "0.00");
    }

    #[test]
    fn test_format_amount_zero_decimal_currency() {
        assert_eq!(format_amount(49_900, "KRW"), "49900");
        assert_eq!(format_amount(1_000, "JPY"), "1000");
        assert_eq!(format_amount(1_000, "krw"), "1000");
    }
}

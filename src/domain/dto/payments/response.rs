//! 결제 응답 DTO

use serde::{Deserialize, Serialize};
use mongodb::bson::DateTime;
use crate::domain::entities::payments::payment::{Payment, PaymentProvider, PaymentStatus};

/// 체크아웃 시작 응답 DTO
///
/// 프로바이더에 따라 클라이언트가 사용할 필드가 다릅니다:
/// - Stripe: `client_secret`으로 클라이언트 사이드 결제 확정
/// - PayPal: `approve_url`로 구매자 리다이렉트
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutResponse {
    /// 생성된 결제 ID
    pub payment_id: String,
    /// 게이트웨이
    pub provider: PaymentProvider,
    /// 총 결제 금액 (통화 최소 단위)
    pub amount_cents: i64,
    /// 통화 코드
    pub currency: String,
    /// Stripe client secret
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
    /// PayPal 구매자 승인 URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approve_url: Option<String>,
}

/// 결제 항목 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentItemResponse {
    pub course_id: String,
    pub title: String,
    pub unit_price_cents: i64,
    pub instructor_amount_cents: i64,
    pub platform_amount_cents: i64,
}

/// 결제 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentResponse {
    pub id: String,
    pub student_id: String,
    pub items: Vec<PaymentItemResponse>,
    pub amount_cents: i64,
    pub currency: String,
    pub provider: PaymentProvider,
    pub status: PaymentStatus,
    pub failure_reason: Option<String>,
    pub completed_at: Option<DateTime>,
    pub refunded_at: Option<DateTime>,
    pub created_at: DateTime,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id.map(|id| id.to_hex()).unwrap_or_default(),
            student_id: payment.student_id.to_hex(),
            items: payment
                .items
                .into_iter()
                .map(|item| PaymentItemResponse {
                    course_id: item.course_id.to_hex(),
                    title: item.title,
                    unit_price_cents: item.unit_price_cents,
                    instructor_amount_cents: item.instructor_amount_cents,
                    platform_amount_cents: item.platform_amount_cents,
                })
                .collect(),
            amount_cents: payment.amount_cents,
            currency: payment.currency,
            provider: payment.provider,
            status: payment.status,
            failure_reason: payment.failure_reason,
            completed_at: payment.completed_at,
            refunded_at: payment.refunded_at,
            created_at: payment.created_at,
        }
    }
}

//! Payment HTTP Handlers
//!
//! 체크아웃, 게이트웨이 웹훅, 캡처, 환불, 결제 내역 엔드포인트를 처리하는
//! 핸들러 함수들입니다.
//!
//! # Endpoints
//!
//! ## Protected (인증 필요)
//! - `POST /payments/checkout` - 체크아웃 시작 (강의 목록 또는 장바구니)
//! - `POST /payments/paypal/capture` - PayPal 승인 후 캡처
//! - `GET /payments` - 내 결제 내역
//! - `GET /payments/{id}` - 결제 상세
//! - `POST /payments/{id}/refund` - 환불
//!
//! ## Public (게이트웨이 호출, 서명으로 검증)
//! - `POST /webhooks/stripe` - Stripe 웹훅
//!
//! 웹훅 라우트는 JWT 미들웨어를 거치지 않는 대신 서명 검증으로 보호됩니다.

use actix_web::{get, post, web, HttpRequest, HttpResponse};
use serde_json::json;
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::common::PageQuery;
use crate::domain::dto::payments::request::{CaptureRequest, CheckoutRequest, RefundRequest};
use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::services::payments::payment_service::PaymentService;

/// 체크아웃 시작 핸들러
///
/// `course_ids`를 생략하면 장바구니 전체를 결제합니다.
/// 응답에는 게이트웨이별 클라이언트 정보가 담깁니다
/// (Stripe: `client_secret`, PayPal: `approve_url`).
///
/// # Endpoint
/// `POST /payments/checkout`
#[post("/checkout")]
pub async fn checkout(
    student: AuthenticatedUser,
    payload: web::Json<CheckoutRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = PaymentService::instance();
    let response = service.start_checkout(&student, payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(response))
}

/// PayPal 캡처 핸들러
///
/// 구매자가 PayPal 승인 페이지에서 돌아온 뒤 호출됩니다.
/// 캡처 성공 시 결제가 완료되고 수강 등록이 생성됩니다.
///
/// # Endpoint
/// `POST /payments/paypal/capture`
#[post("/paypal/capture")]
pub async fn capture_paypal(
    student: AuthenticatedUser,
    payload: web::Json<CaptureRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = PaymentService::instance();
    let response = service.capture_paypal(&student, &payload.order_id).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// Stripe 웹훅 핸들러
///
/// 서명 검증에 실패한 요청은 402로 거절됩니다.
/// 처리 대상이 아닌 이벤트 타입은 200으로 응답하여 재전송을 막습니다.
///
/// # Endpoint
/// `POST /webhooks/stripe`
#[post("/stripe")]
pub async fn stripe_webhook(
    req: HttpRequest,
    payload: String,
) -> Result<HttpResponse, AppError> {
    let signature = req.headers()
        .get("Stripe-Signature")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::PaymentError("Stripe-Signature 헤더가 없습니다".to_string()))?;

    let service = PaymentService::instance();
    service.handle_stripe_webhook(&payload, signature).await?;

    Ok(HttpResponse::Ok().json(json!({ "received": true })))
}

/// 내 결제 내역 핸들러
///
/// # Endpoint
/// `GET /payments?page=1&per_page=20`
#[get("")]
pub async fn my_payments(
    student: AuthenticatedUser,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let service = PaymentService::instance();
    let response = service.my_payments(&student, query.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 결제 상세 조회 핸들러 (소유자 또는 관리자)
///
/// # Endpoint
/// `GET /payments/{payment_id}`
#[get("/{payment_id}")]
pub async fn get_payment(
    viewer: AuthenticatedUser,
    payment_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let service = PaymentService::instance();
    let response = service.get_payment(&viewer, &payment_id).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 환불 핸들러
///
/// 게이트웨이 환불 성공 후 연결된 수강 등록이 취소됩니다.
///
/// # Endpoint
/// `POST /payments/{payment_id}/refund`
#[post("/{payment_id}/refund")]
pub async fn refund_payment(
    viewer: AuthenticatedUser,
    payment_id: web::Path<String>,
    payload: web::Json<RefundRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = PaymentService::instance();
    let response = service
        .refund(&viewer, &payment_id, payload.into_inner().reason)
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

//! # 결제 오케스트레이션 서비스 구현
//!
//! 체크아웃 시작, 게이트웨이 웹훅/캡처 처리, 결제 완료, 환불을 담당하는
//! 핵심 비즈니스 로직입니다. 결제 완료 시 수강 등록 생성과 장바구니 정리,
//! 수익 분배 스냅샷 기록까지 한 번에 수행합니다.
//!
//! ## 상태 전이와 보상 처리
//!
//! ```text
//! checkout ──► Pending ──(webhook/capture)──► Completed ──(refund)──► Refunded
//!                 │                               │                      │
//!                 └──(declined)──► Failed         │                      └─ 수강 등록 취소(revoked)
//!                                                 └─ 수강 등록 생성, 장바구니 정리,
//!                                                    수익 분배 계산, 수강생 수 증가
//! ```
//!
//! ## 멱등성
//!
//! 게이트웨이 웹훅은 중복 전송될 수 있으므로, 이미 완료된 결제에 대한
//! 완료 이벤트는 조용히 무시됩니다. 수강 등록도 이미 존재하면 건너뜁니다.

use std::sync::Arc;
use mongodb::bson::{doc, oid::ObjectId};
use singleton_macro::service;
use crate::{
    config::{RevenueConfig, ServerConfig},
    domain::{
        dto::common::{PageQuery, PaginatedResponse},
        dto::payments::{
            request::CheckoutRequest,
            response::{CheckoutResponse, PaymentResponse},
        },
        entities::{
            courses::course::Course,
            enrollments::enrollment::{Enrollment, EnrollmentSource},
            payments::payment::{Payment, PaymentItem, PaymentProvider},
        },
        models::auth::authenticated_user::AuthenticatedUser,
        models::payment_gateway::stripe_model::StripeWebhookEvent,
    },
    repositories::{
        carts::cart_repo::CartRepository,
        courses::course_repo::CourseRepository,
        enrollments::enrollment_repo::EnrollmentRepository,
        payments::payment_repo::PaymentRepository,
    },
    services::payments::{paypal_service::PaypalService, stripe_service::StripeService},
    core::errors::AppError,
};

/// 결제 오케스트레이션 서비스
#[service(name = "payment")]
pub struct PaymentService {
    /// 결제 리포지토리
    payment_repo: Arc<PaymentRepository>,

    /// 수강 등록 리포지토리 (완료/환불 보상 처리)
    enrollment_repo: Arc<EnrollmentRepository>,

    /// 강의 리포지토리 (항목 검증, 수강생 수 집계)
    course_repo: Arc<CourseRepository>,

    /// 장바구니 리포지토리 (체크아웃 소스, 구매 후 정리)
    cart_repo: Arc<CartRepository>,

    /// Stripe 게이트웨이
    stripe: Arc<StripeService>,

    /// PayPal 게이트웨이
    paypal: Arc<PaypalService>,
}

impl PaymentService {
    /// 체크아웃을 시작합니다
    ///
    /// # 처리 과정
    ///
    /// 1. 구매 대상 확정: 명시된 강의 목록 또는 장바구니 전체
    /// 2. 항목 검증: 공개 상태, 본인 강의 제외, 중복 수강 제외, 통화 일치
    /// 3. 게이트웨이 세션 생성: Stripe Payment Intent / PayPal Order
    /// 4. `Pending` 결제 문서 저장
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 빈 목록, 무료 강의만 포함, 통화 혼합
    /// * `AppError::ConflictError` - 이미 수강 중인 강의 포함
    /// * `AppError::PaymentError` - 게이트웨이가 세션 생성을 거절
    pub async fn start_checkout(&self, student: &AuthenticatedUser, request: CheckoutRequest) -> Result<CheckoutResponse, AppError> {
        let student_id = ObjectId::parse_str(&student.user_id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 사용자 ID 형식입니다".to_string()))?;

        // 1. 구매 대상 강의 ID 확정
        let course_ids: Vec<String> = match request.course_ids {
            Some(ids) if !ids.is_empty() => ids,
            _ => {
                let cart = self.cart_repo.find_or_create(&student_id).await?;
                cart.items.iter().map(|i| i.course_id.to_hex()).collect()
            }
        };

        if course_ids.is_empty() {
            return Err(AppError::ValidationError("구매할 강의가 없습니다".to_string()));
        }

        // 2. 항목 검증 및 스냅샷 구성
        let mut items = Vec::with_capacity(course_ids.len());
        let mut currency: Option<String> = None;

        for course_id in &course_ids {
            let course = self.validate_purchasable(&student_id, course_id).await?;
            let course_oid = course.id
                .ok_or_else(|| AppError::InternalError("강의 ID가 없습니다".to_string()))?;

            match &currency {
                None => currency = Some(course.currency.clone()),
                Some(c) if c != &course.currency => {
                    return Err(AppError::ValidationError(
                        "서로 다른 통화의 강의는 함께 결제할 수 없습니다".to_string(),
                    ));
                }
                _ => {}
            }

            items.push(PaymentItem {
                course_id: course_oid,
                instructor_id: course.instructor_id,
                title: course.title.clone(),
                unit_price_cents: course.price_cents,
                instructor_amount_cents: 0,
                platform_amount_cents: 0,
            });
        }

        let currency = currency.unwrap_or_else(|| "USD".to_string());
        let amount_cents: i64 = items.iter().map(|i| i.unit_price_cents).sum();

        if amount_cents == 0 {
            return Err(AppError::ValidationError(
                "무료 강의는 결제 없이 바로 등록할 수 있습니다".to_string(),
            ));
        }

        let provider = PaymentProvider::from_str(&request.provider)
            .map_err(AppError::ValidationError)?;
        let internal_ref = uuid::Uuid::new_v4().to_string();

        // 3. 게이트웨이 세션 생성
        let (provider_ref, client_secret, approve_url) = match provider {
            PaymentProvider::Stripe => {
                let intent = self.stripe
                    .create_payment_intent(amount_cents, &currency, &internal_ref)
                    .await?;
                (intent.id, intent.client_secret, None)
            }
            PaymentProvider::Paypal => {
                let frontend = ServerConfig::frontend_origin();
                let encoded_ref = urlencoding::encode(&internal_ref);
                let order = self.paypal
                    .create_order(
                        amount_cents,
                        &currency,
                        &internal_ref,
                        &format!("{}/payments/paypal/return?ref={}", frontend, encoded_ref),
                        &format!("{}/payments/paypal/cancel?ref={}", frontend, encoded_ref),
                    )
                    .await?;
                let approve_url = order.approve_url().map(|u| u.to_string());
                (order.id, None, approve_url)
            }
        };

        // 4. Pending 결제 저장
        let payment = Payment::new_pending(
            student_id,
            items,
            currency.clone(),
            provider.clone(),
            provider_ref,
            RevenueConfig::instructor_share_bp(),
        );
        let created = self.payment_repo.create(payment).await?;

        log::info!(
            "체크아웃 시작: 결제={}, 금액={} {}, 게이트웨이={}",
            created.id_string().unwrap_or_default(),
            amount_cents,
            currency,
            provider.as_str()
        );

        Ok(CheckoutResponse {
            payment_id: created.id_string().unwrap_or_default(),
            provider,
            amount_cents,
            currency,
            client_secret,
            approve_url,
        })
    }

    /// 구매 가능한 강의인지 검증하고 반환합니다
    async fn validate_purchasable(&self, student_id: &ObjectId, course_id: &str) -> Result<Course, AppError> {
        let course = self.course_repo
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("강의를 찾을 수 없습니다: {}", course_id)))?;

        if !course.is_published() {
            return Err(AppError::ConflictError(format!(
                "판매 중이 아닌 강의입니다: {}", course.title
            )));
        }

        if &course.instructor_id == student_id {
            return Err(AppError::ConflictError(format!(
                "본인의 강의는 구매할 수 없습니다: {}", course.title
            )));
        }

        let course_oid = course.id
            .ok_or_else(|| AppError::InternalError("강의 ID가 없습니다".to_string()))?;

        if self.enrollment_repo
            .find_by_student_and_course(student_id, &course_oid)
            .await?
            .is_some()
        {
            return Err(AppError::ConflictError(format!(
                "이미 수강 중인 강의입니다: {}", course.title
            )));
        }

        Ok(course)
    }

    /// Stripe 웹훅 이벤트를 처리합니다
    ///
    /// 서명 검증에 실패하면 이벤트 본문을 신뢰하지 않습니다.
    /// 관심 없는 이벤트 타입은 성공으로 응답하여 재전송을 막습니다.
    pub async fn handle_stripe_webhook(&self, payload: &str, signature_header: &str) -> Result<(), AppError> {
        self.stripe.verify_webhook_signature(payload, signature_header)?;

        let event: StripeWebhookEvent = serde_json::from_str(payload)
            .map_err(|e| AppError::ValidationError(format!("웹훅 본문 파싱 실패: {}", e)))?;

        let Some(provider_ref) = event.object_id().map(|s| s.to_string()) else {
            log::warn!("웹훅 이벤트에 객체 ID가 없습니다: {}", event.event_type);
            return Ok(());
        };

        match event.event_type.as_str() {
            "payment_intent.succeeded" => {
                self.complete_by_provider_ref(&provider_ref, None).await
            }
            "payment_intent.payment_failed" => {
                let reason = event.failure_message().unwrap_or("결제가 거절되었습니다").to_string();
                self.fail_by_provider_ref(&provider_ref, reason).await
            }
            other => {
                log::debug!("처리하지 않는 웹훅 이벤트: {}", other);
                Ok(())
            }
        }
    }

    /// 구매자 승인 후 PayPal 주문을 캡처하고 결제를 완료합니다
    pub async fn capture_paypal(&self, student: &AuthenticatedUser, order_id: &str) -> Result<PaymentResponse, AppError> {
        let payment = self.payment_repo
            .find_by_provider_ref(order_id)
            .await?
            .ok_or_else(|| AppError::NotFound("결제를 찾을 수 없습니다".to_string()))?;

        if payment.student_id.to_hex() != student.user_id {
            return Err(AppError::NotFound("결제를 찾을 수 없습니다".to_string()));
        }

        // 멱등 처리: 이미 완료된 주문의 재캡처 요청
        if payment.is_completed() {
            return Ok(PaymentResponse::from(payment));
        }

        let captured = self.paypal.capture_order(order_id).await?;

        if !captured.is_completed() {
            return Err(AppError::PaymentError(format!(
                "PayPal 주문이 완료되지 않았습니다 (상태: {})", captured.status
            )));
        }

        self.complete_by_provider_ref(order_id, Some(captured.id.clone())).await?;

        let completed = self.payment_repo
            .find_by_provider_ref(order_id)
            .await?
            .ok_or_else(|| AppError::InternalError("완료된 결제를 찾을 수 없습니다".to_string()))?;

        Ok(PaymentResponse::from(completed))
    }

    /// 게이트웨이 참조로 결제를 완료 처리합니다 (멱등)
    ///
    /// # 완료 시 수행되는 작업
    ///
    /// 1. 항목별 수익 분배 계산 및 스냅샷 기록
    /// 2. 각 강의에 대한 수강 등록 생성 (이미 있으면 건너뜀)
    /// 3. 강의 수강생 수 집계 증가
    /// 4. 장바구니에서 구매된 항목 제거
    async fn complete_by_provider_ref(&self, provider_ref: &str, capture_ref: Option<String>) -> Result<(), AppError> {
        let mut payment = self.payment_repo
            .find_by_provider_ref(provider_ref)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("결제를 찾을 수 없습니다: {}", provider_ref)))?;

        // 멱등 처리: 웹훅 중복 전송
        if payment.is_completed() {
            log::debug!("이미 완료된 결제의 중복 완료 이벤트: {}", provider_ref);
            return Ok(());
        }

        if !payment.can_complete() {
            return Err(AppError::PaymentError(format!(
                "완료할 수 없는 결제 상태입니다: {}", payment.status.as_str()
            )));
        }

        payment.mark_completed();
        payment.provider_capture_ref = capture_ref;
        self.payment_repo.save(&payment).await?;

        let payment_id = payment.id;

        // 수강 등록 생성 및 집계 갱신
        for item in &payment.items {
            let enrollment = Enrollment::new(
                payment.student_id,
                item.course_id,
                EnrollmentSource::Purchase,
                payment_id,
            );

            match self.enrollment_repo.create(enrollment).await {
                Ok(_) => {
                    self.course_repo
                        .inc_aggregates(&item.course_id, doc! { "enrollment_count": 1 })
                        .await?;
                }
                Err(AppError::ConflictError(_)) => {
                    // 이미 등록된 강의 (중복 웹훅 등) - 건너뜀
                    log::debug!("기존 수강 등록 존재: 강의={}", item.course_id.to_hex());
                }
                Err(e) => return Err(e),
            }
        }

        // 장바구니에서 구매된 항목 제거
        let mut cart = self.cart_repo.find_or_create(&payment.student_id).await?;
        let purchased: Vec<ObjectId> = payment.items.iter().map(|i| i.course_id).collect();
        let before = cart.items.len();
        cart.items.retain(|i| !purchased.contains(&i.course_id));
        if cart.items.len() != before {
            cart.updated_at = mongodb::bson::DateTime::now();
            self.cart_repo.save(&cart).await?;
        }

        log::info!(
            "결제 완료: {}, 강의 {}건, 수강생={}",
            provider_ref,
            payment.items.len(),
            payment.student_id.to_hex()
        );

        Ok(())
    }

    /// 게이트웨이 참조로 결제를 실패 처리합니다
    async fn fail_by_provider_ref(&self, provider_ref: &str, reason: String) -> Result<(), AppError> {
        let mut payment = self.payment_repo
            .find_by_provider_ref(provider_ref)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("결제를 찾을 수 없습니다: {}", provider_ref)))?;

        if !payment.can_complete() {
            // Pending이 아닌 결제의 실패 이벤트는 무시 (이미 처리됨)
            return Ok(());
        }

        log::warn!("결제 실패: {} - {}", provider_ref, reason);

        payment.mark_failed(reason);
        self.payment_repo.save(&payment).await
    }

    /// 결제를 환불합니다
    ///
    /// 결제 소유자 또는 관리자만 요청할 수 있으며, 완료 상태의 결제만
    /// 환불됩니다. 게이트웨이 환불 성공 후 보상 처리로 수강 등록을
    /// 취소(revoked)하고 수강생 수 집계를 되돌립니다.
    pub async fn refund(&self, viewer: &AuthenticatedUser, payment_id: &str, reason: Option<String>) -> Result<PaymentResponse, AppError> {
        let mut payment = self.payment_repo
            .find_by_id(payment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("결제를 찾을 수 없습니다".to_string()))?;

        if payment.student_id.to_hex() != viewer.user_id && !viewer.is_admin() {
            return Err(AppError::NotFound("결제를 찾을 수 없습니다".to_string()));
        }

        if !payment.can_refund() {
            return Err(AppError::ConflictError(format!(
                "환불할 수 없는 결제 상태입니다: {}", payment.status.as_str()
            )));
        }

        // 게이트웨이 환불 호출
        match payment.provider {
            PaymentProvider::Stripe => {
                self.stripe.refund_payment(&payment.provider_ref).await?;
            }
            PaymentProvider::Paypal => {
                let capture_ref = payment.provider_capture_ref
                    .as_deref()
                    .ok_or_else(|| AppError::InternalError("캡처 참조가 없어 환불할 수 없습니다".to_string()))?;
                self.paypal.refund_order(capture_ref).await?;
            }
        }

        payment.mark_refunded();
        self.payment_repo.save(&payment).await?;

        // 보상 처리: 수강 등록 취소 및 집계 되돌림
        if let Some(id) = payment.id {
            let revoked = self.enrollment_repo.revoke_by_payment(&id).await?;
            log::info!("환불 보상 처리: 수강 등록 {}건 취소", revoked);
        }
        for item in &payment.items {
            self.course_repo
                .inc_aggregates(&item.course_id, doc! { "enrollment_count": -1 })
                .await?;
        }

        log::info!(
            "환불 완료: 결제={}, 사유={}",
            payment_id,
            reason.as_deref().unwrap_or("(미기재)")
        );

        Ok(PaymentResponse::from(payment))
    }

    /// 내 결제 내역을 조회합니다 (최신순, 페이지네이션)
    pub async fn my_payments(&self, student: &AuthenticatedUser, page: PageQuery) -> Result<PaginatedResponse<PaymentResponse>, AppError> {
        let student_id = ObjectId::parse_str(&student.user_id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 사용자 ID 형식입니다".to_string()))?;

        let total = self.payment_repo.count_by_student(&student_id).await?;
        let payments = self.payment_repo
            .find_by_student(&student_id, page.skip(), page.per_page() as i64)
            .await?;

        let data = payments.into_iter().map(PaymentResponse::from).collect();

        Ok(PaginatedResponse::new(data, total, page.page(), page.per_page()))
    }

    /// 결제 단건을 조회합니다 (소유자 또는 관리자)
    pub async fn get_payment(&self, viewer: &AuthenticatedUser, payment_id: &str) -> Result<PaymentResponse, AppError> {
        let payment = self.payment_repo
            .find_by_id(payment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("결제를 찾을 수 없습니다".to_string()))?;

        if payment.student_id.to_hex() != viewer.user_id && !viewer.is_admin() {
            return Err(AppError::NotFound("결제를 찾을 수 없습니다".to_string()));
        }

        Ok(PaymentResponse::from(payment))
    }
}

//! Payment Entity Implementation
//!
//! 결제 엔티티와 수익 분배 로직의 핵심 구현체입니다.
//! `Pending → Completed → Refunded` 상태 머신과 `Pending → Failed` 전이를
//! 지원하며, 결제 시점의 강의 제목/가격과 수익 분배 결과를 스냅샷으로
//! 보관하여 이후 강의 정보가 변해도 결제 기록이 불변으로 유지됩니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 결제 게이트웨이 프로바이더
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentProvider {
    Stripe,
    Paypal,
}

impl PaymentProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentProvider::Stripe => "stripe",
            PaymentProvider::Paypal => "paypal",
        }
    }

    /// 문자열에서 프로바이더를 생성합니다 (대소문자 무관)
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "stripe" => Ok(PaymentProvider::Stripe),
            "paypal" => Ok(PaymentProvider::Paypal),
            _ => Err(format!("Unsupported payment provider: {}", s)),
        }
    }
}

/// 결제 상태
///
/// ```text
/// Pending ──► Completed ──► Refunded
///    │
///    └──────► Failed
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// 게이트웨이 승인 대기 중
    Pending,
    /// 결제 완료 (수강 등록 생성됨)
    Completed,
    /// 결제 실패 (카드 거절 등)
    Failed,
    /// 환불 완료 (수강 등록 취소됨)
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
        }
    }
}

/// 결제 항목 서브도큐먼트
///
/// 결제 시점의 강의 정보 스냅샷과 항목별 수익 분배 결과를 보관합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentItem {
    /// 구매한 강의 ID
    pub course_id: ObjectId,
    /// 강의 소유 강사 ID (수익 분배 대상)
    pub instructor_id: ObjectId,
    /// 결제 시점의 강의 제목 스냅샷
    pub title: String,
    /// 결제 시점의 가격 스냅샷 (통화 최소 단위)
    pub unit_price_cents: i64,
    /// 강사 몫 (결제 완료 시 계산됨)
    pub instructor_amount_cents: i64,
    /// 플랫폼 몫 (결제 완료 시 계산됨)
    pub platform_amount_cents: i64,
}

/// 금액을 강사 몫과 플랫폼 몫으로 분배합니다
///
/// basis point(10000 = 100%) 단위의 강사 배분율을 적용하며,
/// 정수 나눗셈의 나머지는 플랫폼 몫에 귀속되어
/// `instructor + platform == amount` 가 항상 성립합니다.
///
/// # 인자
/// * `amount_cents` - 분배할 금액 (통화 최소 단위)
/// * `instructor_share_bp` - 강사 배분율 (0 ~ 10000)
///
/// # 반환값
/// `(instructor_amount, platform_amount)` 튜플
pub fn split_revenue(amount_cents: i64, instructor_share_bp: u32) -> (i64, i64) {
    let bp = instructor_share_bp.min(10_000) as i64;
    let instructor = amount_cents * bp / 10_000;
    let platform = amount_cents - instructor;
    (instructor, platform)
}

/// 결제 엔티티
///
/// 장바구니 또는 단일 강의 구매에 대한 결제 기록입니다.
/// 게이트웨이의 외부 참조(provider_ref)로 웹훅 이벤트와 매칭되며,
/// 완료 처리는 멱등적으로 동작합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 결제한 수강생 ID
    pub student_id: ObjectId,
    /// 결제 항목 목록
    pub items: Vec<PaymentItem>,
    /// 총 결제 금액 (통화 최소 단위)
    pub amount_cents: i64,
    /// 통화 코드 (ISO 4217)
    pub currency: String,
    /// 결제 게이트웨이
    pub provider: PaymentProvider,
    /// 게이트웨이 측 참조 ID (Stripe PaymentIntent ID / PayPal Order ID)
    pub provider_ref: String,
    /// 게이트웨이 측 캡처 ID (PayPal 환불에 필요, Stripe는 사용 안 함)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_capture_ref: Option<String>,
    /// 결제 상태
    pub status: PaymentStatus,
    /// 결제 완료 시점에 적용된 강사 배분율 (basis point)
    pub instructor_share_bp: u32,
    /// 실패 사유 (게이트웨이 메시지)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    /// 완료 시간
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime>,
    /// 환불 시간
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refunded_at: Option<DateTime>,
    /// 생성 시간
    pub created_at: DateTime,
    /// 수정 시간
    pub updated_at: DateTime,
}

impl Payment {
    /// 새 대기 상태 결제 생성
    ///
    /// 총액은 항목 가격의 합으로 계산되며, 수익 분배는 완료 시점까지
    /// 계산하지 않습니다 (items의 분배 필드는 0으로 초기화).
    pub fn new_pending(
        student_id: ObjectId,
        items: Vec<PaymentItem>,
        currency: String,
        provider: PaymentProvider,
        provider_ref: String,
        instructor_share_bp: u32,
    ) -> Self {
        let now = DateTime::now();
        let amount_cents = items.iter().map(|i| i.unit_price_cents).sum();

        Self {
            id: None,
            student_id,
            items,
            amount_cents,
            currency,
            provider,
            provider_ref,
            provider_capture_ref: None,
            status: PaymentStatus::Pending,
            instructor_share_bp,
            failure_reason: None,
            completed_at: None,
            refunded_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 완료 처리가 가능한 상태인지 확인
    pub fn can_complete(&self) -> bool {
        self.status == PaymentStatus::Pending
    }

    /// 환불이 가능한 상태인지 확인
    pub fn can_refund(&self) -> bool {
        self.status == PaymentStatus::Completed
    }

    /// 이미 완료된 상태인지 확인 (멱등 처리용)
    pub fn is_completed(&self) -> bool {
        self.status == PaymentStatus::Completed
    }

    /// 결제를 완료 상태로 전환하고 항목별 수익 분배를 계산합니다
    ///
    /// `Pending` 상태에서만 호출해야 합니다. 분배 결과는 항목에
    /// 스냅샷으로 기록됩니다.
    pub fn mark_completed(&mut self) {
        for item in &mut self.items {
            let (instructor, platform) = split_revenue(item.unit_price_cents, self.instructor_share_bp);
            item.instructor_amount_cents = instructor;
            item.platform_amount_cents = platform;
        }
        self.status = PaymentStatus::Completed;
        self.completed_at = Some(DateTime::now());
        self.updated_at = DateTime::now();
    }

    /// 결제를 실패 상태로 전환합니다
    pub fn mark_failed(&mut self, reason: String) {
        self.status = PaymentStatus::Failed;
        self.failure_reason = Some(reason);
        self.updated_at = DateTime::now();
    }

    /// 결제를 환불 상태로 전환합니다
    pub fn mark_refunded(&mut self) {
        self.status = PaymentStatus::Refunded;
        self.refunded_at = Some(DateTime::now());
        self.updated_at = DateTime::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_items() -> Vec<PaymentItem> {
        vec![
            PaymentItem {
                course_id: ObjectId::new(),
                instructor_id: ObjectId::new(),
                title: "Rust 입문".to_string(),
                unit_price_cents: 49_900,
                instructor_amount_cents: 0,
                platform_amount_cents: 0,
            },
            PaymentItem {
                course_id: ObjectId::new(),
                instructor_id: ObjectId::new(),
                title: "Actix 마스터".to_string(),
                unit_price_cents: 30_000,
                instructor_amount_cents: 0,
                platform_amount_cents: 0,
            },
        ]
    }

    fn sample_payment() -> Payment {
        Payment::new_pending(
            ObjectId::new(),
            sample_items(),
            "KRW".to_string(),
            PaymentProvider::Stripe,
            "pi_test_123".to_string(),
            7_000,
        )
    }

    #[test]
    fn test_split_revenue_conserves_total() {
        let cases = [(49_900, 7_000u32), (1, 7_000), (0, 7_000), (99, 3_333), (10_000, 10_000)];

        for (amount, bp) in cases {
            let (instructor, platform) = split_revenue(amount, bp);
            assert_eq!(instructor + platform, amount, "amount={} bp={}", amount, bp);
            assert!(instructor >= 0);
            assert!(platform >= 0);
        }
    }

    #[test]
    fn test_split_revenue_ratio() {
        let (instructor, platform) = split_revenue(10_000, 7_000);
        assert_eq!(instructor, 7_000);
        assert_eq!(platform, 3_000);

        // 나머지는 플랫폼 몫에 귀속
        let (instructor, platform) = split_revenue(101, 5_000);
        assert_eq!(instructor, 50);
        assert_eq!(platform, 51);
    }

    #[test]
    fn test_split_revenue_clamps_bp() {
        // 10000bp 초과는 전액 강사 몫으로 제한
        let (instructor, platform) = split_revenue(1_000, 20_000);
        assert_eq!(instructor, 1_000);
        assert_eq!(platform, 0);
    }

    #[test]
    fn test_new_pending_totals() {
        let payment = sample_payment();

        assert_eq!(payment.status, PaymentStatus::Pending);
        assert_eq!(payment.amount_cents, 79_900);
        assert!(payment.can_complete());
        assert!(!payment.can_refund());
    }

    #[test]
    fn test_completion_applies_split() {
        let mut payment = sample_payment();

        payment.mark_completed();

        assert_eq!(payment.status, PaymentStatus::Completed);
        assert!(payment.completed_at.is_some());
        assert!(payment.can_refund());
        assert!(!payment.can_complete());

        for item in &payment.items {
            assert_eq!(
                item.instructor_amount_cents + item.platform_amount_cents,
                item.unit_price_cents
            );
            assert!(item.instructor_amount_cents > 0);
        }
    }

    #[test]
    fn test_state_machine_transitions() {
        let mut payment = sample_payment();

        // Pending → Failed
        payment.mark_failed("card_declined".to_string());
        assert_eq!(payment.status, PaymentStatus::Failed);
        assert_eq!(payment.failure_reason.as_deref(), Some("card_declined"));
        assert!(!payment.can_complete());
        assert!(!payment.can_refund());

        // Completed → Refunded
        let mut payment = sample_payment();
        payment.mark_completed();
        payment.mark_refunded();
        assert_eq!(payment.status, PaymentStatus::Refunded);
        assert!(payment.refunded_at.is_some());
        assert!(!payment.can_refund());
    }

    #[test]
    fn test_provider_from_str() {
        assert_eq!(PaymentProvider::from_str("stripe").unwrap(), PaymentProvider::Stripe);
        assert_eq!(PaymentProvider::from_str("PayPal").unwrap(), PaymentProvider::Paypal);
        assert!(PaymentProvider::from_str("bitcoin").is_err());
    }
}

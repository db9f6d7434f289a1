//! # Payment Configuration Module
//!
//! Stripe/PayPal 게이트웨이 자격 증명과 수익 분배 정책을 관리하는 모듈입니다.
//! 테넌트별 설정 없이 환경 변수로만 구성되며, 비밀키는 절대 클라이언트에
//! 노출되지 않습니다.
//!
//! ## 필수 환경 변수 설정
//!
//! ### Stripe
//! ```bash
//! export STRIPE_SECRET_KEY="sk_live_..."
//! export STRIPE_WEBHOOK_SECRET="whsec_..."
//! ```
//!
//! ### PayPal
//! ```bash
//! export PAYPAL_CLIENT_ID="your-paypal-client-id"
//! export PAYPAL_CLIENT_SECRET="your-paypal-client-secret"
//! export PAYPAL_API_BASE="https://api-m.sandbox.paypal.com"
//! ```
//!
//! ### 수익 분배
//! ```bash
//! # 강사 몫 (basis point, 7000 = 70%)
//! export REVENUE_INSTRUCTOR_SHARE_BP="7000"
//! ```

use std::env;

/// Stripe 게이트웨이 설정을 관리하는 구조체
///
/// Stripe 대시보드에서 발급받은 API 키와 웹훅 서명 비밀키를 관리합니다.
///
/// ## 보안 고려사항
///
/// - `secret_key`는 서버 사이드에서만 사용하며 로그에 출력하지 않습니다
/// - 웹훅 비밀키가 누락되면 웹훅 검증이 전부 거부됩니다
pub struct StripeConfig;

impl StripeConfig {
    /// Stripe Secret Key를 반환합니다.
    ///
    /// Payment Intent 생성, 환불 등 모든 Stripe API 호출의
    /// Bearer 인증에 사용됩니다.
    ///
    /// # Panics
    ///
    /// `STRIPE_SECRET_KEY` 환경 변수가 설정되지 않은 경우 패닉이 발생합니다.
    pub fn secret_key() -> String {
        env::var("STRIPE_SECRET_KEY")
            .expect("STRIPE_SECRET_KEY must be set")
    }

    /// Stripe 웹훅 서명 검증용 비밀키를 반환합니다.
    ///
    /// 웹훅 요청의 `Stripe-Signature` 헤더 검증에 사용됩니다.
    /// 이 값이 없으면 모든 웹훅 요청이 거부됩니다.
    ///
    /// # Panics
    ///
    /// `STRIPE_WEBHOOK_SECRET` 환경 변수가 설정되지 않은 경우 패닉이 발생합니다.
    pub fn webhook_secret() -> String {
        env::var("STRIPE_WEBHOOK_SECRET")
            .expect("STRIPE_WEBHOOK_SECRET must be set")
    }

    /// Stripe API 베이스 URL을 반환합니다.
    ///
    /// 테스트 환경에서 목 서버를 가리키도록 재정의할 수 있습니다.
    ///
    /// # 기본값
    ///
    /// `https://api.stripe.com`
    pub fn api_base() -> String {
        env::var("STRIPE_API_BASE")
            .unwrap_or_else(|_| "https://api.stripe.com".to_string())
    }

    /// 웹훅 타임스탬프 허용 오차를 초 단위로 반환합니다.
    ///
    /// 재전송 공격 방지를 위해 서명 타임스탬프가 이 범위를 벗어나면
    /// 웹훅을 거부합니다.
    ///
    /// # 기본값
    ///
    /// 300초 (5분)
    pub fn webhook_tolerance_secs() -> i64 {
        env::var("STRIPE_WEBHOOK_TOLERANCE_SECS")
            .unwrap_or_else(|_| "300".to_string())
            .parse()
            .unwrap_or(300)
    }
}

/// PayPal 게이트웨이 설정을 관리하는 구조체
///
/// PayPal REST API의 OAuth 클라이언트 자격 증명을 관리합니다.
/// 주문 생성/캡처/환불은 모두 이 자격 증명으로 발급받은
/// 액세스 토큰을 사용합니다.
pub struct PayPalConfig;

impl PayPalConfig {
    /// PayPal Client ID를 반환합니다.
    ///
    /// # Panics
    ///
    /// `PAYPAL_CLIENT_ID` 환경 변수가 설정되지 않은 경우 패닉이 발생합니다.
    pub fn client_id() -> String {
        env::var("PAYPAL_CLIENT_ID")
            .expect("PAYPAL_CLIENT_ID must be set")
    }

    /// PayPal Client Secret을 반환합니다.
    ///
    /// 서버 사이드에서만 사용되는 민감 정보입니다.
    ///
    /// # Panics
    ///
    /// `PAYPAL_CLIENT_SECRET` 환경 변수가 설정되지 않은 경우 패닉이 발생합니다.
    pub fn client_secret() -> String {
        env::var("PAYPAL_CLIENT_SECRET")
            .expect("PAYPAL_CLIENT_SECRET must be set")
    }

    /// PayPal REST API 베이스 URL을 반환합니다.
    ///
    /// # 기본값
    ///
    /// `https://api-m.sandbox.paypal.com` (샌드박스)
    ///
    /// 프로덕션에서는 `https://api-m.paypal.com`으로 설정해야 합니다.
    pub fn api_base() -> String {
        env::var("PAYPAL_API_BASE")
            .unwrap_or_else(|_| "https://api-m.sandbox.paypal.com".to_string())
    }
}

/// 수익 분배 정책 설정
///
/// 결제 완료 시점에 강사 몫과 플랫폼 몫을 basis point 단위로 분배합니다.
/// 분배 결과는 결제 문서에 스냅샷으로 저장되므로, 이후 정책이 바뀌어도
/// 과거 결제 기록은 변하지 않습니다.
pub struct RevenueConfig;

impl RevenueConfig {
    /// 강사 몫의 basis point를 반환합니다.
    ///
    /// 10000 = 100%. 범위를 벗어난 값은 기본값으로 대체됩니다.
    ///
    /// # 기본값
    ///
    /// 7000 (강사 70%, 플랫폼 30%)
    pub fn instructor_share_bp() -> u32 {
        if let Ok(bp_str) = env::var("REVENUE_INSTRUCTOR_SHARE_BP") {
            if let Ok(bp) = bp_str.parse::<u32>() {
                if bp <= 10_000 {
                    return bp;
                }
            }
            log::warn!("REVENUE_INSTRUCTOR_SHARE_BP 값이 유효하지 않습니다. 기본값 7000 사용");
        }
        7_000
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revenue_share_default() {
        if env::var("REVENUE_INSTRUCTOR_SHARE_BP").is_err() {
            assert_eq!(RevenueConfig::instructor_share_bp(), 7_000);
        }
    }

    #[test]
    fn test_stripe_api_base_default() {
        if env::var("STRIPE_API_BASE").is_err() {
            assert_eq!(StripeConfig::api_base(), "https://api.stripe.com");
        }
    }

    #[test]
    fn test_paypal_api_base_default() {
        if env::var("PAYPAL_API_BASE").is_err() {
            assert_eq!(PayPalConfig::api_base(), "https://api-m.sandbox.paypal.com");
        }
    }
}

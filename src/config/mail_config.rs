//! # Mail & OTP Configuration Module
//!
//! 트랜잭션 메일 발송 API와 OTP(일회용 비밀번호) 정책 설정을 관리합니다.
//! 메일은 외부 프로바이더의 HTTP API를 통해 발송됩니다.
//!
//! ## 환경 변수 설정
//!
//! ```bash
//! export MAIL_API_URL="https://api.mail-provider.com/v3/send"
//! export MAIL_API_KEY="your-mail-api-key"
//! export MAIL_FROM_ADDRESS="no-reply@coursemarket.io"
//! export OTP_TTL_SECONDS="600"
//! ```

use std::env;

/// 트랜잭션 메일 발송 설정
///
/// OTP 이메일 인증 코드와 비밀번호 재설정 코드를 발송할 때 사용되는
/// 메일 프로바이더 HTTP API 설정입니다.
pub struct MailConfig;

impl MailConfig {
    /// 메일 프로바이더 API 엔드포인트를 반환합니다.
    ///
    /// # Panics
    ///
    /// `MAIL_API_URL` 환경 변수가 설정되지 않은 경우 패닉이 발생합니다.
    pub fn api_url() -> String {
        env::var("MAIL_API_URL")
            .expect("MAIL_API_URL must be set")
    }

    /// 메일 프로바이더 API 키를 반환합니다.
    ///
    /// Bearer 인증 헤더에 사용되는 민감 정보입니다.
    ///
    /// # Panics
    ///
    /// `MAIL_API_KEY` 환경 변수가 설정되지 않은 경우 패닉이 발생합니다.
    pub fn api_key() -> String {
        env::var("MAIL_API_KEY")
            .expect("MAIL_API_KEY must be set")
    }

    /// 발신자 이메일 주소를 반환합니다.
    ///
    /// # 기본값
    ///
    /// `no-reply@coursemarket.io`
    pub fn from_address() -> String {
        env::var("MAIL_FROM_ADDRESS")
            .unwrap_or_else(|_| "no-reply@coursemarket.io".to_string())
    }
}

/// OTP(일회용 비밀번호) 정책 설정
///
/// 이메일 인증과 비밀번호 재설정에 사용되는 6자리 숫자 코드의
/// 유효 기간과 재시도 제한을 관리합니다.
pub struct OtpConfig;

impl OtpConfig {
    /// OTP 코드의 유효 기간을 초 단위로 반환합니다.
    ///
    /// Redis TTL로 그대로 사용되며, 만료된 코드는 자동 삭제됩니다.
    ///
    /// # 기본값
    ///
    /// 600초 (10분)
    pub fn ttl_seconds() -> usize {
        env::var("OTP_TTL_SECONDS")
            .unwrap_or_else(|_| "600".to_string())
            .parse()
            .unwrap_or(600)
    }

    /// OTP 검증 최대 시도 횟수를 반환합니다.
    ///
    /// 초과 시 해당 코드는 폐기되고 새 코드를 요청해야 합니다.
    ///
    /// # 기본값
    ///
    /// 5회
    pub fn max_attempts() -> u32 {
        env::var("OTP_MAX_ATTEMPTS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .unwrap_or(5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_defaults() {
        if env::var("OTP_TTL_SECONDS").is_err() {
            assert_eq!(OtpConfig::ttl_seconds(), 600);
        }
        if env::var("OTP_MAX_ATTEMPTS").is_err() {
            assert_eq!(OtpConfig::max_attempts(), 5);
        }
    }

    #[test]
    fn test_mail_from_default() {
        if env::var("MAIL_FROM_ADDRESS").is_err() {
            assert_eq!(MailConfig::from_address(), "no-reply@coursemarket.io");
        }
    }
}

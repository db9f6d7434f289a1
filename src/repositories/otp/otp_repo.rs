//! # OTP 리포지토리 구현
//!
//! 일회용 비밀번호(OTP) 코드의 저장소입니다.
//! 코드는 짧은 수명을 가지므로 MongoDB가 아닌 Redis에 TTL과 함께
//! 저장되며, 만료 시 자동 삭제됩니다.
//!
//! ## 키 구조
//!
//! - 코드: `otp:{purpose}:{email}` (TTL = OtpConfig::ttl_seconds)
//! - 시도 횟수: `otp:attempts:{purpose}:{email}` (동일 TTL)

use std::sync::Arc;
use serde::{Deserialize, Serialize};
use singleton_macro::repository;
use crate::caching::redis::RedisClient;
use crate::config::OtpConfig;
use crate::core::registry::Repository;
use crate::errors::errors::AppError;

/// OTP 용도
///
/// 코드가 발급된 목적과 다른 용도로 사용되는 것을 방지합니다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OtpPurpose {
    /// 회원가입 이메일 인증
    VerifyEmail,
    /// 비밀번호 재설정
    ResetPassword,
}

impl OtpPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            OtpPurpose::VerifyEmail => "verify",
            OtpPurpose::ResetPassword => "reset",
        }
    }
}

/// Redis에 저장되는 OTP 항목
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpEntry {
    /// 6자리 숫자 코드
    pub code: String,
    /// 발급 시간 (Unix timestamp)
    pub issued_at: i64,
}

/// OTP 데이터 액세스 리포지토리 (Redis 전용)
#[repository(name = "otp", collection = "otps")]
pub struct OtpRepository {
    /// Redis 클라이언트 (유일한 저장소)
    redis: Arc<RedisClient>,
}

impl OtpRepository {
    /// 코드 저장 키 생성
    fn code_key(purpose: OtpPurpose, email: &str) -> String {
        format!("otp:{}:{}", purpose.as_str(), email)
    }

    /// 시도 횟수 키 생성
    fn attempts_key(purpose: OtpPurpose, email: &str) -> String {
        format!("otp:attempts:{}:{}", purpose.as_str(), email)
    }

    /// OTP 코드를 TTL과 함께 저장합니다
    ///
    /// 같은 용도의 기존 코드는 덮어쓰며, 시도 횟수 카운터도 초기화됩니다.
    pub async fn store(&self, email: &str, purpose: OtpPurpose, code: &str) -> Result<(), AppError> {
        let entry = OtpEntry {
            code: code.to_string(),
            issued_at: chrono::Utc::now().timestamp(),
        };

        self.redis
            .set_with_expiry(&Self::code_key(purpose, email), &entry, OtpConfig::ttl_seconds())
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))?;

        // 재발급 시 이전 시도 횟수 제거
        let _ = self.redis.del(&Self::attempts_key(purpose, email)).await;

        Ok(())
    }

    /// 저장된 OTP 코드를 조회합니다
    ///
    /// TTL이 만료된 코드는 Redis가 이미 삭제했으므로 `None`이 반환됩니다.
    pub async fn get(&self, email: &str, purpose: OtpPurpose) -> Result<Option<OtpEntry>, AppError> {
        self.redis
            .get::<OtpEntry>(&Self::code_key(purpose, email))
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))
    }

    /// OTP 코드를 폐기합니다 (검증 성공 후 일회성 보장)
    pub async fn consume(&self, email: &str, purpose: OtpPurpose) -> Result<(), AppError> {
        self.redis
            .del(&Self::code_key(purpose, email))
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))?;

        let _ = self.redis.del(&Self::attempts_key(purpose, email)).await;

        Ok(())
    }

    /// 검증 시도를 기록하고 누적 횟수를 반환합니다
    ///
    /// 무차별 대입을 막기 위해 서비스 계층이 이 횟수로 제한을 적용합니다.
    pub async fn record_attempt(&self, email: &str, purpose: OtpPurpose) -> Result<i64, AppError> {
        self.redis
            .incr_with_expiry(&Self::attempts_key(purpose, email), OtpConfig::ttl_seconds())
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_key_format() {
        assert_eq!(
            OtpRepository::code_key(OtpPurpose::VerifyEmail, "alice@example.com"),
            "otp:verify:alice@example.com"
        );
        assert_eq!(
            OtpRepository::attempts_key(OtpPurpose::ResetPassword, "alice@example.com"),
            "otp:attempts:reset:alice@example.com"
        );
    }

    #[test]
    fn test_purpose_as_str() {
        assert_eq!(OtpPurpose::VerifyEmail.as_str(), "verify");
        assert_eq!(OtpPurpose::ResetPassword.as_str(), "reset");
    }
}

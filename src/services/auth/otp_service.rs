//! OTP(일회용 비밀번호) 서비스 구현
//!
//! 이메일 인증과 비밀번호 재설정에 사용되는 6자리 숫자 코드의
//! 발급/검증/폐기를 담당합니다. 코드는 Redis에 TTL과 함께 저장됩니다.

use std::sync::Arc;
use singleton_macro::service;
use crate::config::OtpConfig;
use crate::repositories::otp::otp_repo::{OtpPurpose, OtpRepository};
use crate::errors::errors::AppError;

/// OTP 관리 서비스
///
/// ## 보안 특징
///
/// - **일회성**: 검증에 성공한 코드는 즉시 폐기됨
/// - **용도 구분**: 인증용 코드를 재설정에 사용할 수 없음
/// - **시도 제한**: 설정된 횟수를 초과하면 코드 폐기 (무차별 대입 방지)
/// - **자동 만료**: Redis TTL로 만료 코드 자동 삭제
#[service(name = "otp")]
pub struct OtpService {
    /// OTP 저장소 (Redis)
    otp_repo: Arc<OtpRepository>,
}

impl OtpService {
    /// 6자리 숫자 OTP 코드를 생성합니다
    ///
    /// UUID v4의 임의 바이트에서 코드를 유도하여 100000-999999 범위의
    /// 코드를 만듭니다.
    fn generate_code() -> String {
        let uuid = uuid::Uuid::new_v4();
        let bytes = uuid.as_bytes();
        let value = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        format!("{:06}", 100_000 + (value % 900_000))
    }

    /// 새 OTP 코드를 발급하고 저장합니다
    ///
    /// 같은 용도의 기존 코드는 무효화됩니다.
    ///
    /// # 반환값
    ///
    /// 발급된 6자리 코드 (메일 본문에 포함시킬 용도)
    pub async fn issue(&self, email: &str, purpose: OtpPurpose) -> Result<String, AppError> {
        let code = Self::generate_code();
        self.otp_repo.store(email, purpose, &code).await?;

        log::info!("OTP 발급: 용도={}, 이메일={}", purpose.as_str(), email);

        Ok(code)
    }

    /// OTP 코드를 검증하고 성공 시 폐기합니다
    ///
    /// # 처리 과정
    ///
    /// 1. 시도 횟수 기록 및 제한 검사
    /// 2. 저장된 코드 존재/만료 확인
    /// 3. 코드 일치 확인
    /// 4. 성공 시 코드 폐기 (일회성 보장)
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 만료/불일치/시도 횟수 초과
    pub async fn verify(&self, email: &str, purpose: OtpPurpose, code: &str) -> Result<(), AppError> {
        let attempts = self.otp_repo.record_attempt(email, purpose).await?;
        if attempts > OtpConfig::max_attempts() as i64 {
            // 초과 시 코드 자체를 폐기하여 재발급을 강제
            let _ = self.otp_repo.consume(email, purpose).await;
            log::warn!("OTP 시도 횟수 초과: 용도={}, 이메일={}", purpose.as_str(), email);
            return Err(AppError::AuthenticationError(
                "인증 시도 횟수를 초과했습니다. 새 코드를 요청해주세요".to_string(),
            ));
        }

        let entry = self.otp_repo.get(email, purpose).await?
            .ok_or_else(|| AppError::AuthenticationError(
                "인증 코드가 만료되었거나 존재하지 않습니다".to_string(),
            ))?;

        if entry.code != code {
            return Err(AppError::AuthenticationError("인증 코드가 일치하지 않습니다".to_string()));
        }

        self.otp_repo.consume(email, purpose).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_code_format() {
        for _ in 0..100 {
            let code = OtpService::generate_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));

            let value: u32 = code.parse().unwrap();
            assert!((100_000..=999_999).contains(&value));
        }
    }
}

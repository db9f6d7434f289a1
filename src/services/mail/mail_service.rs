//! 트랜잭션 메일 발송 서비스 구현
//!
//! 메일 프로바이더의 HTTP API를 통해 OTP 인증 코드와 비밀번호 재설정
//! 코드를 발송합니다. 발송 실패는 호출 측에서 보상 처리(예: 방금 생성한
//! 계정 삭제)를 할 수 있도록 에러로 전파됩니다.

use singleton_macro::service;
use crate::config::MailConfig;
use crate::domain::models::mail::{MailSendRequest, MailSendResponse};
use crate::errors::errors::AppError;

/// 트랜잭션 메일 발송 서비스
///
/// 프로바이더에 중립적인 HTTP JSON API를 사용합니다.
/// Bearer 인증 헤더에 API 키를 담아 발송 엔드포인트를 호출합니다.
#[service(name = "mail")]
pub struct MailService {
    // 외부 의존성 없음 (설정은 환경 변수에서 읽음)
}

impl MailService {
    /// 메일을 발송합니다
    ///
    /// # Arguments
    ///
    /// * `to` - 수신자 이메일 주소
    /// * `subject` - 제목
    /// * `text` - 본문 (텍스트)
    ///
    /// # Errors
    ///
    /// * `AppError::ExternalServiceError` - 프로바이더 API 통신/응답 오류
    pub async fn send(&self, to: &str, subject: &str, text: &str) -> Result<(), AppError> {
        let client = reqwest::Client::new();

        let request = MailSendRequest {
            from: MailConfig::from_address(),
            to: to.to_string(),
            subject: subject.to_string(),
            text: text.to_string(),
        };

        let response = client
            .post(&MailConfig::api_url())
            .bearer_auth(MailConfig::api_key())
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("메일 발송 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "메일 발송 실패: {}", error_text
            )));
        }

        let result = response
            .json::<MailSendResponse>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("메일 응답 파싱 실패: {}", e)))?;

        log::info!("메일 발송 완료: to={}, message_id={:?}", to, result.message_id);

        Ok(())
    }

    /// 회원가입 이메일 인증 코드를 발송합니다
    pub async fn send_verification_code(&self, to: &str, code: &str) -> Result<(), AppError> {
        let subject = "[코스마켓] 이메일 인증 코드";
        let text = format!(
            "코스마켓 가입을 환영합니다!\n\n인증 코드: {}\n\n코드는 10분간 유효합니다.",
            code
        );

        self.send(to, subject, &text).await
    }

    /// 비밀번호 재설정 코드를 발송합니다
    pub async fn send_password_reset_code(&self, to: &str, code: &str) -> Result<(), AppError> {
        let subject = "[코스마켓] 비밀번호 재설정 코드";
        let text = format!(
            "비밀번호 재설정을 요청하셨습니다.\n\n재설정 코드: {}\n\n요청하지 않으셨다면 이 메일을 무시해주세요.",
            code
        );

        self.send(to, subject, &text).await
    }
}

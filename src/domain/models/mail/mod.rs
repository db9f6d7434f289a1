//! 메일 발송 API 통신 모델 모듈
//!
//! 트랜잭션 메일 프로바이더 HTTP API와의 통신에 사용되는 wire 모델입니다.

use serde::{Deserialize, Serialize};

/// 메일 발송 요청
///
/// 프로바이더의 발송 엔드포인트로 전송되는 JSON 본문입니다.
#[derive(Debug, Clone, Serialize)]
pub struct MailSendRequest {
    /// 발신자 주소
    pub from: String,
    /// 수신자 주소
    pub to: String,
    /// 제목
    pub subject: String,
    /// 본문 (텍스트)
    pub text: String,
}

/// 메일 발송 응답
#[derive(Debug, Clone, Deserialize)]
pub struct MailSendResponse {
    /// 프로바이더 측 메시지 ID
    #[serde(default)]
    pub message_id: Option<String>,
}

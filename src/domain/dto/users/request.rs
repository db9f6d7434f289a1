//! 사용자/인증 요청 DTO
//!
//! 회원가입, 로그인, OTP 인증, 비밀번호 재설정 요청 데이터 구조를 정의합니다.
//! 클라이언트 입력 데이터의 검증과 타입 안전성을 보장합니다.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// 회원가입 요청 DTO
///
/// JSON 역직렬화와 입력 검증을 자동으로 수행합니다.
/// 가입 직후 OTP 인증 메일이 발송되며, 인증 완료 전에는 로그인할 수 없습니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_passwords_match"))]
pub struct RegisterRequest {
    /// 사용자 이메일 주소 (RFC 5322 표준)
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    /// 사용자명 (3-30자, 영문/숫자/언더스코어만 허용)
    #[validate(length(
        min = 3,
        max = 30,
        message = "사용자명은 3-30자 사이여야 합니다"
    ))]
    #[validate(custom(function = "validate_username"))]
    pub username: String,

    /// 표시 이름 (1-50자, 유니코드 지원)
    #[validate(length(
        min = 1,
        max = 50,
        message = "표시 이름은 1-50자 사이여야 합니다"
    ))]
    pub display_name: String,

    /// 계정 비밀번호 (최소 8자, 대소문자+숫자 포함)
    #[validate(length(
        min = 8,
        message = "비밀번호는 최소 8자 이상이어야 합니다"
    ))]
    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,

    /// 비밀번호 확인 (password와 일치해야 함)
    pub password_confirm: String,
}

/// 로그인 요청 DTO
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

/// OTP 이메일 인증 요청 DTO
#[derive(Debug, Deserialize, Validate)]
pub struct VerifyEmailRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    /// 6자리 숫자 OTP 코드
    #[validate(length(equal = 6, message = "OTP 코드는 6자리여야 합니다"))]
    pub code: String,
}

/// 비밀번호 재설정 OTP 요청 DTO
#[derive(Debug, Deserialize, Validate)]
pub struct RequestPasswordResetRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,
}

/// 비밀번호 재설정 확정 요청 DTO
#[derive(Debug, Deserialize, Validate)]
pub struct ConfirmPasswordResetRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    /// 6자리 숫자 OTP 코드
    #[validate(length(equal = 6, message = "OTP 코드는 6자리여야 합니다"))]
    pub code: String,

    /// 새 비밀번호
    #[validate(length(min = 8, message = "비밀번호는 최소 8자 이상이어야 합니다"))]
    #[validate(custom(function = "validate_password_strength"))]
    pub new_password: String,
}

/// 리프레시 토큰 요청 DTO
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "리프레시 토큰이 필요합니다"))]
    pub refresh_token: String,
}

/// 프로필 수정 요청 DTO
///
/// 제공된 필드만 부분 업데이트됩니다.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 50, message = "표시 이름은 1-50자 사이여야 합니다"))]
    pub display_name: Option<String>,

    #[validate(url(message = "유효한 URL을 입력해주세요"))]
    pub profile_image_url: Option<String>,

    #[validate(length(max = 120, message = "소개 한 줄은 120자 이하여야 합니다"))]
    pub headline: Option<String>,

    #[validate(length(max = 2000, message = "소개는 2000자 이하여야 합니다"))]
    pub bio: Option<String>,
}

/// 강사 전환 요청 DTO
#[derive(Debug, Deserialize, Validate)]
pub struct BecomeInstructorRequest {
    /// 강사 소개 한 줄
    #[validate(length(min = 1, max = 120, message = "소개 한 줄은 1-120자 사이여야 합니다"))]
    pub headline: String,

    /// 강사 소개 본문
    #[validate(length(min = 1, max = 2000, message = "소개는 1-2000자 사이여야 합니다"))]
    pub bio: String,
}

/// 비밀번호 일치 여부를 검증
fn validate_passwords_match(req: &RegisterRequest) -> Result<(), ValidationError> {
    if req.password != req.password_confirm {
        return Err(ValidationError::new("passwords_mismatch")
            .with_message("비밀번호가 일치하지 않습니다".into()));
    }
    Ok(())
}

/// 사용자명 형식 검증 (영문, 숫자, 언더스코어만 허용)
fn validate_username(username: &str) -> Result<(), ValidationError> {
    if !username.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(ValidationError::new("invalid_username")
            .with_message("사용자명은 알파벳, 숫자, 언더스코어만 사용 가능합니다".into()));
    }
    Ok(())
}

/// 비밀번호 보안 강도 검증 (대문자, 소문자, 숫자 필수 포함)
fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let has_uppercase = password.chars().any(|c| c.is_uppercase());
    let has_lowercase = password.chars().any(|c| c.is_lowercase());
    let has_digit = password.chars().any(|c| c.is_digit(10));

    if !(has_uppercase && has_lowercase && has_digit) {
        return Err(ValidationError::new("weak_password")
            .with_message("비밀번호는 대문자, 소문자, 숫자를 포함해야 합니다".into()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_register_request() -> RegisterRequest {
        RegisterRequest {
            email: "alice@example.com".to_string(),
            username: "alice_kim".to_string(),
            display_name: "Alice Kim".to_string(),
            password: "SecurePass123".to_string(),
            password_confirm: "SecurePass123".to_string(),
        }
    }

    #[test]
    fn test_valid_register_request() {
        assert!(valid_register_request().validate().is_ok());
    }

    #[test]
    fn test_register_rejects_password_mismatch() {
        let mut req = valid_register_request();
        req.password_confirm = "Different123".to_string();

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_register_rejects_weak_password() {
        let mut req = valid_register_request();
        req.password = "alllowercase1".to_string();
        req.password_confirm = req.password.clone();

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_register_rejects_invalid_username() {
        let mut req = valid_register_request();
        req.username = "alice kim!".to_string();

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_verify_email_code_length() {
        let req = VerifyEmailRequest {
            email: "alice@example.com".to_string(),
            code: "12345".to_string(),
        };
        assert!(req.validate().is_err());

        let req = VerifyEmailRequest {
            email: "alice@example.com".to_string(),
            code: "123456".to_string(),
        };
        assert!(req.validate().is_ok());
    }
}

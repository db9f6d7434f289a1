//! # Authentication Configuration Module
//!
//! JWT 토큰과 사용자 역할 등 인증 관련 설정을 관리하는 모듈입니다.
//! Spring Security의 JWT 설정과 유사한 역할을 수행합니다.
//!
//! ## 필수 환경 변수 설정
//!
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key"
//! export JWT_EXPIRATION_HOURS="24"
//! export JWT_REFRESH_EXPIRATION_DAYS="7"
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{JwtConfig, UserRole};
//!
//! // JWT 토큰 생성 설정
//! let secret = JwtConfig::secret();
//! let expiration = JwtConfig::expiration_hours();
//!
//! // 역할 처리
//! let role = UserRole::from_str("instructor")?;
//! ```

use std::env;

/// JSON Web Token (JWT) 관련 설정을 관리하는 구조체
///
/// 토큰 생성, 검증, 만료 시간 등을 관리합니다.
///
/// ## JWT 보안 모범 사례
///
/// 1. **강력한 비밀키 사용**: 최소 256비트 (32바이트) 랜덤 키
/// 2. **적절한 만료 시간**: 액세스 토큰은 짧게, 리프레시 토큰은 길게
/// 3. **토큰 순환**: 정기적인 토큰 갱신 정책
pub struct JwtConfig;

impl JwtConfig {
    /// JWT 서명에 사용할 비밀키를 반환합니다.
    ///
    /// 이 키는 JWT 토큰의 무결성을 보장하는 핵심 요소입니다.
    /// 강력한 암호화 키를 사용해야 하며, 절대 노출되어서는 안 됩니다.
    ///
    /// # 기본값
    ///
    /// 환경 변수가 설정되지 않은 경우 "your-secret-key"를 사용하지만,
    /// 이는 개발 환경에서만 안전하며 프로덕션에서는 경고 로그가 출력됩니다.
    ///
    /// # 키 생성 예제
    ///
    /// ```bash
    /// openssl rand -base64 32
    /// ```
    pub fn secret() -> String {
        env::var("JWT_SECRET")
            .unwrap_or_else(|_| {
                log::warn!("JWT_SECRET not set, using default (not secure for production!)");
                "your-secret-key".to_string()
            })
    }

    /// JWT 액세스 토큰의 만료 시간을 시간 단위로 반환합니다.
    ///
    /// # 권장 설정값
    ///
    /// - **개발**: 24시간 (편의성 우선)
    /// - **프로덕션**: 1시간 이하 (보안 우선)
    ///
    /// # 기본값
    ///
    /// 24시간
    pub fn expiration_hours() -> i64 {
        env::var("JWT_EXPIRATION_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .unwrap_or(24)
    }

    /// JWT 리프레시 토큰의 만료 시간을 일 단위로 반환합니다.
    ///
    /// 리프레시 토큰은 액세스 토큰을 갱신하는 데 사용되므로,
    /// 액세스 토큰보다 훨씬 긴 유효 기간을 가져야 합니다.
    ///
    /// # 기본값
    ///
    /// 7일
    pub fn refresh_expiration_days() -> i64 {
        env::var("JWT_REFRESH_EXPIRATION_DAYS")
            .unwrap_or_else(|_| "7".to_string())
            .parse()
            .unwrap_or(7)
    }
}

/// 마켓플레이스 사용자 역할을 나타내는 열거형
///
/// 역할 기반 접근 제어(RBAC)의 기본 단위입니다. 사용자는 복수의 역할을
/// 가질 수 있으며(예: 강사는 `student` + `instructor`), JWT 클레임과
/// 라우트 미들웨어에서 문자열 형태로 전달됩니다.
///
/// ## 역할 계층
///
/// - `Student`: 기본 역할. 강의 수강, 리뷰 작성, 장바구니/위시리스트 사용
/// - `Instructor`: 강의 생성/관리, 본인 강의 리뷰에 답글 작성
/// - `Admin`: 리뷰 심사, 전체 결제 조회 등 운영 기능
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum UserRole {
    /// 수강생 (기본 역할)
    Student,
    /// 강사
    Instructor,
    /// 관리자
    Admin,
}

impl UserRole {
    /// 문자열에서 UserRole을 생성합니다.
    ///
    /// # Arguments
    ///
    /// * `s` - 역할 이름 (대소문자 무관)
    ///
    /// # Returns
    ///
    /// * `Ok(UserRole)` - 유효한 역할인 경우
    /// * `Err(String)` - 지원하지 않는 역할인 경우
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "student" => Ok(UserRole::Student),
            "instructor" => Ok(UserRole::Instructor),
            "admin" => Ok(UserRole::Admin),
            _ => Err(format!("Unsupported user role: {}", s)),
        }
    }

    /// UserRole을 문자열로 변환합니다.
    ///
    /// JWT 클레임, 미들웨어 역할 비교, 로깅에 사용됩니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Student => "student",
            UserRole::Instructor => "instructor",
            UserRole::Admin => "admin",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_from_string() {
        assert_eq!(UserRole::from_str("student").unwrap(), UserRole::Student);
        assert_eq!(UserRole::from_str("instructor").unwrap(), UserRole::Instructor);
        assert_eq!(UserRole::from_str("admin").unwrap(), UserRole::Admin);

        // 대소문자 무관 테스트
        assert_eq!(UserRole::from_str("INSTRUCTOR").unwrap(), UserRole::Instructor);
        assert_eq!(UserRole::from_str("Student").unwrap(), UserRole::Student);

        // 지원하지 않는 역할 테스트
        assert!(UserRole::from_str("moderator").is_err());
        assert!(UserRole::from_str("unknown").is_err());
    }

    #[test]
    fn test_user_role_roundtrip() {
        let roles = ["student", "instructor", "admin"];

        for &role_str in &roles {
            let role = UserRole::from_str(role_str).unwrap();
            assert_eq!(role.as_str(), role_str);
        }
    }

    #[test]
    fn test_user_role_serialization() {
        let role = UserRole::Instructor;
        let json = serde_json::to_string(&role).unwrap();
        let deserialized: UserRole = serde_json::from_str(&json).unwrap();
        assert_eq!(role, deserialized);
    }
}

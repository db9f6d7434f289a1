//! User Entity Implementation
//!
//! 마켓플레이스 사용자 엔티티의 핵심 구현체입니다.
//! 수강생/강사/관리자 역할을 하나의 통합된 사용자 모델로 표현합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::config::UserRole;

/// 사용자 엔티티
///
/// 시스템의 모든 사용자를 표현하는 핵심 도메인 엔티티입니다.
/// 모든 계정은 이메일/비밀번호 인증이며, 가입 직후 OTP 이메일 인증을
/// 통과해야 로그인할 수 있습니다. 강사는 수강생 역할에 `instructor`
/// 역할이 추가된 형태입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 사용자 이메일 (unique)
    pub email: String,
    /// 사용자 이름 (unique)
    pub username: String,
    /// 표시 이름
    pub display_name: String,
    /// 해시된 비밀번호
    pub password_hash: String,
    /// 계정 활성화 여부
    pub is_active: bool,
    /// 이메일 인증 여부 (OTP 검증 완료 시 true)
    pub is_email_verified: bool,
    /// 사용자 역할 (student / instructor / admin)
    pub roles: Vec<String>,
    /// 프로필 이미지 URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
    /// 강사 소개 한 줄 (강사 전용)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    /// 강사 소개 본문 (강사 전용)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// 마지막 로그인 시간
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime>,
    /// 생성 시간
    pub created_at: DateTime,
    /// 수정 시간
    pub updated_at: DateTime,
}

impl User {
    /// 새 수강생 계정 생성
    ///
    /// 이메일 인증이 필요한 상태(`is_email_verified: false`)로 시작됩니다.
    /// OTP 인증 메일 발송에 실패하면 호출 측에서 계정을 삭제하는
    /// 보상 처리를 수행합니다.
    pub fn new_student(email: String, username: String, display_name: String, password_hash: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            email,
            username,
            display_name,
            password_hash,
            is_active: true,
            is_email_verified: false,
            roles: vec![UserRole::Student.as_str().to_string()],
            profile_image_url: None,
            headline: None,
            bio: None,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 특정 역할을 보유하고 있는지 확인
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// 강사 역할 보유 여부
    pub fn is_instructor(&self) -> bool {
        self.has_role(UserRole::Instructor.as_str())
    }

    /// 관리자 역할 보유 여부
    pub fn is_admin(&self) -> bool {
        self.has_role(UserRole::Admin.as_str())
    }

    /// 로그인이 가능한 상태인지 확인
    ///
    /// 활성화되어 있고 이메일 인증이 완료된 계정만 로그인할 수 있습니다.
    pub fn can_login(&self) -> bool {
        self.is_active && self.is_email_verified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_student_defaults() {
        let user = User::new_student(
            "alice@example.com".to_string(),
            "alice".to_string(),
            "Alice".to_string(),
            "hashed".to_string(),
        );

        assert!(user.id.is_none());
        assert!(user.is_active);
        assert!(!user.is_email_verified);
        assert_eq!(user.roles, vec!["student".to_string()]);
        assert!(!user.is_instructor());
        assert!(!user.is_admin());
    }

    #[test]
    fn test_can_login_requires_verification() {
        let mut user = User::new_student(
            "bob@example.com".to_string(),
            "bob".to_string(),
            "Bob".to_string(),
            "hashed".to_string(),
        );

        // 이메일 미인증 상태에서는 로그인 불가
        assert!(!user.can_login());

        user.is_email_verified = true;
        assert!(user.can_login());

        // 비활성화된 계정은 인증 여부와 무관하게 로그인 불가
        user.is_active = false;
        assert!(!user.can_login());
    }

    #[test]
    fn test_role_checks() {
        let mut user = User::new_student(
            "carol@example.com".to_string(),
            "carol".to_string(),
            "Carol".to_string(),
            "hashed".to_string(),
        );

        user.roles.push("instructor".to_string());
        assert!(user.is_instructor());
        assert!(user.has_role("student"));
        assert!(!user.is_admin());
    }
}

//! # 사용자 관리 서비스 구현
//!
//! 사용자 계정의 전체 생명주기를 관리하는 핵심 비즈니스 로직을 구현합니다.
//! 회원가입(OTP 인증 메일 포함), 인증, 프로필 관리, 강사 전환, 비밀번호
//! 재설정을 담당합니다.
//!
//! ## 보안 설계 원칙
//!
//! ### 1. 비밀번호 보안
//!
//! - **bcrypt 해싱**: 적응형 해시 함수로 무차별 대입 공격 방지
//! - **환경별 Cost**: 개발(4) vs 운영(12) 환경별 보안 강도
//! - **타이밍 공격 방지**: bcrypt 특성상 일정한 검증 시간 유지
//!
//! ### 2. 인증 보안
//!
//! - **에러 메시지 통합**: 이메일 존재 여부를 노출하지 않음
//! - **이메일 인증 강제**: OTP 인증 전에는 로그인 차단
//! - **계정 상태 검증**: 비활성 계정 로그인 차단
//!
//! ### 3. 보상 처리
//!
//! 회원가입 직후 OTP 인증 메일 발송에 실패하면 방금 생성한 계정을
//! 삭제하여, 인증 메일을 영영 받을 수 없는 유령 계정이 남지 않도록
//! 합니다.

use std::sync::Arc;
use bcrypt::hash;
use mongodb::bson::doc;
use singleton_macro::service;
use crate::{
    domain::{
        entities::users::user::User,
        dto::users::{
            request::{BecomeInstructorRequest, RegisterRequest, UpdateProfileRequest},
            response::{RegisterResponse, UserResponse},
        },
    },
    repositories::{
        otp::otp_repo::OtpPurpose,
        users::user_repo::UserRepository,
    },
    services::{auth::otp_service::OtpService, mail::mail_service::MailService},
    core::errors::AppError,
};
use crate::config::{PasswordConfig, UserRole};
use crate::utils::string_utils::clean_optional_string;

/// 사용자 관리 비즈니스 로직 서비스
///
/// `#[service]` 매크로를 통해 싱글톤으로 관리되며,
/// UserRepository / OtpService / MailService가 자동 주입됩니다.
///
/// ## 주요 책임
///
/// 1. **회원가입**: 비밀번호 해싱, 계정 생성, OTP 인증 메일 발송
/// 2. **인증**: 비밀번호 검증, 계정/인증 상태 확인
/// 3. **계정 관리**: 프로필 수정, 강사 전환, 계정 삭제
/// 4. **비밀번호 재설정**: OTP 기반 재설정 플로우
#[service(name = "user")]
pub struct UserService {
    /// 사용자 데이터 액세스 리포지토리
    user_repo: Arc<UserRepository>,

    /// OTP 발급/검증 서비스
    otp: Arc<OtpService>,

    /// 인증 메일 발송 서비스
    mail: Arc<MailService>,
}

impl UserService {
    /// 새 수강생 계정 생성 (회원가입)
    ///
    /// # 처리 과정
    ///
    /// 1. **비밀번호 해싱**: bcrypt 사용 (환경별 cost)
    /// 2. **계정 생성**: 이메일/사용자명 중복은 리포지토리가 거부
    /// 3. **OTP 발급**: 이메일 인증용 6자리 코드
    /// 4. **인증 메일 발송**: 실패 시 계정 삭제 후 에러 반환 (보상 처리)
    ///
    /// # Errors
    ///
    /// * `AppError::ConflictError` - 이메일 또는 사용자명 중복
    /// * `AppError::ExternalServiceError` - 인증 메일 발송 실패 (계정은 이미 삭제됨)
    pub async fn register(&self, request: RegisterRequest) -> Result<RegisterResponse, AppError> {
        let start_time = std::time::Instant::now();

        let bcrypt_cost = PasswordConfig::bcrypt_cost();

        let hash_start = std::time::Instant::now();
        let password_hash = hash(&request.password, bcrypt_cost)
            .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))?;
        log::info!("Password hashing took: {:?}", hash_start.elapsed());

        let user = User::new_student(
            request.email,
            request.username,
            request.display_name,
            password_hash,
        );

        let created_user = self.user_repo.create(user).await?;
        let user_id = created_user.id_string().unwrap_or_default();

        // OTP 발급 및 인증 메일 발송
        let code = self.otp.issue(&created_user.email, OtpPurpose::VerifyEmail).await?;

        if let Err(e) = self.mail.send_verification_code(&created_user.email, &code).await {
            // 인증 메일을 받을 수 없는 계정은 남겨두지 않음
            log::error!("인증 메일 발송 실패, 계정 삭제: {} - {}", created_user.email, e);
            let _ = self.user_repo.delete(&user_id).await;
            return Err(e);
        }

        log::info!("Total user registration took: {:?}", start_time.elapsed());

        Ok(RegisterResponse {
            user: UserResponse::from(created_user),
            message: "가입이 완료되었습니다. 이메일로 전송된 인증 코드를 확인해주세요".to_string(),
        })
    }

    /// OTP 코드로 이메일 인증을 완료합니다
    ///
    /// 인증에 성공하면 계정이 로그인 가능 상태가 됩니다.
    pub async fn verify_email(&self, email: &str, code: &str) -> Result<UserResponse, AppError> {
        self.otp.verify(email, OtpPurpose::VerifyEmail, code).await?;

        let user = self.user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        let user_id = user.id_string()
            .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;

        let updated = self.user_repo
            .update(&user_id, doc! { "is_email_verified": true })
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        log::info!("이메일 인증 완료: {}", email);

        Ok(UserResponse::from(updated))
    }

    /// ID로 사용자 엔티티 조회 (토큰 재발급 등 내부 용도)
    pub async fn get_user_entity(&self, id: &str) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))
    }

    /// ID로 사용자 조회
    pub async fn get_user_by_id(&self, id: &str) -> Result<UserResponse, AppError> {
        let user = self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        Ok(UserResponse::from(user))
    }

    /// 로그인 비밀번호 검증
    ///
    /// # 인증 과정
    ///
    /// 1. 이메일로 사용자 조회
    /// 2. bcrypt 해시 비교
    /// 3. 이메일 인증 여부 확인 (미인증 시 로그인 거부)
    /// 4. 계정 활성화 상태 확인
    ///
    /// # 보안 특징
    ///
    /// 존재하지 않는 이메일과 틀린 비밀번호에 동일한 에러 메시지를
    /// 반환하여 계정 존재 여부 노출을 방지합니다.
    pub async fn verify_password(&self, email: &str, password: &str) -> Result<User, AppError> {
        let start_time = std::time::Instant::now();

        let user = self.user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::AuthenticationError("잘못된 이메일 또는 비밀번호입니다".to_string()))?;

        let verify_start = std::time::Instant::now();
        let is_valid = bcrypt::verify(password, &user.password_hash)
            .map_err(|e| AppError::InternalError(format!("비밀번호 검증 실패: {}", e)))?;
        log::debug!("Password verification took: {:?}", verify_start.elapsed());

        if !is_valid {
            return Err(AppError::AuthenticationError("잘못된 이메일 또는 비밀번호입니다".to_string()));
        }

        if !user.is_email_verified {
            return Err(AppError::AuthenticationError(
                "이메일 인증이 완료되지 않았습니다. 인증 코드를 확인해주세요".to_string(),
            ));
        }

        if !user.is_active {
            return Err(AppError::AuthenticationError("비활성화된 계정입니다".to_string()));
        }

        log::debug!("Total password verification took: {:?}", start_time.elapsed());

        Ok(user)
    }

    /// 마지막 로그인 시간을 기록합니다
    pub async fn touch_last_login(&self, user_id: &str) -> Result<(), AppError> {
        self.user_repo
            .update(user_id, doc! { "last_login_at": mongodb::bson::DateTime::now() })
            .await?;

        Ok(())
    }

    /// 비밀번호 재설정 OTP를 요청합니다
    ///
    /// 계정 존재 여부 노출(account enumeration)을 방지하기 위해
    /// 존재하지 않는 이메일에도 성공으로 응답합니다.
    pub async fn request_password_reset(&self, email: &str) -> Result<(), AppError> {
        let user = match self.user_repo.find_by_email(email).await? {
            Some(user) => user,
            None => {
                log::debug!("존재하지 않는 이메일의 재설정 요청: {}", email);
                return Ok(());
            }
        };

        let code = self.otp.issue(&user.email, OtpPurpose::ResetPassword).await?;
        self.mail.send_password_reset_code(&user.email, &code).await?;

        Ok(())
    }

    /// OTP 코드로 비밀번호 재설정을 확정합니다
    pub async fn confirm_password_reset(&self, email: &str, code: &str, new_password: &str) -> Result<(), AppError> {
        self.otp.verify(email, OtpPurpose::ResetPassword, code).await?;

        let user = self.user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        let user_id = user.id_string()
            .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;

        let password_hash = hash(new_password, PasswordConfig::bcrypt_cost())
            .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))?;

        self.user_repo
            .update(&user_id, doc! { "password_hash": password_hash })
            .await?;

        log::info!("비밀번호 재설정 완료: {}", email);

        Ok(())
    }

    /// 프로필 정보를 부분 수정합니다
    pub async fn update_profile(&self, user_id: &str, request: UpdateProfileRequest) -> Result<UserResponse, AppError> {
        let mut update_doc = doc! { "updated_at": mongodb::bson::DateTime::now() };

        if let Some(display_name) = clean_optional_string(request.display_name) {
            update_doc.insert("display_name", display_name);
        }
        if let Some(profile_image_url) = clean_optional_string(request.profile_image_url) {
            update_doc.insert("profile_image_url", profile_image_url);
        }
        if let Some(headline) = clean_optional_string(request.headline) {
            update_doc.insert("headline", headline);
        }
        if let Some(bio) = clean_optional_string(request.bio) {
            update_doc.insert("bio", bio);
        }

        let updated = self.user_repo
            .update(user_id, update_doc)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        Ok(UserResponse::from(updated))
    }

    /// 수강생을 강사로 전환합니다
    ///
    /// `instructor` 역할을 추가하고 강사 소개를 저장합니다.
    /// 이미 강사인 경우 거부됩니다.
    pub async fn become_instructor(&self, user_id: &str, request: BecomeInstructorRequest) -> Result<UserResponse, AppError> {
        let user = self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        if user.is_instructor() {
            return Err(AppError::ConflictError("이미 강사로 등록되어 있습니다".to_string()));
        }

        let mut roles = user.roles.clone();
        roles.push(UserRole::Instructor.as_str().to_string());

        let updated = self.user_repo
            .update(user_id, doc! {
                "roles": roles,
                "headline": request.headline,
                "bio": request.bio,
                "updated_at": mongodb::bson::DateTime::now(),
            })
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        log::info!("강사 전환 완료: {}", updated.email);

        Ok(UserResponse::from(updated))
    }

    /// 사용자 계정 삭제
    ///
    /// 물리적 삭제이며 복구가 불가능합니다. 수강/결제 기록은
    /// 정산 근거로 남겨둡니다.
    pub async fn delete_user(&self, id: &str) -> Result<(), AppError> {
        let deleted = self.user_repo.delete(id).await?;

        if !deleted {
            return Err(AppError::NotFound("사용자를 찾을 수 없습니다".to_string()));
        }

        Ok(())
    }
}

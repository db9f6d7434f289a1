//! # Application Error Handling System
//!
//! 마켓플레이스 백엔드를 위한 통합 에러 처리 시스템입니다.
//! `thiserror` 기반의 전역 에러 타입과 `actix_web::ResponseError` 구현을 통해
//! 모든 핸들러가 일관된 JSON 에러 응답을 반환하도록 보장합니다.
//!
//! ## 설계 철학
//!
//! - **계층화된 분류**: 인프라(DB/Redis/외부 API), 비즈니스(검증/충돌/결제),
//!   보안(인증/인가) 에러를 의미 단위로 구분
//! - **자동 HTTP 변환**: 에러 타입별로 적절한 상태 코드에 자동 매핑
//! - **컨텍스트 보존**: 원본 에러 메시지를 손실 없이 전달
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status | 사용 시나리오 |
//! |----------|-------------|---------------|
//! | `ValidationError` | 400 Bad Request | 입력값 검증 실패 |
//! | `AuthenticationError` | 401 Unauthorized | 로그인 실패, 토큰 만료 |
//! | `PaymentError` | 402 Payment Required | 게이트웨이 결제 거절 |
//! | `AuthorizationError` | 403 Forbidden | 소유권/역할 부족 |
//! | `NotFound` | 404 Not Found | 리소스 없음 |
//! | `ConflictError` | 409 Conflict | 중복 수강 등록, 중복 리뷰 등 |
//! | `DatabaseError` | 500 Internal Server Error | MongoDB 오류 |
//! | `RedisError` | 500 Internal Server Error | 캐시 오류 |
//! | `ExternalServiceError` | 500 Internal Server Error | Stripe/PayPal/메일 API 오류 |
//! | `InternalError` | 500 Internal Server Error | 예상치 못한 오류 |
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use crate::core::errors::AppError;
//!
//! impl CourseService {
//!     async fn publish_course(&self, owner_id: &str, course_id: &str) -> Result<CourseResponse, AppError> {
//!         let course = self.course_repo.find_by_id(course_id).await?
//!             .ok_or_else(|| AppError::NotFound("강의를 찾을 수 없습니다".to_string()))?;
//!
//!         if course.instructor_id.to_hex() != owner_id {
//!             return Err(AppError::AuthorizationError("본인의 강의만 수정할 수 있습니다".to_string()));
//!         }
//!
//!         // ...
//!     }
//! }
//! ```

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 백엔드에서 발생할 수 있는 모든 종류의 에러를 포괄하는 열거형입니다.
/// `thiserror`로 `Error` trait을 자동 구현하고, `actix_web::ResponseError`
/// 구현을 통해 핸들러 반환값이 그대로 HTTP 응답으로 변환됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러
    ///
    /// MongoDB 연산 중 발생하는 오류를 나타냅니다.
    /// 500 Internal Server Error로 응답됩니다.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 캐시 관련 에러
    ///
    /// Redis 서버와의 통신 오류나 캐시 연산 실패를 나타냅니다.
    /// 500 Internal Server Error로 응답됩니다.
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 입력값 검증 에러
    ///
    /// 클라이언트 데이터가 형식 요구사항이나 비즈니스 규칙을 만족하지 않을 때
    /// 발생합니다. 400 Bad Request로 응답됩니다.
    ///
    /// # 발생 시나리오
    /// - 필수 필드 누락, 이메일 형식 오류
    /// - 평점 1-5 범위 초과
    /// - 음수 가격, 잘못된 ObjectId 형식
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 찾을 수 없음 에러
    ///
    /// 요청된 리소스(강의, 수강 정보, 결제 등)가 존재하지 않을 때
    /// 발생합니다. 404 Not Found로 응답됩니다.
    #[error("Not found: {0}")]
    NotFound(String),

    /// 충돌/중복 에러
    ///
    /// 비즈니스 규칙 위반이나 중복 데이터 생성 시도 시 발생합니다.
    /// 409 Conflict로 응답됩니다.
    ///
    /// # 발생 시나리오
    /// - 중복 이메일 회원가입, 중복 슬러그 강의 생성
    /// - 이미 수강 중인 강의 재등록
    /// - 강의당 1개 제한을 넘는 리뷰 작성
    /// - 완료되지 않은 결제의 환불 시도
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 인증 실패 에러
    ///
    /// 사용자의 신원을 확인할 수 없을 때 발생합니다.
    /// 401 Unauthorized로 응답됩니다.
    ///
    /// # 발생 시나리오
    /// - 잘못된 로그인 정보, 만료/위조된 JWT 토큰
    /// - 이메일 미인증 계정의 로그인 시도
    /// - 만료되었거나 틀린 OTP 코드
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 권한 부족 에러
    ///
    /// 인증된 사용자가 특정 작업을 수행할 권한이 없을 때 발생합니다.
    /// 403 Forbidden으로 응답됩니다.
    ///
    /// # 발생 시나리오
    /// - 수강생이 강의 생성 시도 (instructor 역할 필요)
    /// - 타인의 강의 수정/타인의 결제 내역 조회
    /// - 일반 사용자의 리뷰 심사 시도 (admin 역할 필요)
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// 결제 처리 에러
    ///
    /// 게이트웨이가 결제를 거절했거나 결제 상태 전이가 허용되지 않을 때
    /// 발생합니다. 402 Payment Required로 응답됩니다.
    ///
    /// # 발생 시나리오
    /// - 카드 거절, 잔액 부족 등 게이트웨이 측 실패
    /// - 웹훅 서명 검증 실패
    /// - `Pending`이 아닌 결제의 완료 시도
    #[error("Payment error: {0}")]
    PaymentError(String),

    /// 외부 서비스 에러
    ///
    /// Stripe/PayPal API, 메일 발송 API 등 써드파티 호출 실패 시 발생합니다.
    /// 500 Internal Server Error로 응답됩니다.
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 내부 서버 에러
    ///
    /// 예상하지 못한 시스템 오류 시 발생합니다.
    /// 500 Internal Server Error로 응답됩니다.
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl actix_web::ResponseError for AppError {
    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 각 `AppError` 변형을 적절한 HTTP 상태 코드와 표준 JSON 응답으로
    /// 변환합니다. 모든 에러 응답은 다음 형식을 따릅니다:
    ///
    /// ```json
    /// {
    ///   "error": "Human readable error message"
    /// }
    /// ```
    ///
    /// 5xx 에러의 경우 서버 로그에 자세한 정보를 기록하되,
    /// 클라이언트에는 민감한 내부 정보를 노출하지 않습니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        use actix_web::http::StatusCode;

        let status = match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            AppError::PaymentError(_) => StatusCode::PAYMENT_REQUIRED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        actix_web::HttpResponse::build(status)
            .json(serde_json::json!({
                "error": self.to_string()
            }))
    }
}

/// 편의성을 위한 Result 타입 별칭
///
/// 애플리케이션 전체에서 자주 사용되는 `Result<T, AppError>` 패턴을
/// 간소화하기 위한 타입 별칭입니다.
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
///
/// # 예제
///
/// ```rust,ignore
/// use crate::core::errors::{AppError, ErrorContext};
///
/// let result = collection.find_one(filter).await
///     .context("Failed to find course")?;
/// ```
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("Email is required".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_error_response() {
        let error = AppError::NotFound("Course not found".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_conflict_error_response() {
        let error = AppError::ConflictError("Already enrolled".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::CONFLICT);
    }

    #[test]
    fn test_authentication_error_response() {
        let error = AppError::AuthenticationError("Invalid token".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_authorization_error_response() {
        let error = AppError::AuthorizationError("Instructor role required".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_payment_error_response() {
        let error = AppError::PaymentError("Card declined".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::PAYMENT_REQUIRED);
    }

    #[test]
    fn test_internal_error_response() {
        let error = AppError::InternalError("Something went wrong".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        assert!(app_result.is_err());
        if let Err(AppError::InternalError(msg)) = app_result {
            assert!(msg.contains("Additional context"));
            assert!(msg.contains("original error"));
        } else {
            panic!("Expected InternalError");
        }
    }
}

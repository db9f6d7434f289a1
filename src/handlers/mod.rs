//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//! Spring Framework의 Controller 레이어와 동일한 역할을 수행하며,
//! ActixWeb 프레임워크를 기반으로 구현되었습니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! HTTP Layer Architecture
//! ┌─────────────────────────────────────────────┐
//!   Client (SPA, Mobile App, API Client)
//! └─────────────────────┬───────────────────────┘
//!                       │ HTTP Request/Response
//! ┌─────────────────────▼───────────────────────┐
//!   Handlers (이 모듈) - HTTP 엔드포인트 처리         ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Services - 비즈니스 로직                        ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   Repositories - 데이터 접근                     ← Repository Layer
//! ├─────────────────────────────────────────────┤
//!   Entities/Models - 도메인 모델                  ← Domain Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 공통 처리 패턴
//!
//! 1. **입력 검증**: `validator` derive로 요청 DTO 검증
//! 2. **인증 추출**: `AuthenticatedUser` extractor (미들웨어가 저장한 정보)
//! 3. **서비스 위임**: `Service::instance()` 싱글톤 호출
//! 4. **에러 변환**: `AppError`가 `ResponseError`로 자동 HTTP 변환
//!
//! ```rust,ignore
//! #[post("")]
//! pub async fn create_review(
//!     student: AuthenticatedUser,
//!     payload: web::Json<CreateReviewRequest>,
//! ) -> Result<HttpResponse, AppError> {
//!     payload.validate()
//!         .map_err(|e| AppError::ValidationError(e.to_string()))?;
//!
//!     let service = ReviewService::instance();
//!     let response = service.create_review(&student, payload.into_inner()).await?;
//!
//!     Ok(HttpResponse::Created().json(response))
//! }
//! ```

pub mod auth;
pub mod users;
pub mod courses;
pub mod enrollments;
pub mod payments;
pub mod reviews;
pub mod carts;
pub mod wishlists;

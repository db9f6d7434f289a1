//! HTTP 미들웨어 모듈
//!
//! JWT 인증 미들웨어와 내부 구현을 제공합니다.
//! 라우트 스코프별로 인증 필수 여부와 요구 역할을 선언적으로 지정합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::middlewares::AuthMiddleware;
//!
//! cfg.service(
//!     web::scope("/api/v1/instructor/courses")
//!         .wrap(AuthMiddleware::required_with_role("instructor"))
//!         .service(handlers::courses::create_course)
//! );
//! ```

pub mod auth_middleware;
pub mod auth_inner;

pub use auth_middleware::AuthMiddleware;

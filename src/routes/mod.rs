//! API 라우트 설정 모듈
//!
//! RESTful API 엔드포인트들을 기능별로 그룹화하여 제공합니다.
//! 사용자/인증, 강의, 수강, 결제, 리뷰, 장바구니/위시리스트 라우트와
//! 헬스체크 엔드포인트를 포함합니다.
//!
//! # Features
//!
//! - 기능별 라우트 스코프 분리 (`/api/v1/*`)
//! - 역할 기반 접근 제어 미들웨어 적용
//! - 게이트웨이 웹훅용 비인증 스코프 (서명으로 보호)
//! - 헬스체크 엔드포인트
//!
//! # Auth Middleware Usage
//!
//! 라우트에 따라 다른 인증 레벨을 적용할 수 있습니다:
//!
//! ## 인증 불필요 (Public 라우트)
//! ```rust,ignore
//! cfg.service(
//!     web::scope("/api/v1/auth")
//!         .service(handlers::auth::login)  // 로그인 자체는 인증 불필요
//! );
//! ```
//!
//! ## 선택적 인증 (로그인 시 개인화)
//! ```rust,ignore
//! cfg.service(
//!     web::scope("/api/v1/courses")
//!         .wrap(AuthMiddleware::optional())
//!         .service(handlers::courses::recommended_courses)
//! );
//! ```
//!
//! ## 역할 기반 권한 검증
//! ```rust,ignore
//! cfg.service(
//!     web::scope("/api/v1/instructor/courses")
//!         .wrap(AuthMiddleware::required_with_role("instructor"))
//!         .service(handlers::courses::create_course)
//! );
//! ```

use crate::handlers;
use crate::middlewares::AuthMiddleware;
use actix_web::web;
use chrono;
use serde_json::json;

/// 모든 라우트를 설정합니다
///
/// 기능별로 분할된 라우트들을 통합하여 애플리케이션에 등록합니다.
///
/// # Examples
///
/// ```rust,ignore
/// use actix_web::{web, App};
///
/// let app = App::new().configure(configure_all_routes);
/// ```
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // Health check endpoint
    cfg.service(health_check);

    // Feature-specific routes
    configure_auth_routes(cfg);
    configure_user_routes(cfg);
    configure_course_routes(cfg);
    configure_enrollment_routes(cfg);
    configure_payment_routes(cfg);
    configure_review_routes(cfg);
    configure_cart_routes(cfg);
}

/// 인증 관련 라우트를 설정합니다
///
/// 모든 인증 라우트는 Public 접근이 가능합니다 (인증을 위한 엔드포인트이므로).
///
/// # Available Routes
///
/// - `POST /api/v1/auth/login` - 이메일/비밀번호 로그인
/// - `POST /api/v1/auth/refresh` - 토큰 갱신
/// - `POST /api/v1/auth/verify` - JWT 토큰 검증
/// - `POST /api/v1/auth/logout` - 쿠키 제거
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            .service(handlers::auth::login)
            .service(handlers::auth::refresh_tokens)
            .service(handlers::auth::verify_token)
            .service(handlers::auth::logout)
    );
}

/// 사용자 관련 라우트를 설정합니다
///
/// # Route Groups
///
/// ## Public 라우트 (인증 불필요)
/// - `POST /api/v1/users` - 회원가입
/// - `POST /api/v1/users/verify-email` - OTP 이메일 인증
/// - `POST /api/v1/users/password-reset` - 재설정 OTP 요청
/// - `POST /api/v1/users/password-reset/confirm` - 재설정 확정
///
/// ## Protected 라우트 (인증 필요)
/// - `GET/PATCH/DELETE /api/v1/me` - 내 정보 관리
/// - `POST /api/v1/me/instructor` - 강사 전환
fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    // Public routes
    cfg.service(
        web::scope("/api/v1/users")
            .service(handlers::users::register)
            .service(handlers::users::verify_email)
            .service(handlers::users::request_password_reset)
            .service(handlers::users::confirm_password_reset)
    );

    // Protected routes
    cfg.service(
        web::scope("/api/v1/me")
            .wrap(AuthMiddleware::required_with_roles(vec!["student", "instructor", "admin"]))
            .service(handlers::users::get_me)
            .service(handlers::users::update_me)
            .service(handlers::users::become_instructor)
            .service(handlers::users::delete_me)
    );
}

/// 강의 관련 라우트를 설정합니다
///
/// # Route Groups
///
/// ## Public 라우트 (선택적 인증 - 로그인 시 커리큘럼 접근 권한 반영)
/// - `GET /api/v1/courses` - 목록 조회
/// - `GET /api/v1/courses/recommended` - 추천 목록
/// - `GET /api/v1/courses/{course_id}/reviews` - 승인된 리뷰 목록
/// - `GET /api/v1/courses/{slug}` - 상세 조회
///
/// ## Instructor 라우트 (instructor 역할 필요)
/// - `/api/v1/instructor/courses/*` - 생성/수정/커리큘럼/공개/보관
fn configure_course_routes(cfg: &mut web::ServiceConfig) {
    // Public routes (선택적 인증)
    // 등록 순서 주의: 고정 경로(recommended)가 {slug}보다 먼저 매칭되어야 함
    cfg.service(
        web::scope("/api/v1/courses")
            .wrap(AuthMiddleware::optional())
            .service(handlers::courses::list_courses)
            .service(handlers::courses::recommended_courses)
            .service(handlers::reviews::list_course_reviews)
            .service(handlers::courses::get_course_by_slug)
    );

    // Instructor routes
    cfg.service(
        web::scope("/api/v1/instructor/courses")
            .wrap(AuthMiddleware::required_with_role("instructor"))
            .service(handlers::courses::create_course)
            .service(handlers::courses::my_courses)
            .service(handlers::courses::get_my_course)
            .service(handlers::courses::update_course)
            .service(handlers::courses::delete_course)
            .service(handlers::courses::add_section)
            .service(handlers::courses::remove_section)
            .service(handlers::courses::add_lecture)
            .service(handlers::courses::publish_course)
            .service(handlers::courses::archive_course)
    );
}

/// 수강 등록 관련 라우트를 설정합니다
///
/// - `POST /api/v1/enrollments` - 무료 강의 등록
/// - `GET /api/v1/enrollments` - 내 수강 목록
/// - `GET /api/v1/enrollments/{id}` - 수강 상세
/// - `POST /api/v1/enrollments/{id}/progress` - 진도 기록
/// - `POST/DELETE /api/v1/enrollments/{id}/notes` - 노트 관리
/// - `POST/DELETE /api/v1/enrollments/{id}/bookmarks` - 북마크 관리
fn configure_enrollment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/enrollments")
            .wrap(AuthMiddleware::required_with_roles(vec!["student", "instructor", "admin"]))
            .service(handlers::enrollments::enroll)
            .service(handlers::enrollments::my_enrollments)
            .service(handlers::enrollments::get_enrollment)
            .service(handlers::enrollments::complete_lecture)
            .service(handlers::enrollments::add_note)
            .service(handlers::enrollments::remove_note)
            .service(handlers::enrollments::add_bookmark)
            .service(handlers::enrollments::remove_bookmark)
    );
}

/// 결제 관련 라우트를 설정합니다
///
/// ## Protected 라우트
/// - `POST /api/v1/payments/checkout` - 체크아웃 시작
/// - `POST /api/v1/payments/paypal/capture` - PayPal 캡처
/// - `GET /api/v1/payments` - 내 결제 내역
/// - `GET /api/v1/payments/{id}` - 결제 상세
/// - `POST /api/v1/payments/{id}/refund` - 환불
///
/// ## Webhook 라우트 (비인증, 서명 검증으로 보호)
/// - `POST /api/v1/webhooks/stripe` - Stripe 이벤트
fn configure_payment_routes(cfg: &mut web::ServiceConfig) {
    // 게이트웨이 웹훅 - JWT 미들웨어 없이 서명으로 검증
    cfg.service(
        web::scope("/api/v1/webhooks")
            .service(handlers::payments::stripe_webhook)
    );

    cfg.service(
        web::scope("/api/v1/payments")
            .wrap(AuthMiddleware::required_with_roles(vec!["student", "instructor", "admin"]))
            .service(handlers::payments::checkout)
            .service(handlers::payments::capture_paypal)
            .service(handlers::payments::my_payments)
            .service(handlers::payments::get_payment)
            .service(handlers::payments::refund_payment)
    );
}

/// 리뷰 관련 라우트를 설정합니다
///
/// 공개 목록 조회는 강의 라우트(`/courses/{id}/reviews`)에 등록됩니다.
///
/// ## Protected 라우트
/// - `POST /api/v1/reviews` - 리뷰 작성 (구매 확인)
/// - `PATCH/DELETE /api/v1/reviews/{id}` - 본인 리뷰 관리
/// - `POST /api/v1/reviews/{id}/helpful` - 도움됨 투표
/// - `POST /api/v1/reviews/{id}/reply` - 강사 답글
///
/// ## Admin 라우트 (admin 역할 필요)
/// - `GET /api/v1/admin/reviews/pending` - 심사 대기 목록
/// - `POST /api/v1/admin/reviews/{id}/moderate` - 승인/거절
fn configure_review_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/reviews")
            .wrap(AuthMiddleware::required_with_roles(vec!["student", "instructor", "admin"]))
            .service(handlers::reviews::create_review)
            .service(handlers::reviews::update_review)
            .service(handlers::reviews::delete_review)
            .service(handlers::reviews::vote_helpful)
            .service(handlers::reviews::reply_to_review)
    );

    cfg.service(
        web::scope("/api/v1/admin/reviews")
            .wrap(AuthMiddleware::required_with_role("admin"))
            .service(handlers::reviews::list_pending_reviews)
            .service(handlers::reviews::moderate_review)
    );
}

/// 장바구니/위시리스트 라우트를 설정합니다
///
/// - `/api/v1/cart/*` - 장바구니 조회/담기/제거/비우기
/// - `/api/v1/wishlist/*` - 찜하기/해제/장바구니로 옮기기
fn configure_cart_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/cart")
            .wrap(AuthMiddleware::required_with_roles(vec!["student", "instructor", "admin"]))
            .service(handlers::carts::get_cart)
            .service(handlers::carts::add_cart_item)
            .service(handlers::carts::remove_cart_item)
            .service(handlers::carts::clear_cart)
    );

    cfg.service(
        web::scope("/api/v1/wishlist")
            .wrap(AuthMiddleware::required_with_roles(vec!["student", "instructor", "admin"]))
            .service(handlers::wishlists::get_wishlist)
            .service(handlers::wishlists::add_wishlist_item)
            .service(handlers::wishlists::remove_wishlist_item)
            .service(handlers::wishlists::move_to_cart)
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// 로드밸런서나 모니터링 시스템에서 서비스 상태를 확인하는 데 사용됩니다.
///
/// # Examples
///
/// ```bash
/// curl http://localhost:8080/health
/// ```
///
/// Response:
/// ```json
/// {
///   "status": "healthy",
///   "service": "course_market_backend",
///   "version": "0.1.0",
///   "timestamp": "2024-01-01T00:00:00Z",
///   "features": {
///     "database": "MongoDB",
///     "cache": "Redis",
///     "payments": "Stripe + PayPal",
///     "dependency_injection": "Singleton Macro"
///   }
/// }
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "course_market_backend",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "cache": "Redis",
            "payments": "Stripe + PayPal",
            "dependency_injection": "Singleton Macro"
        }
    }))
}

//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! `#[service]` 매크로를 사용하여 싱글톤으로 관리되는 서비스들을 제공합니다.
//! 도메인별로 모듈화되어 사용자/인증, 강의, 수강, 결제, 리뷰,
//! 장바구니 기능을 담당합니다.
//!
//! # Features
//!
//! - 사용자 생명주기 관리 (가입, OTP 인증, 강사 전환, 삭제)
//! - JWT 토큰 기반 인증 시스템
//! - 강의 CRUD 및 커리큘럼 관리, 가중치 추천
//! - 수강 등록과 진도/노트/북마크 추적
//! - Stripe/PayPal 결제, 웹훅, 환불, 수익 분배
//! - 구매 확인 리뷰와 관리자 심사
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::{courses::CourseService, payments::PaymentService};
//!
//! let course_service = CourseService::instance();
//! let payment_service = PaymentService::instance();
//! ```

pub mod users;
pub mod auth;
pub mod mail;
pub mod courses;
pub mod enrollments;
pub mod payments;
pub mod reviews;
pub mod carts;

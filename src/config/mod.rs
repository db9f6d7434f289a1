//! # Configuration Module
//!
//! 마켓플레이스 백엔드의 설정 관리를 담당하는 모듈입니다.
//! Spring Framework의 `@Configuration` 클래스와 유사한 역할을 수행하며,
//! 환경 변수 기반의 설정값들을 중앙집중식으로 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 데이터베이스, 서버, 환경 관련 설정
//! - [`auth_config`] - JWT, 사용자 역할 관련 설정
//! - [`payment_config`] - Stripe/PayPal 게이트웨이, 수익 분배 설정
//! - [`mail_config`] - 메일 발송 API, OTP 정책 설정
//!
//! ## 설계 원칙
//!
//! ### 1. 환경 분리 (Environment Separation)
//!
//! 개발, 테스트, 스테이징, 프로덕션 환경별로 다른 설정값을 제공합니다.
//! `PROFILE` 환경변수에 따라 `.env.dev` / `.env.prod` 파일이 로드됩니다.
//!
//! ### 2. 보안 우선 (Security First)
//!
//! - 민감한 정보(게이트웨이 비밀키, JWT 시크릿)는 환경 변수로만 제공
//! - 기본값은 개발 환경에서만 안전
//! - 프로덕션에서는 필수 설정값 누락 시 시작 단계에서 패닉
//!
//! ### 3. 타입 안전성 (Type Safety)
//!
//! - 설정값의 타입 검증과 파싱 오류 처리
//! - 범위를 벗어난 값(수익 분배 bp 등)은 안전한 기본값으로 대체
//!
//! ## 환경 변수 설정 가이드
//!
//! ### 필수 환경 변수 (프로덕션)
//!
//! ```bash
//! # 서버
//! export HOST="0.0.0.0"
//! export PORT="8080"
//!
//! # JWT
//! export JWT_SECRET="your-super-secret-key"
//!
//! # 결제 게이트웨이
//! export STRIPE_SECRET_KEY="sk_live_..."
//! export STRIPE_WEBHOOK_SECRET="whsec_..."
//! export PAYPAL_CLIENT_ID="..."
//! export PAYPAL_CLIENT_SECRET="..."
//!
//! # 메일
//! export MAIL_API_URL="https://api.mail-provider.com/v3/send"
//! export MAIL_API_KEY="..."
//! ```

pub mod data_config;
pub mod auth_config;
pub mod payment_config;
pub mod mail_config;

pub use data_config::*;
pub use auth_config::*;
pub use payment_config::*;
pub use mail_config::*;

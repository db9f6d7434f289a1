//! 결제 게이트웨이 통신 모델 모듈
//!
//! Stripe/PayPal REST API와의 통신에 사용되는 wire 모델들입니다.
//! 도메인 엔티티([`crate::domain::entities::payments`])와 분리되어
//! 게이트웨이 응답 형식 변경이 도메인에 전파되지 않도록 합니다.

pub mod stripe_model;
pub mod paypal_model;

pub use stripe_model::*;
pub use paypal_model::*;

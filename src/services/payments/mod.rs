//! 결제 서비스 모듈
//!
//! - [`payment_service`] - 체크아웃/완료/환불 오케스트레이션
//! - [`stripe_service`] - Stripe REST API 게이트웨이
//! - [`paypal_service`] - PayPal Orders v2 API 게이트웨이

pub mod payment_service;
pub mod stripe_service;
pub mod paypal_service;

pub use payment_service::*;
pub use stripe_service::*;
pub use paypal_service::*;

//! 인증/보안 서비스 모듈

pub mod token_service;
pub mod otp_service;

pub use token_service::*;
pub use otp_service::*;

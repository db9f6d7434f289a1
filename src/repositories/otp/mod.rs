//! OTP 리포지토리 모듈

pub mod otp_repo;

pub use otp_repo::*;

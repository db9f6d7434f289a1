//! 결제 리포지토리 모듈

pub mod payment_repo;

pub use payment_repo::*;

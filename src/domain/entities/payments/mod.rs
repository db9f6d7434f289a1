//! 결제 엔티티 모듈

pub mod payment;

pub use payment::*;

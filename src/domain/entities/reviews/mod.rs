//! 리뷰 엔티티 모듈

pub mod review;

pub use review::*;

//! 수강 등록 엔티티 모듈

pub mod enrollment;

pub use enrollment::*;

//! 수강 등록 리포지토리 모듈

pub mod enrollment_repo;

pub use enrollment_repo::*;

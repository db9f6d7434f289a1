//! 수강 등록 서비스 모듈

pub mod enrollment_service;

pub use enrollment_service::*;

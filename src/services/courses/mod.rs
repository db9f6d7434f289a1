//! 강의 서비스 모듈

pub mod course_service;
pub mod recommendation_service;

pub use course_service::*;
pub use recommendation_service::*;

//! 강의 리포지토리 모듈

pub mod course_repo;

pub use course_repo::*;

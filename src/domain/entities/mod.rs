//! 핵심 도메인 엔티티 모듈
//!
//! MongoDB에 영속되는 비즈니스 핵심 객체들입니다.
//! 각 엔티티는 자신의 불변 조건(상태 전이, 진도 계산, 수익 분배 등)을
//! 메서드로 캡슐화하며, 컬렉션당 하나의 애그리게이트를 구성합니다.
//!
//! # 엔티티 구성
//!
//! - [`users`] - 사용자 (수강생/강사/관리자)
//! - [`courses`] - 강의 (섹션/강의 커리큘럼 임베드)
//! - [`enrollments`] - 수강 등록 (진도/노트/북마크)
//! - [`payments`] - 결제 (상태 머신, 수익 분배)
//! - [`reviews`] - 리뷰 (심사 상태, 강사 답글)
//! - [`carts`] - 장바구니/위시리스트

pub mod users;
pub mod courses;
pub mod enrollments;
pub mod payments;
pub mod reviews;
pub mod carts;

pub use users::*;
pub use courses::*;
pub use enrollments::*;
pub use payments::*;
pub use reviews::*;
pub use carts::*;

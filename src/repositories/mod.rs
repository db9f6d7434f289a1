//! 데이터 액세스 계층 모듈
//!
//! `#[repository]` 매크로로 싱글톤 관리되는 리포지토리들을 제공합니다.
//! 애그리게이트당 하나의 MongoDB 컬렉션을 담당하며, 조회가 잦은
//! 사용자/강의는 Redis 캐시를 함께 사용합니다. OTP는 Redis 전용입니다.
//!
//! # 컬렉션 구성
//!
//! | 리포지토리 | 컬렉션 | 유니크 제약 |
//! |------------|--------|-------------|
//! | [`users::UserRepository`] | `users` | email, username |
//! | [`courses::CourseRepository`] | `courses` | slug |
//! | [`enrollments::EnrollmentRepository`] | `enrollments` | (student_id, course_id) |
//! | [`payments::PaymentRepository`] | `payments` | provider_ref |
//! | [`reviews::ReviewRepository`] | `reviews` | (student_id, course_id) |
//! | [`carts::CartRepository`] | `carts` | student_id |
//! | [`carts::WishlistRepository`] | `wishlists` | student_id |
//! | [`otp::OtpRepository`] | (Redis 전용) | - |

pub mod users;
pub mod courses;
pub mod enrollments;
pub mod payments;
pub mod reviews;
pub mod carts;
pub mod otp;

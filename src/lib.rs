//! 코스마켓 온라인 강의 마켓플레이스 백엔드
//!
//! Rust 기반의 온라인 강의 마켓플레이스(이커머스 + LMS) 백엔드 서비스입니다.
//! 수강생/강사 역할 기반의 강의 CRUD, 수강 등록, 결제(Stripe/PayPal),
//! 리뷰, 장바구니/위시리스트, 그리고 싱글톤 매크로를 활용한
//! 의존성 주입을 제공합니다.
//!
//! # Features
//!
//! - **사용자 관리**: 회원가입, OTP 이메일 인증, 비밀번호 재설정, 강사 전환
//! - **JWT 인증**: 액세스/리프레시 토큰 기반 상태 없는 인증 (Bearer 헤더 + 쿠키)
//! - **강의 관리**: 섹션/강의 커리큘럼, 초안-공개-보관 상태 관리
//! - **수강 등록**: 진도 추적, 노트, 북마크
//! - **결제**: Stripe/PayPal 게이트웨이, 웹훅, 환불, 수익 분배
//! - **리뷰**: 구매 확인 리뷰, 관리자 심사, 강사 답글, 평점 집계
//! - **추천**: 가중치 점수 기반 강의 추천
//! - **싱글톤 DI**: 매크로 기반 자동 의존성 주입
//! - **MongoDB**: 도메인 데이터 영구 저장
//! - **Redis**: 캐싱 및 OTP 저장
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트 (/api/v1/*)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리, 입력 검증
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직 (결제, 수강, 추천 등)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 데이터 액세스, 캐싱, 인덱스 관리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use course_market_backend::services::courses::CourseService;
//! use course_market_backend::services::payments::PaymentService;
//!
//! // 싱글톤 서비스 인스턴스 가져오기
//! let course_service = CourseService::instance();
//! let payment_service = PaymentService::instance();
//!
//! // 강의 조회 및 결제 시작
//! let course = course_service.get_course_by_slug("rust-basics").await?;
//! let checkout = payment_service.start_checkout(&student_id, request).await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;

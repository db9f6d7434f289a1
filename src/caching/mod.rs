//! 캐싱 계층 모듈
//!
//! Redis를 백엔드로 하는 분산 캐시 지원과 JSON 기반 객체 직렬화를 제공합니다.
//! 강의/사용자 조회 캐싱 외에도 OTP 코드 저장소로 사용됩니다.
//!
//! # 주요 기능
//!
//! - Redis 통합 (멀티플렉싱 연결)
//! - JSON 기반 자동 직렬화/역직렬화
//! - TTL 지원 및 카운터 증가 연산 (OTP 시도 횟수 제한)
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::caching::redis::RedisClient;
//!
//! let cache = RedisClient::new().await?;
//! cache.set_with_expiry("course:slug:rust-basics", &course, 600).await?;
//!
//! let cached: Option<Course> = cache.get("course:slug:rust-basics").await?;
//! cache.del("course:slug:rust-basics").await?;
//! ```
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;

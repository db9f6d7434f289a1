//! 공통 DTO 모듈
//!
//! 페이지네이션 등 여러 리소스에서 공유되는 요청/응답 구조를 정의합니다.

use serde::{Deserialize, Serialize};

/// 페이지네이션 쿼리 파라미터
///
/// `?page=1&per_page=20` 형식의 쿼리를 매핑합니다.
/// 범위를 벗어난 값은 기본값으로 보정됩니다.
#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

impl PageQuery {
    /// 보정된 페이지 번호 (1부터 시작)
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    /// 보정된 페이지 크기 (1 ~ 100)
    pub fn per_page(&self) -> u64 {
        self.per_page.unwrap_or(20).clamp(1, 100)
    }

    /// MongoDB skip 값
    pub fn skip(&self) -> u64 {
        (self.page() - 1) * self.per_page()
    }
}

/// 페이지네이션 응답 래퍼
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedResponse<T> {
    /// 현재 페이지 데이터
    pub data: Vec<T>,
    /// 전체 항목 수
    pub total: u64,
    /// 현재 페이지 번호
    pub page: u64,
    /// 페이지 크기
    pub per_page: u64,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, total: u64, page: u64, per_page: u64) -> Self {
        Self {
            data,
            total,
            page,
            per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_defaults() {
        let query = PageQuery { page: None, per_page: None };

        assert_eq!(query.page(), 1);
        assert_eq!(query.per_page(), 20);
        assert_eq!(query.skip(), 0);
    }

    #[test]
    fn test_page_query_clamping() {
        let query = PageQuery { page: Some(0), per_page: Some(1000) };

        assert_eq!(query.page(), 1);
        assert_eq!(query.per_page(), 100);

        let query = PageQuery { page: Some(3), per_page: Some(10) };
        assert_eq!(query.skip(), 20);
    }
}

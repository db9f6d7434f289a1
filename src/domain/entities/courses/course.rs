//! Course Entity Implementation
//!
//! 강의 애그리게이트의 핵심 구현체입니다.
//! 커리큘럼(섹션/강의)을 서브도큐먼트로 임베드하며, 평점과 수강생 수 같은
//! 집계값을 비정규화해서 함께 보관합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 강의 공개 상태
///
/// `Draft → Published → Archived` 순서로만 전이됩니다.
/// 보관된 강의는 신규 구매가 차단되지만 기존 수강생은 계속 접근할 수 있습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseStatus {
    /// 초안 - 소유 강사와 관리자에게만 보임
    Draft,
    /// 공개 - 모든 사용자에게 노출되고 구매 가능
    Published,
    /// 보관 - 목록에서 제외되고 신규 구매 차단
    Archived,
}

impl CourseStatus {
    /// 상태를 문자열로 변환합니다 (MongoDB 쿼리 필터용)
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseStatus::Draft => "draft",
            CourseStatus::Published => "published",
            CourseStatus::Archived => "archived",
        }
    }
}

/// 강의 난이도
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseLevel {
    Beginner,
    Intermediate,
    Advanced,
    /// 모든 수준
    #[serde(rename = "all_levels")]
    AllLevels,
}

impl CourseLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseLevel::Beginner => "beginner",
            CourseLevel::Intermediate => "intermediate",
            CourseLevel::Advanced => "advanced",
            CourseLevel::AllLevels => "all_levels",
        }
    }
}

/// 커리큘럼 내 개별 강의(lecture) 서브도큐먼트
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lecture {
    /// 강의 고유 ID (진도 추적의 기준)
    pub lecture_id: ObjectId,
    /// 강의 제목
    pub title: String,
    /// 재생 시간 (초)
    pub duration_seconds: u32,
    /// 미리보기 허용 여부 (미구매자도 시청 가능)
    pub is_preview: bool,
    /// 영상 URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

impl Lecture {
    /// 새 강의 생성
    pub fn new(title: String, duration_seconds: u32, is_preview: bool, video_url: Option<String>) -> Self {
        Self {
            lecture_id: ObjectId::new(),
            title,
            duration_seconds,
            is_preview,
            video_url,
        }
    }
}

/// 커리큘럼 섹션 서브도큐먼트
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// 섹션 고유 ID
    pub section_id: ObjectId,
    /// 섹션 제목
    pub title: String,
    /// 섹션에 속한 강의 목록 (배열 순서가 곧 커리큘럼 순서)
    pub lectures: Vec<Lecture>,
}

impl Section {
    /// 새 섹션 생성
    pub fn new(title: String) -> Self {
        Self {
            section_id: ObjectId::new(),
            title,
            lectures: Vec::new(),
        }
    }
}

/// 강의 엔티티
///
/// 온라인 강의 하나를 표현하는 애그리게이트 루트입니다.
/// 가격은 통화 최소 단위(센트)의 정수로 저장하여 부동소수점 오차를
/// 방지합니다. 평점 합계/개수와 수강생 수는 조회 성능을 위해
/// 비정규화되어 있으며, 리뷰 심사와 결제 완료 시점에 갱신됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 소유 강사의 사용자 ID
    pub instructor_id: ObjectId,
    /// 강의 제목
    pub title: String,
    /// URL 슬러그 (unique)
    pub slug: String,
    /// 부제목
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// 상세 설명
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// 카테고리 (예: "programming", "design")
    pub category: String,
    /// 난이도
    pub level: CourseLevel,
    /// 강의 언어 코드 (예: "ko", "en")
    pub language: String,
    /// 가격 (통화 최소 단위, 0이면 무료 강의)
    pub price_cents: i64,
    /// 통화 코드 (ISO 4217)
    pub currency: String,
    /// 썸네일 이미지 URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// 공개 상태
    pub status: CourseStatus,
    /// 커리큘럼 섹션 목록
    pub sections: Vec<Section>,
    /// 승인된 리뷰 평점 합계 (비정규화 집계)
    pub rating_sum: i64,
    /// 승인된 리뷰 개수 (비정규화 집계)
    pub rating_count: i64,
    /// 수강생 수 (비정규화 집계)
    pub enrollment_count: i64,
    /// 공개 시간
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime>,
    /// 생성 시간
    pub created_at: DateTime,
    /// 수정 시간
    pub updated_at: DateTime,
}

impl Course {
    /// 새 초안 강의 생성
    pub fn new_draft(
        instructor_id: ObjectId,
        title: String,
        slug: String,
        category: String,
        level: CourseLevel,
        language: String,
        price_cents: i64,
        currency: String,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            instructor_id,
            title,
            slug,
            subtitle: None,
            description: None,
            category,
            level,
            language,
            price_cents,
            currency,
            thumbnail_url: None,
            status: CourseStatus::Draft,
            sections: Vec::new(),
            rating_sum: 0,
            rating_count: 0,
            enrollment_count: 0,
            published_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 공개 상태 여부
    pub fn is_published(&self) -> bool {
        self.status == CourseStatus::Published
    }

    /// 무료 강의 여부
    pub fn is_free(&self) -> bool {
        self.price_cents == 0
    }

    /// 전체 강의(lecture) 수
    pub fn total_lecture_count(&self) -> usize {
        self.sections.iter().map(|s| s.lectures.len()).sum()
    }

    /// 전체 재생 시간 (초)
    pub fn total_duration_seconds(&self) -> u64 {
        self.sections
            .iter()
            .flat_map(|s| s.lectures.iter())
            .map(|l| l.duration_seconds as u64)
            .sum()
    }

    /// 커리큘럼에 해당 강의(lecture)가 존재하는지 확인
    pub fn contains_lecture(&self, lecture_id: &ObjectId) -> bool {
        self.sections
            .iter()
            .flat_map(|s| s.lectures.iter())
            .any(|l| &l.lecture_id == lecture_id)
    }

    /// 공개 가능 조건을 만족하는지 확인
    ///
    /// 최소 1개의 강의(lecture)와 상세 설명이 있어야 공개할 수 있습니다.
    pub fn can_publish(&self) -> bool {
        self.total_lecture_count() > 0
            && self.description.as_deref().map(|d| !d.trim().is_empty()).unwrap_or(false)
    }

    /// 평균 평점 (승인된 리뷰 기준, 리뷰가 없으면 0.0)
    pub fn average_rating(&self) -> f64 {
        if self.rating_count == 0 {
            0.0
        } else {
            self.rating_sum as f64 / self.rating_count as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_course() -> Course {
        Course::new_draft(
            ObjectId::new(),
            "Rust 입문".to_string(),
            "rust-basics".to_string(),
            "programming".to_string(),
            CourseLevel::Beginner,
            "ko".to_string(),
            49_900,
            "KRW".to_string(),
        )
    }

    #[test]
    fn test_new_draft_defaults() {
        let course = sample_course();

        assert_eq!(course.status, CourseStatus::Draft);
        assert!(!course.is_published());
        assert!(!course.is_free());
        assert_eq!(course.total_lecture_count(), 0);
        assert_eq!(course.average_rating(), 0.0);
    }

    #[test]
    fn test_can_publish_requires_content() {
        let mut course = sample_course();

        // 강의도 설명도 없으면 공개 불가
        assert!(!course.can_publish());

        course.description = Some("Rust 기초를 배웁니다".to_string());
        assert!(!course.can_publish());

        let mut section = Section::new("시작하기".to_string());
        section.lectures.push(Lecture::new("소개".to_string(), 300, true, None));
        course.sections.push(section);

        assert!(course.can_publish());

        // 설명이 공백뿐이면 공개 불가
        course.description = Some("   ".to_string());
        assert!(!course.can_publish());
    }

    #[test]
    fn test_curriculum_aggregation() {
        let mut course = sample_course();

        let mut s1 = Section::new("1부".to_string());
        s1.lectures.push(Lecture::new("강의 1".to_string(), 600, true, None));
        s1.lectures.push(Lecture::new("강의 2".to_string(), 900, false, None));

        let mut s2 = Section::new("2부".to_string());
        s2.lectures.push(Lecture::new("강의 3".to_string(), 1200, false, None));

        let known_id = s2.lectures[0].lecture_id;

        course.sections.push(s1);
        course.sections.push(s2);

        assert_eq!(course.total_lecture_count(), 3);
        assert_eq!(course.total_duration_seconds(), 2700);
        assert!(course.contains_lecture(&known_id));
        assert!(!course.contains_lecture(&ObjectId::new()));
    }

    #[test]
    fn test_average_rating() {
        let mut course = sample_course();

        course.rating_sum = 23;
        course.rating_count = 5;

        assert!((course.average_rating() - 4.6).abs() < f64::EPSILON);
    }

    #[test]
    fn test_status_serialization() {
        // MongoDB 쿼리 필터와 직렬화 형식이 일치해야 함
        let json = serde_json::to_string(&CourseStatus::Published).unwrap();
        assert_eq!(json, "\"published\"");
        assert_eq!(CourseStatus::Published.as_str(), "published");

        let level_json = serde_json::to_string(&CourseLevel::AllLevels).unwrap();
        assert_eq!(level_json, "\"all_levels\"");
    }
}

//! 강의 응답 DTO
//!
//! 상세 조회용(커리큘럼 포함)과 목록 조회용(요약) 응답을 구분합니다.

use serde::{Deserialize, Serialize};
use mongodb::bson::DateTime;
use crate::domain::entities::courses::course::{Course, CourseLevel, CourseStatus, Lecture, Section};

/// 커리큘럼 강의(lecture) 응답
///
/// 미리보기가 아닌 강의의 영상 URL은 수강생이 아닌 경우 제외됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LectureResponse {
    pub lecture_id: String,
    pub title: String,
    pub duration_seconds: u32,
    pub is_preview: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

impl LectureResponse {
    /// 접근 권한에 따라 영상 URL 노출을 제어하며 변환합니다
    ///
    /// # 인자
    /// * `lecture` - 원본 강의
    /// * `has_access` - 수강생/소유 강사/관리자 여부
    pub fn from_lecture(lecture: &Lecture, has_access: bool) -> Self {
        let video_url = if has_access || lecture.is_preview {
            lecture.video_url.clone()
        } else {
            None
        };

        Self {
            lecture_id: lecture.lecture_id.to_hex(),
            title: lecture.title.clone(),
            duration_seconds: lecture.duration_seconds,
            is_preview: lecture.is_preview,
            video_url,
        }
    }
}

/// 커리큘럼 섹션 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionResponse {
    pub section_id: String,
    pub title: String,
    pub lectures: Vec<LectureResponse>,
}

impl SectionResponse {
    pub fn from_section(section: &Section, has_access: bool) -> Self {
        Self {
            section_id: section.section_id.to_hex(),
            title: section.title.clone(),
            lectures: section
                .lectures
                .iter()
                .map(|l| LectureResponse::from_lecture(l, has_access))
                .collect(),
        }
    }
}

/// 강의 상세 응답 DTO (커리큘럼 포함)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseResponse {
    pub id: String,
    pub instructor_id: String,
    pub title: String,
    pub slug: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub category: String,
    pub level: CourseLevel,
    pub language: String,
    pub price_cents: i64,
    pub currency: String,
    pub thumbnail_url: Option<String>,
    pub status: CourseStatus,
    pub sections: Vec<SectionResponse>,
    pub total_lectures: usize,
    pub total_duration_seconds: u64,
    pub average_rating: f64,
    pub rating_count: i64,
    pub enrollment_count: i64,
    pub published_at: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl CourseResponse {
    /// 접근 권한에 따라 커리큘럼 노출을 제어하며 변환합니다
    pub fn from_course(course: Course, has_access: bool) -> Self {
        let total_lectures = course.total_lecture_count();
        let total_duration_seconds = course.total_duration_seconds();
        let average_rating = course.average_rating();
        let sections = course
            .sections
            .iter()
            .map(|s| SectionResponse::from_section(s, has_access))
            .collect();

        Self {
            id: course.id.map(|id| id.to_hex()).unwrap_or_default(),
            instructor_id: course.instructor_id.to_hex(),
            title: course.title,
            slug: course.slug,
            subtitle: course.subtitle,
            description: course.description,
            category: course.category,
            level: course.level,
            language: course.language,
            price_cents: course.price_cents,
            currency: course.currency,
            thumbnail_url: course.thumbnail_url,
            status: course.status,
            sections,
            total_lectures,
            total_duration_seconds,
            average_rating,
            rating_count: course.rating_count,
            enrollment_count: course.enrollment_count,
            published_at: course.published_at,
            created_at: course.created_at,
            updated_at: course.updated_at,
        }
    }
}

/// 강의 요약 응답 DTO (목록 조회용, 커리큘럼 제외)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseSummaryResponse {
    pub id: String,
    pub instructor_id: String,
    pub title: String,
    pub slug: String,
    pub subtitle: Option<String>,
    pub category: String,
    pub level: CourseLevel,
    pub price_cents: i64,
    pub currency: String,
    pub thumbnail_url: Option<String>,
    pub status: CourseStatus,
    pub average_rating: f64,
    pub rating_count: i64,
    pub enrollment_count: i64,
    pub published_at: Option<DateTime>,
}

impl From<Course> for CourseSummaryResponse {
    fn from(course: Course) -> Self {
        let average_rating = course.average_rating();

        Self {
            id: course.id.map(|id| id.to_hex()).unwrap_or_default(),
            instructor_id: course.instructor_id.to_hex(),
            title: course.title,
            slug: course.slug,
            subtitle: course.subtitle,
            category: course.category,
            level: course.level,
            price_cents: course.price_cents,
            currency: course.currency,
            thumbnail_url: course.thumbnail_url,
            status: course.status,
            average_rating,
            rating_count: course.rating_count,
            enrollment_count: course.enrollment_count,
            published_at: course.published_at,
        }
    }
}

/// 추천 강의 응답 DTO
///
/// 요약 정보에 추천 점수를 덧붙입니다.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendedCourseResponse {
    #[serde(flatten)]
    pub course: CourseSummaryResponse,
    /// 가중치 점수 (0.0 ~ 1.0)
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    fn course_with_video() -> Course {
        let mut course = Course::new_draft(
            ObjectId::new(),
            "Rust 입문".to_string(),
            "rust-basics".to_string(),
            "programming".to_string(),
            CourseLevel::Beginner,
            "ko".to_string(),
            49_900,
            "KRW".to_string(),
        );

        let mut section = Section::new("시작하기".to_string());
        section.lectures.push(Lecture::new(
            "소개".to_string(),
            300,
            true,
            Some("https://cdn.example.com/intro.mp4".to_string()),
        ));
        section.lectures.push(Lecture::new(
            "본문".to_string(),
            900,
            false,
            Some("https://cdn.example.com/main.mp4".to_string()),
        ));
        course.sections.push(section);
        course
    }

    #[test]
    fn test_video_url_hidden_without_access() {
        let response = CourseResponse::from_course(course_with_video(), false);
        let lectures = &response.sections[0].lectures;

        // 미리보기 강의는 누구나 시청 가능
        assert!(lectures[0].video_url.is_some());
        // 본 강의는 미구매자에게 숨김
        assert!(lectures[1].video_url.is_none());
    }

    #[test]
    fn test_video_url_visible_with_access() {
        let response = CourseResponse::from_course(course_with_video(), true);
        let lectures = &response.sections[0].lectures;

        assert!(lectures[0].video_url.is_some());
        assert!(lectures[1].video_url.is_some());
    }

    #[test]
    fn test_aggregates_in_response() {
        let response = CourseResponse::from_course(course_with_video(), false);

        assert_eq!(response.total_lectures, 2);
        assert_eq!(response.total_duration_seconds, 1200);
    }
}

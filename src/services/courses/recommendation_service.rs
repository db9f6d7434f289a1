//! # 강의 추천 서비스 구현
//!
//! 공개 강의 전체를 메모리에 올려 가중치 점수를 계산하는 단순한 추천
//! 엔진입니다. 별도의 학습 모델 없이 네 가지 신호를 선형 결합합니다:
//!
//! | 신호 | 가중치 | 계산 방식 |
//! |------|--------|-----------|
//! | 카테고리 선호 | 0.40 | 수강 중인 강의의 카테고리와 일치하면 1.0 |
//! | 평점 | 0.30 | 평균 평점 / 5.0 |
//! | 인기도 | 0.20 | ln(1+수강생 수) / ln(1+최대 수강생 수) |
//! | 최신성 | 0.10 | 공개 후 1년 동안 선형 감쇠 |
//!
//! 이미 수강 중인 강의와 본인이 만든 강의는 후보에서 제외됩니다.
//! 비로그인 사용자에게는 카테고리 신호 없이 인기/평점 순위를 제공합니다.

use std::collections::HashSet;
use std::sync::Arc;
use mongodb::bson::oid::ObjectId;
use singleton_macro::service;
use crate::{
    domain::{
        dto::courses::response::{CourseSummaryResponse, RecommendedCourseResponse},
        entities::courses::course::Course,
    },
    repositories::{
        courses::course_repo::CourseRepository,
        enrollments::enrollment_repo::EnrollmentRepository,
    },
    core::errors::AppError,
};

/// 카테고리 선호 가중치
const WEIGHT_CATEGORY: f64 = 0.40;
/// 평점 가중치
const WEIGHT_RATING: f64 = 0.30;
/// 인기도 가중치
const WEIGHT_POPULARITY: f64 = 0.20;
/// 최신성 가중치
const WEIGHT_RECENCY: f64 = 0.10;

/// 최신성 감쇠 기간 (일)
const RECENCY_WINDOW_DAYS: f64 = 365.0;

/// 강의 추천 비즈니스 로직 서비스
#[service(name = "recommendation")]
pub struct RecommendationService {
    /// 강의 리포지토리 (공개 강의 전체 조회)
    course_repo: Arc<CourseRepository>,

    /// 수강 등록 리포지토리 (카테고리 선호 및 제외 목록)
    enrollment_repo: Arc<EnrollmentRepository>,
}

impl RecommendationService {
    /// 수강생 맞춤 추천 목록을 반환합니다
    ///
    /// # Arguments
    ///
    /// * `viewer_id` - 로그인한 수강생 ID (None이면 인기 순위만 반환)
    /// * `limit` - 반환할 최대 강의 수
    pub async fn recommend(&self, viewer_id: Option<&str>, limit: usize) -> Result<Vec<RecommendedCourseResponse>, AppError> {
        let courses = self.course_repo.find_all_published().await?;

        let (preferred_categories, excluded_course_ids, viewer_oid) = match viewer_id {
            Some(id) => {
                let student_id = ObjectId::parse_str(id)
                    .map_err(|_| AppError::ValidationError("유효하지 않은 사용자 ID 형식입니다".to_string()))?;

                let enrollments = self.enrollment_repo.find_by_student(&student_id).await?;

                let excluded: HashSet<ObjectId> = enrollments.iter().map(|e| e.course_id).collect();
                let categories: HashSet<String> = courses
                    .iter()
                    .filter(|c| c.id.map(|id| excluded.contains(&id)).unwrap_or(false))
                    .map(|c| c.category.clone())
                    .collect();

                (categories, excluded, Some(student_id))
            }
            None => (HashSet::new(), HashSet::new(), None),
        };

        let max_enrollment = courses.iter().map(|c| c.enrollment_count).max().unwrap_or(0);
        let now_millis = chrono::Utc::now().timestamp_millis();

        let mut scored: Vec<(f64, Course)> = courses
            .into_iter()
            .filter(|c| {
                // 이미 수강 중이거나 본인 강의는 제외
                let enrolled = c.id.map(|id| excluded_course_ids.contains(&id)).unwrap_or(false);
                let own = viewer_oid.map(|v| c.instructor_id == v).unwrap_or(false);
                !enrolled && !own
            })
            .map(|c| {
                let score = score_course(&c, &preferred_categories, max_enrollment, now_millis);
                (score, c)
            })
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        Ok(scored
            .into_iter()
            .take(limit)
            .map(|(score, course)| RecommendedCourseResponse {
                course: CourseSummaryResponse::from(course),
                score,
            })
            .collect())
    }
}

/// 단일 강의의 추천 점수를 계산합니다
///
/// 모든 신호는 0.0 ~ 1.0 범위로 정규화된 후 가중 합산되므로
/// 최종 점수도 0.0 ~ 1.0 범위입니다.
pub fn score_course(
    course: &Course,
    preferred_categories: &HashSet<String>,
    max_enrollment: i64,
    now_millis: i64,
) -> f64 {
    let category_score = if preferred_categories.contains(&course.category) { 1.0 } else { 0.0 };
    let rating_score = course.average_rating() / 5.0;
    let popularity_score = popularity_score(course.enrollment_count, max_enrollment);
    let recency_score = recency_score(course.published_at.map(|d| d.timestamp_millis()), now_millis);

    WEIGHT_CATEGORY * category_score
        + WEIGHT_RATING * rating_score
        + WEIGHT_POPULARITY * popularity_score
        + WEIGHT_RECENCY * recency_score
}

/// 수강생 수를 로그 스케일로 정규화합니다
///
/// 수강생 수의 편차가 매우 크기 때문에 선형 정규화 대신 로그를 사용하여
/// 소규모 강의도 의미 있는 점수를 받도록 합니다.
fn popularity_score(enrollment_count: i64, max_enrollment: i64) -> f64 {
    if max_enrollment <= 0 || enrollment_count <= 0 {
        return 0.0;
    }
    ((1.0 + enrollment_count as f64).ln()) / ((1.0 + max_enrollment as f64).ln())
}

/// 공개 시점 기준의 최신성 점수를 계산합니다
///
/// 공개 직후 1.0에서 시작해 1년에 걸쳐 0.0까지 선형 감쇠합니다.
fn recency_score(published_millis: Option<i64>, now_millis: i64) -> f64 {
    let Some(published) = published_millis else {
        return 0.0;
    };

    let age_days = (now_millis - published) as f64 / (1000.0 * 60.0 * 60.0 * 24.0);
    if age_days < 0.0 {
        return 1.0;
    }

    (1.0 - age_days / RECENCY_WINDOW_DAYS).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::courses::course::{CourseLevel, CourseStatus};
    use mongodb::bson::DateTime;

    fn published_course(category: &str, rating_sum: i64, rating_count: i64, enrollments: i64) -> Course {
        let mut course = Course::new_draft(
            ObjectId::new(),
            "테스트 강의".to_string(),
            format!("test-{}", ObjectId::new().to_hex()),
            category.to_string(),
            CourseLevel::Beginner,
            "ko".to_string(),
            10_000,
            "KRW".to_string(),
        );
        course.id = Some(ObjectId::new());
        course.status = CourseStatus::Published;
        course.published_at = Some(DateTime::now());
        course.rating_sum = rating_sum;
        course.rating_count = rating_count;
        course.enrollment_count = enrollments;
        course
    }

    #[test]
    fn test_popularity_score_normalization() {
        assert_eq!(popularity_score(0, 100), 0.0);
        assert_eq!(popularity_score(10, 0), 0.0);
        assert!((popularity_score(100, 100) - 1.0).abs() < f64::EPSILON);
        assert!(popularity_score(10, 100) > 0.0);
        assert!(popularity_score(10, 100) < 1.0);
    }

    #[test]
    fn test_recency_score_decay() {
        let now = chrono::Utc::now().timestamp_millis();
        let day_millis: i64 = 24 * 60 * 60 * 1000;

        // 공개 직후는 거의 1.0
        assert!(recency_score(Some(now), now) > 0.99);

        // 반년 경과 시 약 0.5
        let half_year_ago = now - 183 * day_millis;
        let score = recency_score(Some(half_year_ago), now);
        assert!(score > 0.4 && score < 0.6);

        // 1년 이상 경과하면 0.0
        let two_years_ago = now - 730 * day_millis;
        assert_eq!(recency_score(Some(two_years_ago), now), 0.0);

        // 미공개 강의는 0.0
        assert_eq!(recency_score(None, now), 0.0);
    }

    #[test]
    fn test_score_bounded() {
        let now = chrono::Utc::now().timestamp_millis();
        let mut preferred = HashSet::new();
        preferred.insert("programming".to_string());

        // 모든 신호가 최대인 강의
        let course = published_course("programming", 500, 100, 1000);
        let score = score_course(&course, &preferred, 1000, now);
        assert!(score > 0.9 && score <= 1.0);

        // 모든 신호가 최소인 강의
        let mut course = published_course("design", 0, 0, 0);
        course.published_at = None;
        let score = score_course(&course, &preferred, 1000, now);
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_category_affinity_dominates() {
        let now = chrono::Utc::now().timestamp_millis();
        let mut preferred = HashSet::new();
        preferred.insert("programming".to_string());

        // 카테고리가 일치하는 평범한 강의 vs 불일치하는 인기 강의
        let matching = published_course("programming", 20, 5, 10);
        let popular_other = published_course("design", 20, 5, 1000);

        let matching_score = score_course(&matching, &preferred, 1000, now);
        let other_score = score_course(&popular_other, &preferred, 1000, now);

        assert!(matching_score > other_score);
    }
}

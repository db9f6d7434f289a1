//! # 강의 관리 서비스 구현
//!
//! 강의 CRUD, 커리큘럼 관리, 공개 상태 전이, 목록 필터링을 담당하는
//! 핵심 비즈니스 로직입니다. 모든 변경 연산은 소유 강사(또는 관리자)에게만
//! 허용됩니다.
//!
//! ## 공개 규칙
//!
//! - 초안(draft) 강의는 소유 강사와 관리자에게만 보임
//! - 공개(published)하려면 최소 1개의 강의(lecture)와 상세 설명 필요
//! - 보관(archived)된 강의는 목록에서 제외되고 신규 구매 차단
//! - 삭제는 초안 상태에서만 가능 (공개 이력이 있으면 보관으로 처리)

use std::sync::Arc;
use mongodb::bson::{doc, oid::ObjectId, Document};
use singleton_macro::service;
use crate::{
    domain::{
        dto::common::{PageQuery, PaginatedResponse},
        dto::courses::{
            request::{AddLectureRequest, AddSectionRequest, CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
            response::{CourseResponse, CourseSummaryResponse},
        },
        entities::courses::course::{Course, CourseLevel, CourseStatus, Lecture, Section},
        models::auth::authenticated_user::AuthenticatedUser,
    },
    repositories::{
        courses::course_repo::CourseRepository,
        enrollments::enrollment_repo::EnrollmentRepository,
    },
    core::errors::AppError,
};
use crate::utils::string_utils::{clean_optional_string, slugify};

/// 강의 관리 비즈니스 로직 서비스
#[service(name = "course")]
pub struct CourseService {
    /// 강의 데이터 액세스 리포지토리
    course_repo: Arc<CourseRepository>,

    /// 수강 등록 리포지토리 (커리큘럼 접근 권한 판별용)
    enrollment_repo: Arc<EnrollmentRepository>,
}

impl CourseService {
    /// 난이도 문자열을 엔티티 열거형으로 변환합니다
    fn parse_level(level: &str) -> Result<CourseLevel, AppError> {
        match level {
            "beginner" => Ok(CourseLevel::Beginner),
            "intermediate" => Ok(CourseLevel::Intermediate),
            "advanced" => Ok(CourseLevel::Advanced),
            "all_levels" => Ok(CourseLevel::AllLevels),
            _ => Err(AppError::ValidationError("유효하지 않은 난이도입니다".to_string())),
        }
    }

    /// 소유권을 검증합니다 (소유 강사 또는 관리자만 통과)
    fn ensure_owner(course: &Course, viewer: &AuthenticatedUser) -> Result<(), AppError> {
        if course.instructor_id.to_hex() != viewer.user_id && !viewer.is_admin() {
            return Err(AppError::AuthorizationError("본인의 강의만 수정할 수 있습니다".to_string()));
        }
        Ok(())
    }

    /// 제목에서 고유한 슬러그를 생성합니다
    ///
    /// 동일한 슬러그가 이미 존재하면 임의 접미사를 붙여 충돌을 회피합니다.
    async fn unique_slug(&self, title: &str) -> Result<String, AppError> {
        let mut slug = slugify(title);
        if slug.is_empty() {
            slug = "course".to_string();
        }

        if self.course_repo.find_by_slug(&slug).await?.is_none() {
            return Ok(slug);
        }

        let suffix = uuid::Uuid::new_v4().simple().to_string();
        Ok(format!("{}-{}", slug, &suffix[..6]))
    }

    /// 조회자의 커리큘럼 접근 권한을 판별합니다
    ///
    /// 소유 강사, 관리자, 수강생(활성/수료)은 전체 커리큘럼(영상 URL 포함)에
    /// 접근할 수 있습니다.
    async fn has_full_access(&self, course: &Course, viewer: Option<&AuthenticatedUser>) -> Result<bool, AppError> {
        let Some(viewer) = viewer else {
            return Ok(false);
        };

        if viewer.is_admin() || course.instructor_id.to_hex() == viewer.user_id {
            return Ok(true);
        }

        let (Ok(student_id), Some(course_id)) = (ObjectId::parse_str(&viewer.user_id), course.id) else {
            return Ok(false);
        };

        let enrollment = self.enrollment_repo
            .find_by_student_and_course(&student_id, &course_id)
            .await?;

        Ok(enrollment.map(|e| e.can_track_progress()).unwrap_or(false))
    }

    /// 새 강의를 생성합니다 (초안 상태)
    pub async fn create_course(&self, instructor: &AuthenticatedUser, request: CreateCourseRequest) -> Result<CourseResponse, AppError> {
        let instructor_id = ObjectId::parse_str(&instructor.user_id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 사용자 ID 형식입니다".to_string()))?;

        let level = Self::parse_level(&request.level)?;
        let slug = self.unique_slug(&request.title).await?;

        let mut course = Course::new_draft(
            instructor_id,
            request.title,
            slug,
            request.category,
            level,
            request.language,
            request.price_cents,
            request.currency.to_uppercase(),
        );
        course.subtitle = clean_optional_string(request.subtitle);
        course.description = clean_optional_string(request.description);

        let created = self.course_repo.create(course).await?;

        log::info!("강의 생성: {} (강사: {})", created.slug, instructor.user_id);

        Ok(CourseResponse::from_course(created, true))
    }

    /// 슬러그로 강의 상세를 조회합니다
    ///
    /// 초안/보관 강의는 소유 강사와 관리자에게만 보입니다.
    pub async fn get_course_by_slug(&self, slug: &str, viewer: Option<&AuthenticatedUser>) -> Result<CourseResponse, AppError> {
        let course = self.course_repo
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::NotFound("강의를 찾을 수 없습니다".to_string()))?;

        let is_owner_or_admin = viewer
            .map(|v| v.is_admin() || course.instructor_id.to_hex() == v.user_id)
            .unwrap_or(false);

        if !course.is_published() && !is_owner_or_admin {
            return Err(AppError::NotFound("강의를 찾을 수 없습니다".to_string()));
        }

        let has_access = self.has_full_access(&course, viewer).await?;

        Ok(CourseResponse::from_course(course, has_access))
    }

    /// ID로 강의 상세를 조회합니다 (수정 화면용)
    pub async fn get_course_by_id(&self, id: &str, viewer: &AuthenticatedUser) -> Result<CourseResponse, AppError> {
        let course = self.course_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("강의를 찾을 수 없습니다".to_string()))?;

        Self::ensure_owner(&course, viewer)?;

        Ok(CourseResponse::from_course(course, true))
    }

    /// 강의 정보를 부분 수정합니다
    ///
    /// 제목이 변경되어도 슬러그는 유지됩니다 (공유 링크 보호).
    pub async fn update_course(&self, viewer: &AuthenticatedUser, course_id: &str, request: UpdateCourseRequest) -> Result<CourseResponse, AppError> {
        let course = self.course_repo
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::NotFound("강의를 찾을 수 없습니다".to_string()))?;

        Self::ensure_owner(&course, viewer)?;

        let mut update_doc = doc! { "updated_at": mongodb::bson::DateTime::now() };

        if let Some(title) = request.title {
            update_doc.insert("title", title);
        }
        if let Some(subtitle) = clean_optional_string(request.subtitle) {
            update_doc.insert("subtitle", subtitle);
        }
        if let Some(description) = clean_optional_string(request.description) {
            update_doc.insert("description", description);
        }
        if let Some(category) = request.category {
            update_doc.insert("category", category);
        }
        if let Some(level) = request.level {
            Self::parse_level(&level)?;
            update_doc.insert("level", level);
        }
        if let Some(price_cents) = request.price_cents {
            update_doc.insert("price_cents", price_cents);
        }
        if let Some(thumbnail_url) = clean_optional_string(request.thumbnail_url) {
            update_doc.insert("thumbnail_url", thumbnail_url);
        }

        let updated = self.course_repo
            .update(course_id, update_doc)
            .await?
            .ok_or_else(|| AppError::NotFound("강의를 찾을 수 없습니다".to_string()))?;

        Ok(CourseResponse::from_course(updated, true))
    }

    /// 커리큘럼에 섹션을 추가합니다
    pub async fn add_section(&self, viewer: &AuthenticatedUser, course_id: &str, request: AddSectionRequest) -> Result<CourseResponse, AppError> {
        let mut course = self.course_repo
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::NotFound("강의를 찾을 수 없습니다".to_string()))?;

        Self::ensure_owner(&course, viewer)?;

        course.sections.push(Section::new(request.title));
        course.updated_at = mongodb::bson::DateTime::now();

        self.course_repo.save(&course).await?;

        Ok(CourseResponse::from_course(course, true))
    }

    /// 섹션에 강의(lecture)를 추가합니다
    pub async fn add_lecture(&self, viewer: &AuthenticatedUser, course_id: &str, section_id: &str, request: AddLectureRequest) -> Result<CourseResponse, AppError> {
        let mut course = self.course_repo
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::NotFound("강의를 찾을 수 없습니다".to_string()))?;

        Self::ensure_owner(&course, viewer)?;

        let section_oid = ObjectId::parse_str(section_id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 섹션 ID 형식입니다".to_string()))?;

        let section = course.sections
            .iter_mut()
            .find(|s| s.section_id == section_oid)
            .ok_or_else(|| AppError::NotFound("섹션을 찾을 수 없습니다".to_string()))?;

        section.lectures.push(Lecture::new(
            request.title,
            request.duration_seconds,
            request.is_preview,
            clean_optional_string(request.video_url),
        ));
        course.updated_at = mongodb::bson::DateTime::now();

        self.course_repo.save(&course).await?;

        Ok(CourseResponse::from_course(course, true))
    }

    /// 커리큘럼에서 섹션을 제거합니다 (포함된 강의도 함께 제거)
    pub async fn remove_section(&self, viewer: &AuthenticatedUser, course_id: &str, section_id: &str) -> Result<CourseResponse, AppError> {
        let mut course = self.course_repo
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::NotFound("강의를 찾을 수 없습니다".to_string()))?;

        Self::ensure_owner(&course, viewer)?;

        let section_oid = ObjectId::parse_str(section_id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 섹션 ID 형식입니다".to_string()))?;

        let before = course.sections.len();
        course.sections.retain(|s| s.section_id != section_oid);

        if course.sections.len() == before {
            return Err(AppError::NotFound("섹션을 찾을 수 없습니다".to_string()));
        }

        course.updated_at = mongodb::bson::DateTime::now();
        self.course_repo.save(&course).await?;

        Ok(CourseResponse::from_course(course, true))
    }

    /// 강의를 공개합니다
    ///
    /// 최소 1개의 강의(lecture)와 상세 설명이 있어야 합니다.
    pub async fn publish_course(&self, viewer: &AuthenticatedUser, course_id: &str) -> Result<CourseResponse, AppError> {
        let mut course = self.course_repo
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::NotFound("강의를 찾을 수 없습니다".to_string()))?;

        Self::ensure_owner(&course, viewer)?;

        if course.is_published() {
            return Err(AppError::ConflictError("이미 공개된 강의입니다".to_string()));
        }

        if !course.can_publish() {
            return Err(AppError::ValidationError(
                "공개하려면 최소 1개의 강의와 상세 설명이 필요합니다".to_string(),
            ));
        }

        course.status = CourseStatus::Published;
        course.published_at = Some(mongodb::bson::DateTime::now());
        course.updated_at = mongodb::bson::DateTime::now();

        self.course_repo.save(&course).await?;

        log::info!("강의 공개: {}", course.slug);

        Ok(CourseResponse::from_course(course, true))
    }

    /// 강의를 보관 상태로 전환합니다 (신규 구매 차단)
    pub async fn archive_course(&self, viewer: &AuthenticatedUser, course_id: &str) -> Result<CourseResponse, AppError> {
        let mut course = self.course_repo
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::NotFound("강의를 찾을 수 없습니다".to_string()))?;

        Self::ensure_owner(&course, viewer)?;

        course.status = CourseStatus::Archived;
        course.updated_at = mongodb::bson::DateTime::now();

        self.course_repo.save(&course).await?;

        Ok(CourseResponse::from_course(course, true))
    }

    /// 강의를 삭제합니다
    ///
    /// 초안 상태에서만 허용됩니다. 공개 이력이 있는 강의는 수강생 보호를
    /// 위해 보관 처리해야 합니다.
    pub async fn delete_course(&self, viewer: &AuthenticatedUser, course_id: &str) -> Result<(), AppError> {
        let course = self.course_repo
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::NotFound("강의를 찾을 수 없습니다".to_string()))?;

        Self::ensure_owner(&course, viewer)?;

        if course.status != CourseStatus::Draft {
            return Err(AppError::ConflictError(
                "공개된 강의는 삭제할 수 없습니다. 보관 처리를 사용해주세요".to_string(),
            ));
        }

        self.course_repo.delete(course_id).await?;

        Ok(())
    }

    /// 공개 강의 목록을 필터/정렬/페이지네이션과 함께 조회합니다
    pub async fn list_courses(&self, query: CourseListQuery) -> Result<PaginatedResponse<CourseSummaryResponse>, AppError> {
        let filter = Self::build_list_filter(&query);
        let sort = Self::build_list_sort(query.sort.as_deref());

        let page_query = PageQuery { page: query.page, per_page: query.per_page };
        let total = self.course_repo.count_with_filter(filter.clone()).await?;
        let courses = self.course_repo
            .find_with_filter(filter, sort, page_query.skip(), page_query.per_page() as i64)
            .await?;

        let data = courses.into_iter().map(CourseSummaryResponse::from).collect();

        Ok(PaginatedResponse::new(data, total, page_query.page(), page_query.per_page()))
    }

    /// 강사 본인의 강의 목록을 조회합니다 (초안 포함)
    pub async fn my_courses(&self, instructor: &AuthenticatedUser) -> Result<Vec<CourseSummaryResponse>, AppError> {
        let instructor_id = ObjectId::parse_str(&instructor.user_id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 사용자 ID 형식입니다".to_string()))?;

        let courses = self.course_repo.find_by_instructor(&instructor_id).await?;

        Ok(courses.into_iter().map(CourseSummaryResponse::from).collect())
    }

    /// 목록 조회 필터 Document를 구성합니다
    fn build_list_filter(query: &CourseListQuery) -> Document {
        let mut filter = doc! { "status": "published" };

        if let Some(ref category) = query.category {
            filter.insert("category", category.as_str());
        }
        if let Some(ref level) = query.level {
            filter.insert("level", level.as_str());
        }
        if let Some(ref search) = query.search {
            if !search.trim().is_empty() {
                let pattern = regex_escape(search.trim());
                filter.insert("$or", vec![
                    doc! { "title": { "$regex": pattern.clone(), "$options": "i" } },
                    doc! { "subtitle": { "$regex": pattern, "$options": "i" } },
                ]);
            }
        }

        let mut price_filter = Document::new();
        if let Some(min) = query.min_price_cents {
            price_filter.insert("$gte", min);
        }
        if let Some(max) = query.max_price_cents {
            price_filter.insert("$lte", max);
        }
        if !price_filter.is_empty() {
            filter.insert("price_cents", price_filter);
        }

        filter
    }

    /// 목록 조회 정렬 Document를 구성합니다
    ///
    /// 평점 정렬은 비정규화된 합계 기준의 근사 정렬입니다.
    fn build_list_sort(sort: Option<&str>) -> Document {
        match sort {
            Some("popular") => doc! { "enrollment_count": -1 },
            Some("rating") => doc! { "rating_sum": -1 },
            Some("price_asc") => doc! { "price_cents": 1 },
            Some("price_desc") => doc! { "price_cents": -1 },
            _ => doc! { "published_at": -1 },
        }
    }
}

/// 정규식 메타 문자를 이스케이프합니다 (검색어 주입 방지)
fn regex_escape(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if "\\.+*?()|[]{}^$".contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regex_escape() {
        assert_eq!(regex_escape("c++"), "c\\+\\+");
        assert_eq!(regex_escape("rust"), "rust");
        assert_eq!(regex_escape("a.b(c)"), "a\\.b\\(c\\)");
    }

    #[test]
    fn test_build_list_filter_defaults_to_published() {
        let query = CourseListQuery {
            category: None,
            level: None,
            search: None,
            min_price_cents: None,
            max_price_cents: None,
            sort: None,
            page: None,
            per_page: None,
        };

        let filter = CourseService::build_list_filter(&query);
        assert_eq!(filter.get_str("status").unwrap(), "published");
        assert!(filter.get("$or").is_none());
    }

    #[test]
    fn test_build_list_filter_with_price_range() {
        let query = CourseListQuery {
            category: Some("programming".to_string()),
            level: None,
            search: None,
            min_price_cents: Some(10_000),
            max_price_cents: Some(50_000),
            sort: None,
            page: None,
            per_page: None,
        };

        let filter = CourseService::build_list_filter(&query);
        let price = filter.get_document("price_cents").unwrap();

        assert_eq!(price.get_i64("$gte").unwrap(), 10_000);
        assert_eq!(price.get_i64("$lte").unwrap(), 50_000);
        assert_eq!(filter.get_str("category").unwrap(), "programming");
    }

    #[test]
    fn test_build_list_sort_mapping() {
        assert_eq!(CourseService::build_list_sort(Some("popular")), doc! { "enrollment_count": -1 });
        assert_eq!(CourseService::build_list_sort(Some("price_asc")), doc! { "price_cents": 1 });
        assert_eq!(CourseService::build_list_sort(None), doc! { "published_at": -1 });
        assert_eq!(CourseService::build_list_sort(Some("unknown")), doc! { "published_at": -1 });
    }
}

//! # 위시리스트 서비스 구현
//!
//! 강의 찜하기/해제와 장바구니로 옮기기를 담당합니다.
//! 위시리스트는 가격 스냅샷 없이 강의 참조만 보관하므로,
//! 조회 시점의 최신 강의 정보(가격, 평점)를 반환합니다.

use std::sync::Arc;
use mongodb::bson::oid::ObjectId;
use singleton_macro::service;
use crate::{
    domain::{
        dto::carts::response::WishlistResponse,
        dto::courses::response::CourseSummaryResponse,
        entities::carts::cart::{CartItem, WishlistItem},
        models::auth::authenticated_user::AuthenticatedUser,
    },
    repositories::{
        carts::{cart_repo::CartRepository, wishlist_repo::WishlistRepository},
        courses::course_repo::CourseRepository,
        enrollments::enrollment_repo::EnrollmentRepository,
    },
    core::errors::AppError,
};

/// 위시리스트 비즈니스 로직 서비스
#[service(name = "wishlist")]
pub struct WishlistService {
    /// 위시리스트 리포지토리
    wishlist_repo: Arc<WishlistRepository>,

    /// 장바구니 리포지토리 (장바구니로 옮기기용)
    cart_repo: Arc<CartRepository>,

    /// 강의 리포지토리 (조회 시점 강의 정보)
    course_repo: Arc<CourseRepository>,

    /// 수강 등록 리포지토리 (장바구니로 옮기기 검증용)
    enrollment_repo: Arc<EnrollmentRepository>,
}

impl WishlistService {
    /// 내 위시리스트를 조회합니다
    ///
    /// 보관/삭제되어 더 이상 공개 상태가 아닌 강의는 목록에서 제외됩니다.
    pub async fn get_wishlist(&self, student: &AuthenticatedUser) -> Result<WishlistResponse, AppError> {
        let student_id = Self::parse_student_id(student)?;
        let wishlist = self.wishlist_repo.find_or_create(&student_id).await?;

        let mut courses = Vec::with_capacity(wishlist.items.len());
        for item in &wishlist.items {
            if let Some(course) = self.course_repo.find_by_id(&item.course_id.to_hex()).await? {
                if course.is_published() {
                    courses.push(CourseSummaryResponse::from(course));
                }
            }
        }

        Ok(WishlistResponse { courses })
    }

    /// 강의를 위시리스트에 추가합니다
    pub async fn add_item(&self, student: &AuthenticatedUser, course_id: &str) -> Result<WishlistResponse, AppError> {
        let student_id = Self::parse_student_id(student)?;

        let course = self.course_repo
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::NotFound("강의를 찾을 수 없습니다".to_string()))?;

        if !course.is_published() {
            return Err(AppError::NotFound("강의를 찾을 수 없습니다".to_string()));
        }

        if course.instructor_id == student_id {
            return Err(AppError::ConflictError("본인의 강의는 찜할 수 없습니다".to_string()));
        }

        let course_oid = course.id
            .ok_or_else(|| AppError::InternalError("강의 ID가 없습니다".to_string()))?;

        let mut wishlist = self.wishlist_repo.find_or_create(&student_id).await?;

        if wishlist.contains_course(&course_oid) {
            return Err(AppError::ConflictError("이미 찜한 강의입니다".to_string()));
        }

        wishlist.items.push(WishlistItem::new(course_oid));
        wishlist.updated_at = mongodb::bson::DateTime::now();

        self.wishlist_repo.save(&wishlist).await?;

        self.get_wishlist(student).await
    }

    /// 위시리스트에서 강의를 제거합니다
    pub async fn remove_item(&self, student: &AuthenticatedUser, course_id: &str) -> Result<WishlistResponse, AppError> {
        let student_id = Self::parse_student_id(student)?;
        let course_oid = ObjectId::parse_str(course_id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 강의 ID 형식입니다".to_string()))?;

        let mut wishlist = self.wishlist_repo.find_or_create(&student_id).await?;

        let before = wishlist.items.len();
        wishlist.items.retain(|i| i.course_id != course_oid);

        if wishlist.items.len() == before {
            return Err(AppError::NotFound("위시리스트에 없는 강의입니다".to_string()));
        }

        wishlist.updated_at = mongodb::bson::DateTime::now();
        self.wishlist_repo.save(&wishlist).await?;

        self.get_wishlist(student).await
    }

    /// 찜한 강의를 장바구니로 옮깁니다
    ///
    /// 장바구니 담기와 동일한 검증(공개 상태, 수강 여부, 중복)을
    /// 거치며, 성공 시 위시리스트에서 제거됩니다.
    pub async fn move_to_cart(&self, student: &AuthenticatedUser, course_id: &str) -> Result<WishlistResponse, AppError> {
        let student_id = Self::parse_student_id(student)?;
        let course_oid = ObjectId::parse_str(course_id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 강의 ID 형식입니다".to_string()))?;

        let mut wishlist = self.wishlist_repo.find_or_create(&student_id).await?;

        if !wishlist.contains_course(&course_oid) {
            return Err(AppError::NotFound("위시리스트에 없는 강의입니다".to_string()));
        }

        let course = self.course_repo
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::NotFound("강의를 찾을 수 없습니다".to_string()))?;

        if !course.is_published() {
            return Err(AppError::ConflictError("판매 중이 아닌 강의입니다".to_string()));
        }

        if course.is_free() {
            return Err(AppError::ValidationError(
                "무료 강의는 결제 없이 바로 등록할 수 있습니다".to_string(),
            ));
        }

        if self.enrollment_repo
            .find_by_student_and_course(&student_id, &course_oid)
            .await?
            .is_some()
        {
            return Err(AppError::ConflictError("이미 수강 중인 강의입니다".to_string()));
        }

        let mut cart = self.cart_repo.find_or_create(&student_id).await?;

        if !cart.contains_course(&course_oid) {
            cart.items.push(CartItem::new(
                course_oid,
                course.title.clone(),
                course.price_cents,
                course.currency.clone(),
            ));
            cart.updated_at = mongodb::bson::DateTime::now();
            self.cart_repo.save(&cart).await?;
        }

        // 장바구니 이동 성공 후 위시리스트에서 제거
        wishlist.items.retain(|i| i.course_id != course_oid);
        wishlist.updated_at = mongodb::bson::DateTime::now();
        self.wishlist_repo.save(&wishlist).await?;

        self.get_wishlist(student).await
    }

    fn parse_student_id(student: &AuthenticatedUser) -> Result<ObjectId, AppError> {
        ObjectId::parse_str(&student.user_id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 사용자 ID 형식입니다".to_string()))
    }
}

//! # 장바구니 서비스 구현
//!
//! 장바구니 담기/제거/비우기와 서버 측 총액 계산을 담당합니다.
//! 장바구니 항목은 담는 시점의 제목/가격 스냅샷을 보관하지만,
//! 실제 청구 금액은 체크아웃 시점에 다시 검증됩니다.

use std::sync::Arc;
use mongodb::bson::oid::ObjectId;
use singleton_macro::service;
use crate::{
    domain::{
        dto::carts::response::CartResponse,
        entities::carts::cart::CartItem,
        models::auth::authenticated_user::AuthenticatedUser,
    },
    repositories::{
        carts::cart_repo::CartRepository,
        courses::course_repo::CourseRepository,
        enrollments::enrollment_repo::EnrollmentRepository,
    },
    core::errors::AppError,
};

/// 장바구니 비즈니스 로직 서비스
#[service(name = "cart")]
pub struct CartService {
    /// 장바구니 리포지토리
    cart_repo: Arc<CartRepository>,

    /// 강의 리포지토리 (담기 검증용)
    course_repo: Arc<CourseRepository>,

    /// 수강 등록 리포지토리 (이미 수강 중인 강의 차단용)
    enrollment_repo: Arc<EnrollmentRepository>,
}

impl CartService {
    /// 내 장바구니를 조회합니다 (없으면 빈 장바구니 생성)
    pub async fn get_cart(&self, student: &AuthenticatedUser) -> Result<CartResponse, AppError> {
        let student_id = Self::parse_student_id(student)?;
        let cart = self.cart_repo.find_or_create(&student_id).await?;

        Ok(CartResponse::from(cart))
    }

    /// 강의를 장바구니에 담습니다
    ///
    /// # 비즈니스 규칙
    ///
    /// - 공개(published) 강의만 담을 수 있음
    /// - 본인이 만든 강의는 담을 수 없음
    /// - 이미 수강 중인 강의는 담을 수 없음
    /// - 중복 담기 거부
    /// - 무료 강의는 결제 대상이 아니므로 거부 (바로 등록 안내)
    pub async fn add_item(&self, student: &AuthenticatedUser, course_id: &str) -> Result<CartResponse, AppError> {
        let student_id = Self::parse_student_id(student)?;

        let course = self.course_repo
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::NotFound("강의를 찾을 수 없습니다".to_string()))?;

        if !course.is_published() {
            return Err(AppError::NotFound("강의를 찾을 수 없습니다".to_string()));
        }

        if course.instructor_id == student_id {
            return Err(AppError::ConflictError("본인의 강의는 담을 수 없습니다".to_string()));
        }

        if course.is_free() {
            return Err(AppError::ValidationError(
                "무료 강의는 결제 없이 바로 등록할 수 있습니다".to_string(),
            ));
        }

        let course_oid = course.id
            .ok_or_else(|| AppError::InternalError("강의 ID가 없습니다".to_string()))?;

        if self.enrollment_repo
            .find_by_student_and_course(&student_id, &course_oid)
            .await?
            .is_some()
        {
            return Err(AppError::ConflictError("이미 수강 중인 강의입니다".to_string()));
        }

        let mut cart = self.cart_repo.find_or_create(&student_id).await?;

        if cart.contains_course(&course_oid) {
            return Err(AppError::ConflictError("이미 장바구니에 담긴 강의입니다".to_string()));
        }

        cart.items.push(CartItem::new(
            course_oid,
            course.title.clone(),
            course.price_cents,
            course.currency.clone(),
        ));
        cart.updated_at = mongodb::bson::DateTime::now();

        self.cart_repo.save(&cart).await?;

        Ok(CartResponse::from(cart))
    }

    /// 장바구니에서 강의를 제거합니다
    pub async fn remove_item(&self, student: &AuthenticatedUser, course_id: &str) -> Result<CartResponse, AppError> {
        let student_id = Self::parse_student_id(student)?;
        let course_oid = ObjectId::parse_str(course_id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 강의 ID 형식입니다".to_string()))?;

        let mut cart = self.cart_repo.find_or_create(&student_id).await?;

        let before = cart.items.len();
        cart.items.retain(|i| i.course_id != course_oid);

        if cart.items.len() == before {
            return Err(AppError::NotFound("장바구니에 없는 강의입니다".to_string()));
        }

        cart.updated_at = mongodb::bson::DateTime::now();
        self.cart_repo.save(&cart).await?;

        Ok(CartResponse::from(cart))
    }

    /// 장바구니를 비웁니다
    pub async fn clear(&self, student: &AuthenticatedUser) -> Result<CartResponse, AppError> {
        let student_id = Self::parse_student_id(student)?;
        let mut cart = self.cart_repo.find_or_create(&student_id).await?;

        cart.items.clear();
        cart.updated_at = mongodb::bson::DateTime::now();
        self.cart_repo.save(&cart).await?;

        Ok(CartResponse::from(cart))
    }

    fn parse_student_id(student: &AuthenticatedUser) -> Result<ObjectId, AppError> {
        ObjectId::parse_str(&student.user_id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 사용자 ID 형식입니다".to_string()))
    }
}

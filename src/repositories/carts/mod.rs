//! 장바구니/위시리스트 리포지토리 모듈

pub mod cart_repo;
pub mod wishlist_repo;

pub use cart_repo::*;
pub use wishlist_repo::*;

//! 장바구니/위시리스트 서비스 모듈

pub mod cart_service;
pub mod wishlist_service;

pub use cart_service::*;
pub use wishlist_service::*;

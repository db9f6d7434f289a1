//! 장바구니/위시리스트 엔티티 모듈

pub mod cart;

pub use cart::*;

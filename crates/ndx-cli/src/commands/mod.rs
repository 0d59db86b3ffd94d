pub mod inspect;
pub mod make;

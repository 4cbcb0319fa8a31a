pub mod auth_dto;
pub mod category_dto;
pub mod pagination;
pub mod product_dto;
pub mod user_dto;

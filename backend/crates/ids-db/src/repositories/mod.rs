pub mod delivery_repository;
pub mod user_repository;

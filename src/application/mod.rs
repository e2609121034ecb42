pub mod error;
pub mod repository;

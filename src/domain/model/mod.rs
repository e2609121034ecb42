pub mod book;
pub mod entity;
pub mod response;

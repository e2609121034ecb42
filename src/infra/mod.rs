pub mod google_books;
pub mod sqlite_store;

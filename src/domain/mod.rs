pub mod accounts;
pub mod books;
pub mod errors;
pub mod ids;
pub mod reading_lists;
pub mod repositories;

// Re-exports
pub use errors::ApiError;

pub mod error;
pub mod filters;
pub mod pagination;
pub mod search;
pub mod types;

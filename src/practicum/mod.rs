pub mod client;
pub mod error;
pub mod types;
pub mod validate;
pub mod verdict;

pub use client::{API_URL, HomeworkSource, PracticumClient};
pub use error::{ApiError, HomeworkError, SchemaError};
pub use types::Homework;
pub use validate::validate_response;
pub use verdict::{format_homework, format_verdict};

//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod message;
pub mod pagination;

pub use validation::ValidationError;
pub use message::{Message, MessageContent, Username};
pub use pagination::{Page, PageParams, PageRequest, PageResponse, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

//! Application services - Use case implementations
//!
//! Page assembly is the only use case: each service method turns a request
//! for a page into a view-model, reading content through the repositories.

pub mod guide_body;
pub mod page_service;

pub use page_service::{PageError, PageService, PageServiceImpl, PageSettings};

pub mod document;
pub mod filters;

pub use document::Document;
pub use filters::FilterCriteria;

pub mod catalog;
pub mod contact;
pub mod filter;
pub mod search;

pub use crate::domain::model::{CaseStudy, ContactRequest, ContactResponse, Lead, SearchHit};
pub use crate::domain::ports::LeadSink;
pub use crate::utils::error::Result;

pub mod error;
pub mod result;
pub mod safe_get;
pub mod security;

pub use result::Result;

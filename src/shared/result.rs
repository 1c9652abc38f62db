/// Type alias for Result with anyhow::Error as the error type.
/// Used by every fallible operation in the crate; normalizers never return it.
pub type Result<T> = std::result::Result<T, anyhow::Error>;

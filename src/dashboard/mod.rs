//! Dashboard domain: fixture vocabulary, severity and risk models, and the
//! pure services that derive counts and filters from raw fixtures.

pub mod domain;
pub mod policies;
pub mod services;

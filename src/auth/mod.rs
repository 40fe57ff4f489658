//! Credential handling: password hashing and student login generation.
//!
//! There is no session or token authentication in this service (callers are
//! trusted, per the deployment model); this module only covers the secrets
//! created during student onboarding and the admin bootstrap.

pub mod credentials;
pub mod password;

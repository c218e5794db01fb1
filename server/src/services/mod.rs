//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own persistence concerns so route handlers can stay
//! focused on request validation and status mapping.

pub mod drawing;

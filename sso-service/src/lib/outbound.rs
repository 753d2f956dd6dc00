pub mod repositories;
pub mod revocation;

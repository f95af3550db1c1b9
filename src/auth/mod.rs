//! Authentication: password hashing, bearer-token issuance, request extraction.

pub mod middleware;
pub mod password;
pub mod token;

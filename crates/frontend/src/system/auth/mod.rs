//! Request credentials
//!
//! Sessions themselves are managed elsewhere; this module only reads the
//! stored access token and the embed api key and attaches them to requests.

pub mod credentials;
pub mod storage;

pub use credentials::ApiCredentials;

//! Network access for UpScale
//!
//! - `http`: the transport trait and its reqwest implementation
//! - `client`: typed calls to the UpScale backend endpoints
//! - `identity`: email/password accounts with the identity provider
//! - `credentials`: zeroizing password storage

pub mod client;
pub mod credentials;
pub mod http;
pub mod identity;

pub use client::{BackendClient, COMPANY_PAGE_SIZE};
pub use credentials::{Credentials, SecureString};
pub use http::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};
pub use identity::{FirebaseIdentity, IdentityProvider};

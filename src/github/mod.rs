//! GitHub gists integration module
//!
//! This module provides all gist-related functionality:
//! - Request/response bodies and payload builders
//! - The HTTP transport seam
//! - The gist API client
//! - Error classification

pub mod error_handler;
pub mod gist;
pub mod payload;
pub mod transport;

pub use error_handler::classify_status;
pub use gist::GistClient;
pub use payload::{
    build_from_content, build_from_file, build_gist_from_files, Gist, GistFile, GistResponse,
    Payload,
};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Transport};

//! Hurl Language Server
//!
//! LSP server for Hurl files, providing:
//! - Completions (methods, response sections, captured variables, filters,
//!   API paths)
//! - Signature help (filters, documented API operations)
//!
//! API documentation comes from an OpenAPI definition named in
//! `.hurl-ls.json`.

pub mod completion;
pub mod config;
pub mod filters;
pub mod openapi;
mod server;
pub mod signature_help;
pub mod source;

pub use server::{HurlLanguageServer, run};

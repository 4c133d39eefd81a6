//! Request middleware: JWT authentication extractor.

pub mod auth;

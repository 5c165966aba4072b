pub mod client;
pub mod column;
pub mod config;
pub mod controller;
pub mod draft;
pub mod error;
pub mod logging;
pub mod notify;
pub mod registry;
pub mod render;
pub mod schema;
pub mod service;
pub mod shell;

// Re-export commonly used types for tests and consumers
pub use client::*;
pub use column::*;
pub use config::*;
pub use controller::*;
pub use draft::*;
pub use error::{SchemaError, ServiceError, ValidationError};
pub use notify::*;
pub use registry::*;
pub use schema::*;
pub use service::*;

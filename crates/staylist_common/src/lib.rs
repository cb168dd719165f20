// --- File: crates/staylist_common/src/lib.rs ---

// Declare modules within this crate
pub mod models;    // Listing records and store payloads
pub mod error;     // Error handling
pub mod http;      // HTTP utilities
pub mod services;  // Store abstractions
pub mod logging;   // Logging utilities

// Re-export error types and utilities for easier access
pub use error::{
    StaylistError,
    StoreError,
    HttpStatusCode,
    Context,
};

// Re-export HTTP utilities for easier access
pub use http::{
    IntoHttpResponse,
    client::create_client,
};

// Re-export logging utilities for easier access
pub use logging::{
    init,
    init_with_level,
    log_result,
};

pub use models::{
    BlockedDaysUpdate, DataSource, ListingFilter, ListingId, ListingPage, ListingRecord,
};
pub use services::{BoxFuture, ListingStore};

//! Request ID generation for span correlation.
//!
//! IDs only appear in spans and logs; they are never sent to the provider or
//! added to the relayed response.

use uuid::Uuid;

/// Generate a new request ID (UUID v4).
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

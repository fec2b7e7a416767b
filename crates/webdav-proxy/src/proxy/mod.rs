//! WebDAV relay: target resolution and upstream forwarding.

pub mod correlation;
pub mod forward;
pub mod target;

//! Request and response types for SNS operations.

pub mod requests;
pub mod responses;

pub use requests::*;
pub use responses::*;

//! Request body types used by API handlers.

mod requests;

pub use requests::*;

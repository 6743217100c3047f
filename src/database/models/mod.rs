mod macros;

pub mod payment;
pub mod payment_method;
pub mod schedule;
pub mod worker;

// Re-export all models for easy importing
pub use payment::*;
pub use payment_method::*;
pub use schedule::*;
pub use worker::*;

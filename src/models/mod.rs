//! Data models for RentalHub

pub mod admin;
pub mod inquiry;
pub mod product;

// Re-export commonly used types
pub use admin::{Admin, AdminInfo, AuthContext};
pub use inquiry::{Inquiry, InquiryStatus, InquiryWithProduct};
pub use product::{Product, ProductCategory};

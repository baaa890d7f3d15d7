//! PCS colour types
//!
//! Only what the profile connection space needs: D50-referenced XYZ, CIELAB
//! and the reference white they share.

pub mod lab;
pub mod white_point;
pub mod xyz;

pub use lab::Lab;
pub use white_point::{D50, WhitePoint};
pub use xyz::Xyz;

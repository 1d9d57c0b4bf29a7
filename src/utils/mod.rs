pub mod lenient;
pub mod phone;
pub mod session;

mod address;
mod auth;
mod blog;
mod coupon;
mod products;
mod user;

pub use address::*;
pub use auth::*;
pub use blog::*;
pub use coupon::*;
pub use products::*;
pub use user::*;

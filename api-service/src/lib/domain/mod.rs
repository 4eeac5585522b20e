pub mod gw2;
pub mod session;
pub mod user;

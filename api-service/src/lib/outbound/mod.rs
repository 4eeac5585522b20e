pub mod gw2;
pub mod repositories;

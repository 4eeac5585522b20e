pub mod client;

pub use client::ReqwestGw2Client;

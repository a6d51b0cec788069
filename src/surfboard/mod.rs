pub mod client;
pub mod html;
pub mod types;

pub use client::ModemClient;

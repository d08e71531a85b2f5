pub mod client;

pub use client::NluClient;

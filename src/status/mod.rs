mod client;

pub use client::StatusClient;

//! HTTP transport shared by the token manager and the request pipeline

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};

//! Native client for in-process callers

mod client;

pub use client::NativeClient;

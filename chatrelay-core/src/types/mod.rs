//! Core types used throughout the chatrelay client

pub mod message;
pub mod request;
pub mod response;

/// An opaque client/session identifier
pub type ClientId = String;

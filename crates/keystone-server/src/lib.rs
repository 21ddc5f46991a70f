//! REST API server: auth routes, bearer and cookie gates, DTOs, and OpenAPI documentation.

pub mod auth;
pub mod config;
pub mod docs;
pub mod dto;
pub mod error;
pub mod extract;
pub mod openapi;
pub mod routes;
pub mod session;
pub mod state;

//! HTTP API: bearer-token interceptor, authorization gate, auth routes.

pub mod app;
pub mod authz;
pub mod context;
pub mod middleware;

pub mod auth;
pub mod policy;
pub mod response;
pub mod routes;

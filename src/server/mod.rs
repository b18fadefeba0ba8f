pub mod app;
pub mod deserializers;
pub mod error;
pub mod pagination;
pub mod routes;

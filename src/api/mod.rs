/*
 * Responsibility
 * - HTTP surface: routes, handlers, request DTOs, extractors, response rendering
 */
pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod response;
mod routes;

pub use routes::routes;

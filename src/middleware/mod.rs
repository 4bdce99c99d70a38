/*
 * Responsibility
 * - Public interface of the middleware layer
 * - auth: Bearer → Principal / cors: preflight + header sets / http: request id, trace, limits
 */
pub mod auth;
pub mod cors;
pub mod http;

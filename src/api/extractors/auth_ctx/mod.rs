/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - Hand the authenticated caller (Principal) to handlers
 * - The middleware verifies; this only picks the result out of request extensions
 */

mod core;

pub use self::core::AuthCtx;

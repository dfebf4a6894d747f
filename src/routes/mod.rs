/**
 * Route Wiring
 */

pub mod comment_routes;
pub mod komik_routes;
pub mod router;

pub use router::create_router;

/*
* Fasum (public facility) table endpoints and routes module.
*/

pub mod handler;
pub mod routes;

pub use routes::fasum_routes;

/*
* Re-export submodules for server setup and logging.
*/

pub mod logging;
pub mod server;

// Application layer: HTTP routing, shared state and the server lifecycle.

pub mod routes;
pub mod server;
pub mod state;

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Standalone entry point for the heat retrofit API server.
//!
//! Configuration comes from `BIND_ADDR`, `PORT`, and `RUST_LOG`.

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    heat_retrofit_server::run_server().await
}

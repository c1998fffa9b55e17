//! # Burrow Pool
//!
//! > **A pool of burrows, one Tokio actor each.**
//!
//! Every burrow ages on its own timer and is only ever touched by its own actor.
//! The pool manager admits burrows, aggregates their status and rents them out
//! with a two-phase offer/assign handshake, all through message passing.
//!
//! ## Architecture Notes
//!
//! ### 1. One Owner per Burrow
//! A [`BurrowActor`](burrow_actor::BurrowActor) owns its [`Burrow`](model::Burrow)
//! and processes its inbox sequentially. Snapshots are clones; there are no locks
//! around burrow state.
//!
//! ### 2. First Offer Wins
//! Rentout broadcasts `Available` to every actor. Offers go to a channel of
//! capacity one through `try_send`, so exactly one actor ends up negotiating and
//! the others never block. See [`framework::message`].
//!
//! ### 3. Typed Errors
//! [`RentError`](framework::RentError) and [`PoolError`](framework::PoolError) are
//! plain values. A lapsed offer leaves the burrow available, so every timing
//! failure can be retried.
//!
//! ### 4. Observability
//! `tracing` everywhere with the burrow `name` as a structured field.
//! See the [`lifecycle::tracing`] module for details.
//!
//! ## Module Tour
//!
//! - [`model`] - `Burrow` and `Report`, plain data
//! - [`framework`] - protocol messages, config, errors and [`framework::mock`]
//! - [`burrow_actor`] - the per-burrow actor and its handle
//! - [`pool_manager`] - registry, broadcasts, rentout and the shutdown dump
//! - [`clients`] - the [`BurrowPool`](clients::BurrowPool) capability trait
//! - [`lifecycle`] - startup, bootstrap, reports, shutdown and tracing
//! - [`http`] - the axum router
//!
//! ### Running the Server
//!
//! ```bash
//! RUST_LOG=info cargo run -- serve --path data/initial.json
//! ```

pub mod burrow_actor;
pub mod clients;
pub mod framework;
pub mod http;
pub mod lifecycle;
pub mod model;
pub mod pool_manager;

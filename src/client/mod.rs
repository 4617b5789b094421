//! Client surface: one callback-style core trait and two consumption
//! adapters layered on top of it.
//!
//! [`CallbackApi`] is the transport-facing shape — every operation starts
//! work and delivers through a handle. [`AsyncApi`] and [`BroadcastApi`] are
//! blanket extensions that wrap those handles in the bridge primitives, so
//! any `CallbackApi` implementation (including test doubles) gets the
//! async/await and hot-broadcast surfaces for free. [`OpenAiClient`] is the
//! shipped implementation over HTTP.

mod api;
mod async_api;
mod broadcast_api;
mod http;

pub use api::CallbackApi;
pub use async_api::AsyncApi;
pub use broadcast_api::BroadcastApi;
pub use http::OpenAiClient;

//! Cliente del backend ERP Megui.
//!
//! Envoltorios CRUD tipados con JWT, normalizacion de llaves foraneas
//! numericas, recalculo en cascada de calas y generacion/subida del PDF de
//! cotizaciones de ventas.

pub mod api;
pub mod auth;
pub mod cascada;
pub mod client;
pub mod config;
pub mod cotizacion;
pub mod error;
pub mod models;
pub mod utils;
pub mod validacion;

pub use api::CrudApi;
pub use auth::AuthStore;
pub use client::ApiClient;
pub use config::Config;
pub use error::ApiError;

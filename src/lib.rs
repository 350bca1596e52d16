//! Sollit Lead Intake API Library
//!
//! This library provides the core functionality for the Sollit lead intake
//! API: parsing Webflow form submissions, normalizing them into the Sollit
//! person payload, and forwarding them to the Sollit CRM.
//!
//! # Modules
//!
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `handlers`: Application state, health endpoint, and router assembly.
//! - `lead_handler`: Lead intake HTTP handler.
//! - `lead_models`: Raw form input and Sollit payload models.
//! - `sollit_client`: Sollit API client.
//! - `transform`: Lead normalization logic.

pub mod config;
pub mod errors;
pub mod handlers;
pub mod lead_handler;
pub mod lead_models;
pub mod sollit_client;
pub mod transform;

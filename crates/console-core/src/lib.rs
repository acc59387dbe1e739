//! Headless core of the administration console: the REST client, its
//! configuration and the view models the Leptos pages render.

pub mod client;
pub mod config;
pub mod delete_modal;
pub mod editor;
pub mod envelope;
pub mod error;
pub mod list;
pub mod page;
pub mod roles;
pub mod transport;

#[cfg(test)]
mod testing;

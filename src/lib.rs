//! Objects My Friends - browser page controllers
//!
//! Controllers of the auction site pages: pictures pane layout, picture
//! upload with local preview, image listings, search filters and the item
//! card carousel. They run in the browser as WebAssembly and natively
//! against an in-memory DOM for tests and headless previews.

pub mod carousel;
pub mod config;
pub mod constants;
pub mod dom;
pub mod error;
pub mod layout;
pub mod loader;
pub mod pages;
pub mod search_filter;
pub mod service;
pub mod uploader;

#[cfg(not(target_arch = "wasm32"))]
pub mod preview;

pub use config::PageConfig;
pub use error::PageError;
pub use pages::{ItemBidPage, ItemSellPage, PageKind, WelcomePage};

// WASM entry points
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;

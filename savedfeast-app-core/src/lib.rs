//! Shared application core for SavedFeast clients.
//!
//! Sits between the host UI (mobile or web screens, out of scope here)
//! and [`savedfeast_lib`]: the in-memory cart, the pickup countdown, and
//! the wiring that assembles the SDK services from injected dependencies.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use savedfeast_app_core::{AppCore, cart::CartProduct};
//! use savedfeast_lib::prelude::*;
//!
//! let mut core = AppCore::new(
//!     ApiConfig::production(),
//!     Arc::new(FileCredentialStore::new(data_dir)?),
//! )?;
//!
//! core.cart_mut().add(CartProduct::from(&meal));
//! let order = core.checkout(None, Some("card".into())).await?;
//! ```

pub mod cart;
pub mod countdown;
pub mod session;

pub use cart::{Cart, CartItem, CartProduct};
pub use countdown::{Countdown, CountdownSeverity, CountdownState, CountdownTicker};
pub use session::{AppCore, AppError};

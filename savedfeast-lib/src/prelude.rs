//! Prelude module for convenient imports.
//!
//! Import everything with:
//!
//! ```rust,ignore
//! use savedfeast_lib::prelude::*;
//! ```

// Core types
pub use crate::{MealId, OrderId, Paginated, Result};

// Error handling
pub use crate::errors::{SavedFeastError, SavedFeastErrorCode};

// Configuration and client
pub use crate::client::ApiClient;
pub use crate::config::{ApiConfig, RetryConfig};
pub use crate::retry::RetryPolicy;

// Session and storage
pub use crate::auth::{
    AuthResponse, AuthSession, LoginCredentials, PasswordChange, ProfileUpdate, RegisterData, User,
};
pub use crate::secure_storage::{
    CredentialStore, FileCredentialStore, MemoryCredentialStore, SessionVault, StorageError,
    StorageErrorCode,
};

// Orders
pub use crate::orders::{
    ClaimCode, CreateOrderRequest, Order, OrderItem, OrderItemInput, OrderStatus, OrdersApi,
};

// Meals
pub use crate::meals::{Meal, MealFilters, MealQuery, MealsApi};

//! Prelude for convenient imports.
//!
//! ```rust
//! use dental_router::prelude::*;
//! ```

pub use crate::{
    url_to_view, view_to_url, CheckoutOutcome, ContentPage, HistoryBackend, MemoryHistory,
    Navigator, Subscription, View,
};

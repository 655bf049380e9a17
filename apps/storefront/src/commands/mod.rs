//! # Commands Module
//!
//! The invoke surface a renderer calls. Each command takes only the state
//! it needs and returns a serializable response or an [`ApiError`].
//!
//! [`ApiError`]: crate::error::ApiError
//!
//! ## Command Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Categories                                   │
//! │                                                                         │
//! │  ┌─────────────────────────┐  ┌─────────────────────────────────────┐  │
//! │  │   Product (product.rs)  │  │        Cart (cart.rs)               │  │
//! │  │                         │  │                                     │  │
//! │  │  • list_products        │  │  • get_cart        • clear_cart     │  │
//! │  │  • list_collections     │  │  • add_to_cart     • open_cart      │  │
//! │  │  • get_product          │  │  • update_cart_item• close_cart     │  │
//! │  │                         │  │  • remove_from_cart                 │  │
//! │  └─────────────────────────┘  └─────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
pub mod product;

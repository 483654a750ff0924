//! Umbrella crate for the workspace demos; re-exports [`vnet_core`].

pub use vnet_core::*;

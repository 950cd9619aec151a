//! Prelude module for `palswap_internal`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```rust
//! use palswap_internal::prelude::*;
//!
//! // Now you can use all common types directly
//! let mut registry = PaletteRegistry::new();
//! let animator = PaletteAnimator::new();
//! let surface = IndexSurface::filled(4, 4, Texel::opaque(2));
//! assert!(registry.is_empty() && animator.is_empty());
//! assert_eq!(surface.max_opaque_index(), Some(2));
//! ```

// Re-export everything from palswap_types::prelude
#[doc(inline)]
pub use palswap_types::prelude::*;

// Re-export the entire palswap_types module for advanced usage
#[doc(inline)]
pub use palswap_types;

//! Prelude module for `palswap_types`.
//!
//! This module provides a convenient way to import commonly used types, traits, and constants.
//!
//! # Examples
//!
//! ```
//! use palswap_types::prelude::*;
//!
//! let registry = PaletteRegistry::new();
//! let resolver = Resolver::default();
//! assert!(registry.is_empty());
//! assert_eq!(resolver.alpha_threshold(), DEFAULT_ALPHA_THRESHOLD);
//! ```

// Animation
#[doc(inline)]
pub use crate::animate::{
	CycleMode, CycleRange, Effect, EffectId, EffectKind, EffectState, PaletteAnimator, PaletteLerp,
};

// Colors and tables
#[doc(inline)]
pub use crate::color::Color;
#[doc(inline)]
pub use crate::table::PaletteTable;

// Drawing
#[doc(inline)]
pub use crate::draw::{Canvas, DestTransform, DrawOrchestrator, DrawStats, draw_palette_sprite};

// Errors
#[doc(inline)]
pub use crate::error::{ManifestError, PaletteError};

// Manifests
#[doc(inline)]
pub use crate::manifest::PaletteManifest;

// Registry
#[doc(inline)]
pub use crate::registry::{PaletteRegistry, RowAllocator};

// Resolution
#[doc(inline)]
pub use crate::resolve::{DEFAULT_ALPHA_THRESHOLD, PaletteSampler, Resolver};

// Surfaces
#[doc(inline)]
pub use crate::surface::{IndexReport, IndexSurface, Texel};

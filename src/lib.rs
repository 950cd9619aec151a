#![allow(clippy::single_component_path_imports)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `palswap` renders indexed sprites through swappable, animatable palette tables.
//!
//! A sprite stores palette indices instead of colors; the color comes from a row of a
//! shared palette table chosen at draw time. Recoloring a sprite is a row change,
//! and animating a row (color cycling, day/night blends) recolors every sprite using it.
//!
pub use palswap_internal::*;

#[cfg(all(feature = "dynamic_linking", not(target_family = "wasm")))]
#[allow(unused_imports)]
use palswap_dylib;

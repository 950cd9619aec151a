//! Forces `palswap_internal` into a dynamic library when the `dynamic_linking` feature is enabled.

#![allow(unused_imports)]
use palswap_internal;

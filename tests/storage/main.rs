//! Integration tests for Layer 1: Storage
//!
//! Tests for the identity cache, warp resources, and the cache service.

mod warp;

//! Test Support

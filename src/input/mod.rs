//! Query-string classification and batch input validation.
//!
//! - [`classifier`] — decides whether a string is an ASN, an IPv4/IPv6 address or
//!   subnet, or invalid; also the stricter subnet-only check used by batch mode.
//! - [`validate`] — splits batch text into accepted subnets and line-numbered errors.

pub mod classifier;
pub mod validate;

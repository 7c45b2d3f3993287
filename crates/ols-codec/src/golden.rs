//! Golden scenario tests for the end-to-end codec.
//!
//! These pin the concrete write/read numbers for reference configurations
//! and exercise the documented noise and corruption behaviors.

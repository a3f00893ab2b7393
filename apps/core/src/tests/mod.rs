//! Test Module
//!
//! ## Test Categories
//! - `router_tests`: intent precedence and capability dispatch
//! - `api_tests`: HTTP contract of `/health` and `/ask`
//! - `config_tests`: environment parsing and validation

mod support;

//! Unit tests for the token service module

mod service_tests;

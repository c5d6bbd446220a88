//! Integration tests for the parameter system
//!
//! These tests verify that parameters and registries behave correctly in various scenarios.


// Tests for the ParamRegistry collection
mod registry_tests;

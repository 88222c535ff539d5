//! Reusable conformance checks shared by the test suites.

pub mod estimator_contract;

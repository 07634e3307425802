//! IDE layer tests

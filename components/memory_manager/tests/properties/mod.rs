//! Randomized property tests for the copying collector

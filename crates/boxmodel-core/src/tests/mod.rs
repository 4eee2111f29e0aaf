//! Test module for boxmodel-core
//!
//! This module contains tests for:
//! - Presentation machine transitions, effects and region invariants
//! - Query lifecycle: generations, stale signal filtering, trimming
//! - Launcher scenarios: typing, debounce, fallbacks, actions, activation
//! - Key handling: completion, history navigation, Ctrl remaps, routing
//! - The tokio query engine
//! - Configuration loading

mod controller_tests;
mod fixtures;
mod machine_tests;

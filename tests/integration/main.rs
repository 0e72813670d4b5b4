//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises the radio service
//! against mock adapters.  All tests run on the host (x86_64) with no
//! real radio required.

mod mock_hw;
mod service_tests;

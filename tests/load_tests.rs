//! Load Test Runner
//!
//! Makes the load tests discoverable by cargo test.
//!
//! To run the slow ones:
//! ```bash
//! cargo test --release --test load_tests -- --ignored --test-threads=1
//! ```

mod load;

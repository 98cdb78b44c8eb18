//! Warden Testing Infrastructure
//!
//! Shared fixtures for Warden tests: deterministic ed25519 keys, a block
//! clock tests can move, a mock host implementing every account effect, and
//! ready-made deployed accounts.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
//!
//! # Usage
//!
//! Add this to your crate's `Cargo.toml` dev-dependencies:
//! ```toml
//! [dev-dependencies]
//! warden-testkit = { path = "../warden-testkit" }
//! ```
//!
//! Then in your tests:
//! ```rust,no_run
//! use warden_testkit::*;
//!
//! #[test]
//! fn my_test() {
//!     let mut fixture = AccountFixture::deploy_account();
//!     fixture.sign_with(&[&fixture.owner]);
//!     fixture.account.reset_guardians(None).unwrap();
//! }
//! ```

pub mod fixtures;
pub mod host;
pub mod keys;
pub mod time;

pub use fixtures::AccountFixture;
pub use host::MockHost;
pub use keys::{KeySetBuilder, KeyTestFixture};
pub use time::ControllableClock;

use once_cell::sync::Lazy;
use tracing_subscriber::EnvFilter;

static TRACING: Lazy<()> = Lazy::new(|| {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
});

/// Install a test log subscriber once per process
///
/// Honors `RUST_LOG`; defaults to `warn`.
pub fn init_test_tracing() {
    Lazy::force(&TRACING);
}

//! Shared helpers for integration tests.

#![allow(dead_code)]

use card_table::host::GameController;
use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Install a test subscriber once. The level comes from `TEST_LOG`, then
/// `RUST_LOG`, and defaults to `warn`.
pub fn init_logging() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// Long enough for any single move or think on the default table.
pub const LONG_TICK_MS: f64 = 60_000.0;

/// Tick `times` times with [`LONG_TICK_MS`].
pub fn run<G: GameController>(game: &mut G, times: usize) {
    for _ in 0..times {
        game.on_tick(LONG_TICK_MS);
    }
}

/// Tick until `done` holds or `limit` ticks pass. Returns whether it held.
pub fn run_until<G: GameController>(game: &mut G, limit: usize, mut done: impl FnMut(&G) -> bool) -> bool {
    for _ in 0..limit {
        if done(game) {
            return true;
        }
        game.on_tick(LONG_TICK_MS);
    }
    done(game)
}

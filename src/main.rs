// src/main.rs
//
// Calculatrice scientifique — point d’entrée (terminal)
// -----------------------------------------------------
// Journalisation : inactive par défaut, activée par RUST_LOG
// (ex: RUST_LOG=calculatrice_sci=debug). Les traces vont sur stderr
// pour ne pas se mêler aux résultats.

use std::sync::Once;

use calculatrice_sci::app::console;

static TRACING_INIT: Once = Once::new();

fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

fn main() -> rustyline::Result<()> {
    init_tracing();
    console::lancer()
}

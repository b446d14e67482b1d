//! Shopping list command-line demo
//!
//! Reads actions from stdin, one per line, and prints the list after every
//! dispatch. See [`shopping_list::input`] for the accepted line formats.

use clap::Parser;
use shopping_list::input::parse_line;
use shopping_list::{CoercionPolicy, ShoppingConfig, ShoppingState, create_store};
use std::io::BufRead;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Drive a shopping list from stdin
#[derive(Debug, Parser)]
#[command(name = "shopping-list", version, about)]
struct Args {
    /// Ignore numeric actions whose payload is not a number
    #[arg(long)]
    strict: bool,

    /// Print state as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn render_json(state: &ShoppingState) {
    match serde_json::to_string(state) {
        Ok(json) => println!("{json}"),
        Err(error) => tracing::warn!(%error, "Failed to encode state"),
    }
}

fn render_text(state: &ShoppingState) {
    println!("{state}\n");
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shopping_list=info,slice_store_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    slice_store_runtime::metrics::register_metrics();

    let args = Args::parse();

    let coercion = if args.strict {
        CoercionPolicy::Strict
    } else {
        CoercionPolicy::Lenient
    };
    let mut store = create_store(ShoppingConfig::new(coercion))?;

    let render: fn(&ShoppingState) = if args.json { render_json } else { render_text };
    store.subscribe(move |state: &Arc<ShoppingState>| render(state));

    tracing::info!(?coercion, "Shopping list ready");
    render(store.state());

    for line in std::io::stdin().lock().lines() {
        let line = line?;
        match parse_line(&line, store.state()) {
            Ok(actions) => {
                for action in actions {
                    store.dispatch(action);
                }
            },
            Err(error) => tracing::warn!(%error, line = %line, "Skipping input"),
        }
    }

    tracing::info!(
        items = store.state().item_count(),
        total = store.state().total(),
        "Input closed"
    );
    Ok(())
}

//! Prints the OAuth2 invite URL for the bot
//!
//! Usage: cargo run --bin print-invite

use dotenvy::dotenv;
use log::error;

use herald::core::config::client_id_from_lookup;
use herald::core::invite_url;

fn main() {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match client_id_from_lookup(|key| std::env::var(key).ok()) {
        // The URL itself goes to stdout
        Ok(client_id) => println!("{}", invite_url(client_id)),
        Err(e) => {
            error!("{e:#}");
            std::process::exit(1);
        }
    }
}

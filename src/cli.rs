use clap::{Parser, Subcommand};
use secrecy::ExposeSecret;
use settlement_gateway::config::ConfigInfo;

#[derive(Parser)]
#[command(name = "settlement-gateway")]
#[command(about = "Settlement Gateway - booking payments and refunds over Stripe Connect", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve {
        /// Override the listening port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Validate configuration and print it with secrets redacted
    Config,
}

pub fn print_config(info: &ConfigInfo) {
    let config = &info.config;
    let key = config.stripe_secret_key.expose_secret();
    let mode = if key.starts_with("sk_live_") || key.starts_with("rk_live_") {
        "live"
    } else {
        "test"
    };

    println!("Configuration OK ({} profile)", info.profile.as_str());
    println!("  server_port              {}", config.server_port);
    println!("  stripe_api_base          {}", config.stripe_api_base);
    println!("  stripe_secret_key        [redacted, {} mode]", mode);
    println!(
        "  stripe_publishable_key   {}",
        if config.stripe_publishable_key.is_empty() { "(unset)" } else { config.stripe_publishable_key.as_str() }
    );
    println!("  stripe_api_version       {}", config.stripe_api_version);
    println!("  connect_account_country  {}", config.connect_account_country);
    println!("  account_link_refresh_url {}", config.account_link_refresh_url);
    println!("  account_link_return_url  {}", config.account_link_return_url);
    println!(
        "  cors_allowed_origins     {}",
        config.cors_allowed_origins.as_deref().unwrap_or("*")
    );
    println!("  log_format               {:?}", config.log_format);
    println!("  http_timeout_secs        {}", config.http_timeout.as_secs());

    if info.overrides.is_empty() {
        println!("No environment overrides");
    } else {
        println!("Overridden by environment: {}", info.overrides.join(", "));
    }
}

//! Server startup utilities.

use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
    ____             __
   / __ \____  _____/ /____  _____
  / /_/ / __ \/ ___/ __/ _ \/ ___/
 / _, _/ /_/ (__  ) /_/  __/ /
/_/ |_|\____/____/\__/\___/_/
    "#);
}

/// Prints server startup information.
pub fn print_startup_info(addr: &str, db_target: &str, cache_enabled: bool) {
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("REST API:  http://{}/users", addr);
    info!("Health:    http://{}/health", addr);
    info!("API Docs:  http://{}/swagger-ui", addr);
    info!("Database:  {}", db_target);
    info!("Cache:     {}", if cache_enabled { "enabled" } else { "disabled" });
    info!("{}", separator);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_banner_does_not_panic() {
        let _ = tracing_subscriber::fmt::try_init();
        print_banner();
    }

    #[test]
    fn test_print_startup_info_does_not_panic() {
        let _ = tracing_subscriber::fmt::try_init();
        print_startup_info("0.0.0.0:5000", "postgres://postgres@db:5432/mydb", true);
        print_startup_info("127.0.0.1:8080", "postgres://app@localhost:5432/app", false);
    }
}

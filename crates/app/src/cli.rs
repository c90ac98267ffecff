use std::net::SocketAddr;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Overrides THREADSCOUT_HTTP_ADDR.
    #[arg(long)]
    pub http_addr: Option<SocketAddr>,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::Cli;

    #[test]
    fn http_addr_is_optional() {
        let cli = Cli::try_parse_from(["threadscout"]).unwrap();
        assert!(cli.http_addr.is_none());
    }

    #[test]
    fn http_addr_override_parses() {
        let cli = Cli::try_parse_from(["threadscout", "--http-addr", "0.0.0.0:9000"]).unwrap();
        assert_eq!(cli.http_addr, Some("0.0.0.0:9000".parse::<std::net::SocketAddr>().unwrap()));
    }
}

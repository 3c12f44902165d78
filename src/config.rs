use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(name = "covid_gateway")]
#[command(about = "Serves a cached COVID-19 stats snapshot over HTTP")]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "COVID_GATEWAY_LISTEN", default_value = "0.0.0.0:8080")]
    pub listen: SocketAddr,

    /// Stats feed fetched once at startup
    #[arg(
        long,
        env = "COVID_STATS_URL",
        default_value = "https://api.rootnet.in/covid19-in/stats/latest"
    )]
    pub stats_url: String,

    /// Reverse geocoding endpoint (LocationIQ compatible)
    #[arg(
        long,
        env = "GEOCODE_URL",
        default_value = "https://us1.locationiq.com/v1/reverse.php"
    )]
    pub geocode_url: String,

    /// Geocoder access key; coordinate lookups answer 503 without it
    #[arg(long, env = "LOCATIONIQ_KEY", hide_env_values = true)]
    pub geocode_key: Option<String>,

    /// Overall timeout for outbound HTTP calls
    #[arg(long, env = "COVID_HTTP_TIMEOUT_SECS", default_value_t = 30)]
    pub http_timeout_secs: u64,

    /// Document store endpoint (ws://host:port, rocksdb://path or mem://)
    #[arg(long, env = "COVID_DB_ENDPOINT", default_value = "ws://127.0.0.1:8000")]
    pub db_endpoint: String,

    #[arg(long, env = "COVID_DB_NAMESPACE", default_value = "CoronaApp")]
    pub db_namespace: String,

    #[arg(long, env = "COVID_DB_DATABASE", default_value = "CoronaApp")]
    pub db_database: String,

    /// Table the snapshot document is inserted into
    #[arg(long, env = "COVID_DB_COLLECTION", default_value = "CoronaData")]
    pub db_collection: String,

    #[arg(long, env = "COVID_DB_USER")]
    pub db_user: Option<String>,

    #[arg(long, env = "COVID_DB_PASS", hide_env_values = true)]
    pub db_pass: Option<String>,

    #[arg(long, env = "COVID_DB_CONNECT_TIMEOUT_SECS", default_value_t = 10)]
    pub db_connect_timeout_secs: u64,

    /// Don't write the snapshot to the document store
    #[arg(long)]
    pub skip_persist: bool,
}

impl Config {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn db_connect_timeout(&self) -> Duration {
        Duration::from_secs(self.db_connect_timeout_secs)
    }

    /// Root credentials, when both halves are configured
    pub fn db_credentials(&self) -> Option<(&str, &str)> {
        match (&self.db_user, &self.db_pass) {
            (Some(user), Some(pass)) => Some((user.as_str(), pass.as_str())),
            _ => None,
        }
    }
}

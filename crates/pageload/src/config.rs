use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use clap::ValueEnum;
use event_sink::http::HttpSinkConfig;
use utils::version;

use crate::assets::TrackedAssets;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Influx,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Influx => "influx",
        }
    }
}

/// Replay a captured browser snapshot through the page-load beacon
#[derive(Parser, Debug, Clone)]
#[command(about, long_about, version = &**version::VERSION)]
pub struct ReplayArgs {
    #[arg(
        long,
        value_hint = clap::ValueHint::FilePath,
        help = "Browser snapshot to replay (.json, .yaml or .yml)"
    )]
    pub snapshot: PathBuf,

    #[arg(
        long,
        value_enum,
        default_value = "json",
        help = "Encoding used when events are written to the log instead of a collector"
    )]
    pub format: OutputFormat,

    #[arg(
        long,
        env = "PAGELOAD_COLLECTOR_URL",
        help = "Collector base URL, e.g. http://localhost:8080. Events are logged when unset"
    )]
    pub collector_url: Option<String>,

    #[arg(long, default_value = "/user_event", help = "Collector endpoint path")]
    pub endpoint: String,

    #[arg(long, default_value_t = 10, help = "Collector request timeout in seconds")]
    pub timeout_secs: u64,

    #[arg(
        long = "tracked-asset",
        help = "Resource name substring to report sizes and duration for; repeatable"
    )]
    pub tracked_assets: Vec<String>,

    #[arg(
        long,
        env = "PAGELOAD_EVENT_LOG",
        value_hint = clap::ValueHint::FilePath,
        help = "Write logged events to this daily-rotated file instead of stderr"
    )]
    pub event_log: Option<PathBuf>,

    #[arg(long, help = "Also emit the companion page-unload event")]
    pub emit_unload: bool,
}

impl ReplayArgs {
    pub fn tracked_assets(&self) -> TrackedAssets {
        if self.tracked_assets.is_empty() {
            TrackedAssets::default()
        } else {
            TrackedAssets::new(self.tracked_assets.iter().cloned())
        }
    }

    pub fn http_sink_config(&self) -> Option<HttpSinkConfig> {
        self.collector_url.as_ref().map(|url| {
            HttpSinkConfig::new(url.clone())
                .with_endpoint(self.endpoint.clone())
                .with_timeout(Duration::from_secs(self.timeout_secs))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = ReplayArgs::try_parse_from(["pageload-replay", "--snapshot", "page.json"]).unwrap();
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.endpoint, "/user_event");
        assert!(!args.emit_unload);
        assert_eq!(args.tracked_assets(), TrackedAssets::default());
    }

    #[test]
    fn repeated_tracked_assets() {
        let args = ReplayArgs::try_parse_from([
            "pageload-replay",
            "--snapshot",
            "page.yaml",
            "--tracked-asset",
            "/app.js",
            "--tracked-asset",
            "/app.css",
        ])
        .unwrap();
        let assets = args.tracked_assets();
        assert_eq!(assets.len(), 2);
        assert!(assets.find("/static/app.css").is_some());
        assert!(assets.find("/main.js").is_none());
    }

    #[test]
    fn collector_settings_build_http_config() {
        let args = ReplayArgs::try_parse_from([
            "pageload-replay",
            "--snapshot",
            "page.json",
            "--collector-url",
            "http://collector:8080",
            "--endpoint",
            "/events",
            "--timeout-secs",
            "3",
            "--format",
            "influx",
        ])
        .unwrap();
        let config = args.http_sink_config().unwrap();
        assert_eq!(config.event_url(), "http://collector:8080/events");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(args.format.as_str(), "influx");
    }
}

pub mod provider;
pub mod render;
pub mod sector;

/// Shortcut for required API elements.
pub(crate) mod http {
    pub(crate) use dotenv::var;
    pub(crate) use reqwest::Client as HttpClient;
}

/// Build a standard HTTP client; financial-data endpoints reject requests
/// without a browser-like User-Agent.
pub fn std_client_build() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
        )
        .build()
        .expect("failed to build HTTP client")
}

/// Print the time elapsed, from a set time.
pub(crate) fn time_elapsed(time: std::time::Instant) -> String {
    format!("elapsed time: {}ms", time.elapsed().as_millis())
}

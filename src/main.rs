use anyhow::{Context, Result};
use serde_json::json;

use trackdash::config::DashConfig;
use trackdash::data::load_dataset;
use trackdash::logging::{log, obj, v_str, Domain, Level};
use trackdash::server;

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = DashConfig::from_env();
    log(
        Level::Info,
        Domain::System,
        "startup",
        obj(&[
            ("data_dir", v_str(&cfg.data_dir.to_string_lossy())),
            ("bind_addr", v_str(&cfg.bind_addr)),
            ("session_ttl_secs", json!(cfg.session_ttl_secs)),
            ("max_sessions", json!(cfg.max_sessions)),
        ]),
    );

    // Malformed input files abort startup.
    let (data, manifest) = match load_dataset(&cfg.data_dir) {
        Ok(loaded) => loaded,
        Err(err) => {
            log(
                Level::Fatal,
                Domain::Data,
                "load_failed",
                obj(&[("msg", v_str(&format!("{:#}", err)))]),
            );
            return Err(err).context("loading dashboard data");
        }
    };
    log(
        Level::Info,
        Domain::Data,
        "dataset_ready",
        obj(&[
            ("files", json!(manifest.files.len())),
            ("models", json!(data.hyperparameters.rows.len())),
            ("stocks", json!(data.coefficients.n_rows())),
        ]),
    );

    server::serve(&cfg, data).await
}

//! Offline render: prints the full dashboard spec for one selection.
//!
//! Usage: trackdash-render [DATA_DIR] [--models ridge,lasso] [--normalized] [--manifest]

use anyhow::{bail, Context, Result};
use serde_json::json;
use std::env;
use std::path::PathBuf;

use trackdash::controller::render_all;
use trackdash::data::load_dataset;
use trackdash::filter::Selection;
use trackdash::normalize::NormalizationFlag;
use trackdash::session::SessionState;

fn main() -> Result<()> {
    // stdout carries the JSON payload.
    if env::var_os("LOG_STDOUT").is_none() {
        env::set_var("LOG_STDOUT", "0");
    }

    let mut data_dir = PathBuf::from(env::var("DATA_DIR").unwrap_or_else(|_| "./data".to_string()));
    let mut models: Vec<String> = Vec::new();
    let mut normalized = false;
    let mut with_manifest = false;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--models" => {
                let Some(list) = args.next() else {
                    bail!("--models needs a comma-separated list");
                };
                models = list
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
            }
            "--normalized" => normalized = true,
            "--manifest" => with_manifest = true,
            other if other.starts_with("--") => bail!("unknown flag {}", other),
            other => data_dir = PathBuf::from(other),
        }
    }

    let (data, manifest) = load_dataset(&data_dir)
        .with_context(|| format!("loading {}", data_dir.display()))?;
    let state = SessionState {
        selection: Selection::from_values(&models),
        normalization: NormalizationFlag::new(normalized),
    };
    let render = render_all(&state, &data);

    let payload = if with_manifest {
        json!({ "manifest": manifest, "render": render })
    } else {
        serde_json::to_value(&render)?
    };
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

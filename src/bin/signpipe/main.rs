//! signpipe entrypoint: scripted detection sessions through the smoothing
//! pipeline.
//!
//! # Architecture
//!
//! - Offline mode (default): replays a scripted session instantly
//! - Live mode (`--live`): a producer thread feeds frames over a bounded
//!   channel at real tick cadence; a single worker owns the window buffer
//!   and stabilizer
//! - Announcer (`--announce`): debounced side-effect sink for stable labels

mod demo;
mod live;
mod output;

use anyhow::Result;
use signpipe::config::AppConfig;
use signpipe::labels::LabelCatalog;
use signpipe::pipeline::run_offline;
use signpipe::{init_logging, init_tracing, install_panic_hook, log_debug, log_file_path};

use crate::output::{print_result, print_summary};

fn main() -> Result<()> {
    let config = AppConfig::parse_args()?;
    init_logging(&config);
    init_tracing(&config);
    install_panic_hook();
    log_debug("=== signpipe started ===");
    log_debug(&format!("Log file: {:?}", log_file_path()));

    let catalog = match &config.labels {
        Some(path) => LabelCatalog::load(path)?,
        None => demo::demo_catalog()?,
    };
    log_debug(&format!("label catalog: {} labels", catalog.len()));

    if config.list_labels {
        for (index, label) in catalog.labels().iter().enumerate() {
            println!("{index:>3}  {label}");
        }
        return Ok(());
    }

    if config.live {
        live::run_live_session(&config, &catalog)?;
    } else {
        if config.announce {
            eprintln!("note: --announce takes effect in --live sessions");
        }
        run_offline_session(&config, &catalog);
    }

    log_debug("=== signpipe exiting ===");
    Ok(())
}

fn run_offline_session(config: &AppConfig, catalog: &LabelCatalog) {
    let cfg = config.pipeline_config();
    let script_len = demo::demo_script(catalog).len();
    let samples = demo::demo_samples(cfg.window_frames, script_len);
    let mut classifier = demo::demo_classifier(catalog);

    let run = run_offline(&samples, &cfg, &mut classifier);
    for result in &run.results {
        print_result(config, result);
    }
    print_summary(config, &run.metrics, None);
}

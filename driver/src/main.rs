use anyhow::Context;
use clap::Parser;
use gui_bridge::bridge::GuiBridge;
use gui_bridge::model::SessionModel;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod generator;
mod gui_bridge;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Offline reachability workflow driver")]
struct Args {
    /// Run a single offline click session and emit a baseline summary
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    #[arg(long, default_value_t = 40.7580)]
    lat: f64,
    #[arg(long, default_value_t = -73.9855)]
    lon: f64,
    #[arg(long, default_value_t = 10.0)]
    minutes: f64,
    #[arg(long, default_value = "foot-walking")]
    profile: String,
    /// Request concentric isolines up to the selected range
    #[arg(long, default_value_t = false)]
    intervals: bool,
    /// Keep the GUI bridge alive for incoming click requests
    #[arg(long, default_value_t = false)]
    serve: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let workflow_config = if let Some(path) = args.workflow {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::from_args(args.lat, args.lon, args.minutes, &args.profile, args.intervals)
    };

    let runner = Runner::new(workflow_config);
    let gui_bridge = GuiBridge::new(Arc::new(runner.clone()));
    let runtime = TokioBuilder::new_current_thread()
        .enable_all()
        .build()
        .context("creating driver runtime")?;

    if args.offline {
        let result = runtime.block_on(runner.execute())?;

        println!(
            "Offline run -> results {}, features {}, export {}",
            result.result_count, result.feature_count, result.export_filename
        );

        let model = SessionModel::from_result(&result);
        gui_bridge.publish(&model)?;
        gui_bridge.publish_status("Offline workflow results ready.");

        let export_path = PathBuf::from("tools/data").join(&result.export_filename);
        if let Some(parent) = export_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&export_path, serde_json::to_string_pretty(&result.export)?)
            .with_context(|| format!("writing export {}", export_path.display()))?;
    }
    if args.serve {
        gui_bridge.publish_status("HTTP bridge running (Ctrl+C to stop)...");
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    }

    Ok(())
}

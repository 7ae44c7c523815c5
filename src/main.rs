use anyhow::Result;
use recsync::{config::CONFIG_FILE, pipeline, Config};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_target(false)
        .init();

    // ─── 2) configuration ────────────────────────────────────────────
    let (cfg, origin) = Config::load_or_default(CONFIG_FILE)?;
    info!(
        config = %origin,
        count = cfg.num_files_to_rename,
        audio = %cfg.audio_folder_path.display(),
        csv = %cfg.csv_file_path.display(),
        "startup"
    );

    // ─── 3) rename recordings, then update the CSV ───────────────────
    let summary = pipeline::run(&cfg);
    if summary.is_complete() {
        info!("all done");
    } else {
        info!("finished with errors; see log above");
    }
    Ok(())
}

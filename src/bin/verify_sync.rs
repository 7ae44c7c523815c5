// src/bin/verify_sync.rs

use anyhow::Result;
use recsync::{config::CONFIG_FILE, table::updated_path, verify, Config};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let (cfg, _) = Config::load_or_default(CONFIG_FILE)?;
    let table = updated_path(&cfg.csv_file_path);
    let report = verify::check(&cfg.audio_folder_path, &table, cfg.num_files_to_rename)?;

    println!("\n{: <28} {:>10}", "Check", "Count");
    println!("{:-<39}", "");
    println!("{: <28} {:>10}", "rows checked", report.rows_checked);
    println!(
        "{: <28} {:>10}",
        "missing renamed files",
        report.missing_files.len()
    );
    println!(
        "{: <28} {:>10}",
        "leftover recordings",
        report.leftover_recordings.len()
    );

    for name in &report.missing_files {
        println!("missing: {}", name);
    }
    for name in &report.leftover_recordings {
        println!("leftover: {}", name);
    }

    if report.is_consistent() {
        println!("\n✅ {} matches {}", table.display(), cfg.audio_folder_path.display());
    } else {
        println!("\n⚠ {} and {} disagree", table.display(), cfg.audio_folder_path.display());
    }
    Ok(())
}

use chronomap_cli::{Args, run};
use clap::Parser;
use tracing::info;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chronomap_cli=info,chronomap=info,info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    info!("Generating frames into {}", args.out_dir.display());

    let summary = run(&args)?;
    println!(
        "Frames generated in {}: {} frames, {} entity failures, {} rejected inputs",
        args.out_dir.display(),
        summary.frames,
        summary.entity_failures,
        summary.rejected_inputs
    );

    Ok(())
}

use trim_fasta_cli::pipeline::{run_pipeline, PipelineConfig};
#[macro_use]
extern crate log;

fn main() -> anyhow::Result<()> {
    let matches = trim_fasta_cli::commands::trim_fasta_parser().get_matches();
    let config = match matches.subcommand() {
        Some(("pipeline", sub_m)) => {
            let path: &std::path::PathBuf = sub_m.get_one("profile").unwrap();
            PipelineConfig::from_toml(path)?
        }
        Some(("trim", sub_m)) => PipelineConfig::from_matches(sub_m),
        _ => unreachable!(),
    };
    let level = config.log_level();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    debug!("{:?}", config);
    let report = run_pipeline(&config)?;
    for summary in report.succeeded.iter() {
        eprintln!(
            "{}\tkept:{}\texcluded:{}\ttrimmed:{}",
            summary.input_file, summary.kept, summary.excluded, summary.trimmed
        );
    }
    if !report.failed.is_empty() {
        for failure in report.failed.iter() {
            eprintln!("{}\tfailed:{}", failure.input_file.display(), failure.error);
        }
        std::process::exit(1);
    }
    Ok(())
}

use agi_meter::Result;
use agi_meter::config::SourcesConfig;
use camino::Utf8PathBuf;
use clap::Parser;

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output sources configuration file path
    #[arg(value_name = "PATH", default_value = "data/sources.toml")]
    pub output: Utf8PathBuf,
}

pub fn init_sources(args: &InitArgs) -> Result<()> {
    let config = SourcesConfig::default();
    config.save(&args.output)?;
    println!("Generated default sources configuration file: {}", args.output);
    Ok(())
}

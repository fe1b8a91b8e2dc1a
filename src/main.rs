use anyhow::{Context, Result};
use texume::{Config, HttpFetcher, Pipeline, init_logging};

fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(config.verbose);
    config.validate().context("Invalid configuration")?;

    let fetcher = HttpFetcher::new(config.timeout).context("Failed to create HTTP client")?;

    let summary = Pipeline::new(&config, &fetcher).run()?;

    println!(
        "Avatar: {}{}",
        summary.avatar.path().display(),
        if summary.avatar.is_default() {
            " (default)"
        } else {
            ""
        }
    );
    println!(
        "Rendered {} section(s) into {}",
        summary.report.written.len(),
        config.output.display()
    );

    Ok(())
}

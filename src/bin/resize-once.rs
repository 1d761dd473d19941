use std::process::ExitCode;

use resize_once::{
    config::ResizeConfig, error::ErrorKind, fetch::HttpFetcher, help, init, pipeline,
    pipeline::ResizeSummary, ro_err, ResizeError,
};

fn main() -> ExitCode {
    help::maybe_print_help_and_exit("resize-once");
    init::init();

    match real_main() {
        Ok(summary) => {
            println!("image written to {}", summary.path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn real_main() -> Result<ResizeSummary, ResizeError> {
    let mut config = ResizeConfig::load()?;
    // a positional argument takes precedence over the configured URL
    if let Some(url) = std::env::args_os().nth(1) {
        config.url = url
            .into_string()
            .map_err(|url| ro_err!(ErrorKind::Config, "url is not valid UTF-8: {}", url.to_string_lossy()))?;
    }

    let fetcher = HttpFetcher::new(config.timeout())?;
    pipeline::run(&config, &fetcher)
}

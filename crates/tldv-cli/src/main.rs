use tldv_core::logging;

mod cli;

#[tokio::main]
async fn main() {
    // Initialize logging as early as possible; fall back to stderr if the state dir is unusable.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    // Run in a task so Ctrl-C is observed even while a prompt blocks on stdin.
    let run = tokio::spawn(cli::run_from_args());
    tokio::select! {
        res = run => match res {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                eprintln!("tldv-dl error: {:#}", err);
                std::process::exit(1);
            }
            Err(err) => {
                eprintln!("tldv-dl error: unexpected failure: {}", err);
                std::process::exit(1);
            }
        },
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupted by user");
            eprintln!("\nDownload interrupted by user");
            std::process::exit(130);
        }
    }
}

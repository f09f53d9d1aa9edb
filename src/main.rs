use clap::Parser;
use clashgen::config::setup_logging;
use clashgen::gemini::GeminiClient;
use tracing::error;

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    let cli = clashgen::cli::CliOptions::parse();

    if setup_logging(cli.debug).is_err() {
        return;
    }

    if cli.api_key.trim().is_empty() {
        error!("No Gemini API key configured, set GEMINI_API_KEY");
        return;
    }

    let client = GeminiClient::new(cli.api_key, cli.api_base_url);

    if let Err(err) =
        clashgen::web::setup_server(&cli.listen_address, cli.port, client).await
    {
        error!("Application error: {}", err);
    }
}

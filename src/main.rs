//! `sigreq` -- sign an HTTP request with a Cavage-style HTTP signature and
//! send it.

mod client;

use {
    anyhow::{bail, Result},
    clap::{Parser, ValueEnum},
    client::ApiClient,
    log::debug,
    std::path::PathBuf,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// Sign an HTTP request with a Cavage-style HTTP signature and send it.
#[derive(Debug, Parser)]
#[command(name = "sigreq", version, about)]
struct Cli {
    /// HTTP method to send.
    #[arg(value_enum)]
    method: HttpMethod,

    /// Absolute URL of the endpoint to call.
    endpoint: String,

    /// Key identifier the server uses to look up the verification key.
    key_id: String,

    /// Path to the PEM-encoded PKCS#8 RSA private key.
    key_file: PathBuf,

    /// JSON payload; required for post and put.
    payload: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    debug!("{:?}", cli);

    let payload = match (cli.method, cli.payload) {
        (HttpMethod::Post | HttpMethod::Put, None) => {
            bail!("a payload is required for {:?}", cli.method)
        }
        (HttpMethod::Get | HttpMethod::Delete, Some(_)) => {
            bail!("a payload is not allowed for {:?}", cli.method)
        }
        (_, payload) => payload,
    };

    let api_client = ApiClient::new(&cli.endpoint, &cli.key_id, &cli.key_file)?;
    let response = match cli.method {
        HttpMethod::Get => api_client.get()?,
        HttpMethod::Post => api_client.post(payload.expect("payload checked above"))?,
        HttpMethod::Put => api_client.put(payload.expect("payload checked above"))?,
        HttpMethod::Delete => api_client.delete()?,
    };

    println!("{}", response.render());
    Ok(())
}

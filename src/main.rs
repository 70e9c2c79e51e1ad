use std::{fs::File, io::Write};

use structopt::StructOpt;
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use soapstub_codegen as codegen;

#[derive(Debug, Error)]
enum Error {
    #[error("Error generating client stub")]
    CodegenError(#[from] codegen::error::Error),

    #[error("Error writing output")]
    IoError(#[from] std::io::Error),
}

#[derive(StructOpt)]
struct Args {
    #[structopt(short, long, default_value = "./client_stub.txt")]
    output: String,

    /// Service to generate a client for, instead of the first one
    #[structopt(long)]
    service: Option<String>,

    #[structopt(short, long)]
    verbose: bool,

    /// Path or URL of the WSDL document
    input: String,
}

fn init_logger(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("soapstub=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("soapstub=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .compact(),
        )
        .init();
}

#[paw::main]
fn main(args: Args) -> Result<(), Error> {
    init_logger(args.verbose);

    let options = codegen::Options {
        service: args.service,
    };

    let generated = codegen::from_url(&args.input, &options)?;

    {
        let mut file = File::create(&args.output)?;
        for class in &generated.classes {
            writeln!(&mut file, "{}", class)?;
        }
    }

    tracing::info!(
        output = %args.output,
        classes = generated.classes.len(),
        diagnostics = generated.diagnostics.len(),
        "client stub written"
    );

    Ok(())
}

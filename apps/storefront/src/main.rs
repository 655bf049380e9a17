//! # Vintage Finds Storefront CLI
//!
//! ```text
//! storefront products --brand "Levi's"
//! storefront show levis-501-original --select Size=M
//! storefront add levis-501-original --select Size=M --select Color=Red
//! storefront update prod-levis-501 2 --variant levis-m-red
//! storefront cart
//! ```
//!
//! Responses are JSON on stdout. Failures print an `ApiError` as JSON on
//! stderr and exit non-zero.

use std::process::ExitCode;

use clap::Parser;
use finds_storefront::cli::Cli;

fn main() -> ExitCode {
    finds_storefront::init_tracing();
    let cli = Cli::parse();

    match finds_storefront::run(cli) {
        Ok(output) => {
            match serde_json::to_string_pretty(&output) {
                Ok(text) => println!("{}", text),
                Err(_) => println!("{}", output),
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            let text = serde_json::to_string(&err).unwrap_or_else(|_| err.to_string());
            eprintln!("{}", text);
            ExitCode::FAILURE
        }
    }
}

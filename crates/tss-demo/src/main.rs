use gumdrop::Options;
use std::process;

use tss_demo::{
    actions::{keygen, sign_message, threshold_sign, tx_digest, verify_message},
    opts::{Command, DemoOpts},
};

fn main() {
    let opts = DemoOpts::parse_args_default_or_exit();

    let command = opts.command.unwrap_or_else(|| {
        eprintln!("No command was provided.");
        eprintln!("{}", DemoOpts::usage());
        process::exit(2)
    });

    let result = match command {
        Command::Keygen(opts) => keygen(opts),
        Command::SignMessage(opts) => sign_message(opts),
        Command::VerifyMessage(opts) => verify_message(opts),
        Command::ThresholdSign(opts) => threshold_sign(opts),
        Command::TxDigest(opts) => tx_digest(opts),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

use gumdrop::Options;

#[derive(Debug, Options)]
pub struct DemoOpts {
    help: bool,
    #[options(command)]
    pub command: Option<Command>,
}

#[derive(Debug, Options)]
pub enum Command {
    #[options(help = "generate a new secp256k1 keypair and print its WIF and P2PKH address")]
    Keygen(KeygenOpts),

    #[options(help = "sign a message with a single private key (WIF) and print a compact signature")]
    SignMessage(SignMessageOpts),

    #[options(help = "verify a compact signature against a P2PKH address and message")]
    VerifyMessage(VerifyMessageOpts),

    #[options(help = "run a simulated (t, N) threshold signing session over a message")]
    ThresholdSign(ThresholdSignOpts),

    #[options(help = "compute the BIP-143 sighash digest for a single-input demo transaction")]
    TxDigest(TxDigestOpts),
}

#[derive(Debug, Options)]
pub struct KeygenOpts {
    help: bool,

    #[options(help = "emit the uncompressed public key / address instead of compressed")]
    pub uncompressed: bool,
}

#[derive(Debug, Options)]
pub struct SignMessageOpts {
    help: bool,

    #[options(help = "the signer's private key, in Wallet Import Format")]
    pub wif: String,

    #[options(help = "the message to sign")]
    pub message: String,
}

#[derive(Debug, Options)]
pub struct VerifyMessageOpts {
    help: bool,

    #[options(help = "the claimed signer's P2PKH address")]
    pub address: String,

    #[options(help = "the signed message")]
    pub message: String,

    #[options(help = "the Base64-encoded compact signature")]
    pub signature: String,
}

#[derive(Debug, Options)]
pub struct ThresholdSignOpts {
    help: bool,

    #[options(help = "number of simulated participants", default = "5")]
    pub group_size: usize,

    #[options(help = "the sharing polynomial's order", default = "2")]
    pub polynomial_order: usize,

    #[options(help = "the message to sign")]
    pub message: String,
}

#[derive(Debug, Options)]
pub struct TxDigestOpts {
    help: bool,

    #[options(help = "the private key (WIF) locking the spent output")]
    pub wif: String,

    #[options(help = "the value, in satoshis, of the spent output", default = "50000")]
    pub value: u64,
}

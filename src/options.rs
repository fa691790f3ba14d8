use super::*;

#[derive(Clone, Default, Debug, Parser)]
#[command(group(
  ArgGroup::new("chains")
    .required(false)
    .args(&["chain_argument", "signet", "regtest", "testnet"]),
))]
pub struct Options {
  #[arg(
    long,
    help = "Issue a one-to-many batching transaction once more than <BATCH_THRESHOLD> low-value outputs accumulate. [default: 5000]"
  )]
  pub(crate) batch_threshold: Option<usize>,
  #[arg(long, help = "Load Bitcoin Core data dir from <BITCOIN_DATA_DIR>.")]
  pub(crate) bitcoin_data_dir: Option<PathBuf>,
  #[arg(
    long,
    help = "Authenticate to Bitcoin Core RPC with <BITCOIN_RPC_PASSWORD>."
  )]
  pub(crate) bitcoin_rpc_password: Option<String>,
  #[arg(long, help = "Connect to Bitcoin Core RPC at <BITCOIN_RPC_URL>.")]
  pub(crate) bitcoin_rpc_url: Option<String>,
  #[arg(
    long,
    help = "Authenticate to Bitcoin Core RPC as <BITCOIN_RPC_USERNAME>."
  )]
  pub(crate) bitcoin_rpc_username: Option<String>,
  #[arg(long = "chain", value_enum, help = "Use <CHAIN>. [default: mainnet]")]
  pub(crate) chain_argument: Option<Chain>,
  #[arg(long, help = "Load configuration from <CONFIG>.")]
  pub(crate) config: Option<PathBuf>,
  #[arg(long, help = "Load configuration from <CONFIG_DIR>.")]
  pub(crate) config_dir: Option<PathBuf>,
  #[arg(long, help = "Load Bitcoin Core RPC cookie file from <COOKIE_FILE>.")]
  pub(crate) cookie_file: Option<PathBuf>,
  #[arg(
    long,
    help = "Treat outputs below <DUST_FLOOR> sats as low-value. [default: 546]"
  )]
  pub(crate) dust_floor: Option<u64>,
  #[arg(long, short, help = "Specify output format. [default: json]")]
  pub(crate) format: Option<OutputFormat>,
  #[arg(
    long,
    help = "Spend at most <INPUT_LIMIT> inputs per consolidating or batching transaction. [default: 50]"
  )]
  pub(crate) input_limit: Option<usize>,
  #[arg(
    long,
    help = "Consolidate when fewer than <LISTUNSPENT_LIMIT> outputs are found at startup. [default: 10000]"
  )]
  pub(crate) listunspent_limit: Option<usize>,
  #[arg(
    long,
    help = "Create at most <OUTPUT_LIMIT> outputs per batching transaction. [default: 50]"
  )]
  pub(crate) output_limit: Option<usize>,
  #[arg(long, short, help = "Use regtest. Equivalent to `--chain regtest`.")]
  pub(crate) regtest: bool,
  #[arg(
    long,
    help = "Keep <RETENTION_PERCENT> of value after fees on each one-to-one hop. [default: 90]"
  )]
  pub(crate) retention_percent: Option<u64>,
  #[arg(long, short, help = "Use signet. Equivalent to `--chain signet`.")]
  pub(crate) signet: bool,
  #[arg(long, short, help = "Use testnet. Equivalent to `--chain testnet`.")]
  pub(crate) testnet: bool,
  #[arg(long, help = "Pay <TX_FEE> sats in fees per transaction. [default: 0]")]
  pub(crate) tx_fee: Option<u64>,
  #[arg(long, help = "Sign with Bitcoin Core wallet <WALLET>.")]
  pub(crate) wallet: Option<String>,
}

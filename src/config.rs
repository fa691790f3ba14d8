use super::*;

#[derive(Deserialize, Default, PartialEq, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct Config {
  pub(crate) batch_threshold: Option<usize>,
  pub(crate) bitcoin_data_dir: Option<PathBuf>,
  pub(crate) bitcoin_rpc_password: Option<String>,
  pub(crate) bitcoin_rpc_url: Option<String>,
  pub(crate) bitcoin_rpc_username: Option<String>,
  pub(crate) chain: Option<Chain>,
  pub(crate) cookie_file: Option<PathBuf>,
  pub(crate) dust_floor: Option<u64>,
  pub(crate) input_limit: Option<usize>,
  pub(crate) listunspent_limit: Option<usize>,
  pub(crate) output_limit: Option<usize>,
  pub(crate) retention_percent: Option<u64>,
  pub(crate) tx_fee: Option<u64>,
  pub(crate) wallet: Option<String>,
}

impl Config {
  pub(crate) fn load(options: &Options) -> SnafuResult<Self> {
    let path = match (&options.config, &options.config_dir) {
      (Some(path), _) => path.clone(),
      (None, Some(dir)) if dir.join("churn.yaml").exists() => dir.join("churn.yaml"),
      (None, Some(_)) | (None, None) => return Ok(Self::default()),
    };

    Self::from_path(&path)
  }

  fn from_path(path: &Path) -> SnafuResult<Self> {
    let file = File::open(path).with_snafu_context(|_| error::Io { path })?;

    serde_yaml::from_reader(file).with_snafu_context(|_| error::ConfigParse { path })
  }
}

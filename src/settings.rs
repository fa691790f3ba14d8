use {super::*, bitcoincore_rpc::Auth};

#[derive(Default, Debug, Clone)]
pub struct Settings {
  bitcoin_data_dir: Option<PathBuf>,
  bitcoin_rpc_password: Option<String>,
  bitcoin_rpc_url: Option<String>,
  bitcoin_rpc_username: Option<String>,
  chain: Chain,
  cookie_file: Option<PathBuf>,
  parameters: Parameters,
  wallet: Option<String>,
}

impl Settings {
  pub fn load(options: Options) -> Result<Self> {
    let mut env = BTreeMap::new();

    for (key, value) in env::vars_os() {
      let Some(key) = key.to_str() else {
        continue;
      };

      let Some(name) = key.strip_prefix("CHURN_") else {
        continue;
      };

      let value = value.into_string().map_err(|value| {
        anyhow!(
          "environment variable `{key}` not valid unicode: `{}`",
          value.to_string_lossy()
        )
      })?;

      env.insert(name.to_string(), value);
    }

    let config = Config::load(&options)?;

    Self::merge(options, config, &env)
  }

  pub(crate) fn merge(
    options: Options,
    config: Config,
    env: &BTreeMap<String, String>,
  ) -> Result<Self> {
    let chain = Self::setting(
      options
        .signet
        .then_some(Chain::Signet)
        .or(options.regtest.then_some(Chain::Regtest))
        .or(options.testnet.then_some(Chain::Testnet))
        .or(options.chain_argument),
      env,
      "CHAIN",
      config.chain,
    )?
    .unwrap_or_default();

    let defaults = Parameters::default();

    let parameters = Parameters {
      batch_threshold: Self::setting(
        options.batch_threshold,
        env,
        "BATCH_THRESHOLD",
        config.batch_threshold,
      )?
      .unwrap_or(defaults.batch_threshold),
      dust_floor: Self::setting(options.dust_floor, env, "DUST_FLOOR", config.dust_floor)?
        .map(Amount::from_sat)
        .unwrap_or(defaults.dust_floor),
      input_limit: Self::setting(options.input_limit, env, "INPUT_LIMIT", config.input_limit)?
        .unwrap_or(defaults.input_limit),
      listunspent_limit: Self::setting(
        options.listunspent_limit,
        env,
        "LISTUNSPENT_LIMIT",
        config.listunspent_limit,
      )?
      .unwrap_or(defaults.listunspent_limit),
      output_limit: Self::setting(
        options.output_limit,
        env,
        "OUTPUT_LIMIT",
        config.output_limit,
      )?
      .unwrap_or(defaults.output_limit),
      retention_percent: Self::setting(
        options.retention_percent,
        env,
        "RETENTION_PERCENT",
        config.retention_percent,
      )?
      .unwrap_or(defaults.retention_percent),
      tx_fee: Self::setting(options.tx_fee, env, "TX_FEE", config.tx_fee)?
        .map(Amount::from_sat)
        .unwrap_or(defaults.tx_fee),
    };

    parameters.check()?;

    Ok(Self {
      bitcoin_data_dir: Self::setting(
        options.bitcoin_data_dir,
        env,
        "BITCOIN_DATA_DIR",
        config.bitcoin_data_dir,
      )?,
      bitcoin_rpc_password: Self::setting(
        options.bitcoin_rpc_password,
        env,
        "BITCOIN_RPC_PASSWORD",
        config.bitcoin_rpc_password,
      )?,
      bitcoin_rpc_url: Self::setting(
        options.bitcoin_rpc_url,
        env,
        "BITCOIN_RPC_URL",
        config.bitcoin_rpc_url,
      )?,
      bitcoin_rpc_username: Self::setting(
        options.bitcoin_rpc_username,
        env,
        "BITCOIN_RPC_USERNAME",
        config.bitcoin_rpc_username,
      )?,
      chain,
      cookie_file: Self::setting(options.cookie_file, env, "COOKIE_FILE", config.cookie_file)?,
      parameters,
      wallet: Self::setting(options.wallet, env, "WALLET", config.wallet)?,
    })
  }

  pub(crate) fn auth(&self) -> Result<Auth> {
    match (&self.bitcoin_rpc_username, &self.bitcoin_rpc_password) {
      (Some(rpc_user), Some(rpc_pass)) => Ok(Auth::UserPass(rpc_user.clone(), rpc_pass.clone())),
      (None, Some(_rpc_pass)) => Err(anyhow!("no bitcoin RPC username specified")),
      (Some(_rpc_user), None) => Err(anyhow!("no bitcoin RPC password specified")),
      _ => Ok(Auth::CookieFile(self.cookie_file()?)),
    }
  }

  pub fn bitcoin_rpc_client(&self) -> Result<Client> {
    let rpc_url = self.rpc_url();

    let auth = self.auth()?;

    log::info!("Connecting to Bitcoin Core at {rpc_url}");

    if let Auth::CookieFile(cookie_file) = &auth {
      log::info!(
        "Using credentials from cookie file at `{}`",
        cookie_file.display()
      );

      ensure!(
        cookie_file.is_file(),
        "cookie file `{}` does not exist",
        cookie_file.display()
      );
    }

    let client = Client::new(&rpc_url, auth)
      .with_context(|| format!("failed to connect to Bitcoin Core RPC at `{rpc_url}`"))?;

    let mut checks = 0;
    let rpc_chain = loop {
      match client.get_blockchain_info() {
        Ok(blockchain_info) => break Chain::try_from(blockchain_info.chain)?,
        Err(bitcoincore_rpc::Error::JsonRpc(bitcoincore_rpc::jsonrpc::Error::Rpc(err)))
          if err.code == -28 => {}
        Err(err) => bail!("failed to connect to Bitcoin Core RPC at `{rpc_url}`: {err}"),
      }

      ensure! {
        checks < 100,
        "failed to connect to Bitcoin Core RPC at `{rpc_url}`",
      }

      checks += 1;
      thread::sleep(Duration::from_millis(100));
    };

    if rpc_chain != self.chain {
      bail!(
        "Bitcoin RPC server is on {rpc_chain} but churn is on {}",
        self.chain
      );
    }

    Ok(client)
  }

  pub fn chain(&self) -> Chain {
    self.chain
  }

  pub(crate) fn cookie_file(&self) -> Result<PathBuf> {
    if let Some(cookie_file) = &self.cookie_file {
      return Ok(cookie_file.clone());
    }

    let path = if let Some(bitcoin_data_dir) = &self.bitcoin_data_dir {
      bitcoin_data_dir.clone()
    } else if cfg!(target_os = "linux") {
      dirs::home_dir()
        .ok_or_else(|| anyhow!("failed to get cookie file path: could not get home dir"))?
        .join(".bitcoin")
    } else {
      dirs::data_dir()
        .ok_or_else(|| anyhow!("failed to get cookie file path: could not get data dir"))?
        .join("Bitcoin")
    };

    Ok(self.chain.join_with_data_dir(path).join(".cookie"))
  }

  pub fn parameters(&self) -> Parameters {
    self.parameters
  }

  pub(crate) fn rpc_url(&self) -> String {
    let base_url = self
      .bitcoin_rpc_url
      .clone()
      .unwrap_or(format!("127.0.0.1:{}", self.chain.default_rpc_port()));

    match &self.wallet {
      Some(wallet) => format!("{base_url}/wallet/{wallet}"),
      None => format!("{base_url}/"),
    }
  }

  fn setting<T>(
    arg_value: Option<T>,
    env: &BTreeMap<String, String>,
    env_key: &str,
    config_value: Option<T>,
  ) -> Result<Option<T>>
  where
    T: FromStr,
    T::Err: Into<Error>,
  {
    if let Some(arg_value) = arg_value {
      return Ok(Some(arg_value));
    }

    if let Some(env_value) = env.get(env_key) {
      return env_value
        .parse::<T>()
        .map(Some)
        .map_err(|err| -> Error { err.into() })
        .with_context(|| format!("failed to parse environment variable CHURN_{env_key}"));
    }

    Ok(config_value)
  }
}

use {super::*, clap::ValueEnum};

#[derive(Default, ValueEnum, Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Chain {
  #[default]
  #[value(alias("main"))]
  #[serde(alias = "main")]
  Mainnet,
  Regtest,
  Signet,
  #[value(alias("test"))]
  #[serde(alias = "test")]
  Testnet,
}

impl Chain {
  pub fn default_rpc_port(self) -> u16 {
    match self {
      Self::Mainnet => 8332,
      Self::Regtest => 18443,
      Self::Signet => 38332,
      Self::Testnet => 18332,
    }
  }

  pub fn join_with_data_dir(self, data_dir: impl AsRef<Path>) -> PathBuf {
    let path = data_dir.as_ref();
    match self {
      Self::Mainnet => path.to_owned(),
      Self::Regtest => path.join("regtest"),
      Self::Signet => path.join("signet"),
      Self::Testnet => path.join("testnet3"),
    }
  }
}

impl TryFrom<Network> for Chain {
  type Error = Error;

  fn try_from(network: Network) -> Result<Self> {
    match network {
      Network::Bitcoin => Ok(Self::Mainnet),
      Network::Regtest => Ok(Self::Regtest),
      Network::Signet => Ok(Self::Signet),
      Network::Testnet => Ok(Self::Testnet),
      other => Err(anyhow!("unsupported chain: {other}")),
    }
  }
}

impl Display for Chain {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(
      f,
      "{}",
      match self {
        Self::Mainnet => "mainnet",
        Self::Regtest => "regtest",
        Self::Signet => "signet",
        Self::Testnet => "testnet",
      }
    )
  }
}

impl FromStr for Chain {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "mainnet" | "main" => Ok(Self::Mainnet),
      "regtest" => Ok(Self::Regtest),
      "signet" => Ok(Self::Signet),
      "testnet" | "test" => Ok(Self::Testnet),
      _ => bail!("invalid chain `{s}`"),
    }
  }
}

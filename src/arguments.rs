use super::*;

#[derive(Debug, Parser)]
#[command(
  version,
  about = "Generate a self-sustaining stream of transactions against Bitcoin Core"
)]
pub struct Arguments {
  #[command(flatten)]
  pub(crate) options: Options,
  #[command(subcommand)]
  pub(crate) subcommand: Subcommand,
}

impl Arguments {
  pub(crate) fn run(self) -> SubcommandResult {
    let settings = Settings::load(self.options)?;
    self.subcommand.run(settings)
  }
}

use super::*;

#[derive(Debug, Parser)]
pub(crate) struct Run {
  #[arg(
    long,
    default_value_t = 10,
    help = "Wait <IDLE_INTERVAL> seconds before retrying when nothing is spendable."
  )]
  idle_interval: u64,
  #[arg(long, help = "Stop after <MAX_TRANSACTIONS> successful transactions.")]
  max_transactions: Option<u64>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Output {
  pub failed: u64,
  pub low_value: usize,
  pub settled: u64,
  pub skipped: u64,
  pub spendable: usize,
}

impl From<&Ledger> for Output {
  fn from(ledger: &Ledger) -> Self {
    Self {
      failed: ledger.failed(),
      low_value: ledger.pools().low_value().len(),
      settled: ledger.settled(),
      skipped: ledger.skipped(),
      spendable: ledger.pools().spendable().len(),
    }
  }
}

impl Run {
  pub(crate) fn run(self, settings: Settings) -> SubcommandResult {
    let client = settings.bitcoin_rpc_client()?;

    let parameters = settings.parameters();

    let mut ledger = Ledger::bootstrap(&client, &parameters)?;

    let mut dispatcher = Dispatcher::new(parameters, &ledger);

    dispatcher.run(
      &client,
      &mut ledger,
      &SHUTTING_DOWN,
      self.max_transactions,
      Duration::from_secs(self.idle_interval),
    );

    Ok(Some(Box::new(Output::from(&ledger))))
  }
}

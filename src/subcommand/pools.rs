use super::*;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Output {
  pub batching: bool,
  pub consolidation_rounds: usize,
  pub destinations: usize,
  pub low_value: usize,
  pub low_value_value: u64,
  pub spendable: usize,
  pub spendable_value: u64,
}

impl Output {
  fn new(ledger: &Ledger, parameters: &Parameters) -> Self {
    let pools = ledger.pools();

    Self {
      batching: pools.low_value().len() > parameters.batch_threshold,
      consolidation_rounds: parameters.consolidation_rounds(pools.spendable().len()),
      destinations: ledger.destinations().len(),
      low_value: pools.low_value().len(),
      low_value_value: pools.low_value().value().to_sat(),
      spendable: pools.spendable().len(),
      spendable_value: pools.spendable().value().to_sat(),
    }
  }
}

pub(crate) fn run(settings: Settings) -> SubcommandResult {
  let client = settings.bitcoin_rpc_client()?;

  let parameters = settings.parameters();

  let ledger = Ledger::bootstrap(&client, &parameters)?;

  Ok(Some(Box::new(Output::new(&ledger, &parameters))))
}

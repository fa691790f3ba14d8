use super::*;

/// Fee, dust, and sizing limits. Read once at startup and never changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
  /// Low-value outputs needed before a batching transaction is issued.
  pub batch_threshold: usize,
  /// Outputs worth less than this are routed to the low-value pool.
  pub dust_floor: Amount,
  pub input_limit: usize,
  /// Reference page size for the consolidation heuristic.
  pub listunspent_limit: usize,
  pub output_limit: usize,
  /// Share of post-fee value carried forward by each one-to-one hop.
  pub retention_percent: u64,
  pub tx_fee: Amount,
}

impl Default for Parameters {
  fn default() -> Self {
    Self {
      batch_threshold: 5000,
      dust_floor: Amount::from_sat(546),
      input_limit: 50,
      listunspent_limit: 10_000,
      output_limit: 50,
      retention_percent: 90,
      tx_fee: Amount::ZERO,
    }
  }
}

impl Parameters {
  pub fn check(&self) -> Result {
    ensure!(
      self.output_limit > 0,
      "output limit must be greater than zero"
    );

    ensure!(
      self.input_limit > 0,
      "input limit must be greater than zero"
    );

    ensure!(
      self.dust_floor > Amount::ZERO,
      "dust floor must be greater than zero"
    );

    ensure!(
      (1..=100).contains(&self.retention_percent),
      "retention percent must be between 1 and 100, got {}",
      self.retention_percent
    );

    Ok(())
  }

  /// Number of many-to-one consolidation requests to issue before anything
  /// else, given the spendable pool size observed at bootstrap. Zero unless
  /// the pool is smaller than `listunspent_limit`.
  pub fn consolidation_rounds(&self, spendable: usize) -> usize {
    match self.listunspent_limit.checked_sub(spendable) {
      Some(deficit) if deficit > 0 => deficit / self.output_limit * 2,
      _ => 0,
    }
  }

  pub fn retain(&self, value: Amount) -> Amount {
    let retained = u128::from(value.to_sat()) * u128::from(self.retention_percent) / 100;
    Amount::from_sat(u64::try_from(retained).unwrap_or(u64::MAX))
  }

  pub fn is_dust(&self, value: Amount) -> bool {
    value < self.dust_floor
  }
}

use super::*;

/// Local bookkeeping of which outputs are believed spendable and where new
/// outputs go. Owned by the dispatcher and mutated only by settlement.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
  pub(crate) destinations: Destinations,
  pub(crate) failed: u64,
  pub(crate) pools: Pools,
  pub(crate) settled: u64,
  pub(crate) skipped: u64,
}

impl Ledger {
  pub fn new(pools: Pools, destinations: Destinations) -> Self {
    Self {
      destinations,
      failed: 0,
      pools,
      settled: 0,
      skipped: 0,
    }
  }

  pub fn bootstrap(node: &impl Node, parameters: &Parameters) -> SnafuResult<Self> {
    let unspent = node.unspent().snafu_context(error::Bootstrap)?;

    let mut pools = Pools::new(parameters.dust_floor);
    let mut directory = BTreeMap::new();

    for Unspent {
      outpoint,
      owner,
      script_pubkey,
      value,
    } in unspent
    {
      pools.insert(outpoint, value);

      if let Some(owner) = owner {
        directory.entry(owner).or_insert(script_pubkey);
      }
    }

    let destinations = Destinations::new(directory);

    if destinations.is_empty() {
      return error::NoDestinations.fail();
    }

    log::info!(
      "Bootstrapped {} spendable and {} low-value outputs with {} destinations",
      pools.spendable().len(),
      pools.low_value().len(),
      destinations.len(),
    );

    Ok(Self::new(pools, destinations))
  }

  pub fn destinations(&self) -> &Destinations {
    &self.destinations
  }

  pub fn failed(&self) -> u64 {
    self.failed
  }

  pub fn pools(&self) -> &Pools {
    &self.pools
  }

  pub fn settled(&self) -> u64 {
    self.settled
  }

  pub fn skipped(&self) -> u64 {
    self.skipped
  }
}

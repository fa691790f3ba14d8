use super::*;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pool(BTreeMap<OutPoint, Amount>);

impl Pool {
  pub fn contains(&self, outpoint: &OutPoint) -> bool {
    self.0.contains_key(outpoint)
  }

  pub fn get(&self, outpoint: &OutPoint) -> Option<Amount> {
    self.0.get(outpoint).copied()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (OutPoint, Amount)> + '_ {
    self.0.iter().map(|(outpoint, value)| (*outpoint, *value))
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn value(&self) -> Amount {
    self.0.values().copied().sum()
  }

  fn insert(&mut self, outpoint: OutPoint, value: Amount) {
    self.0.insert(outpoint, value);
  }

  fn remove(&mut self, outpoint: &OutPoint) -> Option<Amount> {
    self.0.remove(outpoint)
  }
}

/// The spendable and low-value pools. An outpoint lives in at most one of
/// them, and which one is decided once, when it is inserted.
///
/// Held outpoints stay in their pool but are never offered as inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct Pools {
  dust_floor: Amount,
  held: BTreeSet<OutPoint>,
  low_value: Pool,
  spendable: Pool,
}

impl Pools {
  pub fn new(dust_floor: Amount) -> Self {
    Self {
      dust_floor,
      held: BTreeSet::new(),
      low_value: Pool::default(),
      spendable: Pool::default(),
    }
  }

  pub fn contains(&self, outpoint: &OutPoint) -> bool {
    self.spendable.contains(outpoint) || self.low_value.contains(outpoint)
  }

  pub fn held(&self) -> usize {
    self.held.len()
  }

  /// Keep `outpoint` out of assembly until it is removed or reinserted.
  /// Returns false if it is in neither pool or already held.
  pub fn hold(&mut self, outpoint: OutPoint) -> bool {
    self.contains(&outpoint) && self.held.insert(outpoint)
  }

  pub fn low_value_inputs(&self) -> impl Iterator<Item = (OutPoint, Amount)> + '_ {
    self
      .low_value
      .iter()
      .filter(|(outpoint, _)| !self.held.contains(outpoint))
  }

  pub fn spendable_inputs(&self) -> impl Iterator<Item = (OutPoint, Amount)> + '_ {
    self
      .spendable
      .iter()
      .filter(|(outpoint, _)| !self.held.contains(outpoint))
  }

  pub fn insert(&mut self, outpoint: OutPoint, value: Amount) {
    self.remove(&outpoint);

    if value < self.dust_floor {
      self.low_value.insert(outpoint, value);
    } else {
      self.spendable.insert(outpoint, value);
    }
  }

  pub fn low_value(&self) -> &Pool {
    &self.low_value
  }

  pub fn remove(&mut self, outpoint: &OutPoint) -> Option<Amount> {
    self.held.remove(outpoint);

    self
      .spendable
      .remove(outpoint)
      .or_else(|| self.low_value.remove(outpoint))
  }

  pub fn spendable(&self) -> &Pool {
    &self.spendable
  }
}

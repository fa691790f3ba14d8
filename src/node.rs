use {super::*, bitcoincore_rpc::json::ListUnspentResultEntry};

#[derive(Debug, Clone, PartialEq)]
pub struct Unspent {
  pub outpoint: OutPoint,
  pub owner: Option<String>,
  pub script_pubkey: ScriptBuf,
  pub value: Amount,
}

impl From<ListUnspentResultEntry> for Unspent {
  fn from(entry: ListUnspentResultEntry) -> Self {
    Self {
      outpoint: OutPoint::new(entry.txid, entry.vout),
      owner: entry
        .address
        .map(|address| address.assume_checked().to_string())
        .or(entry.label.filter(|label| !label.is_empty())),
      script_pubkey: entry.script_pub_key,
      value: entry.amount,
    }
  }
}

impl Unspent {
  /// Entries the wallet can sign for. Watch-only and unsolvable outputs
  /// would fail every signing attempt, so they never enter the pools.
  pub(crate) fn signable(entries: Vec<ListUnspentResultEntry>) -> Vec<Self> {
    entries
      .into_iter()
      .filter(|entry| entry.spendable && entry.solvable)
      .map(Self::from)
      .collect()
  }
}

/// The ledger node that enumerates, signs, and broadcasts on our behalf.
pub trait Node {
  fn unspent(&self) -> Result<Vec<Unspent>, bitcoincore_rpc::Error>;

  fn sign(&self, transaction: &Transaction) -> Result<Vec<u8>, bitcoincore_rpc::Error>;

  fn broadcast(&self, signed: &[u8]) -> Result<Txid, bitcoincore_rpc::Error>;
}

impl Node for Client {
  fn unspent(&self) -> Result<Vec<Unspent>, bitcoincore_rpc::Error> {
    Ok(Unspent::signable(
      self.list_unspent(None, None, None, None, None)?,
    ))
  }

  fn sign(&self, transaction: &Transaction) -> Result<Vec<u8>, bitcoincore_rpc::Error> {
    let result = self.sign_raw_transaction_with_wallet(transaction, None, None)?;

    if !result.complete {
      return Err(bitcoincore_rpc::Error::ReturnedError(format!(
        "incomplete signature: {}",
        result
          .errors
          .unwrap_or_default()
          .into_iter()
          .map(|error| format!("{}:{}: {}", error.txid, error.vout, error.error))
          .collect::<Vec<String>>()
          .join(", ")
      )));
    }

    Ok(result.hex)
  }

  fn broadcast(&self, signed: &[u8]) -> Result<Txid, bitcoincore_rpc::Error> {
    self.send_raw_transaction(signed)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn entry(amount: &str, address: Option<&str>, label: Option<&str>) -> ListUnspentResultEntry {
    let mut entry = serde_json::json!({
      "txid": txid(1).to_string(),
      "vout": 3,
      "scriptPubKey": "0014751e76e8199196d454941c45d1b3a323f1433bd6",
      "amount": serde_json::Value::Number(amount.parse().unwrap()),
      "confirmations": 6,
      "spendable": true,
      "solvable": true,
      "safe": true,
    });

    if let Some(address) = address {
      entry["address"] = address.into();
    }

    if let Some(label) = label {
      entry["label"] = label.into();
    }

    serde_json::from_value(entry).unwrap()
  }

  #[test]
  fn amounts_are_converted_to_sats_once() {
    for (btc, sat) in [
      ("0.00000546", 546),
      ("0.00000001", 1),
      ("0.1", 10_000_000),
      ("0.29999999", 29_999_999),
      ("1.00000001", 100_000_001),
      ("20999999.9769", 2_099_999_997_690_000),
    ] {
      let unspent = Unspent::from(entry(btc, None, None));

      assert_eq!(unspent.value, Amount::from_sat(sat));
      assert_eq!(unspent.value.to_btc(), btc.parse::<f64>().unwrap());
    }
  }

  #[test]
  fn btc_round_trip_is_within_one_sat() {
    for sat in [1, 545, 546, 547, 12_345_678, 2_099_999_997_690_000] {
      let amount = Amount::from_sat(sat);
      let round_tripped = Amount::from_btc(amount.to_btc()).unwrap();
      assert!(round_tripped.to_sat().abs_diff(sat) <= 1);
    }
  }

  #[test]
  fn unspent_from_entry() {
    pretty_assert_eq!(
      Unspent::from(entry(
        "0.5",
        Some("bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4"),
        Some("foo")
      )),
      Unspent {
        outpoint: OutPoint::new(txid(1), 3),
        owner: Some("bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4".into()),
        script_pubkey: ScriptBuf::from_hex("0014751e76e8199196d454941c45d1b3a323f1433bd6").unwrap(),
        value: Amount::from_sat(50_000_000),
      }
    );
  }

  #[test]
  fn unsignable_entries_are_dropped() {
    let mut watch_only = entry("0.5", None, Some("foo"));
    watch_only.spendable = false;

    let mut unsolvable = entry("0.5", None, Some("bar"));
    unsolvable.solvable = false;

    let signable = entry("0.5", None, Some("baz"));

    assert_eq!(
      Unspent::signable(vec![watch_only, unsolvable, signable])
        .into_iter()
        .map(|unspent| unspent.owner)
        .collect::<Vec<Option<String>>>(),
      vec![Some("baz".into())]
    );
  }

  #[test]
  fn owner_falls_back_to_label() {
    assert_eq!(
      Unspent::from(entry("0.5", None, Some("foo"))).owner,
      Some("foo".into())
    );
    assert_eq!(Unspent::from(entry("0.5", None, Some(""))).owner, None);
    assert_eq!(Unspent::from(entry("0.5", None, None)).owner, None);
  }
}

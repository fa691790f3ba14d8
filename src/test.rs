pub(crate) use {
  super::*,
  bitcoin::hashes::Hash,
  pretty_assertions::assert_eq as pretty_assert_eq,
  std::{cell::RefCell, iter},
};

macro_rules! assert_matches {
  ($expression:expr, $( $pattern:pat_param )|+ $( if $guard:expr )? $(,)?) => {
    match $expression {
      $( $pattern )|+ $( if $guard )? => {}
      left => panic!(
        "assertion failed: (left ~= right)\n  left: `{:?}`\n right: `{}`",
        left,
        stringify!($($pattern)|+ $(if $guard)?)
      ),
    }
  }
}

pub(crate) fn txid(n: u64) -> Txid {
  let hex = format!("{n:x}");

  if hex.is_empty() || hex.len() > 1 {
    panic!();
  }

  hex.repeat(64).parse().unwrap()
}

pub(crate) fn outpoint(n: u64) -> OutPoint {
  format!("{}:{}", txid(n), n).parse().unwrap()
}

pub(crate) fn script(n: u8) -> ScriptBuf {
  ScriptBuf::from_bytes(vec![0x00, 0x14].into_iter().chain([n; 20]).collect())
}

pub(crate) fn tx_in(previous_output: OutPoint) -> TxIn {
  TxIn {
    previous_output,
    script_sig: ScriptBuf::new(),
    sequence: Sequence::ENABLE_RBF_NO_LOCKTIME,
    witness: Witness::new(),
  }
}

pub(crate) fn tx_out(value: u64, script_pubkey: ScriptBuf) -> TxOut {
  TxOut {
    value: Amount::from_sat(value),
    script_pubkey,
  }
}

pub(crate) fn unspent(n: u8, owner: &str, value: u64) -> Unspent {
  Unspent {
    outpoint: outpoint(n.into()),
    owner: Some(owner.into()),
    script_pubkey: script(n),
    value: Amount::from_sat(value),
  }
}

#[derive(Default)]
struct State {
  broadcasts: Vec<Txid>,
  fail_broadcast: bool,
  fail_sign: bool,
  fail_unspent: bool,
  signed: Vec<Transaction>,
  unsignable: BTreeSet<OutPoint>,
}

/// In-memory node that signs by serializing and mints sequential txids.
pub(crate) struct FakeNode {
  state: RefCell<State>,
  unspent: Vec<Unspent>,
}

impl FakeNode {
  pub(crate) fn new(unspent: Vec<Unspent>) -> Self {
    Self {
      state: default(),
      unspent,
    }
  }

  pub(crate) fn broadcasts(&self) -> Vec<Txid> {
    self.state.borrow().broadcasts.clone()
  }

  pub(crate) fn fail_broadcast(&self) {
    self.state.borrow_mut().fail_broadcast = true;
  }

  pub(crate) fn fail_sign(&self) {
    self.state.borrow_mut().fail_sign = true;
  }

  pub(crate) fn fail_unspent(&self) {
    self.state.borrow_mut().fail_unspent = true;
  }

  /// Refuse to sign any transaction that spends `outpoint`.
  pub(crate) fn refuse(&self, outpoint: OutPoint) {
    self.state.borrow_mut().unsignable.insert(outpoint);
  }

  pub(crate) fn signed(&self) -> Vec<Transaction> {
    self.state.borrow().signed.clone()
  }
}

impl Node for FakeNode {
  fn unspent(&self) -> Result<Vec<Unspent>, bitcoincore_rpc::Error> {
    if self.state.borrow().fail_unspent {
      return Err(bitcoincore_rpc::Error::ReturnedError(
        "connection refused".into(),
      ));
    }

    Ok(self.unspent.clone())
  }

  fn sign(&self, transaction: &Transaction) -> Result<Vec<u8>, bitcoincore_rpc::Error> {
    let mut state = self.state.borrow_mut();

    if state.fail_sign
      || transaction
        .input
        .iter()
        .any(|input| state.unsignable.contains(&input.previous_output))
    {
      return Err(bitcoincore_rpc::Error::ReturnedError(
        "wallet locked".into(),
      ));
    }

    state.signed.push(transaction.clone());

    Ok(bitcoin::consensus::serialize(transaction))
  }

  fn broadcast(&self, _signed: &[u8]) -> Result<Txid, bitcoincore_rpc::Error> {
    let mut state = self.state.borrow_mut();

    if state.fail_broadcast {
      return Err(bitcoincore_rpc::Error::ReturnedError(
        "bad-txns-inputs-missingorspent".into(),
      ));
    }

    let mut bytes = [0; 32];
    bytes[..8].copy_from_slice(&u64::try_from(state.broadcasts.len() + 1).unwrap().to_be_bytes());

    let txid = Txid::from_byte_array(bytes);

    state.broadcasts.push(txid);

    Ok(txid)
  }
}

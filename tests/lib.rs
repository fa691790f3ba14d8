use {
  self::{command_builder::CommandBuilder, scripted_node::ScriptedNode},
  bitcoin::{hashes::Hash, Amount, OutPoint, ScriptBuf, Transaction, Txid},
  churn::{
    Destinations, Dispatcher, Ledger, Node, Parameters, Phase, Pools, Shape, Step, Unspent,
  },
  executable_path::executable_path,
  pretty_assertions::assert_eq as pretty_assert_eq,
  regex::Regex,
  std::{
    cell::RefCell,
    collections::{BTreeMap, BTreeSet},
    fs,
    process::{Command, Stdio},
    str,
    sync::atomic::AtomicBool,
    time::Duration,
  },
  tempfile::TempDir,
};



fn txid(n: u64) -> Txid {
  let mut bytes = [0; 32];
  bytes[24..].copy_from_slice(&n.to_be_bytes());
  Txid::from_byte_array(bytes)
}

fn script(n: u8) -> ScriptBuf {
  ScriptBuf::from_bytes(vec![0x00, 0x14].into_iter().chain([n; 20]).collect())
}

fn ledger(spendable: &[u64], low_value: &[u64]) -> Ledger {
  let mut pools = Pools::new(Parameters::default().dust_floor);

  for (vout, value) in (0..).zip(spendable.iter().chain(low_value)) {
    pools.insert(OutPoint::new(txid(0), vout), Amount::from_sat(*value));
  }

  Ledger::new(
    pools,
    Destinations::new(
      [
        ("alice".to_string(), script(1)),
        ("bob".to_string(), script(2)),
      ]
      .into(),
    ),
  )
}

fn shape(step: &Step) -> Shape {
  match step {
    Step::Settled { shape, .. } => *shape,
    Step::Failed(err) => err.shape(),
    Step::Skipped(err) => err.shape(),
  }
}

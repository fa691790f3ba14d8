use super::*;

impl Ledger {
  /// Sign and broadcast `skeleton`, then reconcile the pools.
  ///
  /// Consumed inputs stay in their pools if signing fails, since nothing was
  /// submitted, but are held back so the next request picks other inputs.
  /// Once a signed transaction is handed to the node its inputs are removed
  /// for good, whether or not the broadcast is accepted. Only an accepted
  /// broadcast adds the new outputs back into the pools.
  pub fn settle(
    &mut self,
    node: &impl Node,
    skeleton: Skeleton,
  ) -> Result<Txid, SettlementError> {
    let value = skeleton.output_value();

    let Skeleton {
      consumed,
      shape,
      transaction,
    } = skeleton;

    let signed = match node
      .sign(&transaction)
      .snafu_context(error::Sign { shape })
    {
      Ok(signed) => signed,
      Err(err) => {
        for outpoint in &consumed {
          self.pools.hold(*outpoint);
        }

        return Err(self.failure(err));
      }
    };

    for outpoint in &consumed {
      self.pools.remove(outpoint);
    }

    let txid = match node
      .broadcast(&signed)
      .snafu_context(error::Broadcast { shape })
    {
      Ok(txid) => txid,
      Err(err) => return Err(self.failure(err)),
    };

    for (vout, output) in (0..).zip(&transaction.output) {
      self.pools.insert(OutPoint { txid, vout }, output.value);
    }

    self.settled += 1;

    log::info!(
      "settlement outcome=success shape={shape} txid={txid} inputs={} outputs={} value={} settled={}",
      consumed.len(),
      transaction.output.len(),
      value.to_sat(),
      self.settled,
    );

    Ok(txid)
  }

  fn failure(&mut self, err: SettlementError) -> SettlementError {
    self.failed += 1;

    log::warn!(
      "settlement outcome=failure shape={} failed={} held={} reason={}",
      err.shape(),
      self.failed,
      self.pools.held(),
      err
        .iter_chain()
        .map(ToString::to_string)
        .collect::<Vec<String>>()
        .join(": "),
    );

    err
  }
}

use super::*;

/// An unsigned transaction built from pool inputs, along with the outpoints
/// it consumes. Lives only from assembly through settlement.
#[derive(Debug, Clone, PartialEq)]
pub struct Skeleton {
  pub consumed: Vec<OutPoint>,
  pub shape: Shape,
  pub transaction: Transaction,
}

impl Skeleton {
  /// Build a transaction of `shape` from the current pools without mutating
  /// them. Inputs are only removed once settlement actually submits them.
  pub fn assemble(
    shape: Shape,
    pools: &Pools,
    destinations: &mut Destinations,
    parameters: &Parameters,
  ) -> Result<Self, AssemblyError> {
    match shape {
      Shape::OneToOne => Self::one_to_one(pools, destinations, parameters),
      Shape::OneToMany => Self::one_to_many(pools, destinations, parameters),
      Shape::ManyToOne => Self::many_to_one(pools, destinations, parameters),
    }
  }

  fn one_to_one(
    pools: &Pools,
    destinations: &mut Destinations,
    parameters: &Parameters,
  ) -> Result<Self, AssemblyError> {
    let shape = Shape::OneToOne;

    let mut inputs = pools.spendable_inputs().peekable();

    if inputs.peek().is_none() {
      return error::NoInput { shape }.fail();
    }

    // inputs too small to pay the fee and still carry value forward are skipped
    let Some((outpoint, value)) = inputs
      .map(|(outpoint, value)| {
        let available = value.checked_sub(parameters.tx_fee).unwrap_or(Amount::ZERO);
        (outpoint, parameters.retain(available))
      })
      .find(|(_, value)| *value > Amount::ZERO)
    else {
      return error::Insufficient {
        shape,
        available: Amount::ZERO,
        required: Amount::from_sat(1),
      }
      .fail();
    };

    let script_pubkey = destinations
      .select()
      .ok_or(AssemblyError::NoDestination { shape })?;

    Ok(Self::new(
      shape,
      vec![outpoint],
      vec![TxOut {
        value,
        script_pubkey,
      }],
    ))
  }

  fn one_to_many(
    pools: &Pools,
    destinations: &mut Destinations,
    parameters: &Parameters,
  ) -> Result<Self, AssemblyError> {
    let shape = Shape::OneToMany;

    let inputs = pools
      .low_value_inputs()
      .take(parameters.input_limit)
      .collect::<Vec<(OutPoint, Amount)>>();

    let available = Self::available(shape, &inputs, parameters)?;

    let fundable = available.to_sat() / parameters.dust_floor.to_sat();

    let count = parameters
      .output_limit
      .min(usize::try_from(fundable).unwrap_or(usize::MAX));

    if count == 0 {
      return error::Insufficient {
        shape,
        available,
        required: parameters.dust_floor,
      }
      .fail();
    }

    let count = u64::try_from(count).unwrap_or(u64::MAX);
    let share = available.to_sat() / count;
    let remainder = available.to_sat() % count;

    let mut outputs = Vec::new();
    for i in 0..count {
      let script_pubkey = destinations
        .select()
        .ok_or(AssemblyError::NoDestination { shape })?;

      outputs.push(TxOut {
        value: Amount::from_sat(if i + 1 == count {
          share + remainder
        } else {
          share
        }),
        script_pubkey,
      });
    }

    Ok(Self::new(
      shape,
      inputs.into_iter().map(|(outpoint, _)| outpoint).collect(),
      outputs,
    ))
  }

  fn many_to_one(
    pools: &Pools,
    destinations: &mut Destinations,
    parameters: &Parameters,
  ) -> Result<Self, AssemblyError> {
    let shape = Shape::ManyToOne;

    let inputs = pools
      .spendable_inputs()
      .take(parameters.input_limit)
      .collect::<Vec<(OutPoint, Amount)>>();

    let available = Self::available(shape, &inputs, parameters)?;

    if parameters.is_dust(available) {
      return error::Insufficient {
        shape,
        available,
        required: parameters.dust_floor,
      }
      .fail();
    }

    let script_pubkey = destinations
      .select()
      .ok_or(AssemblyError::NoDestination { shape })?;

    Ok(Self::new(
      shape,
      inputs.into_iter().map(|(outpoint, _)| outpoint).collect(),
      vec![TxOut {
        value: available,
        script_pubkey,
      }],
    ))
  }

  /// Sum of `inputs` less the transaction fee.
  fn available(
    shape: Shape,
    inputs: &[(OutPoint, Amount)],
    parameters: &Parameters,
  ) -> Result<Amount, AssemblyError> {
    if inputs.is_empty() {
      return error::NoInput { shape }.fail();
    }

    let total = inputs.iter().map(|(_, value)| *value).sum::<Amount>();

    total
      .checked_sub(parameters.tx_fee)
      .ok_or(AssemblyError::Insufficient {
        shape,
        available: total,
        required: parameters.tx_fee,
      })
  }

  fn new(shape: Shape, consumed: Vec<OutPoint>, output: Vec<TxOut>) -> Self {
    Self {
      transaction: Transaction {
        version: Version::TWO,
        lock_time: LockTime::ZERO,
        input: consumed
          .iter()
          .map(|outpoint| TxIn {
            previous_output: *outpoint,
            script_sig: ScriptBuf::new(),
            sequence: Sequence::ENABLE_RBF_NO_LOCKTIME,
            witness: Witness::new(),
          })
          .collect(),
        output,
      },
      consumed,
      shape,
    }
  }

  pub fn output_value(&self) -> Amount {
    self.transaction.output.iter().map(|output| output.value).sum()
  }
}

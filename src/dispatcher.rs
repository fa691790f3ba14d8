use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
  /// Many-to-one requests still owed from the bootstrap deficit.
  Consolidating { remaining: usize },
  /// A single one-to-many request if the low-value pool is over threshold.
  Batching,
  /// One-to-one requests, indefinitely.
  SteadyState,
}

#[derive(Debug)]
pub enum Step {
  Settled { shape: Shape, txid: Txid },
  Failed(SettlementError),
  Skipped(AssemblyError),
}

/// Decides which transaction shape to request next and routes each request
/// through assembly and settlement. Consolidation always runs before
/// batching, and batching before steady-state load.
#[derive(Debug, Clone)]
pub struct Dispatcher {
  parameters: Parameters,
  phase: Phase,
  stalled: bool,
}

impl Dispatcher {
  pub fn new(parameters: Parameters, ledger: &Ledger) -> Self {
    let remaining = parameters.consolidation_rounds(ledger.pools().spendable().len());

    log::info!("Dispatching {remaining} consolidation rounds before steady state");

    Self {
      parameters,
      phase: if remaining > 0 {
        Phase::Consolidating { remaining }
      } else {
        Phase::Batching
      },
      stalled: false,
    }
  }

  pub fn phase(&self) -> Phase {
    self.phase
  }

  /// True when steady state found nothing to spend on its last step.
  pub fn stalled(&self) -> bool {
    self.stalled
  }

  pub fn step(&mut self, node: &impl Node, ledger: &mut Ledger) -> Step {
    match self.phase {
      Phase::Consolidating { remaining } => {
        self.phase = if remaining > 1 {
          Phase::Consolidating {
            remaining: remaining - 1,
          }
        } else {
          Phase::Batching
        };

        self.request(Shape::ManyToOne, node, ledger)
      }
      Phase::Batching => {
        self.phase = Phase::SteadyState;

        if ledger.pools().low_value().len() > self.parameters.batch_threshold {
          self.stalled = false;
          self.request(Shape::OneToMany, node, ledger)
        } else {
          self.step(node, ledger)
        }
      }
      Phase::SteadyState => {
        let step = self.request(Shape::OneToOne, node, ledger);

        // give accumulated low-value outputs another chance before retrying
        self.stalled = matches!(step, Step::Skipped(_));

        if self.stalled {
          self.phase = Phase::Batching;
        }

        step
      }
    }
  }

  /// Step until `shutdown` is set or `limit` transactions have settled,
  /// sleeping for `idle` whenever there is nothing left to spend.
  pub fn run(
    &mut self,
    node: &impl Node,
    ledger: &mut Ledger,
    shutdown: &AtomicBool,
    limit: Option<u64>,
    idle: Duration,
  ) {
    loop {
      if shutdown.load(atomic::Ordering::Relaxed) {
        log::info!("Shutdown requested, stopping after {} settlements", ledger.settled());
        break;
      }

      if limit.is_some_and(|limit| ledger.settled() >= limit) {
        log::info!("Settled {} transactions, stopping", ledger.settled());
        break;
      }

      self.step(node, ledger);

      if self.stalled {
        log::info!(
          "No spendable output available, waiting {}s",
          idle.as_secs_f64()
        );
        thread::sleep(idle);
      }
    }
  }

  fn request(&self, shape: Shape, node: &impl Node, ledger: &mut Ledger) -> Step {
    let skeleton = match Skeleton::assemble(
      shape,
      &ledger.pools,
      &mut ledger.destinations,
      &self.parameters,
    ) {
      Ok(skeleton) => skeleton,
      Err(err) => {
        ledger.skipped += 1;
        log::debug!("Skipped {shape} request: {err}");
        return Step::Skipped(err);
      }
    };

    match ledger.settle(node, skeleton) {
      Ok(txid) => Step::Settled { shape, txid },
      Err(err) => Step::Failed(err),
    }
  }
}

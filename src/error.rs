use super::*;

#[derive(Debug, Snafu)]
#[snafu(context(suffix(false)), visibility(pub(crate)))]
pub enum SnafuError {
  #[snafu(display("{err}"))]
  Anyhow { err: anyhow::Error },
  #[snafu(display("failed to list unspent outputs"))]
  Bootstrap {
    backtrace: Backtrace,
    source: bitcoincore_rpc::Error,
  },
  #[snafu(display("failed to parse config file `{}`", path.display()))]
  ConfigParse {
    backtrace: Backtrace,
    path: PathBuf,
    source: serde_yaml::Error,
  },
  #[snafu(display("I/O error at `{}`", path.display()))]
  Io {
    backtrace: Backtrace,
    path: PathBuf,
    source: io::Error,
  },
  #[snafu(display("no unspent output has an owner to send new outputs to"))]
  NoDestinations { backtrace: Backtrace },
}

impl From<Error> for SnafuError {
  fn from(err: Error) -> SnafuError {
    Self::Anyhow { err }
  }
}

/// Reasons a requested transaction could not be built from the current pools.
/// These are never fatal; the dispatcher skips the request and carries on.
#[derive(Debug, PartialEq, Snafu)]
#[snafu(context(suffix(false)), visibility(pub(crate)))]
pub enum AssemblyError {
  #[snafu(display("no input available for {shape} transaction"))]
  NoInput { shape: Shape },
  #[snafu(display("no destination available for {shape} transaction"))]
  NoDestination { shape: Shape },
  #[snafu(display(
    "{shape} inputs carry {available} after fees but at least {required} is needed"
  ))]
  Insufficient {
    shape: Shape,
    available: Amount,
    required: Amount,
  },
}

impl AssemblyError {
  pub fn shape(&self) -> Shape {
    match self {
      Self::NoInput { shape } | Self::NoDestination { shape } | Self::Insufficient { shape, .. } => {
        *shape
      }
    }
  }
}

#[derive(Debug, Snafu)]
#[snafu(context(suffix(false)), visibility(pub(crate)))]
pub enum SettlementError {
  #[snafu(display("failed to sign {shape} transaction"))]
  Sign {
    shape: Shape,
    source: bitcoincore_rpc::Error,
  },
  #[snafu(display("failed to broadcast {shape} transaction"))]
  Broadcast {
    shape: Shape,
    source: bitcoincore_rpc::Error,
  },
}

impl SettlementError {
  pub fn shape(&self) -> Shape {
    match self {
      Self::Sign { shape, .. } | Self::Broadcast { shape, .. } => *shape,
    }
  }
}

/// We use `anyhow` for error handling at the edges and typed `snafu` errors
/// in the core. This trait exists to provide access to
/// `snafu::ResultExt::{context, with_context}`, which are otherwise shadowed
/// by `anyhow::Context::{context, with_context}`.
pub(crate) trait ResultExt<T, E>: Sized {
  fn snafu_context<C, E2>(self, context: C) -> Result<T, E2>
  where
    C: snafu::IntoError<E2, Source = E>,
    E2: std::error::Error + snafu::ErrorCompat;

  fn with_snafu_context<F, C, E2>(self, context: F) -> Result<T, E2>
  where
    F: FnOnce(&mut E) -> C,
    C: snafu::IntoError<E2, Source = E>,
    E2: std::error::Error + snafu::ErrorCompat;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E> {
  fn snafu_context<C, E2>(self, context: C) -> Result<T, E2>
  where
    C: snafu::IntoError<E2, Source = E>,
    E2: std::error::Error + snafu::ErrorCompat,
  {
    use snafu::ResultExt;
    self.context(context)
  }

  fn with_snafu_context<F, C, E2>(self, context: F) -> Result<T, E2>
  where
    F: FnOnce(&mut E) -> C,
    C: snafu::IntoError<E2, Source = E>,
    E2: std::error::Error + snafu::ErrorCompat,
  {
    use snafu::ResultExt;
    self.with_context(context)
  }
}

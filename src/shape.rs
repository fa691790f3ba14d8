use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Shape {
  /// One spendable input to one output, the steady-state load.
  OneToOne,
  /// Low-value inputs batched into several spendable outputs.
  OneToMany,
  /// Many spendable inputs consolidated into one output.
  ManyToOne,
}

impl Display for Shape {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(
      f,
      "{}",
      match self {
        Self::OneToOne => "s2s",
        Self::OneToMany => "s2m",
        Self::ManyToOne => "m2s",
      }
    )
  }
}

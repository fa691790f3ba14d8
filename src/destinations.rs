use super::*;

/// Owner scripts that new outputs are paid to, handed out round-robin in
/// owner order so that runs are reproducible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Destinations {
  entries: Vec<(String, ScriptBuf)>,
  next: usize,
}

impl Destinations {
  pub fn new(directory: BTreeMap<String, ScriptBuf>) -> Self {
    Self {
      entries: directory.into_iter().collect(),
      next: 0,
    }
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn select(&mut self) -> Option<ScriptBuf> {
    let (_owner, script_pubkey) = self.entries.get(self.next)?;
    self.next = (self.next + 1) % self.entries.len();
    Some(script_pubkey.clone())
  }
}

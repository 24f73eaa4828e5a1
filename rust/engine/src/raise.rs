use std::collections::HashMap;

use crate::errors::TableError;
use crate::player::RaiseResponse;

/// Bookkeeping for one open raise: which players were invited to respond
/// and what each has answered so far.
///
/// This is pure state. The timed wait that drives it (finish early the
/// instant everyone has answered, else fold absentees at the deadline)
/// belongs to the hosting layer.
#[derive(Debug)]
pub struct RaiseSession {
    expected: Vec<String>,
    responses: HashMap<String, RaiseResponse>,
}

impl RaiseSession {
    pub fn new<I, S>(expected: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            expected: expected.into_iter().map(Into::into).collect(),
            responses: HashMap::new(),
        }
    }

    /// Records a response. Strangers and duplicate responders are
    /// declined without touching recorded state.
    pub fn record(&mut self, identity: &str, response: RaiseResponse) -> Result<(), TableError> {
        if !self.expected.iter().any(|e| e == identity) {
            return Err(TableError::NotEligible);
        }
        if self.responses.contains_key(identity) {
            return Err(TableError::AlreadyResponded);
        }
        self.responses.insert(identity.to_string(), response);
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.expected
            .iter()
            .all(|id| self.responses.contains_key(id))
    }

    /// Invited responders who have not answered, in invitation order.
    pub fn absentees(&self) -> Vec<String> {
        self.expected
            .iter()
            .filter(|id| !self.responses.contains_key(id.as_str()))
            .cloned()
            .collect()
    }

    pub fn response(&self, identity: &str) -> Option<RaiseResponse> {
        self.responses.get(identity).copied()
    }

    pub fn expected(&self) -> &[String] {
        &self.expected
    }
}

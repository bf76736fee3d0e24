//! Static two-member topology
//!
//! The production network has exactly two organizations; whoever the caller
//! is, the counterparty is the other one. Injected behind
//! [`CounterpartyResolver`] so the state machine never assumes the member
//! count.

use crate::error::{ProtocolError, ProtocolResult};
use crate::ports::outbound::CounterpartyResolver;
use shared_types::{OrgName, Party};

/// Fixed two-organization network map.
#[derive(Debug, Clone)]
pub struct StaticTopology {
    members: [Party; 2],
}

impl StaticTopology {
    pub fn new(first: Party, second: Party) -> Self {
        Self {
            members: [first, second],
        }
    }

    /// Look up a member party by organization component.
    pub fn member(&self, organisation: &str) -> Option<&Party> {
        self.members
            .iter()
            .find(|p| p.organisation() == organisation)
    }
}

impl CounterpartyResolver for StaticTopology {
    fn counterparty_of(&self, caller: &OrgName) -> ProtocolResult<Party> {
        let [a, b] = &self.members;
        if caller.organisation == a.organisation() {
            Ok(b.clone())
        } else if caller.organisation == b.organisation() {
            Ok(a.clone())
        } else {
            Err(ProtocolError::UnknownCounterparty {
                organisation: caller.organisation.clone(),
            })
        }
    }
}

//! Invariant validator
//!
//! Pure per-kind rule sets, evaluated before any signature is requested.
//! Both the proposer and the counterparty run the same functions over the
//! same transition data; neither signs a transition it has not validated.
//!
//! `now` is always an explicit argument: two calls with the same inputs
//! yield the same verdict.

use crate::domain::record::{RecordFields, RecordVersion};
use crate::error::InvariantViolation;
use shared_types::Timestamp;

/// Names of the record invariants, as reported in [`InvariantViolation`].
pub mod rules {
    pub const PARTIES_DISTINCT: &str = "firstParty!=secondParty";
    pub const KIND_UNCHANGED: &str = "kind unchanged";
    pub const ID_UNCHANGED: &str = "logicalRecordId unchanged";
    pub const RECORDED_AT_NOT_FUTURE: &str = "recordedAt<=now";
    pub const HOSTNAME_NOT_EMPTY: &str = "hostname not empty";
    pub const DEVICE_ADDRESS_NOT_EMPTY: &str = "deviceAddress not empty";
    pub const HOSTNAME_UNCHANGED: &str = "hostname unchanged";
    pub const DEVICE_ADDRESS_UNCHANGED: &str = "deviceAddress unchanged";

    pub const SAMPLE_TIME_NOT_FUTURE: &str = "sampleTime<=now";
    pub const PAYLOAD_EMPTY_ON_ISSUE: &str = "payload empty on issue";
    pub const CORRELATION_EMPTY_ON_ISSUE: &str = "correlationId empty on issue";
    pub const PAYLOAD_MUST_DIFFER: &str = "payload must differ";
    pub const CORRELATION_NOT_EMPTY_ON_UPDATE: &str = "correlationId not empty on update";

    pub const ISSUE_TIME_NOT_FUTURE: &str = "issueTime<=now";
    pub const COMMAND_PAYLOAD_NOT_EMPTY: &str = "commandPayload not empty";
    pub const STATUS_NOT_EMPTY: &str = "status not empty";
    pub const STATUS_MUST_DIFFER: &str = "status must differ";
    pub const COMMAND_PAYLOAD_MUST_DIFFER: &str = "commandPayload must differ";

    pub const REQUESTED_AT_NOT_FUTURE: &str = "requestedAt<=now";
    pub const WINDOW_ORDERED: &str = "windowStart<windowEnd";
    pub const PAYLOAD_NOT_EMPTY: &str = "payload not empty";

    pub const BINARY_PAYLOAD_NOT_EMPTY: &str = "binaryPayload not empty";
    pub const BINARY_PAYLOAD_MUST_DIFFER: &str = "binaryPayload must differ";
}

fn require(ok: bool, violation: impl FnOnce() -> InvariantViolation) -> Result<(), InvariantViolation> {
    if ok {
        Ok(())
    } else {
        Err(violation())
    }
}

fn require_not_empty(value: &str, rule: &'static str) -> Result<(), InvariantViolation> {
    require(!value.is_empty(), || {
        InvariantViolation::new(rule, "non-empty", "empty")
    })
}

fn require_not_future(
    value: Timestamp,
    now: Timestamp,
    rule: &'static str,
) -> Result<(), InvariantViolation> {
    require(value <= now, || {
        InvariantViolation::new(rule, format!("<= {now}"), value.to_string())
    })
}

/// Rules common to every candidate version, issue and update alike.
fn validate_common(candidate: &RecordVersion, now: Timestamp) -> Result<(), InvariantViolation> {
    require(candidate.first_party != candidate.second_party, || {
        InvariantViolation::new(
            rules::PARTIES_DISTINCT,
            "two distinct organizations",
            candidate.first_party.to_string(),
        )
    })?;
    require_not_future(candidate.recorded_at, now, rules::RECORDED_AT_NOT_FUTURE)?;
    require_not_empty(candidate.fields.hostname(), rules::HOSTNAME_NOT_EMPTY)?;
    require_not_empty(
        candidate.fields.device_address(),
        rules::DEVICE_ADDRESS_NOT_EMPTY,
    )?;
    Ok(())
}

/// Validate a candidate first version (Issue transition, no predecessor).
pub fn validate_issue(candidate: &RecordVersion, now: Timestamp) -> Result<(), InvariantViolation> {
    validate_common(candidate, now)?;

    match &candidate.fields {
        RecordFields::Measurement(f) => {
            require_not_future(f.sample_time, now, rules::SAMPLE_TIME_NOT_FUTURE)?;
            require(f.payload.is_empty(), || {
                InvariantViolation::new(rules::PAYLOAD_EMPTY_ON_ISSUE, "empty", &f.payload)
            })?;
            require(f.correlation_id.is_empty(), || {
                InvariantViolation::new(
                    rules::CORRELATION_EMPTY_ON_ISSUE,
                    "empty",
                    &f.correlation_id,
                )
            })?;
        }
        RecordFields::Command(f) => {
            require_not_future(f.issue_time, now, rules::ISSUE_TIME_NOT_FUTURE)?;
            require_not_empty(&f.command_payload, rules::COMMAND_PAYLOAD_NOT_EMPTY)?;
            require_not_empty(&f.status, rules::STATUS_NOT_EMPTY)?;
        }
        RecordFields::ForcedMeasureWindow(f) => {
            require_not_future(f.requested_at, now, rules::REQUESTED_AT_NOT_FUTURE)?;
            require_not_empty(&f.payload, rules::PAYLOAD_NOT_EMPTY)?;
            require(f.window_start < f.window_end, || {
                InvariantViolation::new(
                    rules::WINDOW_ORDERED,
                    format!("< {}", f.window_end),
                    f.window_start.to_string(),
                )
            })?;
        }
        RecordFields::FlowComputerBlob(f) => {
            require(!f.binary_payload.is_empty(), || {
                InvariantViolation::new(rules::BINARY_PAYLOAD_NOT_EMPTY, "non-empty", "empty")
            })?;
        }
    }
    Ok(())
}

/// Validate a candidate successor version against the live version it
/// consumes (Update transition, exactly one predecessor).
pub fn validate_update(
    old: &RecordVersion,
    new: &RecordVersion,
    now: Timestamp,
) -> Result<(), InvariantViolation> {
    validate_common(new, now)?;

    require(old.id == new.id, || {
        InvariantViolation::new(rules::ID_UNCHANGED, old.id.to_string(), new.id.to_string())
    })?;
    require(old.kind() == new.kind(), || {
        InvariantViolation::new(
            rules::KIND_UNCHANGED,
            old.kind().to_string(),
            new.kind().to_string(),
        )
    })?;
    require(old.fields.hostname() == new.fields.hostname(), || {
        InvariantViolation::new(
            rules::HOSTNAME_UNCHANGED,
            old.fields.hostname(),
            new.fields.hostname(),
        )
    })?;
    require(
        old.fields.device_address() == new.fields.device_address(),
        || {
            InvariantViolation::new(
                rules::DEVICE_ADDRESS_UNCHANGED,
                old.fields.device_address(),
                new.fields.device_address(),
            )
        },
    )?;

    match (&old.fields, &new.fields) {
        (RecordFields::Measurement(o), RecordFields::Measurement(n)) => {
            require(o.payload != n.payload, || {
                InvariantViolation::new(rules::PAYLOAD_MUST_DIFFER, "a new payload", &n.payload)
            })?;
            require_not_empty(&n.correlation_id, rules::CORRELATION_NOT_EMPTY_ON_UPDATE)?;
        }
        (RecordFields::Command(o), RecordFields::Command(n)) => {
            require(o.status != n.status, || {
                InvariantViolation::new(rules::STATUS_MUST_DIFFER, "a new status", &n.status)
            })?;
            require(o.command_payload != n.command_payload, || {
                InvariantViolation::new(
                    rules::COMMAND_PAYLOAD_MUST_DIFFER,
                    "a new command payload",
                    &n.command_payload,
                )
            })?;
        }
        (RecordFields::ForcedMeasureWindow(o), RecordFields::ForcedMeasureWindow(n)) => {
            require_not_future(n.requested_at, now, rules::REQUESTED_AT_NOT_FUTURE)?;
            require_not_empty(&n.payload, rules::PAYLOAD_NOT_EMPTY)?;
            require(o.payload != n.payload, || {
                InvariantViolation::new(rules::PAYLOAD_MUST_DIFFER, "a new payload", &n.payload)
            })?;
            require(n.window_start < n.window_end, || {
                InvariantViolation::new(
                    rules::WINDOW_ORDERED,
                    format!("< {}", n.window_end),
                    n.window_start.to_string(),
                )
            })?;
        }
        (RecordFields::FlowComputerBlob(o), RecordFields::FlowComputerBlob(n)) => {
            require(o.binary_payload != n.binary_payload, || {
                InvariantViolation::new(
                    rules::BINARY_PAYLOAD_MUST_DIFFER,
                    "a new binary payload",
                    format!("{} identical bytes", n.binary_payload.len()),
                )
            })?;
        }
        // Kind mismatch is caught above; this arm is unreachable but keeps
        // the match exhaustive without a panic.
        _ => {}
    }
    Ok(())
}

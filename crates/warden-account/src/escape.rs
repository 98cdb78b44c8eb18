//! Escape State Machine
//!
//! At most one recovery attempt is in flight per account. A trigger stores an
//! [`EscapeRecord`] whose window is computed from the host block clock:
//!
//! ```text
//! trigger ──security period──▶ ready_at ──expiry window──▶ expires_at
//!   │         NotReady            │          Ready             │   None
//! ```
//!
//! A record past `expires_at` is reported as absent but stays in storage
//! until the next successful mutating call clears it.

use serde::{Deserialize, Serialize};
use warden_core::{
    AccountConfig, Encode, EscapeKind, Felt, Signer, Timestamp, WardenError, WardenResult,
};

// =============================================================================
// ESCAPE TYPES
// =============================================================================

/// An in-flight replacement of one factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscapeRecord {
    /// Which factor is being replaced
    pub kind: EscapeKind,
    /// Signer installed on completion
    pub new_signer: Signer,
    /// First timestamp at which the escape can complete
    pub ready_at: Timestamp,
    /// First timestamp at which the escape is dead
    pub expires_at: Timestamp,
}

impl EscapeRecord {
    /// Completable at `now`
    pub fn is_ready(&self, now: Timestamp) -> bool {
        self.ready_at <= now && now < self.expires_at
    }

    /// Past its expiry window at `now`
    pub fn is_stale(&self, now: Timestamp) -> bool {
        now >= self.expires_at
    }

    /// Status of this record at `now`
    pub fn status(&self, now: Timestamp) -> EscapeStatus {
        if self.is_stale(now) {
            EscapeStatus::None
        } else if now < self.ready_at {
            EscapeStatus::NotReady
        } else {
            EscapeStatus::Ready
        }
    }
}

impl Encode for EscapeRecord {
    fn encode(&self, out: &mut Vec<Felt>) {
        out.push(Felt::from(self.kind.wire_tag()));
        self.new_signer.encode(out);
        out.push(Felt::from(self.ready_at));
        out.push(Felt::from(self.expires_at));
    }
}

/// Observable escape state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EscapeStatus {
    /// No live escape (absent or expired)
    None,
    /// Triggered, security period still running
    NotReady,
    /// Completable now
    Ready,
}

impl EscapeStatus {
    /// Wire tag returned by `get_escape_status`
    pub fn wire_tag(&self) -> u64 {
        match self {
            EscapeStatus::None => 0,
            EscapeStatus::NotReady => 1,
            EscapeStatus::Ready => 2,
        }
    }
}

impl Encode for EscapeStatus {
    fn encode(&self, out: &mut Vec<Felt>) {
        out.push(Felt::from(self.wire_tag()));
    }
}

// =============================================================================
// STATE MACHINE
// =============================================================================

/// Holds the single escape slot and the account's timelock parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscapeMachine {
    record: Option<EscapeRecord>,
    security_period: u64,
    expiry_window: u64,
}

impl EscapeMachine {
    /// Empty slot using the timelocks of `config`
    pub fn new(config: &AccountConfig) -> Self {
        Self {
            record: None,
            security_period: config.security_period_secs,
            expiry_window: config.escape_expiry_secs,
        }
    }

    /// Build the record a trigger at `now` would store
    ///
    /// Does not touch the slot, so callers can finish authorizing first.
    pub fn plan(
        &self,
        kind: EscapeKind,
        new_signer: Signer,
        now: Timestamp,
    ) -> WardenResult<EscapeRecord> {
        new_signer.ensure_nonzero(kind.target_role())?;
        let ready_at = now
            .checked_add(self.security_period)
            .ok_or_else(|| WardenError::invalid("escape ready time overflows"))?;
        let expires_at = ready_at
            .checked_add(self.expiry_window)
            .ok_or_else(|| WardenError::invalid("escape expiry time overflows"))?;
        Ok(EscapeRecord {
            kind,
            new_signer,
            ready_at,
            expires_at,
        })
    }

    /// Store `record`, returning whatever it overwrote
    pub fn install(&mut self, record: EscapeRecord) -> Option<EscapeRecord> {
        self.record.replace(record)
    }

    /// The stored record of `kind` if it is completable at `now`
    pub fn ready_record(&self, kind: EscapeKind, now: Timestamp) -> WardenResult<EscapeRecord> {
        let record = self.active(now).ok_or(WardenError::NoActiveEscape)?;
        if record.kind != kind {
            return Err(WardenError::EscapeKindMismatch {
                expected: kind,
                found: record.kind,
            });
        }
        if now < record.ready_at {
            return Err(WardenError::EscapeNotReady {
                ready_at: record.ready_at,
                now,
            });
        }
        Ok(*record)
    }

    /// Empty the slot
    pub fn clear(&mut self) -> Option<EscapeRecord> {
        self.record.take()
    }

    /// Observable status at `now`
    pub fn status(&self, now: Timestamp) -> EscapeStatus {
        self.record
            .as_ref()
            .map_or(EscapeStatus::None, |record| record.status(now))
    }

    /// The stored record unless it has expired
    pub fn active(&self, now: Timestamp) -> Option<&EscapeRecord> {
        self.record.as_ref().filter(|record| !record.is_stale(now))
    }

    /// The raw slot, expired or not
    #[cfg(test)]
    pub(crate) fn stored(&self) -> Option<&EscapeRecord> {
        self.record.as_ref()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use warden_core::Role;

    fn machine() -> EscapeMachine {
        EscapeMachine::new(
            &AccountConfig::default()
                .with_security_period(10)
                .with_escape_expiry(20),
        )
    }

    fn signer() -> Signer {
        Signer::ed25519([6u8; 32])
    }

    #[test]
    fn test_plan_computes_window() {
        let record = machine().plan(EscapeKind::Owner, signer(), 100).unwrap();
        assert_eq!(record.ready_at, 110);
        assert_eq!(record.expires_at, 130);
    }

    #[test]
    fn test_plan_rejects_zero_candidate() {
        let err = machine()
            .plan(EscapeKind::Guardian, Signer::ed25519([0u8; 32]), 0)
            .unwrap_err();
        assert_eq!(err, WardenError::zero_signer(Role::NewGuardian));
    }

    #[test]
    fn test_plan_overflow_is_an_error() {
        let err = machine()
            .plan(EscapeKind::Owner, signer(), u64::MAX - 5)
            .unwrap_err();
        assert_matches!(err, WardenError::Invalid { .. });
    }

    #[test]
    fn test_status_transitions() {
        let mut machine = machine();
        assert_eq!(machine.status(0), EscapeStatus::None);

        let record = machine.plan(EscapeKind::Owner, signer(), 0).unwrap();
        machine.install(record);
        assert_eq!(machine.status(9), EscapeStatus::NotReady);
        assert_eq!(machine.status(10), EscapeStatus::Ready);
        assert_eq!(machine.status(29), EscapeStatus::Ready);
        assert_eq!(machine.status(30), EscapeStatus::None);

        // Stale records stay stored until the slot is cleared or overwritten
        assert!(machine.active(30).is_none());
        assert_eq!(machine.stored(), Some(&record));
        assert_eq!(machine.clear(), Some(record));
        assert!(machine.stored().is_none());
    }

    #[test]
    fn test_retrigger_overwrites() {
        let mut machine = machine();
        let first = machine.plan(EscapeKind::Owner, signer(), 0).unwrap();
        machine.install(first);
        let second = machine
            .plan(EscapeKind::Guardian, Signer::ed25519([7u8; 32]), 5)
            .unwrap();
        assert_eq!(machine.install(second), Some(first));
        assert_eq!(machine.stored(), Some(&second));
    }

    #[test]
    fn test_ready_record_errors() {
        let mut machine = machine();
        assert_eq!(
            machine.ready_record(EscapeKind::Owner, 0),
            Err(WardenError::NoActiveEscape)
        );

        let record = machine.plan(EscapeKind::Owner, signer(), 0).unwrap();
        machine.install(record);
        assert_eq!(
            machine.ready_record(EscapeKind::Owner, 3),
            Err(WardenError::EscapeNotReady { ready_at: 10, now: 3 })
        );
        assert_eq!(
            machine.ready_record(EscapeKind::Guardian, 12),
            Err(WardenError::EscapeKindMismatch {
                expected: EscapeKind::Guardian,
                found: EscapeKind::Owner,
            })
        );
        assert_eq!(machine.ready_record(EscapeKind::Owner, 12), Ok(record));
        assert_eq!(
            machine.ready_record(EscapeKind::Owner, 30),
            Err(WardenError::NoActiveEscape)
        );
    }

    #[test]
    fn test_record_calldata_layout() {
        let record = machine().plan(EscapeKind::Guardian, signer(), 1).unwrap();
        let words = record.to_calldata();
        assert_eq!(
            words,
            vec![
                Felt::from(2u64),
                Felt::ZERO,
                Felt([6u8; 32]),
                Felt::from(11u64),
                Felt::from(31u64),
            ]
        );
    }
}

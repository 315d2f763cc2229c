//! Reservation status state machine.
//!
//! ```text
//! pending ──> confirmed ──> completed
//!    │            │
//!    ├────────────┴──> cancelled
//!    └────────────┬──> no_show
//!                 │
//!             confirmed
//! ```
//!
//! `completed`, `cancelled` and `no_show` are terminal. Calendar side
//! effects of a transition (releasing the reservation's booked dates on
//! cancellation) are applied by the repository layer in the same
//! transaction as the status write.

use crate::error::CoreError;
use crate::status::ReservationStatus;

/// Valid target statuses reachable from `from`.
///
/// Terminal states return an empty slice.
pub fn valid_transitions(from: ReservationStatus) -> &'static [ReservationStatus] {
    use ReservationStatus::*;
    match from {
        Pending => &[Confirmed, Cancelled, NoShow],
        Confirmed => &[Completed, Cancelled, NoShow],
        Completed | Cancelled | NoShow => &[],
    }
}

/// Check whether `from -> to` is a legal transition.
pub fn can_transition(from: ReservationStatus, to: ReservationStatus) -> bool {
    valid_transitions(from).contains(&to)
}

/// Validate a transition, mapping illegal ones to
/// [`CoreError::InvalidTransition`].
pub fn validate_transition(
    from: ReservationStatus,
    to: ReservationStatus,
) -> Result<(), CoreError> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(CoreError::InvalidTransition {
            from: from.label(),
            to: to.label(),
        })
    }
}

/// Whether a status has no outgoing transitions.
pub fn is_terminal(status: ReservationStatus) -> bool {
    valid_transitions(status).is_empty()
}

/// Whether entering `to` releases the reservation's booked calendar
/// rows. Only cancellation frees the dates; a no-show keeps them
/// blocked for the stay window (the property was held either way).
pub fn releases_calendar(to: ReservationStatus) -> bool {
    to == ReservationStatus::Cancelled
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use ReservationStatus::*;

    #[test]
    fn happy_path_transitions() {
        assert!(can_transition(Pending, Confirmed));
        assert!(can_transition(Confirmed, Completed));
    }

    #[test]
    fn deviations_from_pending_and_confirmed() {
        for from in [Pending, Confirmed] {
            assert!(can_transition(from, Cancelled));
            assert!(can_transition(from, NoShow));
        }
    }

    #[test]
    fn terminal_states_allow_nothing() {
        for from in [Completed, Cancelled, NoShow] {
            assert!(is_terminal(from));
            for to in [Pending, Confirmed, Completed, Cancelled, NoShow] {
                assert!(!can_transition(from, to), "{from:?} -> {to:?}");
            }
        }
    }

    #[test]
    fn completed_to_pending_is_invalid_transition_error() {
        assert_matches!(
            validate_transition(Completed, Pending),
            Err(CoreError::InvalidTransition {
                from: "completed",
                to: "pending"
            })
        );
    }

    #[test]
    fn skipping_confirmed_is_rejected() {
        assert!(!can_transition(Pending, Completed));
    }

    #[test]
    fn only_cancellation_releases_the_calendar() {
        assert!(releases_calendar(Cancelled));
        assert!(!releases_calendar(Confirmed));
        assert!(!releases_calendar(Completed));
        assert!(!releases_calendar(NoShow));
    }
}

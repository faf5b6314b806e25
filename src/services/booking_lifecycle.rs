use crate::models::bookings::BookingStatus;

/// Administrative actions on a booking's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleAction {
    Approve,
    Cancel,
}

impl LifecycleAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleAction::Approve => "approve",
            LifecycleAction::Cancel => "cancel",
        }
    }
}

/// Attempted transition from a state the action is not legal in. Surfaced to
/// the caller, never silently ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IllegalTransition {
    pub from: BookingStatus,
    pub action: LifecycleAction,
}

pub struct BookingLifecycle;

impl BookingLifecycle {
    /// `pending -> confirmed` on approve; `pending|confirmed -> cancelled`
    /// on cancel. Terminal states absorb everything else.
    pub fn apply(
        status: BookingStatus,
        action: LifecycleAction,
    ) -> Result<BookingStatus, IllegalTransition> {
        match (status, action) {
            (BookingStatus::Pending, LifecycleAction::Approve) => Ok(BookingStatus::Confirmed),
            (BookingStatus::Pending, LifecycleAction::Cancel)
            | (BookingStatus::Confirmed, LifecycleAction::Cancel) => Ok(BookingStatus::Cancelled),
            (from, action) => Err(IllegalTransition { from, action }),
        }
    }

    /// Source states from which `action` is legal. Persistence uses this to
    /// build a compare-and-set filter on the stored status, so two
    /// concurrent administrative actions cannot both win.
    pub fn legal_sources(action: LifecycleAction) -> &'static [BookingStatus] {
        match action {
            LifecycleAction::Approve => &[BookingStatus::Pending],
            LifecycleAction::Cancel => &[BookingStatus::Pending, BookingStatus::Confirmed],
        }
    }

    pub fn target_state(action: LifecycleAction) -> BookingStatus {
        match action {
            LifecycleAction::Approve => BookingStatus::Confirmed,
            LifecycleAction::Cancel => BookingStatus::Cancelled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approve_only_from_pending() {
        assert_eq!(
            BookingLifecycle::apply(BookingStatus::Pending, LifecycleAction::Approve),
            Ok(BookingStatus::Confirmed)
        );
        assert_eq!(
            BookingLifecycle::apply(BookingStatus::Confirmed, LifecycleAction::Approve),
            Err(IllegalTransition {
                from: BookingStatus::Confirmed,
                action: LifecycleAction::Approve
            })
        );
        assert_eq!(
            BookingLifecycle::apply(BookingStatus::Cancelled, LifecycleAction::Approve),
            Err(IllegalTransition {
                from: BookingStatus::Cancelled,
                action: LifecycleAction::Approve
            })
        );
    }

    #[test]
    fn test_cancel_from_pending_and_confirmed() {
        assert_eq!(
            BookingLifecycle::apply(BookingStatus::Pending, LifecycleAction::Cancel),
            Ok(BookingStatus::Cancelled)
        );
        assert_eq!(
            BookingLifecycle::apply(BookingStatus::Confirmed, LifecycleAction::Cancel),
            Ok(BookingStatus::Cancelled)
        );
        assert!(
            BookingLifecycle::apply(BookingStatus::Cancelled, LifecycleAction::Cancel).is_err()
        );
    }

    #[test]
    fn test_legal_sources_match_apply() {
        for action in [LifecycleAction::Approve, LifecycleAction::Cancel] {
            for status in [
                BookingStatus::Pending,
                BookingStatus::Confirmed,
                BookingStatus::Cancelled,
            ] {
                let legal = BookingLifecycle::legal_sources(action).contains(&status);
                assert_eq!(legal, BookingLifecycle::apply(status, action).is_ok());
            }
        }
    }
}

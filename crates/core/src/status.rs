//! Status enums mapping to SMALLINT columns.
//!
//! Each variant's discriminant matches the 1-based id stored in the
//! corresponding `*_id` column. Rows store the raw id; code converts
//! through [`try_from_id`](ReservationStatus::try_from_id) so that
//! every status reaching the state machine is a closed enum value.

/// Status ID type matching SMALLINT in the database.
pub type StatusId = i16;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:expr => $label:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Return the database status ID.
            pub const fn id(self) -> StatusId {
                self as StatusId
            }

            /// Convert a raw database id back to the enum, `None` for
            /// ids outside the closed set.
            pub fn try_from_id(id: StatusId) -> Option<Self> {
                match id {
                    $( $val => Some(Self::$variant), )+
                    _ => None,
                }
            }

            /// The wire/API label for this status.
            pub fn label(self) -> &'static str {
                match self {
                    $( Self::$variant => $label, )+
                }
            }

            /// Parse a wire/API label, case-sensitive.
            pub fn from_label(label: &str) -> Option<Self> {
                match label {
                    $( $label => Some(Self::$variant), )+
                    _ => None,
                }
            }
        }

        impl From<$name> for StatusId {
            fn from(value: $name) -> Self {
                value as StatusId
            }
        }
    };
}

define_status_enum! {
    /// Reservation lifecycle status.
    ReservationStatus {
        Pending = 1 => "pending",
        Confirmed = 2 => "confirmed",
        Completed = 3 => "completed",
        Cancelled = 4 => "cancelled",
        NoShow = 5 => "no_show",
    }
}

define_status_enum! {
    /// Payment bookkeeping status. Payment processing itself is outside
    /// this engine; only the status is tracked.
    PaymentStatus {
        Pending = 1 => "pending",
        Partial = 2 => "partial",
        Paid = 3 => "paid",
        Refunded = 4 => "refunded",
        Failed = 5 => "failed",
    }
}

define_status_enum! {
    /// Why a calendar date is unavailable.
    ///
    /// `Booked` rows are owned by the reservation that created them and
    /// must never be deleted by a manual unblock.
    BlockedReason {
        Booked = 1 => "booked",
        Maintenance = 2 => "maintenance",
        Renovation = 3 => "renovation",
        Personal = 4 => "personal",
        Other = 5 => "other",
    }
}

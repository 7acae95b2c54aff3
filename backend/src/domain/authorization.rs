//! Ownership guard for jobs and departments.
//!
//! A record may be viewed for editing and updated by its owner or by the
//! administrator. Deletion is narrower and is expressed directly in the
//! repository query (owner only), so it has no guard function here.

use super::user::UserId;

/// Records that belong to the user who created them.
pub trait Owned {
    /// The creating user.
    fn owner(&self) -> UserId;
}

/// Whether `identity` may change `record`.
///
/// # Examples
/// ```
/// use worklog::domain::{ADMIN_USER_ID, Owned, UserId, can_mutate};
///
/// struct Note(UserId);
/// impl Owned for Note {
///     fn owner(&self) -> UserId { self.0 }
/// }
///
/// let owner = UserId::new(2).unwrap();
/// let stranger = UserId::new(3).unwrap();
/// assert!(can_mutate(owner, &Note(owner)));
/// assert!(can_mutate(ADMIN_USER_ID, &Note(owner)));
/// assert!(!can_mutate(stranger, &Note(owner)));
/// ```
#[must_use]
pub fn can_mutate(identity: UserId, record: &impl Owned) -> bool {
    identity == record.owner() || identity.is_admin()
}

/// Whether `identity` may open `record` for editing.
#[must_use]
pub fn can_view(identity: UserId, record: &impl Owned) -> bool {
    can_mutate(identity, record)
}

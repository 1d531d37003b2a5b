//! Role- and ownership-based access policy for note operations.

use uuid::Uuid;

use notehub_entity::user::UserRole;

/// An operation a subject may attempt against a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteAction {
    /// Read a single note.
    Read,
    /// List notes.
    List,
    /// Create a note.
    Create,
    /// Update an existing note.
    Update,
    /// Delete a note.
    Delete,
}

impl NoteAction {
    /// Whether this action requires elevated (Editor+) privilege.
    pub fn requires_editor(&self) -> bool {
        matches!(self, Self::Create | Self::Update)
    }

    /// Whether this action is destructive and reserved for admins.
    pub fn is_destructive(&self) -> bool {
        matches!(self, Self::Delete)
    }
}

/// Evaluates whether a (subject, role, owner) triple permits an operation.
///
/// Pure and total: no I/O, no panics. Resource existence is not an
/// authorization concern — an absent note is a not-found upstream.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessPolicy;

impl AccessPolicy {
    /// Creates the policy.
    pub fn new() -> Self {
        Self
    }

    /// Rules, evaluated in order:
    ///
    /// 1. Admin may do anything.
    /// 2. Create/update require at least Editor.
    /// 3. Delete requires Admin (stricter than create/update).
    /// 4. Whatever remains is permitted only on the subject's own notes.
    pub fn can_access(
        &self,
        subject_id: Uuid,
        role: UserRole,
        action: NoteAction,
        owner_id: Uuid,
    ) -> bool {
        if role.is_admin() {
            return true;
        }

        if action.is_destructive() {
            return false;
        }

        if action.requires_editor() && !role.has_at_least(&UserRole::Editor) {
            return false;
        }

        subject_id == owner_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_ACTIONS: [NoteAction; 5] = [
        NoteAction::Read,
        NoteAction::List,
        NoteAction::Create,
        NoteAction::Update,
        NoteAction::Delete,
    ];

    #[test]
    fn reader_on_own_resource() {
        let policy = AccessPolicy::new();
        let me = Uuid::new_v4();
        assert!(policy.can_access(me, UserRole::Reader, NoteAction::Read, me));
        assert!(policy.can_access(me, UserRole::Reader, NoteAction::List, me));
        assert!(!policy.can_access(me, UserRole::Reader, NoteAction::Create, me));
        assert!(!policy.can_access(me, UserRole::Reader, NoteAction::Update, me));
        assert!(!policy.can_access(me, UserRole::Reader, NoteAction::Delete, me));
    }

    #[test]
    fn editor_on_own_resource() {
        let policy = AccessPolicy::new();
        let me = Uuid::new_v4();
        assert!(policy.can_access(me, UserRole::Editor, NoteAction::Read, me));
        assert!(policy.can_access(me, UserRole::Editor, NoteAction::Create, me));
        assert!(policy.can_access(me, UserRole::Editor, NoteAction::Update, me));
        assert!(!policy.can_access(me, UserRole::Editor, NoteAction::Delete, me));
    }

    #[test]
    fn editor_on_foreign_resource_denied_entirely() {
        let policy = AccessPolicy::new();
        let me = Uuid::new_v4();
        let other = Uuid::new_v4();
        for action in ALL_ACTIONS {
            assert!(
                !policy.can_access(me, UserRole::Editor, action, other),
                "editor should be denied {action:?} on a foreign note"
            );
        }
    }

    #[test]
    fn admin_allowed_everywhere() {
        let policy = AccessPolicy::new();
        let me = Uuid::new_v4();
        let other = Uuid::new_v4();
        for action in ALL_ACTIONS {
            assert!(policy.can_access(me, UserRole::Admin, action, other));
        }
    }
}

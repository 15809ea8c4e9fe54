/// Who authored a transcript entry.
///
/// `App` entries are client-side notices (command output, status changes).
/// They are rendered dimmed and never sent to the chat endpoint. Roles
/// never leave the process: the HTTP payloads in [`crate::api`] carry no
/// role field, and the transcript log marks roles with text prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
    App,
}

impl Role {
    pub fn is_user(self) -> bool {
        self == Role::User
    }

    pub fn is_bot(self) -> bool {
        self == Role::Bot
    }

    pub fn is_app(self) -> bool {
        self == Role::App
    }
}

/// A single transcript entry. Immutable once appended; insertion order is
/// display order.
#[derive(Debug, Clone)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self::new(Role::Bot, content)
    }

    pub fn app(content: impl Into<String>) -> Self {
        Self::new(Role::App, content)
    }

    pub fn is_user(&self) -> bool {
        self.role.is_user()
    }

    pub fn is_bot(&self) -> bool {
        self.role.is_bot()
    }

    pub fn is_app(&self) -> bool {
        self.role.is_app()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_roles() {
        assert_eq!(Message::user("hi").role, Role::User);
        assert_eq!(Message::bot("hi").role, Role::Bot);
        assert_eq!(Message::app("hi").role, Role::App);
    }

    #[test]
    fn role_predicates_are_exclusive() {
        assert!(Role::User.is_user() && !Role::User.is_bot() && !Role::User.is_app());
        assert!(Role::Bot.is_bot() && !Role::Bot.is_user() && !Role::Bot.is_app());
        assert!(Role::App.is_app() && !Role::App.is_user() && !Role::App.is_bot());
    }
}

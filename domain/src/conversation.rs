use serde::{Deserialize, Serialize};

/// Who produced a turn. The assistant role covers both real model replies
/// and the diagnostic messages that stand in for them on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

/// One session's message list. Append-only: turns are never reordered or
/// removed, and their order is replayed verbatim to the API on every turn.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    pub fn new() -> Self {
        Self { turns: Vec::new() }
    }

    pub fn push_user(&mut self, content: String) {
        self.turns.push(Turn {
            role: Role::User,
            content,
        });
    }

    pub fn push_assistant(&mut self, content: String) {
        self.turns.push(Turn {
            role: Role::Assistant,
            content,
        });
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let conv = Conversation::new();
        assert!(conv.is_empty());
        assert_eq!(conv.len(), 0);
    }

    #[test]
    fn appends_preserve_order() {
        let mut conv = Conversation::new();
        conv.push_user("first".into());
        conv.push_assistant("second".into());
        conv.push_user("third".into());

        let roles: Vec<Role> = conv.turns().iter().map(|t| t.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant, Role::User]);
        assert_eq!(conv.turns()[2].content, "third");
    }

    #[test]
    fn reading_does_not_mutate() {
        let mut conv = Conversation::new();
        conv.push_user("hello".into());
        let first = conv.turns().to_vec();
        let second = conv.turns().to_vec();
        assert_eq!(first, second);
    }
}

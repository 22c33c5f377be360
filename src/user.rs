use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Student,
    Admin,
}

impl Role {
    pub fn toggled(self) -> Self {
        match self {
            Role::Student => Role::Admin,
            Role::Admin => Role::Student,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "STUDENT",
            Role::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub interests: Vec<String>,
    /// Course ids. Not checked against the catalog.
    pub enrolled_courses: Vec<String>,
}

impl User {
    /// First word of the display name, used in greetings.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }

    pub fn is_enrolled(&self, course_id: &str) -> bool {
        self.enrolled_courses.iter().any(|c| c == course_id)
    }

    pub fn with_email(&self, email: &str) -> Self {
        Self {
            email: email.to_string(),
            ..self.clone()
        }
    }

    pub fn with_toggled_role(&self) -> Self {
        Self {
            role: self.role.toggled(),
            ..self.clone()
        }
    }
}

pub fn mock_user() -> User {
    User {
        id: "u1".to_string(),
        name: "John BCA Student".to_string(),
        email: "john@student.edu".to_string(),
        role: Role::Student,
        interests: vec![
            "React".to_string(),
            "Artificial Intelligence".to_string(),
            "Cyber Security".to_string(),
        ],
        enrolled_courses: vec!["c1".to_string(), "c2".to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_toggle_is_an_involution() {
        assert_eq!(Role::Student.toggled(), Role::Admin);
        assert_eq!(Role::Admin.toggled(), Role::Student);
        assert_eq!(Role::Student.toggled().toggled(), Role::Student);
    }

    #[test]
    fn role_serializes_upper_case() {
        let json = serde_json::to_string(&Role::Admin).unwrap();
        assert_eq!(json, "\"ADMIN\"");
    }

    #[test]
    fn first_name_is_first_word() {
        assert_eq!(mock_user().first_name(), "John");
    }

    #[test]
    fn with_email_keeps_profile() {
        let user = mock_user().with_email("me@example.com");
        assert_eq!(user.email, "me@example.com");
        assert_eq!(user.id, "u1");
        assert!(user.is_enrolled("c2"));
        assert!(!user.is_enrolled("c5"));
    }
}

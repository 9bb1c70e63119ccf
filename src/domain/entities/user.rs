use std::fmt;

/// Represents a user in the guild
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct User {
    pub id: String,
    pub username: String,
    pub nickname: Option<String>,
    pub avatar_url: Option<String>,
    pub default_avatar_url: String,
    pub is_bot: bool,
}

impl User {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            nickname: None,
            avatar_url: None,
            default_avatar_url: "https://cdn.discordapp.com/embed/avatars/0.png".to_string(),
            is_bot: false,
        }
    }

    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    pub fn with_avatar(mut self, url: impl Into<String>) -> Self {
        self.avatar_url = Some(url.into());
        self
    }

    pub fn with_default_avatar(mut self, url: impl Into<String>) -> Self {
        self.default_avatar_url = url.into();
        self
    }

    pub fn as_bot(mut self) -> Self {
        self.is_bot = true;
        self
    }

    /// Guild nickname if set, otherwise the account name
    pub fn display_name(&self) -> &str {
        self.nickname.as_deref().unwrap_or(&self.username)
    }

    /// Platform mention markup, e.g. `<@1234>`
    pub fn mention(&self) -> String {
        format!("<@{}>", self.id)
    }

    /// Custom avatar, falling back to the platform default
    pub fn avatar_or_default(&self) -> &str {
        self.avatar_url.as_deref().unwrap_or(&self.default_avatar_url)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_prefers_nickname() {
        let user = User::new("1", "ada");
        assert_eq!(user.display_name(), "ada");
        assert_eq!(user.with_nickname("Countess").display_name(), "Countess");
    }

    #[test]
    fn avatar_falls_back_to_default() {
        let user = User::new("1", "ada").with_default_avatar("https://cdn/default.png");
        assert_eq!(user.avatar_or_default(), "https://cdn/default.png");

        let user = user.with_avatar("https://cdn/ada.png");
        assert_eq!(user.avatar_or_default(), "https://cdn/ada.png");
    }
}

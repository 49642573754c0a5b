//! Campus feed and connect hub (teammates, hiring, volunteering).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Actor, Campus, CampusError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub author: String,
    pub role: String,
    pub content: String,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub comments: u32,
    pub time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectPost {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub author: String,
    pub description: String,
    #[serde(default)]
    pub skills: Vec<String>,
    pub contact: String,
}

/// Connect-hub opportunity as submitted. `skills` is comma-separated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewConnectPost {
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub contact: String,
}

/// Split a comma-separated skill list, dropping blanks.
#[must_use]
pub fn parse_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

fn non_blank(value: &str, field: &'static str) -> Result<String, CampusError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(CampusError::MissingField(field))
    } else {
        Ok(trimmed.to_owned())
    }
}

impl Campus {
    /// Share a post on the campus feed.
    ///
    /// # Errors
    ///
    /// [`CampusError::MissingField`] for blank content.
    pub fn publish_post(&mut self, author: &Actor, content: &str) -> Result<&Post, CampusError> {
        let content = non_blank(content, "content")?;
        self.posts.push_front(Post {
            id: Uuid::new_v4(),
            author: author.name.clone(),
            role: author.role.label().to_owned(),
            content,
            likes: 0,
            comments: 0,
            time: "Just now".to_owned(),
        });
        Ok(&self.posts[0])
    }

    /// Post an opportunity to the connect hub.
    ///
    /// # Errors
    ///
    /// [`CampusError::MissingField`] for a blank type, title, description or
    /// contact.
    pub fn publish_connect_post(&mut self, author: &Actor, post: NewConnectPost) -> Result<&ConnectPost, CampusError> {
        let entry = ConnectPost {
            id: Uuid::new_v4(),
            kind: non_blank(&post.kind, "type")?,
            title: non_blank(&post.title, "title")?,
            author: author.name.clone(),
            description: non_blank(&post.description, "description")?,
            skills: parse_skills(&post.skills),
            contact: non_blank(&post.contact, "contact")?,
        };
        self.connect_posts.push_front(entry);
        Ok(&self.connect_posts[0])
    }
}

#[cfg(test)]
#[path = "feed_test.rs"]
mod tests;

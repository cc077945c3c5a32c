use std::fmt::Display;
use thiserror::Error;

/// The fully qualified name of a topic, `projects/{project}/topics/{topic}`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopicPath {
    project_id: String,
    topic_id: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TopicPathErr {
    #[error("project id must not be empty")]
    EmptyProject,
    #[error("topic id must not be empty")]
    EmptyTopic,
}

impl TopicPath {
    pub fn new(
        project_id: impl Into<String>,
        topic_id: impl Into<String>,
    ) -> Result<Self, TopicPathErr> {
        let project_id = project_id.into();
        let topic_id = topic_id.into();

        if project_id.trim().is_empty() {
            return Err(TopicPathErr::EmptyProject);
        }
        if topic_id.trim().is_empty() {
            return Err(TopicPathErr::EmptyTopic);
        }

        Ok(Self {
            project_id,
            topic_id,
        })
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn topic_id(&self) -> &str {
        &self.topic_id
    }
}

impl Display for TopicPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "projects/{}/topics/{}", self.project_id, self.topic_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_formats_the_full_path() {
        let topic = TopicPath::new("my-project", "file-upload-info-topic").unwrap();
        assert_eq!(
            topic.to_string(),
            "projects/my-project/topics/file-upload-info-topic"
        );
        assert_eq!(topic.project_id(), "my-project");
        assert_eq!(topic.topic_id(), "file-upload-info-topic");
    }

    #[test]
    fn it_rejects_empty_ids() {
        assert_eq!(
            TopicPath::new("", "topic").unwrap_err(),
            TopicPathErr::EmptyProject
        );
        assert_eq!(
            TopicPath::new("project", "  ").unwrap_err(),
            TopicPathErr::EmptyTopic
        );
    }
}

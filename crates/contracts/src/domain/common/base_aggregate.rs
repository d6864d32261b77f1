use super::EntityMetadata;
use serde::{Deserialize, Serialize};

/// Campos comuns a todos os registros
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseAggregate<Id> {
    pub id: Id,
    /// Código de negócio (ex.: "PED-2024-0153")
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub metadata: EntityMetadata,
}

impl<Id> BaseAggregate<Id> {
    pub fn new(id: Id, code: String, description: String) -> Self {
        Self {
            id,
            code,
            description,
            comment: None,
            metadata: EntityMetadata::new(),
        }
    }

    /// Comentário vazio ou só com espaços é tratado como ausente
    pub fn set_comment(&mut self, comment: Option<String>) {
        self.comment = comment.filter(|c| !c.trim().is_empty());
    }

    pub fn touch(&mut self) {
        self.metadata.touch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_comment_is_dropped() {
        let mut base = BaseAggregate::new(1, "C-1".into(), "x".into());
        base.set_comment(Some("   ".into()));
        assert_eq!(base.comment, None);
        base.set_comment(Some("entregar pela manhã".into()));
        assert_eq!(base.comment.as_deref(), Some("entregar pela manhã"));
    }

    #[test]
    fn touch_bumps_version() {
        let mut base = BaseAggregate::new(1, String::new(), String::new());
        base.touch();
        base.touch();
        assert_eq!(base.metadata.version, 2);
    }
}

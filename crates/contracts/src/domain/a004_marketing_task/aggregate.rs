use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate};
use crate::shared::validation::{optional_date, require_text, ValidationResult};
use serde::{Deserialize, Serialize};

crate::uuid_aggregate_id!(MarketingTaskId);

crate::labeled_enum! {
    /// Coluna do quadro, da esquerda para a direita
    TaskColumn, "task_column" {
        Backlog => "backlog",
        Todo => "todo",
        InProgress => "in_progress",
        Review => "review",
        Done => "done",
    }
}

crate::labeled_enum! {
    TaskPriority, "task_priority" {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
}

/// Tarefa do quadro de marketing (agregado a004)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketingTask {
    #[serde(flatten)]
    pub base: BaseAggregate<MarketingTaskId>,

    pub title: String,

    #[serde(default)]
    pub details: String,

    pub column: TaskColumn,

    pub priority: TaskPriority,

    /// Canal (Instagram, vitrine, e-mail, ...)
    #[serde(default)]
    pub channel: String,

    #[serde(default)]
    pub assignee: Option<String>,

    #[serde(default)]
    pub due_date: Option<String>,

    /// Ordem do cartão dentro da coluna
    #[serde(default)]
    pub position: i32,
}

impl AggregateRoot for MarketingTask {
    type Id = MarketingTaskId;

    fn base(&self) -> &BaseAggregate<Self::Id> {
        &self.base
    }

    fn aggregate_index() -> &'static str {
        "a004"
    }

    fn collection_name() -> &'static str {
        "marketing_task"
    }

    fn element_name() -> &'static str {
        "Tarefa de marketing"
    }

    fn list_name() -> &'static str {
        "Quadro de marketing"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketingTaskDto {
    pub id: Option<String>,
    pub title: String,
    pub details: String,
    pub column: TaskColumn,
    pub priority: TaskPriority,
    pub channel: String,
    pub assignee: Option<String>,
    pub due_date: Option<String>,
    pub position: i32,
}

impl Default for MarketingTaskDto {
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            details: String::new(),
            column: TaskColumn::Todo,
            priority: TaskPriority::Medium,
            channel: String::new(),
            assignee: None,
            due_date: None,
            position: 0,
        }
    }
}

impl From<MarketingTask> for MarketingTaskDto {
    fn from(t: MarketingTask) -> Self {
        Self {
            id: Some(t.base.id.as_string()),
            title: t.title,
            details: t.details,
            column: t.column,
            priority: t.priority,
            channel: t.channel,
            assignee: t.assignee,
            due_date: t.due_date,
            position: t.position,
        }
    }
}

impl MarketingTaskDto {
    pub fn validate(&self) -> ValidationResult {
        require_text(&self.title, "title", "Título")?;
        optional_date(self.due_date.as_deref(), "due_date", "Prazo")
    }
}

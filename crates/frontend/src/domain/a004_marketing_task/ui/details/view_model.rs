use crate::domain::a004_marketing_task::api;
use crate::shared::form_utils::opt_text;
use crate::shared::toast::Notifier;
use contracts::domain::a004_marketing_task::aggregate::{
    MarketingTaskDto, TaskColumn, TaskPriority,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Copy)]
pub struct MarketingTaskDetailsVm {
    pub id: RwSignal<Option<String>>,
    pub title: RwSignal<String>,
    pub details: RwSignal<String>,
    pub column: RwSignal<String>,
    pub priority: RwSignal<String>,
    pub channel: RwSignal<String>,
    pub assignee: RwSignal<String>,
    pub due_date: RwSignal<String>,
    /// Posição no quadro; o formulário só repassa
    position: RwSignal<i32>,

    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    notifier: Notifier,
}

impl MarketingTaskDetailsVm {
    pub fn new(notifier: Notifier, column: TaskColumn, position: i32) -> Self {
        let vm = Self {
            id: RwSignal::new(None),
            title: RwSignal::new(String::new()),
            details: RwSignal::new(String::new()),
            column: RwSignal::new(String::new()),
            priority: RwSignal::new(String::new()),
            channel: RwSignal::new(String::new()),
            assignee: RwSignal::new(String::new()),
            due_date: RwSignal::new(String::new()),
            position: RwSignal::new(0),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            notifier,
        };
        vm.from_dto(MarketingTaskDto {
            column,
            position,
            ..Default::default()
        });
        vm
    }

    pub fn is_edit_mode(&self) -> Signal<bool> {
        let id = self.id;
        Signal::derive(move || id.get().is_some())
    }

    pub fn load(&self, id: String) {
        let this = *self;
        this.loading.set(true);
        spawn_local(async move {
            match api::fetch_by_id(&id).await {
                Ok(task) => this.from_dto(task.into()),
                Err(e) => this.notifier.error("Erro ao carregar a tarefa", e),
            }
            this.loading.set(false);
        });
    }

    pub fn save(&self, on_saved: Callback<()>) {
        let dto = self.to_dto();
        if let Err(e) = dto.validate() {
            self.notifier.invalid(&e);
            return;
        }

        let this = *self;
        this.saving.set(true);
        spawn_local(async move {
            match api::save(&dto).await {
                Ok(()) => {
                    this.notifier.success("Tarefa salva");
                    on_saved.run(());
                }
                Err(e) => this.notifier.error("Erro ao salvar a tarefa", e),
            }
            this.saving.set(false);
        });
    }

    pub fn delete(&self, on_deleted: Callback<()>) {
        let Some(id) = self.id.get_untracked() else {
            return;
        };
        let this = *self;
        spawn_local(async move {
            match api::delete(&id).await {
                Ok(()) => {
                    this.notifier.success("Tarefa excluída");
                    on_deleted.run(());
                }
                Err(e) => this.notifier.error("Erro ao excluir a tarefa", e),
            }
        });
    }

    fn to_dto(&self) -> MarketingTaskDto {
        MarketingTaskDto {
            id: self.id.get_untracked(),
            title: self.title.get_untracked().trim().to_string(),
            details: self.details.get_untracked(),
            column: TaskColumn::from_code(&self.column.get_untracked()).unwrap_or(TaskColumn::Todo),
            priority: TaskPriority::from_code(&self.priority.get_untracked())
                .unwrap_or(TaskPriority::Medium),
            channel: self.channel.get_untracked().trim().to_string(),
            assignee: opt_text(self.assignee.get_untracked()),
            due_date: opt_text(self.due_date.get_untracked()),
            position: self.position.get_untracked(),
        }
    }

    fn from_dto(&self, dto: MarketingTaskDto) {
        self.id.set(dto.id);
        self.title.set(dto.title);
        self.details.set(dto.details);
        self.column.set(dto.column.code().to_string());
        self.priority.set(dto.priority.code().to_string());
        self.channel.set(dto.channel);
        self.assignee.set(dto.assignee.unwrap_or_default());
        self.due_date.set(dto.due_date.unwrap_or_default());
        self.position.set(dto.position);
    }
}

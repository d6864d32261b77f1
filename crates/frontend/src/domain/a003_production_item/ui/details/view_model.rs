use crate::domain::a003_production_item::api;
use crate::shared::form_utils::{opt_text, parse_count};
use crate::shared::toast::Notifier;
use contracts::domain::a003_production_item::aggregate::{ProductionItemDto, ProductionStage};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Copy)]
pub struct ProductionItemDetailsVm {
    pub id: RwSignal<Option<String>>,
    pub code: RwSignal<Option<String>>,
    pub description: RwSignal<String>,
    pub order_number: RwSignal<String>,
    pub customer: RwSignal<String>,
    pub stage: RwSignal<String>,
    pub assignee: RwSignal<String>,
    pub deadline: RwSignal<String>,
    pub quantity: RwSignal<String>,
    pub comment: RwSignal<String>,

    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    notifier: Notifier,
}

impl ProductionItemDetailsVm {
    pub fn new(notifier: Notifier) -> Self {
        let vm = Self {
            id: RwSignal::new(None),
            code: RwSignal::new(None),
            description: RwSignal::new(String::new()),
            order_number: RwSignal::new(String::new()),
            customer: RwSignal::new(String::new()),
            stage: RwSignal::new(String::new()),
            assignee: RwSignal::new(String::new()),
            deadline: RwSignal::new(String::new()),
            quantity: RwSignal::new(String::new()),
            comment: RwSignal::new(String::new()),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            notifier,
        };
        vm.from_dto(ProductionItemDto::default());
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
                Ok(item) => this.from_dto(item.into()),
                Err(e) => this.notifier.error("Erro ao carregar a peça", e),
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
                    this.notifier.success("Peça salva");
                    on_saved.run(());
                }
                Err(e) => this.notifier.error("Erro ao salvar a peça", e),
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
                    this.notifier.success("Peça removida da produção");
                    on_deleted.run(());
                }
                Err(e) => this.notifier.error("Erro ao excluir a peça", e),
            }
        });
    }

    fn to_dto(&self) -> ProductionItemDto {
        ProductionItemDto {
            id: self.id.get_untracked(),
            code: self.code.get_untracked(),
            description: self.description.get_untracked().trim().to_string(),
            order_number: self.order_number.get_untracked().trim().to_string(),
            customer: self.customer.get_untracked().trim().to_string(),
            stage: ProductionStage::from_code(&self.stage.get_untracked())
                .unwrap_or(ProductionStage::Queued),
            assignee: opt_text(self.assignee.get_untracked()),
            deadline: opt_text(self.deadline.get_untracked()),
            quantity: parse_count(&self.quantity.get_untracked()),
            comment: opt_text(self.comment.get_untracked()),
        }
    }

    fn from_dto(&self, dto: ProductionItemDto) {
        self.id.set(dto.id);
        self.code.set(dto.code);
        self.description.set(dto.description);
        self.order_number.set(dto.order_number);
        self.customer.set(dto.customer);
        self.stage.set(dto.stage.code().to_string());
        self.assignee.set(dto.assignee.unwrap_or_default());
        self.deadline.set(dto.deadline.unwrap_or_default());
        self.quantity.set(dto.quantity.to_string());
        self.comment.set(dto.comment.unwrap_or_default());
    }
}

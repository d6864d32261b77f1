use crate::domain::a002_product_return::api;
use crate::shared::date_utils::today_iso;
use crate::shared::form_utils::{amount_text, opt_text, parse_amount};
use crate::shared::toast::Notifier;
use contracts::domain::a002_product_return::aggregate::{
    ProductReturnDto, ReturnReason, ReturnStatus,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// O status não é editado aqui: muda só pelas ações da lista
#[derive(Clone, Copy)]
pub struct ProductReturnDetailsVm {
    pub id: RwSignal<Option<String>>,
    pub code: RwSignal<Option<String>>,
    pub description: RwSignal<String>,
    pub order_number: RwSignal<String>,
    pub customer: RwSignal<String>,
    pub reason: RwSignal<String>,
    pub status: RwSignal<ReturnStatus>,
    pub amount: RwSignal<String>,
    pub request_date: RwSignal<String>,
    pub resolution_notes: RwSignal<String>,
    pub comment: RwSignal<String>,

    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    notifier: Notifier,
}

impl ProductReturnDetailsVm {
    pub fn new(notifier: Notifier) -> Self {
        let vm = Self {
            id: RwSignal::new(None),
            code: RwSignal::new(None),
            description: RwSignal::new(String::new()),
            order_number: RwSignal::new(String::new()),
            customer: RwSignal::new(String::new()),
            reason: RwSignal::new(String::new()),
            status: RwSignal::new(ReturnStatus::Requested),
            amount: RwSignal::new(String::new()),
            request_date: RwSignal::new(String::new()),
            resolution_notes: RwSignal::new(String::new()),
            comment: RwSignal::new(String::new()),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            notifier,
        };
        vm.from_dto(ProductReturnDto {
            request_date: today_iso(),
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
                Ok(item) => this.from_dto(item.into()),
                Err(e) => this.notifier.error("Erro ao carregar a devolução", e),
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
                    this.notifier.success("Devolução salva");
                    on_saved.run(());
                }
                Err(e) => this.notifier.error("Erro ao salvar a devolução", e),
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
                    this.notifier.success("Devolução excluída");
                    on_deleted.run(());
                }
                Err(e) => this.notifier.error("Erro ao excluir a devolução", e),
            }
        });
    }

    fn to_dto(&self) -> ProductReturnDto {
        ProductReturnDto {
            id: self.id.get_untracked(),
            code: self.code.get_untracked(),
            description: self.description.get_untracked(),
            order_number: self.order_number.get_untracked().trim().to_string(),
            customer: self.customer.get_untracked().trim().to_string(),
            reason: ReturnReason::from_code(&self.reason.get_untracked())
                .unwrap_or(ReturnReason::Other),
            status: self.status.get_untracked(),
            amount: parse_amount(&self.amount.get_untracked()),
            request_date: self.request_date.get_untracked(),
            resolution_notes: opt_text(self.resolution_notes.get_untracked()),
            comment: opt_text(self.comment.get_untracked()),
        }
    }

    fn from_dto(&self, dto: ProductReturnDto) {
        self.id.set(dto.id);
        self.code.set(dto.code);
        self.description.set(dto.description);
        self.order_number.set(dto.order_number);
        self.customer.set(dto.customer);
        self.reason.set(dto.reason.code().to_string());
        self.status.set(dto.status);
        self.amount.set(amount_text(dto.amount));
        self.request_date.set(dto.request_date);
        self.resolution_notes
            .set(dto.resolution_notes.unwrap_or_default());
        self.comment.set(dto.comment.unwrap_or_default());
    }
}

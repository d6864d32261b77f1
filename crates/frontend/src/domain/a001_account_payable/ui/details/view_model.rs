use crate::domain::a001_account_payable::api;
use crate::shared::form_utils::{amount_text, opt_text, parse_amount, parse_count};
use crate::shared::toast::Notifier;
use contracts::domain::a001_account_payable::aggregate::{AccountPayableDto, PayableStatus};
use contracts::enums::PaymentMethod;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Campos do formulário de conta a pagar, um sinal por input
#[derive(Clone, Copy)]
pub struct AccountPayableDetailsVm {
    pub id: RwSignal<Option<String>>,
    pub code: RwSignal<Option<String>>,
    pub description: RwSignal<String>,
    pub supplier: RwSignal<String>,
    pub category: RwSignal<String>,
    pub document_no: RwSignal<String>,
    pub amount: RwSignal<String>,
    pub due_date: RwSignal<String>,
    pub paid_at: RwSignal<String>,
    pub status: RwSignal<String>,
    pub payment_method: RwSignal<String>,
    pub installment_no: RwSignal<String>,
    pub installment_total: RwSignal<String>,
    pub comment: RwSignal<String>,

    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    notifier: Notifier,
}

impl AccountPayableDetailsVm {
    pub fn new(notifier: Notifier) -> Self {
        let vm = Self {
            id: RwSignal::new(None),
            code: RwSignal::new(None),
            description: RwSignal::new(String::new()),
            supplier: RwSignal::new(String::new()),
            category: RwSignal::new(String::new()),
            document_no: RwSignal::new(String::new()),
            amount: RwSignal::new(String::new()),
            due_date: RwSignal::new(String::new()),
            paid_at: RwSignal::new(String::new()),
            status: RwSignal::new(String::new()),
            payment_method: RwSignal::new(String::new()),
            installment_no: RwSignal::new(String::new()),
            installment_total: RwSignal::new(String::new()),
            comment: RwSignal::new(String::new()),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            notifier,
        };
        vm.from_dto(AccountPayableDto::default());
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
                Err(e) => this.notifier.error("Erro ao carregar a conta", e),
            }
            this.loading.set(false);
        });
    }

    /// Valida no cliente; só chama o backend se estiver tudo preenchido
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
                    this.notifier.success("Conta salva");
                    on_saved.run(());
                }
                Err(e) => this.notifier.error("Erro ao salvar a conta", e),
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
                    this.notifier.success("Conta excluída");
                    on_deleted.run(());
                }
                Err(e) => this.notifier.error("Erro ao excluir a conta", e),
            }
        });
    }

    fn to_dto(&self) -> AccountPayableDto {
        AccountPayableDto {
            id: self.id.get_untracked(),
            code: self.code.get_untracked(),
            description: self.description.get_untracked(),
            supplier: self.supplier.get_untracked().trim().to_string(),
            category: self.category.get_untracked().trim().to_string(),
            document_no: self.document_no.get_untracked().trim().to_string(),
            amount: parse_amount(&self.amount.get_untracked()),
            due_date: self.due_date.get_untracked(),
            paid_at: opt_text(self.paid_at.get_untracked()),
            status: PayableStatus::from_code(&self.status.get_untracked())
                .unwrap_or(PayableStatus::Pending),
            payment_method: PaymentMethod::from_code(&self.payment_method.get_untracked()),
            installment_no: parse_count(&self.installment_no.get_untracked()),
            installment_total: parse_count(&self.installment_total.get_untracked()),
            comment: opt_text(self.comment.get_untracked()),
        }
    }

    fn from_dto(&self, dto: AccountPayableDto) {
        self.id.set(dto.id);
        self.code.set(dto.code);
        self.description.set(dto.description);
        self.supplier.set(dto.supplier);
        self.category.set(dto.category);
        self.document_no.set(dto.document_no);
        self.amount.set(amount_text(dto.amount));
        self.due_date.set(dto.due_date);
        self.paid_at.set(dto.paid_at.unwrap_or_default());
        self.status.set(dto.status.code().to_string());
        self.payment_method
            .set(dto.payment_method.map(|m| m.code().to_string()).unwrap_or_default());
        self.installment_no.set(dto.installment_no.to_string());
        self.installment_total.set(dto.installment_total.to_string());
        self.comment.set(dto.comment.unwrap_or_default());
    }
}

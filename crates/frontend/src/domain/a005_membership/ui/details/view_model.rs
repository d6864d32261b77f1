use crate::domain::a005_membership::api;
use crate::shared::date_utils::today_iso;
use crate::shared::form_utils::{amount_text, opt_text, parse_amount};
use crate::shared::toast::Notifier;
use contracts::domain::a005_membership::aggregate::{
    MembershipDto, MembershipPlan, MembershipStatus,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Copy)]
pub struct MembershipDetailsVm {
    pub id: RwSignal<Option<String>>,
    pub code: RwSignal<Option<String>>,
    pub member_name: RwSignal<String>,
    pub email: RwSignal<String>,
    pub phone: RwSignal<String>,
    pub plan: RwSignal<String>,
    pub fee: RwSignal<String>,
    pub start_date: RwSignal<String>,
    pub status: RwSignal<String>,
    pub comment: RwSignal<String>,

    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    notifier: Notifier,
}

impl MembershipDetailsVm {
    pub fn new(notifier: Notifier) -> Self {
        let vm = Self {
            id: RwSignal::new(None),
            code: RwSignal::new(None),
            member_name: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            phone: RwSignal::new(String::new()),
            plan: RwSignal::new(String::new()),
            fee: RwSignal::new(String::new()),
            start_date: RwSignal::new(String::new()),
            status: RwSignal::new(String::new()),
            comment: RwSignal::new(String::new()),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            notifier,
        };
        vm.from_dto(MembershipDto {
            start_date: today_iso(),
            ..Default::default()
        });
        vm
    }

    pub fn is_edit_mode(&self) -> Signal<bool> {
        let id = self.id;
        Signal::derive(move || id.get().is_some())
    }

    /// Equivalente mensal do valor digitado, só para planos de mais de um mês
    pub fn monthly_hint(&self) -> Signal<Option<f64>> {
        let (plan, fee) = (self.plan, self.fee);
        Signal::derive(move || {
            let plan = MembershipPlan::from_code(&plan.get())?;
            let fee = parse_amount(&fee.get());
            (fee > 0.0 && plan.months() > 1).then(|| fee / plan.months() as f64)
        })
    }

    pub fn load(&self, id: String) {
        let this = *self;
        this.loading.set(true);
        spawn_local(async move {
            match api::fetch_by_id(&id).await {
                Ok(m) => this.from_dto(m.into()),
                Err(e) => this.notifier.error("Erro ao carregar o associado", e),
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
                    this.notifier.success("Associado salvo");
                    on_saved.run(());
                }
                Err(e) => this.notifier.error("Erro ao salvar o associado", e),
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
                    this.notifier.success("Associado excluído");
                    on_deleted.run(());
                }
                Err(e) => this.notifier.error("Erro ao excluir o associado", e),
            }
        });
    }

    fn to_dto(&self) -> MembershipDto {
        MembershipDto {
            id: self.id.get_untracked(),
            code: self.code.get_untracked(),
            member_name: self.member_name.get_untracked().trim().to_string(),
            email: opt_text(self.email.get_untracked()),
            phone: opt_text(self.phone.get_untracked()),
            plan: MembershipPlan::from_code(&self.plan.get_untracked())
                .unwrap_or(MembershipPlan::Monthly),
            fee: parse_amount(&self.fee.get_untracked()),
            start_date: self.start_date.get_untracked(),
            status: MembershipStatus::from_code(&self.status.get_untracked())
                .unwrap_or(MembershipStatus::Active),
            comment: opt_text(self.comment.get_untracked()),
        }
    }

    fn from_dto(&self, dto: MembershipDto) {
        self.id.set(dto.id);
        self.code.set(dto.code);
        self.member_name.set(dto.member_name);
        self.email.set(dto.email.unwrap_or_default());
        self.phone.set(dto.phone.unwrap_or_default());
        self.plan.set(dto.plan.code().to_string());
        self.fee.set(amount_text(dto.fee));
        self.start_date.set(dto.start_date);
        self.status.set(dto.status.code().to_string());
        self.comment.set(dto.comment.unwrap_or_default());
    }
}

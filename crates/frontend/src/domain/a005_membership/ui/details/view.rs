use super::view_model::MembershipDetailsVm;
use crate::enum_options;
use crate::shared::components::{DateInput, EnumSelect};
use crate::shared::number_format::format_money;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::shared::toast::use_notifier;
use contracts::domain::a005_membership::aggregate::{MembershipPlan, MembershipStatus};
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn MembershipDetails(
    id: Option<String>,
    #[prop(into)] on_saved: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = MembershipDetailsVm::new(use_notifier());
    if let Some(existing) = id {
        vm.load(existing);
    }
    let is_edit = vm.is_edit_mode();
    let monthly_hint = vm.monthly_hint();

    view! {
        <PageFrame page_id="a005_membership--detail" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <h1 class="page__title">
                    {move || if is_edit.get() { "Associado" } else { "Novo associado" }}
                </h1>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| vm.save(on_saved)
                        disabled=Signal::derive(move || vm.saving.get() || vm.loading.get())
                    >
                        "Salvar"
                    </Button>
                    <Show when=move || is_edit.get()>
                        <Button
                            appearance=ButtonAppearance::Subtle
                            on_click=move |_| {
                                let confirmed = web_sys::window()
                                    .and_then(|w| w.confirm_with_message("Excluir este associado?").ok())
                                    .unwrap_or(false);
                                if confirmed {
                                    vm.delete(on_saved);
                                }
                            }
                        >
                            "Excluir"
                        </Button>
                    </Show>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                        "Fechar"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <Show when=move || vm.loading.get()>
                    <Spinner />
                </Show>
                <div class="details-grid--3col">
                    <div class="form__group" style="grid-column: 1 / -1;">
                        <label class="form__label">"Nome *"</label>
                        <Input value=vm.member_name />
                    </div>

                    <div class="form__group">
                        <label class="form__label">"E-mail"</label>
                        <Input value=vm.email input_type=InputType::Email />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Telefone"</label>
                        <Input value=vm.phone input_type=InputType::Tel />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Situação"</label>
                        <EnumSelect options=enum_options!(MembershipStatus) value=vm.status />
                    </div>

                    <div class="form__group">
                        <label class="form__label">"Plano"</label>
                        <EnumSelect options=enum_options!(MembershipPlan) value=vm.plan />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Valor do plano (R$) *"</label>
                        <Input value=vm.fee placeholder="0,00" />
                        {move || monthly_hint.get().map(|m| view! {
                            <div class="form__hint">{format!("{} por mês", format_money(m))}</div>
                        })}
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Início *"</label>
                        <DateInput value=vm.start_date />
                    </div>

                    <div class="form__group" style="grid-column: 1 / -1;">
                        <label class="form__label">"Observação"</label>
                        <Textarea value=vm.comment attr:rows=2 />
                    </div>
                </div>
            </div>
        </PageFrame>
    }
}

use super::view_model::AccountPayableDetailsVm;
use crate::enum_options;
use crate::shared::components::{DateInput, EnumSelect};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::shared::toast::use_notifier;
use contracts::domain::a001_account_payable::aggregate::PayableStatus;
use contracts::enums::PaymentMethod;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn AccountPayableDetails(
    id: Option<String>,
    #[prop(into)] on_saved: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = AccountPayableDetailsVm::new(use_notifier());
    if let Some(existing) = id {
        vm.load(existing);
    }
    let is_edit = vm.is_edit_mode();

    view! {
        <PageFrame page_id="a001_account_payable--detail" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <h1 class="page__title">
                    {move || if is_edit.get() { "Editar conta a pagar" } else { "Nova conta a pagar" }}
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
                                    .and_then(|w| w.confirm_with_message("Excluir esta conta?").ok())
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
                    <div class="form__group" style="grid-column: 1 / 3;">
                        <label class="form__label">"Fornecedor *"</label>
                        <Input value=vm.supplier placeholder="Nome do fornecedor" />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Categoria"</label>
                        <Input value=vm.category placeholder="Matéria-prima, aluguel..." />
                    </div>

                    <div class="form__group">
                        <label class="form__label">"Valor (R$) *"</label>
                        <Input value=vm.amount placeholder="0,00" />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Vencimento *"</label>
                        <DateInput value=vm.due_date />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Nº documento"</label>
                        <Input value=vm.document_no placeholder="NF / boleto" />
                    </div>

                    <div class="form__group">
                        <label class="form__label">"Parcela"</label>
                        <Input value=vm.installment_no input_type=InputType::Number />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Total de parcelas"</label>
                        <Input value=vm.installment_total input_type=InputType::Number />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Status"</label>
                        <EnumSelect options=enum_options!(PayableStatus) value=vm.status />
                    </div>

                    <div class="form__group">
                        <label class="form__label">"Pago em"</label>
                        <DateInput value=vm.paid_at />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Forma de pagamento"</label>
                        <EnumSelect
                            options=enum_options!(PaymentMethod)
                            value=vm.payment_method
                            allow_empty=true
                        />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Descrição"</label>
                        <Input value=vm.description />
                    </div>

                    <div class="form__group" style="grid-column: 1 / -1;">
                        <label class="form__label">"Observação"</label>
                        <Textarea value=vm.comment attr:rows=3 />
                    </div>
                </div>
            </div>
        </PageFrame>
    }
}

use super::view_model::ProductReturnDetailsVm;
use crate::domain::a002_product_return::ui::list::status_color;
use crate::enum_options;
use crate::shared::components::{DateInput, EnumSelect};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::shared::toast::use_notifier;
use contracts::domain::a002_product_return::aggregate::ReturnReason;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn ProductReturnDetails(
    id: Option<String>,
    #[prop(into)] on_saved: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = ProductReturnDetailsVm::new(use_notifier());
    if let Some(existing) = id {
        vm.load(existing);
    }
    let is_edit = vm.is_edit_mode();

    view! {
        <PageFrame page_id="a002_product_return--detail" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <h1 class="page__title">
                    {move || if is_edit.get() { "Devolução" } else { "Nova devolução" }}
                </h1>
                <div class="page__header-right">
                    {move || {
                        let status = vm.status.get();
                        view! {
                            <Badge appearance=BadgeAppearance::Tint color=status_color(status)>
                                {status.label()}
                            </Badge>
                        }
                    }}
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
                                    .and_then(|w| w.confirm_with_message("Excluir esta devolução?").ok())
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
                    <div class="form__group">
                        <label class="form__label">"Nº do pedido *"</label>
                        <Input value=vm.order_number placeholder="PED-0000" />
                    </div>
                    <div class="form__group" style="grid-column: 2 / 4;">
                        <label class="form__label">"Cliente *"</label>
                        <Input value=vm.customer />
                    </div>

                    <div class="form__group">
                        <label class="form__label">"Motivo"</label>
                        <EnumSelect options=enum_options!(ReturnReason) value=vm.reason />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Data da solicitação *"</label>
                        <DateInput value=vm.request_date />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Valor a devolver (R$)"</label>
                        <Input value=vm.amount placeholder="0,00" />
                    </div>

                    <div class="form__group" style="grid-column: 1 / -1;">
                        <label class="form__label">"Descrição do problema"</label>
                        <Textarea value=vm.description attr:rows=2 />
                    </div>
                    <div class="form__group" style="grid-column: 1 / -1;">
                        <label class="form__label">"Parecer / resolução"</label>
                        <Textarea value=vm.resolution_notes attr:rows=2 />
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

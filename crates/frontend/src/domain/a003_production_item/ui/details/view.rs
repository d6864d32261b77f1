use super::view_model::ProductionItemDetailsVm;
use crate::enum_options;
use crate::shared::components::{DateInput, EnumSelect};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::shared::toast::use_notifier;
use contracts::domain::a003_production_item::aggregate::ProductionStage;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn ProductionItemDetails(
    id: Option<String>,
    #[prop(into)] on_saved: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = ProductionItemDetailsVm::new(use_notifier());
    if let Some(existing) = id {
        vm.load(existing);
    }
    let is_edit = vm.is_edit_mode();

    view! {
        <PageFrame page_id="a003_production_item--detail" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <h1 class="page__title">
                    {move || if is_edit.get() { "Peça em produção" } else { "Nova peça" }}
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
                                    .and_then(|w| w.confirm_with_message("Remover esta peça da produção?").ok())
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
                        <label class="form__label">"Cliente"</label>
                        <Input value=vm.customer />
                    </div>

                    <div class="form__group" style="grid-column: 1 / -1;">
                        <label class="form__label">"Descrição da peça *"</label>
                        <Input value=vm.description placeholder="Moldura 30x40 com vidro antirreflexo" />
                    </div>

                    <div class="form__group">
                        <label class="form__label">"Etapa"</label>
                        <EnumSelect options=enum_options!(ProductionStage) value=vm.stage />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Responsável"</label>
                        <Input value=vm.assignee />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Prazo"</label>
                        <DateInput value=vm.deadline />
                    </div>

                    <div class="form__group">
                        <label class="form__label">"Quantidade *"</label>
                        <Input value=vm.quantity input_type=InputType::Number />
                    </div>
                    <div class="form__group" style="grid-column: 2 / 4;">
                        <label class="form__label">"Observação"</label>
                        <Textarea value=vm.comment attr:rows=2 />
                    </div>
                </div>
            </div>
        </PageFrame>
    }
}

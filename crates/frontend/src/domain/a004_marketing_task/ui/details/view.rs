use super::view_model::MarketingTaskDetailsVm;
use crate::enum_options;
use crate::shared::components::{DateInput, EnumSelect};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::shared::toast::use_notifier;
use contracts::domain::a004_marketing_task::aggregate::{TaskColumn, TaskPriority};
use leptos::prelude::*;
use thaw::*;

/// Sem `id` cria uma tarefa nova em `column`, no fim da coluna (`position`)
#[component]
pub fn MarketingTaskDetails(
    id: Option<String>,
    #[prop(optional)] column: Option<TaskColumn>,
    #[prop(optional)] position: i32,
    #[prop(into)] on_saved: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = MarketingTaskDetailsVm::new(
        use_notifier(),
        column.unwrap_or(TaskColumn::Todo),
        position,
    );
    if let Some(existing) = id {
        vm.load(existing);
    }
    let is_edit = vm.is_edit_mode();

    view! {
        <PageFrame page_id="a004_marketing_task--detail" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <h1 class="page__title">
                    {move || if is_edit.get() { "Tarefa de marketing" } else { "Nova tarefa" }}
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
                                    .and_then(|w| w.confirm_with_message("Excluir esta tarefa?").ok())
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
                        <label class="form__label">"Título *"</label>
                        <Input value=vm.title placeholder="Post de lançamento das molduras de madeira" />
                    </div>

                    <div class="form__group">
                        <label class="form__label">"Coluna"</label>
                        <EnumSelect options=enum_options!(TaskColumn) value=vm.column />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Prioridade"</label>
                        <EnumSelect options=enum_options!(TaskPriority) value=vm.priority />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Prazo"</label>
                        <DateInput value=vm.due_date />
                    </div>

                    <div class="form__group">
                        <label class="form__label">"Canal"</label>
                        <Input value=vm.channel placeholder="Instagram, e-mail, vitrine..." />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Responsável"</label>
                        <Input value=vm.assignee />
                    </div>
                    <div class="form__group"></div>

                    <div class="form__group" style="grid-column: 1 / -1;">
                        <label class="form__label">"Detalhes"</label>
                        <Textarea value=vm.details attr:rows=4 />
                    </div>
                </div>
            </div>
        </PageFrame>
    }
}

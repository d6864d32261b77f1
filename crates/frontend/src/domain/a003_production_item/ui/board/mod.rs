use crate::domain::a003_production_item::api;
use crate::domain::a003_production_item::ui::details::ProductionItemDetails;
use crate::shared::components::PageHeader;
use crate::shared::date_utils::{deadline_label, today};
use crate::shared::icons::icon;
use crate::shared::list_utils::contains_ci;
use crate::shared::modal_stack::{use_modal_stack, ModalSize};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_BOARD;
use crate::shared::toast::use_notifier;
use chrono::NaiveDate;
use contracts::domain::a003_production_item::aggregate::{
    group_by_stage, ProductionItem, ProductionStage,
};
use contracts::domain::common::AggregateId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Cartão de uma peça no quadro
#[derive(Clone, Debug, PartialEq)]
pub struct StageCard {
    pub id: String,
    pub order_number: String,
    pub customer: String,
    pub description: String,
    pub quantity: u32,
    pub assignee: Option<String>,
    pub deadline_hint: Option<String>,
    pub late: bool,
    pub next: Option<ProductionStage>,
}

impl StageCard {
    fn from_item(item: &ProductionItem, today: NaiveDate) -> Self {
        let late = item.is_late(today);
        let deadline_hint = item
            .deadline_date()
            .filter(|_| !item.stage.is_finished())
            .map(|d| deadline_label(d, today));
        Self {
            id: item.base.id.as_string(),
            order_number: item.order_number.clone(),
            customer: item.customer.clone(),
            description: item.base.description.clone(),
            quantity: item.quantity,
            assignee: item.assignee.clone(),
            deadline_hint,
            late,
            next: item.next_stage(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StageColumn {
    pub stage: ProductionStage,
    pub cards: Vec<StageCard>,
    pub late_count: usize,
}

fn build_columns(
    items: &[ProductionItem],
    today: NaiveDate,
    show_delivered: bool,
    search: &str,
) -> Vec<StageColumn> {
    let needle = search.trim().to_lowercase();
    let matching: Vec<ProductionItem> = items
        .iter()
        .filter(|i| !i.base.metadata.is_deleted)
        .filter(|i| {
            needle.is_empty()
                || contains_ci(&i.order_number, &needle)
                || contains_ci(&i.customer, &needle)
                || i.assignee.as_deref().is_some_and(|a| contains_ci(a, &needle))
        })
        .cloned()
        .collect();

    group_by_stage(&matching, today)
        .into_iter()
        .filter(|b| show_delivered || b.stage != ProductionStage::Delivered)
        .map(|b| {
            let cards: Vec<StageCard> = b.items.iter().map(|i| StageCard::from_item(i, today)).collect();
            let late_count = cards.iter().filter(|c| c.late).count();
            StageColumn {
                stage: b.stage,
                cards,
                late_count,
            }
        })
        .collect()
}

#[component]
pub fn ProductionBoard() -> impl IntoView {
    let modal_stack = use_modal_stack();
    let notifier = use_notifier();
    let items = RwSignal::new(Vec::<ProductionItem>::new());
    let loading = RwSignal::new(false);
    let show_delivered = RwSignal::new(false);
    let search = RwSignal::new(String::new());

    let fetch = move || {
        loading.set(true);
        spawn_local(async move {
            match api::fetch_all().await {
                Ok(v) => items.set(v),
                Err(e) => notifier.error("Erro ao carregar a produção", e),
            }
            loading.set(false);
        });
    };

    let columns = Memo::new(move |_| {
        let show = show_delivered.get();
        let needle = search.get();
        items.with(|v| build_columns(v, today(), show, &needle))
    });

    let open_details = move |id: Option<String>| {
        modal_stack.push(ModalSize::Medium, move |handle| {
            view! {
                <ProductionItemDetails
                    id=id.clone()
                    on_saved=move |_| {
                        handle.close();
                        fetch();
                    }
                    on_cancel=move |_| handle.close()
                />
            }
            .into_any()
        });
    };

    let advance = move |id: String, next: ProductionStage| {
        spawn_local(async move {
            match api::advance(&id).await {
                Ok(()) => {
                    notifier.success(format!("Peça movida para \"{}\"", next.label()));
                    fetch();
                }
                Err(e) => notifier.error("Erro ao avançar a etapa", e),
            }
        });
    };

    fetch();

    view! {
        <PageFrame page_id="a003_production_item--board" category=PAGE_CAT_BOARD>
            <PageHeader title="Produção" subtitle="Peças por etapa da oficina".to_string()>
                <Button appearance=ButtonAppearance::Primary on_click=move |_| open_details(None)>
                    {icon("plus")} " Nova peça"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| fetch()>
                    {icon("refresh")} " Atualizar"
                </Button>
            </PageHeader>

            <div class="page__content">
                <Flex gap=FlexGap::Small class="filter-bar">
                    <Input value=search placeholder="Pedido, cliente ou responsável" />
                    <Checkbox checked=show_delivered label="Mostrar entregues" />
                </Flex>

                <Show when=move || loading.get()>
                    <Spinner />
                </Show>

                <div class="board">
                    {move || columns.get().into_iter().map(|col: StageColumn| {
                            let count = col.cards.len();
                            view! {
                                <div class="board__column">
                                    <div class="board__column-header">
                                        <span class="board__column-title">{col.stage.label()}</span>
                                        <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Subtle>
                                            {count.to_string()}
                                        </Badge>
                                        {(col.late_count > 0).then(|| view! {
                                            <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Danger>
                                                {format!("{} atrasada(s)", col.late_count)}
                                            </Badge>
                                        })}
                                    </div>
                                    <div class="board__cards">
                                        {col
                                            .cards
                                            .into_iter()
                                            .map(|card| {
                                                let id_open = card.id.clone();
                                                let id_advance = card.id.clone();
                                                let class = if card.late {
                                                    "board__card board__card--late"
                                                } else {
                                                    "board__card"
                                                };
                                                view! {
                                                    <div class=class on:click=move |_| open_details(Some(id_open.clone()))>
                                                        <div class="board__card-title">
                                                            {card.order_number}
                                                            {(card.quantity > 1).then(|| format!(" × {}", card.quantity))}
                                                        </div>
                                                        <div class="board__card-text">{card.description}</div>
                                                        <div class="board__card-meta">{card.customer}</div>
                                                        {card.assignee.map(|a| view! {
                                                            <div class="board__card-meta">{a}</div>
                                                        })}
                                                        {card.deadline_hint.map(|h| view! {
                                                            <div class="board__card-deadline">{h}</div>
                                                        })}
                                                        {card.next.map(|next| view! {
                                                            <div class="board__card-actions" on:click=|e| e.stop_propagation()>
                                                                <Button
                                                                    size=ButtonSize::Small
                                                                    appearance=ButtonAppearance::Subtle
                                                                    on_click=move |_| advance(id_advance.clone(), next)
                                                                >
                                                                    {format!("{} ", next.label())}
                                                                    {icon("chevron-right")}
                                                                </Button>
                                                            </div>
                                                        })}
                                                    </div>
                                                }
                                            })
                                            .collect_view()}
                                    </div>
                                </div>
                            }
                        }).collect_view()}
                </div>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a003_production_item::aggregate::ProductionItemId;
    use contracts::domain::common::BaseAggregate;

    fn item(order: &str, stage: ProductionStage, deadline: Option<&str>) -> ProductionItem {
        ProductionItem {
            base: BaseAggregate::new(ProductionItemId::new_v4(), String::new(), "Moldura 20x30".into()),
            order_number: order.into(),
            customer: "Rui Barbosa".into(),
            stage,
            assignee: Some("Marcos".into()),
            deadline: deadline.map(str::to_string),
            quantity: 1,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    #[test]
    fn delivered_column_is_hidden_by_default() {
        let items = vec![
            item("PED-1", ProductionStage::Cutting, Some("2024-05-08")),
            item("PED-2", ProductionStage::Delivered, Some("2024-05-01")),
        ];
        let cols = build_columns(&items, today(), false, "");
        assert_eq!(cols.len(), ProductionStage::ALL.len() - 1);
        assert!(cols.iter().all(|c| c.stage != ProductionStage::Delivered));

        let cutting = cols.iter().find(|c| c.stage == ProductionStage::Cutting).unwrap();
        assert_eq!(cutting.late_count, 1);
        assert_eq!(cutting.cards[0].next, Some(ProductionStage::Assembly));
        assert_eq!(cutting.cards[0].deadline_hint.as_deref(), Some("atrasada 2 dias"));

        let with_delivered = build_columns(&items, today(), true, "");
        assert_eq!(with_delivered.len(), ProductionStage::ALL.len());
    }

    #[test]
    fn search_matches_order_and_assignee() {
        let items = vec![
            item("PED-10", ProductionStage::Queued, None),
            item("PED-20", ProductionStage::Queued, None),
        ];
        let cols = build_columns(&items, today(), false, "ped-2");
        let total: usize = cols.iter().map(|c| c.cards.len()).sum();
        assert_eq!(total, 1);

        let by_assignee = build_columns(&items, today(), false, "marc");
        let total: usize = by_assignee.iter().map(|c| c.cards.len()).sum();
        assert_eq!(total, 2);
    }
}

//! Quadro kanban de marketing.
//!
//! Arrastar um cartão (ou usar as setas dele) aplica o movimento no quadro
//! local, envia o lote de posições e recarrega. Se o envio falhar, o
//! recarregamento desfaz o movimento na tela.

use crate::domain::a004_marketing_task::api;
use crate::domain::a004_marketing_task::ui::details::MarketingTaskDetails;
use crate::shared::components::PageHeader;
use crate::shared::date_utils::format_date;
use crate::shared::icons::icon;
use crate::shared::modal_stack::{use_modal_stack, ModalSize};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_BOARD;
use crate::shared::toast::use_notifier;
use contracts::domain::a004_marketing_task::aggregate::{MarketingTask, TaskColumn, TaskPriority};
use contracts::domain::a004_marketing_task::board::{Board, BoardError, TaskPositionUpdate};
use contracts::domain::common::AggregateId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Aplica o movimento numa cópia do quadro
fn plan_move(
    board: &Board,
    id: &str,
    to_column: TaskColumn,
    to_index: usize,
) -> Result<(Board, Vec<TaskPositionUpdate>), BoardError> {
    let mut next = board.clone();
    let updates = next.move_task(id, to_column, to_index)?;
    Ok((next, updates))
}

/// Coluna vizinha à esquerda (`-1`) ou à direita (`1`)
fn neighbour_column(column: TaskColumn, step: isize) -> Option<TaskColumn> {
    let pos = TaskColumn::ALL.iter().position(|c| *c == column)? as isize;
    let target = pos + step;
    if target < 0 {
        return None;
    }
    TaskColumn::ALL.get(target as usize).copied()
}

/// Setas do cartão na ordem em que aparecem; `usize::MAX` manda para o fim
/// da coluna vizinha
fn card_arrows(column: TaskColumn, index: usize, column_len: usize) -> Vec<(&'static str, CardMove)> {
    let mut arrows = Vec::new();
    if let Some(c) = neighbour_column(column, -1) {
        arrows.push(("←", CardMove { column: c, index: usize::MAX }));
    }
    if index > 0 {
        arrows.push(("↑", CardMove { column, index: index - 1 }));
    }
    if index + 1 < column_len {
        arrows.push(("↓", CardMove { column, index: index + 1 }));
    }
    if let Some(c) = neighbour_column(column, 1) {
        arrows.push(("→", CardMove { column: c, index: usize::MAX }));
    }
    arrows
}

fn priority_color(priority: TaskPriority) -> BadgeColor {
    match priority {
        TaskPriority::High => BadgeColor::Danger,
        TaskPriority::Medium => BadgeColor::Warning,
        TaskPriority::Low => BadgeColor::Subtle,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CardMove {
    column: TaskColumn,
    index: usize,
}

#[component]
pub fn MarketingBoard() -> impl IntoView {
    let modal_stack = use_modal_stack();
    let notifier = use_notifier();
    let board = RwSignal::new(Board::from_tasks(Vec::new()));
    let loading = RwSignal::new(false);
    let dragging = RwSignal::new(None::<String>);

    let fetch = move || {
        loading.set(true);
        spawn_local(async move {
            match api::fetch_all().await {
                Ok(tasks) => board.set(Board::from_tasks(tasks)),
                Err(e) => notifier.error("Erro ao carregar o quadro", e),
            }
            loading.set(false);
        });
    };

    let move_card = move |id: String, target: CardMove| {
        let planned = board.with_untracked(|b| plan_move(b, &id, target.column, target.index));
        let (next, updates) = match planned {
            Ok(p) => p,
            Err(e) => {
                notifier.error("Erro ao mover a tarefa", e);
                return;
            }
        };
        if updates.is_empty() {
            return;
        }
        board.set(next);
        log::debug!("moving task {} -> {} updates", id, updates.len());
        spawn_local(async move {
            match api::save_positions(&updates).await {
                Ok(()) => notifier.success("Quadro atualizado"),
                Err(e) => notifier.error("Erro ao salvar a nova posição", e),
            }
            fetch();
        });
    };

    let open_details = move |id: Option<String>, column: TaskColumn| {
        let position = board.with_untracked(|b| b.column(column).len() as i32);
        modal_stack.push(ModalSize::Medium, move |handle| {
            view! {
                <MarketingTaskDetails
                    id=id.clone()
                    column=column
                    position=position
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

    let drop_at = move |target: CardMove| {
        if let Some(id) = dragging.get_untracked() {
            dragging.set(None);
            move_card(id, target);
        }
    };

    fetch();

    view! {
        <PageFrame page_id="a004_marketing_task--board" category=PAGE_CAT_BOARD>
            <PageHeader
                title="Marketing"
                subtitle=Signal::derive(move || format!("{} tarefas", board.with(Board::total)))
            >
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| open_details(None, TaskColumn::Todo)
                >
                    {icon("plus")} " Nova tarefa"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| fetch()>
                    {icon("refresh")} " Atualizar"
                </Button>
            </PageHeader>

            <div class="page__content">
                <Show when=move || loading.get()>
                    <Spinner />
                </Show>

                <div class="board">
                    {move || {
                        board
                            .get()
                            .columns
                            .into_iter()
                            .map(|col| {
                                let column = col.column;
                                let len = col.tasks.len();
                                view! {
                                    <div
                                        class="board__column"
                                        on:dragover=|ev| ev.prevent_default()
                                        on:drop=move |ev| {
                                            ev.prevent_default();
                                            drop_at(CardMove { column, index: len });
                                        }
                                    >
                                        <div class="board__column-header">
                                            <span class="board__column-title">{column.label()}</span>
                                            <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Subtle>
                                                {len.to_string()}
                                            </Badge>
                                            <Button
                                                size=ButtonSize::Small
                                                appearance=ButtonAppearance::Subtle
                                                on_click=move |_| open_details(None, column)
                                            >
                                                {icon("plus")}
                                            </Button>
                                        </div>
                                        <div class="board__cards">
                                            {col
                                                .tasks
                                                .into_iter()
                                                .enumerate()
                                                .map(|(index, task)| task_card(task, index, len, open_details, move_card, dragging, drop_at))
                                                .collect_view()}
                                        </div>
                                    </div>
                                }
                            })
                            .collect_view()
                    }}
                </div>
            </div>
        </PageFrame>
    }
}

fn task_card(
    task: MarketingTask,
    index: usize,
    column_len: usize,
    open_details: impl Fn(Option<String>, TaskColumn) + Copy + Send + Sync + 'static,
    move_card: impl Fn(String, CardMove) + Copy + Send + Sync + 'static,
    dragging: RwSignal<Option<String>>,
    drop_at: impl Fn(CardMove) + Copy + Send + Sync + 'static,
) -> impl IntoView {
    let id = StoredValue::new(task.base.id.as_string());
    let column = task.column;
    let arrow = move |target: CardMove| move |_: leptos::ev::MouseEvent| move_card(id.get_value(), target);

    view! {
        <div
            class="board__card"
            draggable="true"
            on:dragstart=move |ev: web_sys::DragEvent| {
                if let Some(dt) = ev.data_transfer() {
                    if let Err(e) = dt.set_data("text/plain", &id.get_value()) {
                        log::debug!("drag data not set: {:?}", e);
                    }
                }
                dragging.set(Some(id.get_value()));
            }
            on:dragend=move |_| dragging.set(None)
            on:drop=move |ev: web_sys::DragEvent| {
                ev.prevent_default();
                ev.stop_propagation();
                drop_at(CardMove { column, index });
            }
            on:click=move |_| open_details(Some(id.get_value()), column)
        >
            <div class="board__card-title">{task.title}</div>
            <div class="board__card-meta">
                <Badge appearance=BadgeAppearance::Tint color=priority_color(task.priority)>
                    {task.priority.label()}
                </Badge>
                {(!task.channel.is_empty()).then(|| view! { <span class="board__card-tag">{task.channel}</span> })}
            </div>
            {task.assignee.map(|a| view! { <div class="board__card-meta">{a}</div> })}
            {task.due_date.map(|d| view! { <div class="board__card-deadline">{format_date(&d)}</div> })}
            <div class="board__card-actions" on:click=|e| e.stop_propagation()>
                {card_arrows(column, index, column_len)
                    .into_iter()
                    .map(|(label, target)| view! {
                        <Button size=ButtonSize::Small appearance=ButtonAppearance::Subtle
                            on_click=arrow(target)>{label}</Button>
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a004_marketing_task::aggregate::MarketingTaskId;
    use contracts::domain::common::BaseAggregate;

    fn task(title: &str, column: TaskColumn, position: i32) -> MarketingTask {
        MarketingTask {
            base: BaseAggregate::new(MarketingTaskId::new_v4(), String::new(), String::new()),
            title: title.into(),
            details: String::new(),
            column,
            priority: TaskPriority::Medium,
            channel: "Instagram".into(),
            assignee: None,
            due_date: None,
            position,
        }
    }

    #[test]
    fn arrows_stop_at_the_board_edges() {
        assert_eq!(neighbour_column(TaskColumn::Backlog, -1), None);
        assert_eq!(neighbour_column(TaskColumn::Backlog, 1), Some(TaskColumn::Todo));
        assert_eq!(neighbour_column(TaskColumn::Done, 1), None);
        assert_eq!(neighbour_column(TaskColumn::Done, -1), Some(TaskColumn::Review));
    }

    #[test]
    fn card_arrows_follow_position_in_column() {
        let first = card_arrows(TaskColumn::Backlog, 0, 2);
        assert_eq!(
            first,
            vec![
                ("↓", CardMove { column: TaskColumn::Backlog, index: 1 }),
                ("→", CardMove { column: TaskColumn::Todo, index: usize::MAX }),
            ]
        );

        let last = card_arrows(TaskColumn::Done, 1, 2);
        let labels: Vec<_> = last.iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, vec!["←", "↑"]);
        assert_eq!(last[0].1.column, TaskColumn::Review);
    }

    #[test]
    fn planned_move_leaves_the_current_board_untouched() {
        let a = task("Vitrine de inverno", TaskColumn::Todo, 0);
        let b = task("Post Dia das Mães", TaskColumn::Todo, 1);
        let id = a.base.id.as_string();
        let board = Board::from_tasks(vec![a, b]);

        let (next, updates) = plan_move(&board, &id, TaskColumn::InProgress, usize::MAX).unwrap();
        assert_eq!(board.column(TaskColumn::Todo).len(), 2);
        assert_eq!(next.column(TaskColumn::Todo).len(), 1);
        assert_eq!(next.column(TaskColumn::InProgress)[0].title, "Vitrine de inverno");
        assert_eq!(updates.len(), 2);

        assert!(plan_move(&board, "desconhecido", TaskColumn::Done, 0).is_err());
    }
}

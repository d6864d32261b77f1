//! Quadro kanban das tarefas de marketing
//!
//! A ordem dos cartões é guardada no campo `position` de cada tarefa. Mover
//! um cartão renumera as colunas afetadas (0..n, sem buracos) e devolve só
//! o que mudou, que é o lote enviado para `PUT /api/marketing_task/positions`.

use super::aggregate::{MarketingTask, TaskColumn};
use crate::domain::common::AggregateId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoardError {
    #[error("Tarefa não encontrada no quadro: {0}")]
    TaskNotFound(String),
}

/// Nova coluna/posição de um cartão
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskPositionUpdate {
    pub id: String,
    pub column: TaskColumn,
    pub position: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoardColumn {
    pub column: TaskColumn,
    pub tasks: Vec<MarketingTask>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    pub columns: Vec<BoardColumn>,
}

impl Board {
    pub fn from_tasks(tasks: Vec<MarketingTask>) -> Self {
        let mut columns: Vec<BoardColumn> = TaskColumn::ALL
            .iter()
            .map(|c| BoardColumn {
                column: *c,
                tasks: Vec::new(),
            })
            .collect();

        for task in tasks.into_iter().filter(|t| !t.base.metadata.is_deleted) {
            if let Some(col) = columns.iter_mut().find(|c| c.column == task.column) {
                col.tasks.push(task);
            }
        }

        for col in columns.iter_mut() {
            col.tasks.sort_by(|a, b| {
                a.position
                    .cmp(&b.position)
                    .then_with(|| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
            });
        }

        Self { columns }
    }

    pub fn column(&self, column: TaskColumn) -> &[MarketingTask] {
        self.columns
            .iter()
            .find(|c| c.column == column)
            .map(|c| c.tasks.as_slice())
            .unwrap_or(&[])
    }

    fn column_mut(&mut self, column: TaskColumn) -> &mut Vec<MarketingTask> {
        let idx = self
            .columns
            .iter()
            .position(|c| c.column == column)
            .unwrap_or(0);
        &mut self.columns[idx].tasks
    }

    fn locate(&self, id: &str) -> Option<(TaskColumn, usize)> {
        self.columns.iter().find_map(|c| {
            c.tasks
                .iter()
                .position(|t| t.base.id.as_string() == id)
                .map(|pos| (c.column, pos))
        })
    }

    /// Move o cartão `id` para `to_column` na posição `to_index` (limitada ao
    /// tamanho da coluna). Aplica a mudança no próprio quadro e devolve as
    /// atualizações de todos os cartões cuja coluna ou posição mudou.
    pub fn move_task(
        &mut self,
        id: &str,
        to_column: TaskColumn,
        to_index: usize,
    ) -> Result<Vec<TaskPositionUpdate>, BoardError> {
        let (from_column, from_index) = self
            .locate(id)
            .ok_or_else(|| BoardError::TaskNotFound(id.to_string()))?;

        let mut before: HashMap<String, (TaskColumn, i32)> = HashMap::new();
        for col in [from_column, to_column] {
            for t in self.column(col) {
                before.insert(t.base.id.as_string(), (t.column, t.position));
            }
        }

        let mut task = self.column_mut(from_column).remove(from_index);
        task.column = to_column;
        let target = self.column_mut(to_column);
        let index = to_index.min(target.len());
        target.insert(index, task);

        let mut updates = Vec::new();
        let affected = if from_column == to_column {
            vec![to_column]
        } else {
            vec![from_column, to_column]
        };
        for col in affected {
            for (pos, t) in self.column_mut(col).iter_mut().enumerate() {
                t.position = pos as i32;
                let key = t.base.id.as_string();
                if before.get(&key) != Some(&(t.column, t.position)) {
                    updates.push(TaskPositionUpdate {
                        id: key,
                        column: t.column,
                        position: t.position,
                    });
                }
            }
        }

        Ok(updates)
    }

    pub fn total(&self) -> usize {
        self.columns.iter().map(|c| c.tasks.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a004_marketing_task::aggregate::{MarketingTaskId, TaskPriority};
    use crate::domain::common::BaseAggregate;

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

    fn titles(board: &Board, column: TaskColumn) -> Vec<String> {
        board.column(column).iter().map(|t| t.title.clone()).collect()
    }

    fn positions_are_dense(board: &Board) -> bool {
        board.columns.iter().all(|c| {
            c.tasks
                .iter()
                .enumerate()
                .all(|(i, t)| t.position == i as i32 && t.column == c.column)
        })
    }

    #[test]
    fn columns_are_sorted_by_position() {
        let board = Board::from_tasks(vec![
            task("Post dia das mães", TaskColumn::Todo, 2),
            task("Vitrine inverno", TaskColumn::Todo, 0),
            task("Newsletter", TaskColumn::Done, 0),
        ]);
        assert_eq!(
            titles(&board, TaskColumn::Todo),
            vec!["Vitrine inverno", "Post dia das mães"]
        );
        assert_eq!(board.columns.len(), TaskColumn::ALL.len());
        assert_eq!(board.total(), 3);
    }

    #[test]
    fn moving_between_columns_renumbers_both() {
        let a = task("A", TaskColumn::Todo, 0);
        let b = task("B", TaskColumn::Todo, 1);
        let c = task("C", TaskColumn::Todo, 2);
        let d = task("D", TaskColumn::InProgress, 0);
        let b_id = b.base.id.as_string();
        let mut board = Board::from_tasks(vec![a, b, c, d]);

        let updates = board.move_task(&b_id, TaskColumn::InProgress, 0).unwrap();

        assert_eq!(titles(&board, TaskColumn::Todo), vec!["A", "C"]);
        assert_eq!(titles(&board, TaskColumn::InProgress), vec!["B", "D"]);
        assert!(positions_are_dense(&board));
        // B mudou de coluna, C subiu uma posição, D desceu; A ficou onde estava
        let moved: Vec<(String, i32)> = updates
            .iter()
            .map(|u| {
                let title = board
                    .columns
                    .iter()
                    .flat_map(|c| c.tasks.iter())
                    .find(|t| t.base.id.as_string() == u.id)
                    .map(|t| t.title.clone())
                    .unwrap();
                (title, u.position)
            })
            .collect();
        assert_eq!(moved.len(), 3);
        assert!(moved.contains(&("B".to_string(), 0)));
        assert!(moved.contains(&("C".to_string(), 1)));
        assert!(moved.contains(&("D".to_string(), 1)));
    }

    #[test]
    fn reordering_inside_a_column_and_clamping() {
        let a = task("A", TaskColumn::Review, 0);
        let b = task("B", TaskColumn::Review, 1);
        let a_id = a.base.id.as_string();
        let mut board = Board::from_tasks(vec![a, b]);

        let updates = board.move_task(&a_id, TaskColumn::Review, 99).unwrap();
        assert_eq!(titles(&board, TaskColumn::Review), vec!["B", "A"]);
        assert_eq!(updates.len(), 2);
        assert!(positions_are_dense(&board));
    }

    #[test]
    fn no_op_move_sends_nothing() {
        let a = task("A", TaskColumn::Backlog, 0);
        let a_id = a.base.id.as_string();
        let mut board = Board::from_tasks(vec![a]);
        assert!(board.move_task(&a_id, TaskColumn::Backlog, 0).unwrap().is_empty());
    }

    #[test]
    fn unknown_task_is_an_error() {
        let mut board = Board::from_tasks(vec![]);
        assert_eq!(
            board.move_task("x", TaskColumn::Done, 0),
            Err(BoardError::TaskNotFound("x".into()))
        );
    }
}

//! Drag interaction controller.
//!
//! A small state machine (`Idle` / `Dragging`) that translates pick-up,
//! hover, drop and cancel gestures into board operations. Hovering a foreign
//! column applies the column switch eagerly so the user sees a live preview;
//! `drag_start` snapshots the pre-drag status and position so cancelling
//! rolls the preview back. If the dragged task disappears mid-gesture every
//! transition degrades to a silent no-op back to `Idle`.

use tracing::debug;

use crate::board::{Board, BoardError};

/// What a drag gesture is currently over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    Column(String),
    Task(u64),
    Outside,
}

/// Direction the scroll viewport should creep while the drag point sits near
/// one of its horizontal edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging { task_id: u64 },
}

/// Pre-drag snapshot: where the task sat before any eager preview.
#[derive(Debug, Clone)]
struct DragOrigin {
    status: String,
    index: usize,
}

pub struct DragController {
    state: DragState,
    origin: Option<DragOrigin>,
}

impl DragController {
    pub fn new() -> Self {
        DragController {
            state: DragState::Idle,
            origin: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Id of the task being dragged, if any.
    pub fn active_task(&self) -> Option<u64> {
        match self.state {
            DragState::Dragging { task_id } => Some(task_id),
            DragState::Idle => None,
        }
    }

    /// Begin dragging a task. No board mutation happens here; the snapshot
    /// is only used if the gesture is cancelled later.
    pub fn drag_start(&mut self, board: &Board, task_id: u64) {
        if self.is_dragging() {
            return;
        }
        let Some(index) = board.position(task_id) else {
            debug!(task_id, "drag start on unknown task ignored");
            return;
        };
        self.origin = Some(DragOrigin {
            status: board.tasks[index].status.clone(),
            index,
        });
        self.state = DragState::Dragging { task_id };
    }

    /// Hover update. Moving over a column the task is not currently in
    /// applies the column switch eagerly (live preview).
    pub fn drag_over(&mut self, board: &mut Board, target: &DropTarget) {
        let Some(task_id) = self.active_task() else {
            return;
        };
        if let DropTarget::Column(column_id) = target {
            let differs = board.get(task_id).map(|t| &t.status != column_id);
            match differs {
                Some(true) => match board.move_task(task_id, column_id) {
                    Ok(()) | Err(BoardError::UnknownColumn(_)) => {}
                    Err(e) => {
                        debug!(task_id, %e, "drag preview dropped stale task");
                        self.reset();
                    }
                },
                Some(false) => {}
                None => {
                    debug!(task_id, "dragged task vanished during hover");
                    self.reset();
                }
            }
        }
    }

    /// Finalize the gesture on `target`.
    pub fn drop_on(&mut self, board: &mut Board, target: DropTarget) {
        let Some(task_id) = self.active_task() else {
            return;
        };
        if board.position(task_id).is_none() {
            debug!(task_id, "drop of stale task ignored");
            self.reset();
            return;
        }
        match target {
            DropTarget::Outside => {
                // An unrecognized drop zone cancels the whole gesture.
                self.cancel(board);
                return;
            }
            DropTarget::Column(column_id) => {
                if let Err(e) = board.move_task(task_id, &column_id) {
                    debug!(task_id, %e, "column drop ignored");
                }
            }
            DropTarget::Task(target_id) if target_id == task_id => {}
            DropTarget::Task(target_id) => {
                let original_status = self
                    .origin
                    .as_ref()
                    .map(|o| o.status.clone())
                    .unwrap_or_default();
                let same_column =
                    board.get(target_id).map(|t| t.status == original_status);
                match same_column {
                    Some(true) => {
                        // Undo any eager column preview, then reorder in place.
                        if let Some(task) = board.get_mut(task_id) {
                            task.status = original_status;
                        }
                        if let Err(e) = board.reorder_task(task_id, target_id) {
                            debug!(task_id, target_id, %e, "reorder ignored");
                        }
                    }
                    Some(false) => {
                        if let Err(e) = board.move_onto(task_id, target_id) {
                            debug!(task_id, target_id, %e, "move onto task ignored");
                        }
                    }
                    None => {
                        debug!(target_id, "drop target vanished, gesture cancelled");
                        self.cancel(board);
                        return;
                    }
                }
            }
        }
        self.reset();
    }

    /// Abort the gesture and restore the pre-drag snapshot, undoing any
    /// eager preview applied while hovering.
    pub fn cancel(&mut self, board: &mut Board) {
        if let (Some(task_id), Some(origin)) = (self.active_task(), self.origin.take()) {
            if let Some(current) = board.position(task_id) {
                let mut task = board.tasks.remove(current);
                task.status = origin.status;
                let index = origin.index.min(board.tasks.len());
                board.tasks.insert(index, task);
            } else {
                debug!(task_id, "cancel of stale task ignored");
            }
        }
        self.reset();
    }

    fn reset(&mut self) {
        self.state = DragState::Idle;
        self.origin = None;
    }
}

impl Default for DragController {
    fn default() -> Self {
        Self::new()
    }
}

/// Auto-scroll signal: which way the viewport should move while the drag
/// point sits within `proximity` of its left/right edge. Re-evaluated on
/// every hover event; never touches task order.
pub fn auto_scroll(
    pointer_x: u16,
    viewport_left: u16,
    viewport_right: u16,
    proximity: u16,
) -> Option<ScrollDirection> {
    if pointer_x >= viewport_right.saturating_sub(proximity) {
        Some(ScrollDirection::Right)
    } else if pointer_x <= viewport_left.saturating_add(proximity) {
        Some(ScrollDirection::Left)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Criteria;
    use crate::task::TaskDraft;

    fn draft(title: &str) -> TaskDraft {
        TaskDraft {
            title: title.to_string(),
            ..TaskDraft::default()
        }
    }

    fn board_with(titles: &[(&str, &str)]) -> Board {
        let mut board = Board::default();
        for (title, column) in titles {
            let id = board.add_task(draft(title)).unwrap().id;
            board.move_task(id, column).unwrap();
        }
        board
    }

    fn id_of(board: &Board, title: &str) -> u64 {
        board.tasks.iter().find(|t| t.title == title).unwrap().id
    }

    fn column_titles(board: &Board, column: &str) -> Vec<String> {
        board
            .tasks_in_column(column, &Criteria::default())
            .iter()
            .map(|t| t.title.clone())
            .collect()
    }

    fn snapshot(board: &Board) -> Vec<(u64, String)> {
        board
            .tasks
            .iter()
            .map(|t| (t.id, t.status.clone()))
            .collect()
    }

    #[test]
    fn test_drop_on_column_appends_and_finalizes() {
        let mut board = board_with(&[("X", "in-progress"), ("A", "todo")]);
        let a = id_of(&board, "A");
        let mut drag = DragController::new();

        drag.drag_start(&board, a);
        assert!(drag.is_dragging());
        drag.drop_on(&mut board, DropTarget::Column("in-progress".to_string()));

        assert!(!drag.is_dragging());
        assert_eq!(board.get(a).unwrap().status, "in-progress");
        assert_eq!(column_titles(&board, "in-progress"), vec!["X", "A"]);
    }

    #[test]
    fn test_same_column_drop_on_task_reorders_without_status_change() {
        let mut board = board_with(&[("A", "todo"), ("B", "todo"), ("C", "todo")]);
        let a = id_of(&board, "A");
        let c = id_of(&board, "C");
        let mut drag = DragController::new();

        drag.drag_start(&board, a);
        drag.drop_on(&mut board, DropTarget::Task(c));

        assert_eq!(column_titles(&board, "todo"), vec!["B", "C", "A"]);
        assert_eq!(board.get(a).unwrap().status, "todo");
    }

    #[test]
    fn test_cross_column_drop_on_task_adopts_its_column() {
        let mut board = board_with(&[("A", "todo"), ("X", "in-review"), ("Y", "in-review")]);
        let a = id_of(&board, "A");
        let x = id_of(&board, "X");
        let mut drag = DragController::new();

        drag.drag_start(&board, a);
        drag.drop_on(&mut board, DropTarget::Task(x));

        assert_eq!(board.get(a).unwrap().status, "in-review");
        // arrayMove(from 0, to 1) over [A, X, Y]: A lands adjacent to X.
        assert_eq!(column_titles(&board, "in-review"), vec!["X", "A", "Y"]);
    }

    #[test]
    fn test_hover_applies_eager_preview() {
        let mut board = board_with(&[("A", "todo"), ("X", "in-progress")]);
        let a = id_of(&board, "A");
        let mut drag = DragController::new();

        drag.drag_start(&board, a);
        drag.drag_over(&mut board, &DropTarget::Column("in-progress".to_string()));

        // Preview is live before the drop lands.
        assert_eq!(board.get(a).unwrap().status, "in-progress");
        assert!(drag.is_dragging());
    }

    #[test]
    fn test_cancel_rolls_back_eager_preview() {
        let mut board = board_with(&[("A", "todo"), ("B", "todo"), ("X", "in-progress")]);
        let a = id_of(&board, "A");
        let before = snapshot(&board);
        let mut drag = DragController::new();

        drag.drag_start(&board, a);
        drag.drag_over(&mut board, &DropTarget::Column("in-progress".to_string()));
        drag.cancel(&mut board);

        assert_eq!(snapshot(&board), before);
        assert_eq!(column_titles(&board, "todo"), vec!["A", "B"]);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_drop_outside_reverts_like_cancel() {
        let mut board = board_with(&[("A", "todo"), ("X", "in-progress")]);
        let a = id_of(&board, "A");
        let before = snapshot(&board);
        let mut drag = DragController::new();

        drag.drag_start(&board, a);
        drag.drag_over(&mut board, &DropTarget::Column("in-progress".to_string()));
        drag.drop_on(&mut board, DropTarget::Outside);

        assert_eq!(snapshot(&board), before);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_preview_then_drop_on_task_in_original_column_stays_pure_reorder() {
        // Hover pushed A into in-progress, but the drop lands back on a task
        // of A's original column: the preview must not leak into the result.
        let mut board = board_with(&[("A", "todo"), ("B", "todo"), ("X", "in-progress")]);
        let a = id_of(&board, "A");
        let b = id_of(&board, "B");
        let mut drag = DragController::new();

        drag.drag_start(&board, a);
        drag.drag_over(&mut board, &DropTarget::Column("in-progress".to_string()));
        drag.drop_on(&mut board, DropTarget::Task(b));

        assert_eq!(board.get(a).unwrap().status, "todo");
        assert_eq!(column_titles(&board, "in-progress"), vec!["X"]);
    }

    #[test]
    fn test_drop_on_self_is_a_noop() {
        let mut board = board_with(&[("A", "todo"), ("B", "todo")]);
        let a = id_of(&board, "A");
        let before = snapshot(&board);
        let mut drag = DragController::new();

        drag.drag_start(&board, a);
        drag.drop_on(&mut board, DropTarget::Task(a));

        assert_eq!(snapshot(&board), before);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_stale_task_makes_transitions_silent_noops() {
        let mut board = board_with(&[("A", "todo"), ("B", "todo")]);
        let a = id_of(&board, "A");
        let mut drag = DragController::new();

        drag.drag_start(&board, a);
        let mut gone = std::collections::HashSet::new();
        gone.insert(a);
        board.remove_ids(&gone);

        let before = snapshot(&board);
        drag.drop_on(&mut board, DropTarget::Column("done".to_string()));
        assert_eq!(snapshot(&board), before);
        assert!(!drag.is_dragging());

        // Starting a drag on a removed id never leaves Idle.
        drag.drag_start(&board, a);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_cancel_after_concurrent_removal_does_not_resurrect() {
        let mut board = board_with(&[("A", "todo")]);
        let a = id_of(&board, "A");
        let mut drag = DragController::new();

        drag.drag_start(&board, a);
        let mut gone = std::collections::HashSet::new();
        gone.insert(a);
        board.remove_ids(&gone);
        drag.cancel(&mut board);

        assert!(board.tasks.is_empty());
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_hidden_tasks_keep_exactly_once_membership_under_filter() {
        // A search filter hides B; dragging A around must not disturb B's
        // membership in the underlying collection.
        let mut board = board_with(&[("Alpha", "todo"), ("Beta", "todo")]);
        let a = id_of(&board, "Alpha");
        let b = id_of(&board, "Beta");
        let criteria = Criteria {
            search: "alpha".to_string(),
            ..Criteria::default()
        };
        assert_eq!(board.tasks_in_column("todo", &criteria).len(), 1);

        let mut drag = DragController::new();
        drag.drag_start(&board, a);
        drag.drop_on(&mut board, DropTarget::Column("done".to_string()));

        let occurrences = board.tasks.iter().filter(|t| t.id == b).count();
        assert_eq!(occurrences, 1);
        assert_eq!(board.get(b).unwrap().status, "todo");
    }

    #[test]
    fn test_auto_scroll_edges() {
        // Viewport spanning columns 10..=210 with a proximity band of 20.
        assert_eq!(auto_scroll(205, 10, 210, 20), Some(ScrollDirection::Right));
        assert_eq!(auto_scroll(15, 10, 210, 20), Some(ScrollDirection::Left));
        assert_eq!(auto_scroll(100, 10, 210, 20), None);
        // Band edges are inclusive.
        assert_eq!(auto_scroll(190, 10, 210, 20), Some(ScrollDirection::Right));
        assert_eq!(auto_scroll(30, 10, 210, 20), Some(ScrollDirection::Left));
    }
}

//! Project Board State
//!
//! Kanban columns for projects with optimistic status moves. A drop changes the
//! project's status locally right away; the backend call follows. Every call
//! in flight keeps its own rollback snapshot, so a late failure only undoes
//! the move it belongs to.

use async_trait::async_trait;
use leptos::prelude::*;
use leptos_dragdrop::DropResult;

use crate::api::ApiError;
use crate::models::{Project, ProjectStatus};
use crate::toast::Notifier;

/// Drag completion on the board: project id, columns keyed by status
pub type BoardDrop = DropResult<String, ProjectStatus>;

/// Backend call the board needs
#[async_trait(?Send)]
pub trait StatusUpdater {
    async fn update_status(&self, project_id: &str, status: ProjectStatus) -> Result<(), ApiError>;
}

/// Somewhere a `Board` lives (a signal in the app, a RefCell in tests)
pub trait BoardCell {
    /// Run `f` against the board; None if the board is gone
    fn with_board<R>(&self, f: impl FnOnce(&mut Board) -> R) -> Option<R>;
}

impl BoardCell for RwSignal<Board> {
    fn with_board<R>(&self, f: impl FnOnce(&mut Board) -> R) -> Option<R> {
        self.try_update(f)
    }
}

/// A status change sent to the backend but not yet confirmed
#[derive(Debug, Clone, PartialEq)]
pub struct PendingMove {
    pub ticket: u64,
    pub project_id: String,
    pub project_name: String,
    /// Status to restore if this request fails
    pub previous: ProjectStatus,
    pub status: ProjectStatus,
}

/// What settling a request did to local state
#[derive(Debug, Clone, PartialEq)]
pub enum Settlement {
    /// Backend agreed; optimistic state stands
    Confirmed,
    /// Request failed and the project went back to `restored`
    RolledBack { project_id: String, restored: ProjectStatus },
    /// Request failed while a later move of the same project was in flight.
    /// That move now restores to this one's `previous`.
    HandedDown { project_id: String, ticket: u64 },
    /// Ticket unknown, e.g. the board was reloaded meanwhile. Nothing changed.
    Stale,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Board {
    items: Vec<Project>,
    /// Ordered by ticket
    in_flight: Vec<PendingMove>,
    next_ticket: u64,
}

impl Board {
    pub fn new(items: Vec<Project>) -> Self {
        Self { items, in_flight: Vec::new(), next_ticket: 1 }
    }

    pub fn items(&self) -> &[Project] {
        &self.items
    }

    /// Full reload from the backend. Outstanding snapshots no longer apply.
    pub fn replace(&mut self, items: Vec<Project>) {
        if !self.in_flight.is_empty() {
            log::debug!("[BOARD] Reload drops {} pending snapshot(s)", self.in_flight.len());
        }
        self.items = items;
        self.in_flight.clear();
    }

    /// Projects in one column, in load order
    pub fn column(&self, status: ProjectStatus) -> Vec<Project> {
        self.items.iter().filter(|p| p.status == status).cloned().collect()
    }

    pub fn pending_count(&self) -> usize {
        self.in_flight.len()
    }

    pub fn is_syncing(&self, project_id: &str) -> bool {
        self.in_flight.iter().any(|m| m.project_id == project_id)
    }

    /// Apply a drop optimistically. Returns the request to send, or None for a no-op.
    pub fn begin_move(&mut self, drop: &BoardDrop) -> Option<PendingMove> {
        let destination = drop.destination?;
        if destination == drop.source {
            return None;
        }

        let status = destination.column;
        let Some(project) = self.items.iter_mut().find(|p| p.id == drop.item_id) else {
            log::warn!("[BOARD] Dropped unknown project {}", drop.item_id);
            return None;
        };
        // Same column at another position: status unchanged, nothing to send
        if project.status == status {
            return None;
        }

        let previous = project.status;
        project.status = status;

        let pending = PendingMove {
            ticket: self.next_ticket.max(1),
            project_id: project.id.clone(),
            project_name: project.name.clone(),
            previous,
            status,
        };
        self.next_ticket = pending.ticket + 1;
        self.in_flight.push(pending.clone());
        log::info!("[BOARD] #{} {} {} -> {}", pending.ticket, pending.project_id, previous, status);
        Some(pending)
    }

    /// Record the backend's answer for `ticket`
    pub fn settle(&mut self, ticket: u64, succeeded: bool) -> Settlement {
        let Some(pos) = self.in_flight.iter().position(|m| m.ticket == ticket) else {
            return Settlement::Stale;
        };
        let settled = self.in_flight.remove(pos);
        if succeeded {
            return Settlement::Confirmed;
        }

        // A later move of the same project takes over this one's snapshot
        if let Some(later) = self.in_flight[pos..].iter_mut().find(|m| m.project_id == settled.project_id) {
            later.previous = settled.previous;
            return Settlement::HandedDown { project_id: settled.project_id, ticket: later.ticket };
        }

        if let Some(project) = self.items.iter_mut().find(|p| p.id == settled.project_id) {
            project.status = settled.previous;
        }
        Settlement::RolledBack { project_id: settled.project_id, restored: settled.previous }
    }
}

/// Result of one drop, after the backend answered
#[derive(Debug, Clone, PartialEq)]
pub struct MoveOutcome {
    pub pending: PendingMove,
    pub settlement: Settlement,
    pub error: Option<ApiError>,
}

pub fn sync_failed_message(pending: &PendingMove) -> String {
    format!("Failed to sync \"{}\" to {}. Reverting...", pending.project_name, pending.status)
}

/// Drop handler: optimistic update, backend call, rollback and notice on failure.
/// Returns None when the drop was a no-op and nothing was sent.
pub async fn drop_project<C, U, N>(cell: &C, api: &U, notifier: &N, drop: &BoardDrop) -> Option<MoveOutcome>
where
    C: BoardCell,
    U: StatusUpdater,
    N: Notifier,
{
    let pending = cell.with_board(|board| board.begin_move(drop)).flatten()?;

    let result = api.update_status(&pending.project_id, pending.status).await;
    let succeeded = result.is_ok();
    let settlement = cell.with_board(|board| board.settle(pending.ticket, succeeded)).unwrap_or(Settlement::Stale);

    let error = result.err();
    if let Some(err) = &error {
        log::error!("[BOARD] #{} sync failed: {}", pending.ticket, err);
        notifier.error(&sync_failed_message(&pending));
    }
    Some(MoveOutcome { pending, settlement, error })
}

#[cfg(test)]
mod tests {
    use super::*;
    use leptos_dragdrop::DropSlot;
    use std::cell::RefCell;

    impl BoardCell for RefCell<Board> {
        fn with_board<R>(&self, f: impl FnOnce(&mut Board) -> R) -> Option<R> {
            Some(f(&mut self.borrow_mut()))
        }
    }

    fn project(id: &str, status: ProjectStatus) -> Project {
        Project {
            id: id.to_string(),
            name: format!("Project {}", id),
            client: None,
            category: None,
            status,
            start_date: None,
            end_date: None,
            description: None,
        }
    }

    fn scenario() -> Vec<Project> {
        vec![project("1", ProjectStatus::New), project("2", ProjectStatus::Working)]
    }

    fn drag(id: &str, from: (ProjectStatus, usize), to: Option<(ProjectStatus, usize)>) -> BoardDrop {
        DropResult {
            item_id: id.to_string(),
            source: DropSlot::new(from.0, from.1),
            destination: to.map(|(c, i)| DropSlot::new(c, i)),
        }
    }

    fn statuses(board: &Board) -> Vec<(String, ProjectStatus)> {
        board.items().iter().map(|p| (p.id.clone(), p.status)).collect()
    }

    /// Records what the board looked like when the request went out
    struct ObservingApi<'a> {
        board: &'a RefCell<Board>,
        fail: bool,
        seen: RefCell<Vec<(String, ProjectStatus, Vec<(String, ProjectStatus)>)>>,
    }

    impl<'a> ObservingApi<'a> {
        fn new(board: &'a RefCell<Board>, fail: bool) -> Self {
            Self { board, fail, seen: RefCell::new(Vec::new()) }
        }
    }

    #[async_trait(?Send)]
    impl StatusUpdater for ObservingApi<'_> {
        async fn update_status(&self, project_id: &str, status: ProjectStatus) -> Result<(), ApiError> {
            let snapshot = statuses(&self.board.borrow());
            self.seen.borrow_mut().push((project_id.to_string(), status, snapshot));
            if self.fail {
                Err(ApiError::Status { status: 500, message: Some("db down".into()) })
            } else {
                Ok(())
            }
        }
    }

    #[derive(Default)]
    struct Notices {
        errors: RefCell<Vec<String>>,
        successes: RefCell<Vec<String>>,
    }

    impl Notifier for Notices {
        fn success(&self, message: &str) {
            self.successes.borrow_mut().push(message.to_string());
        }

        fn error(&self, message: &str) {
            self.errors.borrow_mut().push(message.to_string());
        }
    }

    #[tokio::test]
    async fn test_optimistic_before_network_then_kept_on_success() {
        let cell = RefCell::new(Board::new(scenario()));
        let api = ObservingApi::new(&cell, false);
        let notices = Notices::default();

        let outcome = drop_project(&cell, &api, &notices, &drag("1", (ProjectStatus::New, 0), Some((ProjectStatus::Working, 1))))
            .await
            .unwrap();

        let seen = api.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, "1");
        assert_eq!(seen[0].1, ProjectStatus::Working);
        // The request saw the optimistic state already applied
        assert_eq!(
            seen[0].2,
            vec![("1".to_string(), ProjectStatus::Working), ("2".to_string(), ProjectStatus::Working)]
        );

        assert_eq!(outcome.settlement, Settlement::Confirmed);
        assert_eq!(statuses(&cell.borrow()), seen[0].2);
        assert_eq!(cell.borrow().pending_count(), 0);
        assert!(notices.errors.borrow().is_empty());
        assert!(notices.successes.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_failure_restores_snapshot_and_notifies_once() {
        let before = Board::new(scenario());
        let cell = RefCell::new(before.clone());
        let api = ObservingApi::new(&cell, true);
        let notices = Notices::default();

        let outcome = drop_project(&cell, &api, &notices, &drag("1", (ProjectStatus::New, 0), Some((ProjectStatus::Working, 0))))
            .await
            .unwrap();

        assert_eq!(
            outcome.settlement,
            Settlement::RolledBack { project_id: "1".into(), restored: ProjectStatus::New }
        );
        assert_eq!(cell.borrow().items(), before.items());
        let errors = notices.errors.borrow();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Failed to sync"));
        assert!(errors[0].ends_with("Reverting..."));
        assert!(outcome.error.is_some());
    }

    #[tokio::test]
    async fn test_noop_drops_send_nothing() {
        let cell = RefCell::new(Board::new(scenario()));
        let api = ObservingApi::new(&cell, false);
        let notices = Notices::default();

        let cases = [
            drag("1", (ProjectStatus::New, 0), None),
            drag("1", (ProjectStatus::New, 0), Some((ProjectStatus::New, 0))),
            // Own column, other position
            drag("2", (ProjectStatus::Working, 0), Some((ProjectStatus::Working, 3))),
            drag("404", (ProjectStatus::New, 0), Some((ProjectStatus::Complete, 0))),
        ];
        for case in &cases {
            assert_eq!(drop_project(&cell, &api, &notices, case).await, None);
        }
        assert!(api.seen.borrow().is_empty());
        assert_eq!(cell.borrow().items(), scenario().as_slice());
        assert!(notices.errors.borrow().is_empty());
    }

    #[test]
    fn test_failure_of_other_project_keeps_later_move() {
        let mut board = Board::new(scenario());
        let first = board.begin_move(&drag("1", (ProjectStatus::New, 0), Some((ProjectStatus::Complete, 0)))).unwrap();
        let second = board.begin_move(&drag("2", (ProjectStatus::Working, 0), Some((ProjectStatus::New, 0)))).unwrap();

        let settled = board.settle(first.ticket, false);
        assert_eq!(settled, Settlement::RolledBack { project_id: "1".into(), restored: ProjectStatus::New });
        assert_eq!(board.column(ProjectStatus::New).len(), 2);
        assert_eq!(board.items()[1].status, ProjectStatus::New);

        assert_eq!(board.settle(second.ticket, true), Settlement::Confirmed);
        assert_eq!(board.pending_count(), 0);
    }

    #[test]
    fn test_earlier_failure_of_same_project_hands_down_snapshot() {
        let mut board = Board::new(scenario());
        let first = board.begin_move(&drag("1", (ProjectStatus::New, 0), Some((ProjectStatus::Working, 0)))).unwrap();
        let second = board.begin_move(&drag("1", (ProjectStatus::Working, 0), Some((ProjectStatus::Complete, 0)))).unwrap();
        assert_eq!(second.previous, ProjectStatus::Working);
        assert!(board.is_syncing("1"));

        // First fails while second is in flight: latest move stays visible
        assert_eq!(
            board.settle(first.ticket, false),
            Settlement::HandedDown { project_id: "1".into(), ticket: second.ticket }
        );
        assert_eq!(board.items()[0].status, ProjectStatus::Complete);

        // Second fails too: back to where the project was before either move
        assert_eq!(
            board.settle(second.ticket, false),
            Settlement::RolledBack { project_id: "1".into(), restored: ProjectStatus::New }
        );
        assert_eq!(board.items(), scenario().as_slice());
        assert!(!board.is_syncing("1"));
    }

    #[test]
    fn test_reload_makes_pending_stale() {
        let mut board = Board::new(scenario());
        let pending = board.begin_move(&drag("2", (ProjectStatus::Working, 0), Some((ProjectStatus::Complete, 0)))).unwrap();
        board.replace(vec![project("2", ProjectStatus::Working)]);

        assert_eq!(board.settle(pending.ticket, false), Settlement::Stale);
        assert_eq!(board.items()[0].status, ProjectStatus::Working);
        assert_eq!(board.items().len(), 1);
    }

    #[test]
    fn test_tickets_increase() {
        let mut board = Board::new(scenario());
        let a = board.begin_move(&drag("1", (ProjectStatus::New, 0), Some((ProjectStatus::Working, 0)))).unwrap();
        let b = board.begin_move(&drag("2", (ProjectStatus::Working, 0), Some((ProjectStatus::Complete, 0)))).unwrap();
        assert!(b.ticket > a.ticket);
    }
}

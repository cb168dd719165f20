#[cfg(test)]
mod tests {
    use crate::grid::CellKey;
    use crate::selection::{
        DragPhase, DragSelectionController, PendingBlockRequest, PointerPosition,
        SelectionCommit, SelectionSurface,
    };
    use crate::status::CellStatus;
    use staylist_common::ListingId;

    #[derive(Default)]
    struct RecordingSurface {
        marked: Vec<CellKey>,
        unmark_calls: usize,
    }

    impl SelectionSurface for RecordingSurface {
        fn mark_selected(&mut self, cell: &CellKey) {
            self.marked.push(cell.clone());
        }

        fn unmark_selected(&mut self, cell: &CellKey) {
            self.unmark_calls += 1;
            self.marked.retain(|marked| marked != cell);
        }
    }

    fn cell(listing: u64, date: &str) -> CellKey {
        CellKey::new(ListingId(listing), date)
    }

    fn at(x: f64) -> PointerPosition {
        PointerPosition::new(x, 10.0)
    }

    #[test]
    fn test_click_on_available_cell_requests_one_block() {
        let mut controller = DragSelectionController::new();

        assert!(controller.pointer_down(cell(1, "2024-06-03"), CellStatus::Available, at(0.0)));
        assert_eq!(controller.phase(), DragPhase::Armed);

        let commit = controller.pointer_up().unwrap();
        assert_eq!(
            commit,
            Some(SelectionCommit::Block(PendingBlockRequest {
                listing_id: ListingId(1),
                dates: vec!["2024-06-03".to_string()],
            }))
        );
        assert_eq!(controller.phase(), DragPhase::Idle);
    }

    #[test]
    fn test_click_on_blocked_cell_unblocks_it() {
        let mut controller = DragSelectionController::new();
        controller.pointer_down(cell(4, "2024-06-10"), CellStatus::HostBlocked, at(0.0));

        let commit = controller.pointer_up().unwrap();
        assert_eq!(
            commit,
            Some(SelectionCommit::Unblock {
                listing_id: ListingId(4),
                dates: vec!["2024-06-10".to_string()],
            })
        );
    }

    #[test]
    fn test_small_jitter_stays_a_click() {
        let mut controller = DragSelectionController::new();
        controller.pointer_down(cell(1, "2024-06-03"), CellStatus::Available, at(0.0));

        assert_eq!(controller.pointer_move(at(3.0)), DragPhase::Armed);
        assert_eq!(controller.pointer_move(at(5.0)), DragPhase::Armed);
        assert_eq!(controller.pointer_move(at(5.1)), DragPhase::Dragging);
    }

    #[test]
    fn test_custom_threshold() {
        let mut controller = DragSelectionController::new().threshold(20.0);
        controller.pointer_down(cell(1, "2024-06-03"), CellStatus::Available, at(0.0));

        assert_eq!(controller.pointer_move(at(15.0)), DragPhase::Armed);
        assert_eq!(controller.pointer_move(at(25.0)), DragPhase::Dragging);
    }

    #[test]
    fn test_drag_only_collects_matching_action() {
        let mut controller = DragSelectionController::new();
        controller.pointer_down(cell(1, "2024-06-03"), CellStatus::Available, at(0.0));

        controller
            .pointer_over(cell(1, "2024-06-04"), CellStatus::Available, at(40.0), true)
            .unwrap();
        controller
            .pointer_over(cell(1, "2024-06-05"), CellStatus::AdminBlocked, at(80.0), true)
            .unwrap();
        controller
            .pointer_over(cell(1, "2024-06-06"), CellStatus::HostBlocked, at(120.0), true)
            .unwrap();
        controller
            .pointer_over(cell(1, "2024-06-07"), CellStatus::Available, at(160.0), true)
            .unwrap();

        let commit = controller.pointer_up().unwrap().unwrap();
        assert_eq!(
            commit.dates(),
            &["2024-06-03", "2024-06-04", "2024-06-07"].map(String::from)
        );
    }

    #[test]
    fn test_drag_never_crosses_rows() {
        let mut controller = DragSelectionController::new();
        controller.pointer_down(cell(1, "2024-06-03"), CellStatus::AdminBlocked, at(0.0));

        controller
            .pointer_over(cell(2, "2024-06-04"), CellStatus::AdminBlocked, at(40.0), true)
            .unwrap();
        controller
            .pointer_over(cell(1, "2024-06-04"), CellStatus::HostBlocked, at(80.0), true)
            .unwrap();

        let commit = controller.pointer_up().unwrap().unwrap();
        assert_eq!(commit.listing_id(), ListingId(1));
        assert_eq!(commit.dates(), &["2024-06-03", "2024-06-04"].map(String::from));
    }

    #[test]
    fn test_revisited_cell_is_not_duplicated() {
        let mut controller = DragSelectionController::new();
        controller.pointer_down(cell(1, "2024-06-03"), CellStatus::Available, at(0.0));

        for (x, date) in [(40.0, "2024-06-04"), (0.0, "2024-06-03"), (40.0, "2024-06-04")] {
            controller
                .pointer_over(cell(1, date), CellStatus::Available, at(x), true)
                .unwrap();
        }

        assert_eq!(controller.selected_dates().len(), 2);
    }

    #[test]
    fn test_pointer_over_with_button_released_finalizes() {
        let mut controller = DragSelectionController::new();
        controller.pointer_down(cell(1, "2024-06-03"), CellStatus::Available, at(0.0));
        controller
            .pointer_over(cell(1, "2024-06-04"), CellStatus::Available, at(40.0), true)
            .unwrap();

        let commit = controller
            .pointer_over(cell(1, "2024-06-05"), CellStatus::Available, at(80.0), false)
            .unwrap();

        assert_eq!(
            commit.map(|commit| commit.dates().to_vec()),
            Some(vec!["2024-06-03".to_string(), "2024-06-04".to_string()])
        );
        assert!(!controller.is_active());
    }

    #[test]
    fn test_second_pointer_down_is_ignored() {
        let mut controller = DragSelectionController::new();
        assert!(controller.pointer_down(cell(1, "2024-06-03"), CellStatus::Available, at(0.0)));
        assert!(!controller.pointer_down(cell(2, "2024-06-09"), CellStatus::HostBlocked, at(0.0)));

        let commit = controller.pointer_up().unwrap().unwrap();
        assert_eq!(commit.listing_id(), ListingId(1));
        assert!(matches!(commit, SelectionCommit::Block(_)));
    }

    #[test]
    fn test_pointer_down_without_date_is_ignored() {
        let mut controller = DragSelectionController::new();
        assert!(!controller.pointer_down(cell(1, ""), CellStatus::Available, at(0.0)));
        assert_eq!(controller.pointer_up(), Ok(None));
    }

    #[test]
    fn test_marks_are_cleared_on_release() {
        let mut controller = DragSelectionController::with_surface(RecordingSurface::default());
        controller.pointer_down(cell(1, "2024-06-03"), CellStatus::Available, at(0.0));
        controller
            .pointer_over(cell(1, "2024-06-04"), CellStatus::Available, at(40.0), true)
            .unwrap();
        assert_eq!(controller.surface().marked.len(), 2);

        controller.pointer_up().unwrap();
        assert!(controller.surface().marked.is_empty());
        assert_eq!(controller.surface().unmark_calls, 2);
    }

    #[test]
    fn test_cancel_clears_marks_without_commit() {
        let mut controller = DragSelectionController::with_surface(RecordingSurface::default());
        controller.pointer_down(cell(1, "2024-06-03"), CellStatus::Available, at(0.0));

        controller.cancel();
        assert!(controller.surface().marked.is_empty());
        assert_eq!(controller.pointer_up(), Ok(None));
    }
}

mod common;
pub(crate) use crate::common::*;

mod async_matrix_test {
    use embassy_futures::block_on;
    use keyscan::{DefaultDebouncer, InputDevice, KeyboardEvent, MAX_ROWS, ScanStatus, SharedMatrixState};

    use super::*;

    #[test]
    fn test_async_scan_pass_matches_blocking() {
        let raw = |pass: usize, row: usize| -> u8 {
            match (pass, row) {
                (3..=6, 0) => 0b11,
                (5.., 1) => 0b10,
                _ => 0,
            }
        };
        let (mut blocking, blocking_log) = scripted_matrix::<_, u8, 2, 2>(DefaultDebouncer::new(3), raw);
        let (mut asynchronous, async_log) = scripted_matrix::<_, u8, 2, 2>(DefaultDebouncer::new(3), raw);

        block_on(async {
            for _ in 0..15 {
                let expected = blocking.scan_pass();
                assert_eq!(asynchronous.scan_pass_async().await, expected);
                assert_eq!(asynchronous.state(), blocking.state());
            }
        });
        assert_eq!(*async_log.borrow(), *blocking_log.borrow());
    }

    #[test]
    fn test_read_event_reports_committed_changes() {
        let (mut matrix, _) = scripted_matrix::<_, u8, 2, 3>(DefaultDebouncer::new(2), |pass, row| match (pass, row) {
            (1..=2, 0) => 0b101,
            (3.., 0) => 0b001,
            (_, 1) => 0b010,
            _ => 0,
        });

        block_on(async {
            assert_eq!(matrix.read_event().await, Ok(KeyboardEvent::key(0, 0, true)));
            assert_eq!(matrix.read_event().await, Ok(KeyboardEvent::key(0, 2, true)));
            assert_eq!(matrix.read_event().await, Ok(KeyboardEvent::key(1, 1, true)));
            assert_eq!(matrix.read_event().await, Ok(KeyboardEvent::key(0, 2, false)));
        });
        assert_eq!(*matrix.state().rows(), [0b001, 0b010]);
    }

    #[test]
    fn test_read_event_on_last_addressable_row() {
        let (mut matrix, _) = scripted_matrix::<_, u8, MAX_ROWS, 1>(DefaultDebouncer::new(1), |_, row| match row {
            255 => 0b1,
            _ => 0,
        });

        block_on(async {
            assert_eq!(matrix.read_event().await, Ok(KeyboardEvent::key(255, 0, true)));
        });
        assert_eq!(matrix.is_pressed(255, 0), Ok(true));
        assert_eq!(matrix.state().pressed_count(), 1);
    }

    #[test]
    fn test_publish_committed_state() {
        static SHARED: SharedMatrixState<u8, 2, 2> = SharedMatrixState::new();

        let (mut matrix, _) = scripted_matrix::<_, u8, 2, 2>(DefaultDebouncer::new(2), |_, row| match row {
            1 => 0b01,
            _ => 0,
        });

        block_on(async {
            loop {
                if matrix.scan_pass_async().await == Ok(ScanStatus::Committed) {
                    SHARED.publish(matrix.state());
                    break;
                }
                assert!(SHARED.snapshot().is_empty());
            }
        });
        assert_eq!(SHARED.is_pressed(1, 0), Ok(true));
        assert_eq!(SHARED.snapshot(), *matrix.state());
    }
}

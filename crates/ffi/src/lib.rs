//! C ABI for the forest fire automaton.
//!
//! Every function records failures in a thread-local slot readable through
//! `forest_fire_get_last_error()`. The header `ForestFireFFI.h` is generated at build time
//! by `cbindgen`.

mod error;
mod helpers;
mod instance;
mod queries;
mod simulation;

pub use error::{
    forest_fire_get_last_error, forest_fire_get_last_error_code, ForestFireErrorCode,
};
pub use instance::{forest_fire_destroy, forest_fire_new, ForestFireInstance, ForestIgnition};
pub use queries::{
    forest_fire_copy_state, forest_fire_get_cell, forest_fire_get_dimensions,
    forest_fire_get_stats, forest_fire_has_fire, ForestFireStats,
};
pub use simulation::{forest_fire_run_until_extinguished, forest_fire_step};

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;
    use std::ptr;

    fn create(
        width: usize,
        height: usize,
        p: f64,
        ignitions: &[ForestIgnition],
    ) -> *mut ForestFireInstance {
        let mut sim = ptr::null_mut();
        let code = unsafe {
            forest_fire_new(width, height, p, 7, ignitions.as_ptr(), ignitions.len(), &mut sim)
        };
        assert_eq!(code, ForestFireErrorCode::Ok);
        assert!(!sim.is_null());
        sim
    }

    #[test]
    fn test_lifecycle_and_center_example() {
        let sim = create(3, 3, 1.0, &[ForestIgnition { row: 1, col: 1 }]);
        assert!(forest_fire_has_fire(sim));

        assert_eq!(forest_fire_step(sim), ForestFireErrorCode::Ok);

        let mut cells = [0u8; 9];
        let code = unsafe { forest_fire_copy_state(sim, cells.as_mut_ptr(), cells.len()) };
        assert_eq!(code, ForestFireErrorCode::Ok);
        assert_eq!(cells, [0, 1, 0, 1, 2, 1, 0, 1, 0]);

        let mut stats = ForestFireStats {
            trees: 0,
            burning: 0,
            ash: 0,
            generation: 0,
        };
        assert_eq!(
            unsafe { forest_fire_get_stats(sim, &mut stats) },
            ForestFireErrorCode::Ok
        );
        assert_eq!((stats.trees, stats.burning, stats.ash, stats.generation), (4, 4, 1, 1));

        let mut steps = 0;
        assert_eq!(
            unsafe { forest_fire_run_until_extinguished(sim, 100, &mut steps) },
            ForestFireErrorCode::Ok
        );
        assert_eq!(steps, 2);
        assert!(!forest_fire_has_fire(sim));

        unsafe { forest_fire_destroy(sim) };
    }

    #[test]
    fn test_invalid_arguments_report_codes() {
        let mut sim = ptr::null_mut();

        let code = unsafe { forest_fire_new(0, 3, 0.5, 1, ptr::null(), 0, &mut sim) };
        assert_eq!(code, ForestFireErrorCode::InvalidDimension);
        assert!(sim.is_null());
        assert_eq!(forest_fire_get_last_error_code(), ForestFireErrorCode::InvalidDimension);

        let code = unsafe { forest_fire_new(3, 3, 1.5, 1, ptr::null(), 0, &mut sim) };
        assert_eq!(code, ForestFireErrorCode::InvalidProbability);

        let outside = [ForestIgnition { row: 3, col: 0 }];
        let code = unsafe { forest_fire_new(3, 3, 0.5, 1, outside.as_ptr(), 1, &mut sim) };
        assert_eq!(code, ForestFireErrorCode::OutOfBoundsIgnition);
        let message = unsafe { CStr::from_ptr(forest_fire_get_last_error()) };
        assert!(message.to_str().unwrap().contains("row 3"));

        let code = unsafe { forest_fire_new(3, 3, 0.5, 1, ptr::null(), 2, &mut sim) };
        assert_eq!(code, ForestFireErrorCode::NullPointer);

        let code = unsafe { forest_fire_new(3, 3, 0.5, 1, ptr::null(), 0, ptr::null_mut()) };
        assert_eq!(code, ForestFireErrorCode::NullPointer);
    }

    #[test]
    fn test_success_clears_last_error() {
        let mut sim = ptr::null_mut();
        let _ = unsafe { forest_fire_new(0, 0, 0.5, 1, ptr::null(), 0, &mut sim) };
        assert!(!forest_fire_get_last_error().is_null());

        let sim = create(2, 2, 0.5, &[]);
        assert!(forest_fire_get_last_error().is_null());
        assert_eq!(forest_fire_get_last_error_code(), ForestFireErrorCode::Ok);
        unsafe { forest_fire_destroy(sim) };
    }

    #[test]
    fn test_copy_state_rejects_short_buffer() {
        let sim = create(4, 2, 0.5, &[ForestIgnition { row: 0, col: 3 }]);
        let mut cells = [9u8; 7];
        let code = unsafe { forest_fire_copy_state(sim, cells.as_mut_ptr(), cells.len()) };
        assert_eq!(code, ForestFireErrorCode::BufferTooSmall);
        assert_eq!(cells, [9u8; 7]);
        unsafe { forest_fire_destroy(sim) };
    }

    #[test]
    fn test_dimensions_and_cell_query() {
        let sim = create(5, 2, 0.5, &[ForestIgnition { row: 1, col: 4 }]);

        let (mut width, mut height) = (0, 0);
        assert_eq!(
            unsafe { forest_fire_get_dimensions(sim, &mut width, &mut height) },
            ForestFireErrorCode::Ok
        );
        assert_eq!((width, height), (5, 2));

        let mut state = u8::MAX;
        let mut found = false;
        unsafe { forest_fire_get_cell(sim, 1, 4, &mut state, &mut found) };
        assert!(found);
        assert_eq!(state, 1);

        unsafe { forest_fire_get_cell(sim, 4, 1, &mut state, &mut found) };
        assert!(!found);

        unsafe { forest_fire_destroy(sim) };
    }

    #[test]
    fn test_null_handle() {
        assert_eq!(forest_fire_step(ptr::null()), ForestFireErrorCode::NullPointer);
        assert!(!forest_fire_has_fire(ptr::null()));
        assert_eq!(forest_fire_get_last_error_code(), ForestFireErrorCode::NullPointer);
        unsafe { forest_fire_destroy(ptr::null_mut()) };
    }
}

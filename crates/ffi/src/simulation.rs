use forest_fire_core::ForestFireSimulation;

use crate::error::{DefaultFfiError, ForestFireErrorCode};
use crate::helpers::{
    handle_ffi_result_error, instance_from_ptr, track_error, with_forest_fire_mut,
};
use crate::instance::ForestFireInstance;

/// Advance the simulation by one generation.
///
/// Thread-safe: acquires the `RwLock` write lock for the whole step, so readers never
/// observe a partially updated grid.
///
/// Returns
/// - `ForestFireErrorCode::Ok` (0) on success
/// - `ForestFireErrorCode::NullPointer` if `ptr` is null
/// - `ForestFireErrorCode::LockPoisoned` if the internal lock is poisoned
///
/// `ptr` must be null or a live pointer returned by `forest_fire_new`.
#[no_mangle]
pub extern "C" fn forest_fire_step(ptr: *const ForestFireInstance) -> ForestFireErrorCode {
    handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        with_forest_fire_mut(instance, ForestFireSimulation::simulate_step)
    })
}

/// Step until the fire is out or `max_steps` steps have run.
///
/// Writes the number of steps taken to `out_steps`.
///
/// # Safety
///
/// - `ptr` must be null or a live pointer returned by `forest_fire_new`.
/// - `out_steps` must be a valid, non-null pointer to a `usize`.
#[no_mangle]
pub unsafe extern "C" fn forest_fire_run_until_extinguished(
    ptr: *const ForestFireInstance,
    max_steps: usize,
    out_steps: *mut usize,
) -> ForestFireErrorCode {
    if out_steps.is_null() {
        return track_error(&DefaultFfiError::null_pointer("out_steps"));
    }

    handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        let steps = with_forest_fire_mut(instance, |sim| sim.run_until_extinguished(max_steps))?;
        unsafe {
            *out_steps = steps;
        }
        Ok(())
    })
}

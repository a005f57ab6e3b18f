use forest_fire_core::{ForestFireSimulation, GridCoord};
use std::ptr;
use std::sync::RwLock;

use crate::error::{DefaultFfiError, ForestFireErrorCode};
use crate::helpers::{track_error, track_result};

/// C-compatible `(row, col)` ignition coordinate.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForestIgnition {
    /// Row index (outer, height axis)
    pub row: usize,
    /// Column index (inner, width axis)
    pub col: usize,
}

impl From<ForestIgnition> for GridCoord {
    fn from(ignition: ForestIgnition) -> Self {
        GridCoord::new(ignition.row, ignition.col)
    }
}

/// Opaque forest fire simulation handle.
///
/// # Thread Safety
/// The simulation sits behind an `RwLock`:
/// - **Multiple concurrent readers** (`forest_fire_has_fire`, `forest_fire_copy_state`, ...)
/// - **Exclusive writer** (`forest_fire_step`)
///
/// A step therefore always completes before any reader sees the grid, even when the handle
/// is shared between a simulation thread and a render thread.
pub struct ForestFireInstance {
    pub(crate) sim: RwLock<ForestFireSimulation>,
}

impl ForestFireInstance {
    /// Creates a new instance with a `StdRng` seeded from `seed`.
    ///
    /// # Errors
    ///
    /// Returns the construction error of the core simulation, mapped to its FFI code.
    pub(crate) fn new(
        width: usize,
        height: usize,
        probability: f64,
        seed: u64,
        ignitions: &[ForestIgnition],
    ) -> Result<Box<Self>, DefaultFfiError> {
        let sim = ForestFireSimulation::seeded(
            width,
            height,
            probability,
            ignitions.iter().copied(),
            seed,
        )?;

        Ok(Box::new(Self {
            sim: RwLock::new(sim),
        }))
    }
}

/// Create a new forest fire instance and return it via out-parameter.
///
/// Parameters
/// - `width`, `height`: grid size in cells, both non-zero
/// - `probability`: per-(burning cell, neighbour) ignition chance in `[0, 1]`
/// - `seed`: RNG seed; equal seeds reproduce equal runs
/// - `ignitions`: array of `ignition_count` `(row, col)` cells burning at generation 0.
///   May be null when `ignition_count` is 0. Copied; the caller keeps ownership.
/// - `out_instance`: receives the created instance, or null on failure
///
/// Returns
/// - `ForestFireErrorCode::Ok` (0) on success, `out_instance` contains valid pointer
/// - `ForestFireErrorCode::NullPointer` if `out_instance` is null, or `ignitions` is null
///   with a non-zero count
/// - `ForestFireErrorCode::InvalidDimension` if `width` or `height` is zero
/// - `ForestFireErrorCode::InvalidProbability` if `probability` outside `[0, 1]`
/// - `ForestFireErrorCode::OutOfBoundsIgnition` if an ignition lies outside the grid
///
/// Call `forest_fire_get_last_error()` for a human-readable description.
///
/// # Safety
///
/// - `out_instance` must be a valid, non-null pointer to writable memory.
/// - `ignitions` must point to `ignition_count` readable `ForestIgnition` values.
/// - The caller takes ownership of the returned instance and MUST call
///   `forest_fire_destroy` exactly once.
///
/// Example (C)
/// ```c
/// ForestIgnition center = { 32, 32 };
/// ForestFireInstance* sim = NULL;
/// if (forest_fire_new(64, 64, 0.55, 42, &center, 1, &sim) != Ok) {
///     fprintf(stderr, "%s\n", forest_fire_get_last_error());
///     return;
/// }
/// while (forest_fire_has_fire(sim)) {
///     forest_fire_step(sim);
/// }
/// forest_fire_destroy(sim);
/// ```
#[no_mangle]
pub unsafe extern "C" fn forest_fire_new(
    width: usize,
    height: usize,
    probability: f64,
    seed: u64,
    ignitions: *const ForestIgnition,
    ignition_count: usize,
    out_instance: *mut *mut ForestFireInstance,
) -> ForestFireErrorCode {
    if out_instance.is_null() {
        return track_error(&DefaultFfiError::null_pointer("out_instance"));
    }

    let ignitions: &[ForestIgnition] = if ignition_count == 0 {
        &[]
    } else if ignitions.is_null() {
        unsafe {
            *out_instance = ptr::null_mut();
        }
        return track_error(&DefaultFfiError::null_pointer("ignitions"));
    } else {
        // SAFETY: caller guarantees `ignition_count` readable elements.
        unsafe { std::slice::from_raw_parts(ignitions, ignition_count) }
    };

    match track_result(ForestFireInstance::new(
        width,
        height,
        probability,
        seed,
        ignitions,
    )) {
        Ok(instance) => {
            unsafe {
                *out_instance = Box::into_raw(instance);
            }
            ForestFireErrorCode::Ok
        }
        Err(code) => {
            unsafe {
                // Set to null on error (per documentation contract)
                *out_instance = ptr::null_mut();
            }
            code
        }
    }
}

/// Destroys an instance previously created by `forest_fire_new`.
///
/// If `ptr` is null, this function is a no-op.
///
/// # Safety
/// - The pointer MUST have been created by `forest_fire_new` and not freed already.
/// - After calling this function, the caller must not use the pointer again.
#[no_mangle]
pub unsafe extern "C" fn forest_fire_destroy(ptr: *mut ForestFireInstance) {
    if ptr.is_null() {
        return;
    }

    // SAFETY: the pointer came from `Box::into_raw` in `forest_fire_new` and is still live.
    unsafe {
        drop(Box::from_raw(ptr));
    }
}

use forest_fire_core::{BurnStats, ForestFireSimulation, GridCoord};

use crate::error::{DefaultFfiError, ForestFireErrorCode};
use crate::helpers::{
    handle_ffi_result_error, instance_from_ptr, track_error, with_forest_fire,
};
use crate::instance::ForestFireInstance;

#[repr(C)]
/// FFI-friendly snapshot of per-state cell counts.
/// Keep this layout stable for C/C++/C# consumers.
pub struct ForestFireStats {
    /// Cells still `Tree`.
    pub trees: usize,

    /// Cells currently `Fire`.
    pub burning: usize,

    /// Cells burnt out to `Ash`.
    pub ash: usize,

    /// Completed steps.
    pub generation: u64,
}

impl From<BurnStats> for ForestFireStats {
    fn from(stats: BurnStats) -> Self {
        Self {
            trees: stats.trees,
            burning: stats.burning,
            ash: stats.ash,
            generation: stats.generation,
        }
    }
}

/// Whether any cell is burning.
///
/// Returns `false` when `ptr` is null or the lock is poisoned; check
/// `forest_fire_get_last_error_code()` to tell those apart from an extinguished fire.
///
/// `ptr` must be null or a live pointer returned by `forest_fire_new`.
#[no_mangle]
pub extern "C" fn forest_fire_has_fire(ptr: *const ForestFireInstance) -> bool {
    let mut has_fire = false;
    handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        has_fire = with_forest_fire(instance, ForestFireSimulation::has_fire)?;
        Ok(())
    });
    has_fire
}

#[no_mangle]
/// Fill `out_stats` with the current cell counts.
///
/// Returns
/// - `ForestFireErrorCode::Ok` (0) on success
/// - `ForestFireErrorCode::NullPointer` if `ptr` or `out_stats` is null
/// - `ForestFireErrorCode::LockPoisoned` if the internal lock is poisoned
///
/// # Safety
///
/// - `ptr` must be null or a live pointer returned by `forest_fire_new`.
/// - `out_stats` must be a valid, non-null pointer to a `ForestFireStats`.
pub unsafe extern "C" fn forest_fire_get_stats(
    ptr: *const ForestFireInstance,
    out_stats: *mut ForestFireStats,
) -> ForestFireErrorCode {
    if out_stats.is_null() {
        return track_error(&DefaultFfiError::null_pointer("out_stats"));
    }

    handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        let stats = with_forest_fire(instance, ForestFireSimulation::stats)?;
        unsafe {
            *out_stats = stats.into();
        }
        Ok(())
    })
}

#[no_mangle]
/// Write the grid size to `out_width` (columns) and `out_height` (rows).
///
/// # Safety
///
/// - `ptr` must be null or a live pointer returned by `forest_fire_new`.
/// - `out_width` and `out_height` must be valid, non-null pointers to `usize`.
pub unsafe extern "C" fn forest_fire_get_dimensions(
    ptr: *const ForestFireInstance,
    out_width: *mut usize,
    out_height: *mut usize,
) -> ForestFireErrorCode {
    if out_width.is_null() {
        return track_error(&DefaultFfiError::null_pointer("out_width"));
    }
    if out_height.is_null() {
        return track_error(&DefaultFfiError::null_pointer("out_height"));
    }

    handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        let (width, height) = with_forest_fire(instance, |sim| (sim.width(), sim.height()))?;
        unsafe {
            *out_width = width;
            *out_height = height;
        }
        Ok(())
    })
}

#[no_mangle]
/// Copy the grid into a caller-owned buffer, row-major, one byte per cell.
///
/// Tags: `0` = Tree, `1` = Fire, `2` = Ash. Cell `(row, col)` lands at
/// `out_cells[row * width + col]`. The copy is taken under the read lock, so it always
/// reflects a complete generation.
///
/// Returns
/// - `ForestFireErrorCode::Ok` (0) on success
/// - `ForestFireErrorCode::NullPointer` if `ptr` or `out_cells` is null
/// - `ForestFireErrorCode::BufferTooSmall` if `len < width * height` (nothing is written)
/// - `ForestFireErrorCode::LockPoisoned` if the internal lock is poisoned
///
/// # Safety
///
/// - `ptr` must be null or a live pointer returned by `forest_fire_new`.
/// - `out_cells` must point to `len` writable bytes.
pub unsafe extern "C" fn forest_fire_copy_state(
    ptr: *const ForestFireInstance,
    out_cells: *mut u8,
    len: usize,
) -> ForestFireErrorCode {
    if out_cells.is_null() {
        return track_error(&DefaultFfiError::null_pointer("out_cells"));
    }

    handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        with_forest_fire(instance, |sim| {
            let cells = sim.grid().cells();
            if len < cells.len() {
                return Err(DefaultFfiError::buffer_too_small(cells.len(), len));
            }
            // SAFETY: caller guarantees `len` writable bytes, and `cells.len() <= len`.
            let out = unsafe { std::slice::from_raw_parts_mut(out_cells, cells.len()) };
            for (dst, cell) in out.iter_mut().zip(cells) {
                *dst = cell.as_u8();
            }
            Ok(())
        })?
    })
}

#[no_mangle]
/// Read one cell.
///
/// - `out_state` receives the cell tag (`0` Tree, `1` Fire, `2` Ash) when in bounds.
/// - `out_found` receives whether `(row, col)` is inside the grid.
///
/// # Safety
///
/// - `ptr` must be null or a live pointer returned by `forest_fire_new`.
/// - `out_state` and `out_found` must be valid, non-null pointers.
pub unsafe extern "C" fn forest_fire_get_cell(
    ptr: *const ForestFireInstance,
    row: usize,
    col: usize,
    out_state: *mut u8,
    out_found: *mut bool,
) -> ForestFireErrorCode {
    if out_state.is_null() {
        return track_error(&DefaultFfiError::null_pointer("out_state"));
    }
    if out_found.is_null() {
        return track_error(&DefaultFfiError::null_pointer("out_found"));
    }

    handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        let cell = with_forest_fire(instance, |sim| sim.grid().get(GridCoord::new(row, col)))?;
        unsafe {
            *out_found = cell.is_some();
            if let Some(cell) = cell {
                *out_state = cell.as_u8();
            }
        }
        Ok(())
    })
}

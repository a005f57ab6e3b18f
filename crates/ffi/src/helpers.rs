use crate::error::{with_last_error_mut, DefaultFfiError, FfiError, ForestFireErrorCode};
use crate::instance::ForestFireInstance;
use forest_fire_core::ForestFireSimulation;
use std::ffi::CString;

/// Set the thread-local error message and code.
/// Accepts any type implementing `FfiError` trait.
pub(crate) fn set_last_error(error: &impl FfiError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Track an error by setting it in thread-local storage and returning its code.
#[inline]
pub(crate) fn track_error(error: &impl FfiError) -> ForestFireErrorCode {
    set_last_error(error);
    error.code()
}

/// Clear the thread-local error message and code.
/// Called on successful operations.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = ForestFireErrorCode::Ok;
    });
}

/// Record the outcome of a fallible operation in thread-local storage.
pub(crate) fn track_result<T>(
    result: Result<T, DefaultFfiError>,
) -> Result<T, ForestFireErrorCode> {
    match result {
        Ok(value) => {
            clear_last_error();
            Ok(value)
        }
        Err(error) => Err(track_error(&error)),
    }
}

/// Run `f`, record its outcome and collapse it to an error code.
pub(crate) fn handle_ffi_result_error<F>(f: F) -> ForestFireErrorCode
where
    F: FnOnce() -> Result<(), DefaultFfiError>,
{
    match track_result(f()) {
        Ok(()) => ForestFireErrorCode::Ok,
        Err(code) => code,
    }
}

/// Borrow the instance behind a raw pointer, rejecting null.
pub(crate) fn instance_from_ptr<'a>(
    ptr: *const ForestFireInstance,
) -> Result<&'a ForestFireInstance, DefaultFfiError> {
    // SAFETY: the caller guarantees non-null pointers came from `forest_fire_new` and have
    // not been destroyed.
    unsafe { ptr.as_ref() }.ok_or_else(|| DefaultFfiError::null_pointer("ptr"))
}

/// Run `f` under the simulation's read lock.
pub(crate) fn with_forest_fire<F, T>(
    instance: &ForestFireInstance,
    f: F,
) -> Result<T, DefaultFfiError>
where
    F: FnOnce(&ForestFireSimulation) -> T,
{
    let sim = instance
        .sim
        .read()
        .map_err(|_| DefaultFfiError::lock_poisoned("RwLock"))?;
    Ok(f(&sim))
}

/// Run `f` under the simulation's write lock.
pub(crate) fn with_forest_fire_mut<F, T>(
    instance: &ForestFireInstance,
    f: F,
) -> Result<T, DefaultFfiError>
where
    F: FnOnce(&mut ForestFireSimulation) -> T,
{
    let mut sim = instance
        .sim
        .write()
        .map_err(|_| DefaultFfiError::lock_poisoned("RwLock"))?;
    Ok(f(&mut sim))
}

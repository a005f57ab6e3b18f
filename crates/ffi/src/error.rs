use forest_fire_core::ForestFireError;
use std::cell::RefCell;
use std::ffi::CString;
use std::fmt;
use std::os::raw::c_char;
use std::ptr;

/// Common interface for FFI error types.
///
/// - `code()` - Returns the error code to be passed across FFI boundary
/// - `msg()` - Returns the error message for diagnostic purposes
pub(crate) trait FfiError {
    /// Returns the error code to be returned across the FFI boundary.
    fn code(&self) -> ForestFireErrorCode;

    /// Returns the human-readable error message.
    fn msg(&self) -> &str;
}

/// Default implementation of `FfiError` for the failures the C ABI can report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultFfiError {
    code: ForestFireErrorCode,
    msg: String,
}

impl DefaultFfiError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out_instance"`, `"ptr"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: ForestFireErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for poisoned lock.
    ///
    /// # Arguments
    /// * `lock_name` - The name of the lock that was poisoned (e.g., `"RwLock"`)
    pub fn lock_poisoned(lock_name: &str) -> Self {
        Self {
            code: ForestFireErrorCode::LockPoisoned,
            msg: format!("Lock '{lock_name}' was poisoned by a panic in another thread"),
        }
    }

    /// Create error for an output buffer shorter than the grid.
    pub fn buffer_too_small(required: usize, provided: usize) -> Self {
        Self {
            code: ForestFireErrorCode::BufferTooSmall,
            msg: format!("Output buffer holds {provided} cells but the grid has {required}"),
        }
    }
}

impl From<ForestFireError> for DefaultFfiError {
    fn from(error: ForestFireError) -> Self {
        let code = match error {
            ForestFireError::InvalidDimension { .. } => ForestFireErrorCode::InvalidDimension,
            ForestFireError::InvalidProbability(_) => ForestFireErrorCode::InvalidProbability,
            ForestFireError::OutOfBoundsIgnition { .. } => {
                ForestFireErrorCode::OutOfBoundsIgnition
            }
        };
        Self {
            code,
            msg: error.to_string(),
        }
    }
}

impl FfiError for DefaultFfiError {
    fn code(&self) -> ForestFireErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

/// FFI error codes returned by forest fire functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForestFireErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// Lock poisoned: internal synchronization primitive was poisoned by a panic.
    LockPoisoned = 2,

    /// Grid width or height is zero.
    InvalidDimension = 3,

    /// Propagation probability is not a finite value in [0, 1].
    InvalidProbability = 4,

    /// An initial ignition coordinate lies outside the grid.
    OutOfBoundsIgnition = 5,

    /// Caller-provided output buffer is shorter than the grid.
    BufferTooSmall = 6,
}

impl fmt::Display for ForestFireErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ForestFireErrorCode::Ok => "ok",
            ForestFireErrorCode::NullPointer => "null pointer",
            ForestFireErrorCode::LockPoisoned => "lock poisoned",
            ForestFireErrorCode::InvalidDimension => "invalid dimension",
            ForestFireErrorCode::InvalidProbability => "invalid probability",
            ForestFireErrorCode::OutOfBoundsIgnition => "out-of-bounds ignition",
            ForestFireErrorCode::BufferTooSmall => "buffer too small",
        };
        f.write_str(text)
    }
}

impl From<DefaultFfiError> for ForestFireErrorCode {
    fn from(error: DefaultFfiError) -> Self {
        error.code
    }
}

thread_local! {
    /// Thread-local storage for the most recent FFI error (C string, error code).
    /// The `CString` is stored to prevent memory leaks when returning raw pointers via FFI.
    static LAST_ERROR: RefCell<(Option<CString>, ForestFireErrorCode)> =
        const { RefCell::new((None, ForestFireErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, ForestFireErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, ForestFireErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if an error occurred.
/// - `null` if the last call on this thread succeeded.
///
/// # Lifetime
/// The returned pointer is valid until the next FFI call on this thread that sets or
/// clears the error. **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```c
/// ForestFireInstance* sim = NULL;
/// if (forest_fire_new(64, 64, 0.5, 1, ignitions, 1, &sim) != Ok) {
///     printf("Forest fire creation failed: %s\n", forest_fire_get_last_error());
/// }
/// ```
#[no_mangle]
pub extern "C" fn forest_fire_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code (`Ok` if the last call succeeded).
///
/// Error codes are stored per thread, so each thread has its own independent error state.
#[no_mangle]
pub extern "C" fn forest_fire_get_last_error_code() -> ForestFireErrorCode {
    with_last_error(|(_cstring, code)| *code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_map_to_codes() {
        let err = DefaultFfiError::from(ForestFireError::InvalidProbability(2.0));
        assert_eq!(err.code(), ForestFireErrorCode::InvalidProbability);
        assert!(err.msg().contains('2'));

        let err = DefaultFfiError::from(ForestFireError::InvalidDimension {
            width: 0,
            height: 1,
        });
        assert_eq!(err.code(), ForestFireErrorCode::InvalidDimension);

        let err = DefaultFfiError::from(ForestFireError::OutOfBoundsIgnition {
            row: 9,
            col: 9,
            width: 2,
            height: 2,
        });
        assert_eq!(
            ForestFireErrorCode::from(err),
            ForestFireErrorCode::OutOfBoundsIgnition
        );
    }

    #[test]
    fn test_null_pointer_message() {
        let err = DefaultFfiError::null_pointer("ptr");
        assert_eq!(err.code(), ForestFireErrorCode::NullPointer);
        assert_eq!(err.msg(), "Parameter 'ptr' cannot be null");
    }
}

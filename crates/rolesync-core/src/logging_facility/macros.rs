//! Canonical logging macros
//!
//! Every operation boundary and every recovered per-item failure goes
//! through one of these, so the `component`/`op`/`event` triple is always
//! present and event names come from `core_types::schema`.
//!
//! | Macro | Level | `event` |
//! |---|---|---|
//! | `log_op_start!` | info | `start` |
//! | `log_op_end!` | info | `end` |
//! | `log_op_error!` | error | `end_error` |
//! | `log_item_skip!` | warn | `item_skipped` |
//!
//! Extra `key = value` fields may follow the required arguments and use the
//! usual `tracing` field syntax (`%display`, `?debug`).

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use rolesync_core::log_op_start;
/// log_op_start!("compare_datasets");
/// log_op_start!("compare_datasets", record_count = 3);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)+)?) => {
        $crate::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
            $($($field)+)?
        )
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use rolesync_core::log_op_end;
/// log_op_end!("build_manifest", duration_ms = 42);
/// log_op_end!("build_manifest", duration_ms = 42, entry_count = 7);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)+)?) => {
        $crate::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($($field)+)?
        )
    };
}

/// Log an operation that ended in error
///
/// Accepts anything convertible into `ExError`; its kind, code and message
/// are attached.
///
/// # Example
///
/// ```
/// # use rolesync_core::{log_op_error, errors::RoleSyncError};
/// let err = RoleSyncError::EmptyId { index: 2 };
/// log_op_error!("merge_datasets", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)+)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            err_message = ex_err.message(),
            $($($field)+)?
        )
    }};
}

/// Log one input item that was skipped while the operation carried on
///
/// The error's entity id and path land in `record_id` and `path` (empty
/// when the error has none).
///
/// # Example
///
/// ```
/// # use rolesync_core::{log_item_skip, errors::RoleSyncError};
/// let err = RoleSyncError::BlockNotFound { identifier: "imp".to_string() };
/// log_item_skip!("extract_all", err);
/// ```
#[macro_export]
macro_rules! log_item_skip {
    ($op:expr, $err:expr $(, $($field:tt)+)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::tracing::warn!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_ITEM_SKIPPED,
            record_id = ex_err.entity_id().unwrap_or_default(),
            path = ex_err.path().unwrap_or_default(),
            err_code = ex_err.code(),
            err_message = ex_err.message(),
            $($($field)+)?
        )
    }};
}

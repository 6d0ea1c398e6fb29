//! Maps panel errors to shoreline_core::AppError for consistent user-facing messages.

mod weather;

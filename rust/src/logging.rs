//! Verbosity-gated logging macros for the grid engine.
//!
//! Nothing is formatted when the configured verbosity is below the macro's level,
//! so the macros cost a single comparison at verbosity 0.
//! - 0: SILENT
//! - 1: CHANGES (snapshot rebuilds, page moves, search resets)
//! - 2: CHECKS (hit-test inversion, focus decisions)
//! - 3: DEBUG (packer and index internals)

pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_CHANGES: u8 = 1;
pub const VERBOSITY_CHECKS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Log at CHANGES level (verbosity >= 1).
#[macro_export]
macro_rules! log_changes {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHANGES {
            eprintln!("[grid] {}", format_args!($($arg)*));
        }
    };
}

/// Log at CHECKS level (verbosity >= 2).
#[macro_export]
macro_rules! log_checks {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHECKS {
            eprintln!("[grid:hit] {}", format_args!($($arg)*));
        }
    };
}

/// Log at DEBUG level (verbosity >= 3).
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DEBUG {
            eprintln!("[grid:debug] {}", format_args!($($arg)*));
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_ordered() {
        assert!(VERBOSITY_SILENT < VERBOSITY_CHANGES);
        assert!(VERBOSITY_CHANGES < VERBOSITY_CHECKS);
        assert!(VERBOSITY_CHECKS < VERBOSITY_DEBUG);
    }

    #[test]
    fn test_silent_macros_do_not_evaluate_format() {
        let verbosity = VERBOSITY_SILENT;
        let mut evaluated = false;
        let mut touch = || {
            evaluated = true;
            1
        };
        log_changes!(verbosity, "rows {}", touch());
        log_checks!(verbosity, "cell {}", 2);
        log_debug!(verbosity, "bucket {}", 3);
        assert!(!evaluated);
    }
}

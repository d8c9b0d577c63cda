#![cfg(feature = "tracing")]
//! Tracing emission for structured errors.

use tracing::Level;

use crate::serror::StructuredError;

impl StructuredError {
    /// Emit a tracing event carrying both the flat form and the structured
    /// record. The level has to be branched out because `event!` requires a
    /// constant level.
    pub fn emit(&self, level: Level, message: &str) {
        let record = self.to_record();
        if level == Level::ERROR {
            tracing::event!(Level::ERROR, error = %self, record = ?record, "{message}");
        } else if level == Level::WARN {
            tracing::event!(Level::WARN, error = %self, record = ?record, "{message}");
        } else if level == Level::INFO {
            tracing::event!(Level::INFO, error = %self, record = ?record, "{message}");
        } else if level == Level::DEBUG {
            tracing::event!(Level::DEBUG, error = %self, record = ?record, "{message}");
        } else {
            tracing::event!(Level::TRACE, error = %self, record = ?record, "{message}");
        }
    }
}

use std::fmt;

/// Log severity embedded in a [`StatusCode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Normal operation.
    Info,
    /// Output produced, but something needs attention.
    Warn,
    /// No output produced for the widget.
    Error,
}

/// Outcome of one widget invocation.
///
/// Codes below 300 are successes and get composited; everything else is skipped at the
/// composite step. The numeric values are stable and appear in run reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatusCode {
    /// Widget drew its output.
    Success,
    /// Nothing to draw (placeholder widgets); not an error.
    Skipped,
    /// Widget drew its output but reported a warning.
    SuccessWithWarning,
    /// Payload or location could not be turned into a runnable widget.
    BadRequest,
    /// No handler is registered for the widget type.
    WidgetNotFound,
    /// Payload failed schema validation.
    ValidationFailed,
    /// The widget's own logic failed.
    HandlerError,
    /// The scheduler gave up on the widget (ordering wait stopped making progress).
    SchedulerFault,
}

impl StatusCode {
    /// Numeric code.
    pub fn code(self) -> u16 {
        match self {
            Self::Success => 200,
            Self::Skipped => 204,
            Self::SuccessWithWarning => 299,
            Self::BadRequest => 400,
            Self::WidgetNotFound => 404,
            Self::ValidationFailed => 422,
            Self::HandlerError => 500,
            Self::SchedulerFault => 503,
        }
    }

    /// Inverse of [`StatusCode::code`].
    pub fn from_code(code: u16) -> Option<Self> {
        Some(match code {
            200 => Self::Success,
            204 => Self::Skipped,
            299 => Self::SuccessWithWarning,
            400 => Self::BadRequest,
            404 => Self::WidgetNotFound,
            422 => Self::ValidationFailed,
            500 => Self::HandlerError,
            503 => Self::SchedulerFault,
            _ => return None,
        })
    }

    /// Return `true` for codes below 300.
    pub fn is_success(self) -> bool {
        self.code() < 300
    }

    /// Return `true` when the widget's output should be composited.
    pub fn should_composite(self) -> bool {
        self.is_success() && self != Self::Skipped
    }

    /// Log severity for middlewares.
    pub fn severity(self) -> Severity {
        match self {
            Self::Success | Self::Skipped => Severity::Info,
            Self::SuccessWithWarning => Severity::Warn,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl serde::Serialize for StatusCode {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u16(self.code())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/handler/status.rs"]
mod tests;

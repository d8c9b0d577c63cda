//! The structured-error value itself.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::attr::{Attr, AttrValue};
use crate::record::{Record, Structured};
use crate::{CAUSE_KEY, MESSAGE_KEY};

/// Shared handle to a wrapped cause. `Arc` rather than `Box` so cloning an
/// error stays cheap and unwrapping observes the same allocation.
pub type Cause = Arc<dyn Error + Send + Sync + 'static>;

/// An immutable error value: a message, an optional wrapped cause, and
/// ordered key/value attributes.
///
/// The flat rendering is `Display`; the structured rendering is
/// [`StructuredError::to_record`]. Both are pure, so rendering twice yields
/// identical output. The cause, when present, is exposed through
/// [`Error::source`] for generic chain inspection.
#[derive(Debug, Clone)]
pub struct StructuredError {
    msg: Box<str>,
    cause: Option<Cause>,
    attrs: Vec<Attr>,
}

impl StructuredError {
    /// An error with no cause.
    pub fn new(msg: impl Into<Box<str>>) -> Self {
        Self {
            msg: msg.into(),
            cause: None,
            attrs: Vec::new(),
        }
    }

    /// An error wrapping an underlying cause.
    ///
    /// Accepts any error type by value, or an existing [`Cause`] handle when
    /// the caller wants to keep a reference to the shared allocation.
    pub fn wrap(msg: impl Into<Box<str>>, cause: impl Into<Cause>) -> Self {
        Self {
            msg: msg.into(),
            cause: Some(cause.into()),
            attrs: Vec::new(),
        }
    }

    /// Like [`StructuredError::wrap`], for call sites that may or may not
    /// have a cause in hand. `None` behaves exactly like
    /// [`StructuredError::new`].
    pub fn wrap_opt(msg: impl Into<Box<str>>, cause: Option<Cause>) -> Self {
        Self {
            msg: msg.into(),
            cause,
            attrs: Vec::new(),
        }
    }

    /// Attach one attribute. Attributes render in the order attached;
    /// duplicate keys are kept, and keys are not checked against the
    /// reserved `msg`/`cause` record keys.
    pub fn with(mut self, key: impl Into<Box<str>>, value: impl Into<AttrValue>) -> Self {
        self.attrs.push(Attr::new(key, value));
        self
    }

    /// Attach a sequence of attributes in order.
    pub fn with_attrs(mut self, attrs: impl IntoIterator<Item = Attr>) -> Self {
        self.attrs.extend(attrs);
        self
    }

    pub fn message(&self) -> &str {
        &self.msg
    }

    pub fn attrs(&self) -> &[Attr] {
        &self.attrs
    }

    /// Iterator over this error and every wrapped cause below it.
    pub fn chain(&self) -> crate::chain::Chain<'_> {
        crate::chain::chain(self)
    }

    /// Produce the structured record: the `msg` entry, then `cause` when one
    /// is present (absent otherwise, never null), then each attribute with
    /// its native type intact.
    ///
    /// A cause that is itself a [`StructuredError`] nests as a group,
    /// recursively; any other cause contributes its flat string form.
    pub fn to_record(&self) -> Record {
        let mut size = self.attrs.len() + 1;
        if self.cause.is_some() {
            size += 1;
        }

        let mut record = Record::with_capacity(size);
        record.push(MESSAGE_KEY, AttrValue::Str(self.msg.clone()));

        if let Some(cause) = &self.cause {
            match cause.downcast_ref::<StructuredError>() {
                Some(inner) => record.push(CAUSE_KEY, inner.to_record()),
                None => record.push(CAUSE_KEY, cause.to_string()),
            }
        }

        for attr in &self.attrs {
            record.push(attr.key(), attr.value().clone());
        }

        record
    }
}

/// Flat rendering: the message verbatim, then ` cause=[...]` with the
/// cause's own flat form, then ` key=value` per attribute. Nothing is
/// escaped or trimmed; an empty message is just an empty prefix.
impl fmt::Display for StructuredError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.msg)?;

        if let Some(cause) = &self.cause {
            write!(f, " {CAUSE_KEY}=[{cause}]")?;
        }

        for attr in &self.attrs {
            write!(f, " {attr}")?;
        }

        Ok(())
    }
}

/// The conversion behind `wrap`'s nested-cause pattern. Std provides no
/// blanket `From<E: Error>` for `Arc<dyn Error + ..>`, so the crate supplies
/// it for its own error type.
impl From<StructuredError> for Cause {
    fn from(err: StructuredError) -> Self {
        Arc::new(err)
    }
}

impl Error for StructuredError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn Error + 'static))
    }
}

impl Structured for StructuredError {
    fn to_record(&self) -> Record {
        StructuredError::to_record(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordValue;
    use serde_json::json;

    #[derive(Debug, thiserror::Error)]
    #[error("database connection failed")]
    struct DbUnavailable;

    impl From<DbUnavailable> for Cause {
        fn from(err: DbUnavailable) -> Self {
            Arc::new(err)
        }
    }

    #[test]
    fn message_only() {
        assert_eq!(StructuredError::new("test error").to_string(), "test error");
    }

    #[test]
    fn message_with_cause() {
        let err = StructuredError::wrap("test error", DbUnavailable);
        assert_eq!(
            err.to_string(),
            "test error cause=[database connection failed]",
        );
    }

    #[test]
    fn attributes_render_in_order() {
        let err = StructuredError::new("test error")
            .with("user", "john")
            .with("count", 42)
            .with("success", true);
        assert_eq!(err.to_string(), "test error user=john count=42 success=true");
    }

    #[test]
    fn cause_comes_before_attributes() {
        let err = StructuredError::wrap("operation failed", DbUnavailable)
            .with("operation", "fetch")
            .with("endpoint", "/api/users");
        assert_eq!(
            err.to_string(),
            "operation failed cause=[database connection failed] operation=fetch endpoint=/api/users",
        );
    }

    #[test]
    fn empty_message_keeps_leading_space() {
        let err = StructuredError::new("").with("key", "value");
        assert_eq!(err.to_string(), " key=value");
        assert_eq!(StructuredError::new("").to_string(), "");
    }

    #[test]
    fn heterogeneous_attribute_types() {
        let err = StructuredError::new("validation error")
            .with("field", "email")
            .with("line", 123)
            .with("score", 98.5)
            .with("valid", false)
            .with("data", json!({"key": "value"}));
        assert_eq!(
            err.to_string(),
            r#"validation error field=email line=123 score=98.5 valid=false data={"key":"value"}"#,
        );
    }

    #[test]
    fn nested_structured_cause_renders_recursively() {
        let inner = StructuredError::new("inner error").with("inner_key", "inner_value");
        let outer = StructuredError::wrap("outer error", inner);
        assert_eq!(
            outer.to_string(),
            "outer error cause=[inner error inner_key=inner_value]",
        );
    }

    #[test]
    fn deeply_nested_causes() {
        let level2 =
            StructuredError::wrap("level 2", StructuredError::new("level 3")).with("level", "2");
        let level1 = StructuredError::wrap("level 1", level2).with("level", "1");
        assert_eq!(
            level1.to_string(),
            "level 1 cause=[level 2 cause=[level 3] level=2] level=1",
        );
    }

    #[test]
    fn wrap_opt_without_cause_matches_new() {
        let err = StructuredError::wrap_opt("test error", None).with("key", "value");
        assert_eq!(err.to_string(), "test error key=value");
        assert!(err.source().is_none());
    }

    #[test]
    fn newlines_and_special_characters_verbatim() {
        let err = StructuredError::new("line1\nline2").with("multiline", "value1\nvalue2");
        assert_eq!(err.to_string(), "line1\nline2 multiline=value1\nvalue2");
    }

    #[test]
    fn rendering_is_idempotent() {
        let err = StructuredError::wrap("x", DbUnavailable).with("k", "v");
        assert_eq!(err.to_string(), err.to_string());
        assert_eq!(err.to_record(), err.to_record());
    }

    #[test]
    fn source_returns_shared_cause() {
        let cause: Cause = Arc::new(DbUnavailable);
        let err = StructuredError::wrap("failed to fetch user", cause.clone());

        let source = err.source().expect("source");
        assert!(std::ptr::addr_eq(source, Arc::as_ptr(&cause)));
        assert!(StructuredError::new("no cause").source().is_none());
    }

    #[test]
    fn record_without_cause_has_no_cause_key() {
        let record = StructuredError::new("x").with("k", "v").to_record();

        let keys: Vec<&str> = record.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["msg", "k"]);
        assert!(record.get(CAUSE_KEY).is_none());
        assert_eq!(record.get("k"), Some(&RecordValue::from("v")));
    }

    #[test]
    fn record_key_order_is_msg_cause_attrs() {
        let record = StructuredError::wrap("failed to fetch user", DbUnavailable)
            .with("user_id", "123")
            .with("table", "users")
            .with("retry_count", 3)
            .to_record();

        let keys: Vec<&str> = record.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["msg", "cause", "user_id", "table", "retry_count"]);
    }

    #[test]
    fn record_nests_structured_causes_as_groups() {
        let inner = StructuredError::new("inner error").with("inner_key", "inner_value");
        let outer = StructuredError::wrap("outer error", inner);

        assert_eq!(
            outer.to_record().to_value(),
            json!({
                "msg": "outer error",
                "cause": {"msg": "inner error", "inner_key": "inner_value"},
            }),
        );
    }

    #[test]
    fn record_preserves_attribute_types() {
        let record = StructuredError::new("test error")
            .with("key1", "value1")
            .with("key2", 42)
            .with("key3", true)
            .to_record();

        assert_eq!(
            record.to_value(),
            json!({"msg": "test error", "key1": "value1", "key2": 42, "key3": true}),
        );
    }

    #[test]
    fn reserved_key_collision_passes_through() {
        let record = StructuredError::new("real message").with("msg", "impostor").to_record();

        // Both entries are present; dedup policy belongs to the transport.
        assert_eq!(record.len(), 2);
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"msg":"real message","msg":"impostor"}"#,
        );
    }

    #[test]
    fn concrete_scenario() {
        let err = StructuredError::wrap("failed to fetch user", DbUnavailable)
            .with("user_id", "123")
            .with("table", "users")
            .with("retry_count", 3);
        assert_eq!(
            err.to_string(),
            "failed to fetch user cause=[database connection failed] user_id=123 table=users retry_count=3",
        );
    }
}

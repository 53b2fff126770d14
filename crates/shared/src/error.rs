use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{
    Error as GenericJsError, RangeError as JsRangeError, ReferenceError as JsReferenceError,
    SyntaxError as JsSyntaxError, TypeError as JsTypeError, UriError as JsUriError,
};

#[derive(Debug, Clone, Error)]
pub enum JsError {
    #[error("GenericJs Error: {0:?}")]
    GenericJs(GenericJsError),
    #[error("JsRange Error: {0:?}")]
    JsRange(JsRangeError),
    #[error("JsReference Error: {0:?}")]
    JsReference(JsReferenceError),
    #[error("JsSyntax Error: {0:?}")]
    JsSyntax(JsSyntaxError),
    #[error("JsType Error: {0:?}")]
    JsType(JsTypeError),
    #[error("JsUri Error: {0:?}")]
    JsUri(JsUriError),
    #[error("UnknownJsValue Error: {0:?}")]
    UnknownJsValue(String),
}

impl From<JsValue> for JsError {
    fn from(err: JsValue) -> JsError {
        if err.is_instance_of::<JsRangeError>() {
            return JsError::JsRange(err.into());
        }
        if err.is_instance_of::<JsReferenceError>() {
            return JsError::JsReference(err.into());
        }
        if err.is_instance_of::<JsSyntaxError>() {
            return JsError::JsSyntax(err.into());
        }
        if err.is_instance_of::<JsTypeError>() {
            return JsError::JsType(err.into());
        }
        if err.is_instance_of::<JsUriError>() {
            return JsError::JsUri(err.into());
        }
        if err.is_instance_of::<GenericJsError>() {
            return JsError::GenericJs(err.into());
        }
        JsError::UnknownJsValue(format!("{:?}", err))
    }
}

/// Errors surfaced to the page side. Everything here is logged rather than
/// shown to the user, so the emphasis is on keeping the context chain
/// readable in the console
#[derive(Debug, Clone, Error)]
pub enum FrontendError {
    #[error("{inner}")]
    Js { inner: JsError },
    #[error("{message}")]
    Client { message: String },
    #[error("{context}: {inner}")]
    WithContext { context: String, inner: Box<Self> },
}

impl From<JsValue> for FrontendError {
    fn from(value: JsValue) -> Self {
        Self::Js {
            inner: JsError::from(value),
        }
    }
}

impl From<serde_json::Error> for FrontendError {
    fn from(value: serde_json::Error) -> Self {
        Self::Client {
            message: format!("serde_json error: {value}"),
        }
    }
}

pub trait ErrorContext {
    fn context<S: Into<String>>(self, context: S) -> FrontendError;
    fn with_context<S: Into<String>, F: FnOnce() -> S>(self, context: F) -> FrontendError;
}

impl<E: Into<FrontendError>> ErrorContext for E {
    fn context<S: Into<String>>(self, context: S) -> FrontendError {
        FrontendError::WithContext {
            context: context.into(),
            inner: Box::new(self.into()),
        }
    }

    fn with_context<S: Into<String>, F: FnOnce() -> S>(self, context: F) -> FrontendError {
        self.context(context())
    }
}

pub trait ResultContext<T> {
    fn context<S: Into<String>>(self, context: S) -> Result<T, FrontendError>;
    fn with_context<S: Into<String>, F: FnOnce() -> S>(self, context: F)
        -> Result<T, FrontendError>;
}

impl<T, E: ErrorContext> ResultContext<T> for Result<T, E> {
    fn context<S: Into<String>>(self, context: S) -> Result<T, FrontendError> {
        self.map_err(|e| e.context(context))
    }

    fn with_context<S: Into<String>, F: FnOnce() -> S>(
        self,
        context: F,
    ) -> Result<T, FrontendError> {
        self.map_err(|e| e.with_context(context))
    }
}

#[cfg(test)]
mod test {
    use super::{ErrorContext, FrontendError, ResultContext};

    #[test]
    fn context_prepends_to_message() {
        let e = FrontendError::Client {
            message: "boom".to_string(),
        }
        .context("service_worker::ready");
        assert_eq!(e.to_string(), "service_worker::ready: boom");
    }

    #[test]
    fn contexts_nest_outermost_first() {
        let e = FrontendError::Client {
            message: "boom".to_string(),
        }
        .context("inner")
        .context("outer");
        assert_eq!(e.to_string(), "outer: inner: boom");
    }

    #[test]
    fn result_context_passes_ok_through() {
        let r: Result<u32, FrontendError> = Ok(1);
        assert_eq!(r.context("ignored").unwrap(), 1);
    }

    #[test]
    fn result_with_context_is_lazy() {
        let r: Result<u32, FrontendError> = Ok(1);
        let r = r.with_context(|| -> String { unreachable!("ok results take no context") });
        assert_eq!(r.unwrap(), 1);
    }
}

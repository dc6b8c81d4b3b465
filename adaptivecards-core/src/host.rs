//! Callbacks supplied by the embedding application.

use crate::action::ActionPayload;
use crate::error::ParseErrorReport;

/// The core's only outward calls besides store mutation
pub trait CardHost {
    /// Submit-class and custom actions, with input values already merged
    fn on_execute_action(&mut self, payload: ActionPayload);

    /// Navigation for `Action.OpenUrl`; hosts that do not distinguish it get
    /// the payload through `on_execute_action`
    fn on_open_url(&mut self, payload: ActionPayload) {
        self.on_execute_action(payload);
    }

    fn on_parse_error(&mut self, report: ParseErrorReport) {
        log::warn!("unhandled card error: {:?}: {}", report.error, report.message);
    }
}

/// Host built from closures
pub struct CallbackHost<'a> {
    execute_action: Box<dyn FnMut(ActionPayload) + 'a>,
    open_url: Option<Box<dyn FnMut(ActionPayload) + 'a>>,
    parse_error: Option<Box<dyn FnMut(ParseErrorReport) + 'a>>,
}

impl<'a> CallbackHost<'a> {
    pub fn new(execute_action: impl FnMut(ActionPayload) + 'a) -> Self {
        Self {
            execute_action: Box::new(execute_action),
            open_url: None,
            parse_error: None,
        }
    }

    pub fn with_open_url(mut self, open_url: impl FnMut(ActionPayload) + 'a) -> Self {
        self.open_url = Some(Box::new(open_url));
        self
    }

    pub fn with_parse_error(mut self, parse_error: impl FnMut(ParseErrorReport) + 'a) -> Self {
        self.parse_error = Some(Box::new(parse_error));
        self
    }
}

impl CardHost for CallbackHost<'_> {
    fn on_execute_action(&mut self, payload: ActionPayload) {
        (self.execute_action)(payload);
    }

    fn on_open_url(&mut self, payload: ActionPayload) {
        match self.open_url.as_mut() {
            Some(open_url) => open_url(payload),
            None => (self.execute_action)(payload),
        }
    }

    fn on_parse_error(&mut self, report: ParseErrorReport) {
        match self.parse_error.as_mut() {
            Some(parse_error) => parse_error(report),
            None => log::warn!("unhandled card error: {:?}: {}", report.error, report.message),
        }
    }
}

/// Host that ignores every callback
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHost;

impl CardHost for NoopHost {
    fn on_execute_action(&mut self, _payload: ActionPayload) {}

    fn on_parse_error(&mut self, _report: ParseErrorReport) {}
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    pub enum HostCall {
        Execute(ActionPayload),
        OpenUrl(ActionPayload),
        ParseError(ParseErrorReport),
    }

    /// Records every callback into a shared log
    #[derive(Clone, Default)]
    pub struct RecordingHost {
        pub calls: Rc<RefCell<Vec<HostCall>>>,
    }

    impl RecordingHost {
        pub fn calls(&self) -> Vec<HostCall> {
            self.calls.borrow().clone()
        }
    }

    impl CardHost for RecordingHost {
        fn on_execute_action(&mut self, payload: ActionPayload) {
            self.calls.borrow_mut().push(HostCall::Execute(payload));
        }

        fn on_open_url(&mut self, payload: ActionPayload) {
            self.calls.borrow_mut().push(HostCall::OpenUrl(payload));
        }

        fn on_parse_error(&mut self, report: ParseErrorReport) {
            self.calls.borrow_mut().push(HostCall::ParseError(report));
        }
    }
}

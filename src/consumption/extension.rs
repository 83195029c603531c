//! # Consumption Extensions
//!
//! Hooks the consume engine calls at fixed points of its loop. Every hook has
//! a no-op default so an extension only implements what it observes.

use std::fmt;

use super::context::ConsumptionContext;
use super::state::{ConsumerState, InFlightMessage};

pub trait Extension: Send {
    fn name(&self) -> &'static str;

    /// Once, before the first receive
    fn on_start(&mut self, _context: &mut ConsumptionContext) {}

    /// Before each attempt to claim a message
    fn on_before_receive(&mut self, _context: &mut ConsumptionContext) {}

    /// A message was claimed and is about to be processed
    fn on_pre_received(&mut self, _context: &mut ConsumptionContext) {}

    /// The message was processed and settled; the status is set
    fn on_post_received(&mut self, _context: &mut ConsumptionContext) {}

    /// Nothing was available after the polling interval
    fn on_idle(&mut self, _context: &mut ConsumptionContext) {}

    /// Once, after the loop stopped
    fn on_interrupted(&mut self, _context: &mut ConsumptionContext) {}
}

/// Ordered list of extensions dispatched as one.
///
/// Extensions may borrow from the caller for `'a`, e.g. the command's output
/// writer.
pub struct ChainExtension<'a> {
    extensions: Vec<Box<dyn Extension + 'a>>,
    state: ConsumerState,
}

impl<'a> ChainExtension<'a> {
    pub fn new(extensions: Vec<Box<dyn Extension + 'a>>, state: ConsumerState) -> Self {
        Self { extensions, state }
    }

    pub fn push(&mut self, extension: Box<dyn Extension + 'a>) {
        self.extensions.push(extension);
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.extensions.iter().map(|e| e.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    pub fn state(&self) -> &ConsumerState {
        &self.state
    }

    fn dispatch(
        &mut self,
        context: &mut ConsumptionContext,
        hook: impl Fn(&mut (dyn Extension + 'a), &mut ConsumptionContext),
    ) {
        for extension in &mut self.extensions {
            hook(extension.as_mut(), context);
        }
    }
}

impl fmt::Debug for ChainExtension<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainExtension")
            .field("extensions", &self.names())
            .field("state", &self.state)
            .finish()
    }
}

impl Extension for ChainExtension<'_> {
    fn name(&self) -> &'static str {
        "chain"
    }

    fn on_start(&mut self, context: &mut ConsumptionContext) {
        self.dispatch(context, |e, c| e.on_start(c));
    }

    fn on_before_receive(&mut self, context: &mut ConsumptionContext) {
        self.dispatch(context, |e, c| e.on_before_receive(c));
    }

    fn on_pre_received(&mut self, context: &mut ConsumptionContext) {
        self.state.set_in_flight(context.message().map(|message| InFlightMessage {
            message_id: message.id,
            transport_queue: message.queue.clone(),
            processor_name: context.processor_name().map(str::to_string),
        }));
        self.dispatch(context, |e, c| e.on_pre_received(c));
    }

    fn on_post_received(&mut self, context: &mut ConsumptionContext) {
        self.dispatch(context, |e, c| e.on_post_received(c));
        self.state.set_in_flight(None);
    }

    fn on_idle(&mut self, context: &mut ConsumptionContext) {
        self.dispatch(context, |e, c| e.on_idle(c));
    }

    fn on_interrupted(&mut self, context: &mut ConsumptionContext) {
        self.dispatch(context, |e, c| e.on_interrupted(c));
    }
}

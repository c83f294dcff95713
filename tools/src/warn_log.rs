use std::fmt;
use warn::Warn;

/// Reports warnings through the logger.
pub struct Log<'a> {
    context: &'a str,
}

impl<'a> Log<'a> {
    pub fn new(context: &'a str) -> Log<'a> {
        Log { context: context }
    }
}

impl<'a, W: fmt::Debug> Warn<W> for Log<'a> {
    fn warn(&mut self, warning: W) {
        warn!("{}: {:?}", self.context, warning);
    }
}

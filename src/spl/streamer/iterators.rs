use std::io::BufRead;

use super::{SplError, SplStreamer};
use crate::spl::node::XmlNode;

/// Iterator over product units in an SPL document
pub struct ProductIterator<R: BufRead> {
    pub(super) streamer: SplStreamer<R>,
}

impl<R: BufRead> Iterator for ProductIterator<R> {
    type Item = Result<XmlNode, SplError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.streamer.next_product() {
            Ok(Some(unit)) => Some(Ok(unit)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

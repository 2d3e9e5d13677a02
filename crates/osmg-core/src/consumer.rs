//! Receiver of completed OSM elements.
//!
//! A parser calls [`ElementConsumer::accept`] once per closed `<node>`,
//! `<way>`, or `<relation>`, in document order.  The consumer owns the
//! element from that point on.

use crate::OsmElement;

/// Three-way sink for parsed elements.  Dispatch on [`OsmElement`] is
/// exhaustive, so a consumer sees every kind explicitly.
pub trait ElementConsumer {
    fn accept(&mut self, element: OsmElement);
}

impl<C: ElementConsumer + ?Sized> ElementConsumer for &mut C {
    #[inline]
    fn accept(&mut self, element: OsmElement) {
        (**self).accept(element);
    }
}

/// Collects every element, in delivery order.
impl ElementConsumer for Vec<OsmElement> {
    fn accept(&mut self, element: OsmElement) {
        self.push(element);
    }
}

/// Adapter returned by [`from_fn`].
pub struct FnConsumer<F>(F);

/// Wrap a closure as an [`ElementConsumer`].
///
/// ```
/// use osmg_core::consumer::from_fn;
/// use osmg_core::{ElementConsumer, NodeBuilder, OsmId};
///
/// let mut count = 0;
/// let mut consumer = from_fn(|_| count += 1);
/// consumer.accept(NodeBuilder::new(OsmId(1), 0.0, 0.0).build().into());
/// drop(consumer);
/// assert_eq!(count, 1);
/// ```
pub fn from_fn<F: FnMut(OsmElement)>(f: F) -> FnConsumer<F> {
    FnConsumer(f)
}

impl<F: FnMut(OsmElement)> ElementConsumer for FnConsumer<F> {
    #[inline]
    fn accept(&mut self, element: OsmElement) {
        (self.0)(element);
    }
}

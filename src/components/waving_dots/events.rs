//! Theme change notifications between the page UI and the animation.

use std::cell::RefCell;
use std::rc::Rc;

use super::theme::ThemeMode;

/// Handle returned by [`ThemeBus::subscribe`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(ThemeMode)>;

#[derive(Default)]
struct BusInner {
	next_id: u64,
	listeners: Vec<(SubscriptionId, Listener)>,
	/// Ids whose listeners an in-flight publish has taken out of the list.
	checked_out: Vec<SubscriptionId>,
	/// Checked-out ids unsubscribed before their publish finished.
	removed: Vec<SubscriptionId>,
}

/// Single-threaded observer list for theme changes.
///
/// Cloning yields another handle to the same list. Listeners may subscribe or
/// unsubscribe from inside a callback; such changes apply from the next publish.
#[derive(Clone, Default)]
pub struct ThemeBus {
	inner: Rc<RefCell<BusInner>>,
}

impl ThemeBus {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn subscribe(&self, listener: impl FnMut(ThemeMode) + 'static) -> SubscriptionId {
		let mut inner = self.inner.borrow_mut();
		let id = SubscriptionId(inner.next_id);
		inner.next_id += 1;
		inner.listeners.push((id, Box::new(listener)));
		id
	}

	/// Remove a listener. Returns whether it was still subscribed.
	pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
		let mut inner = self.inner.borrow_mut();
		let before = inner.listeners.len();
		inner.listeners.retain(|(sid, _)| *sid != id);
		if inner.listeners.len() != before {
			return true;
		}
		if inner.checked_out.contains(&id) && !inner.removed.contains(&id) {
			inner.removed.push(id);
			return true;
		}
		false
	}

	/// Notify every listener. Returns how many were called.
	pub fn publish(&self, mode: ThemeMode) -> usize {
		let mut listeners = {
			let mut inner = self.inner.borrow_mut();
			let taken = std::mem::take(&mut inner.listeners);
			inner.checked_out.extend(taken.iter().map(|(id, _)| *id));
			taken
		};
		for (_, listener) in listeners.iter_mut() {
			listener(mode);
		}
		let called = listeners.len();

		let mut inner = self.inner.borrow_mut();
		let BusInner {
			listeners: current,
			checked_out,
			removed,
			..
		} = &mut *inner;
		checked_out.retain(|id| !listeners.iter().any(|(own, _)| own == id));
		listeners.retain(|(id, _)| !removed.contains(id));
		removed.retain(|id| checked_out.contains(id));
		let added = std::mem::replace(current, listeners);
		current.extend(added);
		called
	}

	pub fn listener_count(&self) -> usize {
		self.inner.borrow().listeners.len()
	}
}

//! Leptos DragDrop Utilities
//!
//! Simple column-based drag-and-drop for Leptos using mouse events.
//! Uses movement threshold to distinguish click from drag.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

thread_local! {
    static RELEASES: RefCell<HashMap<u64, Box<dyn FnOnce()>>> = RefCell::new(HashMap::new());
    static NEXT_RELEASE: Cell<u64> = const { Cell::new(0) };
}

/// Run `release` when the current reactive owner is cleaned up.
///
/// `on_cleanup` wants a `Send` closure, while DOM handles are not, so the
/// release itself stays in a thread-local table and only its key crosses over.
pub fn release_on_cleanup(release: impl FnOnce() + 'static) {
    let key = NEXT_RELEASE.with(|next| {
        let key = next.get();
        next.set(key + 1);
        key
    });
    RELEASES.with(|table| table.borrow_mut().insert(key, Box::new(release)));

    on_cleanup(move || {
        let release = RELEASES.with(|table| table.borrow_mut().remove(&key));
        if let Some(release) = release {
            release();
        }
    });
}

/// Attach `listener` to the document until the current owner goes away
fn listen_on_document(event: &'static str, listener: Closure<dyn FnMut(web_sys::MouseEvent)>) {
    let Some(doc) = web_sys::window().and_then(|win| win.document()) else { return };
    if doc.add_event_listener_with_callback(event, listener.as_ref().unchecked_ref()).is_err() {
        return;
    }

    release_on_cleanup(move || {
        let _ = doc.remove_event_listener_with_callback(event, listener.as_ref().unchecked_ref());
    });
}

/// A position on a board: which column, and where inside it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DropSlot<C> {
    pub column: C,
    pub index: usize,
}

impl<C> DropSlot<C> {
    pub fn new(column: C, index: usize) -> Self {
        Self { column, index }
    }
}

/// Completed drag, delivered on mouseup
#[derive(Clone, Debug, PartialEq)]
pub struct DropResult<K, C> {
    pub item_id: K,
    pub source: DropSlot<C>,
    /// None when released outside every column
    pub destination: Option<DropSlot<C>>,
}

/// DnD state signals
pub struct DndSignals<K: 'static, C: 'static> {
    pub dragging_id_read: ReadSignal<Option<K>>,
    pub dragging_id_write: WriteSignal<Option<K>>,
    pub source_read: ReadSignal<Option<DropSlot<C>>>,
    pub source_write: WriteSignal<Option<DropSlot<C>>>,
    pub hover_read: ReadSignal<Option<DropSlot<C>>>,
    pub hover_write: WriteSignal<Option<DropSlot<C>>>,
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    /// Pending item id (mousedown but not yet dragging)
    pub pending_id_read: ReadSignal<Option<K>>,
    pub pending_id_write: WriteSignal<Option<K>>,
    /// Start position for movement detection
    pub start_read: ReadSignal<(i32, i32)>,
    pub start_write: WriteSignal<(i32, i32)>,
}

impl<K: 'static, C: 'static> Clone for DndSignals<K, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: 'static, C: 'static> Copy for DndSignals<K, C> {}

/// Movement threshold in pixels to start dragging
pub const DRAG_THRESHOLD_PX: i32 = 5;

/// Whether the pointer moved far enough from `start` to count as a drag
pub fn exceeds_threshold(start: (i32, i32), current: (i32, i32)) -> bool {
    let dx = (current.0 - start.0).abs();
    let dy = (current.1 - start.1).abs();
    dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX
}

/// Build the drop result for a release. Only an actual drag (not a click) yields one.
pub fn resolve_drop<K, C>(
    dragging: Option<K>,
    source: Option<DropSlot<C>>,
    hover: Option<DropSlot<C>>,
) -> Option<DropResult<K, C>> {
    match (dragging, source) {
        (Some(item_id), Some(source)) => Some(DropResult {
            item_id,
            source,
            destination: hover,
        }),
        _ => None,
    }
}

pub fn create_dnd_signals<K, C>() -> DndSignals<K, C>
where
    K: Clone + PartialEq + Send + Sync + 'static,
    C: Clone + PartialEq + Send + Sync + 'static,
{
    let (dragging_id_read, dragging_id_write) = signal(None::<K>);
    let (source_read, source_write) = signal(None::<DropSlot<C>>);
    let (hover_read, hover_write) = signal(None::<DropSlot<C>>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (pending_id_read, pending_id_write) = signal(None::<K>);
    let (start_read, start_write) = signal((0i32, 0i32));
    DndSignals {
        dragging_id_read,
        dragging_id_write,
        source_read,
        source_write,
        hover_read,
        hover_write,
        drag_just_ended_read,
        drag_just_ended_write,
        pending_id_read,
        pending_id_write,
        start_read,
        start_write,
    }
}

/// End drag operation
pub fn end_drag<K, C>(dnd: &DndSignals<K, C>)
where
    K: Clone + PartialEq + Send + Sync + 'static,
    C: Clone + PartialEq + Send + Sync + 'static,
{
    dnd.dragging_id_write.set(None);
    dnd.source_write.set(None);
    dnd.hover_write.set(None);
    dnd.pending_id_write.set(None);
    dnd.drag_just_ended_write.set(true);

    if let Some(win) = web_sys::window() {
        let clear = dnd.drag_just_ended_write;
        let cb = Closure::<dyn FnMut()>::new(move || {
            clear.set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), 100);
        cb.forget();
    }
}

/// Create mousedown handler for a draggable card sitting at `source`
/// Records pending drag with start position
pub fn make_on_mousedown<K, C>(dnd: DndSignals<K, C>, item_id: K, source: DropSlot<C>) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    K: Clone + PartialEq + Send + Sync + 'static,
    C: Clone + PartialEq + Send + Sync + 'static,
{
    move |ev: web_sys::MouseEvent| {
        if ev.button() == 0 {
            // Ignore if target is a control
            if let Some(target) = ev.target() {
                if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
                if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
                if target.dyn_ref::<web_sys::HtmlSelectElement>().is_some() { return; }
            }
            dnd.pending_id_write.set(Some(item_id.clone()));
            dnd.source_write.set(Some(source.clone()));
            dnd.start_write.set((ev.client_x(), ev.client_y()));
        }
    }
}

/// Bind document mousemove - starts drag if moved enough
///
/// The listener is removed when the calling component unmounts.
pub fn bind_global_mousemove<K, C>(dnd: DndSignals<K, C>)
where
    K: Clone + PartialEq + Send + Sync + 'static,
    C: Clone + PartialEq + Send + Sync + 'static,
{
    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        // Signals are gone once the owning view unmounts
        let Some(pending) = dnd.pending_id_read.try_get_untracked() else { return };

        if pending.is_some() && dnd.dragging_id_read.try_get_untracked().flatten().is_none() {
            let start = dnd.start_read.try_get_untracked().unwrap_or_default();
            if exceeds_threshold(start, (ev.client_x(), ev.client_y())) {
                dnd.dragging_id_write.set(pending);
            }
        }
    });

    listen_on_document("mousemove", on_mousemove);
}

/// Create mouseenter handler for a card or column tail (hover slot)
pub fn make_on_slot_mouseenter<K, C>(dnd: DndSignals<K, C>, slot: DropSlot<C>) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    K: Clone + PartialEq + Send + Sync + 'static,
    C: Clone + PartialEq + Send + Sync + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.get_untracked().is_some() {
            dnd.hover_write.set(Some(slot.clone()));
        }
    }
}

/// Create mouseleave handler for a whole column
pub fn make_on_mouseleave<K, C>(dnd: DndSignals<K, C>) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    K: Clone + PartialEq + Send + Sync + 'static,
    C: Clone + PartialEq + Send + Sync + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.get_untracked().is_some() {
            dnd.hover_write.set(None);
        }
    }
}

/// Bind global mouseup handler for drop detection, detached on unmount
pub fn bind_global_mouseup<K, C, F>(dnd: DndSignals<K, C>, on_drop: F)
where
    K: Clone + PartialEq + Send + Sync + 'static,
    C: Clone + PartialEq + Send + Sync + 'static,
    F: Fn(DropResult<K, C>) + 'static,
{
    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        let Some(dragging) = dnd.dragging_id_read.try_get_untracked() else { return };
        let dropped = resolve_drop(
            dragging,
            dnd.source_read.try_get_untracked().flatten(),
            dnd.hover_read.try_get_untracked().flatten(),
        );

        end_drag(&dnd);
        // A plain click falls through to the element's own click handler
        if let Some(result) = dropped {
            on_drop(result);
        }
    });

    listen_on_document("mouseup", on_mouseup);

    // Also bind global mousemove
    bind_global_mousemove(dnd);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold() {
        assert!(!exceeds_threshold((10, 10), (10, 10)));
        assert!(!exceeds_threshold((10, 10), (15, 5)));
        assert!(exceeds_threshold((10, 10), (16, 10)));
        assert!(exceeds_threshold((10, 10), (10, 4)));
    }

    #[test]
    fn test_click_is_not_a_drop() {
        let source = DropSlot::new("New", 0);
        assert_eq!(resolve_drop(None::<u32>, Some(source), Some(source)), None);
    }

    #[test]
    fn test_drop_outside_columns_has_no_destination() {
        let source = DropSlot::new("New", 2);
        let result = resolve_drop(Some(7u32), Some(source), None).unwrap();
        assert_eq!(result.item_id, 7);
        assert_eq!(result.source, source);
        assert_eq!(result.destination, None);
    }

    #[test]
    fn test_drop_on_slot() {
        let result = resolve_drop(
            Some("a".to_string()),
            Some(DropSlot::new(0u8, 1)),
            Some(DropSlot::new(2u8, 0)),
        )
        .unwrap();
        assert_eq!(result.destination, Some(DropSlot::new(2, 0)));
    }

    #[test]
    fn test_release_runs_on_owner_cleanup() {
        use std::rc::Rc;

        let released = Rc::new(Cell::new(0));
        let owner = Owner::new();
        owner.with(|| {
            let released = Rc::clone(&released);
            release_on_cleanup(move || released.set(released.get() + 1));
        });
        assert_eq!(released.get(), 0);

        owner.cleanup();
        assert_eq!(released.get(), 1);
        assert!(RELEASES.with(|table| table.borrow().is_empty()));

        // A second cleanup finds nothing left to release
        owner.cleanup();
        assert_eq!(released.get(), 1);
    }
}

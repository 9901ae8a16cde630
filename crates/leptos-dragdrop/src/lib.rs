//! Leptos DragDrop Utilities
//!
//! Pointer-driven reordering for vertical lists in Leptos using mouse events.
//! Uses movement threshold to distinguish click from drag.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Where a dragged row will land
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DropTarget {
    /// Insert before the row with this id
    Before(u32),
    /// Append after the last row
    End,
}

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    pub dragging_id_read: ReadSignal<Option<u32>>,
    pub dragging_id_write: WriteSignal<Option<u32>>,
    pub drop_target_read: ReadSignal<Option<DropTarget>>,
    pub drop_target_write: WriteSignal<Option<DropTarget>>,
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    /// Pending row id (mousedown but not yet dragging)
    pub pending_id_read: ReadSignal<Option<u32>>,
    pub pending_id_write: WriteSignal<Option<u32>>,
    /// Start position for movement detection
    pub start_x_read: ReadSignal<i32>,
    pub start_x_write: WriteSignal<i32>,
    pub start_y_read: ReadSignal<i32>,
    pub start_y_write: WriteSignal<i32>,
}

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;

pub fn create_dnd_signals() -> DndSignals {
    let (dragging_id_read, dragging_id_write) = signal(None::<u32>);
    let (drop_target_read, drop_target_write) = signal(None::<DropTarget>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (pending_id_read, pending_id_write) = signal(None::<u32>);
    let (start_x_read, start_x_write) = signal(0i32);
    let (start_y_read, start_y_write) = signal(0i32);
    DndSignals {
        dragging_id_read,
        dragging_id_write,
        drop_target_read,
        drop_target_write,
        drag_just_ended_read,
        drag_just_ended_write,
        pending_id_read,
        pending_id_write,
        start_x_read,
        start_x_write,
        start_y_read,
        start_y_write,
    }
}

/// True once the pointer has travelled far enough to count as a drag
pub fn exceeds_threshold(start: (i32, i32), now: (i32, i32)) -> bool {
    (now.0 - start.0).abs() > DRAG_THRESHOLD_PX || (now.1 - start.1).abs() > DRAG_THRESHOLD_PX
}

/// Pick the drop target for a pointer at `pointer_y`.
///
/// `rows` are `(id, vertical midpoint)` pairs in display order. The dragged
/// row is skipped; the first remaining row whose midpoint lies below the
/// pointer wins, otherwise the row is appended.
pub fn insertion_target(rows: &[(u32, f64)], dragged: u32, pointer_y: f64) -> DropTarget {
    rows.iter()
        .filter(|(id, _)| *id != dragged)
        .find(|(_, mid)| pointer_y < *mid)
        .map(|(id, _)| DropTarget::Before(*id))
        .unwrap_or(DropTarget::End)
}

/// Measure row midpoints for elements with DOM ids `{prefix}{id}`.
/// Rows that are not rendered are skipped.
pub fn measure_rows(ids: &[u32], prefix: &str) -> Vec<(u32, f64)> {
    let Some(doc) = web_sys::window().and_then(|w| w.document()) else {
        return Vec::new();
    };
    ids.iter()
        .filter_map(|id| {
            let el = doc.get_element_by_id(&format!("{}{}", prefix, id))?;
            let rect = el.get_bounding_client_rect();
            Some((*id, rect.top() + rect.height() / 2.0))
        })
        .collect()
}

/// End drag operation
pub fn end_drag(dnd: &DndSignals) {
    dnd.dragging_id_write.set(None);
    dnd.drop_target_write.set(None);
    dnd.pending_id_write.set(None);
    dnd.drag_just_ended_write.set(true);

    if let Some(win) = web_sys::window() {
        let clear = dnd.drag_just_ended_write;
        let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
            clear.try_set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), 100);
        cb.forget();
    }
}

/// Create mousedown handler for draggable rows
/// Records pending drag with start position
pub fn make_on_mousedown(dnd: DndSignals, row_id: u32) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() == 0 {
            // Ignore if target is input or button
            if let Some(target) = ev.target() {
                if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
                if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
            }
            dnd.pending_id_write.set(Some(row_id));
            dnd.start_x_write.set(ev.client_x());
            dnd.start_y_write.set(ev.client_y());
        }
    }
}

/// Bind document mousemove: starts the drag once past the threshold, then
/// keeps the drop target current using `locate(dragged_id, pointer_y)`.
///
/// Handlers become no-ops once the signals are disposed.
pub fn bind_global_mousemove<L>(dnd: DndSignals, locate: L)
where
    L: Fn(u32, f64) -> DropTarget + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let Some(pending) = dnd.pending_id_read.try_get_untracked() else { return; };
        let dragging = dnd.dragging_id_read.try_get_untracked().flatten();

        match (pending, dragging) {
            (Some(id), None) => {
                let start = (
                    dnd.start_x_read.get_untracked(),
                    dnd.start_y_read.get_untracked(),
                );
                if exceeds_threshold(start, (ev.client_x(), ev.client_y())) {
                    dnd.dragging_id_write.set(Some(id));
                    dnd.drop_target_write.set(Some(locate(id, ev.client_y() as f64)));
                }
            }
            (_, Some(id)) => {
                let target = locate(id, ev.client_y() as f64);
                if dnd.drop_target_read.get_untracked() != Some(target) {
                    dnd.drop_target_write.set(Some(target));
                }
            }
            _ => {}
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
        }
    }
    on_mousemove.forget();
}

/// Bind global mouseup handler for drop detection, plus the mousemove
/// handler that tracks the drop target.
pub fn bind_global_mouseup<L, F>(dnd: DndSignals, locate: L, on_drop: F)
where
    L: Fn(u32, f64) -> DropTarget + 'static,
    F: Fn(u32, DropTarget) + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        let Some(dragging_id) = dnd.dragging_id_read.try_get_untracked() else { return; };
        let drop_target = dnd.drop_target_read.get_untracked();

        dnd.pending_id_write.set(None);

        if let (Some(dragged), Some(target)) = (dragging_id, drop_target) {
            end_drag(&dnd);
            on_drop(dragged, target);
        } else if dragging_id.is_some() {
            end_drag(&dnd);
        }
        // A plain click leaves the click event to the row
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
        }
    }
    on_mouseup.forget();

    bind_global_mousemove(dnd, locate);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<(u32, f64)> {
        vec![(1, 10.0), (2, 30.0), (3, 50.0)]
    }

    #[test]
    fn test_insert_before_first_row_below_pointer() {
        assert_eq!(insertion_target(&rows(), 3, 5.0), DropTarget::Before(1));
        assert_eq!(insertion_target(&rows(), 3, 20.0), DropTarget::Before(2));
    }

    #[test]
    fn test_pointer_below_all_rows_appends() {
        assert_eq!(insertion_target(&rows(), 1, 99.0), DropTarget::End);
    }

    #[test]
    fn test_dragged_row_is_skipped() {
        // Pointer above row 2's midpoint while dragging row 2 itself
        assert_eq!(insertion_target(&rows(), 2, 20.0), DropTarget::Before(3));
    }

    #[test]
    fn test_empty_list_appends() {
        assert_eq!(insertion_target(&[], 7, 0.0), DropTarget::End);
    }

    #[test]
    fn test_threshold() {
        assert!(!exceeds_threshold((0, 0), (5, -5)));
        assert!(exceeds_threshold((0, 0), (0, 6)));
        assert!(exceeds_threshold((10, 10), (3, 10)));
    }
}

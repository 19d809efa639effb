use leptos::ev::MouseEvent;
use leptos::html::Canvas as CanvasNode;
use leptos::{create_node_ref, create_signal, NodeRef, Signal, SignalGet, SignalSet, WriteSignal};
use leptos_use::{use_device_pixel_ratio, use_element_size, UseElementSizeReturn};

pub struct UseCanvasReturn {
    pub node_ref: NodeRef<CanvasNode>,
    pub dpr: Signal<f64>,
    pub width: Signal<f64>,
    pub height: Signal<f64>,
    pub actual_width: Signal<f64>,
    pub actual_height: Signal<f64>,
    /// Pointer abscissa relative to the canvas, `None` when outside.
    pub hover_x: Signal<Option<f64>>,
    pub on_mousemove: Box<dyn Fn(MouseEvent)>,
    pub set_hover_x: WriteSignal<Option<f64>>,
}

pub fn use_canvas() -> UseCanvasReturn {
    let node_ref = create_node_ref::<CanvasNode>();
    let dpr = use_device_pixel_ratio();
    let UseElementSizeReturn { width, height } = use_element_size(node_ref);
    let actual_width = move || width.get() * dpr.get();
    let actual_height = move || height.get() * dpr.get();

    let (hover_x, set_hover_x) = create_signal(None);
    let on_mousemove = move |evt: MouseEvent| {
        let Some(canvas_node) = node_ref.get() else {
            return;
        };

        let dom_rect = canvas_node.get_bounding_client_rect();
        set_hover_x.set(Some(f64::from(evt.client_x()) - dom_rect.left()));
    };

    UseCanvasReturn {
        node_ref,
        dpr,
        width,
        height,
        actual_width: actual_width.into(),
        actual_height: actual_height.into(),
        hover_x: hover_x.into(),
        on_mousemove: Box::new(on_mousemove),
        set_hover_x,
    }
}
